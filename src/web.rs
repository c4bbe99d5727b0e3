//! HTTP surface: route table, request/response DTOs, and the embedded
//! dashboard page. Every input change posts the full input state back to
//! `/api/dashboard`; nothing is kept server-side between interactions.

use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::metrics::{self, FinalCgpaPolicy, GradeMetrics};
use crate::records::{ManualEntry, RecordStore, SemesterRecord};
use crate::views::{self, RenderDirective, View};

/// Where the records come from. The provenance also picks the final-CGPA
/// policy: complete data (sample, upload) reads the last record strictly,
/// manual entry skips unfilled semesters.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    Sample,
    Upload { csv: String },
    Manual { semesters: Vec<ManualEntry> },
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardRequest {
    pub source: DataSource,
    pub view: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub records: Vec<SemesterRecord>,
    pub metrics: GradeMetrics,
    pub directive: RenderDirective,
}

/// The whole recomputation cycle as one pure function: input state in,
/// (records, metrics, render directive) out.
pub fn build_dashboard(request: &DashboardRequest) -> Result<DashboardResponse> {
    let (store, policy) = match &request.source {
        DataSource::Sample => (RecordStore::sample(), FinalCgpaPolicy::StrictLast),
        DataSource::Upload { csv } => (
            RecordStore::from_csv(csv.as_bytes())?,
            FinalCgpaPolicy::StrictLast,
        ),
        DataSource::Manual { semesters } => (
            RecordStore::from_manual(semesters)?,
            FinalCgpaPolicy::LastNonzero,
        ),
    };

    let metrics = metrics::compute(&store, policy)?;
    let directive = views::render_named(&request.view, &store);

    Ok(DashboardResponse {
        records: store.records().to_vec(),
        metrics,
        directive,
    })
}

async fn dashboard(request: web::Json<DashboardRequest>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(build_dashboard(&request)?))
}

async fn view_names() -> HttpResponse {
    let names: Vec<&str> = View::ALL.iter().map(|v| v.name()).collect();
    HttpResponse::Ok().json(names)
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().body("SGPA & CGPA dashboard is running!")
}

async fn serve_homepage() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html")
        .body(DASHBOARD_PAGE)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(serve_homepage))
        .route("/api/dashboard", web::post().to(dashboard))
        .route("/api/views", web::get().to(view_names))
        .route("/health", web::get().to(health_check));
}

pub async fn start_api(host: &str, port: u16) -> std::io::Result<()> {
    HttpServer::new(|| {
        App::new()
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind((host, port))?
    .run()
    .await
}

const DASHBOARD_PAGE: &str = r#"
    <!DOCTYPE html>
    <html>
    <head>
        <title>SGPA & CGPA Progression Dashboard</title>
        <style>
            body { font-family: Arial, sans-serif; max-width: 820px; margin: 40px auto; padding: 20px; }
            .container { background: #f5f5f5; padding: 25px; border-radius: 10px; }
            .panel { background: white; padding: 20px; border-radius: 8px; margin: 15px 0; }
            .form-group { margin: 12px 0; }
            label { display: block; margin-bottom: 5px; font-weight: bold; }
            input, select, textarea { padding: 8px; border: 1px solid #ddd; border-radius: 4px; }
            textarea { width: 100%; font-family: monospace; }
            button { background: #007bff; color: white; padding: 12px 24px; border: none; border-radius: 4px; cursor: pointer; margin: 5px 0; }
            button:hover { background: #0056b3; }
            .message { margin: 15px 0; padding: 15px; border-radius: 5px; display: none; }
            .message-error { background: #f8d7da; color: #721c24; border: 1px solid #f5c6cb; }
            .message-info { background: #fff3cd; color: #856404; border: 1px solid #ffeaa7; }
            .metrics-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 15px; margin: 15px 0; }
            .metric-card { background: white; padding: 15px; border-radius: 8px; border-left: 4px solid #007bff; }
            .metric-card p { font-size: 24px; margin: 5px 0 0 0; color: #007bff; }
            .metric-card span { color: #6c757d; font-size: 13px; }
            .manual-row { display: flex; gap: 10px; align-items: center; margin: 6px 0; }
            .manual-row span { width: 60px; font-weight: bold; }
            .data-table { width: 100%; border-collapse: collapse; margin: 15px 0; }
            .data-table th, .data-table td { padding: 10px; text-align: left; border-bottom: 1px solid #ddd; }
            .data-table th { background: #f8f9fa; }
            canvas { background: white; border: 1px solid #ddd; border-radius: 4px; }
        </style>
    </head>
    <body>
        <div class="container">
            <h1>🎓 SGPA & CGPA Progression Dashboard</h1>
            <p>
                Visualize your Semester Grade Point Average (SGPA) and Cumulative Grade
                Point Average (CGPA) progression over multiple semesters. Paste a CSV
                table (columns: Semester, SGPA, CGPA), enter grades manually, or use
                the sample dataset.
            </p>

            <div class="panel">
                <h3>Data Input</h3>
                <div class="form-group">
                    <label><input type="radio" name="source" value="sample" checked onchange="sourceChanged()"> Use sample dataset</label>
                    <label><input type="radio" name="source" value="upload" onchange="sourceChanged()"> Upload CSV</label>
                    <label><input type="radio" name="source" value="manual" onchange="sourceChanged()"> Manual entry</label>
                </div>

                <div id="upload-section" style="display: none;">
                    <textarea id="csv-text" rows="8" placeholder="Semester,SGPA,CGPA
Sem 1,8.35,8.35
Sem 2,8.03,8.19
Sem 3,7.34,7.91"></textarea>
                </div>

                <div id="manual-section" style="display: none;">
                    <div class="form-group">
                        <label for="sem-count">Number of semesters (1-20):</label>
                        <input type="number" id="sem-count" min="1" max="20" value="8" onchange="buildManualRows()">
                    </div>
                    <div id="manual-rows"></div>
                </div>
            </div>

            <div class="panel">
                <h3>Chart Options</h3>
                <div class="form-group">
                    <label for="view-select">Select View:</label>
                    <select id="view-select" onchange="refresh()"></select>
                </div>
            </div>

            <button onclick="refresh()">📊 Update Dashboard</button>

            <div id="message" class="message"></div>

            <div id="output" class="panel" style="display: none;">
                <h2 id="chart-title"></h2>
                <canvas id="chart" width="740" height="400"></canvas>
                <div id="table-area"></div>
                <h3>📈 Metrics</h3>
                <div id="metrics" class="metrics-grid"></div>
            </div>
        </div>

        <script>
            async function init() {
                const select = document.getElementById('view-select');
                const names = await (await fetch('/api/views')).json();
                for (const name of names) {
                    const option = document.createElement('option');
                    option.value = name;
                    option.textContent = name;
                    select.appendChild(option);
                }
                buildManualRows();
                refresh();
            }

            function sourceChanged() {
                const kind = document.querySelector('input[name=source]:checked').value;
                document.getElementById('upload-section').style.display = kind === 'upload' ? 'block' : 'none';
                document.getElementById('manual-section').style.display = kind === 'manual' ? 'block' : 'none';
                refresh();
            }

            function buildManualRows() {
                const count = Math.min(20, Math.max(1, parseInt(document.getElementById('sem-count').value) || 1));
                const rows = document.getElementById('manual-rows');
                const previous = collectManual();
                rows.innerHTML = '';
                for (let i = 0; i < count; i++) {
                    const row = document.createElement('div');
                    row.className = 'manual-row';
                    const sgpa = previous[i] ? previous[i].sgpa : 0;
                    const cgpa = previous[i] ? previous[i].cgpa : 0;
                    row.innerHTML = '<span>Sem ' + (i + 1) + '</span>' +
                        'SGPA <input type="number" class="sgpa-input" min="0" max="10" step="0.01" value="' + sgpa.toFixed(2) + '"> ' +
                        'CGPA <input type="number" class="cgpa-input" min="0" max="10" step="0.01" value="' + cgpa.toFixed(2) + '">';
                    rows.appendChild(row);
                }
            }

            function collectManual() {
                const sgpas = document.querySelectorAll('.sgpa-input');
                const cgpas = document.querySelectorAll('.cgpa-input');
                const semesters = [];
                for (let i = 0; i < sgpas.length; i++) {
                    semesters.push({
                        sgpa: parseFloat(sgpas[i].value) || 0,
                        cgpa: parseFloat(cgpas[i].value) || 0,
                    });
                }
                return semesters;
            }

            function currentSource() {
                const kind = document.querySelector('input[name=source]:checked').value;
                if (kind === 'upload') {
                    return { kind: 'upload', csv: document.getElementById('csv-text').value };
                }
                if (kind === 'manual') {
                    return { kind: 'manual', semesters: collectManual() };
                }
                return { kind: 'sample' };
            }

            async function refresh() {
                const message = document.getElementById('message');
                const output = document.getElementById('output');
                const body = {
                    source: currentSource(),
                    view: document.getElementById('view-select').value || 'Combined',
                };

                try {
                    const response = await fetch('/api/dashboard', {
                        method: 'POST',
                        headers: {'Content-Type': 'application/json'},
                        body: JSON.stringify(body),
                    });
                    const data = await response.json();

                    if (!response.ok) {
                        output.style.display = 'none';
                        message.style.display = 'block';
                        message.className = 'message ' + (data.kind === 'empty_input' ? 'message-info' : 'message-error');
                        message.textContent = data.error;
                        return;
                    }

                    message.style.display = 'none';
                    output.style.display = 'block';
                    renderDirective(data.directive);
                    renderMetrics(data.metrics);
                } catch (error) {
                    output.style.display = 'none';
                    message.style.display = 'block';
                    message.className = 'message message-error';
                    message.textContent = 'Error: ' + error.message;
                }
            }

            function renderDirective(directive) {
                const canvas = document.getElementById('chart');
                const tableArea = document.getElementById('table-area');
                document.getElementById('chart-title').textContent = directive.title || '';

                if (directive.kind === 'line_chart') {
                    canvas.style.display = 'block';
                    tableArea.innerHTML = '';
                    drawLineChart(canvas, directive);
                } else if (directive.kind === 'table') {
                    canvas.style.display = 'none';
                    renderTable(tableArea, directive);
                } else {
                    canvas.style.display = 'none';
                    tableArea.innerHTML = '';
                }
            }

            function drawLineChart(canvas, directive) {
                const ctx = canvas.getContext('2d');
                const colors = ['#1f77b4', '#ff7f0e'];
                const pad = 50;
                const width = canvas.width - 2 * pad;
                const height = canvas.height - 2 * pad;
                ctx.clearRect(0, 0, canvas.width, canvas.height);

                const labels = directive.labels;
                const all = directive.series.flatMap(s => s.values);
                if (all.length === 0) { return; }
                let min = Math.min(...all);
                let max = Math.max(...all);
                if (min === max) { min -= 1; max += 1; }

                const x = i => pad + (labels.length === 1 ? width / 2 : i * width / (labels.length - 1));
                const y = v => pad + height - (v - min) / (max - min) * height;

                ctx.strokeStyle = '#ccc';
                ctx.fillStyle = '#333';
                ctx.font = '12px Arial';
                ctx.beginPath();
                ctx.moveTo(pad, pad);
                ctx.lineTo(pad, pad + height);
                ctx.lineTo(pad + width, pad + height);
                ctx.stroke();
                for (let g = 0; g <= 4; g++) {
                    const value = min + (max - min) * g / 4;
                    ctx.fillText(value.toFixed(2), 5, y(value) + 4);
                }
                labels.forEach((label, i) => {
                    ctx.fillText(label, x(i) - 15, pad + height + 18);
                });

                directive.series.forEach((s, si) => {
                    ctx.strokeStyle = colors[si % colors.length];
                    ctx.fillStyle = colors[si % colors.length];
                    ctx.lineWidth = 3;
                    ctx.beginPath();
                    s.values.forEach((v, i) => {
                        if (i === 0) { ctx.moveTo(x(i), y(v)); } else { ctx.lineTo(x(i), y(v)); }
                    });
                    ctx.stroke();
                    s.values.forEach((v, i) => {
                        ctx.beginPath();
                        ctx.arc(x(i), y(v), 4, 0, 2 * Math.PI);
                        ctx.fill();
                    });
                    ctx.fillText(s.name, pad + width - 60, pad + 16 * (si + 1));
                });
            }

            function renderTable(area, directive) {
                const header = directive.columns.map(c => '<th>' + c + '</th>').join('');
                const rows = directive.rows.map(r =>
                    '<tr><td>' + r.semester + '</td><td>' + r.sgpa.toFixed(2) + '</td><td>' + r.cgpa.toFixed(2) + '</td></tr>'
                ).join('');
                area.innerHTML = '<table class="data-table"><thead><tr>' + header + '</tr></thead><tbody>' + rows + '</tbody></table>';
            }

            function renderMetrics(metrics) {
                const cards = [
                    ['Highest SGPA', metrics.highest_sgpa.value.toFixed(2), 'in ' + metrics.highest_sgpa.semester],
                    ['Lowest SGPA', metrics.lowest_sgpa.value.toFixed(2), 'in ' + metrics.lowest_sgpa.semester],
                    ['Average SGPA', metrics.average_sgpa.toFixed(2), 'across all semesters'],
                    ['Final CGPA', metrics.final_cgpa.value.toFixed(2), 'as of ' + metrics.final_cgpa.semester],
                ];
                document.getElementById('metrics').innerHTML = cards.map(c =>
                    '<div class="metric-card"><h4>' + c[0] + '</h4><p>' + c[1] + '</p><span>' + c[2] + '</span></div>'
                ).join('');
            }

            init();
        </script>
    </body>
    </html>
    "#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provenance_picks_the_final_cgpa_policy() {
        let manual = DashboardRequest {
            source: DataSource::Manual {
                semesters: vec![
                    ManualEntry { sgpa: 8.0, cgpa: 8.0 },
                    ManualEntry::default(),
                ],
            },
            view: "Combined".to_string(),
        };
        let response = build_dashboard(&manual).unwrap();
        assert_eq!(response.metrics.final_cgpa.semester, "Sem 1");

        let sample = DashboardRequest {
            source: DataSource::Sample,
            view: "Combined".to_string(),
        };
        let response = build_dashboard(&sample).unwrap();
        assert_eq!(response.metrics.final_cgpa.semester, "Sem 8");
    }

    #[test]
    fn unknown_view_still_returns_records_and_metrics() {
        let request = DashboardRequest {
            source: DataSource::Sample,
            view: "Histogram".to_string(),
        };
        let response = build_dashboard(&request).unwrap();
        assert_eq!(response.records.len(), 8);
        assert_eq!(response.directive, RenderDirective::None);
    }
}
