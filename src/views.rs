//! View selection: a pure mapping from a view name to the render directive
//! the browser-side renderer consumes.

use serde::{Deserialize, Serialize};

use crate::records::{RecordStore, SemesterRecord};

/// The closed set of selectable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    Combined,
    OnlySgpa,
    OnlyCgpa,
    DataTable,
}

impl View {
    pub const ALL: [View; 4] = [View::Combined, View::OnlySgpa, View::OnlyCgpa, View::DataTable];

    pub fn from_name(name: &str) -> Option<View> {
        match name {
            "Combined" => Some(View::Combined),
            "Only SGPA" => Some(View::OnlySgpa),
            "Only CGPA" => Some(View::OnlyCgpa),
            "Data Table" => Some(View::DataTable),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            View::Combined => "Combined",
            View::OnlySgpa => "Only SGPA",
            View::OnlyCgpa => "Only CGPA",
            View::DataTable => "Data Table",
        }
    }
}

/// One named series of values, parallel to the chart labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// What the rendering collaborator should draw. `None` is the no-op for view
/// names outside the closed enumeration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderDirective {
    LineChart {
        title: String,
        labels: Vec<String>,
        series: Vec<ChartSeries>,
        shared_axis: bool,
    },
    Table {
        title: String,
        columns: Vec<String>,
        rows: Vec<SemesterRecord>,
    },
    None,
}

pub fn render(view: View, store: &RecordStore) -> RenderDirective {
    match view {
        View::Combined => RenderDirective::LineChart {
            title: "Combined SGPA & CGPA Progression".to_string(),
            labels: labels(store),
            series: vec![series(store, Metric::Sgpa), series(store, Metric::Cgpa)],
            shared_axis: true,
        },
        View::OnlySgpa => RenderDirective::LineChart {
            title: "SGPA Progression".to_string(),
            labels: labels(store),
            series: vec![series(store, Metric::Sgpa)],
            shared_axis: false,
        },
        View::OnlyCgpa => RenderDirective::LineChart {
            title: "CGPA Progression".to_string(),
            labels: labels(store),
            series: vec![series(store, Metric::Cgpa)],
            shared_axis: false,
        },
        View::DataTable => RenderDirective::Table {
            title: "Raw Data Table".to_string(),
            columns: vec!["Semester".to_string(), "SGPA".to_string(), "CGPA".to_string()],
            rows: store.records().to_vec(),
        },
    }
}

/// Dispatch by name. Unknown names are not expected from the paired UI and
/// map to the no-render directive.
pub fn render_named(name: &str, store: &RecordStore) -> RenderDirective {
    match View::from_name(name) {
        Some(view) => render(view, store),
        None => RenderDirective::None,
    }
}

enum Metric {
    Sgpa,
    Cgpa,
}

fn labels(store: &RecordStore) -> Vec<String> {
    store.records().iter().map(|r| r.semester.clone()).collect()
}

fn series(store: &RecordStore, metric: Metric) -> ChartSeries {
    let (name, values) = match metric {
        Metric::Sgpa => ("SGPA", store.records().iter().map(|r| r.sgpa).collect()),
        Metric::Cgpa => ("CGPA", store.records().iter().map(|r| r.cgpa).collect()),
    };
    ChartSeries {
        name: name.to_string(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_names_round_trip() {
        for view in View::ALL {
            assert_eq!(View::from_name(view.name()), Some(view));
        }
        assert_eq!(View::from_name("Pie Chart"), None);
    }

    #[test]
    fn combined_view_requests_both_series_on_a_shared_axis() {
        let store = RecordStore::sample();
        match render(View::Combined, &store) {
            RenderDirective::LineChart {
                labels,
                series,
                shared_axis,
                ..
            } => {
                assert_eq!(labels.len(), 8);
                assert_eq!(series.len(), 2);
                assert_eq!(series[0].name, "SGPA");
                assert_eq!(series[1].name, "CGPA");
                assert!(shared_axis);
            }
            other => panic!("expected a line chart, got {other:?}"),
        }
    }

    #[test]
    fn single_metric_views_request_one_series() {
        let store = RecordStore::sample();
        match render(View::OnlyCgpa, &store) {
            RenderDirective::LineChart { title, series, .. } => {
                assert_eq!(title, "CGPA Progression");
                assert_eq!(series.len(), 1);
                assert_eq!(series[0].name, "CGPA");
                assert_eq!(series[0].values[7], 8.13);
            }
            other => panic!("expected a line chart, got {other:?}"),
        }
    }

    #[test]
    fn data_table_view_carries_the_raw_records() {
        let store = RecordStore::sample();
        match render(View::DataTable, &store) {
            RenderDirective::Table { columns, rows, .. } => {
                assert_eq!(columns, vec!["Semester", "SGPA", "CGPA"]);
                assert_eq!(rows, store.records().to_vec());
            }
            other => panic!("expected a table, got {other:?}"),
        }
    }

    #[test]
    fn unknown_view_names_are_a_no_op() {
        let store = RecordStore::sample();
        assert_eq!(render_named("Histogram", &store), RenderDirective::None);
    }
}
