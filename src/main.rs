use gpa_dashboard::records::RecordStore;
use gpa_dashboard::web;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let sample = RecordStore::sample();
    log::info!("Embedded sample dataset: {} semester records", sample.len());

    let host = std::env::var("DASHBOARD_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("DASHBOARD_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting SGPA & CGPA dashboard on http://{host}:{port}");
    log::info!("Visit http://{host}:{port} in your browser!");

    web::start_api(&host, port).await
}
