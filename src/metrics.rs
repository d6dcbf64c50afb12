use std::net::SocketAddr;
use tracing::{info, warn};

pub const ROWS_TOTAL: &str = "directory_rows_total";
pub const ROWS_ACCEPTED_TOTAL: &str = "directory_rows_accepted_total";
pub const ROWS_REJECTED_TOTAL: &str = "directory_rows_rejected_total";
pub const ROW_ERRORS_TOTAL: &str = "directory_row_errors_total";
pub const LOAD_DURATION_SECONDS: &str = "directory_load_duration_seconds";

pub fn init_metrics(port: u16) {
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => {
            info!("Prometheus exporter listening on http://{}/metrics", addr);
        }
        Err(e) => {
            warn!("Prometheus exporter install failed (possibly already installed): {}", e);
        }
    }
}
