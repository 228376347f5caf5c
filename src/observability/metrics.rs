//! Metrics for the hotel reconciliation pipeline
//!
//! Recording functions are grouped by phase. They are no-ops until a recorder
//! is installed with [`init`].

use std::net::SocketAddr;
use tracing::{info, warn};

use crate::config::MetricsConfig;
use crate::error::{HotelError, Result};

/// Install the Prometheus exporter when a listen address is configured
pub fn init(config: &MetricsConfig) -> Result<()> {
    let Some(listen) = config.listen.as_deref() else {
        info!("Metrics exporter disabled (no listen address configured)");
        return Ok(());
    };

    let addr: SocketAddr = listen
        .parse()
        .map_err(|e| HotelError::Config(format!("Invalid metrics listen address '{}': {}", listen, e)))?;

    match metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
    {
        Ok(()) => info!("Prometheus exporter listening on http://{}/metrics", addr),
        Err(e) => warn!("Prometheus exporter install failed (possibly already installed): {}", e),
    }
    Ok(())
}

pub mod normalize {
    /// Record that a record went through every configured normalizer
    pub fn record_normalized(source: &str) {
        ::metrics::counter!("hotel_normalize_records_total", "source" => source.to_string()).increment(1);
    }

    /// Record a normalizer failure on one field
    pub fn record_failed(field: &str) {
        ::metrics::counter!("hotel_normalize_errors_total", "field" => field.to_string()).increment(1);
    }

    pub fn batch_processed(batch_size: usize) {
        ::metrics::histogram!("hotel_normalize_batch_size").record(batch_size as f64);
    }
}

pub mod reconcile {
    /// Record one identity group entering the merge phase
    pub fn group_started(group_size: usize) {
        ::metrics::counter!("hotel_reconcile_groups_total").increment(1);
        ::metrics::histogram!("hotel_reconcile_group_size").record(group_size as f64);
    }

    pub fn group_merged() {
        ::metrics::counter!("hotel_reconcile_merged_total").increment(1);
    }

    pub fn group_failed(field: &str) {
        ::metrics::counter!("hotel_reconcile_errors_total", "field" => field.to_string()).increment(1);
    }

    pub fn groups_abandoned(count: usize) {
        ::metrics::counter!("hotel_reconcile_abandoned_total").increment(count as u64);
    }

    pub fn run_duration(seconds: f64) {
        ::metrics::histogram!("hotel_reconcile_duration_seconds").record(seconds);
    }
}

pub mod suppliers {
    pub fn records_fetched(supplier: &str, count: usize) {
        ::metrics::counter!("hotel_supplier_records_total", "supplier" => supplier.to_string())
            .increment(count as u64);
    }

    pub fn fetch_failed(supplier: &str) {
        ::metrics::counter!("hotel_supplier_errors_total", "supplier" => supplier.to_string()).increment(1);
    }

    pub fn item_rejected(supplier: &str) {
        ::metrics::counter!("hotel_supplier_rejected_items_total", "supplier" => supplier.to_string())
            .increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_without_listen_address_is_a_no_op() {
        assert!(init(&MetricsConfig::default()).is_ok());
    }

    #[test]
    fn init_rejects_malformed_listen_address() {
        let config = MetricsConfig {
            listen: Some("not-an-address".to_string()),
        };
        assert!(matches!(init(&config), Err(HotelError::Config(_))));
    }

    #[test]
    fn recording_without_recorder_does_not_panic() {
        normalize::record_normalized("acme");
        reconcile::group_started(3);
        suppliers::records_fetched("acme", 2);
    }
}
