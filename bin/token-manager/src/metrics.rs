//! Prometheus metrics for the token manager.
//!
//! All metrics are aggregated in the [`Metrics`] struct for easy tracking and management.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use std::time::Duration;

/// Aggregated metrics for the token manager.
///
/// Metrics are registered with the global metrics registry on creation.
#[derive(Debug, Clone)]
pub struct Metrics {
    _private: (),
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics instance and register all metric descriptions.
    pub fn new() -> Self {
        Self::register_descriptions();
        Self { _private: () }
    }

    fn register_descriptions() {
        describe_counter!(
            "token_manager_operations_total",
            "Total number of token operations submitted, by operation"
        );
        describe_counter!(
            "token_manager_operations_success_total",
            "Total number of token operations confirmed, by operation"
        );
        describe_counter!(
            "token_manager_operations_failure_total",
            "Total number of token operations that failed, by operation and reason"
        );
        describe_histogram!(
            "token_manager_operation_duration_seconds",
            "Time from submission to confirmation, by operation"
        );
        describe_gauge!(
            "token_manager_account_balance",
            "Balance of the connected account in whole tokens"
        );
    }

    /// Record a confirmed operation.
    pub fn record_success(&self, operation: &str, duration: Duration) {
        counter!("token_manager_operations_total", "operation" => operation.to_string())
            .increment(1);
        counter!("token_manager_operations_success_total", "operation" => operation.to_string())
            .increment(1);
        histogram!(
            "token_manager_operation_duration_seconds",
            "operation" => operation.to_string()
        )
        .record(duration.as_secs_f64());
    }

    /// Record a failed operation. `reason` is the ledger rejection when known.
    pub fn record_failure(&self, operation: &str, reason: Option<&str>) {
        counter!("token_manager_operations_total", "operation" => operation.to_string())
            .increment(1);
        counter!(
            "token_manager_operations_failure_total",
            "operation" => operation.to_string(),
            "reason" => reason.unwrap_or("other").to_string()
        )
        .increment(1);
    }

    /// Set the connected account's balance, in whole tokens.
    pub fn set_account_balance(&self, symbol: &str, balance: f64) {
        gauge!("token_manager_account_balance", "symbol" => symbol.to_string()).set(balance);
    }
}

/// Install the Prometheus metrics exporter and start the HTTP server.
///
/// Returns an error if the server fails to bind to the specified port.
pub fn install_prometheus_exporter(port: u16) -> eyre::Result<()> {
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::net::SocketAddr;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| eyre::eyre!("Failed to install Prometheus exporter: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        let metrics = Metrics::new();
        metrics.record_success("transfer", Duration::from_millis(20));
        metrics.record_failure("transferFrom", Some("Allowance exceeded"));
        metrics.record_failure("approve", None);
        metrics.set_account_balance("MET", 1.5);
    }
}
