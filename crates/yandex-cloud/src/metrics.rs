//! Request metrics
//!
//! - `yandex_api_requests_total` (counter): labels `method`, `status`
//! - `yandex_api_request_duration_seconds` (histogram): label `method`
//!
//! No recorder is installed here; without one these calls are no-ops.

/// Record a completed API call. `status` is `"error"` when no response came back.
pub fn record_request(method: &str, status: &str, duration_secs: f64) {
    metrics::counter!(
        "yandex_api_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("yandex_api_request_duration_seconds", "method" => method.to_string())
        .record(duration_secs);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_recorder_is_a_noop() {
        record_request("GET", "200", 0.05);
        record_request("POST", "error", 1.5);
    }
}
