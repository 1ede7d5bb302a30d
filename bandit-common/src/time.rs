//! Timestamp utilities

use chrono::{DateTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Get current time as milliseconds since the Unix epoch
///
/// Feed items (tips, requests) carry epoch-millisecond timestamps so the
/// merged feed sorts on a plain integer.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_returns_valid_timestamp() {
        let timestamp = now();
        // Should be a reasonable timestamp (after year 2000)
        assert!(timestamp.timestamp() > 946_684_800); // 2000-01-01 00:00:00 UTC
    }

    #[test]
    fn test_now_ms_matches_now() {
        let ms = now_ms();
        let ts = now();
        // Captured within the same instant, give or take a second
        assert!((ts.timestamp_millis() - ms).abs() < 1_000);
    }

    #[tokio::test]
    async fn test_now_ms_successive_calls_advance() {
        let t1 = now_ms();
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        let t2 = now_ms();
        assert!(t2 > t1);
    }
}
