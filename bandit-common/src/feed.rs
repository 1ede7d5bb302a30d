//! Live feed merging
//!
//! Combines a gig's tips and requests into the single time-ordered view
//! shown to the operator. The merge is recomputed from scratch on every
//! call: no incremental state, deterministic for the same inputs.

use serde::{Deserialize, Serialize};

use crate::model::{Request, Tip};

/// Number of items the rendered feed is capped to
///
/// The cap applies only to the merged view handed to the UI; the underlying
/// stored lists are not truncated here.
pub const FEED_DISPLAY_LIMIT: usize = 10;

/// One entry in the merged live feed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "lowercase")]
pub enum FeedItem {
    Tip(Tip),
    Request(Request),
}

impl FeedItem {
    /// Event timestamp, milliseconds since the Unix epoch
    pub fn ts_ms(&self) -> i64 {
        match self {
            FeedItem::Tip(tip) => tip.ts_ms,
            FeedItem::Request(request) => request.ts_ms,
        }
    }
}

/// Merge tips and requests into a descending-time feed, capped to `limit`
///
/// Most recent items first. The sort is stable, so items sharing a
/// millisecond timestamp keep their relative order (tips in stored order,
/// then requests in stored order) instead of reordering unpredictably.
pub fn merge_feed(tips: &[Tip], requests: &[Request], limit: usize) -> Vec<FeedItem> {
    let mut feed: Vec<FeedItem> = tips
        .iter()
        .cloned()
        .map(FeedItem::Tip)
        .chain(requests.iter().cloned().map(FeedItem::Request))
        .collect();

    feed.sort_by(|a, b| b.ts_ms().cmp(&a.ts_ms()));
    feed.truncate(limit);
    feed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RequestStatus, SyncStatus};
    use uuid::Uuid;

    fn tip(gig_id: Uuid, ts_ms: i64, amount: f64) -> Tip {
        Tip {
            id: Uuid::new_v4(),
            gig_id,
            ts_ms,
            amount,
            currency: "USD".to_string(),
            fan_name: Some("Sarah M.".to_string()),
            message: None,
            sync_status: SyncStatus::Synced,
        }
    }

    fn request(gig_id: Uuid, ts_ms: i64, title: &str) -> Request {
        Request {
            id: Uuid::new_v4(),
            gig_id,
            ts_ms,
            title: title.to_string(),
            note: None,
            tip_amount: None,
            status: RequestStatus::Queued,
            sync_status: SyncStatus::Synced,
        }
    }

    #[test]
    fn test_merge_orders_descending_by_timestamp() {
        let gig_id = Uuid::new_v4();
        let tips = vec![tip(gig_id, 100, 5.0), tip(gig_id, 300, 10.0)];
        let requests = vec![
            request(gig_id, 200, "Blackbird"),
            request(gig_id, 400, "Fast Car"),
        ];

        let feed = merge_feed(&tips, &requests, FEED_DISPLAY_LIMIT);
        let timestamps: Vec<i64> = feed.iter().map(FeedItem::ts_ms).collect();
        assert_eq!(timestamps, vec![400, 300, 200, 100]);

        assert!(matches!(feed[0], FeedItem::Request(_)));
        assert!(matches!(feed[1], FeedItem::Tip(_)));
        assert!(matches!(feed[2], FeedItem::Request(_)));
        assert!(matches!(feed[3], FeedItem::Tip(_)));
    }

    #[test]
    fn test_merge_caps_to_limit() {
        let gig_id = Uuid::new_v4();
        let tips: Vec<Tip> = (0..8).map(|i| tip(gig_id, i, 2.0)).collect();
        let requests: Vec<Request> = (8..15)
            .map(|i| request(gig_id, i, "Mad World"))
            .collect();

        let feed = merge_feed(&tips, &requests, FEED_DISPLAY_LIMIT);
        assert_eq!(feed.len(), 10);
        // The 10 most recent of the 15 items: timestamps 14 down to 5
        assert_eq!(feed[0].ts_ms(), 14);
        assert_eq!(feed[9].ts_ms(), 5);
    }

    #[test]
    fn test_equal_timestamps_keep_stable_order() {
        let gig_id = Uuid::new_v4();
        let tips = vec![tip(gig_id, 500, 2.0), tip(gig_id, 500, 3.0)];
        let requests = vec![request(gig_id, 500, "Hallelujah")];

        let feed = merge_feed(&tips, &requests, FEED_DISPLAY_LIMIT);
        assert_eq!(feed.len(), 3);
        // Stable sort: tips in stored order, then the request
        match (&feed[0], &feed[1], &feed[2]) {
            (FeedItem::Tip(first), FeedItem::Tip(second), FeedItem::Request(_)) => {
                assert_eq!(first.amount, 2.0);
                assert_eq!(second.amount, 3.0);
            }
            other => panic!("unexpected feed order: {:?}", other),
        }
    }

    #[test]
    fn test_empty_inputs_produce_empty_feed() {
        let feed = merge_feed(&[], &[], FEED_DISPLAY_LIMIT);
        assert!(feed.is_empty());
    }

    #[test]
    fn test_merge_is_deterministic() {
        let gig_id = Uuid::new_v4();
        let tips = vec![tip(gig_id, 100, 5.0), tip(gig_id, 300, 10.0)];
        let requests = vec![request(gig_id, 200, "Vincent")];

        let first = merge_feed(&tips, &requests, FEED_DISPLAY_LIMIT);
        let second = merge_feed(&tips, &requests, FEED_DISPLAY_LIMIT);
        let first_ids: Vec<i64> = first.iter().map(FeedItem::ts_ms).collect();
        let second_ids: Vec<i64> = second.iter().map(FeedItem::ts_ms).collect();
        assert_eq!(first_ids, second_ids);
    }
}
