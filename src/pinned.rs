//! Pinned-posts loading for a channel.
//!
//! A much smaller sibling of the permalink loader: one fetch, one retry
//! affordance, no multi-step sequencing. The empty result is a valid
//! `Loaded` state; the view decides how to render "no pinned messages".

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use tokio::sync::watch;

use crate::liveness::Liveness;
use crate::models::{ChannelId, Post, PostId};
use crate::traits::PostSource;

/// Observable state of a pinned-posts load.
#[derive(Debug, Clone, PartialEq)]
pub enum PinnedState {
    /// Nothing requested yet.
    Idle,
    Loading,
    Loaded { post_ids: Vec<PostId> },
    /// The fetch failed; retryable.
    Failed,
}

/// Loader for a channel's pinned posts.
pub struct PinnedPostsLoader {
    source: Arc<dyn PostSource>,
    channel_id: ChannelId,
    state_tx: watch::Sender<PinnedState>,
    state_rx: watch::Receiver<PinnedState>,
    in_flight: AtomicBool,
    liveness: Liveness,
}

impl PinnedPostsLoader {
    pub fn new(source: Arc<dyn PostSource>, channel_id: impl Into<ChannelId>) -> Self {
        let (state_tx, state_rx) = watch::channel(PinnedState::Idle);
        Self {
            source,
            channel_id: channel_id.into(),
            state_tx,
            state_rx,
            in_flight: AtomicBool::new(false),
            liveness: Liveness::new(),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> PinnedState {
        self.state_tx.borrow().clone()
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<PinnedState> {
        self.state_rx.clone()
    }

    /// Mark the hosting view as torn down.
    pub fn close(&self) {
        self.liveness.close();
    }

    /// Fetch the channel's pinned posts. Overlapping calls collapse into
    /// the one already in flight.
    pub async fn load(&self) {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        self.set_state(PinnedState::Loading);
        match self.source.get_pinned_posts(&self.channel_id).await {
            Ok(post_ids) => {
                tracing::debug!(channel_id = %self.channel_id, count = post_ids.len(), "pinned posts loaded");
                self.set_state(PinnedState::Loaded { post_ids });
            }
            Err(err) => {
                tracing::warn!(
                    channel_id = %self.channel_id,
                    code = err.error_code(),
                    "pinned posts load failed: {}",
                    err
                );
                self.set_state(PinnedState::Failed);
            }
        }
        self.in_flight.store(false, Ordering::SeqCst);
    }

    /// Re-run the fetch after a failure.
    pub async fn retry(&self) {
        self.load().await;
    }

    fn set_state(&self, next: PinnedState) {
        if !self.liveness.is_alive() {
            return;
        }
        self.state_tx.send_replace(next);
    }
}

/// An entry of the decorated pinned-posts list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinnedListItem {
    Post(PostId),
    /// Separator carrying the calendar day of the posts above it.
    DateLine(NaiveDate),
}

/// Interleave date separators into a newest-first post list.
///
/// The list renders inverted, so the separator for a day comes *after* that
/// day's posts. Posts with unrepresentable timestamps fall back to the
/// epoch day rather than being dropped.
pub fn with_date_lines(posts: &[Post]) -> Vec<PinnedListItem> {
    let mut items = Vec::with_capacity(posts.len() + 1);
    let mut current_day: Option<NaiveDate> = None;

    for post in posts {
        let day = day_of(post.create_at);
        if let Some(open_day) = current_day {
            if open_day != day {
                items.push(PinnedListItem::DateLine(open_day));
            }
        }
        current_day = Some(day);
        items.push(PinnedListItem::Post(post.id.clone()));
    }

    if let Some(open_day) = current_day {
        items.push(PinnedListItem::DateLine(open_day));
    }

    items
}

fn day_of(create_at: i64) -> NaiveDate {
    Utc.timestamp_millis_opt(create_at)
        .single()
        .map(|ts| ts.date_naive())
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch date is valid"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_on(id: &str, ymd: (i32, u32, u32)) -> Post {
        let day = NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap();
        let create_at = day.and_hms_opt(12, 0, 0).unwrap().and_utc().timestamp_millis();
        Post { id: id.to_string(), create_at, ..Default::default() }
    }

    #[test]
    fn test_empty_list_has_no_items() {
        assert!(with_date_lines(&[]).is_empty());
    }

    #[test]
    fn test_single_day_gets_one_date_line() {
        let posts = vec![post_on("p1", (2020, 5, 4)), post_on("p2", (2020, 5, 4))];
        let items = with_date_lines(&posts);
        assert_eq!(
            items,
            vec![
                PinnedListItem::Post("p1".to_string()),
                PinnedListItem::Post("p2".to_string()),
                PinnedListItem::DateLine(NaiveDate::from_ymd_opt(2020, 5, 4).unwrap()),
            ]
        );
    }

    #[test]
    fn test_date_line_between_days() {
        // Newest first: p1 on the 5th, p2 and p3 on the 4th.
        let posts = vec![
            post_on("p1", (2020, 5, 5)),
            post_on("p2", (2020, 5, 4)),
            post_on("p3", (2020, 5, 4)),
        ];
        let items = with_date_lines(&posts);
        assert_eq!(
            items,
            vec![
                PinnedListItem::Post("p1".to_string()),
                PinnedListItem::DateLine(NaiveDate::from_ymd_opt(2020, 5, 5).unwrap()),
                PinnedListItem::Post("p2".to_string()),
                PinnedListItem::Post("p3".to_string()),
                PinnedListItem::DateLine(NaiveDate::from_ymd_opt(2020, 5, 4).unwrap()),
            ]
        );
    }

    #[test]
    fn test_bogus_timestamp_falls_back_to_epoch_day() {
        let post = Post { id: "p1".to_string(), create_at: i64::MAX, ..Default::default() };
        let items = with_date_lines(&[post]);
        assert_eq!(
            items[1],
            PinnedListItem::DateLine(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap())
        );
    }
}
