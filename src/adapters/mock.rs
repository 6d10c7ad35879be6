//! Mock post source for testing.
//!
//! Returns scripted per-operation results and records every call, allowing
//! tests to verify both outcomes and the exact fetch sequence without
//! network access. An optional latency makes overlap and cancellation
//! timing observable.
//!
//! # Example
//!
//! ```ignore
//! use chatkit::adapters::mock::MockPostSource;
//!
//! let source = MockPostSource::new();
//! source.set_posts_around("channel1", Ok(vec!["p1".to_string()]));
//!
//! // ... drive a loader ...
//!
//! let calls = source.calls();
//! assert_eq!(calls.len(), 1);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{FetchError, FetchResult};
use crate::models::{Channel, ChannelNotifyProps, PostId, PostThread};
use crate::traits::PostSource;

/// A recorded call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    GetPostThread { post_id: String },
    GetChannel { channel_id: String },
    JoinChannel { user_id: String, team_id: String, channel_id: String },
    GetPostsAround { channel_id: String, post_id: String, count: usize },
    GetPinnedPosts { channel_id: String },
    UpdateChannelNotifyProps { user_id: String, channel_id: String, props: ChannelNotifyProps },
}

/// Scripted [`PostSource`] for tests.
///
/// Clones share the same scripted responses and call log.
#[derive(Debug, Clone, Default)]
pub struct MockPostSource {
    threads: Arc<Mutex<HashMap<String, FetchResult<PostThread>>>>,
    channels: Arc<Mutex<HashMap<String, FetchResult<Channel>>>>,
    join_results: Arc<Mutex<HashMap<String, FetchResult<()>>>>,
    posts_around: Arc<Mutex<HashMap<String, FetchResult<Vec<PostId>>>>>,
    pinned: Arc<Mutex<HashMap<String, FetchResult<Vec<PostId>>>>>,
    notify_results: Arc<Mutex<HashMap<String, FetchResult<()>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    latency: Arc<Mutex<Option<Duration>>>,
}

impl MockPostSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the result of `get_post_thread` for a post id.
    pub fn set_thread(&self, post_id: &str, result: FetchResult<PostThread>) {
        self.threads.lock().unwrap().insert(post_id.to_string(), result);
    }

    /// Script the result of `get_channel` for a channel id.
    pub fn set_channel(&self, channel_id: &str, result: FetchResult<Channel>) {
        self.channels.lock().unwrap().insert(channel_id.to_string(), result);
    }

    /// Script the result of `join_channel` for a channel id.
    pub fn set_join_result(&self, channel_id: &str, result: FetchResult<()>) {
        self.join_results.lock().unwrap().insert(channel_id.to_string(), result);
    }

    /// Script the result of `get_posts_around` for a channel id.
    pub fn set_posts_around(&self, channel_id: &str, result: FetchResult<Vec<PostId>>) {
        self.posts_around.lock().unwrap().insert(channel_id.to_string(), result);
    }

    /// Script the result of `get_pinned_posts` for a channel id.
    pub fn set_pinned(&self, channel_id: &str, result: FetchResult<Vec<PostId>>) {
        self.pinned.lock().unwrap().insert(channel_id.to_string(), result);
    }

    /// Script the result of `update_channel_notify_props` for a channel id.
    pub fn set_notify_result(&self, channel_id: &str, result: FetchResult<()>) {
        self.notify_results.lock().unwrap().insert(channel_id.to_string(), result);
    }

    /// Delay every operation by the given duration.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = Some(latency);
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of `get_post_thread` calls recorded.
    pub fn thread_fetch_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, RecordedCall::GetPostThread { .. }))
            .count()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }

    async fn simulate_latency(&self) {
        let latency = *self.latency.lock().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn unconfigured(operation: &str, key: &str) -> FetchError {
        FetchError::other(format!("no mock response configured for {} {}", operation, key))
    }
}

#[async_trait]
impl PostSource for MockPostSource {
    async fn get_post_thread(&self, post_id: &str) -> FetchResult<PostThread> {
        self.record(RecordedCall::GetPostThread { post_id: post_id.to_string() });
        self.simulate_latency().await;
        self.threads
            .lock()
            .unwrap()
            .get(post_id)
            .cloned()
            .unwrap_or_else(|| Err(Self::unconfigured("get_post_thread", post_id)))
    }

    async fn get_channel(&self, channel_id: &str) -> FetchResult<Channel> {
        self.record(RecordedCall::GetChannel { channel_id: channel_id.to_string() });
        self.simulate_latency().await;
        self.channels
            .lock()
            .unwrap()
            .get(channel_id)
            .cloned()
            .unwrap_or_else(|| Err(Self::unconfigured("get_channel", channel_id)))
    }

    async fn join_channel(
        &self,
        user_id: &str,
        team_id: &str,
        channel_id: &str,
    ) -> FetchResult<()> {
        self.record(RecordedCall::JoinChannel {
            user_id: user_id.to_string(),
            team_id: team_id.to_string(),
            channel_id: channel_id.to_string(),
        });
        self.simulate_latency().await;
        self.join_results
            .lock()
            .unwrap()
            .get(channel_id)
            .cloned()
            .unwrap_or(Ok(()))
    }

    async fn get_posts_around(
        &self,
        channel_id: &str,
        post_id: &str,
        count: usize,
    ) -> FetchResult<Vec<PostId>> {
        self.record(RecordedCall::GetPostsAround {
            channel_id: channel_id.to_string(),
            post_id: post_id.to_string(),
            count,
        });
        self.simulate_latency().await;
        self.posts_around
            .lock()
            .unwrap()
            .get(channel_id)
            .cloned()
            .unwrap_or_else(|| Err(Self::unconfigured("get_posts_around", channel_id)))
    }

    async fn get_pinned_posts(&self, channel_id: &str) -> FetchResult<Vec<PostId>> {
        self.record(RecordedCall::GetPinnedPosts { channel_id: channel_id.to_string() });
        self.simulate_latency().await;
        self.pinned
            .lock()
            .unwrap()
            .get(channel_id)
            .cloned()
            .unwrap_or_else(|| Err(Self::unconfigured("get_pinned_posts", channel_id)))
    }

    async fn update_channel_notify_props(
        &self,
        user_id: &str,
        channel_id: &str,
        props: ChannelNotifyProps,
    ) -> FetchResult<()> {
        self.record(RecordedCall::UpdateChannelNotifyProps {
            user_id: user_id.to_string(),
            channel_id: channel_id.to_string(),
            props,
        });
        self.simulate_latency().await;
        self.notify_results
            .lock()
            .unwrap()
            .get(channel_id)
            .cloned()
            .unwrap_or(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_result_returned() {
        let source = MockPostSource::new();
        source.set_pinned("c1", Ok(vec!["p1".to_string(), "p2".to_string()]));

        let pinned = source.get_pinned_posts("c1").await.unwrap();
        assert_eq!(pinned, vec!["p1", "p2"]);
    }

    #[tokio::test]
    async fn test_unconfigured_call_errors() {
        let source = MockPostSource::new();
        let err = source.get_post_thread("missing").await.unwrap_err();
        assert!(err.message.contains("no mock response configured"));
    }

    #[tokio::test]
    async fn test_calls_are_recorded_in_order() {
        let source = MockPostSource::new();
        source.set_pinned("c1", Ok(vec![]));
        let _ = source.get_pinned_posts("c1").await;
        let _ = source.join_channel("u1", "t1", "c1").await;

        assert_eq!(
            source.calls(),
            vec![
                RecordedCall::GetPinnedPosts { channel_id: "c1".to_string() },
                RecordedCall::JoinChannel {
                    user_id: "u1".to_string(),
                    team_id: "t1".to_string(),
                    channel_id: "c1".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let source = MockPostSource::new();
        let clone = source.clone();
        clone.set_pinned("c1", Ok(vec![]));
        let _ = source.get_pinned_posts("c1").await;
        assert_eq!(clone.calls().len(), 1);
    }
}
