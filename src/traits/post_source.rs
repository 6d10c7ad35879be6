//! Server data-source trait abstraction.

use async_trait::async_trait;

use crate::error::FetchResult;
use crate::models::{Channel, ChannelNotifyProps, PostId, PostThread};

/// Asynchronous access to post, channel, and membership data.
///
/// Each operation either yields a data payload or a structured
/// [`crate::error::FetchError`]; implementations never panic on server
/// failures. The loaders call these strictly sequentially, so
/// implementations do not need to support pipelining.
///
/// # Example
///
/// ```ignore
/// use chatkit::traits::PostSource;
///
/// async fn thread_len<S: PostSource>(source: &S, post_id: &str) -> usize {
///     source.get_post_thread(post_id).await.map(|t| t.order.len()).unwrap_or(0)
/// }
/// ```
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch the full thread the given post belongs to.
    async fn get_post_thread(&self, post_id: &str) -> FetchResult<PostThread>;

    /// Fetch a channel's metadata.
    async fn get_channel(&self, channel_id: &str) -> FetchResult<Channel>;

    /// Join the given user to a channel.
    async fn join_channel(
        &self,
        user_id: &str,
        team_id: &str,
        channel_id: &str,
    ) -> FetchResult<()>;

    /// Fetch the ids of up to `count` posts surrounding `post_id` in a
    /// channel, in display order.
    async fn get_posts_around(
        &self,
        channel_id: &str,
        post_id: &str,
        count: usize,
    ) -> FetchResult<Vec<PostId>>;

    /// Fetch the ids of a channel's pinned posts, newest first.
    async fn get_pinned_posts(&self, channel_id: &str) -> FetchResult<Vec<PostId>>;

    /// Update the viewer's notification props for a channel. Only fields
    /// set in `props` change.
    async fn update_channel_notify_props(
        &self,
        user_id: &str,
        channel_id: &str,
        props: ChannelNotifyProps,
    ) -> FetchResult<()>;
}
