//! Permalink load sequencing.
//!
//! Opening a permalink means showing one post in the middle of its channel
//! context. Before anything renders, the loader resolves the post's thread,
//! the channel it lives in (joining open channels the viewer is not yet a
//! member of), and a window of surrounding posts. The whole sequence is
//! strictly ordered: every step needs data from the one before it.
//!
//! The hosting view owns one [`PermalinkLoader`] for its lifetime, calls
//! [`PermalinkLoader::load`] on mount (and on prop updates, which the
//! in-flight guard makes harmless), and observes [`PermalinkState`]
//! transitions through the watch channel.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::error::FetchError;
use crate::liveness::Liveness;
use crate::models::{ChannelId, ChannelMember, ChannelType, PostId, UserId};
use crate::traits::PostSource;

/// Number of posts fetched around the focused post.
pub const POSTS_AROUND_WINDOW: usize = 10;

/// Title shown for a permalink that cannot be resolved.
pub const LINK_NOT_FOUND_TITLE: &str = "Link Not Found";

/// Message shown for a permalink that cannot be resolved.
pub const LINK_NOT_FOUND_MESSAGE: &str =
    "Permalink belongs to a deleted message or to a channel to which you do not have access.";

/// Observable state of a permalink load.
#[derive(Debug, Clone, PartialEq)]
pub enum PermalinkState {
    /// The load sequence has not finished yet.
    Loading,
    /// The focused post and its surrounding context are available.
    Ready { post_ids: Vec<PostId> },
    /// The target is gone or inaccessible. Terminal: no retry path.
    ErrorNotFound { title: String, message: String },
    /// A transport-level failure; retryable via [`PermalinkLoader::retry`].
    ErrorNetwork { message: String },
}

impl PermalinkState {
    pub fn is_retryable(&self) -> bool {
        matches!(self, PermalinkState::ErrorNetwork { .. })
    }
}

/// Everything the loader needs to know about its target, captured at
/// construction from the hosting view's props.
#[derive(Debug, Clone)]
pub struct PermalinkRequest {
    /// The post the permalink points at.
    pub focused_post_id: PostId,
    /// Channel the post lives in, when the caller already knows it. When
    /// absent it is derived from the fetched post.
    pub channel_id: Option<ChannelId>,
    /// The viewer, used for the auto-join step.
    pub current_user_id: UserId,
    /// The viewer's channel memberships, keyed by channel id.
    pub memberships: HashMap<ChannelId, ChannelMember>,
    /// Surrounding post ids already cached by the caller. With a full
    /// window cached the loader starts `Ready` and fetches nothing.
    pub cached_post_ids: Vec<PostId>,
    /// Whether this view was opened from an actual permalink. Only
    /// permalink opens map application-level failures to the terminal
    /// not-found state; previews keep them retryable.
    pub is_permalink: bool,
}

impl PermalinkRequest {
    pub fn new(focused_post_id: impl Into<PostId>, current_user_id: impl Into<UserId>) -> Self {
        Self {
            focused_post_id: focused_post_id.into(),
            channel_id: None,
            current_user_id: current_user_id.into(),
            memberships: HashMap::new(),
            cached_post_ids: Vec::new(),
            is_permalink: true,
        }
    }
}

/// Sequential async loader for a permalink view.
pub struct PermalinkLoader {
    source: Arc<dyn PostSource>,
    request: PermalinkRequest,
    state_tx: watch::Sender<PermalinkState>,
    state_rx: watch::Receiver<PermalinkState>,
    in_flight: AtomicBool,
    liveness: Liveness,
}

impl PermalinkLoader {
    /// Create a loader for the given request.
    ///
    /// Starts in `Ready` when the caller already has a full surrounding
    /// window cached, otherwise in `Loading`.
    pub fn new(source: Arc<dyn PostSource>, request: PermalinkRequest) -> Self {
        let initial = if request.cached_post_ids.len() >= POSTS_AROUND_WINDOW {
            PermalinkState::Ready { post_ids: request.cached_post_ids.clone() }
        } else {
            PermalinkState::Loading
        };
        let (state_tx, state_rx) = watch::channel(initial);

        Self {
            source,
            request,
            state_tx,
            state_rx,
            in_flight: AtomicBool::new(false),
            liveness: Liveness::new(),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> PermalinkState {
        self.state_tx.borrow().clone()
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<PermalinkState> {
        self.state_rx.clone()
    }

    /// The liveness handle shared with in-flight sequences.
    pub fn liveness(&self) -> Liveness {
        self.liveness.clone()
    }

    /// Mark the hosting view as torn down. Any transition a still-running
    /// sequence would apply afterwards is suppressed.
    pub fn close(&self) {
        self.liveness.close();
    }

    /// Run the load sequence.
    ///
    /// No-op unless the loader is in `Loading`, and no-op while another
    /// call is in flight, so views may re-invoke this on every prop update.
    pub async fn load(&self) {
        let loading = matches!(&*self.state_tx.borrow(), PermalinkState::Loading);
        if !loading {
            return;
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!(
                post_id = %self.request.focused_post_id,
                "permalink load already in flight, ignoring"
            );
            return;
        }

        self.run_sequence().await;
        self.in_flight.store(false, Ordering::SeqCst);
    }

    /// Re-attempt the sequence after a network failure.
    ///
    /// Only effective from `ErrorNetwork`; the terminal not-found state has
    /// no retry path.
    pub async fn retry(&self) {
        let retryable = self.state_tx.borrow().is_retryable();
        if !retryable {
            return;
        }

        tracing::debug!(post_id = %self.request.focused_post_id, "retrying permalink load");
        self.set_state(PermalinkState::Loading);
        self.load().await;
    }

    async fn run_sequence(&self) {
        let post_id = self.request.focused_post_id.clone();
        tracing::debug!(%post_id, "fetching post thread");

        let thread = match self.source.get_post_thread(&post_id).await {
            Ok(thread) => thread,
            Err(err) => {
                self.fail(&err);
                return;
            }
        };

        let channel_id = match &self.request.channel_id {
            Some(id) => id.clone(),
            None => {
                // Derive the channel from the fetched post, then make sure
                // the viewer can actually see it.
                let derived = match thread.post(&post_id) {
                    Some(post) => post.channel_id.clone(),
                    None => {
                        self.fail(&FetchError::invalid_response(
                            "focused post missing from thread response",
                        ));
                        return;
                    }
                };

                let channel = match self.source.get_channel(&derived).await {
                    Ok(channel) => channel,
                    Err(err) => {
                        self.fail(&err);
                        return;
                    }
                };

                let is_member = self.request.memberships.contains_key(&derived);
                if !is_member && channel.channel_type == ChannelType::Open {
                    tracing::debug!(channel_id = %derived, "auto-joining open channel");
                    if let Err(err) = self
                        .source
                        .join_channel(&self.request.current_user_id, &channel.team_id, &channel.id)
                        .await
                    {
                        // Join failures are network-class regardless of
                        // shape: the link itself may still be fine.
                        tracing::warn!(
                            channel_id = %derived,
                            code = err.error_code(),
                            "auto-join failed: {}",
                            err
                        );
                        self.set_state(PermalinkState::ErrorNetwork {
                            message: err.user_message(),
                        });
                        return;
                    }
                }

                derived
            }
        };

        let post_ids = match self
            .source
            .get_posts_around(&channel_id, &post_id, POSTS_AROUND_WINDOW)
            .await
        {
            Ok(post_ids) => post_ids,
            Err(err) => {
                self.fail(&err);
                return;
            }
        };

        tracing::debug!(%post_id, count = post_ids.len(), "permalink context loaded");
        self.set_state(PermalinkState::Ready { post_ids });
    }

    /// Translate a fetch failure into an error state.
    ///
    /// With cached context available the failure is always retryable.
    /// Without it, transport failures stay retryable while application
    /// failures on a real permalink are terminal: the link points at
    /// something the viewer will never see.
    fn fail(&self, err: &FetchError) {
        tracing::warn!(
            post_id = %self.request.focused_post_id,
            code = err.error_code(),
            "permalink load failed: {}",
            err
        );

        if !self.request.cached_post_ids.is_empty() {
            self.set_state(PermalinkState::ErrorNetwork { message: err.user_message() });
            return;
        }

        if self.request.is_permalink && !err.is_connection_failure() {
            self.set_state(PermalinkState::ErrorNotFound {
                title: LINK_NOT_FOUND_TITLE.to_string(),
                message: LINK_NOT_FOUND_MESSAGE.to_string(),
            });
        } else {
            self.set_state(PermalinkState::ErrorNetwork { message: err.user_message() });
        }
    }

    fn set_state(&self, next: PermalinkState) {
        if !self.liveness.is_alive() {
            tracing::debug!(
                post_id = %self.request.focused_post_id,
                "view torn down, dropping state transition"
            );
            return;
        }
        self.state_tx.send_replace(next);
    }
}
