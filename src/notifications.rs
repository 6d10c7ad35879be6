//! Per-channel notification preferences.
//!
//! The preference screen shows a fixed list of push levels; exactly one is
//! selected, and picking another issues a partial notify-props update for
//! the viewer's membership in the channel.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::FetchResult;
use crate::models::{ChannelId, ChannelNotifyProps, UserId};
use crate::traits::PostSource;

/// Push notification level for a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// Follow the global account default.
    Default,
    /// Notify for all activity.
    All,
    /// Notify only for mentions.
    Mention,
    /// Never notify.
    None,
}

/// The selectable push levels, in display order.
pub const PUSH_LEVEL_OPTIONS: [NotificationLevel; 4] = [
    NotificationLevel::Default,
    NotificationLevel::All,
    NotificationLevel::Mention,
    NotificationLevel::None,
];

/// Index into [`PUSH_LEVEL_OPTIONS`] for the current level. An absent
/// preference selects `Default`.
pub fn selected_index(current: Option<NotificationLevel>) -> usize {
    match current.unwrap_or(NotificationLevel::Default) {
        NotificationLevel::Default => 0,
        NotificationLevel::All => 1,
        NotificationLevel::Mention => 2,
        NotificationLevel::None => 3,
    }
}

/// View-model for the channel notification preference screen.
pub struct ChannelNotificationPreference {
    source: Arc<dyn PostSource>,
    user_id: UserId,
    channel_id: ChannelId,
    current: Option<NotificationLevel>,
}

impl ChannelNotificationPreference {
    pub fn new(
        source: Arc<dyn PostSource>,
        user_id: impl Into<UserId>,
        channel_id: impl Into<ChannelId>,
        current: Option<NotificationLevel>,
    ) -> Self {
        Self {
            source,
            user_id: user_id.into(),
            channel_id: channel_id.into(),
            current,
        }
    }

    /// The currently selected push level, if any preference is stored.
    pub fn current(&self) -> Option<NotificationLevel> {
        self.current
    }

    /// Index of the selected option in [`PUSH_LEVEL_OPTIONS`].
    pub fn selected_index(&self) -> usize {
        selected_index(self.current)
    }

    /// Persist a newly picked push level.
    ///
    /// Sends a partial notify-props update touching only the push field.
    /// The local selection changes only after the server accepts it.
    pub async fn select(&mut self, level: NotificationLevel) -> FetchResult<()> {
        tracing::debug!(
            channel_id = %self.channel_id,
            level = ?level,
            "updating channel push preference"
        );
        self.source
            .update_channel_notify_props(
                &self.user_id,
                &self.channel_id,
                ChannelNotifyProps::push_only(level),
            )
            .await?;
        self.current = Some(level);
        Ok(())
    }
}
