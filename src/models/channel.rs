//! Channel, membership, and notification-props models.

use serde::{Deserialize, Serialize};

use super::{ChannelId, TeamId, UserId};
use crate::notifications::NotificationLevel;

/// Kind of a channel, serialized with the single-letter wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelType {
    /// Open (public) channel. The only kind eligible for auto-join.
    #[serde(rename = "O")]
    Open,
    /// Private channel.
    #[serde(rename = "P")]
    Private,
    /// Direct message between two users.
    #[serde(rename = "D")]
    Direct,
    /// Group message between several users.
    #[serde(rename = "G")]
    Group,
}

/// Snapshot of a channel record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    pub team_id: TeamId,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    #[serde(default)]
    pub display_name: String,
    /// Epoch millis of deletion; zero for live channels.
    #[serde(default)]
    pub delete_at: i64,
}

impl Channel {
    /// Archived channels keep their history but reject new activity.
    pub fn is_archived(&self) -> bool {
        self.delete_at != 0
    }
}

/// The viewer's membership in a channel.
///
/// The permalink loader consumes these as a map keyed by channel id; a
/// missing key means the viewer is not a member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelMember {
    pub channel_id: ChannelId,
    pub user_id: UserId,
    #[serde(default)]
    pub notify_props: ChannelNotifyProps,
}

/// Per-channel notification overrides. Only the fields being changed are
/// serialized, so a partial update touches nothing else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelNotifyProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push: Option<NotificationLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desktop: Option<NotificationLevel>,
}

impl ChannelNotifyProps {
    /// Props that update only the push level.
    pub fn push_only(level: NotificationLevel) -> Self {
        Self { push: Some(level), desktop: None }
    }
}
