//! Data models for the chat client core.
//!
//! These are typed snapshots of server records. Identifiers are plain
//! strings on the wire, so they stay plain strings here; the aliases below
//! only document which kind of id a signature expects.

mod channel;
mod group;
mod post;
mod user;

pub use channel::{Channel, ChannelMember, ChannelNotifyProps, ChannelType};
pub use group::Group;
pub use post::{Post, PostThread};
pub use user::{TeammateNameDisplay, UserProfile};

/// Identifier of a post.
pub type PostId = String;

/// Identifier of a channel.
pub type ChannelId = String;

/// Identifier of a team.
pub type TeamId = String;

/// Identifier of a user.
pub type UserId = String;
