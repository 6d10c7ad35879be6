//! Prelude module for convenient imports.
//!
//! Re-exports the types most callers need when wiring the loaders and the
//! mention resolver into an application.
//!
//! # Usage
//!
//! ```ignore
//! use chatkit::prelude::*;
//! ```

// Model types
pub use crate::models::{
    Channel, ChannelMember, ChannelNotifyProps, ChannelType, Group, Post, PostThread,
    TeammateNameDisplay, UserProfile,
};

// Mention resolution
pub use crate::mention::{resolve, MentionKey, ResolvedMention, SpecialMention};

// Loaders and their states
pub use crate::permalink::{PermalinkLoader, PermalinkRequest, PermalinkState};
pub use crate::pinned::{PinnedListItem, PinnedPostsLoader, PinnedState};

// Notification preferences
pub use crate::notifications::{ChannelNotificationPreference, NotificationLevel};

// Error handling
pub use crate::error::{FetchError, FetchErrorKind, FetchResult};

// External data seam
pub use crate::traits::PostSource;

// Lifecycle
pub use crate::liveness::Liveness;

// Managed configuration
pub use crate::config::ManagedConfig;
