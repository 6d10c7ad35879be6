//! Chatkit - core client logic for a mobile chat client
//!
//! This library implements the testable, UI-independent pieces of a chat
//! client: resolving `@` mention tokens against known users and groups,
//! loading a permalinked post together with its channel and surrounding
//! context, fetching a channel's pinned posts, and updating per-channel
//! notification preferences.
//!
//! Rendering, navigation, and list virtualization belong to the embedding
//! application. All server data flows through the [`traits::PostSource`]
//! seam, so the loaders can be driven by the production REST adapter or by
//! the mock adapter in tests.

pub mod adapters;
pub mod config;
pub mod error;
pub mod liveness;
pub mod mention;
pub mod models;
pub mod notifications;
pub mod permalink;
pub mod pinned;
pub mod prelude;
pub mod traits;
