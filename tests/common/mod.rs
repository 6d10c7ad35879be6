//! Common test fixtures for integration tests.
//!
//! Builders for the model snapshots the loaders consume, shared across the
//! integration test binaries.

use std::collections::HashMap;

use chatkit::models::{Channel, ChannelMember, ChannelType, Post, PostThread};

/// Initialize tracing for a test binary. Safe to call repeatedly; only the
/// first call wins. Run with `RUST_LOG=chatkit=debug` to see loader
/// transitions.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A thread response containing a single root post in the given channel.
pub fn thread_with_root(post_id: &str, channel_id: &str) -> PostThread {
    let post = Post {
        id: post_id.to_string(),
        channel_id: channel_id.to_string(),
        create_at: 1_600_000_000_000,
        message: "focused post".to_string(),
        ..Default::default()
    };
    PostThread {
        order: vec![post_id.to_string()],
        posts: HashMap::from([(post_id.to_string(), post)]),
    }
}

/// A channel of the given type on team "team1".
pub fn channel_of_type(channel_id: &str, channel_type: ChannelType) -> Channel {
    Channel {
        id: channel_id.to_string(),
        team_id: "team1".to_string(),
        channel_type,
        display_name: format!("channel {}", channel_id),
        delete_at: 0,
    }
}

/// A membership map containing the viewer's membership in one channel.
pub fn membership_in(channel_id: &str, user_id: &str) -> HashMap<String, ChannelMember> {
    HashMap::from([(
        channel_id.to_string(),
        ChannelMember {
            channel_id: channel_id.to_string(),
            user_id: user_id.to_string(),
            ..Default::default()
        },
    )])
}

/// Sequential post ids "p0".."p{n-1}".
pub fn post_ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("p{}", i)).collect()
}
