//! Post and post-thread models.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{ChannelId, PostId};

/// Snapshot of a post record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub channel_id: ChannelId,
    /// Root of the thread this post replies to; empty for thread roots.
    #[serde(default)]
    pub root_id: PostId,
    /// Creation time in epoch millis.
    #[serde(default)]
    pub create_at: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_pinned: bool,
}

impl Post {
    /// Id of the thread this post belongs to: its root when it is a reply,
    /// otherwise the post itself.
    pub fn thread_root_id(&self) -> &PostId {
        if self.root_id.is_empty() {
            &self.id
        } else {
            &self.root_id
        }
    }
}

/// An ordered set of posts as returned by thread and post-list fetches:
/// ids in display order plus the posts they refer to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostThread {
    #[serde(default)]
    pub order: Vec<PostId>,
    #[serde(default)]
    pub posts: HashMap<PostId, Post>,
}

impl PostThread {
    /// Look up a post by id.
    pub fn post(&self, id: &str) -> Option<&Post> {
        self.posts.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_root_id() {
        let root = Post { id: "p1".to_string(), ..Default::default() };
        assert_eq!(root.thread_root_id(), "p1");

        let reply =
            Post { id: "p2".to_string(), root_id: "p1".to_string(), ..Default::default() };
        assert_eq!(reply.thread_root_id(), "p1");
    }

    #[test]
    fn test_thread_deserializes_wire_shape() {
        let thread: PostThread = serde_json::from_str(
            r#"{"order":["p2","p1"],"posts":{
                "p1":{"id":"p1","channel_id":"c1","message":"root"},
                "p2":{"id":"p2","channel_id":"c1","root_id":"p1","message":"reply"}
            }}"#,
        )
        .unwrap();
        assert_eq!(thread.order, vec!["p2", "p1"]);
        assert_eq!(thread.post("p2").unwrap().root_id, "p1");
        assert!(thread.post("p3").is_none());
    }
}
