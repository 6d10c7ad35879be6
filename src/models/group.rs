//! Group model for group mentions.

use serde::{Deserialize, Serialize};

/// Snapshot of a user group, keyed by lowercase group name in mention maps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    /// Whether the group may be referenced via `@name`. Groups with this
    /// flag unset never resolve as mentions.
    #[serde(default)]
    pub allow_reference: bool,
}
