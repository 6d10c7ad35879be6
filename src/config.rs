//! Managed configuration pushed down by device management.
//!
//! Handlers that honor these flags receive the config as an explicit
//! parameter; nothing in this crate reads process-wide mutable state.

use serde::{Deserialize, Deserializer};

/// Device-management flags relevant to this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ManagedConfig {
    /// When set, copying message content (including mentions) to the
    /// clipboard is disallowed.
    #[serde(
        default,
        rename = "copyAndPasteProtection",
        deserialize_with = "bool_from_string"
    )]
    pub copy_paste_protection: bool,
}

/// The management payload encodes booleans as the strings `"true"` and
/// `"false"`; anything other than `"true"` means off.
fn bool_from_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref() == Some("true"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protection_parsed_from_string_flag() {
        let on: ManagedConfig =
            serde_json::from_str(r#"{"copyAndPasteProtection":"true"}"#).unwrap();
        assert!(on.copy_paste_protection);

        let off: ManagedConfig =
            serde_json::from_str(r#"{"copyAndPasteProtection":"false"}"#).unwrap();
        assert!(!off.copy_paste_protection);

        let missing: ManagedConfig = serde_json::from_str("{}").unwrap();
        assert!(!missing.copy_paste_protection);
    }
}
