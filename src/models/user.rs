//! User profile model and display-name resolution.

use serde::{Deserialize, Serialize};

use super::UserId;

/// How a teammate's name should be rendered in the client.
///
/// This mirrors the server-side `teammate_name_display` preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeammateNameDisplay {
    /// Always show the username.
    Username,
    /// Prefer the nickname, then the full name, then the username.
    NicknameFullName,
    /// Prefer the full name, then the username.
    FullName,
}

/// Snapshot of a user record, keyed by lowercase username in mention maps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub nickname: String,
}

impl UserProfile {
    /// First and last name joined with a space, skipping empty parts.
    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            (true, false) => self.last_name.clone(),
            (true, true) => String::new(),
        }
    }

    /// Resolve the name to display for this user under the given preference.
    ///
    /// Falls back to the username whenever the preferred fields are empty,
    /// so the result is never blank for a user with a username.
    pub fn display_name(&self, preference: TeammateNameDisplay) -> String {
        let name = match preference {
            TeammateNameDisplay::Username => String::new(),
            TeammateNameDisplay::NicknameFullName => {
                if self.nickname.is_empty() {
                    self.full_name()
                } else {
                    self.nickname.clone()
                }
            }
            TeammateNameDisplay::FullName => self.full_name(),
        };

        if name.trim().is_empty() {
            self.username.clone()
        } else {
            name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str, first: &str, last: &str, nickname: &str) -> UserProfile {
        UserProfile {
            id: "uid".to_string(),
            username: username.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            nickname: nickname.to_string(),
        }
    }

    #[test]
    fn test_full_name_joins_parts() {
        assert_eq!(user("a", "Ada", "Lovelace", "").full_name(), "Ada Lovelace");
        assert_eq!(user("a", "Ada", "", "").full_name(), "Ada");
        assert_eq!(user("a", "", "Lovelace", "").full_name(), "Lovelace");
        assert_eq!(user("a", "", "", "").full_name(), "");
    }

    #[test]
    fn test_display_name_username_preference() {
        let u = user("ada", "Ada", "Lovelace", "The Countess");
        assert_eq!(u.display_name(TeammateNameDisplay::Username), "ada");
    }

    #[test]
    fn test_display_name_nickname_preference() {
        let u = user("ada", "Ada", "Lovelace", "The Countess");
        assert_eq!(u.display_name(TeammateNameDisplay::NicknameFullName), "The Countess");

        let no_nick = user("ada", "Ada", "Lovelace", "");
        assert_eq!(no_nick.display_name(TeammateNameDisplay::NicknameFullName), "Ada Lovelace");
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let bare = user("ada", "", "", "");
        assert_eq!(bare.display_name(TeammateNameDisplay::FullName), "ada");
        assert_eq!(bare.display_name(TeammateNameDisplay::NicknameFullName), "ada");
    }
}
