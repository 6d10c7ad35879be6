//! Mention token resolution.
//!
//! A mention token is the free text following `@` in a message. Resolution
//! maps it to a known user or group, to one of the special broadcast
//! keywords, or to nothing. It is pure and synchronous: callers re-resolve
//! whenever the token or the user/group snapshots change.
//!
//! Tokens frequently arrive embedded in sentence punctuation ("ping
//! @alice."), so user lookup strips trailing `.`, `_`, and `-` one
//! character at a time, and group lookup strips the whole trailing run at
//! once. Whatever the match did not consume is the *suffix* and is rendered
//! as plain text.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ManagedConfig;
use crate::models::{Group, TeammateNameDisplay, UserProfile};

/// Map of lowercase username to profile.
pub type UsersByUsername = HashMap<String, UserProfile>;

/// Map of lowercase group name to group.
pub type GroupsByName = HashMap<String, Group>;

/// Characters that may trail a mention at the end of a sentence.
const TRIM_CHARS: [char; 3] = ['.', '_', '-'];

/// Broadcast keywords that mention everyone in some scope.
static SPECIAL_MENTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // A keyword counts when followed by trailing punctuation, an
    // underscore, or a word boundary, so "channel_id" and "here." still
    // match.
    Regex::new(r"(?i)\b(all|channel|here)(?:\.\B|_|\b)").expect("static pattern is valid")
});

/// One of the special broadcast mention keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialMention {
    All,
    Channel,
    Here,
}

impl SpecialMention {
    pub fn as_str(self) -> &'static str {
        match self {
            SpecialMention::All => "all",
            SpecialMention::Channel => "channel",
            SpecialMention::Here => "here",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "all" => Some(SpecialMention::All),
            "channel" => Some(SpecialMention::Channel),
            "here" => Some(SpecialMention::Here),
            _ => None,
        }
    }
}

/// A mention key the viewer is notified on, e.g. `@alice` or a custom word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionKey {
    pub key: String,
}

impl MentionKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Outcome of resolving a mention token.
///
/// `matched_len` counts the characters of the token consumed by the match;
/// [`ResolvedMention::suffix`] recovers the remainder.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedMention {
    /// The token names a known user.
    User { user: UserProfile, matched_len: usize },
    /// The token names a referenceable group.
    Group { group: Group, matched_len: usize },
    /// The token contains a broadcast keyword.
    Special { keyword: SpecialMention, matched_len: usize },
    /// Nothing matched; render the token as typed.
    NoMatch { display_text: String },
}

impl ResolvedMention {
    /// The trailing part of `token` not consumed by the match, rendered as
    /// plain text after the highlighted mention.
    ///
    /// For special mentions the keyword may sit mid-token (the boundary
    /// pattern allows a leading sentence fragment), so the suffix is the
    /// token with the first keyword occurrence removed.
    pub fn suffix(&self, token: &str) -> String {
        match self {
            ResolvedMention::User { matched_len, .. }
            | ResolvedMention::Group { matched_len, .. } => {
                token.chars().skip(*matched_len).collect()
            }
            ResolvedMention::Special { keyword, .. } => {
                remove_first_occurrence(token, keyword.as_str())
            }
            ResolvedMention::NoMatch { .. } => String::new(),
        }
    }

    /// The text to render after the `@`, before any suffix.
    pub fn label(&self, name_display: TeammateNameDisplay) -> String {
        match self {
            ResolvedMention::User { user, .. } => user.display_name(name_display),
            ResolvedMention::Group { group, .. } => group.name.clone(),
            ResolvedMention::Special { keyword, .. } => keyword.as_str().to_string(),
            ResolvedMention::NoMatch { display_text } => display_text.clone(),
        }
    }

    /// Whether the match refers to an actual entity or keyword.
    pub fn is_mention(&self) -> bool {
        !matches!(self, ResolvedMention::NoMatch { .. })
    }
}

/// Resolve a raw mention token against snapshots of known users and groups.
///
/// Resolution order: user (with iterative punctuation trim), then
/// referenceable group (single trailing-run trim), then special keyword,
/// then [`ResolvedMention::NoMatch`] carrying the case-preserved token.
/// Never fails; an empty token yields `NoMatch`.
pub fn resolve(
    token: &str,
    users: &UsersByUsername,
    groups: &GroupsByName,
) -> ResolvedMention {
    let mut name = token.to_lowercase();
    while !name.is_empty() {
        if let Some(user) = users.get(&name) {
            return ResolvedMention::User {
                user: user.clone(),
                matched_len: name.chars().count(),
            };
        }
        // Repeatedly trim off trailing punctuation in case this is at the
        // end of a sentence.
        if name.ends_with(TRIM_CHARS) {
            name.pop();
        } else {
            break;
        }
    }

    let lowered = token.to_lowercase();
    let trimmed = lowered.trim_end_matches(TRIM_CHARS);
    if let Some(group) = groups.get(trimmed) {
        if group.allow_reference {
            return ResolvedMention::Group {
                group: group.clone(),
                matched_len: group.name.chars().count(),
            };
        }
    }

    if let Some(captures) = SPECIAL_MENTION_PATTERN.captures(token) {
        if let Some(keyword) = captures
            .get(1)
            .and_then(|m| SpecialMention::from_keyword(m.as_str()))
        {
            return ResolvedMention::Special {
                keyword,
                matched_len: keyword.as_str().chars().count(),
            };
        }
    }

    ResolvedMention::NoMatch { display_text: token.to_string() }
}

/// Whether a resolved mention should be highlighted for the viewer.
///
/// User mentions highlight when any of the viewer's mention keys contains
/// the username; group mentions when a key equals `@name`. Special and
/// unmatched tokens always highlight (the latter renders as plain text
/// anyway).
pub fn is_highlighted(resolution: &ResolvedMention, mention_keys: &[MentionKey]) -> bool {
    match resolution {
        ResolvedMention::User { user, .. } => {
            mention_keys.iter().any(|k| k.key.contains(&user.username))
        }
        ResolvedMention::Group { group, .. } => {
            let group_key = format!("@{}", group.name);
            mention_keys.iter().any(|k| k.key == group_key)
        }
        ResolvedMention::Special { .. } | ResolvedMention::NoMatch { .. } => true,
    }
}

/// The text copied when the viewer long-presses a mention, or `None` when
/// the managed config forbids copying.
///
/// Prefers the resolved username over the raw token so "@alice." copies as
/// "@alice".
pub fn copy_mention_text(
    resolution: &ResolvedMention,
    token: &str,
    config: &ManagedConfig,
) -> Option<String> {
    if config.copy_paste_protection {
        return None;
    }

    let username = match resolution {
        ResolvedMention::User { user, .. } if !user.username.is_empty() => {
            user.username.clone()
        }
        _ => token.to_string(),
    };

    Some(format!("@{}", username))
}

/// Remove the first case-insensitive occurrence of `needle` from `text`.
/// Both comparison and removal work on characters, so surrounding
/// multi-byte text stays intact.
fn remove_first_occurrence(text: &str, needle: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let needle_chars: Vec<char> = needle.chars().collect();
    if needle_chars.is_empty() || needle_chars.len() > chars.len() {
        return text.to_string();
    }

    for start in 0..=chars.len() - needle_chars.len() {
        let matches = chars[start..start + needle_chars.len()]
            .iter()
            .zip(&needle_chars)
            .all(|(a, b)| a.to_ascii_lowercase() == b.to_ascii_lowercase());
        if matches {
            let mut result: String = chars[..start].iter().collect();
            result.extend(&chars[start + needle_chars.len()..]);
            return result;
        }
    }

    text.to_string()
}
