//! Artist request preferences and set editing
//!
//! One `RequestPreferences` per artist, mutable at any time through the
//! editor methods below. The four string collections keep insertion order
//! for display and enforce set semantics (no duplicates) on insert.

use serde::{Deserialize, Serialize};

/// Artist-configured request filtering preferences
///
/// `allowed_genres` and `notifications_enabled` are configuration only:
/// the admission evaluator never reads them (no request field carries a
/// genre to filter against).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestPreferences {
    /// Bypass switch; when true all other filters are ignored
    pub accept_all_requests: bool,
    pub require_tip_for_request: bool,
    /// Only enforced when `require_tip_for_request` is true
    pub minimum_tip_amount: u32,
    pub allowed_genres: Vec<String>,
    /// Lower-cased on insert; matched against request title and note
    pub blocked_words: Vec<String>,
    pub preferred_songs: Vec<String>,
    pub blocked_songs: Vec<String>,
    /// Pin (rather than queue) requests matching a preferred song
    pub auto_accept_preferred: bool,
    pub notifications_enabled: bool,
}

impl Default for RequestPreferences {
    fn default() -> Self {
        Self {
            accept_all_requests: true,
            require_tip_for_request: false,
            minimum_tip_amount: 5,
            allowed_genres: Vec::new(),
            blocked_words: Vec::new(),
            preferred_songs: Vec::new(),
            blocked_songs: Vec::new(),
            auto_accept_preferred: true,
            notifications_enabled: true,
        }
    }
}

impl RequestPreferences {
    /// Add a genre to the allowed list (trimmed, deduplicated)
    pub fn add_genre(&mut self, genre: &str) -> bool {
        insert_trimmed(&mut self.allowed_genres, genre, false)
    }

    /// Remove an exact-match genre; unknown genre is a no-op
    pub fn remove_genre(&mut self, genre: &str) -> bool {
        remove_exact(&mut self.allowed_genres, genre)
    }

    /// Add a blocked word (trimmed and lower-cased, deduplicated)
    pub fn add_blocked_word(&mut self, word: &str) -> bool {
        insert_trimmed(&mut self.blocked_words, word, true)
    }

    /// Remove an exact-match blocked word; unknown word is a no-op
    pub fn remove_blocked_word(&mut self, word: &str) -> bool {
        remove_exact(&mut self.blocked_words, word)
    }

    /// Add a preferred song title (trimmed, deduplicated)
    pub fn add_preferred_song(&mut self, song: &str) -> bool {
        insert_trimmed(&mut self.preferred_songs, song, false)
    }

    /// Remove an exact-match preferred song; unknown song is a no-op
    pub fn remove_preferred_song(&mut self, song: &str) -> bool {
        remove_exact(&mut self.preferred_songs, song)
    }

    /// Add a blocked song title (trimmed, deduplicated)
    pub fn add_blocked_song(&mut self, song: &str) -> bool {
        insert_trimmed(&mut self.blocked_songs, song, false)
    }

    /// Remove an exact-match blocked song; unknown song is a no-op
    pub fn remove_blocked_song(&mut self, song: &str) -> bool {
        remove_exact(&mut self.blocked_songs, song)
    }

    /// Set the minimum tip amount, clamping invalid input at the editor
    /// boundary rather than letting it reach admission
    pub fn set_minimum_tip_amount(&mut self, amount: i64) {
        self.minimum_tip_amount = amount.max(0).min(u32::MAX as i64) as u32;
    }
}

/// Insert a normalized item if absent; empty/whitespace-only input is a no-op
///
/// Returns true when the list changed.
fn insert_trimmed(list: &mut Vec<String>, item: &str, lowercase: bool) -> bool {
    let trimmed = item.trim();
    if trimmed.is_empty() {
        return false;
    }
    let normalized = if lowercase {
        trimmed.to_lowercase()
    } else {
        trimmed.to_string()
    };
    if list.contains(&normalized) {
        return false;
    }
    list.push(normalized);
    true
}

/// Remove an exact match; returns true when the list changed
fn remove_exact(list: &mut Vec<String>, item: &str) -> bool {
    let before = list.len();
    list.retain(|existing| existing != item);
    list.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_trims_and_deduplicates() {
        let mut prefs = RequestPreferences::default();
        assert!(prefs.add_preferred_song("  Blackbird  "));
        assert!(!prefs.add_preferred_song("Blackbird"));
        assert_eq!(prefs.preferred_songs, vec!["Blackbird"]);
    }

    #[test]
    fn test_add_blocked_word_lowercases() {
        let mut prefs = RequestPreferences::default();
        assert!(prefs.add_blocked_word(" Rain "));
        assert_eq!(prefs.blocked_words, vec!["rain"]);
        // Same word in different case is a duplicate after normalization
        assert!(!prefs.add_blocked_word("RAIN"));
    }

    #[test]
    fn test_add_empty_input_is_noop() {
        let mut prefs = RequestPreferences::default();
        assert!(!prefs.add_blocked_song(""));
        assert!(!prefs.add_blocked_song("   "));
        assert!(prefs.blocked_songs.is_empty());
    }

    #[test]
    fn test_remove_nonmember_is_noop() {
        let mut prefs = RequestPreferences::default();
        prefs.add_genre("Folk");
        assert!(!prefs.remove_genre("Jazz"));
        assert!(prefs.remove_genre("Folk"));
        assert!(prefs.allowed_genres.is_empty());
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut prefs = RequestPreferences::default();
        prefs.add_blocked_song("Wonderwall");
        prefs.add_blocked_song("Free Bird");
        prefs.add_blocked_song("Hallelujah");
        assert_eq!(
            prefs.blocked_songs,
            vec!["Wonderwall", "Free Bird", "Hallelujah"]
        );
    }

    #[test]
    fn test_minimum_tip_clamps_negative() {
        let mut prefs = RequestPreferences::default();
        prefs.set_minimum_tip_amount(-3);
        assert_eq!(prefs.minimum_tip_amount, 0);
        prefs.set_minimum_tip_amount(10);
        assert_eq!(prefs.minimum_tip_amount, 10);
    }

    #[test]
    fn test_defaults_accept_everything() {
        let prefs = RequestPreferences::default();
        assert!(prefs.accept_all_requests);
        assert!(!prefs.require_tip_for_request);
        assert!(prefs.auto_accept_preferred);
        assert!(prefs.notifications_enabled);
        assert_eq!(prefs.minimum_tip_amount, 5);
    }
}
