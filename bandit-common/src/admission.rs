//! Request admission evaluation
//!
//! Decides, for one incoming song request candidate and the artist's current
//! preferences, whether the request is admitted and with which initial
//! status. The decision is a pure function of its two inputs: no clock, no
//! randomness, no hidden state.
//!
//! Checks run in a fixed order and the first failing check rejects:
//! 1. Accept-all bypass (skips the tip and blocklist checks)
//! 2. Tip gate (required tip present and at least the minimum)
//! 3. Blocked songs, matched against the title
//! 4. Blocked words, matched against title and note
//!
//! Admitted candidates are classified `Pinned` when they match a preferred
//! song and auto-accept is on, `Queued` otherwise.
//!
//! All matching is case-insensitive substring containment. That is loose on
//! purpose ("Fire and Rain" is blocked by the word "rain") and kept for
//! compatibility with existing artist blocklists; word-boundary matching
//! would change which requests get through.

use crate::model::{RequestCandidate, RequestStatus};
use crate::prefs::RequestPreferences;

/// Outcome of evaluating one request candidate
///
/// Rejection is a valid outcome, not an error: a rejected candidate simply
/// produces no `Request` record, and nothing is surfaced to the fan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Candidate produces no request record
    Rejected,
    /// Candidate becomes a request with the given initial status
    Admitted(RequestStatus),
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted(_))
    }
}

/// Evaluate one request candidate against the artist's preferences
pub fn evaluate(candidate: &RequestCandidate, prefs: &RequestPreferences) -> Admission {
    if !prefs.accept_all_requests {
        if prefs.require_tip_for_request {
            let meets_minimum = candidate
                .tip_amount
                .map(|amount| amount >= prefs.minimum_tip_amount as f64)
                .unwrap_or(false);
            if !meets_minimum {
                return Admission::Rejected;
            }
        }

        if contains_any(&candidate.title, &prefs.blocked_songs) {
            return Admission::Rejected;
        }

        let note = candidate.note.as_deref().unwrap_or("");
        if contains_any(&candidate.title, &prefs.blocked_words)
            || contains_any(note, &prefs.blocked_words)
        {
            return Admission::Rejected;
        }
    }

    if is_preferred(&candidate.title, prefs) && prefs.auto_accept_preferred {
        Admission::Admitted(RequestStatus::Pinned)
    } else {
        Admission::Admitted(RequestStatus::Queued)
    }
}

/// True when the title matches any of the artist's preferred songs
pub fn is_preferred(title: &str, prefs: &RequestPreferences) -> bool {
    contains_any(title, &prefs.preferred_songs)
}

/// Case-insensitive substring match against a list of patterns
///
/// An empty pattern list never matches.
fn contains_any(haystack: &str, patterns: &[String]) -> bool {
    if patterns.is_empty() {
        return false;
    }
    let haystack = haystack.to_lowercase();
    patterns
        .iter()
        .any(|pattern| haystack.contains(&pattern.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str, note: &str, tip: Option<f64>) -> RequestCandidate {
        RequestCandidate {
            title: title.to_string(),
            note: if note.is_empty() {
                None
            } else {
                Some(note.to_string())
            },
            tip_amount: tip,
            fan_name: None,
        }
    }

    #[test]
    fn test_evaluation_is_pure() {
        let mut prefs = RequestPreferences::default();
        prefs.blocked_words = vec!["rain".to_string()];
        prefs.accept_all_requests = false;
        let c = candidate("Fire and Rain", "for my anniversary", Some(5.0));

        let first = evaluate(&c, &prefs);
        let second = evaluate(&c, &prefs);
        assert_eq!(first, second);
    }

    #[test]
    fn test_accept_all_bypasses_every_filter() {
        let prefs = RequestPreferences {
            accept_all_requests: true,
            require_tip_for_request: true,
            minimum_tip_amount: 100,
            blocked_songs: vec!["Anything".to_string()],
            blocked_words: vec!["anything".to_string()],
            auto_accept_preferred: true,
            ..RequestPreferences::default()
        };
        let c = candidate("Anything", "", None);
        assert_eq!(
            evaluate(&c, &prefs),
            Admission::Admitted(RequestStatus::Queued)
        );
    }

    #[test]
    fn test_accept_all_still_classifies_preferred() {
        let prefs = RequestPreferences {
            accept_all_requests: true,
            preferred_songs: vec!["Blackbird".to_string()],
            auto_accept_preferred: true,
            ..RequestPreferences::default()
        };
        let c = candidate("Blackbird", "", None);
        assert_eq!(
            evaluate(&c, &prefs),
            Admission::Admitted(RequestStatus::Pinned)
        );
    }

    #[test]
    fn test_tip_gate() {
        let prefs = RequestPreferences {
            accept_all_requests: false,
            require_tip_for_request: true,
            minimum_tip_amount: 5,
            ..RequestPreferences::default()
        };

        assert_eq!(
            evaluate(&candidate("X", "", Some(3.0)), &prefs),
            Admission::Rejected
        );
        assert_eq!(
            evaluate(&candidate("X", "", None), &prefs),
            Admission::Rejected
        );
        assert_eq!(
            evaluate(&candidate("X", "", Some(5.0)), &prefs),
            Admission::Admitted(RequestStatus::Queued)
        );
    }

    #[test]
    fn test_blocked_song_wins_over_preferred() {
        let prefs = RequestPreferences {
            accept_all_requests: false,
            blocked_songs: vec!["Yesterday".to_string()],
            preferred_songs: vec!["Yesterday".to_string()],
            auto_accept_preferred: true,
            ..RequestPreferences::default()
        };
        assert_eq!(
            evaluate(&candidate("Yesterday Once More", "", None), &prefs),
            Admission::Rejected
        );
    }

    #[test]
    fn test_auto_pin_preferred() {
        let mut prefs = RequestPreferences {
            accept_all_requests: false,
            preferred_songs: vec!["Blackbird".to_string()],
            auto_accept_preferred: true,
            ..RequestPreferences::default()
        };
        assert_eq!(
            evaluate(&candidate("Blackbird", "", None), &prefs),
            Admission::Admitted(RequestStatus::Pinned)
        );

        prefs.auto_accept_preferred = false;
        assert_eq!(
            evaluate(&candidate("Blackbird", "", None), &prefs),
            Admission::Admitted(RequestStatus::Queued)
        );
    }

    #[test]
    fn test_blocked_word_matching_is_case_insensitive_substring() {
        let prefs = RequestPreferences {
            accept_all_requests: false,
            blocked_words: vec!["rain".to_string()],
            ..RequestPreferences::default()
        };

        assert_eq!(
            evaluate(&candidate("Fire and Rain", "", None), &prefs),
            Admission::Rejected
        );
        assert_eq!(
            evaluate(&candidate("RAIN MAN", "", None), &prefs),
            Admission::Rejected
        );
        assert_eq!(
            evaluate(&candidate("Sunshine", "", None), &prefs),
            Admission::Admitted(RequestStatus::Queued)
        );
    }

    #[test]
    fn test_blocked_word_matches_note_too() {
        let prefs = RequestPreferences {
            accept_all_requests: false,
            blocked_words: vec!["birthday".to_string()],
            ..RequestPreferences::default()
        };
        assert_eq!(
            evaluate(&candidate("Fast Car", "Birthday request!", None), &prefs),
            Admission::Rejected
        );
        assert_eq!(
            evaluate(&candidate("Fast Car", "", None), &prefs),
            Admission::Admitted(RequestStatus::Queued)
        );
    }

    #[test]
    fn test_empty_filter_lists_never_match() {
        let prefs = RequestPreferences {
            accept_all_requests: false,
            ..RequestPreferences::default()
        };
        assert_eq!(
            evaluate(&candidate("", "", None), &prefs),
            Admission::Admitted(RequestStatus::Queued)
        );
    }

    #[test]
    fn test_genre_list_is_never_enforced() {
        // allowed_genres is configuration for display only; no request field
        // carries a genre, so admission ignores it entirely.
        let prefs = RequestPreferences {
            accept_all_requests: false,
            allowed_genres: vec!["Folk".to_string()],
            ..RequestPreferences::default()
        };
        assert_eq!(
            evaluate(&candidate("Heavy Metal Thunder", "", None), &prefs),
            Admission::Admitted(RequestStatus::Queued)
        );
    }
}
