use crate::types::{Exchange, SemanticMatch};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// One entry of the assembled context window.
///
/// Built fresh for every request from the two memory sources; never
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextEntry {
    /// An exchange from the recency log: the other party's message and
    /// the user's own reply.
    Recent {
        other_text: String,
        my_text: String,
        timestamp: DateTime<Utc>,
    },
    /// A similarity match from the semantic index.
    Relevant {
        text: String,
        timestamp: DateTime<Utc>,
    },
}

impl ContextEntry {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ContextEntry::Recent { timestamp, .. } => *timestamp,
            ContextEntry::Relevant { timestamp, .. } => *timestamp,
        }
    }
}

/// Merge the two memory sources into one context window.
///
/// A relevant entry whose text exactly matches the other-party text of
/// any recent exchange is dropped (case-sensitive, whole-string match).
/// Each group is sorted newest-first, then the recent group is emitted
/// before the relevant group. The combined sequence is not globally
/// time-ordered: an old relevant entry can follow a newer recent one.
///
/// Output length is bounded by `recent.len() + relevant.len()`.
pub fn merge_context(recent: Vec<Exchange>, relevant: Vec<SemanticMatch>) -> Vec<ContextEntry> {
    let mut relevant_entries: Vec<ContextEntry> = {
        let recent_texts: HashSet<&str> =
            recent.iter().map(|e| e.incoming_text.as_str()).collect();

        relevant
            .into_iter()
            .filter(|m| !recent_texts.contains(m.text.as_str()))
            .map(|m| ContextEntry::Relevant {
                text: m.text,
                timestamp: m.timestamp,
            })
            .collect()
    };

    let mut entries: Vec<ContextEntry> = recent
        .into_iter()
        .map(|e| ContextEntry::Recent {
            other_text: e.incoming_text,
            my_text: e.outgoing_text,
            timestamp: e.created_at,
        })
        .collect();

    entries.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
    relevant_entries.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));

    entries.extend(relevant_entries);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn exchange(incoming: &str, outgoing: &str, secs: i64) -> Exchange {
        Exchange {
            id: format!("ex-{}", secs),
            user_id: "user-1".to_string(),
            incoming_text: incoming.to_string(),
            outgoing_text: outgoing.to_string(),
            created_at: ts(secs),
        }
    }

    fn semantic(text: &str, secs: i64) -> SemanticMatch {
        SemanticMatch {
            text: text.to_string(),
            timestamp: ts(secs),
        }
    }

    #[test]
    fn test_recent_group_sorted_newest_first() {
        let merged = merge_context(
            vec![exchange("first", "r1", 1), exchange("third", "r3", 3), exchange("second", "r2", 2)],
            vec![],
        );

        let texts: Vec<_> = merged
            .iter()
            .map(|e| match e {
                ContextEntry::Recent { other_text, .. } => other_text.clone(),
                _ => panic!("expected recent entry"),
            })
            .collect();
        assert_eq!(texts, vec!["third", "second", "first"]);
    }

    #[rstest::rstest]
    #[case("how about lunch", true)] // exact match
    #[case("How About Lunch", false)] // case differs
    #[case("how about lunch tomorrow", false)] // partial match
    #[case("about lunch", false)] // substring
    fn test_dedup_is_exact_and_case_sensitive(#[case] relevant_text: &str, #[case] dropped: bool) {
        let merged = merge_context(
            vec![exchange("how about lunch", "sure", 5)],
            vec![semantic(relevant_text, 2)],
        );

        let expected_len = if dropped { 1 } else { 2 };
        assert_eq!(merged.len(), expected_len);
    }

    #[test]
    fn test_reply_text_does_not_dedup_relevant_entries() {
        // The dedup set holds other-party texts, not the user's replies.
        let merged = merge_context(
            vec![exchange("question", "the answer", 5)],
            vec![semantic("the answer", 2)],
        );

        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_groups_are_not_interleaved_by_time() {
        let merged = merge_context(
            vec![exchange("old recent", "r", 1)],
            vec![semantic("newer relevant", 10)],
        );

        // The relevant entry is newer but still follows the recent group.
        assert!(matches!(&merged[0], ContextEntry::Recent { .. }));
        assert!(matches!(&merged[1], ContextEntry::Relevant { .. }));
    }

    #[test]
    fn test_two_recent_three_relevant_with_one_duplicate() {
        let merged = merge_context(
            vec![exchange("t1 text", "r1", 1), exchange("t2 text", "r2", 2)],
            vec![
                semantic("t1 text", 1),
                semantic("relevant a", 9),
                semantic("relevant b", 4),
            ],
        );

        assert_eq!(merged.len(), 4);
        assert!(matches!(&merged[0], ContextEntry::Recent { other_text, .. } if other_text == "t2 text"));
        assert!(matches!(&merged[1], ContextEntry::Recent { other_text, .. } if other_text == "t1 text"));
        assert!(matches!(&merged[2], ContextEntry::Relevant { text, .. } if text == "relevant a"));
        assert!(matches!(&merged[3], ContextEntry::Relevant { text, .. } if text == "relevant b"));
    }

    #[test]
    fn test_empty_sources_merge_to_empty_window() {
        assert!(merge_context(vec![], vec![]).is_empty());
    }
}
