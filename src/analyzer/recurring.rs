//! Recurring problems: groups tickets with similar titles and extracts the
//! most frequent title keywords.
//!
//! Similarity is deliberately naive: two titles are "the same problem" when
//! their first three normalised words match.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::{capitalize, Ticket};

/// Anything that is neither an ASCII word character nor whitespace. Accented
/// letters are stripped too, so "Écran" and "cran" share a key.
static NON_WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^0-9A-Za-z_\s]").expect("NON_WORD_REGEX: invalid pattern")
});

/// Title words that carry no signal about the problem itself.
const TITLE_STOP_WORDS: &[&str] = &["problème", "ticket", "demande", "besoin"];

const GROUP_KEY_WORDS: usize = 3;
pub const MAX_RECURRING_GROUPS: usize = 10;
pub const MAX_KEYWORDS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringProblem {
    /// Title of the first ticket of the group.
    pub titre: String,
    pub occurrences: usize,
    /// Most recent `created_at` in the group, as sent by the backend.
    pub dernier: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequentKeyword {
    pub probleme: String,
    pub occurrences: usize,
}

/// Lowercases, strips punctuation and trims.
pub fn normalize_title(title: &str) -> String {
    NON_WORD_REGEX
        .replace_all(&title.to_lowercase(), "")
        .trim()
        .to_string()
}

/// First three normalised words, joined by a single space.
pub fn group_key(title: &str) -> String {
    normalize_title(title)
        .split_whitespace()
        .take(GROUP_KEY_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Groups of more than one ticket sharing a title key, biggest first, at most 10.
pub fn recurring_problems(tickets: &[Ticket]) -> Vec<RecurringProblem> {
    let mut groups: Vec<Vec<&Ticket>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for t in tickets.iter().filter(|t| !t.title.is_empty()) {
        let key = group_key(&t.title);
        match index.get(&key) {
            Some(&i) => groups[i].push(t),
            None => {
                index.insert(key, groups.len());
                groups.push(vec![t]);
            }
        }
    }

    groups.retain(|g| g.len() > 1);
    groups.sort_by(|a, b| b.len().cmp(&a.len()));
    groups.truncate(MAX_RECURRING_GROUPS);

    groups
        .into_iter()
        .map(|group| RecurringProblem {
            titre: group[0].title.clone(),
            occurrences: group.len(),
            dernier: most_recent(&group).and_then(|t| t.created_at.clone()),
        })
        .collect()
}

/// Latest creation in the group. Missing timestamps rank as oldest; on equal
/// timestamps the earliest ticket in collection order wins.
fn most_recent<'a>(group: &[&'a Ticket]) -> Option<&'a Ticket> {
    let mut best: Option<(&Ticket, i64)> = None;
    for &t in group {
        let ts = t
            .created_local()
            .map(|d| d.and_utc().timestamp_millis())
            .unwrap_or(0);
        if best.map_or(true, |(_, b)| ts > b) {
            best = Some((t, ts));
        }
    }
    best.map(|(t, _)| t)
}

/// The five most frequent title words longer than three characters.
pub fn frequent_keywords(tickets: &[Ticket]) -> Vec<FrequentKeyword> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for t in tickets.iter().filter(|t| !t.title.is_empty()) {
        let lowered = t.title.to_lowercase();
        for word in lowered.split_whitespace() {
            if word.chars().count() <= 3 || TITLE_STOP_WORDS.contains(&word) {
                continue;
            }
            match index.get(word) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(word.to_string(), counts.len());
                    counts.push((word.to_string(), 1));
                }
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(word, occurrences)| FrequentKeyword {
            probleme: capitalize(&word),
            occurrences,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::fixtures::{ticket, ticket_titled};

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  Imprimante : ne marche PAS !  "), "imprimante  ne marche pas");
        assert_eq!(normalize_title("Écran noir (bureau 12)"), "cran noir bureau 12");
    }

    #[test]
    fn test_accents_are_stripped_from_group_keys() {
        assert_eq!(normalize_title("Écran noir"), "cran noir");
        assert_eq!(group_key("Accès réseau coupé"), "accs rseau coup");
        let tickets = vec![
            ticket_titled("1", "Écran noir au démarrage", "2025-05-01T09:00:00"),
            ticket_titled("2", "écran noir au démarrage", "2025-05-02T09:00:00"),
        ];
        assert_eq!(recurring_problems(&tickets)[0].occurrences, 2);
    }

    #[test]
    fn test_group_key_first_three_words() {
        assert_eq!(group_key("Imprimante ne marche pas"), "imprimante ne marche");
        assert_eq!(group_key("Imprimante : ne   marche plus du tout"), "imprimante ne marche");
        assert_eq!(group_key("VPN"), "vpn");
    }

    #[test]
    fn test_three_identical_titles_make_one_group() {
        let tickets = vec![
            ticket_titled("1", "Imprimante ne marche pas", "2025-05-01T09:00:00"),
            ticket_titled("2", "Imprimante ne marche pas", "2025-05-03T09:00:00"),
            ticket_titled("3", "Imprimante ne marche pas", "2025-05-02T09:00:00"),
            ticket_titled("4", "Accès VPN refusé", "2025-05-02T09:00:00"),
        ];
        let groups = recurring_problems(&tickets);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].occurrences, 3);
        assert_eq!(groups[0].titre, "Imprimante ne marche pas");
        assert_eq!(groups[0].dernier.as_deref(), Some("2025-05-03T09:00:00"));
    }

    #[test]
    fn test_groups_sorted_and_capped() {
        let mut tickets = Vec::new();
        let mut id = 0;
        // 12 groups: group g has g + 2 members
        for g in 0..12 {
            for _ in 0..(g + 2) {
                id += 1;
                tickets.push(ticket_titled(
                    &id.to_string(),
                    &format!("panne numero {} salle", g),
                    "2025-05-01T09:00:00",
                ));
            }
        }
        let groups = recurring_problems(&tickets);
        assert_eq!(groups.len(), MAX_RECURRING_GROUPS);
        assert!(groups.iter().all(|g| g.occurrences > 1));
        assert!(groups.windows(2).all(|w| w[0].occurrences >= w[1].occurrences));
        assert_eq!(groups[0].occurrences, 13);
    }

    #[test]
    fn test_dernier_ties_and_missing_dates() {
        let mut undated = ticket("1", "en_cours");
        undated.title = "Souris cassée bureau".into();
        let tickets = vec![
            undated,
            ticket_titled("2", "Souris cassée bureau 4", "2025-05-01T09:00:00"),
            ticket_titled("3", "Souris cassée bureau 7", "2025-05-01T09:00:00"),
        ];
        let groups = recurring_problems(&tickets);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].titre, "Souris cassée bureau");
        assert_eq!(groups[0].dernier.as_deref(), Some("2025-05-01T09:00:00"));
    }

    #[test]
    fn test_group_without_any_date() {
        let mut a = ticket("1", "en_cours");
        a.title = "Clavier HS".into();
        let mut b = ticket("2", "en_cours");
        b.title = "clavier hs".into();
        let groups = recurring_problems(&[a, b]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].dernier, None);
    }

    #[test]
    fn test_empty_titles_skipped() {
        let tickets = vec![ticket("1", "en_cours"), ticket("2", "en_cours")];
        assert!(recurring_problems(&tickets).is_empty());
        assert!(frequent_keywords(&tickets).is_empty());
    }

    #[test]
    fn test_frequent_keywords() {
        let tickets = vec![
            ticket_titled("1", "Problème imprimante bureau", "2025-05-01T09:00:00"),
            ticket_titled("2", "Imprimante bloquée", "2025-05-01T09:00:00"),
            ticket_titled("3", "Demande nouvelle imprimante", "2025-05-01T09:00:00"),
            ticket_titled("4", "Accès messagerie", "2025-05-01T09:00:00"),
            ticket_titled("5", "Messagerie lente sur PC", "2025-05-01T09:00:00"),
        ];
        let keywords = frequent_keywords(&tickets);
        assert_eq!(keywords.len(), MAX_KEYWORDS);
        assert_eq!(
            keywords[0],
            FrequentKeyword {
                probleme: "Imprimante".into(),
                occurrences: 3
            }
        );
        assert_eq!(keywords[1].probleme, "Messagerie");
        assert_eq!(keywords[1].occurrences, 2);
        // stop words and short tokens never show up
        assert!(keywords
            .iter()
            .all(|k| k.probleme != "Problème" && k.probleme != "Demande" && k.probleme != "Sur"));
        // ties keep first-seen order
        assert_eq!(keywords[2].probleme, "Bureau");
    }
}
