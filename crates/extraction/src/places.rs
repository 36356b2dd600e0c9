//! Place-list extraction for "avoid" and "already visited" mentions
//!
//! A trigger phrase scopes the search to the rest of its sentence, then
//! capitalized tokens in that clause are taken as place names. This is a
//! heuristic: a capitalized non-place word right after a trigger will be
//! picked up too. Lists are deduplicated case-insensitively.

use regex::Regex;
use trip_planner_core::checklist::dedup;

const AVOID_TRIGGERS: &[&str] = &[
    "avoid",
    "skip",
    "don't want",
    "dont want",
    "not interested in",
    "stay away from",
];

const VISITED_TRIGGERS: &[&str] = &[
    "already visited",
    "already been to",
    "already seen",
    "visited",
    "been to",
];

pub struct PlaceParser {
    capitalized: Regex,
    avoid: Regex,
    visited: Regex,
}

impl PlaceParser {
    pub fn new() -> Self {
        Self {
            capitalized: Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*").unwrap(),
            avoid: trigger_pattern(AVOID_TRIGGERS),
            visited: trigger_pattern(VISITED_TRIGGERS),
        }
    }

    pub fn avoid_places(&self, message: &str) -> Vec<String> {
        self.places_after(message, &self.avoid)
    }

    pub fn visited_places(&self, message: &str) -> Vec<String> {
        self.places_after(message, &self.visited)
    }

    /// Capitalized tokens between the first matching trigger and the end of
    /// its sentence. Trigger positions come from a case-insensitive match on
    /// the message itself, so the offsets stay valid for slicing it.
    fn places_after(&self, message: &str, trigger: &Regex) -> Vec<String> {
        let Some(hit) = trigger.find(message) else {
            return Vec::new();
        };

        let clause = &message[hit.end()..];
        let clause = clause
            .split_once(['.', '!', '?', ';'])
            .map_or(clause, |(head, _)| head);

        let found = self
            .capitalized
            .find_iter(clause)
            .map(|m| m.as_str().to_lowercase())
            .collect();
        dedup(found)
    }
}

impl Default for PlaceParser {
    fn default() -> Self {
        Self::new()
    }
}

fn trigger_pattern(triggers: &[&str]) -> Regex {
    let alternation = triggers
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})")).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avoid_list_from_trigger_clause() {
        let parser = PlaceParser::new();
        assert_eq!(
            parser.avoid_places("please avoid Shimla and Manali. We like quiet places"),
            vec!["shimla".to_string(), "manali".to_string()]
        );
    }

    #[test]
    fn visited_list_stops_at_sentence_end() {
        let parser = PlaceParser::new();
        assert_eq!(
            parser.visited_places("we've been to Goa and Gokarna already. Maybe Kerala next"),
            vec!["goa".to_string(), "gokarna".to_string()]
        );
    }

    #[test]
    fn duplicates_collapse_case_insensitively() {
        let parser = PlaceParser::new();
        assert_eq!(
            parser.avoid_places("skip Agra, agra is too crowded, Agra again"),
            vec!["agra".to_string()]
        );
    }

    #[test]
    fn triggers_match_case_insensitively() {
        let parser = PlaceParser::new();
        assert_eq!(
            parser.avoid_places("AVOID Shimla in winter"),
            vec!["shimla".to_string()]
        );
    }

    #[test]
    fn non_ascii_text_around_the_trigger() {
        let parser = PlaceParser::new();
        // Multi-byte characters before and right after the trigger must not
        // shift or break the clause bounds.
        assert_eq!(
            parser.avoid_places("İstanbul was lovely, but avoid Agra please"),
            vec!["agra".to_string()]
        );
        assert!(parser.avoid_places("İ avoid東京").is_empty());
    }

    #[test]
    fn no_trigger_means_no_places() {
        let parser = PlaceParser::new();
        assert!(parser.avoid_places("Goa and Manali sound great").is_empty());
        assert!(parser.visited_places("first trip ever").is_empty());
    }
}
