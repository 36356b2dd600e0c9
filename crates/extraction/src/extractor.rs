//! Composite extractor producing a partial checklist update

use chrono::{NaiveDate, Utc};
use regex::Regex;
use trip_planner_core::TripChecklist;

use crate::budget::BudgetParser;
use crate::dates::DateParser;
use crate::keywords;
use crate::places::PlaceParser;

/// Runs every rule-based parser over one message and collects the results
/// into a partial [`TripChecklist`]. Extraction is deterministic: the same
/// message and reference date always produce the same update.
pub struct FieldExtractor {
    dates: DateParser,
    budget: BudgetParser,
    places: PlaceParser,
    safety: Regex,
    special: Regex,
}

impl FieldExtractor {
    pub fn new() -> Self {
        Self {
            dates: DateParser::new(),
            budget: BudgetParser::new(),
            places: PlaceParser::new(),
            safety: Regex::new(r"(?i)\b(?:safe|safety|security)\b").unwrap(),
            special: Regex::new(
                r"(?i)\b(?:wheelchair|accessib\w*|allerg\w*|dietary|medical|special needs?)\b",
            )
            .unwrap(),
        }
    }

    /// Extract against the current date.
    pub fn extract(&self, message: &str) -> TripChecklist {
        self.extract_with_today(message, Utc::now().date_naive())
    }

    /// Extract with an injected reference date.
    pub fn extract_with_today(&self, message: &str, today: NaiveDate) -> TripChecklist {
        let mut update = TripChecklist::default();

        let parsed = self.dates.parse(message, today);
        update.start_date = parsed.start;
        update.end_date = parsed.end;
        update.travel_days = parsed.travel_days;

        update.total_budget = self.budget.parse(message);
        update.starting_city = keywords::city(message);
        update.trip_theme = keywords::trip_theme(message);
        update.group_type = keywords::group_type(message);
        update.transport_mode = keywords::transport_mode(message);
        update.stay_preference = keywords::stay_preference(message);
        update.adventure_level = keywords::adventure_level(message);
        update.food_preference = keywords::food_preference(message);
        update.comfort_level = keywords::comfort_level(message);
        update.schedule_preference = keywords::schedule_preference(message);
        update.weather_preference = keywords::weather_preference(message);

        update.avoid_places = self.places.avoid_places(message);
        update.visited_places = self.places.visited_places(message);

        update.safety_needs = sentence_around(message, &self.safety);
        update.special_requirements = sentence_around(message, &self.special);

        update
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// The full sentence containing the first match, trimmed. Keeping the whole
/// sentence preserves context like "safe for a solo woman traveller".
fn sentence_around(message: &str, pattern: &Regex) -> Option<String> {
    let hit = pattern.find(message)?;
    let start = message[..hit.start()]
        .rfind(['.', '!', '?', ';'])
        .map_or(0, |i| i + 1);
    let end = message[hit.end()..]
        .find(['.', '!', '?', ';'])
        .map_or(message.len(), |i| hit.end() + i);
    let sentence = message[start..end].trim();
    (!sentence.is_empty()).then(|| sentence.to_string())
}
