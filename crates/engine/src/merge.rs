//! Merge of rule-based and model-extracted fields
//!
//! The rule parsers are the trusted baseline; model output overlays it only
//! when the model declared enough confidence, and then wins per field.
//! First-write-wins against the session record is applied later, in
//! `TripChecklist::apply` - this module only decides what the turn's
//! candidate update looks like.

use trip_planner_core::TripChecklist;

/// Minimum model confidence for its fields to overlay parser output.
pub const MERGE_CONFIDENCE: f32 = 0.7;

/// Stricter bar once an itinerary exists and changes mean replanning.
pub const REFINE_CONFIDENCE: f32 = 0.8;

/// Combine the parser update with the model update for one turn.
pub fn merge_extractions(
    rule: TripChecklist,
    ai: &TripChecklist,
    confidence: f32,
    refine: bool,
) -> TripChecklist {
    let threshold = if refine { REFINE_CONFIDENCE } else { MERGE_CONFIDENCE };
    if confidence <= threshold {
        return rule;
    }

    let mut merged = rule;

    macro_rules! overlay {
        ($field:ident) => {
            if let Some(value) = ai.$field.clone() {
                merged.$field = Some(value);
            }
        };
    }

    overlay!(start_date);
    overlay!(end_date);
    overlay!(travel_days);
    overlay!(total_budget);
    overlay!(trip_theme);
    overlay!(group_type);
    overlay!(transport_mode);
    overlay!(stay_preference);
    overlay!(adventure_level);
    overlay!(food_preference);
    overlay!(comfort_level);
    overlay!(schedule_preference);
    overlay!(weather_preference);
    overlay!(starting_city);
    overlay!(safety_needs);
    overlay!(special_requirements);

    if !ai.avoid_places.is_empty() {
        merged.avoid_places = ai.avoid_places.clone();
    }
    if !ai.visited_places.is_empty() {
        merged.visited_places = ai.visited_places.clone();
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use trip_planner_core::{GroupType, TripTheme};

    fn rule_update() -> TripChecklist {
        TripChecklist {
            starting_city: Some("goa".into()),
            total_budget: Some(15_000),
            ..Default::default()
        }
    }

    #[test]
    fn low_confidence_keeps_parser_output_only() {
        let ai = TripChecklist {
            starting_city: Some("manali".into()),
            trip_theme: Some(TripTheme::Adventure),
            ..Default::default()
        };
        let merged = merge_extractions(rule_update(), &ai, 0.5, false);
        assert_eq!(merged.starting_city.as_deref(), Some("goa"));
        assert_eq!(merged.trip_theme, None);
    }

    #[test]
    fn confident_model_wins_per_field() {
        let ai = TripChecklist {
            starting_city: Some("manali".into()),
            group_type: Some(GroupType::Couple),
            ..Default::default()
        };
        let merged = merge_extractions(rule_update(), &ai, 0.9, false);
        // Overridden where the model spoke, kept where it did not.
        assert_eq!(merged.starting_city.as_deref(), Some("manali"));
        assert_eq!(merged.group_type, Some(GroupType::Couple));
        assert_eq!(merged.total_budget, Some(15_000));
    }

    #[test]
    fn refine_mode_raises_the_bar() {
        let ai = TripChecklist {
            starting_city: Some("manali".into()),
            ..Default::default()
        };
        let merged = merge_extractions(rule_update(), &ai, 0.75, true);
        assert_eq!(merged.starting_city.as_deref(), Some("goa"));

        let merged = merge_extractions(rule_update(), &ai, 0.85, true);
        assert_eq!(merged.starting_city.as_deref(), Some("manali"));
    }

    #[test]
    fn threshold_is_exclusive() {
        let ai = TripChecklist {
            starting_city: Some("manali".into()),
            ..Default::default()
        };
        let merged = merge_extractions(rule_update(), &ai, MERGE_CONFIDENCE, false);
        assert_eq!(merged.starting_city.as_deref(), Some("goa"));
    }
}
