//! Deterministic itinerary synthesis
//!
//! A fixed template filled from the checklist: no model involvement, so
//! generation works identically with and without a backend. Costs are
//! placeholders sized off the daily budget.

use chrono::{Days, NaiveDate};
use trip_planner_core::{
    ActivityBlock, BudgetBreakdown, DayPlan, Itinerary, TripChecklist, TripTheme,
};

use crate::EngineError;

const DEFAULT_TRAVEL_DAYS: u32 = 3;
const DEFAULT_TOTAL_BUDGET: u64 = 30_000;

/// Build a day-by-day plan from whatever the checklist holds. Absent fields
/// fall back to defaults rather than failing.
pub fn synthesize(checklist: &TripChecklist, today: NaiveDate) -> Result<Itinerary, EngineError> {
    let days = checklist.travel_days.unwrap_or(DEFAULT_TRAVEL_DAYS).max(1);
    let start = checklist.start_date.unwrap_or(today);
    let end = start
        .checked_add_days(Days::new(u64::from(days - 1)))
        .ok_or_else(|| EngineError::Synthesis(format!("date overflow for {days} days")))?;

    let destination = checklist
        .starting_city
        .clone()
        .unwrap_or_else(|| "your destination".to_string());
    let total_budget = checklist.total_budget.unwrap_or(DEFAULT_TOTAL_BUDGET);
    let daily_budget = total_budget / u64::from(days);

    let mut day_plans = Vec::with_capacity(days as usize);
    for index in 0..days {
        let date = start
            .checked_add_days(Days::new(u64::from(index)))
            .ok_or_else(|| EngineError::Synthesis(format!("date overflow at day {index}")))?;
        day_plans.push(build_day(checklist, &destination, date, index, days, daily_budget));
    }

    Ok(Itinerary {
        destination,
        start_date: start,
        end_date: end,
        days: day_plans,
        budget_breakdown: split_budget(total_budget),
    })
}

fn build_day(
    checklist: &TripChecklist,
    destination: &str,
    date: NaiveDate,
    index: u32,
    total_days: u32,
    daily_budget: u64,
) -> DayPlan {
    let theme = checklist.trip_theme;
    let last = index + 1 == total_days;

    let (title, blocks) = if index == 0 {
        (
            "Arrival".to_string(),
            vec![
                block("9:00 AM", format!("Travel to {destination} and check in"), destination, "3 hours", daily_budget / 2),
                block("2:00 PM", format!("Explore the area around your stay in {destination}"), destination, "3 hours", daily_budget / 4),
                block("7:00 PM", "Dinner at a recommended local spot".to_string(), destination, "2 hours", daily_budget / 4),
            ],
        )
    } else if last {
        (
            "Departure".to_string(),
            vec![
                block("9:00 AM", "Breakfast and check-out".to_string(), destination, "2 hours", daily_budget / 3),
                block("11:00 AM", "Last-minute shopping and souvenirs".to_string(), destination, "2 hours", daily_budget / 3),
                block("2:00 PM", "Head back home".to_string(), destination, "4 hours", daily_budget / 3),
            ],
        )
    } else {
        let label = theme.map_or("Sightseeing", |t| t.display_name());
        let morning = if theme == Some(TripTheme::Food) {
            block("9:00 AM", "Guided local food tour".to_string(), destination, "3 hours", daily_budget / 3)
        } else {
            block("9:00 AM", format!("{label} highlights of {destination}"), destination, "3 hours", daily_budget / 3)
        };
        (
            format!("{label} Activities"),
            vec![
                morning,
                block("1:30 PM", "Lunch and a midday break".to_string(), destination, "2 hours", daily_budget / 3),
                block("4:00 PM", format!("Afternoon {} around {destination}", label.to_lowercase()), destination, "3 hours", daily_budget / 3),
            ],
        )
    };

    DayPlan {
        date,
        day_index: index,
        title,
        blocks,
        daily_budget,
    }
}

fn block(
    time: &str,
    activity: String,
    location: &str,
    duration: &str,
    estimated_cost: u64,
) -> ActivityBlock {
    ActivityBlock {
        time: time.to_string(),
        activity,
        location: location.to_string(),
        duration: duration.to_string(),
        estimated_cost,
    }
}

/// 40% stay, 30% food, 20% activities, 10% transport; integer division
/// leaves the remainder unallocated.
fn split_budget(total: u64) -> BudgetBreakdown {
    BudgetBreakdown {
        accommodation: total * 40 / 100,
        food: total * 30 / 100,
        activities: total * 20 / 100,
        transport: total * 10 / 100,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
    }

    #[test]
    fn one_day_per_travel_day() {
        let checklist = TripChecklist {
            starting_city: Some("goa".into()),
            travel_days: Some(4),
            total_budget: Some(40_000),
            start_date: NaiveDate::from_ymd_opt(2026, 12, 20),
            ..Default::default()
        };
        let itinerary = synthesize(&checklist, today()).unwrap();

        assert_eq!(itinerary.days.len(), 4);
        assert_eq!(itinerary.start_date, NaiveDate::from_ymd_opt(2026, 12, 20).unwrap());
        assert_eq!(itinerary.end_date, NaiveDate::from_ymd_opt(2026, 12, 23).unwrap());
        assert_eq!(itinerary.days[0].title, "Arrival");
        assert_eq!(itinerary.days[3].title, "Departure");
        assert_eq!(itinerary.days[1].daily_budget, 10_000);
    }

    #[test]
    fn defaults_cover_an_empty_checklist() {
        let itinerary = synthesize(&TripChecklist::default(), today()).unwrap();
        assert_eq!(itinerary.days.len(), 3);
        assert_eq!(itinerary.start_date, today());
        assert_eq!(itinerary.destination, "your destination");
    }

    #[test]
    fn budget_split_is_40_30_20_10() {
        let breakdown = split_budget(100_000);
        assert_eq!(breakdown.accommodation, 40_000);
        assert_eq!(breakdown.food, 30_000);
        assert_eq!(breakdown.activities, 20_000);
        assert_eq!(breakdown.transport, 10_000);
    }

    #[test]
    fn food_theme_gets_a_food_tour_morning() {
        let checklist = TripChecklist {
            trip_theme: Some(TripTheme::Food),
            travel_days: Some(3),
            ..Default::default()
        };
        let itinerary = synthesize(&checklist, today()).unwrap();
        assert!(itinerary.days[1].blocks[0].activity.contains("food tour"));
    }

    #[test]
    fn theme_names_the_middle_days() {
        let checklist = TripChecklist {
            trip_theme: Some(TripTheme::Adventure),
            travel_days: Some(5),
            ..Default::default()
        };
        let itinerary = synthesize(&checklist, today()).unwrap();
        assert_eq!(itinerary.days[2].title, "Adventure Activities");
    }
}
