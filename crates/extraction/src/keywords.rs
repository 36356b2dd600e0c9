//! Keyword tables for the categorical checklist fields
//!
//! Each table maps keyword lists to an enum variant. Rows are evaluated
//! top-to-bottom and the first matching row wins, so rows whose keywords
//! contain another row's keywords (e.g. "non vegetarian" vs "vegetarian")
//! must come first. Matching is word-bounded, never raw substring.

use trip_planner_core::{
    AdventureLevel, ComfortLevel, FoodPreference, GroupType, SchedulePreference, StayPreference,
    TransportMode, TripTheme, WeatherPreference,
};

/// True when `phrase` occurs in `message` with non-alphanumeric characters
/// (or string edges) on both sides. Both arguments must be lowercase.
fn contains_phrase(message: &str, phrase: &str) -> bool {
    message.match_indices(phrase).any(|(at, _)| {
        let before = message[..at].chars().next_back();
        let after = message[at + phrase.len()..].chars().next();
        !before.is_some_and(|c| c.is_alphanumeric()) && !after.is_some_and(|c| c.is_alphanumeric())
    })
}

fn match_table<T: Copy>(message: &str, table: &[(&[&str], T)]) -> Option<T> {
    table.iter().find_map(|(keywords, value)| {
        keywords
            .iter()
            .any(|k| contains_phrase(message, k))
            .then_some(*value)
    })
}

const THEME_TABLE: &[(&[&str], TripTheme)] = &[
    (
        &["adventure", "trek", "trekking", "hiking", "rafting", "paragliding"],
        TripTheme::Adventure,
    ),
    (
        &["spiritual", "temple", "temples", "pilgrimage", "ashram"],
        TripTheme::Spiritual,
    ),
    (
        &["romantic", "honeymoon", "anniversary"],
        TripTheme::Romantic,
    ),
    (
        &["cultural", "culture", "heritage", "history", "museums", "forts"],
        TripTheme::Cultural,
    ),
    (
        &["foodie", "culinary", "street food", "food tour", "food trip"],
        TripTheme::Food,
    ),
    (
        &["nature", "wildlife", "mountains", "beaches", "forests", "waterfalls"],
        TripTheme::Nature,
    ),
    (
        &["relax", "relaxing", "relaxation", "chill", "unwind", "peaceful"],
        TripTheme::Relaxation,
    ),
];

const GROUP_TABLE: &[(&[&str], GroupType)] = &[
    (&["solo", "by myself", "alone", "on my own"], GroupType::Solo),
    (
        &["couple", "my partner", "my wife", "my husband", "girlfriend", "boyfriend"],
        GroupType::Couple,
    ),
    (
        &["family", "kids", "children", "parents", "in-laws"],
        GroupType::Family,
    ),
    (
        &["friends", "team", "colleagues", "office trip", "buddies", "group of"],
        GroupType::Team,
    ),
];

const TRANSPORT_TABLE: &[(&[&str], TransportMode)] = &[
    (&["flight", "flights", "fly", "flying", "plane"], TransportMode::Flight),
    (&["train", "trains", "railway", "rail"], TransportMode::Train),
    (&["bus", "buses", "volvo"], TransportMode::Bus),
    (
        &["road trip", "by car", "self drive", "drive down", "driving"],
        TransportMode::Car,
    ),
    (&["bike", "motorcycle", "bike trip", "ride down"], TransportMode::Bike),
];

const STAY_TABLE: &[(&[&str], StayPreference)] = &[
    (&["hostel", "hostels", "dorm", "backpacker"], StayPreference::Hostel),
    (&["resort", "resorts", "villa"], StayPreference::Resort),
    (
        &["homestay", "home stay", "guesthouse", "guest house"],
        StayPreference::Homestay,
    ),
    (&["apartment", "airbnb", "serviced flat"], StayPreference::Apartment),
    (&["camping", "camp", "tents", "campsite"], StayPreference::Camping),
    (&["hotel", "hotels"], StayPreference::Hotel),
];

const ADVENTURE_TABLE: &[(&[&str], AdventureLevel)] = &[
    (
        &["thrill", "extreme", "adrenaline", "high adventure"],
        AdventureLevel::High,
    ),
    (
        &["nothing risky", "light activities", "low key", "easy going", "laid back"],
        AdventureLevel::Low,
    ),
    (
        &["moderate adventure", "some adventure", "a bit of adventure"],
        AdventureLevel::Medium,
    ),
];

const FOOD_TABLE: &[(&[&str], FoodPreference)] = &[
    (&["vegan"], FoodPreference::Vegan),
    (
        &["non vegetarian", "non-vegetarian", "non veg", "non-veg", "nonveg"],
        FoodPreference::NonVegetarian,
    ),
    (
        &["vegetarian", "pure veg", "veg only", "veg food"],
        FoodPreference::Vegetarian,
    ),
    (
        &["local food", "local cuisine", "street food", "regional food"],
        FoodPreference::Local,
    ),
];

const COMFORT_TABLE: &[(&[&str], ComfortLevel)] = &[
    (
        &["luxury", "luxurious", "premium", "5 star", "five star"],
        ComfortLevel::Luxury,
    ),
    // Never a bare "budget": that word almost always introduces an amount.
    (
        &["budget friendly", "on a budget", "cheap", "economical", "pocket friendly"],
        ComfortLevel::Budget,
    ),
    (
        &["mid range", "mid-range", "standard stay", "3 star", "three star"],
        ComfortLevel::Standard,
    ),
];

const SCHEDULE_TABLE: &[(&[&str], SchedulePreference)] = &[
    (
        &["packed", "jam packed", "action packed", "cover everything", "busy itinerary"],
        SchedulePreference::Packed,
    ),
    (
        &["relaxed pace", "slow pace", "take it easy", "leisurely", "no rush"],
        SchedulePreference::Relaxed,
    ),
    (
        &["balanced", "mix of both", "bit of both"],
        SchedulePreference::Balanced,
    ),
];

const WEATHER_TABLE: &[(&[&str], WeatherPreference)] = &[
    (
        &["cold", "snow", "chilly", "cooler weather"],
        WeatherPreference::Cold,
    ),
    (
        &["warm", "sunny", "tropical", "hot weather"],
        WeatherPreference::Warm,
    ),
    (
        &["moderate weather", "pleasant weather", "mild weather"],
        WeatherPreference::Moderate,
    ),
];

/// Known cities keyed by canonical lowercase name; aliases cover common
/// alternate and former names.
const CITY_TABLE: &[(&str, &[&str])] = &[
    ("goa", &["goa"]),
    ("mumbai", &["mumbai", "bombay"]),
    ("delhi", &["delhi", "new delhi"]),
    ("bangalore", &["bangalore", "bengaluru"]),
    ("chennai", &["chennai", "madras"]),
    ("kolkata", &["kolkata", "calcutta"]),
    ("hyderabad", &["hyderabad"]),
    ("pune", &["pune"]),
    ("ahmedabad", &["ahmedabad"]),
    ("jaipur", &["jaipur"]),
    ("udaipur", &["udaipur"]),
    ("jaisalmer", &["jaisalmer"]),
    ("agra", &["agra"]),
    ("varanasi", &["varanasi", "banaras", "benares"]),
    ("amritsar", &["amritsar"]),
    ("lucknow", &["lucknow"]),
    ("manali", &["manali"]),
    ("shimla", &["shimla"]),
    ("rishikesh", &["rishikesh"]),
    ("leh", &["leh", "ladakh"]),
    ("srinagar", &["srinagar", "kashmir"]),
    ("darjeeling", &["darjeeling"]),
    ("gangtok", &["gangtok", "sikkim"]),
    ("kochi", &["kochi", "cochin"]),
    ("munnar", &["munnar"]),
    ("alleppey", &["alleppey", "alappuzha"]),
    ("ooty", &["ooty"]),
    ("mysore", &["mysore", "mysuru"]),
    ("coorg", &["coorg"]),
    ("hampi", &["hampi"]),
    ("gokarna", &["gokarna"]),
    ("pondicherry", &["pondicherry", "puducherry"]),
    ("port blair", &["port blair", "andaman"]),
];

pub fn trip_theme(message: &str) -> Option<TripTheme> {
    match_table(&message.to_lowercase(), THEME_TABLE)
}

pub fn group_type(message: &str) -> Option<GroupType> {
    match_table(&message.to_lowercase(), GROUP_TABLE)
}

pub fn transport_mode(message: &str) -> Option<TransportMode> {
    match_table(&message.to_lowercase(), TRANSPORT_TABLE)
}

pub fn stay_preference(message: &str) -> Option<StayPreference> {
    match_table(&message.to_lowercase(), STAY_TABLE)
}

pub fn adventure_level(message: &str) -> Option<AdventureLevel> {
    match_table(&message.to_lowercase(), ADVENTURE_TABLE)
}

pub fn food_preference(message: &str) -> Option<FoodPreference> {
    match_table(&message.to_lowercase(), FOOD_TABLE)
}

pub fn comfort_level(message: &str) -> Option<ComfortLevel> {
    match_table(&message.to_lowercase(), COMFORT_TABLE)
}

pub fn schedule_preference(message: &str) -> Option<SchedulePreference> {
    match_table(&message.to_lowercase(), SCHEDULE_TABLE)
}

pub fn weather_preference(message: &str) -> Option<WeatherPreference> {
    match_table(&message.to_lowercase(), WEATHER_TABLE)
}

/// First known city mentioned in the message, as its canonical name.
pub fn city(message: &str) -> Option<String> {
    let lower = message.to_lowercase();
    CITY_TABLE
        .iter()
        .find(|(_, aliases)| aliases.iter().any(|a| contains_phrase(&lower, a)))
        .map(|(canonical, _)| (*canonical).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn friends_mean_a_team_trip() {
        assert_eq!(group_type("planning a trip to Goa with friends"), Some(GroupType::Team));
        assert_eq!(city("planning a trip to Goa with friends"), Some("goa".to_string()));
    }

    #[test]
    fn city_aliases_resolve_to_canonical_names() {
        assert_eq!(city("flying out of Bombay"), Some("mumbai".to_string()));
        assert_eq!(city("starting from Bengaluru"), Some("bangalore".to_string()));
        assert_eq!(city("from paris"), None);
    }

    #[test]
    fn non_veg_is_not_misread_as_veg() {
        assert_eq!(food_preference("we are non vegetarian"), Some(FoodPreference::NonVegetarian));
        assert_eq!(food_preference("strictly vegetarian"), Some(FoodPreference::Vegetarian));
        assert_eq!(food_preference("vegan food please"), Some(FoodPreference::Vegan));
    }

    #[test]
    fn budget_amount_does_not_set_comfort_level() {
        assert_eq!(comfort_level("my budget is 15k"), None);
        assert_eq!(comfort_level("something budget friendly"), Some(ComfortLevel::Budget));
    }

    #[test]
    fn matching_is_word_bounded() {
        // "car" must not fire inside "scarf".
        assert_eq!(transport_mode("pack a scarf"), None);
        assert_eq!(transport_mode("a road trip down south"), Some(TransportMode::Car));
    }

    #[test]
    fn themes_and_stays() {
        assert_eq!(trip_theme("a relaxing beach holiday"), Some(TripTheme::Relaxation));
        assert_eq!(trip_theme("temple hopping"), Some(TripTheme::Spiritual));
        assert_eq!(stay_preference("a nice hostel"), Some(StayPreference::Hostel));
        assert_eq!(stay_preference("any decent hotel"), Some(StayPreference::Hotel));
    }
}
