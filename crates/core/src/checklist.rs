//! Trip checklist record and field registry
//!
//! The checklist is the single structured record collected over a
//! conversation. Every field starts absent and is filled at most once:
//! `apply` enforces first-write-wins, and only an explicit session reset
//! clears a field again.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Upper bound for a plausible trip budget in rupees. Larger numbers in a
/// message are almost always phone numbers, pincodes or years glued together.
pub const MAX_BUDGET: u64 = 10_000_000;

/// Overall trip theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripTheme {
    Adventure,
    Relaxation,
    Cultural,
    Spiritual,
    Romantic,
    Food,
    Nature,
}

impl TripTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripTheme::Adventure => "adventure",
            TripTheme::Relaxation => "relaxation",
            TripTheme::Cultural => "cultural",
            TripTheme::Spiritual => "spiritual",
            TripTheme::Romantic => "romantic",
            TripTheme::Food => "food",
            TripTheme::Nature => "nature",
        }
    }

    /// Display label used for itinerary day titles, e.g. "Adventure".
    pub fn display_name(&self) -> &'static str {
        match self {
            TripTheme::Adventure => "Adventure",
            TripTheme::Relaxation => "Relaxation",
            TripTheme::Cultural => "Cultural",
            TripTheme::Spiritual => "Spiritual",
            TripTheme::Romantic => "Romantic",
            TripTheme::Food => "Food",
            TripTheme::Nature => "Nature",
        }
    }
}

/// Who is travelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupType {
    Solo,
    Couple,
    Family,
    /// Friends or colleagues travelling together
    Team,
}

impl GroupType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupType::Solo => "solo",
            GroupType::Couple => "couple",
            GroupType::Family => "family",
            GroupType::Team => "team",
        }
    }
}

/// Preferred mode of transport to the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Flight,
    Train,
    Bus,
    Car,
    Bike,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Flight => "flight",
            TransportMode::Train => "train",
            TransportMode::Bus => "bus",
            TransportMode::Car => "car",
            TransportMode::Bike => "bike",
        }
    }
}

/// Preferred accommodation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StayPreference {
    Hotel,
    Hostel,
    Resort,
    Homestay,
    Apartment,
    Camping,
}

impl StayPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            StayPreference::Hotel => "hotel",
            StayPreference::Hostel => "hostel",
            StayPreference::Resort => "resort",
            StayPreference::Homestay => "homestay",
            StayPreference::Apartment => "apartment",
            StayPreference::Camping => "camping",
        }
    }
}

/// Appetite for physically demanding activities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdventureLevel {
    Low,
    Medium,
    High,
}

impl AdventureLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdventureLevel::Low => "low",
            AdventureLevel::Medium => "medium",
            AdventureLevel::High => "high",
        }
    }
}

/// Dietary preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodPreference {
    Vegetarian,
    NonVegetarian,
    Vegan,
    Local,
}

impl FoodPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodPreference::Vegetarian => "vegetarian",
            FoodPreference::NonVegetarian => "non_vegetarian",
            FoodPreference::Vegan => "vegan",
            FoodPreference::Local => "local",
        }
    }
}

/// Spending comfort band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComfortLevel {
    Budget,
    Standard,
    Luxury,
}

impl ComfortLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComfortLevel::Budget => "budget",
            ComfortLevel::Standard => "standard",
            ComfortLevel::Luxury => "luxury",
        }
    }
}

/// How densely the days should be planned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulePreference {
    Packed,
    Relaxed,
    Balanced,
}

impl SchedulePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchedulePreference::Packed => "packed",
            SchedulePreference::Relaxed => "relaxed",
            SchedulePreference::Balanced => "balanced",
        }
    }
}

/// Preferred climate at the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherPreference {
    Cold,
    Warm,
    Moderate,
}

impl WeatherPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherPreference::Cold => "cold",
            WeatherPreference::Warm => "warm",
            WeatherPreference::Moderate => "moderate",
        }
    }
}

/// Every trackable checklist field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChecklistField {
    StartDate,
    EndDate,
    TravelDays,
    TotalBudget,
    TripTheme,
    GroupType,
    TransportMode,
    StayPreference,
    AdventureLevel,
    FoodPreference,
    ComfortLevel,
    SchedulePreference,
    WeatherPreference,
    StartingCity,
    SafetyNeeds,
    SpecialRequirements,
    AvoidPlaces,
    VisitedPlaces,
}

impl ChecklistField {
    /// Wire name, matching the JSON representation of the checklist.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecklistField::StartDate => "startDate",
            ChecklistField::EndDate => "endDate",
            ChecklistField::TravelDays => "travelDays",
            ChecklistField::TotalBudget => "totalBudget",
            ChecklistField::TripTheme => "tripTheme",
            ChecklistField::GroupType => "groupType",
            ChecklistField::TransportMode => "transportMode",
            ChecklistField::StayPreference => "stayPreference",
            ChecklistField::AdventureLevel => "adventureLevel",
            ChecklistField::FoodPreference => "foodPreference",
            ChecklistField::ComfortLevel => "comfortLevel",
            ChecklistField::SchedulePreference => "schedulePreference",
            ChecklistField::WeatherPreference => "weatherPreference",
            ChecklistField::StartingCity => "startingCity",
            ChecklistField::SafetyNeeds => "safetyNeeds",
            ChecklistField::SpecialRequirements => "specialRequirements",
            ChecklistField::AvoidPlaces => "avoidPlaces",
            ChecklistField::VisitedPlaces => "visitedPlaces",
        }
    }
}

impl std::fmt::Display for ChecklistField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed order in which missing fields are asked about. `endDate` is never
/// asked directly; it is derived from the start date and trip length.
pub const PRIORITY_ORDER: [ChecklistField; 17] = [
    ChecklistField::StartingCity,
    ChecklistField::TotalBudget,
    ChecklistField::GroupType,
    ChecklistField::TripTheme,
    ChecklistField::StartDate,
    ChecklistField::TravelDays,
    ChecklistField::TransportMode,
    ChecklistField::StayPreference,
    ChecklistField::AdventureLevel,
    ChecklistField::FoodPreference,
    ChecklistField::SchedulePreference,
    ChecklistField::ComfortLevel,
    ChecklistField::WeatherPreference,
    ChecklistField::SafetyNeeds,
    ChecklistField::SpecialRequirements,
    ChecklistField::AvoidPlaces,
    ChecklistField::VisitedPlaces,
];

/// Minimal subset that must be (mostly) filled before an itinerary is
/// generated. Completeness is computed against this set only.
pub const CRITICAL_FIELDS: [ChecklistField; 7] = [
    ChecklistField::StartDate,
    ChecklistField::EndDate,
    ChecklistField::TotalBudget,
    ChecklistField::StartingCity,
    ChecklistField::GroupType,
    ChecklistField::StayPreference,
    ChecklistField::SchedulePreference,
];

/// The structured trip record collected from the conversation.
///
/// Doubles as the partial-update type: extraction produces a
/// `TripChecklist` with only the recognized fields set, and `apply`
/// folds it into the session's record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TripChecklist {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub travel_days: Option<u32>,
    pub total_budget: Option<u64>,
    pub trip_theme: Option<TripTheme>,
    pub group_type: Option<GroupType>,
    pub transport_mode: Option<TransportMode>,
    pub stay_preference: Option<StayPreference>,
    pub adventure_level: Option<AdventureLevel>,
    pub food_preference: Option<FoodPreference>,
    pub comfort_level: Option<ComfortLevel>,
    pub schedule_preference: Option<SchedulePreference>,
    pub weather_preference: Option<WeatherPreference>,
    pub starting_city: Option<String>,
    pub safety_needs: Option<String>,
    pub special_requirements: Option<String>,
    pub avoid_places: Vec<String>,
    pub visited_places: Vec<String>,
}

impl TripChecklist {
    /// True when a field holds a usable value. Empty strings and empty
    /// lists count as unfilled.
    pub fn is_filled(&self, field: ChecklistField) -> bool {
        match field {
            ChecklistField::StartDate => self.start_date.is_some(),
            ChecklistField::EndDate => self.end_date.is_some(),
            ChecklistField::TravelDays => self.travel_days.is_some(),
            ChecklistField::TotalBudget => self.total_budget.is_some(),
            ChecklistField::TripTheme => self.trip_theme.is_some(),
            ChecklistField::GroupType => self.group_type.is_some(),
            ChecklistField::TransportMode => self.transport_mode.is_some(),
            ChecklistField::StayPreference => self.stay_preference.is_some(),
            ChecklistField::AdventureLevel => self.adventure_level.is_some(),
            ChecklistField::FoodPreference => self.food_preference.is_some(),
            ChecklistField::ComfortLevel => self.comfort_level.is_some(),
            ChecklistField::SchedulePreference => self.schedule_preference.is_some(),
            ChecklistField::WeatherPreference => self.weather_preference.is_some(),
            ChecklistField::StartingCity => non_blank(&self.starting_city),
            ChecklistField::SafetyNeeds => non_blank(&self.safety_needs),
            ChecklistField::SpecialRequirements => non_blank(&self.special_requirements),
            ChecklistField::AvoidPlaces => !self.avoid_places.is_empty(),
            ChecklistField::VisitedPlaces => !self.visited_places.is_empty(),
        }
    }

    /// True when no field holds a value.
    pub fn is_empty(&self) -> bool {
        !PRIORITY_ORDER.iter().any(|f| self.is_filled(*f)) && self.end_date.is_none()
    }

    /// Integer completeness percentage over the critical field set.
    pub fn completeness(&self) -> u8 {
        let filled = CRITICAL_FIELDS.iter().filter(|f| self.is_filled(**f)).count();
        (filled * 100 / CRITICAL_FIELDS.len()) as u8
    }

    /// Unfilled fields in question priority order.
    pub fn missing_fields(&self) -> Vec<ChecklistField> {
        PRIORITY_ORDER
            .iter()
            .copied()
            .filter(|f| !self.is_filled(*f))
            .collect()
    }

    /// Fold a partial update into this record. Fields that already hold a
    /// value are never overwritten (first-write-wins); only explicit reset
    /// clears them. Returns the fields that were newly set.
    pub fn apply(&mut self, update: &TripChecklist) -> Vec<ChecklistField> {
        let mut applied = Vec::new();

        macro_rules! set_option {
            ($field:ident, $variant:expr) => {
                if self.$field.is_none() {
                    if let Some(v) = update.$field.clone() {
                        self.$field = Some(v);
                        applied.push($variant);
                    }
                }
            };
        }

        set_option!(start_date, ChecklistField::StartDate);
        set_option!(end_date, ChecklistField::EndDate);
        set_option!(travel_days, ChecklistField::TravelDays);
        set_option!(total_budget, ChecklistField::TotalBudget);
        set_option!(trip_theme, ChecklistField::TripTheme);
        set_option!(group_type, ChecklistField::GroupType);
        set_option!(transport_mode, ChecklistField::TransportMode);
        set_option!(stay_preference, ChecklistField::StayPreference);
        set_option!(adventure_level, ChecklistField::AdventureLevel);
        set_option!(food_preference, ChecklistField::FoodPreference);
        set_option!(comfort_level, ChecklistField::ComfortLevel);
        set_option!(schedule_preference, ChecklistField::SchedulePreference);
        set_option!(weather_preference, ChecklistField::WeatherPreference);

        if !non_blank(&self.starting_city) && non_blank(&update.starting_city) {
            self.starting_city = update.starting_city.clone();
            applied.push(ChecklistField::StartingCity);
        }
        if !non_blank(&self.safety_needs) && non_blank(&update.safety_needs) {
            self.safety_needs = update.safety_needs.clone();
            applied.push(ChecklistField::SafetyNeeds);
        }
        if !non_blank(&self.special_requirements) && non_blank(&update.special_requirements) {
            self.special_requirements = update.special_requirements.clone();
            applied.push(ChecklistField::SpecialRequirements);
        }
        if self.avoid_places.is_empty() && !update.avoid_places.is_empty() {
            self.avoid_places = dedup(update.avoid_places.clone());
            applied.push(ChecklistField::AvoidPlaces);
        }
        if self.visited_places.is_empty() && !update.visited_places.is_empty() {
            self.visited_places = dedup(update.visited_places.clone());
            applied.push(ChecklistField::VisitedPlaces);
        }

        // Derive travel_days once both endpoints are known.
        if self.travel_days.is_none() {
            if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
                let days = (end - start).num_days();
                if days > 0 {
                    self.travel_days = Some(days as u32);
                    applied.push(ChecklistField::TravelDays);
                }
            }
        }

        applied
    }

    /// Copy of just the named fields, everything else left unset. Used to
    /// record a turn's delta without the fields it merely re-stated.
    pub fn subset(&self, fields: &[ChecklistField]) -> TripChecklist {
        let mut out = TripChecklist::default();
        for field in fields {
            match field {
                ChecklistField::StartDate => out.start_date = self.start_date,
                ChecklistField::EndDate => out.end_date = self.end_date,
                ChecklistField::TravelDays => out.travel_days = self.travel_days,
                ChecklistField::TotalBudget => out.total_budget = self.total_budget,
                ChecklistField::TripTheme => out.trip_theme = self.trip_theme,
                ChecklistField::GroupType => out.group_type = self.group_type,
                ChecklistField::TransportMode => out.transport_mode = self.transport_mode,
                ChecklistField::StayPreference => out.stay_preference = self.stay_preference,
                ChecklistField::AdventureLevel => out.adventure_level = self.adventure_level,
                ChecklistField::FoodPreference => out.food_preference = self.food_preference,
                ChecklistField::ComfortLevel => out.comfort_level = self.comfort_level,
                ChecklistField::SchedulePreference => {
                    out.schedule_preference = self.schedule_preference
                }
                ChecklistField::WeatherPreference => {
                    out.weather_preference = self.weather_preference
                }
                ChecklistField::StartingCity => out.starting_city = self.starting_city.clone(),
                ChecklistField::SafetyNeeds => out.safety_needs = self.safety_needs.clone(),
                ChecklistField::SpecialRequirements => {
                    out.special_requirements = self.special_requirements.clone()
                }
                ChecklistField::AvoidPlaces => out.avoid_places = self.avoid_places.clone(),
                ChecklistField::VisitedPlaces => out.visited_places = self.visited_places.clone(),
            }
        }
        out
    }
}

fn non_blank(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

/// Remove duplicates while preserving first-seen order.
pub fn dedup(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|p| seen.insert(p.to_lowercase()))
        .collect()
}
