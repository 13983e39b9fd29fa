//! Travel domain model: trips, daily plans, schedule items.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{ItineraError, Result};

/// Requested travel style for a trip.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TravelStyle {
    Food,
    Sightseeing,
    Relaxation,
    Activity,
    Shopping,
    Photo,
}

/// Category of a scheduled place.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlaceCategory {
    Food,
    Sightseeing,
    Accommodation,
    Activity,
    Shopping,
    Transport,
    Rest,
    Photo,
}

/// Trip lifecycle status. Transitions are driven by the persistence
/// layer, not by the synthesis core.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TripStatus {
    Upcoming,
    Ongoing,
    Completed,
}

/// Geographic coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    /// Create a location, validating coordinate ranges.
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ItineraError::InvalidArgument(format!(
                "latitude out of range: {lat}"
            )));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(ItineraError::InvalidArgument(format!(
                "longitude out of range: {lng}"
            )));
        }
        Ok(Self { lat, lng })
    }
}

/// A single scheduled stop within a day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleItem {
    /// Visiting order within the day (1-based, ascending).
    pub order: u32,
    /// Start time, "HH:MM".
    pub time: String,
    /// Place name.
    pub place: String,
    pub category: PlaceCategory,
    /// Duration in minutes (15..=480).
    pub duration_min: u32,
    /// Estimated cost in whole currency units.
    pub estimated_cost: i64,
    #[serde(default)]
    pub description: String,
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
}

/// One day of a trip, in visiting order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyPlan {
    /// Day index, 1-based and contiguous across the trip.
    pub day: u32,
    pub date: NaiveDate,
    #[serde(default)]
    pub theme: String,
    pub schedules: Vec<ScheduleItem>,
}

impl DailyPlan {
    /// Total estimated cost for the day.
    pub fn total_cost(&self) -> i64 {
        self.schedules.iter().map(|s| s.estimated_cost).sum()
    }

    /// Total scheduled duration for the day, in minutes.
    pub fn total_duration(&self) -> u32 {
        self.schedules.iter().map(|s| s.duration_min).sum()
    }
}

/// Trip date range (inclusive on both ends).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TripPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TripPeriod {
    /// Create a period, rejecting end < start.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(ItineraError::InvalidArgument(
                "trip end date precedes start date".into(),
            ));
        }
        Ok(Self { start, end })
    }

    /// Number of days, inclusive.
    pub fn days(&self) -> u32 {
        (self.end - self.start).num_days() as u32 + 1
    }
}

/// Estimated budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub estimated: i64,
    pub currency: String,
}

/// A complete generated trip.
///
/// Constructed once per synthesis call and not mutated afterward; status
/// changes and edits belong to the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    pub id: String,
    pub destination: String,
    pub period: TripPeriod,
    pub travelers: u32,
    pub budget: Budget,
    pub styles: Vec<TravelStyle>,
    pub daily_plans: Vec<DailyPlan>,
    pub status: TripStatus,
    pub created_at: DateTime<Utc>,
}

impl Trip {
    /// Generate a fresh trip identifier.
    pub fn new_id() -> String {
        let hex = uuid::Uuid::new_v4().simple().to_string();
        format!("trip_{}", &hex[..12])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_days_is_inclusive() {
        let p = TripPeriod::new(
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
        )
        .unwrap();
        assert_eq!(p.days(), 3);
    }

    #[test]
    fn period_rejects_inverted_range() {
        let r = TripPeriod::new(
            NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        );
        assert!(r.is_err());
    }

    #[test]
    fn location_rejects_out_of_range() {
        assert!(Location::new(91.0, 0.0).is_err());
        assert!(Location::new(0.0, -181.0).is_err());
        assert!(Location::new(34.6937, 135.5023).is_ok());
    }

    #[test]
    fn daily_plan_totals() {
        let plan = DailyPlan {
            day: 1,
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            theme: String::new(),
            schedules: vec![
                ScheduleItem {
                    order: 1,
                    time: "09:30".into(),
                    place: "a".into(),
                    category: PlaceCategory::Food,
                    duration_min: 60,
                    estimated_cost: 10_000,
                    description: String::new(),
                    location: Location { lat: 0.0, lng: 0.0 },
                    rating: None,
                    place_id: None,
                },
                ScheduleItem {
                    order: 2,
                    time: "11:00".into(),
                    place: "b".into(),
                    category: PlaceCategory::Sightseeing,
                    duration_min: 120,
                    estimated_cost: 5_000,
                    description: String::new(),
                    location: Location { lat: 0.0, lng: 0.0 },
                    rating: None,
                    place_id: None,
                },
            ],
        };
        assert_eq!(plan.total_cost(), 15_000);
        assert_eq!(plan.total_duration(), 180);
    }
}
