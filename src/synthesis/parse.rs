//! Lenient parsing of model itinerary replies.
//!
//! The model is asked for strict JSON but real replies drift: fenced code
//! blocks, time ranges instead of start times, missing fields, stray
//! items. Parsing salvages what it can, dropping bad items with a log
//! line, and reports `None` only when no usable plan remains.

use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{Duration, NaiveDate};
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::types::travel::{DailyPlan, Location, PlaceCategory, ScheduleItem};
use crate::util::json_extract::extract_json_object;

use super::PlanRequest;

/// Parse a model reply into daily plans.
///
/// Returns `None` unless every day of the trip came back usable; the
/// caller then regenerates the whole trip from the fallback tables rather
/// than splicing generated and fallback days together.
pub fn parse_daily_plans(content: &str, request: &PlanRequest) -> Option<Vec<DailyPlan>> {
    let raw = extract_json_object(content)?;
    let root: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "itinerary reply is not valid JSON");
            return None;
        }
    };

    let days = root.get("daily_plans")?.as_array()?;
    let expected = (request.end - request.start).num_days() as usize + 1;

    let mut plans: Vec<DailyPlan> = days
        .iter()
        .enumerate()
        .filter_map(|(i, day)| parse_day(day, i, request.start))
        .collect();

    if plans.len() != expected {
        warn!(
            parsed = plans.len(),
            expected, "itinerary reply does not cover the trip"
        );
        return None;
    }

    plans.sort_by_key(|p| p.day);
    for (i, plan) in plans.iter_mut().enumerate() {
        plan.day = i as u32 + 1;
    }
    Some(plans)
}

fn parse_day(value: &Value, index: usize, start: NaiveDate) -> Option<DailyPlan> {
    let day = value
        .get("day")
        .and_then(Value::as_u64)
        .map(|d| d as u32)
        .unwrap_or(index as u32 + 1);

    let date = value
        .get("date")
        .and_then(Value::as_str)
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .unwrap_or_else(|| start + Duration::days(i64::from(day) - 1));

    let theme = value
        .get("theme")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let raw_items = value.get("schedules")?.as_array()?;
    let mut schedules: Vec<ScheduleItem> = raw_items
        .iter()
        .filter_map(|item| match parse_item(item) {
            Some(parsed) => Some(parsed),
            None => {
                warn!(day, item = %item, "dropping unparseable schedule item");
                None
            }
        })
        .collect();

    if schedules.is_empty() {
        warn!(day, "day has no usable schedule items");
        return None;
    }

    // Reassign order so it is always 1-based and ascending
    for (i, item) in schedules.iter_mut().enumerate() {
        item.order = i as u32 + 1;
    }

    Some(DailyPlan { day, date, theme, schedules })
}

fn parse_item(value: &Value) -> Option<ScheduleItem> {
    let place = value.get("place").and_then(Value::as_str)?.trim();
    if place.is_empty() {
        return None;
    }
    let time = normalize_time(value.get("time").and_then(Value::as_str)?)?;

    let category = value
        .get("category")
        .and_then(Value::as_str)
        .and_then(|s| PlaceCategory::from_str(&s.to_lowercase()).ok())
        .unwrap_or(PlaceCategory::Sightseeing);

    let duration_min = value
        .get("duration_min")
        .and_then(Value::as_u64)
        .map(|d| (d as u32).clamp(15, 480))
        .unwrap_or(90);

    let estimated_cost = value
        .get("estimated_cost")
        .and_then(Value::as_i64)
        .unwrap_or(0)
        .max(0);

    let description = value
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    // Coordinates arrive flat or nested under "location"
    let coords = value.get("location").unwrap_or(value);
    let lat = coords.get("lat").and_then(Value::as_f64)?;
    let lng = coords.get("lng").and_then(Value::as_f64)?;
    let location = match Location::new(lat, lng) {
        Ok(l) => l,
        Err(e) => {
            debug!(place, error = %e, "coordinates out of range");
            return None;
        }
    };

    let rating = value
        .get("rating")
        .and_then(Value::as_f64)
        .filter(|r| (0.0..=5.0).contains(r));
    let place_id = value
        .get("place_id")
        .and_then(Value::as_str)
        .map(str::to_string);

    Some(ScheduleItem {
        order: 0, // reassigned by the caller
        time,
        place: place.to_string(),
        category,
        duration_min,
        estimated_cost,
        description,
        location,
        rating,
        place_id,
    })
}

/// Normalize a time string to zero-padded "HH:MM".
///
/// Ranges like "09:00-10:40" collapse to their start bound; anything
/// without a valid clock time yields `None`.
pub fn normalize_time(raw: &str) -> Option<String> {
    static TIME_RE: OnceLock<Regex> = OnceLock::new();
    let re = TIME_RE.get_or_init(|| Regex::new(r"(\d{1,2}):(\d{2})").expect("valid time regex"));

    let caps = re.captures(raw)?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(format!("{hour:02}:{minute:02}"))
}
