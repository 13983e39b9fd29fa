//! Deterministic offline itinerary generator.
//!
//! Produces a full trip from the static knowledge base when the model is
//! unavailable or its reply cannot be parsed. Pure and deterministic: the
//! same request always yields the same daily plans, with no I/O.

use chrono::Duration;

use crate::adapters::knowledge;
use crate::types::travel::{DailyPlan, Location, PlaceCategory, ScheduleItem};

use super::PlanRequest;

/// One of the five fixed slots a fallback day is built from.
struct Slot {
    time: &'static str,
    category: PlaceCategory,
    duration_min: u32,
    /// Share of the daily budget, in percent.
    budget_pct: i64,
}

const SLOTS: [Slot; 5] = [
    Slot { time: "09:30", category: PlaceCategory::Food, duration_min: 60, budget_pct: 10 },
    Slot { time: "11:00", category: PlaceCategory::Sightseeing, duration_min: 120, budget_pct: 15 },
    Slot { time: "13:30", category: PlaceCategory::Food, duration_min: 90, budget_pct: 20 },
    Slot { time: "15:30", category: PlaceCategory::Activity, duration_min: 120, budget_pct: 25 },
    Slot { time: "18:00", category: PlaceCategory::Food, duration_min: 120, budget_pct: 30 },
];

/// Build the daily plans for a request without any external calls.
pub fn build_daily_plans(request: &PlanRequest) -> Vec<DailyPlan> {
    let days = (request.end - request.start).num_days().max(0) as u32 + 1;
    let daily_budget = request.total_budget() / i64::from(days);

    if knowledge::is_known_destination(&request.destination) {
        curated_plans(request, days, daily_budget)
    } else {
        generic_plans(request, days, daily_budget)
    }
}

fn curated_plans(request: &PlanRequest, days: u32, daily_budget: i64) -> Vec<DailyPlan> {
    let data = knowledge::destination_data(&request.destination);
    let pools: [&[knowledge::KnownPlace]; 5] = [
        data.breakfast,
        data.sightseeing,
        data.lunch,
        data.activity,
        data.dinner,
    ];

    (0..days)
        .map(|d| {
            let schedules = SLOTS
                .iter()
                .enumerate()
                .map(|(i, slot)| {
                    // Cycle each pool by day so consecutive days differ
                    let place = &pools[i][d as usize % pools[i].len()];
                    ScheduleItem {
                        order: i as u32 + 1,
                        time: slot.time.to_string(),
                        place: place.name.to_string(),
                        category: slot.category,
                        duration_min: slot.duration_min,
                        estimated_cost: daily_budget * slot.budget_pct / 100,
                        description: place.desc.to_string(),
                        location: Location { lat: place.lat, lng: place.lng },
                        rating: None,
                        place_id: None,
                    }
                })
                .collect();

            DailyPlan {
                day: d + 1,
                date: request.start + Duration::days(i64::from(d)),
                theme: data.themes[d as usize % data.themes.len()].to_string(),
                schedules,
            }
        })
        .collect()
}

/// Template plans for cities the knowledge base does not cover. Placed on
/// the city's baseline coordinates with small per-slot offsets.
fn generic_plans(request: &PlanRequest, days: u32, daily_budget: i64) -> Vec<DailyPlan> {
    let (base_lat, base_lng) = knowledge::base_coords(&request.destination);
    let dest = &request.destination;

    (0..days)
        .map(|d| {
            let day = d + 1;
            let names = [
                format!("{dest} 현지 조식 카페 ({day}일차)"),
                format!("{dest} 대표 명소 탐방 ({day}일차)"),
                format!("{dest} 현지인 추천 식당 ({day}일차)"),
                format!("{dest} 도심 산책 & 체험 ({day}일차)"),
                format!("{dest} 야경과 저녁 식사 ({day}일차)"),
            ];

            let schedules = SLOTS
                .iter()
                .zip(names)
                .enumerate()
                .map(|(i, (slot, name))| ScheduleItem {
                    order: i as u32 + 1,
                    time: slot.time.to_string(),
                    place: name,
                    category: slot.category,
                    duration_min: slot.duration_min,
                    estimated_cost: daily_budget * slot.budget_pct / 100,
                    description: format!("{dest} 여행 {day}일차 추천 일정"),
                    location: Location {
                        lat: base_lat + f64::from(d) * 0.005 + i as f64 * 0.002,
                        lng: base_lng + f64::from(d) * 0.004 + i as f64 * 0.002,
                    },
                    rating: None,
                    place_id: None,
                })
                .collect();

            DailyPlan {
                day,
                date: request.start + Duration::days(i64::from(d)),
                theme: format!("{dest} 여행 {day}일차"),
                schedules,
            }
        })
        .collect()
}
