//! Prompt assembly for itinerary synthesis.

use chrono::{Datelike, NaiveDate};

use crate::adapters::PlaceResult;
use crate::adapters::knowledge;
use crate::types::travel::TravelStyle;

use super::PlanRequest;

/// System prompt demanding a strict JSON itinerary.
pub const SYSTEM_PROMPT: &str = "당신은 전문 여행 플래너입니다. 주어진 여행 조건과 실제 장소 정보를 바탕으로 \
현실적인 일정을 만듭니다.\n\
반드시 아래 JSON 형식으로만 응답하세요. JSON 외의 텍스트를 추가하지 마세요.\n\
{\n\
  \"daily_plans\": [\n\
    {\n\
      \"day\": 1,\n\
      \"date\": \"YYYY-MM-DD\",\n\
      \"theme\": \"하루 테마\",\n\
      \"schedules\": [\n\
        {\n\
          \"order\": 1,\n\
          \"time\": \"09:30\",\n\
          \"place\": \"장소 이름\",\n\
          \"category\": \"food|sightseeing|activity|shopping|rest|photo\",\n\
          \"duration_min\": 90,\n\
          \"estimated_cost\": 15000,\n\
          \"description\": \"설명\",\n\
          \"lat\": 34.6937,\n\
          \"lng\": 135.5023\n\
        }\n\
      ]\n\
    }\n\
  ]\n\
}\n\
규칙:\n\
- 제공된 실제 장소 목록을 우선 사용하고, 좌표를 그대로 옮기세요.\n\
- 같은 장소를 여행 전체에서 두 번 이상 방문하지 마세요.\n\
- 하루 4~6개 일정, 이동 동선이 자연스럽도록 배치하세요.\n\
- time은 24시간 \"HH:MM\" 형식입니다.";

/// Season label for a start date, by month.
pub fn season_for(date: NaiveDate) -> &'static str {
    match date.month() {
        3..=5 => "봄",
        6..=8 => "여름",
        9..=11 => "가을",
        _ => "겨울",
    }
}

/// Party description for a traveler count.
pub fn traveler_type(travelers: u32) -> &'static str {
    match travelers {
        1 => "혼자 여행",
        2 => "커플/친구 여행",
        3..=4 => "소그룹 여행",
        _ => "단체 여행",
    }
}

/// Build the user prompt: trip conditions plus real-place excerpts.
pub fn build_user_prompt(
    request: &PlanRequest,
    places_by_style: &[(TravelStyle, Vec<PlaceResult>)],
) -> String {
    let days = (request.end - request.start).num_days() + 1;
    let styles = request
        .styles
        .iter()
        .map(|s| knowledge::style_query(*s))
        .collect::<Vec<_>>()
        .join(", ");

    let mut prompt = format!(
        "여행 일정을 만들어주세요.\n\n\
         [여행 조건]\n\
         - 목적지: {dest}\n\
         - 기간: {start} ~ {end} ({days}일)\n\
         - 계절: {season}\n\
         - 인원: {travelers}명 ({party})\n\
         - 1인 예산: {budget}원 (총 {total}원)\n\
         - 여행 스타일: {styles}\n",
        dest = request.destination,
        start = request.start,
        end = request.end,
        season = season_for(request.start),
        travelers = request.travelers,
        party = traveler_type(request.travelers),
        budget = request.budget_per_person,
        total = request.total_budget(),
    );

    if let Some(accommodation) = &request.accommodation {
        prompt.push_str(&format!("- 숙소: {accommodation} (일정의 출발/복귀 기준)\n"));
    }
    if let Some(pref) = &request.custom_preference {
        prompt.push_str(&format!("- 추가 요청: {pref}\n"));
    }

    prompt.push_str("\n[실제 장소 정보]\n");
    for (style, places) in places_by_style {
        if places.is_empty() {
            continue;
        }
        prompt.push_str(&format!("## {} 추천\n", knowledge::style_query(*style)));
        for place in places.iter().take(5) {
            let rating = place
                .rating
                .map(|r| format!(" 평점 {r:.1}"))
                .unwrap_or_default();
            prompt.push_str(&format!(
                "- {} ({}){} [{:.4}, {:.4}]\n",
                place.name, place.address, rating, place.location.lat, place.location.lng
            ));
        }
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_boundaries() {
        assert_eq!(season_for(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()), "봄");
        assert_eq!(season_for(NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()), "여름");
        assert_eq!(season_for(NaiveDate::from_ymd_opt(2026, 11, 30).unwrap()), "가을");
        assert_eq!(season_for(NaiveDate::from_ymd_opt(2026, 12, 1).unwrap()), "겨울");
        assert_eq!(season_for(NaiveDate::from_ymd_opt(2026, 2, 15).unwrap()), "겨울");
    }

    #[test]
    fn traveler_buckets() {
        assert_eq!(traveler_type(1), "혼자 여행");
        assert_eq!(traveler_type(2), "커플/친구 여행");
        assert_eq!(traveler_type(4), "소그룹 여행");
        assert_eq!(traveler_type(12), "단체 여행");
    }

    #[test]
    fn user_prompt_carries_conditions_and_places() {
        let request = PlanRequest::builder()
            .destination("오사카")
            .start(NaiveDate::from_ymd_opt(2026, 4, 10).unwrap())
            .end(NaiveDate::from_ymd_opt(2026, 4, 12).unwrap())
            .travelers(2)
            .budget_per_person(300_000)
            .styles(vec![TravelStyle::Food])
            .accommodation("난바 워싱턴 호텔")
            .build();
        let places = vec![(
            TravelStyle::Food,
            vec![PlaceResult {
                place_id: None,
                name: "이치란 라멘".into(),
                address: "도톤보리".into(),
                location: crate::types::travel::Location { lat: 34.6687, lng: 135.5013 },
                rating: Some(4.5),
                user_ratings_total: None,
            }],
        )];
        let prompt = build_user_prompt(&request, &places);
        assert!(prompt.contains("오사카"));
        assert!(prompt.contains("3일"));
        assert!(prompt.contains("봄"));
        assert!(prompt.contains("난바 워싱턴 호텔"));
        assert!(prompt.contains("이치란 라멘"));
        assert!(prompt.contains("평점 4.5"));
    }
}
