//! Offline knowledge base of real places per destination.
//!
//! Backs both the mock place search (when the places provider is missing
//! or failing) and the deterministic fallback itinerary generator, so the
//! degraded paths still produce real, recognizable place names.

use crate::types::travel::TravelStyle;

/// A curated place entry.
#[derive(Debug, Clone, Copy)]
pub struct KnownPlace {
    pub name: &'static str,
    pub desc: &'static str,
    pub lat: f64,
    pub lng: f64,
}

/// Curated data for one destination.
#[derive(Debug, Clone, Copy)]
pub struct DestinationData {
    pub themes: &'static [&'static str],
    pub breakfast: &'static [KnownPlace],
    pub sightseeing: &'static [KnownPlace],
    pub lunch: &'static [KnownPlace],
    pub activity: &'static [KnownPlace],
    pub dinner: &'static [KnownPlace],
    pub shopping: &'static [KnownPlace],
    pub photo: &'static [KnownPlace],
    pub relaxation: &'static [KnownPlace],
}

/// Baseline destination used when a city is not in the knowledge base,
/// so degraded search never returns an empty result set.
pub const DEFAULT_DESTINATION: &str = "오사카";

/// Search category a free-text query normalizes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Food,
    Sightseeing,
    Relaxation,
    Activity,
    Shopping,
    Photo,
}

/// Normalize a search query to a knowledge-base category.
pub fn normalize_query(query: &str) -> QueryKind {
    let q = query.to_lowercase();
    if q.contains("맛집") || q.contains("음식") || q.contains("레스토랑") || q.contains("식당") {
        QueryKind::Food
    } else if q.contains("온천") || q.contains("스파") || q.contains("휴양") {
        QueryKind::Relaxation
    } else if q.contains("액티비티") || q.contains("체험") {
        QueryKind::Activity
    } else if q.contains("쇼핑") {
        QueryKind::Shopping
    } else if q.contains("포토") || q.contains("사진") {
        QueryKind::Photo
    } else {
        QueryKind::Sightseeing
    }
}

/// The representative search query for a travel style.
pub fn style_query(style: TravelStyle) -> &'static str {
    match style {
        TravelStyle::Food => "맛집",
        TravelStyle::Sightseeing => "관광지",
        TravelStyle::Relaxation => "온천",
        TravelStyle::Activity => "액티비티",
        TravelStyle::Shopping => "쇼핑",
        TravelStyle::Photo => "포토스팟",
    }
}

/// Baseline coordinates for cities the geocoder may be asked about
/// offline. Unknown cities default to Tokyo, matching the behavior of
/// the places provider's own fallback.
pub fn base_coords(location: &str) -> (f64, f64) {
    match location {
        "오사카" => (34.6937, 135.5023),
        "도쿄" => (35.6762, 139.6503),
        "교토" => (35.0116, 135.7681),
        "방콕" => (13.7563, 100.5018),
        "파리" => (48.8566, 2.3522),
        "제주도" => (33.4996, 126.5312),
        "부산" => (35.1796, 129.0756),
        _ => (35.6762, 139.6503),
    }
}

/// Whether the destination has curated data (rather than the baseline).
pub fn is_known_destination(destination: &str) -> bool {
    matches!(destination, "오사카" | "제주도")
}

/// Curated data for a destination, defaulting to [`DEFAULT_DESTINATION`].
pub fn destination_data(destination: &str) -> &'static DestinationData {
    match destination {
        "제주도" => &JEJU,
        _ => &OSAKA,
    }
}

/// Entries for a normalized query category.
pub fn places_for_query(data: &'static DestinationData, kind: QueryKind) -> Vec<&'static KnownPlace> {
    match kind {
        QueryKind::Food => {
            // Interleave meal lists so the top results span the day
            let mut out = Vec::new();
            let longest = data
                .breakfast
                .len()
                .max(data.lunch.len())
                .max(data.dinner.len());
            for i in 0..longest {
                if let Some(p) = data.breakfast.get(i) {
                    out.push(p);
                }
                if let Some(p) = data.lunch.get(i) {
                    out.push(p);
                }
                if let Some(p) = data.dinner.get(i) {
                    out.push(p);
                }
            }
            out
        }
        QueryKind::Sightseeing => data.sightseeing.iter().collect(),
        QueryKind::Relaxation => data.relaxation.iter().collect(),
        QueryKind::Activity => data.activity.iter().collect(),
        QueryKind::Shopping => data.shopping.iter().collect(),
        QueryKind::Photo => data.photo.iter().collect(),
    }
}

static OSAKA: DestinationData = DestinationData {
    themes: &[
        "도톤보리 & 난바 탐방",
        "오사카성 & 역사 투어",
        "신세카이 & 로컬 맛집",
        "우메다 & 쇼핑",
    ],
    breakfast: &[
        KnownPlace { name: "이치란 라멘 도톤보리점", desc: "24시간 운영 돈코츠 라멘 본점", lat: 34.6687, lng: 135.5013 },
        KnownPlace { name: "마루카메 제면 난바점", desc: "갓 뽑은 사누키 우동 전문점", lat: 34.6654, lng: 135.5014 },
        KnownPlace { name: "에그슬럿 오사카", desc: "LA 감성 에그 샌드위치 브런치", lat: 34.7025, lng: 135.4959 },
        KnownPlace { name: "하드락 카페 오사카", desc: "미국식 아침 세트 메뉴", lat: 34.6686, lng: 135.4299 },
    ],
    sightseeing: &[
        KnownPlace { name: "오사카성 천수각", desc: "도요토미 히데요시가 세운 일본 3대 성곽", lat: 34.6873, lng: 135.5262 },
        KnownPlace { name: "도톤보리 글리코상", desc: "오사카의 상징적인 네온사인 거리", lat: 34.6687, lng: 135.5010 },
        KnownPlace { name: "츠텐카쿠 전망대", desc: "신세카이의 랜드마크 타워", lat: 34.6525, lng: 135.5063 },
        KnownPlace { name: "우메다 스카이빌딩 공중정원", desc: "173m 높이 360도 파노라마 전망", lat: 34.7052, lng: 135.4906 },
    ],
    lunch: &[
        KnownPlace { name: "쿠라스시 도톤보리점", desc: "회전초밥 체인, 100엔 스시", lat: 34.6690, lng: 135.5025 },
        KnownPlace { name: "하루카스 다이닝", desc: "아베노 하루카스 레스토랑가", lat: 34.6463, lng: 135.5138 },
        KnownPlace { name: "치보 본점", desc: "오코노미야키 명가, 70년 전통", lat: 34.6685, lng: 135.5013 },
        KnownPlace { name: "키지 본점", desc: "철판 오코노미야키의 성지", lat: 34.7048, lng: 135.4948 },
    ],
    activity: &[
        KnownPlace { name: "유니버설 스튜디오 재팬", desc: "해리포터, 슈퍼닌텐도월드 테마파크", lat: 34.6654, lng: 135.4323 },
        KnownPlace { name: "신세카이 쟝쟝요코초", desc: "레트로 골목 탐방 & 꼬치튀김 체험", lat: 34.6520, lng: 135.5060 },
        KnownPlace { name: "구로몬 시장", desc: "오사카의 부엌, 신선한 해산물 시식", lat: 34.6668, lng: 135.5069 },
        KnownPlace { name: "덴덴타운", desc: "오사카의 아키하바라, 전자상가 & 서브컬처", lat: 34.6598, lng: 135.5056 },
    ],
    dinner: &[
        KnownPlace { name: "칸자키 갓텐 스시", desc: "신선한 스시 오마카세", lat: 34.6977, lng: 135.4912 },
        KnownPlace { name: "다루마 신세카이 본점", desc: "쿠시카츠(꼬치튀김) 원조 맛집", lat: 34.6522, lng: 135.5059 },
        KnownPlace { name: "아지노야 본점", desc: "타코야키 원조 맛집, 18개입", lat: 34.6525, lng: 135.5065 },
        KnownPlace { name: "마츠리야", desc: "야키니쿠 무한리필 전문점", lat: 34.7005, lng: 135.4973 },
    ],
    shopping: &[
        KnownPlace { name: "신사이바시스지 상점가", desc: "600m 아케이드 쇼핑 거리", lat: 34.6723, lng: 135.5012 },
        KnownPlace { name: "돈키호테 도톤보리점", desc: "관람차가 있는 대형 잡화점", lat: 34.6692, lng: 135.5020 },
        KnownPlace { name: "한큐 우메다 본점", desc: "우메다 대표 백화점", lat: 34.7018, lng: 135.4982 },
    ],
    photo: &[
        KnownPlace { name: "도톤보리 글리코상", desc: "오사카 인증샷 1번지", lat: 34.6687, lng: 135.5010 },
        KnownPlace { name: "우메다 스카이빌딩 공중정원", desc: "야경 촬영 명소", lat: 34.7052, lng: 135.4906 },
        KnownPlace { name: "호젠지 요코초", desc: "돌바닥 골목과 이끼 덮인 불상", lat: 34.6678, lng: 135.5031 },
    ],
    relaxation: &[
        KnownPlace { name: "스파월드 온천", desc: "세계 온천 테마 대형 스파", lat: 34.6512, lng: 135.5061 },
        KnownPlace { name: "나니와노유 온천", desc: "천연 온천 노천탕", lat: 34.7115, lng: 135.4917 },
    ],
};

static JEJU: DestinationData = DestinationData {
    themes: &[
        "제주시 & 동문시장 탐방",
        "성산일출봉 & 동부 투어",
        "서귀포 & 중문 관광",
        "애월 & 서부 카페 투어",
    ],
    breakfast: &[
        KnownPlace { name: "올래국수", desc: "제주 고기국수 맛집, 줄서는 식당", lat: 33.5121, lng: 126.5232 },
        KnownPlace { name: "삼대국수회관", desc: "3대째 이어온 고기국수 명가", lat: 33.4996, lng: 126.5287 },
        KnownPlace { name: "우진해장국", desc: "제주 현지인 아침 해장 맛집", lat: 33.4912, lng: 126.4935 },
        KnownPlace { name: "명진전복 본점", desc: "전복죽, 전복돌솥밥 전문점", lat: 33.5025, lng: 126.5412 },
    ],
    sightseeing: &[
        KnownPlace { name: "성산일출봉", desc: "유네스코 세계자연유산, 해돋이 명소", lat: 33.4587, lng: 126.9425 },
        KnownPlace { name: "만장굴", desc: "세계 최장 용암동굴, 천연기념물", lat: 33.5282, lng: 126.7712 },
        KnownPlace { name: "천지연폭포", desc: "서귀포 대표 폭포, 야간 조명", lat: 33.2469, lng: 126.5548 },
        KnownPlace { name: "한라산 어리목 코스", desc: "제주 최고봉 트레킹", lat: 33.3617, lng: 126.4969 },
    ],
    lunch: &[
        KnownPlace { name: "제주김만복 본점", desc: "전복김밥, 성게김밥 원조", lat: 33.5012, lng: 126.5287 },
        KnownPlace { name: "돈사돈 본점", desc: "제주 흑돼지 구이 맛집", lat: 33.4856, lng: 126.4923 },
        KnownPlace { name: "미영이네 식당", desc: "갈치조림, 옥돔구이 현지 맛집", lat: 33.2512, lng: 126.5612 },
        KnownPlace { name: "자매국수", desc: "제주 비빔국수, 고기국수 맛집", lat: 33.2469, lng: 126.5023 },
    ],
    activity: &[
        KnownPlace { name: "섭지코지", desc: "드라마 촬영지, 해안 절경 산책로", lat: 33.4240, lng: 126.9296 },
        KnownPlace { name: "우도", desc: "소가 누운 모양의 아름다운 섬", lat: 33.5063, lng: 126.9520 },
        KnownPlace { name: "카멜리아힐", desc: "동양 최대 동백꽃 수목원", lat: 33.2898, lng: 126.3689 },
        KnownPlace { name: "아쿠아플라넷 제주", desc: "아시아 최대 규모 아쿠아리움", lat: 33.4337, lng: 126.9269 },
    ],
    dinner: &[
        KnownPlace { name: "흑돼지거리 돈사돈", desc: "제주 흑돼지 숯불구이", lat: 33.4856, lng: 126.4923 },
        KnownPlace { name: "광해회국수", desc: "전복, 소라, 성게 해산물 국수", lat: 33.4687, lng: 126.9165 },
        KnownPlace { name: "제주 동문시장 야시장", desc: "현지 먹거리 투어, 흑돼지꼬치", lat: 33.5125, lng: 126.5260 },
        KnownPlace { name: "오는정김밥", desc: "한치물회, 성게비빔밥 맛집", lat: 33.2512, lng: 126.5123 },
    ],
    shopping: &[
        KnownPlace { name: "제주 동문시장", desc: "제주 최대 전통시장", lat: 33.5125, lng: 126.5260 },
        KnownPlace { name: "제주 중앙지하상가", desc: "제주시 중심 지하 쇼핑몰", lat: 33.5118, lng: 126.5242 },
    ],
    photo: &[
        KnownPlace { name: "성산일출봉", desc: "일출 촬영 명소", lat: 33.4587, lng: 126.9425 },
        KnownPlace { name: "카멜리아힐", desc: "동백꽃 포토스팟", lat: 33.2898, lng: 126.3689 },
        KnownPlace { name: "애월 한담해안산책로", desc: "에메랄드빛 해안 산책로", lat: 33.4589, lng: 126.3058 },
    ],
    relaxation: &[
        KnownPlace { name: "산방산 탄산온천", desc: "천연 탄산 온천", lat: 33.2420, lng: 126.3151 },
        KnownPlace { name: "포도호텔 스파", desc: "중산간 휴양 스파", lat: 33.3122, lng: 126.3478 },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_normalization() {
        assert_eq!(normalize_query("맛집"), QueryKind::Food);
        assert_eq!(normalize_query("포토스팟"), QueryKind::Photo);
        assert_eq!(normalize_query("온천"), QueryKind::Relaxation);
        assert_eq!(normalize_query("아무거나"), QueryKind::Sightseeing);
    }

    #[test]
    fn unknown_destination_defaults_to_baseline() {
        let data = destination_data("울란바토르");
        assert!(!data.sightseeing.is_empty());
        assert!(std::ptr::eq(data, destination_data(DEFAULT_DESTINATION)));
    }

    #[test]
    fn food_query_interleaves_meals() {
        let data = destination_data("오사카");
        let places = places_for_query(data, QueryKind::Food);
        assert!(places.len() >= 10);
        assert_eq!(places[0].name, data.breakfast[0].name);
        assert_eq!(places[1].name, data.lunch[0].name);
    }
}
