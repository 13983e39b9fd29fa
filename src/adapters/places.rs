//! Place search and geocoding against a Google-Places-style API, with
//! deterministic offline fallbacks.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::knowledge;
use crate::error::{ItineraError, Result};
use crate::provider::http::shared_client;
use crate::types::travel::{Location, PlaceCategory};
use crate::util::{with_timeout, RetryPolicy, EXTERNAL_CALL_TIMEOUT};

const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// A normalized place search result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaceResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u32>,
}

/// Place search adapter.
///
/// Without an API key (or on any provider failure) it serves deterministic
/// results from the offline knowledge base, keyed by the normalized query
/// category, so the synthesis pipeline never sees an empty result set.
pub struct PlacesAdapter {
    api_key: Option<String>,
    base_url: String,
    retry: RetryPolicy,
    // Memoized per process. Unbounded by design size: keys are the small
    // set of destination strings a deployment actually serves.
    geocode_cache: RwLock<HashMap<String, (f64, f64)>>,
}

impl PlacesAdapter {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_PLACES_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: Option<String>, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            retry: RetryPolicy::default(),
            geocode_cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search for places matching `query` near `location`.
    pub async fn search_places(
        &self,
        query: &str,
        location: &str,
        category: Option<PlaceCategory>,
        max_results: usize,
        radius_km: f64,
    ) -> Vec<PlaceResult> {
        let Some(api_key) = self.api_key.clone() else {
            debug!(query, location, "places provider not configured, using knowledge base");
            return self.mock_places(query, location, max_results);
        };

        match self
            .search_remote(&api_key, query, location, category, max_results, radius_km)
            .await
        {
            Ok(results) if !results.is_empty() => {
                info!(query, location, count = results.len(), "places search ok");
                results
            }
            Ok(_) => {
                warn!(query, location, "places search returned nothing, using knowledge base");
                self.mock_places(query, location, max_results)
            }
            Err(e) => {
                warn!(query, location, error = %e, "places search failed, using knowledge base");
                self.mock_places(query, location, max_results)
            }
        }
    }

    /// Resolve a location string to coordinates, memoized per process.
    pub async fn geocode(&self, location: &str) -> (f64, f64) {
        if let Some(coords) = self
            .geocode_cache
            .read()
            .expect("geocode cache poisoned")
            .get(location)
        {
            return *coords;
        }

        let coords = match &self.api_key {
            Some(key) => match self.geocode_remote(key, location).await {
                Ok(c) => c,
                Err(e) => {
                    warn!(location, error = %e, "geocoding failed, using baseline coordinates");
                    knowledge::base_coords(location)
                }
            },
            None => knowledge::base_coords(location),
        };

        self.geocode_cache
            .write()
            .expect("geocode cache poisoned")
            .insert(location.to_string(), coords);
        coords
    }

    async fn geocode_remote(&self, api_key: &str, location: &str) -> Result<(f64, f64)> {
        let url = format!("{}/geocode/json", self.base_url);
        let body: GeocodeResponse = self
            .retry
            .execute(|| {
                with_timeout(EXTERNAL_CALL_TIMEOUT, async {
                    let resp = shared_client()
                        .get(&url)
                        .query(&[("address", location), ("key", api_key)])
                        .send()
                        .await?;
                    Ok(resp.json::<GeocodeResponse>().await?)
                })
            })
            .await?;

        if body.status != "OK" {
            return Err(ItineraError::api(
                200,
                format!("geocoding status {} for {location}", body.status),
            ));
        }
        body.results
            .first()
            .map(|r| (r.geometry.location.lat, r.geometry.location.lng))
            .ok_or_else(|| ItineraError::api(200, format!("no geocode results for {location}")))
    }

    async fn search_remote(
        &self,
        api_key: &str,
        query: &str,
        location: &str,
        category: Option<PlaceCategory>,
        max_results: usize,
        radius_km: f64,
    ) -> Result<Vec<PlaceResult>> {
        let (lat, lng) = self.geocode(location).await;

        let url = format!("{}/place/textsearch/json", self.base_url);
        let full_query = format!("{query} in {location}");
        let latlng = format!("{lat},{lng}");
        let radius_m = ((radius_km * 1000.0) as u32).to_string();
        let place_type = category.map(category_to_place_type);

        let body: TextSearchResponse = self
            .retry
            .execute(|| {
                let url = url.clone();
                let mut params = vec![
                    ("query", full_query.as_str()),
                    ("location", latlng.as_str()),
                    ("radius", radius_m.as_str()),
                    ("key", api_key),
                    ("language", "ko"),
                ];
                if let Some(t) = place_type {
                    params.push(("type", t));
                }
                with_timeout(EXTERNAL_CALL_TIMEOUT, async move {
                    let resp = shared_client().get(&url).query(&params).send().await?;
                    Ok(resp.json::<TextSearchResponse>().await?)
                })
            })
            .await?;

        if body.status != "OK" {
            return Err(ItineraError::api(
                200,
                format!("places search status {}", body.status),
            ));
        }

        Ok(body
            .results
            .into_iter()
            .take(max_results)
            .map(|p| PlaceResult {
                place_id: p.place_id,
                name: p.name,
                address: p.formatted_address.unwrap_or_default(),
                location: Location {
                    lat: p.geometry.location.lat,
                    lng: p.geometry.location.lng,
                },
                rating: p.rating,
                user_ratings_total: p.user_ratings_total,
            })
            .collect())
    }

    /// Deterministic results from the offline knowledge base.
    fn mock_places(&self, query: &str, location: &str, max_results: usize) -> Vec<PlaceResult> {
        let kind = knowledge::normalize_query(query);
        let data = knowledge::destination_data(location);

        knowledge::places_for_query(data, kind)
            .into_iter()
            .take(max_results)
            .enumerate()
            .map(|(i, p)| PlaceResult {
                place_id: Some(format!("kb_{}_{}", location, i)),
                name: p.name.to_string(),
                address: format!("{location} {}", p.desc),
                location: Location { lat: p.lat, lng: p.lng },
                rating: Some(4.5 - (i % 10) as f64 * 0.1),
                user_ratings_total: Some(500u32.saturating_sub(i as u32 * 50)),
            })
            .collect()
    }
}

fn category_to_place_type(category: PlaceCategory) -> &'static str {
    match category {
        PlaceCategory::Food => "restaurant",
        PlaceCategory::Sightseeing | PlaceCategory::Photo => "tourist_attraction",
        PlaceCategory::Accommodation | PlaceCategory::Rest => "lodging",
        PlaceCategory::Shopping => "shopping_mall",
        PlaceCategory::Activity => "tourist_attraction",
        PlaceCategory::Transport => "transit_station",
    }
}

// Provider wire types (internal)

#[derive(Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct TextSearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<TextSearchResult>,
}

#[derive(Deserialize)]
struct TextSearchResult {
    place_id: Option<String>,
    name: String,
    formatted_address: Option<String>,
    geometry: Geometry,
    rating: Option<f64>,
    user_ratings_total: Option<u32>,
}
