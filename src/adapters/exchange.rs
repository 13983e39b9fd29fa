//! Exchange-rate lookup with a static offline fallback table.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ItineraError, Result};
use crate::provider::http::shared_client;
use crate::util::{with_timeout, RetryPolicy, EXTERNAL_CALL_TIMEOUT};

/// A resolved exchange rate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExchangeRate {
    pub from_currency: String,
    pub to_currency: String,
    pub rate: f64,
    pub inverse_rate: f64,
    /// True when the value came from the static fallback table rather
    /// than the live provider. Authoritative results never set this.
    #[serde(default)]
    pub is_fallback: bool,
    pub example: ExchangeExample,
}

/// A worked conversion example for presentation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExchangeExample {
    pub amount: f64,
    pub converted: f64,
    pub description: String,
}

/// Exchange-rate adapter with in-memory per-pair caching.
pub struct ExchangeAdapter {
    base_url: String,
    retry: RetryPolicy,
    cache: RwLock<HashMap<(String, String), ExchangeRate>>,
}

impl ExchangeAdapter {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            retry: RetryPolicy::default(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Look up the rate from `from_currency` to `to_currency`.
    ///
    /// Provider failure degrades to the static table with
    /// `is_fallback = true`; this method itself never fails.
    pub async fn get_exchange_rate(&self, from_currency: &str, to_currency: &str) -> ExchangeRate {
        let from = from_currency.to_uppercase();
        let to = to_currency.to_uppercase();

        if let Some(cached) = self
            .cache
            .read()
            .expect("exchange cache poisoned")
            .get(&(from.clone(), to.clone()))
        {
            debug!(%from, %to, "exchange rate cache hit");
            return cached.clone();
        }

        let result = match self.fetch_rate(&from, &to).await {
            Ok(rate) => {
                info!(%from, %to, rate = rate.rate, "exchange rate resolved");
                rate
            }
            Err(e) => {
                warn!(%from, %to, error = %e, "exchange lookup failed, using fallback table");
                fallback_rate(&from, &to)
            }
        };

        // Fallback values are not cached so a recovered provider wins next call
        if !result.is_fallback {
            self.cache
                .write()
                .expect("exchange cache poisoned")
                .insert((from, to), result.clone());
        }
        result
    }

    /// Convert an amount using a previously resolved rate.
    pub fn convert_amount(&self, amount: f64, rate: &ExchangeRate) -> f64 {
        (amount * rate.rate * 100.0).round() / 100.0
    }

    async fn fetch_rate(&self, from: &str, to: &str) -> Result<ExchangeRate> {
        let url = format!("{}/latest/{}", self.base_url, from);

        let body: RatesResponse = self
            .retry
            .execute(|| {
                let url = url.clone();
                with_timeout(EXTERNAL_CALL_TIMEOUT, async move {
                    let resp = shared_client().get(&url).send().await?;
                    let status = resp.status().as_u16();
                    if status != 200 {
                        return Err(ItineraError::api(status, "exchange provider error"));
                    }
                    Ok(resp.json::<RatesResponse>().await?)
                })
            })
            .await?;

        let rate = body
            .rates
            .get(to)
            .copied()
            .ok_or_else(|| ItineraError::api(200, format!("currency not found: {to}")))?;

        Ok(build_rate(from, to, rate, false))
    }
}

fn build_rate(from: &str, to: &str, rate: f64, is_fallback: bool) -> ExchangeRate {
    let converted = (10_000.0 * rate * 100.0).round() / 100.0;
    let approx = if is_fallback { "≈" } else { "=" };
    ExchangeRate {
        from_currency: from.to_string(),
        to_currency: to.to_string(),
        rate,
        inverse_rate: if rate > 0.0 { 1.0 / rate } else { 0.0 },
        is_fallback,
        example: ExchangeExample {
            amount: 10_000.0,
            converted,
            description: format!("10,000 {from} {approx} {converted} {to}"),
        },
    }
}

/// Approximate rates used when the provider is unreachable.
fn fallback_rate(from: &str, to: &str) -> ExchangeRate {
    let rate = match (from, to) {
        ("KRW", "JPY") => 0.11,
        ("KRW", "USD") => 0.00075,
        ("KRW", "EUR") => 0.00069,
        ("KRW", "THB") => 0.027,
        ("KRW", "CNY") => 0.0054,
        ("JPY", "KRW") => 9.1,
        ("USD", "KRW") => 1330.0,
        // unknown pairs fall back to parity
        _ => 1.0,
    };
    build_rate(from, to, rate, true)
}

#[derive(Deserialize)]
struct RatesResponse {
    #[serde(default)]
    rates: HashMap<String, f64>,
}
