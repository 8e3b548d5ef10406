//! Mesoigner adapter: first available appointment of a pharmacy.
//!
//! The adapter has two modes selected by [`MesoignerConfig::enabled`]:
//! enabled performs the live fetch, disabled answers `None` without any
//! network I/O.

pub mod types;

use chrono::{DateTime, Days, FixedOffset};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Url};
use vmd_core::{AppConfig, ScraperRequest, Vaccine};

use crate::error::ScraperError;
use crate::http::{build_client, fetch_json};

pub use types::{Slot, SlotDay, SlotsResponse};

const DEFAULT_USER_AGENT: &str = "vmd/0.1 (vaccination-availability)";
const DEFAULT_HORIZON_DAYS: u32 = 50;
const SLOTS_PATH: &str = "/api/v1/slots";

/// Settings of a [`MesoignerSlots`] adapter.
#[derive(Clone)]
pub struct MesoignerConfig {
    /// When `false` the adapter never calls the platform.
    pub enabled: bool,
    /// Sent on every request; the platform rejects unidentified clients.
    pub user_agent: String,
    pub api_key: Option<String>,
    /// Slots starting this many days or more after the requested date are ignored.
    pub horizon_days: u32,
}

impl Default for MesoignerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            api_key: None,
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

impl MesoignerConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            enabled: config.mesoigner_enabled,
            user_agent: config.scraper_user_agent.clone(),
            api_key: config.mesoigner_api_key.clone(),
            horizon_days: config.mesoigner_horizon_days,
        }
    }
}

impl std::fmt::Debug for MesoignerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MesoignerConfig")
            .field("enabled", &self.enabled)
            .field("user_agent", &self.user_agent)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("horizon_days", &self.horizon_days)
            .finish()
    }
}

/// Slot fetcher for pharmacies booking through Mesoigner.
///
/// Holds no per-request state, so one instance can serve concurrent
/// requests. The HTTP client is injectable for tests.
pub struct MesoignerSlots {
    client: Client,
    config: MesoignerConfig,
}

impl MesoignerSlots {
    /// Creates an adapter with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: MesoignerConfig, timeout_secs: u64) -> Result<Self, ScraperError> {
        let client = build_client(timeout_secs, &config.user_agent)?;
        Ok(Self { client, config })
    }

    /// Creates an adapter around an existing HTTP client.
    #[must_use]
    pub fn with_client(client: Client, config: MesoignerConfig) -> Self {
        Self { client, config }
    }

    /// Creates an adapter from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            MesoignerConfig::from_app_config(config),
            config.scraper_request_timeout_secs,
        )
    }

    #[must_use]
    pub fn config(&self) -> &MesoignerConfig {
        &self.config
    }

    /// Returns the first available appointment for `request`, or `Ok(None)`
    /// straight away when the adapter is disabled.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::fetch`].
    pub async fn fetch_slots(
        &self,
        request: &mut ScraperRequest,
    ) -> Result<Option<String>, ScraperError> {
        if !self.config.enabled {
            tracing::info!(url = %request.url, "mesoigner disabled, skipping slot fetch");
            return Ok(None);
        }
        self.fetch(request).await
    }

    /// Fetches the pharmacy's slots and records availability on `request`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] if the request URL has no usable origin.
    /// - [`ScraperError::InvalidHeader`] if the configured user agent or API
    ///   key cannot be sent as a header.
    /// - [`ScraperError::Http`] / [`ScraperError::UnexpectedStatus`] on transport failure.
    /// - [`ScraperError::Deserialize`] if the body is not a slot list.
    pub async fn fetch(
        &self,
        request: &mut ScraperRequest,
    ) -> Result<Option<String>, ScraperError> {
        let url = slots_url(request)?;
        let body = fetch_json(&self.client, url.as_str(), self.headers()?).await?;
        let slots: SlotsResponse =
            serde_json::from_value(body).map_err(|e| ScraperError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        Ok(self.get_appointments(request, &slots))
    }

    /// Scans `slots` for appointments starting within the horizon after the
    /// requested date.
    ///
    /// Sets the appointment count, the distinct vaccines (in order of first
    /// appearance) and the earliest appointment on `request`, and returns that
    /// earliest appointment as RFC 3339 with its original offset. With no
    /// matching slot, returns `None` and leaves the count at 0 and the
    /// vaccines at `None`.
    ///
    /// Performs no I/O: `slots` comes from the caller, typically a stored
    /// document. Use [`Self::fetch`] or [`Self::fetch_slots`] to download the
    /// pharmacy's slots first.
    pub fn get_appointments(
        &self,
        request: &mut ScraperRequest,
        slots: &SlotsResponse,
    ) -> Option<String> {
        request.clear_results();

        let window_start = request.start_date;
        let window_end =
            window_start.checked_add_days(Days::new(u64::from(self.config.horizon_days)));

        let mut earliest: Option<DateTime<FixedOffset>> = None;
        let mut count: u32 = 0;

        for slot in slots.slots.iter().flat_map(|day| &day.available_slots) {
            let Ok(begins_at) = DateTime::parse_from_rfc3339(&slot.slot_beginning) else {
                tracing::warn!(
                    url = %request.url,
                    slot_beginning = %slot.slot_beginning,
                    "skipping slot with unparseable start time"
                );
                continue;
            };

            let day = begins_at.date_naive();
            if day < window_start || window_end.is_some_and(|end| day >= end) {
                continue;
            }

            count += 1;
            for vaccine in slot.vaccine_list.iter().filter_map(|l| Vaccine::from_label(l)) {
                request.add_vaccine_type(vaccine);
            }
            if earliest.is_none_or(|current| begins_at < current) {
                earliest = Some(begins_at);
            }
        }

        request.update_appointment_count(count);
        request.appointment_date = earliest.map(|dt| dt.to_rfc3339());
        tracing::debug!(
            url = %request.url,
            start_date = %request.start_date,
            appointment_count = count,
            "mesoigner slots scanned"
        );
        request.appointment_date.clone()
    }

    fn headers(&self) -> Result<HeaderMap, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            header_value("User-Agent", &self.config.user_agent)?,
        );
        if let Some(key) = &self.config.api_key {
            headers.insert(
                AUTHORIZATION,
                header_value("Authorization", &format!("Mesoigner apikey=\"{key}\""))?,
            );
        }
        Ok(headers)
    }
}

/// Slot endpoint on the pharmacy's own host:
/// `{origin}/api/v1/slots?start_date=YYYY-MM-DD`.
fn slots_url(request: &ScraperRequest) -> Result<Url, ScraperError> {
    let invalid = |reason: String| ScraperError::InvalidUrl {
        url: request.url.clone(),
        reason,
    };

    let parsed = Url::parse(&request.url).map_err(|e| invalid(e.to_string()))?;
    let origin = parsed.origin();
    if !origin.is_tuple() {
        return Err(invalid("URL has no host".into()));
    }

    let mut url = Url::parse(&format!("{}{SLOTS_PATH}", origin.ascii_serialization()))
        .map_err(|e| invalid(e.to_string()))?;
    url.query_pairs_mut()
        .append_pair("start_date", &request.start_date_param());
    Ok(url)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, ScraperError> {
    HeaderValue::from_str(value).map_err(|e| ScraperError::InvalidHeader {
        name: name.to_owned(),
        reason: e.to_string(),
    })
}
