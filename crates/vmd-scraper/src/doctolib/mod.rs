//! Doctolib adapter: center discovery from search listings and center
//! details from booking pages.

pub mod departements;
pub mod normalize;

use std::collections::HashSet;

use reqwest::header::HeaderMap;
use reqwest::Client;
use serde_json::Value;
use vmd_core::{AppConfig, CenterInfo, CenterPageInfo, InseeTable, ListedCenter};

use crate::error::ScraperError;
use crate::http::{build_client, fetch_json};

pub use departements::{find_departement, get_departements, Departement};
pub use normalize::{
    center_type, doctolib_urlify, find_place, get_coordinates, get_pid,
    parse_doctolib_business_hours,
};

const DEFAULT_BOOKING_BASE_URL: &str = "https://partners.doctolib.fr";
const DEFAULT_SEARCH_BASE_URL: &str = "https://www.doctolib.fr";

/// Search listing covering the whole country.
const NATIONAL_LISTING: &str = "france";

/// Upper bound on listing pages walked for one department.
pub const MAX_LISTING_PAGES: u32 = 50;

/// HTTP client for Doctolib's public JSON endpoints.
///
/// Use [`DoctolibClient::new`] for production or
/// [`DoctolibClient::with_base_urls`] to point at a mock server in tests.
pub struct DoctolibClient {
    client: Client,
    booking_base_url: String,
    search_base_url: String,
    insee: InseeTable,
}

impl DoctolibClient {
    /// Creates a client pointed at the production Doctolib hosts.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        insee: InseeTable,
    ) -> Result<Self, ScraperError> {
        Self::with_base_urls(
            timeout_secs,
            user_agent,
            DEFAULT_BOOKING_BASE_URL,
            DEFAULT_SEARCH_BASE_URL,
            insee,
        )
    }

    /// Creates a client with custom booking and search hosts.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_urls(
        timeout_secs: u64,
        user_agent: &str,
        booking_base_url: &str,
        search_base_url: &str,
        insee: InseeTable,
    ) -> Result<Self, ScraperError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            booking_base_url: booking_base_url.trim_end_matches('/').to_owned(),
            search_base_url: search_base_url.trim_end_matches('/').to_owned(),
            insee,
        })
    }

    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &AppConfig, insee: InseeTable) -> Result<Self, ScraperError> {
        Self::with_base_urls(
            config.scraper_request_timeout_secs,
            &config.scraper_user_agent,
            &config.doctolib_booking_base_url,
            &config.doctolib_search_base_url,
            insee,
        )
    }

    /// Fetches the booking page behind a center URL and returns the details of
    /// the practice selected by the URL's `pid`.
    ///
    /// Returns `Ok(None)` when the booking document carries no usable data.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] if `url` has no path to derive a slug from.
    /// - [`ScraperError::Http`] / [`ScraperError::UnexpectedStatus`] on transport failure.
    /// - [`ScraperError::Deserialize`] if the body is not JSON.
    pub async fn get_dict_infos_center_page(
        &self,
        url: &str,
    ) -> Result<Option<CenterPageInfo>, ScraperError> {
        let slug = normalize::booking_slug(url).ok_or_else(|| ScraperError::InvalidUrl {
            url: url.to_owned(),
            reason: "no path segment to use as booking slug".into(),
        })?;
        let booking_url = format!("{}/booking/{slug}.json", self.booking_base_url);

        let body = fetch_json(&self.client, &booking_url, HeaderMap::new()).await?;
        let info = normalize::normalize_center_page(&body, url, &self.insee);
        if info.is_none() {
            tracing::debug!(url, pid = %get_pid(url), "booking page has no matching place");
        }
        Ok(info)
    }

    /// Fetches one page of the national search listing.
    ///
    /// # Errors
    ///
    /// Propagates transport and JSON errors from the listing request.
    pub async fn parse_page_centers(&self, page: u32) -> Result<Vec<ListedCenter>, ScraperError> {
        self.fetch_listing_page(NATIONAL_LISTING, page).await
    }

    /// Fetches one page of a department's search listing.
    ///
    /// # Errors
    ///
    /// Propagates transport and JSON errors from the listing request.
    pub async fn parse_departement_page_centers(
        &self,
        departement: &Departement,
        page: u32,
    ) -> Result<Vec<ListedCenter>, ScraperError> {
        self.fetch_listing_page(&doctolib_urlify(departement.name), page)
            .await
    }

    /// Walks a department's listing from page 1 until a page brings no new
    /// center, de-duplicating by booking URL.
    ///
    /// # Errors
    ///
    /// Propagates any page error, discarding centers already collected.
    /// Returns [`ScraperError::PaginationLimit`] past [`MAX_LISTING_PAGES`].
    pub async fn parse_departement_centers(
        &self,
        departement: &Departement,
    ) -> Result<Vec<ListedCenter>, ScraperError> {
        let mut centers = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for page in 1..=MAX_LISTING_PAGES {
            let listed = self.parse_departement_page_centers(departement, page).await?;
            let before = centers.len();
            for center in listed {
                if seen.insert(center.booking_url.clone()) {
                    centers.push(center);
                }
            }

            let added = centers.len() - before;
            tracing::debug!(
                departement = departement.code,
                page,
                added,
                "doctolib listing page"
            );
            if added == 0 {
                return Ok(centers);
            }
        }

        Err(ScraperError::PaginationLimit {
            url: self.listing_url(&doctolib_urlify(departement.name), MAX_LISTING_PAGES),
            max_pages: MAX_LISTING_PAGES,
        })
    }

    /// Completes a listed center with its booking page details.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::get_dict_infos_center_page`].
    pub async fn center_info(&self, listed: ListedCenter) -> Result<CenterInfo, ScraperError> {
        let page = self.get_dict_infos_center_page(&listed.booking_url).await?;
        Ok(CenterInfo::from_doctolib(listed, page))
    }

    async fn fetch_listing_page(
        &self,
        area: &str,
        page: u32,
    ) -> Result<Vec<ListedCenter>, ScraperError> {
        let url = self.listing_url(area, page);
        let body = fetch_json(&self.client, &url, HeaderMap::new()).await?;

        let Some(doctors) = body
            .get("data")
            .and_then(|data| data.get("doctors"))
            .and_then(Value::as_array)
        else {
            return Ok(vec![]);
        };

        let centers: Vec<ListedCenter> = doctors
            .iter()
            .filter_map(|doctor| normalize::normalize_listed_center(doctor, &self.insee))
            .collect();
        if centers.len() < doctors.len() {
            tracing::warn!(
                url = %url,
                skipped = doctors.len() - centers.len(),
                "skipped listing entries without name or link"
            );
        }
        Ok(centers)
    }

    fn listing_url(&self, area: &str, page: u32) -> String {
        format!(
            "{}/vaccination-covid-19/{area}.json?page={page}",
            self.search_base_url
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> DoctolibClient {
        DoctolibClient::with_base_urls(5, "vmd-test/0.1", base_url, base_url, InseeTable::new())
            .expect("client construction should not fail")
    }

    #[test]
    fn listing_url_uses_area_slug_and_page() {
        let client = test_client("https://www.doctolib.fr/");
        assert_eq!(
            client.listing_url("cote-d-or", 3),
            "https://www.doctolib.fr/vaccination-covid-19/cote-d-or.json?page=3"
        );
    }

    #[test]
    fn base_urls_are_trimmed() {
        let client = test_client("http://127.0.0.1:9999///");
        assert_eq!(client.booking_base_url, "http://127.0.0.1:9999");
        assert_eq!(client.search_base_url, "http://127.0.0.1:9999");
    }
}
