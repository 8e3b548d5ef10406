#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Deployment environment, for callers that tag logs or pick defaults by
    /// environment. The adapters behave the same in every environment.
    pub env: Environment,
    /// Filter directive for the caller's `tracing` subscriber (e.g. `"info"`,
    /// `"vmd_scraper=debug"`). The library only emits events and never
    /// installs a subscriber.
    pub log_level: String,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    /// Host serving `booking/{slug}.json` center pages.
    pub doctolib_booking_base_url: String,
    /// Host serving the paginated `vaccination-covid-19/*.json` listings.
    pub doctolib_search_base_url: String,
    pub mesoigner_enabled: bool,
    pub mesoigner_api_key: Option<String>,
    /// Number of days after the requested date scanned for Mesoigner slots.
    pub mesoigner_horizon_days: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "scraper_request_timeout_secs",
                &self.scraper_request_timeout_secs,
            )
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field("doctolib_booking_base_url", &self.doctolib_booking_base_url)
            .field("doctolib_search_base_url", &self.doctolib_search_base_url)
            .field("mesoigner_enabled", &self.mesoigner_enabled)
            .field(
                "mesoigner_api_key",
                &self.mesoigner_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("mesoigner_horizon_days", &self.mesoigner_horizon_days)
            .finish()
    }
}
