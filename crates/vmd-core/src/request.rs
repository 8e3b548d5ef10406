use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::centers::CenterInfo;
use crate::vaccine::Vaccine;

/// One availability query for a center on a given date.
///
/// Adapters fill the result fields (`appointment_date`, `appointment_count`,
/// `vaccine_type`) in place; the caller reads them once the adapter returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScraperRequest {
    /// Public booking URL of the center.
    pub url: String,
    /// First day of the availability window.
    pub start_date: NaiveDate,
    /// Platform metadata about the center, when known.
    pub center_info: Option<CenterInfo>,
    /// Earliest available slot as RFC 3339 with its original UTC offset.
    pub appointment_date: Option<String>,
    pub appointment_count: u32,
    /// Distinct vaccines offered across the matching slots, in order of first
    /// appearance. `None` when no slot carried a recognised vaccine.
    pub vaccine_type: Option<Vec<Vaccine>>,
}

impl ScraperRequest {
    #[must_use]
    pub fn new(url: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            url: url.into(),
            start_date,
            center_info: None,
            appointment_date: None,
            appointment_count: 0,
            vaccine_type: None,
        }
    }

    #[must_use]
    pub fn with_center_info(mut self, center_info: CenterInfo) -> Self {
        self.center_info = Some(center_info);
        self
    }

    /// Start date formatted as the platforms expect it (`YYYY-MM-DD`).
    #[must_use]
    pub fn start_date_param(&self) -> String {
        self.start_date.format("%Y-%m-%d").to_string()
    }

    pub fn update_appointment_count(&mut self, count: u32) {
        self.appointment_count = count;
    }

    /// Records `vaccine` unless it is already listed.
    pub fn add_vaccine_type(&mut self, vaccine: Vaccine) {
        let vaccines = self.vaccine_type.get_or_insert_with(Vec::new);
        if !vaccines.contains(&vaccine) {
            vaccines.push(vaccine);
        }
    }

    /// Resets every result field to its "nothing found" value.
    pub fn clear_results(&mut self) {
        self.appointment_date = None;
        self.appointment_count = 0;
        self.vaccine_type = None;
    }
}
