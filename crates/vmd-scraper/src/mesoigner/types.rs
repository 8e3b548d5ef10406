//! Mesoigner slot API response types.

use serde::Deserialize;

/// Body of the `api/v1/slots` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlotsResponse {
    #[serde(default)]
    pub slots: Vec<SlotDay>,
}

/// Slots grouped by calendar day.
#[derive(Debug, Clone, Deserialize)]
pub struct SlotDay {
    /// `YYYY-MM-DD`, informational only: filtering uses each slot's own timestamp.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub available_slots: Vec<Slot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Slot {
    /// RFC 3339 start time with the pharmacy's UTC offset,
    /// e.g. `"2021-06-16T14:50:00+02:00"`.
    pub slot_beginning: String,
    /// Free-text vaccine labels offered for this slot.
    #[serde(default)]
    pub vaccine_list: Vec<String>,
}
