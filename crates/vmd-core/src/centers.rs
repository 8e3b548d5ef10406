//! Normalized center records shared by every platform adapter.

use std::collections::HashMap;

use chrono::Weekday;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// French day names in week order, Monday first.
pub const FRENCH_DAY_NAMES: [&str; 7] = [
    "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
];

/// Returns the French name used as a business-hours key for `day`.
#[must_use]
pub fn french_day_name(day: Weekday) -> &'static str {
    FRENCH_DAY_NAMES[day.num_days_from_monday() as usize]
}

/// Kind of place offering appointments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CenterType {
    #[serde(rename = "general-practitioner")]
    GeneralPractitioner,
    #[serde(rename = "drugstore")]
    DrugStore,
    #[serde(rename = "vaccination-center")]
    VaccinationCenter,
    #[serde(rename = "other")]
    Other,
}

impl std::fmt::Display for CenterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CenterType::GeneralPractitioner => write!(f, "general-practitioner"),
            CenterType::DrugStore => write!(f, "drugstore"),
            CenterType::VaccinationCenter => write!(f, "vaccination-center"),
            CenterType::Other => write!(f, "other"),
        }
    }
}

/// Opening hours keyed by French day name.
///
/// Always carries all seven days; `None` means closed or unspecified. The
/// serialized form is a map with the seven keys in week order, e.g.
/// `{"lundi": "09:00-12:00, 14:00-18:00", "mardi": null, ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "HashMap<String, Option<String>>")]
pub struct BusinessHours {
    days: [Option<String>; 7],
}

impl BusinessHours {
    /// Business hours with every day closed.
    #[must_use]
    pub fn closed() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, day: Weekday) -> Option<&str> {
        self.days[day.num_days_from_monday() as usize].as_deref()
    }

    pub fn set(&mut self, day: Weekday, hours: Option<String>) {
        self.days[day.num_days_from_monday() as usize] = hours;
    }

    /// Iterates `(french day name, hours)` pairs, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> + '_ {
        FRENCH_DAY_NAMES
            .iter()
            .zip(self.days.iter())
            .map(|(name, hours)| (*name, hours.as_deref()))
    }

    /// Returns `true` when no day has opening hours.
    #[must_use]
    pub fn is_closed_all_week(&self) -> bool {
        self.days.iter().all(Option::is_none)
    }
}

impl Serialize for BusinessHours {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FRENCH_DAY_NAMES.len()))?;
        for (day, hours) in self.iter() {
            map.serialize_entry(day, &hours)?;
        }
        map.end()
    }
}

impl TryFrom<HashMap<String, Option<String>>> for BusinessHours {
    type Error = String;

    fn try_from(raw: HashMap<String, Option<String>>) -> Result<Self, Self::Error> {
        let mut hours = Self::default();
        for (key, value) in raw {
            let index = FRENCH_DAY_NAMES
                .iter()
                .position(|name| *name == key)
                .ok_or_else(|| format!("unknown day name \"{key}\""))?;
            hours.days[index] = value;
        }
        Ok(hours)
    }
}

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
}

/// Center details read from a Doctolib booking page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenterPageInfo {
    /// Platform-prefixed profile identifier, e.g. `"d1234"`. `None` when the
    /// page carries no profile id.
    pub gid: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "long_coor1")]
    pub longitude: Option<f64>,
    #[serde(rename = "lat_coor1")]
    pub latitude: Option<f64>,
    pub com_insee: Option<String>,
    /// E.164 formatted, e.g. `"+33612345678"`.
    pub phone_number: Option<String>,
    pub business_hours: Option<BusinessHours>,
    pub visit_motives: Vec<String>,
}

/// A center as it appears in a Doctolib search listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListedCenter {
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "ville")]
    pub city: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "type")]
    pub center_type: CenterType,
    /// Public booking URL.
    #[serde(rename = "rdv_site_web")]
    pub booking_url: String,
    #[serde(rename = "long_coor1")]
    pub longitude: Option<f64>,
    #[serde(rename = "lat_coor1")]
    pub latitude: Option<f64>,
    pub com_insee: Option<String>,
}

/// Full normalized description of a center, independent of the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenterInfo {
    pub gid: Option<String>,
    pub name: String,
    pub url: String,
    pub address: Option<String>,
    pub location: Option<Location>,
    pub com_insee: Option<String>,
    pub phone_number: Option<String>,
    pub business_hours: Option<BusinessHours>,
    #[serde(rename = "type")]
    pub center_type: CenterType,
    pub visit_motives: Vec<String>,
}

impl CenterInfo {
    /// Merges a listing record with the details of its booking page.
    ///
    /// Booking-page values win when present since they describe the exact
    /// practice; the listing fills whatever the page leaves empty.
    #[must_use]
    pub fn from_doctolib(listed: ListedCenter, page: Option<CenterPageInfo>) -> Self {
        let listed_location = location_from(listed.longitude, listed.latitude);

        let Some(page) = page else {
            return Self {
                gid: None,
                name: listed.name,
                url: listed.booking_url,
                address: listed.address,
                location: listed_location,
                com_insee: listed.com_insee,
                phone_number: None,
                business_hours: None,
                center_type: listed.center_type,
                visit_motives: Vec::new(),
            };
        };

        Self {
            gid: page.gid,
            name: listed.name,
            url: listed.booking_url,
            address: page.address.or(listed.address),
            location: location_from(page.longitude, page.latitude).or(listed_location),
            com_insee: page.com_insee.or(listed.com_insee),
            phone_number: page.phone_number,
            business_hours: page.business_hours,
            center_type: listed.center_type,
            visit_motives: page.visit_motives,
        }
    }
}

fn location_from(longitude: Option<f64>, latitude: Option<f64>) -> Option<Location> {
    Some(Location {
        longitude: longitude?,
        latitude: latitude?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listed() -> ListedCenter {
        ListedCenter {
            name: "Centre Foo Bar".to_string(),
            city: Some("Lyon".to_string()),
            address: Some("1 Rue Foo, 69001 Lyon".to_string()),
            center_type: CenterType::VaccinationCenter,
            booking_url: "https://www.doctolib.fr/centre-de-sante/lyon/foo-bar".to_string(),
            longitude: Some(4.83),
            latitude: Some(45.76),
            com_insee: Some("69381".to_string()),
        }
    }

    #[test]
    fn business_hours_serializes_all_days_in_week_order() {
        let mut hours = BusinessHours::closed();
        hours.set(Weekday::Mon, Some("09:00-12:00".to_string()));
        hours.set(Weekday::Sun, Some("10:00-11:00".to_string()));

        let json = serde_json::to_string(&hours).unwrap();
        assert_eq!(
            json,
            r#"{"lundi":"09:00-12:00","mardi":null,"mercredi":null,"jeudi":null,"vendredi":null,"samedi":null,"dimanche":"10:00-11:00"}"#
        );
    }

    #[test]
    fn business_hours_deserializes_partial_maps() {
        let hours: BusinessHours =
            serde_json::from_str(r#"{"mardi": "08:00-10:00", "jeudi": null}"#).unwrap();
        assert_eq!(hours.get(Weekday::Tue), Some("08:00-10:00"));
        assert_eq!(hours.get(Weekday::Thu), None);
        assert_eq!(hours.get(Weekday::Mon), None);
    }

    #[test]
    fn business_hours_rejects_unknown_day() {
        let result = serde_json::from_str::<BusinessHours>(r#"{"monday": "08:00-10:00"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn french_day_name_maps_weekdays() {
        assert_eq!(french_day_name(Weekday::Mon), "lundi");
        assert_eq!(french_day_name(Weekday::Wed), "mercredi");
        assert_eq!(french_day_name(Weekday::Sun), "dimanche");
    }

    #[test]
    fn center_type_serializes_platform_strings() {
        let json = serde_json::to_string(&[
            CenterType::GeneralPractitioner,
            CenterType::DrugStore,
            CenterType::VaccinationCenter,
            CenterType::Other,
        ])
        .unwrap();
        assert_eq!(
            json,
            r#"["general-practitioner","drugstore","vaccination-center","other"]"#
        );
    }

    #[test]
    fn listed_center_uses_platform_keys() {
        let value = serde_json::to_value(listed()).unwrap();
        assert_eq!(value["nom"], "Centre Foo Bar");
        assert_eq!(value["ville"], "Lyon");
        assert_eq!(value["type"], "vaccination-center");
        assert_eq!(value["long_coor1"], 4.83);
        assert_eq!(value["lat_coor1"], 45.76);
        assert!(value.get("rdv_site_web").is_some());
    }

    #[test]
    fn from_doctolib_without_page_keeps_listing_values() {
        let info = CenterInfo::from_doctolib(listed(), None);
        assert_eq!(info.gid, None);
        assert_eq!(info.address.as_deref(), Some("1 Rue Foo, 69001 Lyon"));
        assert_eq!(
            info.location,
            Some(Location {
                longitude: 4.83,
                latitude: 45.76
            })
        );
        assert!(info.visit_motives.is_empty());
    }

    #[test]
    fn from_doctolib_prefers_page_values() {
        let page = CenterPageInfo {
            gid: Some("d42".to_string()),
            address: Some("2 Rue Bar, 69002 Lyon".to_string()),
            longitude: Some(4.82),
            latitude: None,
            com_insee: None,
            phone_number: Some("+33400000000".to_string()),
            business_hours: Some(BusinessHours::closed()),
            visit_motives: vec!["1re injection vaccin COVID-19 (Moderna)".to_string()],
        };

        let info = CenterInfo::from_doctolib(listed(), Some(page));
        assert_eq!(info.gid.as_deref(), Some("d42"));
        assert_eq!(info.address.as_deref(), Some("2 Rue Bar, 69002 Lyon"));
        // Partial page coordinates fall back to the listing pair.
        assert_eq!(info.location.map(|l| l.longitude), Some(4.83));
        assert_eq!(info.com_insee.as_deref(), Some("69381"));
        assert_eq!(info.phone_number.as_deref(), Some("+33400000000"));
        assert_eq!(info.visit_motives.len(), 1);
    }
}
