//! Pure mapping from Doctolib JSON documents to normalized center records.
//!
//! Doctolib's JSON is undocumented and changes without notice, so every
//! accessor here degrades to `None` (or an empty value) on missing or
//! mistyped fields instead of failing.

use chrono::Weekday;
use reqwest::Url;
use serde_json::Value;
use vmd_core::text::fold_diacritics;
use vmd_core::{BusinessHours, CenterPageInfo, CenterType, InseeTable, ListedCenter};

/// Public Doctolib host used for booking deep links.
pub const DOCTOLIB_PUBLIC_URL: &str = "https://www.doctolib.fr";

/// URL path segments that identify the kind of center, checked in path order.
const CENTER_TYPE_SEGMENTS: [(&str, CenterType); 7] = [
    ("medecin", CenterType::GeneralPractitioner),
    ("medecin-generaliste", CenterType::GeneralPractitioner),
    ("centres-vaccination", CenterType::VaccinationCenter),
    ("centre-de-vaccination", CenterType::VaccinationCenter),
    ("vaccinodrome", CenterType::VaccinationCenter),
    ("centre-de-sante", CenterType::VaccinationCenter),
    ("pharmacie", CenterType::DrugStore),
];

/// Turns free text into a Doctolib URL slug.
///
/// Lowercases, folds French accents, and joins the remaining words with a
/// single `-`. Anything other than a letter, a digit or `_` separates words:
/// `"FooBar 42"` → `"foobar-42"`, `"Côte-d'Or"` → `"cote-d-or"`.
#[must_use]
pub fn doctolib_urlify(s: &str) -> String {
    fold_diacritics(&s.to_lowercase())
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Classifies a center from its booking URL, falling back to its name.
///
/// The first path segment found in the known-segment table decides. With no
/// known segment, a name mentioning a pharmacy means a drugstore and anything
/// else is treated as a vaccination center.
#[must_use]
pub fn center_type(url: &str, name: &str) -> CenterType {
    for segment in url_path_segments(url) {
        if let Some((_, kind)) = CENTER_TYPE_SEGMENTS
            .iter()
            .find(|(known, _)| *known == segment.as_str())
        {
            return *kind;
        }
    }

    if name.to_lowercase().contains("pharmacie") {
        CenterType::DrugStore
    } else {
        CenterType::VaccinationCenter
    }
}

/// Builds business hours from a Doctolib place's `opening_hours` list.
///
/// Returns `None` when the list is absent or empty. Otherwise every day is
/// present: days that are disabled or missing from the list are `None`, and
/// enabled days carry their ranges as `"HH:MM-HH:MM"` joined with `", "`.
#[must_use]
pub fn parse_doctolib_business_hours(place: &Value) -> Option<BusinessHours> {
    let opening_hours = place.get("opening_hours")?.as_array()?;
    if opening_hours.is_empty() {
        return None;
    }

    let mut hours = BusinessHours::closed();
    for entry in opening_hours {
        let Some(day) = entry
            .get("day")
            .and_then(Value::as_u64)
            .and_then(weekday_from_number)
        else {
            continue;
        };

        let enabled = entry
            .get("enabled")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if !enabled {
            hours.set(day, None);
            continue;
        }

        let ranges: Vec<String> = entry
            .get("ranges")
            .and_then(Value::as_array)
            .map(|ranges| ranges.iter().filter_map(format_range).collect())
            .unwrap_or_default();
        hours.set(day, (!ranges.is_empty()).then(|| ranges.join(", ")));
    }

    Some(hours)
}

/// Extracts `(longitude, latitude)` from `doc.position.{lng,lat}`.
///
/// Values are not range-checked.
#[must_use]
pub fn get_coordinates(doc: &Value) -> Option<(f64, f64)> {
    let position = doc.get("position")?;
    Some((number_field(position, "lng")?, number_field(position, "lat")?))
}

/// Returns the decoded `pid` query parameter of `url`, or `""` when absent
/// or when `url` cannot be parsed.
#[must_use]
pub fn get_pid(url: &str) -> String {
    resolve_url(url)
        .and_then(|parsed| {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "pid")
                .map(|(_, value)| value.into_owned())
        })
        .unwrap_or_default()
}

/// Picks the place a booking URL points at.
///
/// Without a `pid`, the first place is returned: Doctolib lists a profile's
/// default practice first. With a `pid`, the place whose `id` equals it is
/// returned, or `None` if there is no such place.
#[must_use]
pub fn find_place<'a>(places: &'a [Value], url: &str) -> Option<&'a Value> {
    let pid = get_pid(url);
    if pid.is_empty() {
        return places.first();
    }
    places
        .iter()
        .find(|place| place.get("id").and_then(id_string).as_deref() == Some(pid.as_str()))
}

/// Formats a French phone number as E.164 (`"01 23 45 67 89"` → `"+33123456789"`).
///
/// Numbers that cannot be recognised are returned with separators removed.
#[must_use]
pub fn format_phone_number(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    if let Some(rest) = cleaned.strip_prefix("0033") {
        return Some(format!("+33{rest}"));
    }
    if cleaned.starts_with('+') {
        return Some(cleaned);
    }
    if cleaned.len() == 10 {
        if let Some(rest) = cleaned.strip_prefix('0') {
            return Some(format!("+33{rest}"));
        }
    }
    if cleaned.len() == 9 && !cleaned.starts_with('0') {
        return Some(format!("+33{cleaned}"));
    }
    Some(cleaned)
}

/// Joins street, postal code and city as `"{street}, {zipcode} {city}"`,
/// leaving out whatever is missing.
#[must_use]
pub fn format_address(
    street: Option<&str>,
    zipcode: Option<&str>,
    city: Option<&str>,
) -> Option<String> {
    let street = street.map(str::trim).filter(|s| !s.is_empty());
    let locality = [zipcode, city]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    match (street, locality.is_empty()) {
        (Some(street), false) => Some(format!("{street}, {locality}")),
        (Some(street), true) => Some(street.to_string()),
        (None, false) => Some(locality),
        (None, true) => None,
    }
}

/// Last path segment of a booking URL, used as the booking API slug.
#[must_use]
pub fn booking_slug(url: &str) -> Option<String> {
    url_path_segments(url).pop()
}

/// Turns a listing `link` into a public booking URL.
///
/// Relative and protocol-relative links resolve against
/// [`DOCTOLIB_PUBLIC_URL`]; absolute links are kept as they are. Returns
/// `None` when the link cannot be resolved.
#[must_use]
pub fn public_booking_url(link: &str) -> Option<String> {
    resolve_url(link).map(String::from)
}

/// Maps one `data.doctors[]` entry of a search listing.
///
/// Returns `None` for entries without a name or a link.
#[must_use]
pub fn normalize_listed_center(doctor: &Value, insee: &InseeTable) -> Option<ListedCenter> {
    let name = text_field(doctor, "name_with_title").or_else(|| text_field(doctor, "name"))?;
    let link = text_field(doctor, "link")?;
    let booking_url = public_booking_url(&link)?;
    let city = text_field(doctor, "city");
    let zipcode = text_field(doctor, "zipcode");

    let address = format_address(
        text_field(doctor, "address").as_deref(),
        zipcode.as_deref(),
        city.as_deref(),
    );
    let coordinates = get_coordinates(doctor);
    let com_insee = lookup_insee(insee, zipcode.as_deref(), city.as_deref());

    Some(ListedCenter {
        center_type: center_type(&link, &name),
        booking_url,
        name,
        city,
        address,
        longitude: coordinates.map(|(lng, _)| lng),
        latitude: coordinates.map(|(_, lat)| lat),
        com_insee,
    })
}

/// Maps a booking document (`{"data": {"profile", "places", "visit_motives"}}`)
/// to the details of the place `url` points at.
///
/// Returns `None` when `data` or its places are missing or when no place
/// matches the URL's `pid`.
#[must_use]
pub fn normalize_center_page(
    booking: &Value,
    url: &str,
    insee: &InseeTable,
) -> Option<CenterPageInfo> {
    let data = booking.get("data")?;
    let places = data.get("places")?.as_array()?;
    let place = find_place(places, url)?;

    let gid = data
        .get("profile")
        .and_then(|profile| profile.get("id"))
        .and_then(id_string)
        .map(|id| format!("d{id}"));

    let city = text_field(place, "city");
    let zipcode = text_field(place, "zipcode");
    let address = text_field(place, "full_address").or_else(|| {
        format_address(
            text_field(place, "address").as_deref(),
            zipcode.as_deref(),
            city.as_deref(),
        )
    });

    let phone_number = text_field(place, "landline_number")
        .or_else(|| text_field(place, "phone_number"))
        .and_then(|raw| format_phone_number(&raw));

    let visit_motives = data
        .get("visit_motives")
        .and_then(Value::as_array)
        .map(|motives| {
            motives
                .iter()
                .filter_map(|motive| text_field(motive, "name"))
                .collect()
        })
        .unwrap_or_default();

    Some(CenterPageInfo {
        gid,
        address,
        longitude: number_field(place, "longitude"),
        latitude: number_field(place, "latitude"),
        com_insee: lookup_insee(insee, zipcode.as_deref(), city.as_deref()),
        phone_number,
        business_hours: parse_doctolib_business_hours(place),
        visit_motives,
    })
}

fn lookup_insee(insee: &InseeTable, zipcode: Option<&str>, city: Option<&str>) -> Option<String> {
    insee
        .lookup(zipcode?, city.unwrap_or_default())
        .map(str::to_string)
}

/// Parses `url`, resolving relative links against [`DOCTOLIB_PUBLIC_URL`].
fn resolve_url(url: &str) -> Option<Url> {
    let base = Url::parse(DOCTOLIB_PUBLIC_URL).ok()?;
    base.join(url.trim()).ok()
}

/// Non-empty path segments of `url`. Empty when `url` cannot be parsed.
fn url_path_segments(url: &str) -> Vec<String> {
    resolve_url(url)
        .and_then(|parsed| {
            parsed.path_segments().map(|segments| {
                segments
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
        })
        .unwrap_or_default()
}

fn format_range(range: &Value) -> Option<String> {
    let bounds = range.as_array()?;
    let start = bounds.first()?.as_str()?;
    let end = bounds.get(1)?.as_str()?;
    Some(format!("{start}-{end}"))
}

fn weekday_from_number(day: u64) -> Option<Weekday> {
    match day {
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        7 => Some(Weekday::Sun),
        _ => None,
    }
}

/// Reads a non-blank string field, accepting numbers as well (postal codes
/// and identifiers come either way).
fn text_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number_field(value: &Value, key: &str) -> Option<f64> {
    let field = value.get(key)?;
    field
        .as_f64()
        .or_else(|| field.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
}

fn id_string(id: &Value) -> Option<String> {
    match id {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
