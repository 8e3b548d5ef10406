//! Postal code to INSEE commune code resolution.
//!
//! The table is built in memory by the caller from whatever reference data it
//! holds; nothing here reads files.

use std::collections::HashMap;

use crate::text::fold_diacritics;

/// In-memory `(postal code, commune) → INSEE code` table.
///
/// A postal code can cover several communes, so lookups match on both the
/// postal code and the commune name. When the name does not match but the
/// postal code maps to a single INSEE code, that code is returned.
#[derive(Debug, Clone, Default)]
pub struct InseeTable {
    by_zip_and_city: HashMap<(String, String), String>,
    by_zip: HashMap<String, Vec<String>>,
}

impl InseeTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(postal code, commune name, INSEE code)` records.
    pub fn from_records<I, Z, C, K>(records: I) -> Self
    where
        I: IntoIterator<Item = (Z, C, K)>,
        Z: Into<String>,
        C: AsRef<str>,
        K: Into<String>,
    {
        let mut table = Self::new();
        for (zipcode, city, insee) in records {
            table.insert(zipcode, city.as_ref(), insee);
        }
        table
    }

    pub fn insert(&mut self, zipcode: impl Into<String>, city: &str, insee: impl Into<String>) {
        let zipcode = zipcode.into().trim().to_string();
        let insee = insee.into();

        let codes = self.by_zip.entry(zipcode.clone()).or_default();
        if !codes.contains(&insee) {
            codes.push(insee.clone());
        }
        self.by_zip_and_city
            .insert((zipcode, normalize_city(city)), insee);
    }

    /// Resolves the INSEE code of the commune at `zipcode` named `city`.
    #[must_use]
    pub fn lookup(&self, zipcode: &str, city: &str) -> Option<&str> {
        let zipcode = zipcode.trim();
        if let Some(code) = self
            .by_zip_and_city
            .get(&(zipcode.to_string(), normalize_city(city)))
        {
            return Some(code.as_str());
        }

        match self.by_zip.get(zipcode).map(Vec::as_slice) {
            Some([only]) => Some(only.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_zip_and_city.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_zip_and_city.is_empty()
    }
}

/// Lowercased, unaccented commune name with punctuation collapsed to single
/// spaces, so `"Neuilly-sur-Seine"` and `"NEUILLY SUR SEINE"` compare equal.
fn normalize_city(city: &str) -> String {
    fold_diacritics(&city.to_lowercase())
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
