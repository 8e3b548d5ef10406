use serde::{Deserialize, Serialize};

/// Vaccines a booking platform can tag a slot with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vaccine {
    #[serde(rename = "Pfizer-BioNTech")]
    Pfizer,
    Moderna,
    AstraZeneca,
    Janssen,
}

/// Lowercased label fragments recognised for each vaccine.
const VACCINE_LABELS: [(Vaccine, &[&str]); 4] = [
    (Vaccine::Pfizer, &["pfizer", "biontech", "comirnaty"]),
    (Vaccine::Moderna, &["moderna", "spikevax"]),
    (
        Vaccine::AstraZeneca,
        &["astrazeneca", "astra-zeneca", "astra zeneca", "vaxzevria"],
    ),
    (Vaccine::Janssen, &["janssen", "johnson"]),
];

impl Vaccine {
    /// Recognises a vaccine from a free-text platform label such as
    /// `"Vaccin Moderna (dose 1)"`. Matching is case-insensitive.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let lower = label.to_lowercase();
        VACCINE_LABELS
            .iter()
            .find(|(_, fragments)| fragments.iter().any(|f| lower.contains(f)))
            .map(|(vaccine, _)| *vaccine)
    }
}

impl std::fmt::Display for Vaccine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Vaccine::Pfizer => write!(f, "Pfizer-BioNTech"),
            Vaccine::Moderna => write!(f, "Moderna"),
            Vaccine::AstraZeneca => write!(f, "AstraZeneca"),
            Vaccine::Janssen => write!(f, "Janssen"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_label_matches_brand_names() {
        assert_eq!(Vaccine::from_label("Moderna"), Some(Vaccine::Moderna));
        assert_eq!(Vaccine::from_label("AstraZeneca"), Some(Vaccine::AstraZeneca));
        assert_eq!(Vaccine::from_label("Janssen"), Some(Vaccine::Janssen));
    }

    #[test]
    fn from_label_matches_aliases_case_insensitively() {
        assert_eq!(
            Vaccine::from_label("1ère injection COMIRNATY"),
            Some(Vaccine::Pfizer)
        );
        assert_eq!(Vaccine::from_label("Vaxzevria"), Some(Vaccine::AstraZeneca));
        assert_eq!(
            Vaccine::from_label("Johnson & Johnson"),
            Some(Vaccine::Janssen)
        );
    }

    #[test]
    fn from_label_unknown_returns_none() {
        assert_eq!(Vaccine::from_label("Grippe saisonnière"), None);
        assert_eq!(Vaccine::from_label(""), None);
    }

    #[test]
    fn serializes_with_platform_names() {
        let json = serde_json::to_string(&[Vaccine::Pfizer, Vaccine::Moderna]).unwrap();
        assert_eq!(json, r#"["Pfizer-BioNTech","Moderna"]"#);
    }
}
