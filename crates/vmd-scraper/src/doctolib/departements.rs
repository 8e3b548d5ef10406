//! French departments used to partition Doctolib listings by geography.

/// A French department as addressed by Doctolib search listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Departement {
    /// Official department code (`"01"`, `"2A"`, `"971"`, ...).
    pub code: &'static str,
    pub name: &'static str,
}

// Mayotte (976) has no Doctolib listing.
const DEPARTEMENTS: [Departement; 100] = [
    dep("01", "Ain"),
    dep("02", "Aisne"),
    dep("03", "Allier"),
    dep("04", "Alpes-de-Haute-Provence"),
    dep("05", "Hautes-Alpes"),
    dep("06", "Alpes-Maritimes"),
    dep("07", "Ardèche"),
    dep("08", "Ardennes"),
    dep("09", "Ariège"),
    dep("10", "Aube"),
    dep("11", "Aude"),
    dep("12", "Aveyron"),
    dep("13", "Bouches-du-Rhône"),
    dep("14", "Calvados"),
    dep("15", "Cantal"),
    dep("16", "Charente"),
    dep("17", "Charente-Maritime"),
    dep("18", "Cher"),
    dep("19", "Corrèze"),
    dep("2A", "Corse-du-Sud"),
    dep("2B", "Haute-Corse"),
    dep("21", "Côte-d'Or"),
    dep("22", "Côtes-d'Armor"),
    dep("23", "Creuse"),
    dep("24", "Dordogne"),
    dep("25", "Doubs"),
    dep("26", "Drôme"),
    dep("27", "Eure"),
    dep("28", "Eure-et-Loir"),
    dep("29", "Finistère"),
    dep("30", "Gard"),
    dep("31", "Haute-Garonne"),
    dep("32", "Gers"),
    dep("33", "Gironde"),
    dep("34", "Hérault"),
    dep("35", "Ille-et-Vilaine"),
    dep("36", "Indre"),
    dep("37", "Indre-et-Loire"),
    dep("38", "Isère"),
    dep("39", "Jura"),
    dep("40", "Landes"),
    dep("41", "Loir-et-Cher"),
    dep("42", "Loire"),
    dep("43", "Haute-Loire"),
    dep("44", "Loire-Atlantique"),
    dep("45", "Loiret"),
    dep("46", "Lot"),
    dep("47", "Lot-et-Garonne"),
    dep("48", "Lozère"),
    dep("49", "Maine-et-Loire"),
    dep("50", "Manche"),
    dep("51", "Marne"),
    dep("52", "Haute-Marne"),
    dep("53", "Mayenne"),
    dep("54", "Meurthe-et-Moselle"),
    dep("55", "Meuse"),
    dep("56", "Morbihan"),
    dep("57", "Moselle"),
    dep("58", "Nièvre"),
    dep("59", "Nord"),
    dep("60", "Oise"),
    dep("61", "Orne"),
    dep("62", "Pas-de-Calais"),
    dep("63", "Puy-de-Dôme"),
    dep("64", "Pyrénées-Atlantiques"),
    dep("65", "Hautes-Pyrénées"),
    dep("66", "Pyrénées-Orientales"),
    dep("67", "Bas-Rhin"),
    dep("68", "Haut-Rhin"),
    dep("69", "Rhône"),
    dep("70", "Haute-Saône"),
    dep("71", "Saône-et-Loire"),
    dep("72", "Sarthe"),
    dep("73", "Savoie"),
    dep("74", "Haute-Savoie"),
    dep("75", "Paris"),
    dep("76", "Seine-Maritime"),
    dep("77", "Seine-et-Marne"),
    dep("78", "Yvelines"),
    dep("79", "Deux-Sèvres"),
    dep("80", "Somme"),
    dep("81", "Tarn"),
    dep("82", "Tarn-et-Garonne"),
    dep("83", "Var"),
    dep("84", "Vaucluse"),
    dep("85", "Vendée"),
    dep("86", "Vienne"),
    dep("87", "Haute-Vienne"),
    dep("88", "Vosges"),
    dep("89", "Yonne"),
    dep("90", "Territoire de Belfort"),
    dep("91", "Essonne"),
    dep("92", "Hauts-de-Seine"),
    dep("93", "Seine-Saint-Denis"),
    dep("94", "Val-de-Marne"),
    dep("95", "Val-d'Oise"),
    dep("971", "Guadeloupe"),
    dep("972", "Martinique"),
    dep("973", "Guyane"),
    dep("974", "La Réunion"),
];

const fn dep(code: &'static str, name: &'static str) -> Departement {
    Departement { code, name }
}

/// Returns the fixed list of departments scraped on Doctolib.
#[must_use]
pub fn get_departements() -> &'static [Departement] {
    &DEPARTEMENTS
}

/// Finds a department by its official code.
#[must_use]
pub fn find_departement(code: &str) -> Option<&'static Departement> {
    DEPARTEMENTS.iter().find(|d| d.code.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn get_departements_returns_one_hundred_entries() {
        assert_eq!(get_departements().len(), 100);
    }

    #[test]
    fn departement_codes_are_unique() {
        let codes: HashSet<&str> = get_departements().iter().map(|d| d.code).collect();
        assert_eq!(codes.len(), 100);
    }

    #[test]
    fn find_departement_handles_corsica_codes() {
        assert_eq!(find_departement("2a").map(|d| d.name), Some("Corse-du-Sud"));
        assert_eq!(find_departement("2B").map(|d| d.name), Some("Haute-Corse"));
        assert_eq!(find_departement("976"), None);
    }
}
