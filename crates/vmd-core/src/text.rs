//! Small text helpers shared by slug and lookup-key builders.

/// Replaces French accented letters with their unaccented ASCII base.
///
/// Ligatures expand (`œ` → `oe`); characters outside the table pass through.
#[must_use]
pub fn fold_diacritics(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            'à' | 'á' | 'â' | 'ä' | 'ã' => out.push('a'),
            'À' | 'Á' | 'Â' | 'Ä' | 'Ã' => out.push('A'),
            'ç' => out.push('c'),
            'Ç' => out.push('C'),
            'è' | 'é' | 'ê' | 'ë' => out.push('e'),
            'È' | 'É' | 'Ê' | 'Ë' => out.push('E'),
            'ì' | 'í' | 'î' | 'ï' => out.push('i'),
            'Ì' | 'Í' | 'Î' | 'Ï' => out.push('I'),
            'ñ' => out.push('n'),
            'Ñ' => out.push('N'),
            'ò' | 'ó' | 'ô' | 'ö' | 'õ' => out.push('o'),
            'Ò' | 'Ó' | 'Ô' | 'Ö' | 'Õ' => out.push('O'),
            'ù' | 'ú' | 'û' | 'ü' => out.push('u'),
            'Ù' | 'Ú' | 'Û' | 'Ü' => out.push('U'),
            'ý' | 'ÿ' => out.push('y'),
            'Ý' | 'Ÿ' => out.push('Y'),
            'œ' => out.push_str("oe"),
            'Œ' => out.push_str("OE"),
            'æ' => out.push_str("ae"),
            'Æ' => out.push_str("AE"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_diacritics_strips_french_accents() {
        assert_eq!(fold_diacritics("Côte-d'Or"), "Cote-d'Or");
        assert_eq!(fold_diacritics("Hérault"), "Herault");
        assert_eq!(fold_diacritics("Bouches-du-Rhône"), "Bouches-du-Rhone");
    }

    #[test]
    fn fold_diacritics_expands_ligatures() {
        assert_eq!(fold_diacritics("cœur"), "coeur");
    }

    #[test]
    fn fold_diacritics_leaves_ascii_untouched() {
        assert_eq!(fold_diacritics("FooBar 42"), "FooBar 42");
    }
}
