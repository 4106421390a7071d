//! Fixed domain terms that must always translate the same way, checked before
//! any network call. The list is deliberately small: terms the generic
//! translator historically got wrong.

use faultloc_core::Lang;

struct Term {
    fr: &'static str,
    en: &'static str,
    es: &'static str,
}

const SUBJECT: Term = Term {
    fr: "balayeur",
    en: "laser scanner",
    es: "escáner láser",
};

const POSITIONS: [Term; 4] = [
    Term {
        fr: "gauche",
        en: "left",
        es: "izquierdo",
    },
    Term {
        fr: "droit",
        en: "right",
        es: "derecho",
    },
    Term {
        fr: "avant",
        en: "front",
        es: "delantero",
    },
    Term {
        fr: "arrière",
        en: "rear",
        es: "trasero",
    },
];

impl Term {
    fn get(&self, lang: Lang) -> &'static str {
        match lang {
            Lang::Fr => self.fr,
            Lang::En => self.en,
            Lang::Es => self.es,
        }
    }
}

/// Composed translation for a glossary phrase, or `None` when the text is not
/// covered and the regular translator should run. Only whole phrases qualify:
/// the subject alone, or the subject followed by one position word. Anything
/// longer carries words the glossary cannot account for and must go through
/// the translator untouched. Word order differs per target: English puts the
/// position first, Spanish puts it after the noun.
pub fn glossary_translation(text: &str, target: Lang) -> Option<String> {
    if target == Lang::Fr {
        return None;
    }
    let lower = text.trim().to_lowercase();
    let mut words = lower.split_whitespace();
    if words.next()? != SUBJECT.fr {
        return None;
    }
    let position = match words.next() {
        None => None,
        Some(word) => {
            let position = POSITIONS.iter().find(|p| p.fr == word)?;
            if words.next().is_some() {
                return None;
            }
            Some(position)
        }
    };

    let mut result = SUBJECT.get(target).to_string();
    if let Some(position) = position {
        result = match target {
            Lang::En => format!("{} {}", position.get(target), result),
            _ => format!("{} {}", result, position.get(target)),
        };
    }
    // Keep the initial capital of the source text.
    if text.chars().next().is_some_and(|c| c.is_uppercase()) {
        let mut chars = result.chars();
        if let Some(first) = chars.next() {
            result = first.to_uppercase().collect::<String>() + chars.as_str();
        }
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_subject() {
        assert_eq!(
            glossary_translation("balayeur", Lang::En).as_deref(),
            Some("laser scanner")
        );
        assert_eq!(
            glossary_translation("balayeur", Lang::Es).as_deref(),
            Some("escáner láser")
        );
    }

    #[test]
    fn position_order_differs_per_language() {
        assert_eq!(
            glossary_translation("balayeur gauche", Lang::En).as_deref(),
            Some("left laser scanner")
        );
        assert_eq!(
            glossary_translation("balayeur gauche", Lang::Es).as_deref(),
            Some("escáner láser izquierdo")
        );
    }

    #[test]
    fn initial_capital_is_preserved() {
        assert_eq!(
            glossary_translation("Balayeur arrière", Lang::En).as_deref(),
            Some("Rear laser scanner")
        );
    }

    #[test]
    fn uncovered_text_falls_through() {
        assert!(glossary_translation("défaut moteur", Lang::En).is_none());
        assert!(glossary_translation("balayeur", Lang::Fr).is_none());
    }

    #[test]
    fn composite_phrases_fall_through_to_the_translator() {
        // the glossary must not swallow words it cannot account for
        assert!(glossary_translation("Réinitialisation balayeur laser", Lang::En).is_none());
        assert!(glossary_translation("balayeur laser", Lang::En).is_none());
        assert!(glossary_translation("balayeur gauche défectueux", Lang::Es).is_none());
    }
}
