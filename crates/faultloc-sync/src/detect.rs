use faultloc_core::Lang;

// Function words and domain vocabulary distinctive of one language. Shared
// words (la, de, error, sensor...) are left out on purpose.
const FR_MARKERS: &[&str] = &[
    "le", "les", "du", "des", "une", "est", "et", "défaut", "erreur", "arrêt", "urgence", "gauche",
    "droit", "avant", "arrière", "capteur", "moteur", "batterie", "réinitialisation", "balayeur",
];
const EN_MARKERS: &[&str] = &[
    "the", "of", "and", "is", "left", "right", "front", "rear", "fault", "stop", "emergency",
    "scanner", "motor", "battery", "reset", "communication",
];
const ES_MARKERS: &[&str] = &[
    "el", "los", "las", "izquierdo", "derecho", "delantero", "trasero", "fallo", "parada",
    "emergencia", "escáner", "láser", "batería", "reinicio",
];

/// Best-effort guess of the language a short phrase is written in, used to
/// catch target text accidentally left in the source language. Returns `None`
/// when the evidence is ambiguous, which callers must treat as "no opinion".
pub fn guess_lang(text: &str) -> Option<Lang> {
    let mut scores = [0usize; 3];
    for word in text
        .split(|c: char| !c.is_alphabetic() && c != '\'')
        .filter(|w| !w.is_empty())
    {
        let word = word.to_lowercase();
        if FR_MARKERS.contains(&word.as_str()) {
            scores[0] += 1;
        }
        if EN_MARKERS.contains(&word.as_str()) {
            scores[1] += 1;
        }
        if ES_MARKERS.contains(&word.as_str()) {
            scores[2] += 1;
        }
    }
    let best = scores.iter().copied().max().unwrap_or(0);
    if best == 0 || scores.iter().filter(|&&s| s == best).count() > 1 {
        return None;
    }
    match scores.iter().position(|&s| s == best) {
        Some(0) => Some(Lang::Fr),
        Some(1) => Some(Lang::En),
        Some(2) => Some(Lang::Es),
        _ => None,
    }
}
