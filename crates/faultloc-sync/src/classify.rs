use once_cell::sync::Lazy;
use regex::Regex;

// Short uppercase codes like "A1B2", "E:12", "REF_3/4". A wrongly translated
// code silently corrupts a protocol constant, so the pattern stays narrow.
static TECH_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z0-9 .:_/-]{1,10}$").unwrap());

/// Whether `text` is a technical code that must never be translated.
///
/// Empty or whitespace-only text is not technical: "empty" is its own state,
/// handled by the synchronizer. Pure digit strings are technical whatever the
/// length; everything else is technical only when short and drawn from the
/// uppercase code alphabet.
pub fn is_technical_code(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }
    if text.bytes().all(|b| b.is_ascii_digit()) {
        return true;
    }
    TECH_CODE.is_match(text)
}
