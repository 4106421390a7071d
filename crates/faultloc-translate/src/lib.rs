//! Abstraction over the external text-translation capability. The sync engine
//! only sees the [`Translator`] trait; retry policy and transport live here.

use std::collections::HashMap;
use std::time::Duration;

use faultloc_core::Lang;
use thiserror::Error;

mod glossary;
mod http;

pub use glossary::glossary_translation;
pub use http::HttpTranslator;

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("translation service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("translation service returned a malformed response: {0}")]
    MalformedResponse(String),
    #[error("API key environment variable {0} is not set")]
    MissingApiKey(String),
    #[error("no translation available for {text:?} into {lang}")]
    NoEntry { text: String, lang: Lang },
}

/// Input: natural-language text plus a target language. Output: translated
/// text. Implementations may block; callers treat failures as per-entry,
/// never per-batch.
pub trait Translator {
    fn translate(&self, text: &str, target: Lang) -> Result<String, TranslationError>;
}

impl<T: Translator + ?Sized> Translator for &T {
    fn translate(&self, text: &str, target: Lang) -> Result<String, TranslationError> {
        (**self).translate(text, target)
    }
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn translate(&self, text: &str, target: Lang) -> Result<String, TranslationError> {
        (**self).translate(text, target)
    }
}

/// Bounded-retry wrapper with a fixed delay between attempts. The synchronizer
/// never sees intermediate failures.
pub struct Retrying<T> {
    inner: T,
    max_retries: u32,
    delay: Duration,
}

impl<T: Translator> Retrying<T> {
    pub fn new(inner: T, max_retries: u32, delay: Duration) -> Self {
        Retrying {
            inner,
            max_retries,
            delay,
        }
    }
}

impl<T: Translator> Translator for Retrying<T> {
    fn translate(&self, text: &str, target: Lang) -> Result<String, TranslationError> {
        let mut attempt = 0;
        loop {
            match self.inner.translate(text, target) {
                Ok(out) => return Ok(out),
                Err(e) if attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        attempt,
                        max = self.max_retries,
                        error = %e,
                        "translation attempt failed, retrying"
                    );
                    std::thread::sleep(self.delay);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Map-backed translator for tests and offline runs. Misses are errors, which
/// exercises the engine's keep-previous-text failure path.
#[derive(Debug, Default)]
pub struct StaticTranslator {
    entries: HashMap<(String, Lang), String>,
}

impl StaticTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, text: &str, lang: Lang, translated: &str) -> Self {
        self.entries
            .insert((text.to_string(), lang), translated.to_string());
        self
    }
}

impl Translator for StaticTranslator {
    fn translate(&self, text: &str, target: Lang) -> Result<String, TranslationError> {
        if let Some(out) = glossary_translation(text, target) {
            return Ok(out);
        }
        self.entries
            .get(&(text.to_string(), target))
            .cloned()
            .ok_or_else(|| TranslationError::NoEntry {
                text: text.to_string(),
                lang: target,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FlakyTranslator {
        fail_times: u32,
        calls: AtomicU32,
    }

    impl Translator for FlakyTranslator {
        fn translate(&self, text: &str, target: Lang) -> Result<String, TranslationError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.fail_times {
                Err(TranslationError::NoEntry {
                    text: text.to_string(),
                    lang: target,
                })
            } else {
                Ok(format!("{text}-{target}"))
            }
        }
    }

    #[test]
    fn retrying_recovers_within_budget() {
        let t = Retrying::new(
            FlakyTranslator {
                fail_times: 2,
                calls: AtomicU32::new(0),
            },
            3,
            Duration::from_millis(0),
        );
        assert_eq!(t.translate("stop", Lang::Es).unwrap(), "stop-es");
    }

    #[test]
    fn retrying_gives_up_past_budget() {
        let t = Retrying::new(
            FlakyTranslator {
                fail_times: 5,
                calls: AtomicU32::new(0),
            },
            2,
            Duration::from_millis(0),
        );
        assert!(t.translate("stop", Lang::Es).is_err());
    }

    #[test]
    fn static_translator_hits_and_misses() {
        let t = StaticTranslator::new().with("arrêt d'urgence", Lang::En, "emergency stop");
        assert_eq!(
            t.translate("arrêt d'urgence", Lang::En).unwrap(),
            "emergency stop"
        );
        assert!(t.translate("arrêt d'urgence", Lang::Es).is_err());
    }

    #[test]
    fn static_translator_prefers_glossary() {
        let t = StaticTranslator::new();
        assert_eq!(
            t.translate("balayeur gauche", Lang::En).unwrap(),
            "left laser scanner"
        );
    }

    #[test]
    fn composite_glossary_phrase_reaches_the_real_translator() {
        let t = StaticTranslator::new().with(
            "Réinitialisation balayeur laser",
            Lang::En,
            "Reset laser scanner",
        );
        assert_eq!(
            t.translate("Réinitialisation balayeur laser", Lang::En).unwrap(),
            "Reset laser scanner"
        );
    }
}
