use std::time::Duration;

use faultloc_config::FaultLocConfig;
use faultloc_translate::{HttpTranslator, Retrying};

const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_RETRY_DELAY_MS: u64 = 500;

/// Build the translation client the way `faultloc.toml` describes it. The
/// API key is only required once a natural-language entry actually needs
/// translating; technical-code-only runs work without one.
pub fn from_config(cfg: &FaultLocConfig) -> Retrying<HttpTranslator> {
    let t = cfg.translator.clone().unwrap_or_default();
    let inner = HttpTranslator::new(
        t.endpoint.as_deref(),
        t.model.as_deref(),
        t.temperature,
        t.api_key_env.as_deref(),
    );
    Retrying::new(
        inner,
        t.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
        Duration::from_millis(t.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS)),
    )
}
