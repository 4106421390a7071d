use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FaultLocConfig {
    pub source_lang: Option<String>,
    pub sync: Option<SyncCfg>,
    pub translator: Option<TranslatorCfg>,
    pub coherence: Option<CoherenceCfg>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncCfg {
    pub force_retranslate: Option<bool>,
    pub backup: Option<bool>,
    /// "id" (default) or "positional" for the legacy index-based alignment.
    pub align: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslatorCfg {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_retries: Option<u32>,
    pub retry_delay_ms: Option<u64>,
    /// Environment variable holding the API key.
    pub api_key_env: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoherenceCfg {
    pub strict: Option<bool>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{0}")]
    Other(String),
}

pub fn load_config() -> Result<FaultLocConfig, ConfigError> {
    // Search order: CWD/faultloc.toml, $HOME/.config/faultloc/faultloc.toml
    let mut merged = FaultLocConfig::default();
    if let Ok(p) = std::env::current_dir() {
        let path = p.join("faultloc.toml");
        if let Ok(s) = std::fs::read_to_string(&path) {
            if let Ok(cfg) = toml::from_str::<FaultLocConfig>(&s) {
                merged = merge(merged, cfg);
            }
        }
    }
    if let Some(base) = dirs::config_dir() {
        let path = base.join("faultloc").join("faultloc.toml");
        if let Ok(s) = std::fs::read_to_string(&path) {
            if let Ok(cfg) = toml::from_str::<FaultLocConfig>(&s) {
                merged = merge(merged, cfg);
            }
        }
    }
    Ok(merged)
}

fn merge(mut a: FaultLocConfig, b: FaultLocConfig) -> FaultLocConfig {
    if a.source_lang.is_none() {
        a.source_lang = b.source_lang;
    }
    a.sync = merge_opt(a.sync, b.sync, merge_sync);
    a.translator = merge_opt(a.translator, b.translator, merge_translator);
    a.coherence = merge_opt(a.coherence, b.coherence, merge_coherence);
    a
}

fn merge_opt<T: Default>(a: Option<T>, b: Option<T>, f: fn(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f(a, b)),
        (None, Some(b)) => Some(b),
        (Some(a), None) => Some(a),
        (None, None) => None,
    }
}

fn merge_sync(mut a: SyncCfg, b: SyncCfg) -> SyncCfg {
    if a.force_retranslate.is_none() {
        a.force_retranslate = b.force_retranslate;
    }
    if a.backup.is_none() {
        a.backup = b.backup;
    }
    if a.align.is_none() {
        a.align = b.align;
    }
    a
}

fn merge_translator(mut a: TranslatorCfg, b: TranslatorCfg) -> TranslatorCfg {
    if a.endpoint.is_none() {
        a.endpoint = b.endpoint;
    }
    if a.model.is_none() {
        a.model = b.model;
    }
    if a.temperature.is_none() {
        a.temperature = b.temperature;
    }
    if a.max_retries.is_none() {
        a.max_retries = b.max_retries;
    }
    if a.retry_delay_ms.is_none() {
        a.retry_delay_ms = b.retry_delay_ms;
    }
    if a.api_key_env.is_none() {
        a.api_key_env = b.api_key_env;
    }
    a
}

fn merge_coherence(mut a: CoherenceCfg, b: CoherenceCfg) -> CoherenceCfg {
    if a.strict.is_none() {
        a.strict = b.strict;
    }
    a
}
