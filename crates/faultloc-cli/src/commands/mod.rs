pub mod check_coherence;
pub mod fix_headers;
pub mod gen_missing;
pub mod sync_all;
pub mod sync_one;

use faultloc_config::FaultLocConfig;
use faultloc_services::BatchOptions;
use faultloc_sync::AlignMode;
use owo_colors::OwoColorize;

pub(crate) fn print_file_stat(stat: &faultloc_domain::SyncFileStat) {
    let state = if stat.created {
        "created"
    } else if stat.changes > 0 {
        "updated"
    } else {
        "up to date"
    };
    println!(
        "  [{}] {} ({state}, {} changes)",
        stat.target_lang, stat.path, stat.changes
    );
}

pub(crate) fn ok_line(use_color: bool, msg: &str) {
    if use_color {
        println!("{} {msg}", "✔".green());
    } else {
        println!("✔ {msg}");
    }
}

pub(crate) fn err_line(use_color: bool, msg: &str) {
    if use_color {
        eprintln!("{} {msg}", "✖".red());
    } else {
        eprintln!("✖ {msg}");
    }
}

/// CLI flags win; `faultloc.toml` fills whatever the flags left unset.
pub(crate) fn batch_options(
    cfg: &FaultLocConfig,
    force: bool,
    backup: bool,
    positional: bool,
) -> BatchOptions {
    let sync_cfg = cfg.sync.clone().unwrap_or_default();
    let align = if positional || sync_cfg.align.as_deref() == Some("positional") {
        AlignMode::Positional
    } else {
        AlignMode::ById
    };
    BatchOptions {
        force: force || sync_cfg.force_retranslate.unwrap_or(false),
        backup: backup || sync_cfg.backup.unwrap_or(false),
        align,
        ..Default::default()
    }
}
