use std::path::PathBuf;
use std::str::FromStr;

use color_eyre::eyre::Result;
use faultloc_core::Lang;

use crate::commands::{batch_options, err_line, ok_line, print_file_stat};
use crate::translator;

pub fn run(
    root: PathBuf,
    source_lang: Option<String>,
    force: bool,
    backup: bool,
    positional: bool,
    use_color: bool,
) -> Result<i32> {
    tracing::debug!(root = %root.display(), source_lang = ?source_lang, force, "sync-all args");
    let cfg = faultloc_config::load_config().unwrap_or_default();
    let mut opts = batch_options(&cfg, force, backup, positional);
    if let Some(lang) = source_lang.or_else(|| cfg.source_lang.clone()) {
        opts.source_lang = Lang::from_str(&lang)?;
    }
    let t = translator::from_config(&cfg);

    let summary = faultloc_services::synchronize_all(&root, &t, &opts)?;
    for stat in &summary.files {
        print_file_stat(stat);
    }
    let (created, updated): (usize, usize) = summary.files.iter().fold((0, 0), |(c, u), f| {
        if f.created {
            (c + 1, u)
        } else if f.changes > 0 {
            (c, u + 1)
        } else {
            (c, u)
        }
    });
    println!(
        "{} source documents processed: {} variants created, {} updated",
        summary.succeeded, created, updated
    );
    if summary.failed > 0 {
        err_line(use_color, &format!("{} documents failed", summary.failed));
        return Ok(1);
    }
    ok_line(use_color, "corpus synchronized");
    Ok(0)
}
