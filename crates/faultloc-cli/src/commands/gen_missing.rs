use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

use color_eyre::eyre::Result;

use crate::commands::{err_line, ok_line};
use crate::translator;

pub fn run(root: PathBuf, yes: bool, backup: bool, use_color: bool) -> Result<i32> {
    tracing::debug!(root = %root.display(), yes, backup, "gen-missing args");
    let missing = faultloc_services::find_missing(&root)?;
    if missing.is_empty() {
        ok_line(use_color, "no missing variants, corpus is complete");
        return Ok(0);
    }

    for m in &missing {
        println!(
            "  {} missing {} (source: {} [{}])",
            m.address, m.target_lang, m.source_file, m.source_lang
        );
    }
    println!("{} variants missing", missing.len());

    if !yes && !confirm()? {
        println!("nothing generated; re-run with --yes to generate");
        return Ok(0);
    }

    let cfg = faultloc_config::load_config().unwrap_or_default();
    let opts = crate::commands::batch_options(&cfg, false, backup, false);
    let t = translator::from_config(&cfg);

    let summary = faultloc_services::generate_missing(&root, &t, &opts)?;
    if summary.failed > 0 {
        err_line(
            use_color,
            &format!("{} generated, {} failed", summary.succeeded, summary.failed),
        );
        return Ok(1);
    }
    ok_line(use_color, &format!("generated {} variants", summary.succeeded));
    Ok(0)
}

/// Ask on a terminal; in a pipeline, generation requires an explicit --yes.
fn confirm() -> Result<bool> {
    if !std::io::stdin().is_terminal() {
        return Ok(false);
    }
    print!("generate these files? [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
