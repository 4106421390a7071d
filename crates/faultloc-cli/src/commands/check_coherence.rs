use std::path::PathBuf;

use color_eyre::eyre::{bail, Result};
use faultloc_domain::DivergenceKind;
use owo_colors::OwoColorize;

use crate::commands::{err_line, ok_line};

pub fn run(root: PathBuf, format: &str, use_color: bool) -> Result<i32> {
    tracing::debug!(root = %root.display(), format, "check-coherence args");
    let cfg = faultloc_config::load_config().unwrap_or_default();
    let strict = cfg.coherence.and_then(|c| c.strict).unwrap_or(false);
    let report = faultloc_services::check_coherence(&root)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "text" => {
            for issue in &report.issues {
                let kind = serde_json::to_value(issue.divergence.kind)?;
                let kind = kind.as_str().unwrap_or("unknown");
                let line = format!(
                    "[{}] {}/{}  {}  {}  {}",
                    issue.group,
                    issue.left_lang,
                    issue.right_lang,
                    kind,
                    issue.divergence.path,
                    issue.divergence.detail
                );
                if use_color {
                    println!("{}", line.yellow());
                } else {
                    println!("{line}");
                }
            }
            println!(
                "{} groups checked, {} divergences",
                report.groups_checked,
                report.issues.len()
            );
        }
        other => bail!("unknown format {other:?} (expected text or json)"),
    }

    // Untranslated entries show up all the time mid-campaign; they only block
    // the exit status under [coherence] strict.
    let blocking = report
        .issues
        .iter()
        .filter(|i| strict || i.divergence.kind != DivergenceKind::EmptinessMismatch)
        .count();
    if blocking == 0 {
        if format == "text" {
            ok_line(use_color, "corpus is coherent");
        }
        Ok(0)
    } else {
        if format == "text" {
            err_line(use_color, "divergences found");
        }
        Ok(1)
    }
}
