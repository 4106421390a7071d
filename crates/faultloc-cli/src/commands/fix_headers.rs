use std::path::PathBuf;

use color_eyre::eyre::Result;

use crate::commands::{err_line, ok_line};

pub fn run(root: PathBuf, dry_run: bool, backup: bool, use_color: bool) -> Result<i32> {
    tracing::debug!(root = %root.display(), dry_run, backup, "fix-headers args");
    let report = faultloc_services::fix_headers(&root, dry_run, backup)?;

    for file in &report.files {
        if dry_run {
            println!("  would fix {}", file.path);
        } else {
            println!("  fixed {}", file.path);
        }
    }
    println!(
        "{} files checked, {} {}",
        report.checked,
        report.fixed,
        if dry_run { "need fixing" } else { "fixed" }
    );

    if report.failed > 0 {
        err_line(use_color, &format!("{} files unreadable", report.failed));
        return Ok(1);
    }
    ok_line(
        use_color,
        if dry_run { "dry run complete" } else { "headers normalized" },
    );
    Ok(0)
}
