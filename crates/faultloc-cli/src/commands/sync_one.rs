use std::path::PathBuf;

use color_eyre::eyre::Result;

use crate::commands::{batch_options, ok_line, print_file_stat};
use crate::translator;

pub fn run(
    file: PathBuf,
    force: bool,
    backup: bool,
    positional: bool,
    use_color: bool,
) -> Result<i32> {
    tracing::debug!(file = %file.display(), force, backup, positional, "sync-one args");
    let cfg = faultloc_config::load_config().unwrap_or_default();
    let opts = batch_options(&cfg, force, backup, positional);
    let t = translator::from_config(&cfg);

    let stats = faultloc_services::synchronize_file(&file, &t, &opts)?;
    for stat in &stats {
        print_file_stat(stat);
    }
    ok_line(
        use_color,
        &format!("synchronized {} sibling variants of {}", stats.len(), file.display()),
    );
    Ok(0)
}
