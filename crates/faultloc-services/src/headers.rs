//! Repair embedded header metadata across a corpus: `Header.Language`,
//! `Header.FileName` and the mirrored level ids must agree with the filename.

use std::path::Path;

use faultloc_core::Result;
use faultloc_domain::{HeaderFixReport, HeaderFixStat, SCHEMA_VERSION};
use faultloc_sync::normalize_header;

use crate::corpus;
use crate::io::{load_document, save_document};

pub fn fix_headers(root: &Path, dry_run: bool, backup: bool) -> Result<HeaderFixReport> {
    let corpus = corpus::scan(root)?;
    let mut report = HeaderFixReport {
        schema_version: SCHEMA_VERSION,
        ..Default::default()
    };
    for group in &corpus.groups {
        for (&lang, path) in &group.files {
            let mut doc = match load_document(path) {
                Ok(doc) => doc,
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "cannot check header");
                    report.failed += 1;
                    continue;
                }
            };
            report.checked += 1;
            if !normalize_header(&mut doc, group.address, lang) {
                continue;
            }
            if dry_run {
                tracing::info!(path = %path.display(), "header needs fixing (dry run)");
            } else if let Err(e) = save_document(path, &doc, backup) {
                tracing::error!(path = %path.display(), error = %e, "cannot write fixed header");
                report.failed += 1;
                continue;
            } else {
                tracing::info!(path = %path.display(), "header fixed");
            }
            report.fixed += 1;
            report.files.push(HeaderFixStat {
                path: path.display().to_string(),
                changed: true,
            });
        }
    }
    Ok(report)
}
