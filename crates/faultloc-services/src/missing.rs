//! Find addresses that exist in some languages but not all three, and
//! generate the absent variants from whichever language is present.

use std::path::Path;

use faultloc_core::{Lang, Result};
use faultloc_domain::{MissingVariant, SyncSummary, SCHEMA_VERSION};
use faultloc_translate::Translator;

use crate::corpus;
use crate::io::load_document;
use crate::sync_ops::{sync_one_target, BatchOptions};

/// List every (address, language) hole in the corpus. The source is the first
/// available language in fixed fr/en/es preference order.
pub fn find_missing(root: &Path) -> Result<Vec<MissingVariant>> {
    let corpus = corpus::scan(root)?;
    let mut out = Vec::new();
    for group in &corpus.groups {
        let Some((&source_lang, source_path)) = group.files.iter().next() else {
            continue;
        };
        for target_lang in group.missing_langs() {
            out.push(MissingVariant {
                address: group.address.to_string(),
                source_file: source_path.display().to_string(),
                source_lang: source_lang.to_string(),
                target_lang: target_lang.to_string(),
            });
        }
    }
    Ok(out)
}

/// Create every missing variant. Each hole is filled independently; one
/// unreadable source document fails its own group and nothing else.
pub fn generate_missing(
    root: &Path,
    translator: &dyn Translator,
    opts: &BatchOptions,
) -> Result<SyncSummary> {
    let corpus = corpus::scan(root)?;
    let mut summary = SyncSummary {
        schema_version: SCHEMA_VERSION,
        ..Default::default()
    };
    for group in &corpus.groups {
        let missing: Vec<Lang> = group.missing_langs().collect();
        if missing.is_empty() {
            continue;
        }
        let Some((&source_lang, source_path)) = group.files.iter().next() else {
            continue;
        };
        let source = match load_document(source_path) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::error!(path = %source_path.display(), error = %e, "cannot generate from source");
                summary.failed += 1;
                continue;
            }
        };
        for target_lang in missing {
            match sync_one_target(
                &source,
                group.address,
                &group.dir,
                source_lang,
                target_lang,
                translator,
                opts,
            ) {
                Ok(stat) => {
                    summary.succeeded += 1;
                    summary.files.push(stat);
                }
                Err(e) => {
                    tracing::error!(
                        address = %group.address,
                        target_lang = %target_lang,
                        error = %e,
                        "generation failed"
                    );
                    summary.failed += 1;
                }
            }
        }
    }
    Ok(summary)
}
