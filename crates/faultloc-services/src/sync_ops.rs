//! Batch synchronization: one source document fans out to every other
//! language variant next to it.

use std::path::Path;

use color_eyre::eyre::{bail, eyre};
use faultloc_core::{HierarchyAddress, Lang, Result};
use faultloc_domain::{FaultDocument, SyncFileStat, SyncSummary, SCHEMA_VERSION};
use faultloc_sync::{normalize_header, synchronize, AlignMode, SyncOptions};
use faultloc_translate::Translator;

use crate::corpus;
use crate::io::{load_document, load_target, save_document};

#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    /// Language whose documents are treated as ground truth.
    pub source_lang: Lang,
    /// Retranslate targets even when they already carry text.
    pub force: bool,
    pub align: AlignMode,
    /// Keep a `.json.bak` of every file that gets replaced.
    pub backup: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        BatchOptions {
            source_lang: Lang::Fr,
            force: false,
            align: AlignMode::ById,
            backup: false,
        }
    }
}

impl BatchOptions {
    fn engine_options(&self) -> SyncOptions {
        SyncOptions {
            force_retranslate: self.force,
            align: self.align,
            check_target_lang: true,
        }
    }
}

/// Synchronize the siblings of a single source file. The source language is
/// taken from the filename, not from `opts`: pointing the command at an
/// English file translates out of English.
pub fn synchronize_file(
    source_path: &Path,
    translator: &dyn Translator,
    opts: &BatchOptions,
) -> Result<Vec<SyncFileStat>> {
    let name = source_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| eyre!("source path has no usable file name: {}", source_path.display()))?;
    let (addr, source_lang) = faultloc_core::decode(name)?;
    let source = load_document(source_path)?;
    let dir = source_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut stats = Vec::new();
    for target_lang in source_lang.others() {
        stats.push(sync_one_target(
            &source,
            addr,
            dir,
            source_lang,
            target_lang,
            translator,
            opts,
        )?);
    }
    Ok(stats)
}

/// Run [`synchronize_file`] for every source-language document under `root`.
/// A document that fails only fails itself; the batch keeps going.
pub fn synchronize_all(
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
        let Some(source_path) = group.files.get(&opts.source_lang) else {
            tracing::debug!(
                address = %group.address,
                dir = %group.dir.display(),
                "no {} source here, skipping",
                opts.source_lang
            );
            continue;
        };
        match synchronize_file(source_path, translator, opts) {
            Ok(stats) => {
                summary.succeeded += 1;
                summary.files.extend(stats);
            }
            Err(e) => {
                tracing::error!(path = %source_path.display(), error = %e, "sync failed");
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}

pub(crate) fn sync_one_target(
    source: &FaultDocument,
    addr: HierarchyAddress,
    dir: &Path,
    source_lang: Lang,
    target_lang: Lang,
    translator: &dyn Translator,
    opts: &BatchOptions,
) -> Result<SyncFileStat> {
    if source_lang == target_lang {
        bail!("source and target language are both {source_lang}");
    }
    let target_path = dir.join(faultloc_core::encode(addr, target_lang));
    let (mut target, created) = load_target(&target_path);

    let mut changes = synchronize(
        source,
        &mut target,
        source_lang,
        target_lang,
        translator,
        &opts.engine_options(),
    );
    if normalize_header(&mut target, addr, target_lang) {
        changes += 1;
    }

    if created || changes > 0 {
        save_document(&target_path, &target, opts.backup)?;
        tracing::info!(
            path = %target_path.display(),
            created,
            changes,
            "wrote target variant"
        );
    }
    Ok(SyncFileStat {
        path: target_path.display().to_string(),
        target_lang: target_lang.to_string(),
        created,
        changes,
    })
}
