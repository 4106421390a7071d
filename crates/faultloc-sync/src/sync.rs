use std::collections::{HashMap, VecDeque};

use faultloc_core::Lang;
use faultloc_domain::{FaultDocument, FaultEntry};
use faultloc_translate::Translator;

use crate::{guess_lang, is_technical_code};

/// How source and target entries are matched up.
///
/// `ById` is the default: the `Id` field is a stable identifier, so a manual
/// reorder or an out-of-band insertion in one variant no longer misaligns
/// every following entry. `Positional` is the legacy behavior, kept for
/// corpora that predate stable ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignMode {
    #[default]
    ById,
    Positional,
}

#[derive(Debug, Clone, Copy)]
pub struct SyncOptions {
    pub force_retranslate: bool,
    pub align: AlignMode,
    /// Retranslate existing target text when it does not look like the
    /// target language.
    pub check_target_lang: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        SyncOptions {
            force_retranslate: false,
            align: AlignMode::ById,
            check_target_lang: true,
        }
    }
}

/// Merge `source` into `target` and return the number of field overwrites.
///
/// The target list is never truncated: entries beyond the source's length may
/// be legitimate future content and are carried over untouched. A translation
/// failure for one entry keeps the previous text and moves on.
pub fn synchronize(
    source: &FaultDocument,
    target: &mut FaultDocument,
    source_lang: Lang,
    target_lang: Lang,
    translator: &dyn Translator,
    opts: &SyncOptions,
) -> usize {
    let ids_before: Vec<i64> = target.fault_detail_list.iter().map(|e| e.id).collect();
    let aligned = match opts.align {
        AlignMode::ById => align_by_id(
            &source.fault_detail_list,
            std::mem::take(&mut target.fault_detail_list),
        ),
        AlignMode::Positional => align_positional(
            source.fault_detail_list.len(),
            std::mem::take(&mut target.fault_detail_list),
        ),
    };

    let mut changes = 0usize;
    // A pure reorder leaves every field untouched, but the new order still has
    // to reach the file on disk.
    if aligned.iter().map(|e| e.id).ne(ids_before.iter().copied()) {
        changes += 1;
    }
    target.fault_detail_list = aligned;
    for (i, src) in source.fault_detail_list.iter().enumerate() {
        let entry = &mut target.fault_detail_list[i];

        if entry.copy_fixed_fields_from(src) {
            changes += 1;
        }

        let src_desc = src.description.trim();
        if src_desc.is_empty() {
            // Not yet authored in the source; an existing target translation
            // must survive, even under force-retranslate.
            continue;
        }

        if is_technical_code(src_desc) {
            if entry.description != src.description {
                tracing::info!(
                    target_lang = %target_lang,
                    index = i,
                    old = %entry.description,
                    new = %src.description,
                    "correcting drifted technical code"
                );
                entry.description = src.description.clone();
                changes += 1;
            }
            continue;
        }

        let current = entry.description.trim().to_string();
        let mut should_translate = current.is_empty() || opts.force_retranslate;
        if !should_translate && opts.check_target_lang {
            if let Some(guessed) = guess_lang(&current) {
                should_translate = guessed != target_lang;
            }
        }
        if !should_translate {
            continue;
        }

        match translator.translate(src_desc, target_lang) {
            Ok(translated) => {
                let translated = translated.trim().to_string();
                if translated.to_lowercase() != current.to_lowercase() {
                    tracing::info!(
                        source_lang = %source_lang,
                        target_lang = %target_lang,
                        index = i,
                        "translated entry"
                    );
                    entry.description = translated;
                    changes += 1;
                }
            }
            Err(e) => {
                tracing::warn!(
                    target_lang = %target_lang,
                    index = i,
                    error = %e,
                    "translation failed, keeping previous text"
                );
            }
        }
    }

    changes
}

/// Legacy alignment: the list index is the correspondence. Pad the target up
/// to the source's length; extra target entries stay where they are.
fn align_positional(source_len: usize, mut target: Vec<FaultEntry>) -> Vec<FaultEntry> {
    while target.len() < source_len {
        target.push(FaultEntry::default());
    }
    target
}

/// Align target entries to source entries by `Id`. Target entries whose id
/// does not occur in the source keep their relative order after the aligned
/// block. Duplicate source ids defeat the purpose of id matching, so they
/// force a positional fallback.
fn align_by_id(source: &[FaultEntry], target: Vec<FaultEntry>) -> Vec<FaultEntry> {
    {
        let mut seen = std::collections::HashSet::new();
        if !source.iter().all(|e| seen.insert(e.id)) {
            tracing::warn!("duplicate ids in source list, falling back to positional alignment");
            return align_positional(source.len(), target);
        }
    }

    let mut by_id: HashMap<i64, VecDeque<usize>> = HashMap::new();
    for (i, entry) in target.iter().enumerate() {
        by_id.entry(entry.id).or_default().push_back(i);
    }

    let mut slots: Vec<Option<FaultEntry>> = target.into_iter().map(Some).collect();
    let mut aligned = Vec::with_capacity(source.len());
    for src in source {
        let taken = by_id
            .get_mut(&src.id)
            .and_then(|idxs| idxs.pop_front())
            .and_then(|i| slots[i].take());
        aligned.push(taken.unwrap_or_default());
    }
    for leftover in slots.into_iter().flatten() {
        tracing::warn!(
            id = leftover.id,
            "target entry has no counterpart in the source, keeping it at the tail"
        );
        aligned.push(leftover);
    }
    aligned
}
