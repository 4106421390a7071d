//! Corpus-wide coherence pass: structural agreement between the language
//! variants of each address, plus header metadata against the filename.

use std::path::Path;

use faultloc_coherence::compare;
use faultloc_core::{encode, HierarchyAddress, Lang, Result};
use faultloc_domain::{
    CoherenceIssue, CoherenceReport, Divergence, DivergenceKind, FaultDocument, SCHEMA_VERSION,
};
use serde_json::Value;

use crate::corpus::{self, VariantGroup};
use crate::io::load_document;

pub fn check_coherence(root: &Path) -> Result<CoherenceReport> {
    let corpus = corpus::scan(root)?;
    let mut report = CoherenceReport {
        schema_version: SCHEMA_VERSION,
        ..Default::default()
    };
    for group in &corpus.groups {
        report.groups_checked += 1;
        let label = group_label(root, group);

        let mut loaded: Vec<(Lang, FaultDocument)> = Vec::new();
        for (&lang, path) in &group.files {
            match load_document(path) {
                Ok(doc) => loaded.push((lang, doc)),
                Err(e) => {
                    // treated as absent for pairing; sync will recreate it
                    tracing::warn!(path = %path.display(), error = %e, "variant unreadable");
                }
            }
        }

        for (lang, doc) in &loaded {
            check_header(&label, group.address, *lang, doc, &mut report.issues);
        }

        let Some((ref_lang, ref_doc)) = loaded.first() else {
            continue;
        };
        let ref_view = comparable_view(ref_doc)?;
        for (lang, doc) in &loaded[1..] {
            let view = comparable_view(doc)?;
            for divergence in compare(&ref_view, &view) {
                report.issues.push(CoherenceIssue {
                    group: label.clone(),
                    left_lang: ref_lang.to_string(),
                    right_lang: lang.to_string(),
                    divergence,
                });
            }
        }
    }
    Ok(report)
}

fn group_label(root: &Path, group: &VariantGroup) -> String {
    let rel = group.dir.strip_prefix(root).unwrap_or(&group.dir);
    if rel.as_os_str().is_empty() {
        group.address.to_string()
    } else {
        format!("{}/{}", rel.display(), group.address)
    }
}

/// Header fields are checked against the filename, not across variants:
/// `Header.Language` and `Header.FileName` differ between variants by
/// construction.
fn check_header(
    label: &str,
    addr: HierarchyAddress,
    lang: Lang,
    doc: &FaultDocument,
    issues: &mut Vec<CoherenceIssue>,
) {
    let mut push = |path: &str, kind, detail: String| {
        issues.push(CoherenceIssue {
            group: label.to_string(),
            left_lang: lang.to_string(),
            right_lang: lang.to_string(),
            divergence: Divergence {
                path: path.to_string(),
                kind,
                side: None,
                detail,
            },
        });
    };
    if doc.header.language.as_deref() != Some(lang.as_str()) {
        push(
            "Header.Language",
            DivergenceKind::HeaderLanguage,
            format!(
                "declares {:?}, filename says {lang}",
                doc.header.language.as_deref().unwrap_or("")
            ),
        );
    }
    let canonical = encode(addr, lang);
    if doc.header.file_name.as_deref() != Some(canonical.as_str()) {
        push(
            "Header.FileName",
            DivergenceKind::HeaderFileName,
            format!(
                "declares {:?}, expected {canonical:?}",
                doc.header.file_name.as_deref().unwrap_or("")
            ),
        );
    }
}

/// Serialize a document for the structural diff, dropping the fields that
/// legitimately differ per variant (they are validated by [`check_header`]).
fn comparable_view(doc: &FaultDocument) -> Result<Value> {
    let mut value = serde_json::to_value(doc)?;
    if let Some(header) = value.get_mut("Header").and_then(Value::as_object_mut) {
        header.remove("Language");
        header.remove("FileName");
    }
    if let Some(top) = value.as_object_mut() {
        top.remove("Language");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn write_doc(dir: &Path, name: &str, value: serde_json::Value) {
        fs::write(dir.join(name), serde_json::to_string(&value).unwrap()).unwrap();
    }

    #[test]
    fn aligned_variants_are_clean() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(
            dir.path(),
            "faults_000_255_255_255_fr.json",
            json!({
                "Header": {"Language": "fr", "FileName": "faults_000_255_255_255_fr.json"},
                "FaultDetailList": [{"Id": 1, "Description": "arrêt d'urgence", "IsExpandable": false}]
            }),
        );
        write_doc(
            dir.path(),
            "faults_000_255_255_255_en.json",
            json!({
                "Header": {"Language": "en", "FileName": "faults_000_255_255_255_en.json"},
                "FaultDetailList": [{"Id": 1, "Description": "emergency stop", "IsExpandable": false}]
            }),
        );

        let report = check_coherence(dir.path()).unwrap();
        assert_eq!(report.groups_checked, 1);
        assert!(report.issues.is_empty(), "{:?}", report.issues);
    }

    #[test]
    fn extra_entry_is_a_length_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(
            dir.path(),
            "faults_000_255_255_255_fr.json",
            json!({
                "Header": {"Language": "fr", "FileName": "faults_000_255_255_255_fr.json"},
                "FaultDetailList": [{"Id": 1, "Description": "a", "IsExpandable": false}]
            }),
        );
        write_doc(
            dir.path(),
            "faults_000_255_255_255_en.json",
            json!({
                "Header": {"Language": "en", "FileName": "faults_000_255_255_255_en.json"},
                "FaultDetailList": [
                    {"Id": 1, "Description": "a", "IsExpandable": false},
                    {"Id": 2, "Description": "b", "IsExpandable": false}
                ]
            }),
        );

        let report = check_coherence(dir.path()).unwrap();
        assert!(report
            .issues
            .iter()
            .any(|i| i.divergence.kind == DivergenceKind::LengthMismatch));
        assert!(report
            .issues
            .iter()
            .any(|i| i.divergence.kind == DivergenceKind::UnalignedEntry));
    }

    #[test]
    fn header_is_checked_against_the_filename() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(
            dir.path(),
            "faults_001_255_255_255_en.json",
            json!({
                "Header": {"Language": "fr", "FileName": "faults_001_255_255_255_fr.json"},
                "FaultDetailList": []
            }),
        );

        let report = check_coherence(dir.path()).unwrap();
        let kinds: Vec<_> = report.issues.iter().map(|i| i.divergence.kind).collect();
        assert!(kinds.contains(&DivergenceKind::HeaderLanguage));
        assert!(kinds.contains(&DivergenceKind::HeaderFileName));
    }

    #[test]
    fn header_fields_do_not_leak_into_the_structural_diff() {
        // two perfectly healthy variants only differ in Header.Language,
        // Header.FileName and the legacy top-level Language field
        let dir = tempfile::tempdir().unwrap();
        write_doc(
            dir.path(),
            "faults_002_255_255_255_fr.json",
            json!({
                "Header": {"Language": "fr", "FileName": "faults_002_255_255_255_fr.json"},
                "Language": "fr",
                "FaultDetailList": []
            }),
        );
        write_doc(
            dir.path(),
            "faults_002_255_255_255_es.json",
            json!({
                "Header": {"Language": "es", "FileName": "faults_002_255_255_255_es.json"},
                "Language": "es",
                "FaultDetailList": []
            }),
        );

        let report = check_coherence(dir.path()).unwrap();
        assert!(report.issues.is_empty(), "{:?}", report.issues);
    }
}
