use faultloc_core::{encode, HierarchyAddress, Lang};
use faultloc_domain::FaultDocument;

/// Make the document's embedded metadata agree with its actual address and
/// language. Idempotent: a second application changes nothing.
///
/// Fixes, in order: `Header.Language`, `Header.FileName`, the mirrored
/// `IdLevel0..3` fields (only when the document carries them at all), and the
/// legacy redundant top-level `Language` field, which is dropped.
pub fn normalize_header(doc: &mut FaultDocument, addr: HierarchyAddress, lang: Lang) -> bool {
    let mut changed = false;

    if doc.header.language.as_deref() != Some(lang.as_str()) {
        doc.header.language = Some(lang.as_str().to_string());
        changed = true;
    }

    let canonical = encode(addr, lang);
    if doc.header.file_name.as_deref() != Some(canonical.as_str()) {
        doc.header.file_name = Some(canonical);
        changed = true;
    }

    let has_level_ids = doc.header.id_level0.is_some()
        || doc.header.id_level1.is_some()
        || doc.header.id_level2.is_some()
        || doc.header.id_level3.is_some();
    if has_level_ids {
        let expected = addr.0.map(|c| Some(i64::from(c)));
        let current = [
            doc.header.id_level0,
            doc.header.id_level1,
            doc.header.id_level2,
            doc.header.id_level3,
        ];
        if current != expected {
            doc.header.id_level0 = expected[0];
            doc.header.id_level1 = expected[1];
            doc.header.id_level2 = expected[2];
            doc.header.id_level3 = expected[3];
            changed = true;
        }
    }

    if doc.extra.remove("Language").is_some() {
        changed = true;
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn addr() -> HierarchyAddress {
        HierarchyAddress::new([0, 3, 255, 255])
    }

    #[test]
    fn fixes_language_and_filename() {
        let mut doc: FaultDocument = serde_json::from_value(json!({
            "Header": {"Language": "fr", "FileName": "faults_000_003_255_255_fr.json"},
            "FaultDetailList": []
        }))
        .unwrap();
        assert!(normalize_header(&mut doc, addr(), Lang::En));
        assert_eq!(doc.header.language.as_deref(), Some("en"));
        assert_eq!(
            doc.header.file_name.as_deref(),
            Some("faults_000_003_255_255_en.json")
        );
    }

    #[test]
    fn corrects_level_ids_when_present() {
        let mut doc: FaultDocument = serde_json::from_value(json!({
            "Header": {
                "Language": "fr",
                "FileName": "faults_000_003_255_255_fr.json",
                "IdLevel0": 9, "IdLevel1": 9, "IdLevel2": 255, "IdLevel3": 255
            },
            "FaultDetailList": []
        }))
        .unwrap();
        assert!(normalize_header(&mut doc, addr(), Lang::Fr));
        assert_eq!(doc.header.id_level0, Some(0));
        assert_eq!(doc.header.id_level1, Some(3));
        assert_eq!(doc.header.id_level2, Some(255));
    }

    #[test]
    fn leaves_absent_level_ids_absent() {
        let mut doc = FaultDocument::default();
        normalize_header(&mut doc, addr(), Lang::Fr);
        assert_eq!(doc.header.id_level0, None);
    }

    #[test]
    fn drops_redundant_top_level_language() {
        let mut doc: FaultDocument = serde_json::from_value(json!({
            "Header": {"Language": "es", "FileName": "faults_000_003_255_255_es.json"},
            "Language": "es",
            "FaultDetailList": []
        }))
        .unwrap();
        assert!(normalize_header(&mut doc, addr(), Lang::Es));
        assert!(!doc.extra.contains_key("Language"));
    }

    #[test]
    fn idempotent() {
        let mut doc: FaultDocument = serde_json::from_value(json!({
            "Header": {"Language": "en", "FileName": "wrong.json", "IdLevel0": 1},
            "Language": "en",
            "FaultDetailList": []
        }))
        .unwrap();
        assert!(normalize_header(&mut doc, addr(), Lang::En));
        assert!(!normalize_header(&mut doc, addr(), Lang::En));
    }
}
