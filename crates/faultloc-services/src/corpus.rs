//! Recursive discovery of catalogue files under a root directory. Files are
//! grouped by (directory, address): one group holds all language variants of
//! the same node of the taxonomy.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use color_eyre::eyre::bail;
use faultloc_core::{decode, HierarchyAddress, Lang, Result};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct VariantGroup {
    pub dir: PathBuf,
    pub address: HierarchyAddress,
    /// One path per language that exists on disk, keyed in a fixed order so
    /// batch runs are deterministic.
    pub files: BTreeMap<Lang, PathBuf>,
}

impl VariantGroup {
    /// The languages this group still lacks.
    pub fn missing_langs(&self) -> impl Iterator<Item = Lang> + '_ {
        Lang::ALL.into_iter().filter(|l| !self.files.contains_key(l))
    }

    /// Path a variant of this group would have, whether or not it exists.
    pub fn path_for(&self, lang: Lang) -> PathBuf {
        self.dir.join(faultloc_core::encode(self.address, lang))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub groups: Vec<VariantGroup>,
}

impl Corpus {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Walk `root` and collect every file whose name decodes as a catalogue
/// identifier. Other files are ignored; directory order is normalized so the
/// resulting group list is stable across platforms.
pub fn scan(root: &Path) -> Result<Corpus> {
    if !root.is_dir() {
        bail!("scan root {} is not a directory", root.display());
    }
    let mut groups: BTreeMap<(PathBuf, HierarchyAddress), BTreeMap<Lang, PathBuf>> =
        BTreeMap::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        match decode(name) {
            Ok((address, lang)) => {
                let dir = entry.path().parent().unwrap_or(root).to_path_buf();
                groups
                    .entry((dir, address))
                    .or_default()
                    .insert(lang, entry.path().to_path_buf());
            }
            Err(e) => {
                if name.ends_with(".json") {
                    tracing::debug!(file = name, error = %e, "skipping non-catalogue file");
                }
            }
        }
    }
    Ok(Corpus {
        groups: groups
            .into_iter()
            .map(|((dir, address), files)| VariantGroup {
                dir,
                address,
                files,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn groups_variants_of_the_same_address() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("faults_000_255_255_255_fr.json"), "{}").unwrap();
        fs::write(dir.path().join("faults_000_255_255_255_en.json"), "{}").unwrap();
        fs::write(dir.path().join("faults_001_255_255_255_fr.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.json"), "{}").unwrap();
        fs::write(dir.path().join("readme.txt"), "").unwrap();

        let corpus = scan(dir.path()).unwrap();
        assert_eq!(corpus.len(), 2);
        let first = &corpus.groups[0];
        assert_eq!(first.address, HierarchyAddress::new([0, 255, 255, 255]));
        assert_eq!(first.files.len(), 2);
        assert!(first.files.contains_key(&Lang::Fr));
        assert_eq!(
            first.missing_langs().collect::<Vec<_>>(),
            vec![Lang::Es]
        );
    }

    #[test]
    fn same_address_in_different_directories_stays_separate() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("agv2");
        fs::create_dir(&sub).unwrap();
        fs::write(dir.path().join("faults_000_255_255_255_fr.json"), "{}").unwrap();
        fs::write(sub.join("faults_000_255_255_255_fr.json"), "{}").unwrap();

        let corpus = scan(dir.path()).unwrap();
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn missing_root_is_an_error() {
        assert!(scan(Path::new("/nonexistent/faultloc-root")).is_err());
    }
}
