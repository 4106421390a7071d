use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Workspace-wide result alias.
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Fixed prefix of every catalogue file.
pub const FILE_PREFIX: &str = "faults";

/// Sentinel meaning "not specialized at this level".
pub const UNSPECIALIZED: u8 = 255;

/// Languages supported by the catalogue. The set is fixed: every address that
/// exists in one language is expected to exist in all of them after a full
/// sync pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Fr,
    En,
    Es,
}

impl Lang {
    pub const ALL: [Lang; 3] = [Lang::Fr, Lang::En, Lang::Es];

    pub fn as_str(self) -> &'static str {
        match self {
            Lang::Fr => "fr",
            Lang::En => "en",
            Lang::Es => "es",
        }
    }

    /// The other supported languages, sync targets for a document in `self`.
    pub fn others(self) -> impl Iterator<Item = Lang> {
        Lang::ALL.into_iter().filter(move |l| *l != self)
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lang {
    type Err = MalformedIdentifier;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "fr" => Ok(Lang::Fr),
            "en" => Ok(Lang::En),
            "es" => Ok(Lang::Es),
            other => Err(MalformedIdentifier::UnknownLanguage(other.to_string())),
        }
    }
}

/// 4-level path into the fault taxonomy. 255 components mark the levels that
/// are not specialized yet; `[0, 255, 255, 255]` is the root group 0 itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HierarchyAddress(pub [u8; 4]);

impl HierarchyAddress {
    pub fn new(levels: [u8; 4]) -> Self {
        HierarchyAddress(levels)
    }

    /// Depth of the address: number of leading specialized levels.
    pub fn depth(&self) -> usize {
        self.0.iter().take_while(|&&c| c != UNSPECIALIZED).count()
    }

    /// `self` is an ancestor of `other` when its unspecialized tail starts at
    /// some level `k`, both agree on `[0, k)`, and `other` specializes level `k`.
    pub fn is_ancestor_of(&self, other: &HierarchyAddress) -> bool {
        let k = self.depth();
        if k == 4 || other.depth() <= k {
            return false;
        }
        self.0[..k] == other.0[..k]
    }
}

impl fmt::Display for HierarchyAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:03}_{:03}_{:03}_{:03}",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

/// Filename shape errors. Anything that does not look like
/// `faults_AAA_BBB_CCC_DDD_<lang>.json` decodes to one of these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedIdentifier {
    #[error("identifier does not match faults_AAA_BBB_CCC_DDD_<lang>.json: {0}")]
    BadShape(String),
    #[error("address segment is not a 3-digit number: {0}")]
    BadSegment(String),
    #[error("unknown language suffix: {0}")]
    UnknownLanguage(String),
}

/// Canonical filename for an (address, language) pair.
pub fn encode(addr: HierarchyAddress, lang: Lang) -> String {
    format!("{FILE_PREFIX}_{addr}_{lang}.json")
}

/// Exact inverse of [`encode`].
pub fn decode(name: &str) -> std::result::Result<(HierarchyAddress, Lang), MalformedIdentifier> {
    let stem = name
        .strip_suffix(".json")
        .ok_or_else(|| MalformedIdentifier::BadShape(name.to_string()))?;
    let mut parts = stem.split('_');
    if parts.next() != Some(FILE_PREFIX) {
        return Err(MalformedIdentifier::BadShape(name.to_string()));
    }
    let mut levels = [0u8; 4];
    for slot in &mut levels {
        let seg = parts
            .next()
            .ok_or_else(|| MalformedIdentifier::BadShape(name.to_string()))?;
        if seg.len() != 3 || !seg.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MalformedIdentifier::BadSegment(seg.to_string()));
        }
        *slot = seg
            .parse::<u16>()
            .ok()
            .and_then(|v| u8::try_from(v).ok())
            .ok_or_else(|| MalformedIdentifier::BadSegment(seg.to_string()))?;
    }
    let lang = parts
        .next()
        .ok_or_else(|| MalformedIdentifier::BadShape(name.to_string()))?
        .parse::<Lang>()?;
    if parts.next().is_some() {
        return Err(MalformedIdentifier::BadShape(name.to_string()));
    }
    Ok((HierarchyAddress::new(levels), lang))
}
