//! Document model for the fault catalogue plus the report types returned by
//! the service layer. Field names mirror the on-disk JSON exactly; unknown
//! fields are preserved through `extra` maps so a load/store round-trip never
//! loses editor metadata.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const SCHEMA_VERSION: u32 = 1;

/// Embedded metadata of a variant document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Header {
    #[serde(rename = "Language", default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(rename = "FileName", default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(rename = "IdLevel0", default, skip_serializing_if = "Option::is_none")]
    pub id_level0: Option<i64>,
    #[serde(rename = "IdLevel1", default, skip_serializing_if = "Option::is_none")]
    pub id_level1: Option<i64>,
    #[serde(rename = "IdLevel2", default, skip_serializing_if = "Option::is_none")]
    pub id_level2: Option<i64>,
    #[serde(rename = "IdLevel3", default, skip_serializing_if = "Option::is_none")]
    pub id_level3: Option<i64>,
    /// Display metadata the editor may store (titles, timestamps, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One fault line. `Description` is the only field that may differ across
/// language variants; everything else is ground truth copied from the source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FaultEntry {
    #[serde(rename = "Id", default)]
    pub id: i64,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "IsExpandable", default)]
    pub is_expandable: bool,
    #[serde(rename = "CategoryId", default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(rename = "SubCategoryId", default, skip_serializing_if = "Option::is_none")]
    pub sub_category_id: Option<i64>,
    #[serde(rename = "FaultId", default, skip_serializing_if = "Option::is_none")]
    pub fault_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FaultEntry {
    /// Copy every non-text field from `source`, leaving `description` alone.
    pub fn copy_fixed_fields_from(&mut self, source: &FaultEntry) -> bool {
        let before = (
            self.id,
            self.is_expandable,
            self.category_id,
            self.sub_category_id,
            self.fault_id,
            self.extra.clone(),
        );
        self.id = source.id;
        self.is_expandable = source.is_expandable;
        self.category_id = source.category_id;
        self.sub_category_id = source.sub_category_id;
        self.fault_id = source.fault_id;
        self.extra = source.extra.clone();
        before
            != (
                self.id,
                self.is_expandable,
                self.category_id,
                self.sub_category_id,
                self.fault_id,
                self.extra.clone(),
            )
    }
}

/// The file identified by one (address, language) pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FaultDocument {
    #[serde(rename = "Header", default)]
    pub header: Header,
    #[serde(rename = "FaultDetailList", default)]
    pub fault_detail_list: Vec<FaultEntry>,
    /// Top-level fields shared verbatim across variants (`LinkedVariable`,
    /// `Version`) plus the legacy redundant `Language` some old files carry.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Report DTOs (string-typed on purpose: stable output surface for CLI/JSON)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn flipped(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DivergenceKind {
    MissingKey,
    LengthMismatch,
    TypeMismatch,
    ValueMismatch,
    EmptinessMismatch,
    HeaderLanguage,
    HeaderFileName,
    UnalignedEntry,
}

/// One structural difference between two variants of the same address.
/// Natural-language text is never compared, so every divergence is a real
/// corpus defect, not a translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Divergence {
    pub path: String,
    pub kind: DivergenceKind,
    /// Which document the finding points at, when directional
    /// (e.g. the side a key is missing from).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CoherenceIssue {
    pub group: String,
    pub left_lang: String,
    pub right_lang: String,
    pub divergence: Divergence,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CoherenceReport {
    pub schema_version: u32,
    pub groups_checked: usize,
    pub issues: Vec<CoherenceIssue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SyncFileStat {
    pub path: String,
    pub target_lang: String,
    pub created: bool,
    pub changes: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SyncSummary {
    pub schema_version: u32,
    pub succeeded: usize,
    pub failed: usize,
    pub files: Vec<SyncFileStat>,
}

impl SyncSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// A (address, language) combination that exists in some languages but not
/// this one; `source_file` is the document generation will translate from.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MissingVariant {
    pub address: String,
    pub source_file: String,
    pub source_lang: String,
    pub target_lang: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HeaderFixStat {
    pub path: String,
    pub changed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct HeaderFixReport {
    pub schema_version: u32,
    pub checked: usize,
    pub fixed: usize,
    pub failed: usize,
    pub files: Vec<HeaderFixStat>,
}
