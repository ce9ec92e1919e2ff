//! Diff records

use crate::error::Result;
use crate::path::JsonPath;
use crate::types::{render_value, JsonValue};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

/// One divergence, with the texts observed on each side.
///
/// The first pair of slots holds a baseline-vs-A comparison, the second
/// pair an A-vs-B comparison. An absent side is the empty string. The
/// text slots are for display; the typed values of the first and last
/// documents decide `asserted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRecord {
    /// Location of the divergence
    pub xpath: JsonPath,

    /// Left side of the first comparison
    #[serde(rename = "basiclog")]
    pub basic_log: String,

    /// Right side of the first comparison
    #[serde(rename = "alog")]
    pub a_log: String,

    /// Left side of the chained comparison
    #[serde(rename = "abasic", skip_serializing_if = "String::is_empty")]
    pub a_basic: String,

    /// Right side of the chained comparison
    #[serde(rename = "blog", skip_serializing_if = "String::is_empty")]
    pub b_log: String,

    /// Baseline and final document diverge here
    #[serde(skip)]
    pub asserted: bool,

    /// Value in the first document, `None` when absent
    #[serde(skip)]
    pub(crate) first: Option<JsonValue>,

    /// Value in the last document seen so far, `None` when absent
    #[serde(skip)]
    pub(crate) last: Option<JsonValue>,
}

impl DiffRecord {
    /// Record from a single comparison; an absent side renders as ""
    pub fn one_sided(xpath: JsonPath, left: Option<&JsonValue>, right: Option<&JsonValue>) -> Self {
        Self {
            xpath,
            basic_log: left.map(render_value).unwrap_or_default(),
            a_log: right.map(render_value).unwrap_or_default(),
            a_basic: String::new(),
            b_log: String::new(),
            asserted: true,
            first: left.cloned(),
            last: right.cloned(),
        }
    }

    /// Value in the first document
    pub fn first_value(&self) -> Option<&JsonValue> {
        self.first.as_ref()
    }

    /// Value in the last document seen so far
    pub fn last_value(&self) -> Option<&JsonValue> {
        self.last.as_ref()
    }
}

/// Diffs keyed by canonical path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DiffSet {
    pub(super) records: BTreeMap<String, DiffRecord>,
}

impl DiffSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a divergence from a single comparison.
    ///
    /// A record already stored under the same canonical path wins; the new
    /// one is dropped and `false` is returned.
    pub fn store_one_sided(
        &mut self,
        xpath: &JsonPath,
        left: Option<&JsonValue>,
        right: Option<&JsonValue>,
    ) -> bool {
        self.store(DiffRecord::one_sided(xpath.clone(), left, right))
    }

    pub(crate) fn store(&mut self, record: DiffRecord) -> bool {
        let key = record.xpath.canonical();
        if self.records.contains_key(&key) {
            warn!(path = %key, "Duplicate diff path, dropping later record");
            return false;
        }
        self.records.insert(key, record);
        true
    }

    /// Records in canonical path order
    pub fn records(&self) -> impl Iterator<Item = &DiffRecord> {
        self.records.values()
    }

    /// Records whose divergence persists end to end
    pub fn asserted(&self) -> impl Iterator<Item = &DiffRecord> {
        self.records.values().filter(|record| record.asserted)
    }

    /// Record at a canonical path
    pub fn get(&self, path: &str) -> Option<&DiffRecord> {
        self.records.get(path)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records as a JSON object keyed by path
    pub fn to_json(&self) -> Result<JsonValue> {
        Ok(serde_json::to_value(self)?)
    }
}
