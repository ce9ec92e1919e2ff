//! Folding chained diff sets into one report

use super::types::{DiffRecord, DiffSet};
use crate::error::Result;
use crate::types::JsonValue;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

impl DiffSet {
    /// Fold the A-vs-B diff set into this baseline-vs-A set.
    ///
    /// A path present in both keeps its first pair of texts and gains the
    /// second pair; it stays asserted only if the baseline value differs from
    /// the final one, compared as JSON values. A path only in `other` is
    /// added with its texts in the second pair and is asserted.
    pub fn combine(&mut self, other: DiffSet) {
        for (key, incoming) in other.records {
            match self.records.entry(key) {
                Entry::Occupied(mut entry) => {
                    let record = entry.get_mut();
                    record.a_basic = incoming.basic_log;
                    record.b_log = incoming.a_log;
                    record.last = incoming.last;
                    record.asserted = record.first != record.last;
                }
                Entry::Vacant(entry) => {
                    entry.insert(DiffRecord {
                        xpath: incoming.xpath,
                        basic_log: String::new(),
                        a_log: String::new(),
                        a_basic: incoming.basic_log,
                        b_log: incoming.a_log,
                        asserted: true,
                        first: incoming.first,
                        last: incoming.last,
                    });
                }
            }
        }
    }

    /// Asserted records as a JSON object keyed by path
    pub fn asserted_json(&self) -> Result<JsonValue> {
        let asserted: BTreeMap<&str, &DiffRecord> = self
            .records
            .iter()
            .filter(|(_, record)| record.asserted)
            .map(|(path, record)| (path.as_str(), record))
            .collect();
        Ok(serde_json::to_value(asserted)?)
    }

    /// Asserted records as indented JSON text
    pub fn serialize_asserted(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.asserted_json()?)?)
    }
}
