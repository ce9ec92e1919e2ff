//! Recursive structural comparison

use super::types::{DiffRecord, DiffSet};
use crate::decode::decode_payload;
use crate::error::{Error, Result};
use crate::path::JsonPath;
use crate::types::{JsonObject, JsonValue};
use std::collections::BTreeSet;
use std::ops::ControlFlow;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Structural comparer for decoded documents.
///
/// Never fails: two equal documents produce an empty set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Comparer;

/// Recursion state for one comparison
struct Walk<'a> {
    diffs: DiffSet,
    cancel: Option<&'a CancellationToken>,
}

impl Walk<'_> {
    fn checkpoint(&self) -> ControlFlow<()> {
        match self.cancel {
            Some(token) if token.is_cancelled() => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }
}

impl Comparer {
    /// Create a comparer
    pub fn new() -> Self {
        Self
    }

    /// Compare two decoded documents
    pub fn compare(&self, left: &JsonValue, right: &JsonValue) -> DiffSet {
        let mut walk = Walk {
            diffs: DiffSet::new(),
            cancel: None,
        };
        // without a token the walk never breaks
        let _ = self.compare_values(left, right, &JsonPath::root(), &mut walk);
        debug!(diffs = walk.diffs.len(), "Compared documents");
        walk.diffs
    }

    /// Compare two decoded documents, stopping with `Error::Cancelled` as
    /// soon as `cancel` fires
    pub fn compare_until(
        &self,
        left: &JsonValue,
        right: &JsonValue,
        cancel: &CancellationToken,
    ) -> Result<DiffSet> {
        let mut walk = Walk {
            diffs: DiffSet::new(),
            cancel: Some(cancel),
        };
        match self.compare_values(left, right, &JsonPath::root(), &mut walk) {
            ControlFlow::Continue(()) => {
                debug!(diffs = walk.diffs.len(), "Compared documents");
                Ok(walk.diffs)
            }
            ControlFlow::Break(()) => {
                debug!(partial = walk.diffs.len(), "Comparison cancelled");
                Err(Error::Cancelled)
            }
        }
    }

    /// Decode two raw payloads and compare them
    pub fn compare_bytes(&self, left: &[u8], right: &[u8]) -> Result<DiffSet> {
        let left = decode_payload(left)?;
        let right = decode_payload(right)?;
        Ok(self.compare(&left, &right))
    }

    fn compare_values(
        &self,
        left: &JsonValue,
        right: &JsonValue,
        path: &JsonPath,
        walk: &mut Walk<'_>,
    ) -> ControlFlow<()> {
        walk.checkpoint()?;
        if left == right {
            return ControlFlow::Continue(());
        }

        match (left, right) {
            (JsonValue::Object(l), JsonValue::Object(r)) => self.compare_maps(l, r, path, walk),
            (JsonValue::Array(l), JsonValue::Array(r)) => self.compare_arrays(l, r, path, walk),
            _ => {
                walk.diffs.store_one_sided(path, Some(left), Some(right));
                ControlFlow::Continue(())
            }
        }
    }

    fn compare_maps(
        &self,
        left: &JsonObject,
        right: &JsonObject,
        path: &JsonPath,
        walk: &mut Walk<'_>,
    ) -> ControlFlow<()> {
        let mut keys: BTreeSet<&String> = left.keys().collect();
        keys.extend(right.keys());

        for key in keys {
            let child = path.child_key(key.as_str());
            match (left.get(key), right.get(key)) {
                (Some(l), Some(r)) => self.compare_values(l, r, &child, walk)?,
                (l, r) => {
                    walk.diffs.store_one_sided(&child, l, r);
                }
            }
        }
        ControlFlow::Continue(())
    }

    fn compare_arrays(
        &self,
        left: &[JsonValue],
        right: &[JsonValue],
        path: &JsonPath,
        walk: &mut Walk<'_>,
    ) -> ControlFlow<()> {
        let Some(first) = left.first() else {
            walk.diffs.store(bulk_record(path, left, right));
            return ControlFlow::Continue(());
        };
        if right.is_empty() {
            walk.diffs.store(bulk_record(path, left, right));
            return ControlFlow::Continue(());
        }

        match first {
            JsonValue::Object(_) | JsonValue::Array(_) => {
                // trailing elements of the longer side are not compared
                for (index, (l, r)) in left.iter().zip(right).enumerate() {
                    self.compare_values(l, r, &path.child_index(index), walk)?;
                }
                ControlFlow::Continue(())
            }
            _ => {
                self.compare_sets(left, right, path, walk);
                ControlFlow::Continue(())
            }
        }
    }

    fn compare_sets(&self, left: &[JsonValue], right: &[JsonValue], path: &JsonPath, walk: &mut Walk<'_>) {
        let left_texts: BTreeSet<String> = left.iter().map(JsonValue::to_string).collect();
        let right_texts: BTreeSet<String> = right.iter().map(JsonValue::to_string).collect();

        let mut reported = BTreeSet::new();
        for value in left {
            let text = value.to_string();
            if !right_texts.contains(&text) && reported.insert(text) {
                walk.diffs.store_one_sided(&path.child_member(value), Some(value), None);
            }
        }
        for value in right {
            let text = value.to_string();
            if !left_texts.contains(&text) && reported.insert(text) {
                walk.diffs.store_one_sided(&path.child_member(value), None, Some(value));
            }
        }
    }
}

/// One record for an array compared against an empty one. The empty side
/// renders as "" but keeps its typed value.
fn bulk_record(path: &JsonPath, left: &[JsonValue], right: &[JsonValue]) -> DiffRecord {
    let side = |items: &[JsonValue]| (!items.is_empty()).then(|| JsonValue::from(items.to_vec()));
    let mut record = DiffRecord::one_sided(path.clone(), side(left).as_ref(), side(right).as_ref());
    record.first = Some(JsonValue::from(left.to_vec()));
    record.last = Some(JsonValue::from(right.to_vec()));
    record
}

/// Compare two decoded documents
pub fn compare(left: &JsonValue, right: &JsonValue) -> DiffSet {
    Comparer::new().compare(left, right)
}
