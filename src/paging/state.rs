//! Accumulated page state and merge rules.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Reserved sub-collection name carrying aggregate statistics. Its single
/// record is replaced on each page instead of being extended.
pub const STATS_KEY: &str = "stats";

/// A named sub-collection accumulated across pages.
#[derive(Debug, Clone, PartialEq)]
pub enum SubCollection {
    /// Ordered item records, extended by concatenation in fetch order.
    Sequence(Vec<Value>),
    /// A single record. Only the `stats` key may collide across pages.
    Record(Value),
}

impl SubCollection {
    fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => SubCollection::Sequence(items),
            other => SubCollection::Record(other),
        }
    }
}

/// Everything fetched so far for one endpoint, keyed by sub-collection name.
///
/// Monotonic for the lifetime of its `PagedCollection`: merging only ever
/// appends to sequences or replaces the stats record.
#[derive(Debug, Default)]
pub struct AccumulatedState {
    collections: HashMap<String, SubCollection>,
}

impl AccumulatedState {
    /// Items of a sequence-shaped sub-collection; empty when the key is
    /// absent or record-shaped.
    pub fn sequence(&self, key: &str) -> &[Value] {
        match self.collections.get(key) {
            Some(SubCollection::Sequence(items)) => items,
            _ => &[],
        }
    }

    /// A record-shaped sub-collection, if present.
    pub fn record(&self, key: &str) -> Option<&Value> {
        match self.collections.get(key) {
            Some(SubCollection::Record(value)) => Some(value),
            _ => None,
        }
    }

    pub fn sequence_len(&self, key: &str) -> usize {
        self.sequence(key).len()
    }

    /// Merge one page's sub-collections. Empty values are skipped; shape and
    /// type collisions between pages are fatal.
    pub(crate) fn merge_page(&mut self, page: Map<String, Value>, endpoint: &str) -> Result<()> {
        for (key, value) in page {
            if value_is_empty(&value) {
                continue;
            }
            match self.collections.get_mut(&key) {
                None => {
                    self.collections.insert(key, SubCollection::from_value(value));
                }
                Some(existing) => merge_into(existing, &key, value, endpoint)?,
            }
        }
        Ok(())
    }
}

/// Merge one incoming sub-collection value into its accumulated slot.
fn merge_into(
    existing: &mut SubCollection,
    key: &str,
    incoming: Value,
    endpoint: &str,
) -> Result<()> {
    match (existing, incoming) {
        (SubCollection::Sequence(items), Value::Array(new_items)) => {
            items.extend(new_items);
            Ok(())
        }
        (SubCollection::Record(record), incoming)
            if key == STATS_KEY && !incoming.is_array() =>
        {
            *record = incoming;
            Ok(())
        }
        _ => Err(Error::MergeConflict {
            endpoint: endpoint.to_string(),
            key: key.to_string(),
        }),
    }
}

fn value_is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::String(s) => s.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(body: Value) -> Map<String, Value> {
        match body {
            Value::Object(map) => map,
            _ => unreachable!("test pages are objects"),
        }
    }

    #[test]
    fn sequences_are_concatenated_in_fetch_order() {
        let mut state = AccumulatedState::default();
        state
            .merge_page(page(json!({"posts": ["a", "b"]})), "timeline/1")
            .unwrap();
        state
            .merge_page(page(json!({"posts": ["c", "d"]})), "timeline/1")
            .unwrap();

        assert_eq!(
            state.sequence("posts"),
            [json!("a"), json!("b"), json!("c"), json!("d")]
        );
    }

    #[test]
    fn duplicates_are_kept() {
        let mut state = AccumulatedState::default();
        state
            .merge_page(page(json!({"posts": [{"id": "1"}]})), "timeline/1")
            .unwrap();
        state
            .merge_page(page(json!({"posts": [{"id": "1"}]})), "timeline/1")
            .unwrap();

        assert_eq!(state.sequence_len("posts"), 2);
    }

    #[test]
    fn stats_record_is_replaced_not_extended() {
        let mut state = AccumulatedState::default();
        state
            .merge_page(page(json!({"stats": {"total": 1}})), "subscriptions")
            .unwrap();
        state
            .merge_page(page(json!({"stats": {"total": 2}})), "subscriptions")
            .unwrap();

        assert_eq!(state.record("stats"), Some(&json!({"total": 2})));
    }

    #[test]
    fn empty_values_are_skipped() {
        let mut state = AccumulatedState::default();
        state
            .merge_page(
                page(json!({"posts": [], "accountMedia": null, "note": "", "flag": false})),
                "timeline/1",
            )
            .unwrap();

        assert_eq!(state.sequence_len("posts"), 0);
        assert!(state.record("note").is_none());
        assert!(state.record("flag").is_none());
    }

    #[test]
    fn shape_collision_is_fatal() {
        let mut state = AccumulatedState::default();
        state
            .merge_page(page(json!({"posts": [{"id": "1"}]})), "timeline/1")
            .unwrap();

        let err = state
            .merge_page(page(json!({"posts": {"id": "2"}})), "timeline/1")
            .unwrap_err();
        assert!(matches!(err, Error::MergeConflict { ref key, .. } if key == "posts"));
    }

    #[test]
    fn non_stats_record_collision_is_fatal() {
        let mut state = AccumulatedState::default();
        state
            .merge_page(page(json!({"meta": {"a": 1}})), "timeline/1")
            .unwrap();

        let err = state
            .merge_page(page(json!({"meta": {"a": 2}})), "timeline/1")
            .unwrap_err();
        assert!(matches!(err, Error::MergeConflict { ref key, .. } if key == "meta"));
    }
}
