//! Grouping of export file names into logical tables
//!
//! Dataset exports are split across many numbered files named
//! `<table>-<n>.json`. Grouping reassembles the flat name listing into
//! one ordered group per table. Names that do not follow the convention
//! are dropped, not collected into a default group.

use std::collections::HashMap;

use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Names grouped by table, in first-occurrence order.
///
/// Each name belongs to at most one group; within a group, names keep
/// their input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedNames {
    order: Vec<String>,
    groups: HashMap<String, Vec<String>>,
}

impl GroupedNames {
    /// Append a name to its group, creating the group on first use
    fn push(&mut self, key: &str, name: &str) {
        match self.groups.get_mut(key) {
            Some(names) => names.push(name.to_string()),
            None => {
                self.order.push(key.to_string());
                self.groups.insert(key.to_string(), vec![name.to_string()]);
            }
        }
    }

    /// Names in the given group, in input order
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.groups.get(key).map(|names| names.as_slice())
    }

    /// Group keys in first-occurrence order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|k| k.as_str())
    }

    /// Iterate groups in first-occurrence order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.keys().map(|k| (k, self.groups[k].as_slice()))
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no name matched the convention
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Serialize for GroupedNames {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Serialize as a map in group order, not HashMap order
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, names) in self.iter() {
            map.serialize_entry(key, names)?;
        }
        map.end()
    }
}

/// Partition object names into per-table groups.
///
/// A name is eligible only if it ends with the literal `.json` suffix.
/// Eligible names are matched against `<table>-<digits>.json`
/// (case-insensitive); the table part becomes the group key. Names not
/// matching this exact shape are silently excluded.
pub fn group_json<I, S>(names: I) -> GroupedNames
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let pattern = Regex::new(r"(?is)^(.*)-\d+\.json$").expect("valid regex");

    let mut result = GroupedNames::default();
    for name in names {
        let name = name.as_ref();
        if !name.ends_with(".json") {
            continue;
        }
        if let Some(captures) = pattern.captures(name) {
            result.push(&captures[1], name);
        }
    }
    result
}
