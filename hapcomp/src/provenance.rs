//! Duplicate provenance maps: which original identifiers were collapsed into
//! a given representative.

use std::collections::BTreeMap;
use std::io::Write;

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;

use crate::dedup::EquivalenceClass;

const JSON_INDENT: &[u8] = b"    ";

/// Lookup from a representative's identifier to the identifiers of every
/// record its equivalence class collapsed, keyed by the zero-based position
/// of the record within the class (as a string). Entry `"0"` is always the
/// representative itself.
///
/// The map serializes to JSON with sorted keys and four-space indentation so
/// that its textual form is stable and diffable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProvenanceMap(BTreeMap<String, BTreeMap<String, String>>);

impl ProvenanceMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the provenance of given equivalence classes.
    ///
    /// Pure projection: every member identifier of every class appears
    /// exactly once, and no other data is recorded.
    ///
    /// # Examples
    /// ```
    /// use hapcomp::dedup::compress;
    /// use hapcomp::provenance::ProvenanceMap;
    /// use hapcomp::sequence::FastaSequence;
    ///
    /// let classes = compress(vec![
    ///     FastaSequence::new("A", "MKV"),
    ///     FastaSequence::new("B", "MKV"),
    /// ])
    /// .unwrap();
    ///
    /// let provenance = ProvenanceMap::from_classes(&classes);
    /// assert_eq!(provenance.members_of("A").unwrap(), ["A", "B"]);
    /// ```
    #[must_use]
    pub fn from_classes(classes: &[EquivalenceClass]) -> Self {
        let map = classes
            .iter()
            .map(|class| {
                let members: BTreeMap<String, String> = class
                    .members()
                    .iter()
                    .enumerate()
                    .map(|(index, member)| (index.to_string(), member.identifier().0.clone()))
                    .collect();

                (class.representative().identifier().0.clone(), members)
            })
            .collect();

        Self(map)
    }

    /// Returns the number of representatives recorded in this map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the representative identifiers, in sorted order.
    pub fn representatives(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns the member identifiers collapsed into `representative`, in
    /// class order (index `"0"` first), or `None` for an unknown
    /// representative.
    #[must_use]
    pub fn members_of(&self, representative: &str) -> Option<Vec<&str>> {
        let members = self.0.get(representative)?;

        let mut indexed: Vec<(usize, &str)> = members
            .iter()
            .map(|(index, identifier)| {
                let index = index.parse().unwrap_or(usize::MAX);
                (index, identifier.as_str())
            })
            .collect();
        indexed.sort_by_key(|&(index, _)| index);

        Some(indexed.into_iter().map(|(_, identifier)| identifier).collect())
    }

    /// Serializes this map as indented JSON with sorted keys.
    pub fn to_json_writer<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        let formatter = PrettyFormatter::with_indent(JSON_INDENT);
        let mut serializer = Serializer::with_formatter(writer, formatter);
        self.serialize(&mut serializer)
    }

    /// Serializes this map as an indented JSON string with sorted keys.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        self.to_json_writer(&mut buf)?;

        Ok(String::from_utf8(buf).expect("serde_json emits valid UTF-8"))
    }
}
