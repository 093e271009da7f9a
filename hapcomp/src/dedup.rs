//! The duplicate compression engine: partitions a sequence set into
//! equivalence classes by exact residue identity.

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use log::debug;

use crate::sequence::{FastaSequence, Residues, SequenceIdentifier};

/// Error occurring while compressing a sequence set.
#[derive(Debug)]
pub enum DedupError {
    /// A record has no residue content, so it has no usable sequence value.
    EmptySequence(SequenceIdentifier),
    /// The same identifier appears on records with differing residue
    /// content, which would make the duplicate provenance ambiguous.
    DuplicateIdentifier(SequenceIdentifier),
}

impl Display for DedupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DedupError::EmptySequence(identifier) => {
                write!(f, "Record `{}` has no residue content", identifier)
            }
            DedupError::DuplicateIdentifier(identifier) => {
                write!(
                    f,
                    "Identifier `{}` appears on records with differing residue content",
                    identifier
                )
            }
        }
    }
}

impl Error for DedupError {}

/// The result of a sequence set compression operation.
pub type DedupResult<T> = Result<T, DedupError>;

/// A non-empty group of records sharing one residue value.
///
/// Member order is the input order of the owning records; the first member is
/// the representative retained in compressed output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquivalenceClass {
    members: Vec<FastaSequence>,
}

impl EquivalenceClass {
    pub(crate) fn new(members: Vec<FastaSequence>) -> Self {
        debug_assert!(!members.is_empty());

        Self { members }
    }

    /// Returns the record retained in output for this class.
    #[must_use]
    pub fn representative(&self) -> &FastaSequence {
        &self.members[0]
    }

    /// Returns all records of this class, representative first.
    #[must_use]
    pub fn members(&self) -> &[FastaSequence] {
        &self.members
    }

    /// Returns the residue value shared by every member of this class.
    #[must_use]
    pub fn residues(&self) -> &Residues {
        self.members[0].residues()
    }

    /// Returns the number of records collapsed into this class.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`: a class owns at least its representative.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Consumes the class and returns its representative.
    #[must_use]
    pub fn into_representative(mut self) -> FastaSequence {
        self.members.swap_remove(0)
    }
}

/// Partitions `records` into equivalence classes by exact residue identity.
///
/// The records are stable-sorted by residue content and each run of equal
/// values becomes one [`EquivalenceClass`], so within a class the input order
/// is preserved and the first-seen record is the representative. The returned
/// classes are ordered by residue content; together they contain every input
/// record exactly once.
///
/// # Examples
/// ```
/// use hapcomp::dedup::compress;
/// use hapcomp::sequence::FastaSequence;
///
/// let records = vec![
///     FastaSequence::new("A", "MKV"),
///     FastaSequence::new("B", "MKV"),
///     FastaSequence::new("C", "MKT"),
/// ];
///
/// let classes = compress(records).unwrap();
/// assert_eq!(classes.len(), 2);
/// assert_eq!(classes[0].representative().identifier().str(), "C");
/// assert_eq!(classes[1].representative().identifier().str(), "A");
/// ```
pub fn compress(mut records: Vec<FastaSequence>) -> DedupResult<Vec<EquivalenceClass>> {
    validate(&records)?;

    let record_num = records.len();
    records.sort_by(|a, b| a.residues().cmp(b.residues()));

    let groups = records.into_iter().group_by(|rec| rec.residues().clone());
    let mut classes = Vec::new();
    for (_, group) in &groups {
        classes.push(EquivalenceClass::new(group.collect()));
    }

    debug!(
        "Compressed {} records into {} equivalence classes",
        record_num,
        classes.len()
    );

    Ok(classes)
}

fn validate(records: &[FastaSequence]) -> DedupResult<()> {
    let mut seen: HashMap<&str, &Residues> = HashMap::with_capacity(records.len());

    for record in records {
        if record.is_empty() {
            return Err(DedupError::EmptySequence(record.identifier().clone()));
        }

        if let Some(&residues) = seen.get(record.identifier().str()) {
            if residues != record.residues() {
                return Err(DedupError::DuplicateIdentifier(record.identifier().clone()));
            }
        } else {
            seen.insert(record.identifier().str(), record.residues());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use itertools::Itertools;

    use crate::dedup::{compress, DedupError};
    use crate::sequence::FastaSequence;

    fn records(pairs: &[(&str, &str)]) -> Vec<FastaSequence> {
        pairs
            .iter()
            .map(|&(identifier, residues)| FastaSequence::new(identifier, residues))
            .collect_vec()
    }

    #[test]
    fn compress_groups_equal_residues() {
        let classes = compress(records(&[("A", "MKV"), ("B", "MKV"), ("C", "MKT")])).unwrap();

        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].len(), 1);
        assert_eq!(classes[0].representative().identifier().str(), "C");
        assert_eq!(classes[1].len(), 2);
        assert_eq!(classes[1].representative().identifier().str(), "A");
    }

    #[test]
    fn compress_preserves_input_order_within_class() {
        let classes = compress(records(&[
            ("Z", "ACT"),
            ("M", "ACT"),
            ("A", "ACT"),
        ]))
        .unwrap();

        assert_eq!(classes.len(), 1);
        let identifiers: Vec<&str> = classes[0]
            .members()
            .iter()
            .map(|rec| rec.identifier().str())
            .collect();
        assert_eq!(identifiers, ["Z", "M", "A"]);
    }

    #[test]
    fn compress_partitions_input_exactly() {
        let input = records(&[
            ("A", "MKV"),
            ("B", "MKT"),
            ("C", "MKV"),
            ("D", "MLL"),
            ("E", "MKT"),
        ]);
        let input_set: HashSet<FastaSequence> = input.iter().cloned().collect();

        let classes = compress(input.clone()).unwrap();

        let output: Vec<FastaSequence> = classes
            .iter()
            .flat_map(|class| class.members().iter().cloned())
            .collect();
        assert_eq!(output.len(), input.len());
        let output_set: HashSet<FastaSequence> = output.into_iter().collect();
        assert_eq!(output_set, input_set);
    }

    #[test]
    fn compress_returns_classes_in_residue_order() {
        let classes = compress(records(&[("A", "TTT"), ("B", "AAA"), ("C", "CCC")])).unwrap();

        let residues: Vec<&[u8]> = classes
            .iter()
            .map(|class| class.residues().as_bytes())
            .collect();
        assert_eq!(residues, [b"AAA", b"CCC", b"TTT"]);
    }

    #[test]
    fn compress_accepts_empty_input() {
        let classes = compress(Vec::new()).unwrap();

        assert!(classes.is_empty());
    }

    #[test]
    fn compress_accepts_single_record() {
        let classes = compress(records(&[("A", "MKV")])).unwrap();

        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].len(), 1);
    }

    #[test]
    fn compress_rejects_record_without_residues() {
        let err = compress(records(&[("A", "MKV"), ("B", "")])).unwrap_err();

        assert!(matches!(err, DedupError::EmptySequence(ref id) if id.str() == "B"));
    }

    #[test]
    fn compress_rejects_conflicting_duplicate_identifier() {
        let err = compress(records(&[("A", "MKV"), ("A", "MKT")])).unwrap_err();

        assert!(matches!(err, DedupError::DuplicateIdentifier(ref id) if id.str() == "A"));
    }

    #[test]
    fn compress_tolerates_full_duplicate_records() {
        let classes = compress(records(&[("A", "MKV"), ("A", "MKV")])).unwrap();

        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].len(), 2);
    }

    #[test]
    fn into_representative_returns_first_member() {
        let classes = compress(records(&[("A", "MKV"), ("B", "MKV")])).unwrap();

        let representative = classes.into_iter().exactly_one().unwrap().into_representative();
        assert_eq!(representative.identifier().str(), "A");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            format!("{}", DedupError::EmptySequence("S1".into())),
            "Record `S1` has no residue content"
        );
        assert_eq!(
            format!("{}", DedupError::DuplicateIdentifier("S1".into())),
            "Identifier `S1` appears on records with differing residue content"
        );
    }
}
