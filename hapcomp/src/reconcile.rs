//! Cross-reference reconciliation: aligning one sequence set's retained
//! records to another's by shared identifier.

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::sequence::{FastaSequence, SequenceIdentifier};

/// Error occurring while reconciling paired sequence sets.
#[derive(Debug)]
pub enum ReconcileError {
    /// A nucleotide representative has no protein record with the same
    /// identifier, so the two input sets are not in the expected 1:1
    /// correspondence.
    MissingCrossReference(SequenceIdentifier),
}

impl Display for ReconcileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReconcileError::MissingCrossReference(identifier) => {
                write!(
                    f,
                    "No protein record matches nucleotide representative `{}`",
                    identifier
                )
            }
        }
    }
}

impl Error for ReconcileError {}

/// The result of a reconciliation operation.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Selects, for each nucleotide representative in order, the protein record
/// sharing its identifier.
///
/// The lookup is built over the full, pre-deduplication protein set, so the
/// result mirrors the nucleotide representative order and count regardless of
/// how the protein set's own duplicate structure differs.
pub fn reconcile(
    protein_records: &[FastaSequence],
    nucleotide_representatives: &[FastaSequence],
) -> ReconcileResult<Vec<FastaSequence>> {
    let lookup: HashMap<&str, &FastaSequence> = protein_records
        .iter()
        .map(|record| (record.identifier().str(), record))
        .collect();

    nucleotide_representatives
        .iter()
        .map(|representative| {
            lookup
                .get(representative.identifier().str())
                .map(|&record| record.clone())
                .ok_or_else(|| {
                    ReconcileError::MissingCrossReference(representative.identifier().clone())
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::reconcile::{reconcile, ReconcileError};
    use crate::sequence::FastaSequence;

    #[test]
    fn reconcile_mirrors_representative_order_and_count() {
        let protein = vec![
            FastaSequence::new("A", "MKV"),
            FastaSequence::new("B", "MKV"),
            FastaSequence::new("C", "MKT"),
        ];
        let representatives = vec![
            FastaSequence::new("C", "ATGAAAACT"),
            FastaSequence::new("A", "ATGAAAGTT"),
        ];

        let result = reconcile(&protein, &representatives).unwrap();

        assert_eq!(result.len(), representatives.len());
        assert_eq!(result[0].identifier().str(), "C");
        assert_eq!(result[0].residues().as_bytes(), b"MKT");
        assert_eq!(result[1].identifier().str(), "A");
        assert_eq!(result[1].residues().as_bytes(), b"MKV");
    }

    #[test]
    fn reconcile_fails_naming_missing_identifier() {
        let protein = vec![FastaSequence::new("A", "MKV")];
        let representatives = vec![FastaSequence::new("X1", "ATG")];

        let err = reconcile(&protein, &representatives).unwrap_err();

        assert!(matches!(
            err,
            ReconcileError::MissingCrossReference(ref id) if id.str() == "X1"
        ));
        assert_eq!(
            format!("{}", err),
            "No protein record matches nucleotide representative `X1`"
        );
    }

    #[test]
    fn reconcile_of_empty_sets_is_empty() {
        let result = reconcile(&[], &[]).unwrap();

        assert!(result.is_empty());
    }

    #[test]
    fn reconcile_with_no_representatives_ignores_protein_records() {
        let protein = vec![FastaSequence::new("A", "MKV")];

        let result = reconcile(&protein, &[]).unwrap();

        assert!(result.is_empty());
    }
}
