//! Helpers for multiple sequence alignments: reference removal and
//! reference-to-alignment coordinate mapping.

use std::collections::HashSet;

use serde::Serialize;

use crate::sequence::FastaSequence;

const GAP: u8 = b'-';

/// One column of an alignment position table: the label of the column in
/// reference coordinates and its 1-based alignment position.
///
/// Columns where the reference carries a residue are labeled with the running
/// reference position (`"1"`, `"2"`, ...); gap columns are labeled
/// `"{position}.{suffix}"` after the last residue column, with the suffix
/// counting consecutive gaps. Gaps before the first residue column are
/// labeled `"0.1"`, `"0.2"`, and so on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionColumn {
    pub reference: String,
    pub msa: usize,
}

/// Maps every alignment column of an aligned reference record to reference
/// coordinates.
///
/// # Examples
/// ```
/// use hapcomp::msa::position_map;
/// use hapcomp::sequence::FastaSequence;
///
/// let reference = FastaSequence::new("ref", "AC-T");
/// let columns = position_map(&reference);
///
/// let labels: Vec<&str> = columns.iter().map(|col| col.reference.as_str()).collect();
/// assert_eq!(labels, ["1", "2", "2.1", "3"]);
/// ```
#[must_use]
pub fn position_map(reference: &FastaSequence) -> Vec<PositionColumn> {
    let mut columns = Vec::with_capacity(reference.len());
    let mut position = 0;
    let mut suffix = 1;

    for (column, &base) in reference.residues().as_bytes().iter().enumerate() {
        if base != GAP {
            position += 1;
            suffix = 1;
            columns.push(PositionColumn {
                reference: position.to_string(),
                msa: column + 1,
            });
        } else {
            columns.push(PositionColumn {
                reference: format!("{}.{}", position, suffix),
                msa: column + 1,
            });
            suffix += 1;
        }
    }

    columns
}

/// Removes the records whose identifiers are in `excluded`, preserving the
/// order of the remaining records.
#[must_use]
pub fn remove_by_identifier(
    records: Vec<FastaSequence>,
    excluded: &HashSet<String>,
) -> Vec<FastaSequence> {
    records
        .into_iter()
        .filter(|record| !excluded.contains(record.identifier().str()))
        .collect()
}
