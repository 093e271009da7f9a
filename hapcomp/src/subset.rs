//! Metadata-driven sequence selection.

use std::collections::HashMap;

use crate::sequence::FastaSequence;

/// Builds an identifier-keyed index over a sequence set.
#[must_use]
pub fn index_by_identifier(records: Vec<FastaSequence>) -> HashMap<String, FastaSequence> {
    records
        .into_iter()
        .map(|record| (record.identifier().0.clone(), record))
        .collect()
}

/// Selects the records for `identifiers`, in the given order, skipping
/// identifiers that have no record in the index.
///
/// Metadata rows routinely reference samples that were never sequenced, so a
/// missing identifier is not an error here.
#[must_use]
pub fn select_by_identifiers(
    index: &HashMap<String, FastaSequence>,
    identifiers: &[String],
) -> Vec<FastaSequence> {
    identifiers
        .iter()
        .filter_map(|identifier| index.get(identifier).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::sequence::FastaSequence;
    use crate::subset::{index_by_identifier, select_by_identifiers};

    #[test]
    fn select_follows_metadata_order() {
        let index = index_by_identifier(vec![
            FastaSequence::new("A", "ACT"),
            FastaSequence::new("B", "GGA"),
        ]);

        let result =
            select_by_identifiers(&index, &["B".to_owned(), "A".to_owned()]);

        let identifiers: Vec<&str> = result.iter().map(|rec| rec.identifier().str()).collect();
        assert_eq!(identifiers, ["B", "A"]);
    }

    #[test]
    fn select_skips_absent_identifiers() {
        let index = index_by_identifier(vec![FastaSequence::new("A", "ACT")]);

        let result = select_by_identifiers(
            &index,
            &["A".to_owned(), "missing".to_owned()],
        );

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].identifier().str(), "A");
    }

    #[test]
    fn select_with_no_identifiers_is_empty() {
        let index = index_by_identifier(vec![FastaSequence::new("A", "ACT")]);

        assert!(select_by_identifiers(&index, &[]).is_empty());
    }
}
