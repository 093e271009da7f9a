//! Header relabeling: rewriting record identifiers through an explicit
//! identifier map.

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::sequence::{FastaSequence, SequenceIdentifier};

/// Lookup from an original record identifier to its replacement.
pub type IdentifierMap = HashMap<String, String>;

/// Error occurring while relabeling a sequence set.
#[derive(Debug)]
pub enum RelabelError {
    /// A record's identifier has no entry in the identifier map.
    UnknownIdentifier(SequenceIdentifier),
}

impl Display for RelabelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RelabelError::UnknownIdentifier(identifier) => {
                write!(f, "Identifier `{}` is not present in the map", identifier)
            }
        }
    }
}

impl Error for RelabelError {}

/// The result of a relabeling operation.
pub type RelabelResult<T> = Result<T, RelabelError>;

/// Replaces every record's identifier through `map`, clearing descriptions so
/// the rewritten headers are exactly the mapped identifiers.
///
/// Every record must have a map entry; an unmapped identifier aborts the
/// whole operation.
pub fn relabel(records: Vec<FastaSequence>, map: &IdentifierMap) -> RelabelResult<Vec<FastaSequence>> {
    records
        .into_iter()
        .map(|record| {
            let replacement = map.get(record.identifier().str()).cloned();

            match replacement {
                Some(identifier) => Ok(record.with_identifier(identifier)),
                None => Err(RelabelError::UnknownIdentifier(record.identifier().clone())),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::relabel::{relabel, IdentifierMap, RelabelError};
    use crate::sequence::FastaSequence;

    fn map(pairs: &[(&str, &str)]) -> IdentifierMap {
        pairs
            .iter()
            .map(|&(from, to)| (from.to_owned(), to.to_owned()))
            .collect()
    }

    #[test]
    fn relabel_rewrites_identifiers_in_order() {
        let records = vec![
            FastaSequence::new("old_1", "ACT"),
            FastaSequence::new("old_2", "GGA"),
        ];

        let result = relabel(records, &map(&[("old_1", "new_1"), ("old_2", "new_2")])).unwrap();

        assert_eq!(result[0].identifier().str(), "new_1");
        assert_eq!(result[1].identifier().str(), "new_2");
    }

    #[test]
    fn relabel_clears_descriptions() {
        let records = vec![
            FastaSequence::new("old_1", "ACT").with_description(Some("isolate".to_owned()))
        ];

        let result = relabel(records, &map(&[("old_1", "new_1")])).unwrap();

        assert_eq!(result[0].description(), None);
    }

    #[test]
    fn relabel_fails_on_unmapped_identifier() {
        let records = vec![FastaSequence::new("old_1", "ACT")];

        let err = relabel(records, &map(&[("other", "new")])).unwrap_err();

        assert!(matches!(
            err,
            RelabelError::UnknownIdentifier(ref id) if id.str() == "old_1"
        ));
    }
}
