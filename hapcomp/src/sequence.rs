use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use derive_more::Deref;

use crate::progress::ByteNum;

/// Identifier (header name) of a FASTA sequence record.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Default, PartialOrd, Ord)]
pub struct SequenceIdentifier(pub String);

impl SequenceIdentifier {
    /// Empty identifier.
    pub const EMPTY: SequenceIdentifier = SequenceIdentifier(String::new());

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns this identifier as string.
    #[inline]
    #[must_use]
    pub fn str(&self) -> &str {
        &self.0
    }
}

impl Display for SequenceIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SequenceIdentifier {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for SequenceIdentifier {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Residue content of a sequence record.
///
/// The symbols are kept as the raw header-less FASTA bytes and treated as an
/// opaque value: two records are duplicates of each other exactly when their
/// `Residues` compare equal. The ordering is the lexicographic ordering of
/// the symbol bytes.
#[derive(Deref, Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Residues(pub Vec<u8>);

impl Residues {
    /// Empty residue content.
    pub const EMPTY: Residues = Residues(Vec::new());

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the residue symbols as bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Display for Residues {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl From<&str> for Residues {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for Residues {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// A single FASTA record: identifier, optional free-text description and
/// residue content.
///
/// The description holds the header text following the identifier token, if
/// any; a record without a description renders its header as the bare
/// identifier.
#[derive(Clone, Debug, Eq)]
pub struct FastaSequence {
    identifier: SequenceIdentifier,
    description: Option<String>,
    residues: Residues,
    size: ByteNum,
}

impl FastaSequence {
    /// Creates a new instance of `FastaSequence` with no description.
    ///
    /// # Examples
    /// ```
    /// use hapcomp::sequence::FastaSequence;
    ///
    /// let seq = FastaSequence::new("SEQ_1", "MKV");
    /// assert_eq!(seq.identifier().str(), "SEQ_1");
    /// assert_eq!(seq.residues().as_bytes(), b"MKV");
    /// ```
    #[must_use]
    pub fn new<T, U>(identifier: T, residues: U) -> Self
    where
        T: Into<SequenceIdentifier>,
        U: Into<Residues>,
    {
        let identifier = identifier.into();
        let residues = residues.into();

        const FASTA_BOILERPLATE_LEN: usize = ">\n\n".len();
        let approximate_size = identifier.len() + residues.len() + FASTA_BOILERPLATE_LEN;

        Self::with_size(identifier, None, residues, ByteNum::new(approximate_size))
    }

    #[must_use]
    pub fn with_size<T, U>(
        identifier: T,
        description: Option<String>,
        residues: U,
        size: ByteNum,
    ) -> Self
    where
        T: Into<SequenceIdentifier>,
        U: Into<Residues>,
    {
        Self {
            identifier: identifier.into(),
            description,
            residues: residues.into(),
            size,
        }
    }

    /// Returns the identifier of this record.
    #[must_use]
    pub fn identifier(&self) -> &SequenceIdentifier {
        &self.identifier
    }

    /// Returns the free-text description of this record, if present.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the residue content of this record.
    #[must_use]
    pub fn residues(&self) -> &Residues {
        &self.residues
    }

    /// Returns a new instance of `FastaSequence`, identical as `self`, but
    /// with given identifier and the description cleared.
    #[must_use]
    pub fn with_identifier<T>(self, identifier: T) -> Self
    where
        T: Into<SequenceIdentifier>,
    {
        Self {
            identifier: identifier.into(),
            description: None,
            ..self
        }
    }

    /// Returns a new instance of `FastaSequence`, identical as `self`, but
    /// with given description.
    #[must_use]
    pub fn with_description(self, description: Option<String>) -> Self {
        Self {
            description,
            ..self
        }
    }

    /// Returns the canonical form of this record: the identifier is kept and
    /// the description is dropped, so the record's header renders as exactly
    /// the identifier.
    ///
    /// Canonicalizing an already canonical record is a no-op.
    ///
    /// # Examples
    /// ```
    /// use hapcomp::sequence::FastaSequence;
    ///
    /// let seq = FastaSequence::new("S1", "ACT").with_description(Some("isolate 7".to_owned()));
    /// let canonical = seq.into_canonical();
    /// assert_eq!(canonical.identifier().str(), "S1");
    /// assert_eq!(canonical.description(), None);
    /// assert_eq!(canonical.clone().into_canonical(), canonical);
    /// ```
    #[must_use]
    pub fn into_canonical(self) -> Self {
        Self {
            description: None,
            ..self
        }
    }

    /// Returns the length (i.e. number of residues) of the record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    /// Returns `true` if the record contains no residues.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Returns the approximate on-disk size of the record.
    #[must_use]
    pub fn size(&self) -> ByteNum {
        self.size
    }
}

impl PartialEq for FastaSequence {
    fn eq(&self, other: &Self) -> bool {
        if self.identifier != other.identifier {
            return false;
        }
        if self.description != other.description {
            return false;
        }
        if self.residues != other.residues {
            return false;
        }
        true
    }
}

impl Hash for FastaSequence {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(self.identifier.0.as_bytes());
        if let Some(description) = &self.description {
            state.write(description.as_bytes());
        }
        state.write(self.residues.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use crate::sequence::{FastaSequence, Residues, SequenceIdentifier};

    #[test]
    fn test_sequence_new() {
        let seq = FastaSequence::new("TEST", "ACTG");

        assert_eq!(seq.identifier(), &SequenceIdentifier::from("TEST"));
        assert_eq!(seq.description(), None);
        assert_eq!(seq.residues(), &Residues::from("ACTG"));
        assert_eq!(seq.len(), 4);
        assert!(!seq.is_empty());
    }

    #[test]
    fn test_sequence_identifier_modification() {
        let seq_1 = FastaSequence::new("TEST", "ACTG");
        let seq_2 = FastaSequence::new("", "ACTG");

        assert_eq!(seq_2.clone().with_identifier("TEST"), seq_1);
        assert_eq!(seq_1.with_identifier(""), seq_2);
    }

    #[test]
    fn test_canonical_drops_description() {
        let seq = FastaSequence::new("TEST", "ACTG")
            .with_description(Some("sampled 2021-03-01".to_owned()));

        let canonical = seq.into_canonical();

        assert_eq!(canonical.identifier().str(), "TEST");
        assert_eq!(canonical.description(), None);
    }

    #[test]
    fn test_canonical_is_idempotent() {
        let seq = FastaSequence::new("TEST", "ACTG")
            .with_description(Some("sampled 2021-03-01".to_owned()));

        let once = seq.into_canonical();
        let twice = once.clone().into_canonical();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_residue_ordering_is_lexicographic() {
        assert!(Residues::from("ACT") < Residues::from("ACTG"));
        assert!(Residues::from("ACT") < Residues::from("AG"));
        assert_eq!(Residues::from("ACT"), Residues::from("ACT"));
    }

    #[test]
    fn test_identifier_display() {
        let identifier = SequenceIdentifier::from("SEQ_1");

        assert_eq!(format!("{}", identifier), "SEQ_1");
        assert_eq!(identifier.len(), 5);
        assert!(!identifier.is_empty());
        assert!(SequenceIdentifier::EMPTY.is_empty());
    }
}
