//! FASTA format support: a reader deserializing records into
//! [`FastaSequence`](crate::sequence::FastaSequence) objects and a writer
//! serializing them back, wrapped at a fixed column width.

pub mod reader;
pub mod writer;

mod consts;

pub(crate) const FASTA_HEADER_PREFIX: char = '>';

/// Number of residue columns written per sequence line.
pub const FASTA_LINE_WIDTH: usize = 80;
