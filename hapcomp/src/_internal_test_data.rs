use itertools::Itertools;
use lazy_static::lazy_static;

use crate::sequence::FastaSequence;

pub const SIMPLE_TEST_SEQUENCE_STR: &str = ">SEQ_ID
GATTTGGGGTTCAAAGCAGTATCGATCAAATAGTAAATCCATTTGTTCAACTCACAGTTT
";

lazy_static! {
    pub static ref SIMPLE_TEST_SEQUENCE: FastaSequence = FastaSequence::new(
        "SEQ_ID",
        "GATTTGGGGTTCAAAGCAGTATCGATCAAATAGTAAATCCATTTGTTCAACTCACAGTTT"
    );
}

pub const TWO_RECORD_FASTA_STR: &str = ">A isolate one
ATGAAAGTT
>B
ATGAAAGTT
";

/// Protein records of the three-haplotype scenario: `A` and `B` are
/// duplicates, `C` is distinct.
pub const TRIO_PROTEIN: [(&str, &str); 3] = [("A", "MKV"), ("B", "MKV"), ("C", "MKT")];

/// Nucleotide records paired 1:1 with [`TRIO_PROTEIN`].
pub const TRIO_NUCLEOTIDE: [(&str, &str); 3] =
    [("A", "ATGAAAGTT"), ("B", "ATGAAAGTT"), ("C", "ATGAAAACT")];

lazy_static! {
    pub static ref TRIO_PROTEIN_SEQUENCES: Vec<FastaSequence> = TRIO_PROTEIN
        .iter()
        .map(|&(identifier, residues)| FastaSequence::new(identifier, residues))
        .collect_vec();
    pub static ref TRIO_NUCLEOTIDE_SEQUENCES: Vec<FastaSequence> = TRIO_NUCLEOTIDE
        .iter()
        .map(|&(identifier, residues)| FastaSequence::new(identifier, residues))
        .collect_vec();
}
