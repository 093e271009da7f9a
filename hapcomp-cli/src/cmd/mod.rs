use std::io::{BufReader, Read};

use anyhow::Context;
use hapcomp::fasta::reader::FastaReader;
use hapcomp::progress::ProgressNotifier;
use hapcomp::sequence::FastaSequence;

use crate::PROGRESS_BAR;

pub mod compress;
pub mod position_map;
pub mod remove_reference;
pub mod stats;
pub mod subset;
pub mod update;

/// Reads a whole FASTA file into memory, advancing the progress bar as
/// records come in.
pub(crate) fn read_fasta_sequences<R: Read>(reader: R) -> anyhow::Result<Vec<FastaSequence>> {
    let fasta_reader = FastaReader::new(BufReader::new(reader));

    let mut records = Vec::new();
    for sequence in fasta_reader {
        let sequence = sequence.context("Could not parse a record from the FASTA file")?;
        PROGRESS_BAR.processed_bytes(sequence.size());
        records.push(sequence);
    }

    Ok(records)
}
