use std::collections::HashSet;
use std::io::{Read, Write};

use anyhow::Context;
use hapcomp::fasta::writer::FastaWriter;
use hapcomp::msa::remove_by_identifier;
use log::info;

use crate::cmd::read_fasta_sequences;

pub fn remove_reference<R1: Read, R2: Read, W: Write>(
    input_reader: R1,
    reference_reader: R2,
    writer: W,
) -> anyhow::Result<()> {
    let records = read_fasta_sequences(input_reader)?;
    let references = read_fasta_sequences(reference_reader)
        .context("Could not parse the reference FASTA file")?;

    let excluded: HashSet<String> = references
        .iter()
        .map(|record| record.identifier().0.clone())
        .collect();

    let record_num = records.len();
    let kept = remove_by_identifier(records, &excluded);
    info!(
        "Removed {} of {} alignment records",
        record_num - kept.len(),
        record_num
    );

    let mut fasta_writer = FastaWriter::new(writer);
    for record in &kept {
        fasta_writer
            .write_sequence(record)
            .context("Could not write an alignment record")?;
    }
    fasta_writer.flush()?;

    Ok(())
}
