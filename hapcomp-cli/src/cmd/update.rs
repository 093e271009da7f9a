use std::io::{Read, Write};

use anyhow::Context;
use hapcomp::fasta::writer::FastaWriter;
use hapcomp::relabel::{relabel, IdentifierMap};

use crate::cmd::read_fasta_sequences;

pub fn update<R1: Read, R2: Read, W: Write>(
    fasta_reader: R1,
    map_reader: R2,
    writer: W,
) -> anyhow::Result<()> {
    let map: IdentifierMap =
        serde_json::from_reader(map_reader).context("Could not parse the identifier map JSON")?;

    let records = read_fasta_sequences(fasta_reader)?;
    let records = relabel(records, &map)?;

    let mut fasta_writer = FastaWriter::new(writer);
    for record in &records {
        fasta_writer
            .write_sequence(record)
            .context("Could not write a rewritten FASTA record")?;
    }
    fasta_writer.flush()?;

    Ok(())
}
