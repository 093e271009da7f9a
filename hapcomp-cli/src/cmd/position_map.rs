use std::io::{BufReader, Read, Write};

use anyhow::Context;
use hapcomp::fasta::reader::FastaReader;
use hapcomp::msa;

pub fn position_map<R: Read, W: Write>(reader: R, writer: W) -> anyhow::Result<()> {
    let mut fasta_reader = FastaReader::new(BufReader::new(reader));
    let reference = fasta_reader
        .read_sequence()
        .context("Could not parse the aligned reference record")?;

    let columns = msa::position_map(&reference);

    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);
    for column in &columns {
        csv_writer
            .serialize(column)
            .context("Could not write a position table row")?;
    }
    csv_writer.flush()?;

    Ok(())
}
