use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, Context};
use csv::StringRecord;
use hapcomp::fasta::writer::FastaWriter;
use hapcomp::sequence::FastaSequence;
use hapcomp::subset::{index_by_identifier, select_by_identifiers};
use log::info;

use crate::cmd::read_fasta_sequences;

/// Metadata column and date-window selection for a `subset` run.
#[derive(Debug, Clone)]
pub struct SubsetOptions {
    pub start_date: String,
    pub end_date: String,
    pub date_col: String,
    pub seq_id_col: String,
    pub reason_col: String,
    pub separate: bool,
}

/// Reason-column value marking a sample as randomly selected; everything
/// else counts as suspect.
const RANDOM_SAMPLE_REASON: &str = "N";

pub fn subset<R1: Read, R2: Read>(
    csv_reader: R1,
    fasta_reader: R2,
    output_dir: &Path,
    options: &SubsetOptions,
) -> anyhow::Result<()> {
    let mut metadata_reader = csv::Reader::from_reader(csv_reader);
    let headers = metadata_reader
        .headers()
        .context("Could not read the metadata header row")?
        .clone();

    let date_col = column_index(&headers, &options.date_col)?;
    let seq_id_col = column_index(&headers, &options.seq_id_col)?;
    let reason_col = if options.separate {
        Some(column_index(&headers, &options.reason_col)?)
    } else {
        None
    };

    let mut rows = Vec::new();
    for row in metadata_reader.records() {
        let row = row.context("Could not read a metadata row")?;
        rows.push(row);
    }
    rows.sort_by(|a, b| a.get(date_col).cmp(&b.get(date_col)));

    // the window is compared on the raw date strings, which for well-formed
    // yyyy-mm-dd values matches chronological order and keeps malformed rows
    // out of the window
    rows.retain(|row| match row.get(date_col) {
        Some(date) => date >= options.start_date.as_str() && date <= options.end_date.as_str(),
        None => false,
    });
    info!(
        "{} metadata rows between {} and {}",
        rows.len(),
        options.start_date,
        options.end_date
    );

    let sequences = read_fasta_sequences(fasta_reader)?;
    let index = index_by_identifier(sequences);

    if let Some(reason_col) = reason_col {
        let (random, suspect): (Vec<StringRecord>, Vec<StringRecord>) = rows
            .into_iter()
            .partition(|row| row.get(reason_col) == Some(RANDOM_SAMPLE_REASON));

        write_group(output_dir, "random", &headers, &random, &index, seq_id_col)?;
        write_group(output_dir, "suspect", &headers, &suspect, &index, seq_id_col)?;
    } else {
        write_group(output_dir, "subset", &headers, &rows, &index, seq_id_col)?;
    }

    Ok(())
}

fn column_index(headers: &StringRecord, name: &str) -> anyhow::Result<usize> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| anyhow!("Metadata has no `{}` column", name))
}

fn write_group(
    output_dir: &Path,
    name: &str,
    headers: &StringRecord,
    rows: &[StringRecord],
    index: &HashMap<String, FastaSequence>,
    seq_id_col: usize,
) -> anyhow::Result<()> {
    let csv_path = output_dir.join(format!("{}.csv", name));
    let mut csv_writer = csv::Writer::from_path(&csv_path)
        .with_context(|| format!("Could not create `{}`", csv_path.display()))?;
    csv_writer.write_record(headers)?;
    for row in rows {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    info!("New metadata file: {}", csv_path.display());

    let identifiers: Vec<String> = rows
        .iter()
        .filter_map(|row| row.get(seq_id_col))
        .map(str::to_owned)
        .collect();
    let selected = select_by_identifiers(index, &identifiers);

    let fasta_path = output_dir.join(format!("{}.fasta", name));
    let file = File::create(&fasta_path)
        .with_context(|| format!("Could not create `{}`", fasta_path.display()))?;
    let mut fasta_writer = FastaWriter::new(file);
    for record in &selected {
        fasta_writer
            .write_sequence(record)
            .context("Could not write a subset FASTA record")?;
    }
    fasta_writer.flush()?;
    info!("New sequences file: {}", fasta_path.display());

    Ok(())
}
