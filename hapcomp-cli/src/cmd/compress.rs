use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use hapcomp::fasta::reader::FastaReader;
use hapcomp::fasta::writer::FastaWriter;
use hapcomp::pipeline::{compress_paired_with_params, PairedCompressorParams};
use hapcomp::progress::ProgressNotifier;
use hapcomp::provenance::ProvenanceMap;
use hapcomp::sequence::FastaSequence;

use crate::opts::StagedOutputs;

pub fn compress<R1: Read, R2: Read>(
    protein_reader: R1,
    nuc_reader: R2,
    protein_output: &Path,
    nuc_output: &Path,
    protein_duplicates: &Path,
    nuc_duplicates: &Path,
    progress_notifier: Arc<dyn ProgressNotifier>,
) -> anyhow::Result<()> {
    let protein =
        read_sequences(protein_reader).context("Could not parse the protein FASTA file")?;
    let nucleotide =
        read_sequences(nuc_reader).context("Could not parse the nucleotide FASTA file")?;

    let mut params = PairedCompressorParams::builder();
    params.progress_notifier(progress_notifier);
    let params = params.build();

    let result = compress_paired_with_params(protein, nucleotide, &params)?;

    // every artifact is serialized before the first one is written, so a
    // failure cannot leave a partial output set on disk
    let mut staged = StagedOutputs::new();
    staged.stage(protein_output, serialize_sequences(&result.protein)?);
    staged.stage(nuc_output, serialize_sequences(&result.nucleotide)?);
    staged.stage(
        protein_duplicates,
        serialize_provenance(&result.protein_provenance)?,
    );
    staged.stage(
        nuc_duplicates,
        serialize_provenance(&result.nucleotide_provenance)?,
    );
    staged.commit()?;

    Ok(())
}

fn read_sequences<R: Read>(reader: R) -> anyhow::Result<Vec<FastaSequence>> {
    let fasta_reader = FastaReader::new(BufReader::new(reader));

    let mut records = Vec::new();
    for sequence in fasta_reader {
        records.push(sequence.context("Could not parse a record from the FASTA file")?);
    }

    Ok(records)
}

fn serialize_sequences(records: &[FastaSequence]) -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();

    let mut writer = FastaWriter::new(&mut buf);
    for record in records {
        writer
            .write_sequence(record)
            .context("Could not serialize a FASTA record")?;
    }
    writer.flush()?;

    Ok(buf)
}

fn serialize_provenance(provenance: &ProvenanceMap) -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();
    provenance
        .to_json_writer(&mut buf)
        .context("Could not serialize a duplicates lookup")?;

    Ok(buf)
}
