#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use cmd::{compress, position_map, remove_reference, stats, subset, update};
use human_panic::setup_panic;
use lazy_static::lazy_static;

use crate::logging::init_logging;
use crate::opts::OutputWriter;
use crate::progress_bar::HapProgressBar;

mod cli;
mod cmd;
mod logging;
mod opts;
mod progress_bar;

lazy_static! {
    pub(crate) static ref PROGRESS_BAR: HapProgressBar = HapProgressBar::new();
}

fn main() -> anyhow::Result<()> {
    setup_panic!();

    let cli: Cli = Cli::parse();

    if !cli.no_progress {
        PROGRESS_BAR.show();
    }

    init_logging(cli.verbose.log_level_filter()).expect("Could not initialize logging");

    match &cli.command {
        Commands::Compress {
            protein_input,
            nuc_input,
            protein_output,
            nuc_output,
            protein_duplicates,
            nuc_duplicates,
        } => {
            let protein_reader = protein_input.as_reader()?;
            let nuc_reader = nuc_input.as_reader()?;
            PROGRESS_BAR.set_total_bytes(
                protein_reader.length()?.unwrap_or(0) + nuc_reader.length()?.unwrap_or(0),
            );

            compress::compress(
                protein_reader.into_read(),
                nuc_reader.into_read(),
                protein_output,
                nuc_output,
                protein_duplicates,
                nuc_duplicates,
                Arc::new(PROGRESS_BAR.clone()),
            )
            .context("Failed to compress given haplotype files")?;
        }
        Commands::Update {
            fasta_file,
            map_file,
            output,
        } => {
            let fasta_reader = fasta_file.as_reader()?;
            let map_reader = map_file.as_reader()?;
            PROGRESS_BAR.set_total_bytes(fasta_reader.length()?.unwrap_or(0));
            let output = OutputWriter::from_path_and_input(output, &fasta_reader, "fasta")?;

            update::update(
                fasta_reader.into_read(),
                map_reader.into_read(),
                output.into_write(),
            )
            .context("Failed to rewrite given FASTA file")?;
        }
        Commands::RemoveReference {
            input,
            reference,
            output,
        } => {
            let input_reader = input.as_reader()?;
            let reference_reader = reference.as_reader()?;
            PROGRESS_BAR.set_total_bytes(input_reader.length()?.unwrap_or(0));
            let output = OutputWriter::from_path_and_input(output, &input_reader, "fasta")?;

            remove_reference::remove_reference(
                input_reader.into_read(),
                reference_reader.into_read(),
                output.into_write(),
            )
            .context("Failed to remove reference sequences from given alignment")?;
        }
        Commands::PositionMap { ref_msa, output } => {
            let reader = ref_msa.as_reader()?;
            let output = OutputWriter::from_path_and_input(output, &reader, "tsv")?;

            position_map::position_map(reader.into_read(), output.into_write())
                .context("Failed to create a position table for given alignment")?;
        }
        Commands::Subset {
            csv,
            fasta,
            start_date,
            end_date,
            date_col,
            seq_id_col,
            reason_col,
            separate,
            output_dir,
        } => {
            let csv_reader = csv.as_reader()?;
            let fasta_reader = fasta.as_reader()?;
            PROGRESS_BAR.set_total_bytes(fasta_reader.length()?.unwrap_or(0));

            let options = subset::SubsetOptions {
                start_date: start_date.clone(),
                end_date: end_date.clone(),
                date_col: date_col.clone(),
                seq_id_col: seq_id_col.clone(),
                reason_col: reason_col.clone(),
                separate: *separate,
            };
            subset::subset(
                csv_reader.into_read(),
                fasta_reader.into_read(),
                &output_dir.as_path_buf()?,
                &options,
            )
            .context("Failed to create a data subset")?;
        }
        Commands::Stats { input } => {
            let reader = input.as_reader()?;
            PROGRESS_BAR.set_total_bytes(reader.length()?.unwrap_or(0));

            stats::stats(reader.into_read()).context("Failed to compute file statistics")?;
        }
    }

    PROGRESS_BAR.finish();
    Ok(())
}
