use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};

use crate::opts::{directory, input_file, input_stream, iso_date, Directory, InputFile};
use crate::opts::InputStream;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub struct Cli {
    #[clap(flatten)]
    pub verbose: Verbosity<InfoLevel>,

    /// Don't display a progress bar/spinner
    #[clap(long, global = true, value_parser)]
    pub no_progress: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create unique protein and nucleotide haplotype sets while keeping
    /// track of the sequences each retained record represents
    Compress {
        /// Protein FASTA file to filter for duplicates
        #[clap(long, value_parser = input_file)]
        protein_input: InputFile,

        /// Nucleotide FASTA file to filter for duplicates
        #[clap(long, value_parser = input_file)]
        nuc_input: InputFile,

        /// Compressed protein FASTA output file path
        #[clap(long, value_parser)]
        protein_output: PathBuf,

        /// Compressed nucleotide FASTA output file path
        #[clap(long, value_parser)]
        nuc_output: PathBuf,

        /// Protein duplicates lookup JSON output file path
        #[clap(long, value_parser)]
        protein_duplicates: PathBuf,

        /// Nucleotide duplicates lookup JSON output file path
        #[clap(long, value_parser)]
        nuc_duplicates: PathBuf,
    },

    /// Rewrite the headers of a FASTA file through an identifier map
    Update {
        /// FASTA file to rewrite
        #[clap(short, long, value_parser = input_file)]
        fasta_file: InputFile,

        /// JSON file mapping old identifiers to new ones
        #[clap(short, long, value_parser = input_file)]
        map_file: InputFile,

        /// Output file path; `-` is the standard output
        #[clap(short, long, value_parser)]
        output: Option<PathBuf>,
    },

    /// Remove reference sequences from an alignment
    RemoveReference {
        /// FASTA file to remove sequences from
        #[clap(short, long, value_parser = input_file)]
        input: InputFile,

        /// FASTA file of sequences to remove
        #[clap(short, long, value_parser = input_file)]
        reference: InputFile,

        /// Output file path; `-` is the standard output
        #[clap(short, long, value_parser)]
        output: Option<PathBuf>,
    },

    /// Create a position table mapping reference coordinates to alignment
    /// columns
    PositionMap {
        /// FASTA file containing the reference sequence mapped to the
        /// alignment
        #[clap(short, long, value_parser = input_file)]
        ref_msa: InputFile,

        /// Output TSV file path; `-` is the standard output
        #[clap(short, long, value_parser)]
        output: Option<PathBuf>,
    },

    /// Create a data subset of a specific time period
    Subset {
        /// CSV file containing the metadata
        #[clap(short, long, value_parser = input_file)]
        csv: InputFile,

        /// FASTA file containing the sequence data
        #[clap(short, long, value_parser = input_file)]
        fasta: InputFile,

        /// Start date of the time period in the format yyyy-mm-dd
        #[clap(short, long, value_parser = iso_date)]
        start_date: String,

        /// End date of the time period in the format yyyy-mm-dd
        #[clap(short, long, value_parser = iso_date)]
        end_date: String,

        /// Name of the metadata column storing the sample date
        #[clap(long, default_value = "DATE_DRAW", value_parser)]
        date_col: String,

        /// Name of the metadata column storing the sequence identifier
        #[clap(long, default_value = "IMS_ID", value_parser)]
        seq_id_col: String,

        /// Name of the metadata column storing the sampling reason
        #[clap(long, default_value = "SEQ_REASON", value_parser)]
        reason_col: String,

        /// Separate the output into "random" and "suspect" samples
        #[clap(long, value_parser)]
        separate: bool,

        /// Output directory path
        #[clap(short, long, value_parser = directory)]
        output_dir: Directory,
    },

    /// Print statistics about a FASTA file
    Stats {
        /// Input FASTA file to read; `-` is the standard input
        #[clap(default_value_t, value_parser = input_stream)]
        input: InputStream,
    },
}
