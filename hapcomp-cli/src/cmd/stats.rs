use std::io::Read;

use hapcomp::dedup::compress;
use hapcomp::sequence::FastaSequence;

use crate::cmd::read_fasta_sequences;
use crate::PROGRESS_BAR;

pub(crate) fn stats<R: Read>(reader: R) -> anyhow::Result<()> {
    let records = read_fasta_sequences(reader)?;
    PROGRESS_BAR.finish();

    let mut composition = ResidueComposition::new();
    for record in &records {
        composition.process_sequence(record);
    }

    let classes = compress(records.clone())?;
    let duplicated_classes = classes.iter().filter(|class| class.len() > 1).count();
    let largest_class = classes.iter().map(|class| class.len()).max().unwrap_or(0);

    eprintln!("Records: {}", records.len());
    eprintln!("Distinct sequences: {}", classes.len());
    eprintln!(
        "Duplicated sequences: {} (largest group: {})",
        duplicated_classes, largest_class
    );
    eprintln!();
    composition.print_residue_stats();

    Ok(())
}

#[derive(Debug)]
struct ResidueComposition {
    counts: [u64; 256],
    total: u64,
}

impl ResidueComposition {
    pub fn new() -> Self {
        Self {
            counts: [0; 256],
            total: 0,
        }
    }

    pub fn process_sequence(&mut self, sequence: &FastaSequence) {
        for &residue in sequence.residues().as_bytes() {
            self.counts[residue as usize] += 1;
            self.total += 1;
        }
    }

    pub fn print_residue_stats(&self) {
        eprintln!("Residues: {}", self.total);
        for (residue, &count) in self.counts.iter().enumerate() {
            if count > 0 {
                eprintln!(
                    "  {}: {:.4}%",
                    residue as u8 as char,
                    count as f64 / self.total as f64 * 100.0,
                );
            }
        }
    }
}
