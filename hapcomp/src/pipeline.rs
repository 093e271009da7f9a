//! Paired protein/nucleotide compression: the whole-set operation combining
//! duplicate compression, provenance derivation and cross-reference
//! reconciliation.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use log::info;

use crate::dedup::{self, DedupError};
use crate::progress::{ByteNum, DummyProgressNotifier, ProgressNotifier};
use crate::provenance::ProvenanceMap;
use crate::reconcile::{self, ReconcileError};
use crate::sequence::FastaSequence;

/// Error occurring while compressing a paired sequence set.
#[derive(Debug)]
pub enum PipelineError {
    /// Compressing one of the input sets failed.
    Dedup(DedupError),
    /// The deduplicated sets could not be cross-referenced.
    Reconcile(ReconcileError),
}

impl From<DedupError> for PipelineError {
    fn from(e: DedupError) -> Self {
        Self::Dedup(e)
    }
}

impl From<ReconcileError> for PipelineError {
    fn from(e: ReconcileError) -> Self {
        Self::Reconcile(e)
    }
}

impl Display for PipelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Dedup(e) => write!(f, "{}", e),
            PipelineError::Reconcile(e) => write!(f, "{}", e),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Dedup(e) => Some(e),
            PipelineError::Reconcile(e) => Some(e),
        }
    }
}

/// The result of a paired compression operation.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// The four artifacts of a paired compression run, staged in memory so the
/// caller can commit them to disk only after the whole computation has
/// succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairedCompression {
    /// Protein records mirroring the nucleotide representatives, canonical
    /// headers.
    pub protein: Vec<FastaSequence>,
    /// Nucleotide class representatives, canonical headers.
    pub nucleotide: Vec<FastaSequence>,
    /// Provenance of the independently compressed protein set.
    pub protein_provenance: ProvenanceMap,
    /// Provenance of the compressed nucleotide set.
    pub nucleotide_provenance: ProvenanceMap,
}

/// A builder for `PairedCompressorParams`.
#[derive(Debug, Clone)]
pub struct PairedCompressorParamsBuilder {
    progress_notifier: Arc<dyn ProgressNotifier>,
}

impl PairedCompressorParamsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            progress_notifier: Arc::new(DummyProgressNotifier),
        }
    }

    /// Sets the object notified about compression progress.
    pub fn progress_notifier(&mut self, progress_notifier: Arc<dyn ProgressNotifier>) -> &mut Self {
        let mut new = self;
        new.progress_notifier = progress_notifier;
        new
    }

    /// Builds and returns [`PairedCompressorParams`].
    #[must_use]
    pub fn build(&self) -> PairedCompressorParams {
        PairedCompressorParams {
            progress_notifier: self.progress_notifier.clone(),
        }
    }
}

impl Default for PairedCompressorParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Paired compression params.
#[derive(Debug, Clone)]
pub struct PairedCompressorParams {
    progress_notifier: Arc<dyn ProgressNotifier>,
}

impl PairedCompressorParams {
    /// Returns new builder for `PairedCompressorParams`.
    #[must_use]
    pub fn builder() -> PairedCompressorParamsBuilder {
        PairedCompressorParamsBuilder::new()
    }
}

impl Default for PairedCompressorParams {
    fn default() -> Self {
        PairedCompressorParamsBuilder::default().build()
    }
}

/// Compresses a paired protein/nucleotide sequence set with default params.
///
/// See [`compress_paired_with_params`].
pub fn compress_paired(
    protein: Vec<FastaSequence>,
    nucleotide: Vec<FastaSequence>,
) -> PipelineResult<PairedCompression> {
    compress_paired_with_params(protein, nucleotide, &PairedCompressorParams::default())
}

/// Compresses a paired protein/nucleotide sequence set.
///
/// Both sets are compressed independently, each yielding its own provenance
/// map. The nucleotide pass is authoritative for output order and membership:
/// the emitted protein records are the image of the nucleotide
/// representatives under an identifier lookup over the full protein input,
/// not the protein pass's own representatives. Every emitted record carries a
/// canonical header.
///
/// The operation is pure: nothing is written anywhere, and on error no
/// partial result escapes.
pub fn compress_paired_with_params(
    protein: Vec<FastaSequence>,
    nucleotide: Vec<FastaSequence>,
    params: &PairedCompressorParams,
) -> PipelineResult<PairedCompression> {
    let notifier = &params.progress_notifier;

    let protein_bytes = total_size(&protein);
    let nucleotide_bytes = total_size(&nucleotide);
    let nucleotide_num = nucleotide.len();

    let protein_classes = dedup::compress(protein.clone())?;
    let protein_provenance = ProvenanceMap::from_classes(&protein_classes);
    drop(protein_classes);
    notifier.processed_bytes(protein_bytes);

    let nucleotide_classes = dedup::compress(nucleotide)?;
    let nucleotide_provenance = ProvenanceMap::from_classes(&nucleotide_classes);
    let nucleotide_out: Vec<FastaSequence> = nucleotide_classes
        .into_iter()
        .map(|class| class.into_representative().into_canonical())
        .collect();
    notifier.processed_bytes(nucleotide_bytes);

    let protein_out: Vec<FastaSequence> = reconcile::reconcile(&protein, &nucleotide_out)?
        .into_iter()
        .map(FastaSequence::into_canonical)
        .collect();

    info!(
        "Compressed {} protein / {} nucleotide records into {} haplotypes",
        protein.len(),
        nucleotide_num,
        nucleotide_out.len(),
    );

    Ok(PairedCompression {
        protein: protein_out,
        nucleotide: nucleotide_out,
        protein_provenance,
        nucleotide_provenance,
    })
}

fn total_size(records: &[FastaSequence]) -> ByteNum {
    records
        .iter()
        .map(FastaSequence::size)
        .fold(ByteNum::ZERO, |acc, size| acc + size)
}

#[cfg(test)]
mod tests {
    use crate::pipeline::{compress_paired, PipelineError};
    use crate::reconcile::ReconcileError;
    use crate::sequence::FastaSequence;

    fn records(pairs: &[(&str, &str)]) -> Vec<FastaSequence> {
        pairs
            .iter()
            .map(|&(identifier, residues)| FastaSequence::new(identifier, residues))
            .collect()
    }

    #[test]
    fn nucleotide_pass_is_authoritative_for_order() {
        // protein duplicates differ structurally from the nucleotide ones:
        // "B" is a protein duplicate of "A" but a distinct nucleotide
        let protein = records(&[("A", "MKV"), ("B", "MKV"), ("C", "MKT")]);
        let nucleotide = records(&[("A", "ATGAAAGTT"), ("B", "ATGAAGGTC"), ("C", "ATGAAAACT")]);

        let result = compress_paired(protein, nucleotide).unwrap();

        let nuc_ids: Vec<&str> = result
            .nucleotide
            .iter()
            .map(|rec| rec.identifier().str())
            .collect();
        let prot_ids: Vec<&str> = result
            .protein
            .iter()
            .map(|rec| rec.identifier().str())
            .collect();
        assert_eq!(prot_ids, nuc_ids);
        assert_eq!(result.protein.len(), 3);
        assert_eq!(result.protein_provenance.len(), 2);
        assert_eq!(result.nucleotide_provenance.len(), 3);
    }

    #[test]
    fn emitted_records_are_canonical() {
        let protein = vec![
            FastaSequence::new("A", "MKV").with_description(Some("protein isolate".to_owned()))
        ];
        let nucleotide = vec![
            FastaSequence::new("A", "ATG").with_description(Some("nuc isolate".to_owned()))
        ];

        let result = compress_paired(protein, nucleotide).unwrap();

        assert_eq!(result.protein[0].description(), None);
        assert_eq!(result.nucleotide[0].description(), None);
    }

    #[test]
    fn missing_cross_reference_aborts() {
        let protein = records(&[("A", "MKV")]);
        let nucleotide = records(&[("X1", "ATG")]);

        let err = compress_paired(protein, nucleotide).unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Reconcile(ReconcileError::MissingCrossReference(ref id))
                if id.str() == "X1"
        ));
    }

    #[test]
    fn empty_inputs_produce_empty_outputs() {
        let result = compress_paired(Vec::new(), Vec::new()).unwrap();

        assert!(result.protein.is_empty());
        assert!(result.nucleotide.is_empty());
        assert!(result.protein_provenance.is_empty());
        assert!(result.nucleotide_provenance.is_empty());
    }
}
