use hapcomp::_internal_test_data::{TRIO_NUCLEOTIDE_SEQUENCES, TRIO_PROTEIN_SEQUENCES};
use hapcomp::dedup::compress;
use hapcomp::fasta::reader::FastaReader;
use hapcomp::fasta::writer::FastaWriter;
use hapcomp::pipeline::{compress_paired, PipelineError};
use hapcomp::provenance::ProvenanceMap;
use hapcomp::reconcile::{reconcile, ReconcileError};
use hapcomp::sequence::FastaSequence;

fn read_all(fasta: &str) -> Vec<FastaSequence> {
    let result: Result<Vec<_>, _> = FastaReader::new(fasta.as_bytes()).into_iter().collect();
    result.unwrap()
}

fn write_all(records: &[FastaSequence]) -> String {
    let mut buf = Vec::new();
    let mut writer = FastaWriter::new(&mut buf);
    for record in records {
        writer.write_sequence(record).unwrap();
    }
    writer.flush().unwrap();

    String::from_utf8(buf).unwrap()
}

#[test_log::test]
fn test_paired_compression_with_duplicates() {
    let result = compress_paired(
        TRIO_PROTEIN_SEQUENCES.clone(),
        TRIO_NUCLEOTIDE_SEQUENCES.clone(),
    )
    .unwrap();

    // two haplotypes remain; classes are ordered by residue content, which
    // puts C ("ATGAAAACT") before A ("ATGAAAGTT")
    assert_eq!(result.nucleotide.len(), 2);
    assert_eq!(result.nucleotide[0].identifier().str(), "C");
    assert_eq!(result.nucleotide[1].identifier().str(), "A");

    let expected_provenance = r#"{
    "A": {
        "0": "A",
        "1": "B"
    },
    "C": {
        "0": "C"
    }
}"#;
    assert_eq!(result.protein_provenance.to_json().unwrap(), expected_provenance);
    assert_eq!(
        result.nucleotide_provenance.to_json().unwrap(),
        expected_provenance
    );

    assert_eq!(write_all(&result.protein), ">C\nMKT\n>A\nMKV\n");
    assert_eq!(write_all(&result.nucleotide), ">C\nATGAAAACT\n>A\nATGAAAGTT\n");
}

#[test]
fn test_paired_compression_without_duplicates() {
    let protein = read_all(">P1\nMKV\n>P2\nMKT\n");
    let nucleotide = read_all(">P1\nATGAAAGTT\n>P2\nATGAAAACT\n");

    let result = compress_paired(protein.clone(), nucleotide.clone()).unwrap();

    assert_eq!(result.protein.len(), protein.len());
    assert_eq!(result.nucleotide.len(), nucleotide.len());
    for representative in result
        .nucleotide_provenance
        .representatives()
        .chain(result.protein_provenance.representatives())
    {
        let members = result
            .nucleotide_provenance
            .members_of(representative)
            .or_else(|| result.protein_provenance.members_of(representative))
            .unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0], representative);
    }
}

#[test]
fn test_paired_compression_of_empty_inputs() {
    let protein = read_all("");
    let nucleotide = read_all("");

    let result = compress_paired(protein, nucleotide).unwrap();

    assert!(result.protein.is_empty());
    assert!(result.nucleotide.is_empty());
    assert_eq!(result.protein_provenance.to_json().unwrap(), "{}");
    assert_eq!(result.nucleotide_provenance.to_json().unwrap(), "{}");
}

#[test]
fn test_headers_with_descriptions_are_canonicalized() {
    let protein = read_all(">A surveillance isolate 1\nMKV\n>B other text\nMKV\n");
    let nucleotide = read_all(">A surveillance isolate 1\nATGAAAGTT\n>B other text\nATGAAAGTT\n");

    let result = compress_paired(protein, nucleotide).unwrap();

    assert_eq!(write_all(&result.protein), ">A\nMKV\n");
    assert_eq!(write_all(&result.nucleotide), ">A\nATGAAAGTT\n");
}

#[test]
fn test_provenance_round_trip() {
    let classes = compress(TRIO_NUCLEOTIDE_SEQUENCES.clone()).unwrap();
    let provenance = ProvenanceMap::from_classes(&classes);

    for class in &classes {
        let members = provenance
            .members_of(class.representative().identifier().str())
            .unwrap();

        let expected: Vec<&str> = class
            .members()
            .iter()
            .map(|member| member.identifier().str())
            .collect();
        assert_eq!(members, expected);
    }
}

#[test]
fn test_reconciliation_mirrors_representative_list() {
    let nucleotide_classes = compress(TRIO_NUCLEOTIDE_SEQUENCES.clone()).unwrap();
    let representatives: Vec<FastaSequence> = nucleotide_classes
        .into_iter()
        .map(|class| class.into_representative())
        .collect();

    let result = reconcile(&TRIO_PROTEIN_SEQUENCES, &representatives).unwrap();

    assert_eq!(result.len(), representatives.len());
    for (protein, representative) in result.iter().zip(&representatives) {
        assert_eq!(protein.identifier(), representative.identifier());
    }
}

#[test_log::test]
fn test_missing_cross_reference_is_fatal() {
    let protein = read_all(">A\nMKV\n");
    let nucleotide = read_all(">A\nATGAAAGTT\n>X1\nATGAAAACT\n");

    let err = compress_paired(protein, nucleotide).unwrap_err();

    match err {
        PipelineError::Reconcile(ReconcileError::MissingCrossReference(identifier)) => {
            assert_eq!(identifier.str(), "X1");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_fasta_round_trip_preserves_records() {
    let input = ">A\nMKV\n>B\nMKV\n>C\nMKT\n";

    let records = read_all(input);

    assert_eq!(write_all(&records), input);
}
