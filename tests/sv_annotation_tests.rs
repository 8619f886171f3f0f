//! Structural variant annotation against hg19 transcripts
//!
//! Deletions and duplications carry CIPOS=-10,10 and CIEND=-10,10, so the
//! outer affected interval starts 10 bases after POS.

mod common;

use common::{ci, forward_transcript, hg19_chr1, hg19_db, pos, reverse_transcript, sv_deletion, sv_duplication};
use ferro_annotate::annotation::builders::structural;
use ferro_annotate::annotation::{AnnotationCollector, VariantAnnotator};
use ferro_annotate::config::AnnotationOptions;
use ferro_annotate::variant::{GenomeVariant, StructuralVariant, SvInfo};
use ferro_annotate::vcf::{AnnEncoder, VariantRecord};
use ferro_annotate::VariantEffect;
use rstest::rstest;

fn ann(anno: &ferro_annotate::VariantAnnotation, allele: &str) -> String {
    AnnEncoder::default().encode(anno, allele)
}

// =============================================================================
// Deletions
// =============================================================================

#[rstest]
#[case::ablation(6_640_000, 20_000,
    "<DEL>|transcript_ablation&copy_number_loss&copy_number_decrease&structural_variant&coding_transcript_variant|HIGH|ZBTB48||transcript|uc001anx.3|Coding||||||||")]
#[case::exon_loss(6_640_000, 200,
    "<DEL>|exon_loss_variant&copy_number_loss&copy_number_decrease&structural_variant&coding_transcript_variant|HIGH|ZBTB48||transcript|uc001anx.3|Coding||||||||")]
#[case::truncation(6_640_000, 100,
    "<DEL>|feature_truncation&copy_number_loss&copy_number_decrease&structural_variant&coding_transcript_variant|HIGH|ZBTB48||transcript|uc001anx.3|Coding||||||||")]
#[case::upstream(6_640_000, 50,
    "<DEL>|copy_number_decrease&upstream_gene_variant&structural_variant&coding_transcript_variant|MODIFIER|ZBTB48||transcript|uc001anx.3|Coding|||||||2|")]
#[case::downstream(6_649_341, 100,
    "<DEL>|copy_number_decrease&downstream_gene_variant&structural_variant&coding_transcript_variant|MODIFIER|ZBTB48||transcript|uc001anx.3|Coding|||||||11|")]
#[case::intron(6_640_340, 100,
    "<DEL>|copy_number_decrease&intron_variant&structural_variant&coding_transcript_variant|MODIFIER|ZBTB48||transcript|uc001anx.3|Coding||||||||")]
fn test_deletion_forward(#[case] at: i64, #[case] len: u64, #[case] expected: &str) {
    let dict = hg19_chr1();
    let tx = forward_transcript(&dict);
    let sv = sv_deletion(&dict, at, len);
    let anno = structural::deletion(Some(&tx), &sv, &AnnotationOptions::default()).unwrap();
    assert_eq!(ann(&anno, "<DEL>"), expected);
}

#[rstest]
#[case::ablation(23_685_900, 20_000, VariantEffect::TranscriptAblation)]
#[case::exon_loss(23_685_900, 5_000, VariantEffect::ExonLossVariant)]
#[case::truncation(23_685_940, 200, VariantEffect::FeatureTruncation)]
fn test_deletion_reverse_overlapping(
    #[case] at: i64,
    #[case] len: u64,
    #[case] expected: VariantEffect,
) {
    let dict = hg19_chr1();
    let tx = reverse_transcript(&dict);
    let sv = sv_deletion(&dict, at, len);
    let anno = structural::deletion(Some(&tx), &sv, &AnnotationOptions::default()).unwrap();
    assert_eq!(anno.most_pathogenic_effect(), Some(expected));
    assert!(anno.effects().contains(&VariantEffect::CopyNumberLoss));
    assert_eq!(anno.putative_impact().map(|i| i.as_str()), Some("HIGH"));
    assert_eq!(anno.gene_symbol(), "ZNF436");
    assert_eq!(anno.distance(), None);
}

#[rstest]
#[case::upstream(23_696_457, 50, VariantEffect::UpstreamGeneVariant, 110)]
#[case::downstream(23_685_540, 100, VariantEffect::DownstreamGeneVariant, 290)]
fn test_deletion_reverse_neighborhood(
    #[case] at: i64,
    #[case] len: u64,
    #[case] expected: VariantEffect,
    #[case] distance: u64,
) {
    let dict = hg19_chr1();
    let tx = reverse_transcript(&dict);
    let sv = sv_deletion(&dict, at, len);
    let anno = structural::deletion(Some(&tx), &sv, &AnnotationOptions::default()).unwrap();
    assert!(anno.effects().contains(&expected));
    assert_eq!(anno.distance(), Some(distance));
    assert_eq!(anno.transcript().unwrap().accession, "uc001bgu.3");
}

#[test]
fn test_deletion_reverse_intergenic() {
    let dict = hg19_chr1();
    let tx = reverse_transcript(&dict);
    let sv = sv_deletion(&dict, 23_680_940, 100);
    let anno = structural::deletion(Some(&tx), &sv, &AnnotationOptions::default()).unwrap();
    assert!(anno.transcript().is_none());
    assert_eq!(anno.distance(), Some(4_890));
    assert_eq!(
        ann(&anno, "<DEL>"),
        "<DEL>|copy_number_decrease&intergenic_variant&structural_variant|MODIFIER|.|||.||||||||4890|"
    );
}

// =============================================================================
// Duplications
// =============================================================================

#[rstest]
#[case::whole_transcript(6_640_000, 20_000)]
#[case::exonic(6_640_000, 200)]
#[case::intronic(6_640_340, 100)]
fn test_duplication_overlapping(#[case] at: i64, #[case] len: u64) {
    let dict = hg19_chr1();
    let tx = forward_transcript(&dict);
    let sv = sv_duplication(&dict, at, len);
    let anno = structural::duplication(Some(&tx), &sv, &AnnotationOptions::default()).unwrap();
    assert_eq!(
        ann(&anno, "<DUP>"),
        "<DUP>|copy_number_gain&copy_number_increase&transcript_amplification&structural_variant&coding_transcript_variant|HIGH|ZBTB48||transcript|uc001anx.3|Coding||||||||"
    );
}

#[rstest]
#[case::upstream(6_640_000, 50, VariantEffect::UpstreamGeneVariant, Some(2))]
#[case::downstream(6_649_341, 100, VariantEffect::DownstreamGeneVariant, Some(11))]
#[case::intergenic(6_630_340, 100, VariantEffect::IntergenicVariant, Some(9_612))]
fn test_duplication_forward_neighborhood(
    #[case] at: i64,
    #[case] len: u64,
    #[case] expected: VariantEffect,
    #[case] distance: Option<u64>,
) {
    let dict = hg19_chr1();
    let tx = forward_transcript(&dict);
    let sv = sv_duplication(&dict, at, len);
    let anno = structural::duplication(Some(&tx), &sv, &AnnotationOptions::default()).unwrap();
    assert!(anno.effects().contains(&expected));
    assert!(anno.effects().contains(&VariantEffect::CopyNumberIncrease));
    assert!(!anno.effects().contains(&VariantEffect::TranscriptAmplification));
    assert_eq!(anno.distance(), distance);
}

// =============================================================================
// Other types through VCF fields
// =============================================================================

fn from_info(at_one_based: i64, alt: &str, info: &str) -> StructuralVariant {
    let dict = hg19_chr1();
    let info = SvInfo::parse(info).unwrap().unwrap();
    StructuralVariant::from_vcf_fields(pos(&dict, at_one_based - 1), "N", alt, &info).unwrap()
}

#[test]
fn test_insertion_in_exon() {
    let dict = hg19_chr1();
    let tx = forward_transcript(&dict);
    // second exon, no CIPOS
    let sv = from_info(6_640_701, "<INS>", "SVTYPE=INS");
    let anno = structural::insertion(Some(&tx), &sv, &AnnotationOptions::default()).unwrap();
    let effects: Vec<_> = anno.effects().iter().copied().collect();
    assert_eq!(
        effects,
        vec![
            VariantEffect::Insertion,
            VariantEffect::ExonVariant,
            VariantEffect::StructuralVariant,
            VariantEffect::CodingTranscriptVariant,
        ]
    );
}

#[test]
fn test_inversion_covering_transcript() {
    let dict = hg19_chr1();
    let tx = reverse_transcript(&dict);
    let sv = from_info(23_680_001, "<INV>", "SVTYPE=INV;END=23700000");
    let anno = structural::inversion(Some(&tx), &sv, &AnnotationOptions::default()).unwrap();
    assert_eq!(anno.most_pathogenic_effect(), Some(VariantEffect::Inversion));
    assert!(!anno.effects().contains(&VariantEffect::ExonVariant));
}

#[test]
fn test_copy_number_variation_in_intron() {
    let dict = hg19_chr1();
    let tx = forward_transcript(&dict);
    let sv = from_info(6_640_351, "<CNV>", "SVTYPE=CNV;SVLEN=100");
    let anno = structural::copy_number_variation(Some(&tx), &sv, &AnnotationOptions::default()).unwrap();
    assert!(anno.effects().contains(&VariantEffect::CopyNumberChange));
    assert!(anno.effects().contains(&VariantEffect::IntronVariant));
}

#[test]
fn test_sub_typed_sv_code() {
    let sv = from_info(6_640_351, "<DEL:ME:ALU>", "SVTYPE=DEL:ME:ALU;SVLEN=-300");
    assert_eq!(sv.len(), 300);
    assert_eq!(sv.sub_type(), Some("ME:ALU"));
}

#[test]
fn test_confidence_intervals() {
    let dict = hg19_chr1();
    let sv = sv_deletion(&dict, 6_640_000, 100);
    assert_eq!(sv.ci_pos(), ci());
    let outer = sv.affected_interval_outer();
    assert_eq!((outer.begin(), outer.end()), (6_640_010, 6_640_110));
}

// =============================================================================
// Through the annotator
// =============================================================================

#[test]
fn test_annotator_structural_record() {
    let db = hg19_db();
    let annotator = VariantAnnotator::new(&db, AnnotationOptions::default());
    let record =
        VariantRecord::parse("chr1\t6640001\tA\t<DEL>\tSVTYPE=DEL;SVLEN=-200;CIPOS=-10,10;CIEND=-10,10")
            .unwrap();
    let variant = record.to_variant(db.dict()).unwrap();
    assert!(matches!(variant, GenomeVariant::Structural(_)));

    let annos = annotator
        .annotate(&variant, &mut AnnotationCollector::new())
        .unwrap();
    assert_eq!(annos.len(), 1);
    assert_eq!(
        annos.highest_impact_effect(),
        Some(VariantEffect::ExonLossVariant)
    );
}

#[test]
fn test_annotator_break_end_mate() {
    let db = hg19_db();
    let annotator = VariantAnnotator::new(&db, AnnotationOptions::default());
    // break point far from both transcripts, mate inside ZNF436
    let record = VariantRecord::parse("chr1\t10000001\tN\tN[chr1:23690000[\tSVTYPE=BND").unwrap();
    let variant = record.to_variant(db.dict()).unwrap();
    let annos = annotator
        .annotate(&variant, &mut AnnotationCollector::new())
        .unwrap();
    let accessions: Vec<_> = annos
        .iter()
        .filter_map(|a| a.transcript().map(|t| t.accession.clone()))
        .collect();
    assert_eq!(accessions, vec!["uc001bgu.3"]);
    assert!(annos.annotations()[0]
        .effects()
        .contains(&VariantEffect::IntronVariant));
}
