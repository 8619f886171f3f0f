//! Shared fixtures: hg19 chr1 and two knownGene transcripts on it

#![allow(dead_code)]

use std::sync::Arc;

use ferro_annotate::coords::{GenomePosition, PositionType, ReferenceDictionary, Strand};
use ferro_annotate::reference::{TranscriptDb, TranscriptModel, TranscriptRecord};
use ferro_annotate::variant::{ConfidenceInterval, GenomeVariant, SmallGenomeVariant, StructuralVariant};

/// Length of hg19 chr1
pub const CHR1_LENGTH: u64 = 249_250_621;

/// ZBTB48 (RefSeq NM_005341.3), forward strand, 11 exons
pub const UC001ANX_3: &str = "uc001anx.3\tchr1\t+\t6640062\t6649340\t6640669\t6649272\t11\t\
    6640062,6640600,6642117,6645978,6646754,6647264,6647537,6648119,6648337,6648815,6648975,\t\
    6640196,6641359,6642359,6646090,6646847,6647351,6647692,6648256,6648502,6648904,6649340,\t\
    P10074\tuc001anx.3";

/// ZNF436 (RefSeq NM_001077195.1), reverse strand, 4 exons
pub const UC001BGU_3: &str = "uc001bgu.3\tchr1\t-\t23685940\t23696357\t23688461\t23694498\t4\t\
    23685940,23693534,23694465,23695858,\t23689714,23693661,23694558,23696357,\tQ9C0F3\tuc001bgu.3";

/// mRNA of uc001anx.3 without its poly-A tail
pub const UC001ANX_3_SEQUENCE: &str = "\
    CGTCACGTCCGGCGCGGAGACGGTGGAGTCTCCGCACTGTCGGCGGGGTACGCATAGCCGGGCACTAGGTTCGTGGGCTGTGGAGGCGAC\
    GGAGCAGGGGGCCAGTGGGGCCAGCTCAGGGAGGACCTGCCTGGGAGCTTTCTCTTGCATACCCTCGCTTAGGCTGGCCGGGGTGTCACT\
    TCTGCCTCCCTGCCCTCCAGACCATGGACGGCTCCTTCGTCCAGCACAGTGTGAGGGTTCTGCAGGAGCTCAACAAGCAGCGGGAGAAGG\
    GCCAGTACTGCGACGCCACTCTGGACGTGGGGGGCCTGGTGTTTAAGGCACACTGGAGTGTCCTTGCCTGCTGCAGTCACTTTTTCCAGA\
    GCCTCTACGGGGATGGCTCAGGGGGCAGTGTCGTCCTCCCTGCTGGCTTCGCTGAGATCTTTGGCCTCTTGTTGGACTTTTTCTACACTG\
    GTCACCTCGCTCTCACCTCAGGGAACCGGGATCAGGTGCTCCTGGCAGCCAGGGAGTTGCGAGTGCCAGAGGCCGTAGAGCTGTGCCAGA\
    GCTTCAAGCCCAAAACTTCAGTGGGACAGGCAGCAGGTGGCCAGAGTGGGCTGGGGCCCCCTGCCTCCCAGAATGTGAACAGCCACGTCA\
    AGGAGCCGGCAGGCTTGGAAGAAGAGGAAGTTTCGAGGACTCTGGGTCTAGTCCCCAGGGATCAGGAGCCCAGAGGCAGTCATAGTCCTC\
    AGAGGCCCCAGCTCCATTCCCCAGCTCAGAGTGAGGGCCCCTCCTCCCTCTGTGGGAAACTGAAGCAGGCCTTGAAGCCTTGTCCCCTTG\
    AGGACAAGAAACCCGAGGACTGCAAAGTGCCCCCAAGGCCCTTAGAGGCTGAAGGTGCCCAGCTGCAGGGCGGCAGTAATGAGTGGGAAG\
    TGGTGGTTCAAGTGGAGGATGATGGGGATGGCGATTACATGTCTGAGCCTGAGGCTGTGCTGACCAGGAGGAAGTCAAATGTAATCCGAA\
    AGCCCTGTGCAGCTGAGCCAGCCCTGAGCGCGGGCTCCCTAGCAGCTGAGCCTGCTGAGAACAGAAAAGGTACAGCGGTGCCGGTCGAAT\
    GCCCCACATGTCATAAAAAGTTCCTCAGCAAATATTATCTAAAAGTCCACAACAGGAAACATACTGGGGAGAAACCCTTTGAGTGTCCCA\
    AATGTGGGAAGTGTTACTTTCGGAAGGAGAACCTCCTGGAGCATGAAGCCCGGAATTGCATGAACCGCTCGGAACAGGTCTTCACGTGCT\
    CTGTGTGCCAGGAGACATTCCGCCGAAGGATGGAGCTGCGGGTGCACATGGTGTCTCACACAGGGGAGATGCCCTACAAGTGTTCCTCCT\
    GCTCCCAGCAGTTCATGCAGAAGAAGGACTTGCAGAGCCACATGATCAAACTTCATGGAGCCCCCAAGCCCCATGCATGCCCCACCTGTG\
    CCAAGTGCTTCCTGTCTCGGACAGAGCTGCAGCTGCATGAAGCTTTCAAGCACCGTGGTGAGAAGCTGTTTGTGTGTGAGGAGTGTGGGC\
    ACCGGGCCTCGAGCCGGAATGGCCTGCAGATGCACATCAAGGCCAAGCACAGGAATGAGAGGCCACACGTATGTGAGTTCTGCAGCCACG\
    CCTTCACCCAAAAGGCCAATCTCAACATGCACCTGCGCACACACACGGGTGAGAAGCCCTTCCAGTGCCACCTCTGTGGCAAGACCTTCC\
    GAACCCAAGCCAGCCTGGACAAGCACAACCGCACCCACACCGGGGAAAGGCCCTTCAGTTGCGAGTTCTGTGAACAGCGCTTCACTGAGA\
    AGGGGCCCCTCCTGAGGCACGTGGCCAGCCGCCATCAGGAGGGCCGGCCCCACTTCTGCCAGATATGCGGCAAGACCTTCAAAGCCGTGG\
    AGCAACTGCGTGTGCACGTCAGACGGCACAAGGGGGTGAGGAAGTTTGAGTGCACCGAGTGTGGCTACAAGTTTACCCGACAGGCCCACC\
    TGCGGAGGCACATGGAGATCCACGACCGGGTAGAGAACTACAACCCGCGGCAGCGCAAGCTCCGCAACCTGATCATCGAGGACGAGAAGA\
    TGGTGGTGGTGGCGCTGCAGCCGCCTGCAGAGCTGGAGGTGGGCTCGGCGGAGGTCATTGTGGAGTCCCTGGCCCAGGGCGGCCTGGCCT\
    CCCAGCTCCCCGGCCAGAGACTGTGTGCAGAGGAGAGCTTCACCGGCCCAGGTGTCCTGGAGCCCTCCCTCATCATCACAGCTGCTGTCC\
    CCGAGGACTGTGACACATAGCCCATTCTGGCCACCAGAGCCCACTTGGCCCCACCCCTCAATAAACCGTGTGGCTTTGGACTCTCGTA";

/// Dictionary with chr1 of hg19, aliased as "1"
pub fn hg19_chr1() -> Arc<ReferenceDictionary> {
    let mut dict = ReferenceDictionary::new();
    dict.add_contig(1, "chr1", CHR1_LENGTH);
    dict.add_alias(1, "1");
    Arc::new(dict)
}

fn transcript(dict: &Arc<ReferenceDictionary>, line: &str) -> TranscriptModel {
    TranscriptRecord::from_known_gene_line(line)
        .unwrap()
        .into_model(dict)
        .unwrap()
}

/// ZBTB48 with sequence
pub fn forward_transcript(dict: &Arc<ReferenceDictionary>) -> Arc<TranscriptModel> {
    Arc::new(
        transcript(dict, UC001ANX_3)
            .with_gene_symbol("ZBTB48")
            .with_sequence(UC001ANX_3_SEQUENCE),
    )
}

/// ZNF436 without sequence
pub fn reverse_transcript(dict: &Arc<ReferenceDictionary>) -> Arc<TranscriptModel> {
    Arc::new(transcript(dict, UC001BGU_3).with_gene_symbol("ZNF436"))
}

/// Database holding both transcripts
pub fn hg19_db() -> TranscriptDb {
    let dict = hg19_chr1();
    let txs = vec![
        transcript(&dict, UC001ANX_3)
            .with_gene_symbol("ZBTB48")
            .with_sequence(UC001ANX_3_SEQUENCE),
        transcript(&dict, UC001BGU_3).with_gene_symbol("ZNF436"),
    ];
    TranscriptDb::new(dict, txs)
}

/// 0-based forward position on chr1
pub fn pos(dict: &Arc<ReferenceDictionary>, pos: i64) -> GenomePosition {
    GenomePosition::new(dict, Strand::Plus, 1, pos, PositionType::ZeroBased).unwrap()
}

/// Small variant at a 1-based chr1 position
pub fn small(dict: &Arc<ReferenceDictionary>, one_based: i64, reference: &str, alt: &str) -> GenomeVariant {
    let pos = GenomePosition::new(dict, Strand::Plus, 1, one_based, PositionType::OneBased).unwrap();
    SmallGenomeVariant::new(pos, reference, alt).into()
}

/// The confidence interval used by all structural fixtures
pub fn ci() -> ConfidenceInterval {
    ConfidenceInterval::new(-10, 10)
}

pub fn sv_deletion(dict: &Arc<ReferenceDictionary>, at: i64, len: u64) -> StructuralVariant {
    StructuralVariant::deletion(pos(dict, at), "A", "<DEL>", ci(), len, ci()).unwrap()
}

pub fn sv_duplication(dict: &Arc<ReferenceDictionary>, at: i64, len: u64) -> StructuralVariant {
    StructuralVariant::duplication(pos(dict, at), "A", "<DUP>", ci(), len, ci()).unwrap()
}
