//! Encoding of annotations as VCF `ANN` values
//!
//! One `ANN` entry per (allele, transcript) with sixteen `|`-separated
//! fields in [`AnnField`] order. Multiple entries of one variant are joined
//! by `,`. Field values are percent-escaped unless escaping is turned off,
//! which is meant for debugging output only.
//!
//! # Example
//!
//! ```
//! use ferro_annotate::vcf::{escape_value, AnnField};
//!
//! assert_eq!(AnnField::Distance.index(), 14);
//! assert_eq!(escape_value("a b;c=d"), "a%20b%3Bc%3Dd");
//! ```

use std::fmt;

use crate::annotation::{PositionAndLength, VariantAnnotation, VariantAnnotations};
use crate::effect::VariantEffect;
use crate::error::AnnotateError;

/// INFO key of the annotation field
pub const INFO_ANN: &str = "ANN";

/// Header line describing the `ANN` field
pub const ANN_HEADER: &str = "##INFO=<ID=ANN,Number=.,Type=String,Description=\"Functional annotations: \
'Allele | Annotation | Annotation_Impact | Gene_Name | Gene_ID | Feature_Type | Feature_ID | \
Transcript_BioType | Rank | HGVS.c | HGVS.p | cDNA.pos / cDNA.length | CDS.pos / CDS.length | \
AA.pos / AA.length | Distance | ERRORS / WARNINGS / INFO'\">";

/// Fields of an `ANN` entry, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnnField {
    Allele,
    Annotation,
    AnnotationImpact,
    GeneName,
    GeneId,
    FeatureType,
    FeatureId,
    TranscriptBiotype,
    Rank,
    HgvsC,
    HgvsP,
    CdnaPosition,
    CdsPosition,
    AaPosition,
    Distance,
    Messages,
}

impl AnnField {
    pub const ALL: [AnnField; 16] = [
        AnnField::Allele,
        AnnField::Annotation,
        AnnField::AnnotationImpact,
        AnnField::GeneName,
        AnnField::GeneId,
        AnnField::FeatureType,
        AnnField::FeatureId,
        AnnField::TranscriptBiotype,
        AnnField::Rank,
        AnnField::HgvsC,
        AnnField::HgvsP,
        AnnField::CdnaPosition,
        AnnField::CdsPosition,
        AnnField::AaPosition,
        AnnField::Distance,
        AnnField::Messages,
    ];

    /// 0-based column index
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Column name as used in the header description
    pub fn name(&self) -> &'static str {
        match self {
            AnnField::Allele => "Allele",
            AnnField::Annotation => "Annotation",
            AnnField::AnnotationImpact => "Annotation_Impact",
            AnnField::GeneName => "Gene_Name",
            AnnField::GeneId => "Gene_ID",
            AnnField::FeatureType => "Feature_Type",
            AnnField::FeatureId => "Feature_ID",
            AnnField::TranscriptBiotype => "Transcript_BioType",
            AnnField::Rank => "Rank",
            AnnField::HgvsC => "HGVS.c",
            AnnField::HgvsP => "HGVS.p",
            AnnField::CdnaPosition => "cDNA.pos / cDNA.length",
            AnnField::CdsPosition => "CDS.pos / CDS.length",
            AnnField::AaPosition => "AA.pos / AA.length",
            AnnField::Distance => "Distance",
            AnnField::Messages => "ERRORS / WARNINGS / INFO",
        }
    }
}

impl fmt::Display for AnnField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Percent-escape characters that may not appear in a VCF INFO value
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '%' => out.push_str("%25"),
            ';' => out.push_str("%3B"),
            '=' => out.push_str("%3D"),
            ',' => out.push_str("%2C"),
            '|' => out.push_str("%7C"),
            ' ' => out.push_str("%20"),
            '\t' => out.push_str("%09"),
            '\n' => out.push_str("%0A"),
            '\r' => out.push_str("%0D"),
            c => out.push(c),
        }
    }
    out
}

/// Serializes annotations into `ANN` values
#[derive(Debug, Clone, Copy)]
pub struct AnnEncoder {
    escape: bool,
}

impl Default for AnnEncoder {
    fn default() -> Self {
        Self { escape: true }
    }
}

impl AnnEncoder {
    /// Encoder with escaping turned on or off
    pub fn new(escape: bool) -> Self {
        Self { escape }
    }

    pub fn escapes(&self) -> bool {
        self.escape
    }

    fn field(&self, value: &str) -> String {
        if self.escape {
            escape_value(value)
        } else {
            value.to_string()
        }
    }

    /// The sixteen raw field values of one annotation
    pub fn fields(&self, annotation: &VariantAnnotation, allele: &str) -> [String; 16] {
        let tx = annotation.transcript();
        let effects: Vec<&str> = annotation
            .effects()
            .iter()
            .map(VariantEffect::so_term)
            .collect();
        let hgvs_c = match (annotation.nucleotide_change(), tx) {
            (Some(change), _) => change.to_hgvs(),
            (None, None) => annotation.genomic_change().unwrap_or_default().to_string(),
            (None, Some(_)) => String::new(),
        };
        let distance = annotation
            .effects()
            .iter()
            .any(VariantEffect::has_distance)
            .then(|| annotation.distance())
            .flatten()
            .map(|d| d.to_string())
            .unwrap_or_default();
        let messages: Vec<&str> = annotation.messages().iter().map(|m| m.as_str()).collect();
        let positions = annotation.positions();
        let show = |p: Option<PositionAndLength>| p.map(|p| p.to_string()).unwrap_or_default();

        [
            allele.to_string(),
            effects.join("&"),
            annotation
                .putative_impact()
                .map(|i| i.as_str().to_string())
                .unwrap_or_default(),
            annotation.gene_symbol().to_string(),
            tx.and_then(|t| t.gene_id.clone()).unwrap_or_default(),
            tx.map(|_| "transcript".to_string()).unwrap_or_default(),
            tx.map(|t| t.accession.clone())
                .unwrap_or_else(|| ".".to_string()),
            tx.map(|t| if t.is_coding() { "Coding" } else { "Noncoding" }.to_string())
                .unwrap_or_default(),
            annotation
                .location()
                .and_then(|l| l.rank_string())
                .unwrap_or_default(),
            hgvs_c,
            annotation
                .protein_change()
                .map(|p| p.to_hgvs())
                .unwrap_or_default(),
            show(positions.cdna),
            show(positions.cds),
            show(positions.protein),
            distance,
            messages.join("&"),
        ]
    }

    /// One `ANN` entry for `annotation` of `allele`
    pub fn encode(&self, annotation: &VariantAnnotation, allele: &str) -> String {
        self.fields(annotation, allele)
            .iter()
            .enumerate()
            .map(|(idx, value)| {
                // effect and message lists keep their `&` separators
                if idx == AnnField::Annotation.index() || idx == AnnField::Messages.index() {
                    value
                        .split('&')
                        .map(|part| self.field(part))
                        .collect::<Vec<_>>()
                        .join("&")
                } else {
                    self.field(value)
                }
            })
            .collect::<Vec<_>>()
            .join("|")
    }

    /// All annotations of a variant, comma-separated
    pub fn encode_all(&self, annotations: &VariantAnnotations, allele: &str) -> String {
        annotations
            .iter()
            .map(|a| self.encode(a, allele))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Entry reporting that `allele` could not be annotated
    pub fn error_entry(&self, allele: &str, error: &AnnotateError) -> String {
        let message = format!("ERROR_{}:{}", error.root_cause().code(), error);
        format!(
            "{}{}{}",
            self.field(allele),
            "|".repeat(AnnField::ALL.len() - 1),
            self.field(&message)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{AnnotationLocation, AnnotationMessage};
    use crate::coords::{GenomeInterval, GenomePosition, PositionType, ReferenceDictionary, Strand};
    use crate::reference::TranscriptModel;
    use crate::variant::SmallGenomeVariant;
    use std::sync::Arc;

    fn dict() -> Arc<ReferenceDictionary> {
        let mut dict = ReferenceDictionary::new();
        dict.add_contig(1, "chr1", 10_000);
        Arc::new(dict)
    }

    fn snv(dict: &Arc<ReferenceDictionary>) -> SmallGenomeVariant {
        let pos = GenomePosition::new(dict, Strand::Plus, 1, 50, PositionType::ZeroBased).unwrap();
        SmallGenomeVariant::new(pos, "A", "C")
    }

    #[test]
    fn test_escape_value() {
        assert_eq!(escape_value("plain"), "plain");
        assert_eq!(escape_value("50%|x,y"), "50%25%7Cx%2Cy");
        assert_eq!(escape_value("a\tb\nc"), "a%09b%0Ac");
    }

    #[test]
    fn test_ann_field_order() {
        for (idx, field) in AnnField::ALL.iter().enumerate() {
            assert_eq!(field.index(), idx);
        }
        assert_eq!(AnnField::Messages.name(), "ERRORS / WARNINGS / INFO");
    }

    #[test]
    fn test_encode_intergenic() {
        let dict = dict();
        let variant = snv(&dict);
        let anno = VariantAnnotation::new(variant.clone(), None, [VariantEffect::IntergenicVariant])
            .with_genomic_change(Some(variant.genomic_change()))
            .with_distance(Some(120));
        assert_eq!(
            AnnEncoder::default().encode(&anno, "C"),
            "C|intergenic_variant|MODIFIER|.|||.|||g.51A>C|||||120|"
        );
    }

    #[test]
    fn test_encode_transcript() {
        let dict = dict();
        let itv = |b, e| GenomeInterval::from_bounds(&dict, Strand::Plus, 1, b, e).unwrap();
        let tx = Arc::new(
            TranscriptModel::new("tx 1", itv(0, 100), itv(0, 0), vec![itv(0, 100)])
                .unwrap()
                .with_gene_symbol("G1")
                .with_gene_id("ID1"),
        );
        let anno = VariantAnnotation::new(
            snv(&dict),
            Some(Arc::clone(&tx)),
            [
                VariantEffect::NonCodingTranscriptExonVariant,
                VariantEffect::NonCodingTranscriptVariant,
            ],
        )
        .with_location(Some(AnnotationLocation::exon(&tx, 0, None)))
        .with_distance(Some(7))
        .with_messages([AnnotationMessage::WarningRefDoesNotMatchGenome]);

        let escaped = AnnEncoder::new(true).encode(&anno, "C");
        assert_eq!(
            escaped,
            "C|non_coding_transcript_exon_variant&non_coding_transcript_variant|MODIFIER|G1|ID1|\
             transcript|tx%201|Noncoding|1/1|||||||WARNING_REF_DOES_NOT_MATCH_GENOME"
        );
        let raw = AnnEncoder::new(false).encode(&anno, "C");
        assert!(raw.contains("|tx 1|"));
        assert_eq!(raw.split('|').count(), 16);
    }

    #[test]
    fn test_error_entry() {
        let err = AnnotateError::annotation(
            "chr1:g.51A>C",
            Some("tx1"),
            AnnotateError::invalid_variant("bad"),
        );
        let entry = AnnEncoder::default().error_entry("C", &err);
        assert_eq!(entry.split('|').count(), 16);
        assert!(entry.starts_with("C|||"));
        assert!(entry.contains("ERROR_E1001"));
        assert!(!entry.contains(' '));
    }
}
