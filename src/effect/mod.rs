//! Sequence Ontology effect terms.
//!
//! [`VariantEffect`] variants are declared from most to least pathogenic;
//! the derived `Ord` is the pathogenicity ranking used to sort effects and
//! annotations.
//!
//! # Example
//!
//! ```
//! use ferro_annotate::effect::{Impact, VariantEffect};
//!
//! assert!(VariantEffect::TranscriptAblation < VariantEffect::MissenseVariant);
//! assert_eq!(VariantEffect::MissenseVariant.so_term(), "missense_variant");
//! assert_eq!(VariantEffect::MissenseVariant.impact(), Impact::Moderate);
//! ```

use std::fmt;

/// Sequence Ontology consequence term, in pathogenicity order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VariantEffect {
    /// Whole transcript deleted.
    TranscriptAblation,
    /// Complete exon deleted.
    ExonLossVariant,
    /// Part of a feature deleted.
    FeatureTruncation,
    CopyNumberLoss,
    CopyNumberGain,
    CopyNumberChange,
    CopyNumberDecrease,
    CopyNumberIncrease,
    /// Whole transcript duplicated.
    TranscriptAmplification,
    Inversion,
    Insertion,
    /// Insertion/deletion causing frameshift.
    FrameshiftVariant,
    /// Introduces a premature stop codon.
    StopGained,
    /// Stop codon changed to amino acid.
    StopLost,
    /// Start codon changed to other.
    StartLost,
    /// Within the intronic bases of a splice acceptor site (AG).
    SpliceAcceptorVariant,
    /// Within the intronic bases of a splice donor site (GT).
    SpliceDonorVariant,
    /// Amino acid substitution.
    MissenseVariant,
    InframeInsertion,
    /// In-frame insertion that changes the codon at the insertion site.
    DisruptiveInframeInsertion,
    InframeDeletion,
    /// In-frame deletion not aligned to codon boundaries.
    DisruptiveInframeDeletion,
    /// Multi-nucleotide substitution.
    Mnv,
    /// Close to a splice site.
    SpliceRegionVariant,
    StopRetainedVariant,
    StartRetainedVariant,
    /// Silent change (codon change, same amino acid).
    SynonymousVariant,
    /// Coding change whose protein effect is unknown.
    CodingSequenceVariant,
    FivePrimeUtrExonVariant,
    ThreePrimeUtrExonVariant,
    FivePrimeUtrIntronVariant,
    ThreePrimeUtrIntronVariant,
    CodingTranscriptIntronVariant,
    NonCodingTranscriptExonVariant,
    NonCodingTranscriptIntronVariant,
    ExonVariant,
    IntronVariant,
    UpstreamGeneVariant,
    DownstreamGeneVariant,
    IntergenicVariant,
    StructuralVariant,
    CodingTranscriptVariant,
    NonCodingTranscriptVariant,
    /// Catch-all term.
    SequenceVariant,
}

impl VariantEffect {
    /// Get the Sequence Ontology term.
    pub fn so_term(&self) -> &'static str {
        match self {
            VariantEffect::TranscriptAblation => "transcript_ablation",
            VariantEffect::ExonLossVariant => "exon_loss_variant",
            VariantEffect::FeatureTruncation => "feature_truncation",
            VariantEffect::CopyNumberLoss => "copy_number_loss",
            VariantEffect::CopyNumberGain => "copy_number_gain",
            VariantEffect::CopyNumberChange => "copy_number_change",
            VariantEffect::CopyNumberDecrease => "copy_number_decrease",
            VariantEffect::CopyNumberIncrease => "copy_number_increase",
            VariantEffect::TranscriptAmplification => "transcript_amplification",
            VariantEffect::Inversion => "inversion",
            VariantEffect::Insertion => "insertion",
            VariantEffect::FrameshiftVariant => "frameshift_variant",
            VariantEffect::StopGained => "stop_gained",
            VariantEffect::StopLost => "stop_lost",
            VariantEffect::StartLost => "start_lost",
            VariantEffect::SpliceAcceptorVariant => "splice_acceptor_variant",
            VariantEffect::SpliceDonorVariant => "splice_donor_variant",
            VariantEffect::MissenseVariant => "missense_variant",
            VariantEffect::InframeInsertion => "inframe_insertion",
            VariantEffect::DisruptiveInframeInsertion => "disruptive_inframe_insertion",
            VariantEffect::InframeDeletion => "inframe_deletion",
            VariantEffect::DisruptiveInframeDeletion => "disruptive_inframe_deletion",
            VariantEffect::Mnv => "MNV",
            VariantEffect::SpliceRegionVariant => "splice_region_variant",
            VariantEffect::StopRetainedVariant => "stop_retained_variant",
            VariantEffect::StartRetainedVariant => "start_retained_variant",
            VariantEffect::SynonymousVariant => "synonymous_variant",
            VariantEffect::CodingSequenceVariant => "coding_sequence_variant",
            VariantEffect::FivePrimeUtrExonVariant => "5_prime_UTR_exon_variant",
            VariantEffect::ThreePrimeUtrExonVariant => "3_prime_UTR_exon_variant",
            VariantEffect::FivePrimeUtrIntronVariant => "5_prime_UTR_intron_variant",
            VariantEffect::ThreePrimeUtrIntronVariant => "3_prime_UTR_intron_variant",
            VariantEffect::CodingTranscriptIntronVariant => "coding_transcript_intron_variant",
            VariantEffect::NonCodingTranscriptExonVariant => "non_coding_transcript_exon_variant",
            VariantEffect::NonCodingTranscriptIntronVariant => {
                "non_coding_transcript_intron_variant"
            }
            VariantEffect::ExonVariant => "exon_variant",
            VariantEffect::IntronVariant => "intron_variant",
            VariantEffect::UpstreamGeneVariant => "upstream_gene_variant",
            VariantEffect::DownstreamGeneVariant => "downstream_gene_variant",
            VariantEffect::IntergenicVariant => "intergenic_variant",
            VariantEffect::StructuralVariant => "structural_variant",
            VariantEffect::CodingTranscriptVariant => "coding_transcript_variant",
            VariantEffect::NonCodingTranscriptVariant => "non_coding_transcript_variant",
            VariantEffect::SequenceVariant => "sequence_variant",
        }
    }

    /// Get the Sequence Ontology ID.
    pub fn so_id(&self) -> &'static str {
        match self {
            VariantEffect::TranscriptAblation => "SO:0001893",
            VariantEffect::ExonLossVariant => "SO:0001572",
            VariantEffect::FeatureTruncation => "SO:0001906",
            VariantEffect::CopyNumberLoss => "SO:0001743",
            VariantEffect::CopyNumberGain => "SO:0001742",
            VariantEffect::CopyNumberChange => "SO:0001563",
            VariantEffect::CopyNumberDecrease => "SO:0001912",
            VariantEffect::CopyNumberIncrease => "SO:0001911",
            VariantEffect::TranscriptAmplification => "SO:0001889",
            VariantEffect::Inversion => "SO:1000036",
            VariantEffect::Insertion => "SO:0000667",
            VariantEffect::FrameshiftVariant => "SO:0001589",
            VariantEffect::StopGained => "SO:0001587",
            VariantEffect::StopLost => "SO:0001578",
            VariantEffect::StartLost => "SO:0002012",
            VariantEffect::SpliceAcceptorVariant => "SO:0001574",
            VariantEffect::SpliceDonorVariant => "SO:0001575",
            VariantEffect::MissenseVariant => "SO:0001583",
            VariantEffect::InframeInsertion => "SO:0001821",
            VariantEffect::DisruptiveInframeInsertion => "SO:0001824",
            VariantEffect::InframeDeletion => "SO:0001822",
            VariantEffect::DisruptiveInframeDeletion => "SO:0001826",
            VariantEffect::Mnv => "SO:0002007",
            VariantEffect::SpliceRegionVariant => "SO:0001630",
            VariantEffect::StopRetainedVariant => "SO:0001567",
            VariantEffect::StartRetainedVariant => "SO:0002019",
            VariantEffect::SynonymousVariant => "SO:0001819",
            VariantEffect::CodingSequenceVariant => "SO:0001580",
            VariantEffect::FivePrimeUtrExonVariant => "SO:0002092",
            VariantEffect::ThreePrimeUtrExonVariant => "SO:0002089",
            VariantEffect::FivePrimeUtrIntronVariant => "SO:0002091",
            VariantEffect::ThreePrimeUtrIntronVariant => "SO:0002090",
            VariantEffect::CodingTranscriptIntronVariant => "SO:0001969",
            VariantEffect::NonCodingTranscriptExonVariant => "SO:0001792",
            VariantEffect::NonCodingTranscriptIntronVariant => "SO:0001970",
            VariantEffect::ExonVariant => "SO:0001791",
            VariantEffect::IntronVariant => "SO:0001627",
            VariantEffect::UpstreamGeneVariant => "SO:0001631",
            VariantEffect::DownstreamGeneVariant => "SO:0001632",
            VariantEffect::IntergenicVariant => "SO:0001628",
            VariantEffect::StructuralVariant => "SO:0001537",
            VariantEffect::CodingTranscriptVariant => "SO:0001968",
            VariantEffect::NonCodingTranscriptVariant => "SO:0001619",
            VariantEffect::SequenceVariant => "SO:0001060",
        }
    }

    /// Get the impact level.
    pub fn impact(&self) -> Impact {
        match self {
            VariantEffect::TranscriptAblation
            | VariantEffect::ExonLossVariant
            | VariantEffect::FeatureTruncation
            | VariantEffect::CopyNumberLoss
            | VariantEffect::CopyNumberGain
            | VariantEffect::TranscriptAmplification
            | VariantEffect::Inversion
            | VariantEffect::Insertion
            | VariantEffect::FrameshiftVariant
            | VariantEffect::StopGained
            | VariantEffect::StopLost
            | VariantEffect::StartLost
            | VariantEffect::SpliceAcceptorVariant
            | VariantEffect::SpliceDonorVariant => Impact::High,

            VariantEffect::MissenseVariant
            | VariantEffect::InframeInsertion
            | VariantEffect::DisruptiveInframeInsertion
            | VariantEffect::InframeDeletion
            | VariantEffect::DisruptiveInframeDeletion
            | VariantEffect::Mnv => Impact::Moderate,

            VariantEffect::SpliceRegionVariant
            | VariantEffect::StopRetainedVariant
            | VariantEffect::StartRetainedVariant
            | VariantEffect::SynonymousVariant => Impact::Low,

            VariantEffect::CopyNumberChange
            | VariantEffect::CopyNumberDecrease
            | VariantEffect::CopyNumberIncrease
            | VariantEffect::CodingSequenceVariant
            | VariantEffect::FivePrimeUtrExonVariant
            | VariantEffect::ThreePrimeUtrExonVariant
            | VariantEffect::FivePrimeUtrIntronVariant
            | VariantEffect::ThreePrimeUtrIntronVariant
            | VariantEffect::CodingTranscriptIntronVariant
            | VariantEffect::NonCodingTranscriptExonVariant
            | VariantEffect::NonCodingTranscriptIntronVariant
            | VariantEffect::ExonVariant
            | VariantEffect::IntronVariant
            | VariantEffect::UpstreamGeneVariant
            | VariantEffect::DownstreamGeneVariant
            | VariantEffect::IntergenicVariant
            | VariantEffect::StructuralVariant
            | VariantEffect::CodingTranscriptVariant
            | VariantEffect::NonCodingTranscriptVariant
            | VariantEffect::SequenceVariant => Impact::Modifier,
        }
    }

    /// Get a human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            VariantEffect::TranscriptAblation => "Complete transcript deletion",
            VariantEffect::ExonLossVariant => "Complete exon deletion",
            VariantEffect::FeatureTruncation => "Partial deletion of a feature",
            VariantEffect::CopyNumberLoss => "Loss of transcript copies",
            VariantEffect::CopyNumberGain => "Gain of transcript copies",
            VariantEffect::CopyNumberChange => "Change in copy number",
            VariantEffect::CopyNumberDecrease => "Decrease in copy number",
            VariantEffect::CopyNumberIncrease => "Increase in copy number",
            VariantEffect::TranscriptAmplification => "Complete transcript duplication",
            VariantEffect::Inversion => "Inverted sequence",
            VariantEffect::Insertion => "Inserted sequence",
            VariantEffect::FrameshiftVariant => "Frameshift causing protein truncation",
            VariantEffect::StopGained => "Premature stop codon introduced",
            VariantEffect::StopLost => "Stop codon changed to amino acid",
            VariantEffect::StartLost => "Start codon changed",
            VariantEffect::SpliceAcceptorVariant => "Variant in splice acceptor site",
            VariantEffect::SpliceDonorVariant => "Variant in splice donor site",
            VariantEffect::MissenseVariant => "Amino acid substitution",
            VariantEffect::InframeInsertion => "In-frame amino acid insertion",
            VariantEffect::DisruptiveInframeInsertion => "In-frame insertion within a codon",
            VariantEffect::InframeDeletion => "In-frame amino acid deletion",
            VariantEffect::DisruptiveInframeDeletion => "In-frame deletion across codons",
            VariantEffect::Mnv => "Multi-nucleotide substitution",
            VariantEffect::SpliceRegionVariant => "Variant in splice region",
            VariantEffect::StopRetainedVariant => "Stop codon preserved",
            VariantEffect::StartRetainedVariant => "Start codon preserved",
            VariantEffect::SynonymousVariant => "Silent change (same amino acid)",
            VariantEffect::CodingSequenceVariant => "Variant in coding sequence",
            VariantEffect::FivePrimeUtrExonVariant => "Variant in 5' UTR exon",
            VariantEffect::ThreePrimeUtrExonVariant => "Variant in 3' UTR exon",
            VariantEffect::FivePrimeUtrIntronVariant => "Variant in 5' UTR intron",
            VariantEffect::ThreePrimeUtrIntronVariant => "Variant in 3' UTR intron",
            VariantEffect::CodingTranscriptIntronVariant => "Variant in coding transcript intron",
            VariantEffect::NonCodingTranscriptExonVariant => "Variant in non-coding exon",
            VariantEffect::NonCodingTranscriptIntronVariant => "Variant in non-coding intron",
            VariantEffect::ExonVariant => "Variant in exon",
            VariantEffect::IntronVariant => "Variant in intron",
            VariantEffect::UpstreamGeneVariant => "Variant upstream of gene",
            VariantEffect::DownstreamGeneVariant => "Variant downstream of gene",
            VariantEffect::IntergenicVariant => "Variant between genes",
            VariantEffect::StructuralVariant => "Structural variant",
            VariantEffect::CodingTranscriptVariant => "Variant of a coding transcript",
            VariantEffect::NonCodingTranscriptVariant => "Variant of a non-coding transcript",
            VariantEffect::SequenceVariant => "Sequence variant",
        }
    }

    /// Whether the term describes a gene-distance location
    pub fn has_distance(&self) -> bool {
        matches!(
            self,
            VariantEffect::UpstreamGeneVariant
                | VariantEffect::DownstreamGeneVariant
                | VariantEffect::IntergenicVariant
        )
    }
}

impl fmt::Display for VariantEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.so_term())
    }
}

/// Variant impact level (VEP-style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Impact {
    /// Modifier - minimal predicted impact.
    Modifier,
    /// Low impact.
    Low,
    /// Moderate impact.
    Moderate,
    /// High impact (likely deleterious).
    High,
}

impl Impact {
    /// Get the impact as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::High => "HIGH",
            Impact::Moderate => "MODERATE",
            Impact::Low => "LOW",
            Impact::Modifier => "MODIFIER",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_pathogenicity() {
        assert!(VariantEffect::TranscriptAblation < VariantEffect::ExonLossVariant);
        assert!(VariantEffect::CopyNumberLoss < VariantEffect::CopyNumberDecrease);
        assert!(VariantEffect::CopyNumberIncrease < VariantEffect::TranscriptAmplification);
        assert!(VariantEffect::UpstreamGeneVariant < VariantEffect::StructuralVariant);
        assert!(VariantEffect::StructuralVariant < VariantEffect::CodingTranscriptVariant);
    }

    #[test]
    fn test_so_terms() {
        assert_eq!(VariantEffect::FivePrimeUtrExonVariant.so_term(), "5_prime_UTR_exon_variant");
        assert_eq!(VariantEffect::Mnv.to_string(), "MNV");
        assert_eq!(VariantEffect::IntronVariant.so_id(), "SO:0001627");
    }

    #[test]
    fn test_impacts() {
        assert_eq!(VariantEffect::TranscriptAblation.impact(), Impact::High);
        assert_eq!(VariantEffect::CopyNumberDecrease.impact(), Impact::Modifier);
        assert_eq!(VariantEffect::SynonymousVariant.impact(), Impact::Low);
        assert!(Impact::High > Impact::Moderate);
        assert_eq!(Impact::Modifier.to_string(), "MODIFIER");
    }

    #[test]
    fn test_distance_terms() {
        assert!(VariantEffect::IntergenicVariant.has_distance());
        assert!(!VariantEffect::ExonVariant.has_distance());
    }
}
