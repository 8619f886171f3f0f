//! Per-transcript annotation builders
//!
//! [`build`] selects the builder for one (transcript, variant) pair:
//!
//! | Variant | Builder |
//! |---------|---------|
//! | any, no transcript | intergenic |
//! | small SNV | [`snv`] |
//! | small insertion | [`insertion`] |
//! | small deletion | [`deletion`] |
//! | small block substitution | [`block_substitution`] |
//! | structural | [`structural`], by SV type |
//!
//! Small variants at or above the SV size threshold are handled by
//! [`large`], which the annotator calls directly.

pub mod block_substitution;
pub mod deletion;
pub mod insertion;
pub mod large;
mod small;
pub mod snv;
pub mod structural;

use std::sync::Arc;

use crate::annotation::change::{ChangeFormatter, HgvsChangeFormatter};
use crate::annotation::variant_annotation::VariantAnnotation;
use crate::config::AnnotationOptions;
use crate::coords::GenomeInterval;
use crate::effect::VariantEffect;
use crate::error::AnnotateError;
use crate::reference::{SequenceOntologyRegions, TranscriptModel};
use crate::variant::{GenomeVariant, SmallGenomeVariant, SmallGenomeVariantType};
use crate::Result;

/// Annotate `variant` on `tx` with the HGVS change formatter
pub fn build(
    tx: Option<&Arc<TranscriptModel>>,
    variant: &GenomeVariant,
    options: &AnnotationOptions,
) -> Result<VariantAnnotation> {
    build_with_formatter(tx, variant, options, &HgvsChangeFormatter)
}

/// Annotate `variant` on `tx` using `formatter` for change descriptions
///
/// Fails with [`AnnotateError::InvalidGenomeVariant`] when the variant
/// cannot be handled by the builder its type selects.
pub fn build_with_formatter(
    tx: Option<&Arc<TranscriptModel>>,
    variant: &GenomeVariant,
    options: &AnnotationOptions,
    formatter: &dyn ChangeFormatter,
) -> Result<VariantAnnotation> {
    match variant {
        GenomeVariant::Small(small) => {
            let Some(tx) = tx else {
                return Ok(intergenic(small));
            };
            if small.is_symbolic() {
                return Err(AnnotateError::invalid_variant(format!(
                    "symbolic allele in {} needs the structural builder",
                    small
                )));
            }
            log::debug!(
                "{} builder for {} on {}",
                small.variant_type(),
                small,
                tx.accession
            );
            match small.variant_type() {
                SmallGenomeVariantType::Snv => snv::build(tx, small, options, formatter),
                SmallGenomeVariantType::Insertion => insertion::build(tx, small, options, formatter),
                SmallGenomeVariantType::Deletion => deletion::build(tx, small, options, formatter),
                SmallGenomeVariantType::BlockSubstitution => {
                    block_substitution::build(tx, small, options, formatter)
                }
            }
        }
        GenomeVariant::Structural(sv) => structural::build(tx, sv, options),
    }
}

/// Location-less annotation for a small variant without any transcript
fn intergenic(variant: &SmallGenomeVariant) -> VariantAnnotation {
    VariantAnnotation::new(variant.clone(), None, [VariantEffect::IntergenicVariant])
        .with_genomic_change(Some(variant.genomic_change()))
}

/// `coding_transcript_variant` or `non_coding_transcript_variant`
pub(crate) fn transcript_tag(tx: &TranscriptModel) -> VariantEffect {
    if tx.is_coding() {
        VariantEffect::CodingTranscriptVariant
    } else {
        VariantEffect::NonCodingTranscriptVariant
    }
}

/// Classify an interval outside the transcription region
///
/// Downstream wins over upstream; anything outside both windows is
/// intergenic. The distance is the gap to the transcription region.
pub(crate) fn neighborhood(
    so: &SequenceOntologyRegions<'_>,
    interval: &GenomeInterval,
) -> (VariantEffect, u64) {
    let distance = so.distance_to_transcript(interval);
    let effect = if so.overlaps_downstream(interval) {
        VariantEffect::DownstreamGeneVariant
    } else if so.overlaps_upstream(interval) {
        VariantEffect::UpstreamGeneVariant
    } else {
        VariantEffect::IntergenicVariant
    };
    (effect, distance)
}
