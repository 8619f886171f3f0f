//! Builder for small deletions
//!
//! A deletion covering the whole transcription region is an ablation; one
//! removing complete exons additionally reports `exon_loss_variant` on top
//! of the shared classification.

use std::sync::Arc;

use super::small::SmallContext;
use crate::annotation::change::ChangeFormatter;
use crate::annotation::variant_annotation::VariantAnnotation;
use crate::config::AnnotationOptions;
use crate::effect::VariantEffect;
use crate::error::AnnotateError;
use crate::reference::TranscriptModel;
use crate::variant::{SmallGenomeVariant, SmallGenomeVariantType};
use crate::Result;

pub fn build(
    tx: &Arc<TranscriptModel>,
    variant: &SmallGenomeVariant,
    options: &AnnotationOptions,
    formatter: &dyn ChangeFormatter,
) -> Result<VariantAnnotation> {
    if variant.variant_type() != SmallGenomeVariantType::Deletion {
        return Err(AnnotateError::invalid_variant(format!(
            "{} is not a deletion",
            variant
        )));
    }
    let ctx = SmallContext::new(tx, variant, options, formatter);
    if ctx.region.contains(&tx.tx_region) {
        return Ok(ctx.ablation());
    }
    let exon_loss = tx.exon_regions.iter().any(|exon| ctx.region.contains(exon));
    let extra = exon_loss.then_some(VariantEffect::ExonLossVariant);
    Ok(ctx.annotate(extra))
}
