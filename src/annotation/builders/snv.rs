//! Builder for single-nucleotide variants

use std::sync::Arc;

use super::small::SmallContext;
use crate::annotation::change::ChangeFormatter;
use crate::annotation::variant_annotation::VariantAnnotation;
use crate::config::AnnotationOptions;
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
    if variant.variant_type() != SmallGenomeVariantType::Snv {
        return Err(AnnotateError::invalid_variant(format!(
            "{} is not an SNV",
            variant
        )));
    }
    Ok(SmallContext::new(tx, variant, options, formatter).annotate([]))
}
