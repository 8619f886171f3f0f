//! Builder for small insertions

use std::sync::Arc;

use super::small::SmallContext;
use crate::annotation::change::ChangeFormatter;
use crate::annotation::variant_annotation::VariantAnnotation;
use crate::config::AnnotationOptions;
use crate::error::AnnotateError;
use crate::reference::TranscriptModel;
use crate::variant::{SmallGenomeVariant, SmallGenomeVariantType};
use crate::Result;

/// Annotate an insertion between two reference bases
///
/// Insertions repeating the preceding transcript bases are described as
/// duplications (`c.N_Mdup`).
pub fn build(
    tx: &Arc<TranscriptModel>,
    variant: &SmallGenomeVariant,
    options: &AnnotationOptions,
    formatter: &dyn ChangeFormatter,
) -> Result<VariantAnnotation> {
    if variant.variant_type() != SmallGenomeVariantType::Insertion {
        return Err(AnnotateError::invalid_variant(format!(
            "{} is not an insertion",
            variant
        )));
    }
    Ok(SmallContext::new(tx, variant, options, formatter).annotate([]))
}
