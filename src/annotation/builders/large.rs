//! Builder for small variants too long for per-base annotation
//!
//! Variants whose reference or alternative allele reaches the configured SV
//! size threshold, or that carry a symbolic allele, are only tagged as
//! structural. Literal alleles whose reverse complement matches are reported
//! as inversions.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::annotation::location::AnnotationLocation;
use crate::annotation::message::AnnotationMessage;
use crate::annotation::variant_annotation::VariantAnnotation;
use crate::config::{AnnotationOptions, InversionStrictness};
use crate::effect::VariantEffect;
use crate::error::AnnotateError;
use crate::reference::TranscriptModel;
use crate::sequence::reverse_complement_acgt;
use crate::variant::SmallGenomeVariant;
use crate::Result;

/// Whether `variant` is routed to this builder
pub fn is_large(variant: &SmallGenomeVariant, options: &AnnotationOptions) -> bool {
    variant.is_symbolic()
        || variant.ref_allele().len() >= options.sv_size_threshold
        || variant.alt_allele().len() >= options.sv_size_threshold
}

pub fn build(
    tx: Option<&Arc<TranscriptModel>>,
    variant: &SmallGenomeVariant,
    options: &AnnotationOptions,
) -> Result<VariantAnnotation> {
    let mut effects = BTreeSet::from([VariantEffect::StructuralVariant]);
    let mut messages = BTreeSet::new();

    if !variant.is_symbolic() {
        match detect_inversion(variant, options.inversion_strictness)? {
            Inversion::Yes { ambiguous } => {
                effects.insert(VariantEffect::Inversion);
                if ambiguous {
                    messages.insert(AnnotationMessage::InfoNonAcgtInversion);
                }
            }
            Inversion::No => {}
        }
    }

    log::debug!(
        "large variant builder for {} on {}",
        variant,
        tx.map(|t| t.accession.as_str()).unwrap_or("no transcript")
    );

    let annotation = match tx {
        Some(tx) => VariantAnnotation::new(variant.clone(), Some(Arc::clone(tx)), effects)
            .with_location(Some(AnnotationLocation::undefined(tx, None))),
        None => {
            effects.insert(VariantEffect::IntergenicVariant);
            VariantAnnotation::new(variant.clone(), None, effects)
        }
    };
    Ok(annotation
        .with_genomic_change(Some(variant.genomic_change()))
        .with_messages(messages))
}

enum Inversion {
    Yes { ambiguous: bool },
    No,
}

/// Reverse-complement ALT and compare with REF
///
/// Only A/C/G/T are complemented. Other characters stay as they are, which
/// `strict` rejects and `lenient` reports through an info message.
fn detect_inversion(
    variant: &SmallGenomeVariant,
    strictness: InversionStrictness,
) -> Result<Inversion> {
    let ref_allele = variant.ref_allele().to_ascii_uppercase();
    let alt_allele = variant.alt_allele().to_ascii_uppercase();
    if ref_allele.is_empty() || ref_allele.len() != alt_allele.len() {
        return Ok(Inversion::No);
    }
    let (rc, saw_other) = reverse_complement_acgt(&alt_allele);
    let ref_other = ref_allele
        .chars()
        .any(|c| !matches!(c, 'A' | 'C' | 'G' | 'T'));
    let ambiguous = saw_other || ref_other;
    if ambiguous {
        match strictness {
            InversionStrictness::Strict => {
                return Err(AnnotateError::invalid_variant(format!(
                    "non-ACGT base in inversion candidate {}",
                    variant
                )))
            }
            InversionStrictness::Lenient => {
                log::warn!("non-ACGT base in inversion candidate {}", variant);
            }
        }
    }
    if rc == ref_allele {
        Ok(Inversion::Yes { ambiguous })
    } else {
        Ok(Inversion::No)
    }
}
