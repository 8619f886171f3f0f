//! All annotations of one variant

use crate::annotation::variant_annotation::VariantAnnotation;
use crate::effect::{Impact, VariantEffect};
use crate::variant::GenomeVariant;

/// Sorted, de-duplicated annotations of a variant
///
/// Annotations are ordered by [`VariantAnnotation`]'s `Ord`, so the first one
/// carries the most pathogenic effect. Identical annotations collapse into
/// one. Transcript-less annotations with the same effects (e.g. intergenic
/// results from several neighbouring genes) collapse into the nearest one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantAnnotations {
    variant: GenomeVariant,
    annotations: Vec<VariantAnnotation>,
}

impl VariantAnnotations {
    pub fn new(variant: GenomeVariant, mut annotations: Vec<VariantAnnotation>) -> Self {
        annotations.sort();
        annotations.dedup_by(|later, earlier| {
            later == earlier
                || (later.transcript().is_none()
                    && earlier.transcript().is_none()
                    && later.effects() == earlier.effects())
        });
        Self {
            variant,
            annotations,
        }
    }

    /// Result without any annotation
    pub fn empty(variant: GenomeVariant) -> Self {
        Self {
            variant,
            annotations: Vec::new(),
        }
    }

    pub fn variant(&self) -> &GenomeVariant {
        &self.variant
    }

    pub fn annotations(&self) -> &[VariantAnnotation] {
        &self.annotations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VariantAnnotation> {
        self.annotations.iter()
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// The annotation sorted first
    pub fn highest_impact_annotation(&self) -> Option<&VariantAnnotation> {
        self.annotations.first()
    }

    /// Most pathogenic effect over all annotations
    pub fn highest_impact_effect(&self) -> Option<VariantEffect> {
        self.annotations
            .iter()
            .filter_map(VariantAnnotation::most_pathogenic_effect)
            .min()
    }

    /// Highest putative impact over all annotations
    pub fn highest_impact(&self) -> Option<Impact> {
        self.annotations
            .iter()
            .filter_map(VariantAnnotation::putative_impact)
            .max()
    }
}

impl IntoIterator for VariantAnnotations {
    type Item = VariantAnnotation;
    type IntoIter = std::vec::IntoIter<VariantAnnotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.annotations.into_iter()
    }
}

impl<'a> IntoIterator for &'a VariantAnnotations {
    type Item = &'a VariantAnnotation;
    type IntoIter = std::slice::Iter<'a, VariantAnnotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.annotations.iter()
    }
}
