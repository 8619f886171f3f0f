//! Per-variant accumulator for builder results

use crate::annotation::annotations::VariantAnnotations;
use crate::annotation::variant_annotation::VariantAnnotation;
use crate::variant::GenomeVariant;

/// Collects annotations of one variant across candidate transcripts
///
/// Exonic and structural results are kept apart and merged when the list is
/// taken. The collector is reused across variants, so callers clear it
/// before starting a new variant. It is not meant to be shared between
/// threads; give each worker its own.
#[derive(Debug, Default)]
pub struct AnnotationCollector {
    exonic: Vec<VariantAnnotation>,
    structural: Vec<VariantAnnotation>,
}

impl AnnotationCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.exonic.clear();
        self.structural.clear();
    }

    /// Add an annotation, routing it by whether it came from a structural builder
    pub fn add_annotation(&mut self, annotation: VariantAnnotation) {
        if annotation.is_structural() {
            self.structural.push(annotation);
        } else {
            self.exonic.push(annotation);
        }
    }

    pub fn add_exonic(&mut self, annotation: VariantAnnotation) {
        self.exonic.push(annotation);
    }

    pub fn add_structural(&mut self, annotation: VariantAnnotation) {
        self.structural.push(annotation);
    }

    pub fn len(&self) -> usize {
        self.exonic.len() + self.structural.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exonic.is_empty() && self.structural.is_empty()
    }

    /// Take everything collected so far as the sorted result for `variant`
    ///
    /// Leaves the collector empty.
    pub fn get_annotation_list(&mut self, variant: &GenomeVariant) -> VariantAnnotations {
        let mut all = std::mem::take(&mut self.exonic);
        all.append(&mut self.structural);
        VariantAnnotations::new(variant.clone(), all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{GenomePosition, PositionType, ReferenceDictionary, Strand};
    use crate::effect::VariantEffect;
    use crate::variant::SmallGenomeVariant;
    use std::sync::Arc;

    fn variant() -> GenomeVariant {
        let mut dict = ReferenceDictionary::new();
        dict.add_contig(1, "chr1", 10_000);
        let dict = Arc::new(dict);
        let pos = GenomePosition::new(&dict, Strand::Plus, 1, 50, PositionType::ZeroBased).unwrap();
        SmallGenomeVariant::new(pos, "A", "C").into()
    }

    #[test]
    fn test_routing_and_drain() {
        let v = variant();
        let mut collector = AnnotationCollector::new();
        collector.add_annotation(VariantAnnotation::new(
            v.clone(),
            None,
            [VariantEffect::IntergenicVariant],
        ));
        collector.add_annotation(VariantAnnotation::new(
            v.clone(),
            None,
            [VariantEffect::CopyNumberChange, VariantEffect::StructuralVariant],
        ));
        assert_eq!(collector.len(), 2);

        let list = collector.get_annotation_list(&v);
        assert_eq!(list.len(), 2);
        assert_eq!(
            list.annotations()[0].most_pathogenic_effect(),
            Some(VariantEffect::CopyNumberChange)
        );
        assert!(collector.is_empty());
    }

    #[test]
    fn test_clear() {
        let v = variant();
        let mut collector = AnnotationCollector::new();
        collector.add_exonic(VariantAnnotation::new(v.clone(), None, [VariantEffect::IntergenicVariant]));
        collector.clear();
        assert!(collector.get_annotation_list(&v).is_empty());
    }
}
