//! Top-level variant annotation
//!
//! For each variant the annotator queries the transcript index, runs the
//! builder selected for every candidate transcript and hands the results to
//! an [`AnnotationCollector`]:
//!
//! 1. the collector is cleared;
//! 2. the index is queried with the variant's affected interval;
//! 3. without candidates, the left/right neighbors are annotated instead;
//! 4. with candidates, each one goes through the dispatcher;
//!    small variants at or above the SV size threshold go through the
//!    large-variant builder in both cases;
//! 5. the collector is drained into a sorted [`VariantAnnotations`].
//!
//! A builder failure aborts the whole variant with an
//! [`AnnotateError::Annotation`] carrying variant and transcript.

use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::annotation::annotations::VariantAnnotations;
use crate::annotation::builders::{self, large};
use crate::annotation::change::{ChangeFormatter, HgvsChangeFormatter};
use crate::annotation::collector::AnnotationCollector;
use crate::config::AnnotationOptions;
use crate::error::AnnotateError;
use crate::reference::{TranscriptDb, TranscriptModel};
use crate::variant::GenomeVariant;
use crate::Result;

/// Annotates variants against a transcript database
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ferro_annotate::annotation::{AnnotationCollector, VariantAnnotator};
/// use ferro_annotate::config::AnnotationOptions;
/// use ferro_annotate::coords::{GenomePosition, PositionType, ReferenceDictionary, Strand};
/// use ferro_annotate::effect::VariantEffect;
/// use ferro_annotate::reference::TranscriptDb;
/// use ferro_annotate::variant::SmallGenomeVariant;
///
/// let mut dict = ReferenceDictionary::new();
/// dict.add_contig(1, "chr1", 10_000);
/// let db = TranscriptDb::new(Arc::new(dict), Vec::new());
///
/// let pos = GenomePosition::new(db.dict(), Strand::Plus, 1, 100, PositionType::OneBased).unwrap();
/// let variant = SmallGenomeVariant::new(pos, "A", "G").into();
///
/// let annotator = VariantAnnotator::new(&db, AnnotationOptions::default());
/// let mut collector = AnnotationCollector::new();
/// let annotations = annotator.annotate(&variant, &mut collector).unwrap();
/// assert_eq!(annotations.highest_impact_effect(), Some(VariantEffect::IntergenicVariant));
/// ```
pub struct VariantAnnotator<'a> {
    db: &'a TranscriptDb,
    options: AnnotationOptions,
    formatter: Box<dyn ChangeFormatter>,
}

impl<'a> VariantAnnotator<'a> {
    pub fn new(db: &'a TranscriptDb, options: AnnotationOptions) -> Self {
        Self {
            db,
            options,
            formatter: Box::new(HgvsChangeFormatter),
        }
    }

    /// Use a different change formatter
    pub fn with_formatter(mut self, formatter: Box<dyn ChangeFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn options(&self) -> &AnnotationOptions {
        &self.options
    }

    pub fn db(&self) -> &TranscriptDb {
        self.db
    }

    /// Annotate one variant, reusing `collector` as scratch space
    pub fn annotate(
        &self,
        variant: &GenomeVariant,
        collector: &mut AnnotationCollector,
    ) -> Result<VariantAnnotations> {
        collector.clear();
        if self.db.dict().contig_name(variant.chr()).is_none() {
            return Err(AnnotateError::annotation(
                variant,
                None,
                AnnotateError::UnknownChromosome {
                    id: variant.chr().to_string(),
                },
            ));
        }

        let query = self.db.query(&variant.query_interval());
        let mut candidates: Vec<Arc<TranscriptModel>> =
            query.entries.iter().map(|tx| Arc::clone(*tx)).collect();
        let neighbors: Vec<Arc<TranscriptModel>> = [query.left, query.right]
            .into_iter()
            .flatten()
            .map(Arc::clone)
            .collect();

        // break-ends also affect the transcripts around their mate
        if let Some(mate) = variant
            .as_structural()
            .and_then(|sv| sv.affected_interval_pos_end())
        {
            for tx in self.db.query(&mate).entries {
                if !candidates.iter().any(|c| c.accession == tx.accession) {
                    candidates.push(Arc::clone(tx));
                }
            }
        }
        log::debug!(
            "{}: {} candidate and {} neighboring transcripts",
            variant,
            candidates.len(),
            neighbors.len()
        );

        match variant {
            GenomeVariant::Small(small) if large::is_large(small, &self.options) => {
                let txs = if candidates.is_empty() {
                    &neighbors
                } else {
                    &candidates
                };
                if txs.is_empty() {
                    let anno = large::build(None, small, &self.options);
                    collector.add_annotation(self.wrap(variant, None, anno)?);
                }
                for tx in txs {
                    let anno = large::build(Some(tx), small, &self.options);
                    collector.add_annotation(self.wrap(variant, Some(tx), anno)?);
                }
            }
            _ if candidates.is_empty() => self.dispatch_all(variant, &neighbors, collector)?,
            _ => self.dispatch_all(variant, &candidates, collector)?,
        }

        Ok(collector.get_annotation_list(variant))
    }

    /// Run the dispatcher for each transcript, or once without one if there are none
    fn dispatch_all(
        &self,
        variant: &GenomeVariant,
        transcripts: &[Arc<TranscriptModel>],
        collector: &mut AnnotationCollector,
    ) -> Result<()> {
        let formatter = self.formatter.as_ref();
        if transcripts.is_empty() {
            let anno = builders::build_with_formatter(None, variant, &self.options, formatter);
            collector.add_annotation(self.wrap(variant, None, anno)?);
            return Ok(());
        }
        for tx in transcripts {
            let anno = builders::build_with_formatter(Some(tx), variant, &self.options, formatter);
            collector.add_annotation(self.wrap(variant, Some(tx), anno)?);
        }
        Ok(())
    }

    fn wrap<T>(
        &self,
        variant: &GenomeVariant,
        tx: Option<&Arc<TranscriptModel>>,
        result: Result<T>,
    ) -> Result<T> {
        result.map_err(|e| {
            AnnotateError::annotation(variant, tx.map(|t| t.accession.as_str()), e)
        })
    }

    /// Annotate variants in order with one shared collector
    pub fn annotate_all(&self, variants: &[GenomeVariant]) -> Vec<Result<VariantAnnotations>> {
        let mut collector = AnnotationCollector::new();
        variants
            .iter()
            .map(|v| self.annotate(v, &mut collector))
            .collect()
    }

    /// Annotate variants in parallel, one collector per worker
    ///
    /// Results keep the input order.
    #[cfg(feature = "parallel")]
    pub fn annotate_par(&self, variants: &[GenomeVariant]) -> Vec<Result<VariantAnnotations>> {
        variants
            .par_iter()
            .map_init(AnnotationCollector::new, |collector, v| {
                self.annotate(v, collector)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{GenomeInterval, GenomePosition, PositionType, ReferenceDictionary, Strand};
    use crate::effect::VariantEffect;
    use crate::variant::SmallGenomeVariant;

    fn db() -> TranscriptDb {
        let mut dict = ReferenceDictionary::new();
        dict.add_contig(1, "chr1", 100_000);
        let dict = Arc::new(dict);
        let itv = |b, e| GenomeInterval::from_bounds(&dict, Strand::Plus, 1, b, e).unwrap();
        let tx = |acc: &str, b: i64, e: i64| {
            TranscriptModel::new(acc, itv(b, e), itv(b + 100, e - 100), vec![itv(b, e)])
                .unwrap()
                .with_gene_symbol(acc.to_uppercase())
        };
        let txs = vec![tx("txa", 10_000, 20_000), tx("txb", 15_000, 25_000), tx("txc", 50_000, 60_000)];
        TranscriptDb::new(Arc::clone(&dict), txs)
    }

    fn snv(db: &TranscriptDb, p: i64) -> GenomeVariant {
        let pos = GenomePosition::new(db.dict(), Strand::Plus, 1, p, PositionType::ZeroBased).unwrap();
        SmallGenomeVariant::new(pos, "A", "G").into()
    }

    #[test]
    fn test_overlapping_transcripts_sorted() {
        let db = db();
        let annotator = VariantAnnotator::new(&db, AnnotationOptions::default());
        let mut collector = AnnotationCollector::new();
        let annos = annotator.annotate(&snv(&db, 17_000), &mut collector).unwrap();
        let accs: Vec<_> = annos
            .iter()
            .map(|a| a.transcript().unwrap().accession.clone())
            .collect();
        assert_eq!(accs, vec!["txa", "txb"]);
        assert!(collector.is_empty());
    }

    #[test]
    fn test_neighbors_without_candidates() {
        let db = db();
        let annotator = VariantAnnotator::new(&db, AnnotationOptions::default());
        let mut collector = AnnotationCollector::new();
        let annos = annotator.annotate(&snv(&db, 25_500), &mut collector).unwrap();
        // downstream of txb, far from txc
        assert_eq!(annos.len(), 2);
        assert_eq!(
            annos.highest_impact_effect(),
            Some(VariantEffect::DownstreamGeneVariant)
        );
        let last = &annos.annotations()[1];
        assert!(last.transcript().is_none());
        assert_eq!(last.most_pathogenic_effect(), Some(VariantEffect::IntergenicVariant));
    }

    #[test]
    fn test_large_deletion_without_candidates() {
        let db = db();
        let annotator = VariantAnnotator::new(&db, AnnotationOptions::default());
        let pos = GenomePosition::new(db.dict(), Strand::Plus, 1, 30_000, PositionType::ZeroBased).unwrap();
        let variant: GenomeVariant = SmallGenomeVariant::new(pos, "A".repeat(1_500), "").into();
        let annos = annotator.annotate(&variant, &mut AnnotationCollector::new()).unwrap();
        assert!(annos.iter().all(|a| a.is_structural()));
        assert_eq!(annos.len(), 2);
    }

    #[test]
    fn test_annotate_all() {
        let db = db();
        let annotator = VariantAnnotator::new(&db, AnnotationOptions::default());
        let results = annotator.annotate_all(&[snv(&db, 12_000), snv(&db, 55_000)]);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(
            results[1].as_ref().unwrap().annotations()[0]
                .transcript()
                .unwrap()
                .accession,
            "txc"
        );
    }
}
