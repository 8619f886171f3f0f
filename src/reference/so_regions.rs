//! Sequence Ontology region tests for a transcript
//!
//! Splice sites are taken per intron on the transcript strand: the donor
//! site covers the first `splice_site` intronic bases, the acceptor site the
//! last ones. The splice region spans `splice_region_exonic` exonic and
//! `splice_region_intronic` intronic bases around each exon/intron boundary.

use crate::config::AnnotationOptions;
use crate::coords::{GenomeInterval, GenomePosition};
use crate::reference::transcript::TranscriptModel;

/// Region classification of genome intervals relative to one transcript
#[derive(Debug, Clone)]
pub struct SequenceOntologyRegions<'a> {
    tx: &'a TranscriptModel,
    introns: Vec<GenomeInterval>,
    upstream_window: u64,
    downstream_window: u64,
    splice_site: i64,
    splice_region_exonic: i64,
    splice_region_intronic: i64,
}

impl<'a> SequenceOntologyRegions<'a> {
    pub fn new(tx: &'a TranscriptModel, options: &AnnotationOptions) -> Self {
        Self {
            tx,
            introns: tx.intron_regions(),
            upstream_window: options.upstream_window,
            downstream_window: options.downstream_window,
            splice_site: options.splice_site as i64,
            splice_region_exonic: options.splice_region_exonic as i64,
            splice_region_intronic: options.splice_region_intronic as i64,
        }
    }

    pub fn introns(&self) -> &[GenomeInterval] {
        &self.introns
    }

    /// Window before the transcription start, on the transcript strand
    pub fn upstream_region(&self) -> GenomeInterval {
        let begin = self.tx.tx_region.begin_pos();
        GenomeInterval::new(
            &begin.shifted(-(self.upstream_window as i64)),
            self.upstream_window,
        )
    }

    /// Window after the transcription end, on the transcript strand
    pub fn downstream_region(&self) -> GenomeInterval {
        GenomeInterval::new(&self.tx.tx_region.end_pos(), self.downstream_window)
    }

    pub fn overlaps_upstream(&self, interval: &GenomeInterval) -> bool {
        self.upstream_region().overlaps_with(interval)
    }

    pub fn overlaps_downstream(&self, interval: &GenomeInterval) -> bool {
        self.downstream_region().overlaps_with(interval)
    }

    pub fn overlaps_transcript(&self, interval: &GenomeInterval) -> bool {
        self.tx.tx_region.overlaps_with(interval)
    }

    pub fn overlaps_exon(&self, interval: &GenomeInterval) -> bool {
        self.tx
            .exon_regions
            .iter()
            .any(|e| e.overlaps_with(interval))
    }

    pub fn overlaps_intron(&self, interval: &GenomeInterval) -> bool {
        self.introns.iter().any(|i| i.overlaps_with(interval))
    }

    /// Whether the interval touches coding bases
    pub fn overlaps_cds(&self, interval: &GenomeInterval) -> bool {
        self.tx.is_coding()
            && self
                .tx
                .exon_regions
                .iter()
                .filter_map(|e| e.intersection(&self.tx.cds_region))
                .any(|e| e.overlaps_with(interval))
    }

    /// Whether the interval touches exonic bases before the CDS
    pub fn overlaps_five_prime_utr(&self, interval: &GenomeInterval) -> bool {
        if !self.tx.is_coding() {
            return false;
        }
        let Ok(utr) = GenomeInterval::from_bounds(
            self.tx.tx_region.dict(),
            self.tx.strand(),
            self.tx.chr(),
            self.tx.tx_region.begin(),
            self.tx.cds_region.begin(),
        ) else {
            return false;
        };
        self.exonic_part_overlaps(&utr, interval)
    }

    /// Whether the interval touches exonic bases after the CDS
    pub fn overlaps_three_prime_utr(&self, interval: &GenomeInterval) -> bool {
        if !self.tx.is_coding() {
            return false;
        }
        let Ok(utr) = GenomeInterval::from_bounds(
            self.tx.tx_region.dict(),
            self.tx.strand(),
            self.tx.chr(),
            self.tx.cds_region.end(),
            self.tx.tx_region.end(),
        ) else {
            return false;
        };
        self.exonic_part_overlaps(&utr, interval)
    }

    fn exonic_part_overlaps(&self, region: &GenomeInterval, interval: &GenomeInterval) -> bool {
        self.tx
            .exon_regions
            .iter()
            .filter_map(|e| e.intersection(region))
            .any(|e| e.overlaps_with(interval))
    }

    /// Whether a position lies before the CDS on the transcript strand
    pub fn is_five_prime_of_cds(&self, pos: &GenomePosition) -> bool {
        self.tx.is_coding() && pos.is_lt(&self.tx.cds_region.begin_pos())
    }

    /// Whether a position lies after the CDS on the transcript strand
    pub fn is_three_prime_of_cds(&self, pos: &GenomePosition) -> bool {
        self.tx.is_coding() && pos.is_geq(&self.tx.cds_region.end_pos())
    }

    pub fn overlaps_splice_donor_site(&self, interval: &GenomeInterval) -> bool {
        self.introns.iter().any(|intron| {
            GenomeInterval::new(&intron.begin_pos(), self.splice_site as u64)
                .overlaps_with(interval)
        })
    }

    pub fn overlaps_splice_acceptor_site(&self, interval: &GenomeInterval) -> bool {
        self.introns.iter().any(|intron| {
            GenomeInterval::new(
                &intron.end_pos().shifted(-self.splice_site),
                self.splice_site as u64,
            )
            .overlaps_with(interval)
        })
    }

    /// Whether the interval touches a splice region around any exon/intron boundary
    pub fn overlaps_splice_region(&self, interval: &GenomeInterval) -> bool {
        let width = (self.splice_region_exonic + self.splice_region_intronic) as u64;
        self.introns.iter().any(|intron| {
            let donor = GenomeInterval::new(
                &intron.begin_pos().shifted(-self.splice_region_exonic),
                width,
            );
            let acceptor = GenomeInterval::new(
                &intron.end_pos().shifted(-self.splice_region_intronic),
                width,
            );
            donor.overlaps_with(interval) || acceptor.overlaps_with(interval)
        })
    }

    /// Non-negative gap in bases between the interval and the transcription region
    ///
    /// Zero when they overlap or touch.
    pub fn distance_to_transcript(&self, interval: &GenomeInterval) -> u64 {
        let itv = interval.with_strand(self.tx.strand());
        let tx = &self.tx.tx_region;
        if itv.end() <= tx.begin() {
            (tx.begin() - itv.end()) as u64
        } else if itv.begin() >= tx.end() {
            (itv.begin() - tx.end()) as u64
        } else {
            0
        }
    }
}
