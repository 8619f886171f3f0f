//! Shared pipeline of the small-variant builders
//!
//! The variant is brought onto the transcript strand first. The "change
//! region" is the reference bases it touches there; an insertion uses the
//! base right after its insertion point so that region tests have a base to
//! look at.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::annotation::change::{ChangeFormatter, ProteinChange};
use crate::annotation::location::AnnotationLocation;
use crate::annotation::message::AnnotationMessage;
use crate::annotation::protein::protein_effect;
use crate::annotation::variant_annotation::{
    AnnotationPositions, PositionAndLength, VariantAnnotation,
};
use crate::config::AnnotationOptions;
use crate::coords::{GenomeInterval, TranscriptInterval};
use crate::effect::VariantEffect;
use crate::reference::{SequenceOntologyRegions, TranscriptModel, TranscriptProjector};
use crate::variant::{SmallGenomeVariant, SmallGenomeVariantType};

use super::{neighborhood, transcript_tag};

pub(super) struct SmallContext<'a> {
    pub tx: &'a Arc<TranscriptModel>,
    pub variant: &'a SmallGenomeVariant,
    pub on_tx: SmallGenomeVariant,
    pub formatter: &'a dyn ChangeFormatter,
    pub projector: TranscriptProjector<'a>,
    pub so: SequenceOntologyRegions<'a>,
    pub region: GenomeInterval,
}

impl<'a> SmallContext<'a> {
    pub fn new(
        tx: &'a Arc<TranscriptModel>,
        variant: &'a SmallGenomeVariant,
        options: &AnnotationOptions,
        formatter: &'a dyn ChangeFormatter,
    ) -> Self {
        let on_tx = variant.with_strand(tx.strand());
        let region = if on_tx.variant_type() == SmallGenomeVariantType::Insertion {
            GenomeInterval::new(on_tx.pos(), 1)
        } else {
            on_tx.genome_interval()
        };
        Self {
            tx,
            variant,
            on_tx,
            formatter,
            projector: TranscriptProjector::new(tx),
            so: SequenceOntologyRegions::new(tx, options),
            region,
        }
    }

    fn is_insertion(&self) -> bool {
        self.on_tx.variant_type() == SmallGenomeVariantType::Insertion
    }

    /// Annotation for a variant that misses the transcription region
    fn outside_transcript(&self) -> VariantAnnotation {
        let (effect, distance) = neighborhood(&self.so, &self.region);
        let genomic = Some(self.variant.genomic_change());
        if effect == VariantEffect::IntergenicVariant {
            return VariantAnnotation::new(self.variant.clone(), None, [effect])
                .with_genomic_change(genomic)
                .with_distance(Some(distance));
        }
        VariantAnnotation::new(
            self.variant.clone(),
            Some(Arc::clone(self.tx)),
            [effect, transcript_tag(self.tx)],
        )
        .with_location(Some(AnnotationLocation::undefined(self.tx, None)))
        .with_genomic_change(genomic)
        .with_distance(Some(distance))
    }

    /// Run the shared classification, adding `extra` effects from the caller
    pub fn annotate(&self, extra: impl IntoIterator<Item = VariantEffect>) -> VariantAnnotation {
        // an insertion right after the last transcript base still touches the transcript
        let touches_transcript = self.so.overlaps_transcript(&self.region)
            || (self.is_insertion()
                && self.projector.genome_to_tx_pos(&self.on_tx.pos().shifted(-1)).is_some());
        if !touches_transcript {
            return self.outside_transcript();
        }

        let mut effects: BTreeSet<VariantEffect> = extra.into_iter().collect();
        let mut messages = BTreeSet::new();
        let mut protein = None;

        if self.so.overlaps_splice_donor_site(&self.region) {
            effects.insert(VariantEffect::SpliceDonorVariant);
        } else if self.so.overlaps_splice_acceptor_site(&self.region) {
            effects.insert(VariantEffect::SpliceAcceptorVariant);
        } else if self.so.overlaps_splice_region(&self.region) {
            effects.insert(VariantEffect::SpliceRegionVariant);
        }

        if !self.tx.is_coding() {
            if self.so.overlaps_exon(&self.region) {
                effects.insert(VariantEffect::NonCodingTranscriptExonVariant);
            } else if self.so.overlaps_intron(&self.region) {
                effects.insert(VariantEffect::NonCodingTranscriptIntronVariant);
            }
        } else if self.so.overlaps_cds(&self.region) && !self.inserts_before_cds() {
            let (effect, change) = self.protein_consequence(&mut messages);
            effects.insert(effect);
            protein = Some(change);
        } else if self.so.overlaps_five_prime_utr(&self.region) || self.inserts_before_cds() {
            effects.insert(VariantEffect::FivePrimeUtrExonVariant);
        } else if self.so.overlaps_three_prime_utr(&self.region) {
            effects.insert(VariantEffect::ThreePrimeUtrExonVariant);
        } else if self.so.overlaps_intron(&self.region) {
            let begin = self.region.begin_pos();
            effects.insert(if self.so.is_five_prime_of_cds(&begin) {
                VariantEffect::FivePrimeUtrIntronVariant
            } else if self.so.is_three_prime_of_cds(&begin) {
                VariantEffect::ThreePrimeUtrIntronVariant
            } else {
                VariantEffect::CodingTranscriptIntronVariant
            });
        }
        effects.insert(transcript_tag(self.tx));

        let span = self.exonic_span();
        if let Some(false) = span.and_then(|(first, _)| self.reference_matches(first)) {
            log::warn!(
                "reference allele of {} does not match {}",
                self.variant,
                self.tx.accession
            );
            messages.insert(AnnotationMessage::WarningRefDoesNotMatchGenome);
        }

        VariantAnnotation::new(self.variant.clone(), Some(Arc::clone(self.tx)), effects)
            .with_location(Some(self.location(span)))
            .with_genomic_change(Some(self.variant.genomic_change()))
            .with_nucleotide_change(self.formatter.nucleotide_change(&self.projector, self.variant))
            .with_protein_change(protein)
            .with_positions(self.positions(span))
            .with_messages(messages)
    }

    /// Annotation for a deletion covering the whole transcription region
    pub fn ablation(&self) -> VariantAnnotation {
        VariantAnnotation::new(
            self.variant.clone(),
            Some(Arc::clone(self.tx)),
            [VariantEffect::TranscriptAblation, transcript_tag(self.tx)],
        )
        .with_location(Some(AnnotationLocation::undefined(self.tx, None)))
        .with_genomic_change(Some(self.variant.genomic_change()))
    }

    /// An insertion directly before the first CDS base lies in the 5' UTR
    fn inserts_before_cds(&self) -> bool {
        self.is_insertion()
            && self.tx.is_coding()
            && self.on_tx.pos().pos() == self.tx.cds_region.begin()
    }

    /// First transcript position and length of the change, if fully exonic and contiguous
    ///
    /// Insertions report the transcript position after the insertion point
    /// and length zero; both flanking bases must be exonic and adjacent.
    fn exonic_span(&self) -> Option<(u64, u64)> {
        if self.is_insertion() {
            let after = self.projector.genome_to_tx_pos(self.on_tx.pos())?;
            let before = self
                .projector
                .genome_to_tx_pos(&self.on_tx.pos().shifted(-1))?;
            return (before + 1 == after).then_some((after, 0));
        }
        let first = self.projector.genome_to_tx_pos(&self.region.begin_pos())?;
        let last = self
            .projector
            .genome_to_tx_pos(&self.region.end_pos().shifted(-1))?;
        let len = self.region.len();
        (last >= first && last - first + 1 == len).then_some((first, len))
    }

    /// Compare the reference allele with the transcript sequence
    ///
    /// `None` when the transcript has no usable sequence.
    fn reference_matches(&self, first: u64) -> Option<bool> {
        if !self.tx.has_complete_sequence() {
            return None;
        }
        let seq = self.tx.sequence.as_deref()?;
        let ref_allele = self.on_tx.ref_allele();
        let begin = first as usize;
        let expected = seq.get(begin..begin + ref_allele.len())?;
        Some(expected.eq_ignore_ascii_case(ref_allele))
    }

    /// CDS offset and reference length of a change lying completely in the CDS
    fn cds_span(&self) -> Option<(usize, usize)> {
        let (first, len) = self.exonic_span()?;
        let cds_begin = self.projector.cds_begin_tx_pos()?;
        let cds_end = self.projector.cds_end_tx_pos()?;
        if first < cds_begin || first + len > cds_end {
            return None;
        }
        Some(((first - cds_begin) as usize, len as usize))
    }

    fn protein_consequence(
        &self,
        messages: &mut BTreeSet<AnnotationMessage>,
    ) -> (VariantEffect, ProteinChange) {
        let Some((offset, ref_len)) = self.cds_span() else {
            return (VariantEffect::CodingSequenceVariant, ProteinChange::unknown());
        };
        let Some(cds) = self.projector.cds_sequence() else {
            log::warn!(
                "{} has no complete sequence, protein change of {} unknown",
                self.tx.accession,
                self.variant
            );
            messages.insert(AnnotationMessage::WarningTranscriptIncomplete);
            return (VariantEffect::CodingSequenceVariant, ProteinChange::unknown());
        };
        let alt = self.on_tx.alt_allele().to_ascii_uppercase();
        let change = self.formatter.protein_change(cds, offset, ref_len, &alt);
        let effect = protein_effect(&change.edit, offset, ref_len, alt.len());
        (effect, change)
    }

    fn location(&self, span: Option<(u64, u64)>) -> AnnotationLocation {
        let tx_interval = span.map(|(first, len)| {
            TranscriptInterval::new(self.tx.accession.clone(), first, first + len)
        });
        if let Some(idx) = self.projector.first_overlapping_exon(&self.region) {
            AnnotationLocation::exon(self.tx, idx, tx_interval)
        } else if let Some(idx) = self.projector.first_overlapping_intron(&self.region) {
            AnnotationLocation::intron(self.tx, idx, None)
        } else {
            AnnotationLocation::undefined(self.tx, None)
        }
    }

    fn positions(&self, span: Option<(u64, u64)>) -> AnnotationPositions {
        let Some((first, _)) = span else {
            return AnnotationPositions::default();
        };
        let cdna = Some(PositionAndLength {
            pos: first + 1,
            len: self.projector.transcript_length(),
        });
        let cds_len = self.projector.cds_length();
        let cds_offset = self
            .projector
            .cds_begin_tx_pos()
            .filter(|begin| first >= *begin && first - begin < cds_len)
            .map(|begin| first - begin);
        AnnotationPositions {
            cdna,
            cds: cds_offset.map(|offset| PositionAndLength {
                pos: offset + 1,
                len: cds_len,
            }),
            protein: cds_offset.map(|offset| PositionAndLength {
                pos: offset / 3 + 1,
                len: cds_len / 3,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::change::HgvsChangeFormatter;
    use crate::coords::{GenomePosition, PositionType, ReferenceDictionary, Strand};

    fn dict() -> Arc<ReferenceDictionary> {
        let mut dict = ReferenceDictionary::new();
        dict.add_contig(1, "chr1", 1000);
        Arc::new(dict)
    }

    fn pos(dict: &Arc<ReferenceDictionary>, p: i64) -> GenomePosition {
        GenomePosition::new(dict, Strand::Plus, 1, p, PositionType::ZeroBased).unwrap()
    }

    /// Exons [100,110) and [200,230), CDS [105,222)
    fn tx(dict: &Arc<ReferenceDictionary>) -> Arc<TranscriptModel> {
        let itv = |b, e| GenomeInterval::from_bounds(dict, Strand::Plus, 1, b, e).unwrap();
        Arc::new(
            TranscriptModel::new(
                "tx1",
                itv(100, 230),
                itv(105, 222),
                vec![itv(100, 110), itv(200, 230)],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_exonic_span_and_positions() {
        let dict = dict();
        let tx = tx(&dict);
        let options = AnnotationOptions::default();
        let variant = SmallGenomeVariant::new(pos(&dict, 201), "CC", "");
        let ctx = SmallContext::new(&tx, &variant, &options, &HgvsChangeFormatter);
        assert_eq!(ctx.exonic_span(), Some((11, 2)));
        assert_eq!(ctx.cds_span(), Some((6, 2)));

        let positions = ctx.positions(ctx.exonic_span());
        assert_eq!(positions.cdna.map(|p| p.to_string()), Some("12/40".to_string()));
        assert_eq!(positions.cds.map(|p| p.to_string()), Some("7/27".to_string()));
        assert_eq!(positions.protein.map(|p| p.to_string()), Some("3/9".to_string()));
    }

    #[test]
    fn test_span_across_intron() {
        let dict = dict();
        let tx = tx(&dict);
        let options = AnnotationOptions::default();
        let variant = SmallGenomeVariant::new(pos(&dict, 108), "AAAA", "");
        let ctx = SmallContext::new(&tx, &variant, &options, &HgvsChangeFormatter);
        assert_eq!(ctx.exonic_span(), None);
    }

    #[test]
    fn test_insertion_span() {
        let dict = dict();
        let tx = tx(&dict);
        let options = AnnotationOptions::default();
        let variant = SmallGenomeVariant::new(pos(&dict, 205), "", "GGG");
        let ctx = SmallContext::new(&tx, &variant, &options, &HgvsChangeFormatter);
        assert_eq!(ctx.exonic_span(), Some((15, 0)));
        assert_eq!(ctx.cds_span(), Some((10, 0)));

        // between the last base of exon 1 and the intron
        let variant = SmallGenomeVariant::new(pos(&dict, 110), "", "GGG");
        let ctx = SmallContext::new(&tx, &variant, &options, &HgvsChangeFormatter);
        assert_eq!(ctx.exonic_span(), None);
    }

    #[test]
    fn test_missing_sequence_warns() {
        let dict = dict();
        let tx = tx(&dict);
        let options = AnnotationOptions::default();
        let variant = SmallGenomeVariant::new(pos(&dict, 205), "A", "G");
        let ctx = SmallContext::new(&tx, &variant, &options, &HgvsChangeFormatter);
        let anno = ctx.annotate([]);
        assert!(anno.effects().contains(&VariantEffect::CodingSequenceVariant));
        assert!(anno
            .messages()
            .contains(&AnnotationMessage::WarningTranscriptIncomplete));
        assert_eq!(anno.protein_change().map(|p| p.to_hgvs()), Some("p.?".to_string()));
    }
}
