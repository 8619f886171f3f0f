//! Projection between genome, transcript and CDS coordinates
//!
//! All transcript coordinates are 0-based offsets into the spliced
//! transcript, counted from its 5' end. Genome positions handed in may be on
//! either strand; they are brought onto the transcript strand first.
//!
//! HGVS rendering follows the usual conventions:
//!
//! | Location | Coding | Non-coding |
//! |----------|--------|------------|
//! | CDS base | `c.N` | - |
//! | 5' UTR | `c.-N` | `n.N` |
//! | 3' UTR | `c.*N` | `n.N` |
//! | intron | `c.N+k` / `c.N-k` | `n.N+k` / `n.N-k` |

use crate::coords::{GenomeInterval, GenomePosition};
use crate::reference::transcript::TranscriptModel;

/// Coordinate projector for a single transcript
#[derive(Debug, Clone, Copy)]
pub struct TranscriptProjector<'a> {
    tx: &'a TranscriptModel,
}

impl<'a> TranscriptProjector<'a> {
    pub fn new(tx: &'a TranscriptModel) -> Self {
        Self { tx }
    }

    pub fn transcript(&self) -> &'a TranscriptModel {
        self.tx
    }

    /// Transcript position of an exonic genome position
    pub fn genome_to_tx_pos(&self, pos: &GenomePosition) -> Option<u64> {
        if pos.chr() != self.tx.chr() {
            return None;
        }
        let p = pos.with_strand(self.tx.strand()).pos();
        let mut offset = 0u64;
        for exon in &self.tx.exon_regions {
            if exon.begin() <= p && p < exon.end() {
                return Some(offset + (p - exon.begin()) as u64);
            }
            offset += exon.len();
        }
        None
    }

    /// Genome position of a transcript position
    pub fn tx_to_genome_pos(&self, tx_pos: u64) -> Option<GenomePosition> {
        let mut offset = 0u64;
        for exon in &self.tx.exon_regions {
            if tx_pos < offset + exon.len() {
                return Some(exon.begin_pos().shifted((tx_pos - offset) as i64));
            }
            offset += exon.len();
        }
        None
    }

    /// Transcript position of the first CDS base
    pub fn cds_begin_tx_pos(&self) -> Option<u64> {
        if !self.tx.is_coding() {
            return None;
        }
        self.genome_to_tx_pos(&self.tx.cds_region.begin_pos())
    }

    /// Transcript position just past the last CDS base
    pub fn cds_end_tx_pos(&self) -> Option<u64> {
        if !self.tx.is_coding() {
            return None;
        }
        self.genome_to_tx_pos(&self.tx.cds_region.end_pos().shifted(-1))
            .map(|p| p + 1)
    }

    /// Number of coding bases
    pub fn cds_length(&self) -> u64 {
        match (self.cds_begin_tx_pos(), self.cds_end_tx_pos()) {
            (Some(b), Some(e)) => e.saturating_sub(b),
            _ => 0,
        }
    }

    pub fn transcript_length(&self) -> u64 {
        self.tx.transcript_length()
    }

    /// CDS position (0-based) of a transcript position
    ///
    /// Negative values lie in the 5' UTR, values at or past the CDS length in
    /// the 3' UTR.
    pub fn tx_to_cds_pos(&self, tx_pos: u64) -> Option<i64> {
        self.cds_begin_tx_pos()
            .map(|begin| tx_pos as i64 - begin as i64)
    }

    /// Index of the exon containing `pos` (0-based, transcript order)
    pub fn locate_exon(&self, pos: &GenomePosition) -> Option<usize> {
        self.tx
            .exon_regions
            .iter()
            .position(|e| e.contains_pos(pos))
    }

    /// Index of the intron containing `pos` (0-based, transcript order)
    pub fn locate_intron(&self, pos: &GenomePosition) -> Option<usize> {
        self.tx
            .intron_regions()
            .iter()
            .position(|i| i.contains_pos(pos))
    }

    /// Index of the first exon sharing a base with `interval`
    pub fn first_overlapping_exon(&self, interval: &GenomeInterval) -> Option<usize> {
        self.tx
            .exon_regions
            .iter()
            .position(|e| e.overlaps_with(interval))
    }

    /// Index of the first intron sharing a base with `interval`
    pub fn first_overlapping_intron(&self, interval: &GenomeInterval) -> Option<usize> {
        self.tx
            .intron_regions()
            .iter()
            .position(|i| i.overlaps_with(interval))
    }

    /// The spliced CDS sequence, if the transcript carries a complete sequence
    pub fn cds_sequence(&self) -> Option<&'a str> {
        let seq = self.tx.sequence.as_deref()?;
        if !self.tx.has_complete_sequence() {
            return None;
        }
        let begin = self.cds_begin_tx_pos()? as usize;
        let end = self.cds_end_tx_pos()? as usize;
        seq.get(begin..end)
    }

    /// HGVS coordinate of a genome position, without the `c.`/`n.` prefix
    ///
    /// Returns `None` for positions outside the transcription region.
    pub fn hgvs_position(&self, pos: &GenomePosition) -> Option<String> {
        if let Some(tx_pos) = self.genome_to_tx_pos(pos) {
            return Some(self.format_tx_pos(tx_pos));
        }
        let intron_idx = self.locate_intron(pos)?;
        let p = pos.with_strand(self.tx.strand()).pos();
        let left = &self.tx.exon_regions[intron_idx];
        let right = &self.tx.exon_regions[intron_idx + 1];
        // distance to the last base of the upstream exon and the first of the downstream one
        let after_left = p - left.end() + 1;
        let before_right = right.begin() - p;
        if after_left <= before_right {
            let anchor = self.genome_to_tx_pos(&left.end_pos().shifted(-1))?;
            Some(format!("{}+{}", self.format_tx_pos(anchor), after_left))
        } else {
            let anchor = self.genome_to_tx_pos(&right.begin_pos())?;
            Some(format!("{}-{}", self.format_tx_pos(anchor), before_right))
        }
    }

    /// `c.` for coding, `n.` for non-coding transcripts
    pub fn hgvs_prefix(&self) -> &'static str {
        if self.tx.is_coding() {
            "c."
        } else {
            "n."
        }
    }

    fn format_tx_pos(&self, tx_pos: u64) -> String {
        match (self.cds_begin_tx_pos(), self.cds_end_tx_pos()) {
            (Some(begin), Some(end)) => {
                if tx_pos < begin {
                    format!("-{}", begin - tx_pos)
                } else if tx_pos >= end {
                    format!("*{}", tx_pos - end + 1)
                } else {
                    format!("{}", tx_pos - begin + 1)
                }
            }
            _ => format!("{}", tx_pos + 1),
        }
    }
}
