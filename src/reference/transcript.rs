//! Transcript models
//!
//! # Coordinate System
//!
//! | Field | Basis | Strand |
//! |-------|-------|--------|
//! | `TranscriptModel.tx_region` | 0-based half-open | transcript strand |
//! | `TranscriptModel.cds_region` | 0-based half-open | transcript strand |
//! | `TranscriptModel.exon_regions` | 0-based half-open | transcript strand, 5' to 3' |
//! | `TranscriptRecord.*_start/_end` | 0-based half-open | forward strand (UCSC style) |
//!
//! `TranscriptModel` is read-only once built; annotation shares it via
//! [`Arc`](std::sync::Arc).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

use crate::coords::{GenomeInterval, ReferenceDictionary, Strand};
use crate::error::AnnotateError;
use crate::Result;

/// A transcript with its exon structure and optional sequence
#[derive(Debug, Clone)]
pub struct TranscriptModel {
    /// Transcript accession (e.g., "uc001anx.3" or "NM_005341.3")
    pub accession: String,
    /// HGNC gene symbol
    pub gene_symbol: Option<String>,
    /// Gene identifier (e.g., Entrez or HGNC id)
    pub gene_id: Option<String>,
    /// Transcription region
    pub tx_region: GenomeInterval,
    /// Coding region, empty for non-coding transcripts
    pub cds_region: GenomeInterval,
    /// Exon regions in transcript order
    pub exon_regions: Vec<GenomeInterval>,
    /// Spliced mRNA sequence in transcript orientation
    pub sequence: Option<String>,
}

impl TranscriptModel {
    /// Build a transcript, bringing all regions onto the strand of `tx_region`
    ///
    /// Exons are sorted into transcript order.
    pub fn new(
        accession: impl Into<String>,
        tx_region: GenomeInterval,
        cds_region: GenomeInterval,
        exon_regions: Vec<GenomeInterval>,
    ) -> Result<Self> {
        let accession = accession.into();
        let strand = tx_region.strand();
        let cds_region = cds_region.with_strand(strand);
        let mut exon_regions: Vec<GenomeInterval> = exon_regions
            .into_iter()
            .map(|e| e.with_strand(strand))
            .collect();
        exon_regions.sort_by_key(|e| e.begin());

        if exon_regions.is_empty() {
            return Err(AnnotateError::InvalidCoordinates {
                msg: format!("transcript {} has no exons", accession),
            });
        }
        if let Some(bad) = exon_regions.iter().find(|e| !tx_region.contains(e)) {
            return Err(AnnotateError::InvalidCoordinates {
                msg: format!(
                    "exon {} lies outside transcript {} ({})",
                    bad, accession, tx_region
                ),
            });
        }
        if !cds_region.is_empty() && !tx_region.contains(&cds_region) {
            return Err(AnnotateError::InvalidCoordinates {
                msg: format!("CDS {} lies outside transcript {}", cds_region, accession),
            });
        }

        Ok(Self {
            accession,
            gene_symbol: None,
            gene_id: None,
            tx_region,
            cds_region,
            exon_regions,
            sequence: None,
        })
    }

    /// Set the gene symbol
    pub fn with_gene_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.gene_symbol = Some(symbol.into());
        self
    }

    /// Set the gene identifier
    pub fn with_gene_id(mut self, id: impl Into<String>) -> Self {
        self.gene_id = Some(id.into());
        self
    }

    /// Set the spliced sequence (upper-cased)
    pub fn with_sequence(mut self, sequence: impl AsRef<str>) -> Self {
        self.sequence = Some(sequence.as_ref().to_ascii_uppercase());
        self
    }

    pub fn strand(&self) -> Strand {
        self.tx_region.strand()
    }

    pub fn chr(&self) -> u32 {
        self.tx_region.chr()
    }

    /// Whether the transcript has a coding region
    pub fn is_coding(&self) -> bool {
        !self.cds_region.is_empty()
    }

    pub fn exon_count(&self) -> usize {
        self.exon_regions.len()
    }

    pub fn intron_count(&self) -> usize {
        self.exon_regions.len().saturating_sub(1)
    }

    /// Length of the spliced transcript
    pub fn transcript_length(&self) -> u64 {
        self.exon_regions.iter().map(GenomeInterval::len).sum()
    }

    /// Intron regions in transcript order
    pub fn intron_regions(&self) -> Vec<GenomeInterval> {
        self.exon_regions
            .windows(2)
            .filter_map(|pair| {
                GenomeInterval::from_bounds(
                    pair[0].dict(),
                    pair[0].strand(),
                    pair[0].chr(),
                    pair[0].end(),
                    pair[1].begin(),
                )
                .ok()
            })
            .collect()
    }

    /// Whether the stored sequence length matches the exon structure
    pub fn has_complete_sequence(&self) -> bool {
        self.sequence
            .as_ref()
            .map(|s| s.len() as u64 == self.transcript_length())
            .unwrap_or(false)
    }
}

impl PartialEq for TranscriptModel {
    fn eq(&self, other: &Self) -> bool {
        self.accession == other.accession
            && self.tx_region == other.tx_region
            && self.cds_region == other.cds_region
            && self.exon_regions == other.exon_regions
    }
}

impl Eq for TranscriptModel {}

impl PartialOrd for TranscriptModel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TranscriptModel {
    /// Accession first, then location, so that ordering is total
    fn cmp(&self, other: &Self) -> Ordering {
        self.accession
            .cmp(&other.accession)
            .then_with(|| self.tx_region.begin_pos().cmp(&other.tx_region.begin_pos()))
            .then_with(|| self.tx_region.len().cmp(&other.tx_region.len()))
    }
}

/// Serializable transcript description in UCSC-style forward coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    pub accession: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gene_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gene_id: Option<String>,
    pub chrom: String,
    pub strand: Strand,
    pub tx_start: i64,
    pub tx_end: i64,
    pub cds_start: i64,
    pub cds_end: i64,
    pub exon_starts: Vec<i64>,
    pub exon_ends: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<String>,
}

impl TranscriptRecord {
    /// Parse a UCSC knownGene line
    ///
    /// Columns: name, chrom, strand, txStart, txEnd, cdsStart, cdsEnd,
    /// exonCount, exonStarts, exonEnds (comma-terminated lists), ...
    pub fn from_known_gene_line(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.trim_end().split('\t').collect();
        if fields.len() < 10 {
            return Err(AnnotateError::InvalidCoordinates {
                msg: format!("knownGene line has {} fields, expected at least 10", fields.len()),
            });
        }
        let strand = match fields[2] {
            "+" => Strand::Plus,
            "-" => Strand::Minus,
            other => {
                return Err(AnnotateError::InvalidCoordinates {
                    msg: format!("invalid strand {:?}", other),
                })
            }
        };
        let exon_count = parse_int(fields[7])? as usize;
        let exon_starts = parse_list(fields[8])?;
        let exon_ends = parse_list(fields[9])?;
        if exon_starts.len() != exon_count || exon_ends.len() != exon_count {
            return Err(AnnotateError::InvalidCoordinates {
                msg: format!("{}: exon count does not match exon lists", fields[0]),
            });
        }
        Ok(Self {
            accession: fields[0].to_string(),
            gene_symbol: None,
            gene_id: None,
            chrom: fields[1].to_string(),
            strand,
            tx_start: parse_int(fields[3])?,
            tx_end: parse_int(fields[4])?,
            cds_start: parse_int(fields[5])?,
            cds_end: parse_int(fields[6])?,
            exon_starts,
            exon_ends,
            sequence: None,
        })
    }

    /// Resolve the record against a reference dictionary
    pub fn into_model(self, dict: &Arc<ReferenceDictionary>) -> Result<TranscriptModel> {
        let chr = dict
            .contig_id(&self.chrom)
            .ok_or_else(|| AnnotateError::UnknownChromosome {
                id: self.chrom.clone(),
            })?;
        if self.exon_starts.len() != self.exon_ends.len() {
            return Err(AnnotateError::InvalidCoordinates {
                msg: format!("{}: unequal exon start/end lists", self.accession),
            });
        }
        let fwd = |begin: i64, end: i64| {
            GenomeInterval::from_bounds(dict, Strand::Plus, chr, begin, end)
                .map(|itv| itv.with_strand(self.strand))
        };
        let tx_region = fwd(self.tx_start, self.tx_end)?;
        // non-coding transcripts carry cdsStart == cdsEnd
        let cds_region = fwd(self.cds_start, self.cds_end.max(self.cds_start))?;
        let exons = self
            .exon_starts
            .iter()
            .zip(&self.exon_ends)
            .map(|(&b, &e)| fwd(b, e))
            .collect::<Result<Vec<_>>>()?;

        let mut model = TranscriptModel::new(self.accession, tx_region, cds_region, exons)?;
        model.gene_symbol = self.gene_symbol;
        model.gene_id = self.gene_id;
        if let Some(seq) = self.sequence {
            model = model.with_sequence(seq);
        }
        Ok(model)
    }
}

fn parse_int(s: &str) -> Result<i64> {
    s.trim().parse().map_err(|_| AnnotateError::InvalidCoordinates {
        msg: format!("invalid integer {:?}", s),
    })
}

fn parse_list(s: &str) -> Result<Vec<i64>> {
    s.split(',')
        .filter(|v| !v.trim().is_empty())
        .map(parse_int)
        .collect()
}
