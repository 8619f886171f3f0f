//! Location of a variant within the exon/intron structure of a transcript

use std::fmt;

use crate::coords::TranscriptInterval;
use crate::reference::TranscriptModel;

/// Rank value of locations that do not fall into an exon or intron
pub const INVALID_RANK: i32 = -1;

/// Kind of transcript feature a location is ranked in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RankType {
    Exon,
    Intron,
    Undefined,
}

impl fmt::Display for RankType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RankType::Exon => "EXON",
            RankType::Intron => "INTRON",
            RankType::Undefined => "UNDEFINED",
        };
        write!(f, "{}", s)
    }
}

/// Where a variant lies on one transcript
///
/// Ranks are 1-based and counted in transcript order. Locations of type
/// [`RankType::Undefined`] carry [`INVALID_RANK`] as rank and total.
///
/// # Examples
///
/// ```
/// use ferro_annotate::annotation::{AnnotationLocation, RankType, INVALID_RANK};
/// # use std::sync::Arc;
/// # use ferro_annotate::coords::{GenomeInterval, ReferenceDictionary, Strand};
/// # use ferro_annotate::reference::TranscriptModel;
/// # let mut dict = ReferenceDictionary::new();
/// # dict.add_contig(1, "chr1", 10_000);
/// # let dict = Arc::new(dict);
/// # let itv = |b, e| GenomeInterval::from_bounds(&dict, Strand::Plus, 1, b, e).unwrap();
/// # let tx = TranscriptModel::new("tx1", itv(100, 500), itv(150, 450),
/// #     vec![itv(100, 200), itv(300, 500)]).unwrap();
///
/// let loc = AnnotationLocation::exon(&tx, 1, None);
/// assert_eq!(loc.rank(), 2);
/// assert_eq!(loc.total(), 2);
/// assert_eq!(loc.rank_string().as_deref(), Some("2/2"));
///
/// let loc = AnnotationLocation::undefined(&tx, None);
/// assert_eq!(loc.rank_type(), RankType::Undefined);
/// assert_eq!(loc.rank(), INVALID_RANK);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationLocation {
    accession: String,
    rank_type: RankType,
    rank: i32,
    total: i32,
    tx_interval: Option<TranscriptInterval>,
}

impl AnnotationLocation {
    /// Location in the exon with 0-based index `index`
    pub fn exon(tx: &TranscriptModel, index: usize, tx_interval: Option<TranscriptInterval>) -> Self {
        Self {
            accession: tx.accession.clone(),
            rank_type: RankType::Exon,
            rank: index as i32 + 1,
            total: tx.exon_count() as i32,
            tx_interval,
        }
    }

    /// Location in the intron with 0-based index `index`
    pub fn intron(
        tx: &TranscriptModel,
        index: usize,
        tx_interval: Option<TranscriptInterval>,
    ) -> Self {
        Self {
            accession: tx.accession.clone(),
            rank_type: RankType::Intron,
            rank: index as i32 + 1,
            total: tx.intron_count() as i32,
            tx_interval,
        }
    }

    /// Location outside of exons and introns
    pub fn undefined(tx: &TranscriptModel, tx_interval: Option<TranscriptInterval>) -> Self {
        Self {
            accession: tx.accession.clone(),
            rank_type: RankType::Undefined,
            rank: INVALID_RANK,
            total: INVALID_RANK,
            tx_interval,
        }
    }

    pub fn accession(&self) -> &str {
        &self.accession
    }

    pub fn rank_type(&self) -> RankType {
        self.rank_type
    }

    /// 1-based rank, [`INVALID_RANK`] when undefined
    pub fn rank(&self) -> i32 {
        self.rank
    }

    /// Number of exons or introns of the transcript
    pub fn total(&self) -> i32 {
        self.total
    }

    /// Interval of the change on the spliced transcript, if exonic
    pub fn tx_interval(&self) -> Option<&TranscriptInterval> {
        self.tx_interval.as_ref()
    }

    pub fn is_defined(&self) -> bool {
        self.rank_type != RankType::Undefined
    }

    /// `rank/total` as written to the ANN rank column
    pub fn rank_string(&self) -> Option<String> {
        self.is_defined()
            .then(|| format!("{}/{}", self.rank, self.total))
    }
}
