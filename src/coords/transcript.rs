//! Positions in transcript (cDNA) coordinate space
//!
//! Transcript positions count exonic bases from the 5' end of the
//! transcript, 0-based, in transcript orientation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 0-based position on a transcript's spliced sequence
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TranscriptPosition {
    /// Transcript accession
    pub accession: String,
    /// 0-based offset from the transcript 5' end
    pub pos: u64,
}

impl TranscriptPosition {
    pub fn new(accession: impl Into<String>, pos: u64) -> Self {
        Self {
            accession: accession.into(),
            pos,
        }
    }

    /// Position moved by `delta` bases, saturating at the transcript start
    pub fn shifted(&self, delta: i64) -> Self {
        Self {
            accession: self.accession.clone(),
            pos: (self.pos as i64 + delta).max(0) as u64,
        }
    }
}

impl fmt::Display for TranscriptPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:n.{}", self.accession, self.pos + 1)
    }
}

/// A half-open interval `[begin, end)` on a transcript's spliced sequence
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TranscriptInterval {
    /// Transcript accession
    pub accession: String,
    /// 0-based begin (inclusive)
    pub begin: u64,
    /// 0-based end (exclusive)
    pub end: u64,
}

impl TranscriptInterval {
    pub fn new(accession: impl Into<String>, begin: u64, end: u64) -> Self {
        Self {
            accession: accession.into(),
            begin: begin.min(end),
            end: end.max(begin),
        }
    }

    pub fn len(&self) -> u64 {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    pub fn begin_pos(&self) -> TranscriptPosition {
        TranscriptPosition::new(self.accession.clone(), self.begin)
    }
}

impl fmt::Display for TranscriptInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:n.{}_{}", self.accession, self.begin + 1, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_position_display() {
        let pos = TranscriptPosition::new("NM_000001.1", 0);
        assert_eq!(pos.to_string(), "NM_000001.1:n.1");
        assert_eq!(pos.shifted(-5).pos, 0);
        assert_eq!(pos.shifted(4).pos, 4);
    }

    #[test]
    fn test_transcript_interval_normalizes_bounds() {
        let itv = TranscriptInterval::new("tx", 10, 4);
        assert_eq!((itv.begin, itv.end), (4, 10));
        assert_eq!(itv.len(), 6);
        assert_eq!(itv.to_string(), "tx:n.5_10");
        assert!(!itv.is_empty());
    }
}
