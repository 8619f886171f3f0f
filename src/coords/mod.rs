//! Strand-aware genomic coordinates
//!
//! Positions are stored **0-based** on their own strand. Changing the strand
//! reflects the offset around the contig length, not around an interval:
//!
//! | Operation | Forward | Reverse (contig length `L`) |
//! |-----------|---------|-----------------------------|
//! | position `p` | `p` | `L - p - 1` |
//! | interval `[b, e)` | `[b, e)` | `[L - e, L - b)` |
//!
//! Interval comparisons (`contains`, `overlaps_with`) always bring the other
//! operand onto the receiver's strand first.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use ferro_annotate::coords::{GenomePosition, PositionType, ReferenceDictionary, Strand};
//!
//! let mut dict = ReferenceDictionary::new();
//! dict.add_contig(1, "chr1", 1000);
//! let dict = Arc::new(dict);
//!
//! let pos = GenomePosition::new(&dict, Strand::Plus, 1, 10, PositionType::ZeroBased).unwrap();
//! let rev = pos.with_strand(Strand::Minus);
//! assert_eq!(rev.pos(), 989);
//! assert_eq!(rev.with_strand(Strand::Plus), pos);
//! ```

mod transcript;

pub use transcript::{TranscriptInterval, TranscriptPosition};

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::AnnotateError;
use crate::Result;

/// Strand orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Strand {
    #[serde(rename = "+")]
    #[default]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl Strand {
    /// Whether this is the forward strand
    pub fn is_forward(self) -> bool {
        self == Strand::Plus
    }

    /// The other strand
    pub fn opposite(self) -> Self {
        match self {
            Strand::Plus => Strand::Minus,
            Strand::Minus => Strand::Plus,
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strand::Plus => write!(f, "+"),
            Strand::Minus => write!(f, "-"),
        }
    }
}

/// Basis of a position as handed in by the caller
///
/// Only used at construction; the stored offset is always 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PositionType {
    ZeroBased,
    #[default]
    OneBased,
}

/// Contig names, aliases and lengths of one genome build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDictionary {
    /// Canonical name per contig id
    contig_names: HashMap<u32, String>,
    /// Lookup from name or alias to contig id
    contig_ids: HashMap<String, u32>,
    /// Contig lengths in bases
    contig_lengths: HashMap<u32, u64>,
}

impl ReferenceDictionary {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a contig with its canonical name and length
    ///
    /// The name without a `chr` prefix (or with one, if missing) is
    /// registered as an alias.
    pub fn add_contig(&mut self, id: u32, name: impl Into<String>, length: u64) {
        let name = name.into();
        let alias = match name.strip_prefix("chr") {
            Some(stripped) => stripped.to_string(),
            None => format!("chr{}", name),
        };
        self.contig_ids.entry(alias).or_insert(id);
        self.contig_ids.insert(name.clone(), id);
        self.contig_names.insert(id, name);
        self.contig_lengths.insert(id, length);
    }

    /// Register an additional name for a contig
    pub fn add_alias(&mut self, id: u32, alias: impl Into<String>) {
        self.contig_ids.insert(alias.into(), id);
    }

    /// Look up a contig id by name or alias
    pub fn contig_id(&self, name: &str) -> Option<u32> {
        self.contig_ids.get(name).copied()
    }

    /// Canonical name of a contig
    pub fn contig_name(&self, id: u32) -> Option<&str> {
        self.contig_names.get(&id).map(String::as_str)
    }

    /// Length of a contig
    pub fn contig_length(&self, id: u32) -> Option<u64> {
        self.contig_lengths.get(&id).copied()
    }

    /// Number of registered contigs
    pub fn len(&self) -> usize {
        self.contig_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contig_names.is_empty()
    }

    fn require_length(&self, id: u32) -> Result<i64> {
        self.contig_length(id)
            .map(|l| l as i64)
            .ok_or_else(|| AnnotateError::UnknownChromosome { id: id.to_string() })
    }
}

/// A single position on a contig strand
///
/// Equality and hashing consider chromosome, strand and offset; the
/// dictionary handle and the original position type are carried along.
#[derive(Debug, Clone)]
pub struct GenomePosition {
    dict: Arc<ReferenceDictionary>,
    strand: Strand,
    chr: u32,
    pos: i64,
    contig_len: i64,
    position_type: PositionType,
}

impl GenomePosition {
    /// Create a position, converting `pos` to 0-based if needed
    ///
    /// Fails if `chr` is not part of the dictionary.
    pub fn new(
        dict: &Arc<ReferenceDictionary>,
        strand: Strand,
        chr: u32,
        pos: i64,
        position_type: PositionType,
    ) -> Result<Self> {
        let contig_len = dict.require_length(chr)?;
        let pos = match position_type {
            PositionType::ZeroBased => pos,
            PositionType::OneBased => pos - 1,
        };
        Ok(Self {
            dict: Arc::clone(dict),
            strand,
            chr,
            pos,
            contig_len,
            position_type,
        })
    }

    /// 0-based offset on this position's strand
    pub fn pos(&self) -> i64 {
        self.pos
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn chr(&self) -> u32 {
        self.chr
    }

    /// Basis the position was created with
    pub fn position_type(&self) -> PositionType {
        self.position_type
    }

    pub fn dict(&self) -> &Arc<ReferenceDictionary> {
        &self.dict
    }

    pub fn contig_len(&self) -> i64 {
        self.contig_len
    }

    /// Canonical contig name, `?` when the dictionary lost it
    pub fn chr_name(&self) -> &str {
        self.dict.contig_name(self.chr).unwrap_or("?")
    }

    /// Position moved by `delta` bases in this strand's direction
    pub fn shifted(&self, delta: i64) -> Self {
        Self {
            pos: self.pos + delta,
            ..self.clone()
        }
    }

    /// The same base expressed on `strand`
    pub fn with_strand(&self, strand: Strand) -> Self {
        if strand == self.strand {
            return self.clone();
        }
        Self {
            strand,
            pos: self.contig_len - self.pos - 1,
            ..self.clone()
        }
    }

    /// Signed distance `self - other`, measured on this position's strand
    ///
    /// Both positions must be on the same chromosome.
    pub fn difference_to(&self, other: &GenomePosition) -> i64 {
        self.pos - other.with_strand(self.strand).pos
    }

    /// Whether `self` lies before `other` on this position's strand
    pub fn is_lt(&self, other: &GenomePosition) -> bool {
        self.chr == other.chr && self.difference_to(other) < 0
    }

    /// Whether `self` lies before or at `other` on this position's strand
    pub fn is_leq(&self, other: &GenomePosition) -> bool {
        self.chr == other.chr && self.difference_to(other) <= 0
    }

    /// Whether `self` lies after `other` on this position's strand
    pub fn is_gt(&self, other: &GenomePosition) -> bool {
        self.chr == other.chr && self.difference_to(other) > 0
    }

    /// Whether `self` lies after or at `other` on this position's strand
    pub fn is_geq(&self, other: &GenomePosition) -> bool {
        self.chr == other.chr && self.difference_to(other) >= 0
    }

    fn forward_pos(&self) -> i64 {
        match self.strand {
            Strand::Plus => self.pos,
            Strand::Minus => self.contig_len - self.pos - 1,
        }
    }
}

impl PartialEq for GenomePosition {
    fn eq(&self, other: &Self) -> bool {
        self.chr == other.chr && self.strand == other.strand && self.pos == other.pos
    }
}

impl Eq for GenomePosition {}

impl Hash for GenomePosition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chr.hash(state);
        self.strand.hash(state);
        self.pos.hash(state);
    }
}

impl PartialOrd for GenomePosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GenomePosition {
    /// Orders by chromosome, forward-strand offset, then strand
    fn cmp(&self, other: &Self) -> Ordering {
        self.chr
            .cmp(&other.chr)
            .then(self.forward_pos().cmp(&other.forward_pos()))
            .then(self.strand.cmp(&other.strand))
    }
}

impl fmt::Display for GenomePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:g.{}", self.chr_name(), self.forward_pos() + 1)
    }
}

/// A half-open interval `[begin, end)` on a contig strand
#[derive(Debug, Clone)]
pub struct GenomeInterval {
    dict: Arc<ReferenceDictionary>,
    strand: Strand,
    chr: u32,
    begin: i64,
    end: i64,
    contig_len: i64,
}

impl GenomeInterval {
    /// Interval of `len` bases starting at `begin`, on `begin`'s strand
    pub fn new(begin: &GenomePosition, len: u64) -> Self {
        Self {
            dict: Arc::clone(&begin.dict),
            strand: begin.strand,
            chr: begin.chr,
            begin: begin.pos,
            end: begin.pos + len as i64,
            contig_len: begin.contig_len,
        }
    }

    /// Interval from explicit 0-based bounds
    pub fn from_bounds(
        dict: &Arc<ReferenceDictionary>,
        strand: Strand,
        chr: u32,
        begin: i64,
        end: i64,
    ) -> Result<Self> {
        if end < begin {
            return Err(AnnotateError::InvalidCoordinates {
                msg: format!("interval end {} before begin {}", end, begin),
            });
        }
        let contig_len = dict.require_length(chr)?;
        Ok(Self {
            dict: Arc::clone(dict),
            strand,
            chr,
            begin,
            end,
            contig_len,
        })
    }

    /// 0-based begin offset (inclusive)
    pub fn begin(&self) -> i64 {
        self.begin
    }

    /// 0-based end offset (exclusive)
    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn chr(&self) -> u32 {
        self.chr
    }

    pub fn dict(&self) -> &Arc<ReferenceDictionary> {
        &self.dict
    }

    pub fn len(&self) -> u64 {
        (self.end - self.begin) as u64
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.begin
    }

    /// First base of the interval
    pub fn begin_pos(&self) -> GenomePosition {
        self.position_at(self.begin)
    }

    /// First base after the interval
    pub fn end_pos(&self) -> GenomePosition {
        self.position_at(self.end)
    }

    fn position_at(&self, pos: i64) -> GenomePosition {
        GenomePosition {
            dict: Arc::clone(&self.dict),
            strand: self.strand,
            chr: self.chr,
            pos,
            contig_len: self.contig_len,
            position_type: PositionType::ZeroBased,
        }
    }

    /// The same bases expressed on `strand`
    pub fn with_strand(&self, strand: Strand) -> Self {
        if strand == self.strand {
            return self.clone();
        }
        Self {
            strand,
            begin: self.contig_len - self.end,
            end: self.contig_len - self.begin,
            ..self.clone()
        }
    }

    /// Interval widened by `left` bases before and `right` bases after, on its own strand
    pub fn with_more_padding(&self, left: i64, right: i64) -> Self {
        Self {
            begin: self.begin - left,
            end: self.end + right,
            ..self.clone()
        }
    }

    /// Whether `pos` falls inside this interval
    pub fn contains_pos(&self, pos: &GenomePosition) -> bool {
        if pos.chr != self.chr {
            return false;
        }
        let p = pos.with_strand(self.strand).pos;
        self.begin <= p && p < self.end
    }

    /// Whether `other` lies completely inside this interval
    pub fn contains(&self, other: &GenomeInterval) -> bool {
        if other.chr != self.chr {
            return false;
        }
        let o = other.with_strand(self.strand);
        self.begin <= o.begin && o.end <= self.end
    }

    /// Whether the two intervals share at least one base
    pub fn overlaps_with(&self, other: &GenomeInterval) -> bool {
        if other.chr != self.chr {
            return false;
        }
        let o = other.with_strand(self.strand);
        o.begin < self.end && self.begin < o.end
    }

    /// Overlap of the two intervals on this interval's strand, if any
    pub fn intersection(&self, other: &GenomeInterval) -> Option<GenomeInterval> {
        if !self.overlaps_with(other) {
            return None;
        }
        let o = other.with_strand(self.strand);
        Some(Self {
            begin: self.begin.max(o.begin),
            end: self.end.min(o.end),
            ..self.clone()
        })
    }

    /// Whether the interval ends at or before `pos`
    pub fn is_left_of(&self, pos: &GenomePosition) -> bool {
        pos.chr == self.chr && self.end <= pos.with_strand(self.strand).pos
    }

    /// Whether the interval begins after `pos`
    pub fn is_right_of(&self, pos: &GenomePosition) -> bool {
        pos.chr == self.chr && self.begin > pos.with_strand(self.strand).pos
    }
}

impl PartialEq for GenomeInterval {
    fn eq(&self, other: &Self) -> bool {
        self.chr == other.chr
            && self.strand == other.strand
            && self.begin == other.begin
            && self.end == other.end
    }
}

impl Eq for GenomeInterval {}

impl Hash for GenomeInterval {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chr.hash(state);
        self.strand.hash(state);
        self.begin.hash(state);
        self.end.hash(state);
    }
}

impl fmt::Display for GenomeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fwd = self.with_strand(Strand::Plus);
        write!(
            f,
            "{}:g.{}_{}",
            self.dict.contig_name(self.chr).unwrap_or("?"),
            fwd.begin + 1,
            fwd.end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> Arc<ReferenceDictionary> {
        let mut dict = ReferenceDictionary::new();
        dict.add_contig(1, "chr1", 100);
        dict.add_contig(2, "chr2", 50);
        Arc::new(dict)
    }

    fn fwd(pos: i64) -> GenomePosition {
        GenomePosition::new(&dict(), Strand::Plus, 1, pos, PositionType::ZeroBased).unwrap()
    }

    // =========================================================================
    // Reference dictionary
    // =========================================================================

    #[test]
    fn test_dictionary_aliases() {
        let dict = dict();
        assert_eq!(dict.contig_id("chr1"), Some(1));
        assert_eq!(dict.contig_id("1"), Some(1));
        assert_eq!(dict.contig_name(2), Some("chr2"));
        assert_eq!(dict.contig_length(2), Some(50));
        assert_eq!(dict.contig_id("chrX"), None);
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_unknown_chromosome_rejected() {
        let err = GenomePosition::new(&dict(), Strand::Plus, 7, 1, PositionType::ZeroBased)
            .unwrap_err();
        assert_eq!(err, AnnotateError::UnknownChromosome { id: "7".to_string() });
    }

    // =========================================================================
    // Positions
    // =========================================================================

    #[test]
    fn test_one_based_is_stored_zero_based() {
        let pos = GenomePosition::new(&dict(), Strand::Plus, 1, 10, PositionType::OneBased).unwrap();
        assert_eq!(pos.pos(), 9);
        assert_eq!(pos.position_type(), PositionType::OneBased);
        assert_eq!(pos.to_string(), "chr1:g.10");
    }

    #[test]
    fn test_strand_reflection_uses_contig_length() {
        let pos = fwd(0);
        assert_eq!(pos.with_strand(Strand::Minus).pos(), 99);
        let pos = fwd(99);
        assert_eq!(pos.with_strand(Strand::Minus).pos(), 0);
        let pos = fwd(30);
        let rev = pos.with_strand(Strand::Minus);
        assert_eq!(rev.pos(), 69);
        assert_eq!(rev.with_strand(Strand::Plus), pos);
    }

    #[test]
    fn test_shift_follows_strand_direction() {
        let rev = fwd(30).with_strand(Strand::Minus);
        let shifted = rev.shifted(5).with_strand(Strand::Plus);
        assert_eq!(shifted.pos(), 25);
        assert_eq!(fwd(30).shifted(-3).pos(), 27);
    }

    #[test]
    fn test_difference_and_comparisons() {
        let a = fwd(10);
        let b = fwd(20);
        assert_eq!(b.difference_to(&a), 10);
        assert!(a.is_lt(&b));
        assert!(a.is_leq(&a));
        assert!(b.is_gt(&a));
        assert!(b.is_geq(&b));
        // on the reverse strand the order flips
        let ra = a.with_strand(Strand::Minus);
        assert!(ra.is_gt(&b));
        assert_eq!(ra.difference_to(&b), 10);
    }

    #[test]
    fn test_ordering_is_strand_independent() {
        let a = fwd(10);
        let b = fwd(20).with_strand(Strand::Minus);
        assert!(a < b);
        assert_ne!(a, a.with_strand(Strand::Minus));
    }

    #[test]
    fn test_display_reverse_uses_forward_coordinate() {
        let rev = fwd(9).with_strand(Strand::Minus);
        assert_eq!(rev.to_string(), "chr1:g.10");
    }

    // =========================================================================
    // Intervals
    // =========================================================================

    #[test]
    fn test_interval_reflection() {
        let itv = GenomeInterval::new(&fwd(10), 5);
        let rev = itv.with_strand(Strand::Minus);
        assert_eq!((rev.begin(), rev.end()), (85, 90));
        assert_eq!(rev.len(), 5);
        assert_eq!(rev.with_strand(Strand::Plus), itv);
    }

    #[test]
    fn test_contains_and_overlap_across_strands() {
        let outer = GenomeInterval::new(&fwd(10), 20);
        let inner = GenomeInterval::new(&fwd(15), 5).with_strand(Strand::Minus);
        assert!(outer.contains(&inner));
        assert!(inner.overlaps_with(&outer));
        assert!(!inner.contains(&outer));

        let adjacent = GenomeInterval::new(&fwd(30), 5);
        assert!(!outer.overlaps_with(&adjacent));
        assert!(outer.is_left_of(&fwd(30)));
        assert!(adjacent.is_right_of(&fwd(29)));
    }

    #[test]
    fn test_empty_interval_inside_overlaps() {
        let outer = GenomeInterval::new(&fwd(10), 20);
        let empty = GenomeInterval::new(&fwd(15), 0);
        assert!(outer.overlaps_with(&empty));
        assert!(empty.overlaps_with(&outer));
        assert!(outer.contains(&empty));

        // at either border an empty interval touches nothing
        assert!(!outer.overlaps_with(&GenomeInterval::new(&fwd(10), 0)));
        assert!(!outer.overlaps_with(&GenomeInterval::new(&fwd(30), 0)));
    }

    #[test]
    fn test_different_chromosomes_never_overlap() {
        let a = GenomeInterval::new(&fwd(10), 20);
        let other = GenomePosition::new(&dict(), Strand::Plus, 2, 10, PositionType::ZeroBased).unwrap();
        let b = GenomeInterval::new(&other, 20);
        assert!(!a.overlaps_with(&b));
        assert!(!a.contains(&b));
        assert!(!a.contains_pos(&other));
    }

    #[test]
    fn test_intersection() {
        let a = GenomeInterval::new(&fwd(10), 20);
        let b = GenomeInterval::new(&fwd(25), 20);
        let i = a.intersection(&b).unwrap();
        assert_eq!((i.begin(), i.end()), (25, 30));
        assert!(a.intersection(&GenomeInterval::new(&fwd(40), 2)).is_none());
    }

    #[test]
    fn test_from_bounds_rejects_inverted() {
        assert!(GenomeInterval::from_bounds(&dict(), Strand::Plus, 1, 10, 5).is_err());
        let itv = GenomeInterval::from_bounds(&dict(), Strand::Plus, 1, 5, 10).unwrap();
        assert_eq!(itv.to_string(), "chr1:g.6_10");
    }
}
