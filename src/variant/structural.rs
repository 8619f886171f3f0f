//! Structural variants
//!
//! Structural variants are described by a symbolic allele, a position with a
//! confidence interval, and either a length (linear variants) or a mate
//! position (break-ends). They live on the forward strand only.
//!
//! # Affected intervals
//!
//! For a linear variant at `pos` with length `len`, `CIPOS = (lo, hi)` and
//! `CIEND = (end_lo, end_hi)`:
//!
//! | Interval | Begin | Length |
//! |----------|-------|--------|
//! | CI | `pos + lo` | `hi - lo` |
//! | CIEND | `pos + len + end_lo` | `end_hi - end_lo` |
//! | outer | `pos - lo` | `lo + len + end_hi` |
//! | inner | `pos + hi` | `len - hi - end_lo` |
//!
//! Negative lengths are clamped to zero.

use std::collections::HashMap;
use std::fmt;

use crate::coords::{GenomeInterval, GenomePosition, PositionType, Strand};
use crate::error::AnnotateError;
use crate::sequence::is_symbolic;
use crate::Result;

/// Structural variant type, from the `SVTYPE` INFO value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SvType {
    Del,
    Dup,
    Ins,
    Cnv,
    Inv,
    Bnd,
}

impl SvType {
    /// Parse a type code; sub-typed codes like `DEL:ME:ALU` use the first component
    pub fn from_code(code: &str) -> Result<Self> {
        let head = code.split(':').next().unwrap_or_default();
        match head.trim().to_ascii_uppercase().as_str() {
            "DEL" => Ok(SvType::Del),
            "DUP" => Ok(SvType::Dup),
            "INS" => Ok(SvType::Ins),
            "CNV" => Ok(SvType::Cnv),
            "INV" => Ok(SvType::Inv),
            "BND" => Ok(SvType::Bnd),
            _ => Err(AnnotateError::UnknownSvType {
                code: code.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SvType::Del => "DEL",
            SvType::Dup => "DUP",
            SvType::Ins => "INS",
            SvType::Cnv => "CNV",
            SvType::Inv => "INV",
            SvType::Bnd => "BND",
        }
    }
}

impl fmt::Display for SvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which ends of the two break-end partners are joined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreakendDirection {
    ThreeToThree,
    ThreeToFive,
    FiveToThree,
    FiveToFive,
}

impl BreakendDirection {
    /// Parse a Delly `CT` tag
    pub fn from_delly_connection_type(tag: &str) -> Result<Self> {
        match tag {
            "3to3" => Ok(BreakendDirection::ThreeToThree),
            "3to5" => Ok(BreakendDirection::ThreeToFive),
            "5to3" => Ok(BreakendDirection::FiveToThree),
            "5to5" => Ok(BreakendDirection::FiveToFive),
            _ => Err(AnnotateError::UnknownConnectionType {
                tag: tag.to_string(),
            }),
        }
    }

    /// Direction implied by VCF bracket notation of a break-end ALT
    ///
    /// `t[p[` joins the 3' end of this side to the 5' end of the mate,
    /// `t]p]` 3' to 3', `]p]t` 5' to 3' and `[p[t` 5' to 5'.
    pub fn from_bracket_alt(alt: &str) -> Option<Self> {
        let first = alt.find(['[', ']'])?;
        let bracket = alt[first..].chars().next()?;
        let leading = first == 0;
        match (leading, bracket) {
            (false, '[') => Some(BreakendDirection::ThreeToFive),
            (false, ']') => Some(BreakendDirection::ThreeToThree),
            (true, ']') => Some(BreakendDirection::FiveToThree),
            (true, '[') => Some(BreakendDirection::FiveToFive),
            _ => None,
        }
    }
}

/// Inclusive offsets around an uncertain breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ConfidenceInterval {
    pub lo: i64,
    pub hi: i64,
}

impl ConfidenceInterval {
    pub fn new(lo: i64, hi: i64) -> Self {
        Self { lo, hi }
    }

    /// Parse `lo,hi` as found in `CIPOS`/`CIEND`
    pub fn parse(value: &str) -> Result<Self> {
        let mut parts = value.split(',').map(|p| p.trim().parse::<i64>());
        match (parts.next(), parts.next(), parts.next()) {
            (Some(Ok(lo)), Some(Ok(hi)), None) => Ok(Self { lo, hi }),
            _ => Err(AnnotateError::invalid_variant(format!(
                "invalid confidence interval {:?}",
                value
            ))),
        }
    }

    fn width(&self) -> u64 {
        (self.hi - self.lo).max(0) as u64
    }
}

/// Length and end uncertainty of a linear structural variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinearSv {
    pub len: u64,
    pub ci_end: ConfidenceInterval,
}

/// Mate position and join direction of a break-end
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BreakEndSv {
    pub pos_end: GenomePosition,
    pub ci_end: ConfidenceInterval,
    pub direction: BreakendDirection,
}

/// Type-specific payload of a structural variant
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SvKind {
    Deletion(LinearSv),
    Duplication(LinearSv),
    Inversion(LinearSv),
    CopyNumberVariation(LinearSv),
    Insertion,
    BreakEnd(BreakEndSv),
}

/// A structural variant on the forward strand
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructuralVariant {
    pos: GenomePosition,
    ref_allele: String,
    alt_allele: String,
    ci_pos: ConfidenceInterval,
    sub_type: Option<String>,
    kind: SvKind,
}

impl StructuralVariant {
    /// Build a structural variant; at least one allele must be symbolic
    pub fn new(
        pos: GenomePosition,
        ref_allele: impl Into<String>,
        alt_allele: impl Into<String>,
        ci_pos: ConfidenceInterval,
        kind: SvKind,
    ) -> Result<Self> {
        let ref_allele = ref_allele.into();
        let alt_allele = alt_allele.into();
        if !is_symbolic(&ref_allele) && !is_symbolic(&alt_allele) {
            return Err(AnnotateError::invalid_variant(format!(
                "structural variant at {} needs a symbolic allele, got {:?}>{:?}",
                pos, ref_allele, alt_allele
            )));
        }
        let kind = match kind {
            SvKind::BreakEnd(bnd) => SvKind::BreakEnd(BreakEndSv {
                pos_end: bnd.pos_end.with_strand(Strand::Plus),
                ..bnd
            }),
            other => other,
        };
        Ok(Self {
            pos: pos.with_strand(Strand::Plus),
            ref_allele,
            alt_allele,
            ci_pos,
            sub_type: None,
            kind,
        })
    }

    /// Deletion of `len` bases
    pub fn deletion(
        pos: GenomePosition,
        ref_allele: &str,
        alt_allele: &str,
        ci_pos: ConfidenceInterval,
        len: u64,
        ci_end: ConfidenceInterval,
    ) -> Result<Self> {
        Self::new(pos, ref_allele, alt_allele, ci_pos, SvKind::Deletion(LinearSv { len, ci_end }))
    }

    /// Duplication of `len` bases
    pub fn duplication(
        pos: GenomePosition,
        ref_allele: &str,
        alt_allele: &str,
        ci_pos: ConfidenceInterval,
        len: u64,
        ci_end: ConfidenceInterval,
    ) -> Result<Self> {
        Self::new(pos, ref_allele, alt_allele, ci_pos, SvKind::Duplication(LinearSv { len, ci_end }))
    }

    /// Inversion of `len` bases
    pub fn inversion(
        pos: GenomePosition,
        ref_allele: &str,
        alt_allele: &str,
        ci_pos: ConfidenceInterval,
        len: u64,
        ci_end: ConfidenceInterval,
    ) -> Result<Self> {
        Self::new(pos, ref_allele, alt_allele, ci_pos, SvKind::Inversion(LinearSv { len, ci_end }))
    }

    /// Copy number variation over `len` bases
    pub fn copy_number_variation(
        pos: GenomePosition,
        ref_allele: &str,
        alt_allele: &str,
        ci_pos: ConfidenceInterval,
        len: u64,
        ci_end: ConfidenceInterval,
    ) -> Result<Self> {
        Self::new(
            pos,
            ref_allele,
            alt_allele,
            ci_pos,
            SvKind::CopyNumberVariation(LinearSv { len, ci_end }),
        )
    }

    /// Insertion at `pos`
    pub fn insertion(
        pos: GenomePosition,
        ref_allele: &str,
        alt_allele: &str,
        ci_pos: ConfidenceInterval,
    ) -> Result<Self> {
        Self::new(pos, ref_allele, alt_allele, ci_pos, SvKind::Insertion)
    }

    /// Break-end joining `pos` to `pos_end`
    pub fn break_end(
        pos: GenomePosition,
        ref_allele: &str,
        alt_allele: &str,
        ci_pos: ConfidenceInterval,
        pos_end: GenomePosition,
        ci_end: ConfidenceInterval,
        direction: BreakendDirection,
    ) -> Result<Self> {
        Self::new(
            pos,
            ref_allele,
            alt_allele,
            ci_pos,
            SvKind::BreakEnd(BreakEndSv {
                pos_end,
                ci_end,
                direction,
            }),
        )
    }

    /// Attach the sub-type of the `SVTYPE` code (e.g. `ME:ALU`)
    pub fn with_sub_type(mut self, sub_type: impl Into<String>) -> Self {
        self.sub_type = Some(sub_type.into());
        self
    }

    /// Build from VCF columns and parsed INFO values
    ///
    /// The length of linear variants is `|SVLEN|` if present, otherwise
    /// `END - POS`. Break-ends take their mate from the bracket notation of
    /// ALT, or from `CHR2`/`END`; their direction from `CT` or the brackets.
    pub fn from_vcf_fields(
        pos: GenomePosition,
        ref_allele: &str,
        alt_allele: &str,
        info: &SvInfo,
    ) -> Result<Self> {
        let sv_type = SvType::from_code(&info.sv_type)?;
        let sub_type = info
            .sv_type
            .split_once(':')
            .map(|(_, rest)| rest.to_string());
        let fwd = pos.with_strand(Strand::Plus);

        let variant = match sv_type {
            SvType::Bnd => {
                let direction = match &info.connection_type {
                    Some(ct) => BreakendDirection::from_delly_connection_type(ct)?,
                    None => BreakendDirection::from_bracket_alt(alt_allele).ok_or_else(|| {
                        AnnotateError::invalid_variant(format!(
                            "break-end {} has neither CT nor bracket notation",
                            alt_allele
                        ))
                    })?,
                };
                let pos_end = mate_position(&fwd, alt_allele, info)?;
                Self::break_end(
                    fwd,
                    ref_allele,
                    alt_allele,
                    info.ci_pos,
                    pos_end,
                    info.ci_end,
                    direction,
                )?
            }
            SvType::Ins => Self::insertion(fwd, ref_allele, alt_allele, info.ci_pos)?,
            linear => {
                let len = match (info.sv_len, info.end) {
                    (Some(len), _) => len.unsigned_abs(),
                    (None, Some(end)) => {
                        let one_based = fwd.pos() + 1;
                        if end < one_based {
                            return Err(AnnotateError::invalid_variant(format!(
                                "END {} lies before POS {}",
                                end, one_based
                            )));
                        }
                        (end - one_based) as u64
                    }
                    (None, None) => {
                        return Err(AnnotateError::invalid_variant(format!(
                            "{} at {} needs SVLEN or END",
                            linear, fwd
                        )))
                    }
                };
                let sv = LinearSv {
                    len,
                    ci_end: info.ci_end,
                };
                let kind = match linear {
                    SvType::Del => SvKind::Deletion(sv),
                    SvType::Dup => SvKind::Duplication(sv),
                    SvType::Inv => SvKind::Inversion(sv),
                    _ => SvKind::CopyNumberVariation(sv),
                };
                Self::new(fwd, ref_allele, alt_allele, info.ci_pos, kind)?
            }
        };
        Ok(match sub_type {
            Some(s) => variant.with_sub_type(s),
            None => variant,
        })
    }

    pub fn kind(&self) -> &SvKind {
        &self.kind
    }

    pub fn sv_type(&self) -> SvType {
        match self.kind {
            SvKind::Deletion(_) => SvType::Del,
            SvKind::Duplication(_) => SvType::Dup,
            SvKind::Inversion(_) => SvType::Inv,
            SvKind::CopyNumberVariation(_) => SvType::Cnv,
            SvKind::Insertion => SvType::Ins,
            SvKind::BreakEnd(_) => SvType::Bnd,
        }
    }

    pub fn sub_type(&self) -> Option<&str> {
        self.sub_type.as_deref()
    }

    pub fn pos(&self) -> &GenomePosition {
        &self.pos
    }

    pub fn chr(&self) -> u32 {
        self.pos.chr()
    }

    pub fn ref_allele(&self) -> &str {
        &self.ref_allele
    }

    pub fn alt_allele(&self) -> &str {
        &self.alt_allele
    }

    pub fn ci_pos(&self) -> ConfidenceInterval {
        self.ci_pos
    }

    fn linear(&self) -> Option<&LinearSv> {
        match &self.kind {
            SvKind::Deletion(sv)
            | SvKind::Duplication(sv)
            | SvKind::Inversion(sv)
            | SvKind::CopyNumberVariation(sv) => Some(sv),
            SvKind::Insertion | SvKind::BreakEnd(_) => None,
        }
    }

    /// Affected length for linear variants, 0 otherwise
    pub fn len(&self) -> u64 {
        self.linear().map(|sv| sv.len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// End position; the mate position for break-ends
    pub fn pos_end(&self) -> GenomePosition {
        match &self.kind {
            SvKind::BreakEnd(bnd) => bnd.pos_end.clone(),
            _ => self.pos.shifted(self.len() as i64),
        }
    }

    /// Chromosome of the end position
    pub fn chr_end(&self) -> u32 {
        self.pos_end().chr()
    }

    /// Confidence interval around POS
    pub fn ci(&self) -> GenomeInterval {
        GenomeInterval::new(&self.pos.shifted(self.ci_pos.lo), self.ci_pos.width())
    }

    /// Confidence interval around the end position
    pub fn ci_end(&self) -> GenomeInterval {
        match &self.kind {
            SvKind::BreakEnd(bnd) => {
                GenomeInterval::new(&bnd.pos_end.shifted(bnd.ci_end.lo), bnd.ci_end.width())
            }
            _ => match self.linear() {
                Some(sv) => GenomeInterval::new(
                    &self.pos.shifted(sv.len as i64 + sv.ci_end.lo),
                    sv.ci_end.width(),
                ),
                None => self.ci(),
            },
        }
    }

    /// Largest interval possibly affected
    pub fn affected_interval_outer(&self) -> GenomeInterval {
        match self.linear() {
            Some(sv) => {
                let len = self.ci_pos.lo + sv.len as i64 + sv.ci_end.hi;
                GenomeInterval::new(&self.pos.shifted(-self.ci_pos.lo), len.max(0) as u64)
            }
            None => self.ci(),
        }
    }

    /// Interval certainly affected
    pub fn affected_interval_inner(&self) -> GenomeInterval {
        match self.linear() {
            Some(sv) => {
                let len = sv.len as i64 - self.ci_pos.hi - sv.ci_end.lo;
                if len > 0 {
                    GenomeInterval::new(&self.pos.shifted(self.ci_pos.hi), len as u64)
                } else {
                    GenomeInterval::new(&self.pos, 0)
                }
            }
            None => self.ci(),
        }
    }

    /// Interval of the mate break-end, only for break-ends
    pub fn affected_interval_pos_end(&self) -> Option<GenomeInterval> {
        match &self.kind {
            SvKind::BreakEnd(_) => Some(self.ci_end()),
            _ => None,
        }
    }

    /// Reference bases described by the record
    pub fn genome_interval(&self) -> GenomeInterval {
        match &self.kind {
            SvKind::BreakEnd(_) => self.affected_interval_outer(),
            _ => GenomeInterval::new(&self.pos, self.len()),
        }
    }

    /// Structural variants stay on the forward strand
    pub fn with_strand(&self, strand: Strand) -> Result<Self> {
        if strand != Strand::Plus {
            return Err(AnnotateError::StrandChange {
                variant: self.to_string(),
            });
        }
        Ok(self.clone())
    }
}

impl fmt::Display for StructuralVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}>{}",
            self.pos, self.ref_allele, self.alt_allele
        )
    }
}

/// Structural-variant INFO values of one VCF record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvInfo {
    pub sv_type: String,
    pub sv_len: Option<i64>,
    /// 1-based `END`
    pub end: Option<i64>,
    pub ci_pos: ConfidenceInterval,
    pub ci_end: ConfidenceInterval,
    /// Delly `CT`
    pub connection_type: Option<String>,
    /// `CHR2` of a break-end
    pub chr2: Option<String>,
}

impl SvInfo {
    /// Parse a `;`-separated INFO column
    ///
    /// Returns `None` when there is no `SVTYPE`.
    pub fn parse(info: &str) -> Result<Option<Self>> {
        let fields: HashMap<&str, &str> = info
            .split(';')
            .filter(|f| !f.is_empty() && *f != ".")
            .map(|f| f.split_once('=').unwrap_or((f, "")))
            .collect();
        let Some(sv_type) = fields.get("SVTYPE") else {
            return Ok(None);
        };
        let int = |key: &str| -> Result<Option<i64>> {
            fields
                .get(key)
                .map(|v| {
                    v.parse::<i64>().map_err(|_| {
                        AnnotateError::invalid_variant(format!("invalid {} value {:?}", key, v))
                    })
                })
                .transpose()
        };
        let ci = |key: &str| -> Result<ConfidenceInterval> {
            fields
                .get(key)
                .map(|v| ConfidenceInterval::parse(v))
                .transpose()
                .map(Option::unwrap_or_default)
        };
        Ok(Some(Self {
            sv_type: sv_type.to_string(),
            sv_len: int("SVLEN")?,
            end: int("END")?,
            ci_pos: ci("CIPOS")?,
            ci_end: ci("CIEND")?,
            connection_type: fields.get("CT").map(|s| s.to_string()),
            chr2: fields.get("CHR2").map(|s| s.to_string()),
        }))
    }
}

/// Mate of a break-end, from `chr:pos` in ALT brackets or from `CHR2`/`END`
fn mate_position(pos: &GenomePosition, alt: &str, info: &SvInfo) -> Result<GenomePosition> {
    let dict = pos.dict();
    let from_brackets = alt
        .split(['[', ']'])
        .find(|part| part.contains(':'))
        .and_then(|part| part.rsplit_once(':'));
    let (chr_name, one_based) = match (from_brackets, &info.chr2, info.end) {
        (Some((chr, p)), _, _) => {
            let p = p.parse::<i64>().map_err(|_| {
                AnnotateError::invalid_variant(format!("invalid mate position in {}", alt))
            })?;
            (chr.to_string(), p)
        }
        (None, Some(chr2), Some(end)) => (chr2.clone(), end),
        (None, None, Some(end)) => (pos.chr_name().to_string(), end),
        _ => {
            return Err(AnnotateError::invalid_variant(format!(
                "break-end {} has no mate position",
                alt
            )))
        }
    };
    let chr = dict
        .contig_id(&chr_name)
        .ok_or(AnnotateError::UnknownChromosome { id: chr_name })?;
    GenomePosition::new(dict, Strand::Plus, chr, one_based, PositionType::OneBased)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::ReferenceDictionary;
    use std::sync::Arc;

    fn dict() -> Arc<ReferenceDictionary> {
        let mut dict = ReferenceDictionary::new();
        dict.add_contig(1, "chr1", 1_000_000);
        dict.add_contig(2, "chr2", 1_000_000);
        Arc::new(dict)
    }

    fn pos(chr: u32, p: i64) -> GenomePosition {
        GenomePosition::new(&dict(), Strand::Plus, chr, p, PositionType::ZeroBased).unwrap()
    }

    fn ci10() -> ConfidenceInterval {
        ConfidenceInterval::new(-10, 10)
    }

    // =========================================================================
    // Types and tags
    // =========================================================================

    #[test]
    fn test_sv_type_from_code() {
        assert_eq!(SvType::from_code("DEL").unwrap(), SvType::Del);
        assert_eq!(SvType::from_code("DEL:ME:ALU").unwrap(), SvType::Del);
        assert_eq!(SvType::from_code("dup").unwrap(), SvType::Dup);
        assert_eq!(SvType::from_code("BND").unwrap(), SvType::Bnd);
        assert!(matches!(
            SvType::from_code("TRA"),
            Err(AnnotateError::UnknownSvType { .. })
        ));
        assert!(matches!(
            SvType::from_code("XYZ"),
            Err(AnnotateError::UnknownSvType { .. })
        ));
    }

    #[test]
    fn test_delly_connection_types() {
        assert_eq!(
            BreakendDirection::from_delly_connection_type("3to3").unwrap(),
            BreakendDirection::ThreeToThree
        );
        assert_eq!(
            BreakendDirection::from_delly_connection_type("5to5").unwrap(),
            BreakendDirection::FiveToFive
        );
        let err = BreakendDirection::from_delly_connection_type("3to4").unwrap_err();
        assert_eq!(err.to_string(), "Unknown connection type 3to4");
    }

    #[test]
    fn test_bracket_directions() {
        use BreakendDirection::*;
        assert_eq!(BreakendDirection::from_bracket_alt("G[chr2:100["), Some(ThreeToFive));
        assert_eq!(BreakendDirection::from_bracket_alt("G]chr2:100]"), Some(ThreeToThree));
        assert_eq!(BreakendDirection::from_bracket_alt("]chr2:100]G"), Some(FiveToThree));
        assert_eq!(BreakendDirection::from_bracket_alt("[chr2:100[G"), Some(FiveToFive));
        assert_eq!(BreakendDirection::from_bracket_alt("<DEL>"), None);
    }

    #[test]
    fn test_confidence_interval_parse() {
        assert_eq!(ConfidenceInterval::parse("-10,10").unwrap(), ci10());
        assert!(ConfidenceInterval::parse("10").is_err());
        assert!(ConfidenceInterval::parse("a,b").is_err());
    }

    // =========================================================================
    // Intervals
    // =========================================================================

    #[test]
    fn test_linear_intervals() {
        let sv = StructuralVariant::deletion(pos(1, 1000), "A", "<DEL>", ci10(), 100, ci10()).unwrap();
        assert_eq!(sv.sv_type(), SvType::Del);
        let ci = sv.ci();
        assert_eq!((ci.begin(), ci.end()), (990, 1010));
        let ci_end = sv.ci_end();
        assert_eq!((ci_end.begin(), ci_end.end()), (1090, 1110));
        let outer = sv.affected_interval_outer();
        assert_eq!((outer.begin(), outer.end()), (1010, 1110));
        let inner = sv.affected_interval_inner();
        assert_eq!((inner.begin(), inner.end()), (1010, 1110));
        assert_eq!(sv.pos_end().pos(), 1100);
        let itv = sv.genome_interval();
        assert_eq!((itv.begin(), itv.end()), (1000, 1100));
    }

    #[test]
    fn test_inner_interval_collapses() {
        let sv = StructuralVariant::deletion(
            pos(1, 1000),
            "A",
            "<DEL>",
            ConfidenceInterval::new(0, 100),
            50,
            ConfidenceInterval::new(0, 0),
        )
        .unwrap();
        let inner = sv.affected_interval_inner();
        assert!(inner.is_empty());
        assert_eq!(inner.begin(), 1000);

        // symmetric intervals keep the length
        let wide = ConfidenceInterval::new(-100, 100);
        let sv = StructuralVariant::deletion(pos(1, 1000), "A", "<DEL>", wide, 50, wide).unwrap();
        let inner = sv.affected_interval_inner();
        assert_eq!((inner.begin(), inner.end()), (1100, 1150));
    }

    #[test]
    fn test_break_end_intervals() {
        let sv = StructuralVariant::break_end(
            pos(1, 1000),
            "A",
            "A[chr2:5001[",
            ci10(),
            pos(2, 5000),
            ConfidenceInterval::new(-5, 5),
            BreakendDirection::ThreeToFive,
        )
        .unwrap();
        let outer = sv.affected_interval_outer();
        assert_eq!((outer.begin(), outer.end()), (990, 1010));
        let mate = sv.affected_interval_pos_end().unwrap();
        assert_eq!((mate.chr(), mate.begin(), mate.end()), (2, 4995, 5005));
        assert_eq!(sv.chr_end(), 2);
    }

    #[test]
    fn test_strand_change_rejected() {
        let sv = StructuralVariant::insertion(pos(1, 10), "A", "<INS>", ci10()).unwrap();
        assert!(sv.with_strand(Strand::Plus).is_ok());
        assert!(matches!(
            sv.with_strand(Strand::Minus),
            Err(AnnotateError::StrandChange { .. })
        ));
    }

    #[test]
    fn test_literal_alleles_rejected() {
        let err = StructuralVariant::deletion(pos(1, 10), "AC", "A", ci10(), 1, ci10()).unwrap_err();
        assert!(matches!(err, AnnotateError::InvalidGenomeVariant { .. }));
    }

    // =========================================================================
    // VCF fields
    // =========================================================================

    #[test]
    fn test_from_vcf_fields_deletion() {
        let info = SvInfo::parse("SVTYPE=DEL:ME:ALU;END=1100;CIPOS=-10,10;CIEND=-10,10")
            .unwrap()
            .unwrap();
        let sv = StructuralVariant::from_vcf_fields(pos(1, 999), "A", "<DEL:ME:ALU>", &info).unwrap();
        assert_eq!(sv.sv_type(), SvType::Del);
        assert_eq!(sv.len(), 100);
        assert_eq!(sv.sub_type(), Some("ME:ALU"));
        assert_eq!(sv.ci_pos(), ci10());
    }

    #[test]
    fn test_from_vcf_fields_svlen_wins() {
        let info = SvInfo::parse("SVTYPE=DUP;SVLEN=-250;END=2000").unwrap().unwrap();
        let sv = StructuralVariant::from_vcf_fields(pos(1, 999), "A", "<DUP>", &info).unwrap();
        assert_eq!(sv.len(), 250);
    }

    #[test]
    fn test_from_vcf_fields_break_end() {
        let info = SvInfo::parse("SVTYPE=BND").unwrap().unwrap();
        let sv = StructuralVariant::from_vcf_fields(pos(1, 999), "A", "A]chr2:300]", &info).unwrap();
        match sv.kind() {
            SvKind::BreakEnd(bnd) => {
                assert_eq!(bnd.direction, BreakendDirection::ThreeToThree);
                assert_eq!((bnd.pos_end.chr(), bnd.pos_end.pos()), (2, 299));
            }
            other => panic!("unexpected kind {:?}", other),
        }

        let info = SvInfo::parse("SVTYPE=BND;CHR2=2;END=300;CT=5to3").unwrap().unwrap();
        let sv = StructuralVariant::from_vcf_fields(pos(1, 999), "A", "<TRA>", &info).unwrap();
        assert_eq!(sv.chr_end(), 2);

        let info = SvInfo::parse("SVTYPE=BND;CT=4to4;END=300").unwrap().unwrap();
        assert!(matches!(
            StructuralVariant::from_vcf_fields(pos(1, 999), "A", "<TRA>", &info),
            Err(AnnotateError::UnknownConnectionType { .. })
        ));
    }

    #[test]
    fn test_info_without_svtype() {
        assert!(SvInfo::parse("DP=10").unwrap().is_none());
        assert!(SvInfo::parse("SVTYPE=DEL;SVLEN=abc").is_err());
    }

    #[test]
    fn test_missing_length() {
        let info = SvInfo::parse("SVTYPE=DEL").unwrap().unwrap();
        assert!(StructuralVariant::from_vcf_fields(pos(1, 999), "A", "<DEL>", &info).is_err());
    }
}
