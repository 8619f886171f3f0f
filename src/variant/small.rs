//! Small sequence variants given as position, reference and alternative allele

use std::cmp::Ordering;
use std::fmt;

use crate::coords::{GenomeInterval, GenomePosition, Strand};
use crate::sequence::{common_prefix_len, common_suffix_len, is_symbolic, reverse_complement};

/// Classification of a small variant by its allele lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SmallGenomeVariantType {
    Snv,
    Insertion,
    Deletion,
    BlockSubstitution,
}

impl fmt::Display for SmallGenomeVariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SmallGenomeVariantType::Snv => "SNV",
            SmallGenomeVariantType::Insertion => "INSERTION",
            SmallGenomeVariantType::Deletion => "DELETION",
            SmallGenomeVariantType::BlockSubstitution => "BLOCK_SUBSTITUTION",
        };
        write!(f, "{}", s)
    }
}

/// A trimmed small variant
///
/// Construction strips the common suffix and then the common prefix of the
/// two alleles, advancing the position by the stripped prefix. This is not a
/// left-shift normalization. Variants built from literal alleles are stored
/// on the forward strand; [`with_strand`](Self::with_strand) derives a
/// reverse-complemented view. Symbolic alleles are kept exactly as given.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use ferro_annotate::coords::{GenomePosition, PositionType, ReferenceDictionary, Strand};
/// use ferro_annotate::variant::{SmallGenomeVariant, SmallGenomeVariantType};
///
/// let mut dict = ReferenceDictionary::new();
/// dict.add_contig(1, "chr1", 1000);
/// let dict = Arc::new(dict);
/// let pos = GenomePosition::new(&dict, Strand::Plus, 1, 100, PositionType::OneBased).unwrap();
///
/// let var = SmallGenomeVariant::new(pos, "CAT", "CGT");
/// assert_eq!(var.ref_allele(), "A");
/// assert_eq!(var.alt_allele(), "G");
/// assert_eq!(var.pos().pos(), 100);
/// assert_eq!(var.variant_type(), SmallGenomeVariantType::Snv);
/// ```
#[derive(Debug, Clone)]
pub struct SmallGenomeVariant {
    pos: GenomePosition,
    ref_allele: String,
    alt_allele: String,
}

impl SmallGenomeVariant {
    /// Trim the alleles and bring the variant onto the forward strand
    pub fn new(pos: GenomePosition, ref_allele: impl Into<String>, alt_allele: impl Into<String>) -> Self {
        Self::new_on_strand(pos, ref_allele, alt_allele, Strand::Plus)
    }

    /// Trim the alleles and express the variant on `strand`
    pub fn new_on_strand(
        pos: GenomePosition,
        ref_allele: impl Into<String>,
        alt_allele: impl Into<String>,
        strand: Strand,
    ) -> Self {
        let ref_allele = ref_allele.into();
        let alt_allele = alt_allele.into();

        if is_symbolic(&ref_allele) || is_symbolic(&alt_allele) {
            if strand == pos.strand() {
                return Self {
                    pos,
                    ref_allele,
                    alt_allele,
                };
            }
            return Self {
                pos: pos.with_strand(strand),
                ref_allele: reverse_complement(&ref_allele),
                alt_allele: reverse_complement(&alt_allele),
            };
        }

        let (pos, ref_allele, alt_allele) = trim(pos, &ref_allele, &alt_allele);
        Self {
            pos,
            ref_allele,
            alt_allele,
        }
        .with_strand(strand)
    }

    /// The same change expressed on `strand`
    ///
    /// The position moves to the first affected base on the new strand; for
    /// insertions it stays the base after the insertion point.
    pub fn with_strand(&self, strand: Strand) -> Self {
        if strand == self.pos.strand() {
            return self.clone();
        }
        if self.is_symbolic() {
            return Self {
                pos: self.pos.with_strand(strand),
                ref_allele: reverse_complement(&self.ref_allele),
                alt_allele: reverse_complement(&self.alt_allele),
            };
        }
        let delta = self.ref_allele.len() as i64 - 1;
        Self {
            pos: self.pos.shifted(delta).with_strand(strand),
            ref_allele: reverse_complement(&self.ref_allele),
            alt_allele: reverse_complement(&self.alt_allele),
        }
    }

    pub fn pos(&self) -> &GenomePosition {
        &self.pos
    }

    pub fn ref_allele(&self) -> &str {
        &self.ref_allele
    }

    pub fn alt_allele(&self) -> &str {
        &self.alt_allele
    }

    pub fn chr(&self) -> u32 {
        self.pos.chr()
    }

    pub fn strand(&self) -> Strand {
        self.pos.strand()
    }

    pub fn is_symbolic(&self) -> bool {
        is_symbolic(&self.ref_allele) || is_symbolic(&self.alt_allele)
    }

    /// Reference bases covered by the variant; one base for symbolic alleles
    pub fn genome_interval(&self) -> GenomeInterval {
        if self.is_symbolic() {
            return GenomeInterval::new(&self.pos, 1);
        }
        GenomeInterval::new(&self.pos, self.ref_allele.len() as u64)
    }

    pub fn variant_type(&self) -> SmallGenomeVariantType {
        match (self.ref_allele.len(), self.alt_allele.len()) {
            (0, n) if n > 0 => SmallGenomeVariantType::Insertion,
            (n, 0) if n > 0 => SmallGenomeVariantType::Deletion,
            (1, 1) => SmallGenomeVariantType::Snv,
            _ => SmallGenomeVariantType::BlockSubstitution,
        }
    }

    /// Whether the variant is a purine or pyrimidine exchange
    pub fn is_transition(&self) -> bool {
        self.variant_type() == SmallGenomeVariantType::Snv
            && matches!(
                (self.ref_allele.as_str(), self.alt_allele.as_str()),
                ("A", "G") | ("G", "A") | ("C", "T") | ("T", "C")
            )
    }

    pub fn is_transversion(&self) -> bool {
        self.variant_type() == SmallGenomeVariantType::Snv && !self.is_transition()
    }

    /// Genomic change description without the contig, e.g. `g.101A>G`
    pub fn genomic_change(&self) -> String {
        let fwd = self.with_strand(Strand::Plus);
        let p = fwd.pos.pos();
        let (r, a) = (fwd.ref_allele.as_str(), fwd.alt_allele.as_str());
        match (r.len(), a.len()) {
            _ if fwd.is_symbolic() => format!("g.{}{}>{}", p + 1, r, a),
            (0, _) => format!("g.{}_{}ins{}", p, p + 1, a),
            (1, 0) => format!("g.{}del{}", p + 1, r),
            (_, 0) => format!("g.{}_{}del{}", p + 1, p + r.len() as i64, r),
            (1, 1) => format!("g.{}{}>{}", p + 1, r, a),
            (1, _) => format!("g.{}del{}ins{}", p + 1, r, a),
            _ => format!("g.{}_{}del{}ins{}", p + 1, p + r.len() as i64, r, a),
        }
    }
}

/// Strip the common suffix, then the common prefix, advancing the position
fn trim(pos: GenomePosition, ref_allele: &str, alt_allele: &str) -> (GenomePosition, String, String) {
    // byte-wise trimming needs char boundaries
    if !ref_allele.is_ascii() || !alt_allele.is_ascii() {
        return (pos, ref_allele.to_string(), alt_allele.to_string());
    }
    let suffix = common_suffix_len(ref_allele, alt_allele);
    let r = &ref_allele[..ref_allele.len() - suffix];
    let a = &alt_allele[..alt_allele.len() - suffix];
    let prefix = common_prefix_len(r, a);
    (
        pos.shifted(prefix as i64),
        r[prefix..].to_string(),
        a[prefix..].to_string(),
    )
}

impl PartialEq for SmallGenomeVariant {
    /// Compares on a common strand
    fn eq(&self, other: &Self) -> bool {
        let other = other.with_strand(self.strand());
        self.pos == other.pos
            && self.ref_allele == other.ref_allele
            && self.alt_allele == other.alt_allele
    }
}

impl Eq for SmallGenomeVariant {}

impl PartialOrd for SmallGenomeVariant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallGenomeVariant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.pos
            .cmp(&other.pos)
            .then_with(|| self.ref_allele.cmp(&other.ref_allele))
            .then_with(|| self.alt_allele.cmp(&other.alt_allele))
    }
}

impl fmt::Display for SmallGenomeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.pos.chr_name(), self.genomic_change())
    }
}
