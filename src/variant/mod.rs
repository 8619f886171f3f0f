//! Genomic variants
//!
//! A [`GenomeVariant`] is either a trimmed small variant or a structural
//! variant. Annotation dispatches on this enum.

pub mod small;
pub mod structural;

pub use small::{SmallGenomeVariant, SmallGenomeVariantType};
pub use structural::{
    BreakEndSv, BreakendDirection, ConfidenceInterval, LinearSv, StructuralVariant, SvInfo,
    SvKind, SvType,
};

use std::fmt;

use crate::coords::{GenomeInterval, GenomePosition};

/// A variant to annotate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenomeVariant {
    Small(SmallGenomeVariant),
    Structural(StructuralVariant),
}

impl GenomeVariant {
    pub fn pos(&self) -> &GenomePosition {
        match self {
            GenomeVariant::Small(v) => v.pos(),
            GenomeVariant::Structural(v) => v.pos(),
        }
    }

    pub fn chr(&self) -> u32 {
        self.pos().chr()
    }

    pub fn chr_name(&self) -> &str {
        self.pos().chr_name()
    }

    pub fn ref_allele(&self) -> &str {
        match self {
            GenomeVariant::Small(v) => v.ref_allele(),
            GenomeVariant::Structural(v) => v.ref_allele(),
        }
    }

    pub fn alt_allele(&self) -> &str {
        match self {
            GenomeVariant::Small(v) => v.alt_allele(),
            GenomeVariant::Structural(v) => v.alt_allele(),
        }
    }

    /// Interval used to look up candidate transcripts
    ///
    /// Structural variants use their outer affected interval.
    pub fn query_interval(&self) -> GenomeInterval {
        match self {
            GenomeVariant::Small(v) => v.genome_interval(),
            GenomeVariant::Structural(v) => v.affected_interval_outer(),
        }
    }

    pub fn is_symbolic(&self) -> bool {
        match self {
            GenomeVariant::Small(v) => v.is_symbolic(),
            GenomeVariant::Structural(_) => true,
        }
    }

    pub fn as_small(&self) -> Option<&SmallGenomeVariant> {
        match self {
            GenomeVariant::Small(v) => Some(v),
            GenomeVariant::Structural(_) => None,
        }
    }

    pub fn as_structural(&self) -> Option<&StructuralVariant> {
        match self {
            GenomeVariant::Structural(v) => Some(v),
            GenomeVariant::Small(_) => None,
        }
    }
}

impl From<SmallGenomeVariant> for GenomeVariant {
    fn from(v: SmallGenomeVariant) -> Self {
        GenomeVariant::Small(v)
    }
}

impl From<StructuralVariant> for GenomeVariant {
    fn from(v: StructuralVariant) -> Self {
        GenomeVariant::Structural(v)
    }
}

impl fmt::Display for GenomeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenomeVariant::Small(v) => write!(f, "{}", v),
            GenomeVariant::Structural(v) => write!(f, "{}", v),
        }
    }
}
