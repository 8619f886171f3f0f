//! VCF-facing input and output
//!
//! [`VariantRecord`] reads `CHROM POS REF ALT [INFO]` lines into variants,
//! [`AnnEncoder`] writes annotations as `ANN` INFO values.

mod ann;
mod record;

pub use ann::{escape_value, AnnEncoder, AnnField, ANN_HEADER, INFO_ANN};
pub use record::VariantRecord;
