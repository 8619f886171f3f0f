//! Variant input records
//!
//! A record is one tab-separated `CHROM POS REF ALT [INFO]` line. POS is
//! 1-based as in VCF. When INFO carries `SVTYPE` the record becomes a
//! [`StructuralVariant`], otherwise a [`SmallGenomeVariant`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::coords::{GenomePosition, PositionType, ReferenceDictionary, Strand};
use crate::error::AnnotateError;
use crate::variant::{GenomeVariant, SmallGenomeVariant, StructuralVariant, SvInfo};
use crate::Result;

/// One input line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRecord {
    /// Chromosome name (e.g. "chr1" or "1")
    pub chrom: String,

    /// 1-based position of the first reference base
    pub pos: i64,

    pub reference: String,

    pub alternate: String,

    /// Raw INFO column, None if absent or "."
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl VariantRecord {
    /// Parse a tab-separated line
    pub fn parse(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.trim_end_matches(['\n', '\r']).split('\t').collect();
        if fields.len() < 4 {
            return Err(AnnotateError::invalid_variant(format!(
                "expected CHROM POS REF ALT [INFO], got {} column(s) in {:?}",
                fields.len(),
                line
            )));
        }
        let pos = fields[1].trim().parse::<i64>().map_err(|_| {
            AnnotateError::invalid_variant(format!("invalid position {:?}", fields[1]))
        })?;
        if pos < 1 {
            return Err(AnnotateError::invalid_variant(format!(
                "position {} is not 1-based",
                pos
            )));
        }
        let info = fields
            .get(4)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty() && *s != ".")
            .map(str::to_string);

        Ok(Self {
            chrom: fields[0].trim().to_string(),
            pos,
            reference: allele(fields[2]),
            alternate: allele(fields[3]),
            info,
        })
    }

    /// Whether the line carries a record at all
    pub fn is_data_line(line: &str) -> bool {
        let line = line.trim();
        !line.is_empty() && !line.starts_with('#')
    }

    /// Resolve the record against `dict`
    pub fn to_variant(&self, dict: &Arc<ReferenceDictionary>) -> Result<GenomeVariant> {
        let chr = dict
            .contig_id(&self.chrom)
            .ok_or_else(|| AnnotateError::UnknownChromosome {
                id: self.chrom.clone(),
            })?;
        let pos = GenomePosition::new(dict, Strand::Plus, chr, self.pos, PositionType::OneBased)?;

        let sv_info = match &self.info {
            Some(info) => SvInfo::parse(info)?,
            None => None,
        };
        match sv_info {
            Some(info) => Ok(StructuralVariant::from_vcf_fields(
                pos,
                &self.reference,
                &self.alternate,
                &info,
            )?
            .into()),
            None => Ok(SmallGenomeVariant::new(pos, &self.reference, &self.alternate).into()),
        }
    }
}

/// "." and "-" stand for an empty allele
fn allele(value: &str) -> String {
    match value.trim() {
        "." | "-" => String::new(),
        other => other.to_string(),
    }
}

impl fmt::Display for VariantRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |s: &str| if s.is_empty() { ".".to_string() } else { s.to_string() };
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.chrom,
            self.pos,
            show(&self.reference),
            show(&self.alternate)
        )?;
        if let Some(info) = &self.info {
            write!(f, "\t{}", info)?;
        }
        Ok(())
    }
}
