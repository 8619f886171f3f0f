//! Transcript- and protein-level change descriptions
//!
//! Builders hand a trimmed variant (or the edited CDS) to a
//! [`ChangeFormatter`], which returns structured [`NucleotideChange`] and
//! [`ProteinChange`] values. Their `to_hgvs()` renders the HGVS notation
//! used in the ANN `HGVS.c` and `HGVS.p` columns.

use std::fmt;

use crate::annotation::protein;
use crate::reference::TranscriptProjector;
use crate::sequence::AminoAcid;
use crate::variant::{SmallGenomeVariant, SmallGenomeVariantType};

/// Edit part of a transcript-level change
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NucleotideEdit {
    Substitution {
        reference: String,
        alternative: String,
    },
    Deletion,
    Insertion(String),
    Duplication,
    DeletionInsertion(String),
}

/// A change on `c.` or `n.` coordinates
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NucleotideChange {
    /// `c.` or `n.`
    pub prefix: &'static str,
    pub first: String,
    /// Last position of a range, `None` for single positions
    pub last: Option<String>,
    pub edit: NucleotideEdit,
}

impl NucleotideChange {
    pub fn new(
        prefix: &'static str,
        first: impl Into<String>,
        last: Option<String>,
        edit: NucleotideEdit,
    ) -> Self {
        Self {
            prefix,
            first: first.into(),
            last,
            edit,
        }
    }

    pub fn to_hgvs(&self) -> String {
        let range = match &self.last {
            Some(last) => format!("{}_{}", self.first, last),
            None => self.first.clone(),
        };
        match &self.edit {
            NucleotideEdit::Substitution {
                reference,
                alternative,
            } => format!("{}{}{}>{}", self.prefix, range, reference, alternative),
            NucleotideEdit::Deletion => format!("{}{}del", self.prefix, range),
            NucleotideEdit::Insertion(seq) => format!("{}{}ins{}", self.prefix, range, seq),
            NucleotideEdit::Duplication => format!("{}{}dup", self.prefix, range),
            NucleotideEdit::DeletionInsertion(seq) => {
                format!("{}{}delins{}", self.prefix, range, seq)
            }
        }
    }
}

impl fmt::Display for NucleotideChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hgvs())
    }
}

/// An amino acid with its 1-based position
pub type Residue = (u64, AminoAcid);

/// Effect of a CDS edit on the encoded protein
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProteinEdit {
    /// No amino acid changes
    Identity(Residue),
    Substitution {
        position: u64,
        reference: AminoAcid,
        alternative: AminoAcid,
    },
    Deletion {
        first: Residue,
        last: Residue,
    },
    Insertion {
        before: Residue,
        after: Residue,
        inserted: Vec<AminoAcid>,
    },
    DeletionInsertion {
        first: Residue,
        last: Residue,
        inserted: Vec<AminoAcid>,
    },
    /// Reading frame shifted at `position`; `ter_distance` counts residues up to the new stop
    Frameshift {
        position: u64,
        reference: AminoAcid,
        alternative: AminoAcid,
        ter_distance: Option<u64>,
    },
    /// Stop codon at `position` lost
    Extension {
        position: u64,
        alternative: AminoAcid,
        ter_distance: Option<u64>,
    },
    /// Initiation codon lost
    StartLoss,
    /// Consequence could not be predicted
    Unknown,
}

impl ProteinEdit {
    /// 1-based position of the first affected residue
    pub fn first_position(&self) -> Option<u64> {
        match self {
            ProteinEdit::Identity((pos, _)) => Some(*pos),
            ProteinEdit::Substitution { position, .. }
            | ProteinEdit::Frameshift { position, .. }
            | ProteinEdit::Extension { position, .. } => Some(*position),
            ProteinEdit::Deletion { first, .. } | ProteinEdit::DeletionInsertion { first, .. } => {
                Some(first.0)
            }
            ProteinEdit::Insertion { before, .. } => Some(before.0),
            ProteinEdit::StartLoss => Some(1),
            ProteinEdit::Unknown => None,
        }
    }
}

/// A protein-level change
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProteinChange {
    pub edit: ProteinEdit,
}

impl ProteinChange {
    pub fn new(edit: ProteinEdit) -> Self {
        Self { edit }
    }

    /// Change whose consequence is not known (`p.?`)
    pub fn unknown() -> Self {
        Self::new(ProteinEdit::Unknown)
    }

    pub fn to_hgvs(&self) -> String {
        let residue = |(pos, aa): &Residue| format!("{}{}", aa.three_letter(), pos);
        let range = |first: &Residue, last: &Residue| {
            if first.0 == last.0 {
                residue(first)
            } else {
                format!("{}_{}", residue(first), residue(last))
            }
        };
        let ter = |distance: &Option<u64>| match distance {
            Some(n) => format!("Ter{}", n),
            None => "Ter?".to_string(),
        };
        let body = match &self.edit {
            ProteinEdit::Identity(r) => format!("{}=", residue(r)),
            ProteinEdit::Substitution {
                position,
                reference,
                alternative,
            } => format!(
                "{}{}{}",
                reference.three_letter(),
                position,
                alternative.three_letter()
            ),
            ProteinEdit::Deletion { first, last } => format!("{}del", range(first, last)),
            ProteinEdit::Insertion {
                before,
                after,
                inserted,
            } => format!(
                "{}_{}ins{}",
                residue(before),
                residue(after),
                three_letter(inserted)
            ),
            ProteinEdit::DeletionInsertion {
                first,
                last,
                inserted,
            } => format!("{}delins{}", range(first, last), three_letter(inserted)),
            ProteinEdit::Frameshift {
                position,
                reference,
                alternative,
                ter_distance,
            } => format!(
                "{}{}{}fs{}",
                reference.three_letter(),
                position,
                alternative.three_letter(),
                ter(ter_distance)
            ),
            ProteinEdit::Extension {
                position,
                alternative,
                ter_distance,
            } => format!(
                "Ter{}{}ext{}",
                position,
                alternative.three_letter(),
                ter(ter_distance)
            ),
            ProteinEdit::StartLoss => "Met1?".to_string(),
            ProteinEdit::Unknown => return "p.?".to_string(),
        };
        format!("p.({})", body)
    }
}

impl fmt::Display for ProteinChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hgvs())
    }
}

fn three_letter(peptide: &[AminoAcid]) -> String {
    crate::sequence::codon::three_letter_string(peptide)
}

/// Computes change descriptions for one transcript
pub trait ChangeFormatter: Send + Sync {
    /// Transcript-level change of `variant`, which may be given on either strand
    ///
    /// Returns `None` when the variant lies outside the transcription region.
    fn nucleotide_change(
        &self,
        projector: &TranscriptProjector<'_>,
        variant: &SmallGenomeVariant,
    ) -> Option<NucleotideChange>;

    /// Protein-level change of replacing `ref_len` CDS bases at `cds_offset` by `alt`
    ///
    /// `cds` is the reference CDS including the stop codon.
    fn protein_change(&self, cds: &str, cds_offset: usize, ref_len: usize, alt: &str)
        -> ProteinChange;
}

/// HGVS change formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct HgvsChangeFormatter;

impl HgvsChangeFormatter {
    /// Insertions repeating the preceding transcript bases are duplications
    fn duplication(
        &self,
        projector: &TranscriptProjector<'_>,
        variant: &SmallGenomeVariant,
    ) -> Option<NucleotideChange> {
        let tx = projector.transcript();
        let seq = tx.sequence.as_deref()?;
        let inserted = variant.alt_allele();
        let n = inserted.len() as u64;
        let last = projector.genome_to_tx_pos(&variant.pos().shifted(-1))?;
        if last + 1 < n {
            return None;
        }
        let first = last + 1 - n;
        let preceding = seq.get(first as usize..=last as usize)?;
        if !preceding.eq_ignore_ascii_case(inserted) {
            return None;
        }
        let first_pos = projector.hgvs_position(&projector.tx_to_genome_pos(first)?)?;
        let last_pos = if n > 1 {
            Some(projector.hgvs_position(&projector.tx_to_genome_pos(last)?)?)
        } else {
            None
        };
        Some(NucleotideChange::new(
            projector.hgvs_prefix(),
            first_pos,
            last_pos,
            NucleotideEdit::Duplication,
        ))
    }
}

impl ChangeFormatter for HgvsChangeFormatter {
    fn nucleotide_change(
        &self,
        projector: &TranscriptProjector<'_>,
        variant: &SmallGenomeVariant,
    ) -> Option<NucleotideChange> {
        let variant = variant.with_strand(projector.transcript().strand());
        let prefix = projector.hgvs_prefix();
        let ref_allele = variant.ref_allele();
        let alt_allele = variant.alt_allele();

        if variant.variant_type() == SmallGenomeVariantType::Insertion {
            if let Some(dup) = self.duplication(projector, &variant) {
                return Some(dup);
            }
            let before = projector.hgvs_position(&variant.pos().shifted(-1))?;
            let after = projector.hgvs_position(variant.pos())?;
            return Some(NucleotideChange::new(
                prefix,
                before,
                Some(after),
                NucleotideEdit::Insertion(alt_allele.to_string()),
            ));
        }

        let first = projector.hgvs_position(variant.pos())?;
        let last = if ref_allele.len() > 1 {
            let end = variant.pos().shifted(ref_allele.len() as i64 - 1);
            Some(projector.hgvs_position(&end)?)
        } else {
            None
        };
        let edit = match variant.variant_type() {
            SmallGenomeVariantType::Snv => NucleotideEdit::Substitution {
                reference: ref_allele.to_string(),
                alternative: alt_allele.to_string(),
            },
            SmallGenomeVariantType::Deletion => NucleotideEdit::Deletion,
            _ => NucleotideEdit::DeletionInsertion(alt_allele.to_string()),
        };
        Some(NucleotideChange::new(prefix, first, last, edit))
    }

    fn protein_change(
        &self,
        cds: &str,
        cds_offset: usize,
        ref_len: usize,
        alt: &str,
    ) -> ProteinChange {
        ProteinChange::new(protein::protein_edit(cds, cds_offset, ref_len, alt))
    }
}
