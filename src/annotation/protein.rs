//! Protein consequence of CDS edits
//!
//! The reference CDS and the edited CDS are translated and compared after
//! stripping their common leading and trailing residues. Frameshifts are
//! compared up to the first termination codon of each translation.

use crate::annotation::change::{ProteinEdit, Residue};
use crate::effect::VariantEffect;
use crate::sequence::{translate, AminoAcid};

/// Classify replacing `ref_len` bases at `cds_offset` of `cds` by `alt`
///
/// Offsets past the end of `cds` yield [`ProteinEdit::Unknown`].
pub(crate) fn protein_edit(cds: &str, cds_offset: usize, ref_len: usize, alt: &str) -> ProteinEdit {
    let (Some(head), Some(tail)) = (cds.get(..cds_offset), cds.get(cds_offset + ref_len..)) else {
        return ProteinEdit::Unknown;
    };
    let edited = format!("{}{}{}", head, alt, tail);
    let ref_full = translate(cds);
    let alt_full = translate(&edited);
    if ref_full.is_empty() {
        return ProteinEdit::Unknown;
    }

    if (alt.len() as i64 - ref_len as i64) % 3 != 0 {
        return frameshift(&ref_full, &alt_full, cds_offset);
    }

    if cds_offset < 3 && ref_full[0] == AminoAcid::Met && alt_full.first() != Some(&AminoAcid::Met) {
        return ProteinEdit::StartLoss;
    }

    let prefix = common_prefix(&ref_full, &alt_full);
    let max_suffix = ref_full.len().min(alt_full.len()) - prefix;
    let suffix = common_suffix(&ref_full[prefix..], &alt_full[prefix..]).min(max_suffix);
    let ref_d = &ref_full[prefix..ref_full.len() - suffix];
    let alt_d = &alt_full[prefix..alt_full.len() - suffix];
    let residue = |idx: usize| -> Residue { (idx as u64 + 1, ref_full[idx]) };

    if ref_d.is_empty() && alt_d.is_empty() {
        let idx = (cds_offset / 3).min(ref_full.len() - 1);
        return ProteinEdit::Identity(residue(idx));
    }

    if let Some(stop) = ref_d.iter().position(|aa| *aa == AminoAcid::Ter) {
        if !alt_d.contains(&AminoAcid::Ter) {
            return ProteinEdit::Extension {
                position: (prefix + stop) as u64 + 1,
                alternative: alt_d.get(stop).copied().unwrap_or(AminoAcid::Xaa),
                ter_distance: None,
            };
        }
    }

    if !ref_d.is_empty() && alt_d.first() == Some(&AminoAcid::Ter) {
        return ProteinEdit::Substitution {
            position: prefix as u64 + 1,
            reference: ref_d[0],
            alternative: AminoAcid::Ter,
        };
    }

    match (ref_d.len(), alt_d.len()) {
        (0, _) => {
            if prefix == 0 || prefix >= ref_full.len() {
                return ProteinEdit::Unknown;
            }
            ProteinEdit::Insertion {
                before: residue(prefix - 1),
                after: residue(prefix),
                inserted: truncate_at_stop(alt_d).to_vec(),
            }
        }
        (n, 0) => ProteinEdit::Deletion {
            first: residue(prefix),
            last: residue(prefix + n - 1),
        },
        (1, 1) => ProteinEdit::Substitution {
            position: prefix as u64 + 1,
            reference: ref_d[0],
            alternative: alt_d[0],
        },
        (n, _) => ProteinEdit::DeletionInsertion {
            first: residue(prefix),
            last: residue(prefix + n - 1),
            inserted: truncate_at_stop(alt_d).to_vec(),
        },
    }
}

fn frameshift(ref_full: &[AminoAcid], alt_full: &[AminoAcid], cds_offset: usize) -> ProteinEdit {
    let ref_p = truncate_at_stop(ref_full);
    let alt_p = truncate_at_stop(alt_full);
    let prefix = common_prefix(ref_p, alt_p);
    if prefix >= ref_p.len() {
        let idx = (cds_offset / 3).min(ref_p.len() - 1);
        return ProteinEdit::Identity((idx as u64 + 1, ref_p[idx]));
    }
    let reference = ref_p[prefix];
    match alt_p.get(prefix) {
        Some(AminoAcid::Ter) => ProteinEdit::Substitution {
            position: prefix as u64 + 1,
            reference,
            alternative: AminoAcid::Ter,
        },
        alternative => ProteinEdit::Frameshift {
            position: prefix as u64 + 1,
            reference,
            alternative: alternative.copied().unwrap_or(AminoAcid::Xaa),
            ter_distance: (alt_p.last() == Some(&AminoAcid::Ter))
                .then(|| (alt_p.len() - prefix) as u64),
        },
    }
}

/// Effect term of a protein edit
///
/// `cds_offset` is the first CDS base of the change (the base after the
/// insertion point for insertions).
pub(crate) fn protein_effect(
    edit: &ProteinEdit,
    cds_offset: usize,
    ref_len: usize,
    alt_len: usize,
) -> VariantEffect {
    let in_codon_frame = cds_offset % 3 == 0;
    match edit {
        ProteinEdit::Identity((pos, aa)) => match aa {
            AminoAcid::Met if *pos == 1 => VariantEffect::StartRetainedVariant,
            AminoAcid::Ter => VariantEffect::StopRetainedVariant,
            _ => VariantEffect::SynonymousVariant,
        },
        ProteinEdit::StartLoss => VariantEffect::StartLost,
        ProteinEdit::Substitution { alternative, .. } if *alternative == AminoAcid::Ter => {
            VariantEffect::StopGained
        }
        ProteinEdit::Substitution { reference, .. } if *reference == AminoAcid::Ter => {
            VariantEffect::StopLost
        }
        ProteinEdit::Substitution { .. } => VariantEffect::MissenseVariant,
        ProteinEdit::Deletion { .. } => {
            if in_codon_frame && ref_len % 3 == 0 {
                VariantEffect::InframeDeletion
            } else {
                VariantEffect::DisruptiveInframeDeletion
            }
        }
        ProteinEdit::Insertion { inserted, .. } if inserted.contains(&AminoAcid::Ter) => {
            VariantEffect::StopGained
        }
        ProteinEdit::Insertion { .. } => {
            if in_codon_frame {
                VariantEffect::InframeInsertion
            } else {
                VariantEffect::DisruptiveInframeInsertion
            }
        }
        ProteinEdit::DeletionInsertion { inserted, .. } if inserted.contains(&AminoAcid::Ter) => {
            VariantEffect::StopGained
        }
        ProteinEdit::DeletionInsertion { .. } => match ref_len.cmp(&alt_len) {
            std::cmp::Ordering::Greater => VariantEffect::DisruptiveInframeDeletion,
            std::cmp::Ordering::Less => VariantEffect::DisruptiveInframeInsertion,
            std::cmp::Ordering::Equal => VariantEffect::Mnv,
        },
        ProteinEdit::Frameshift { .. } => VariantEffect::FrameshiftVariant,
        ProteinEdit::Extension { .. } => VariantEffect::StopLost,
        ProteinEdit::Unknown => VariantEffect::CodingSequenceVariant,
    }
}

fn truncate_at_stop(peptide: &[AminoAcid]) -> &[AminoAcid] {
    match peptide.iter().position(|aa| *aa == AminoAcid::Ter) {
        Some(idx) => &peptide[..=idx],
        None => peptide,
    }
}

fn common_prefix(a: &[AminoAcid], b: &[AminoAcid]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix(a: &[AminoAcid], b: &[AminoAcid]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}
