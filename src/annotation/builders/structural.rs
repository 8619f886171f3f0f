//! Builders for structural variants
//!
//! Each SV type classifies an affected interval against the transcript:
//!
//! | Type | Interval | Transcript-level | Exon-level | Copy number |
//! |------|----------|------------------|------------|-------------|
//! | DEL | outer | `transcript_ablation` | `exon_loss_variant` / `feature_truncation` | loss, decrease |
//! | DUP | outer | `transcript_amplification` on any overlap | - | gain, increase |
//! | INS | POS CI | - | `insertion` + `exon_variant` | - |
//! | INV | outer | `inversion` | `inversion` + `exon_variant` | - |
//! | CNV | outer | - | `exon_variant` | change |
//! | BND | POS CI and mate CI | - | `exon_variant` | - |
//!
//! Intervals that miss exons fall back to `intron_variant`, then to
//! downstream, upstream and finally intergenic. Every result carries
//! `structural_variant`. Intergenic results drop the transcript.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::annotation::location::AnnotationLocation;
use crate::annotation::message::AnnotationMessage;
use crate::annotation::variant_annotation::VariantAnnotation;
use crate::config::AnnotationOptions;
use crate::coords::{GenomeInterval, GenomePosition};
use crate::effect::VariantEffect;
use crate::error::AnnotateError;
use crate::reference::{SequenceOntologyRegions, TranscriptModel};
use crate::variant::{StructuralVariant, SvKind};
use crate::Result;

use super::{neighborhood, transcript_tag};

/// Annotate a structural variant, dispatching on its type
pub fn build(
    tx: Option<&Arc<TranscriptModel>>,
    sv: &StructuralVariant,
    options: &AnnotationOptions,
) -> Result<VariantAnnotation> {
    log::debug!(
        "{} builder for {} on {}",
        sv.sv_type(),
        sv,
        tx.map(|t| t.accession.as_str()).unwrap_or("no transcript")
    );
    match sv.kind() {
        SvKind::Deletion(_) => deletion(tx, sv, options),
        SvKind::Duplication(_) => duplication(tx, sv, options),
        SvKind::Insertion => insertion(tx, sv, options),
        SvKind::Inversion(_) => inversion(tx, sv, options),
        SvKind::CopyNumberVariation(_) => copy_number_variation(tx, sv, options),
        SvKind::BreakEnd(_) => break_end(tx, sv, options),
    }
}

/// Effects collected for one transcript before the common tags are added
#[derive(Debug, Default)]
struct SvEffects {
    effects: BTreeSet<VariantEffect>,
    distance: Option<u64>,
    messages: BTreeSet<AnnotationMessage>,
}

impl SvEffects {
    fn insert(&mut self, effect: VariantEffect) {
        self.effects.insert(effect);
    }

    fn extend(&mut self, effects: impl IntoIterator<Item = VariantEffect>) {
        self.effects.extend(effects);
    }
}

/// Where an interval falls relative to one transcript
enum Placement {
    Exon,
    Intron,
    Outside(VariantEffect, u64),
}

fn place(so: &SequenceOntologyRegions<'_>, interval: &GenomeInterval) -> Placement {
    if so.overlaps_exon(interval) {
        Placement::Exon
    } else if so.overlaps_intron(interval) {
        Placement::Intron
    } else {
        let (effect, distance) = neighborhood(so, interval);
        Placement::Outside(effect, distance)
    }
}

/// A confidence interval, widened to the breakpoint base when it is empty
fn breakpoint(ci: GenomeInterval, pos: &GenomePosition) -> GenomeInterval {
    if ci.is_empty() {
        GenomeInterval::new(pos, 1)
    } else {
        ci
    }
}

fn wrong_kind(sv: &StructuralVariant, expected: &str) -> AnnotateError {
    AnnotateError::invalid_variant(format!("{} is not {}", sv, expected))
}

/// Turn collected effects into the final annotation
fn finish(
    tx: Option<&Arc<TranscriptModel>>,
    sv: &StructuralVariant,
    mut collected: SvEffects,
) -> VariantAnnotation {
    collected.insert(VariantEffect::StructuralVariant);
    let distance = collected
        .effects
        .iter()
        .any(VariantEffect::has_distance)
        .then_some(collected.distance)
        .flatten();
    let tx = match tx {
        Some(tx) if !collected.effects.contains(&VariantEffect::IntergenicVariant) => tx,
        _ => {
            collected.insert(VariantEffect::IntergenicVariant);
            return VariantAnnotation::new(sv.clone(), None, collected.effects)
                .with_distance(distance)
                .with_messages(collected.messages);
        }
    };
    collected.insert(transcript_tag(tx));
    VariantAnnotation::new(sv.clone(), Some(Arc::clone(tx)), collected.effects)
        .with_location(Some(AnnotationLocation::undefined(tx, None)))
        .with_distance(distance)
        .with_messages(collected.messages)
}

/// Record a neighborhood classification
fn outside(collected: &mut SvEffects, effect: VariantEffect, distance: u64) {
    collected.insert(effect);
    collected.distance = Some(distance);
}

/// Deletion: ablation, exon loss or truncation, then copy number loss
pub fn deletion(
    tx: Option<&Arc<TranscriptModel>>,
    sv: &StructuralVariant,
    options: &AnnotationOptions,
) -> Result<VariantAnnotation> {
    if !matches!(sv.kind(), SvKind::Deletion(_)) {
        return Err(wrong_kind(sv, "a deletion"));
    }
    let mut collected = SvEffects::default();
    if let Some(tx) = tx {
        let so = SequenceOntologyRegions::new(tx, options);
        let outer = sv.affected_interval_outer();
        if outer.contains(&tx.tx_region) {
            collected.extend([VariantEffect::TranscriptAblation, VariantEffect::CopyNumberLoss]);
        } else if so.overlaps_exon(&outer) {
            for exon in &tx.exon_regions {
                if outer.contains(exon) {
                    collected.extend([VariantEffect::ExonLossVariant, VariantEffect::CopyNumberLoss]);
                } else if outer.overlaps_with(exon) {
                    collected.extend([VariantEffect::FeatureTruncation, VariantEffect::CopyNumberLoss]);
                }
            }
        } else {
            match place(&so, &outer) {
                Placement::Exon | Placement::Intron => collected.insert(VariantEffect::IntronVariant),
                Placement::Outside(effect, distance) => outside(&mut collected, effect, distance),
            }
        }
    }
    collected.insert(VariantEffect::CopyNumberDecrease);
    Ok(finish(tx, sv, collected))
}

/// Duplication: amplification on any transcript overlap, then copy number increase
pub fn duplication(
    tx: Option<&Arc<TranscriptModel>>,
    sv: &StructuralVariant,
    options: &AnnotationOptions,
) -> Result<VariantAnnotation> {
    if !matches!(sv.kind(), SvKind::Duplication(_)) {
        return Err(wrong_kind(sv, "a duplication"));
    }
    let mut collected = SvEffects::default();
    if let Some(tx) = tx {
        let so = SequenceOntologyRegions::new(tx, options);
        let outer = sv.affected_interval_outer();
        if so.overlaps_transcript(&outer) {
            collected.extend([
                VariantEffect::CopyNumberGain,
                VariantEffect::TranscriptAmplification,
            ]);
        } else {
            let (effect, distance) = neighborhood(&so, &outer);
            outside(&mut collected, effect, distance);
        }
    }
    collected.insert(VariantEffect::CopyNumberIncrease);
    Ok(finish(tx, sv, collected))
}

/// Insertion: classified by the confidence interval around POS
pub fn insertion(
    tx: Option<&Arc<TranscriptModel>>,
    sv: &StructuralVariant,
    options: &AnnotationOptions,
) -> Result<VariantAnnotation> {
    if !matches!(sv.kind(), SvKind::Insertion) {
        return Err(wrong_kind(sv, "an insertion"));
    }
    let mut collected = SvEffects::default();
    if let Some(tx) = tx {
        let so = SequenceOntologyRegions::new(tx, options);
        match place(&so, &breakpoint(sv.ci(), sv.pos())) {
            Placement::Exon => {
                collected.extend([VariantEffect::Insertion, VariantEffect::ExonVariant])
            }
            Placement::Intron => collected.insert(VariantEffect::IntronVariant),
            Placement::Outside(effect, distance) => outside(&mut collected, effect, distance),
        }
    }
    Ok(finish(tx, sv, collected))
}

/// Inversion: whole-transcript or exonic inversion
pub fn inversion(
    tx: Option<&Arc<TranscriptModel>>,
    sv: &StructuralVariant,
    options: &AnnotationOptions,
) -> Result<VariantAnnotation> {
    if !matches!(sv.kind(), SvKind::Inversion(_)) {
        return Err(wrong_kind(sv, "an inversion"));
    }
    let mut collected = SvEffects::default();
    if let Some(tx) = tx {
        let so = SequenceOntologyRegions::new(tx, options);
        let outer = sv.affected_interval_outer();
        if outer.contains(&tx.tx_region) {
            collected.insert(VariantEffect::Inversion);
        } else {
            match place(&so, &outer) {
                Placement::Exon => {
                    collected.extend([VariantEffect::Inversion, VariantEffect::ExonVariant])
                }
                Placement::Intron => collected.insert(VariantEffect::IntronVariant),
                Placement::Outside(effect, distance) => outside(&mut collected, effect, distance),
            }
        }
    }
    Ok(finish(tx, sv, collected))
}

/// Copy number variation: always a copy number change
pub fn copy_number_variation(
    tx: Option<&Arc<TranscriptModel>>,
    sv: &StructuralVariant,
    options: &AnnotationOptions,
) -> Result<VariantAnnotation> {
    if !matches!(sv.kind(), SvKind::CopyNumberVariation(_)) {
        return Err(wrong_kind(sv, "a copy number variation"));
    }
    let mut collected = SvEffects::default();
    collected.insert(VariantEffect::CopyNumberChange);
    if let Some(tx) = tx {
        let so = SequenceOntologyRegions::new(tx, options);
        match place(&so, &sv.affected_interval_outer()) {
            Placement::Exon => collected.insert(VariantEffect::ExonVariant),
            Placement::Intron => collected.insert(VariantEffect::IntronVariant),
            Placement::Outside(effect, distance) => outside(&mut collected, effect, distance),
        }
    }
    Ok(finish(tx, sv, collected))
}

/// Break-end: both break points are classified, the mate only on the transcript's chromosome
///
/// Intergenic is reported only when neither break point is near the
/// transcript, with the smaller of the two distances.
pub fn break_end(
    tx: Option<&Arc<TranscriptModel>>,
    sv: &StructuralVariant,
    options: &AnnotationOptions,
) -> Result<VariantAnnotation> {
    let SvKind::BreakEnd(bnd) = sv.kind() else {
        return Err(wrong_kind(sv, "a break-end"));
    };
    let mut collected = SvEffects::default();
    let Some(tx) = tx else {
        return Ok(finish(None, sv, collected));
    };

    let mut points = vec![breakpoint(sv.ci(), sv.pos())];
    if bnd.pos_end.chr() == tx.chr() {
        if let Some(mate) = sv.affected_interval_pos_end() {
            points.push(breakpoint(mate, &bnd.pos_end));
        }
    } else {
        collected
            .messages
            .insert(AnnotationMessage::InfoMateOnOtherChromosome);
    }

    let so = SequenceOntologyRegions::new(tx, options);
    let mut intergenic: Option<u64> = None;
    for point in &points {
        match place(&so, point) {
            Placement::Exon => collected.insert(VariantEffect::ExonVariant),
            Placement::Intron => collected.insert(VariantEffect::IntronVariant),
            Placement::Outside(VariantEffect::IntergenicVariant, distance) => {
                intergenic = Some(intergenic.map_or(distance, |d| d.min(distance)));
            }
            Placement::Outside(effect, distance) => {
                collected.insert(effect);
                collected.distance = Some(collected.distance.map_or(distance, |d| d.min(distance)));
            }
        }
    }
    if collected.effects.is_empty() {
        if let Some(distance) = intergenic {
            outside(&mut collected, VariantEffect::IntergenicVariant, distance);
        }
    }
    Ok(finish(Some(tx), sv, collected))
}
