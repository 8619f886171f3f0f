//! Annotation of one variant against one transcript

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::annotation::change::{NucleotideChange, ProteinChange};
use crate::annotation::location::AnnotationLocation;
use crate::annotation::message::AnnotationMessage;
use crate::effect::{Impact, VariantEffect};
use crate::reference::TranscriptModel;
use crate::variant::GenomeVariant;

/// A 1-based position together with the length of its coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionAndLength {
    pub pos: u64,
    pub len: u64,
}

impl fmt::Display for PositionAndLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.pos, self.len)
    }
}

/// Positions reported in the `cDNA`, `CDS` and `AA` ANN columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AnnotationPositions {
    pub cdna: Option<PositionAndLength>,
    pub cds: Option<PositionAndLength>,
    pub protein: Option<PositionAndLength>,
}

/// Functional annotation of a variant on a single transcript
///
/// Effects are kept sorted from most to least pathogenic. The transcript is
/// absent for intergenic annotations. Values are built once by an
/// annotation builder and not changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantAnnotation {
    variant: GenomeVariant,
    transcript: Option<Arc<TranscriptModel>>,
    effects: BTreeSet<VariantEffect>,
    location: Option<AnnotationLocation>,
    genomic_change: Option<String>,
    nucleotide_change: Option<NucleotideChange>,
    protein_change: Option<ProteinChange>,
    positions: AnnotationPositions,
    distance: Option<u64>,
    messages: BTreeSet<AnnotationMessage>,
}

impl VariantAnnotation {
    pub fn new(
        variant: impl Into<GenomeVariant>,
        transcript: Option<Arc<TranscriptModel>>,
        effects: impl IntoIterator<Item = VariantEffect>,
    ) -> Self {
        Self {
            variant: variant.into(),
            transcript,
            effects: effects.into_iter().collect(),
            location: None,
            genomic_change: None,
            nucleotide_change: None,
            protein_change: None,
            positions: AnnotationPositions::default(),
            distance: None,
            messages: BTreeSet::new(),
        }
    }

    /// Placeholder without effects that only carries messages
    pub fn message_only(
        variant: impl Into<GenomeVariant>,
        messages: impl IntoIterator<Item = AnnotationMessage>,
    ) -> Self {
        Self::new(variant, None, []).with_messages(messages)
    }

    pub fn with_location(mut self, location: Option<AnnotationLocation>) -> Self {
        self.location = location;
        self
    }

    pub fn with_genomic_change(mut self, change: Option<String>) -> Self {
        self.genomic_change = change;
        self
    }

    pub fn with_nucleotide_change(mut self, change: Option<NucleotideChange>) -> Self {
        self.nucleotide_change = change;
        self
    }

    pub fn with_protein_change(mut self, change: Option<ProteinChange>) -> Self {
        self.protein_change = change;
        self
    }

    pub fn with_positions(mut self, positions: AnnotationPositions) -> Self {
        self.positions = positions;
        self
    }

    pub fn with_distance(mut self, distance: Option<u64>) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_messages(mut self, messages: impl IntoIterator<Item = AnnotationMessage>) -> Self {
        self.messages.extend(messages);
        self
    }

    pub fn variant(&self) -> &GenomeVariant {
        &self.variant
    }

    pub fn transcript(&self) -> Option<&Arc<TranscriptModel>> {
        self.transcript.as_ref()
    }

    /// Effects from most to least pathogenic
    pub fn effects(&self) -> &BTreeSet<VariantEffect> {
        &self.effects
    }

    pub fn location(&self) -> Option<&AnnotationLocation> {
        self.location.as_ref()
    }

    /// Genomic change without contig, e.g. `g.6640063A>C`
    pub fn genomic_change(&self) -> Option<&str> {
        self.genomic_change.as_deref()
    }

    pub fn nucleotide_change(&self) -> Option<&NucleotideChange> {
        self.nucleotide_change.as_ref()
    }

    pub fn protein_change(&self) -> Option<&ProteinChange> {
        self.protein_change.as_ref()
    }

    pub fn positions(&self) -> &AnnotationPositions {
        &self.positions
    }

    /// Bases between the variant and the transcript, for up/downstream and intergenic effects
    pub fn distance(&self) -> Option<u64> {
        self.distance
    }

    pub fn messages(&self) -> &BTreeSet<AnnotationMessage> {
        &self.messages
    }

    /// Most pathogenic effect, `None` for message-only annotations
    pub fn most_pathogenic_effect(&self) -> Option<VariantEffect> {
        self.effects.first().copied()
    }

    /// Highest impact among all effects
    pub fn putative_impact(&self) -> Option<Impact> {
        self.effects.iter().map(VariantEffect::impact).max()
    }

    /// Gene symbol, `.` when unknown
    pub fn gene_symbol(&self) -> &str {
        self.transcript
            .as_ref()
            .and_then(|tx| tx.gene_symbol.as_deref())
            .unwrap_or(".")
    }

    /// Whether the annotation came out of a structural builder
    pub fn is_structural(&self) -> bool {
        self.effects.contains(&VariantEffect::StructuralVariant)
    }

    /// `GENE:ACCESSION:c.…:p.…`, skipping missing parts
    ///
    /// Returns `None` without a transcript.
    pub fn symbol_and_annotation(&self) -> Option<String> {
        let tx = self.transcript.as_ref()?;
        let parts: Vec<String> = [
            tx.gene_symbol.clone(),
            Some(tx.accession.clone()),
            self.nucleotide_change.as_ref().map(NucleotideChange::to_hgvs),
            self.protein_change.as_ref().map(ProteinChange::to_hgvs),
        ]
        .into_iter()
        .flatten()
        .collect();
        Some(parts.join(":"))
    }
}

impl PartialOrd for VariantAnnotation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VariantAnnotation {
    /// Most pathogenic effect first, then transcript with missing transcripts last
    fn cmp(&self, other: &Self) -> Ordering {
        none_last(self.most_pathogenic_effect(), other.most_pathogenic_effect())
            .then_with(|| none_last(self.transcript.as_ref(), other.transcript.as_ref()))
            .then_with(|| self.effects.iter().cmp(other.effects.iter()))
            .then_with(|| self.distance.cmp(&other.distance))
            .then_with(|| {
                let rank = |a: &Self| a.location.as_ref().map(|l| (l.rank_type(), l.rank()));
                rank(self).cmp(&rank(other))
            })
            .then_with(|| {
                let hgvs = |a: &Self| a.nucleotide_change.as_ref().map(NucleotideChange::to_hgvs);
                hgvs(self).cmp(&hgvs(other))
            })
            .then_with(|| {
                let hgvs = |a: &Self| a.protein_change.as_ref().map(ProteinChange::to_hgvs);
                hgvs(self).cmp(&hgvs(other))
            })
            .then_with(|| self.messages.iter().cmp(other.messages.iter()))
            .then_with(|| self.variant.to_string().cmp(&other.variant.to_string()))
    }
}

fn none_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl fmt::Display for VariantAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let effects: Vec<&str> = self.effects.iter().map(VariantEffect::so_term).collect();
        match self.symbol_and_annotation() {
            Some(anno) => write!(f, "{} {}", anno, effects.join("&")),
            None => write!(f, "{} {}", self.variant, effects.join("&")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::change::{NucleotideEdit, ProteinEdit};
    use crate::coords::{GenomeInterval, GenomePosition, PositionType, ReferenceDictionary, Strand};
    use crate::sequence::AminoAcid;
    use crate::variant::SmallGenomeVariant;

    fn dict() -> Arc<ReferenceDictionary> {
        let mut dict = ReferenceDictionary::new();
        dict.add_contig(1, "chr1", 10_000);
        Arc::new(dict)
    }

    fn tx(dict: &Arc<ReferenceDictionary>, acc: &str) -> Arc<TranscriptModel> {
        let itv = |b, e| GenomeInterval::from_bounds(dict, Strand::Plus, 1, b, e).unwrap();
        Arc::new(
            TranscriptModel::new(acc, itv(100, 500), itv(150, 450), vec![itv(100, 500)])
                .unwrap()
                .with_gene_symbol("GENE"),
        )
    }

    fn variant(dict: &Arc<ReferenceDictionary>) -> SmallGenomeVariant {
        let pos = GenomePosition::new(dict, Strand::Plus, 1, 200, PositionType::ZeroBased).unwrap();
        SmallGenomeVariant::new(pos, "A", "C")
    }

    #[test]
    fn test_impact_and_most_pathogenic() {
        let dict = dict();
        let anno = VariantAnnotation::new(
            variant(&dict),
            Some(tx(&dict, "tx1")),
            [VariantEffect::CodingTranscriptVariant, VariantEffect::MissenseVariant],
        );
        assert_eq!(anno.most_pathogenic_effect(), Some(VariantEffect::MissenseVariant));
        assert_eq!(anno.putative_impact(), Some(Impact::Moderate));
        assert_eq!(anno.gene_symbol(), "GENE");
        assert!(!anno.is_structural());
    }

    #[test]
    fn test_symbol_and_annotation() {
        let dict = dict();
        let anno = VariantAnnotation::new(variant(&dict), Some(tx(&dict, "tx1")), [VariantEffect::MissenseVariant])
            .with_nucleotide_change(Some(NucleotideChange::new(
                "c.",
                "51",
                None,
                NucleotideEdit::Substitution {
                    reference: "A".into(),
                    alternative: "C".into(),
                },
            )))
            .with_protein_change(Some(ProteinChange::new(ProteinEdit::Substitution {
                position: 17,
                reference: AminoAcid::Lys,
                alternative: AminoAcid::Thr,
            })));
        assert_eq!(
            anno.symbol_and_annotation().as_deref(),
            Some("GENE:tx1:c.51A>C:p.(Lys17Thr)")
        );

        let intergenic = VariantAnnotation::new(variant(&dict), None, [VariantEffect::IntergenicVariant]);
        assert_eq!(intergenic.symbol_and_annotation(), None);
        assert_eq!(intergenic.gene_symbol(), ".");
    }

    #[test]
    fn test_ordering() {
        let dict = dict();
        let v = variant(&dict);
        let missense_b = VariantAnnotation::new(v.clone(), Some(tx(&dict, "txB")), [VariantEffect::MissenseVariant]);
        let missense_a = VariantAnnotation::new(v.clone(), Some(tx(&dict, "txA")), [VariantEffect::MissenseVariant]);
        let synonymous = VariantAnnotation::new(v.clone(), Some(tx(&dict, "txA")), [VariantEffect::SynonymousVariant]);
        let intergenic = VariantAnnotation::new(v.clone(), None, [VariantEffect::MissenseVariant]);
        let empty = VariantAnnotation::message_only(v, [AnnotationMessage::WarningTranscriptIncomplete]);

        let mut list = vec![
            empty.clone(),
            synonymous.clone(),
            intergenic.clone(),
            missense_b.clone(),
            missense_a.clone(),
        ];
        list.sort();
        assert_eq!(list, vec![missense_a, missense_b, intergenic, synonymous, empty]);
    }
}
