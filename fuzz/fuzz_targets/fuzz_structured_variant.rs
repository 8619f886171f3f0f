//! Structured fuzz target for small and structural variants
//!
//! Uses the arbitrary crate to generate variants near and inside a
//! forward-strand transcript with sequence.

#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use ferro_annotate::annotation::{AnnotationCollector, VariantAnnotator};
use ferro_annotate::config::AnnotationOptions;
use ferro_annotate::coords::{GenomeInterval, GenomePosition, PositionType, ReferenceDictionary, Strand};
use ferro_annotate::reference::{TranscriptDb, TranscriptModel};
use ferro_annotate::variant::{GenomeVariant, SmallGenomeVariant, SvInfo, StructuralVariant};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Base {
    A,
    C,
    G,
    T,
    N,
}

impl Base {
    fn as_char(&self) -> char {
        match self {
            Base::A => 'A',
            Base::C => 'C',
            Base::G => 'G',
            Base::T => 'T',
            Base::N => 'N',
        }
    }
}

#[derive(Debug, Arbitrary)]
enum SvKind {
    Del,
    Dup,
    Inv,
    Ins,
    Cnv,
}

#[derive(Debug, Arbitrary)]
enum Input {
    Small {
        pos: u16,
        reference: Vec<Base>,
        alt: Vec<Base>,
        minus: bool,
    },
    Structural {
        pos: u16,
        kind: SvKind,
        len: u16,
        ci_lo: i8,
        ci_hi: i8,
    },
}

fn database() -> Option<TranscriptDb> {
    let mut dict = ReferenceDictionary::new();
    dict.add_contig(1, "chr1", 70_000);
    let dict = Arc::new(dict);
    let itv = |b, e| GenomeInterval::from_bounds(&dict, Strand::Plus, 1, b, e).ok();
    let sequence: String = "ATGGCC".repeat(200);
    let tx = TranscriptModel::new(
        "NM_0002.1",
        itv(10_000, 10_900)?,
        itv(10_100, 10_800)?,
        vec![itv(10_000, 10_300)?, itv(10_400, 10_600)?, itv(10_700, 10_900)?],
    )
    .ok()?
    .with_sequence(&sequence[..700]);
    Some(TranscriptDb::new(dict, vec![tx]))
}

fn alleles(bases: &[Base]) -> String {
    bases.iter().take(64).map(Base::as_char).collect()
}

fn variant(db: &TranscriptDb, input: &Input) -> Option<GenomeVariant> {
    match input {
        Input::Small { pos, reference, alt, minus } => {
            let pos = GenomePosition::new(db.dict(), Strand::Plus, 1, *pos as i64, PositionType::ZeroBased).ok()?;
            let v = SmallGenomeVariant::new(pos, alleles(reference), alleles(alt));
            let v = if *minus { v.with_strand(Strand::Minus) } else { v };
            Some(v.into())
        }
        Input::Structural { pos, kind, len, ci_lo, ci_hi } => {
            let (svtype, alt, svlen) = match kind {
                SvKind::Del => ("DEL", "<DEL>", -(*len as i64)),
                SvKind::Dup => ("DUP", "<DUP>", *len as i64),
                SvKind::Inv => ("INV", "<INV>", *len as i64),
                SvKind::Ins => ("INS", "<INS>", *len as i64),
                SvKind::Cnv => ("CNV", "<CNV>", *len as i64),
            };
            let info = format!(
                "SVTYPE={};SVLEN={};CIPOS={},{};CIEND={},{}",
                svtype,
                svlen,
                -(ci_lo.unsigned_abs() as i64),
                ci_hi.unsigned_abs(),
                -(ci_lo.unsigned_abs() as i64),
                ci_hi.unsigned_abs()
            );
            let info = SvInfo::parse(&info).ok()??;
            let pos = GenomePosition::new(db.dict(), Strand::Plus, 1, *pos as i64, PositionType::ZeroBased).ok()?;
            StructuralVariant::from_vcf_fields(pos, "N", alt, &info)
                .ok()
                .map(GenomeVariant::from)
        }
    }
}

fuzz_target!(|input: Input| {
    let Some(db) = database() else {
        return;
    };
    let Some(variant) = variant(&db, &input) else {
        return;
    };
    let annotator = VariantAnnotator::new(&db, AnnotationOptions::default());
    let _ = annotator.annotate(&variant, &mut AnnotationCollector::new());
});
