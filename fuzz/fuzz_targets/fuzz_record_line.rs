//! Fuzz target for input line parsing and annotation
//!
//! Arbitrary bytes are parsed as a variant line and, when that succeeds,
//! annotated against a single transcript. Neither step may panic.

#![no_main]

use std::sync::Arc;

use ferro_annotate::annotation::{AnnotationCollector, VariantAnnotator};
use ferro_annotate::config::AnnotationOptions;
use ferro_annotate::coords::{GenomeInterval, ReferenceDictionary, Strand};
use ferro_annotate::reference::{TranscriptDb, TranscriptModel};
use ferro_annotate::vcf::{AnnEncoder, VariantRecord};
use libfuzzer_sys::fuzz_target;

fn database() -> Option<TranscriptDb> {
    let mut dict = ReferenceDictionary::new();
    dict.add_contig(1, "chr1", 100_000);
    let dict = Arc::new(dict);
    let itv = |b, e| GenomeInterval::from_bounds(&dict, Strand::Minus, 1, b, e).ok();
    let tx = TranscriptModel::new(
        "NM_0001.1",
        itv(1_000, 9_000)?,
        itv(1_500, 8_000)?,
        vec![itv(1_000, 2_000)?, itv(4_000, 4_200)?, itv(7_000, 9_000)?],
    )
    .ok()?;
    Some(TranscriptDb::new(dict, vec![tx]))
}

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };
    if line.len() > 1000 {
        return;
    }
    let Ok(record) = VariantRecord::parse(line) else {
        return;
    };
    let Some(db) = database() else {
        return;
    };
    let Ok(variant) = record.to_variant(db.dict()) else {
        return;
    };
    let annotator = VariantAnnotator::new(&db, AnnotationOptions::default());
    if let Ok(annos) = annotator.annotate(&variant, &mut AnnotationCollector::new()) {
        let _ = AnnEncoder::default().encode_all(&annos, &record.alternate);
    }
});
