// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-annotate: functional annotation of genomic variants
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! Small variants and structural variants are annotated against a database
//! of transcript models. Each (variant, transcript) pair yields Sequence
//! Ontology effects, HGVS-style changes and positions, which can be written
//! as VCF `ANN` values.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use ferro_annotate::annotation::{AnnotationCollector, VariantAnnotator};
//! use ferro_annotate::config::AnnotationOptions;
//! use ferro_annotate::coords::{GenomeInterval, ReferenceDictionary, Strand};
//! use ferro_annotate::reference::{TranscriptDb, TranscriptModel};
//! use ferro_annotate::vcf::{AnnEncoder, VariantRecord};
//!
//! let mut dict = ReferenceDictionary::new();
//! dict.add_contig(1, "chr1", 100_000);
//! let dict = Arc::new(dict);
//!
//! let itv = |b, e| GenomeInterval::from_bounds(&dict, Strand::Plus, 1, b, e).unwrap();
//! let tx = TranscriptModel::new("NM_0001.1", itv(1_000, 2_000), itv(1_100, 1_900), vec![itv(1_000, 2_000)])
//!     .unwrap()
//!     .with_gene_symbol("GENE1");
//! let db = TranscriptDb::new(Arc::clone(&dict), vec![tx]);
//!
//! let record = VariantRecord::parse("chr1\t1501\tA\tG").unwrap();
//! let variant = record.to_variant(&dict).unwrap();
//!
//! let annotator = VariantAnnotator::new(&db, AnnotationOptions::default());
//! let annotations = annotator.annotate(&variant, &mut AnnotationCollector::new()).unwrap();
//! let ann = AnnEncoder::default().encode_all(&annotations, "G");
//! assert!(ann.starts_with("G|coding_sequence_variant"));
//! ```

pub mod annotation;
pub mod config;
pub mod coords;
pub mod effect;
pub mod error;
pub mod reference;
pub mod sequence;
pub mod variant;
pub mod vcf;

// Re-export commonly used types
pub use annotation::{AnnotationCollector, VariantAnnotation, VariantAnnotations, VariantAnnotator};
pub use config::AnnotationOptions;
pub use effect::{Impact, VariantEffect};
pub use error::{AnnotateError, ErrorCode};
pub use reference::{TranscriptDb, TranscriptModel};
pub use variant::{GenomeVariant, SmallGenomeVariant, StructuralVariant};

/// Result type alias for ferro-annotate operations
pub type Result<T> = std::result::Result<T, AnnotateError>;
