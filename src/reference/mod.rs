//! Transcript reference data
//!
//! Read-only transcript models, the per-chromosome interval index over them,
//! and the coordinate helpers the annotation builders work with.

pub mod db;
pub mod index;
pub mod projector;
pub mod so_regions;
pub mod transcript;

pub use db::{ContigRecord, TranscriptBundle, TranscriptDb, TranscriptIndex};
pub use index::{IntervalArray, QueryResult};
pub use projector::TranscriptProjector;
pub use so_regions::SequenceOntologyRegions;
pub use transcript::{TranscriptModel, TranscriptRecord};
