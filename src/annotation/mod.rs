//! Variant annotation
//!
//! Builders turn one (transcript, variant) pair into a [`VariantAnnotation`];
//! the [`VariantAnnotator`] runs them over all candidate transcripts of a
//! variant and collects the sorted result in [`VariantAnnotations`].

pub mod annotations;
pub mod annotator;
pub mod builders;
pub mod change;
pub mod collector;
pub mod location;
pub mod message;
pub(crate) mod protein;
pub mod variant_annotation;

pub use annotations::VariantAnnotations;
pub use annotator::VariantAnnotator;
pub use change::{
    ChangeFormatter, HgvsChangeFormatter, NucleotideChange, NucleotideEdit, ProteinChange,
    ProteinEdit,
};
pub use collector::AnnotationCollector;
pub use location::{AnnotationLocation, RankType, INVALID_RANK};
pub use message::AnnotationMessage;
pub use variant_annotation::{AnnotationPositions, PositionAndLength, VariantAnnotation};
