//! Diagnostic messages attached to annotations

use std::fmt;

/// A non-fatal note recorded while building an annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnnotationMessage {
    /// The reference allele disagrees with the transcript sequence
    WarningRefDoesNotMatchGenome,
    /// The transcript carries no usable sequence; protein change unknown
    WarningTranscriptIncomplete,
    /// Inversion detection saw bases other than A/C/G/T
    InfoNonAcgtInversion,
    /// The break-end mate lies on another chromosome and was ignored
    InfoMateOnOtherChromosome,
}

impl AnnotationMessage {
    /// Message code as written to the ANN messages column
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationMessage::WarningRefDoesNotMatchGenome => "WARNING_REF_DOES_NOT_MATCH_GENOME",
            AnnotationMessage::WarningTranscriptIncomplete => "WARNING_TRANSCRIPT_INCOMPLETE",
            AnnotationMessage::InfoNonAcgtInversion => "INFO_NON_ACGT_INVERSION",
            AnnotationMessage::InfoMateOnOtherChromosome => "INFO_MATE_ON_OTHER_CHROMOSOME",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AnnotationMessage::WarningRefDoesNotMatchGenome => {
                "Reference allele does not match the transcript sequence"
            }
            AnnotationMessage::WarningTranscriptIncomplete => {
                "Transcript sequence unavailable or incomplete"
            }
            AnnotationMessage::InfoNonAcgtInversion => {
                "Inversion check left non-ACGT bases uncomplemented"
            }
            AnnotationMessage::InfoMateOnOtherChromosome => {
                "Break-end mate on another chromosome was not considered"
            }
        }
    }

    pub fn is_warning(&self) -> bool {
        self.as_str().starts_with("WARNING")
    }
}

impl fmt::Display for AnnotationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_codes() {
        assert_eq!(
            AnnotationMessage::WarningRefDoesNotMatchGenome.to_string(),
            "WARNING_REF_DOES_NOT_MATCH_GENOME"
        );
        assert!(AnnotationMessage::WarningTranscriptIncomplete.is_warning());
        assert!(!AnnotationMessage::InfoNonAcgtInversion.is_warning());
    }
}
