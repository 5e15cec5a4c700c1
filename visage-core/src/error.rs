use std::fmt;

use thiserror::Error;

use crate::speech::SynthesisResult;
use crate::visemes::DecodeError;

/// Which of the two synthesis calls failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisStage {
    Audio,
    Marks,
}

impl fmt::Display for SynthesisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthesisStage::Audio => write!(f, "audio"),
            SynthesisStage::Marks => write!(f, "marks"),
        }
    }
}

/// Caller-visible pipeline failures. Each variant carries enough structure
/// for the caller to pick its own retry policy; nothing is retried here.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Empty or invalid text/voice. Never worth retrying.
    #[error("invalid input: {0}")]
    Input(String),

    /// One of the two synthesis calls failed. A marks failure is reported
    /// even when the audio call succeeded.
    #[error("synthesis {stage} call failed: {source}")]
    Synthesis {
        stage: SynthesisStage,
        source: anyhow::Error,
    },

    /// The mark stream was readable but unusable for lip-sync.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Synthesis succeeded but the stored delivery did not. The synthesis
    /// output is preserved so the caller can retry just the storage step.
    #[error("audio synthesized but not stored: {source}")]
    Storage {
        source: anyhow::Error,
        result: Box<SynthesisResult>,
    },
}
