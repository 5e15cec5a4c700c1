use anyhow::Result;
use async_trait::async_trait;

use super::types::{RawAudio, SynthesisRequest};

/// Trait for text-to-speech providers.
///
/// An utterance has two halves: the audio bytes and a line-delimited JSON
/// speech-mark stream carrying viseme timing. Providers expose them as
/// separate calls; both receive the same request and neither is retried at
/// this layer.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize the audio bytes for a request
    async fn synthesize_audio(&self, request: &SynthesisRequest) -> Result<RawAudio>;

    /// Fetch the speech-mark stream for the same request
    async fn synthesize_marks(&self, request: &SynthesisRequest) -> Result<Vec<u8>>;
}
