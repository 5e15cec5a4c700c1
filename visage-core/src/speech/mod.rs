//! The speech pipeline: dual-call synthesis, viseme decode, container
//! wrapping and delivery assembly.

mod reply;

pub use reply::{DeliveryPolicy, SpeechReply, SynthesisResult};

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{SpeechError, SynthesisStage};
use crate::storage::provider::ObjectStore;
use crate::tts::provider::SpeechSynthesizer;
use crate::tts::types::{AudioFormat, RawAudio, SynthesisRequest};
use crate::visemes;
use crate::wav;

/// One-shot speech production pipeline.
///
/// Each call owns its buffers until handoff to storage; there is no shared
/// mutable state between requests and nothing is retried internally.
pub struct SpeechPipeline {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    store: Arc<dyn ObjectStore>,
}

impl SpeechPipeline {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, store: Arc<dyn ObjectStore>) -> Self {
        Self { synthesizer, store }
    }

    /// Produce playable audio and its viseme track for one utterance,
    /// delivered per `delivery`.
    pub async fn produce_speech(
        &self,
        request: SynthesisRequest,
        delivery: DeliveryPolicy,
    ) -> Result<SpeechReply, SpeechError> {
        let audio_call = async {
            self.synthesizer
                .synthesize_audio(&request)
                .await
                .map_err(|source| SpeechError::Synthesis {
                    stage: SynthesisStage::Audio,
                    source,
                })
        };
        let marks_call = async {
            self.synthesizer
                .synthesize_marks(&request)
                .await
                .map_err(|source| SpeechError::Synthesis {
                    stage: SynthesisStage::Marks,
                    source,
                })
        };

        // Both calls see the same request. First error wins and the losing
        // in-flight call is dropped with it.
        let (raw_audio, mark_bytes) = tokio::try_join!(audio_call, marks_call)?;

        let visemes = visemes::decode_marks(&mark_bytes)?;
        tracing::debug!(
            audio_bytes = raw_audio.bytes.len(),
            viseme_count = visemes.events().len(),
            "synthesis complete"
        );

        let format = raw_audio.format;
        let result = SynthesisResult {
            text: request.text().to_string(),
            audio: into_playable(raw_audio),
            format,
            visemes,
        };

        match delivery {
            DeliveryPolicy::Inline => Ok(SpeechReply::inline(result)),
            DeliveryPolicy::Stored { ttl } => self.store_and_reply(result, ttl).await,
        }
    }

    async fn store_and_reply(
        &self,
        result: SynthesisResult,
        ttl: Duration,
    ) -> Result<SpeechReply, SpeechError> {
        let key = audio_key(result.format);

        // Keep a copy of the bytes so a storage failure can hand the
        // synthesized audio back to the caller.
        let put = self
            .store
            .put(&key, result.audio.clone(), result.format.content_type())
            .await;
        if let Err(source) = put {
            tracing::error!(error = ?source, key = %key, "audio object put failed");
            return Err(SpeechError::Storage {
                source,
                result: Box::new(result),
            });
        }

        match self.store.presign_get(&key, ttl).await {
            Ok(url) => Ok(SpeechReply::stored(result, key, url)),
            Err(source) => {
                tracing::error!(error = ?source, key = %key, "audio url presign failed");
                Err(SpeechError::Storage {
                    source,
                    result: Box::new(result),
                })
            }
        }
    }
}

/// Wrap uncontained PCM in a WAV header; self-contained formats pass
/// through unchanged.
fn into_playable(audio: RawAudio) -> Vec<u8> {
    match audio.format {
        AudioFormat::Pcm16 => wav::wrap_pcm(&audio.bytes, audio.sample_rate_hz, 1, 16),
        AudioFormat::Mp3 => audio.bytes,
    }
}

fn audio_key(format: AudioFormat) -> String {
    format!(
        "audio/{}/{}.{}",
        Utc::now().format("%Y%m%d-%H%M%S"),
        Uuid::new_v4(),
        format.file_extension()
    )
}
