use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::storage::provider::PresignedUrl;
use crate::tts::types::AudioFormat;
use crate::visemes::VisemeTrack;

/// How the caller wants the audio delivered. This is a policy choice made
/// by the caller, never inferred from payload size.
#[derive(Debug, Clone, Copy)]
pub enum DeliveryPolicy {
    /// Embed the audio bytes in the response body
    Inline,
    /// Persist the audio and return a time-limited download URL
    Stored { ttl: Duration },
}

/// The complete synthesis output for one utterance. `audio` is already
/// container-wrapped and independently playable.
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    pub text: String,
    pub audio: Vec<u8>,
    pub format: AudioFormat,
    pub visemes: VisemeTrack,
}

/// One utterance assembled for the caller. A reply is either fully inline
/// or fully by-reference; the two are never mixed.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SpeechReply {
    #[serde(rename_all = "camelCase")]
    Inline {
        reply_text: String,
        audio_base64: String,
        content_type: String,
        visemes: VisemeTrack,
    },
    #[serde(rename_all = "camelCase")]
    Stored {
        reply_text: String,
        audio_key: String,
        audio_url: String,
        expires_at: DateTime<Utc>,
        visemes: VisemeTrack,
    },
}

impl SpeechReply {
    pub(crate) fn inline(result: SynthesisResult) -> Self {
        SpeechReply::Inline {
            audio_base64: BASE64.encode(&result.audio),
            content_type: result.format.content_type().to_string(),
            reply_text: result.text,
            visemes: result.visemes,
        }
    }

    pub(crate) fn stored(result: SynthesisResult, key: String, url: PresignedUrl) -> Self {
        SpeechReply::Stored {
            reply_text: result.text,
            audio_key: key,
            audio_url: url.url,
            expires_at: url.expires_at,
            visemes: result.visemes,
        }
    }
}
