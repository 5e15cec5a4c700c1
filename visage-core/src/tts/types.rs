use serde::{Deserialize, Serialize};

use crate::error::SpeechError;

/// Audio formats the synthesizer can return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// Uncontained 16-bit linear PCM; needs a WAV header to be playable
    Pcm16,
    /// Already muxed, passes through the container stage unchanged
    Mp3,
}

impl AudioFormat {
    /// Content type of the playable bytes after container wrapping
    pub fn content_type(self) -> &'static str {
        match self {
            AudioFormat::Pcm16 => "audio/wav",
            AudioFormat::Mp3 => "audio/mpeg",
        }
    }

    pub fn file_extension(self) -> &'static str {
        match self {
            AudioFormat::Pcm16 => "wav",
            AudioFormat::Mp3 => "mp3",
        }
    }
}

/// A validated synthesis request.
///
/// Text and voice are fixed at construction, so the audio and mark calls
/// are guaranteed to describe the same utterance.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    text: String,
    voice: String,
    format: AudioFormat,
    sample_rate_hz: u32,
}

impl SynthesisRequest {
    pub fn new(
        text: &str,
        voice: &str,
        format: AudioFormat,
        sample_rate_hz: u32,
    ) -> Result<Self, SpeechError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SpeechError::Input("text must not be empty".to_string()));
        }
        let voice = voice.trim();
        if voice.is_empty() {
            return Err(SpeechError::Input("voice must not be empty".to_string()));
        }

        Ok(Self {
            text: text.to_string(),
            voice: voice.to_string(),
            format,
            sample_rate_hz,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// Only meaningful for PCM output
    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }
}

/// Audio bytes returned from synthesis, before container wrapping
#[derive(Debug)]
pub struct RawAudio {
    pub bytes: Vec<u8>,
    pub format: AudioFormat,
    pub sample_rate_hz: u32,
}
