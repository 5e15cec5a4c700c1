//! Decoder for the line-delimited speech-mark stream

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single mouth-shape marker, offset from the start of the utterance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisemeEvent {
    #[serde(rename = "timeMs")]
    pub offset_ms: u64,
    #[serde(rename = "type")]
    pub shape: String,
}

/// The viseme sequence for one utterance, in stream order.
///
/// Always non-empty: an utterance with no timing marks is a decode failure,
/// not an empty track, because lip-sync has nothing to animate. Timestamps
/// are passed through as decoded; the track is not re-sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VisemeTrack(Vec<VisemeEvent>);

impl VisemeTrack {
    pub fn events(&self) -> &[VisemeEvent] {
        &self.0
    }

    /// Mouth shape active `millis` into playback: the last event at or
    /// before that instant, or "rest" before the first one.
    pub fn shape_at(&self, millis: u64) -> &str {
        let mut shape = "rest";
        for event in &self.0 {
            if millis >= event.offset_ms {
                shape = &event.shape;
            } else {
                break;
            }
        }
        shape
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("no viseme events in speech mark stream")]
    NoVisemes,
}

/// One line of the wire stream. Word, sentence and ssml marks share the
/// envelope; `value` is absent on some of them.
#[derive(Deserialize)]
struct SpeechMark {
    time: serde_json::Number,
    #[serde(rename = "type")]
    kind: String,
    value: Option<String>,
}

/// Normalize a wire `time` to integer milliseconds. The field arrives as
/// either an integer or a float; floats truncate toward zero.
fn offset_millis(time: &serde_json::Number) -> u64 {
    if let Some(ms) = time.as_u64() {
        ms
    } else {
        time.as_f64().map(|f| f.trunc().max(0.0) as u64).unwrap_or(0)
    }
}

/// Decode a line-delimited speech-mark stream into a viseme track.
///
/// Each line is an independently decodable JSON object. Marks whose type is
/// not `"viseme"` are skipped. The first line that fails to parse ends the
/// stream without failing the decode, so a truncated tail costs only the
/// events after it.
pub fn decode_marks(stream: &[u8]) -> Result<VisemeTrack, DecodeError> {
    let text = String::from_utf8_lossy(stream);

    let mut events = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let mark: SpeechMark = match serde_json::from_str(line) {
            Ok(mark) => mark,
            Err(err) => {
                tracing::debug!(error = %err, "stopping at malformed speech mark line");
                break;
            }
        };

        if mark.kind != "viseme" {
            continue;
        }
        let Some(shape) = mark.value else {
            continue;
        };

        events.push(VisemeEvent {
            offset_ms: offset_millis(&mark.time),
            shape,
        });
    }

    if events.is_empty() {
        return Err(DecodeError::NoVisemes);
    }
    Ok(VisemeTrack(events))
}
