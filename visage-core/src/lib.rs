pub mod error;
pub mod speech;
pub mod storage;
pub mod tts;
pub mod visemes;
pub mod wav;

// Public library API - callers should prefer these re-exports; module
// paths may shift as the pipeline grows.
pub use error::{SpeechError, SynthesisStage};
pub use speech::{DeliveryPolicy, SpeechPipeline, SpeechReply, SynthesisResult};
pub use storage::provider::{ObjectStore, PresignedUrl};
pub use storage::s3::{S3Store, S3StoreConfig};
pub use tts::aws_polly::{AwsPolly, AwsPollyConfig};
pub use tts::provider::SpeechSynthesizer;
pub use tts::types::{AudioFormat, RawAudio, SynthesisRequest};
pub use visemes::{decode_marks, DecodeError, VisemeEvent, VisemeTrack};
