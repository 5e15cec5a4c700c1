//! AWS Polly text-to-speech implementation

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_polly::config::Region;
use aws_sdk_polly::types::{Engine, OutputFormat, SpeechMarkType, VoiceId};
use aws_sdk_polly::Client;

use super::provider::SpeechSynthesizer;
use super::types::{AudioFormat, RawAudio, SynthesisRequest};

/// Configuration for AWS Polly
#[derive(Debug, Clone)]
pub struct AwsPollyConfig {
    pub profile: Option<String>,
    pub region: String,
}

impl Default for AwsPollyConfig {
    fn default() -> Self {
        Self {
            profile: None,
            region: "us-east-1".to_string(),
        }
    }
}

/// AWS Polly speech synthesis provider
pub struct AwsPolly {
    client: Client,
}

impl AwsPolly {
    /// Create a new AWS Polly client
    pub async fn new(config: AwsPollyConfig) -> Result<Self> {
        let mut aws_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(profile) = &config.profile {
            aws_config_loader = aws_config_loader.profile_name(profile);
        }

        aws_config_loader = aws_config_loader.region(Region::new(config.region));

        let aws_config = aws_config_loader.load().await;
        let client = Client::new(&aws_config);

        Ok(Self { client })
    }

    fn parse_voice_id(voice_id: &str) -> Result<VoiceId> {
        match voice_id {
            "Joanna" => Ok(VoiceId::Joanna),
            "Matthew" => Ok(VoiceId::Matthew),
            "Amy" => Ok(VoiceId::Amy),
            "Brian" => Ok(VoiceId::Brian),
            "Emma" => Ok(VoiceId::Emma),
            "Ivy" => Ok(VoiceId::Ivy),
            "Kendra" => Ok(VoiceId::Kendra),
            "Kimberly" => Ok(VoiceId::Kimberly),
            "Salli" => Ok(VoiceId::Salli),
            "Joey" => Ok(VoiceId::Joey),
            "Justin" => Ok(VoiceId::Justin),
            "Kevin" => Ok(VoiceId::Kevin),
            "Ruth" => Ok(VoiceId::Ruth),
            "Stephen" => Ok(VoiceId::Stephen),
            _ => anyhow::bail!("unknown voice id: {voice_id}"),
        }
    }

    fn output_format(format: AudioFormat) -> OutputFormat {
        match format {
            AudioFormat::Pcm16 => OutputFormat::Pcm,
            AudioFormat::Mp3 => OutputFormat::Mp3,
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for AwsPolly {
    async fn synthesize_audio(&self, request: &SynthesisRequest) -> Result<RawAudio> {
        let voice_id = Self::parse_voice_id(request.voice())?;

        let mut builder = self
            .client
            .synthesize_speech()
            .text(request.text())
            .voice_id(voice_id)
            .output_format(Self::output_format(request.format()))
            .engine(Engine::Neural);

        // Polly only accepts a sample rate for uncontained PCM output
        if request.format() == AudioFormat::Pcm16 {
            builder = builder.sample_rate(request.sample_rate_hz().to_string());
        }

        let response = builder.send().await.context("Failed to synthesize audio")?;

        let bytes = response
            .audio_stream
            .collect()
            .await
            .context("Failed to collect audio stream")?
            .into_bytes()
            .to_vec();

        Ok(RawAudio {
            bytes,
            format: request.format(),
            sample_rate_hz: request.sample_rate_hz(),
        })
    }

    async fn synthesize_marks(&self, request: &SynthesisRequest) -> Result<Vec<u8>> {
        let voice_id = Self::parse_voice_id(request.voice())?;

        let response = self
            .client
            .synthesize_speech()
            .text(request.text())
            .voice_id(voice_id)
            .output_format(OutputFormat::Json)
            .speech_mark_types(SpeechMarkType::Viseme)
            .engine(Engine::Neural)
            .send()
            .await
            .context("Failed to request speech marks")?;

        let bytes = response
            .audio_stream
            .collect()
            .await
            .context("Failed to collect speech mark stream")?
            .into_bytes()
            .to_vec();

        Ok(bytes)
    }
}
