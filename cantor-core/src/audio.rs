//! Audio format metadata and the streaming speech output contract.

use serde::Serialize;

/// The data type of a single audio sample.
///
/// String values match FFmpeg's format descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SampleType {
    /// Signed integer samples.
    #[serde(rename = "s")]
    SignedInt,
    /// Unsigned integer samples.
    #[serde(rename = "u")]
    UnsignedInt,
    /// Floating point samples.
    #[serde(rename = "f")]
    Float,
}

impl SampleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleType::SignedInt => "s",
            SampleType::UnsignedInt => "u",
            SampleType::Float => "f",
        }
    }
}

/// The byte order for multi-byte audio samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ByteOrder {
    #[serde(rename = "be")]
    BigEndian,
    #[serde(rename = "le")]
    LittleEndian,
    /// Only for 8-bit (single byte) samples.
    #[serde(rename = "")]
    NotApplicable,
}

impl ByteOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ByteOrder::BigEndian => "be",
            ByteOrder::LittleEndian => "le",
            ByteOrder::NotApplicable => "",
        }
    }
}

/// Metadata about the audio a backend emits from `convert`.
///
/// Plain data: consumers use this to interpret raw chunk bytes without
/// backend-specific knowledge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioSpec {
    /// E.g. "Linear PCM", "WAV", "MP3".
    pub format: &'static str,
    /// E.g. 8000, 24000, 48000.
    pub sample_rate: u32,
    pub sample_type: SampleType,
    /// Bits per sample: 8, 16, 24, ...
    pub sample_width: u16,
    pub byte_order: ByteOrder,
    /// 1 for mono, 2 for stereo.
    pub num_channels: u16,
}

/// A lazy, finite sequence of audio chunks from one `convert` call.
///
/// Each call is independent; no state is retained between chunks beyond the
/// call's own execution. An aggregate blob is the trivial specialization:
/// collect all chunks (see [`crate::wav::collect_wav`]).
pub type SpeechStream = Box<dyn Iterator<Item = Vec<u8>> + Send>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_spec_serializes_as_plain_data() {
        let spec = AudioSpec {
            format: "Linear PCM",
            sample_rate: 24_000,
            sample_type: SampleType::SignedInt,
            sample_width: 16,
            byte_order: ByteOrder::LittleEndian,
            num_channels: 1,
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["format"], "Linear PCM");
        assert_eq!(json["sample_rate"], 24_000);
        assert_eq!(json["sample_type"], "s");
        assert_eq!(json["byte_order"], "le");
        assert_eq!(json["num_channels"], 1);
    }

    #[test]
    fn enum_strings_match_ffmpeg_style() {
        assert_eq!(SampleType::Float.as_str(), "f");
        assert_eq!(ByteOrder::BigEndian.as_str(), "be");
        assert_eq!(ByteOrder::NotApplicable.as_str(), "");
    }
}
