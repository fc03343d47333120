//! WAV container helper: collect a speech stream into one WAV blob.

use crate::audio::{AudioSpec, ByteOrder, SampleType, SpeechStream};
use crate::error::{Result, TtsError};
use std::io::Cursor;

/// Collect every chunk of `stream` into a single WAV file image.
///
/// This is the aggregate-blob specialization of the streaming `convert`
/// contract. Only little-endian signed 16-bit and 32-bit float PCM input is
/// supported, which covers the formats the bundled backends emit.
pub fn collect_wav(spec: &AudioSpec, stream: SpeechStream) -> Result<Vec<u8>> {
    let sample_format = match (spec.sample_type, spec.sample_width, spec.byte_order) {
        (SampleType::SignedInt, 16, ByteOrder::LittleEndian) => hound::SampleFormat::Int,
        (SampleType::Float, 32, ByteOrder::LittleEndian) => hound::SampleFormat::Float,
        _ => {
            return Err(TtsError::Audio(format!(
                "unsupported sample layout: {}{} {}",
                spec.sample_type.as_str(),
                spec.sample_width,
                spec.byte_order.as_str(),
            )))
        }
    };
    let wav_spec = hound::WavSpec {
        channels: spec.num_channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.sample_width,
        sample_format,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, wav_spec)
            .map_err(|e| TtsError::Audio(e.to_string()))?;
        let bytes_per_sample = usize::from(spec.sample_width / 8);
        for chunk in stream {
            if chunk.len() % bytes_per_sample != 0 {
                return Err(TtsError::Audio(format!(
                    "chunk length {} is not a multiple of the {}-byte sample size",
                    chunk.len(),
                    bytes_per_sample,
                )));
            }
            for frame in chunk.chunks_exact(bytes_per_sample) {
                match sample_format {
                    hound::SampleFormat::Int => {
                        let sample = i16::from_le_bytes([frame[0], frame[1]]);
                        writer
                            .write_sample(sample)
                            .map_err(|e| TtsError::Audio(e.to_string()))?;
                    }
                    hound::SampleFormat::Float => {
                        let sample =
                            f32::from_le_bytes([frame[0], frame[1], frame[2], frame[3]]);
                        writer
                            .write_sample(sample)
                            .map_err(|e| TtsError::Audio(e.to_string()))?;
                    }
                }
            }
        }
        writer
            .finalize()
            .map_err(|e| TtsError::Audio(e.to_string()))?;
    }
    Ok(cursor.into_inner())
}
