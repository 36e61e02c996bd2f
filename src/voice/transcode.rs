//! PCM-to-WAV transcoding for cloud TTS payloads
//!
//! Gemini's TTS endpoint returns raw mono 16-bit little-endian PCM as a
//! base64 string, with the sample rate embedded in an `audio/L16` MIME
//! type. This module rewraps that stream in a canonical 44-byte WAV
//! container so any player can consume it. The transformation is a pure
//! function of the input and the sample rate.

use std::io::Cursor;
use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use regex::Regex;

use crate::{Error, Result};

/// MIME type of the produced audio
pub const WAV_MIME: &str = "audio/wav";

static L16_RATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"rate=(\d+)").expect("valid regex"));

/// Extract the sample rate from an `audio/L16;...;rate=N` MIME type
///
/// # Errors
///
/// Returns [`Error::Provider`] if the MIME type is not `audio/L16` or
/// carries no usable `rate` parameter.
pub fn parse_l16_sample_rate(mime: &str) -> Result<u32> {
    if !mime.starts_with("audio/L16") {
        return Err(Error::Provider(format!(
            "unexpected audio MIME type: {mime}"
        )));
    }

    let caps = L16_RATE
        .captures(mime)
        .ok_or_else(|| Error::Provider(format!("no sample rate in MIME type: {mime}")))?;

    caps[1]
        .parse::<u32>()
        .map_err(|_| Error::Provider(format!("invalid sample rate in MIME type: {mime}")))
}

/// Decode a base64 PCM stream and rewrap it as WAV
///
/// The decoded bytes are interpreted as mono little-endian signed 16-bit
/// samples. An odd decoded length is rejected rather than truncated; a
/// trailing stray byte means the payload is corrupt.
///
/// # Errors
///
/// Returns [`Error::Decode`] for invalid base64, [`Error::Alignment`] for
/// an odd decoded length, or [`Error::Config`] for a zero sample rate.
pub fn wav_from_base64_pcm(data: &str, sample_rate: u32) -> Result<Vec<u8>> {
    let bytes = BASE64.decode(data)?;

    if bytes.len() % 2 != 0 {
        return Err(Error::Alignment { len: bytes.len() });
    }

    let samples: Vec<i16> = bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    wav_from_samples(&samples, sample_rate)
}

/// Wrap mono 16-bit samples in a canonical WAV container
///
/// The output is a 44-byte RIFF/WAVE/fmt/data header followed by the
/// samples written back out little-endian in their original order, so the
/// blob length is always `44 + 2 * samples.len()`.
///
/// # Errors
///
/// Returns [`Error::Config`] for a zero sample rate, or [`Error::Audio`]
/// if WAV encoding fails.
pub fn wav_from_samples(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>> {
    if sample_rate == 0 {
        return Err(Error::Config("sample rate must be positive".to_string()));
    }

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer =
            hound::WavWriter::new(&mut cursor, spec).map_err(|e| Error::Audio(e.to_string()))?;

        for &sample in samples {
            writer
                .write_sample(sample)
                .map_err(|e| Error::Audio(e.to_string()))?;
        }

        writer.finalize().map_err(|e| Error::Audio(e.to_string()))?;
    }

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- parse_l16_sample_rate ------------------------------------------------

    #[test]
    fn parses_rate_from_l16_mime() {
        let rate = parse_l16_sample_rate("audio/L16;codec=pcm;rate=24000").unwrap();
        assert_eq!(rate, 24000);
    }

    #[test]
    fn parses_rate_without_codec_param() {
        let rate = parse_l16_sample_rate("audio/L16;rate=16000").unwrap();
        assert_eq!(rate, 16000);
    }

    #[test]
    fn rejects_non_l16_mime() {
        let err = parse_l16_sample_rate("audio/mpeg").unwrap_err();
        assert!(matches!(err, Error::Provider(_)));
    }

    #[test]
    fn rejects_l16_mime_without_rate() {
        let err = parse_l16_sample_rate("audio/L16;codec=pcm").unwrap_err();
        assert!(matches!(err, Error::Provider(_)));
    }

    // -- wav_from_base64_pcm --------------------------------------------------

    #[test]
    fn rejects_invalid_base64() {
        let err = wav_from_base64_pcm("not valid base64!!!", 24000).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn rejects_odd_length_buffer() {
        // Three decoded bytes: one sample plus a stray trailing byte
        let b64 = BASE64.encode([0x00u8, 0x00, 0xFF]);
        let err = wav_from_base64_pcm(&b64, 24000).unwrap_err();
        assert!(matches!(err, Error::Alignment { len: 3 }));
    }

    #[test]
    fn empty_payload_yields_header_only_blob() {
        let wav = wav_from_base64_pcm("", 24000).unwrap();
        assert_eq!(wav.len(), 44);
    }

    // -- wav_from_samples -----------------------------------------------------

    #[test]
    fn rejects_zero_sample_rate() {
        let err = wav_from_samples(&[0, 1, 2], 0).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn blob_length_matches_sample_count() {
        let samples = vec![0i16; 100];
        let wav = wav_from_samples(&samples, 24000).unwrap();
        assert_eq!(wav.len(), 44 + 200);
    }
}
