use std::fs::File;
use std::path::Path;

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use transcription_domain::DomainError;

use crate::WHISPER_SAMPLE_RATE;

/// Decodes the uploaded container to mono f32 at the whisper input rate.
pub fn read_mono_16khz(path: &Path) -> Result<Vec<f32>, DomainError> {
    let (samples, sample_rate, channels) = decode_file(path)?;
    let mono = downmix(&samples, channels);
    if sample_rate == WHISPER_SAMPLE_RATE {
        Ok(mono)
    } else {
        resample(&mono, sample_rate, WHISPER_SAMPLE_RATE)
    }
}

fn decode_file(path: &Path) -> Result<(Vec<f32>, u32, usize), DomainError> {
    let mut hint = Hint::new();
    if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
        hint.with_extension(extension);
    }

    let file = File::open(path).map_err(|err| {
        DomainError::internal_error(&format!("failed to open scratch file: {err}"))
    })?;
    let stream = MediaSourceStream::new(Box::new(file), Default::default());

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|err| {
            DomainError::unprocessable_audio(&format!("unrecognized audio container: {err}"))
        })?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|track| track.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| DomainError::unprocessable_audio("no audio track in upload"))?;
    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| DomainError::unprocessable_audio("audio track has no sample rate"))?;
    let channels = track
        .codec_params
        .channels
        .map(|channels| channels.count())
        .unwrap_or(1);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|err| {
            DomainError::unprocessable_audio(&format!("unsupported audio codec: {err}"))
        })?;

    let mut samples = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            // End of stream surfaces as an IO error.
            Err(SymphoniaError::IoError(_)) => break,
            Err(SymphoniaError::ResetRequired) => break,
            Err(err) => {
                return Err(DomainError::unprocessable_audio(&format!(
                    "failed to read audio packet: {err}"
                )));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let mut buffer =
                    SampleBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec());
                buffer.copy_interleaved_ref(decoded);
                samples.extend_from_slice(buffer.samples());
            }
            // Skip over isolated bad packets; the stream may still recover.
            Err(SymphoniaError::IoError(_)) | Err(SymphoniaError::DecodeError(_)) => continue,
            Err(err) => {
                return Err(DomainError::unprocessable_audio(&format!(
                    "audio decode failed: {err}"
                )));
            }
        }
    }

    Ok((samples, sample_rate, channels))
}

fn downmix(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

fn resample(mono: &[f32], from_hz: u32, to_hz: u32) -> Result<Vec<f32>, DomainError> {
    const CHUNK_SIZE: usize = 1024;

    let ratio = to_hz as f64 / from_hz as f64;
    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };
    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, CHUNK_SIZE, 1)
        .map_err(|err| {
            DomainError::internal_error(&format!("failed to create resampler: {err}"))
        })?;

    let mut output = Vec::with_capacity((mono.len() as f64 * ratio) as usize);
    for chunk in mono.chunks(CHUNK_SIZE) {
        if chunk.len() == CHUNK_SIZE {
            let resampled = resampler
                .process(&[chunk.to_vec()], None)
                .map_err(|err| DomainError::internal_error(&format!("resample failed: {err}")))?;
            output.extend_from_slice(&resampled[0]);
        } else {
            // Pad the tail chunk and keep only the proportional output.
            let mut padded = chunk.to_vec();
            padded.resize(CHUNK_SIZE, 0.0);
            let expected = (chunk.len() as f64 * ratio) as usize;
            let resampled = resampler
                .process(&[padded], None)
                .map_err(|err| DomainError::internal_error(&format!("resample failed: {err}")))?;
            output.extend_from_slice(&resampled[0][..expected.min(resampled[0].len())]);
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_averages_interleaved_channels() {
        let stereo = [0.0, 1.0, 0.5, 0.5, -1.0, 1.0];
        assert_eq!(downmix(&stereo, 2), vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn downmix_passes_mono_through() {
        let mono = [0.1, 0.2, 0.3];
        assert_eq!(downmix(&mono, 1), mono.to_vec());
    }

    #[test]
    fn resample_halves_sample_count_at_half_rate() {
        let input: Vec<f32> = (0..48_000).map(|i| (i as f32 * 0.001).sin()).collect();
        let output = resample(&input, 32_000, 16_000).expect("resample succeeds");
        let expected = input.len() / 2;
        let tolerance = expected / 10;
        assert!(
            output.len().abs_diff(expected) <= tolerance,
            "expected ~{expected} samples, got {}",
            output.len()
        );
    }
}
