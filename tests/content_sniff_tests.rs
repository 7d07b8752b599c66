// Integration tests for content type sniffing
//
// Recordings are typed from their leading bytes, never from the extension.

use anyhow::Result;
use cdr_recording_sync::recording::{sniff_content_type, FALLBACK_CONTENT_TYPE};
use std::path::Path;
use tempfile::TempDir;

fn write_wav(path: &Path, sample_rate: u32, channels: u16) -> Result<()> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for i in 0..800 {
        writer.write_sample((i % 64) as i16)?;
    }
    writer.finalize()?;

    Ok(())
}

#[test]
fn test_wav_recording() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("out-100-200.wav");
    write_wav(&path, 8000, 1)?;

    let bytes = std::fs::read(&path)?;
    assert_eq!(sniff_content_type(&bytes), "audio/wav");

    Ok(())
}

#[test]
fn test_wav_detected_regardless_of_extension() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("recording.bin");
    write_wav(&path, 16000, 2)?;

    let bytes = std::fs::read(&path)?;
    assert_eq!(sniff_content_type(&bytes), "audio/wav");

    Ok(())
}

#[test]
fn test_mp3_with_id3_tag() {
    let mut data = b"ID3\x04\x00\x00\x00\x00\x00\x00".to_vec();
    data.extend_from_slice(&[0u8; 64]);

    assert_eq!(sniff_content_type(&data), "audio/mpeg");
}

#[test]
fn test_other_audio_signatures() {
    let cases: [(&[u8], &str); 6] = [
        (b"OggS\x00\x02\x00\x00\x00\x00", "audio/ogg"),
        (b"fLaC\x00\x00\x00\x22", "audio/flac"),
        (b"FORM\x00\x00\x10\x00AIFFCOMM", "audio/aiff"),
        (b".snd\x00\x00\x00\x18", "audio/basic"),
        (b"#!AMR\n", "audio/amr"),
        (b"\x00\x00\x00\x20ftypM4A \x00\x00\x00\x00", "audio/mp4"),
    ];

    for (data, expected) in cases {
        assert_eq!(sniff_content_type(data), expected);
    }
}

#[test]
fn test_unknown_content_falls_back() {
    assert_eq!(sniff_content_type(b"plain text, not audio"), FALLBACK_CONTENT_TYPE);
    assert_eq!(sniff_content_type(&[0x89, b'P', b'N', b'G']), FALLBACK_CONTENT_TYPE);
    assert_eq!(sniff_content_type(&[]), FALLBACK_CONTENT_TYPE);
}

#[test]
fn test_riff_without_wave_is_not_wav() {
    assert_eq!(
        sniff_content_type(b"RIFF\x24\x00\x00\x00AVI LIST"),
        FALLBACK_CONTENT_TYPE
    );
}
