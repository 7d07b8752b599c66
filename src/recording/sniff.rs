/// Number of leading bytes inspected when sniffing
pub const SNIFF_LEN: usize = 512;

/// Returned when no signature matches
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Detects the MIME type of a recording by examining its magic bytes
///
/// Only the first [`SNIFF_LEN`] bytes are looked at. Never fails: unknown
/// content maps to [`FALLBACK_CONTENT_TYPE`].
pub fn sniff_content_type(data: &[u8]) -> &'static str {
    let data = &data[..data.len().min(SNIFF_LEN)];

    match data {
        // RIFF....WAVE
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'A', b'V', b'E', ..] => "audio/wav",
        // FORM....AIFF / AIFC
        [b'F', b'O', b'R', b'M', _, _, _, _, b'A', b'I', b'F', b'F' | b'C', ..] => "audio/aiff",
        [b'I', b'D', b'3', ..] => "audio/mpeg",
        [b'O', b'g', b'g', b'S', 0x00, ..] => "audio/ogg",
        [b'f', b'L', b'a', b'C', ..] => "audio/flac",
        [b'.', b's', b'n', b'd', ..] => "audio/basic",
        [b'#', b'!', b'A', b'M', b'R', ..] => "audio/amr",
        [b'M', b'T', b'h', b'd', 0x00, 0x00, 0x00, 0x06, ..] => "audio/midi",
        [_, _, _, _, b'f', b't', b'y', b'p', b'M', b'4', b'A' | b'B', ..] => "audio/mp4",
        // Bare MPEG audio frame: 11 sync bits, layer bits non-zero
        [0xFF, second, ..] if second & 0xE0 == 0xE0 && second & 0x06 != 0 => "audio/mpeg",
        _ => FALLBACK_CONTENT_TYPE,
    }
}
