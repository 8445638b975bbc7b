//! Audio format identifier registry.
//!
//! Maps provider-specific format identifiers (ElevenLabs-style strings such
//! as `pcm_44100`, `mp3_44100_128`, `ulaw_8000`) to their media type and,
//! where it matters for playback, their sample rate. Lookup is by string
//! prefix and never fails: unrecognized identifiers fall back to raw PCM.

/// Sample rate assumed for PCM identifiers with an unknown suffix.
pub const DEFAULT_PCM_SAMPLE_RATE: u32 = 44_100;

/// PCM sample rates the providers actually offer.
const KNOWN_PCM_RATES: &[u32] = &[8_000, 16_000, 22_050, 24_000, 32_000, 44_100, 48_000];

/// Media type (MIME type) for a format identifier.
///
/// Useful for the `Content-Type` header of a streamed HTTP response.
/// Returns `audio/pcm` for anything unrecognized.
pub fn media_type_for(format_id: &str) -> &'static str {
    if format_id.starts_with("mp3_") {
        "audio/mpeg"
    } else if format_id.starts_with("pcm_") {
        "audio/pcm"
    } else if format_id.starts_with("opus_") {
        "audio/opus"
    } else if format_id.starts_with("ulaw_") || format_id.starts_with("alaw_") {
        "audio/basic"
    } else if format_id == "aac" {
        "audio/aac"
    } else if format_id == "flac" {
        "audio/flac"
    } else {
        "audio/pcm"
    }
}

/// Sample rate for a format identifier, plus whether the identifier was
/// recognized.
///
/// Only meaningful for the PCM and G.711 families; compressed formats carry
/// their rate inside the bitstream and report `(44100, false)` here.
pub fn sample_rate_for(format_id: &str) -> (u32, bool) {
    if let Some(suffix) = format_id.strip_prefix("pcm_") {
        return match suffix.parse::<u32>() {
            Ok(rate) if KNOWN_PCM_RATES.contains(&rate) => (rate, true),
            _ => (DEFAULT_PCM_SAMPLE_RATE, false),
        };
    }
    if format_id.starts_with("ulaw_") || format_id.starts_with("alaw_") {
        return (8_000, true);
    }
    (DEFAULT_PCM_SAMPLE_RATE, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_total_coverage() {
        // Every identifier must resolve to a non-empty media type, including
        // unknown ones.
        for format_id in [
            "pcm_8000",
            "pcm_44100",
            "mp3_44100_128",
            "opus_48000_64",
            "ulaw_8000",
            "alaw_8000",
            "aac",
            "flac",
            "totally_unknown_format",
        ] {
            assert!(!media_type_for(format_id).is_empty(), "{format_id}");
        }
    }

    #[test]
    fn test_media_type_families() {
        assert_eq!(media_type_for("mp3_44100_128"), "audio/mpeg");
        assert_eq!(media_type_for("pcm_24000"), "audio/pcm");
        assert_eq!(media_type_for("opus_48000_64"), "audio/opus");
        assert_eq!(media_type_for("ulaw_8000"), "audio/basic");
        assert_eq!(media_type_for("alaw_8000"), "audio/basic");
        assert_eq!(media_type_for("aac"), "audio/aac");
        assert_eq!(media_type_for("flac"), "audio/flac");
        assert_eq!(media_type_for("totally_unknown_format"), "audio/pcm");
    }

    #[test]
    fn test_sample_rate_known_pcm() {
        for rate in [8_000u32, 16_000, 22_050, 24_000, 32_000, 44_100, 48_000] {
            assert_eq!(sample_rate_for(&format!("pcm_{rate}")), (rate, true));
        }
    }

    #[test]
    fn test_sample_rate_unknown_pcm_suffix() {
        assert_eq!(sample_rate_for("pcm_11025"), (44_100, false));
        assert_eq!(sample_rate_for("pcm_bogus"), (44_100, false));
    }

    #[test]
    fn test_sample_rate_g711() {
        assert_eq!(sample_rate_for("ulaw_8000"), (8_000, true));
        assert_eq!(sample_rate_for("alaw_8000"), (8_000, true));
    }

    #[test]
    fn test_sample_rate_fallback() {
        assert_eq!(sample_rate_for("mp3_44100_128"), (44_100, false));
        assert_eq!(sample_rate_for("something_else"), (44_100, false));
    }
}
