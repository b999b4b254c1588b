// https://xiph.org/vorbis/doc/Vorbis_I_spec.html#x1-620004.2.1
pub(crate) const VORBIS_IDENT_HEAD: &[u8] = b"\x01vorbis";
pub(crate) const VORBIS_COMMENT_HEAD: &[u8] = b"\x03vorbis";

// https://datatracker.ietf.org/doc/pdf/rfc7845.pdf#section-5.1
pub(crate) const OPUSHEAD: &[u8] = b"OpusHead";
pub(crate) const OPUSTAGS: &[u8] = b"OpusTags";

/// Opus always decodes at 48 kHz, whatever the input sample rate was
pub(crate) const OPUS_DECODE_SAMPLE_RATE: u32 = 48000;

/// The largest possible page: header (27), segment table (255), and 255 segments of 255 bytes
pub(crate) const MAX_PAGE_SIZE: u64 = 27 + 255 + 255 * 255;
