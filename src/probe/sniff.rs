//! Content sniffing for the first kilobyte of a probe response.
//!
//! These checks classify the body sample for the success message; they
//! are operational signals, not decoders.

/// ZIP local file header — GTFS datasets are ZIP archives.
pub const ZIP_SIGNATURE: &[u8; 4] = b"PK\x03\x04";

#[must_use]
pub fn is_zip(sample: &[u8]) -> bool {
    sample.starts_with(ZIP_SIGNATURE)
}

/// First byte matches one of the length-delimited protobuf tags for
/// fields 1-3 (`0x0a`, `0x12`, `0x1a`). GTFS-RT `FeedMessage` payloads
/// open with their `header` field, so this catches them in practice.
/// Deliberately coarse; kept as-is.
#[must_use]
pub fn is_protobuf(sample: &[u8]) -> bool {
    matches!(sample.first(), Some(0x0a | 0x12 | 0x1a))
}

/// JSON documents start with `{` or `[` after leading whitespace.
#[must_use]
pub fn is_json(sample: &[u8]) -> bool {
    matches!(sample.trim_ascii_start().first(), Some(b'{' | b'['))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zip_signature_detected() {
        assert!(is_zip(b"PK\x03\x04rest-of-archive"));
        assert!(!is_zip(b"PK\x05\x06")); // empty-archive record, not a local header
        assert!(!is_zip(b""));
    }

    #[test]
    fn protobuf_tag_bytes_detected() {
        assert!(is_protobuf(&[0x0a, 0x0d, 0x01]));
        assert!(is_protobuf(&[0x12, 0x00]));
        assert!(is_protobuf(&[0x1a, 0x02]));
        assert!(!is_protobuf(&[0x22, 0x01]));
        assert!(!is_protobuf(b"{"));
        assert!(!is_protobuf(&[]));
    }

    #[test]
    fn json_detected_after_leading_whitespace() {
        assert!(is_json(b"{\"entity\": []}"));
        assert!(is_json(b"  \n\t[1, 2]"));
        assert!(!is_json(b"<html>"));
        assert!(!is_json(b""));
    }
}
