//! Source segment codec: URL-safe base64 over a zlib stream.
//!
//! ```text
//! "blockdiag { A -> B; }"  --zlib-->  78 9c 4b ca ...  --base64url-->  "eJxLyk_..."
//! ```

use std::{borrow::Cow, io::Write};

use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use flate2::{Compression, Decompress, FlushDecompress, Status, write::ZlibEncoder};

use super::DecodeError;

/// URL-safe alphabet; padding optional on input, emitted on output.
///
/// [`decode`] also accepts the standard alphabet's `+` and `/`.
const URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Output buffer growth step while inflating.
const CHUNK: usize = 16 * 1024;

/// Decode a path segment into diagram source text.
///
/// `limit` caps the decompressed size in bytes.
pub fn decode(encoded: &str, limit: usize) -> Result<String, DecodeError> {
    let compressed = URL_SAFE.decode(to_url_safe(encoded).as_bytes())?;
    let raw = inflate(&compressed, limit)?;
    Ok(String::from_utf8(raw)?)
}

/// Map standard-alphabet characters onto their URL-safe counterparts.
fn to_url_safe(encoded: &str) -> Cow<'_, str> {
    if encoded.contains(['+', '/']) {
        Cow::Owned(encoded.replace('+', "-").replace('/', "_"))
    } else {
        Cow::Borrowed(encoded)
    }
}

/// Inverse of [`decode`]: compress and encode `source` for use in a URL.
pub fn encode(source: &str) -> std::io::Result<String> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(source.as_bytes())?;
    let compressed = encoder.finish()?;
    Ok(URL_SAFE.encode(compressed))
}

/// Inflate a complete zlib stream, refusing output larger than `limit`.
fn inflate(data: &[u8], limit: usize) -> Result<Vec<u8>, DecodeError> {
    let mut inflater = Decompress::new(true);
    let mut out = Vec::new();

    loop {
        let in_before = inflater.total_in();
        let out_before = inflater.total_out();

        out.reserve(CHUNK);
        let offset = usize::try_from(in_before).unwrap_or(data.len()).min(data.len());
        let status = inflater.decompress_vec(&data[offset..], &mut out, FlushDecompress::None)?;

        if out.len() > limit {
            return Err(DecodeError::TooLarge { limit });
        }

        match status {
            Status::StreamEnd => return Ok(out),
            Status::Ok | Status::BufError => {
                // Input exhausted before the end-of-stream marker.
                if inflater.total_in() == in_before && inflater.total_out() == out_before {
                    return Err(DecodeError::Truncated);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: usize = 1024 * 1024;

    fn zlib(bytes: &[u8]) -> Vec<u8> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(bytes).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_decode_inverts_encode() {
        for text in [
            "blockdiag { A -> B; }",
            "  \n seqdiag {\n  browser -> server [label = \"GET\"];\n}",
            "actdiag { 読む -> 書く }",
            "",
        ] {
            let encoded = encode(text).unwrap();
            assert_eq!(decode(&encoded, LIMIT).unwrap(), text);
        }
    }

    #[test]
    fn test_encoded_is_url_safe() {
        let text: String = (0..512).map(|i| char::from(b'!' + (i * 37 % 90) as u8)).collect();
        let encoded = encode(&text).unwrap();
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
    }

    #[test]
    fn test_padding_optional() {
        let encoded = encode("nwdiag { network { A; B; } }").unwrap();
        let unpadded = encoded.trim_end_matches('=');
        assert_eq!(
            decode(unpadded, LIMIT).unwrap(),
            "nwdiag { network { A; B; } }"
        );
    }

    #[test]
    fn test_standard_alphabet_accepted() {
        let (text, encoded) = (0..1000)
            .map(|i| format!("blockdiag {{ node{i} -> node{} }}", i * 7))
            .map(|text| {
                let encoded = encode(&text).unwrap();
                (text, encoded)
            })
            .find(|(_, encoded)| encoded.contains(['-', '_']))
            .unwrap();

        let standard = encoded.replace('-', "+").replace('_', "/");
        assert_eq!(decode(&standard, LIMIT).unwrap(), text);
    }

    #[test]
    fn test_decode_preserves_leading_whitespace() {
        let encoded = encode("\n  blockdiag {}").unwrap();
        assert_eq!(decode(&encoded, LIMIT).unwrap(), "\n  blockdiag {}");
    }

    #[test]
    fn test_invalid_base64() {
        let err = decode("not-base64!!", LIMIT).unwrap_err();
        assert!(matches!(err, DecodeError::Base64(_)));
    }

    #[test]
    fn test_not_zlib() {
        let encoded = URL_SAFE.encode(b"plain text, not compressed");
        let err = decode(&encoded, LIMIT).unwrap_err();
        assert!(matches!(err, DecodeError::Inflate(_)));
    }

    #[test]
    fn test_truncated_stream() {
        let compressed = zlib(b"seqdiag { A -> B; B -> C; C -> D; }");
        let encoded = URL_SAFE.encode(&compressed[..compressed.len() / 2]);
        let err = decode(&encoded, LIMIT).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated | DecodeError::Inflate(_)));
    }

    #[test]
    fn test_empty_input() {
        assert!(decode("", LIMIT).is_err());
    }

    #[test]
    fn test_invalid_utf8() {
        let encoded = URL_SAFE.encode(zlib(&[0x62, 0xff, 0xfe]));
        let err = decode(&encoded, LIMIT).unwrap_err();
        assert!(matches!(err, DecodeError::Utf8(_)));
    }

    #[test]
    fn test_size_limit() {
        let bomb = "a".repeat(200_000);
        let encoded = encode(&bomb).unwrap();

        let err = decode(&encoded, 1000).unwrap_err();
        assert!(matches!(err, DecodeError::TooLarge { limit: 1000 }));

        // exactly at the limit is fine
        assert_eq!(decode(&encoded, bomb.len()).unwrap().len(), bomb.len());
    }
}
