/*!
# Encoding Table

The five Unicode encodings fixtures are produced in, together with their
byte order marks and the codec used to convert text to and from bytes.

```text
label      bom            unit
UTF-8      EF BB BF       1 byte
UTF-16BE   FE FF          2 bytes, big endian
UTF-16LE   FF FE          2 bytes, little endian
UTF-32BE   00 00 FE FF    4 bytes, big endian
UTF-32LE   FF FE 00 00    4 bytes, little endian
```
*/

use encoding_rs::{DecoderResult, Encoding, UTF_16BE, UTF_16LE, UTF_8};
use std::fmt;

use crate::core::{FixtureError, FixtureResult};

pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
pub const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];
pub const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
pub const UTF32_BE_BOM: [u8; 4] = [0x00, 0x00, 0xFE, 0xFF];
pub const UTF32_LE_BOM: [u8; 4] = [0xFF, 0xFE, 0x00, 0x00];

/// Byte order of multi-byte code units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Big,
    Little,
}

/// Target codec of a fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    Utf8,
    Utf16Be,
    Utf16Le,
    Utf32Be,
    Utf32Le,
}

/// Label, codec and BOM of one output fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingDescriptor {
    pub label: &'static str,
    pub codec: Codec,
    pub bom: &'static [u8],
}

/// Every fixture the generator writes, one per descriptor
pub static DESCRIPTORS: [EncodingDescriptor; 5] = [
    EncodingDescriptor {
        label: "UTF-8",
        codec: Codec::Utf8,
        bom: &UTF8_BOM,
    },
    EncodingDescriptor {
        label: "UTF-16BE",
        codec: Codec::Utf16Be,
        bom: &UTF16_BE_BOM,
    },
    EncodingDescriptor {
        label: "UTF-16LE",
        codec: Codec::Utf16Le,
        bom: &UTF16_LE_BOM,
    },
    EncodingDescriptor {
        label: "UTF-32BE",
        codec: Codec::Utf32Be,
        bom: &UTF32_BE_BOM,
    },
    EncodingDescriptor {
        label: "UTF-32LE",
        codec: Codec::Utf32Le,
        bom: &UTF32_LE_BOM,
    },
];

// UTF-32 before UTF-16: FF FE 00 00 starts with FF FE
const DETECTION_ORDER: [Codec; 5] = [
    Codec::Utf8,
    Codec::Utf32Be,
    Codec::Utf32Le,
    Codec::Utf16Be,
    Codec::Utf16Le,
];

impl Codec {
    pub fn descriptor(self) -> &'static EncodingDescriptor {
        let index = match self {
            Codec::Utf8 => 0,
            Codec::Utf16Be => 1,
            Codec::Utf16Le => 2,
            Codec::Utf32Be => 3,
            Codec::Utf32Le => 4,
        };
        &DESCRIPTORS[index]
    }

    pub fn label(self) -> &'static str {
        self.descriptor().label
    }

    pub fn bom(self) -> &'static [u8] {
        self.descriptor().bom
    }

    /// Width of one code unit in bytes
    pub fn unit_size(self) -> usize {
        match self {
            Codec::Utf8 => 1,
            Codec::Utf16Be | Codec::Utf16Le => 2,
            Codec::Utf32Be | Codec::Utf32Le => 4,
        }
    }

    pub fn byte_order(self) -> Option<ByteOrder> {
        match self {
            Codec::Utf8 => None,
            Codec::Utf16Be | Codec::Utf32Be => Some(ByteOrder::Big),
            Codec::Utf16Le | Codec::Utf32Le => Some(ByteOrder::Little),
        }
    }

    /// Encodes `text` without a BOM.
    ///
    /// Every `char` is a Unicode scalar value, so all five codecs can
    /// represent any `&str` and this never fails.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Codec::Utf8 => text.as_bytes().to_vec(),
            Codec::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Codec::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Codec::Utf32Be => text.chars().flat_map(|c| u32::from(c).to_be_bytes()).collect(),
            Codec::Utf32Le => text.chars().flat_map(|c| u32::from(c).to_le_bytes()).collect(),
        }
    }

    /// Number of bytes `encode` produces for `text`
    pub fn encoded_len(self, text: &str) -> usize {
        match self {
            Codec::Utf8 => text.len(),
            Codec::Utf16Be | Codec::Utf16Le => text.encode_utf16().count() * 2,
            Codec::Utf32Be | Codec::Utf32Le => text.chars().count() * 4,
        }
    }

    /// Decodes BOM-less `bytes` strictly: malformed input is an error, never
    /// replaced.
    pub fn decode(self, bytes: &[u8]) -> FixtureResult<String> {
        match self {
            Codec::Utf8 => decode_with(UTF_8, self, bytes),
            Codec::Utf16Be => decode_with(UTF_16BE, self, bytes),
            Codec::Utf16Le => decode_with(UTF_16LE, self, bytes),
            Codec::Utf32Be => decode_utf32(self, bytes, u32::from_be_bytes),
            Codec::Utf32Le => decode_utf32(self, bytes, u32::from_le_bytes),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn decode_with(encoding: &'static Encoding, codec: Codec, bytes: &[u8]) -> FixtureResult<String> {
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let capacity = decoder
        .max_utf8_buffer_length_without_replacement(bytes.len())
        .ok_or(FixtureError::Malformed { codec, offset: 0 })?;
    let mut text = String::with_capacity(capacity);

    let (result, read) = decoder.decode_to_string_without_replacement(bytes, &mut text, true);
    match result {
        DecoderResult::InputEmpty => Ok(text),
        DecoderResult::Malformed(bad, after) => Err(FixtureError::Malformed {
            codec,
            offset: read.saturating_sub(bad as usize + after as usize),
        }),
        DecoderResult::OutputFull => Err(FixtureError::Malformed { codec, offset: read }),
    }
}

fn decode_utf32(codec: Codec, bytes: &[u8], unit: fn([u8; 4]) -> u32) -> FixtureResult<String> {
    let units = bytes.chunks_exact(4);
    if !units.remainder().is_empty() {
        return Err(FixtureError::Malformed {
            codec,
            offset: bytes.len() - units.remainder().len(),
        });
    }

    let mut text = String::with_capacity(bytes.len() / 4);
    for (index, chunk) in units.enumerate() {
        let code_point = unit([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let c = char::from_u32(code_point).ok_or(FixtureError::UnsupportedCodepoint {
            codec,
            code_point,
            offset: index * 4,
        })?;
        text.push(c);
    }
    Ok(text)
}

/// Identifies a fixture's encoding from its leading BOM
pub fn detect_bom(bytes: &[u8]) -> Option<&'static EncodingDescriptor> {
    DETECTION_ORDER
        .iter()
        .map(|codec| codec.descriptor())
        .find(|descriptor| bytes.starts_with(descriptor.bom))
}

pub fn descriptor_for_label(label: &str) -> Option<&'static EncodingDescriptor> {
    DESCRIPTORS
        .iter()
        .find(|descriptor| descriptor.label.eq_ignore_ascii_case(label))
}

/// Output file name of the fixture for `label`, e.g. `text_UTF-16LE-BOM.txt`
pub fn fixture_file_name(label: &str) -> String {
    format!("text_{}-BOM.txt", label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_table_matches_codecs() {
        for descriptor in &DESCRIPTORS {
            assert_eq!(descriptor.codec.descriptor(), descriptor);
            assert_eq!(descriptor.codec.to_string(), descriptor.label);
        }
    }

    #[test]
    fn test_encode_single_ascii_char() {
        assert_eq!(Codec::Utf8.encode("A"), vec![0x41]);
        assert_eq!(Codec::Utf16Be.encode("A"), vec![0x00, 0x41]);
        assert_eq!(Codec::Utf16Le.encode("A"), vec![0x41, 0x00]);
        assert_eq!(Codec::Utf32Be.encode("A"), vec![0x00, 0x00, 0x00, 0x41]);
        assert_eq!(Codec::Utf32Le.encode("A"), vec![0x41, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_encode_supplementary_plane_uses_surrogates() {
        // U+1F600
        let text = "\u{1F600}";
        assert_eq!(Codec::Utf16Be.encode(text), vec![0xD8, 0x3D, 0xDE, 0x00]);
        assert_eq!(Codec::Utf16Le.encode(text), vec![0x3D, 0xD8, 0x00, 0xDE]);
        assert_eq!(Codec::Utf32Be.encode(text), vec![0x00, 0x01, 0xF6, 0x00]);
        assert_eq!(Codec::Utf16Be.encoded_len(text), 4);
    }

    #[test]
    fn test_decode_inverts_encode() {
        let text = "Grüße, ☔ and \u{1F600}";
        for descriptor in &DESCRIPTORS {
            let bytes = descriptor.codec.encode(text);
            assert_eq!(bytes.len(), descriptor.codec.encoded_len(text));
            assert_eq!(descriptor.codec.decode(&bytes).unwrap(), text);
        }
    }

    #[test]
    fn test_decode_rejects_odd_utf16_length() {
        let result = Codec::Utf16Le.decode(&[0x41, 0x00, 0x42]);
        assert!(matches!(result, Err(FixtureError::Malformed { offset: 2, .. })));
    }

    #[test]
    fn test_decode_rejects_lone_surrogate() {
        let result = Codec::Utf16Be.decode(&[0xD8, 0x3D, 0x00, 0x41]);
        assert!(matches!(result, Err(FixtureError::Malformed { .. })));
    }

    #[test]
    fn test_decode_utf32_out_of_range() {
        let result = Codec::Utf32Be.decode(&[0x00, 0x00, 0x00, 0x41, 0x00, 0x11, 0x00, 0x00]);
        match result {
            Err(FixtureError::UnsupportedCodepoint {
                code_point, offset, ..
            }) => {
                assert_eq!(code_point, 0x110000);
                assert_eq!(offset, 4);
            }
            other => panic!("expected UnsupportedCodepoint, got {:?}", other),
        }
    }

    #[test]
    fn test_detect_prefers_utf32_over_utf16() {
        assert_eq!(detect_bom(&[0xFF, 0xFE, 0x00, 0x00]).unwrap().codec, Codec::Utf32Le);
        assert_eq!(detect_bom(&[0xFF, 0xFE, 0x41, 0x00]).unwrap().codec, Codec::Utf16Le);
        assert_eq!(detect_bom(&[0x00, 0x00, 0xFE, 0xFF]).unwrap().codec, Codec::Utf32Be);
        assert_eq!(detect_bom(&[0xFE, 0xFF]).unwrap().codec, Codec::Utf16Be);
        assert_eq!(detect_bom(&[0xEF, 0xBB, 0xBF]).unwrap().codec, Codec::Utf8);
        assert!(detect_bom(b"Hello").is_none());
        assert!(detect_bom(b"").is_none());
    }

    #[test]
    fn test_fixture_names() {
        let names: Vec<String> = DESCRIPTORS.iter().map(|d| fixture_file_name(d.label)).collect();
        assert_eq!(
            names,
            vec![
                "text_UTF-8-BOM.txt",
                "text_UTF-16BE-BOM.txt",
                "text_UTF-16LE-BOM.txt",
                "text_UTF-32BE-BOM.txt",
                "text_UTF-32LE-BOM.txt",
            ]
        );
        assert_eq!(descriptor_for_label("utf-16le").unwrap().codec, Codec::Utf16Le);
    }
}
