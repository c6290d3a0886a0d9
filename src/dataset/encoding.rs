use serde::Serialize;
use std::fmt;

/// 依序嘗試的文字編碼
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextEncoding {
    Utf8,
    Latin1,
    Windows1252,
    Iso8859_1,
}

impl TextEncoding {
    pub const TRIAL_ORDER: [TextEncoding; 4] = [
        TextEncoding::Utf8,
        TextEncoding::Latin1,
        TextEncoding::Windows1252,
        TextEncoding::Iso8859_1,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Windows1252 => "windows-1252",
            TextEncoding::Iso8859_1 => "iso-8859-1",
        }
    }

    /// Decodes `bytes` strictly in this encoding, `None` when they are not valid.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => {
                let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                std::str::from_utf8(bytes).ok().map(str::to_string)
            }
            // 真正的 Latin-1 文字幾乎不會出現 C1 控制字元，出現時多半是 cp1252
            TextEncoding::Latin1 => {
                if bytes.iter().any(|b| (0x80..=0x9F).contains(b)) {
                    None
                } else {
                    Some(encoding_rs::mem::decode_latin1(bytes).into_owned())
                }
            }
            TextEncoding::Windows1252 => {
                if bytes.iter().any(|b| CP1252_UNDEFINED.contains(b)) {
                    return None;
                }
                encoding_rs::WINDOWS_1252
                    .decode_without_bom_handling_and_without_replacement(bytes)
                    .map(|text| text.into_owned())
            }
            TextEncoding::Iso8859_1 => Some(encoding_rs::mem::decode_latin1(bytes).into_owned()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const CP1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// 依序嘗試 UTF-8、Latin-1、Windows-1252、ISO-8859-1，第一個成功者勝出
pub fn decode_with_fallback(bytes: &[u8]) -> Option<(String, TextEncoding)> {
    for encoding in TextEncoding::TRIAL_ORDER {
        match encoding.decode(bytes) {
            Some(text) => {
                tracing::debug!("Decoded dataset as {}", encoding);
                return Some((text, encoding));
            }
            None => tracing::debug!("Dataset is not valid {}, trying next encoding", encoding),
        }
    }
    None
}
