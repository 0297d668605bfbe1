use thiserror::Error;

const ESCAPE: u8 = b'%';
const SPACE_ALIAS: u8 = b'+';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Invalid escape sequence at byte {position}")]
    InvalidEscape { position: usize },
    #[error("Decoded bytes are not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("Decoded text contains an unpaired UTF-16 surrogate")]
    UnpairedSurrogate,
}

/// Encode every UTF-8 byte of `text` as `%hh`.
///
/// Used for identifiers embedded in outbound links. The output is pure ASCII
/// and contains no character other than `%` and lowercase hex digits.
pub fn encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 3);
    for &byte in text.as_bytes() {
        push_escaped(&mut out, byte);
    }
    out
}

/// Encode `text` for use as a delimiter-free token.
///
/// ASCII alphanumerics pass through; every other byte (including `_`, `|`,
/// `&`, `<`, `+` and `%`) becomes `%hh`.
pub fn encode_token(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for &byte in text.as_bytes() {
        if byte.is_ascii_alphanumeric() {
            out.push(byte as char);
        } else {
            push_escaped(&mut out, byte);
        }
    }
    out
}

/// Reverse of [`encode`] and [`encode_token`].
///
/// `%hh` groups become bytes and `+` becomes a space; anything else is copied.
/// A truncated group at the end of input is dropped.
pub fn decode(token: &str) -> Result<String, CodecError> {
    let bytes = token.as_bytes();
    let len = bytes.len();
    let mut out = Vec::with_capacity(len);
    let mut i = 0;

    while i < len {
        match bytes[i] {
            ESCAPE => {
                if i + 3 <= len {
                    out.push(hex_pair(bytes[i + 1], bytes[i + 2], i)?);
                }
                i += 3;
            }
            SPACE_ALIAS => {
                out.push(b' ');
                i += 1;
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }

    Ok(String::from_utf8(out)?)
}

/// Decode the output of a script-side `escape()`.
///
/// `%HH` is a Latin-1 character, `%uHHLL` a UTF-16 code unit (surrogate pairs
/// are recombined), `+` is a space. Truncated groups are dropped.
pub fn unescape(escaped: &str) -> Result<String, CodecError> {
    let chars: Vec<char> = escaped.chars().collect();
    let len = chars.len();
    let mut units: Vec<u16> = Vec::with_capacity(len);
    let mut i = 0;

    while i < len {
        match chars[i] {
            '%' if len > i + 1 && chars[i + 1] != 'u' => {
                if len >= i + 3 {
                    let byte = hex_pair_chars(chars[i + 1], chars[i + 2], i)?;
                    units.push(u16::from(byte));
                }
                i += 3;
            }
            '%' => {
                if len >= i + 6 {
                    let high = hex_pair_chars(chars[i + 2], chars[i + 3], i)?;
                    let low = hex_pair_chars(chars[i + 4], chars[i + 5], i)?;
                    units.push(u16::from_be_bytes([high, low]));
                }
                i += 6;
            }
            '+' => {
                units.push(u16::from(b' '));
                i += 1;
            }
            c => {
                let mut buf = [0u16; 2];
                units.extend_from_slice(c.encode_utf16(&mut buf));
                i += 1;
            }
        }
    }

    String::from_utf16(&units).map_err(|_| CodecError::UnpairedSurrogate)
}

fn push_escaped(out: &mut String, byte: u8) {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    out.push(ESCAPE as char);
    out.push(HEX[usize::from(byte >> 4)] as char);
    out.push(HEX[usize::from(byte & 0x0f)] as char);
}

fn hex_pair(high: u8, low: u8, position: usize) -> Result<u8, CodecError> {
    match (hex_digit(high), hex_digit(low)) {
        (Some(h), Some(l)) => Ok((h << 4) | l),
        _ => Err(CodecError::InvalidEscape { position }),
    }
}

fn hex_pair_chars(high: char, low: char, position: usize) -> Result<u8, CodecError> {
    if !high.is_ascii() || !low.is_ascii() {
        return Err(CodecError::InvalidEscape { position });
    }
    hex_pair(high as u8, low as u8, position)
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
