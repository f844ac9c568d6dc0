//! Table-driven Base64 / Base64URL codec, plus hex helpers.
//!
//! Every signature, JWK component and JWT segment produced by Tether goes
//! through this codec. Output is always padded with `=` to a multiple of
//! four characters, and decoding requires that same padding.

/// Padding character appended to incomplete final groups.
const PAD: u8 = b'=';

/// Reverse-table marker for bytes outside the alphabet.
const INVALID: u8 = 0xFF;

const STANDARD_TABLE: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const URL_SAFE_TABLE: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

static STANDARD_REVERSE: [u8; 256] = reverse_table(STANDARD_TABLE);
static URL_SAFE_REVERSE: [u8; 256] = reverse_table(URL_SAFE_TABLE);

const fn reverse_table(table: &[u8; 64]) -> [u8; 256] {
    let mut reverse = [INVALID; 256];
    let mut i = 0;
    while i < table.len() {
        reverse[table[i] as usize] = i as u8;
        i += 1;
    }
    reverse
}

/// Which 64-character alphabet to encode with or decode from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alphabet {
    /// `A-Z a-z 0-9 + /`
    Standard,
    /// `A-Z a-z 0-9 - _`, used for JWK and JWT values.
    UrlSafe,
}

impl Alphabet {
    fn table(self) -> &'static [u8; 64] {
        match self {
            Self::Standard => STANDARD_TABLE,
            Self::UrlSafe => URL_SAFE_TABLE,
        }
    }

    fn reverse(self) -> &'static [u8; 256] {
        match self {
            Self::Standard => &STANDARD_REVERSE,
            Self::UrlSafe => &URL_SAFE_REVERSE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("out of memory while sizing codec output")]
    OutOfMemory,
    #[error("bad content encoding")]
    BadContentEncoding,
}

/// Encode `data` as padded Base64 text in the given alphabet.
///
/// An empty input yields an empty string.
pub fn base64_encode(data: &[u8], alphabet: Alphabet) -> Result<String, CodecError> {
    if data.is_empty() {
        return Ok(String::new());
    }

    let table = alphabet.table();
    let mut out = String::new();
    out.try_reserve_exact(data.len().div_ceil(3) * 4)
        .map_err(|_| CodecError::OutOfMemory)?;

    for group in data.chunks(3) {
        let b0 = u32::from(group[0]);
        let b1 = u32::from(group.get(1).copied().unwrap_or(0));
        let b2 = u32::from(group.get(2).copied().unwrap_or(0));
        let triple = (b0 << 16) | (b1 << 8) | b2;

        out.push(table[(triple >> 18) as usize & 0x3F] as char);
        out.push(table[(triple >> 12) as usize & 0x3F] as char);
        if group.len() > 1 {
            out.push(table[(triple >> 6) as usize & 0x3F] as char);
        } else {
            out.push(PAD as char);
        }
        if group.len() > 2 {
            out.push(table[triple as usize & 0x3F] as char);
        } else {
            out.push(PAD as char);
        }
    }

    Ok(out)
}

/// Decode padded Base64 text in the given alphabet.
///
/// Rejects empty input, lengths that are not a multiple of four, more than
/// two `=`, padding that is not a contiguous suffix, and any character not
/// in `alphabet`.
pub fn base64_decode(text: &str, alphabet: Alphabet) -> Result<Vec<u8>, CodecError> {
    let input = text.as_bytes();
    if input.is_empty() || input.len() % 4 != 0 {
        return Err(CodecError::BadContentEncoding);
    }

    let padding = match input.iter().position(|&c| c == PAD) {
        None => 0,
        Some(first) => {
            let tail = &input[first..];
            if tail.len() > 2 || tail.iter().any(|&c| c != PAD) {
                return Err(CodecError::BadContentEncoding);
            }
            tail.len()
        }
    };

    let out_len = input.len() / 4 * 3 - padding;
    let mut out = Vec::new();
    out.try_reserve_exact(out_len)
        .map_err(|_| CodecError::OutOfMemory)?;

    let reverse = alphabet.reverse();
    for quantum in input.chunks_exact(4) {
        let mut bits: u32 = 0;
        let mut pads = 0usize;
        for &c in quantum {
            let sextet = if c == PAD {
                pads += 1;
                0
            } else {
                match reverse[c as usize] {
                    INVALID => return Err(CodecError::BadContentEncoding),
                    value => value,
                }
            };
            bits = (bits << 6) | u32::from(sextet);
        }
        if pads > 2 {
            return Err(CodecError::BadContentEncoding);
        }

        let bytes = [(bits >> 16) as u8, (bits >> 8) as u8, bits as u8];
        out.extend_from_slice(&bytes[..3 - pads]);
    }

    Ok(out)
}

pub fn hex_encode(bytes: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push(DIGITS[(b >> 4) as usize] as char);
        out.push(DIGITS[(b & 0x0F) as usize] as char);
    }
    out
}
