//! Program file I/O with BOM handling.
//!
//! Calculator `.prgm` files travel as UTF-16LE with a BOM (that is what the
//! Connectivity Kit emits); everything else is plain UTF-8. On load the BOM
//! decides the decoding, on save the file extension decides it.

use std::fs;
use std::path::Path;

use super::error::{AppError, Result};

const BOM_UTF8: [u8; 3] = [0xEF, 0xBB, 0xBF];
const BOM_UTF16_LE: [u8; 2] = [0xFF, 0xFE];
const BOM_UTF16_BE: [u8; 2] = [0xFE, 0xFF];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProgramEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
}

/// Sniff the BOM. Returns the encoding and the number of BOM bytes to skip.
fn detect_encoding(data: &[u8]) -> (ProgramEncoding, usize) {
    if data.starts_with(&BOM_UTF8) {
        (ProgramEncoding::Utf8, 3)
    } else if data.starts_with(&BOM_UTF16_LE) {
        (ProgramEncoding::Utf16Le, 2)
    } else if data.starts_with(&BOM_UTF16_BE) {
        (ProgramEncoding::Utf16Be, 2)
    } else {
        // No BOM, assume UTF-8
        (ProgramEncoding::Utf8, 0)
    }
}

fn decode_utf16(data: &[u8], big_endian: bool) -> Result<String> {
    if data.len() % 2 != 0 {
        return Err(AppError::Encoding(
            "odd number of UTF-16 bytes".to_string(),
        ));
    }
    let words: Vec<u16> = data
        .chunks_exact(2)
        .map(|pair| {
            if big_endian {
                u16::from_be_bytes([pair[0], pair[1]])
            } else {
                u16::from_le_bytes([pair[0], pair[1]])
            }
        })
        .collect();
    String::from_utf16(&words)
        .map_err(|_| AppError::Encoding("invalid UTF-16 data".to_string()))
}

/// Decode raw program bytes, honoring a leading BOM.
pub fn decode_program_bytes(data: &[u8]) -> Result<String> {
    let (encoding, skip) = detect_encoding(data);
    let body = &data[skip..];
    match encoding {
        ProgramEncoding::Utf8 => String::from_utf8(body.to_vec())
            .map_err(|_| AppError::Encoding("invalid UTF-8 data".to_string())),
        ProgramEncoding::Utf16Le => decode_utf16(body, false),
        ProgramEncoding::Utf16Be => decode_utf16(body, true),
    }
}

/// True when the target path must be written as UTF-16LE with a BOM.
pub fn uses_utf16(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("prgm")
}

/// Encode program text for the given target path.
pub fn encode_program_text(path: &Path, text: &str) -> Vec<u8> {
    if uses_utf16(path) {
        let mut data = Vec::with_capacity(2 + text.len() * 2);
        data.extend_from_slice(&BOM_UTF16_LE);
        for unit in text.encode_utf16() {
            data.extend_from_slice(&unit.to_le_bytes());
        }
        data
    } else {
        text.as_bytes().to_vec()
    }
}

/// Read and decode a program source file.
///
/// `.hpprgm`/`.hpappprgm` binaries are not handled here; those are decoded
/// through the `hpprgm` tool (see `Toolchain::decode_program`).
pub fn load_program(path: &Path) -> Result<String> {
    let data = fs::read(path)?;
    decode_program_bytes(&data)
}

/// Encode and write a program source file.
pub fn save_program(path: &Path, text: &str) -> Result<()> {
    let data = encode_program_text(path, text);
    fs::write(path, data)?;
    Ok(())
}
