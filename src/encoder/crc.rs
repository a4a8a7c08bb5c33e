//! CRC-16/CCITT checksum for the trailing tag 63 record
//!
//! Polynomial 0x1021, initial register 0xFFFF, no reflection, no final XOR
//! (the CRC-16/CCITT-FALSE parameter set).

use std::fmt;
use std::str::FromStr;

/// Generator polynomial
pub const CRC_POLY: u16 = 0x1021;
/// Initial register value
pub const CRC_INIT: u16 = 0xFFFF;

/// Which units of the payload text are fed into the checksum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrcInput {
    /// UTF-8 bytes of the payload (what EMVCo scanners verify)
    #[default]
    Utf8Bytes,
    /// UTF-16 code units, of which only the low byte reaches the register
    ///
    /// Record lengths still count Unicode scalar values, so payloads match
    /// a UTF-16 based encoder only while every value stays inside the Basic
    /// Multilingual Plane. A character such as an emoji counts as one here
    /// and as two code units there.
    Utf16CodeUnits,
}

impl FromStr for CrcInput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" | "bytes" => Ok(CrcInput::Utf8Bytes),
            "utf16" | "utf-16" | "code-units" => Ok(CrcInput::Utf16CodeUnits),
            other => Err(format!("unknown CRC input mode '{other}'")),
        }
    }
}

impl fmt::Display for CrcInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrcInput::Utf8Bytes => f.write_str("utf8"),
            CrcInput::Utf16CodeUnits => f.write_str("utf16"),
        }
    }
}

#[inline]
fn update(crc: u16, unit: u8) -> u16 {
    let mut crc = crc ^ ((unit as u16) << 8);
    for _ in 0..8 {
        crc = if crc & 0x8000 != 0 {
            (crc << 1) ^ CRC_POLY
        } else {
            crc << 1
        };
    }
    crc
}

/// CRC-16/CCITT over raw bytes
pub fn crc16_ccitt(data: &[u8]) -> u16 {
    data.iter().fold(CRC_INIT, |crc, &b| update(crc, b))
}

/// CRC-16/CCITT over payload text, using the selected input units
pub fn checksum(text: &str, input: CrcInput) -> u16 {
    match input {
        CrcInput::Utf8Bytes => crc16_ccitt(text.as_bytes()),
        // Bits above the low byte shift out of the 16-bit register
        CrcInput::Utf16CodeUnits => text
            .encode_utf16()
            .fold(CRC_INIT, |crc, unit| update(crc, unit as u8)),
    }
}

/// Checksum rendered as 4 uppercase hex digits, zero-padded
pub fn checksum_hex(text: &str, input: CrcInput) -> String {
    format!("{:04X}", checksum(text, input))
}
