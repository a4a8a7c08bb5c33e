//! QR Ph payload encoding
//!
//! - CRC: CRC-16/CCITT checksum for the trailing record
//! - TLV: two-digit tag / two-digit length text records
//! - Payload: fixed-order assembly of the merchant-presented payload
//! - Config: provider GUID, merchant city and CRC input selection

/// Encoder configuration and environment overrides
pub mod config;
/// CRC-16/CCITT checksum
pub mod crc;
/// Payload assembly
pub mod payload;
pub mod tags;
/// TLV record writing and reading
pub mod tlv;

pub use config::EncoderConfig;
pub use crc::{CrcInput, checksum, checksum_hex, crc16_ccitt};
pub use payload::{Payload, PayloadEncoder};
pub use tlv::{Tag, TlvReader, TlvRecord, tlv_field};
