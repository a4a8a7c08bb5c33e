//! QR Ph payload decoding
//!
//! Splits a payload back into its TLV records, verifies the trailing
//! CRC-16 and exposes the merchant-presented fields.

/// Record walking, CRC verification and field accessors
pub mod parse;

pub use parse::{MerchantAccount, ParsedPayload, parse_payload, parse_payload_with, verify_payload};
