//! RustQR Ph - QR Ph payment payload encoder
//!
//! Builds EMVCo merchant-presented QR payloads for domestic e-wallet
//! transfers: fixed-order TLV records terminated by a CRC-16/CCITT record.
//! Payloads can be parsed and verified, priced from a tier catalog, and
//! rendered as QR images.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Payload parsing and CRC verification
pub mod decoder;
/// Payload encoding (CRC, TLV, assembly, configuration)
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (Amount, PaymentRequest)
pub mod models;
/// Tier catalog and pricing snapshots
pub mod pricing;
/// QR symbol rendering (PNG, terminal)
pub mod render;
/// Request files and batch encoding
pub mod tools;

pub use decoder::{ParsedPayload, parse_payload, verify_payload};
pub use encoder::{CrcInput, EncoderConfig, Payload, PayloadEncoder};
pub use error::{PayloadError, PricingError, RenderError, Result, ToolsError};
pub use models::{Amount, PaymentRequest};
pub use pricing::{Catalog, PricingSnapshot};

/// Generate a QR Ph payload string
///
/// # Arguments
/// * `phone_number` - Payee mobile number, placed under tag 26
/// * `merchant_name` - Payee display name (tag 59)
/// * `amount` - Amount in pesos, rendered with two fraction digits (tag 54)
///
/// # Returns
/// The payload text, ending in `6304` and four uppercase hex CRC digits
///
/// Uses the default configuration and never reads the environment, so the
/// same inputs always produce the same string.
pub fn generate_payload(phone_number: &str, merchant_name: &str, amount: f64) -> Result<String> {
    let amount = Amount::from_major(amount)?;
    let request = PaymentRequest::new(phone_number, merchant_name, amount);
    PayloadEncoder::default()
        .encode(&request)
        .map(Payload::into_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_payload_reference() {
        let payload = generate_payload("09171234567", "Jane Doe", 1250.5).unwrap();
        assert!(payload.ends_with("6304DF19"));
    }

    #[test]
    fn test_generate_payload_rejects_negative_amount() {
        assert!(matches!(
            generate_payload("09171234567", "Jane Doe", -5.0),
            Err(PayloadError::InvalidAmount(_))
        ));
    }
}
