use super::config::EncoderConfig;
use super::crc::checksum_hex;
use super::tags;
use super::tlv::{TlvReader, TlvRecord, write_field};
use crate::error::{PayloadError, Result};
use crate::models::PaymentRequest;
use std::fmt;
use tracing::debug;

/// An encoded QR Ph payload, terminated by its CRC record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Payload(String);

impl Payload {
    pub(crate) fn from_encoded(text: String) -> Self {
        Self(text)
    }

    /// Payload text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the payload text
    pub fn into_string(self) -> String {
        self.0
    }

    /// The 4 hex digits of the CRC record
    pub fn crc(&self) -> &str {
        // The CRC value is ASCII, so the last 4 bytes are whole characters
        &self.0[self.0.len() - tags::CRC_LEN..]
    }

    /// Top-level records, CRC record included
    pub fn records(&self) -> Result<Vec<TlvRecord>> {
        TlvReader::new(&self.0).collect()
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Payload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Payload> for String {
    fn from(payload: Payload) -> Self {
        payload.0
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PayloadError::EmptyField(field));
    }
    Ok(())
}

/// Builds QR Ph payloads for a fixed configuration
///
/// Stateless between calls; one encoder can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct PayloadEncoder {
    config: EncoderConfig,
}

impl PayloadEncoder {
    /// Create an encoder with the given configuration
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode a payment request
    ///
    /// Records are emitted in the fixed order 00, 01, 26, 52, 53, 54, 58,
    /// 59, 60, 63. The CRC covers every preceding character plus the
    /// `6304` prefix of its own record.
    pub fn encode(&self, request: &PaymentRequest) -> Result<Payload> {
        require_non_empty("phone", &request.phone)?;
        require_non_empty("merchant_name", &request.merchant_name)?;

        let mut account = String::with_capacity(32);
        write_field(&mut account, tags::account::GUID, &self.config.provider_guid)?;
        write_field(&mut account, tags::account::MOBILE, &request.phone)?;

        let amount = request.amount.to_string();

        let mut out = String::with_capacity(128);
        write_field(
            &mut out,
            tags::PAYLOAD_FORMAT_INDICATOR,
            tags::PAYLOAD_FORMAT_VERSION,
        )?;
        write_field(&mut out, tags::POINT_OF_INITIATION, tags::INITIATION_DYNAMIC)?;
        write_field(&mut out, tags::MERCHANT_ACCOUNT, &account)?;
        write_field(
            &mut out,
            tags::MERCHANT_CATEGORY_CODE,
            tags::CATEGORY_UNSPECIFIED,
        )?;
        write_field(&mut out, tags::TRANSACTION_CURRENCY, tags::CURRENCY_PHP)?;
        write_field(&mut out, tags::TRANSACTION_AMOUNT, &amount)?;
        write_field(&mut out, tags::COUNTRY_CODE, tags::COUNTRY_PH)?;
        write_field(&mut out, tags::MERCHANT_NAME, &request.merchant_name)?;
        write_field(&mut out, tags::MERCHANT_CITY, &self.config.merchant_city)?;

        out.push_str(tags::CRC_PREFIX);
        let crc = checksum_hex(&out, self.config.crc_input);
        out.push_str(&crc);

        debug!(
            amount = %amount,
            crc = %crc,
            chars = out.chars().count(),
            "encoded QR Ph payload"
        );
        Ok(Payload::from_encoded(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::crc::CrcInput;
    use crate::models::Amount;

    const JANE_DOE: &str = "00020101021226310012com.p2pqrpay0111091712345675204000053036085407\
                            1250.505802PH5908Jane Doe6006Manila6304DF19";

    fn request(name: &str, amount: Amount) -> PaymentRequest {
        PaymentRequest::new("09171234567", name, amount)
    }

    #[test]
    fn test_encode_reference_payload() {
        let payload = PayloadEncoder::default()
            .encode(&request("Jane Doe", Amount::from_centavos(125_050)))
            .unwrap();
        assert_eq!(payload.as_str(), JANE_DOE);
        assert_eq!(payload.crc(), "DF19");
    }

    #[test]
    fn test_encode_utf16_mode_differs_for_non_ascii() {
        let name = "Jose Peña";
        let utf8 = PayloadEncoder::default()
            .encode(&request(name, Amount::ZERO))
            .unwrap();
        let utf16 = PayloadEncoder::new(
            EncoderConfig::default().with_crc_input(CrcInput::Utf16CodeUnits),
        )
        .encode(&request(name, Amount::ZERO))
        .unwrap();
        assert_eq!(utf8.crc(), "F3C8");
        assert_eq!(utf16.crc(), "4878");
        assert_eq!(
            utf8.as_str()[..utf8.as_str().len() - 4],
            utf16.as_str()[..utf16.as_str().len() - 4]
        );
    }

    #[test]
    fn test_encode_rejects_empty_fields() {
        let encoder = PayloadEncoder::default();
        let empty_phone = PaymentRequest::new("", "Jane Doe", Amount::ZERO);
        assert_eq!(
            encoder.encode(&empty_phone),
            Err(PayloadError::EmptyField("phone"))
        );
        assert_eq!(
            encoder.encode(&request("  ", Amount::ZERO)),
            Err(PayloadError::EmptyField("merchant_name"))
        );
    }

    #[test]
    fn test_encode_rejects_long_name() {
        let name = "N".repeat(100);
        assert!(matches!(
            PayloadEncoder::default().encode(&request(&name, Amount::ZERO)),
            Err(PayloadError::ValueTooLong { ref tag, len: 100 }) if tag == "59"
        ));
    }

    #[test]
    fn test_encode_rejects_oversized_account_info() {
        let config = EncoderConfig::default().with_provider_guid("g".repeat(90));
        assert!(matches!(
            PayloadEncoder::new(config).encode(&request("Jane Doe", Amount::ZERO)),
            Err(PayloadError::ValueTooLong { ref tag, .. }) if tag == "26"
        ));
    }

    #[test]
    fn test_custom_city() {
        let config = EncoderConfig::default().with_merchant_city("Cebu");
        let payload = PayloadEncoder::new(config)
            .encode(&request("Jane Doe", Amount::ZERO))
            .unwrap();
        assert!(payload.as_str().contains("6004Cebu6304"));
    }
}
