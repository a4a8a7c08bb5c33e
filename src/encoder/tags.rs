//! Tag identifiers and fixed values of the QR Ph merchant-presented payload

use super::tlv::Tag;

/// Payload Format Indicator
pub const PAYLOAD_FORMAT_INDICATOR: Tag = Tag::from_digits(*b"00");
/// Point of Initiation Method
pub const POINT_OF_INITIATION: Tag = Tag::from_digits(*b"01");
/// Merchant Account Information (nested TLV)
pub const MERCHANT_ACCOUNT: Tag = Tag::from_digits(*b"26");
/// Merchant Category Code
pub const MERCHANT_CATEGORY_CODE: Tag = Tag::from_digits(*b"52");
/// Transaction Currency
pub const TRANSACTION_CURRENCY: Tag = Tag::from_digits(*b"53");
/// Transaction Amount
pub const TRANSACTION_AMOUNT: Tag = Tag::from_digits(*b"54");
/// Country Code
pub const COUNTRY_CODE: Tag = Tag::from_digits(*b"58");
/// Merchant Name
pub const MERCHANT_NAME: Tag = Tag::from_digits(*b"59");
/// Merchant City
pub const MERCHANT_CITY: Tag = Tag::from_digits(*b"60");
/// CRC
pub const CRC: Tag = Tag::from_digits(*b"63");

/// Sub-tags inside [`MERCHANT_ACCOUNT`]
pub mod account {
    use super::Tag;

    /// Provider GUID
    pub const GUID: Tag = Tag::from_digits(*b"00");
    /// Payee mobile number
    pub const MOBILE: Tag = Tag::from_digits(*b"01");
}

/// Payload format version
pub const PAYLOAD_FORMAT_VERSION: &str = "01";
/// Dynamic QR, amount present
pub const INITIATION_DYNAMIC: &str = "12";
/// Merchant category code used for person-to-person transfers
pub const CATEGORY_UNSPECIFIED: &str = "0000";
/// ISO 4217 numeric code for PHP
pub const CURRENCY_PHP: &str = "608";
/// ISO 3166-1 alpha-2 country code
pub const COUNTRY_PH: &str = "PH";

/// Tag and fixed length of the CRC record, covered by the checksum itself
pub const CRC_PREFIX: &str = "6304";
/// Characters in the CRC value
pub const CRC_LEN: usize = 4;
