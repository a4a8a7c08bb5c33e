use crate::encoder::crc::{CrcInput, checksum_hex};
use crate::encoder::tags;
use crate::encoder::tlv::{Tag, TlvReader, TlvRecord};
use crate::error::{PayloadError, Result};
use crate::models::Amount;
use tracing::warn;

/// Decoded tag 26 contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantAccount {
    /// Provider GUID (sub-tag 00)
    pub guid: String,
    /// Payee mobile number (sub-tag 01)
    pub mobile: String,
}

/// A payload split back into its fields, with its CRC verified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPayload {
    records: Vec<TlvRecord>,
    merchant_account: MerchantAccount,
    amount: Option<Amount>,
}

impl ParsedPayload {
    /// All top-level records in payload order, CRC record last
    pub fn records(&self) -> &[TlvRecord] {
        &self.records
    }

    /// Value of the first record with `tag`
    pub fn value(&self, tag: Tag) -> Option<&str> {
        self.records
            .iter()
            .find(|r| r.tag == tag)
            .map(|r| r.value.as_str())
    }

    fn required(&self, tag: Tag) -> &str {
        // Presence is checked during parsing
        self.value(tag).unwrap_or_default()
    }

    /// Tag 00
    pub fn format_indicator(&self) -> &str {
        self.required(tags::PAYLOAD_FORMAT_INDICATOR)
    }

    /// Tag 01, absent in some static payloads
    pub fn initiation_method(&self) -> Option<&str> {
        self.value(tags::POINT_OF_INITIATION)
    }

    /// Tag 26
    pub fn merchant_account(&self) -> &MerchantAccount {
        &self.merchant_account
    }

    /// Tag 52
    pub fn category_code(&self) -> &str {
        self.required(tags::MERCHANT_CATEGORY_CODE)
    }

    /// Tag 53
    pub fn currency(&self) -> &str {
        self.required(tags::TRANSACTION_CURRENCY)
    }

    /// Tag 54, absent when the payer enters the amount
    pub fn amount(&self) -> Option<Amount> {
        self.amount
    }

    /// Tag 58
    pub fn country(&self) -> &str {
        self.required(tags::COUNTRY_CODE)
    }

    /// Tag 59
    pub fn merchant_name(&self) -> &str {
        self.required(tags::MERCHANT_NAME)
    }

    /// Tag 60
    pub fn merchant_city(&self) -> &str {
        self.required(tags::MERCHANT_CITY)
    }

    /// Tag 63
    pub fn crc(&self) -> &str {
        self.required(tags::CRC)
    }
}

const REQUIRED: [(Tag, &str); 7] = [
    (tags::PAYLOAD_FORMAT_INDICATOR, "00"),
    (tags::MERCHANT_ACCOUNT, "26"),
    (tags::MERCHANT_CATEGORY_CODE, "52"),
    (tags::TRANSACTION_CURRENCY, "53"),
    (tags::COUNTRY_CODE, "58"),
    (tags::MERCHANT_NAME, "59"),
    (tags::MERCHANT_CITY, "60"),
];

fn check_crc_record(records: &[TlvRecord]) -> Result<&TlvRecord> {
    let (last, rest) = records
        .split_last()
        .ok_or(PayloadError::MissingTag("63"))?;
    if rest.iter().any(|r| r.tag == tags::CRC) {
        return Err(PayloadError::MalformedCrc(
            "CRC record is not the last record".into(),
        ));
    }
    if last.tag != tags::CRC {
        return Err(PayloadError::MissingTag("63"));
    }
    let well_formed = last.value.len() == tags::CRC_LEN
        && last
            .value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b));
    if !well_formed {
        return Err(PayloadError::MalformedCrc(format!(
            "expected 4 uppercase hex digits, found '{}'",
            last.value
        )));
    }
    Ok(last)
}

fn parse_account(record: &TlvRecord) -> Result<MerchantAccount> {
    let nested = record.nested()?;
    let find = |tag: Tag, name: &'static str| {
        nested
            .iter()
            .find(|r| r.tag == tag)
            .map(|r| r.value.clone())
            .ok_or(PayloadError::MissingTag(name))
    };
    Ok(MerchantAccount {
        guid: find(tags::account::GUID, "26.00")?,
        mobile: find(tags::account::MOBILE, "26.01")?,
    })
}

/// Parse and verify a payload with UTF-8 byte checksumming
pub fn parse_payload(text: &str) -> Result<ParsedPayload> {
    parse_payload_with(text, CrcInput::default())
}

/// Parse and verify a payload, checksumming with `crc_input`
///
/// Walks every record, requires the CRC record to be last, recomputes the
/// checksum over everything before the CRC value and checks the mandatory
/// tags are present.
pub fn parse_payload_with(text: &str, crc_input: CrcInput) -> Result<ParsedPayload> {
    let records: Vec<TlvRecord> = TlvReader::new(text).collect::<Result<_>>()?;
    let crc_record = check_crc_record(&records)?;

    let body = &text[..text.len() - tags::CRC_LEN];
    let expected = checksum_hex(body, crc_input);
    if expected != crc_record.value {
        warn!(%expected, found = %crc_record.value, "QR Ph checksum mismatch");
        return Err(PayloadError::ChecksumMismatch {
            expected,
            found: crc_record.value.clone(),
        });
    }

    for (tag, name) in REQUIRED {
        if !records.iter().any(|r| r.tag == tag) {
            return Err(PayloadError::MissingTag(name));
        }
    }

    let merchant_account = records
        .iter()
        .find(|r| r.tag == tags::MERCHANT_ACCOUNT)
        .map(parse_account)
        .ok_or(PayloadError::MissingTag("26"))??;

    let amount = records
        .iter()
        .find(|r| r.tag == tags::TRANSACTION_AMOUNT)
        .map(|r| r.value.parse::<Amount>())
        .transpose()?;

    Ok(ParsedPayload {
        records,
        merchant_account,
        amount,
    })
}

/// Check only that a payload's CRC matches its contents
pub fn verify_payload(text: &str) -> Result<()> {
    parse_payload(text).map(|_| ())
}
