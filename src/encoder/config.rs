use super::crc::CrcInput;
use std::sync::OnceLock;
use tracing::warn;

/// Default provider GUID placed under tag 26, sub-tag 00
pub const DEFAULT_PROVIDER_GUID: &str = "com.p2pqrpay";
/// Default merchant city (tag 60)
pub const DEFAULT_MERCHANT_CITY: &str = "Manila";

fn parse_env_string(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_crc_input(name: &str, default: CrcInput) -> CrcInput {
    match std::env::var(name) {
        Ok(value) => value.parse().unwrap_or_else(|err| {
            warn!(var = name, %err, "falling back to {default}");
            default
        }),
        Err(_) => default,
    }
}

/// Settings that vary between deployments of the encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Provider identifier under tag 26
    pub provider_guid: String,
    /// Merchant city (tag 60)
    pub merchant_city: String,
    /// Units fed into the CRC
    pub crc_input: CrcInput,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            provider_guid: DEFAULT_PROVIDER_GUID.to_string(),
            merchant_city: DEFAULT_MERCHANT_CITY.to_string(),
            crc_input: CrcInput::default(),
        }
    }
}

static ENV_CONFIG: OnceLock<EncoderConfig> = OnceLock::new();

impl EncoderConfig {
    /// Configuration from `QRPH_PROVIDER_GUID`, `QRPH_MERCHANT_CITY` and
    /// `QRPH_CRC_INPUT`, read once per process
    pub fn from_env() -> Self {
        ENV_CONFIG
            .get_or_init(|| Self {
                provider_guid: parse_env_string("QRPH_PROVIDER_GUID", DEFAULT_PROVIDER_GUID),
                merchant_city: parse_env_string("QRPH_MERCHANT_CITY", DEFAULT_MERCHANT_CITY),
                crc_input: parse_env_crc_input("QRPH_CRC_INPUT", CrcInput::default()),
            })
            .clone()
    }

    /// Override the provider GUID
    pub fn with_provider_guid(mut self, guid: impl Into<String>) -> Self {
        self.provider_guid = guid.into();
        self
    }

    /// Override the merchant city
    pub fn with_merchant_city(mut self, city: impl Into<String>) -> Self {
        self.merchant_city = city.into();
        self
    }

    /// Override the CRC input units
    pub fn with_crc_input(mut self, input: CrcInput) -> Self {
        self.crc_input = input;
        self
    }
}
