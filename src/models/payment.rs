use super::Amount;

/// A single payee transfer to encode as a QR Ph payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Payee mobile number, passed through as given
    pub phone: String,
    /// Payee display name (tag 59)
    pub merchant_name: String,
    /// Transaction amount (tag 54)
    pub amount: Amount,
}

impl PaymentRequest {
    /// Create a new payment request
    pub fn new(phone: impl Into<String>, merchant_name: impl Into<String>, amount: Amount) -> Self {
        Self {
            phone: phone.into(),
            merchant_name: merchant_name.into(),
            amount,
        }
    }
}
