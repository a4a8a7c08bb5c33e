//! Core data structures

/// Peso amounts held in centavos
pub mod amount;
/// Payment request value object
pub mod payment;

pub use amount::Amount;
pub use payment::PaymentRequest;
