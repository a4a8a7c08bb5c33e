use thiserror::Error;

/// Failures while building, parsing or verifying a QR Ph payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// A required text field was empty.
    #[error("field '{0}' must not be empty")]
    EmptyField(&'static str),

    /// The amount was negative, NaN or infinite.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// A TLV value does not fit the two-digit length field.
    #[error("value for tag {tag} is {len} characters long (max 99)")]
    ValueTooLong {
        /// Tag of the offending record
        tag: String,
        /// Rendered length of the value
        len: usize,
    },

    /// A tag was not exactly two ASCII digits.
    #[error("invalid tag '{0}': expected two decimal digits")]
    InvalidTag(String),

    /// A length field was not two decimal digits.
    #[error("invalid length field '{field}' at offset {offset}")]
    InvalidLength {
        /// Raw length text
        field: String,
        /// Character offset of the record
        offset: usize,
    },

    /// The input ended inside a record.
    #[error("payload truncated at offset {0}")]
    Truncated(usize),

    /// A mandatory record is absent.
    #[error("missing tag {0}")]
    MissingTag(&'static str),

    /// The CRC record is malformed or not the last record.
    #[error("malformed CRC record: {0}")]
    MalformedCrc(String),

    /// The CRC value does not match the payload contents.
    #[error("checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch {
        /// Checksum recomputed over the payload
        expected: String,
        /// Checksum carried by the payload
        found: String,
    },
}

/// Result alias used across the encoder and decoder.
pub type Result<T> = std::result::Result<T, PayloadError>;

/// Failures while loading the tier catalog or computing a pricing snapshot.
#[derive(Debug, Error)]
pub enum PricingError {
    /// No tier with this id in the catalog.
    #[error("unknown pricing tier: {0}")]
    UnknownTier(String),

    /// The add-on label is not offered by the selected tier.
    #[error("add-on '{addon}' is not offered for tier '{tier}'")]
    UnknownAddon {
        /// Selected tier id
        tier: String,
        /// Requested add-on label
        addon: String,
    },

    /// The tier is quoted on request.
    #[error("tier '{0}' has no fixed price and cannot be paid by QR")]
    NotPayable(String),

    /// The total does not fit in centavos.
    #[error("total for tier '{0}' overflows")]
    Overflow(String),

    /// Payload encoding failed.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// File I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The catalog is not valid JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Failures while rendering a payload as a QR symbol.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The payload does not fit any QR version.
    #[error("cannot build QR symbol: {0}")]
    Qr(#[from] qrcode::types::QrError),

    /// Image encoding or I/O failed.
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Failures while reading batch request files.
#[derive(Debug, Error)]
pub enum ToolsError {
    /// A request line could not be parsed.
    #[error("line {line}: {reason}")]
    InvalidLine {
        /// 1-based line number
        line: usize,
        /// What was wrong
        reason: String,
    },

    /// Payload encoding failed.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// File I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
