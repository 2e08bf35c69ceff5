//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a terminal failure reported to the immediate caller. Callers
/// match on the variant to learn which rule failed; the message is for humans.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Product price is zero, negative or not a number.
    #[error("invalid price: must be greater than zero")]
    InvalidPrice,

    #[error("invalid name: must not be empty")]
    InvalidName,

    #[error("invalid manufacturer: must not be empty")]
    InvalidManufacturer,

    /// Barcode is not exactly 13 ASCII digits.
    #[error("invalid barcode: expected 13 digits")]
    InvalidBarcodeFormat,

    /// Barcode country prefix does not match the configured country code.
    #[error("invalid barcode country code")]
    InvalidCountry,

    /// Barcode manufacturer segment does not match the configured code.
    #[error("invalid barcode manufacturer code")]
    InvalidManufacturerCode,

    /// Weighted digit sum of the barcode is not a multiple of ten.
    #[error("invalid barcode check digit")]
    InvalidCheckDigit,

    /// No entity is stored under the requested identity.
    #[error("not found: {0}")]
    NotFound(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Rules or settings were rejected while loading configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The backing store cannot serve requests (e.g. a poisoned lock).
    #[error("store unavailable")]
    StoreUnavailable,
}

impl DomainError {
    pub fn not_found(id: impl core::fmt::Debug) -> Self {
        Self::NotFound(format!("{id:?}"))
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// True for failures raised by field validation (as opposed to lookups or
    /// store availability).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidPrice
                | DomainError::InvalidName
                | DomainError::InvalidManufacturer
                | DomainError::InvalidBarcodeFormat
                | DomainError::InvalidCountry
                | DomainError::InvalidManufacturerCode
                | DomainError::InvalidCheckDigit
        )
    }
}
