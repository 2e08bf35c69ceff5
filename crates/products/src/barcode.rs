//! EAN-13-style barcode validation.
//!
//! A code is accepted only if, in order:
//!
//! 1. it is exactly 13 ASCII digits;
//! 2. positions 0..3 equal the configured country code;
//! 3. the manufacturer segment (starting at the configured offset, position 3 is
//!    skipped by default) equals the configured manufacturer code;
//! 4. `3 * (d1 + d3 + ... + d11) + (d2 + d4 + ... + d12) + d0` is a multiple of 10.
//!
//! The first failing step decides the error.

use serde::Deserialize;

use mercado_core::{DomainError, DomainResult};

pub const BARCODE_LEN: usize = 13;

pub const DEFAULT_COUNTRY_CODE: &str = "789";
pub const DEFAULT_MANUFACTURER_OFFSET: usize = 4;
pub const DEFAULT_MANUFACTURER_CODE: &str = "1375";

pub const ENV_COUNTRY: &str = "MERCADO_BARCODE_COUNTRY";
pub const ENV_MANUFACTURER_OFFSET: &str = "MERCADO_BARCODE_MANUFACTURER_OFFSET";
pub const ENV_MANUFACTURER: &str = "MERCADO_BARCODE_MANUFACTURER";

const COUNTRY_LEN: usize = 3;

/// Prefix rules a barcode must satisfy before its check digit is verified.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawBarcodeRules")]
pub struct BarcodeRules {
    country_code: String,
    manufacturer_offset: usize,
    manufacturer_code: String,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawBarcodeRules {
    country_code: String,
    manufacturer_offset: usize,
    manufacturer_code: String,
}

impl Default for RawBarcodeRules {
    fn default() -> Self {
        Self {
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            manufacturer_offset: DEFAULT_MANUFACTURER_OFFSET,
            manufacturer_code: DEFAULT_MANUFACTURER_CODE.to_string(),
        }
    }
}

impl TryFrom<RawBarcodeRules> for BarcodeRules {
    type Error = DomainError;

    fn try_from(raw: RawBarcodeRules) -> Result<Self, Self::Error> {
        BarcodeRules::new(raw.country_code, raw.manufacturer_offset, raw.manufacturer_code)
    }
}

impl Default for BarcodeRules {
    fn default() -> Self {
        Self {
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            manufacturer_offset: DEFAULT_MANUFACTURER_OFFSET,
            manufacturer_code: DEFAULT_MANUFACTURER_CODE.to_string(),
        }
    }
}

impl BarcodeRules {
    /// Build validated rules.
    ///
    /// The country code must be 3 digits and the manufacturer code 4 or 5
    /// digits, placed between the country prefix and the check digit.
    pub fn new(
        country_code: impl Into<String>,
        manufacturer_offset: usize,
        manufacturer_code: impl Into<String>,
    ) -> DomainResult<Self> {
        let country_code = country_code.into();
        let manufacturer_code = manufacturer_code.into();

        if country_code.len() != COUNTRY_LEN || !is_digits(&country_code) {
            return Err(DomainError::invalid_config(format!(
                "country code must be {COUNTRY_LEN} digits, got {country_code:?}"
            )));
        }
        if !(4..=5).contains(&manufacturer_code.len()) || !is_digits(&manufacturer_code) {
            return Err(DomainError::invalid_config(format!(
                "manufacturer code must be 4 or 5 digits, got {manufacturer_code:?}"
            )));
        }
        let end = manufacturer_offset
            .checked_add(manufacturer_code.len())
            .filter(|end| manufacturer_offset >= COUNTRY_LEN && *end <= BARCODE_LEN - 1);
        if end.is_none() {
            return Err(DomainError::invalid_config(format!(
                "manufacturer segment at offset {manufacturer_offset} (len {}) must lie within {COUNTRY_LEN}..{}",
                manufacturer_code.len(),
                BARCODE_LEN - 1
            )));
        }

        Ok(Self {
            country_code,
            manufacturer_offset,
            manufacturer_code,
        })
    }

    /// Load rules from `MERCADO_BARCODE_*` environment variables.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`BarcodeRules::from_env`] with an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<Self> {
        let country_code = lookup(ENV_COUNTRY).unwrap_or_else(|| DEFAULT_COUNTRY_CODE.to_string());
        let manufacturer_code =
            lookup(ENV_MANUFACTURER).unwrap_or_else(|| DEFAULT_MANUFACTURER_CODE.to_string());

        let manufacturer_offset = match lookup(ENV_MANUFACTURER_OFFSET) {
            None => DEFAULT_MANUFACTURER_OFFSET,
            Some(raw) => raw.trim().parse::<usize>().unwrap_or_else(|_| {
                tracing::warn!(
                    value = %raw,
                    "{ENV_MANUFACTURER_OFFSET} is not a number; using default {DEFAULT_MANUFACTURER_OFFSET}"
                );
                DEFAULT_MANUFACTURER_OFFSET
            }),
        };

        Self::new(country_code, manufacturer_offset, manufacturer_code)
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn manufacturer_offset(&self) -> usize {
        self.manufacturer_offset
    }

    pub fn manufacturer_code(&self) -> &str {
        &self.manufacturer_code
    }

    /// Run every barcode check in order, stopping at the first failure.
    pub fn validate(&self, code: &str) -> DomainResult<()> {
        if code.len() != BARCODE_LEN || !is_digits(code) {
            return Err(DomainError::InvalidBarcodeFormat);
        }

        // All-ASCII from here on, so byte slicing is char slicing.
        if &code[..COUNTRY_LEN] != self.country_code {
            return Err(DomainError::InvalidCountry);
        }

        let segment_end = self.manufacturer_offset + self.manufacturer_code.len();
        if &code[self.manufacturer_offset..segment_end] != self.manufacturer_code {
            return Err(DomainError::InvalidManufacturerCode);
        }

        if weighted_sum(code.as_bytes()) % 10 != 0 {
            return Err(DomainError::InvalidCheckDigit);
        }

        Ok(())
    }
}

/// Compute the check digit completing a 12-digit payload.
pub fn check_digit(payload: &str) -> DomainResult<u8> {
    if payload.len() != BARCODE_LEN - 1 || !is_digits(payload) {
        return Err(DomainError::InvalidBarcodeFormat);
    }
    let sum = weighted_sum(payload.as_bytes());
    Ok(((10 - sum % 10) % 10) as u8)
}

/// Digits at odd positions weigh 3, even positions weigh 1.
fn weighted_sum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 1 { 3 * d } else { d }
        })
        .sum()
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}
