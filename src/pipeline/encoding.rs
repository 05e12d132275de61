//! Wire encodings used by the ledger and their display-side decoders.
//!
//! Currency and tax are fixed-point integers scaled by 100, shift boundaries are
//! minutes since midnight, timestamps are Unix seconds, small enums are integers
//! and addresses are 40-hex strings with an all-zero sentinel for "unset".

use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed-point scale for currency and tax fields.
pub const AMOUNT_SCALE: u32 = 2;

/// Address sentinel meaning "no value".
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Decodes a x100 fixed-point integer into a decimal amount.
#[must_use]
pub fn decode_amount(value: i64) -> Decimal {
    Decimal::new(value, AMOUNT_SCALE)
}

/// Encodes a decimal amount for submission, rounding half away from zero to cents.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] when the scaled value does not fit an `i64`.
pub fn encode_amount(amount: Decimal) -> Result<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|scaled| scaled.to_i64())
        .ok_or_else(|| Error::InvalidAmount {
            amount: amount.to_string(),
        })
}

/// Formats minutes since midnight as `HH:MM`.
///
/// Values outside a single day are not wrapped; `1500` renders as `25:00`.
#[must_use]
pub fn format_time(minutes: i32) -> String {
    let minutes = minutes.max(0);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parses an `HH:MM` string back into minutes since midnight.
///
/// # Errors
/// Returns [`Error::InvalidTime`] for malformed input or values past `23:59`.
pub fn parse_time(value: &str) -> Result<i32> {
    let invalid = || Error::InvalidTime {
        value: value.to_string(),
    };

    let (hours, minutes) = value.trim().split_once(':').ok_or_else(invalid)?;
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;

    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(invalid());
    }

    Ok(hours * 60 + minutes)
}

/// Converts Unix seconds into a UTC datetime via milliseconds.
///
/// Returns `None` for values chrono cannot represent.
#[must_use]
pub fn timestamp_to_datetime(seconds: i64) -> Option<DateTime<Utc>> {
    seconds
        .checked_mul(1000)
        .and_then(DateTime::<Utc>::from_timestamp_millis)
}

/// Current time as Unix seconds, the encoding every ledger timestamp uses.
#[must_use]
pub fn now_seconds() -> i64 {
    Utc::now().timestamp()
}

/// Formats an amount as Rupiah, e.g. `Rp 1.234.567,89`.
#[must_use]
pub fn format_rupiah(amount: Decimal) -> String {
    let mut amount = amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(AMOUNT_SCALE);

    let mantissa = amount.mantissa();
    let sign = if mantissa < 0 { "-" } else { "" };
    let cents = mantissa.unsigned_abs();
    let units = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("{sign}Rp {grouped},{fraction:02}")
}

/// Gender as stored on member records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    LakiLaki,
    Perempuan,
    Unknown,
}

impl Gender {
    /// Maps the wire integer to a gender; unknown codes do not fail.
    #[must_use]
    pub const fn from_wire(value: i16) -> Self {
        match value {
            0 => Self::LakiLaki,
            1 => Self::Perempuan,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn to_wire(self) -> i16 {
        match self {
            Self::LakiLaki => 0,
            Self::Perempuan => 1,
            Self::Unknown => -1,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LakiLaki => "Laki-laki",
            Self::Perempuan => "Perempuan",
            Self::Unknown => "Tidak diketahui",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A normalized (lowercase, `0x`-prefixed) 40-hex wallet address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Parses and normalizes an address.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the input is not `0x` followed by 40 hex digits.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let hex = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::Config {
                message: format!("Invalid wallet address: {value}"),
            });
        }

        Ok(Self(format!("0x{}", hex.to_ascii_lowercase())))
    }

    /// Decodes an address field from a ledger record. The zero sentinel,
    /// empty strings and malformed values all mean "no address".
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        Self::parse(value).ok().filter(|address| !address.is_zero())
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == ZERO_ADDRESS
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for table cells: `0x1234…abcd`.
    #[must_use]
    pub fn short(&self) -> String {
        format!("{}…{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_decode_amount_divides_by_hundred() {
        assert_eq!(decode_amount(1_000_050), Decimal::from_str("10000.50").unwrap());
        assert_eq!(decode_amount(0), Decimal::ZERO);
        assert_eq!(decode_amount(-125), Decimal::from_str("-1.25").unwrap());
    }

    #[test]
    fn test_amount_round_trip_has_no_drift() {
        for value in [0_i64, 1, 99, 100, 101, 1_234_567, 999_999_999, -4_550, 10_000_000_001] {
            let displayed = decode_amount(value);
            assert_eq!(encode_amount(displayed).unwrap(), value, "value {value}");
        }
    }

    #[test]
    fn test_encode_amount_rounds_sub_cent_input() {
        assert_eq!(encode_amount(Decimal::from_str("12.345").unwrap()).unwrap(), 1235);
        assert_eq!(encode_amount(Decimal::from_str("12.344").unwrap()).unwrap(), 1234);
        assert_eq!(encode_amount(Decimal::from_str("-0.005").unwrap()).unwrap(), -1);
    }

    #[test]
    fn test_encode_amount_overflow_is_an_error() {
        let result = encode_amount(Decimal::MAX);
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(75), "01:15");
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(1439), "23:59");
        assert_eq!(format_time(5), "00:05");
    }

    #[test]
    fn test_parse_time_inverts_format_time() {
        for minutes in [0, 75, 480, 1439] {
            assert_eq!(parse_time(&format_time(minutes)).unwrap(), minutes);
        }
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        for input in [
            "",
            "12",
            "24:00",
            "10:60",
            "ab:cd",
            "-1:00",
            "99999999:00",
            "00:99999999",
        ] {
            assert!(parse_time(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_timestamp_to_datetime() {
        let dt = timestamp_to_datetime(1_700_000_000).unwrap();
        assert_eq!(dt.timestamp_millis(), 1_700_000_000_000);
        assert!(timestamp_to_datetime(i64::MAX).is_none());
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(decode_amount(123_456_789)), "Rp 1.234.567,89");
        assert_eq!(format_rupiah(decode_amount(50)), "Rp 0,50");
        assert_eq!(format_rupiah(decode_amount(100_000)), "Rp 1.000,00");
        assert_eq!(format_rupiah(decode_amount(-250_000)), "-Rp 2.500,00");
    }

    #[test]
    fn test_gender_from_wire() {
        assert_eq!(Gender::from_wire(0), Gender::LakiLaki);
        assert_eq!(Gender::from_wire(1), Gender::Perempuan);
        assert_eq!(Gender::from_wire(7).label(), "Tidak diketahui");
    }

    #[test]
    fn test_wallet_zero_sentinel_is_no_value() {
        assert!(WalletAddress::from_wire(ZERO_ADDRESS).is_none());
        assert!(WalletAddress::from_wire("").is_none());

        let address = WalletAddress::from_wire("0xABCDEF0123456789abcdef0123456789ABCDEF01").unwrap();
        assert_eq!(address.as_str(), "0xabcdef0123456789abcdef0123456789abcdef01");
        assert_eq!(address.short(), "0xabcd…ef01");
    }

    #[test]
    fn test_wallet_parse_rejects_wrong_length() {
        assert!(WalletAddress::parse("0x1234").is_err());
        assert!(WalletAddress::parse("0xzz00000000000000000000000000000000000000").is_err());
    }
}
