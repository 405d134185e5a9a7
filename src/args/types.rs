use std::fmt;
use std::num::{NonZeroU64, NonZeroUsize};

use crate::error::ValidationError;

/// Millirequests per request; rates keep three fractional digits.
pub(crate) const RATE_SCALE: u64 = 1_000;
const RATE_FRACTION_DIGITS: usize = 3;

/// Sustained request rate in requests per second, stored as a fixed-point
/// count of millirequests per second so admission math stays integral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestRate(NonZeroU64);

impl RequestRate {
    /// Builds a rate from millirequests per second.
    ///
    /// # Errors
    ///
    /// Returns an error when `millis` is zero.
    pub fn from_millis(millis: u64) -> Result<Self, ValidationError> {
        NonZeroU64::new(millis)
            .map(RequestRate)
            .ok_or(ValidationError::RateZero)
    }

    /// Builds a rate from whole requests per second.
    ///
    /// # Errors
    ///
    /// Returns an error when `per_sec` is zero or overflows.
    pub fn per_second(per_sec: u64) -> Result<Self, ValidationError> {
        let millis = per_sec
            .checked_mul(RATE_SCALE)
            .ok_or_else(|| ValidationError::RateOverflow {
                value: per_sec.to_string(),
            })?;
        Self::from_millis(millis)
    }

    #[must_use]
    pub const fn millis_per_sec(self) -> u64 {
        self.0.get()
    }
}

impl std::str::FromStr for RequestRate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.is_empty() {
            return Err(ValidationError::RateEmpty);
        }
        let invalid = || ValidationError::InvalidRateFormat {
            value: value.to_owned(),
        };

        let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().all(|byte| byte.is_ascii_digit())
            || !fraction.bytes().all(|byte| byte.is_ascii_digit())
        {
            return Err(invalid());
        }
        let fraction = fraction.trim_end_matches('0');
        if fraction.len() > RATE_FRACTION_DIGITS {
            return Err(ValidationError::RateTooPrecise {
                value: value.to_owned(),
            });
        }

        let overflow = || ValidationError::RateOverflow {
            value: value.to_owned(),
        };
        let whole_value: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().ok().ok_or_else(overflow)?
        };
        let fraction_value: u64 = if fraction.is_empty() {
            0
        } else {
            format!("{fraction:0<RATE_FRACTION_DIGITS$}")
                .parse()
                .ok()
                .ok_or_else(invalid)?
        };

        let millis = whole_value
            .checked_mul(RATE_SCALE)
            .and_then(|scaled| scaled.checked_add(fraction_value))
            .ok_or_else(overflow)?;
        Self::from_millis(millis)
    }
}

impl fmt::Display for RequestRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self.millis_per_sec();
        let whole = millis.checked_div(RATE_SCALE).unwrap_or(0);
        let fraction = millis.checked_rem(RATE_SCALE).unwrap_or(0);
        if fraction == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{fraction:03}");
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveUsize(NonZeroUsize);

impl PositiveUsize {
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for PositiveUsize {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(value)
            .map(PositiveUsize)
            .ok_or(ValidationError::ValueZero)
    }
}

impl std::str::FromStr for PositiveUsize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: usize = s
            .trim()
            .parse()
            .map_err(|err| ValidationError::InvalidNumber {
                value: s.to_owned(),
                source: err,
            })?;
        PositiveUsize::try_from(value)
    }
}

impl From<PositiveUsize> for usize {
    fn from(value: PositiveUsize) -> Self {
        value.get()
    }
}
