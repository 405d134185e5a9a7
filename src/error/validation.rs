use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing request rate (set --rps or provide 'rps' in config).")]
    MissingRate,
    #[error("Missing target address (set --address or provide 'address' in config).")]
    MissingAddress,
    #[error("Address must not be empty.")]
    EmptyAddress,
    #[error("Invalid header format: '{value}'. Expected 'Name:Value'")]
    InvalidHeaderFormat { value: String },
    #[error("Header name must not be empty in '{value}'.")]
    EmptyHeaderName { value: String },
    #[error("Rate must not be empty.")]
    RateEmpty,
    #[error("Invalid rate '{value}'. Expected a positive decimal number.")]
    InvalidRateFormat { value: String },
    #[error("Rate '{value}' supports at most 3 fractional digits.")]
    RateTooPrecise { value: String },
    #[error("Rate overflow in '{value}'.")]
    RateOverflow { value: String },
    #[error("Rate must be > 0.")]
    RateZero,
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Value must be >= 1.")]
    ValueZero,
    #[error("Invalid number '{value}': {source}")]
    InvalidNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
