use std::time::Duration;

use serde::Deserialize;

use crate::args::{RequestRate, parse_duration_arg};
use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub rps: Option<RateValue>,
    #[serde(alias = "url")]
    pub address: Option<String>,
    pub authentication: Option<String>,
    pub headers: Option<Vec<String>>,
    pub duration: Option<DurationValue>,
    pub timeout: Option<DurationValue>,
    pub max_in_flight: Option<usize>,
}

/// A rate written either as a number (`rps = 12.5`) or a string (`rps = "12.5"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RateValue {
    Number(f64),
    Text(String),
}

impl RateValue {
    pub(crate) fn to_rate(&self) -> Result<RequestRate, ValidationError> {
        match self {
            RateValue::Number(value) => value.to_string().parse(),
            RateValue::Text(text) => text.parse(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }
}
