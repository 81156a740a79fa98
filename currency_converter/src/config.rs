use crate::converter::RateTableConverter;
use crate::source::{FileRateSource, S3RateSource};
use anyhow::{bail, Result};
use std::path::PathBuf;

pub const RATES_FILE: &str = "RATES_FILE";
pub const RATES_BUCKET: &str = "RATES_BUCKET";
pub const RATES_KEY: &str = "RATES_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateSourceConfig {
    File(PathBuf),
    S3 { bucket: String, key: String },
}

/// Cold start configuration, read from the function's environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rates: RateSourceConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// `RATES_FILE` wins over the S3 location when both are set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        if let Some(path) = var(RATES_FILE) {
            return Ok(Self {
                rates: RateSourceConfig::File(PathBuf::from(path)),
            });
        }

        let rates = match (var(RATES_BUCKET), var(RATES_KEY)) {
            (Some(bucket), Some(key)) => RateSourceConfig::S3 { bucket, key },
            (Some(_), None) => bail!("{} not set", RATES_KEY),
            (None, Some(_)) => bail!("{} not set", RATES_BUCKET),
            (None, None) => bail!(
                "No rate source configured, set {} or {} and {}",
                RATES_FILE,
                RATES_BUCKET,
                RATES_KEY
            ),
        };

        Ok(Self { rates })
    }

    pub async fn converter(&self) -> RateTableConverter {
        match &self.rates {
            RateSourceConfig::File(path) => RateTableConverter::new(FileRateSource::new(path)),
            RateSourceConfig::S3 { bucket, key } => {
                let s3 = shared::s3::client().await;
                RateTableConverter::new(S3RateSource::new(s3, bucket, key))
            }
        }
    }
}
