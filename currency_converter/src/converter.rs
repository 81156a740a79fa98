use crate::error::ConversionError;
use crate::source::RateSource;
use async_trait::async_trait;

/// Converts an amount between two currency codes.
///
/// Inputs are passed through exactly as the caller supplied them; parsing the
/// amount and checking the codes is the implementation's job.
#[async_trait]
pub trait Converter: Send + Sync {
    async fn convert(
        &self,
        amount: &str,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<f64, ConversionError>;
}

/// Converter backed by a reference-rate table loaded from a [`RateSource`].
pub struct RateTableConverter {
    source: Box<dyn RateSource>,
}

impl RateTableConverter {
    pub fn new(source: impl RateSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }
}

#[async_trait]
impl Converter for RateTableConverter {
    async fn convert(
        &self,
        amount: &str,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<f64, ConversionError> {
        let value = parse_amount(amount)?;
        let table = self.source.load().await?;
        let result = table.convert(value, from_currency, to_currency)?;

        if !result.is_finite() {
            return Err(ConversionError::InvalidAmount(amount.to_string()));
        }

        Ok(result)
    }
}

pub fn parse_amount(raw: &str) -> Result<f64, ConversionError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ConversionError::InvalidAmount(raw.to_string())),
    }
}
