use chrono::NaiveDate;
use thiserror::Error;

/// Anything that can go wrong while converting an amount.
///
/// None of these reach the caller; the handler logs them and answers with a
/// generic internal error.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("{0} is not a supported currency")]
    UnsupportedCurrency(String),
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),
    #[error("{currency} has no rate on {date}")]
    RateNotFound { currency: String, date: NaiveDate },
    #[error("{0} has no rates")]
    NoRates(String),
    #[error("Rate table is empty")]
    EmptyRateTable,
    #[error("Rate table is malformed: {0}")]
    MalformedTable(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Rate source unavailable: {0:#}")]
    Source(anyhow::Error),
}

/// Outcome of a rejected invocation.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Missing query string parameters")]
    MissingQueryStringParameters,
    // The duplicated field name is part of the published response contract.
    #[error("Missing required parameters: amount, from_currency, or from_currency")]
    MissingRequiredParameters,
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

impl RequestError {
    pub fn status_code(&self) -> u16 {
        match self {
            RequestError::MissingQueryStringParameters
            | RequestError::MissingRequiredParameters => 400,
            RequestError::Conversion(_) => 500,
        }
    }

    /// Message exposed in the response body.
    pub fn public_message(&self) -> String {
        match self {
            RequestError::Conversion(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_client_errors() {
        assert_eq!(RequestError::MissingQueryStringParameters.status_code(), 400);
        assert_eq!(RequestError::MissingRequiredParameters.status_code(), 400);
        assert_eq!(
            RequestError::MissingRequiredParameters.public_message(),
            "Missing required parameters: amount, from_currency, or from_currency"
        );
    }

    #[test]
    fn conversion_detail_is_hidden() {
        let error = RequestError::from(ConversionError::UnsupportedCurrency("XXX".into()));
        assert_eq!(error.status_code(), 500);
        assert_eq!(error.public_message(), "Internal server error");
        assert_eq!(error.to_string(), "XXX is not a supported currency");
    }
}
