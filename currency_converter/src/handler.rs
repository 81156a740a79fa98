use crate::converter::Converter;
use crate::error::RequestError;
use crate::response::Response;
use lambda_runtime::{Error, LambdaEvent};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{error, info};

/// The part of an API Gateway proxy event this function reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationEvent {
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionRequest<'a> {
    pub amount: &'a str,
    pub from_currency: &'a str,
    pub to_currency: &'a str,
}

impl InvocationEvent {
    pub fn conversion_request(&self) -> Result<ConversionRequest<'_>, RequestError> {
        let params = self
            .query_string_parameters
            .as_ref()
            .filter(|params| !params.is_empty())
            .ok_or(RequestError::MissingQueryStringParameters)?;

        match (
            present(params, "amount"),
            present(params, "from_currency"),
            present(params, "to_currency"),
        ) {
            (Some(amount), Some(from_currency), Some(to_currency)) => Ok(ConversionRequest {
                amount,
                from_currency,
                to_currency,
            }),
            _ => Err(RequestError::MissingRequiredParameters),
        }
    }
}

// Empty values count as missing, "0" does not.
fn present<'a>(params: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    params
        .get(name)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

pub async fn func<C>(converter: &C, event: LambdaEvent<InvocationEvent>) -> Result<Response, Error>
where
    C: Converter + ?Sized,
{
    handle(converter, &event.payload).await
}

/// Maps one event to exactly one response. Only a body that fails to
/// serialize is returned as an error.
pub async fn handle<C>(converter: &C, event: &InvocationEvent) -> Result<Response, Error>
where
    C: Converter + ?Sized,
{
    let response = match convert(converter, event).await {
        Ok(result) => Response::result(result)?,
        Err(error) => Response::error(&error)?,
    };

    info!(
        status_code = response.status_code,
        body = %response.body,
        "Response returned"
    );
    Ok(response)
}

async fn convert<C>(converter: &C, event: &InvocationEvent) -> Result<f64, RequestError>
where
    C: Converter + ?Sized,
{
    let request = event.conversion_request()?;
    info!(
        amount = request.amount,
        from_currency = request.from_currency,
        to_currency = request.to_currency,
        "Input parameters"
    );

    match converter
        .convert(request.amount, request.from_currency, request.to_currency)
        .await
    {
        Ok(result) => {
            info!(result, "Currency result");
            Ok(result)
        }
        Err(e) => {
            error!(error = %e, "Error occurred");
            Err(e.into())
        }
    }
}
