use crate::error::RequestError;
use serde::ser::Error as _;
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

/// HTTP-shaped result handed back to API Gateway.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

#[derive(Serialize)]
struct ResultBody {
    result: f64,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl Response {
    pub fn result(result: f64) -> serde_json::Result<Self> {
        Ok(Self {
            status_code: 200,
            body: to_body(&ResultBody { result })?,
        })
    }

    pub fn error(error: &RequestError) -> serde_json::Result<Self> {
        Ok(Self {
            status_code: error.status_code(),
            body: to_body(&ErrorBody {
                error: &error.public_message(),
            })?,
        })
    }
}

/// Serializes with a space after every `:` and `,`, matching the bodies
/// existing clients were written against.
pub fn to_body<T>(value: &T) -> serde_json::Result<String>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut serializer)?;

    String::from_utf8(buf).map_err(serde_json::Error::custom)
}

struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConversionError;
    use serde_json::json;

    #[test]
    fn bodies_are_spaced() {
        let body = to_body(&json!({"a": [1, 2], "b": {"c": null}})).unwrap();
        assert_eq!(body, r#"{"a": [1, 2], "b": {"c": null}}"#);
    }

    #[test]
    fn result_response() {
        let response = Response::result(9.25).unwrap();
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"statusCode": 200, "body": "{\"result\": 9.25}"})
        );
    }

    #[test]
    fn whole_results_keep_a_fraction() {
        assert_eq!(Response::result(10.0).unwrap().body, r#"{"result": 10.0}"#);
    }

    #[test]
    fn error_responses() {
        let response = Response::error(&RequestError::MissingQueryStringParameters).unwrap();
        assert_eq!(response.status_code, 400);
        assert_eq!(response.body, r#"{"error": "Missing query string parameters"}"#);

        let response = Response::error(&RequestError::Conversion(
            ConversionError::InvalidAmount("ten".to_string()),
        ))
        .unwrap();
        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, r#"{"error": "Internal server error"}"#);
    }
}
