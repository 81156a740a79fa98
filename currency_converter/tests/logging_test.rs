use async_trait::async_trait;
use currency_converter::converter::Converter;
use currency_converter::error::ConversionError;
use currency_converter::handler::{handle, InvocationEvent};
use serde_json::{json, Value};
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn lines(&self) -> Vec<Value> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

struct UnreachableRates;

#[async_trait]
impl Converter for UnreachableRates {
    async fn convert(&self, _: &str, _: &str, _: &str) -> Result<f64, ConversionError> {
        Err(ConversionError::Source(anyhow::anyhow!("connection refused")))
    }
}

struct Halving;

#[async_trait]
impl Converter for Halving {
    async fn convert(&self, amount: &str, _: &str, _: &str) -> Result<f64, ConversionError> {
        Ok(amount.parse::<f64>().unwrap() / 2.0)
    }
}

fn event() -> InvocationEvent {
    serde_json::from_value(json!({
        "queryStringParameters": {"amount": "10", "from_currency": "USD", "to_currency": "EUR"}
    }))
    .unwrap()
}

#[tokio::test]
async fn failure_detail_is_logged_not_returned() {
    let captured = Captured::default();
    let _guard = tracing::subscriber::set_default(shared::log::subscriber(captured.clone()));

    let response = handle(&UnreachableRates, &event()).await.unwrap();
    assert_eq!(response.status_code, 500);
    assert!(!response.body.contains("connection refused"));

    let lines = captured.lines();
    let error = lines
        .iter()
        .find(|line| line["level"] == "ERROR")
        .expect("error line");
    assert_eq!(error["fields"]["message"], "Error occurred");
    assert!(error["fields"]["error"]
        .as_str()
        .unwrap()
        .contains("connection refused"));
}

#[tokio::test]
async fn successful_invocation_logs_each_step() {
    let captured = Captured::default();
    let _guard = tracing::subscriber::set_default(shared::log::subscriber(captured.clone()));

    let response = handle(&Halving, &event()).await.unwrap();
    assert_eq!(response.body, r#"{"result": 5.0}"#);

    let lines = captured.lines();
    let messages: Vec<&str> = lines
        .iter()
        .map(|line| line["fields"]["message"].as_str().unwrap())
        .collect();
    assert_eq!(
        messages,
        vec!["Input parameters", "Currency result", "Response returned"]
    );

    assert_eq!(lines[0]["fields"]["amount"], "10");
    assert_eq!(lines[0]["fields"]["from_currency"], "USD");
    assert_eq!(lines[0]["fields"]["to_currency"], "EUR");
    assert_eq!(lines[1]["fields"]["result"], 5.0);
    assert_eq!(lines[2]["fields"]["status_code"], 200);
    assert!(lines.iter().all(|line| line.get("timestamp").is_none()));
}
