use crate::error::ConversionError;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::str::FromStr;

/// Every rate in a table is quoted as units of currency per one unit of this.
pub const BASE_CURRENCY: &str = "EUR";

const MISSING_RATE: &str = "N/A";

/// Reference rates in the ECB CSV layout.
///
/// ```text
/// Date,USD,JPY,GBP,
/// 2024-10-04,1.1029,161.64,0.84013,
/// 2024-10-03,1.1035,N/A,0.84113,
/// ```
///
/// The base currency is implicit and has a rate of 1 on every date.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: BTreeMap<NaiveDate, HashMap<String, f64>>,
    currencies: BTreeSet<String>,
}

impl RateTable {
    pub fn parse(text: &str) -> Result<Self, ConversionError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?;
        if !headers
            .get(0)
            .is_some_and(|first| first.eq_ignore_ascii_case("date"))
        {
            return Err(ConversionError::MalformedTable(
                "first column must be Date".to_string(),
            ));
        }
        let codes: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

        let mut table = RateTable::default();
        for record in reader.records() {
            let record = record?;
            let date = match record.get(0) {
                Some(cell) if !cell.is_empty() => parse_date(cell)?,
                _ => continue,
            };

            let day = table.rates.entry(date).or_default();
            for (code, cell) in codes.iter().zip(record.iter().skip(1)) {
                if code.is_empty() || cell.is_empty() || cell == MISSING_RATE {
                    continue;
                }
                day.insert(code.clone(), parse_rate(code, cell, date)?);
                table.currencies.insert(code.clone());
            }
        }

        if table.rates.is_empty() {
            return Err(ConversionError::EmptyRateTable);
        }
        table.currencies.insert(BASE_CURRENCY.to_string());

        Ok(table)
    }

    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.currencies.iter().map(String::as_str)
    }

    pub fn supports(&self, currency: &str) -> bool {
        self.currencies.contains(currency)
    }

    /// Units of `currency` per one unit of the base currency on `date`.
    pub fn rate(&self, currency: &str, date: NaiveDate) -> Option<f64> {
        let day = self.rates.get(&date)?;
        if currency == BASE_CURRENCY {
            return Some(1.0);
        }
        day.get(currency).copied()
    }

    /// Most recent date on which `currency` has a rate.
    pub fn latest_date(&self, currency: &str) -> Option<NaiveDate> {
        self.rates
            .iter()
            .rev()
            .find(|(_, day)| currency == BASE_CURRENCY || day.contains_key(currency))
            .map(|(date, _)| *date)
    }

    /// Converts at the latest rate of `from_currency`; `to_currency` must be
    /// quoted on that same date.
    pub fn convert(
        &self,
        amount: f64,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<f64, ConversionError> {
        for currency in [from_currency, to_currency] {
            if !self.supports(currency) {
                return Err(ConversionError::UnsupportedCurrency(currency.to_string()));
            }
        }
        if from_currency == to_currency {
            return Ok(amount);
        }

        let date = self
            .latest_date(from_currency)
            .ok_or_else(|| ConversionError::NoRates(from_currency.to_string()))?;
        let from_rate = self.rate_on(from_currency, date)?;
        let to_rate = self.rate_on(to_currency, date)?;

        Ok(amount / from_rate * to_rate)
    }

    fn rate_on(&self, currency: &str, date: NaiveDate) -> Result<f64, ConversionError> {
        self.rate(currency, date)
            .ok_or_else(|| ConversionError::RateNotFound {
                currency: currency.to_string(),
                date,
            })
    }
}

impl FromStr for RateTable {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RateTable::parse(s)
    }
}

// Historical files use ISO dates, the daily file spells the month out.
fn parse_date(cell: &str) -> Result<NaiveDate, ConversionError> {
    NaiveDate::parse_from_str(cell, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(cell, "%d %B %Y"))
        .map_err(|_| ConversionError::MalformedTable(format!("invalid date {:?}", cell)))
}

fn parse_rate(code: &str, cell: &str, date: NaiveDate) -> Result<f64, ConversionError> {
    match cell.parse::<f64>() {
        Ok(rate) if rate.is_finite() && rate > 0.0 => Ok(rate),
        _ => Err(ConversionError::MalformedTable(format!(
            "invalid {} rate {:?} on {}",
            code, cell, date
        ))),
    }
}
