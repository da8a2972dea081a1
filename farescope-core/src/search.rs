use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// Flight search input as it arrives from the UI form. All fields are kept
/// in their transport shape (strings) and checked by [`SearchParams::validated`]
/// before any upstream call is made.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    pub origin: String,
    pub destination: String,
    /// Departure date, ISO calendar date (`YYYY-MM-DD`).
    pub date: String,
    #[serde(default = "default_adults")]
    pub adults: String,
    #[serde(rename = "returnDate", skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

fn default_adults() -> String {
    "1".to_string()
}

impl SearchParams {
    /// Check every invariant and return a normalized copy (IATA codes
    /// uppercased, result cap defaulted). `today` is injected so callers and
    /// tests control what "in the past" means.
    pub fn validated(&self, today: NaiveDate) -> CoreResult<SearchParams> {
        let origin = normalize_iata("origin", &self.origin)?;
        let destination = normalize_iata("destination", &self.destination)?;

        if origin == destination {
            return Err(CoreError::ValidationError(
                "origin and destination must differ".to_string(),
            ));
        }

        let date = parse_date("date", &self.date)?;
        if date < today {
            return Err(CoreError::ValidationError(format!(
                "date {} is in the past",
                self.date
            )));
        }

        let return_date = match &self.return_date {
            Some(raw) => {
                let parsed = parse_date("returnDate", raw)?;
                if parsed < date {
                    return Err(CoreError::ValidationError(
                        "returnDate must not be before date".to_string(),
                    ));
                }
                Some(raw.clone())
            }
            None => None,
        };

        match self.adults.parse::<u32>() {
            Ok(n) if n >= 1 => {}
            _ => {
                return Err(CoreError::ValidationError(format!(
                    "adults must be a positive integer, got {:?}",
                    self.adults
                )))
            }
        }

        Ok(SearchParams {
            origin,
            destination,
            date: self.date.clone(),
            adults: self.adults.clone(),
            return_date,
            max: Some(self.max.clone().unwrap_or_else(|| "20".to_string())),
        })
    }
}

fn normalize_iata(field: &str, raw: &str) -> CoreResult<String> {
    let code = raw.trim().to_ascii_uppercase();
    if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(code)
    } else {
        Err(CoreError::ValidationError(format!(
            "{field} must be a 3-letter IATA code, got {raw:?}"
        )))
    }
}

fn parse_date(field: &str, raw: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        CoreError::ValidationError(format!("{field} must be YYYY-MM-DD, got {raw:?}"))
    })
}
