//! HTTP tabular store backend.
//!
//! Talks to a Sheets-v4-style REST API: `GET values/{range}` to read,
//! `POST values/{range}:append` to add rows, `PUT values/{range}` to
//! overwrite. All writes use user-entered input semantics so numeric-looking
//! strings stay human-readable in the sheet. Authentication is an opaque
//! bearer token supplied by the externally managed sign-in flow.

use crate::{SheetsError, SheetsInterface};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Value-input mode for all writes. "USER_ENTERED" keeps cell text exactly
/// as a human typing it would; changing this reinterprets existing sheets.
const VALUE_INPUT_OPTION: &str = "USER_ENTERED";

/// Wire payload for range reads and writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueRange {
	/// The range the values cover, echoed by the API on reads.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub range: Option<String>,
	/// Row-major cell values; absent entirely when the range is empty.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub values: Option<Vec<Vec<String>>>,
}

/// HTTP store implementation over a shared spreadsheet.
pub struct HttpSheets {
	client: reqwest::Client,
	base_url: String,
	spreadsheet_id: String,
	token: String,
}

impl HttpSheets {
	/// Creates a client for one spreadsheet.
	///
	/// The timeout applies per individual request so a slow single attempt
	/// does not consume the caller's whole retry budget.
	pub fn new(
		base_url: impl Into<String>,
		spreadsheet_id: impl Into<String>,
		token: impl Into<String>,
		timeout: Duration,
	) -> Result<Self, SheetsError> {
		let client = reqwest::Client::builder()
			.timeout(timeout)
			.build()
			.map_err(|e| SheetsError::Configuration(e.to_string()))?;

		let base_url = base_url.into();
		Ok(Self {
			base_url: base_url.trim_end_matches('/').to_string(),
			spreadsheet_id: spreadsheet_id.into(),
			token: token.into(),
			client,
		})
	}

	fn values_url(&self, range: &str, suffix: &str) -> String {
		format!(
			"{}/v4/spreadsheets/{}/values/{}{}",
			self.base_url, self.spreadsheet_id, range, suffix
		)
	}

	/// Maps a non-success response to a `Status` error with the body text.
	async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
		let status = response.status();
		if status.is_success() {
			return Ok(response);
		}
		let message = response.text().await.unwrap_or_default();
		Err(SheetsError::Status {
			status: status.as_u16(),
			message,
		})
	}
}

#[async_trait]
impl SheetsInterface for HttpSheets {
	async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>, SheetsError> {
		let response = self
			.client
			.get(self.values_url(range, ""))
			.bearer_auth(&self.token)
			.send()
			.await
			.map_err(|e| SheetsError::Network(e.to_string()))?;

		let body: ValueRange = Self::check_status(response)
			.await?
			.json()
			.await
			.map_err(|e| SheetsError::Serialization(e.to_string()))?;

		// An empty range omits the values field; that is data, not a failure.
		Ok(body.values.unwrap_or_default())
	}

	async fn append_values(&self, range: &str, rows: Vec<Vec<String>>) -> Result<(), SheetsError> {
		let payload = ValueRange {
			range: None,
			values: Some(rows),
		};
		let response = self
			.client
			.post(self.values_url(range, ":append"))
			.query(&[
				("valueInputOption", VALUE_INPUT_OPTION),
				("insertDataOption", "INSERT_ROWS"),
			])
			.bearer_auth(&self.token)
			.json(&payload)
			.send()
			.await
			.map_err(|e| SheetsError::Network(e.to_string()))?;

		Self::check_status(response).await?;
		Ok(())
	}

	async fn update_values(&self, range: &str, rows: Vec<Vec<String>>) -> Result<(), SheetsError> {
		let payload = ValueRange {
			range: Some(range.to_string()),
			values: Some(rows),
		};
		let response = self
			.client
			.put(self.values_url(range, ""))
			.query(&[("valueInputOption", VALUE_INPUT_OPTION)])
			.bearer_auth(&self.token)
			.json(&payload)
			.send()
			.await
			.map_err(|e| SheetsError::Network(e.to_string()))?;

		Self::check_status(response).await?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn value_range_decodes_missing_values_as_none() {
		let body: ValueRange =
			serde_json::from_str(r#"{"range":"income!A1:N","majorDimension":"ROWS"}"#).unwrap();
		assert!(body.values.is_none());
	}

	#[test]
	fn value_range_decodes_rows() {
		let body: ValueRange =
			serde_json::from_str(r#"{"values":[["1","2025-07-01"],["2"]]}"#).unwrap();
		let values = body.values.unwrap();
		assert_eq!(values.len(), 2);
		assert_eq!(values[0], vec!["1".to_string(), "2025-07-01".to_string()]);
	}

	#[test]
	fn urls_are_built_against_the_values_endpoint() {
		let sheets = HttpSheets::new(
			"https://sheets.example.com/",
			"abc123",
			"token",
			Duration::from_secs(10),
		)
		.unwrap();
		assert_eq!(
			sheets.values_url("income!A1:N", ":append"),
			"https://sheets.example.com/v4/spreadsheets/abc123/values/income!A1:N:append"
		);
	}
}
