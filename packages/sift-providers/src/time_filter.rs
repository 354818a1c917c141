use serde_json::Value;
use time::{Duration, OffsetDateTime};

use crate::{Error, Result, chat};
use sift_config::LlmProviderConfig;

// Far beyond any indexed document; keeps the window constructible.
const MAX_WINDOW_DAYS: i64 = 1_000_000;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimeFilterPrediction {
	pub time_cutoff: Option<OffsetDateTime>,
	pub favor_recent: bool,
}

pub async fn extract_time_filter(
	cfg: &LlmProviderConfig,
	query: &str,
	now: OffsetDateTime,
) -> Result<TimeFilterPrediction> {
	let json = chat::complete_json(cfg, &build_time_filter_messages(query)).await?;

	parse_time_filter(&json, now)
}

pub fn build_time_filter_messages(query: &str) -> Vec<Value> {
	let system_prompt = "You decide whether a search query is time sensitive. Output valid JSON \
only: {\"filter_type\": \"hard cutoff\" | \"favors recent\" | \"not time sensitive\", \
\"filter_value\": string or null}. For a hard cutoff, filter_value is either a date (YYYY-MM-DD) \
or a relative window such as \"3 months\".";

	vec![chat::message("system", system_prompt), chat::message("user", query)]
}

fn parse_time_filter(json: &Value, now: OffsetDateTime) -> Result<TimeFilterPrediction> {
	let filter_type = json
		.get("filter_type")
		.and_then(Value::as_str)
		.ok_or_else(|| Error::invalid_response("Time filter response is missing filter_type."))?;

	match normalize_label(filter_type).as_str() {
		"hard_cutoff" => {
			let raw = json.get("filter_value").and_then(Value::as_str).ok_or_else(|| {
				Error::invalid_response("Hard cutoff time filter is missing filter_value.")
			})?;
			let cutoff = parse_cutoff(raw, now)?;

			Ok(TimeFilterPrediction { time_cutoff: Some(cutoff), favor_recent: false })
		},
		"favors_recent" | "favor_recent" =>
			Ok(TimeFilterPrediction { time_cutoff: None, favor_recent: true }),
		"not_time_sensitive" => Ok(TimeFilterPrediction::default()),
		other => Err(Error::invalid_response(format!("Unknown time filter type '{other}'."))),
	}
}

fn normalize_label(raw: &str) -> String {
	raw.trim().to_lowercase().replace([' ', '-'], "_")
}

fn parse_cutoff(raw: &str, now: OffsetDateTime) -> Result<OffsetDateTime> {
	if let Ok(absolute) = sift_domain::time_serde::parse(raw) {
		return Ok(absolute);
	}

	let mut parts = raw.split_whitespace();
	let (Some(count), Some(unit), None) = (parts.next(), parts.next(), parts.next()) else {
		return Err(Error::invalid_response(format!("Unrecognized time filter value '{raw}'.")));
	};
	let count: i64 = count
		.parse()
		.map_err(|_| Error::invalid_response(format!("Unrecognized time filter value '{raw}'.")))?;
	let days_per_unit = match unit.trim_end_matches('s').to_lowercase().as_str() {
		"day" => 1,
		"week" => 7,
		"month" => 30,
		"year" => 365,
		other => {
			return Err(Error::invalid_response(format!("Unknown time filter unit '{other}'.")));
		},
	};

	if count < 0 {
		return Err(Error::invalid_response("Time filter window must not be negative."));
	}

	let days = count.saturating_mul(days_per_unit).min(MAX_WINDOW_DAYS);

	now.checked_sub(Duration::days(days))
		.ok_or_else(|| Error::invalid_response(format!("Time filter window '{raw}' is too large.")))
}
