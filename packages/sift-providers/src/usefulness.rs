use serde_json::Value;

use crate::{Result, chat};
use sift_config::LlmProviderConfig;

pub const NOT_USEFUL_PATTERN: &str = "NOT USEFUL";

/// Judges whether a section helps answer the query. Anything other than an exact
/// [`NOT_USEFUL_PATTERN`] reply counts as useful so a sloppy model never hides a ranked result.
pub async fn judge_usefulness(
	cfg: &LlmProviderConfig,
	query: &str,
	section_content: &str,
) -> Result<bool> {
	let output = chat::complete(cfg, &build_usefulness_messages(query, section_content)).await?;

	tracing::debug!(output = %output, "Usefulness judgment.");

	Ok(parse_usefulness(&output))
}

pub fn build_usefulness_messages(query: &str, section_content: &str) -> Vec<Value> {
	let prompt = format!(
		"Reference section:\n{section_content}\n\nUser query:\n{query}\n\n\
Reply with exactly \"{NOT_USEFUL_PATTERN}\" if the section is not useful for answering the \
query, otherwise reply \"USEFUL\"."
	);

	vec![chat::message("user", prompt)]
}

fn parse_usefulness(output: &str) -> bool {
	!output.trim().trim_matches('"').eq_ignore_ascii_case(NOT_USEFUL_PATTERN)
}
