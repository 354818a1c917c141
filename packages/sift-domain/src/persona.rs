use serde::{Deserialize, Serialize};

use crate::settings::RecencyBiasSetting;

/// A named configuration bundle that scopes a search session.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Persona {
	pub id: i64,
	pub name: String,
	#[serde(default)]
	pub document_sets: Vec<String>,
	#[serde(default)]
	pub recency_bias: RecencyBiasSetting,
	/// Only `Some(true)` turns the LLM relevance filter on.
	#[serde(default)]
	pub llm_relevance_filter: Option<bool>,
	/// Only `Some(false)` turns filter auto-detection off.
	#[serde(default)]
	pub llm_filter_extraction: Option<bool>,
	#[serde(default)]
	pub chunks_above: Option<u32>,
	#[serde(default)]
	pub chunks_below: Option<u32>,
}
impl Persona {
	/// Labels are validated at config load; an unrecognized one falls back to AUTO.
	pub fn from_config(cfg: &sift_config::PersonaConfig) -> Self {
		Self {
			id: cfg.id,
			name: cfg.name.clone(),
			document_sets: cfg.document_sets.clone(),
			recency_bias: RecencyBiasSetting::from_label(&cfg.recency_bias).unwrap_or_default(),
			llm_relevance_filter: cfg.llm_relevance_filter,
			llm_filter_extraction: cfg.llm_filter_extraction,
			chunks_above: cfg.chunks_above,
			chunks_below: cfg.chunks_below,
		}
	}

	pub fn document_set_filter(&self) -> Option<Vec<String>> {
		if self.document_sets.is_empty() { None } else { Some(self.document_sets.clone()) }
	}
}
