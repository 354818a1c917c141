use serde::{Deserialize, Serialize};

use crate::{
	filters::BaseFilters,
	settings::{LlmEvaluationType, RerankingDetails},
};

/// A raw search request as supplied by the caller.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SearchRequest {
	pub query: String,
	#[serde(default)]
	pub human_selected_filters: Option<BaseFilters>,
	/// `None` defers to the global auto-detect setting.
	#[serde(default)]
	pub enable_auto_detect_filters: Option<bool>,
	#[serde(default)]
	pub persona_id: Option<i64>,
	#[serde(default)]
	pub offset: Option<u32>,
	#[serde(default)]
	pub limit: Option<u32>,
	#[serde(default)]
	pub hybrid_alpha: Option<f32>,
	#[serde(default)]
	pub rerank_settings: Option<RerankingDetails>,
	#[serde(default)]
	pub evaluation_type: LlmEvaluationType,
	// Signed so a negative window reaches validation instead of failing deserialization.
	#[serde(default)]
	pub chunks_above: Option<i64>,
	#[serde(default)]
	pub chunks_below: Option<i64>,
	#[serde(default)]
	pub full_doc: bool,
}
impl SearchRequest {
	pub fn new(query: impl Into<String>) -> Self {
		Self {
			query: query.into(),
			human_selected_filters: None,
			enable_auto_detect_filters: None,
			persona_id: None,
			offset: None,
			limit: None,
			hybrid_alpha: None,
			rerank_settings: None,
			evaluation_type: LlmEvaluationType::Unspecified,
			chunks_above: None,
			chunks_below: None,
			full_doc: false,
		}
	}
}
