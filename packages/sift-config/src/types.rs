use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	#[serde(default)]
	pub search: Search,
	pub providers: Providers,
	#[serde(default)]
	pub access: Access,
	#[serde(default)]
	pub personas: Vec<PersonaConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Search {
	pub num_returned_hits: u32,
	/// Decays at `1 / (1 + multiplier * years)`.
	pub base_recency_decay: f32,
	pub favor_recent_decay_multiplier: f32,
	pub hybrid_alpha: f32,
	pub hybrid_alpha_keyword: f32,
	/// Forces the LLM relevance filter off regardless of request or persona.
	pub disable_llm_doc_relevance: bool,
	pub auto_detect_filters: bool,
	pub query_analysis: bool,
	/// Strip stop words and punctuation from the keyword query.
	pub edit_keyword_query: bool,
	pub context_chunks_above: u32,
	pub context_chunks_below: u32,
	pub max_llm_filter_sections: u32,
	/// Source labels that have at least one connector; source extraction only picks from these.
	pub available_sources: Vec<String>,
	pub rerank: Option<SearchRerank>,
}
impl Default for Search {
	fn default() -> Self {
		Self {
			num_returned_hits: 50,
			base_recency_decay: 0.5,
			favor_recent_decay_multiplier: 2.0,
			hybrid_alpha: 0.62,
			hybrid_alpha_keyword: 0.4,
			disable_llm_doc_relevance: false,
			auto_detect_filters: true,
			query_analysis: true,
			edit_keyword_query: true,
			context_chunks_above: 1,
			context_chunks_below: 1,
			max_llm_filter_sections: 10,
			available_sources: Vec::new(),
			rerank: None,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchRerank {
	pub model_name: Option<String>,
	pub provider_type: Option<String>,
	pub num_rerank: u32,
	#[serde(default)]
	pub disable_for_streaming: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Providers {
	pub llm: LlmProviderConfig,
	pub query_analysis: ProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
	pub api_base: String,
	pub api_key: Option<String>,
	pub path: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmProviderConfig {
	pub api_base: String,
	pub api_key: Option<String>,
	pub path: String,
	pub model: String,
	#[serde(default)]
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Access {
	/// Keyed by user email.
	pub user_groups: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonaConfig {
	pub id: i64,
	pub name: String,
	#[serde(default)]
	pub document_sets: Vec<String>,
	#[serde(default = "default_recency_bias")]
	pub recency_bias: String,
	pub llm_relevance_filter: Option<bool>,
	pub llm_filter_extraction: Option<bool>,
	pub chunks_above: Option<u32>,
	pub chunks_below: Option<u32>,
}

fn default_recency_bias() -> String {
	"auto".to_string()
}
