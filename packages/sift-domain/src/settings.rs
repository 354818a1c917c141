use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
	Keyword,
	#[default]
	Semantic,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmEvaluationType {
	Skip,
	Basic,
	/// Resolved from persona and global settings.
	#[default]
	Unspecified,
}
impl LlmEvaluationType {
	pub fn runs_llm(self) -> bool {
		!matches!(self, Self::Skip)
	}
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecencyBiasSetting {
	/// Bias the query toward recent documents only when the query itself asks for it.
	#[default]
	Auto,
	BaseDecay,
	FavorRecent,
	NoDecay,
}
impl RecencyBiasSetting {
	pub fn from_label(label: &str) -> Option<Self> {
		match label.trim() {
			"auto" => Some(Self::Auto),
			"base_decay" => Some(Self::BaseDecay),
			"favor_recent" => Some(Self::FavorRecent),
			"no_decay" => Some(Self::NoDecay),
			_ => None,
		}
	}
}

/// Reranking is off when `rerank_model_name` is `None` or `num_rerank` is zero.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RerankingDetails {
	#[serde(default)]
	pub rerank_model_name: Option<String>,
	#[serde(default)]
	pub provider_type: Option<String>,
	pub num_rerank: u32,
}
impl RerankingDetails {
	pub fn from_config(cfg: &sift_config::SearchRerank) -> Self {
		Self {
			rerank_model_name: cfg.model_name.clone(),
			provider_type: cfg.provider_type.clone(),
			num_rerank: cfg.num_rerank,
		}
	}

	pub fn is_enabled(&self) -> bool {
		self.rerank_model_name.is_some() && self.num_rerank > 0
	}
}
