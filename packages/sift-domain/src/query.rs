use serde::{Deserialize, Serialize};

use crate::{
	Error, Result,
	filters::IndexFilters,
	settings::{LlmEvaluationType, RerankingDetails, SearchType},
};

/// Unvalidated inputs for [`SearchQuery`]. Every field is concrete; validation only rejects.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SearchQueryParams {
	pub query: String,
	pub processed_keywords: Vec<String>,
	pub search_type: SearchType,
	pub evaluation_type: LlmEvaluationType,
	pub filters: IndexFilters,
	pub chunks_above: i64,
	pub chunks_below: i64,
	#[serde(default)]
	pub full_doc: bool,
	#[serde(default)]
	pub rerank_settings: Option<RerankingDetails>,
	pub hybrid_alpha: f32,
	pub recency_bias_multiplier: f32,
	pub max_llm_filter_sections: u32,
	pub num_hits: u32,
	pub offset: u32,
}

/// The fully resolved query consumed by the index. Fields are read-only; build a new value for
/// any variant.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "SearchQueryParams")]
pub struct SearchQuery {
	query: String,
	processed_keywords: Vec<String>,
	search_type: SearchType,
	evaluation_type: LlmEvaluationType,
	filters: IndexFilters,
	chunks_above: u32,
	chunks_below: u32,
	full_doc: bool,
	rerank_settings: Option<RerankingDetails>,
	hybrid_alpha: f32,
	recency_bias_multiplier: f32,
	max_llm_filter_sections: u32,
	num_hits: u32,
	offset: u32,
}
impl SearchQuery {
	pub fn new(params: SearchQueryParams) -> Result<Self> {
		let SearchQueryParams {
			query,
			processed_keywords,
			search_type,
			evaluation_type,
			filters,
			chunks_above,
			chunks_below,
			full_doc,
			rerank_settings,
			hybrid_alpha,
			recency_bias_multiplier,
			max_llm_filter_sections,
			num_hits,
			offset,
		} = params;

		if query.trim().is_empty() {
			return Err(invalid("query", "must be non-empty."));
		}

		let chunks_above = context_window("chunks_above", chunks_above)?;
		let chunks_below = context_window("chunks_below", chunks_below)?;

		if matches!(evaluation_type, LlmEvaluationType::Unspecified) {
			return Err(invalid("evaluation_type", "must be resolved before building a query."));
		}
		if !hybrid_alpha.is_finite() || !(0.0..=1.0).contains(&hybrid_alpha) {
			return Err(invalid("hybrid_alpha", "must be a finite number in the range 0.0-1.0."));
		}
		if !recency_bias_multiplier.is_finite() || recency_bias_multiplier < 0.0 {
			return Err(invalid(
				"recency_bias_multiplier",
				"must be a finite number, zero or greater.",
			));
		}
		if num_hits == 0 {
			return Err(invalid("num_hits", "must be greater than zero."));
		}
		if filters.document_set.as_ref().is_some_and(Vec::is_empty) {
			return Err(invalid(
				"filters.document_set",
				"must be non-empty when present; omit it for no restriction.",
			));
		}

		Ok(Self {
			query,
			processed_keywords,
			search_type,
			evaluation_type,
			filters,
			chunks_above,
			chunks_below,
			full_doc,
			rerank_settings,
			hybrid_alpha,
			recency_bias_multiplier,
			max_llm_filter_sections,
			num_hits,
			offset,
		})
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	pub fn processed_keywords(&self) -> &[String] {
		&self.processed_keywords
	}

	pub fn search_type(&self) -> SearchType {
		self.search_type
	}

	pub fn evaluation_type(&self) -> LlmEvaluationType {
		self.evaluation_type
	}

	pub fn filters(&self) -> &IndexFilters {
		&self.filters
	}

	pub fn chunks_above(&self) -> u32 {
		self.chunks_above
	}

	pub fn chunks_below(&self) -> u32 {
		self.chunks_below
	}

	pub fn full_doc(&self) -> bool {
		self.full_doc
	}

	pub fn rerank_settings(&self) -> Option<&RerankingDetails> {
		self.rerank_settings.as_ref()
	}

	pub fn hybrid_alpha(&self) -> f32 {
		self.hybrid_alpha
	}

	pub fn recency_bias_multiplier(&self) -> f32 {
		self.recency_bias_multiplier
	}

	pub fn max_llm_filter_sections(&self) -> u32 {
		self.max_llm_filter_sections
	}

	pub fn num_hits(&self) -> u32 {
		self.num_hits
	}

	pub fn offset(&self) -> u32 {
		self.offset
	}

	/// Unpacks into params, e.g. to derive a variant through [`SearchQuery::new`].
	pub fn to_params(&self) -> SearchQueryParams {
		SearchQueryParams {
			query: self.query.clone(),
			processed_keywords: self.processed_keywords.clone(),
			search_type: self.search_type,
			evaluation_type: self.evaluation_type,
			filters: self.filters.clone(),
			chunks_above: i64::from(self.chunks_above),
			chunks_below: i64::from(self.chunks_below),
			full_doc: self.full_doc,
			rerank_settings: self.rerank_settings.clone(),
			hybrid_alpha: self.hybrid_alpha,
			recency_bias_multiplier: self.recency_bias_multiplier,
			max_llm_filter_sections: self.max_llm_filter_sections,
			num_hits: self.num_hits,
			offset: self.offset,
		}
	}
}
impl TryFrom<SearchQueryParams> for SearchQuery {
	type Error = Error;

	fn try_from(params: SearchQueryParams) -> Result<Self> {
		Self::new(params)
	}
}

fn context_window(field: &'static str, value: i64) -> Result<u32> {
	if value < 0 {
		return Err(invalid(field, format!("must be non-negative, got {value}.")));
	}

	u32::try_from(value).map_err(|_| invalid(field, format!("is too large, got {value}.")))
}

fn invalid(field: &'static str, message: impl Into<String>) -> Error {
	Error::Validation { field, message: message.into() }
}
