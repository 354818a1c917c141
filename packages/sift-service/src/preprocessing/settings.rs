//! Layered resolution of filters and tuning knobs. Precedence, strongest first: global
//! disables, explicit request values, persona defaults, auto-detection.

use sift_config::Search;
use sift_domain::{
	BaseFilters, LlmEvaluationType, Persona, RecencyBiasSetting, RerankingDetails, SearchRequest,
};

/// Everything the compiler needs that does not depend on an inference call.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedSettings {
	/// Request filters with persona defaults applied. No ACL yet.
	pub filters: BaseFilters,
	pub recency_bias: RecencyBiasSetting,
	pub evaluation_type: LlmEvaluationType,
	pub detect_time_filter: bool,
	pub detect_source_filter: bool,
	pub run_query_analysis: bool,
	pub hybrid_alpha_override: Option<f32>,
	pub rerank_settings: Option<RerankingDetails>,
	pub chunks_above: i64,
	pub chunks_below: i64,
	pub full_doc: bool,
	pub num_hits: u32,
	pub offset: u32,
}
impl ResolvedSettings {
	/// `favor_recent` is the auto-detected signal; only [`RecencyBiasSetting::Auto`] reads it.
	pub fn recency_bias_multiplier(&self, favor_recent: bool, search: &Search) -> f32 {
		let base = search.base_recency_decay;
		let favored = base * search.favor_recent_decay_multiplier;

		match self.recency_bias {
			RecencyBiasSetting::NoDecay => 0.0,
			RecencyBiasSetting::BaseDecay => base,
			RecencyBiasSetting::FavorRecent => favored,
			RecencyBiasSetting::Auto =>
				if favor_recent {
					favored
				} else {
					base
				},
		}
	}

	pub fn hybrid_alpha(&self, is_keyword: bool, search: &Search) -> f32 {
		self.hybrid_alpha_override.unwrap_or(if is_keyword {
			search.hybrid_alpha_keyword
		} else {
			search.hybrid_alpha
		})
	}
}

/// Pure: no lookups, no inference, and no errors. Missing data means no restriction.
pub fn resolve_settings(
	request: &SearchRequest,
	persona: Option<&Persona>,
	search: &Search,
	skip_query_analysis: bool,
) -> ResolvedSettings {
	let filters = resolve_filters(request, persona);
	let recency_bias = persona.map(|persona| persona.recency_bias).unwrap_or_default();
	let mut auto_detect = request.enable_auto_detect_filters.unwrap_or(search.auto_detect_filters);

	if !auto_detect {
		tracing::debug!("Auto-detected filters are disabled for this request.");
	} else if persona.is_some_and(|persona| persona.llm_filter_extraction == Some(false)) {
		tracing::debug!("Persona disables auto-detected filters.");

		auto_detect = false;
	}

	let detect_time_filter = auto_detect
		&& filters.time_cutoff.is_none()
		&& matches!(recency_bias, RecencyBiasSetting::Auto);
	let detect_source_filter = auto_detect && filters.source_type.is_none();

	if auto_detect && !detect_time_filter {
		tracing::debug!(?recency_bias, "Time filter already decided; skipping extraction.");
	}
	if auto_detect && !detect_source_filter {
		tracing::debug!("Source filter already provided; skipping extraction.");
	}

	ResolvedSettings {
		filters,
		recency_bias,
		evaluation_type: resolve_evaluation_type(request.evaluation_type, persona, search),
		detect_time_filter,
		detect_source_filter,
		run_query_analysis: search.query_analysis && !skip_query_analysis,
		hybrid_alpha_override: request.hybrid_alpha,
		rerank_settings: resolve_rerank_settings(request, search),
		chunks_above: resolve_context(
			request.chunks_above,
			persona.and_then(|persona| persona.chunks_above),
			search.context_chunks_above,
		),
		chunks_below: resolve_context(
			request.chunks_below,
			persona.and_then(|persona| persona.chunks_below),
			search.context_chunks_below,
		),
		full_doc: request.full_doc,
		num_hits: request.limit.unwrap_or(search.num_returned_hits),
		offset: request.offset.unwrap_or(0),
	}
}

fn resolve_filters(request: &SearchRequest, persona: Option<&Persona>) -> BaseFilters {
	let mut filters = request.human_selected_filters.clone().unwrap_or_default();

	// An empty selection restricts nothing.
	filters.source_type = filters.source_type.filter(|sources| !sources.is_empty());
	filters.tags = filters.tags.filter(|tags| !tags.is_empty());

	if filters.document_set.is_none() {
		filters.document_set = persona.and_then(Persona::document_set_filter);
	}

	filters
}

fn resolve_evaluation_type(
	requested: LlmEvaluationType,
	persona: Option<&Persona>,
	search: &Search,
) -> LlmEvaluationType {
	let resolved = match (requested, persona) {
		(LlmEvaluationType::Unspecified, Some(persona)) =>
			if persona.llm_relevance_filter == Some(true) {
				LlmEvaluationType::Basic
			} else {
				LlmEvaluationType::Skip
			},
		(LlmEvaluationType::Unspecified, None) => LlmEvaluationType::Basic,
		(explicit, _) => explicit,
	};

	if search.disable_llm_doc_relevance {
		if resolved.runs_llm() {
			tracing::info!(
				requested = ?resolved,
				"LLM relevance filtering would have run but is globally disabled."
			);
		}

		return LlmEvaluationType::Skip;
	}

	resolved
}

fn resolve_rerank_settings(request: &SearchRequest, search: &Search) -> Option<RerankingDetails> {
	if let Some(explicit) = &request.rerank_settings {
		return Some(explicit.clone());
	}

	search
		.rerank
		.as_ref()
		.filter(|saved| !saved.disable_for_streaming)
		.map(RerankingDetails::from_config)
}

fn resolve_context(requested: Option<i64>, persona: Option<u32>, default: u32) -> i64 {
	requested.unwrap_or_else(|| i64::from(persona.unwrap_or(default)))
}
