//! Request preprocessing: settings resolution, concurrent signal extraction, and compilation
//! into the frozen [`SearchQuery`].

pub mod settings;
pub mod signals;

use time::OffsetDateTime;

use crate::{Error, Result, SiftService};
use settings::ResolvedSettings;
use signals::Signals;
use sift_config::Search;
use sift_domain::{
	BaseFilters, IndexFilters, Persona, SearchQuery, SearchQueryParams, SearchRequest, SearchType,
	keywords,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PreprocessOptions {
	/// Leaves the ACL unset so the index applies no access restriction. Only for trusted
	/// internal callers; never derived from request input.
	pub bypass_acl: bool,
	pub skip_query_analysis: bool,
}

impl SiftService {
	pub async fn preprocess(
		&self,
		request: &SearchRequest,
		user_email: Option<&str>,
		options: PreprocessOptions,
	) -> Result<SearchQuery> {
		self.preprocess_at(request, user_email, options, OffsetDateTime::now_utc()).await
	}

	/// Same as [`SiftService::preprocess`] with an explicit clock for relative time filters.
	pub async fn preprocess_at(
		&self,
		request: &SearchRequest,
		user_email: Option<&str>,
		options: PreprocessOptions,
		now: OffsetDateTime,
	) -> Result<SearchQuery> {
		if request.query.trim().is_empty() {
			return Err(Error::InvalidRequest { message: "query must be non-empty.".to_string() });
		}

		let persona = self.load_persona(request.persona_id).await?;
		let settings = settings::resolve_settings(
			request,
			persona.as_ref(),
			&self.cfg.search,
			options.skip_query_analysis,
		);
		let signals = self.extract_signals(&request.query, &settings, now).await?;
		let processed_keywords =
			keywords::process_keywords(&request.query, self.cfg.search.edit_keyword_query);
		let access_control_list = if options.bypass_acl {
			tracing::debug!("ACL bypassed for a trusted caller.");

			None
		} else {
			Some(self.access.acl_for(user_email).await?)
		};

		compile_query(CompileArgs {
			query: request.query.clone(),
			processed_keywords,
			settings,
			signals,
			access_control_list,
			search: &self.cfg.search,
		})
	}

	async fn load_persona(&self, persona_id: Option<i64>) -> Result<Option<Persona>> {
		let Some(id) = persona_id else {
			return Ok(None);
		};

		match self.personas.persona(id).await? {
			Some(persona) => Ok(Some(persona)),
			None => Err(Error::NotFound { message: format!("Persona {id} does not exist.") }),
		}
	}
}

pub(crate) struct CompileArgs<'a> {
	pub(crate) query: String,
	pub(crate) processed_keywords: Vec<String>,
	pub(crate) settings: ResolvedSettings,
	pub(crate) signals: Signals,
	pub(crate) access_control_list: Option<Vec<String>>,
	pub(crate) search: &'a Search,
}

/// Explicit filters always beat predictions; tags are never predicted.
pub(crate) fn compile_query(args: CompileArgs<'_>) -> Result<SearchQuery> {
	let CompileArgs { query, processed_keywords, settings, signals, access_control_list, search } =
		args;
	let recency_bias_multiplier = settings.recency_bias_multiplier(signals.favor_recent, search);
	let hybrid_alpha = settings.hybrid_alpha(signals.is_keyword, search);
	let ResolvedSettings {
		filters: BaseFilters { source_type, document_set, time_cutoff, tags },
		evaluation_type,
		rerank_settings,
		chunks_above,
		chunks_below,
		full_doc,
		num_hits,
		offset,
		..
	} = settings;
	let filters = IndexFilters::from_base(
		BaseFilters {
			source_type: source_type.or(signals.source_type),
			document_set,
			time_cutoff: time_cutoff.or(signals.time_cutoff),
			tags,
		},
		access_control_list,
	);
	let search_type = if signals.is_keyword { SearchType::Keyword } else { SearchType::Semantic };

	Ok(SearchQuery::new(SearchQueryParams {
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
		max_llm_filter_sections: search.max_llm_filter_sections,
		num_hits,
		offset,
	})?)
}
