mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Access, Config, LlmProviderConfig, PersonaConfig, ProviderConfig, Providers, Search,
	SearchRerank, Service,
};

use std::{collections::HashSet, fs, path::Path};

pub const RECENCY_BIAS_LABELS: [&str; 4] = ["auto", "base_decay", "favor_recent", "no_decay"];

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::validation("service.http_bind", "must be non-empty."));
	}

	validate_search(&cfg.search)?;

	for (label, api_base) in [
		("providers.llm.api_base", &cfg.providers.llm.api_base),
		("providers.query_analysis.api_base", &cfg.providers.query_analysis.api_base),
	] {
		if api_base.trim().is_empty() {
			return Err(Error::validation(label, "must be non-empty."));
		}
	}

	if cfg.providers.llm.model.trim().is_empty() {
		return Err(Error::validation("providers.llm.model", "must be non-empty."));
	}
	if !cfg.providers.llm.temperature.is_finite() || cfg.providers.llm.temperature < 0.0 {
		return Err(Error::validation(
			"providers.llm.temperature",
			"must be a finite number, zero or greater.",
		));
	}

	let mut persona_ids = HashSet::with_capacity(cfg.personas.len());

	for persona in &cfg.personas {
		if !persona_ids.insert(persona.id) {
			return Err(Error::validation(
				"personas.id",
				format!("must be unique, found duplicate {}.", persona.id),
			));
		}
		if persona.name.trim().is_empty() {
			return Err(Error::validation("personas.name", "must be non-empty."));
		}
		if !RECENCY_BIAS_LABELS.contains(&persona.recency_bias.as_str()) {
			return Err(Error::validation(
				"personas.recency_bias",
				"must be one of auto, base_decay, favor_recent, or no_decay.",
			));
		}
	}

	Ok(())
}

fn validate_search(search: &Search) -> Result<()> {
	if search.num_returned_hits == 0 {
		return Err(Error::validation("search.num_returned_hits", "must be greater than zero."));
	}
	if search.max_llm_filter_sections == 0 {
		return Err(Error::validation(
			"search.max_llm_filter_sections",
			"must be greater than zero.",
		));
	}

	for (label, alpha) in [
		("search.hybrid_alpha", search.hybrid_alpha),
		("search.hybrid_alpha_keyword", search.hybrid_alpha_keyword),
	] {
		if !alpha.is_finite() {
			return Err(Error::validation(label, "must be a finite number."));
		}
		if !(0.0..=1.0).contains(&alpha) {
			return Err(Error::validation(label, "must be in the range 0.0-1.0."));
		}
	}
	for (label, value) in [
		("search.base_recency_decay", search.base_recency_decay),
		("search.favor_recent_decay_multiplier", search.favor_recent_decay_multiplier),
	] {
		if !value.is_finite() {
			return Err(Error::validation(label, "must be a finite number."));
		}
		if value < 0.0 {
			return Err(Error::validation(label, "must be zero or greater."));
		}
	}

	if let Some(rerank) = search.rerank.as_ref()
		&& rerank.num_rerank == 0
	{
		return Err(Error::validation("search.rerank.num_rerank", "must be greater than zero."));
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	for provider_key in [&mut cfg.providers.llm.api_key, &mut cfg.providers.query_analysis.api_key]
	{
		if provider_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
			*provider_key = None;
		}
	}

	cfg.search.available_sources = cfg
		.search
		.available_sources
		.iter()
		.map(|source| source.trim().to_lowercase())
		.filter(|source| !source.is_empty())
		.collect();

	for persona in &mut cfg.personas {
		persona.recency_bias = persona.recency_bias.trim().to_lowercase();
		persona.document_sets.retain(|name| !name.trim().is_empty());
	}
}
