pub mod access;
pub mod parallel;
pub mod postprocessing;
pub mod preprocessing;

mod error;

pub use access::{ConfigAccessResolver, PUBLIC_ACL, build_user_acl};
pub use error::{Error, Result};
pub use parallel::{FailureMode, ParallelCall, run_in_parallel};
pub use postprocessing::assemble_sections;
pub use preprocessing::{
	PreprocessOptions,
	settings::{ResolvedSettings, resolve_settings},
	signals::{Signal, SignalKind, Signals},
};

use std::{collections::HashMap, future::Future, pin::Pin, sync::Arc};

use time::OffsetDateTime;

use sift_config::{Config, LlmProviderConfig, ProviderConfig};
use sift_domain::{DocumentSource, Persona, source};
use sift_providers::{
	query_analysis::{self, QueryAnalysis},
	source_filter,
	time_filter::{self, TimeFilterPrediction},
	usefulness,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait TimeFilterProvider
where
	Self: Send + Sync,
{
	fn extract_time_filter<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		query: &'a str,
		now: OffsetDateTime,
	) -> BoxFuture<'a, Result<TimeFilterPrediction>>;
}

pub trait SourceFilterProvider
where
	Self: Send + Sync,
{
	fn extract_source_filter<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		query: &'a str,
		available: &'a [DocumentSource],
	) -> BoxFuture<'a, Result<Option<Vec<DocumentSource>>>>;
}

pub trait QueryAnalysisProvider
where
	Self: Send + Sync,
{
	fn analyze<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		query: &'a str,
	) -> BoxFuture<'a, Result<QueryAnalysis>>;
}

pub trait RelevanceProvider
where
	Self: Send + Sync,
{
	fn judge<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		query: &'a str,
		section_content: &'a str,
	) -> BoxFuture<'a, Result<bool>>;
}

/// Read-only persona lookup.
pub trait PersonaStore
where
	Self: Send + Sync,
{
	fn persona(&self, id: i64) -> BoxFuture<'_, Result<Option<Persona>>>;
}

/// Maps an acting identity to the access groups the index intersects against.
pub trait AccessResolver
where
	Self: Send + Sync,
{
	fn acl_for<'a>(&'a self, user_email: Option<&'a str>) -> BoxFuture<'a, Result<Vec<String>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub time_filter: Arc<dyn TimeFilterProvider>,
	pub source_filter: Arc<dyn SourceFilterProvider>,
	pub query_analysis: Arc<dyn QueryAnalysisProvider>,
	pub relevance: Arc<dyn RelevanceProvider>,
}
impl Providers {
	pub fn new(
		time_filter: Arc<dyn TimeFilterProvider>,
		source_filter: Arc<dyn SourceFilterProvider>,
		query_analysis: Arc<dyn QueryAnalysisProvider>,
		relevance: Arc<dyn RelevanceProvider>,
	) -> Self {
		Self { time_filter, source_filter, query_analysis, relevance }
	}
}
impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self {
			time_filter: provider.clone(),
			source_filter: provider.clone(),
			query_analysis: provider.clone(),
			relevance: provider,
		}
	}
}

/// Personas from the `[[personas]]` catalogue.
pub struct ConfigPersonaStore {
	personas: HashMap<i64, Persona>,
}
impl ConfigPersonaStore {
	pub fn from_config(cfg: &Config) -> Self {
		let personas = cfg
			.personas
			.iter()
			.map(|persona| (persona.id, Persona::from_config(persona)))
			.collect();

		Self { personas }
	}
}
impl PersonaStore for ConfigPersonaStore {
	fn persona(&self, id: i64) -> BoxFuture<'_, Result<Option<Persona>>> {
		let persona = self.personas.get(&id).cloned();

		Box::pin(async move { Ok(persona) })
	}
}

/// Process-wide search context: built once at startup and shared by reference with handlers.
pub struct SiftService {
	pub cfg: Config,
	pub providers: Providers,
	pub personas: Arc<dyn PersonaStore>,
	pub access: Arc<dyn AccessResolver>,
	available_sources: Vec<DocumentSource>,
}
impl SiftService {
	pub fn new(cfg: Config) -> Result<Self> {
		Self::with_providers(cfg, Providers::default())
	}

	pub fn with_providers(cfg: Config, providers: Providers) -> Result<Self> {
		let personas = Arc::new(ConfigPersonaStore::from_config(&cfg));
		let access = Arc::new(ConfigAccessResolver::from_config(&cfg));

		Self::with_collaborators(cfg, providers, personas, access)
	}

	pub fn with_collaborators(
		cfg: Config,
		providers: Providers,
		personas: Arc<dyn PersonaStore>,
		access: Arc<dyn AccessResolver>,
	) -> Result<Self> {
		let available_sources = source::parse_sources(&cfg.search.available_sources)?;

		Ok(Self { cfg, providers, personas, access, available_sources })
	}

	/// Sources with a configured connector; source filters are only ever predicted among these.
	pub fn available_sources(&self) -> &[DocumentSource] {
		&self.available_sources
	}
}

struct DefaultProviders;
impl TimeFilterProvider for DefaultProviders {
	fn extract_time_filter<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		query: &'a str,
		now: OffsetDateTime,
	) -> BoxFuture<'a, Result<TimeFilterPrediction>> {
		Box::pin(async move { Ok(time_filter::extract_time_filter(cfg, query, now).await?) })
	}
}
impl SourceFilterProvider for DefaultProviders {
	fn extract_source_filter<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		query: &'a str,
		available: &'a [DocumentSource],
	) -> BoxFuture<'a, Result<Option<Vec<DocumentSource>>>> {
		Box::pin(
			async move { Ok(source_filter::extract_source_filter(cfg, query, available).await?) },
		)
	}
}
impl QueryAnalysisProvider for DefaultProviders {
	fn analyze<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		query: &'a str,
	) -> BoxFuture<'a, Result<QueryAnalysis>> {
		Box::pin(async move { Ok(query_analysis::analyze_query(cfg, query).await?) })
	}
}
impl RelevanceProvider for DefaultProviders {
	fn judge<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		query: &'a str,
		section_content: &'a str,
	) -> BoxFuture<'a, Result<bool>> {
		Box::pin(
			async move { Ok(usefulness::judge_usefulness(cfg, query, section_content).await?) },
		)
	}
}
