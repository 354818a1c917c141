pub mod chunk;
pub mod dedupe;
pub mod doc;
pub mod filters;
pub mod keywords;
pub mod persona;
pub mod query;
pub mod request;
pub mod settings;
pub mod source;
pub mod time_serde;

mod error;

pub use chunk::{ChunkMetric, InferenceChunk, InferenceSection, MetadataValue};
pub use dedupe::{Deduped, DocumentIdentity};
pub use doc::{DocumentRelevance, SearchDoc, SearchResponse};
pub use error::{Error, Result};
pub use filters::{BaseFilters, IndexFilters, Tag};
pub use persona::Persona;
pub use query::{SearchQuery, SearchQueryParams};
pub use request::SearchRequest;
pub use settings::{LlmEvaluationType, RecencyBiasSetting, RerankingDetails, SearchType};
pub use source::DocumentSource;
