use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
	chunk::{InferenceChunk, InferenceSection, MetadataValue},
	source::DocumentSource,
};

/// Response-facing view of a chunk or section center.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SearchDoc {
	pub document_id: String,
	pub chunk_ind: u32,
	pub semantic_identifier: String,
	pub link: Option<String>,
	pub blurb: String,
	pub source_type: DocumentSource,
	pub boost: i32,
	/// Only ever true for admin searches; a standard search never retrieves hidden documents.
	pub hidden: bool,
	pub metadata: BTreeMap<String, MetadataValue>,
	pub score: Option<f64>,
	#[serde(default)]
	pub is_relevant: Option<bool>,
	#[serde(default)]
	pub relevance_explanation: Option<String>,
	pub match_highlights: Vec<String>,
	#[serde(default, with = "crate::time_serde::option")]
	pub updated_at: Option<OffsetDateTime>,
	#[serde(default)]
	pub primary_owners: Option<Vec<String>>,
	#[serde(default)]
	pub secondary_owners: Option<Vec<String>>,
	#[serde(default)]
	pub is_internet: bool,
}
impl From<&InferenceChunk> for SearchDoc {
	fn from(chunk: &InferenceChunk) -> Self {
		let semantic_identifier = if chunk.semantic_identifier.is_empty() {
			"Unknown".to_string()
		} else {
			chunk.semantic_identifier.clone()
		};

		Self {
			document_id: chunk.document_id.clone(),
			chunk_ind: chunk.chunk_id,
			semantic_identifier,
			link: chunk.first_link().map(str::to_string),
			blurb: chunk.blurb.clone(),
			source_type: chunk.source_type,
			boost: chunk.boost,
			hidden: chunk.hidden,
			metadata: chunk.metadata.clone(),
			score: chunk.score,
			is_relevant: chunk.is_relevant,
			relevance_explanation: chunk.relevance_explanation.clone(),
			match_highlights: chunk.match_highlights.clone(),
			updated_at: chunk.updated_at,
			primary_owners: chunk.primary_owners.clone(),
			secondary_owners: chunk.secondary_owners.clone(),
			is_internet: false,
		}
	}
}

/// Anything that can stand in for a single retrieved chunk.
pub trait CenterChunk {
	fn center(&self) -> &InferenceChunk;
}
impl CenterChunk for InferenceChunk {
	fn center(&self) -> &InferenceChunk {
		self
	}
}
impl CenterChunk for InferenceSection {
	fn center(&self) -> &InferenceChunk {
		self.center_chunk()
	}
}

pub fn to_search_docs<T>(items: &[T]) -> Vec<SearchDoc>
where
	T: CenterChunk,
{
	items.iter().map(|item| SearchDoc::from(item.center())).collect()
}

/// One relevance judgment for a `(document_id, chunk_id)` pair.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DocumentRelevance {
	pub document_id: String,
	pub chunk_id: u32,
	pub relevant: bool,
	#[serde(default)]
	pub explanation: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct SearchResponse {
	pub top_documents: Vec<SearchDoc>,
	/// Indices into `top_documents` judged relevant.
	pub llm_indices: Vec<usize>,
}
