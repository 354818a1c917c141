use std::{
	cmp::Ordering,
	collections::{BTreeMap, HashMap},
	hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::source::DocumentSource;

/// Enough characters to locate the chunk inside its document.
pub const MAX_METRICS_CONTENT: usize = 200;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
	Single(String),
	Multi(Vec<String>),
}

/// One retrieved unit of a document as returned by the index.
///
/// Equality and hashing use `(document_id, chunk_id)` only. Ordering ranks by score: any scored
/// chunk outranks an unscored one, and ties (including two unscored chunks) go to the lower
/// `chunk_id`, then to the lexicographically smaller `document_id`. Two copies of the same chunk
/// compare equal, so `Ord` is total only over distinct chunks; run [`collapse_duplicates`] on
/// untrusted lists first.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InferenceChunk {
	pub document_id: String,
	pub chunk_id: u32,
	pub content: String,
	#[serde(default)]
	pub blurb: String,
	pub source_type: DocumentSource,
	pub semantic_identifier: String,
	#[serde(default)]
	pub title: Option<String>,
	/// Keyed by character offset of the link within the chunk.
	#[serde(default)]
	pub source_links: Option<BTreeMap<u32, String>>,
	#[serde(default)]
	pub boost: i32,
	#[serde(default)]
	pub recency_bias: f32,
	#[serde(default)]
	pub score: Option<f64>,
	#[serde(default)]
	pub hidden: bool,
	#[serde(default)]
	pub is_relevant: Option<bool>,
	#[serde(default)]
	pub relevance_explanation: Option<String>,
	#[serde(default)]
	pub metadata: BTreeMap<String, MetadataValue>,
	/// Index highlight syntax, e.g. `<hi>answer</hi> is 42`.
	#[serde(default)]
	pub match_highlights: Vec<String>,
	#[serde(default, with = "crate::time_serde::option")]
	pub updated_at: Option<OffsetDateTime>,
	#[serde(default)]
	pub primary_owners: Option<Vec<String>>,
	#[serde(default)]
	pub secondary_owners: Option<Vec<String>>,
}
impl InferenceChunk {
	pub fn unique_id(&self) -> String {
		format!("{}__{}", self.document_id, self.chunk_id)
	}

	pub fn first_link(&self) -> Option<&str> {
		self.source_links
			.as_ref()
			.and_then(|links| links.first_key_value())
			.map(|(_, link)| link.as_str())
	}

	fn same_chunk(&self, other: &Self) -> bool {
		self.chunk_id == other.chunk_id && self.document_id == other.document_id
	}

	/// Rank comparison without the identity shortcut, total over any input.
	fn rank_cmp(&self, other: &Self) -> Ordering {
		let by_score = match (self.score, other.score) {
			(None, None) => Ordering::Equal,
			(None, Some(_)) => Ordering::Less,
			(Some(_), None) => Ordering::Greater,
			(Some(left), Some(right)) => left.total_cmp(&right),
		};

		by_score
			.then_with(|| other.chunk_id.cmp(&self.chunk_id))
			.then_with(|| other.document_id.cmp(&self.document_id))
	}
}
impl PartialEq for InferenceChunk {
	fn eq(&self, other: &Self) -> bool {
		self.same_chunk(other)
	}
}
impl Eq for InferenceChunk {}
impl Hash for InferenceChunk {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.document_id.hash(state);
		self.chunk_id.hash(state);
	}
}
impl Ord for InferenceChunk {
	fn cmp(&self, other: &Self) -> Ordering {
		if self.same_chunk(other) {
			return Ordering::Equal;
		}

		self.rank_cmp(other)
	}
}
impl PartialOrd for InferenceChunk {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

/// Highest-ranked first. Copies of one chunk are ordered by score like any other pair.
pub fn sort_by_rank(chunks: &mut [InferenceChunk]) {
	chunks.sort_by(|left, right| right.rank_cmp(left));
}

/// Keeps one copy per `(document_id, chunk_id)`, the best-ranked one, at the position of the
/// first copy.
pub fn collapse_duplicates(chunks: Vec<InferenceChunk>) -> Vec<InferenceChunk> {
	let mut positions: HashMap<(String, u32), usize> = HashMap::with_capacity(chunks.len());
	let mut kept: Vec<InferenceChunk> = Vec::with_capacity(chunks.len());

	for chunk in chunks {
		match positions.get(&(chunk.document_id.clone(), chunk.chunk_id)) {
			Some(&position) => {
				if chunk.rank_cmp(&kept[position]) == Ordering::Greater {
					kept[position] = chunk;
				}
			},
			None => {
				positions.insert((chunk.document_id.clone(), chunk.chunk_id), kept.len());
				kept.push(chunk);
			},
		}
	}

	kept
}

/// A center chunk plus the ordered chunks merged around it.
#[derive(Clone, Debug, Serialize)]
pub struct InferenceSection {
	center_chunk: InferenceChunk,
	chunks: Vec<InferenceChunk>,
	combined_content: String,
}
impl InferenceSection {
	/// `chunks` must include the center chunk. Returns `None` for an empty chunk list.
	pub fn from_chunks(center_chunk: InferenceChunk, chunks: Vec<InferenceChunk>) -> Option<Self> {
		if chunks.is_empty() {
			return None;
		}

		let combined_content =
			chunks.iter().map(|chunk| chunk.content.as_str()).collect::<Vec<_>>().join("\n");

		Some(Self { center_chunk, chunks, combined_content })
	}

	pub fn center_chunk(&self) -> &InferenceChunk {
		&self.center_chunk
	}

	pub fn chunks(&self) -> &[InferenceChunk] {
		&self.chunks
	}

	pub fn combined_content(&self) -> &str {
		&self.combined_content
	}
}

/// Relevance-tuning telemetry for one retrieved chunk.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ChunkMetric {
	pub document_id: String,
	pub chunk_content_start: String,
	pub first_link: Option<String>,
	pub score: f64,
}
impl ChunkMetric {
	pub fn from_chunk(chunk: &InferenceChunk) -> Self {
		Self {
			document_id: chunk.document_id.clone(),
			chunk_content_start: chunk.content.chars().take(MAX_METRICS_CONTENT).collect(),
			first_link: chunk.first_link().map(str::to_string),
			score: chunk.score.unwrap_or(0.0),
		}
	}
}
