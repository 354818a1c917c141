//! Document-level deduplication of ranked results, and remapping of relevance indices that were
//! computed against the list before deduplication.

use std::collections::{BTreeSet, HashSet};

use crate::{
	chunk::{InferenceChunk, InferenceSection},
	doc::{DocumentRelevance, SearchDoc},
};

/// Identity of a ranked result: its document and the chunk position within that document.
pub trait DocumentIdentity {
	fn document_id(&self) -> &str;

	fn chunk_id(&self) -> u32;
}
impl DocumentIdentity for InferenceChunk {
	fn document_id(&self) -> &str {
		&self.document_id
	}

	fn chunk_id(&self) -> u32 {
		self.chunk_id
	}
}
impl DocumentIdentity for InferenceSection {
	fn document_id(&self) -> &str {
		&self.center_chunk().document_id
	}

	fn chunk_id(&self) -> u32 {
		self.center_chunk().chunk_id
	}
}
impl DocumentIdentity for SearchDoc {
	fn document_id(&self) -> &str {
		&self.document_id
	}

	fn chunk_id(&self) -> u32 {
		self.chunk_ind
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Deduped<T> {
	pub items: Vec<T>,
	/// Strictly increasing positions in the input that were dropped.
	pub dropped_indices: Vec<usize>,
}

/// Keeps the first occurrence of each document, regardless of later scores.
pub fn dedupe_documents<T>(items: Vec<T>) -> Deduped<T>
where
	T: DocumentIdentity,
{
	let mut seen = HashSet::with_capacity(items.len());
	let mut kept = Vec::with_capacity(items.len());
	let mut dropped_indices = Vec::new();

	for (index, item) in items.into_iter().enumerate() {
		if seen.contains(item.document_id()) {
			dropped_indices.push(index);

			continue;
		}

		seen.insert(item.document_id().to_string());
		kept.push(item);
	}

	Deduped { items: kept, dropped_indices }
}

/// Maps indices flagged against a list of `original_len` items onto the same list with
/// `dropped_indices` removed. Out-of-range indices are ignored.
pub fn drop_llm_indices(
	llm_indices: &[usize],
	original_len: usize,
	dropped_indices: &[usize],
) -> Vec<usize> {
	let flagged: BTreeSet<usize> = llm_indices.iter().copied().collect();
	let dropped: BTreeSet<usize> = dropped_indices.iter().copied().collect();

	(0..original_len)
		.filter(|index| !dropped.contains(index))
		.map(|index| flagged.contains(&index))
		.enumerate()
		.filter_map(|(index, relevant)| relevant.then_some(index))
		.collect()
}

/// First judgment whose document and chunk identity both match `item` exactly.
pub fn find_judgment<'a, T>(
	relevance: &'a [DocumentRelevance],
	item: &T,
) -> Option<&'a DocumentRelevance>
where
	T: DocumentIdentity,
{
	relevance.iter().find(|judgment| {
		judgment.document_id == item.document_id() && judgment.chunk_id == item.chunk_id()
	})
}

/// Positions of `items` with a matching relevant judgment. Unmatched items are simply not
/// flagged.
pub fn relevant_indices<T>(relevance: &[DocumentRelevance], items: &[T]) -> Vec<usize>
where
	T: DocumentIdentity,
{
	items
		.iter()
		.enumerate()
		.filter_map(|(index, item)| {
			find_judgment(relevance, item).filter(|judgment| judgment.relevant).map(|_| index)
		})
		.collect()
}
