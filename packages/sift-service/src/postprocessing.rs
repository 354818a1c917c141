//! Result consolidation: ordering, section assembly, usefulness judgment, dedupe, and
//! conversion into response documents.

use std::collections::HashMap;

use crate::{FailureMode, ParallelCall, Result, SiftService, run_in_parallel};
use sift_domain::{
	ChunkMetric, DocumentRelevance, InferenceChunk, InferenceSection, SearchQuery, SearchResponse,
	chunk, dedupe, doc,
};

impl SiftService {
	pub async fn consolidate(
		&self,
		query: &SearchQuery,
		chunks: Vec<InferenceChunk>,
		dedupe_docs: bool,
	) -> Result<SearchResponse> {
		let mut chunks = chunk::collapse_duplicates(chunks);

		chunk::sort_by_rank(&mut chunks);

		log_chunk_metrics(&chunks);

		let sections = assemble_sections(
			&chunks,
			query.chunks_above(),
			query.chunks_below(),
			query.full_doc(),
		);
		let relevance = if query.evaluation_type().runs_llm() {
			self.judge_sections(query, &sections).await?
		} else {
			Vec::new()
		};
		let mut llm_indices = dedupe::relevant_indices(&relevance, &sections);
		let sections = if dedupe_docs {
			let original_len = sections.len();
			let deduped = dedupe::dedupe_documents(sections);

			llm_indices =
				dedupe::drop_llm_indices(&llm_indices, original_len, &deduped.dropped_indices);

			deduped.items
		} else {
			sections
		};
		let mut top_documents = doc::to_search_docs(&sections);

		for search_doc in &mut top_documents {
			if let Some(judgment) = dedupe::find_judgment(&relevance, &*search_doc) {
				search_doc.is_relevant = Some(judgment.relevant);
			}
		}

		Ok(SearchResponse { top_documents, llm_indices })
	}

	/// Judges the top sections concurrently. A failed judgment counts as useful so a flaky
	/// model never hides a ranked result.
	async fn judge_sections(
		&self,
		query: &SearchQuery,
		sections: &[InferenceSection],
	) -> Result<Vec<DocumentRelevance>> {
		let limit = usize::try_from(query.max_llm_filter_sections()).unwrap_or(usize::MAX);
		let judged = &sections[..sections.len().min(limit)];
		let calls = judged
			.iter()
			.enumerate()
			.map(|(index, section)| {
				let provider = self.providers.relevance.clone();
				let cfg = self.cfg.providers.llm.clone();
				let query = query.query().to_string();
				let content = section.combined_content().to_string();

				ParallelCall::new(
					index,
					Box::pin(async move { provider.judge(&cfg, &query, &content).await }),
				)
			})
			.collect::<Vec<_>>();
		let outcomes = run_in_parallel(calls, FailureMode::AllowFailures).await?;

		Ok(outcomes
			.into_iter()
			.map(|(index, outcome)| {
				let center = judged[index].center_chunk();

				DocumentRelevance {
					document_id: center.document_id.clone(),
					chunk_id: center.chunk_id,
					relevant: outcome.unwrap_or(true),
					explanation: None,
				}
			})
			.collect())
	}
}

/// One section per chunk in `ranked` order. Each section merges the retrieved chunks of the
/// same document inside `[center - above, center + below]`, or all of them for `full_doc`.
pub fn assemble_sections(
	ranked: &[InferenceChunk],
	chunks_above: u32,
	chunks_below: u32,
	full_doc: bool,
) -> Vec<InferenceSection> {
	let mut by_document: HashMap<&str, Vec<&InferenceChunk>> = HashMap::new();

	for chunk in ranked {
		by_document.entry(chunk.document_id.as_str()).or_default().push(chunk);
	}
	for siblings in by_document.values_mut() {
		siblings.sort_by_key(|chunk| chunk.chunk_id);
		siblings.dedup_by_key(|chunk| chunk.chunk_id);
	}

	ranked
		.iter()
		.filter_map(|center| {
			let low = center.chunk_id.saturating_sub(chunks_above);
			let high = center.chunk_id.saturating_add(chunks_below);
			let members = by_document
				.get(center.document_id.as_str())
				.map(|siblings| {
					siblings
						.iter()
						.filter(|chunk| full_doc || (low..=high).contains(&chunk.chunk_id))
						.map(|chunk| (*chunk).clone())
						.collect()
				})
				.unwrap_or_default();

			InferenceSection::from_chunks(center.clone(), members)
		})
		.collect()
}

fn log_chunk_metrics(ranked: &[InferenceChunk]) {
	if !tracing::enabled!(tracing::Level::DEBUG) {
		return;
	}

	let metrics = ranked.iter().map(ChunkMetric::from_chunk).collect::<Vec<_>>();

	tracing::debug!(count = metrics.len(), metrics = ?metrics, "Retrieval chunk metrics.");
}
