use std::{collections::HashMap, sync::Arc};

use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::{Map, Value};
use time::OffsetDateTime;
use tower::util::ServiceExt;

use sift_api::{routes, state::AppState};
use sift_config::{
	Access, Config, LlmProviderConfig, PersonaConfig, ProviderConfig, Providers as ProviderConfigs,
	Search, Service,
};
use sift_domain::DocumentSource;
use sift_providers::{query_analysis::QueryAnalysis, time_filter::TimeFilterPrediction};
use sift_service::{
	BoxFuture, Providers, QueryAnalysisProvider, RelevanceProvider, Result, SourceFilterProvider,
	TimeFilterProvider,
};

struct QuietProviders;
impl TimeFilterProvider for QuietProviders {
	fn extract_time_filter<'a>(
		&'a self,
		_cfg: &'a LlmProviderConfig,
		_query: &'a str,
		_now: OffsetDateTime,
	) -> BoxFuture<'a, Result<TimeFilterPrediction>> {
		Box::pin(async { Ok(TimeFilterPrediction::default()) })
	}
}
impl SourceFilterProvider for QuietProviders {
	fn extract_source_filter<'a>(
		&'a self,
		_cfg: &'a LlmProviderConfig,
		_query: &'a str,
		_available: &'a [DocumentSource],
	) -> BoxFuture<'a, Result<Option<Vec<DocumentSource>>>> {
		Box::pin(async { Ok(None) })
	}
}
impl QueryAnalysisProvider for QuietProviders {
	fn analyze<'a>(
		&'a self,
		_cfg: &'a ProviderConfig,
		_query: &'a str,
	) -> BoxFuture<'a, Result<QueryAnalysis>> {
		Box::pin(async { Ok(QueryAnalysis::default()) })
	}
}
impl RelevanceProvider for QuietProviders {
	fn judge<'a>(
		&'a self,
		_cfg: &'a LlmProviderConfig,
		_query: &'a str,
		_section_content: &'a str,
	) -> BoxFuture<'a, Result<bool>> {
		Box::pin(async { Ok(true) })
	}
}

fn test_config() -> Config {
	let endpoint = ProviderConfig {
		api_base: "http://127.0.0.1:1".to_string(),
		api_key: None,
		path: "/query-analysis".to_string(),
		timeout_ms: 1_000,
		default_headers: Map::new(),
	};

	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		search: Search { available_sources: vec!["web".to_string()], ..Search::default() },
		providers: ProviderConfigs {
			llm: LlmProviderConfig {
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: None,
				path: "/v1/chat/completions".to_string(),
				model: "test".to_string(),
				temperature: 0.0,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
			query_analysis: endpoint,
		},
		access: Access { user_groups: HashMap::new() },
		personas: vec![PersonaConfig {
			id: 1,
			name: "HR".to_string(),
			document_sets: vec!["HR".to_string()],
			recency_bias: "base_decay".to_string(),
			llm_relevance_filter: Some(true),
			llm_filter_extraction: None,
			chunks_above: None,
			chunks_below: None,
		}],
	}
}

fn test_router() -> Router {
	let quiet = Arc::new(QuietProviders);
	let providers = Providers::new(quiet.clone(), quiet.clone(), quiet.clone(), quiet);
	let state = AppState::with_providers(test_config(), providers).expect("Failed to build state.");

	routes::router(state)
}

async fn post_json(app: Router, uri: &str, payload: Value) -> (StatusCode, Value) {
	let response = app
		.oneshot(
			Request::builder()
				.method("POST")
				.uri(uri)
				.header("content-type", "application/json")
				.body(Body::from(payload.to_string()))
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call route.");
	let status = response.status();
	let bytes =
		body::to_bytes(response.into_body(), usize::MAX).await.expect("Failed to read body.");
	let json = serde_json::from_slice(&bytes).expect("Body is not JSON.");

	(status, json)
}

fn chunk(document_id: &str, chunk_id: u32, score: f64) -> Value {
	serde_json::json!({
		"document_id": document_id,
		"chunk_id": chunk_id,
		"content": format!("{document_id} chunk {chunk_id}"),
		"source_type": "web",
		"semantic_identifier": "",
		"source_links": { "0": format!("https://example.com/{document_id}") },
		"score": score,
	})
}

#[tokio::test]
async fn health_is_ok() {
	let response = test_router()
		.oneshot(
			Request::builder().uri("/health").body(Body::empty()).expect("Failed to build request."),
		)
		.await
		.expect("Failed to call route.");

	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn preprocess_returns_resolved_query() {
	let (status, json) = post_json(
		test_router(),
		"/v1/search/preprocess",
		serde_json::json!({ "query": "What's the return policy?", "persona_id": 1 }),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["filters"]["document_set"], serde_json::json!(["HR"]));
	assert_eq!(json["filters"]["access_control_list"], serde_json::json!(["PUBLIC"]));
	assert_eq!(json["evaluation_type"], "basic");
	assert_eq!(json["search_type"], "semantic");
	assert_eq!(json["recency_bias_multiplier"], 0.5);
}

#[tokio::test]
async fn preprocess_maps_service_errors() {
	let (status, json) = post_json(
		test_router(),
		"/v1/search/preprocess",
		serde_json::json!({ "query": "policy", "persona_id": 9 }),
	)
	.await;

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(json["error_code"], "not_found");

	let (status, json) = post_json(
		test_router(),
		"/v1/search/preprocess",
		serde_json::json!({ "query": "policy", "chunks_above": -2 }),
	)
	.await;

	assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(json["error_code"], "validation_failed");
	assert_eq!(json["fields"], serde_json::json!(["chunks_above"]));
}

#[tokio::test]
async fn preprocessed_query_feeds_consolidation() {
	let (_, query) = post_json(
		test_router(),
		"/v1/search/preprocess",
		serde_json::json!({ "query": "What's the return policy?", "persona_id": 1 }),
	)
	.await;
	let (status, json) = post_json(
		test_router(),
		"/v1/search/consolidate",
		serde_json::json!({
			"query": query,
			"chunks": [chunk("doc-A", 0, 0.4), chunk("doc-B", 1, 0.9), chunk("doc-A", 2, 0.7)],
			"dedupe_docs": true,
		}),
	)
	.await;

	assert_eq!(status, StatusCode::OK);

	let ids = json["top_documents"]
		.as_array()
		.expect("Missing top_documents.")
		.iter()
		.map(|doc| doc["document_id"].as_str().unwrap_or_default().to_string())
		.collect::<Vec<_>>();

	assert_eq!(ids, vec!["doc-B", "doc-A"]);
	assert_eq!(json["top_documents"][1]["chunk_ind"], 2);
	assert_eq!(json["top_documents"][1]["semantic_identifier"], "Unknown");
	assert_eq!(json["top_documents"][1]["link"], "https://example.com/doc-A");
	assert_eq!(json["llm_indices"], serde_json::json!([0, 1]));
}
