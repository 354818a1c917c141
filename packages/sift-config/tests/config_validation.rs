use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use sift_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn sample_value() -> Value {
	toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.")
}

fn with_search_key(key: &str, value: Value) -> String {
	let mut root = sample_value();
	let search = root
		.as_table_mut()
		.and_then(|table| table.get_mut("search"))
		.and_then(Value::as_table_mut)
		.expect("Sample config must include [search].");

	search.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render sample config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("sift_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> sift_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = sift_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse test config.")
}

#[test]
fn sample_config_loads() {
	let cfg = load_payload(SAMPLE_CONFIG_TOML.to_string()).expect("Sample config must load.");

	assert_eq!(cfg.search.num_returned_hits, 50);
	assert_eq!(cfg.personas.len(), 2);
	assert_eq!(cfg.personas[0].document_sets, vec!["HR".to_string()]);
	assert!(cfg.search.rerank.is_some());
}

#[test]
fn blank_api_key_normalizes_to_none() {
	let cfg = load_payload(SAMPLE_CONFIG_TOML.to_string()).expect("Sample config must load.");

	assert!(cfg.providers.llm.api_key.is_none());
	assert!(cfg.providers.query_analysis.api_key.is_none());
}

#[test]
fn search_section_defaults_when_missing() {
	let mut root = sample_value();

	root.as_table_mut().expect("Sample config must be a table.").remove("search");

	let payload = toml::to_string(&root).expect("Failed to render sample config.");
	let cfg = load_payload(payload).expect("Config without [search] must load.");

	assert_eq!(cfg.search.num_returned_hits, 50);
	assert!((cfg.search.base_recency_decay - 0.5).abs() < f32::EPSILON);
	assert!((cfg.search.hybrid_alpha - 0.62).abs() < f32::EPSILON);
	assert!((cfg.search.hybrid_alpha_keyword - 0.4).abs() < f32::EPSILON);
	assert!(cfg.search.available_sources.is_empty());
}

#[test]
fn hybrid_alpha_must_be_in_unit_range() {
	let err = load_payload(with_search_key("hybrid_alpha", Value::Float(1.5)))
		.expect_err("Expected hybrid_alpha validation error.");

	assert!(
		err.to_string().contains("search.hybrid_alpha must be in the range 0.0-1.0."),
		"Unexpected error: {err}"
	);
}

#[test]
fn recency_decay_must_not_be_negative() {
	let err = load_payload(with_search_key("base_recency_decay", Value::Float(-0.1)))
		.expect_err("Expected base_recency_decay validation error.");

	assert!(matches!(err, Error::Validation { ref key, .. } if key == "search.base_recency_decay"));
}

#[test]
fn num_returned_hits_must_be_positive() {
	let err = load_payload(with_search_key("num_returned_hits", Value::Integer(0)))
		.expect_err("Expected num_returned_hits validation error.");

	assert!(
		err.to_string().contains("search.num_returned_hits must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn persona_ids_must_be_unique() {
	let mut cfg = base_config();
	let duplicate = cfg.personas[0].clone();

	cfg.personas.push(duplicate);

	let err = sift_config::validate(&cfg).expect_err("Expected duplicate persona error.");

	assert!(err.to_string().contains("must be unique"), "Unexpected error: {err}");
}

#[test]
fn persona_recency_bias_must_be_known() {
	let mut cfg = base_config();

	cfg.personas[1].recency_bias = "sometimes".to_string();

	let err = sift_config::validate(&cfg).expect_err("Expected recency bias error.");

	assert!(matches!(err, Error::Validation { ref key, .. } if key == "personas.recency_bias"));
}

#[test]
fn rerank_count_must_be_positive() {
	let mut cfg = base_config();

	if let Some(rerank) = cfg.search.rerank.as_mut() {
		rerank.num_rerank = 0;
	}

	let err = sift_config::validate(&cfg).expect_err("Expected rerank validation error.");

	assert!(
		err.to_string().contains("search.rerank.num_rerank must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn missing_file_reports_read_error() {
	let path = env::temp_dir().join("sift_config_test_missing_file.toml");
	let err = sift_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }));
}
