use time::OffsetDateTime;

use crate::{
	FailureMode, ParallelCall, Result, SiftService, preprocessing::settings::ResolvedSettings,
	run_in_parallel,
};
use sift_domain::DocumentSource;
use sift_providers::{query_analysis::QueryAnalysis, time_filter::TimeFilterPrediction};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignalKind {
	TimeFilter,
	SourceFilter,
	QueryAnalysis,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Signal {
	TimeFilter(TimeFilterPrediction),
	SourceFilter(Option<Vec<DocumentSource>>),
	QueryAnalysis(QueryAnalysis),
}

/// Merged predictions. A call that was not scheduled or that failed contributes nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Signals {
	pub time_cutoff: Option<OffsetDateTime>,
	pub favor_recent: bool,
	pub source_type: Option<Vec<DocumentSource>>,
	pub is_keyword: bool,
}
impl Signals {
	fn absorb(&mut self, signal: Signal) {
		match signal {
			Signal::TimeFilter(prediction) => {
				self.time_cutoff = prediction.time_cutoff;
				self.favor_recent = prediction.favor_recent;
			},
			Signal::SourceFilter(sources) => self.source_type = sources,
			Signal::QueryAnalysis(analysis) => self.is_keyword = analysis.is_keyword,
		}
	}
}

impl SiftService {
	/// Which inference calls `settings` asks for, in a stable order.
	pub fn scheduled_signals(settings: &ResolvedSettings) -> Vec<SignalKind> {
		[
			(settings.detect_time_filter, SignalKind::TimeFilter),
			(settings.detect_source_filter, SignalKind::SourceFilter),
			(settings.run_query_analysis, SignalKind::QueryAnalysis),
		]
		.into_iter()
		.filter_map(|(scheduled, kind)| scheduled.then_some(kind))
		.collect()
	}

	/// Runs the scheduled calls concurrently and waits for all of them. A failed extraction is
	/// logged and treated as no prediction so it never blocks retrieval.
	pub async fn extract_signals(
		&self,
		query: &str,
		settings: &ResolvedSettings,
		now: OffsetDateTime,
	) -> Result<Signals> {
		let calls = Self::scheduled_signals(settings)
			.into_iter()
			.map(|kind| ParallelCall::new(kind, self.signal_call(kind, query, now)))
			.collect::<Vec<_>>();

		if calls.is_empty() {
			return Ok(Signals::default());
		}

		let mut signals = Signals::default();

		for (kind, outcome) in run_in_parallel(calls, FailureMode::AllowFailures).await? {
			match outcome {
				Some(signal) => signals.absorb(signal),
				None => {
					tracing::warn!(signal = ?kind, "Signal extraction degraded to no prediction.");
				},
			}
		}

		Ok(signals)
	}

	fn signal_call(
		&self,
		kind: SignalKind,
		query: &str,
		now: OffsetDateTime,
	) -> crate::BoxFuture<'static, Result<Signal>> {
		let query = query.to_string();

		match kind {
			SignalKind::TimeFilter => {
				let provider = self.providers.time_filter.clone();
				let cfg = self.cfg.providers.llm.clone();

				Box::pin(async move {
					let prediction = provider.extract_time_filter(&cfg, &query, now).await?;

					Ok(Signal::TimeFilter(prediction))
				})
			},
			SignalKind::SourceFilter => {
				let provider = self.providers.source_filter.clone();
				let cfg = self.cfg.providers.llm.clone();
				let available = self.available_sources().to_vec();

				Box::pin(async move {
					let sources = provider.extract_source_filter(&cfg, &query, &available).await?;

					Ok(Signal::SourceFilter(sources))
				})
			},
			SignalKind::QueryAnalysis => {
				let provider = self.providers.query_analysis.clone();
				let cfg = self.cfg.providers.query_analysis.clone();

				Box::pin(async move {
					let analysis = provider.analyze(&cfg, &query).await?;

					Ok(Signal::QueryAnalysis(analysis))
				})
			},
		}
	}
}
