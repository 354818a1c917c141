use std::sync::Arc;

use sift_service::{Providers, SiftService};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<SiftService>,
}
impl AppState {
	pub fn new(config: sift_config::Config) -> color_eyre::Result<Self> {
		Self::with_providers(config, Providers::default())
	}

	pub fn with_providers(
		config: sift_config::Config,
		providers: Providers,
	) -> color_eyre::Result<Self> {
		let service = SiftService::with_providers(config, providers)?;

		Ok(Self { service: Arc::new(service) })
	}
}
