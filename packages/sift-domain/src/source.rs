use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

macro_rules! document_sources {
	($($variant:ident => $label:literal,)+) => {
		/// Connector family a document was ingested from.
		#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
		#[serde(rename_all = "snake_case")]
		pub enum DocumentSource {
			$($variant,)+
		}
		impl DocumentSource {
			pub const ALL: &'static [DocumentSource] = &[$(DocumentSource::$variant,)+];

			pub fn as_str(self) -> &'static str {
				match self {
					$(DocumentSource::$variant => $label,)+
				}
			}
		}
		impl FromStr for DocumentSource {
			type Err = Error;

			fn from_str(raw: &str) -> Result<Self> {
				match raw.trim().to_lowercase().as_str() {
					$($label => Ok(DocumentSource::$variant),)+
					other => Err(Error::Validation {
						field: "source_type",
						message: format!("unknown document source '{other}'."),
					}),
				}
			}
		}
	};
}

document_sources! {
	IngestionApi => "ingestion_api",
	Slack => "slack",
	Web => "web",
	GoogleDrive => "google_drive",
	Gmail => "gmail",
	Requesttracker => "requesttracker",
	Github => "github",
	Gitlab => "gitlab",
	Guru => "guru",
	Bookstack => "bookstack",
	Confluence => "confluence",
	Slab => "slab",
	Jira => "jira",
	Productboard => "productboard",
	File => "file",
	Notion => "notion",
	Zulip => "zulip",
	Linear => "linear",
	Hubspot => "hubspot",
	Document360 => "document360",
	Gong => "gong",
	GoogleSites => "google_sites",
	Zendesk => "zendesk",
	Loopio => "loopio",
	Dropbox => "dropbox",
	Sharepoint => "sharepoint",
	Teams => "teams",
	Salesforce => "salesforce",
	Discourse => "discourse",
	Axero => "axero",
	Clickup => "clickup",
	Mediawiki => "mediawiki",
	Wikipedia => "wikipedia",
	S3 => "s3",
	R2 => "r2",
	GoogleCloudStorage => "google_cloud_storage",
	OciStorage => "oci_storage",
	NotApplicable => "not_applicable",
}

impl fmt::Display for DocumentSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Parses configured source labels, rejecting the first unknown one.
pub fn parse_sources<I, S>(labels: I) -> Result<Vec<DocumentSource>>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut out = Vec::new();

	for label in labels {
		let source = label.as_ref().parse::<DocumentSource>()?;

		if !out.contains(&source) {
			out.push(source);
		}
	}

	Ok(out)
}
