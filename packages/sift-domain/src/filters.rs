use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::source::DocumentSource;

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Tag {
	pub tag_key: String,
	pub tag_value: String,
}

/// Orthogonal retrieval predicates. `None` on any dimension means "no restriction".
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct BaseFilters {
	#[serde(default)]
	pub source_type: Option<Vec<DocumentSource>>,
	#[serde(default)]
	pub document_set: Option<Vec<String>>,
	#[serde(default, with = "crate::time_serde::option")]
	pub time_cutoff: Option<OffsetDateTime>,
	#[serde(default)]
	pub tags: Option<Vec<Tag>>,
}

/// Filters handed to the index. `access_control_list` is `None` only when ACL enforcement was
/// bypassed by a trusted internal caller.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct IndexFilters {
	#[serde(default)]
	pub source_type: Option<Vec<DocumentSource>>,
	#[serde(default)]
	pub document_set: Option<Vec<String>>,
	#[serde(default, with = "crate::time_serde::option")]
	pub time_cutoff: Option<OffsetDateTime>,
	#[serde(default)]
	pub tags: Option<Vec<Tag>>,
	#[serde(default)]
	pub access_control_list: Option<Vec<String>>,
}
impl IndexFilters {
	pub fn from_base(base: BaseFilters, access_control_list: Option<Vec<String>>) -> Self {
		let BaseFilters { source_type, document_set, time_cutoff, tags } = base;

		Self { source_type, document_set, time_cutoff, tags, access_control_list }
	}

	pub fn is_acl_bypassed(&self) -> bool {
		self.access_control_list.is_none()
	}
}
