use std::collections::{BTreeSet, HashMap};

use crate::{AccessResolver, BoxFuture, Result};
use sift_config::Config;

pub const PUBLIC_ACL: &str = "PUBLIC";

const USER_EMAIL_PREFIX: &str = "user_email:";
const GROUP_PREFIX: &str = "group:";

/// ACL groups for one identity, sorted and free of duplicates. Everyone can read public
/// documents; a known user additionally reads their own and their groups' documents.
pub fn build_user_acl<'a, I>(user_email: Option<&str>, groups: I) -> Vec<String>
where
	I: IntoIterator<Item = &'a str>,
{
	let mut acl = BTreeSet::from([PUBLIC_ACL.to_string()]);

	if let Some(email) = user_email.map(str::trim).filter(|email| !email.is_empty()) {
		acl.insert(format!("{USER_EMAIL_PREFIX}{email}"));

		for group in groups.into_iter().map(str::trim).filter(|group| !group.is_empty()) {
			acl.insert(format!("{GROUP_PREFIX}{group}"));
		}
	}

	acl.into_iter().collect()
}

/// Group memberships from the `[access]` table.
pub struct ConfigAccessResolver {
	user_groups: HashMap<String, Vec<String>>,
}
impl ConfigAccessResolver {
	pub fn from_config(cfg: &Config) -> Self {
		Self { user_groups: cfg.access.user_groups.clone() }
	}
}
impl AccessResolver for ConfigAccessResolver {
	fn acl_for<'a>(&'a self, user_email: Option<&'a str>) -> BoxFuture<'a, Result<Vec<String>>> {
		let groups = user_email
			.and_then(|email| self.user_groups.get(email.trim()))
			.map(|groups| groups.iter().map(String::as_str).collect::<Vec<_>>())
			.unwrap_or_default();
		let acl = build_user_acl(user_email, groups);

		Box::pin(async move { Ok(acl) })
	}
}
