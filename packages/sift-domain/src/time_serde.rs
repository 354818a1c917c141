//! RFC 3339 timestamps on the wire. Date-only cutoffs (`2024-05-01`) are accepted on input and
//! read as midnight UTC.

pub mod option;

use time::{
	Date, OffsetDateTime, format_description::well_known::Rfc3339, macros::format_description,
};

pub fn parse(raw: &str) -> Result<OffsetDateTime, time::error::Parse> {
	let trimmed = raw.trim();

	match OffsetDateTime::parse(trimmed, &Rfc3339) {
		Ok(value) => Ok(value),
		Err(rfc_err) => match Date::parse(trimmed, format_description!("[year]-[month]-[day]")) {
			Ok(date) => Ok(date.midnight().assume_utc()),
			Err(_) => Err(rfc_err),
		},
	}
}
