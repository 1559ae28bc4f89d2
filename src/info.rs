//! The module responsible for displaying program information.
//!

use chrono::{DateTime, Utc};

use crate::location::render;

/// Build metadata compiled into the binary.
///
/// * `version: &'static str` - Crate version.
/// * `commit: &'static str` - Short commit hash, may be empty.
/// * `date: DateTime<Utc>` - Build date, the Unix epoch when unknown.
#[derive(Debug, PartialEq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub date: DateTime<Utc>,
}

impl BuildInfo {
    /// Metadata of the running binary.
    pub fn current() -> BuildInfo {
        BuildInfo {
            version: env!("CARGO_PKG_VERSION"),
            commit: env!("MERIDIAN_COMMIT"),
            date: BuildInfo::parse_date(env!("MERIDIAN_BUILD_DATE")),
        }
    }

    /// Parse an RFC 3339 date, falling back to the Unix epoch.
    fn parse_date(date: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(date)
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Program information followed by the list of fields.
    pub fn show(&self) -> String {
        format!(
            "meridian v{}\nbuilt: {}, commit: {}\n\n{}",
            self.version,
            self.date,
            self.commit,
            render::description()
        )
    }
}
