use std::fmt;

use serde::Serialize;

/// A fully populated installed-application record.
///
/// Only [`RecordBuilder`](crate::RecordBuilder) constructs these, and only
/// once every field is present, so a `Record` never carries placeholder
/// data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    name: String,
    publisher: String,
    version: String,
    install_date: String,
    location: String,
}

impl Record {
    pub(crate) fn new(
        name: String,
        publisher: String,
        version: String,
        install_date: String,
        location: String,
    ) -> Self {
        Self {
            name,
            publisher,
            version,
            install_date: format_install_date(&install_date),
            location,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn install_date(&self) -> &str {
        &self.install_date
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.name, self.version)?;
        writeln!(f, "\tPublisher: {}", self.publisher)?;
        writeln!(f, "\tInstalled {}", self.install_date)?;
        writeln!(f, "\tInto {}", self.location)
    }
}

/// Rewrites the registry's compact `YYYYMMDD` date as `YYYY/MM/DD`.
///
/// Values shorter than eight characters are kept as-is; the registry holds
/// free-form data here and a truncated date is still worth showing. The
/// same goes for 8+-byte values that are not plain ASCII, which cannot be
/// sliced at fixed offsets.
fn format_install_date(raw: &str) -> String {
    if raw.len() < 8 || !raw.is_ascii() {
        return raw.to_owned();
    }
    format!("{}/{}/{}", &raw[..4], &raw[4..6], &raw[6..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(install_date: &str) -> Record {
        Record::new(
            "Foo".to_owned(),
            "Acme".to_owned(),
            "1.0".to_owned(),
            install_date.to_owned(),
            "C:\\Foo".to_owned(),
        )
    }

    #[test]
    fn compact_date_is_normalized() {
        assert_eq!(record("20230115").install_date(), "2023/01/15");
    }

    #[test]
    fn short_date_is_kept_verbatim() {
        assert_eq!(record("2023").install_date(), "2023");
        assert_eq!(record("").install_date(), "");
    }

    #[test]
    fn display_renders_one_record_block() {
        let rendered = record("20210601").to_string();
        assert_eq!(
            rendered,
            "Foo 1.0\n\tPublisher: Acme\n\tInstalled 2021/06/01\n\tInto C:\\Foo\n"
        );
    }
}
