use crate::{Record, ValueKind};

/// Accumulates the fields of one candidate record from an unordered stream
/// of registry values.
///
/// The uninstall tree gives no guarantees about which values an entry
/// carries or in what order they are enumerated, so the builder collects
/// whatever recognized fields show up and only [`build`](Self::build)s a
/// [`Record`] once all of them are present. One builder is reused across
/// every entry of a scan; [`reset`](Self::reset) clears it between
/// candidates.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    name: Option<String>,
    publisher: Option<String>,
    version: Option<String>,
    install_date: Option<String>,
    location: Option<String>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn set_publisher(&mut self, publisher: impl Into<String>) -> &mut Self {
        self.publisher = Some(publisher.into());
        self
    }

    pub fn set_version(&mut self, version: impl Into<String>) -> &mut Self {
        self.version = Some(version.into());
        self
    }

    pub fn set_install_date(&mut self, install_date: impl Into<String>) -> &mut Self {
        self.install_date = Some(install_date.into());
        self
    }

    pub fn set_location(&mut self, location: impl Into<String>) -> &mut Self {
        self.location = Some(location.into());
        self
    }

    /// Routes one named registry value into its slot.
    ///
    /// Returns `true` when the value was consumed. Values of non-string
    /// kinds and names outside the recognized set are ignored, not errors;
    /// the uninstall tree is full of fields this scan has no use for.
    /// Field names match case-sensitively, and a repeated name overwrites
    /// the slot (last write wins).
    pub fn try_apply(&mut self, name: &str, kind: ValueKind, data: &[u8]) -> bool {
        if !matches!(kind, ValueKind::Str | ValueKind::ExpandStr) {
            return false;
        }

        match name {
            "DisplayName" => self.set_name(decode_text(data)),
            "DisplayVersion" => self.set_version(decode_text(data)),
            "InstallDate" => self.set_install_date(decode_text(data)),
            "InstallLocation" => self.set_location(decode_text(data)),
            "Publisher" => self.set_publisher(decode_text(data)),
            _ => return false,
        };
        true
    }

    /// True once every required field has been seen.
    pub fn is_ready(&self) -> bool {
        self.name.is_some()
            && self.publisher.is_some()
            && self.version.is_some()
            && self.install_date.is_some()
            && self.location.is_some()
    }

    /// Produces a record when every slot is populated, `None` otherwise.
    /// Incompleteness is the common case for auxiliary sub-components.
    pub fn build(&self) -> Option<Record> {
        Some(Record::new(
            self.name.clone()?,
            self.publisher.clone()?,
            self.version.clone()?,
            self.install_date.clone()?,
            self.location.clone()?,
        ))
    }

    /// Clears every slot for the next candidate.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Registry string data arrives null-terminated; anything past the first
/// terminator is stale buffer content.
fn decode_text(data: &[u8]) -> String {
    let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    String::from_utf8_lossy(&data[..end]).into_owned()
}
