//! Scans the installed-application inventory that Windows keeps under the
//! registry's `Uninstall` tree.
//!
//! The registry exposes each application as a sub-key holding an arbitrary,
//! sparsely populated bag of named values. [`scan`] walks those sub-keys
//! through an [`UninstallRoot`] provider and feeds every value into a
//! [`RecordBuilder`], which assembles a [`Record`] only for entries that
//! carry the full set of required fields. Auxiliary sub-components without
//! full metadata, and entries the process is not allowed to read, are
//! skipped without aborting the walk.

use std::io;

use thiserror::Error;

mod builder;
pub mod providers;
mod record;
mod scan;

pub use builder::RecordBuilder;
pub use record::Record;
pub use scan::scan;

/// Type tag of one registry value. Only the two string kinds carry record
/// fields; everything else is ignored by the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Plain string (`REG_SZ`).
    Str,
    /// Expandable string (`REG_EXPAND_SZ`), unexpanded.
    ExpandStr,
    /// Any other value type.
    Other,
}

/// One named value read from an uninstall entry. String data is UTF-8,
/// possibly still carrying the registry's trailing NUL.
#[derive(Debug, Clone)]
pub struct RawValue {
    pub name: String,
    pub kind: ValueKind,
    pub data: Vec<u8>,
}

/// Fatal scan failures. Both variants mean the uninstall tree itself is
/// unusable; per-entry problems never surface here.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to open the uninstall root: {0}")]
    OpenRoot(#[source] io::Error),

    #[error("failed to enumerate uninstall entries: {0}")]
    EnumerateEntries(#[source] io::Error),
}

/// A single entry could not be opened for reading. The scan skips the
/// entry and keeps going.
#[derive(Debug, Error)]
#[error("failed to open uninstall entry `{name}`: {source}")]
pub struct EntryOpenError {
    pub name: String,
    #[source]
    pub source: io::Error,
}

/// An opened uninstall tree, able to list and open its child entries.
///
/// Handles are RAII values; dropping a root or an entry releases it.
pub trait UninstallRoot {
    type Entry: UninstallEntry;

    /// Lazily walks the child entry names. An `Err` item means the walk
    /// itself broke and the scan cannot continue.
    fn entry_names(&self) -> Box<dyn Iterator<Item = io::Result<String>> + '_>;

    /// Opens one child entry for value reading.
    fn open_entry(&self, name: &str) -> Result<Self::Entry, EntryOpenError>;
}

/// One opened uninstall entry, yielding its named values until exhaustion.
pub trait UninstallEntry {
    fn values(&self) -> Box<dyn Iterator<Item = RawValue> + '_>;
}

/// Scans the platform's installed applications.
///
/// On Windows this opens the HKLM uninstall tree and walks it; on other
/// hosts there is no such tree and the inventory is empty.
pub fn scan_installed() -> Result<Vec<Record>, ScanError> {
    #[cfg(windows)]
    {
        let root = providers::UninstallKey::open()?;
        scan(&root)
    }

    #[cfg(not(windows))]
    {
        tracing::warn!("installed-application scan is only available on Windows");
        Ok(Vec::new())
    }
}
