//! Registry-backed provider for the HKLM uninstall tree.

use std::io;

use winreg::enums::{RegType, HKEY_LOCAL_MACHINE, KEY_ENUMERATE_SUB_KEYS, KEY_QUERY_VALUE};
use winreg::types::FromRegValue;
use winreg::RegKey;

use crate::{EntryOpenError, RawValue, ScanError, UninstallEntry, UninstallRoot, ValueKind};

pub const UNINSTALL_PATH: &str = r"SOFTWARE\Microsoft\Windows\CurrentVersion\Uninstall";

/// The uninstall tree, opened for sub-key enumeration. Entries are opened
/// separately with value-read access.
pub struct UninstallKey {
    key: RegKey,
}

impl UninstallKey {
    pub fn open() -> Result<Self, ScanError> {
        RegKey::predef(HKEY_LOCAL_MACHINE)
            .open_subkey_with_flags(UNINSTALL_PATH, KEY_ENUMERATE_SUB_KEYS)
            .map(|key| Self { key })
            .map_err(ScanError::OpenRoot)
    }
}

impl UninstallRoot for UninstallKey {
    type Entry = UninstallEntryKey;

    fn entry_names(&self) -> Box<dyn Iterator<Item = io::Result<String>> + '_> {
        Box::new(self.key.enum_keys())
    }

    fn open_entry(&self, name: &str) -> Result<Self::Entry, EntryOpenError> {
        self.key
            .open_subkey_with_flags(name, KEY_QUERY_VALUE)
            .map(|key| UninstallEntryKey { key })
            .map_err(|source| EntryOpenError {
                name: name.to_owned(),
                source,
            })
    }
}

/// One opened uninstall entry. Closed on drop.
pub struct UninstallEntryKey {
    key: RegKey,
}

impl UninstallEntry for UninstallEntryKey {
    fn values(&self) -> Box<dyn Iterator<Item = RawValue> + '_> {
        // A read error mid-stream ends this entry's values, it does not
        // fail the scan.
        Box::new(
            self.key
                .enum_values()
                .map_while(|item| item.ok())
                .map(|(name, value)| {
                    let kind = match &value.vtype {
                        RegType::REG_SZ => ValueKind::Str,
                        RegType::REG_EXPAND_SZ => ValueKind::ExpandStr,
                        _ => ValueKind::Other,
                    };
                    // Registry strings are UTF-16 on the wire; the core
                    // expects UTF-8 bytes.
                    let data = match kind {
                        ValueKind::Str | ValueKind::ExpandStr => String::from_reg_value(&value)
                            .map(String::into_bytes)
                            .unwrap_or_default(),
                        ValueKind::Other => value.bytes,
                    };
                    RawValue { name, kind, data }
                }),
        )
    }
}
