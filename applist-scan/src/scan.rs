use tracing::{debug, info, trace};

use crate::{Record, RecordBuilder, ScanError, UninstallEntry, UninstallRoot};

/// Walks every entry under `root` and returns the records that could be
/// fully assembled, in enumeration order.
///
/// Entries that cannot be opened are skipped; entries missing any required
/// field are dropped silently. Only a failure of the name walk itself
/// aborts the scan.
pub fn scan<R: UninstallRoot>(root: &R) -> Result<Vec<Record>, ScanError> {
    let mut builder = RecordBuilder::new();
    let mut records = Vec::new();

    for name in root.entry_names() {
        let name = name.map_err(ScanError::EnumerateEntries)?;

        let entry = match root.open_entry(&name) {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        for value in entry.values() {
            builder.try_apply(&value.name, value.kind, &value.data);
        }

        match builder.build() {
            Some(record) => records.push(record),
            None => trace!(entry = %name, "entry lacks required fields, dropped"),
        }
        builder.reset();
    }

    info!(count = records.len(), "uninstall scan complete");
    Ok(records)
}
