//! Hosts file rendering
//!
//! The hosts file is a pure function of the directory: one `<ip> <host>`
//! line per record, in directory order, each terminated by `\n`.

use crate::types::HostRecord;

/// Render records into the hosts file format
///
/// Empty input renders an empty file.
pub fn render(records: &[HostRecord]) -> Vec<u8> {
    let mut out = String::with_capacity(records.len() * 32);
    for record in records {
        out.push_str(&record.ip);
        out.push(' ');
        out.push_str(&record.host);
        out.push('\n');
    }
    out.into_bytes()
}
