use super::lossy_lines;
use crate::error::{Error, Result};
use crate::models::mount::MountEntry;
use crate::platform::{Platform, Sources};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// List mounts from the live table, or from fstab where there is none.
pub fn read_mounts(platform: &dyn Platform, sources: &Sources) -> Result<Vec<MountEntry>> {
    if platform.has_mount_table() {
        read_mount_table(&sources.mount_table)
    } else {
        read_fstab(&sources.fstab)
    }
}

/// Read an mtab-format file (`/proc/self/mounts`, `/etc/mtab`).
pub fn read_mount_table(path: &Path) -> Result<Vec<MountEntry>> {
    let file = File::open(path).map_err(|e| Error::unavailable(path, &e))?;
    let entries = parse_mount_table(BufReader::new(file))
        .map_err(|e| Error::unavailable(path, &e))?;
    debug!("read {} entries from {:?}", entries.len(), path);
    Ok(entries)
}

/// Read an fstab-format file. Its first line is a header and is discarded.
pub fn read_fstab(path: &Path) -> Result<Vec<MountEntry>> {
    let file = File::open(path).map_err(|e| Error::unavailable(path, &e))?;
    let entries = parse_fstab(BufReader::new(file))
        .map_err(|e| Error::unavailable(path, &e))?;
    debug!("read {} entries from {:?}", entries.len(), path);
    Ok(entries)
}

pub fn parse_mount_table<R: BufRead>(reader: R) -> io::Result<Vec<MountEntry>> {
    let mut out = Vec::new();
    for line in lossy_lines(reader) {
        if let Some(entry) = parse_line(&line?) {
            out.push(entry);
        }
    }
    Ok(out)
}

pub fn parse_fstab<R: BufRead>(reader: R) -> io::Result<Vec<MountEntry>> {
    let mut out = Vec::new();
    for line in lossy_lines(reader).skip(1) {
        if let Some(entry) = parse_line(&line?) {
            out.push(entry);
        }
    }
    Ok(out)
}

/// Columns: device, dir, type, options, freq, passno.
/// Blank and `#` lines are skipped, as are lines without a type column.
fn parse_line(line: &str) -> Option<MountEntry> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    if fields.len() < 3 { return None; }

    Some(MountEntry {
        name:    unescape(fields[0]),
        dir:     unescape(fields[1]),
        fs_type: unescape(fields[2]),
        options: fields.get(3).map(|o| unescape(o)).unwrap_or_default(),
        freq:    fields.get(4).and_then(|f| f.parse().ok()).unwrap_or(0),
        passno:  fields.get(5).and_then(|f| f.parse().ok()).unwrap_or(0),
    })
}

/// Decode the `\ooo` octal escapes used for spaces, tabs and backslashes.
fn unescape(field: &str) -> String {
    if !field.contains('\\') {
        return field.to_string();
    }

    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() {
            if let Some(b) = octal_byte(&bytes[i + 1..i + 4]) {
                out.push(b);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn octal_byte(digits: &[u8]) -> Option<u8> {
    if !digits.iter().all(|d| (b'0'..=b'7').contains(d)) {
        return None;
    }
    let s = std::str::from_utf8(digits).ok()?;
    u8::from_str_radix(s, 8).ok()
}
