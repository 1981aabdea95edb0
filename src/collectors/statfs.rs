use crate::error::{Error, Result};
use crate::models::filesystem::FilesystemStats;
use crate::models::fs_type;
use crate::platform::Platform;
use std::path::Path;
use tracing::debug;

/// statfs counters normalized to u64, before naming and derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawStatfs {
    pub type_code: u64,
    pub bsize:     u64,
    pub blocks:    u64,
    pub bfree:     u64,
    pub bavail:    u64,
    pub files:     u64,
    pub ffree:     u64,
    pub fsid:      [i32; 2],
    pub name_len:  u64,
}

/// Capacity and inode counters for the filesystem containing `path`.
pub fn stat_filesystem(platform: &dyn Platform, path: &str) -> Result<FilesystemStats> {
    if path.is_empty() {
        return Err(Error::invalid_argument("path must not be empty"));
    }
    if path.contains('\0') {
        return Err(Error::invalid_argument("path must not contain NUL bytes"));
    }

    let path = Path::new(path);
    let raw = statfs_raw(path)?;
    debug!("statfs {:?}: type {:#x}, {} blocks of {}", path, raw.type_code, raw.blocks, raw.bsize);
    Ok(build_stats(&raw, platform.has_filesystem_id()))
}

/// Name the type and derive `available_space`. `fsid` is kept only when the
/// platform reports a real one.
pub fn build_stats(raw: &RawStatfs, has_fsid: bool) -> FilesystemStats {
    FilesystemStats {
        type_name:       fs_type::type_name(raw.type_code).to_string(),
        type_id:         raw.type_code,
        bsize:           raw.bsize,
        blocks:          raw.blocks,
        bfree:           raw.bfree,
        bavail:          raw.bavail,
        files:           raw.files,
        ffree:           raw.ffree,
        available_space: raw.bsize * raw.bavail,
        fsid:            has_fsid.then_some(raw.fsid),
        name_len:        raw.name_len,
    }
}

fn statfs_raw(path: &Path) -> Result<RawStatfs> {
    use nix::sys::statfs::statfs;

    let st = statfs(path).map_err(|errno| Error::from_errno(path, errno as i32))?;

    Ok(RawStatfs {
        // Magic numbers are 32-bit; mask off sign extension on 32-bit targets.
        type_code: st.filesystem_type().0 as u64 & 0xFFFF_FFFF,
        bsize:     count(st.block_size()),
        blocks:    count(st.blocks()),
        bfree:     count(st.blocks_free()),
        bavail:    count(st.blocks_available()),
        files:     count(st.files()),
        ffree:     count(st.files_free()),
        fsid:      fsid_of(&st),
        name_len:  count(st.maximum_name_length()),
    })
}

/// Counter widths and signedness vary by target; negatives clamp to 0.
fn count<T: TryInto<u64>>(v: T) -> u64 {
    v.try_into().unwrap_or(0)
}

/// The only `unsafe` in the crate. libc declares `fsid_t` with a private
/// `__val: [c_int; 2]` and nix hands it back opaque, so there is no safe
/// accessor for the two words. statvfs(3)'s `f_fsid` folds them into one
/// `c_ulong`, which loses the high word on 32-bit targets.
#[cfg(target_os = "linux")]
fn fsid_of(st: &nix::sys::statfs::Statfs) -> [i32; 2] {
    // SAFETY: transmute refuses to compile on a size mismatch, and both
    // sides are two plain c_ints with no invalid bit patterns.
    unsafe { std::mem::transmute::<libc::fsid_t, [libc::c_int; 2]>(st.filesystem_id()) }
}

#[cfg(not(target_os = "linux"))]
fn fsid_of(_st: &nix::sys::statfs::Statfs) -> [i32; 2] {
    [0, 0]
}
