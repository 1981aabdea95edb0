use serde::{Deserialize, Serialize};

/// Capacity and inode counters for the filesystem holding one path.
///
/// Block counts are in units of `bsize`. `available_space` is always
/// `bsize * bavail`, computed in 64-bit arithmetic; a product past
/// `u64::MAX` (16 EiB) is not expected from real hardware and is not guarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesystemStats {
    /// Name resolved from `type_id`, or `"N/A"`.
    #[serde(rename = "type")]
    pub type_name:       String,
    /// Raw magic number reported by the OS.
    pub type_id:         u64,
    pub bsize:           u64,
    pub blocks:          u64,
    pub bfree:           u64,
    /// Blocks available to unprivileged users.
    pub bavail:          u64,
    pub files:           u64,
    pub ffree:           u64,
    pub available_space: u64,
    /// Absent on platforms whose statfs has no meaningful filesystem id.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fsid:            Option<[i32; 2]>,
    pub name_len:        u64,
}

impl FilesystemStats {
    pub fn total_bytes(&self) -> u64 {
        self.bsize.saturating_mul(self.blocks)
    }

    pub fn use_pct(&self) -> f64 {
        if self.blocks == 0 { return 0.0; }
        self.blocks.saturating_sub(self.bfree) as f64 / self.blocks as f64 * 100.0
    }

    pub fn inode_pct(&self) -> f64 {
        if self.files == 0 { return 0.0; }
        self.files.saturating_sub(self.ffree) as f64 / self.files as f64 * 100.0
    }
}
