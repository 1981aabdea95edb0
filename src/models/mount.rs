use serde::{Deserialize, Serialize};

/// One mounted (or, on fstab platforms, configured) filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountEntry {
    /// Mount point.
    pub dir:     String,
    /// Source device or label ("/dev/sda1", "tmpfs", "server:/export").
    pub name:    String,
    #[serde(rename = "type")]
    pub fs_type: String,
    /// dump(8) interval hint.
    pub freq:    i32,
    /// fsck(8) pass number.
    pub passno:  i32,
    /// Raw comma-separated option string, exactly as the table reports it.
    pub options: String,
}

impl MountEntry {
    /// Options split on commas, trimmed, empties dropped. Order is preserved.
    pub fn option_list(&self) -> Vec<&str> {
        self.options
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .collect()
    }

    /// True if `opt` appears verbatim in the option list ("ro", "noatime").
    pub fn has_option(&self, opt: &str) -> bool {
        self.option_list().iter().any(|o| *o == opt)
    }
}
