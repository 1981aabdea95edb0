use std::path::PathBuf;

/// Where each query reads from. Defaults come from the [`Platform`]; the
/// config file and tests can point any of them elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sources {
    /// Live mount table (mtab format).
    pub mount_table: PathBuf,
    /// Static filesystem table, used when there is no live mount table.
    pub fstab:       PathBuf,
    pub diskstats:   PathBuf,
}

impl Default for Sources {
    fn default() -> Self {
        current().default_sources()
    }
}

/// What the host OS can tell us, and where it keeps it.
pub trait Platform: Send + Sync {
    fn name(&self) -> &'static str;

    /// A live table of mounted filesystems exists. Without one, mounts are
    /// read from the static fstab instead.
    fn has_mount_table(&self) -> bool;

    /// statfs reports a meaningful filesystem id.
    fn has_filesystem_id(&self) -> bool;

    fn default_sources(&self) -> Sources;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Linux;

impl Platform for Linux {
    fn name(&self) -> &'static str { "linux" }
    fn has_mount_table(&self) -> bool { true }
    fn has_filesystem_id(&self) -> bool { true }

    fn default_sources(&self) -> Sources {
        Sources {
            mount_table: PathBuf::from("/proc/self/mounts"),
            fstab:       PathBuf::from("/etc/fstab"),
            diskstats:   PathBuf::from("/proc/diskstats"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FreeBsd;

impl Platform for FreeBsd {
    fn name(&self) -> &'static str { "freebsd" }
    fn has_mount_table(&self) -> bool { false }
    fn has_filesystem_id(&self) -> bool { false }

    fn default_sources(&self) -> Sources {
        Sources {
            mount_table: PathBuf::from("/etc/mtab"),
            fstab:       PathBuf::from("/etc/fstab"),
            // Only present with linprocfs mounted.
            diskstats:   PathBuf::from("/compat/linux/proc/diskstats"),
        }
    }
}

/// The platform this binary was built for.
#[cfg(target_os = "freebsd")]
pub fn current() -> &'static dyn Platform {
    &FreeBsd
}

#[cfg(not(target_os = "freebsd"))]
pub fn current() -> &'static dyn Platform {
    &Linux
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_sets_differ() {
        assert!(Linux.has_mount_table() && Linux.has_filesystem_id());
        assert!(!FreeBsd.has_mount_table() && !FreeBsd.has_filesystem_id());
    }

    #[test]
    fn default_sources_follow_current_platform() {
        assert_eq!(Sources::default(), current().default_sources());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_reads_proc() {
        assert_eq!(current().name(), "linux");
        assert_eq!(Sources::default().diskstats, PathBuf::from("/proc/diskstats"));
    }
}
