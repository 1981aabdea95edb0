//! Read-only filesystem queries for UNIX hosts: the mount table, statfs for
//! one path, and per-device counters from the kernel's diskstats file.
//!
//! Each query is a stateless blocking read. Hosts that must not block (an
//! event loop, a scripting runtime) use the `spawn_*`/`dispatch_*` forms,
//! which run the query on a worker thread and deliver one result.
//!
//! ```no_run
//! let mounts = nixfs::list_mounted_filesystems()?;
//! for m in &mounts {
//!     match nixfs::stat_filesystem(&m.dir) {
//!         Ok(st)   => println!("{} {} {}", m.dir, st.type_name, st.available_space),
//!         Err(err) => println!("{} {}", m.dir, err),
//!     }
//! }
//! # Ok::<(), nixfs::Error>(())
//! ```

pub mod collectors;
pub mod config;
pub mod error;
pub mod models;
pub mod platform;
pub mod task;
pub mod util;

pub use error::{Error, ErrorKind, Result};
pub use models::diskstat::DiskStatRecord;
pub use models::filesystem::FilesystemStats;
pub use models::mount::MountEntry;
pub use platform::{Platform, Sources};
pub use task::Pending;

use collectors::{diskstats, mounts, statfs};

/// Mounted filesystems, in table order.
pub fn list_mounted_filesystems() -> Result<Vec<MountEntry>> {
    Nixfs::new().list_mounted_filesystems()
}

/// statfs for the filesystem containing `path`.
pub fn stat_filesystem(path: &str) -> Result<FilesystemStats> {
    Nixfs::new().stat_filesystem(path)
}

/// One record per diskstats line, in file order.
pub fn read_disk_stats() -> Result<Vec<DiskStatRecord>> {
    Nixfs::new().read_disk_stats()
}

/// The three queries bound to a platform and a set of source paths.
///
/// Holds no state between calls; cloning is cheap and every clone answers
/// identically.
#[derive(Clone)]
pub struct Nixfs {
    platform: &'static dyn Platform,
    sources:  Sources,
}

impl Default for Nixfs {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Nixfs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Nixfs")
            .field("platform", &self.platform.name())
            .field("sources", &self.sources)
            .finish()
    }
}

impl Nixfs {
    pub fn new() -> Self {
        let platform = platform::current();
        Self { platform, sources: platform.default_sources() }
    }

    pub fn with_platform(platform: &'static dyn Platform, sources: Sources) -> Self {
        Self { platform, sources }
    }

    pub fn platform(&self) -> &'static dyn Platform { self.platform }
    pub fn sources(&self) -> &Sources { &self.sources }

    pub fn list_mounted_filesystems(&self) -> Result<Vec<MountEntry>> {
        mounts::read_mounts(self.platform, &self.sources)
    }

    pub fn stat_filesystem(&self, path: &str) -> Result<FilesystemStats> {
        statfs::stat_filesystem(self.platform, path)
    }

    pub fn read_disk_stats(&self) -> Result<Vec<DiskStatRecord>> {
        diskstats::read_diskstats(&self.sources.diskstats)
    }

    // ── Offloaded ───────────────────────────────────────────────────

    pub fn spawn_list_mounted_filesystems(&self) -> Pending<Vec<MountEntry>> {
        let this = self.clone();
        task::spawn("mounts", move || this.list_mounted_filesystems())
    }

    pub fn spawn_stat_filesystem(&self, path: impl Into<String>) -> Pending<FilesystemStats> {
        let this = self.clone();
        let path = path.into();
        task::spawn("statfs", move || this.stat_filesystem(&path))
    }

    pub fn spawn_read_disk_stats(&self) -> Pending<Vec<DiskStatRecord>> {
        let this = self.clone();
        task::spawn("diskstats", move || this.read_disk_stats())
    }

    pub fn dispatch_list_mounted_filesystems<C>(&self, done: C)
    where
        C: FnOnce(Result<Vec<MountEntry>>) + Send + 'static,
    {
        let this = self.clone();
        task::dispatch("mounts", move || this.list_mounted_filesystems(), done);
    }

    pub fn dispatch_stat_filesystem<C>(&self, path: impl Into<String>, done: C)
    where
        C: FnOnce(Result<FilesystemStats>) + Send + 'static,
    {
        let this = self.clone();
        let path = path.into();
        task::dispatch("statfs", move || this.stat_filesystem(&path), done);
    }

    pub fn dispatch_read_disk_stats<C>(&self, done: C)
    where
        C: FnOnce(Result<Vec<DiskStatRecord>>) + Send + 'static,
    {
        let this = self.clone();
        task::dispatch("diskstats", move || this.read_disk_stats(), done);
    }
}
