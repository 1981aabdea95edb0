use nixfs::platform::{FreeBsd, Linux};
use nixfs::{ErrorKind, Nixfs, Sources};
use std::fs;
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use tempfile::TempDir;

const MOUNTS: &str = "\
/dev/sda2 / ext4 rw,relatime 0 1
proc /proc proc rw,nosuid,nodev,noexec,relatime 0 0
/dev/sda1 /boot/efi vfat rw,fmask=0077,dmask=0077 0 2
tmpfs /tmp tmpfs rw,nosuid,nodev 0 0
";

const FSTAB: &str = "\
# Device\tMountpoint\tFStype\tOptions\tDump\tPass#
/dev/ada0p2\t/\tufs\trw\t1\t1
/dev/ada0p3\tnone\tswap\tsw\t0\t0
";

const DISKSTATS: &str = "\
   8       0 sda 4912 1534 372612 2236 10531 9843 417024 12098 0 9312 14335
   8       1 sda1 180 0 8424 57 2 0 2 0 0 76 57
   3       1 hda1 35486 38030 38030 38030
   7       0 loop0
";

fn fixture() -> (TempDir, Sources) {
    let dir = tempfile::tempdir().unwrap();
    let sources = Sources {
        mount_table: dir.path().join("mounts"),
        fstab:       dir.path().join("fstab"),
        diskstats:   dir.path().join("diskstats"),
    };
    fs::write(&sources.mount_table, MOUNTS).unwrap();
    fs::write(&sources.fstab, FSTAB).unwrap();
    fs::write(&sources.diskstats, DISKSTATS).unwrap();
    (dir, sources)
}

#[test]
fn linux_mounts_come_from_the_live_table() {
    let (_dir, sources) = fixture();
    let fs = Nixfs::with_platform(&Linux, sources);
    let entries = fs.list_mounted_filesystems().unwrap();
    let dirs: Vec<&str> = entries.iter().map(|e| e.dir.as_str()).collect();
    assert_eq!(dirs, vec!["/", "/proc", "/boot/efi", "/tmp"]);
    assert_eq!(entries[2].passno, 2);
    assert_eq!(entries[2].option_list(), vec!["rw", "fmask=0077", "dmask=0077"]);
}

#[test]
fn freebsd_mounts_come_from_fstab() {
    let (_dir, sources) = fixture();
    let fs = Nixfs::with_platform(&FreeBsd, sources);
    let entries = fs.list_mounted_filesystems().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "/dev/ada0p2");
    assert_eq!(entries[0].fs_type, "ufs");
    assert_eq!(entries[1].dir, "none");
}

#[test]
fn mount_listing_is_idempotent() {
    let (_dir, sources) = fixture();
    let fs = Nixfs::with_platform(&Linux, sources);
    assert_eq!(fs.list_mounted_filesystems().unwrap(), fs.list_mounted_filesystems().unwrap());
}

#[test]
fn diskstats_keeps_every_line() {
    let (_dir, sources) = fixture();
    let fs = Nixfs::with_platform(&Linux, sources);
    let records = fs.read_disk_stats().unwrap();
    assert_eq!(records.len(), 4);
    assert!(records[0].is_full());
    assert!(records[1].is_full());
    assert!(!records[2].is_full() && !records[2].is_degraded());
    assert_eq!(records[3].dev_name, "loop0");
    assert!(records[3].is_degraded());
}

#[test]
fn missing_sources_fail_with_path_and_code() {
    let dir = tempfile::tempdir().unwrap();
    let sources = Sources {
        mount_table: dir.path().join("gone-mounts"),
        fstab:       dir.path().join("gone-fstab"),
        diskstats:   dir.path().join("gone-diskstats"),
    };
    let fs = Nixfs::with_platform(&Linux, sources);

    let err = fs.list_mounted_filesystems().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResourceUnavailable);
    assert!(err.to_string().contains("gone-mounts"));
    assert!(err.code().is_some());

    let err = fs.read_disk_stats().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResourceUnavailable);
    assert!(err.to_string().contains("gone-diskstats"));
}

#[test]
fn stat_filesystem_validates_and_reports() {
    let fs = Nixfs::new();
    assert_eq!(fs.stat_filesystem("").unwrap_err().kind(), ErrorKind::InvalidArgument);

    let err = fs.stat_filesystem("/path/does/not/exist").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::NotFound | ErrorKind::ResourceUnavailable));

    let dir = tempfile::tempdir().unwrap();
    let st = fs.stat_filesystem(dir.path().to_str().unwrap()).unwrap();
    assert_eq!(st.available_space, st.bsize * st.bavail);
    assert!(!st.type_name.is_empty());
}

#[test]
fn dispatch_delivers_error_first_results() {
    let (tx, rx) = mpsc::channel();
    Nixfs::new().dispatch_stat_filesystem("", move |r| { let _ = tx.send(r); });
    let err = rx.recv().unwrap().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn concurrent_calls_match_sequential_baseline() {
    let (dir, sources) = fixture();
    let fs = Nixfs::with_platform(&Linux, sources);
    let stat_path = dir.path().to_str().unwrap().to_string();

    let base_mounts = fs.list_mounted_filesystems().unwrap();
    let base_disks  = fs.read_disk_stats().unwrap();
    let base_stat   = fs.stat_filesystem(&stat_path).unwrap();

    let handles: Vec<_> = (0..16).map(|_| {
        let fs = fs.clone();
        let stat_path = stat_path.clone();
        thread::spawn(move || {
            let mounts = fs.spawn_list_mounted_filesystems();
            let disks  = fs.spawn_read_disk_stats();
            let stat   = fs.spawn_stat_filesystem(stat_path);
            (mounts.wait().unwrap(), disks.wait().unwrap(), stat.wait().unwrap())
        })
    }).collect();

    for h in handles {
        let (mounts, disks, stat) = h.join().unwrap();
        assert_eq!(mounts, base_mounts);
        assert_eq!(disks, base_disks);
        // Free counts can move under a live filesystem; identity cannot.
        assert_eq!(stat.type_id, base_stat.type_id);
        assert_eq!(stat.bsize, base_stat.bsize);
        assert_eq!(stat.fsid, base_stat.fsid);
        assert_eq!(stat.available_space, stat.bsize * stat.bavail);
    }
}

#[cfg(target_os = "linux")]
#[test]
fn live_system_queries_succeed() {
    let mounts = nixfs::list_mounted_filesystems().unwrap();
    assert!(mounts.iter().any(|m| m.dir == "/"));

    let root = nixfs::stat_filesystem("/").unwrap();
    assert!(root.fsid.is_some());

    if Path::new("/proc/diskstats").exists() {
        nixfs::read_disk_stats().unwrap();
    }
}
