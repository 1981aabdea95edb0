/// Returned for any magic number not in [`FS_TYPES`].
pub const UNKNOWN_FS_TYPE: &str = "N/A";

/// Filesystem magic numbers as reported in `statfs.f_type`.
///
/// The classic statfs(2) set comes first, then types that show up on any
/// current Linux box. Values are 32-bit; callers mask before lookup.
pub const FS_TYPES: &[(u64, &str)] = &[
    (0x0000_ADF5, "adfs"),
    (0x0000_ADFF, "affs"),
    (0x4246_5331, "befs"),
    (0x1BAD_FACE, "bfs"),
    (0xFF53_4D42, "cifs"),
    (0x7375_7245, "coda"),
    (0x012F_F7B7, "coh"),
    (0x28CD_3D45, "cramfs"),
    (0x0000_1373, "devfs"),
    (0x0041_4A53, "efs"),
    (0x0000_137D, "ext"),
    (0x0000_EF51, "ext2 (old)"),
    (0x0000_EF53, "ext2/ext3/ext4"),
    (0x0000_4244, "hfs"),
    (0xF995_E849, "hpfs"),
    (0x9584_58F6, "hugetlbfs"),
    (0x0000_9660, "isofs"),
    (0x0000_72B6, "jffs2"),
    (0x3153_464A, "jfs"),
    (0x0000_137F, "minix"),
    (0x0000_138F, "minix (30 char names)"),
    (0x0000_2468, "minix v2"),
    (0x0000_2478, "minix v2 (30 char names)"),
    (0x0000_4D44, "msdos"),
    (0x0000_564C, "ncp"),
    (0x0000_6969, "nfs"),
    (0x5346_544E, "ntfs"),
    (0x0000_9FA1, "openprom"),
    (0x0000_9FA0, "proc"),
    (0x0000_002F, "qnx4"),
    (0x5265_4973, "reiserfs"),
    (0x0000_7275, "romfs"),
    (0x0000_517B, "smb"),
    (0x012F_F7B6, "sysv2"),
    (0x012F_F7B5, "sysv4"),
    (0x0102_1994, "tmpfs"),
    (0x1501_3346, "udf"),
    (0x0001_1954, "ufs"),
    (0x0000_9FA2, "usbdevice"),
    (0xA501_FCF5, "vxfs"),
    (0x012F_F7B4, "xenix"),
    (0x5846_5342, "xfs"),
    (0x012F_D16D, "xiafs"),
    // modern Linux
    (0x9123_683E, "btrfs"),
    (0xF2F5_2010, "f2fs"),
    (0x2011_BAB0, "exfat"),
    (0x2FC1_2FC1, "zfs"),
    (0x7371_7368, "squashfs"),
    (0x794C_7630, "overlayfs"),
    (0x6573_5546, "fuse"),
    (0x8584_58F6, "ramfs"),
    (0x6265_6572, "sysfs"),
    (0x0000_1CD1, "devpts"),
    (0x0027_E0EB, "cgroup"),
    (0x6367_7270, "cgroup2"),
    (0x6462_6720, "debugfs"),
    (0x7472_6163, "tracefs"),
    (0x7363_6673, "securityfs"),
    (0xCAFE_4A11, "bpf"),
    (0x6E73_6673, "nsfs"),
    (0x0000_0187, "autofs"),
    (0x6165_676C, "pstore"),
    (0xDE5E_81E4, "efivarfs"),
    (0x1980_0202, "mqueue"),
    (0x6265_6570, "configfs"),
    (0x4249_4E4D, "binfmt_misc"),
    (0xF97C_FF8C, "selinuxfs"),
    (0xFE53_4D42, "smb2"),
    (0x00C3_6400, "ceph"),
];

/// Resolve a magic number to its name. Unknown codes give [`UNKNOWN_FS_TYPE`].
pub fn type_name(code: u64) -> &'static str {
    FS_TYPES
        .iter()
        .find(|(magic, _)| *magic == code)
        .map(|(_, name)| *name)
        .unwrap_or(UNKNOWN_FS_TYPE)
}
