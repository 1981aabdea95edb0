pub mod diskstat;
pub mod filesystem;
pub mod fs_type;
pub mod mount;
