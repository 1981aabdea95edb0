use anyhow::Result;
use clap::{Parser, Subcommand};
use nixfs::config::Config;
use nixfs::util::human::{fmt_opt, fmt_pct, fmt_size};
use nixfs::{DiskStatRecord, FilesystemStats, MountEntry, Nixfs};
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nixfs", about = "Mounted filesystems, statfs and disk I/O counters", version)]
struct Cli {
    /// Print pretty JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    /// Print raw byte counts instead of "12.5 GB"
    #[arg(long, global = true)]
    bytes: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List mounted filesystems in mount-table order
    Mounts,
    /// Capacity and inode counters for the filesystem holding PATH
    Statfs { path: String },
    /// Per-device I/O counters from the kernel diskstats file
    Diskstats,
    /// List mounts and stat each one
    Report,
    /// Print config file path and effective values, then exit
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None       => Config::load(),
    };
    init_logging(&cfg.output.log_level);

    let fs = Nixfs::with_platform(nixfs::platform::current(), cfg.sources.resolve(nixfs::platform::current()));
    debug!("using {:?}", fs);
    let human = cfg.output.human_readable && !cli.bytes;

    match cli.command {
        Command::Mounts          => run_mounts(&fs, cli.json),
        Command::Statfs { path } => run_statfs(&fs, &path, cli.json, human),
        Command::Diskstats       => run_diskstats(&fs, cli.json),
        Command::Report          => run_report(&fs, cli.json, human),
        Command::Config          => run_print_config(&cfg, &fs),
    }
}

/// Logs go to stderr so `--json` output stays machine-readable.
fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_mounts(fs: &Nixfs, as_json: bool) -> Result<()> {
    let entries = fs.spawn_list_mounted_filesystems().wait()?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("{:<28} {:<28} {:<12} {:>4} {:>4}  {}", "DEVICE", "MOUNT", "TYPE", "FREQ", "PASS", "OPTIONS");
    for e in &entries {
        print_mount(e);
    }
    Ok(())
}

fn print_mount(e: &MountEntry) {
    println!(
        "{:<28} {:<28} {:<12} {:>4} {:>4}  {}",
        e.name, e.dir, e.fs_type, e.freq, e.passno, e.options
    );
}

fn run_statfs(fs: &Nixfs, path: &str, as_json: bool, human: bool) -> Result<()> {
    let stat = fs.spawn_stat_filesystem(path).wait()?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&stat)?);
    } else {
        print_stat(path, &stat, human);
    }
    Ok(())
}

fn print_stat(path: &str, s: &FilesystemStats, human: bool) {
    println!("{}", path);
    println!("  type       {} ({:#x})", s.type_name, s.type_id);
    println!("  bsize      {}", s.bsize);
    println!("  size       {}", fmt_size(s.total_bytes(), human));
    println!("  available  {}", fmt_size(s.available_space, human));
    println!("  blocks     {} total, {} free, {} avail ({} used)", s.blocks, s.bfree, s.bavail, fmt_pct(s.use_pct()));
    println!("  inodes     {} total, {} free ({} used)", s.files, s.ffree, fmt_pct(s.inode_pct()));
    if let Some([a, b]) = s.fsid {
        println!("  fsid       {:#x} {:#x}", a, b);
    }
    println!("  name_len   {}", s.name_len);
}

fn run_diskstats(fs: &Nixfs, as_json: bool) -> Result<()> {
    let records = fs.spawn_read_disk_stats().wait()?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    println!(
        "{:>5} {:>5} {:<14} {:>10} {:>10} {:>12} {:>10} {:>10} {:>12} {:>6} {:>10}",
        "MAJ", "MIN", "DEVICE", "RD_IOS", "RD_MRG*", "RD_SEC*", "WR_IOS", "WR_MRG", "WR_SEC", "INFL", "IO_MS"
    );
    for r in &records {
        print_diskstat(r);
    }
    println!("* meaning depends on line layout; see `nixfs diskstats --json`");
    Ok(())
}

fn print_diskstat(r: &DiskStatRecord) {
    println!(
        "{:>5} {:>5} {:<14} {:>10} {:>10} {:>12} {:>10} {:>10} {:>12} {:>6} {:>10}",
        fmt_opt(r.major.map(u64::from)),
        fmt_opt(r.minor.map(u64::from)),
        r.dev_name,
        fmt_opt(r.rd_ios),
        fmt_opt(r.rd_merges_or_rd_sec),
        fmt_opt(r.rd_sec_or_wr_ios),
        fmt_opt(r.wr_ios),
        fmt_opt(r.wr_merges),
        fmt_opt(r.wr_sec),
        fmt_opt(r.ios_pgr),
        fmt_opt(r.tot_ticks),
    );
}

fn run_report(fs: &Nixfs, as_json: bool, human: bool) -> Result<()> {
    let entries = fs.list_mounted_filesystems()?;

    // Stat every mount concurrently, then collect in table order.
    let pending: Vec<_> = entries.iter()
        .map(|e| fs.spawn_stat_filesystem(e.dir.clone()))
        .collect();
    let results: Vec<_> = pending.into_iter().map(|p| p.wait()).collect();

    if as_json {
        let items: Vec<Value> = entries.iter().zip(&results).map(|(e, r)| match r {
            Ok(stat) => json!({ "mount": e, "stat": stat }),
            Err(err) => json!({
                "mount": e,
                "error": { "kind": err.kind().label(), "code": err.code(), "message": err.to_string() },
            }),
        }).collect();

        let report = json!({
            "platform":  fs.platform().name(),
            "timestamp": chrono::Local::now().to_rfc3339(),
            "entries":   items,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (e, r) in entries.iter().zip(&results) {
        println!("------------");
        match r {
            Ok(stat) => print_stat(&e.dir, stat, human),
            Err(err) => println!("{}\n  {}", e.dir, err),
        }
    }
    Ok(())
}

fn run_print_config(cfg: &Config, fs: &Nixfs) -> Result<()> {
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    let sources = fs.sources();
    println!("Config: {}", path);
    println!("Platform: {}", fs.platform().name());
    println!();
    print!("{}", cfg.to_toml()?);
    println!();
    println!("[effective sources]");
    println!("  mount_table = {}", sources.mount_table.display());
    println!("  fstab       = {}", sources.fstab.display());
    println!("  diskstats   = {}", sources.diskstats.display());
    Ok(())
}
