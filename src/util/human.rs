/// Format a raw byte count into a human-readable string: "12.5 GB"
pub fn fmt_bytes(bytes: u64) -> String {
    const TB: f64 = 1_099_511_627_776.0;
    const GB: f64 = 1_073_741_824.0;
    const MB: f64 = 1_048_576.0;
    const KB: f64 = 1_024.0;
    let b = bytes as f64;
    if b >= TB      { format!("{:.1} TB", b / TB) }
    else if b >= GB { format!("{:.1} GB", b / GB) }
    else if b >= MB { format!("{:.1} MB", b / MB) }
    else if b >= KB { format!("{:.1} KB", b / KB) }
    else            { format!("{} B", bytes) }
}

/// Bytes as "12.5 GB" or the raw count, depending on `human`.
pub fn fmt_size(bytes: u64, human: bool) -> String {
    if human { fmt_bytes(bytes) } else { bytes.to_string() }
}

/// Format a percentage with no decimals: "84%"
pub fn fmt_pct(pct: f64) -> String {
    format!("{:.0}%", pct)
}

/// An optional counter, or "-" when the source line did not carry it.
pub fn fmt_opt(v: Option<u64>) -> String {
    v.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string())
}
