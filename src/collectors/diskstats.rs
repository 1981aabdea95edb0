use super::lossy_lines;
use crate::error::{Error, Result};
use crate::models::diskstat::DiskStatRecord;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// major, minor, name, then eleven counters.
const FULL_TOKENS: usize = 14;
/// major, minor, name, then the four counters of the short partition layout.
const SHORT_TOKENS: usize = 7;

/// Read a diskstats file. One record per line, in file order.
pub fn read_diskstats(path: &Path) -> Result<Vec<DiskStatRecord>> {
    let file = File::open(path).map_err(|e| Error::unavailable(path, &e))?;
    let records = parse_diskstats(BufReader::new(file))
        .map_err(|e| Error::unavailable(path, &e))?;
    debug!("read {} diskstats records from {:?}", records.len(), path);
    Ok(records)
}

pub fn parse_diskstats<R: BufRead>(reader: R) -> io::Result<Vec<DiskStatRecord>> {
    let mut out = Vec::new();
    for (n, line) in lossy_lines(reader).enumerate() {
        let line = line?;
        let record = parse_line(&line);
        if record.is_degraded() {
            warn!("diskstats line {} has too few fields: {:?}", n + 1, line);
        }
        out.push(record);
    }
    Ok(out)
}

/// Parse one line. Never fails: a short or garbled line gives a partial record.
///
/// Tokens are consumed left to right and parsing stops at the first token
/// that does not parse, so `"8 0 sda 12 x 4 5"` counts as 4 tokens.
pub fn parse_line(line: &str) -> DiskStatRecord {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let major = tokens.first().and_then(|t| t.parse::<u32>().ok());
    let minor = major.and(tokens.get(1).and_then(|t| t.parse::<u32>().ok()));
    let name  = minor.and(tokens.get(2).copied());

    let mut counters = [0u64; FULL_TOKENS - 3];
    let mut parsed = 0;
    if name.is_some() {
        for (slot, tok) in counters.iter_mut().zip(&tokens[3..]) {
            match tok.parse() {
                Ok(v)  => { *slot = v; parsed += 1; }
                Err(_) => break,
            }
        }
    }

    let matched = match (major, minor, name) {
        (Some(_), Some(_), Some(_)) => 3 + parsed,
        (Some(_), Some(_), None)    => 2,
        (Some(_), None, _)          => 1,
        _                           => 0,
    };

    let mut rec = DiskStatRecord {
        dev_name: name.unwrap_or_default().to_string(),
        ..Default::default()
    };

    if matched >= SHORT_TOKENS {
        rec.rd_ios              = Some(counters[0]);
        rec.rd_merges_or_rd_sec = Some(counters[1]);
        rec.rd_sec_or_wr_ios    = Some(counters[2]);
        rec.rd_ticks_or_wr_sec  = Some(counters[3]);
    }
    if matched >= FULL_TOKENS {
        rec.major     = major;
        rec.minor     = minor;
        rec.wr_ios    = Some(counters[4]);
        rec.wr_merges = Some(counters[5]);
        rec.wr_sec    = Some(counters[6]);
        rec.wr_ticks  = Some(counters[7]);
        rec.ios_pgr   = Some(counters[8]);
        rec.tot_ticks = Some(counters[9]);
        rec.rq_ticks  = Some(counters[10]);
    }
    rec
}
