use serde::{Deserialize, Serialize};

/// Counters for one block device, from one line of the diskstats file.
///
/// Columns 5 to 7 change meaning between the 4-counter (pre-2.6 partition)
/// layout and the full 11-counter layout, so their names carry both readings:
///
/// | field                 | 11-counter line   | 4-counter line   |
/// |-----------------------|-------------------|------------------|
/// | `rd_merges_or_rd_sec` | reads merged      | sectors read     |
/// | `rd_sec_or_wr_ios`    | sectors read      | writes completed |
/// | `rd_ticks_or_wr_sec`  | ms spent reading  | sectors written  |
///
/// Which layout a record came from is visible through [`DiskStatRecord::is_full`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskStatRecord {
    /// Empty when the line was too short to carry a name.
    pub dev_name:            String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub major:               Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub minor:               Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rd_ios:              Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rd_merges_or_rd_sec: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rd_sec_or_wr_ios:    Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rd_ticks_or_wr_sec:  Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub wr_ios:              Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub wr_merges:           Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub wr_sec:              Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub wr_ticks:            Option<u64>,
    /// I/Os currently in flight.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ios_pgr:             Option<u64>,
    /// ms spent doing I/O.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tot_ticks:           Option<u64>,
    /// Weighted ms spent doing I/O.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rq_ticks:            Option<u64>,
}

impl DiskStatRecord {
    /// All fourteen columns were present.
    pub fn is_full(&self) -> bool {
        self.major.is_some() && self.rq_ticks.is_some()
    }

    /// Neither layout matched; only `dev_name` (possibly empty) is set.
    pub fn is_degraded(&self) -> bool {
        self.rd_ios.is_none()
    }
}
