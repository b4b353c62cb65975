use serde::Serialize;

/// One channel entry kept for the merged playlist
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRecord {
    /// Display name; the dedup key derives from it
    pub name: String,
    /// Resolved display group
    pub group: String,
    /// Original #EXTINF descriptor line, kept verbatim for output fidelity
    pub extinf: String,
    /// Stream URL line that followed the descriptor
    pub url: String,
}

/// Per-run merge counters, logged as JSON when the run completes
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeStats {
    pub sources_total: usize,
    pub sources_failed: usize,
    pub channels_kept: usize,
    pub duplicates_skipped: usize,
    pub group_count: usize,
}
