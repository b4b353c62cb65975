use crate::models::ChannelRecord;

/// Fixed first line of every generated playlist
pub const PLAYLIST_HEADER: &str = "#EXTM3U";

/// Render the merged playlist: the header line, then each record's verbatim
/// descriptor and stream URL, newline-joined with no trailing newline.
pub fn render_playlist(records: &[ChannelRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() * 2 + 1);
    lines.push(PLAYLIST_HEADER);
    for record in records {
        lines.push(record.extinf.as_str());
        lines.push(record.url.as_str());
    }
    lines.join("\n")
}
