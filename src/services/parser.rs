use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex to extract a non-empty tvg-name attribute from an EXTINF line
    static ref TVG_NAME_REGEX: Regex = Regex::new(r#"tvg-name="([^"]+)""#).unwrap();
}

/// Candidate playlist entry: the descriptor line kept verbatim, the name
/// extracted from it, and the stream URL line that followed.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    pub name: String,
    pub extinf: String,
    pub url: String,
}

/// Extract the channel name from an EXTINF line. A non-empty tvg-name
/// attribute wins; otherwise the trailing text after the last comma.
fn extract_name(extinf: &str) -> Option<String> {
    if let Some(caps) = TVG_NAME_REGEX.captures(extinf) {
        return Some(caps[1].to_string());
    }
    extinf
        .rsplit_once(',')
        .map(|(_, tail)| tail.trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Scanner state over the line cursor
enum ScanState {
    /// Looking for the next `#EXTINF:` descriptor line
    SeekingDescriptor,
    /// Holding a descriptor with an extracted name; the very next line must
    /// be its stream URL
    ExpectUrl { extinf: String, name: String },
}

/// Lazy scanner over one source document. Yields candidate entries; a
/// descriptor without a name, or without a stream URL on the line that
/// follows it, is discarded without swallowing a line that may start the
/// next candidate. The `#EXTM3U` header and other `#` directives are
/// ignored and never copied through.
pub struct EntryScanner<'a> {
    lines: std::str::Lines<'a>,
    state: ScanState,
}

impl<'a> EntryScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            state: ScanState::SeekingDescriptor,
        }
    }

    /// Enter ExpectUrl if the descriptor carries a usable name, otherwise
    /// stay in SeekingDescriptor.
    fn start_candidate(&mut self, line: &str) {
        if let Some(name) = extract_name(line) {
            self.state = ScanState::ExpectUrl {
                extinf: line.to_string(),
                name,
            };
        }
    }
}

impl Iterator for EntryScanner<'_> {
    type Item = RawEntry;

    fn next(&mut self) -> Option<RawEntry> {
        loop {
            let line = self.lines.next()?.trim();

            match std::mem::replace(&mut self.state, ScanState::SeekingDescriptor) {
                ScanState::SeekingDescriptor => {
                    if line.starts_with("#EXTINF:") {
                        self.start_candidate(line);
                    }
                    // header, other directives, blanks and stray URLs fall through
                }
                ScanState::ExpectUrl { extinf, name } => {
                    if !line.is_empty() && !line.starts_with('#') {
                        return Some(RawEntry {
                            name,
                            extinf,
                            url: line.to_string(),
                        });
                    }
                    // No stream URL for this descriptor; drop the candidate.
                    // The offending line may itself start a new candidate.
                    if line.starts_with("#EXTINF:") {
                        self.start_candidate(line);
                    }
                }
            }
        }
    }
}
