use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    /// Regex to extract the group-title attribute from an EXTINF line
    static ref GROUP_TITLE_REGEX: Regex = Regex::new(r#"group-title="([^"]*)""#).unwrap();
}

/// Canonical group names referenced by the inference rules
pub const GROUP_BEIJING: &str = "北京";
pub const GROUP_CCTV: &str = "央视";
pub const GROUP_SATELLITE: &str = "卫视";
pub const GROUP_OTHER: &str = "其他";

/// Name prefixes that mark a Beijing channel
const BEIJING_PREFIXES: [&str; 3] = ["BTV", "BRTV", "北京"];

/// Resolves the display group for parsed channel entries
pub struct GroupClassifier {
    aliases: HashMap<String, String>,
}

impl GroupClassifier {
    pub fn new(aliases: HashMap<String, String>) -> Self {
        Self { aliases }
    }

    /// Resolve the canonical group for one entry. An explicit group-title,
    /// mapped through the alias table, wins over name inference; the Beijing
    /// override wins over both.
    pub fn resolve(&self, extinf: &str, name: &str) -> String {
        let mut group = match Self::extract_group_title(extinf) {
            Some(raw) => self.aliases.get(&raw).cloned().unwrap_or(raw),
            None => Self::infer_from_name(name).to_string(),
        };

        // Beijing channels always land in the Beijing group, whatever the
        // source metadata claims.
        if name.contains(GROUP_BEIJING) && group != GROUP_BEIJING {
            group = GROUP_BEIJING.to_string();
        }

        tracing::debug!(channel = %name, group = %group, "group resolved");
        group
    }

    /// Extract the group-title attribute value, if present
    fn extract_group_title(extinf: &str) -> Option<String> {
        GROUP_TITLE_REGEX
            .captures(extinf)
            .map(|caps| caps[1].to_string())
    }

    /// Infer a group from the channel name when no group-title is present
    fn infer_from_name(name: &str) -> &'static str {
        let upper = name.to_uppercase();
        if BEIJING_PREFIXES.iter().any(|p| upper.starts_with(p)) {
            return GROUP_BEIJING;
        }
        if upper.starts_with("CCTV") {
            return GROUP_CCTV;
        }
        if name.contains(GROUP_SATELLITE) {
            return GROUP_SATELLITE;
        }
        GROUP_OTHER
    }
}
