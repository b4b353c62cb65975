use std::collections::HashMap;
use std::env;

/// Default source list; mirrors the original deployment. Override with
/// a comma-separated SOURCE_URLS.
const DEFAULT_SOURCE_URLS: &[&str] = &[
    "https://raw.githubusercontent.com/mytv-android/BRTV-Live-M3U8/refs/heads/main/iptv.m3u",
    "https://raw.githubusercontent.com/liniani/BRTV-Live-M3U8/refs/heads/main/cctv.m3u",
];

/// Display order of canonical groups in the merged playlist.
/// 北京 → 央视 → 卫视 → 地方 → 其他 → 未分组
const DEFAULT_GROUP_ORDER: &[&str] = &["北京", "央视", "卫视", "地方", "其他", "未分组"];

/// Raw group-title labels mapped to canonical group names. Labels absent
/// from this table pass through unchanged.
const DEFAULT_GROUP_ALIASES: &[(&str, &str)] = &[
    ("CCTV", "央视"),
    ("央视频道", "央视"),
    ("中央电视台", "央视"),
    ("卫视频道", "卫视"),
    ("省级卫视", "卫视"),
    ("北京频道", "北京"),
    ("BRTV", "北京"),
    ("地方频道", "地方"),
    ("其它", "其他"),
];

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Sources
    pub source_urls: Vec<String>,
    pub output_file: String,

    // Grouping
    pub group_order: Vec<String>,
    pub group_aliases: HashMap<String, String>,

    // Fetching
    pub fetch_timeout_ms: u64,
    pub max_m3u_size_mb: usize,
    pub user_agent: String,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            // Sources
            source_urls: env::var("SOURCE_URLS")
                .map(|v| split_list(&v))
                .unwrap_or_else(|_| to_owned_list(DEFAULT_SOURCE_URLS)),
            output_file: env::var("OUTPUT_FILE").unwrap_or_else(|_| "live.m3u".to_string()),

            // Grouping
            group_order: env::var("GROUP_ORDER")
                .map(|v| split_list(&v))
                .unwrap_or_else(|_| to_owned_list(DEFAULT_GROUP_ORDER)),
            group_aliases: env::var("GROUP_ALIASES")
                .map(|v| parse_alias_table(&v))
                .unwrap_or_else(|_| default_alias_table()),

            // Fetching
            fetch_timeout_ms: env::var("FETCH_TIMEOUT_MS")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .unwrap_or(10_000), // 10 seconds

            max_m3u_size_mb: env::var("MAX_M3U_SIZE_MB")
                .unwrap_or_else(|_| "50".to_string())
                .parse()
                .unwrap_or(50),

            // Use VLC user agent to avoid IPTV server blocks
            user_agent: env::var("USER_AGENT")
                .unwrap_or_else(|_| "VLC/3.0.20 LibVLC/3.0.20".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Split a comma-separated list, dropping empty segments
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse "raw=canonical" pairs separated by commas
fn parse_alias_table(raw: &str) -> HashMap<String, String> {
    raw.split(',')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, v)| !k.is_empty() && !v.is_empty())
        .collect()
}

fn default_alias_table() -> HashMap<String, String> {
    DEFAULT_GROUP_ALIASES
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
