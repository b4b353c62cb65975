use std::collections::HashSet;

use crate::config::Config;
use crate::models::{ChannelRecord, MergeStats};
use crate::services::classifier::GroupClassifier;
use crate::services::fetcher::SourceFetcher;
use crate::services::parser::EntryScanner;

/// Dedup key for a channel name: uppercased with separators removed, so
/// spellings like "CCTV-1" and "CCTV1" collide across sources.
fn dedup_key(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .collect::<String>()
        .to_uppercase()
}

/// Kept records plus the seen-name set, scoped to one run
pub struct WorkingSet {
    records: Vec<ChannelRecord>,
    seen: HashSet<String>,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Admit a record unless its name was already seen. First occurrence
    /// wins; later occurrences are dropped whole, no field merging.
    pub fn admit(&mut self, record: ChannelRecord) -> bool {
        if !self.seen.insert(dedup_key(&record.name)) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Stable-sort records by group priority. Groups absent from
    /// `group_order` sort after every listed group, keeping admission order
    /// among themselves.
    pub fn sort_by_group(&mut self, group_order: &[String]) {
        self.records.sort_by_key(|record| {
            group_order
                .iter()
                .position(|g| g == &record.group)
                .unwrap_or(group_order.len())
        });
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[ChannelRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ChannelRecord> {
        self.records
    }
}

impl Default for WorkingSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the fetch → parse → classify → dedup pipeline over all configured
/// sources, in order, and hands back the sorted records.
pub struct PlaylistMerger {
    config: Config,
    fetcher: SourceFetcher,
    classifier: GroupClassifier,
}

impl PlaylistMerger {
    pub fn new(config: Config) -> Self {
        let fetcher = SourceFetcher::new(
            &config.user_agent,
            config.fetch_timeout_ms,
            config.max_m3u_size_mb,
        );
        let classifier = GroupClassifier::new(config.group_aliases.clone());

        Self {
            config,
            fetcher,
            classifier,
        }
    }

    /// Process every configured source in order. A failed source is logged
    /// and skipped; the run always yields a (possibly empty) record list.
    pub async fn merge(&self) -> (Vec<ChannelRecord>, MergeStats) {
        let mut set = WorkingSet::new();
        let mut stats = MergeStats {
            sources_total: self.config.source_urls.len(),
            ..MergeStats::default()
        };

        for url in &self.config.source_urls {
            tracing::info!("Fetching source: {}", url);
            match self.fetcher.fetch(url).await {
                Ok(text) => self.ingest(&text, &mut set, &mut stats),
                Err(err) => {
                    tracing::warn!("Skipping source {}: {}", url, err);
                    stats.sources_failed += 1;
                }
            }
        }

        set.sort_by_group(&self.config.group_order);

        stats.channels_kept = set.len();
        stats.group_count = set
            .records()
            .iter()
            .map(|r| r.group.as_str())
            .collect::<HashSet<_>>()
            .len();

        (set.into_records(), stats)
    }

    /// Parse one source document and admit its entries into the working set
    fn ingest(&self, text: &str, set: &mut WorkingSet, stats: &mut MergeStats) {
        for entry in EntryScanner::new(text) {
            let group = self.classifier.resolve(&entry.extinf, &entry.name);
            let record = ChannelRecord {
                name: entry.name,
                group,
                extinf: entry.extinf,
                url: entry.url,
            };
            if !set.admit(record) {
                stats.duplicates_skipped += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::serializer::render_playlist;
    use std::collections::HashMap;

    fn test_config() -> Config {
        Config {
            source_urls: Vec::new(),
            output_file: "live.m3u".to_string(),
            group_order: ["北京", "央视", "卫视", "地方", "其他", "未分组"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            group_aliases: HashMap::new(),
            fetch_timeout_ms: 1_000,
            max_m3u_size_mb: 10,
            user_agent: "test-agent".to_string(),
        }
    }

    fn record(name: &str, group: &str) -> ChannelRecord {
        ChannelRecord {
            name: name.to_string(),
            group: group.to_string(),
            extinf: format!("#EXTINF:-1,{}", name),
            url: format!("http://{}", name),
        }
    }

    #[test]
    fn test_dedup_key_normalizes_separators_and_case() {
        assert_eq!(dedup_key("CCTV-1"), dedup_key("CCTV1"));
        assert_eq!(dedup_key("btv 文艺"), dedup_key("BTV文艺"));
        assert_ne!(dedup_key("CCTV-1"), dedup_key("CCTV-2"));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let mut set = WorkingSet::new();
        assert!(set.admit(record("CCTV-1", "央视")));
        assert!(!set.admit(record("CCTV-1", "其他")));
        assert_eq!(set.len(), 1);
        assert_eq!(set.records()[0].group, "央视");
    }

    #[test]
    fn test_sort_is_stable_within_groups_and_unknown_groups_sort_last() {
        let order: Vec<String> = ["央视", "卫视"].iter().map(|s| s.to_string()).collect();
        let mut set = WorkingSet::new();
        set.admit(record("湖南卫视", "卫视"));
        set.admit(record("体育一台", "体育"));
        set.admit(record("CCTV-1", "央视"));
        set.admit(record("体育二台", "体育"));
        set.admit(record("CCTV-2", "央视"));
        set.sort_by_group(&order);

        let names: Vec<&str> = set.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["CCTV-1", "CCTV-2", "湖南卫视", "体育一台", "体育二台"]
        );
    }

    #[test]
    fn test_end_to_end_merge_of_two_sources() {
        let source1 = "#EXTM3U\n#EXTINF:-1 tvg-name=\"CCTV1\",CCTV-1\nhttp://a\n";
        let source2 = "#EXTM3U\n#EXTINF:-1 group-title=\"卫视\",Hunan TV\nhttp://b\n#EXTINF:-1,CCTV-1\nhttp://c\n";

        let merger = PlaylistMerger::new(test_config());
        let mut set = WorkingSet::new();
        let mut stats = MergeStats::default();
        merger.ingest(source1, &mut set, &mut stats);
        merger.ingest(source2, &mut set, &mut stats);
        set.sort_by_group(&merger.config.group_order);

        // the CCTV-1 entry from the second source is a duplicate; the kept
        // one sorts into 央视, ahead of the 卫视 group
        assert_eq!(stats.duplicates_skipped, 1);
        assert_eq!(
            render_playlist(set.records()),
            "#EXTM3U\n#EXTINF:-1 tvg-name=\"CCTV1\",CCTV-1\nhttp://a\n#EXTINF:-1 group-title=\"卫视\",Hunan TV\nhttp://b"
        );
    }

    #[test]
    fn test_duplicate_across_sources_keeps_first_sources_url() {
        let source_a = "#EXTM3U\n#EXTINF:-1,X\nhttp://from-a\n";
        let source_b = "#EXTM3U\n#EXTINF:-1,X\nhttp://from-b\n";

        let merger = PlaylistMerger::new(test_config());
        let mut set = WorkingSet::new();
        let mut stats = MergeStats::default();
        merger.ingest(source_a, &mut set, &mut stats);
        merger.ingest(source_b, &mut set, &mut stats);

        assert_eq!(set.len(), 1);
        assert_eq!(set.records()[0].url, "http://from-a");
    }
}
