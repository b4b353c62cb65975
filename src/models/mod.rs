pub mod playlist;

pub use playlist::{ChannelRecord, MergeStats};
