//! Download statistics tracking.

use crate::download::media::Outcome;
use crate::fs::paths::MediaKind;

/// Per-account download counters.
#[derive(Debug, Default)]
pub struct DownloadState {
    pub account_name: String,
    pub pic_count: u64,
    pub vid_count: u64,
    pub other_count: u64,
    pub already_present: u64,
    pub skipped: u64,
}

impl DownloadState {
    pub fn new(account_name: String) -> Self {
        Self {
            account_name,
            ..Default::default()
        }
    }

    /// Record one download outcome.
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Saved(path) => {
                let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                match MediaKind::from_filename(name) {
                    MediaKind::Image => self.pic_count += 1,
                    MediaKind::Video => self.vid_count += 1,
                    MediaKind::Other => self.other_count += 1,
                }
            }
            Outcome::AlreadyPresent(_) => self.already_present += 1,
            Outcome::Skipped => self.skipped += 1,
        }
    }

    /// Total number of files written during this walk.
    pub fn total_downloaded(&self) -> u64 {
        self.pic_count + self.vid_count + self.other_count
    }
}

/// Global statistics across all accounts and conversations.
#[derive(Debug, Default)]
pub struct GlobalState {
    pub pic_count: u64,
    pub vid_count: u64,
    pub other_count: u64,
    pub already_present: u64,
    pub skipped: u64,
    pub walks_completed: u64,
}

impl GlobalState {
    /// Fold one walk's counters into the totals.
    pub fn add_walk_stats(&mut self, state: &DownloadState) {
        self.pic_count += state.pic_count;
        self.vid_count += state.vid_count;
        self.other_count += state.other_count;
        self.already_present += state.already_present;
        self.skipped += state.skipped;
        self.walks_completed += 1;
    }

    pub fn total_downloaded(&self) -> u64 {
        self.pic_count + self.vid_count + self.other_count
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn saved_outcomes_are_classified_by_extension() {
        let mut state = DownloadState::new("alice".to_string());
        state.record(&Outcome::Saved(PathBuf::from("/dl/pic/a.jpg")));
        state.record(&Outcome::Saved(PathBuf::from("/dl/vid/b.mp4")));
        state.record(&Outcome::AlreadyPresent(PathBuf::from("/dl/vid/b.mp4")));
        state.record(&Outcome::Skipped);

        assert_eq!(state.pic_count, 1);
        assert_eq!(state.vid_count, 1);
        assert_eq!(state.already_present, 1);
        assert_eq!(state.skipped, 1);
        assert_eq!(state.total_downloaded(), 2);
    }
}
