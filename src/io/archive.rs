/// Twitter archive corpus — posts read from an exported `tweets.csv`.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::io::corpus::{
    clean_post, load_file_corpus, CorpusError, CorpusFilter, CorpusProvider, FileCorpus,
};

/// The archive columns the corpus needs. Other columns (`tweet_id`,
/// `timestamp`, `source`, `expanded_urls`, ...) are ignored.
#[derive(Debug, Deserialize)]
struct ArchiveRow {
    text: String,
    #[serde(default)]
    in_reply_to_user_id: String,
    #[serde(default)]
    retweeted_status_id: String,
}

impl ArchiveRow {
    fn is_retweet(&self) -> bool {
        !self.retweeted_status_id.trim().is_empty()
    }

    fn is_reply(&self) -> bool {
        !self.in_reply_to_user_id.trim().is_empty()
    }
}

/// A Twitter archive CSV. Retweets and replies are recognised from the
/// `retweeted_status_id` and `in_reply_to_user_id` columns, not the text.
#[derive(Debug, Clone)]
pub struct ArchiveCsvCorpus {
    path: PathBuf,
    filter: CorpusFilter,
}

impl ArchiveCsvCorpus {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            filter: CorpusFilter::default(),
        }
    }

    pub fn with_filter(mut self, filter: CorpusFilter) -> Self {
        self.filter = filter;
        self
    }
}

impl FileCorpus for ArchiveCsvCorpus {
    fn path(&self) -> &Path {
        &self.path
    }

    fn filter(&self) -> CorpusFilter {
        self.filter
    }

    fn read_texts(&self, contents: &str) -> Result<Vec<String>, CorpusError> {
        let mut reader = csv::Reader::from_reader(contents.as_bytes());
        let mut texts = Vec::new();
        for row in reader.deserialize::<ArchiveRow>() {
            let row = row?;
            if !self.filter.accepts_post(row.is_retweet(), row.is_reply()) {
                continue;
            }
            let text = clean_post(&row.text);
            if !text.is_empty() {
                texts.push(text);
            }
        }
        Ok(texts)
    }
}

impl CorpusProvider for ArchiveCsvCorpus {
    fn training_texts(&mut self) -> Result<Vec<String>, CorpusError> {
        load_file_corpus(self)
    }
}
