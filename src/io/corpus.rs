/// Corpus providers — where training texts come from.
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("RON serialization error: {0}")]
    Serialize(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("no corpus available: {0}")]
    Unavailable(String),
}

/// Supplies the raw texts a chain is trained on, with HTML entities
/// already decoded.
pub trait CorpusProvider {
    fn training_texts(&mut self) -> Result<Vec<String>, CorpusError>;
}

impl CorpusProvider for Vec<String> {
    fn training_texts(&mut self) -> Result<Vec<String>, CorpusError> {
        Ok(self.clone())
    }
}

/// Which posts to leave out of the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusFilter {
    pub ignore_retweets: bool,
    pub ignore_replies: bool,
}

impl Default for CorpusFilter {
    fn default() -> Self {
        Self {
            ignore_retweets: true,
            ignore_replies: false,
        }
    }
}

impl CorpusFilter {
    /// Decide from the text alone, for sources with no post metadata:
    /// `RT @` marks a retweet and a leading `@` marks a reply.
    pub fn accepts(&self, text: &str) -> bool {
        self.accepts_post(text.starts_with("RT @"), text.starts_with('@'))
    }

    pub fn accepts_post(&self, is_retweet: bool, is_reply: bool) -> bool {
        !(self.ignore_retweets && is_retweet) && !(self.ignore_replies && is_reply)
    }
}

/// A corpus backed by a single file that can be re-read and cached.
pub trait FileCorpus {
    fn path(&self) -> &Path;

    fn filter(&self) -> CorpusFilter;

    /// Extract, decode and filter the posts in the file's contents.
    fn read_texts(&self, contents: &str) -> Result<Vec<String>, CorpusError>;
}

/// Read `corpus` from disk in one go.
pub(crate) fn load_file_corpus<F: FileCorpus>(corpus: &F) -> Result<Vec<String>, CorpusError> {
    let contents = std::fs::read_to_string(corpus.path())?;
    let texts = corpus.read_texts(&contents)?;
    info!(
        "loaded {} texts from '{}'",
        texts.len(),
        corpus.path().display()
    );
    Ok(texts)
}

/// Trim a raw post and decode its HTML entities.
pub(crate) fn clean_post(raw: &str) -> String {
    html_escape::decode_html_entities(raw.trim()).into_owned()
}

/// A plain text file with one post per line.
#[derive(Debug, Clone)]
pub struct TextFileCorpus {
    path: PathBuf,
    filter: CorpusFilter,
}

impl TextFileCorpus {
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

    /// Decode, trim and filter the lines of `contents`.
    pub fn parse(&self, contents: &str) -> Vec<String> {
        contents
            .lines()
            .map(clean_post)
            .filter(|line| !line.is_empty() && self.filter.accepts(line))
            .collect()
    }
}

impl FileCorpus for TextFileCorpus {
    fn path(&self) -> &Path {
        &self.path
    }

    fn filter(&self) -> CorpusFilter {
        self.filter
    }

    fn read_texts(&self, contents: &str) -> Result<Vec<String>, CorpusError> {
        Ok(self.parse(contents))
    }
}

impl CorpusProvider for TextFileCorpus {
    fn training_texts(&mut self) -> Result<Vec<String>, CorpusError> {
        load_file_corpus(self)
    }
}

/// A filtered corpus snapshot, tagged with the digest of the file it came
/// from and the filter that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusSample {
    pub source_hash: String,
    pub filter: CorpusFilter,
    pub texts: Vec<String>,
}

/// A file corpus fronted by a RON cache of its filtered texts.
///
/// The cache is used while both its digest and its filter match the source.
/// Otherwise the source is re-read and the cache rewritten. When the source
/// is missing or yields no texts, the cached texts are used instead.
#[derive(Debug, Clone)]
pub struct CachedCorpus<S> {
    source: S,
    cache_path: PathBuf,
}

impl<S: FileCorpus> CachedCorpus<S> {
    pub fn new(source: S, cache_path: impl Into<PathBuf>) -> Self {
        Self {
            source,
            cache_path: cache_path.into(),
        }
    }

    fn load_sample(&self) -> Option<CorpusSample> {
        let contents = std::fs::read_to_string(&self.cache_path).ok()?;
        match ron::from_str(&contents) {
            Ok(sample) => Some(sample),
            Err(e) => {
                warn!(
                    "ignoring unreadable corpus cache '{}': {}",
                    self.cache_path.display(),
                    e
                );
                None
            }
        }
    }

    fn write_sample(&self, sample: &CorpusSample) -> Result<(), CorpusError> {
        let serialized = ron::ser::to_string_pretty(sample, ron::ser::PrettyConfig::default())
            .map_err(|e| CorpusError::Serialize(e.to_string()))?;
        std::fs::write(&self.cache_path, serialized)?;
        Ok(())
    }
}

impl<S: FileCorpus> CorpusProvider for CachedCorpus<S> {
    fn training_texts(&mut self) -> Result<Vec<String>, CorpusError> {
        let cached = self.load_sample();
        let path = self.source.path();

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                return match cached {
                    Some(sample) => {
                        warn!(
                            "corpus source '{}' unreadable ({}), using cache",
                            path.display(),
                            e
                        );
                        Ok(sample.texts)
                    }
                    None => Err(CorpusError::Unavailable(format!(
                        "'{}' is unreadable and there is no cache: {}",
                        path.display(),
                        e
                    ))),
                };
            }
        };

        let source_hash = source_digest(contents.as_bytes());
        let filter = self.source.filter();
        if let Some(sample) = &cached {
            if sample.source_hash == source_hash && sample.filter == filter {
                debug!("corpus cache is current ({} texts)", sample.texts.len());
                return Ok(sample.texts.clone());
            }
        }

        let texts = match self.source.read_texts(&contents) {
            Ok(texts) => texts,
            Err(e) => {
                return match cached {
                    Some(sample) => {
                        warn!("corpus source '{}' unparseable ({}), using cache", path.display(), e);
                        Ok(sample.texts)
                    }
                    None => Err(e),
                };
            }
        };
        if texts.is_empty() {
            if let Some(sample) = cached {
                warn!("corpus source yielded no texts, using cache");
                return Ok(sample.texts);
            }
            return Ok(texts);
        }

        let sample = CorpusSample {
            source_hash,
            filter,
            texts,
        };
        if let Err(e) = self.write_sample(&sample) {
            warn!(
                "could not write corpus cache '{}': {}",
                self.cache_path.display(),
                e
            );
        } else {
            info!(
                "cached {} texts to '{}'",
                sample.texts.len(),
                self.cache_path.display()
            );
        }
        Ok(sample.texts)
    }
}

/// Hex BLAKE3 digest of a corpus file.
fn source_digest(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}
