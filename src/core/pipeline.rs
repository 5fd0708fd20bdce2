/// The generation pipeline: corpus → chain → walk → render → publish.
///
/// Owns the trained chain and the seeding state, and hands finished text to
/// a publisher.
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use thiserror::Error;

use crate::core::chain::Chain;
use crate::core::config::{ConfigError, EngineConfig};
use crate::core::generator::{GenerateError, RandomSource, Walker};
use crate::core::render::render;
use crate::io::corpus::{CorpusError, CorpusProvider};
use crate::io::publish::{PublishError, Publisher};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("the corpus contains no usable texts")]
    EmptyCorpus,
    #[error("generation error: {0}")]
    Generate(#[from] GenerateError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("corpus error: {0}")]
    Corpus(#[from] CorpusError),
    #[error("publish error: {0}")]
    Publish(#[from] PublishError),
    #[error("generation produced no text after {0} attempts")]
    GenerationFailed(u32),
}

/// The top-level generator. Built via `EbooksEngine::builder()`.
pub struct EbooksEngine {
    chain: Chain,
    config: EngineConfig,
    seed: u64,
    generation_count: u64,
}

/// Builder for constructing an `EbooksEngine`.
pub struct EbooksEngineBuilder {
    texts: Vec<String>,
    corpus: Option<Box<dyn CorpusProvider>>,
    config: Option<EngineConfig>,
    config_path: Option<String>,
    seed: Option<u64>,
}

impl EbooksEngine {
    pub fn builder() -> EbooksEngineBuilder {
        EbooksEngineBuilder {
            texts: Vec::new(),
            corpus: None,
            config: None,
            config_path: None,
            seed: None,
        }
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate one post with the engine's own seeded RNG.
    ///
    /// Returns `Ok(None)` when the walk went straight to `End`.
    pub fn generate(&mut self) -> Result<Option<String>, EngineError> {
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(self.generation_count));
        self.generation_count += 1;
        self.generate_with(&mut rng)
    }

    /// Generate one post drawing from `rng`.
    pub fn generate_with<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Option<String>, EngineError> {
        let tokens = Walker::new(&self.chain)
            .with_max_tokens(self.config.max_tokens)
            .walk(rng)?;
        if tokens.is_empty() {
            return Ok(None);
        }

        let text = render(&tokens, self.config.max_length);
        if text.is_empty() {
            return Ok(None);
        }
        Ok(Some(text))
    }

    /// Generate up to `count` posts, skipping empty walks.
    pub fn generate_variants(&mut self, count: usize) -> Result<Vec<String>, EngineError> {
        let mut results = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(text) = self.generate()? {
                results.push(text);
            }
        }
        Ok(results)
    }

    /// Generate a non-empty post and hand it to `publisher`.
    ///
    /// Retries empty output up to `max_attempts` times. Returns the text that
    /// was published.
    pub fn post(&mut self, publisher: &mut dyn Publisher) -> Result<String, EngineError> {
        let attempts = self.config.max_attempts;
        for attempt in 1..=attempts {
            match self.generate()? {
                Some(text) => {
                    publisher.publish(&text)?;
                    info!("posted on attempt {}: {:?}", attempt, text);
                    return Ok(text);
                }
                None => debug!("attempt {} produced no text", attempt),
            }
        }
        warn!("giving up after {} empty attempts", attempts);
        Err(EngineError::GenerationFailed(attempts))
    }
}

impl EbooksEngineBuilder {
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load the config from a RON file at build time.
    pub fn config_path(mut self, path: &str) -> Self {
        self.config_path = Some(path.to_string());
        self
    }

    /// Provide training texts directly (for testing without files).
    pub fn with_texts<I, S>(mut self, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.texts.extend(texts.into_iter().map(Into::into));
        self
    }

    /// Pull additional training texts from `corpus` at build time.
    pub fn corpus(mut self, corpus: Box<dyn CorpusProvider>) -> Self {
        self.corpus = Some(corpus);
        self
    }

    pub fn build(self) -> Result<EbooksEngine, EngineError> {
        let config = match (self.config, self.config_path) {
            (Some(config), _) => {
                config.validate()?;
                config
            }
            (None, Some(path)) => EngineConfig::load_from_ron(Path::new(&path))?,
            (None, None) => EngineConfig::default(),
        };

        let mut texts = self.texts;
        if let Some(mut corpus) = self.corpus {
            texts.extend(corpus.training_texts()?);
        }
        if texts.is_empty() {
            return Err(EngineError::EmptyCorpus);
        }

        let chain = Chain::train(&texts);
        let stats = chain.stats();
        info!(
            "trained on {} texts: {} predecessors, {} transitions",
            texts.len(),
            stats.predecessors,
            stats.transitions
        );

        let seed = self
            .seed
            .or(config.seed)
            .unwrap_or_else(rand::random::<u64>);
        debug!("engine seed {}", seed);

        Ok(EbooksEngine {
            chain,
            config,
            seed,
            generation_count: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Zeros;

    impl RandomSource for Zeros {
        fn below(&mut self, _bound: u32) -> u32 {
            0
        }
    }

    fn engine(texts: &[&str]) -> EbooksEngine {
        EbooksEngine::builder()
            .seed(42)
            .with_texts(texts.iter().copied())
            .build()
            .unwrap()
    }

    #[test]
    fn builder_rejects_empty_corpus() {
        let result = EbooksEngine::builder().seed(1).build();
        assert!(matches!(result, Err(EngineError::EmptyCorpus)));
    }

    #[test]
    fn builder_rejects_invalid_config() {
        let result = EbooksEngine::builder()
            .with_texts(["hello"])
            .config(EngineConfig {
                max_tokens: 0,
                ..EngineConfig::default()
            })
            .build();
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn builder_seed_overrides_config_seed() {
        let engine = EbooksEngine::builder()
            .with_texts(["hello"])
            .config(EngineConfig {
                seed: Some(5),
                ..EngineConfig::default()
            })
            .build()
            .unwrap();
        assert_eq!(engine.seed(), 5);

        let engine = EbooksEngine::builder()
            .with_texts(["hello"])
            .seed(9)
            .config(EngineConfig {
                seed: Some(5),
                ..EngineConfig::default()
            })
            .build()
            .unwrap();
        assert_eq!(engine.seed(), 9);
    }

    #[test]
    fn builder_merges_texts_and_corpus() {
        let engine = EbooksEngine::builder()
            .seed(1)
            .with_texts(["one"])
            .corpus(Box::new(vec!["two".to_string()]))
            .build()
            .unwrap();
        assert_eq!(engine.chain().total(&crate::schema::token::Token::Begin), Some(2));
    }

    #[test]
    fn generate_with_zeros_follows_first_branch() {
        let engine = engine(&["Hello bob", "Hello bob", "Hello john"]);
        let text = engine.generate_with(&mut Zeros).unwrap();
        assert_eq!(text.as_deref(), Some("Hello bob"));
    }

    #[test]
    fn generate_is_deterministic_per_seed() {
        let texts = ["the cat sat", "the dog ran", "a cat ran", "the cat ran off"];
        let mut first = engine(&texts);
        let mut second = engine(&texts);
        for _ in 0..10 {
            assert_eq!(first.generate().unwrap(), second.generate().unwrap());
        }
    }

    #[test]
    fn mention_only_corpus_yields_empty_output() {
        let mut engine = engine(&["@alice", "@bob http://x.com"]);
        assert_eq!(engine.generate().unwrap(), None);
        assert!(engine.generate_variants(3).unwrap().is_empty());
    }

    #[test]
    fn post_gives_up_on_empty_output() {
        let mut engine = engine(&["@alice"]);
        let mut posts: Vec<String> = Vec::new();
        let result = engine.post(&mut posts);
        assert!(matches!(result, Err(EngineError::GenerationFailed(5))));
        assert!(posts.is_empty());
    }

    #[test]
    fn post_publishes_generated_text() {
        let mut engine = engine(&["just one line"]);
        let mut posts: Vec<String> = Vec::new();
        let text = engine.post(&mut posts).unwrap();
        assert_eq!(text, "Just one line");
        assert_eq!(posts, vec![text]);
    }

    #[test]
    fn output_respects_max_length() {
        let long = "word ".repeat(100);
        let mut engine = EbooksEngine::builder()
            .seed(3)
            .with_texts([long.trim()])
            .config(EngineConfig {
                max_length: 30,
                ..EngineConfig::default()
            })
            .build()
            .unwrap();
        for text in engine.generate_variants(20).unwrap() {
            assert!(text.chars().count() <= 30, "too long: {text:?}");
        }
    }
}
