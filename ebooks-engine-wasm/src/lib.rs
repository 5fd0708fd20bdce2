//! WASM bindings for ebooks-engine — powers the in-browser demo.

use wasm_bindgen::prelude::*;

use ebooks_engine::core::config::EngineConfig;
use ebooks_engine::core::pipeline::EbooksEngine;
use ebooks_engine::io::corpus::TextFileCorpus;
use ebooks_engine::schema::token::Token;

// ---------------------------------------------------------------------------
// Embedded demo corpus — compiled into the WASM binary
// ---------------------------------------------------------------------------
mod data {
    pub const DEMO_POSTS: &str = include_str!("../../demo_data/posts.txt");
}

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Deserialize)]
struct ConfigInput {
    max_length: Option<usize>,
    max_tokens: Option<usize>,
}

#[derive(serde::Serialize)]
struct ChainInfo {
    texts: usize,
    predecessors: usize,
    transitions: usize,
    observations: u64,
    openers: Vec<OpenerInfo>,
}

#[derive(serde::Serialize)]
struct OpenerInfo {
    token: String,
    count: u32,
}

// ---------------------------------------------------------------------------
// EbooksDemo — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct EbooksDemo {
    engine: EbooksEngine,
    texts: Vec<String>,
}

#[wasm_bindgen]
impl EbooksDemo {
    /// Create a demo trained on the built-in sample posts.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<EbooksDemo, JsError> {
        Self::from_corpus(data::DEMO_POSTS, seed)
    }

    /// Create a demo trained on newline-separated posts supplied by the page.
    pub fn from_corpus(corpus: &str, seed: u64) -> Result<EbooksDemo, JsError> {
        Self::build(parse_posts(corpus), EngineConfig::default(), seed)
    }

    /// Generate one post. Returns an empty string when the walk produced
    /// nothing.
    pub fn generate(&mut self) -> Result<String, JsError> {
        let text = self
            .engine
            .generate()
            .map_err(|e| JsError::new(&format!("Generation error: {e}")))?;
        Ok(text.unwrap_or_default())
    }

    /// Generate several posts. Returns a JSON array of strings.
    pub fn generate_variants(&mut self, count: usize) -> Result<String, JsError> {
        let variants = self
            .engine
            .generate_variants(count)
            .map_err(|e| JsError::new(&format!("Generation error: {e}")))?;
        serde_json::to_string(&variants)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return a JSON summary of the trained chain and its ten most common
    /// opening tokens.
    pub fn chain_info(&self) -> Result<String, JsError> {
        let chain = self.engine.chain();
        let stats = chain.stats();

        let mut openers: Vec<OpenerInfo> = chain
            .successors(&Token::Begin)
            .unwrap_or(&[])
            .iter()
            .map(|(token, count)| OpenerInfo {
                token: token.content().unwrap_or("<end>").to_string(),
                count: *count,
            })
            .collect();
        openers.sort_by(|a, b| b.count.cmp(&a.count));
        openers.truncate(10);

        let info = ChainInfo {
            texts: self.texts.len(),
            predecessors: stats.predecessors,
            transitions: stats.transitions,
            observations: stats.observations,
            openers,
        };
        serde_json::to_string(&info)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Apply length limits given as JSON, e.g. `{"max_length": 280}`.
    /// Retrains with the same posts and seed.
    pub fn configure(&mut self, config_json: &str) -> Result<(), JsError> {
        let input: ConfigInput = serde_json::from_str(config_json)
            .map_err(|e| JsError::new(&format!("Invalid config JSON: {e}")))?;
        let mut config = self.engine.config().clone();
        if let Some(max_length) = input.max_length {
            config.max_length = max_length;
        }
        if let Some(max_tokens) = input.max_tokens {
            config.max_tokens = max_tokens;
        }
        let seed = self.engine.seed();
        *self = Self::build(self.texts.clone(), config, seed)?;
        Ok(())
    }

    /// Reset the generator with a new seed (same posts).
    pub fn reset(&mut self, seed: u64) -> Result<(), JsError> {
        let config = self.engine.config().clone();
        *self = Self::build(self.texts.clone(), config, seed)?;
        Ok(())
    }
}

// Private helpers
impl EbooksDemo {
    fn build(texts: Vec<String>, config: EngineConfig, seed: u64) -> Result<EbooksDemo, JsError> {
        let engine = EbooksEngine::builder()
            .seed(seed)
            .config(config)
            .with_texts(texts.iter().cloned())
            .build()
            .map_err(|e| JsError::new(&format!("Engine build error: {e}")))?;
        Ok(EbooksDemo { engine, texts })
    }
}

fn parse_posts(corpus: &str) -> Vec<String> {
    TextFileCorpus::new("<inline>").parse(corpus)
}
