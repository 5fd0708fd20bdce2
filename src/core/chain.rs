/// Chain builder — transition counts between consecutive tokens.
use log::debug;
use rustc_hash::FxHashMap;

use crate::core::tokenizer::tokenize;
use crate::schema::token::Token;

/// Successors of one predecessor, in first-seen order.
pub type Successors = Vec<(Token, u32)>;

/// A trained transition table.
///
/// Maps each predecessor token to the tokens observed right after it, with
/// occurrence counts, plus the per-predecessor total of those counts. Built
/// once by [`Chain::train`] and read-only afterwards. `Begin` is always a
/// key; `End` never is.
#[derive(Debug, Clone)]
pub struct Chain {
    transitions: FxHashMap<Token, Successors>,
    totals: FxHashMap<Token, u32>,
}

/// Size summary of a trained chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainStats {
    /// Distinct predecessor tokens, `Begin` included.
    pub predecessors: usize,
    /// Distinct predecessor/successor pairs.
    pub transitions: usize,
    /// Sum of all transition counts.
    pub observations: u64,
}

impl Chain {
    /// Tokenize and train on raw texts.
    pub fn train<I, S>(texts: I) -> Chain
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokenized: Vec<Vec<Token>> = texts
            .into_iter()
            .map(|text| tokenize(text.as_ref()))
            .collect();
        Self::from_tokenized(&tokenized)
    }

    /// Train on already tokenized texts.
    ///
    /// Each sequence is walked after its leading `Begin`. Mentions and links
    /// are dropped without moving the predecessor, so the tokens around them
    /// are linked directly. Content is lower-cased before it becomes a key,
    /// and every text closes with a transition into `End`.
    pub fn from_tokenized(texts: &[Vec<Token>]) -> Chain {
        let mut transitions: FxHashMap<Token, Successors> = FxHashMap::default();
        transitions.insert(Token::Begin, Vec::new());

        for tokens in texts {
            let mut predecessor = Token::Begin;
            for token in tokens.iter().skip_while(|t| **t == Token::Begin) {
                if token.is_sentinel() || token.is_mention_or_link() {
                    continue;
                }
                let token = token.lowercased();
                add_transition(&mut transitions, predecessor, token.clone());
                predecessor = token;
            }
            add_transition(&mut transitions, predecessor, Token::End);
        }

        let totals = compute_totals(&transitions);
        let chain = Chain { transitions, totals };
        debug!(
            "trained chain on {} texts: {:?}",
            texts.len(),
            chain.stats()
        );
        chain
    }

    /// Successors recorded after `token`, if it was ever a predecessor.
    pub fn successors(&self, token: &Token) -> Option<&[(Token, u32)]> {
        self.transitions.get(token).map(Vec::as_slice)
    }

    /// Sum of successor counts for `token`. Absent for `End`, for unseen
    /// tokens, and for `Begin` of an empty chain.
    pub fn total(&self, token: &Token) -> Option<u32> {
        self.totals.get(token).copied()
    }

    /// Number of times `to` was observed directly after `from`.
    pub fn count(&self, from: &Token, to: &Token) -> u32 {
        self.successors(from)
            .and_then(|succ| succ.iter().find(|(tok, _)| tok == to))
            .map_or(0, |(_, count)| *count)
    }

    /// True when nothing was trained, i.e. `Begin` has no successors.
    pub fn is_empty(&self) -> bool {
        self.successors(&Token::Begin).map_or(true, <[_]>::is_empty)
    }

    /// Iterate predecessors and their successors, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Token, &[(Token, u32)])> {
        self.transitions
            .iter()
            .map(|(token, succ)| (token, succ.as_slice()))
    }

    pub fn stats(&self) -> ChainStats {
        ChainStats {
            predecessors: self.transitions.len(),
            transitions: self.transitions.values().map(Vec::len).sum(),
            observations: self.totals.values().map(|&t| u64::from(t)).sum(),
        }
    }
}

/// Add a transition, incrementing its count.
fn add_transition(table: &mut FxHashMap<Token, Successors>, predecessor: Token, next: Token) {
    let entries = table.entry(predecessor).or_default();
    if let Some(entry) = entries.iter_mut().find(|(tok, _)| *tok == next) {
        entry.1 += 1;
    } else {
        entries.push((next, 1));
    }
}

fn compute_totals(table: &FxHashMap<Token, Successors>) -> FxHashMap<Token, u32> {
    table
        .iter()
        .filter(|(_, succ)| !succ.is_empty())
        .map(|(token, succ)| (token.clone(), succ.iter().map(|(_, c)| c).sum::<u32>()))
        .collect()
}
