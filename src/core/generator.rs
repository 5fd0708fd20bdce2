/// Generator — weighted random walk over a trained chain.
use log::{debug, warn};
use rand::Rng;
use thiserror::Error;

use crate::core::chain::Chain;
use crate::schema::token::Token;

/// Default cap on the number of tokens one walk may produce.
pub const DEFAULT_MAX_TOKENS: usize = 200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("the chain was trained on an empty corpus")]
    EmptyCorpus,
    #[error("walk reached {0:?}, which has no recorded successors")]
    DeadEnd(Token),
    #[error("random draw {draw} is outside [0, {total})")]
    DrawOutOfRange { draw: u32, total: u32 },
}

/// Source of uniform draws for the walk.
///
/// Every `rand::Rng` is one; tests can supply scripted values instead.
pub trait RandomSource {
    /// A uniformly distributed integer in `[0, bound)`. `bound` is never zero.
    fn below(&mut self, bound: u32) -> u32;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn below(&mut self, bound: u32) -> u32 {
        self.gen_range(0..bound)
    }
}

/// Walks a [`Chain`] from `Begin` to `End`.
#[derive(Debug, Clone, Copy)]
pub struct Walker<'a> {
    chain: &'a Chain,
    max_tokens: usize,
}

impl<'a> Walker<'a> {
    pub fn new(chain: &'a Chain) -> Self {
        Self {
            chain,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Stop walks after `max_tokens` tokens even if `End` was not reached.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Produce one token sequence, without the `Begin` and `End` markers.
    ///
    /// An empty sequence is a valid result (the walk went straight from
    /// `Begin` to `End`). Walks longer than the token cap are cut short and
    /// returned as they stand.
    pub fn walk<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Vec<Token>, GenerateError> {
        if self.chain.is_empty() {
            return Err(GenerateError::EmptyCorpus);
        }

        let mut output = Vec::new();
        let mut current = &Token::Begin;

        loop {
            let next = self.step(current, rng)?;
            if *next == Token::End {
                break;
            }
            if output.len() >= self.max_tokens {
                warn!(
                    "walk stopped at the {}-token cap before reaching End",
                    self.max_tokens
                );
                break;
            }
            output.push(next.clone());
            current = next;
        }

        debug!("walked {} tokens", output.len());
        Ok(output)
    }

    /// Choose the successor of `current`, weighted by observed counts.
    ///
    /// Draws `target` in `[0, total)` and scans the successors in insertion
    /// order; the first one whose count exceeds what is left of `target` wins.
    pub fn step<R: RandomSource + ?Sized>(
        &self,
        current: &Token,
        rng: &mut R,
    ) -> Result<&'a Token, GenerateError> {
        let chain = self.chain;
        let dead_end = || GenerateError::DeadEnd(current.clone());

        let successors = chain.successors(current).ok_or_else(dead_end)?;
        let total = chain.total(current).ok_or_else(dead_end)?;
        if successors.is_empty() || total == 0 {
            return Err(dead_end());
        }

        let draw = rng.below(total);
        let mut remaining = draw;
        for (token, count) in successors {
            if remaining < *count {
                return Ok(token);
            }
            remaining -= count;
        }
        Err(GenerateError::DrawOutOfRange { draw, total })
    }
}
