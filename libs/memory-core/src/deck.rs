//! Deck generation.
//!
//! Every token chosen for the round is placed on exactly two cards and the
//! resulting multiset is permuted with a Fisher-Yates shuffle, so every
//! arrangement is equally likely.

use std::collections::HashSet;
use std::ops::Index;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::error::{ConfigError, Result};
use crate::types::{Card, RoundConfig};

/// Ordered set of `2 × pair_count` cards for one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deck {
    cards: Vec<Card>,
    pair_count: usize,
}

impl Deck {
    /// Build a deck for `config`, seeded if the config asks for it.
    pub fn shuffled(config: &RoundConfig) -> Result<Self> {
        match config.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                generate_deck(config.pair_count, &config.tokens, &mut rng)
            }
            None => generate_deck(config.pair_count, &config.tokens, &mut rand::rng()),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Positions holding `token`, in deck order.
    pub fn positions_of(&self, token: &str) -> Vec<usize> {
        self.cards
            .iter()
            .filter(|card| card.token == token)
            .map(|card| card.id)
            .collect()
    }

    pub(crate) fn card_mut(&mut self, index: usize) -> &mut Card {
        &mut self.cards[index]
    }
}

impl Index<usize> for Deck {
    type Output = Card;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cards[index]
    }
}

/// Shuffle `pair_count` pairs drawn from `tokens` into a fresh deck.
///
/// Duplicate tokens collapse to one. When more distinct tokens are supplied
/// than needed, a random subset is used.
pub fn generate_deck<R>(pair_count: usize, tokens: &[String], rng: &mut R) -> Result<Deck>
where
    R: Rng + ?Sized,
{
    let mut seen = HashSet::new();
    let mut pool: Vec<&String> = tokens.iter().filter(|t| seen.insert(*t)).collect();

    if pool.len() < pair_count {
        return Err(ConfigError::NotEnoughTokens {
            required: pair_count,
            available: pool.len(),
        });
    }

    if pool.len() > pair_count {
        pool.shuffle(rng);
        pool.truncate(pair_count);
    }

    let mut faces: Vec<&String> = pool.iter().flat_map(|t| [*t, *t]).collect();
    faces.shuffle(rng);

    let cards = faces
        .into_iter()
        .enumerate()
        .map(|(id, token)| Card::new(id, token.clone()))
        .collect();

    Ok(Deck { cards, pair_count })
}
