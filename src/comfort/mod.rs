// Comfort message bank
//
// Static per-category pools of short supportive strings. The comfort pool
// backs pick_comfort_message; the reply pool holds the longer replies that
// can stand in for a generated answer (see FallbackPool).

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use thiserror::Error;

use crate::emotion::EmotionCategory;
use crate::sync::lock;

mod pools;

pub use pools::{comfort_pool, reply_pool};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComfortError {
    #[error("{pool:?} pool for '{category}' is empty")]
    EmptyPool {
        category: EmotionCategory,
        pool: FallbackPool,
    },
}

/// Which static table a degraded reply is drawn from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPool {
    /// Short affirmations (pick_comfort_message)
    #[default]
    Comfort,
    /// Longer two-sentence replies
    Reply,
}

impl FallbackPool {
    /// Static pool for a category
    pub fn pool(&self, category: EmotionCategory) -> &'static [&'static str] {
        match self {
            FallbackPool::Comfort => comfort_pool(category),
            FallbackPool::Reply => reply_pool(category),
        }
    }
}

/// Uniform pick from a pool with the given random source
///
/// Returns None only for an empty pool.
pub fn pick_from<R: Rng + ?Sized>(pool: &'static [&'static str], rng: &mut R) -> Option<&'static str> {
    pool.choose(rng).copied()
}

/// Comfort bank with an owned, seedable random source
pub struct ComfortBank {
    rng: Mutex<StdRng>,
}

impl ComfortBank {
    /// Create a bank around a random source
    ///
    /// Fails if any category owns an empty pool in either table.
    pub fn new(rng: StdRng) -> Result<Self, ComfortError> {
        verify_pools()?;
        Ok(Self {
            rng: Mutex::new(rng),
        })
    }

    /// Reproducible bank for tests and demos
    pub fn seeded(seed: u64) -> Result<Self, ComfortError> {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Bank seeded from OS entropy
    pub fn from_entropy() -> Result<Self, ComfortError> {
        Self::new(StdRng::from_entropy())
    }

    /// Uniform random pick from the category's comfort pool
    pub fn pick_comfort_message(&self, category: EmotionCategory) -> &'static str {
        self.pick(category, FallbackPool::Comfort)
    }

    /// Uniform random pick from the selected table
    pub fn pick(&self, category: EmotionCategory, pool: FallbackPool) -> &'static str {
        let mut rng = lock(&self.rng);

        // Pools are verified non-empty at construction
        pick_from(pool.pool(category), &mut *rng).unwrap_or_default()
    }
}

/// Check that every category owns a non-empty pool in both tables
pub fn verify_pools() -> Result<(), ComfortError> {
    for category in EmotionCategory::ALL {
        for pool in [FallbackPool::Comfort, FallbackPool::Reply] {
            if pool.pool(category).is_empty() {
                return Err(ComfortError::EmptyPool { category, pool });
            }
        }
    }
    Ok(())
}
