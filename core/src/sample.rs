use alloc::vec::Vec;
use core::cell::RefCell;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::*;

/// Uniform draws without replacement, reproducible from a seed.
#[derive(Debug)]
pub struct RandomPicker {
    rng: RefCell<SmallRng>,
}

impl RandomPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RefCell::new(SmallRng::seed_from_u64(seed)),
        }
    }

    /// Draws `count` distinct items from `pool` in random order, or `None` when the pool is too small.
    pub fn pick<T>(&self, pool: Vec<T>, count: usize) -> Option<Vec<T>> {
        if pool.len() < count {
            return None;
        }

        let indices = {
            let mut rng = self.rng.borrow_mut();
            rand::seq::index::sample(&mut *rng, pool.len(), count)
        };

        let mut slots: Vec<Option<T>> = pool.into_iter().map(Some).collect();
        Some(
            indices
                .into_iter()
                .filter_map(|index| slots[index].take())
                .collect(),
        )
    }

    pub fn pick_category_ids(
        &self,
        pool: Vec<CategoryId>,
        count: usize,
    ) -> Result<Vec<CategoryId>> {
        let available = pool.len();
        self.pick(pool, count).ok_or(GameError::InsufficientPool {
            available,
            requested: count,
        })
    }
}
