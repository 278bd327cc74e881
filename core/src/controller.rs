use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::cell::Cell;
use futures_util::future::try_join_all;

use crate::*;

/// Builds sessions from a [`DataSource`] and installs them on a [`BoardModel`].
#[derive(Debug)]
pub struct GameController<D> {
    source: D,
    pool_size: usize,
    picker: RandomPicker,
    in_flight: Cell<bool>,
}

impl<D: DataSource> GameController<D> {
    pub fn new(source: D, seed: u64) -> Self {
        Self::with_pool_size(source, seed, CATEGORY_POOL_SIZE)
    }

    pub fn with_pool_size(source: D, seed: u64, pool_size: usize) -> Self {
        if pool_size < NUM_CATEGORIES {
            log::warn!(
                "Category pool of {} cannot fill {} columns, loads will fail",
                pool_size,
                NUM_CATEGORIES
            );
        }
        Self {
            source,
            pool_size,
            picker: RandomPicker::new(seed),
            in_flight: Cell::new(false),
        }
    }

    pub fn source(&self) -> &D {
        &self.source
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.get()
    }

    /// Fetches a full board and installs it on `board`.
    ///
    /// `status` sees exactly one `begin`/`end` pair per accepted call, whatever the outcome. A call made while
    /// another build is still running is rejected with [`GameError::SessionInProgress`] and does not touch
    /// `status`. On failure `board` keeps whatever it was showing.
    pub async fn start_session<'b, S>(
        &self,
        board: &'b mut BoardModel,
        status: &S,
    ) -> Result<&'b Session>
    where
        S: StatusSink + ?Sized,
    {
        if self.in_flight.replace(true) {
            log::warn!("session start rejected, another one is loading");
            return Err(GameError::SessionInProgress);
        }
        status.begin();
        let _busy = BusyGuard {
            status,
            in_flight: &self.in_flight,
        };

        log::debug!("starting session");
        let categories = self.assemble().await.inspect_err(|err| {
            log::debug!("session build failed: {}", err);
        })?;
        board.initialize(categories)
    }

    async fn assemble(&self) -> Result<Vec<Category>> {
        let ids = self
            .source
            .pick_categories(self.pool_size, NUM_CATEGORIES)
            .await?;
        check_ids(&ids)?;
        log::debug!("picked categories: {:?}", ids);

        let details = try_join_all(ids.iter().map(|&id| self.source.fetch_category(id))).await?;

        // draws happen in column order so completion order cannot shift them
        ids.into_iter()
            .zip(details)
            .map(|(id, detail)| self.draw_clues(id, detail))
            .collect()
    }

    fn draw_clues(&self, id: CategoryId, detail: CategoryDetail) -> Result<Category> {
        let CategoryDetail { title, clues } = detail;

        let mut questions = BTreeSet::new();
        let distinct: Vec<ClueText> = clues
            .into_iter()
            .filter(|clue| questions.insert(clue.question.clone()))
            .collect();
        let available = distinct.len();

        let clues = self
            .picker
            .pick(distinct, NUM_CLUES_PER_CATEGORY)
            .ok_or(GameError::InsufficientClues {
                category: id,
                available,
                requested: NUM_CLUES_PER_CATEGORY,
            })?;

        log::trace!("category {} loaded: {}", id, title);
        Ok(Category::new(title, clues.into_iter().map(Clue::from).collect()))
    }
}

fn check_ids(ids: &[CategoryId]) -> Result<()> {
    if ids.len() < NUM_CATEGORIES {
        return Err(GameError::InsufficientPool {
            available: ids.len(),
            requested: NUM_CATEGORIES,
        });
    }
    if ids.len() > NUM_CATEGORIES {
        return Err(GameError::InvalidShape);
    }

    let mut seen = BTreeSet::new();
    match ids.iter().find(|&&id| !seen.insert(id)) {
        Some(&id) => Err(GameError::DuplicateCategory(id)),
        None => Ok(()),
    }
}

/// Clears the busy state when a build ends, including on early return.
struct BusyGuard<'a, S: StatusSink + ?Sized> {
    status: &'a S,
    in_flight: &'a Cell<bool>,
}

impl<S: StatusSink + ?Sized> Drop for BusyGuard<'_, S> {
    fn drop(&mut self) {
        self.in_flight.set(false);
        self.status.end();
    }
}
