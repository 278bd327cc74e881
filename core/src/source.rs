use alloc::vec::Vec;

use crate::*;

/// Provider of category and clue content.
///
/// Futures are awaited on a single-threaded executor, so implementations need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait DataSource {
    /// Returns `count` distinct category ids drawn uniformly from a pool of `pool_size` categories.
    async fn pick_categories(&self, pool_size: usize, count: usize) -> Result<Vec<CategoryId>>;

    async fn fetch_category(&self, id: CategoryId) -> Result<CategoryDetail>;
}

/// Receives the busy indicator around a session build.
pub trait StatusSink {
    fn begin(&self);
    fn end(&self);
}

impl<T: DataSource + ?Sized> DataSource for &T {
    async fn pick_categories(&self, pool_size: usize, count: usize) -> Result<Vec<CategoryId>> {
        (**self).pick_categories(pool_size, count).await
    }

    async fn fetch_category(&self, id: CategoryId) -> Result<CategoryDetail> {
        (**self).fetch_category(id).await
    }
}
