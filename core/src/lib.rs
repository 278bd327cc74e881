#![no_std]

extern crate alloc;

pub use board::*;
pub use clue::*;
pub use controller::*;
pub use error::*;
pub use sample::*;
pub use source::*;
pub use types::*;

mod board;
mod clue;
mod controller;
mod error;
mod sample;
mod source;
mod types;

/// Columns on the board, one per category.
pub const NUM_CATEGORIES: usize = 6;

/// Rows on the board, one clue per category each.
pub const NUM_CLUES_PER_CATEGORY: usize = 5;

/// How many categories a data source is asked to list before picking [`NUM_CATEGORIES`] of them.
pub const CATEGORY_POOL_SIZE: usize = 100;
