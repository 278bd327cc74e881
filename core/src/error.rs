use alloc::string::String;
use thiserror::Error;

use crate::{CategoryId, NUM_CATEGORIES, NUM_CLUES_PER_CATEGORY};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(
        "Board must have {} categories of {} clues each",
        NUM_CATEGORIES,
        NUM_CLUES_PER_CATEGORY
    )]
    InvalidShape,
    #[error("Cell ({col}, {row}) is out of range")]
    OutOfRange { col: usize, row: usize },
    #[error("Category pool too small, requested {requested} but only {available} available")]
    InsufficientPool { available: usize, requested: usize },
    #[error("Category {category} has {available} usable clues, {requested} needed")]
    InsufficientClues {
        category: CategoryId,
        available: usize,
        requested: usize,
    },
    #[error("Category {0} was picked twice")]
    DuplicateCategory(CategoryId),
    #[error("A session is already loading")]
    SessionInProgress,
    #[error("Data source failure: {0}")]
    DataSourceFailure(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
