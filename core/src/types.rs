use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::RevealState;

/// Identifier the data source assigns to a category.
pub type CategoryId = u64;

/// Cell address `(col, row)`: `col` selects the category, `row` the clue within it.
pub type Coord2 = (usize, usize);

/// Raw question/answer pair as delivered by a data source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueText {
    pub question: String,
    pub answer: String,
}

impl ClueText {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// A category as delivered by a data source, with every clue it knows about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDetail {
    pub title: String,
    pub clues: Vec<ClueText>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Clue {
    question: String,
    answer: String,
    reveal: RevealState,
}

impl Clue {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            reveal: RevealState::Hidden,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn reveal_state(&self) -> RevealState {
        self.reveal
    }

    pub fn label(&self) -> &str {
        match self.reveal {
            RevealState::Hidden => RevealState::HIDDEN_LABEL,
            RevealState::Question => &self.question,
            RevealState::Answer => &self.answer,
        }
    }

    pub(crate) fn advance(&mut self) -> RevealState {
        self.reveal = self.reveal.next();
        self.reveal
    }

    pub(crate) fn hide(&mut self) {
        self.reveal = RevealState::Hidden;
    }
}

impl From<ClueText> for Clue {
    fn from(ClueText { question, answer }: ClueText) -> Self {
        Self::new(question, answer)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub title: String,
    pub clues: Vec<Clue>,
}

impl Category {
    pub fn new(title: impl Into<String>, clues: Vec<Clue>) -> Self {
        Self {
            title: title.into(),
            clues,
        }
    }
}
