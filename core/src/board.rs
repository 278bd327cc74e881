use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Every category of one played game, in selection order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Category>", into = "Vec<Category>")]
pub struct Session {
    categories: Vec<Category>,
}

impl Session {
    /// Checks the board shape and resets every clue to `Hidden`.
    pub fn new(mut categories: Vec<Category>) -> Result<Self> {
        if categories.len() != NUM_CATEGORIES
            || categories
                .iter()
                .any(|category| category.clues.len() != NUM_CLUES_PER_CATEGORY)
        {
            return Err(GameError::InvalidShape);
        }

        for clue in categories.iter_mut().flat_map(|c| c.clues.iter_mut()) {
            clue.hide();
        }

        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn clue_at(&self, (col, row): Coord2) -> Result<&Clue> {
        self.categories
            .get(col)
            .and_then(|category| category.clues.get(row))
            .ok_or(GameError::OutOfRange { col, row })
    }

    fn clue_at_mut(&mut self, (col, row): Coord2) -> Result<&mut Clue> {
        self.categories
            .get_mut(col)
            .and_then(|category| category.clues.get_mut(row))
            .ok_or(GameError::OutOfRange { col, row })
    }
}

impl TryFrom<Vec<Category>> for Session {
    type Error = GameError;

    fn try_from(categories: Vec<Category>) -> Result<Self> {
        Self::new(categories)
    }
}

impl From<Session> for Vec<Category> {
    fn from(session: Session) -> Self {
        session.categories
    }
}

/// Holds the active session and applies clicks to it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardModel {
    session: Option<Session>,
}

impl BoardModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current session. A rejected shape keeps the old one.
    pub fn initialize(&mut self, categories: Vec<Category>) -> Result<&Session> {
        let session = Session::new(categories)?;
        log::debug!("board initialized with {} categories", session.categories.len());
        Ok(self.session.insert(session))
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }

    /// Grid size as `(columns, rows)`.
    pub const fn size(&self) -> Coord2 {
        (NUM_CATEGORIES, NUM_CLUES_PER_CATEGORY)
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.session
            .iter()
            .flat_map(|session| session.categories.iter())
            .map(|category| category.title.as_str())
    }

    pub fn reveal_state(&self, coords: Coord2) -> Result<RevealState> {
        self.clue_at(coords).map(Clue::reveal_state)
    }

    pub fn cell_label(&self, coords: Coord2) -> Result<&str> {
        self.clue_at(coords).map(Clue::label)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealState> {
        let clue = self.clue_at_mut(coords)?;
        let before = clue.reveal_state();
        let after = clue.advance();
        if before != after {
            log::trace!("{:?}: {:?} -> {:?}", coords, before, after);
        }
        Ok(after)
    }

    fn clue_at(&self, (col, row): Coord2) -> Result<&Clue> {
        match &self.session {
            Some(session) => session.clue_at((col, row)),
            None => Err(GameError::OutOfRange { col, row }),
        }
    }

    fn clue_at_mut(&mut self, (col, row): Coord2) -> Result<&mut Clue> {
        match &mut self.session {
            Some(session) => session.clue_at_mut((col, row)),
            None => Err(GameError::OutOfRange { col, row }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    fn categories(count: usize, clues: usize) -> Vec<Category> {
        (0..count)
            .map(|col| {
                let clues = (0..clues)
                    .map(|row| Clue::new(format!("q{col}-{row}"), format!("a{col}-{row}")))
                    .collect();
                Category::new(format!("category {col}"), clues)
            })
            .collect()
    }

    fn loaded_board() -> BoardModel {
        let mut board = BoardModel::new();
        board
            .initialize(categories(NUM_CATEGORIES, NUM_CLUES_PER_CATEGORY))
            .unwrap();
        board
    }

    #[test]
    fn every_cell_steps_question_then_answer() {
        let mut board = loaded_board();
        let (cols, rows) = board.size();

        for col in 0..cols {
            for row in 0..rows {
                let coords = (col, row);
                assert_eq!(board.cell_label(coords).unwrap(), "?");

                assert_eq!(board.reveal(coords).unwrap(), RevealState::Question);
                assert_eq!(board.cell_label(coords).unwrap(), format!("q{col}-{row}"));

                assert_eq!(board.reveal(coords).unwrap(), RevealState::Answer);
                assert_eq!(board.cell_label(coords).unwrap(), format!("a{col}-{row}"));
            }
        }
    }

    #[test]
    fn answer_absorbs_further_clicks() {
        let mut board = loaded_board();
        board.reveal((2, 3)).unwrap();
        board.reveal((2, 3)).unwrap();

        for _ in 0..10 {
            assert_eq!(board.reveal((2, 3)).unwrap(), RevealState::Answer);
            assert_eq!(board.cell_label((2, 3)).unwrap(), "a2-3");
        }
    }

    #[test]
    fn reveal_only_touches_the_addressed_cell() {
        let mut board = loaded_board();
        board.reveal((1, 1)).unwrap();

        assert_eq!(board.reveal_state((1, 1)).unwrap(), RevealState::Question);
        assert_eq!(board.reveal_state((1, 0)).unwrap(), RevealState::Hidden);
        assert_eq!(board.reveal_state((0, 1)).unwrap(), RevealState::Hidden);
    }

    #[test]
    fn out_of_range_cells_are_rejected() {
        let mut board = loaded_board();

        for coords in [(6, 0), (0, 5), (6, 5), (usize::MAX, 0), (0, usize::MAX)] {
            let expected = GameError::OutOfRange {
                col: coords.0,
                row: coords.1,
            };
            assert_eq!(board.cell_label(coords), Err(expected.clone()));
            assert_eq!(board.reveal(coords), Err(expected));
        }
    }

    #[test]
    fn empty_board_has_no_cells() {
        let mut board = BoardModel::new();

        assert!(!board.is_loaded());
        assert_eq!(board.titles().count(), 0);
        assert_eq!(
            board.reveal((0, 0)),
            Err(GameError::OutOfRange { col: 0, row: 0 })
        );
    }

    #[test]
    fn wrong_shape_keeps_previous_session() {
        let mut board = loaded_board();
        board.reveal((0, 0)).unwrap();
        let before = board.clone();

        let mut short_column = categories(NUM_CATEGORIES, NUM_CLUES_PER_CATEGORY);
        short_column[4].clues.pop();

        for bad in [
            categories(NUM_CATEGORIES - 1, NUM_CLUES_PER_CATEGORY),
            categories(NUM_CATEGORIES + 1, NUM_CLUES_PER_CATEGORY),
            categories(NUM_CATEGORIES, NUM_CLUES_PER_CATEGORY + 1),
            categories(0, 0),
            short_column,
        ] {
            assert_eq!(board.initialize(bad).err(), Some(GameError::InvalidShape));
            assert_eq!(board, before);
        }
    }

    #[test]
    fn initialize_replaces_session_wholesale() {
        let mut board = loaded_board();
        board.reveal((3, 3)).unwrap();

        let mut next = categories(NUM_CATEGORIES, NUM_CLUES_PER_CATEGORY);
        next[0].title = "fresh".into();
        board.initialize(next).unwrap();

        assert_eq!(board.titles().next(), Some("fresh"));
        assert_eq!(board.reveal_state((3, 3)).unwrap(), RevealState::Hidden);
    }

    #[test]
    fn decoding_checks_board_shape() {
        let mut board = loaded_board();
        board.reveal((5, 4)).unwrap();

        let encoded = serde_json::to_string(&board).unwrap();
        let decoded: BoardModel = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.titles().count(), NUM_CATEGORIES);
        assert_eq!(decoded.cell_label((5, 4)).unwrap(), "?");

        let short = serde_json::to_string(&categories(NUM_CATEGORIES - 1, NUM_CLUES_PER_CATEGORY))
            .unwrap();
        assert!(serde_json::from_str::<Session>(&short).is_err());

        let wrapped = format!(r#"{{"session":{short}}}"#);
        assert!(serde_json::from_str::<BoardModel>(&wrapped).is_err());
    }

    #[test]
    fn initialize_hides_carried_over_clues() {
        let mut board = loaded_board();
        board.reveal((0, 0)).unwrap();
        let replayed = board.session().unwrap().categories().to_vec();

        board.initialize(replayed).unwrap();

        assert_eq!(board.cell_label((0, 0)).unwrap(), "?");
    }
}
