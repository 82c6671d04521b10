use crate::{
    domain::ids::{CardId, ColumnId, IdGenerator},
    error::{KanbanError, Result},
};

/// A unit of work with free-text content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub text: String,
}

impl Card {
    pub fn new(id: CardId, text: String) -> Self {
        Self { id, text }
    }
}

/// An ordered, named container of cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub cards: Vec<Card>,
}

impl Column {
    pub fn new(id: ColumnId, title: String) -> Self {
        Self {
            id,
            title,
            cards: Vec::new(),
        }
    }

    /// Position of a card within this column
    pub fn position_of(&self, card: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == card)
    }

    /// Card ids in top-to-bottom order
    pub fn card_ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|c| c.id).collect()
    }
}

/// Kanban board state: the ordered set of columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    columns: Vec<Column>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|col| col.cards.len()).sum()
    }

    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|col| col.id == id)
    }

    fn column_mut(&mut self, id: ColumnId) -> Result<&mut Column> {
        self.columns
            .iter_mut()
            .find(|col| col.id == id)
            .ok_or(KanbanError::ColumnNotFound(id))
    }

    /// Finds the column holding a card and the card's index in it
    pub fn locate_card(&self, card: CardId) -> Option<(ColumnId, usize)> {
        self.columns
            .iter()
            .find_map(|col| col.position_of(card).map(|index| (col.id, index)))
    }

    pub fn card(&self, card: CardId) -> Option<&Card> {
        let (column, index) = self.locate_card(card)?;
        self.column(column).map(|col| &col.cards[index])
    }

    fn card_mut(&mut self, card: CardId) -> Result<&mut Card> {
        self.columns
            .iter_mut()
            .flat_map(|col| col.cards.iter_mut())
            .find(|c| c.id == card)
            .ok_or(KanbanError::CardNotFound(card))
    }

    /// Appends a new column with a freshly generated id
    pub fn add_column(&mut self, ids: &mut dyn IdGenerator, title: String) -> ColumnId {
        let id = ColumnId::new(ids.next());
        self.columns.push(Column::new(id, title));
        id
    }

    /// Appends an already built column, used when restoring a snapshot
    pub(crate) fn push_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Appends a new card at the bottom of a column
    pub fn add_card(
        &mut self,
        ids: &mut dyn IdGenerator,
        column: ColumnId,
        text: String,
    ) -> Result<CardId> {
        // Resolve the column first so a missing column does not burn an id
        let col = self.column_mut(column)?;
        let id = CardId::new(ids.next());
        col.cards.push(Card::new(id, text));
        Ok(id)
    }

    pub fn rename_card(&mut self, card: CardId, text: String) -> Result<()> {
        self.card_mut(card)?.text = text;
        Ok(())
    }

    pub fn rename_column(&mut self, column: ColumnId, title: String) -> Result<()> {
        self.column_mut(column)?.title = title;
        Ok(())
    }

    /// Moves a card into `target`, right before `before` or at the end.
    ///
    /// Every reference is validated before the board is touched, so on error
    /// the card stays where it was. Returns the card's new index.
    pub fn move_card(
        &mut self,
        card: CardId,
        target: ColumnId,
        before: Option<CardId>,
    ) -> Result<usize> {
        let (origin, origin_index) = self
            .locate_card(card)
            .ok_or(KanbanError::CardNotFound(card))?;
        let target_col = self
            .column(target)
            .ok_or(KanbanError::ColumnNotFound(target))?;

        if before == Some(card) {
            return Ok(origin_index);
        }
        if let Some(anchor) = before {
            if target_col.position_of(anchor).is_none() {
                return Err(KanbanError::CardNotFound(anchor));
            }
        }

        let moved = self.column_mut(origin)?.cards.remove(origin_index);
        let target_col = self.column_mut(target)?;
        let index = match before {
            Some(anchor) => target_col
                .position_of(anchor)
                .unwrap_or(target_col.cards.len()),
            None => target_col.cards.len(),
        };
        target_col.cards.insert(index, moved);
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::SequentialIdGenerator;

    fn board_with_two_columns() -> (Board, SequentialIdGenerator, ColumnId, ColumnId) {
        let mut ids = SequentialIdGenerator::default();
        let mut board = Board::new();
        let todo = board.add_column(&mut ids, "To Do".to_string());
        let done = board.add_column(&mut ids, "Done".to_string());
        (board, ids, todo, done)
    }

    fn texts(board: &Board, column: ColumnId) -> Vec<String> {
        board
            .column(column)
            .unwrap()
            .cards
            .iter()
            .map(|c| c.text.clone())
            .collect()
    }

    #[test]
    fn test_board_creation() {
        let board = Board::new();
        assert!(board.is_empty());
        assert_eq!(board.card_count(), 0);
    }

    #[test]
    fn test_add_column_and_cards() {
        let (mut board, mut ids, todo, done) = board_with_two_columns();
        assert_eq!(todo, ColumnId::new(1));
        assert_eq!(done, ColumnId::new(2));

        let a = board.add_card(&mut ids, todo, "A".to_string()).unwrap();
        let b = board.add_card(&mut ids, todo, "B".to_string()).unwrap();

        assert_eq!(a, CardId::new(3));
        assert_eq!(b, CardId::new(4));
        assert_eq!(texts(&board, todo), vec!["A", "B"]);
        assert_eq!(board.locate_card(b), Some((todo, 1)));
    }

    #[test]
    fn test_add_card_to_missing_column() {
        let (mut board, mut ids, _, _) = board_with_two_columns();
        let err = board
            .add_card(&mut ids, ColumnId::new(99), "X".to_string())
            .unwrap_err();
        assert!(matches!(err, KanbanError::ColumnNotFound(_)));
        assert_eq!(ids.last(), 2);
    }

    #[test]
    fn test_rename_card_and_column() {
        let (mut board, mut ids, todo, _) = board_with_two_columns();
        let card = board.add_card(&mut ids, todo, "old".to_string()).unwrap();

        board.rename_card(card, "new".to_string()).unwrap();
        board.rename_column(todo, "Backlog".to_string()).unwrap();

        assert_eq!(board.card(card).unwrap().text, "new");
        assert_eq!(board.column(todo).unwrap().title, "Backlog");
        assert!(board.rename_card(CardId::new(99), "x".to_string()).is_err());
    }

    #[test]
    fn test_move_card_within_column_to_end() {
        let (mut board, mut ids, todo, _) = board_with_two_columns();
        let x = board.add_card(&mut ids, todo, "X".to_string()).unwrap();
        board.add_card(&mut ids, todo, "Y".to_string()).unwrap();

        let index = board.move_card(x, todo, None).unwrap();

        assert_eq!(index, 1);
        assert_eq!(texts(&board, todo), vec!["Y", "X"]);
    }

    #[test]
    fn test_move_card_across_columns_before_anchor() {
        let (mut board, mut ids, todo, done) = board_with_two_columns();
        let x = board.add_card(&mut ids, todo, "X".to_string()).unwrap();
        let p = board.add_card(&mut ids, done, "P".to_string()).unwrap();
        board.add_card(&mut ids, done, "Q".to_string()).unwrap();

        let index = board.move_card(x, done, Some(p)).unwrap();

        assert_eq!(index, 0);
        assert!(texts(&board, todo).is_empty());
        assert_eq!(texts(&board, done), vec!["X", "P", "Q"]);
        assert_eq!(board.card_count(), 3);
    }

    #[test]
    fn test_move_card_with_invalid_anchor_leaves_board_untouched() {
        let (mut board, mut ids, todo, done) = board_with_two_columns();
        let x = board.add_card(&mut ids, todo, "X".to_string()).unwrap();
        let y = board.add_card(&mut ids, todo, "Y".to_string()).unwrap();
        let before = board.clone();

        // anchor lives in another column
        assert!(board.move_card(x, done, Some(y)).is_err());
        assert!(board.move_card(x, ColumnId::new(99), None).is_err());
        assert!(board.move_card(CardId::new(99), done, None).is_err());

        assert_eq!(board, before);
    }

    #[test]
    fn test_move_card_before_itself_is_noop() {
        let (mut board, mut ids, todo, _) = board_with_two_columns();
        board.add_card(&mut ids, todo, "X".to_string()).unwrap();
        let y = board.add_card(&mut ids, todo, "Y".to_string()).unwrap();

        assert_eq!(board.move_card(y, todo, Some(y)).unwrap(), 1);
        assert_eq!(texts(&board, todo), vec!["X", "Y"]);
    }
}
