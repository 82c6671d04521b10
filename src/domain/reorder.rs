use crate::domain::{
    board::Board,
    ids::{CardId, ColumnId},
};
use std::collections::HashMap;

/// Vertical extent of a rendered card, in host pointer coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// On-screen geometry of cards as exposed by the rendering host
pub trait CardLayout {
    /// Bounding box of a card, or `None` if it is not rendered
    fn card_rect(&self, card: CardId) -> Option<Rect>;
}

impl CardLayout for HashMap<CardId, Rect> {
    fn card_rect(&self, card: CardId) -> Option<Rect> {
        self.get(&card).copied()
    }
}

/// Where a dragged card lands: inside `column`, right before `before`, or
/// appended when `before` is `None`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub column: ColumnId,
    pub before: Option<CardId>,
}

/// Picks the card the dragged card should be inserted before.
///
/// Candidates are cards whose vertical midpoint lies below `pointer_y`; the
/// winner is the one whose midpoint is nearest to the pointer, so the first
/// of several equally near candidates wins. `None` means append.
///
/// # Examples
/// ```
/// use kanban_core::domain::ids::CardId;
/// use kanban_core::domain::reorder::{drag_after_card, Rect};
///
/// let cards = vec![
///     (CardId::new(1), Rect::new(0.0, 40.0)),
///     (CardId::new(2), Rect::new(50.0, 40.0)),
/// ];
///
/// assert_eq!(drag_after_card(cards.clone(), 10.0), Some(CardId::new(1)));
/// assert_eq!(drag_after_card(cards.clone(), 30.0), Some(CardId::new(2)));
/// assert_eq!(drag_after_card(cards, 90.0), None);
/// ```
pub fn drag_after_card<I>(candidates: I, pointer_y: f64) -> Option<CardId>
where
    I: IntoIterator<Item = (CardId, Rect)>,
{
    candidates
        .into_iter()
        .fold(
            (f64::NEG_INFINITY, None),
            |(closest, winner), (card, rect)| {
                let offset = pointer_y - rect.midpoint();
                if offset < 0.0 && offset > closest {
                    (offset, Some(card))
                } else {
                    (closest, winner)
                }
            },
        )
        .1
}

/// Computes the placement of `dragged` inside `column` for a pointer height.
///
/// The dragged card itself and cards the layout does not know about are not
/// candidates. Returns `None` when the column does not exist.
pub fn placement_for(
    board: &Board,
    layout: &dyn CardLayout,
    dragged: CardId,
    column: ColumnId,
    pointer_y: f64,
) -> Option<Placement> {
    let col = board.column(column)?;
    let candidates = col
        .cards
        .iter()
        .filter(|card| card.id != dragged)
        .filter_map(|card| layout.card_rect(card.id).map(|rect| (card.id, rect)));

    Some(Placement {
        column,
        before: drag_after_card(candidates, pointer_y),
    })
}

/// Fixed-height layout that stacks every column's cards from the same top.
///
/// Useful for headless hosts that have no real geometry.
#[derive(Debug, Clone, Default)]
pub struct UniformLayout {
    rects: HashMap<CardId, Rect>,
}

impl UniformLayout {
    pub fn measure(board: &Board, top: f64, card_height: f64, gap: f64) -> Self {
        let mut rects = HashMap::new();
        for column in board.columns() {
            for (index, card) in column.cards.iter().enumerate() {
                let card_top = top + index as f64 * (card_height + gap);
                rects.insert(card.id, Rect::new(card_top, card_height));
            }
        }
        Self { rects }
    }
}

impl CardLayout for UniformLayout {
    fn card_rect(&self, card: CardId) -> Option<Rect> {
        self.rects.card_rect(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::SequentialIdGenerator;

    fn stacked(count: u64) -> Vec<(CardId, Rect)> {
        (0..count)
            .map(|i| (CardId::new(i + 1), Rect::new(i as f64 * 50.0, 40.0)))
            .collect()
    }

    #[test]
    fn test_empty_column_appends() {
        assert_eq!(drag_after_card(Vec::new(), 0.0), None);
    }

    #[test]
    fn test_pointer_above_first_midpoint_inserts_first() {
        let cards = stacked(3);
        assert_eq!(drag_after_card(cards.clone(), -100.0), Some(CardId::new(1)));
        assert_eq!(drag_after_card(cards, 19.9), Some(CardId::new(1)));
    }

    #[test]
    fn test_pointer_below_all_midpoints_appends() {
        assert_eq!(drag_after_card(stacked(3), 121.0), None);
    }

    #[test]
    fn test_pointer_exactly_on_midpoint_is_past_it() {
        // offset == 0 is not a candidate
        assert_eq!(drag_after_card(stacked(2), 20.0), Some(CardId::new(2)));
        assert_eq!(drag_after_card(stacked(2), 70.0), None);
    }

    #[test]
    fn test_nearest_midpoint_wins_regardless_of_order() {
        let mut cards = stacked(4);
        cards.reverse();
        assert_eq!(drag_after_card(cards, 75.0), Some(CardId::new(3)));
    }

    #[test]
    fn test_equal_offsets_keep_first_candidate() {
        let cards = vec![
            (CardId::new(7), Rect::new(0.0, 40.0)),
            (CardId::new(8), Rect::new(0.0, 40.0)),
        ];
        assert_eq!(drag_after_card(cards, 5.0), Some(CardId::new(7)));
    }

    #[test]
    fn test_insertion_point_is_monotonic_while_pointer_moves_down() {
        let cards = stacked(5);
        let index_of = |target: Option<CardId>| match target {
            Some(card) => cards.iter().position(|(id, _)| *id == card).unwrap(),
            None => cards.len(),
        };

        let mut previous = 0;
        let mut y = -10.0;
        while y < 260.0 {
            let index = index_of(drag_after_card(cards.clone(), y));
            assert!(index >= previous, "insertion point moved back at y={y}");
            previous = index;
            y += 0.5;
        }
        assert_eq!(previous, cards.len());
    }

    #[test]
    fn test_placement_excludes_dragged_card() {
        let mut ids = SequentialIdGenerator::default();
        let mut board = Board::new();
        let col = board.add_column(&mut ids, "To Do".to_string());
        let x = board.add_card(&mut ids, col, "X".to_string()).unwrap();
        let y = board.add_card(&mut ids, col, "Y".to_string()).unwrap();
        let layout = UniformLayout::measure(&board, 0.0, 40.0, 10.0);

        // pointer sits over X's top half, but X is the card being dragged
        let placement = placement_for(&board, &layout, x, col, 5.0).unwrap();
        assert_eq!(placement.before, Some(y));

        let placement = placement_for(&board, &layout, x, col, 200.0).unwrap();
        assert_eq!(placement.before, None);
    }

    #[test]
    fn test_placement_in_missing_column() {
        let board = Board::new();
        let layout = UniformLayout::default();
        let placement = placement_for(&board, &layout, CardId::new(1), ColumnId::new(1), 0.0);
        assert!(placement.is_none());
    }

    #[test]
    fn test_uniform_layout_stacks_cards_per_column() {
        let mut ids = SequentialIdGenerator::default();
        let mut board = Board::new();
        let a = board.add_column(&mut ids, "A".to_string());
        let b = board.add_column(&mut ids, "B".to_string());
        let first = board.add_card(&mut ids, a, "1".to_string()).unwrap();
        let second = board.add_card(&mut ids, a, "2".to_string()).unwrap();
        let other = board.add_card(&mut ids, b, "3".to_string()).unwrap();

        let layout = UniformLayout::measure(&board, 100.0, 30.0, 5.0);

        assert_eq!(layout.card_rect(first), Some(Rect::new(100.0, 30.0)));
        assert_eq!(layout.card_rect(second), Some(Rect::new(135.0, 30.0)));
        assert_eq!(layout.card_rect(other), Some(Rect::new(100.0, 30.0)));
        assert_eq!(layout.card_rect(CardId::new(99)), None);
    }
}
