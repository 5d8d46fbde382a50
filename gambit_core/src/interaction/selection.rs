use tracing::debug;

use crate::engine::attack::{AttackMap, AttackPolicy};
use crate::engine::board::Board;
use crate::engine::legality::legal_destinations;
use crate::engine::squares::SquareSet;
use crate::engine::types::{PieceKind, Square};
use crate::interaction::projector::Click;

/// クリック1回の結果。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ClickOutcome {
    /// 選択を解除した。
    Deselected,
    /// 何も起きなかった。
    Ignored,
    /// 選択中の駒を動かす手が決まった。
    MoveRequested {
        /// 移動元。
        from: Square,
        /// 移動先。
        to: Square,
    },
    /// 駒を選択した。
    Selected(Square),
}

/// 駒の選択状態（未選択 / 選択中）と、選択中の駒の移動先。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Selection {
    /// 選択中の駒の移動先。未選択なら空。
    legal: SquareSet,
    /// 選択中のマス。
    selected: Option<Square>,
}

impl Selection {
    /// 選択を解除し、移動先を空にする。
    #[inline]
    pub const fn clear(&mut self) {
        self.legal.clear();
        self.selected = None;
    }

    /// クリックを1回処理する。
    ///
    /// - 未選択で駒のあるマス: そのマスを選択し、移動先を計算し直す。
    /// - 未選択で空きマス・盤外: 無視。
    /// - 選択中で移動先のマス: 移動を要求して未選択に戻る。
    /// - 選択中でそれ以外（盤外や選択中の駒自身を含む）: 未選択に戻る。
    #[inline]
    pub fn click(&mut self, click: Click, board: &Board, attacks: AttackPolicy) -> ClickOutcome {
        let Some(from) = self.selected else {
            return self.select(click, board, attacks);
        };

        let target = match click {
            Click::Square(square) if self.legal.contains(square) => Some(square),
            Click::OffBoard | Click::Square(_) => None,
        };
        self.clear();

        match target {
            Some(to) => {
                debug!(?from, ?to, "move requested");
                ClickOutcome::MoveRequested { from, to }
            }
            None => {
                debug!(?from, ?click, "deselected");
                ClickOutcome::Deselected
            }
        }
    }

    /// 選択中の駒の移動先を返す。
    #[inline]
    #[must_use]
    pub const fn legal_moves(&self) -> SquareSet {
        self.legal
    }

    /// 未選択状態でのクリック。
    fn select(&mut self, click: Click, board: &Board, attacks: AttackPolicy) -> ClickOutcome {
        let Click::Square(square) = click else {
            return ClickOutcome::Ignored;
        };
        let Some(piece) = board.piece_at(square) else {
            return ClickOutcome::Ignored;
        };

        let attack_map = match piece.kind() {
            PieceKind::King => attacks.map_for(board, piece.color()),
            PieceKind::Bishop
            | PieceKind::Knight
            | PieceKind::Pawn
            | PieceKind::Queen
            | PieceKind::Rook => AttackMap::none(),
        };

        self.legal = legal_destinations(board, square, &attack_map);
        self.selected = Some(square);
        debug!(?square, ?piece, destinations = self.legal.len(), "selected");

        ClickOutcome::Selected(square)
    }

    /// 選択中のマスを返す。
    #[inline]
    #[must_use]
    pub const fn selected(&self) -> Option<Square> {
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::{ClickOutcome, Selection};
    use crate::engine::attack::AttackPolicy;
    use crate::engine::board::Board;
    use crate::engine::types::Square;
    use crate::interaction::projector::Click;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap_or_else(|| panic!("off-board square ({row},{col})"))
    }

    fn click(row: u8, col: u8) -> Click {
        Click::Square(sq(row, col))
    }

    #[test]
    fn idle_ignores_empty_squares_and_off_board() {
        let board = Board::initial();
        let mut selection = Selection::default();

        assert_eq!(
            selection.click(click(4, 4), &board, AttackPolicy::Disabled),
            ClickOutcome::Ignored
        );
        assert_eq!(
            selection.click(Click::OffBoard, &board, AttackPolicy::Disabled),
            ClickOutcome::Ignored
        );
        assert_eq!(selection, Selection::default());
    }

    #[test]
    fn selecting_a_piece_computes_destinations() {
        let board = Board::initial();
        let mut selection = Selection::default();

        let outcome = selection.click(click(6, 4), &board, AttackPolicy::Disabled);
        assert_eq!(outcome, ClickOutcome::Selected(sq(6, 4)));
        assert_eq!(selection.selected(), Some(sq(6, 4)));
        assert!(selection.legal_moves().contains(sq(5, 4)));
        assert!(selection.legal_moves().contains(sq(4, 4)));
        assert_eq!(selection.legal_moves().len(), 2);
    }

    #[test]
    fn pieces_without_moves_can_still_be_selected() {
        let board = Board::initial();
        let mut selection = Selection::default();

        let outcome = selection.click(click(7, 0), &board, AttackPolicy::Disabled);
        assert_eq!(outcome, ClickOutcome::Selected(sq(7, 0)));
        assert!(selection.legal_moves().is_empty());
    }

    #[test]
    fn clicking_a_destination_requests_the_move() {
        let board = Board::initial();
        let mut selection = Selection::default();
        let _selected = selection.click(click(7, 1), &board, AttackPolicy::Disabled);

        let outcome = selection.click(click(5, 2), &board, AttackPolicy::Disabled);
        assert_eq!(
            outcome,
            ClickOutcome::MoveRequested {
                from: sq(7, 1),
                to: sq(5, 2)
            }
        );
        assert_eq!(selection.selected(), None);
        assert!(selection.legal_moves().is_empty());
    }

    #[test]
    fn reclicking_the_selected_piece_deselects() {
        let board = Board::initial();
        let mut selection = Selection::default();
        let _selected = selection.click(click(6, 4), &board, AttackPolicy::Disabled);

        let outcome = selection.click(click(6, 4), &board, AttackPolicy::Disabled);
        assert_eq!(outcome, ClickOutcome::Deselected);
        assert_eq!(selection, Selection::default());
    }

    #[test]
    fn clicking_another_piece_deselects_without_reselecting() {
        let board = Board::initial();
        let mut selection = Selection::default();
        let _selected = selection.click(click(6, 4), &board, AttackPolicy::Disabled);

        let outcome = selection.click(click(6, 3), &board, AttackPolicy::Disabled);
        assert_eq!(outcome, ClickOutcome::Deselected);
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn off_board_click_deselects() {
        let board = Board::initial();
        let mut selection = Selection::default();
        let _selected = selection.click(click(1, 1), &board, AttackPolicy::Disabled);

        assert_eq!(
            selection.click(Click::OffBoard, &board, AttackPolicy::Disabled),
            ClickOutcome::Deselected
        );
        assert!(selection.legal_moves().is_empty());
    }

    #[test]
    fn opponent_policy_filters_king_destinations() {
        let board = Board::from_rows([
            "....k...", "........", "........", "........", "........", "........", "...r....",
            "....K...",
        ])
        .unwrap_or_else(Board::empty);

        let mut disabled = Selection::default();
        let _selected = disabled.click(click(7, 4), &board, AttackPolicy::Disabled);
        assert!(disabled.legal_moves().contains(sq(7, 3)));

        let mut opponent = Selection::default();
        let _selected = opponent.click(click(7, 4), &board, AttackPolicy::Opponent);
        assert!(!opponent.legal_moves().contains(sq(7, 3)));
        assert!(opponent.legal_moves().contains(sq(6, 3)));
    }
}
