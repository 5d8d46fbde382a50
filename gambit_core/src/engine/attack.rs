use crate::engine::board::Board;
use crate::engine::legality::attacked_from;
use crate::engine::squares::SquareSet;
use crate::engine::types::{Color, PieceKind, Square};

/// 攻撃されているとみなすマスの集合。キングの移動先とキャスリング経路の判定に使う。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct AttackMap(SquareSet);

impl AttackMap {
    /// `defender` から見て、相手の駒が攻撃しているマスを集める。
    ///
    /// `defender` のキングは遠距離駒の利きを遮らないものとして扱う（利きの線上を後退しても
    /// 攻撃されたまま）。
    #[inline]
    #[must_use]
    pub fn against(board: &Board, defender: Color) -> Self {
        let attacker = defender.opponent();

        let mut see_through = *board;
        for (square, piece) in board.pieces() {
            if piece.color() == defender && piece.kind() == PieceKind::King {
                see_through.set_piece(square, None);
            }
        }

        let squares = board
            .pieces()
            .filter(|&(_square, piece)| piece.color() == attacker)
            .fold(SquareSet::EMPTY, |acc, (square, piece)| {
                acc.union(attacked_from(&see_through, square, piece))
            });

        Self(squares)
    }

    /// 指定マスが攻撃されているかどうかを返す。
    #[inline]
    #[must_use]
    pub fn is_attacked(&self, square: Square) -> bool {
        self.0.contains(square)
    }

    /// どのマスも攻撃されていない攻撃表を返す。
    #[inline]
    #[must_use]
    pub const fn none() -> Self {
        Self(SquareSet::EMPTY)
    }

    /// 攻撃されているマスの集合を返す。
    #[inline]
    #[must_use]
    pub const fn squares(&self) -> SquareSet {
        self.0
    }
}

impl From<SquareSet> for AttackMap {
    #[inline]
    fn from(squares: SquareSet) -> Self {
        Self(squares)
    }
}

/// キングの合法手を求める前に攻撃表をどう用意するか。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum AttackPolicy {
    /// 攻撃表を使わない（常に空）。
    #[default]
    Disabled,
    /// 毎回、相手の全駒の攻撃範囲から攻撃表を作る。
    Opponent,
}

impl AttackPolicy {
    /// `defender` のキングに使う攻撃表を返す。
    #[inline]
    #[must_use]
    pub fn map_for(self, board: &Board, defender: Color) -> AttackMap {
        match self {
            Self::Disabled => AttackMap::none(),
            Self::Opponent => AttackMap::against(board, defender),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AttackMap, AttackPolicy};
    use crate::engine::board::Board;
    use crate::engine::legality::legal_destinations;
    use crate::engine::types::{Color, Square};

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap_or_else(|| panic!("off-board square ({row},{col})"))
    }

    fn board(rows: [&str; 8]) -> Board {
        Board::from_rows(rows).unwrap_or_else(|| panic!("malformed rows {rows:?}"))
    }

    #[test]
    fn initial_black_attacks_cover_ranks_two_and_three_only() {
        let attacks = AttackMap::against(&Board::initial(), Color::White);

        for col in 0..8 {
            assert!(attacks.is_attacked(sq(2, col)), "(2,{col})");
            assert!(!attacks.is_attacked(sq(3, col)), "(3,{col})");
            assert!(!attacks.is_attacked(sq(5, col)), "(5,{col})");
        }
    }

    #[test]
    fn disabled_policy_never_marks_squares() {
        let position = board([
            "....k...", "........", "........", "........", "........", "........", "........",
            "r...K...",
        ]);
        let map = AttackPolicy::Disabled.map_for(&position, Color::White);
        assert!(map.squares().is_empty());

        let destinations = legal_destinations(&position, sq(7, 4), &map);
        assert!(destinations.contains(sq(7, 3)));
    }

    #[test]
    fn opponent_policy_keeps_king_off_rook_file_and_rank() {
        let position = board([
            "....k...", "........", "........", "........", "........", "........", "...r....",
            "....K..R",
        ]);
        let map = AttackPolicy::Opponent.map_for(&position, Color::White);

        let destinations = legal_destinations(&position, sq(7, 4), &map);
        // 黒ルーク (6,3) は 6 行目と 3 列目を攻撃する。
        assert!(!destinations.contains(sq(6, 4)));
        assert!(!destinations.contains(sq(7, 3)));
        assert!(!destinations.contains(sq(6, 5)));
        assert!(destinations.contains(sq(7, 5)));
        // キング側の経路 (7,5), (7,6) は安全なのでキャスリングできる。
        assert!(destinations.contains(sq(7, 6)));
        // クイーン側は (7,3) が攻撃されている。
        assert!(!destinations.contains(sq(7, 2)));
    }

    #[test]
    fn king_cannot_retreat_along_an_attacking_ray() {
        let position = board([
            "....k...", "........", "........", "........", "........", "........", "........",
            "r...K...",
        ]);
        let map = AttackPolicy::Opponent.map_for(&position, Color::White);
        assert!(map.is_attacked(sq(7, 5)));
        assert!(map.is_attacked(sq(7, 7)));

        let destinations = legal_destinations(&position, sq(7, 4), &map);
        assert!(!destinations.contains(sq(7, 5)));
        assert!(!destinations.contains(sq(7, 3)));
        assert!(destinations.contains(sq(6, 4)));
    }

    #[test]
    fn other_defending_pieces_still_block_rays() {
        let position = board([
            "....k...", "........", "........", "........", "........", "........", "........",
            "r.N.K...",
        ]);
        let map = AttackMap::against(&position, Color::White);
        assert!(map.is_attacked(sq(7, 2)));
        assert!(!map.is_attacked(sq(7, 3)));
    }
}
