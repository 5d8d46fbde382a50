use crate::engine::types::{CastleSide, Color, Piece, PieceKind, Square};

/// 盤面のマス数。
const CELL_COUNT: usize = 64;

/// キングの初期列。
const KING_HOME_COL: u8 = 4;

/// 1色分のキャスリング関連フラグ。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
struct SideFlags {
    /// キングが一度でも動いたか。
    king_moved: bool,
    /// キング側のルークが一度でも動いたか。
    kingside_rook_moved: bool,
    /// クイーン側のルークが一度でも動いたか。
    queenside_rook_moved: bool,
}

/// キャスリング可否の判定に使う「動いたか」フラグ。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct CastlingFlags {
    /// 黒のフラグ。
    black: SideFlags,
    /// 白のフラグ。
    white: SideFlags,
}

impl CastlingFlags {
    /// 1色分のフラグを返す。
    const fn for_color(self, color: Color) -> SideFlags {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    /// 1色分のフラグへの可変参照を返す。
    const fn for_color_mut(&mut self, color: Color) -> &mut SideFlags {
        match color {
            Color::Black => &mut self.black,
            Color::White => &mut self.white,
        }
    }

    /// キングが動いたかどうかを返す。
    #[inline]
    #[must_use]
    pub const fn king_moved(self, color: Color) -> bool {
        self.for_color(color).king_moved
    }

    /// キングが動いたことを記録する。
    #[inline]
    pub const fn mark_king_moved(&mut self, color: Color) {
        self.for_color_mut(color).king_moved = true;
    }

    /// ルークが動いたことを記録する。
    #[inline]
    pub const fn mark_rook_moved(&mut self, color: Color, side: CastleSide) {
        let flags = self.for_color_mut(color);
        match side {
            CastleSide::Kingside => flags.kingside_rook_moved = true,
            CastleSide::Queenside => flags.queenside_rook_moved = true,
        }
    }

    /// ルークが動いたかどうかを返す。
    #[inline]
    #[must_use]
    pub const fn rook_moved(self, color: Color, side: CastleSide) -> bool {
        let flags = self.for_color(color);
        match side {
            CastleSide::Kingside => flags.kingside_rook_moved,
            CastleSide::Queenside => flags.queenside_rook_moved,
        }
    }
}

/// 確定した1手の記録。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MoveRecord {
    /// 移動先にいて取られた駒。
    captured: Option<Piece>,
    /// キャスリングだった場合の向き。
    castle: Option<CastleSide>,
    /// 移動元。
    from: Square,
    /// 動いた駒。
    piece: Piece,
    /// 移動先。
    to: Square,
}

impl MoveRecord {
    /// 取られた駒を返す。
    #[inline]
    #[must_use]
    pub const fn captured(self) -> Option<Piece> {
        self.captured
    }

    /// キャスリングだった場合の向きを返す。
    #[inline]
    #[must_use]
    pub const fn castle(self) -> Option<CastleSide> {
        self.castle
    }

    /// 移動元を返す。
    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        self.from
    }

    /// 動いた駒を返す。
    #[inline]
    #[must_use]
    pub const fn piece(self) -> Piece {
        self.piece
    }

    /// 移動先を返す。
    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        self.to
    }
}

/// 8×8 の盤面とキャスリング用フラグ。
///
/// 合法手の計算は読み取りのみで、変更は `commit_move` だけが行う。
/// 各色のキングがちょうど1つずつあることは呼び出し側の責任（王手判定はしない）。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Board {
    /// キャスリング用フラグ。
    castling: CastlingFlags,
    /// `Square::index` 順のマスの中身。
    cells: [Option<Piece>; CELL_COUNT],
}

impl Default for Board {
    #[inline]
    fn default() -> Self {
        Self::initial()
    }
}

impl Board {
    /// キャスリングの場合、その向きを返す。
    ///
    /// まだ動いていないキングが初期列から自陣の最下段を2列動く手をキャスリングとみなす。
    fn castle_side_for(&self, piece: Piece, from: Square, to: Square) -> Option<CastleSide> {
        let color = piece.color();
        if piece.kind() != PieceKind::King || self.castling.king_moved(color) {
            return None;
        }

        let rank = color.home_rank();
        if from.row() != rank || to.row() != rank || from.col() != KING_HOME_COL {
            return None;
        }

        CastleSide::ALL
            .into_iter()
            .find(|side| side.king_destination_col() == to.col())
    }

    /// キャスリング用フラグを返す。
    #[inline]
    #[must_use]
    pub const fn castling(&self) -> CastlingFlags {
        self.castling
    }

    /// 駒を `from` から `to` へ動かして盤面を確定する。
    ///
    /// - `to` にあった駒は上書きされる（取り）。
    /// - キャスリングなら自陣の角にいる自分のルークも移す。
    /// - キング・ルークの「動いた」フラグを更新する。
    ///
    /// `from` が空なら何もせず `None` を返す。
    #[inline]
    pub fn commit_move(&mut self, from: Square, to: Square) -> Option<MoveRecord> {
        let Some(piece) = self.piece_at(from) else {
            return None;
        };

        let captured = self.piece_at(to);
        let castle = self.castle_side_for(piece, from, to);

        self.set_piece(to, Some(piece));
        self.set_piece(from, None);

        if let Some(side) = castle {
            self.relocate_castling_rook(piece.color(), side);
        }
        self.record_moved(piece, from);

        Some(MoveRecord {
            captured,
            castle,
            from,
            piece,
            to,
        })
    }

    /// 駒のない盤面を返す。
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            castling: CastlingFlags {
                black: SideFlags {
                    king_moved: false,
                    kingside_rook_moved: false,
                    queenside_rook_moved: false,
                },
                white: SideFlags {
                    king_moved: false,
                    kingside_rook_moved: false,
                    queenside_rook_moved: false,
                },
            },
            cells: [None; CELL_COUNT],
        }
    }

    /// 8行の盤面表記から盤面を生成する。
    ///
    /// 各行は8文字で、`.` は空きマス、大文字は白、小文字は黒の駒。
    /// 1行目が行 0（黒の最下段側）。形式が不正なら `None`。
    /// キャスリング用フラグはすべて「未移動」になる。
    #[inline]
    #[must_use]
    pub fn from_rows(rows: [&str; 8]) -> Option<Self> {
        let mut board = Self::empty();

        for (row, line) in (u8::MIN..).zip(rows) {
            let mut col = u8::MIN;
            for symbol in line.chars() {
                let Some(square) = Square::new(row, col) else {
                    return None;
                };

                if symbol != '.' {
                    let Some(piece) = Piece::from_char(symbol) else {
                        return None;
                    };
                    board.set_piece(square, Some(piece));
                }

                col = col.saturating_add(1);
            }

            if col != Square::BOARD_LEN {
                return None;
            }
        }

        Some(board)
    }

    /// 初期局面を返す。
    #[inline]
    #[must_use]
    pub fn initial() -> Self {
        let mut board = Self::empty();

        for (col, kind) in (u8::MIN..).zip(PieceKind::BACK_RANK) {
            for color in [Color::Black, Color::White] {
                if let Some(square) = Square::new(color.home_rank(), col) {
                    board.set_piece(square, Some(Piece::new(color, kind)));
                }
                if let Some(square) = Square::new(color.pawn_rank(), col) {
                    board.set_piece(square, Some(Piece::new(color, PieceKind::Pawn)));
                }
            }
        }

        board
    }

    /// 指定マスが空かどうかを返す。
    #[inline]
    #[must_use]
    pub fn is_empty_at(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// 指定マスの駒を返す。
    #[inline]
    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells
            .get(usize::from(square.index()))
            .copied()
            .flatten()
    }

    /// 盤上のすべての駒をマスと組にして列挙する。
    #[inline]
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (u8::MIN..)
            .zip(self.cells.iter())
            .filter_map(|(index, cell)| match (Square::from_index(index), *cell) {
                (Some(square), Some(piece)) => Some((square, piece)),
                _ => None,
            })
    }

    /// 動いた駒に応じてキャスリング用フラグを更新する。
    fn record_moved(&mut self, piece: Piece, from: Square) {
        let color = piece.color();
        match piece.kind() {
            PieceKind::King => self.castling.mark_king_moved(color),
            PieceKind::Rook if from.row() == color.home_rank() => {
                for side in CastleSide::ALL {
                    if from.col() == side.rook_home_col() {
                        self.castling.mark_rook_moved(color, side);
                    }
                }
            }
            PieceKind::Bishop
            | PieceKind::Knight
            | PieceKind::Pawn
            | PieceKind::Queen
            | PieceKind::Rook => {}
        }
    }

    /// キャスリングに伴い、角にいる自分のルークを移す。角に自分のルークがなければ何もしない。
    fn relocate_castling_rook(&mut self, color: Color, side: CastleSide) {
        let rank = color.home_rank();
        let (Some(rook_from), Some(rook_to)) = (
            Square::new(rank, side.rook_home_col()),
            Square::new(rank, side.rook_destination_col()),
        ) else {
            return;
        };

        let rook = Piece::new(color, PieceKind::Rook);
        if self.piece_at(rook_from) != Some(rook) {
            return;
        }

        self.set_piece(rook_to, Some(rook));
        self.set_piece(rook_from, None);
        self.castling.mark_rook_moved(color, side);
    }

    /// キャスリング用フラグを差し替える。
    #[inline]
    pub const fn set_castling(&mut self, castling: CastlingFlags) {
        self.castling = castling;
    }

    /// 指定マスの中身を差し替える。
    #[inline]
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        if let Some(cell) = self.cells.get_mut(usize::from(square.index())) {
            *cell = piece;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Board, CastlingFlags};
    use crate::engine::types::{CastleSide, Color, Piece, PieceKind, Square};

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap_or_else(|| panic!("off-board square ({row},{col})"))
    }

    #[test]
    fn initial_position_has_standard_layout() {
        let board = Board::initial();

        assert_eq!(
            board.piece_at(sq(7, 4)),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            board.piece_at(sq(0, 3)),
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
        assert_eq!(
            board.piece_at(sq(6, 0)),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert!(board.is_empty_at(sq(4, 4)));
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.castling(), CastlingFlags::default());
    }

    #[test]
    fn from_rows_matches_initial_layout() {
        let parsed = Board::from_rows([
            "rnbqkbnr", "pppppppp", "........", "........", "........", "........", "PPPPPPPP",
            "RNBQKBNR",
        ]);
        assert_eq!(parsed, Some(Board::initial()));
    }

    #[test]
    fn from_rows_rejects_malformed_rows() {
        let short_row = Board::from_rows([
            "rnbqkbn", "pppppppp", "........", "........", "........", "........", "PPPPPPPP",
            "RNBQKBNR",
        ]);
        assert!(short_row.is_none());

        let bad_symbol = Board::from_rows([
            "rnbqkbnr", "pppppppp", "...x....", "........", "........", "........", "PPPPPPPP",
            "RNBQKBNR",
        ]);
        assert!(bad_symbol.is_none());
    }

    #[test]
    fn commit_move_overwrites_captured_piece() {
        let mut board = Board::initial();
        let record = board.commit_move(sq(7, 1), sq(1, 1));

        let knight = Piece::new(Color::White, PieceKind::Knight);
        assert_eq!(board.piece_at(sq(1, 1)), Some(knight));
        assert!(board.is_empty_at(sq(7, 1)));
        assert_eq!(
            record.and_then(|rec| rec.captured()),
            Some(Piece::new(Color::Black, PieceKind::Pawn))
        );
        assert_eq!(record.map(|rec| rec.piece()), Some(knight));
    }

    #[test]
    fn commit_move_from_empty_square_does_nothing() {
        let mut board = Board::initial();
        assert!(board.commit_move(sq(4, 4), sq(3, 4)).is_none());
        assert_eq!(board, Board::initial());
    }

    #[test]
    fn moving_king_and_rooks_sets_flags() {
        let mut board = Board::initial();
        board.set_piece(sq(7, 3), None);
        board.set_piece(sq(7, 6), None);
        board.set_piece(sq(0, 1), None);

        let _record = board.commit_move(sq(7, 7), sq(7, 6));
        assert!(board.castling().rook_moved(Color::White, CastleSide::Kingside));
        assert!(!board.castling().rook_moved(Color::White, CastleSide::Queenside));
        assert!(!board.castling().king_moved(Color::White));

        let _record = board.commit_move(sq(0, 0), sq(0, 1));
        assert!(board.castling().rook_moved(Color::Black, CastleSide::Queenside));

        let _record = board.commit_move(sq(7, 4), sq(7, 3));
        assert!(board.castling().king_moved(Color::White));
        assert!(!board.castling().king_moved(Color::Black));
    }

    #[test]
    fn kingside_castle_relocates_rook() {
        let mut board = Board::initial();
        board.set_piece(sq(7, 5), None);
        board.set_piece(sq(7, 6), None);

        let record = board.commit_move(sq(7, 4), sq(7, 6));

        assert_eq!(record.and_then(|rec| rec.castle()), Some(CastleSide::Kingside));
        assert_eq!(
            board.piece_at(sq(7, 5)),
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
        assert!(board.is_empty_at(sq(7, 7)));
        assert!(board.castling().king_moved(Color::White));
        assert!(board.castling().rook_moved(Color::White, CastleSide::Kingside));
    }

    #[test]
    fn queenside_castle_without_rook_moves_only_king() {
        let mut board = Board::from_rows([
            "....k...", "........", "........", "........", "........", "........", "........",
            "....K...",
        ])
        .unwrap_or_else(Board::empty);

        let record = board.commit_move(sq(7, 4), sq(7, 2));

        assert_eq!(record.and_then(|rec| rec.castle()), Some(CastleSide::Queenside));
        assert_eq!(
            board.piece_at(sq(7, 2)),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert!(board.is_empty_at(sq(7, 3)));
        assert_eq!(board.pieces().count(), 2);
    }

    #[test]
    fn second_king_move_is_not_a_castle() {
        let mut board = Board::from_rows([
            "....k...", "........", "........", "........", "........", "........", "........",
            "....K..R",
        ])
        .unwrap_or_else(Board::empty);

        let _first = board.commit_move(sq(7, 4), sq(6, 4));
        let _back = board.commit_move(sq(6, 4), sq(7, 4));
        let record = board.commit_move(sq(7, 4), sq(7, 6));

        assert_eq!(record.and_then(|rec| rec.castle()), None);
        assert_eq!(
            board.piece_at(sq(7, 7)),
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
    }
}
