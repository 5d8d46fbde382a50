//! 駒ごとの移動規則（疑似合法手）。
//!
//! 王手の放置は判定しない。アンパッサン・プロモーションも扱わない。

use crate::engine::attack::AttackMap;
use crate::engine::board::Board;
use crate::engine::squares::SquareSet;
use crate::engine::types::{CastleSide, Color, Piece, PieceKind, Square};

/// ルークの移動方向（上、下、左、右）。
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// ビショップの移動方向（左上、右上、左下、右下）。
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// ナイトの跳び先。
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// キングの移動先（周囲8マス）。
const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// ポーンが斜めに取る列方向。
const PAWN_CAPTURE_COLS: [i8; 2] = [-1, 1];

/// 指定マスの駒が次に移動できるマスの集合を返す。
///
/// - 盤面は読み取るだけで変更しない。
/// - 呼び出しごとに新しい集合を返す（前回の結果は引き継がない）。
/// - `attacks` はキングの移動とキャスリングの判定にだけ使う。
/// - 空きマスを渡した場合は空集合。
#[inline]
#[must_use]
pub fn legal_destinations(board: &Board, from: Square, attacks: &AttackMap) -> SquareSet {
    let Some(piece) = board.piece_at(from) else {
        return SquareSet::EMPTY;
    };

    let color = piece.color();
    let lands = |target: Option<Piece>| target.is_none_or(|occupant| occupant.is_opponent_of(color));
    let captures = |occupant: Piece| occupant.is_opponent_of(color);

    match piece.kind() {
        PieceKind::Bishop => rays(board, from, &BISHOP_DIRECTIONS, captures),
        PieceKind::King => king_moves(board, from, color, attacks),
        PieceKind::Knight => steps(board, from, &KNIGHT_OFFSETS, lands),
        PieceKind::Pawn => pawn_moves(board, from, color),
        PieceKind::Queen => rays(board, from, &ROOK_DIRECTIONS, captures)
            .union(rays(board, from, &BISHOP_DIRECTIONS, captures)),
        PieceKind::Rook => rays(board, from, &ROOK_DIRECTIONS, captures),
    }
}

/// 指定マスの駒が攻撃しているマスの集合を返す。
///
/// 移動先と違い、ポーンは斜め前の2マスだけを攻撃し、遠距離駒は最初に当たった駒のマス
/// （色を問わない）まで含む。キャスリングは含まない。
#[inline]
#[must_use]
pub fn attacked_from(board: &Board, from: Square, piece: Piece) -> SquareSet {
    let any = |_target: Option<Piece>| true;
    let any_blocker = |_occupant: Piece| true;

    match piece.kind() {
        PieceKind::Bishop => rays(board, from, &BISHOP_DIRECTIONS, any_blocker),
        PieceKind::King => steps(board, from, &KING_OFFSETS, any),
        PieceKind::Knight => steps(board, from, &KNIGHT_OFFSETS, any),
        PieceKind::Pawn => PAWN_CAPTURE_COLS
            .into_iter()
            .filter_map(|d_col| from.offset(piece.color().forward(), d_col))
            .collect(),
        PieceKind::Queen => rays(board, from, &ROOK_DIRECTIONS, any_blocker)
            .union(rays(board, from, &BISHOP_DIRECTIONS, any_blocker)),
        PieceKind::Rook => rays(board, from, &ROOK_DIRECTIONS, any_blocker),
    }
}

/// `color` のキャスリング先（自陣最下段の列 6 / 列 2）を返す。
///
/// 条件はキングと該当ルークのフラグが「未移動」で、経路の列がすべて空いていて攻撃されていないこと。
/// ルークが実際に角にいるか、キングの現在位置が攻撃されているかは確認しない。
#[inline]
#[must_use]
pub fn castling_destinations(board: &Board, color: Color, attacks: &AttackMap) -> SquareSet {
    let flags = board.castling();
    if flags.king_moved(color) {
        return SquareSet::EMPTY;
    }

    let rank = color.home_rank();
    let mut destinations = SquareSet::EMPTY;

    for side in CastleSide::ALL {
        if flags.rook_moved(color, side) {
            continue;
        }

        let path_clear = side.path_cols().iter().all(|&col| {
            Square::new(rank, col)
                .is_some_and(|square| board.is_empty_at(square) && !attacks.is_attacked(square))
        });

        if path_clear {
            if let Some(destination) = Square::new(rank, side.king_destination_col()) {
                destinations.insert(destination);
            }
        }
    }

    destinations
}

/// キングの移動先（周囲8マスとキャスリング）。
fn king_moves(board: &Board, from: Square, color: Color, attacks: &AttackMap) -> SquareSet {
    let mut destinations = SquareSet::EMPTY;

    for (d_row, d_col) in KING_OFFSETS {
        let Some(target) = from.offset(d_row, d_col) else {
            continue;
        };

        let lands = board
            .piece_at(target)
            .is_none_or(|occupant| occupant.is_opponent_of(color));
        if lands && !attacks.is_attacked(target) {
            destinations.insert(target);
        }
    }

    destinations.union(castling_destinations(board, color, attacks))
}

/// ポーンの移動先。
fn pawn_moves(board: &Board, from: Square, color: Color) -> SquareSet {
    let forward = color.forward();
    let mut destinations = SquareSet::EMPTY;

    if let Some(one) = from.offset(forward, 0) {
        if board.is_empty_at(one) {
            destinations.insert(one);

            if from.row() == color.pawn_rank() {
                if let Some(two) = one.offset(forward, 0) {
                    if board.is_empty_at(two) {
                        destinations.insert(two);
                    }
                }
            }
        }
    }

    for d_col in PAWN_CAPTURE_COLS {
        let Some(diagonal) = from.offset(forward, d_col) else {
            continue;
        };

        if board
            .piece_at(diagonal)
            .is_some_and(|occupant| occupant.is_opponent_of(color))
        {
            destinations.insert(diagonal);
        }
    }

    destinations
}

/// 各方向へ直進し、最初に当たった駒で止まる。
///
/// 空きマスはすべて含み、当たった駒のマスは `include_blocker` が真のときだけ含む。
fn rays<F: Fn(Piece) -> bool>(
    board: &Board,
    from: Square,
    directions: &[(i8, i8)],
    include_blocker: F,
) -> SquareSet {
    let mut squares = SquareSet::EMPTY;

    for &(d_row, d_col) in directions {
        let mut cursor = from;
        while let Some(next) = cursor.offset(d_row, d_col) {
            match board.piece_at(next) {
                None => squares.insert(next),
                Some(occupant) => {
                    if include_blocker(occupant) {
                        squares.insert(next);
                    }
                    break;
                }
            }
            cursor = next;
        }
    }

    squares
}

/// 固定の相対位置へ1歩だけ動く。
fn steps<F: Fn(Option<Piece>) -> bool>(
    board: &Board,
    from: Square,
    offsets: &[(i8, i8)],
    lands: F,
) -> SquareSet {
    offsets
        .iter()
        .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col))
        .filter(|&target| lands(board.piece_at(target)))
        .collect()
}
