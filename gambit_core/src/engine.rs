/// キングの移動先を絞り込むための攻撃表。
pub mod attack;
/// 盤面（駒の配置とキャスリング用フラグ）。
pub mod board;
/// 駒ごとの移動規則。
pub mod legality;
pub mod squares;
pub mod types;

pub type AttackMap = attack::AttackMap;
pub type AttackPolicy = attack::AttackPolicy;
pub type Board = board::Board;
pub type CastleSide = types::CastleSide;
pub type CastlingFlags = board::CastlingFlags;
pub type Color = types::Color;
pub type MoveRecord = board::MoveRecord;
pub type Piece = types::Piece;
pub type PieceKind = types::PieceKind;
pub type Square = types::Square;
pub type SquareSet = squares::SquareSet;
