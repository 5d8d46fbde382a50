use crate::engine::types::Square;
use crate::interaction::animation::BoardPoint;

/// 入力1回分の盤面クリック。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Click {
    /// 盤の外（盤面の平面に当たらなかった場合を含む）。
    OffBoard,
    /// 盤上のマス。
    Square(Square),
}

impl Click {
    /// 符号付きの行・列からクリックを作る。範囲外なら `OffBoard`。
    #[inline]
    #[must_use]
    pub fn from_coords(row: i32, col: i32) -> Self {
        let (Ok(row_u8), Ok(col_u8)) = (u8::try_from(row), u8::try_from(col)) else {
            return Self::OffBoard;
        };

        match Square::new(row_u8, col_u8) {
            Some(square) => Self::Square(square),
            None => Self::OffBoard,
        }
    }
}

/// ポインタ位置と盤面座標を相互に変換する（描画側の座標系との境界）。
pub trait Projector {
    /// 描画位置の型。
    type Point;
    /// ポインタ位置の型。
    type Pointer;

    /// 盤面上の連続座標を描画位置に変換する。
    fn place(&self, point: BoardPoint) -> Self::Point;

    /// ポインタ位置をクリックに変換する。
    fn resolve(&self, pointer: Self::Pointer) -> Click;
}

/// 画面上に格子状に並んだ 2D の盤面（ピクセル座標）。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct GridProjector {
    /// 1マスのピクセルサイズ。
    cell: i32,
    /// 盤の左端。
    left: i32,
    /// 盤の上端。
    top: i32,
}

impl GridProjector {
    /// 1マスのピクセルサイズを返す。
    #[inline]
    #[must_use]
    pub const fn cell(&self) -> i32 {
        self.cell
    }

    /// 盤の左上とマスの大きさから生成する。
    #[inline]
    #[must_use]
    pub const fn new(left: i32, top: i32, cell: i32) -> Self {
        Self { cell, left, top }
    }
}

impl Projector for GridProjector {
    type Point = (f64, f64);
    type Pointer = (i32, i32);

    /// `point` を中心とするマスの左上のピクセル座標を返す。
    #[inline]
    #[expect(
        clippy::float_arithmetic,
        reason = "interpolated board positions are continuous"
    )]
    fn place(&self, point: BoardPoint) -> (f64, f64) {
        let cell = f64::from(self.cell);
        let x = f64::from(self.left) + (f64::from(point.x()) - 0.5) * cell;
        let y = f64::from(self.top) + (f64::from(point.z()) - 0.5) * cell;
        (x, y)
    }

    #[inline]
    fn resolve(&self, (x, y): (i32, i32)) -> Click {
        let col = x
            .checked_sub(self.left)
            .and_then(|dx| dx.checked_div_euclid(self.cell));
        let row = y
            .checked_sub(self.top)
            .and_then(|dy| dy.checked_div_euclid(self.cell));

        match (row, col) {
            (Some(r), Some(c)) => Click::from_coords(r, c),
            _ => Click::OffBoard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Click, GridProjector, Projector as _};
    use crate::engine::types::Square;
    use crate::interaction::animation::BoardPoint;

    #[test]
    fn resolves_pixels_inside_board() {
        let projector = GridProjector::new(16, 16, 64);

        assert_eq!(projector.resolve((16, 16)), Click::from_coords(0, 0));
        assert_eq!(
            projector.resolve((16 + 64 * 4 + 10, 16 + 64 * 6 + 63)),
            Square::new(6, 4).map_or(Click::OffBoard, Click::Square)
        );
    }

    #[test]
    fn pixels_outside_board_are_off_board() {
        let projector = GridProjector::new(16, 16, 64);

        assert_eq!(projector.resolve((15, 100)), Click::OffBoard);
        assert_eq!(projector.resolve((100, 10)), Click::OffBoard);
        assert_eq!(projector.resolve((16 + 64 * 8, 100)), Click::OffBoard);
        assert_eq!(projector.resolve((i32::MIN, i32::MAX)), Click::OffBoard);
    }

    #[test]
    fn zero_cell_size_never_resolves() {
        let projector = GridProjector::new(0, 0, 0);
        assert_eq!(projector.resolve((0, 0)), Click::OffBoard);
    }

    #[test]
    fn from_coords_rejects_negative_and_large_values() {
        assert_eq!(Click::from_coords(-1, 0), Click::OffBoard);
        assert_eq!(Click::from_coords(0, 8), Click::OffBoard);
        assert_eq!(Click::from_coords(300, 0), Click::OffBoard);
    }

    #[test]
    fn places_square_centers_at_cell_corners() {
        let projector = GridProjector::new(16, 16, 64);
        let center = Square::new(2, 3).map(BoardPoint::center_of).unwrap_or_default();

        let (x, y) = projector.place(center);
        assert!((x - f64::from(16 + 64 * 3)).abs() < 1e-9);
        assert!((y - f64::from(16 + 64 * 2)).abs() < 1e-9);
    }
}
