/// 駒の色（陣営）。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Color {
    /// 後手。盤の上側（行 0, 1）に並び、行番号が増える方向へ進む。
    Black,
    /// 先手。盤の下側（行 6, 7）に並び、行番号が減る方向へ進む。
    White,
}

impl Color {
    /// ポーンが前進するときの行の増分を返す。
    #[inline]
    #[must_use]
    pub const fn forward(self) -> i8 {
        match self {
            Self::Black => 1,
            Self::White => -1,
        }
    }

    /// キングとルークが初期配置される行を返す。
    #[inline]
    #[must_use]
    pub const fn home_rank(self) -> u8 {
        match self {
            Self::Black => 0,
            Self::White => 7,
        }
    }

    /// 相手側の色を返す。
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    /// ポーンの初期行（2マス前進が許される行）を返す。
    #[inline]
    #[must_use]
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Self::Black => 1,
            Self::White => 6,
        }
    }
}

/// 駒の種類。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum PieceKind {
    Bishop,
    King,
    Knight,
    Pawn,
    Queen,
    Rook,
}

impl PieceKind {
    /// 初期配置の最下段（列 0 から 7）。
    pub const BACK_RANK: [Self; 8] = [
        Self::Rook,
        Self::Knight,
        Self::Bishop,
        Self::Queen,
        Self::King,
        Self::Bishop,
        Self::Knight,
        Self::Rook,
    ];

    /// 大文字の記号（`P`, `R`, `N`, `B`, `Q`, `K`）を返す。
    #[inline]
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Bishop => 'B',
            Self::King => 'K',
            Self::Knight => 'N',
            Self::Pawn => 'P',
            Self::Queen => 'Q',
            Self::Rook => 'R',
        }
    }
}

/// 盤上の駒（色と種類の組）。
///
/// 駒は個体として追跡しない。取られた駒は上書きされて消える。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Piece {
    /// 色。
    color: Color,
    /// 種類。
    kind: PieceKind,
}

impl Piece {
    /// 色を返す。
    #[inline]
    #[must_use]
    pub const fn color(self) -> Color {
        self.color
    }

    /// 盤面表記の1文字から駒を生成する。
    ///
    /// 大文字は白、小文字は黒。駒を表さない文字なら `None`。
    #[inline]
    #[must_use]
    pub const fn from_char(symbol: char) -> Option<Self> {
        let color = if symbol.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };

        let kind = match symbol.to_ascii_uppercase() {
            'B' => PieceKind::Bishop,
            'K' => PieceKind::King,
            'N' => PieceKind::Knight,
            'P' => PieceKind::Pawn,
            'Q' => PieceKind::Queen,
            'R' => PieceKind::Rook,
            _ => return None,
        };

        Some(Self { color, kind })
    }

    /// `color` の駒から見て、この駒が相手の駒かどうかを返す。
    #[inline]
    #[must_use]
    pub fn is_opponent_of(self, color: Color) -> bool {
        self.color != color
    }

    /// 種類を返す。
    #[inline]
    #[must_use]
    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    /// 駒を生成する。
    #[inline]
    #[must_use]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// 盤面表記の1文字を返す（白は大文字、黒は小文字）。
    #[inline]
    #[must_use]
    pub const fn to_char(self) -> char {
        let upper = self.kind.symbol();
        match self.color {
            Color::Black => upper.to_ascii_lowercase(),
            Color::White => upper,
        }
    }
}

/// キャスリングの向き。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum CastleSide {
    /// キング側（列 7 のルーク）。
    Kingside,
    /// クイーン側（列 0 のルーク）。
    Queenside,
}

impl CastleSide {
    /// 両方の向き。
    pub const ALL: [Self; 2] = [Self::Kingside, Self::Queenside];

    /// キャスリングでキングが到達する列を返す。
    #[inline]
    #[must_use]
    pub const fn king_destination_col(self) -> u8 {
        match self {
            Self::Kingside => 6,
            Self::Queenside => 2,
        }
    }

    /// 空いていて、かつ攻撃されていないことが必要な列を返す。
    #[inline]
    #[must_use]
    pub const fn path_cols(self) -> &'static [u8] {
        match self {
            Self::Kingside => &[5, 6],
            Self::Queenside => &[1, 2, 3],
        }
    }

    /// キャスリング後にルークが置かれる列を返す。
    #[inline]
    #[must_use]
    pub const fn rook_destination_col(self) -> u8 {
        match self {
            Self::Kingside => 5,
            Self::Queenside => 3,
        }
    }

    /// ルークの初期列を返す。
    #[inline]
    #[must_use]
    pub const fn rook_home_col(self) -> u8 {
        match self {
            Self::Kingside => 7,
            Self::Queenside => 0,
        }
    }
}

/// 盤面上のマス（0..=63のインデックス）。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Square(
    /// 上位3ビットが行、下位3ビットが列。
    u8,
);

impl Square {
    /// 盤の一辺の長さ。
    pub const BOARD_LEN: u8 = 8;

    /// インデックスから列を取り出すマスク。
    const COL_MASK: u8 = 0b111;

    /// インデックス中の行の位置（ビット数）。
    const ROW_SHIFT: u32 = 3;

    /// そのマスを表すビット（`u64`）を返す。
    #[inline]
    #[must_use]
    pub fn bit(self) -> u64 {
        1_u64
            .checked_shl(u32::from(self.index()))
            .unwrap_or(u64::MIN)
    }

    /// 列（0..=7）を返す。
    #[inline]
    #[must_use]
    pub const fn col(self) -> u8 {
        self.0 & Self::COL_MASK
    }

    /// 0..=63 のインデックスから `Square` を生成する。
    #[inline]
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index >= Self::BOARD_LEN.wrapping_mul(Self::BOARD_LEN) {
            return None;
        }

        Some(Self(index))
    }

    /// 0..=63 のインデックスを返す。
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// 行と列から `Square` を生成する。盤外なら `None`。
    #[inline]
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row >= Self::BOARD_LEN || col >= Self::BOARD_LEN {
            return None;
        }

        match row.checked_shl(Self::ROW_SHIFT) {
            Some(rank_base) => Some(Self(rank_base | col)),
            None => None,
        }
    }

    /// 行・列方向にずらしたマスを返す。盤外に出るなら `None`。
    #[inline]
    #[must_use]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let Some(row) = self.row().checked_add_signed(d_row) else {
            return None;
        };
        let Some(col) = self.col().checked_add_signed(d_col) else {
            return None;
        };

        Self::new(row, col)
    }

    /// 行（0..=7）を返す。
    #[inline]
    #[must_use]
    pub const fn row(self) -> u8 {
        match self.0.checked_shr(Self::ROW_SHIFT) {
            Some(value) => value,
            None => u8::MIN,
        }
    }
}
