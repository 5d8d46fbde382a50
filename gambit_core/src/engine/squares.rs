use crate::engine::types::Square;

/// マスの集合（1マス1ビットの `u64`）。
///
/// 選択中の駒の移動先（合法手の集合）や、攻撃されているマスの集合に使う。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct SquareSet(u64);

impl SquareSet {
    /// 空集合。
    pub const EMPTY: Self = Self(u64::MIN);

    /// すべてのマスを取り除く。
    #[inline]
    pub const fn clear(&mut self) {
        self.0 = u64::MIN;
    }

    /// 指定マスを含むかどうかを返す。
    #[inline]
    #[must_use]
    pub fn contains(self, square: Square) -> bool {
        self.0 & square.bit() != u64::MIN
    }

    /// 指定マスを加える。
    #[inline]
    pub fn insert(&mut self, square: Square) {
        self.0 |= square.bit();
    }

    /// 空集合かどうかを返す。
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == u64::MIN
    }

    /// 含まれるマスを昇順に列挙する。
    #[inline]
    #[must_use]
    pub const fn iter(self) -> Squares {
        Squares { bits: self.0 }
    }

    /// 要素数を返す。
    #[inline]
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// 和集合を返す。
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl FromIterator<Square> for SquareSet {
    #[inline]
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for square in iter {
            set.insert(square);
        }
        set
    }
}

impl IntoIterator for SquareSet {
    type IntoIter = Squares;
    type Item = Square;

    #[inline]
    fn into_iter(self) -> Squares {
        self.iter()
    }
}

/// `SquareSet` の要素を昇順に返すイテレータ。
#[derive(Clone, Debug)]
pub struct Squares {
    /// 未列挙のビット。
    bits: u64,
}

impl Iterator for Squares {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.bits == u64::MIN {
            return None;
        }

        let index = u8::try_from(self.bits.trailing_zeros()).unwrap_or(u8::MAX);
        self.bits &= self.bits.wrapping_sub(1);
        Square::from_index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::SquareSet;
    use crate::engine::types::Square;

    #[test]
    fn iterates_in_index_order() {
        let squares: SquareSet = [Square::new(4, 4), Square::new(0, 1), Square::new(7, 7)]
            .into_iter()
            .flatten()
            .collect();

        let listed: Vec<(u8, u8)> = squares.iter().map(|sq| (sq.row(), sq.col())).collect();
        assert_eq!(listed, vec![(0, 1), (4, 4), (7, 7)]);
        assert_eq!(squares.len(), 3);
    }

    #[test]
    fn clear_empties_the_set() {
        let mut squares = SquareSet::EMPTY;
        if let Some(square) = Square::new(3, 3) {
            squares.insert(square);
            assert!(squares.contains(square));
        }

        squares.clear();
        assert!(squares.is_empty());
    }
}
