//! 駒の移動アニメーション。
//!
//! 盤面はアニメーションが終わるまで変更しない。移動中の駒は `InFlight` の補間位置で描画し、
//! 盤面上の移動元には描画しない。

use core::time::Duration;

use tracing::{debug, trace};

use crate::engine::board::{Board, MoveRecord};
use crate::engine::types::{Piece, Square};

/// 1手のアニメーションの既定の長さ。
const DEFAULT_DURATION: Duration = Duration::from_millis(500);

/// 固定ステップ方式で使う1手あたりのフレーム数。
const CLASSIC_STEPS: u16 = 30;

/// マスの中心までのオフセット。
const HALF_CELL: f32 = 0.5;

/// 盤面上の連続座標（マスの一辺を 1 とする、盤面と平行な 2 軸）。
///
/// `x` は列方向、`z` は行方向。
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoardPoint {
    /// 列方向の座標。
    x: f32,
    /// 行方向の座標。
    z: f32,
}

impl BoardPoint {
    /// マスの中心を返す。
    #[inline]
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "board-space coordinates are continuous")]
    pub fn center_of(square: Square) -> Self {
        Self {
            x: f32::from(square.col()) + HALF_CELL,
            z: f32::from(square.row()) + HALF_CELL,
        }
    }

    /// `self` から `to` へ割合 `t` だけ進んだ点を返す。
    #[inline]
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "linear interpolation")]
    pub fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            x: self.x + (to.x - self.x) * t,
            z: self.z + (to.z - self.z) * t,
        }
    }

    /// 列方向の座標を返す。
    #[inline]
    #[must_use]
    pub const fn x(self) -> f32 {
        self.x
    }

    /// 行方向の座標を返す。
    #[inline]
    #[must_use]
    pub const fn z(self) -> f32 {
        self.z
    }
}

/// アニメーションの進め方。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Pacing {
    /// 1回の `tick` で1ステップ進む（経過時間は使わない）。
    Frames(u16),
    /// 経過時間に比例して進む。
    Timed(Duration),
}

impl Default for Pacing {
    #[inline]
    fn default() -> Self {
        Self::Timed(DEFAULT_DURATION)
    }
}

impl Pacing {
    /// 30 フレームで1手を動かす固定ステップ方式。
    pub const CLASSIC: Self = Self::Frames(CLASSIC_STEPS);

    /// 移動が完了したかどうかを返す。
    fn is_complete(self, flight: &Flight) -> bool {
        match self {
            Self::Frames(steps) => flight.frames >= steps,
            Self::Timed(duration) => flight.elapsed >= duration,
        }
    }

    /// 進捗（0.0..=1.0）を返す。
    #[expect(clippy::float_arithmetic, reason = "progress is a ratio")]
    fn progress(self, flight: &Flight) -> f32 {
        let ratio = match self {
            Self::Frames(steps) => {
                if steps == u16::MIN {
                    return 1.0;
                }
                f32::from(flight.frames) / f32::from(steps)
            }
            Self::Timed(duration) => {
                if duration.is_zero() {
                    return 1.0;
                }
                flight.elapsed.as_secs_f32() / duration.as_secs_f32()
            }
        };

        ratio.clamp(0.0, 1.0)
    }
}

/// アニメーションを開始できなかった理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum DispatchError {
    /// すでに別の駒が移動中。
    Busy,
    /// 移動元に駒がない。
    EmptySource,
}

/// 移動中の1手。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Flight {
    /// 経過時間。
    elapsed: Duration,
    /// 経過フレーム数。
    frames: u16,
    /// 移動元。
    from: Square,
    /// 移動中の駒。
    piece: Piece,
    /// 移動先。
    to: Square,
}

/// 描画用の移動中の駒。
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InFlight {
    /// 移動元。
    from: Square,
    /// 移動中の駒。
    piece: Piece,
    /// 現在の描画位置。
    position: BoardPoint,
    /// 進捗（0.0..=1.0）。
    progress: f32,
    /// 移動先。
    to: Square,
}

impl InFlight {
    /// 移動元を返す。
    #[inline]
    #[must_use]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// 移動中の駒を返す。
    #[inline]
    #[must_use]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    /// 現在の描画位置を返す。
    #[inline]
    #[must_use]
    pub const fn position(&self) -> BoardPoint {
        self.position
    }

    /// 進捗を返す。
    #[inline]
    #[must_use]
    pub const fn progress(&self) -> f32 {
        self.progress
    }

    /// 移動先を返す。
    #[inline]
    #[must_use]
    pub const fn to(&self) -> Square {
        self.to
    }
}

/// 1手ずつ駒を動かし、完了時にだけ盤面を確定する。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Animator {
    /// 移動中の1手（なければ待機中）。
    flight: Option<Flight>,
    /// 進め方。
    pacing: Pacing,
}

impl Animator {
    /// `from` から `to` への移動を開始する。
    ///
    /// # Errors
    ///
    /// - `DispatchError::Busy`: すでに移動中の駒がある場合
    /// - `DispatchError::EmptySource`: `from` に駒がない場合
    ///
    #[inline]
    pub fn dispatch(&mut self, board: &Board, from: Square, to: Square) -> Result<(), DispatchError> {
        if self.flight.is_some() {
            return Err(DispatchError::Busy);
        }

        let Some(piece) = board.piece_at(from) else {
            return Err(DispatchError::EmptySource);
        };

        debug!(?from, ?to, ?piece, "animation started");
        self.flight = Some(Flight {
            elapsed: Duration::ZERO,
            frames: u16::MIN,
            from,
            piece,
            to,
        });
        Ok(())
    }

    /// 移動中の駒と描画位置を返す。
    #[inline]
    #[must_use]
    pub fn in_flight(&self) -> Option<InFlight> {
        self.flight.map(|flight| {
            let progress = self.pacing.progress(&flight);
            let start = BoardPoint::center_of(flight.from);
            let end = BoardPoint::center_of(flight.to);

            InFlight {
                from: flight.from,
                piece: flight.piece,
                position: start.lerp(end, progress),
                progress,
                to: flight.to,
            }
        })
    }

    /// 移動中かどうかを返す。
    #[inline]
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.flight.is_some()
    }

    /// 進め方を指定して生成する。
    #[inline]
    #[must_use]
    pub const fn new(pacing: Pacing) -> Self {
        Self {
            flight: None,
            pacing,
        }
    }

    /// 進め方を返す。
    #[inline]
    #[must_use]
    pub const fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// 1フレーム分進める。
    ///
    /// 完了したフレームでだけ盤面を確定して、その手の記録を返す。途中で中断する手段はない。
    #[inline]
    pub fn tick(&mut self, elapsed: Duration, board: &mut Board) -> Option<MoveRecord> {
        let Some(mut flight) = self.flight.take() else {
            return None;
        };

        flight.frames = flight.frames.saturating_add(1);
        flight.elapsed = flight.elapsed.saturating_add(elapsed);

        if !self.pacing.is_complete(&flight) {
            trace!(frames = flight.frames, "animation advanced");
            self.flight = Some(flight);
            return None;
        }

        let record = board.commit_move(flight.from, flight.to);
        debug!(from = ?flight.from, to = ?flight.to, "animation finished");
        record
    }
}
