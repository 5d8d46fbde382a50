use core::time::Duration;

use tracing::{info, trace, warn};

use crate::engine::attack::AttackPolicy;
use crate::engine::board::{Board, MoveRecord};
use crate::engine::squares::SquareSet;
use crate::engine::types::{Piece, Square};
use crate::interaction::animation::{Animator, InFlight, Pacing};
use crate::interaction::projector::Click;
use crate::interaction::selection::{ClickOutcome, Selection};

/// セッションの設定。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct SessionConfig {
    /// キングの合法手に使う攻撃表の作り方。
    attacks: AttackPolicy,
    /// アニメーションの進め方。
    pacing: Pacing,
}

impl SessionConfig {
    /// 攻撃表の作り方を返す。
    #[inline]
    #[must_use]
    pub const fn attacks(&self) -> AttackPolicy {
        self.attacks
    }

    /// 攻撃表なし・30 フレーム固定のアニメーション。
    #[inline]
    #[must_use]
    pub const fn classic() -> Self {
        Self {
            attacks: AttackPolicy::Disabled,
            pacing: Pacing::CLASSIC,
        }
    }

    /// 設定を生成する。
    #[inline]
    #[must_use]
    pub const fn new(attacks: AttackPolicy, pacing: Pacing) -> Self {
        Self { attacks, pacing }
    }

    /// アニメーションの進め方を返す。
    #[inline]
    #[must_use]
    pub const fn pacing(&self) -> Pacing {
        self.pacing
    }
}

/// 描画・音声側へ通知する出来事。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Event {
    /// 1手の移動が完了し、盤面が確定した（1手につき1回）。
    MoveCompleted(MoveRecord),
}

/// 1局分の状態（盤面・選択・アニメーション）をまとめて所有する。
///
/// 1フレームに1回 `tick` を呼ぶ。入力の処理、アニメーションの更新の順に行う。
/// 描画側は `board` / `selected` / `legal_moves` / `in_flight` を読むだけで、変更しない。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Session {
    /// 移動アニメーション。
    animator: Animator,
    /// 攻撃表の作り方。
    attacks: AttackPolicy,
    /// 盤面。
    board: Board,
    /// 選択状態。
    selection: Selection,
}

impl Default for Session {
    #[inline]
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    /// アニメーションを1フレーム進める。完了したフレームでだけイベントを返す。
    #[inline]
    pub fn advance(&mut self, elapsed: Duration) -> Option<Event> {
        let record = self.animator.tick(elapsed, &mut self.board);

        record.map(|rec| {
            info!(
                from = ?rec.from(),
                to = ?rec.to(),
                piece = %rec.piece().to_char(),
                captured = ?rec.captured().map(Piece::to_char),
                castle = ?rec.castle(),
                "move completed"
            );
            Event::MoveCompleted(rec)
        })
    }

    /// 盤面を返す。
    #[inline]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// 盤面のクリックを1回処理する。
    ///
    /// 駒の移動中は入力を受け付けない（`ClickOutcome::Ignored`）。
    #[inline]
    pub fn click(&mut self, click: Click) -> ClickOutcome {
        if self.animator.is_animating() {
            trace!(?click, "click ignored while animating");
            return ClickOutcome::Ignored;
        }

        let outcome = self.selection.click(click, &self.board, self.attacks);

        if let ClickOutcome::MoveRequested { from, to } = outcome {
            if let Err(err) = self.animator.dispatch(&self.board, from, to) {
                warn!(?from, ?to, ?err, "move could not be animated");
            }
        }

        outcome
    }

    /// 移動中の駒と描画位置を返す。
    #[inline]
    #[must_use]
    pub fn in_flight(&self) -> Option<InFlight> {
        self.animator.in_flight()
    }

    /// 駒が移動中かどうかを返す。
    #[inline]
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// 選択中の駒の移動先を返す。
    #[inline]
    #[must_use]
    pub const fn legal_moves(&self) -> SquareSet {
        self.selection.legal_moves()
    }

    /// 初期局面から始める。
    #[inline]
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self::with_board(Board::initial(), config)
    }

    /// 選択中のマスを返す。
    #[inline]
    #[must_use]
    pub const fn selected(&self) -> Option<Square> {
        self.selection.selected()
    }

    /// 1フレーム分の処理（入力 → アニメーション）を行う。
    ///
    /// 同じフレームでアニメーションが完了しても、そのフレームの入力は確定前の盤面で処理される。
    #[inline]
    pub fn tick(&mut self, input: Option<Click>, elapsed: Duration) -> Option<Event> {
        if let Some(click) = input {
            let _outcome: ClickOutcome = self.click(click);
        }

        self.advance(elapsed)
    }

    /// 描画すべき駒を返す。移動中の駒の移動元は空として扱う。
    #[inline]
    #[must_use]
    pub fn visible_piece_at(&self, square: Square) -> Option<Piece> {
        let hidden = self
            .animator
            .in_flight()
            .is_some_and(|flight| flight.from() == square);
        if hidden {
            return None;
        }

        self.board.piece_at(square)
    }

    /// 任意の盤面から始める。
    #[inline]
    #[must_use]
    pub fn with_board(board: Board, config: SessionConfig) -> Self {
        Self {
            animator: Animator::new(config.pacing()),
            attacks: config.attacks(),
            board,
            selection: Selection::default(),
        }
    }
}
