//! WASM (Canvas) 向けの最小 UI。
//!
//! - `wasm32` ターゲットのみで `wasm-bindgen` / `web-sys` を有効化する。
//! - それ以外のターゲットでは、workspace の `cargo test` / `cargo clippy` を通すためにスタブを提供する。
//! - 入力と時間の扱いは [`Driver`] に集約し、どちらのターゲットでも同じものを使う。

use core::time::Duration;

use gambit_core::interaction::Projector as _;
use gambit_core::{engine, interaction};
use tracing::debug;

/// 盤面描画のオフセット。
pub const OFFSET: i32 = 8;

/// ブラウザから渡される時刻（ミリ秒）で [`interaction::Session`] を進める。
#[derive(Clone, Debug, PartialEq)]
pub struct Driver {
    /// 前回 `tick` の時刻。初回は `None`。
    last_ms: Option<f64>,
    /// ピクセル座標とマスの変換。
    projector: interaction::GridProjector,
    /// 1局分の状態。
    session: interaction::Session,
}

impl Driver {
    /// ピクセル座標のクリックを処理する。選択・移動などの状態変化があれば true。
    #[inline]
    pub fn click(&mut self, x: i32, y: i32) -> bool {
        let click = self.projector.resolve((x, y));
        let outcome = self.session.click(click);
        debug!(x, y, ?outcome, "canvas click");
        outcome != interaction::ClickOutcome::Ignored
    }

    /// `cell_size` ピクセルのマスで初期局面から始める。
    #[inline]
    #[must_use]
    pub fn new(cell_size: i32) -> Self {
        Self {
            last_ms: None,
            projector: interaction::GridProjector::new(OFFSET, OFFSET, cell_size),
            session: interaction::Session::default(),
        }
    }

    /// 描画位置の変換を返す。
    #[inline]
    #[must_use]
    pub const fn projector(&self) -> &interaction::GridProjector {
        &self.projector
    }

    /// 1局分の状態を返す。
    #[inline]
    #[must_use]
    pub const fn session(&self) -> &interaction::Session {
        &self.session
    }

    /// 状態表示用の文字列を返す。
    #[inline]
    #[must_use]
    pub fn status_text(&self) -> String {
        if let Some(flight) = self.session.in_flight() {
            let percent = (flight.progress() * 100.0).round();
            return format!("Moving {} | {percent}%", flight.piece().to_char());
        }

        match self.session.selected() {
            Some(square) => {
                let piece = self
                    .session
                    .board()
                    .piece_at(square)
                    .map_or('?', engine::Piece::to_char);
                let count = self.session.legal_moves().len();
                format!(
                    "Selected {piece} at ({}, {}) | {count} moves",
                    square.row(),
                    square.col()
                )
            }
            None => "Click a piece to select it".to_owned(),
        }
    }

    /// アニメーションを進める。手が確定したフレームだけ true。
    ///
    /// - `now_ms`: `performance.now()` 相当の単調増加時刻（ミリ秒）。
    /// - 初回や時刻が戻った場合は経過時間 0 として扱う。
    #[inline]
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let delta_ms = self.last_ms.map_or(0.0, |last| (now_ms - last).max(0.0));
        self.last_ms = Some(now_ms);

        let elapsed = Duration::try_from_secs_f64(delta_ms / 1000.0).unwrap_or(Duration::ZERO);
        self.session.advance(elapsed).is_some()
    }
}

/// 盤面に描く駒の文字。
#[inline]
#[must_use]
pub const fn glyph(piece: engine::Piece) -> char {
    match (piece.color(), piece.kind()) {
        (engine::Color::White, engine::PieceKind::Bishop) => '\u{2657}',
        (engine::Color::White, engine::PieceKind::King) => '\u{2654}',
        (engine::Color::White, engine::PieceKind::Knight) => '\u{2658}',
        (engine::Color::White, engine::PieceKind::Pawn) => '\u{2659}',
        (engine::Color::White, engine::PieceKind::Queen) => '\u{2655}',
        (engine::Color::White, engine::PieceKind::Rook) => '\u{2656}',
        (engine::Color::Black, engine::PieceKind::Bishop) => '\u{265D}',
        (engine::Color::Black, engine::PieceKind::King) => '\u{265A}',
        (engine::Color::Black, engine::PieceKind::Knight) => '\u{265E}',
        (engine::Color::Black, engine::PieceKind::Pawn) => '\u{265F}',
        (engine::Color::Black, engine::PieceKind::Queen) => '\u{265B}',
        (engine::Color::Black, engine::PieceKind::Rook) => '\u{265C}',
        _ => '?',
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm32_app {
    use gambit_core::engine;
    use gambit_core::interaction::Projector as _;
    use wasm_bindgen::JsValue;
    use wasm_bindgen::prelude::*;
    use web_sys::CanvasRenderingContext2d;

    use crate::{Driver, OFFSET, glyph};

    /// ブラウザ上で進行するアプリ状態。
    #[wasm_bindgen]
    #[derive(Debug)]
    pub struct App {
        driver: Driver,
    }

    #[wasm_bindgen]
    impl App {
        /// `cell_size` ピクセルのマスで初期局面から始める。
        #[wasm_bindgen(constructor)]
        pub fn new(cell_size: i32) -> Self {
            Self {
                driver: Driver::new(cell_size),
            }
        }

        /// クリック入力（Canvas 上のピクセル座標）。状態が変われば true。
        pub fn click(&mut self, x: i32, y: i32) -> bool {
            self.driver.click(x, y)
        }

        /// アニメーションを進める。手が確定したフレームだけ true。
        ///
        /// - `now_ms`: `performance.now()` 相当の単調増加時刻（ミリ秒）。
        pub fn tick(&mut self, now_ms: f64) -> bool {
            self.driver.tick(now_ms)
        }

        /// 駒が移動中かどうか。
        pub fn is_animating(&self) -> bool {
            self.driver.session().is_animating()
        }

        /// 状態表示用の文字列を返す。
        pub fn status_text(&self) -> String {
            self.driver.status_text()
        }

        /// Canvas へ盤面を描画する。
        pub fn render(&self, ctx: &CanvasRenderingContext2d) {
            let session = self.driver.session();
            let cell_size = f64::from(self.driver.projector().cell());
            let offset = f64::from(OFFSET);
            let full = 8.0 * cell_size + offset * 2.0;

            ctx.set_fill_style(&JsValue::from_str("#302418"));
            ctx.fill_rect(0.0, 0.0, full, full);

            ctx.set_font(&format!("{}px serif", (cell_size * 0.8).round()));
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");

            for row in 0..8_u8 {
                for col in 0..8_u8 {
                    let Some(square) = engine::Square::new(row, col) else {
                        continue;
                    };
                    let left = offset + f64::from(col) * cell_size;
                    let top = offset + f64::from(row) * cell_size;

                    let fill = if session.selected() == Some(square) {
                        "#40b040"
                    } else if session.legal_moves().contains(square) {
                        "#e0e040"
                    } else if (row + col) % 2 == 0 {
                        "#c8c8c8"
                    } else {
                        "#606060"
                    };
                    ctx.set_fill_style(&JsValue::from_str(fill));
                    ctx.fill_rect(left, top, cell_size, cell_size);

                    if let Some(piece) = session.visible_piece_at(square) {
                        draw_piece(ctx, piece, left, top, cell_size);
                    }
                }
            }

            // 移動中の駒は補間位置に描く。
            if let Some(flight) = session.in_flight() {
                let (left, top) = self.driver.projector().place(flight.position());
                draw_piece(ctx, flight.piece(), left, top, cell_size);
            }
        }
    }

    fn draw_piece(
        ctx: &CanvasRenderingContext2d,
        piece: engine::Piece,
        left: f64,
        top: f64,
        cell_size: f64,
    ) {
        ctx.set_fill_style(&JsValue::from_str("#000000"));
        let text = glyph(piece).to_string();
        let _: Result<(), JsValue> =
            ctx.fill_text(&text, left + cell_size / 2.0, top + cell_size / 2.0);
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm32_app::App;

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm_stub {
    use crate::Driver;

    /// 描画を持たない `App`。入力と時間の処理だけを行う。
    #[derive(Debug)]
    pub struct App {
        driver: Driver,
    }

    impl App {
        pub fn new(cell_size: i32) -> Self {
            Self {
                driver: Driver::new(cell_size),
            }
        }

        pub fn click(&mut self, x: i32, y: i32) -> bool {
            self.driver.click(x, y)
        }

        pub fn tick(&mut self, now_ms: f64) -> bool {
            self.driver.tick(now_ms)
        }

        pub fn is_animating(&self) -> bool {
            self.driver.session().is_animating()
        }

        pub fn status_text(&self) -> String {
            self.driver.status_text()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use non_wasm_stub::App;
