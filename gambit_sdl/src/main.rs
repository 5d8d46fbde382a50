//! SDL で動作する最小 UI。

use gambit_core::interaction::Projector as _;
use gambit_core::logging::{self, LogFormat};
use gambit_core::{engine, interaction};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::Color as SdlColor;
use sdl2::rect::Rect;
use std::time::Instant;
use tracing::{Level, info};

/// 盤面のオフセット（左上）。
const OFFSET: i32 = 16;

/// 1マスのピクセルサイズ。
const CELL_SIZE: i32 = 64;

/// 盤面の一辺の長さ（マス）。
const BOARD_LEN: i32 = 8;

/// 盤面の一辺の長さ（ピクセル）。
const BOARD_PX: i32 = BOARD_LEN * CELL_SIZE;

/// ウィンドウ幅（ピクセル）。
const WINDOW_W: u32 = (OFFSET + BOARD_PX + OFFSET) as u32;

/// ウィンドウ高さ（ピクセル）。
const WINDOW_H: u32 = (OFFSET + BOARD_PX + OFFSET) as u32;

/// 駒のドット絵の一辺（ドット数）。
const GLYPH_SIZE: i32 = 5;

/// 駒の種類ごとの 5×5 のドット絵を返す（各行の下位 5 ビット、上位ビットが左）。
fn glyph(kind: engine::PieceKind) -> [u8; 5] {
    match kind {
        engine::PieceKind::Bishop => [0b00100, 0b01010, 0b00100, 0b01110, 0b11111],
        engine::PieceKind::King => [0b00100, 0b01110, 0b00100, 0b11111, 0b11111],
        engine::PieceKind::Knight => [0b01100, 0b11110, 0b00110, 0b01110, 0b11111],
        engine::PieceKind::Pawn => [0b00000, 0b00100, 0b01110, 0b00100, 0b01110],
        engine::PieceKind::Queen => [0b10101, 0b10101, 0b01110, 0b01110, 0b11111],
        engine::PieceKind::Rook => [0b10101, 0b11111, 0b01110, 0b01110, 0b11111],
        _ => [0b11111, 0b10001, 0b10001, 0b10001, 0b11111],
    }
}

#[derive(Debug)]
struct App {
    last_frame: Instant,
    projector: interaction::GridProjector,
    session: interaction::Session,
}

impl App {
    fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            projector: interaction::GridProjector::new(OFFSET, OFFSET, CELL_SIZE),
            session: interaction::Session::new(interaction::SessionConfig::default()),
        }
    }

    fn status_text(&self) -> String {
        if let Some(flight) = self.session.in_flight() {
            let percent = (flight.progress() * 100.0) as u32;
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
            None => "Click a piece to select it".to_string(),
        }
    }

    /// 1フレーム分の処理（入力 → アニメーション）を行い、完了した手を通知する。
    fn step(&mut self, click: Option<(i32, i32)>) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        let input = click.map(|pointer| self.projector.resolve(pointer));
        if let Some(interaction::Event::MoveCompleted(record)) = self.session.tick(input, elapsed)
        {
            // 効果音の代わり。
            let cue = if record.castle().is_some() {
                "castle"
            } else {
                "move"
            };
            info!(cue, "play sound");
        }
    }
}

fn square_color(
    row: i32,
    col: i32,
    session: &interaction::Session,
    square: engine::Square,
) -> SdlColor {
    if session.selected() == Some(square) {
        return SdlColor::RGB(64, 176, 64);
    }
    if session.legal_moves().contains(square) {
        return SdlColor::RGB(224, 224, 64);
    }
    if (row + col) % 2 == 0 {
        SdlColor::RGB(200, 200, 200)
    } else {
        SdlColor::RGB(96, 96, 96)
    }
}

fn draw_piece(
    canvas: &mut sdl2::render::Canvas<sdl2::video::Window>,
    piece: engine::Piece,
    left: i32,
    top: i32,
) {
    let (body, ink) = match piece.color() {
        engine::Color::White => (SdlColor::RGB(245, 240, 225), SdlColor::RGB(40, 40, 40)),
        engine::Color::Black => (SdlColor::RGB(30, 30, 30), SdlColor::RGB(230, 230, 230)),
        _ => (SdlColor::RGB(128, 128, 128), SdlColor::RGB(0, 0, 0)),
    };

    let inset = CELL_SIZE / 8;
    let body_rect = Rect::new(
        left + inset,
        top + inset,
        (CELL_SIZE - inset * 2) as u32,
        (CELL_SIZE - inset * 2) as u32,
    );
    canvas.set_draw_color(body);
    let _: Result<(), String> = canvas.fill_rect(body_rect);

    let dot = (CELL_SIZE - inset * 4) / GLYPH_SIZE;
    let origin_x = left + (CELL_SIZE - dot * GLYPH_SIZE) / 2;
    let origin_y = top + (CELL_SIZE - dot * GLYPH_SIZE) / 2;
    canvas.set_draw_color(ink);
    for (y, bits) in (0..).zip(glyph(piece.kind())) {
        for x in 0..GLYPH_SIZE {
            if bits & (1 << (GLYPH_SIZE - 1 - x)) == 0 {
                continue;
            }
            let rect = Rect::new(origin_x + x * dot, origin_y + y * dot, dot as u32, dot as u32);
            let _: Result<(), String> = canvas.fill_rect(rect);
        }
    }
}

fn draw_board(canvas: &mut sdl2::render::Canvas<sdl2::video::Window>, app: &App) {
    let session = &app.session;

    canvas.set_draw_color(SdlColor::RGB(40, 32, 24));
    canvas.clear();

    // マスと、移動中でない駒。
    for row in 0..BOARD_LEN {
        for col in 0..BOARD_LEN {
            let xx = OFFSET + col * CELL_SIZE;
            let yy = OFFSET + row * CELL_SIZE;

            let (Ok(row_u8), Ok(col_u8)) = (u8::try_from(row), u8::try_from(col)) else {
                continue;
            };
            let Some(square) = engine::Square::new(row_u8, col_u8) else {
                continue;
            };

            let rect = Rect::new(xx, yy, CELL_SIZE as u32, CELL_SIZE as u32);
            canvas.set_draw_color(square_color(row, col, session, square));
            let _: Result<(), String> = canvas.fill_rect(rect);

            if let Some(piece) = session.visible_piece_at(square) {
                draw_piece(canvas, piece, xx, yy);
            }
        }
    }

    // 移動中の駒は補間位置に描く。
    if let Some(flight) = session.in_flight() {
        let (x, y) = app.projector.place(flight.position());
        draw_piece(canvas, flight.piece(), x.round() as i32, y.round() as i32);
    }
}

fn main() -> Result<(), String> {
    if let Err(err) = logging::init(LogFormat::Compact, Level::INFO) {
        eprintln!("{err}");
    }

    let sdl = sdl2::init()?;
    let video = sdl.video()?;

    let window = video
        .window("gambit (Chess)", WINDOW_W, WINDOW_H)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window
        .into_canvas()
        .present_vsync()
        .accelerated()
        .build()
        .map_err(|e| e.to_string())?;

    let mut app = App::new();
    let mut event_pump = sdl.event_pump()?;
    info!("session started");

    'running: loop {
        // 1フレームで扱うクリックは最初の1回だけ。
        let mut click = None;

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    x,
                    y,
                    ..
                } => {
                    if click.is_none() {
                        click = Some((x, y));
                    }
                }
                _ => {}
            }
        }

        app.step(click);

        let title = app.status_text();
        let _ = canvas.window_mut().set_title(&title);
        draw_board(&mut canvas, &app);
        canvas.present();
    }

    Ok(())
}
