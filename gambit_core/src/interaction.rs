/// 駒の移動アニメーション。
pub mod animation;
/// ポインタ位置と盤面座標の変換。
pub mod projector;
/// 駒の選択状態。
pub mod selection;
/// 盤面・選択・アニメーションをまとめた1局分の状態。
pub mod session;

pub use projector::Projector;

pub type Animator = animation::Animator;
pub type BoardPoint = animation::BoardPoint;
pub type Click = projector::Click;
pub type ClickOutcome = selection::ClickOutcome;
pub type Event = session::Event;
pub type GridProjector = projector::GridProjector;
pub type InFlight = animation::InFlight;
pub type Pacing = animation::Pacing;
pub type Session = session::Session;
pub type SessionConfig = session::SessionConfig;
