//! Chess board interaction core.
//!
//! このクレートは盤面と駒の移動規則を扱う `engine` と、クリックによる選択・移動アニメーションを扱う
//! `interaction` を提供します。描画と音声は UI（`gambit_sdl` / `gambit_wasm`）側の担当です。
//!
//! 王手・詰み・アンパッサン・プロモーション・千日手・AI は扱いません。

#![forbid(unsafe_code)]

/// 盤面と駒の移動規則を提供するモジュール。
pub mod engine;

/// 選択・アニメーション・1局分の状態を提供するモジュール。
pub mod interaction;

/// ログ出力の初期化。
pub mod logging;
