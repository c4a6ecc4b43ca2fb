//! HTTP Handlers

mod audio;
mod containers;
mod ping;
mod settings;
mod tafsir;
mod translations;
mod websocket;

pub use audio::*;
pub use containers::*;
pub use ping::*;
pub use settings::*;
pub use tafsir::*;
pub use translations::*;
pub use websocket::*;
