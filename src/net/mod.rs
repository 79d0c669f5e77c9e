//! Online play against a remote room server

pub mod client;
pub mod protocol;
pub mod session;
pub mod socketio;

pub use client::{NetClient, NetEvent};
pub use protocol::{ClientMessage, RoomInfo, ServerMessage, WireGameState, WirePlayer};
pub use session::{MoveRejection, OnlineSession, Phase};
