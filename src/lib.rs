#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod board;
pub mod client;
pub mod coord;
pub mod game;
pub mod mark;
pub mod role;
