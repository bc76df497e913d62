//! Game-state engine for a grid mine-deduction game.
//!
//! A [`GameSession`] owns a [`Board`] and turns reveal, chord and flag commands into ordered
//! [`CellDelta`]s plus an optional [`Ending`]. Drawing, input and animation are left to the
//! caller.
#![no_std]

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use chord::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use reveal::*;
pub use session::*;
pub use types::*;
pub use view::*;

mod board;
mod cell;
mod chord;
mod config;
mod error;
mod generator;
mod reveal;
mod session;
mod types;
mod view;
