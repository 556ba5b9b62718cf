#![deny(warnings)]
pub mod deck;
pub mod error;
pub mod game;
pub mod model;
pub mod pool;
pub mod rules;

pub use error::{InvaderError, Result};
