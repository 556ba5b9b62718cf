//! Terrain predictions from the invader cards revealed so far.

mod estimator;

pub use estimator::{InvaderCardpool, Prediction};
