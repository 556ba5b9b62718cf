pub mod config;
pub mod session;
pub mod snapshot;

pub use config::{AdversarySlot, GameConfig};
pub use session::Session;
pub use snapshot::SessionSnapshot;
