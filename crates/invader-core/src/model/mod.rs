pub mod adversary;
pub mod card;
pub mod stage;
pub mod terrain;

pub use adversary::{Adversary, ParseAdversaryError};
pub use card::{Card, ParseCardError};
pub use stage::Stage;
pub use terrain::Terrain;
