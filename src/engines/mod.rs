pub mod mutation;
pub mod feedback;
pub mod round;

pub use round::{RoundConfig, RoundEngine, RoundReport};
