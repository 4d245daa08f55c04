pub mod seed;
pub mod spectrum;

pub use seed::{read_seed_matrix, write_matrix};
pub use spectrum::read_spectrum;
