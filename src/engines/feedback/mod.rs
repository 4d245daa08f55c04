pub mod detector;
pub mod weights;
pub mod generator;

pub use detector::{Extremum, PriorityAnnotation, PriorityCase, PriorityDetector, PriorityMap};
pub use generator::generate_next_round;
pub use weights::{implicated_operators, WeightTable};
