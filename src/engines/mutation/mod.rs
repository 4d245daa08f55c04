pub mod range;
pub mod operators;
pub mod selector;
pub mod driver;
pub mod logger;

pub use driver::{MutationDriver, TrackingEntry};
pub use logger::{MutationLogger, MutationRecord};
pub use operators::{Operator, OPERATOR_CATALOG};
pub use range::ValueRange;
pub use selector::{parse_enabled, OperatorSelector};
