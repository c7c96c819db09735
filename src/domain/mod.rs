//! Domain layer: strong types with validation and invariants (no I/O).

mod validation;
mod value;

pub use validation::ValidationError;
pub use value::{ApiKey, PhoneNumber, ResourceId};
