//! Baseline definition, parsing, and load-time validation.
//!
//! A baseline is the declarative side of the engine: which fields are
//! expected, what their reference values are, and which strategy judges
//! each one. Everything configuration-shaped is rejected here, at load
//! time, so the matcher never has to guess what a malformed expectation
//! meant.

mod parser;
mod schema;
mod validators;

pub use parser::{BaselineError, FieldExpectation, TestBaseline};
pub use schema::validate_baseline_schema;
pub use validators::ValidatorRegistry;
