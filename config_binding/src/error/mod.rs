//! Error types produced while binding and parsing configuration declarations.

mod types;
mod violations;
mod write;

pub use types::{BindingError, BindingResult};
pub use violations::{Violation, Violations};
pub use write::WriteError;

#[cfg(test)]
mod tests;
