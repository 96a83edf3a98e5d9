//! Product operations and the shared persist step for writes.

mod persist;
mod products;
mod validation;
pub use persist::Persist;
pub use products::ProductService;
pub use validation::RequestValidator;
