//! Request extractors.

mod fail;
pub use fail::{FailFlag, FAIL_HEADER};
