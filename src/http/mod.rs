//! Request admission and execution.
mod execution;
mod rate;
mod sender;


pub use execution::{HttpExecutor, REQUEST_ERROR_CATEGORY, RequestExecutor, TIMEOUT_CATEGORY};
pub use rate::AdmissionController;
pub use sender::{AUTHENTICATION_HEADER, build_executor};
