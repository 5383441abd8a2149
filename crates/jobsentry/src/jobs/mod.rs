pub mod error;
pub mod lifecycle;
pub mod model;

pub use error::JobError;
pub use lifecycle::{BoxFuture, JobPlugin, Lifecycle, Next};
pub use model::{Job, Payload};
