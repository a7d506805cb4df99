mod error;
mod submission;

pub use error::*;
pub use submission::*;
