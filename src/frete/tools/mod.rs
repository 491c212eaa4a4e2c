pub mod consolidate;
pub mod dedupe;
pub mod derive;
pub mod error;
pub mod io;
pub mod mapping;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod verify;

pub use error::{Result, ToolError};
