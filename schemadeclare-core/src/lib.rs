// Core library for schemadeclare
// Dependency injection plumbing shared by generated field resolvers

pub mod container;
pub mod error;
pub mod instance;
pub mod logging;
pub mod traits;

// Re-export commonly used types
pub use container::*;
pub use error::*;
pub use instance::*;
pub use traits::*;
