pub mod aggregate;
pub mod engine;
pub mod features;
pub mod recommendation;

pub use aggregate::*;
pub use engine::*;
pub use features::*;
pub use recommendation::*;
