pub mod plant;
pub mod weather;

pub use plant::*;
pub use weather::*;
