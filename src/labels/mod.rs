pub mod jump;
pub mod registry;

pub use jump::*;
pub use registry::*;
