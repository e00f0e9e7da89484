//! Domain models for the ahara system.

mod assessment;
mod dosha;
mod food;
mod plan;
mod question;

pub use assessment::*;
pub use dosha::*;
pub use food::*;
pub use plan::*;
pub use question::*;
