pub mod chain;
pub mod cli;
pub mod driver;
mod run;
pub mod traits;

pub use run::{run, start};
