pub mod accounts;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod schedule;
pub mod session;
pub mod steps;

#[cfg(test)]
mod testing;

pub use accounts::*;
pub use config::*;
pub use error::*;
pub use pipeline::*;
pub use report::*;
pub use schedule::*;
pub use session::*;
pub use steps::*;
