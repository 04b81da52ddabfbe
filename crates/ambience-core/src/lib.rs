pub mod config;
pub mod error;
pub mod mixer;
pub mod visual;

pub use config::*;
pub use error::*;
pub use mixer::*;
pub use visual::*;
