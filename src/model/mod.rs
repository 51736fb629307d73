pub mod board;
pub mod config;
pub mod todo;
pub mod workspace;

pub use board::*;
pub use config::*;
pub use todo::*;
pub use workspace::*;
