pub mod board_io;
pub mod config_io;
pub mod logging;
pub mod state;
pub mod watcher;
