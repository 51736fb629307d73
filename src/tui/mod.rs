pub mod app;
pub mod input;
pub mod popup;
pub mod render;
pub mod select_surface;
pub mod theme;

pub use app::run;
