pub mod grid;
pub mod window;
