pub mod board;
pub mod icons;

pub use board::render_board;
