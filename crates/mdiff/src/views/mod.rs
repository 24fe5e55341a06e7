//! View rendering modules

mod split;
mod text;


pub use split::render_split;
pub use text::fit_width;
