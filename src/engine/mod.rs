pub mod decrypt;
pub mod encrypt;
pub mod text;

pub use decrypt::*;
pub use encrypt::*;
pub use text::*;
