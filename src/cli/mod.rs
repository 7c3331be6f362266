pub mod decrypt;
pub mod encrypt;
pub mod keygen;
pub mod render;
pub mod stencil;

pub use decrypt::*;
pub use encrypt::*;
pub use keygen::*;
pub use stencil::*;
