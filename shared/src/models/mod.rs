pub mod character;
pub mod dialogue;
pub mod error;
pub mod reference;
pub mod voice;

pub use character::*;
pub use dialogue::*;
pub use error::*;
pub use reference::*;
pub use voice::*;
