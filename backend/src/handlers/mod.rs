pub mod characters;
pub mod dialogues;
pub mod references;
pub mod voice;

pub use characters::*;
pub use dialogues::*;
pub use references::*;
pub use voice::*;
