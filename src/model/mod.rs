pub use clip::*;
pub use error::*;
pub use reel::*;
pub use standard::*;
pub use timecode::*;

mod clip;
mod error;
mod reel;
mod standard;
mod timecode;
