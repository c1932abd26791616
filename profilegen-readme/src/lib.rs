//! Profilegen Readme - Rendering and writing the profile document
//!
//! Turns an aggregate and user statistics into a markdown profile and writes it to disk.

pub mod badges;
pub mod export;
pub mod renderer;

pub use badges::*;
pub use export::*;
pub use renderer::*;
