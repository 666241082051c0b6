pub mod render;
pub mod orbit;
pub mod scroll;
pub mod starfield;
pub mod scheduler;
