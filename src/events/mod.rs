pub mod pointer;
pub mod region;

pub use pointer::PointerSample;
pub use region::{Region, NUM_REGIONS};
