
pub mod chunk;
pub mod generator;
pub mod noise_field;

pub use chunk::{Chunk, PositionCache};
pub use generator::WorldGen;
pub use noise_field::NoiseField;
