pub mod barrier;
pub mod loaded;
pub mod manifest;
