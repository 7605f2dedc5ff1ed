pub mod clean;
pub mod dimensions;
pub mod ids;
pub mod optimize;
