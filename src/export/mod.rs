pub mod sequence;
pub mod transient;
