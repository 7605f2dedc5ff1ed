pub mod assemble;
pub mod canvas;
pub mod data_uri;
pub mod inspect;
pub mod model;
