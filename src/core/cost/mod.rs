pub mod aws;
pub mod cache;
pub mod names;
pub mod source;
