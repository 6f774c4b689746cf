pub mod coordinates;
pub mod keys;
