pub mod container;
pub mod env;
pub mod job;
pub mod pod;
pub mod quantity;
pub mod volumes;
