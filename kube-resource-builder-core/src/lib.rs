pub mod helpers;
pub mod kubernetes;
pub mod models;
pub mod resources;

#[cfg(test)]
mod testing;
