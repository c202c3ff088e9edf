pub mod cooldown;
pub mod entries;
pub mod error;
#[cfg(test)]
pub mod harness;
pub mod manager;
pub mod render;
pub mod scheduler;
pub mod validation;
pub mod winners;
