//! Infrastructure layer: concrete registry, transport adapters, and wire DTOs.

pub mod dto;
pub mod registry;
pub mod transport;

#[cfg(test)]
pub mod testing;
