//! Ports (trait boundaries) for external dependencies.
//!
//! This module defines the interfaces between the domain layer and infrastructure.
//! Following hexagonal architecture, these traits are owned by the domain and
//! implemented by adapters in the infrastructure layer.

pub mod observer;
pub mod player;
pub mod repository;

pub use observer::Observer;
pub use player::Player;
pub use repository::TreeRepository;
