//! Identity and coordinate primitives shared by every subsystem.
mod common;

pub use common::{Direction, EntityId, Position};
