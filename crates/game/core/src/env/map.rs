use std::collections::HashSet;

use crate::state::Position;

/// Read-only walkability seam consulted by movement and spawning.
pub trait Terrain {
    /// Out-of-bounds positions must report `false`.
    fn is_walkable(&self, position: Position) -> bool;
}

impl<T: Terrain + ?Sized> Terrain for &T {
    fn is_walkable(&self, position: Position) -> bool {
        (**self).is_walkable(position)
    }
}

/// Obstacle-free rectangle; every in-bounds cell is walkable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenFloor {
    pub width: u32,
    pub height: u32,
}

impl OpenFloor {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Terrain for OpenFloor {
    fn is_walkable(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }
}

/// Terrain with extra blocked cells layered on top, such as bystanders
/// standing on otherwise open floor.
#[derive(Clone, Copy, Debug)]
pub struct Obstructed<'a, T> {
    terrain: T,
    blocked: &'a HashSet<Position>,
}

impl<'a, T: Terrain> Obstructed<'a, T> {
    pub fn new(terrain: T, blocked: &'a HashSet<Position>) -> Self {
        Self { terrain, blocked }
    }
}

impl<T: Terrain> Terrain for Obstructed<'_, T> {
    fn is_walkable(&self, position: Position) -> bool {
        !self.blocked.contains(&position) && self.terrain.is_walkable(position)
    }
}
