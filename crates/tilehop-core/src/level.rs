use serde::{Deserialize, Serialize};

use crate::config::{GridCell, WorldConfig};
use crate::geometry::Aabb;

/// A static square obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Left edge in world units.
    pub x: f32,
    /// Top edge in world units.
    pub y: f32,
    /// Edge length.
    pub size: f32,
}

impl Tile {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.size, self.size)
    }
}

/// Static terrain plus world bounds. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    tiles: Vec<Tile>,
    /// Y coordinate of the ground line.
    pub ground_y: f32,
    /// X coordinate of the right edge (the goal).
    pub world_width: f32,
    pub view_height: f32,
}

impl Level {
    /// Build the tile list in configuration order: grid cells first, then
    /// pixel-positioned tiles.
    pub fn from_config(world: &WorldConfig) -> Self {
        let tiles = world
            .cells
            .iter()
            .map(|&cell| cell_to_tile(cell, world.tile_size, world.view_height))
            .chain(world.tiles.iter().map(|t| Tile {
                x: t.0,
                y: t.1,
                size: world.tile_size,
            }))
            .collect();
        Self {
            tiles,
            ground_y: world.ground_y,
            world_width: world.world_width,
            view_height: world.view_height,
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

/// Place a grid cell: rows count upward from the bottom of the view.
pub fn cell_to_tile(cell: GridCell, tile_size: f32, view_height: f32) -> Tile {
    let GridCell(col, row) = cell;
    Tile {
        x: col as f32 * tile_size,
        y: view_height - (row as f32 + 1.0) * tile_size,
        size: tile_size,
    }
}
