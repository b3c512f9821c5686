//! Tile solidity grid and the collision query gremlins steer and move against.
//!
//! Maps are parsed from ASCII: `#` is solid, `.` and space are floor.
//! Tile (0,0) sits at the grid origin; X grows right and Y grows down.

use bevy::prelude::*;

/// Size of a single tile in world units.
pub const TILE_SIZE: f32 = 8.0;

/// Black-box solidity predicate over world-space rectangles.
pub trait TileMap {
    /// True if any solid tile overlaps `area`.
    fn is_blocked(&self, area: Rect) -> bool;

    /// Point query, treated as a 1x1 rectangle at `point`.
    fn is_point_blocked(&self, point: Vec2) -> bool {
        self.is_blocked(Rect::from_corners(point, point + Vec2::ONE))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Floor,
    Solid,
}

impl Tile {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Tile::Solid),
            '.' | ' ' => Some(Tile::Floor),
            _ => None,
        }
    }
}

/// Parsed solidity grid. Out-of-bounds tiles count as solid.
#[derive(Resource, Debug, Clone)]
pub struct TileGrid {
    pub width: usize,
    pub height: usize,
    pub tile_size: f32,
    pub origin: Vec2,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Parse an ASCII map into a grid with `TILE_SIZE` tiles at the world origin.
    pub fn parse(text: &str) -> Result<Self, String> {
        let lines: Vec<&str> = text.lines().collect();
        if lines.is_empty() {
            return Err("Empty map".to_string());
        }

        let height = lines.len();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        if width == 0 {
            return Err("Map has zero width".to_string());
        }

        let mut tiles = Vec::with_capacity(width * height);
        for (y, line) in lines.iter().enumerate() {
            let mut row_len = 0;
            for (x, ch) in line.chars().enumerate() {
                let tile = Tile::from_char(ch).ok_or_else(|| {
                    format!("Unknown tile character '{}' at ({}, {})", ch, x, y)
                })?;
                tiles.push(tile);
                row_len += 1;
            }
            // Pad short rows with floor
            tiles.extend(std::iter::repeat_n(Tile::Floor, width - row_len));
        }

        Ok(TileGrid {
            width,
            height,
            tile_size: TILE_SIZE,
            origin: Vec2::ZERO,
            tiles,
        })
    }

    /// An all-floor grid.
    pub fn open(width: usize, height: usize) -> Self {
        TileGrid {
            width,
            height,
            tile_size: TILE_SIZE,
            origin: Vec2::ZERO,
            tiles: vec![Tile::Floor; width * height],
        }
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    /// Get the tile at grid coordinates, or None if out of bounds.
    pub fn tile_at(&self, x: i32, y: i32) -> Option<Tile> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        self.tiles.get(y as usize * self.width + x as usize).copied()
    }

    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.tile_at(x, y).is_none_or(|t| t == Tile::Solid)
    }

    pub fn set(&mut self, x: usize, y: usize, tile: Tile) {
        if x < self.width && y < self.height {
            self.tiles[y * self.width + x] = tile;
        }
    }

    /// World-space rectangle covered by the whole grid.
    pub fn world_bounds(&self) -> Rect {
        let size = Vec2::new(self.width as f32, self.height as f32) * self.tile_size;
        Rect::from_corners(self.origin, self.origin + size)
    }
}

impl TileMap for TileGrid {
    fn is_blocked(&self, area: Rect) -> bool {
        let min = (area.min - self.origin) / self.tile_size;
        let max = (area.max - self.origin) / self.tile_size;
        let x0 = min.x.floor() as i32;
        let y0 = min.y.floor() as i32;
        // Edges that only touch the next tile don't count as overlap
        let x1 = (max.x.ceil() as i32 - 1).max(x0);
        let y1 = (max.y.ceil() as i32 - 1).max(y0);

        (y0..=y1).any(|y| (x0..=x1).any(|x| self.is_solid(x, y)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
