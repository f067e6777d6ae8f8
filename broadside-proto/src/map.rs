//! The per-tick view of the arena: positions, cells and the grid itself.

use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::direction::CompassDirection;
use crate::error::DecodeError;
use crate::event::Empty;

/// A grid coordinate. Origin is the top-left cell, `x` grows rightward
/// (column index) and `y` grows downward (row index).
///
/// Also used as a displacement vector between two positions. As a
/// vector it follows the game server's compass convention, which does
/// not match the column/row layout: a positive `x` points south and a
/// positive `y` points east. `(2, 0)` is two columns to the right of the
/// origin on the map, yet its bearing from the origin is south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPosition {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl GridPosition {
    /// The top-left cell, and the zero vector.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create a position from column and row.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether this is the zero vector.
    pub fn is_zero(self) -> bool {
        self == Self::ORIGIN
    }
}

impl Add for GridPosition {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for GridPosition {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for GridPosition {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for GridPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Payload of a hitbox cell: the entity whose collision area covers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitBoxData {
    /// Id of the ship or projectile owning this hitbox.
    pub entity_id: String,
}

/// Payload of a ship's authoritative cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipData {
    /// Entity id, unique within a map.
    pub id: String,
    /// Where the server places the ship.
    pub position: GridPosition,
    /// Remaining hit points. May be fractional, and goes negative once
    /// the ship is destroyed.
    pub health: f64,
    /// Accumulated weapon heat.
    pub heat: f64,
    /// Current heading.
    pub direction: CompassDirection,
}

/// Payload of a projectile's authoritative cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileData {
    /// Entity id, unique within a map.
    pub id: String,
    /// Where the server places the projectile.
    pub position: GridPosition,
    /// Direction of travel.
    pub direction: CompassDirection,
    /// Cells travelled per tick.
    pub velocity: f64,
    /// Projectile mass.
    pub mass: f64,
}

/// Content of one grid square.
///
/// Serialized as `{ "type": "<camelCase variant>", "data": {...} }`, with
/// `data` being `{}` for the three payload-free cell kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum GameMapCell {
    /// Visible and unoccupied.
    Empty(Empty),
    /// Outside the bot's vision radius.
    OutOfVision(Empty),
    /// Something audible but unseen.
    AudioSignature(Empty),
    /// Collision area of an entity, not its authoritative position.
    HitBox(HitBoxData),
    /// A ship's authoritative cell.
    Ship(ShipData),
    /// A projectile's authoritative cell.
    Projectile(ProjectileData),
}

impl GameMapCell {
    /// An empty cell.
    pub fn empty() -> Self {
        GameMapCell::Empty(Empty {})
    }

    /// Id of the entity whose authoritative cell this is.
    ///
    /// Only ship and projectile cells carry one; hitbox cells return
    /// `None` even though they reference an entity.
    pub fn entity_id(&self) -> Option<&str> {
        match self {
            GameMapCell::Ship(ship) => Some(&ship.id),
            GameMapCell::Projectile(projectile) => Some(&projectile.id),
            GameMapCell::Empty(_)
            | GameMapCell::OutOfVision(_)
            | GameMapCell::AudioSignature(_)
            | GameMapCell::HitBox(_) => None,
        }
    }

    /// Id of any entity this cell belongs to, hitboxes included.
    pub fn referenced_entity_id(&self) -> Option<&str> {
        match self {
            GameMapCell::HitBox(hit_box) => Some(&hit_box.entity_id),
            other => other.entity_id(),
        }
    }
}

/// A rectangular grid of cells, indexed `[y][x]`.
///
/// Construction and deserialization both reject ragged rows, so every
/// row of a `GameMap` has the same length.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<GameMapCell>>", into = "Vec<Vec<GameMapCell>>")]
pub struct GameMap {
    rows: Vec<Vec<GameMapCell>>,
}

impl GameMap {
    /// Build a map from rows, checking that all rows are equally long.
    pub fn new(rows: Vec<Vec<GameMapCell>>) -> Result<Self, DecodeError> {
        if let Some(first) = rows.first() {
            let width = first.len();
            if let Some((row, bad)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
                return Err(DecodeError::RaggedMap {
                    row,
                    expected: width,
                    actual: bad.len(),
                });
            }
        }
        Ok(Self { rows })
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (zero for an empty map).
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// The rows, top to bottom.
    pub fn rows(&self) -> &[Vec<GameMapCell>] {
        &self.rows
    }

    /// The cell at `position`, or `None` when it lies outside the grid.
    pub fn get(&self, position: GridPosition) -> Option<&GameMapCell> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        self.rows.get(y)?.get(x)
    }

    /// Every cell with its position, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (GridPosition, &GameMapCell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, cell)| (GridPosition::new(x as i32, y as i32), cell))
        })
    }
}

impl TryFrom<Vec<Vec<GameMapCell>>> for GameMap {
    type Error = DecodeError;

    fn try_from(rows: Vec<Vec<GameMapCell>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<GameMap> for Vec<Vec<GameMapCell>> {
    fn from(map: GameMap) -> Self {
        map.rows
    }
}
