#![deny(missing_docs)]
//! Spatial helpers every bot needs.
//!
//! All functions are pure and deterministic. Headings are the 8-point
//! [`CompassDirection`] ring; angles are measured so that the vector
//! `(-1, 0)` points north and `(0, 1)` points east.
//!
//! Note the axes. [`GridPosition::x`] is the column index, yet a positive
//! `x` component reads as south here and a positive `y` as east. This is
//! the game server's own convention and bots must share it, so a target
//! two columns to the right of the origin, `(2, 0)`, is due south.

use broadside_proto::{CompassDirection, GameMap, GridPosition};

/// Width of one compass sector in degrees.
const SECTOR_DEGREES: f64 = 360.0 / CompassDirection::COUNT as f64;

/// Vector pointing from `origin` to `target`.
///
/// ```
/// use broadside_geometry::coordinate_difference;
/// use broadside_proto::GridPosition;
///
/// let d = coordinate_difference(GridPosition::new(-3, 4), GridPosition::new(-5, -2));
/// assert_eq!(d, GridPosition::new(-2, -6));
/// ```
pub fn coordinate_difference(origin: GridPosition, target: GridPosition) -> GridPosition {
    target - origin
}

/// Angle of `vector` in degrees, in `[0, 360)`, clockwise from north.
fn vector_angle_degrees(vector: GridPosition) -> f64 {
    let degrees = f64::from(vector.y).atan2(-f64::from(vector.x)).to_degrees();
    if degrees < 0.0 { degrees + 360.0 } else { degrees }
}

/// The compass heading closest to `vector`.
///
/// Each heading owns a 45° sector centred on it, so sector boundaries sit
/// at odd multiples of 22.5°; a vector exactly on a boundary belongs to
/// the sector clockwise of it. North covers `[337.5°, 360°) ∪ [0°, 22.5°)`.
/// The zero vector has no direction and resolves to north.
///
/// `x` is measured along the south axis and `y` along the east axis,
/// although `x` is the column index of a [`GridPosition`].
pub fn approximate_direction(vector: GridPosition) -> CompassDirection {
    if vector.is_zero() {
        return CompassDirection::North;
    }
    let angle = vector_angle_degrees(vector);
    let sector = ((angle + SECTOR_DEGREES / 2.0) / SECTOR_DEGREES).floor() as i32;
    CompassDirection::from_index(sector)
}

/// Heading that points from `origin` toward `target`.
pub fn direction_between(origin: GridPosition, target: GridPosition) -> CompassDirection {
    approximate_direction(coordinate_difference(origin, target))
}

/// Heading reached after one tick of turning from `start` toward `target`
/// with a budget of `turn_rate` eighth-turns.
///
/// The offset is taken on the ring index, `target - start`, in `-7..=7`.
/// Offsets above four are turned counter-clockwise the short way round
/// and clamped to the budget. Every other offset moves `start` by
/// `min(offset, turn_rate)`, so an exact reversal turns clockwise and an
/// offset toward a lower index is applied in full whatever the budget.
///
/// ```
/// use broadside_geometry::partial_turn;
/// use broadside_proto::CompassDirection::*;
///
/// assert_eq!(partial_turn(North, SouthEast, 2), East);
/// assert_eq!(partial_turn(NorthEast, SouthWest, 2), SouthEast);
/// assert_eq!(partial_turn(NorthEast, West, 1), North);
/// assert_eq!(partial_turn(East, North, 1), North);
/// ```
pub fn partial_turn(
    start: CompassDirection,
    target: CompassDirection,
    turn_rate: u32,
) -> CompassDirection {
    let delta = i32::from(target.index()) - i32::from(start.index());
    let rate = i32::try_from(turn_rate).unwrap_or(i32::MAX);
    let half_turn = i32::from(CompassDirection::COUNT / 2);
    let steps = if delta > half_turn {
        (delta - i32::from(CompassDirection::COUNT)).max(-rate)
    } else {
        delta.min(rate)
    };
    start.rotated(steps)
}

/// Position of the ship or projectile with id `entity_id`.
///
/// Scans row by row and returns the first authoritative cell carrying the
/// id. Hitbox cells that reference the entity are skipped.
pub fn entity_coordinates(entity_id: &str, game_map: &GameMap) -> Option<GridPosition> {
    game_map
        .cells()
        .find(|(_, cell)| cell.entity_id() == Some(entity_id))
        .map(|(position, _)| position)
}
