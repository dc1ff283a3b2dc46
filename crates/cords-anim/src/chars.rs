//! Character constants for the cord field and indicators.

/// Leading cell of a cord.
pub const CORD_HEAD: char = '┃';

/// Body cells of a cord.
pub const CORD_BODY: char = '│';

/// Grid crossing, vertical and horizontal line cells.
pub const GRID_CROSS: char = '┼';
pub const GRID_VERTICAL: char = '│';
pub const GRID_HORIZONTAL: char = '─';

/// Heavy and light progress marks.
pub const MARK_HEAVY: char = '┃';
pub const MARK_LIGHT: char = '│';
