//! Play field simulation
//!
//! Gameplay logic with no rendering or platform dependencies:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Blocks are checked in grid order

pub mod collision;
pub mod explosion;
pub mod field;
pub mod geometry;
pub mod state;
pub mod vectors;

pub use collision::{Contact, circle_contact_point, circle_in_rect};
pub use explosion::{Explosion, Spark};
pub use field::{Bounce, FieldOptions, PlayField};
pub use geometry::{Circle, Rect, ScreenSize};
pub use state::{Ball, Block, Paddle};
pub use vectors::VectorError;
