//! AI module
//!
//! Distance ranking with angular tie-breaks, steering, and pursuit prediction.

mod angle;
mod pursuit;
mod ranking;
mod steering;

pub use angle::{AngleComparator, BearingComparator, TieBreakMode, bearing};
pub use pursuit::{Pursuer, Pursuit, PursuitError, estimate_velocity, predict_position, pursue};
pub use ranking::{DistanceComparer, Granularity, ReferenceFrame, SortByDistance};
pub use steering::{Seek, Seeker};
