//! Distance ranking with angular tie-breaks
//!
//! A [`DistanceComparer`] holds a [`ReferenceFrame`] and orders candidates
//! nearest-first (or farthest-first). Candidates that fail to [`Locate`]
//! always sort last, whatever the direction.
//!
//! # Example
//!
//! ```ignore
//! let comparer = DistanceComparer::planar(
//!     ReferenceFrame::new(agent_position).with_tie_break(TieBreakMode::Narrowest),
//! );
//! targets.sort_by_distance(&comparer);
//! ```

use std::cmp::Ordering;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::angle::{AngleComparator, BearingComparator, TieBreakMode};
use crate::ecs::Transform;
use crate::spatial::{Locate, flatten};

/// Which coordinates distances are measured in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    /// Ground plane only, height ignored
    #[default]
    Planar,
    /// Full 3D distance; tie-breaks still use the ground plane
    Spatial,
}

/// The point everything is ranked around
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceFrame {
    /// Reference position
    pub position: Vec3,
    /// Rank farthest first instead of nearest first
    pub farthest: bool,
    /// Angular ordering for exact distance ties, `None` leaves ties equal
    pub tie_break: Option<TieBreakMode>,
    /// Facing on the ground plane; unset means a zero forward vector
    pub forward: Option<Vec2>,
}

impl ReferenceFrame {
    /// Nearest-first frame around `position` with no tie-break
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            farthest: false,
            tie_break: None,
            forward: None,
        }
    }

    /// Frame at an agent's position, facing where it faces
    #[must_use]
    pub fn from_transform(transform: &Transform) -> Self {
        Self::new(transform.position).with_forward(transform.facing())
    }

    #[must_use]
    pub fn with_farthest(mut self, farthest: bool) -> Self {
        self.farthest = farthest;
        self
    }

    #[must_use]
    pub fn with_tie_break(mut self, mode: TieBreakMode) -> Self {
        self.tie_break = Some(mode);
        self
    }

    #[must_use]
    pub fn with_forward(mut self, forward: Vec2) -> Self {
        self.forward = Some(forward);
        self
    }

    /// Forward vector handed to the angle comparator
    fn forward_or_zero(&self) -> Vec2 {
        self.forward.unwrap_or(Vec2::ZERO)
    }
}

impl Default for ReferenceFrame {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

/// Reusable comparator for sorting candidates around a reference frame
#[derive(Debug, Clone)]
pub struct DistanceComparer<A = BearingComparator> {
    frame: ReferenceFrame,
    granularity: Granularity,
    angle: A,
}

impl DistanceComparer {
    /// Compare on the ground plane
    #[must_use]
    pub fn planar(frame: ReferenceFrame) -> Self {
        Self::new(frame, Granularity::Planar)
    }

    /// Compare full 3D distances
    #[must_use]
    pub fn spatial(frame: ReferenceFrame) -> Self {
        Self::new(frame, Granularity::Spatial)
    }

    #[must_use]
    pub fn new(frame: ReferenceFrame, granularity: Granularity) -> Self {
        Self {
            frame,
            granularity,
            angle: BearingComparator,
        }
    }
}

impl<A: AngleComparator> DistanceComparer<A> {
    /// Swap in a different tie-break strategy
    #[must_use]
    pub fn with_angle_comparator<B: AngleComparator>(self, angle: B) -> DistanceComparer<B> {
        DistanceComparer {
            frame: self.frame,
            granularity: self.granularity,
            angle,
        }
    }

    pub fn frame(&self) -> &ReferenceFrame {
        &self.frame
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Reconfigure in place, e.g. once per agent before sorting its targets
    pub fn set_reference_frame(
        &mut self,
        position: Vec3,
        farthest: bool,
        tie_break: Option<TieBreakMode>,
        forward: Option<Vec2>,
    ) {
        self.frame = ReferenceFrame {
            position,
            farthest,
            tie_break,
            forward,
        };
    }

    /// Distance from the reference to `point` at this comparer's granularity
    pub fn distance_to(&self, point: Vec3) -> f32 {
        match self.granularity {
            Granularity::Planar => flatten(self.frame.position).distance(flatten(point)),
            Granularity::Spatial => self.frame.position.distance(point),
        }
    }

    /// Order two present positions
    pub fn compare_points(&self, a: Vec3, b: Vec3) -> Ordering {
        let mut order = self.distance_to(a).total_cmp(&self.distance_to(b));
        if self.frame.farthest {
            order = order.reverse();
        }

        match (order, self.frame.tie_break) {
            (Ordering::Equal, Some(mode)) => self.angle.compare_angle(
                flatten(self.frame.position),
                self.frame.forward_or_zero(),
                flatten(a),
                flatten(b),
                mode,
            ),
            _ => order,
        }
    }

    /// Order two candidates; absent ones go last
    pub fn compare<L, R>(&self, a: &L, b: &R) -> Ordering
    where
        L: Locate + ?Sized,
        R: Locate + ?Sized,
    {
        match (a.locate(), b.locate()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => self.compare_points(a, b),
        }
    }
}

/// Distance sorting for slices of anything that can be located
pub trait SortByDistance<T> {
    /// Stable sort in comparer order
    fn sort_by_distance<A: AngleComparator>(&mut self, comparer: &DistanceComparer<A>);

    /// First present candidate in comparer order
    fn nearest<A: AngleComparator>(&self, comparer: &DistanceComparer<A>) -> Option<&T>;
}

impl<T: Locate> SortByDistance<T> for [T] {
    fn sort_by_distance<A: AngleComparator>(&mut self, comparer: &DistanceComparer<A>) {
        self.sort_by(|a, b| comparer.compare(a, b));
    }

    fn nearest<A: AngleComparator>(&self, comparer: &DistanceComparer<A>) -> Option<&T> {
        self.iter()
            .filter(|candidate| candidate.locate().is_some())
            .min_by(|a, b| comparer.compare(*a, *b))
    }
}
