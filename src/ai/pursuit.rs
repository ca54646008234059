//! Pursuit: steer towards where a moving target is going to be
//!
//! The target's velocity is estimated from two samples, then projected
//! forward by a single closing-time estimate:
//!
//! ```text
//! velocity     = (current - previous) / elapsed
//! closing_time = distance(current, position) / (max_speed + |velocity|)
//! predicted    = current + velocity * closing_time
//! ```
//!
//! Everything runs on the ground plane; 3D inputs are flattened first.

use glam::{Vec2, Vec3};

use super::steering::{Seek, Seeker};
use crate::core::Time;
use crate::spatial::{Locate, Planar, flatten};

/// Result of a pursuit prediction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pursuit {
    /// Velocity request towards the predicted position
    pub steering: Vec2,
    /// Where the target is expected to be
    pub predicted_position: Vec2,
    /// Estimated target velocity
    pub target_velocity: Vec2,
    /// Estimated time until the pursuer closes in
    pub closing_time: f32,
}

/// Errors that can occur while predicting a pursuit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PursuitError {
    /// Elapsed time between target samples was zero, negative or not finite
    InvalidElapsed(f32),
}

impl std::fmt::Display for PursuitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidElapsed(dt) => {
                write!(f, "Invalid elapsed time between samples: {dt}")
            }
        }
    }
}

impl std::error::Error for PursuitError {}

/// Target velocity from two position samples `elapsed` seconds apart
///
/// # Errors
///
/// Returns [`PursuitError::InvalidElapsed`] unless `elapsed` is finite and positive
pub fn estimate_velocity(current: Vec2, previous: Vec2, elapsed: f32) -> Result<Vec2, PursuitError> {
    if !elapsed.is_finite() || elapsed <= 0.0 {
        return Err(PursuitError::InvalidElapsed(elapsed));
    }
    Ok((current - previous) / elapsed)
}

/// Predicted target position and closing time
///
/// When neither side can move the closing time is zero and the target is
/// predicted to stay where it is.
#[must_use]
pub fn predict_position(
    position: Vec2,
    target_current: Vec2,
    target_velocity: Vec2,
    max_speed: f32,
) -> (Vec2, f32) {
    let combined_speed = max_speed + target_velocity.length();
    if combined_speed <= 0.0 {
        log::trace!("Pursuit with no closing speed, holding target at {target_current}");
        return (target_current, 0.0);
    }

    let closing_time = target_current.distance(position) / combined_speed;
    (target_current + target_velocity * closing_time, closing_time)
}

/// Pursuit predictor with a pluggable seek behavior
#[derive(Debug, Clone, Default)]
pub struct Pursuer<S = Seek> {
    seeker: S,
}

impl Pursuer {
    /// Pursuer using plain [`Seek`]
    #[must_use]
    pub fn new() -> Self {
        Self { seeker: Seek }
    }
}

impl<S: Seeker> Pursuer<S> {
    /// Pursuer steering with a custom seek behavior
    #[must_use]
    pub fn with_seeker(seeker: S) -> Self {
        Self { seeker }
    }

    /// Predict where the target is heading and steer towards it
    ///
    /// # Errors
    ///
    /// Returns [`PursuitError::InvalidElapsed`] unless `elapsed` is finite and positive
    pub fn pursue<P: Planar>(
        &self,
        position: P,
        target_current: P,
        target_previous: P,
        max_speed: f32,
        elapsed: f32,
    ) -> Result<Pursuit, PursuitError> {
        let position = position.planar();
        let target_current = target_current.planar();

        let target_velocity = estimate_velocity(target_current, target_previous.planar(), elapsed)?;
        let (predicted_position, closing_time) =
            predict_position(position, target_current, target_velocity, max_speed);
        let steering = self.seeker.seek(position, predicted_position, max_speed);

        Ok(Pursuit {
            steering,
            predicted_position,
            target_velocity,
            closing_time,
        })
    }

    /// Pursue whatever `target` currently locates to
    ///
    /// Returns `Ok(None)` when the target is absent.
    ///
    /// # Errors
    ///
    /// Returns [`PursuitError::InvalidElapsed`] unless `elapsed` is finite and positive
    pub fn pursue_target<L: Locate + ?Sized>(
        &self,
        position: Vec3,
        target: &L,
        target_previous: Vec3,
        max_speed: f32,
        elapsed: f32,
    ) -> Result<Option<Pursuit>, PursuitError> {
        let Some(target_current) = target.locate() else {
            return Ok(None);
        };
        self.pursue(
            flatten(position),
            flatten(target_current),
            flatten(target_previous),
            max_speed,
            elapsed,
        )
        .map(Some)
    }

    /// [`Pursuer::pursue`] with the samples one frame apart
    ///
    /// # Errors
    ///
    /// Returns [`PursuitError::InvalidElapsed`] on the very first frame, before
    /// any time has passed
    pub fn pursue_this_frame<P: Planar>(
        &self,
        time: &Time,
        position: P,
        target_current: P,
        target_previous: P,
        max_speed: f32,
    ) -> Result<Pursuit, PursuitError> {
        self.pursue(
            position,
            target_current,
            target_previous,
            max_speed,
            time.delta_seconds(),
        )
    }
}

/// Predict and steer using plain [`Seek`]
///
/// # Errors
///
/// Returns [`PursuitError::InvalidElapsed`] unless `elapsed` is finite and positive
pub fn pursue<P: Planar>(
    position: P,
    target_current: P,
    target_previous: P,
    max_speed: f32,
    elapsed: f32,
) -> Result<Pursuit, PursuitError> {
    Pursuer::new().pursue(position, target_current, target_previous, max_speed, elapsed)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_intercept_moving_target() {
        let result = pursue(
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            Vec2::new(9.0, 0.0),
            1.0,
            1.0,
        )
        .unwrap();

        assert!(close(result.target_velocity, Vec2::new(1.0, 0.0)));
        assert!((result.closing_time - 5.0).abs() < 1e-5);
        assert!(close(result.predicted_position, Vec2::new(15.0, 0.0)));
        assert!(result.steering.x > 0.0);
        assert!(result.steering.y.abs() < 1e-6);
        assert!(result.steering.length() <= 1.0 + 1e-6);
    }

    #[test]
    fn test_stationary_target() {
        let target = Vec2::new(-3.0, 4.0);
        for elapsed in [0.016, 1.0, 30.0] {
            let result = pursue(Vec2::ZERO, target, target, 2.0, elapsed).unwrap();
            assert_eq!(result.target_velocity, Vec2::ZERO);
            assert_eq!(result.predicted_position, target);
        }
    }

    #[test]
    fn test_rejects_bad_elapsed() {
        for elapsed in [0.0, -0.5, f32::NAN, f32::INFINITY] {
            let result = pursue(Vec2::ZERO, Vec2::X, Vec2::ZERO, 1.0, elapsed);
            assert!(matches!(result, Err(PursuitError::InvalidElapsed(_))));
        }
    }

    #[test]
    fn test_no_closing_speed() {
        let target = Vec2::new(5.0, 5.0);
        let result = pursue(Vec2::ZERO, target, target, 0.0, 1.0).unwrap();

        assert_eq!(result.closing_time, 0.0);
        assert_eq!(result.predicted_position, target);
        assert_eq!(result.steering, Vec2::ZERO);
        assert!(result.predicted_position.is_finite());
    }

    #[test]
    fn test_spatial_inputs_are_flattened() {
        let flat = pursue(
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            Vec2::new(9.0, 0.0),
            1.0,
            1.0,
        )
        .unwrap();
        let spatial = pursue(
            Vec3::new(0.0, 3.0, 0.0),
            Vec3::new(10.0, -2.0, 0.0),
            Vec3::new(9.0, 40.0, 0.0),
            1.0,
            1.0,
        )
        .unwrap();

        assert_eq!(flat, spatial);
    }

    #[test]
    fn test_custom_seeker() {
        let pursuer = Pursuer::with_seeker(|_: Vec2, target: Vec2, _: f32| target);
        let result = pursuer
            .pursue(Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(9.0, 0.0), 1.0, 1.0)
            .unwrap();

        assert_eq!(result.steering, result.predicted_position);
    }

    #[test]
    fn test_pursue_absent_target() {
        let pursuer = Pursuer::new();
        let gone: Option<Vec3> = None;

        let result = pursuer.pursue_target(Vec3::ZERO, &gone, Vec3::ZERO, 1.0, 1.0);
        assert_eq!(result, Ok(None));

        let here = Some(Vec3::new(4.0, 0.0, 0.0));
        let result = pursuer
            .pursue_target(Vec3::ZERO, &here, Vec3::new(4.0, 0.0, 0.0), 1.0, 1.0)
            .unwrap()
            .unwrap();
        assert_eq!(result.predicted_position, Vec2::new(4.0, 0.0));
    }

    #[test]
    fn test_pursue_this_frame() {
        let pursuer = Pursuer::new();
        let mut time = Time::new();

        let first = pursuer.pursue_this_frame(&time, Vec2::ZERO, Vec2::X, Vec2::ZERO, 1.0);
        assert!(first.is_err());

        time.advance(Duration::from_millis(500));
        let result = pursuer
            .pursue_this_frame(&time, Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(9.0, 0.0), 1.0)
            .unwrap();
        assert!(close(result.target_velocity, Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn test_error_display() {
        let error = PursuitError::InvalidElapsed(0.0);
        assert_eq!(error.to_string(), "Invalid elapsed time between samples: 0");
    }
}
