//! Headless demo: a chaser ranks fleeing runners and pursues the nearest one it can see

use std::time::Duration;

use agent_toolkit::prelude::*;
use hecs::Entity;
use rustc_hash::FxHashMap;

/// Marks the pursuing agent
struct Chaser;

/// Runner moving on a circle around `center`
struct Orbit {
    center: Vec3,
    radius: f32,
    angular_speed: f32,
}

const FRAME: Duration = Duration::from_millis(33);
const FRAMES: u32 = 150;

struct Demo {
    config: ToolkitConfig,
    world: World,
    physics: Physics,
    time: Time,
    chaser: Entity,
    chaser_body: RigidBodyHandle,
    /// Runner positions from the previous frame
    previous: FxHashMap<Entity, Vec3>,
    pursuer: Pursuer,
}

impl Demo {
    fn new(config: ToolkitConfig) -> Self {
        let mut world = World::new();
        let mut physics = Physics::with_gravity(Vec3::ZERO);

        // A pillar in the middle of the arena
        let pillar = physics.create_static_body(Vec3::new(0.0, 1.0, 0.0));
        physics.add_box_collider(pillar, Vec3::new(1.0, 3.0, 1.0));

        let start = Vec3::new(-12.0, 0.0, 0.0);
        let chaser = world.spawn((
            Name::new("chaser"),
            Chaser,
            Transform::from_position(start),
            Velocity::default(),
        ));
        let chaser_body = physics.create_kinematic_body(start);
        physics.add_sphere_collider(chaser_body, 0.5);

        let orbits = [
            ("runner-a", Vec3::new(6.0, 0.0, 0.0), 4.0, 0.6),
            ("runner-b", Vec3::new(-4.0, 0.0, 8.0), 3.0, -0.9),
            ("runner-c", Vec3::new(2.0, 0.0, -9.0), 5.0, 0.4),
        ];
        for (name, center, radius, angular_speed) in orbits {
            world.spawn((
                Name::new(name),
                Transform::from_position(center + Vec3::new(radius, 0.0, 0.0)),
                Orbit {
                    center,
                    radius,
                    angular_speed,
                },
            ));
        }

        physics.step(FRAME.as_secs_f32());

        Self {
            config,
            world,
            physics,
            time: Time::new(),
            chaser,
            chaser_body,
            previous: FxHashMap::default(),
            pursuer: Pursuer::new(),
        }
    }

    fn move_runners(&mut self) {
        let t = self.time.elapsed_seconds();
        for (_, (transform, orbit)) in self.world.query_mut::<(&mut Transform, &Orbit)>() {
            let angle = orbit.angular_speed * t;
            let target =
                orbit.center + Vec3::new(angle.cos(), 0.0, angle.sin()) * orbit.radius;
            transform.face_towards(target);
            transform.position = target;
        }
    }

    /// Nearest runner in sight, ranked around the chaser's current facing
    fn pick_target(&self) -> Option<Entity> {
        let chaser = *self.world.get::<Transform>(self.chaser).ok()?;
        let mut comparer = self.config.ranking.comparer(chaser.position);
        let frame = *comparer.frame();
        comparer.set_reference_frame(
            frame.position,
            frame.farthest,
            frame.tie_break,
            frame.forward.or(Some(chaser.facing())),
        );

        let mut runners: Vec<Entity> = self
            .world
            .query::<&Orbit>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();
        runners.sort_by(|a, b| comparer.compare(&self.world.entity(*a), &self.world.entity(*b)));

        runners.into_iter().find(|runner| {
            self.world.position(*runner).is_some_and(|position| {
                self.config.sight.can_see(
                    &self.physics,
                    chaser.position,
                    position,
                    Some(self.chaser_body),
                )
            })
        })
    }

    fn update(&mut self) {
        self.time.advance(FRAME);
        let dt = self.time.delta_seconds();

        let before: Vec<(Entity, Vec3)> = self
            .world
            .query::<(&Transform, &Orbit)>()
            .iter()
            .map(|(entity, (transform, _))| (entity, transform.position))
            .collect();
        self.move_runners();

        let Some(target) = self.pick_target() else {
            log::debug!("Frame {}: no runner in sight", self.time.frame_count());
            self.record_previous(before);
            return;
        };

        let Some(chaser_position) = self.world.position(self.chaser) else {
            return;
        };
        let previous = self
            .previous
            .get(&target)
            .copied()
            .or_else(|| before.iter().find(|(e, _)| *e == target).map(|(_, p)| *p));

        if let Some(previous) = previous {
            let pursuit = self.pursuer.pursue_target(
                chaser_position,
                &self.world.entity(target),
                previous,
                self.config.pursuit.max_speed,
                dt,
            );
            match pursuit {
                Ok(Some(pursuit)) => self.steer(target, pursuit, dt),
                Ok(None) => log::debug!("Target {target:?} vanished"),
                Err(e) => log::warn!("Pursuit failed: {e}"),
            }
        }

        self.record_previous(before);
    }

    fn steer(&mut self, target: Entity, pursuit: Pursuit, dt: f32) {
        let linear = expand(pursuit.steering, 0.0);
        if let Ok(mut transform) = self.world.get_mut::<Transform>(self.chaser) {
            transform.translate(linear * dt);
            transform.face_towards(expand(pursuit.predicted_position, 0.0));
            self.physics
                .set_kinematic_position(self.chaser_body, transform.position);
        }
        if let Ok(mut velocity) = self.world.get_mut::<Velocity>(self.chaser) {
            velocity.linear = linear;
        }
        self.physics.step(dt);

        if self.time.frame_count() % 15 == 0 {
            let name = self
                .world
                .get::<Name>(target)
                .map(|n| n.0.clone())
                .unwrap_or_default();
            log::info!(
                "Frame {}: chasing {} -> predicted {} in {:.2}s",
                self.time.frame_count(),
                name,
                pursuit.predicted_position,
                pursuit.closing_time
            );
        }
    }

    fn record_previous(&mut self, before: Vec<(Entity, Vec3)>) {
        // Samples are one frame old once the runners have moved
        for (entity, _) in before {
            if let Some(position) = self.world.position(entity) {
                self.previous.insert(entity, position);
            }
        }
    }
}

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match ToolkitConfig::load_ron(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Config error: {}", e);
                return;
            }
        },
        None => ToolkitConfig::default(),
    };

    let mut demo = Demo::new(config);
    for _ in 0..FRAMES {
        demo.update();
    }

    if let Some(position) = demo.world.position(demo.chaser) {
        log::info!("Chaser finished at {}", position);
    }
}
