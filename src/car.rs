// src/car.rs
//
// Arcade car model driven by the pipeline's ControlState. Explicit
// state struct owned by the caller; timings are tick-accumulated so the
// model is deterministic under replay.

use crate::types::{CarConfig, ControlState};

pub struct Car {
    config: CarConfig,
    pub x: f32,
    pub y: f32,
    /// Current speed in game units, 0..=max_speed
    pub speed: f32,
    /// Smoothed steering response, -1..=1
    pub direction: f32,
    boosting: bool,
    braking: bool,
    /// A finished boost does not re-trigger until the request drops
    boost_armed: bool,
    boost_elapsed: f32,
    brake_elapsed: f32,
    brake_entry_speed: f32,
    /// Total forward distance covered, for the session report
    pub distance: f32,
}

impl Car {
    pub fn new(config: CarConfig, x: f32, y: f32) -> Self {
        Self {
            config,
            x,
            y,
            speed: 0.0,
            direction: 0.0,
            boosting: false,
            braking: false,
            boost_armed: true,
            boost_elapsed: 0.0,
            brake_elapsed: 0.0,
            brake_entry_speed: 0.0,
            distance: 0.0,
        }
    }

    /// Advance the car by one tick of `dt` seconds.
    pub fn update(&mut self, control: &ControlState, dt: f32) {
        // Boost pins the speed at max for a fixed window; braking wins
        // over a boost request, an active boost wins over a brake request.
        if control.boost && !self.braking {
            if !self.boosting && self.boost_armed {
                self.boosting = true;
                self.boost_armed = false;
                self.boost_elapsed = 0.0;
            }
            if self.boosting {
                self.boost_elapsed += dt;
                if self.boost_elapsed < self.config.boost_duration_s {
                    self.speed = self.config.max_speed;
                } else {
                    self.boosting = false;
                }
            }
        } else {
            self.boosting = false;
            self.boost_armed = true;
        }

        if control.braking && !self.boosting {
            if !self.braking {
                self.braking = true;
                self.brake_elapsed = 0.0;
                self.brake_entry_speed = self.speed;
            }
            self.brake_elapsed += dt;
            if self.brake_elapsed >= self.config.brake_duration_s {
                self.speed = 0.0;
                self.braking = false;
            } else {
                // Linear ramp from the speed at brake entry down to zero
                let factor = self.brake_elapsed / self.config.brake_duration_s;
                self.speed = self.brake_entry_speed * (1.0 - factor);
            }
        } else if !control.braking {
            self.braking = false;
        }

        if !self.boosting && !self.braking && !control.braking {
            let target = control.throttle * self.config.max_speed;
            if target > self.speed {
                self.speed = (self.speed + self.config.acceleration * dt).min(target);
            } else {
                self.speed = (self.speed - self.config.deceleration * dt).max(target);
            }
            self.speed = self.speed.clamp(0.0, self.config.max_speed);
        }

        // Steering response is rate-limited by handling
        if !self.braking {
            let target = control.steering;
            let max_step = self.config.handling_rate * dt;
            if target > self.direction {
                self.direction = (self.direction + max_step).min(target);
            } else {
                self.direction = (self.direction - max_step).max(target);
            }
        }

        if self.speed > 0.0 {
            self.x += self.direction * self.speed * self.config.lateral_scale * dt;
            self.distance += self.speed * dt;
        }

        self.x = self.x.clamp(self.config.road_min_x, self.config.road_max_x);
    }

    pub fn is_boosting(&self) -> bool {
        self.boosting
    }

    pub fn is_braking(&self) -> bool {
        self.braking
    }
}
