// src/pipeline/mapper.rs
//
// Continuous control mapping: hand orientation → steering, vertical hand
// position → throttle. Raw values go through a fixed non-linear curve,
// then an exponential moving average per channel.

use super::features::HandFeatures;
use crate::types::PipelineConfig;

pub struct ControlMapper {
    config: PipelineConfig,
    prev_steering: f32,
    prev_throttle: f32,
}

impl ControlMapper {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            prev_steering: 0.0,
            prev_throttle: 0.0,
        }
    }

    /// Map one frame's features to smoothed (steering, throttle).
    pub fn update(&mut self, features: &HandFeatures) -> (f32, f32) {
        let raw_steering = self.raw_steering(features.angle_deg);
        let raw_throttle = self.raw_throttle(features.wrist_height);

        let a = self.config.steering_alpha;
        let steering = (self.prev_steering * a + raw_steering * (1.0 - a)).clamp(-1.0, 1.0);
        self.prev_steering = steering;

        let a = self.config.throttle_alpha;
        let throttle = (self.prev_throttle * a + raw_throttle * (1.0 - a)).clamp(0.0, 1.0);
        self.prev_throttle = throttle;

        (steering, throttle)
    }

    /// Last smoothed values, without advancing the state. Used when a
    /// frame's input is unusable and the previous output must be held.
    pub fn held(&self) -> (f32, f32) {
        (self.prev_steering, self.prev_throttle)
    }

    pub fn reset(&mut self) {
        self.prev_steering = 0.0;
        self.prev_throttle = 0.0;
    }

    /// Orientation angle → raw steering in [-1, 1]. Linear inside the
    /// steering arc, saturated outside it, then reshaped by a power law
    /// so small deviations near center steer gently while the extremes
    /// keep full authority.
    fn raw_steering(&self, angle_deg: f32) -> f32 {
        let neutral = self.config.neutral_angle_deg;
        let window = self.config.steering_window_deg;
        let raw = if angle_deg < neutral - window {
            -1.0
        } else if angle_deg > neutral + window {
            1.0
        } else {
            (angle_deg - neutral) / window
        };
        raw.signum() * raw.abs().powf(self.config.steering_expo)
    }

    /// Normalized hand height → raw throttle in [0, 1]. The power curve
    /// keeps response gentle low in the frame and increasingly sensitive
    /// higher up.
    fn raw_throttle(&self, wrist_height: f32) -> f32 {
        wrist_height.clamp(0.0, 1.0).powf(self.config.throttle_expo)
    }
}
