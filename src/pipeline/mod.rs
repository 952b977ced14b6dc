// src/pipeline/mod.rs
//
// Gesture-to-control decision pipeline.
//
// Signal flow:
//   Landmarks → features ──→ mapper (steering/throttle EMA) ──┐
//                  └────────→ classifier (stop/boost/brake) ──┼→ ControlState
//                             debounce latches + stability ───┘
//
// Invoked once per rendered frame by the outer loop; a pure function of
// the input and its own smoothing state. Never panics, never blocks.

pub mod classifier;
pub mod debounce;
pub mod features;
pub mod mapper;

#[cfg(test)]
pub mod test_hands;

pub use debounce::{CommandStability, GestureLatch};
pub use features::HandFeatures;
pub use mapper::ControlMapper;

use crate::landmarks::{FrameSize, Landmark, LANDMARK_COUNT};
use crate::types::{ControlState, DriveCommand, GestureKind, PipelineConfig};
use tracing::debug;

pub struct GestureControlPipeline {
    config: PipelineConfig,
    mapper: ControlMapper,
    brake_latch: GestureLatch,
    boost_latch: GestureLatch,
    stability: CommandStability,
    last_gesture: GestureKind,
}

impl GestureControlPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            mapper: ControlMapper::new(config.clone()),
            brake_latch: GestureLatch::new(config.gesture_threshold),
            boost_latch: GestureLatch::new(config.gesture_threshold),
            stability: CommandStability::new(config.stability_threshold),
            last_gesture: GestureKind::NoHand,
            config,
        }
    }

    /// Process one frame's landmarks (or the no-hand signal) into a
    /// control state. Malformed input degrades to the no-hand path;
    /// errors never propagate out.
    pub fn process(&mut self, hand: Option<&[Landmark]>, frame: FrameSize) -> ControlState {
        match hand {
            None => self.process_no_hand(),
            Some(points) if points.len() < LANDMARK_COUNT => self.process_no_hand(),
            Some(points) => match HandFeatures::extract(points, frame, &self.config) {
                Some(features) => self.process_hand(&features),
                None => self.process_degraded(),
            },
        }
    }

    /// Back to the freshly-initialized state (detector re-init).
    pub fn reset(&mut self) {
        self.mapper.reset();
        self.brake_latch = GestureLatch::new(self.config.gesture_threshold);
        self.boost_latch = GestureLatch::new(self.config.gesture_threshold);
        self.stability.reset();
        self.last_gesture = GestureKind::NoHand;
    }

    fn process_hand(&mut self, features: &HandFeatures) -> ControlState {
        let (steering, throttle) = self.mapper.update(features);

        let raw_stop = classifier::is_stop(features, &self.config);
        let brake_active = self.brake_latch.update(classifier::is_brake(features));
        let boost_active = self.boost_latch.update(classifier::is_boost(features));

        let gesture = classifier::classify(features, &self.config);
        self.note_transition(gesture);

        // Priority: stop > boost > brake > driving. The stop gesture is
        // the emergency path and skips the debounce entirely.
        let (state, command) = if raw_stop {
            (
                ControlState {
                    steering: 0.0,
                    throttle: 0.0,
                    braking: true,
                    boost: false,
                    gesture,
                    stable_command: None,
                },
                DriveCommand::Stop,
            )
        } else if boost_active {
            (
                ControlState {
                    steering,
                    throttle: 1.0,
                    braking: false,
                    boost: true,
                    gesture,
                    stable_command: None,
                },
                DriveCommand::ForwardBoost,
            )
        } else if brake_active {
            (
                ControlState {
                    steering,
                    throttle: 0.0,
                    braking: true,
                    boost: false,
                    gesture,
                    stable_command: None,
                },
                DriveCommand::Stop,
            )
        } else {
            let command = if steering < -self.config.steering_turn_threshold {
                DriveCommand::Left
            } else if steering > self.config.steering_turn_threshold {
                DriveCommand::Right
            } else {
                DriveCommand::Forward
            };
            (
                ControlState {
                    steering,
                    throttle,
                    braking: false,
                    boost: false,
                    gesture,
                    stable_command: None,
                },
                command,
            )
        };

        let stable_command = self.stability.observe(command);
        ControlState {
            stable_command,
            ..state
        }
    }

    /// No hand this frame: boost releases immediately, the brake latch
    /// drains one step so a momentarily-lost hand does not instantly
    /// release the brake.
    fn process_no_hand(&mut self) -> ControlState {
        let braking = self.brake_latch.decay();
        self.boost_latch.clear();
        self.stability.reset();
        self.note_transition(GestureKind::NoHand);
        ControlState {
            steering: 0.0,
            throttle: 0.0,
            braking,
            boost: false,
            gesture: GestureKind::NoHand,
            stable_command: None,
        }
    }

    /// A hand was reported but its landmarks are unusable (non-finite
    /// coordinates). Hold the last smoothed outputs instead of snapping
    /// to neutral; gesture state follows the no-hand rules.
    fn process_degraded(&mut self) -> ControlState {
        let (steering, throttle) = self.mapper.held();
        let braking = self.brake_latch.decay();
        self.boost_latch.clear();
        self.stability.reset();
        self.note_transition(GestureKind::NoHand);
        ControlState {
            steering,
            throttle,
            braking,
            boost: false,
            gesture: GestureKind::NoHand,
            stable_command: None,
        }
    }

    fn note_transition(&mut self, gesture: GestureKind) {
        if gesture != self.last_gesture {
            debug!(
                "Gesture: {} → {}",
                self.last_gesture.as_str(),
                gesture.as_str()
            );
            self.last_gesture = gesture;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_hands::{boost_hand, driving_hand, fist_hand, open_palm_hand};
    use super::*;

    const FRAME: FrameSize = FrameSize {
        width: 640,
        height: 480,
    };

    fn pipeline() -> GestureControlPipeline {
        GestureControlPipeline::new(PipelineConfig::default())
    }

    #[test]
    fn test_open_palm_is_immediate_stop() {
        let mut p = pipeline();
        let control = p.process(Some(&open_palm_hand()), FRAME);
        assert_eq!(control.steering, 0.0);
        assert_eq!(control.throttle, 0.0);
        assert!(control.braking);
        assert!(!control.boost);
        assert_eq!(control.gesture_name(), "Stop");
    }

    #[test]
    fn test_boost_activates_at_debounce_threshold() {
        let mut p = pipeline();
        let hand = boost_hand();
        let first = p.process(Some(&hand), FRAME);
        assert!(!first.boost);
        let second = p.process(Some(&hand), FRAME);
        assert!(!second.boost);
        let third = p.process(Some(&hand), FRAME);
        assert!(third.boost);
        assert_eq!(third.throttle, 1.0);
        assert_eq!(third.gesture, GestureKind::ThumbUpBoost);
    }

    #[test]
    fn test_brake_activates_and_decays() {
        let mut p = pipeline();
        let fist = fist_hand();
        for _ in 0..3 {
            p.process(Some(&fist), FRAME);
        }
        let braking = p.process(Some(&fist), FRAME);
        assert!(braking.braking);
        assert_eq!(braking.throttle, 0.0);

        // Open the hand again: the brake holds for two more frames,
        // then releases on the third
        let relaxed = driving_hand(-90.0, 300.0);
        assert!(p.process(Some(&relaxed), FRAME).braking);
        assert!(p.process(Some(&relaxed), FRAME).braking);
        assert!(!p.process(Some(&relaxed), FRAME).braking);
    }

    #[test]
    fn test_hand_lost_releases_boost_but_not_brake() {
        let mut p = pipeline();
        for _ in 0..3 {
            p.process(Some(&boost_hand()), FRAME);
        }
        let lost = p.process(None, FRAME);
        assert!(!lost.boost);
        assert_eq!(lost.gesture, GestureKind::NoHand);

        p.reset();
        for _ in 0..3 {
            p.process(Some(&fist_hand()), FRAME);
        }
        // Brake drains one step per no-hand tick instead of resetting
        assert!(p.process(None, FRAME).braking);
        assert!(p.process(None, FRAME).braking);
        assert!(!p.process(None, FRAME).braking);
    }

    #[test]
    fn test_short_landmark_list_is_no_hand() {
        let mut p = pipeline();
        let short = vec![Landmark::new(10.0, 10.0); 7];
        let control = p.process(Some(&short), FRAME);
        assert_eq!(control.gesture, GestureKind::NoHand);
        assert_eq!(control.steering, 0.0);
        assert_eq!(control.throttle, 0.0);
    }

    #[test]
    fn test_corrupt_landmarks_hold_previous_output() {
        let mut p = pipeline();
        let hand = driving_hand(-50.0, 120.0);
        let mut last = ControlState::neutral();
        for _ in 0..10 {
            last = p.process(Some(&hand), FRAME);
        }
        assert!(last.steering > 0.0);
        assert!(last.throttle > 0.0);

        let mut corrupt = hand.clone();
        corrupt[8] = Landmark::new(f32::NAN, f32::NAN);
        let held = p.process(Some(&corrupt), FRAME);
        assert_eq!(held.steering, last.steering);
        assert_eq!(held.throttle, last.throttle);
        assert_eq!(held.gesture, GestureKind::NoHand);
    }

    #[test]
    fn test_stable_command_needs_consistent_ticks() {
        let mut p = pipeline();
        let hand = driving_hand(-90.0, 300.0);
        assert_eq!(p.process(Some(&hand), FRAME).stable_command, None);
        assert_eq!(p.process(Some(&hand), FRAME).stable_command, None);
        assert_eq!(
            p.process(Some(&hand), FRAME).stable_command,
            Some(DriveCommand::Forward)
        );
    }

    #[test]
    fn test_hand_loss_resets_command_stability() {
        let mut p = pipeline();
        let hand = driving_hand(-90.0, 300.0);
        p.process(Some(&hand), FRAME);
        p.process(Some(&hand), FRAME);
        p.process(None, FRAME);
        // The run starts over after the dropout
        assert_eq!(p.process(Some(&hand), FRAME).stable_command, None);
        assert_eq!(p.process(Some(&hand), FRAME).stable_command, None);
        assert_eq!(
            p.process(Some(&hand), FRAME).stable_command,
            Some(DriveCommand::Forward)
        );
    }

    #[test]
    fn test_turn_labels_follow_steering_sign() {
        let mut p = pipeline();
        let right = driving_hand(-45.0, 300.0);
        let mut stable = None;
        for _ in 0..10 {
            stable = p.process(Some(&right), FRAME).stable_command;
        }
        assert_eq!(stable, Some(DriveCommand::Right));

        p.reset();
        let left = driving_hand(-135.0, 300.0);
        for _ in 0..10 {
            stable = p.process(Some(&left), FRAME).stable_command;
        }
        assert_eq!(stable, Some(DriveCommand::Left));
    }

    #[test]
    fn test_outputs_always_in_range() {
        let mut p = pipeline();
        let hands = [
            driving_hand(-200.0, 0.0),
            driving_hand(-45.0, 480.0),
            driving_hand(170.0, 240.0),
            open_palm_hand(),
            fist_hand(),
            boost_hand(),
        ];
        for hand in &hands {
            for _ in 0..5 {
                let c = p.process(Some(hand), FRAME);
                assert!((-1.0..=1.0).contains(&c.steering));
                assert!((0.0..=1.0).contains(&c.throttle));
            }
        }
    }

    #[test]
    fn test_reset_restores_fresh_state() {
        let mut p = pipeline();
        for _ in 0..5 {
            p.process(Some(&boost_hand()), FRAME);
        }
        p.reset();
        let control = p.process(Some(&boost_hand()), FRAME);
        assert!(!control.boost);
        assert_eq!(control.stable_command, None);
    }
}
