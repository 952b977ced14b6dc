// src/pipeline/classifier.rs
//
// Discrete gesture predicates, evaluated in strict priority order so the
// emergency stop unambiguously overrides everything else.

use super::features::HandFeatures;
use crate::types::{GestureKind, PipelineConfig};

/// Open palm facing the camera: all five fingers extended, fingertips
/// spread apart, palm turned toward the lens.
pub fn is_stop(features: &HandFeatures, config: &PipelineConfig) -> bool {
    features.all_extended()
        && features.thumb_extended
        && features
            .spreads
            .iter()
            .all(|&s| s > config.spread_ratio * features.palm_width)
        && features.palm_facing
}

/// Thumb up with the rest of the hand in a fist.
pub fn is_boost(features: &HandFeatures) -> bool {
    features.thumb_raised && features.all_curled()
}

/// Fist with the thumb tucked in.
pub fn is_brake(features: &HandFeatures) -> bool {
    features.all_curled() && !features.thumb_raised
}

/// First match wins: stop > boost > brake > driving.
pub fn classify(features: &HandFeatures, config: &PipelineConfig) -> GestureKind {
    if is_stop(features, config) {
        GestureKind::OpenPalmStop
    } else if is_boost(features) {
        GestureKind::ThumbUpBoost
    } else if is_brake(features) {
        GestureKind::FistBrake
    } else {
        GestureKind::Driving
    }
}
