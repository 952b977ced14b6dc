// src/pipeline/features.rs
//
// Geometric feature extraction from one frame's hand landmarks.
// Every distance threshold is normalized by the palm width (index MCP to
// pinky MCP) so detection is invariant to hand distance from the camera.

use crate::landmarks::{
    FrameSize, Landmark, INDEX_MCP, INDEX_PIP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_MCP, MIDDLE_TIP,
    PINKY_MCP, PINKY_PIP, PINKY_TIP, RING_MCP, RING_TIP, THUMB_MCP, THUMB_TIP, WRIST,
};
use crate::types::PipelineConfig;

/// Palm width floor. Keeps every normalized ratio finite when the
/// detector emits a degenerate hand.
const MIN_PALM_WIDTH: f32 = 1e-3;

/// Feature bundle for one frame's hand.
#[derive(Debug, Clone, Copy)]
pub struct HandFeatures {
    /// Orientation of the index-MCP → pinky-MCP vector, degrees
    pub angle_deg: f32,
    /// Index-MCP to pinky-MCP distance, floored at MIN_PALM_WIDTH
    pub palm_width: f32,
    /// Curl flags for index, middle, ring, pinky
    pub curled: [bool; 4],
    /// Radial extension flags for index, middle, ring, pinky
    pub extended: [bool; 4],
    /// Thumb tip further from the wrist than the thumb MCP
    pub thumb_extended: bool,
    /// Thumb tip above the wrist by more than the configured fraction
    /// of frame height
    pub thumb_raised: bool,
    /// Adjacent fingertip gaps: index-middle, middle-ring, ring-pinky
    pub spreads: [f32; 3],
    /// Index-PIP to pinky-PIP wide enough for the palm to face the camera
    pub palm_facing: bool,
    /// Normalized vertical hand position, 1.0 = top of frame
    pub wrist_height: f32,
}

impl HandFeatures {
    /// Extract the feature bundle. Returns None for fewer than 21 points
    /// or any non-finite coordinate; never panics.
    pub fn extract(
        points: &[Landmark],
        frame: FrameSize,
        config: &PipelineConfig,
    ) -> Option<Self> {
        if points.len() < LANDMARK_COUNT {
            return None;
        }
        if points[..LANDMARK_COUNT].iter().any(|p| !p.is_finite()) {
            return None;
        }

        let wrist = points[WRIST];
        let thumb_mcp = points[THUMB_MCP];
        let thumb_tip = points[THUMB_TIP];
        let index_mcp = points[INDEX_MCP];
        let pinky_mcp = points[PINKY_MCP];

        let palm_width = index_mcp.distance_to(&pinky_mcp).max(MIN_PALM_WIDTH);

        // Hand rotation from the knuckle row; more stable than any
        // single fingertip.
        let dx = pinky_mcp.x - index_mcp.x;
        let dy = pinky_mcp.y - index_mcp.y;
        let angle_deg = dy.atan2(dx).to_degrees();

        let fingers = [
            (points[INDEX_TIP], index_mcp),
            (points[MIDDLE_TIP], points[MIDDLE_MCP]),
            (points[RING_TIP], points[RING_MCP]),
            (points[PINKY_TIP], pinky_mcp),
        ];

        let mut curled = [false; 4];
        let mut extended = [false; 4];
        for (i, (tip, mcp)) in fingers.iter().enumerate() {
            curled[i] = tip.distance_to(mcp) < config.curl_ratio * palm_width;
            extended[i] = wrist.distance_to(tip) > config.extend_ratio * wrist.distance_to(mcp);
        }

        let thumb_extended = wrist.distance_to(&thumb_tip) > wrist.distance_to(&thumb_mcp);
        let thumb_raised =
            thumb_tip.y < wrist.y - config.thumb_raise_frac * frame.height.max(1) as f32;

        let spreads = [
            points[INDEX_TIP].distance_to(&points[MIDDLE_TIP]),
            points[MIDDLE_TIP].distance_to(&points[RING_TIP]),
            points[RING_TIP].distance_to(&points[PINKY_TIP]),
        ];

        let palm_facing = points[INDEX_PIP].distance_to(&points[PINKY_PIP])
            > config.palm_facing_ratio * palm_width;

        let wrist_height = (1.0 - wrist.y / frame.height.max(1) as f32).clamp(0.0, 1.0);

        Some(Self {
            angle_deg,
            palm_width,
            curled,
            extended,
            thumb_extended,
            thumb_raised,
            spreads,
            palm_facing,
            wrist_height,
        })
    }

    pub fn all_curled(&self) -> bool {
        self.curled.iter().all(|&c| c)
    }

    pub fn all_extended(&self) -> bool {
        self.extended.iter().all(|&e| e)
    }
}
