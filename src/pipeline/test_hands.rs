// src/pipeline/test_hands.rs
//
// Shared 21-point hand fixtures for pipeline tests. Coordinates are in
// a 640x480 frame, y growing downward, wrist near the bottom.

use crate::landmarks::Landmark;

fn lm(x: f32, y: f32) -> Landmark {
    Landmark::new(x, y)
}

fn lerp(a: Landmark, b: Landmark, t: f32) -> Landmark {
    lm(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// Open palm facing the camera, fingers extended and spread.
pub fn open_palm_hand() -> Vec<Landmark> {
    vec![
        lm(320.0, 420.0), // 0 wrist
        lm(300.0, 405.0), // 1 thumb cmc
        lm(270.0, 390.0), // 2 thumb mcp
        lm(250.0, 375.0), // 3 thumb ip
        lm(230.0, 360.0), // 4 thumb tip
        lm(280.0, 330.0), // 5 index mcp
        lm(272.0, 290.0), // 6 index pip
        lm(266.0, 260.0), // 7 index dip
        lm(260.0, 230.0), // 8 index tip
        lm(310.0, 320.0), // 9 middle mcp
        lm(308.0, 280.0), // 10 middle pip
        lm(306.0, 245.0), // 11 middle dip
        lm(305.0, 210.0), // 12 middle tip
        lm(340.0, 325.0), // 13 ring mcp
        lm(344.0, 290.0), // 14 ring pip
        lm(347.0, 255.0), // 15 ring dip
        lm(350.0, 220.0), // 16 ring tip
        lm(370.0, 340.0), // 17 pinky mcp
        lm(382.0, 305.0), // 18 pinky pip
        lm(389.0, 280.0), // 19 pinky dip
        lm(395.0, 255.0), // 20 pinky tip
    ]
}

/// Closed fist, thumb tucked alongside.
pub fn fist_hand() -> Vec<Landmark> {
    vec![
        lm(320.0, 420.0), // 0 wrist
        lm(305.0, 405.0), // 1 thumb cmc
        lm(285.0, 395.0), // 2 thumb mcp
        lm(283.0, 388.0), // 3 thumb ip
        lm(282.0, 380.0), // 4 thumb tip
        lm(280.0, 330.0), // 5 index mcp
        lm(282.0, 335.0), // 6 index pip
        lm(284.0, 340.0), // 7 index dip
        lm(285.0, 345.0), // 8 index tip
        lm(310.0, 320.0), // 9 middle mcp
        lm(311.0, 330.0), // 10 middle pip
        lm(312.0, 334.0), // 11 middle dip
        lm(312.0, 338.0), // 12 middle tip
        lm(340.0, 325.0), // 13 ring mcp
        lm(339.0, 332.0), // 14 ring pip
        lm(338.0, 337.0), // 15 ring dip
        lm(338.0, 342.0), // 16 ring tip
        lm(370.0, 340.0), // 17 pinky mcp
        lm(368.0, 345.0), // 18 pinky pip
        lm(366.0, 348.0), // 19 pinky dip
        lm(365.0, 352.0), // 20 pinky tip
    ]
}

/// Fist with the thumb pointing up, tip well above the wrist.
pub fn boost_hand() -> Vec<Landmark> {
    let mut hand = fist_hand();
    hand[2] = lm(295.0, 380.0); // thumb mcp
    hand[3] = lm(303.0, 355.0); // thumb ip
    hand[4] = lm(310.0, 330.0); // thumb tip, 90px above the wrist
    hand
}

/// Relaxed driving hand with the knuckle row rotated to the requested
/// orientation and the wrist at the requested height. Fingertips are
/// clustered so neither the fist nor the spread-palm predicates fire.
pub fn driving_hand(angle_deg: f32, wrist_y: f32) -> Vec<Landmark> {
    let wrist = lm(320.0, wrist_y);
    let center = lm(320.0, wrist_y - 90.0);

    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let (hx, hy) = (40.0 * cos, 40.0 * sin);

    let index_mcp = lm(center.x - hx, center.y - hy);
    let middle_mcp = lm(center.x - hx / 3.0, center.y - hy / 3.0);
    let ring_mcp = lm(center.x + hx / 3.0, center.y + hy / 3.0);
    let pinky_mcp = lm(center.x + hx, center.y + hy);

    let index_tip = lm(317.0, center.y - 120.0);
    let middle_tip = lm(319.0, center.y - 121.0);
    let ring_tip = lm(321.0, center.y - 120.0);
    let pinky_tip = lm(323.0, center.y - 119.0);

    vec![
        wrist,                                  // 0
        lerp(wrist, center, 0.3),               // 1 thumb cmc
        lm(300.0, wrist_y - 20.0),              // 2 thumb mcp
        lm(297.0, wrist_y - 28.0),              // 3 thumb ip
        lm(295.0, wrist_y - 35.0),              // 4 thumb tip, not raised
        index_mcp,                              // 5
        lerp(index_mcp, index_tip, 0.4),        // 6 index pip
        lerp(index_mcp, index_tip, 0.7),        // 7 index dip
        index_tip,                              // 8
        middle_mcp,                             // 9
        lerp(middle_mcp, middle_tip, 0.4),      // 10
        lerp(middle_mcp, middle_tip, 0.7),      // 11
        middle_tip,                             // 12
        ring_mcp,                               // 13
        lerp(ring_mcp, ring_tip, 0.4),          // 14
        lerp(ring_mcp, ring_tip, 0.7),          // 15
        ring_tip,                               // 16
        pinky_mcp,                              // 17
        lerp(pinky_mcp, pinky_tip, 0.4),        // 18 pinky pip
        lerp(pinky_mcp, pinky_tip, 0.7),        // 19
        pinky_tip,                              // 20
    ]
}
