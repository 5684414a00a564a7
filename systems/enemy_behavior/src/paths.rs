//! Parametric dive paths.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use squadron_core::{arena::SAFETY_LINE, DivePattern};

const CURVE_RADIUS: f32 = 100.0;
const CURVE_DEPTH: f32 = 120.0;
const ZIGZAG_AMPLITUDE: f32 = 60.0;
const ZIGZAG_FREQUENCY: f32 = 2.5;
const ZIGZAG_DESCENT_TIME: f32 = 4.0;
const SPIRAL_RADIUS: f32 = 40.0;
const SPIRAL_GROWTH: f32 = 8.0;

/// Position reached `elapsed` path-time units into a dive anchored at `center`.
///
/// Every path keeps the enemy above the safety line so dives never enter the
/// player's band on their own.
#[must_use]
pub fn dive_position(pattern: DivePattern, center: Vec2, elapsed: f32) -> Vec2 {
    match pattern {
        DivePattern::Curve => {
            let angle = FRAC_PI_2 + elapsed;
            let floor = SAFETY_LINE.min(center.y + CURVE_DEPTH);
            Vec2::new(
                center.x + CURVE_RADIUS * angle.cos(),
                (center.y + CURVE_RADIUS * angle.sin()).min(floor),
            )
        }
        DivePattern::Zigzag => {
            let progress = (elapsed / ZIGZAG_DESCENT_TIME).min(1.0);
            Vec2::new(
                center.x + ZIGZAG_AMPLITUDE * (ZIGZAG_FREQUENCY * elapsed).sin(),
                center.y + (SAFETY_LINE - center.y) * progress,
            )
        }
        DivePattern::Spiral => {
            let angle = FRAC_PI_2 + elapsed;
            let radius = SPIRAL_RADIUS + SPIRAL_GROWTH * elapsed;
            Vec2::new(
                center.x + radius * angle.cos(),
                (center.y + radius * angle.sin()).min(SAFETY_LINE),
            )
        }
    }
}
