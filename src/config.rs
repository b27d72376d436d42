use crate::constants::*;

/// Tuning knobs for the pan/zoom motion and the crossfade.
#[derive(Debug, Clone, PartialEq)]
pub struct KenBurnsConfig {
    /// Multiplier applied on top of the cover fit, leaves room to pan.
    pub enlarge_ratio: f32,
    /// Seconds a new image takes to fade in over the previous one.
    pub fade_duration: f32,
    /// Seconds the motion keeps running past the image's slot.
    pub motion_overrun: f32,
    /// Largest tilt in radians. 0 disables rotation.
    pub max_rotation: f32,
}

impl Default for KenBurnsConfig {
    fn default() -> Self {
        Self {
            enlarge_ratio: ENLARGE_RATIO,
            fade_duration: FADE_DURATION,
            motion_overrun: MOTION_OVERRUN,
            max_rotation: MAX_ROTATION,
        }
    }
}
