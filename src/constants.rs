pub const RENDER_WIDTH: i32 = 1920;           // Width of the render texture
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the render texture
pub const FPS: u32 = 60;                      // Frames per second

pub const TRANSITION_DURATION: f32 = 6.0;     // Seconds each image stays current
pub const FADE_DURATION: f32 = 1.0;           // Crossfade between two images (seconds)
pub const MOTION_OVERRUN: f32 = 2.0;          // Pan/zoom outlasts the slot by this much (seconds)
pub const ENLARGE_RATIO: f32 = 1.1;           // Extra scale on top of the cover fit
pub const MAX_ROTATION: f32 = 0.08;           // Upper bound of the random tilt (radians)
