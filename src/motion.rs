use rand::Rng;
use raylib::prelude::*;

use crate::config::KenBurnsConfig;

/// Corner the image is anchored to when its motion starts. The image then
/// drifts towards the opposite corner while zooming in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    BottomLeft,
    TopRight,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::BottomLeft,
        Corner::TopRight,
        Corner::BottomRight,
    ];

    pub fn zoom(self) -> f32 {
        match self {
            Corner::TopLeft => 1.25,
            Corner::BottomLeft => 1.10,
            Corner::TopRight => 1.30,
            Corner::BottomRight => 1.20,
        }
    }
}

/// Where and how to draw an image at one instant. `dest` is centred on its
/// (x, y) and `origin` is the rotation pivot relative to `dest`, which is what
/// `draw_texture_pro` expects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub dest: Rectangle,
    pub origin: Vector2,
    pub rotation: f32, // degrees
}

/// Start/end viewport pair for one image, in frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub corner: Corner,
    pub size: Vector2,   // image size after the cover fit and enlarge ratio
    pub offset: Vector2, // top-left corner of the image at progress 0
    pub pan: Vector2,    // translation reached at progress 1
    pub zoom: f32,       // scale reached at progress 1
    pub rotation: f32,   // radians reached at progress 1
    pub duration: f32,
}

impl Motion {
    pub fn new(
        image: Vector2,
        frame: Vector2,
        corner: Corner,
        rotation: f32,
        duration: f32,
        config: &KenBurnsConfig,
    ) -> Self {
        let image_width = image.x.max(1.0);
        let image_height = image.y.max(1.0);

        // Cover fit: the short side of the image matches the frame
        let resize_ratio = (frame.x / image_width).max(frame.y / image_height);
        let size = Vector2::new(
            image_width * resize_ratio * config.enlarge_ratio,
            image_height * resize_ratio * config.enlarge_ratio,
        );

        let max_move_x = (size.x - frame.x).max(0.0);
        let max_move_y = (size.y - frame.y).max(0.0);
        let left = 0.0;
        let right = frame.x - size.x;
        let top = 0.0;
        let bottom = frame.y - size.y;

        let (offset, pan) = match corner {
            Corner::TopLeft => (Vector2::new(left, top), Vector2::new(-max_move_x, -max_move_y)),
            Corner::BottomLeft => (Vector2::new(left, bottom), Vector2::new(-max_move_x, max_move_y)),
            Corner::TopRight => (Vector2::new(right, top), Vector2::new(max_move_x, -max_move_y)),
            Corner::BottomRight => (Vector2::new(right, bottom), Vector2::new(max_move_x, max_move_y)),
        };

        Self {
            corner,
            size,
            offset,
            pan,
            zoom: corner.zoom(),
            rotation,
            duration,
        }
    }

    /// Picks a random corner and a random tilt in `max_rotation / 8` steps.
    pub fn random<R: Rng + ?Sized>(
        image: Vector2,
        frame: Vector2,
        duration: f32,
        config: &KenBurnsConfig,
        rng: &mut R,
    ) -> Self {
        let corner = Corner::ALL[rng.random_range(0..Corner::ALL.len())];
        let rotation = rng.random_range(0..=8) as f32 / 8.0 * config.max_rotation;
        Self::new(image, frame, corner, rotation, duration, config)
    }

    /// Placement at `progress` in [0, 1]. Scale, rotation and translation all
    /// apply about the centre of the image box.
    pub fn sample(&self, progress: f32) -> Placement {
        let t = progress.clamp(0.0, 1.0);
        let scale = raylib::core::math::lerp(1.0, self.zoom, t);
        let angle = self.rotation * t;

        // The box spans (0, 0)..size, the image sits inside it at `offset`
        let pivot = Vector2::new(self.size.x * 0.5, self.size.y * 0.5);
        let (sin, cos) = angle.sin_cos();
        let rel_x = self.offset.x * scale;
        let rel_y = self.offset.y * scale;
        let center = Vector2::new(
            pivot.x + rel_x * cos - rel_y * sin + self.pan.x * t,
            pivot.y + rel_x * sin + rel_y * cos + self.pan.y * t,
        );

        let width = self.size.x * scale;
        let height = self.size.y * scale;

        Placement {
            dest: Rectangle::new(center.x, center.y, width, height),
            origin: Vector2::new(width * 0.5, height * 0.5),
            rotation: angle.to_degrees(),
        }
    }
}
