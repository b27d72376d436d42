use std::rc::Rc;

use raylib::prelude::*;

use crate::motion::{Motion, Placement};

/// One presented image: its motion and its fade-in, advanced by `update`.
pub struct Slide<I> {
    id: u64,
    index: usize,
    image: Rc<I>,
    motion: Motion,

    progress: f32,
    alpha: f32,
    elapsed: f32,
    fade_duration: f32,
    frozen: bool,

    tween_motion: ease::Tween,
    tween_fade: ease::Tween,
}

impl<I> Slide<I> {
    pub fn new(id: u64, index: usize, image: Rc<I>, motion: Motion, fade_duration: f32) -> Self {
        let fade_duration = fade_duration.max(0.0);
        Self {
            id,
            index,
            image,
            motion,
            progress: 0.0,
            alpha: if fade_duration > 0.0 { 0.0 } else { 1.0 },
            elapsed: 0.0,
            fade_duration,
            frozen: false,
            tween_motion: ease::Tween::new(ease::quad_in, 0.0, 1.0, motion.duration),
            tween_fade: ease::Tween::new(ease::linear_none, 0.0, 1.0, fade_duration),
        }
    }

    /// Unique per view, stable for the slide's lifetime. Renderers key
    /// uploaded textures on it.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn image(&self) -> &I {
        &self.image
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    /// Eased motion progress in [0, 1].
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn placement(&self) -> Placement {
        self.motion.sample(self.progress)
    }

    pub fn is_faded_in(&self) -> bool {
        self.alpha >= 1.0
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn update(&mut self, dt: f32) {
        if self.frozen || dt <= 0.0 {
            return;
        }
        self.elapsed += dt;

        self.progress = if self.elapsed >= self.motion.duration {
            1.0
        } else {
            self.tween_motion.apply(dt).clamp(0.0, 1.0)
        };

        if self.alpha < 1.0 {
            self.alpha = if self.elapsed >= self.fade_duration {
                1.0
            } else {
                self.tween_fade.apply(dt).clamp(0.0, 1.0)
            };
        }
    }
}
