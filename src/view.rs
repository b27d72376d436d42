use std::path::PathBuf;
use std::rc::{Rc, Weak};

use rand::rngs::StdRng;
use rand::SeedableRng;
use raylib::prelude::*;
use tracing::{debug, warn};

use crate::config::KenBurnsConfig;
use crate::delegate::KenBurnsDelegate;
use crate::error::{KenBurnsError, KenBurnsResult};
use crate::motion::Motion;
use crate::slide::Slide;
use crate::source::{FromPath, ImageSize, ImageSource, KenBurnsDatasource};
use crate::state::KenBurnsState;

/// Cycles through images with a pan/zoom motion on each one.
///
/// The view is driven by [`update`](Self::update), called once per frame with
/// the elapsed time. Each image stays current for one slot of `duration`
/// seconds, then the next image fades in over it. Draw the result by walking
/// [`layers`](Self::layers) back to front.
///
/// Starting a run while another one is in progress supersedes it: the index
/// goes back to 0 and the first image crossfades over whatever was showing.
pub struct KenBurnsView<I> {
    frame_size: Vector2,
    config: KenBurnsConfig,
    rng: StdRng,

    state: KenBurnsState,
    source: Option<ImageSource<I>>,
    image_count: usize,
    current_index: usize,
    duration: f32,
    looping: bool,
    landscape: bool,
    slot_timer: f32,

    previous: Option<Slide<I>>,
    current: Option<Slide<I>>,
    next_slide_id: u64,

    delegate: Option<Weak<dyn KenBurnsDelegate>>,
    datasource: Option<Weak<dyn KenBurnsDatasource<I>>>,
}

impl<I: ImageSize> KenBurnsView<I> {
    pub fn new(frame_size: Vector2) -> Self {
        Self::with_rng(frame_size, KenBurnsConfig::default(), StdRng::from_os_rng())
    }

    pub fn with_config(frame_size: Vector2, config: KenBurnsConfig) -> Self {
        Self::with_rng(frame_size, config, StdRng::from_os_rng())
    }

    /// Deterministic motions: the same seed and inputs pick the same corners.
    pub fn with_seed(frame_size: Vector2, config: KenBurnsConfig, seed: u64) -> Self {
        Self::with_rng(frame_size, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(frame_size: Vector2, config: KenBurnsConfig, rng: StdRng) -> Self {
        Self {
            frame_size,
            config,
            rng,
            state: KenBurnsState::Idle,
            source: None,
            image_count: 0,
            current_index: 0,
            duration: 0.0,
            looping: false,
            landscape: true,
            slot_timer: 0.0,
            previous: None,
            current: None,
            next_slide_id: 0,
            delegate: None,
            datasource: None,
        }
    }

    // --- Configuration ---

    pub fn frame_size(&self) -> Vector2 {
        self.frame_size
    }

    /// Applies to images presented from now on.
    pub fn set_frame_size(&mut self, frame_size: Vector2) {
        self.frame_size = frame_size;
    }

    pub fn config(&self) -> &KenBurnsConfig {
        &self.config
    }

    /// The view keeps only a weak handle, the caller owns the delegate.
    pub fn set_delegate<D: KenBurnsDelegate + 'static>(&mut self, delegate: &Rc<D>) {
        let delegate: Rc<dyn KenBurnsDelegate> = delegate.clone();
        self.delegate = Some(Rc::downgrade(&delegate));
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    /// The view keeps only a weak handle, the caller owns the datasource.
    pub fn set_datasource(&mut self, datasource: &Rc<dyn KenBurnsDatasource<I>>) {
        self.datasource = Some(Rc::downgrade(datasource));
    }

    pub fn datasource(&self) -> Option<Rc<dyn KenBurnsDatasource<I>>> {
        self.datasource.as_ref().and_then(Weak::upgrade)
    }

    // --- Queries ---

    pub fn state(&self) -> KenBurnsState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, KenBurnsState::Animating { .. })
    }

    /// Index of the image on top, if any image is showing.
    pub fn current_index(&self) -> Option<usize> {
        self.current.as_ref().map(Slide::index)
    }

    pub fn image_count(&self) -> usize {
        self.image_count
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn is_landscape(&self) -> bool {
        self.landscape
    }

    /// Visible layers in draw order, back to front.
    pub fn layers(&self) -> impl Iterator<Item = &Slide<I>> {
        self.previous.iter().chain(self.current.iter())
    }

    // --- Entry points ---

    pub fn animate_with_images(
        &mut self,
        images: Vec<I>,
        duration: f32,
        looping: bool,
        landscape: bool,
    ) -> KenBurnsResult<()> {
        validate_duration(duration)?;
        let images = images.into_iter().map(Rc::new).collect();
        self.start(ImageSource::Images(images), duration, looping, landscape);
        Ok(())
    }

    /// Paths are loaded one at a time, when their index comes up.
    pub fn animate_with_image_paths(
        &mut self,
        paths: Vec<PathBuf>,
        duration: f32,
        looping: bool,
        landscape: bool,
    ) -> KenBurnsResult<()>
    where
        I: FromPath,
    {
        validate_duration(duration)?;
        let source = ImageSource::Paths {
            paths,
            load: I::from_path,
        };
        self.start(source, duration, looping, landscape);
        Ok(())
    }

    /// The image count is read once, images are requested as they come up.
    pub fn start_animation_with_datasource(
        &mut self,
        datasource: &Rc<dyn KenBurnsDatasource<I>>,
        duration: f32,
        looping: bool,
        landscape: bool,
    ) -> KenBurnsResult<()> {
        validate_duration(duration)?;
        let source = ImageSource::Datasource {
            datasource: Rc::downgrade(datasource),
            count: datasource.number_of_images(),
        };
        self.start(source, duration, looping, landscape);
        Ok(())
    }

    /// Halts the run. Whatever is showing stays in place, frozen mid-motion.
    pub fn stop_animation(&mut self) {
        if self.is_animating() {
            debug!(index = self.current_index, "stopping animation");
        }
        self.state = KenBurnsState::Idle;
        for slide in self.previous.iter_mut().chain(self.current.iter_mut()) {
            slide.freeze();
        }
    }

    /// Stops and removes every layer. The next start begins at index 0.
    pub fn clear(&mut self) {
        self.stop_animation();
        self.previous = None;
        self.current = None;
        self.source = None;
        self.datasource = None;
        self.image_count = 0;
        self.current_index = 0;
        self.slot_timer = 0.0;
    }

    /// Advances layer motions and the slot clock by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        for slide in self.previous.iter_mut().chain(self.current.iter_mut()) {
            slide.update(dt);
        }

        if self.is_animating() {
            let shown = self.current.as_ref().map(Slide::id);
            self.slot_timer += dt;

            // One pass over the images per tick at most, a stalled frame or a
            // tiny duration must not replay the whole backlog
            let slots = (self.slot_timer / self.duration).floor();
            if slots >= 1.0 {
                let advances = if slots >= self.image_count as f32 {
                    self.image_count
                } else {
                    slots as usize
                };
                self.slot_timer = self.slot_timer.rem_euclid(self.duration);
                for _ in 0..advances {
                    if !self.is_animating() {
                        break;
                    }
                    self.finish_slot();
                }
            }

            // A slide presented during this tick has only existed for the leftover
            if self.current.as_ref().map(Slide::id) != shown {
                if let Some(slide) = self.current.as_mut() {
                    slide.update(self.slot_timer);
                }
            }
        }

        if self.current.as_ref().is_some_and(Slide::is_faded_in) {
            self.previous = None;
        }
    }

    // --- Sequencing ---

    fn start(&mut self, source: ImageSource<I>, duration: f32, looping: bool, landscape: bool) {
        let count = source.len();
        if count == 0 {
            debug!("no images to animate");
            return;
        }

        if self.is_animating() {
            debug!("superseding the running animation");
        }
        debug!(count, duration, looping, landscape, "starting animation");

        // Anything showing stays underneath while the first image fades in
        if let Some(mut slide) = self.current.take() {
            slide.freeze();
            self.previous = Some(slide);
        }

        self.datasource = match &source {
            ImageSource::Datasource { datasource, .. } => Some(datasource.clone()),
            _ => None,
        };
        self.source = Some(source);
        self.image_count = count;
        self.current_index = 0;
        self.duration = duration;
        self.looping = looping;
        self.landscape = landscape;
        self.slot_timer = 0.0;
        self.state = KenBurnsState::Animating { index: 0 };

        self.present_from(0);
    }

    fn next_index(&self, index: usize) -> Option<usize> {
        if index + 1 < self.image_count {
            Some(index + 1)
        } else if self.looping {
            Some(0)
        } else {
            None
        }
    }

    fn finish_slot(&mut self) {
        match self.next_index(self.current_index) {
            Some(next) => self.present_from(next),
            None => self.finish(),
        }
    }

    /// Presents the first resolvable image at or after `index`.
    fn present_from(&mut self, mut index: usize) {
        for _ in 0..self.image_count {
            let resolved = match &self.source {
                Some(source) => source.resolve(index),
                None => return,
            };

            match resolved {
                Ok(image) => {
                    self.present(index, image);
                    return;
                }
                Err(e) => {
                    warn!(index, error = %e, "skipping image");
                    match self.next_index(index) {
                        Some(next) => index = next,
                        None => {
                            self.current_index = index;
                            self.finish();
                            return;
                        }
                    }
                }
            }
        }

        warn!(count = self.image_count, "no image could be resolved");
        self.finish();
    }

    fn present(&mut self, index: usize, image: Rc<I>) {
        let motion = Motion::random(
            image.size(),
            self.oriented_frame(),
            self.duration + self.config.motion_overrun,
            &self.config,
            &mut self.rng,
        );
        let fade_duration = self.config.fade_duration.min(self.duration);

        let id = self.next_slide_id;
        self.next_slide_id += 1;

        if let Some(mut outgoing) = self.current.take() {
            outgoing.freeze();
            self.previous = Some(outgoing);
        }
        self.current = Some(Slide::new(id, index, image, motion, fade_duration));
        self.current_index = index;
        self.state = KenBurnsState::Animating { index };

        debug!(index, corner = ?motion.corner, "showing image");
        self.notify(|delegate| delegate.did_show_image(index));
    }

    fn finish(&mut self) {
        self.state = KenBurnsState::Idle;
        self.slot_timer = 0.0;
        debug!("all animations finished");
        self.notify(|delegate| delegate.did_finish_all_animations());
    }

    fn oriented_frame(&self) -> Vector2 {
        let long = self.frame_size.x.max(self.frame_size.y);
        let short = self.frame_size.x.min(self.frame_size.y);
        if self.landscape {
            Vector2::new(long, short)
        } else {
            Vector2::new(short, long)
        }
    }

    fn notify(&self, f: impl FnOnce(&dyn KenBurnsDelegate)) {
        if let Some(delegate) = self.delegate.as_ref().and_then(Weak::upgrade) {
            f(delegate.as_ref());
        }
    }
}

fn validate_duration(duration: f32) -> KenBurnsResult<()> {
    if duration.is_finite() && duration > 0.0 {
        Ok(())
    } else {
        Err(KenBurnsError::InvalidDuration(duration))
    }
}
