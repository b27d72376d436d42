use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use kenburns::{
    FromPath, ImageSize, KenBurnsConfig, KenBurnsDatasource, KenBurnsDelegate, KenBurnsError,
    KenBurnsResult, KenBurnsState, KenBurnsView,
};
use proptest::prelude::*;
use raylib::prelude::Vector2;

#[derive(Debug, Clone, PartialEq)]
struct Pic {
    width: f32,
    height: f32,
}

fn pic(width: f32, height: f32) -> Pic {
    Pic { width, height }
}

impl ImageSize for Pic {
    fn size(&self) -> Vector2 {
        Vector2::new(self.width, self.height)
    }
}

// "640x480.jpg" resolves to a 640x480 picture, anything else fails to load
impl FromPath for Pic {
    fn from_path(path: &Path) -> KenBurnsResult<Self> {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        let (w, h) = stem
            .split_once('x')
            .ok_or_else(|| KenBurnsError::decode(path, "unrecognised file"))?;
        match (w.parse(), h.parse()) {
            (Ok(width), Ok(height)) => Ok(Pic { width, height }),
            _ => Err(KenBurnsError::decode(path, "unrecognised file")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Event {
    Showing(usize),
    Finished,
}

#[derive(Default)]
struct Recorder {
    events: RefCell<Vec<Event>>,
}

impl Recorder {
    fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    fn finished_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| **e == Event::Finished)
            .count()
    }
}

impl KenBurnsDelegate for Recorder {
    fn did_show_image(&self, index: usize) {
        self.events.borrow_mut().push(Event::Showing(index));
    }

    fn did_finish_all_animations(&self) {
        self.events.borrow_mut().push(Event::Finished);
    }
}

struct Album {
    pics: Vec<Option<Pic>>,
    requested: RefCell<Vec<usize>>,
    counted: Cell<usize>,
}

impl Album {
    fn new(pics: Vec<Option<Pic>>) -> Self {
        Self {
            pics,
            requested: RefCell::new(Vec::new()),
            counted: Cell::new(0),
        }
    }
}

impl KenBurnsDatasource<Pic> for Album {
    fn number_of_images(&self) -> usize {
        self.counted.set(self.counted.get() + 1);
        self.pics.len()
    }

    fn image_at(&self, index: usize) -> Option<Pic> {
        self.requested.borrow_mut().push(index);
        self.pics.get(index).cloned().flatten()
    }
}

fn view() -> KenBurnsView<Pic> {
    KenBurnsView::with_seed(Vector2::new(800.0, 600.0), KenBurnsConfig::default(), 42)
}

fn observed_view() -> (KenBurnsView<Pic>, Rc<Recorder>) {
    let mut view = view();
    let recorder = Rc::new(Recorder::default());
    view.set_delegate(&recorder);
    (view, recorder)
}

fn pics(n: usize) -> Vec<Pic> {
    (0..n).map(|i| pic(400.0 + i as f32, 300.0)).collect()
}

use Event::{Finished, Showing};

#[test]
fn three_images_show_in_order_then_finish_once() {
    let (mut view, recorder) = observed_view();
    view.animate_with_images(pics(3), 1.0, false, true).unwrap();
    assert_eq!(recorder.events(), [Showing(0)]);
    assert_eq!(view.state(), KenBurnsState::Animating { index: 0 });

    for _ in 0..3 {
        view.update(1.0);
    }
    assert_eq!(
        recorder.events(),
        [Showing(0), Showing(1), Showing(2), Finished]
    );
    assert_eq!(view.state(), KenBurnsState::Idle);

    for _ in 0..10 {
        view.update(1.0);
    }
    assert_eq!(recorder.finished_count(), 1);
    // The last image stays on screen
    assert_eq!(view.current_index(), Some(2));
}

#[test]
fn looping_pair_alternates_until_stopped() {
    let (mut view, recorder) = observed_view();
    view.animate_with_images(pics(2), 1.0, true, true).unwrap();
    for _ in 0..5 {
        view.update(1.0);
    }
    assert_eq!(
        recorder.events(),
        [Showing(0), Showing(1), Showing(0), Showing(1), Showing(0), Showing(1)]
    );

    view.stop_animation();
    assert!(!view.is_animating());
    let frozen: Vec<_> = view.layers().map(|s| s.placement()).collect();

    for _ in 0..5 {
        view.update(1.0);
    }
    assert_eq!(recorder.events().len(), 6);
    assert_eq!(recorder.finished_count(), 0);
    // Stop leaves the last image in place, motionless
    let after: Vec<_> = view.layers().map(|s| s.placement()).collect();
    assert_eq!(frozen, after);
    assert_eq!(view.current_index(), Some(1));
}

#[test]
fn empty_sources_are_noops() {
    let (mut view, recorder) = observed_view();
    view.animate_with_images(Vec::new(), 1.0, true, true).unwrap();
    view.animate_with_image_paths(Vec::new(), 1.0, false, true).unwrap();
    let album: Rc<dyn KenBurnsDatasource<Pic>> = Rc::new(Album::new(Vec::new()));
    view.start_animation_with_datasource(&album, 1.0, false, true)
        .unwrap();

    view.update(5.0);
    assert!(recorder.events().is_empty());
    assert_eq!(view.state(), KenBurnsState::Idle);
    assert_eq!(view.layers().count(), 0);
}

#[test]
fn empty_start_leaves_a_running_animation_alone() {
    let (mut view, recorder) = observed_view();
    let album: Rc<dyn KenBurnsDatasource<Pic>> = Rc::new(Album::new(vec![
        Some(pic(100.0, 100.0)),
        Some(pic(200.0, 100.0)),
    ]));
    view.start_animation_with_datasource(&album, 1.0, true, true)
        .unwrap();

    view.animate_with_images(Vec::new(), 1.0, false, true).unwrap();
    let empty: Rc<dyn KenBurnsDatasource<Pic>> = Rc::new(Album::new(Vec::new()));
    view.start_animation_with_datasource(&empty, 1.0, false, true)
        .unwrap();

    assert!(view.is_animating());
    let active = view.datasource().expect("datasource still set");
    assert_eq!(active.number_of_images(), 2);

    view.update(1.0);
    assert_eq!(recorder.events(), [Showing(0), Showing(1)]);
}

#[test]
fn datasource_handle_follows_the_active_source() {
    let mut view = view();
    let album: Rc<dyn KenBurnsDatasource<Pic>> = Rc::new(Album::new(vec![Some(pic(100.0, 100.0))]));

    view.start_animation_with_datasource(&album, 1.0, true, true)
        .unwrap();
    assert!(view.datasource().is_some());
    view.animate_with_images(pics(1), 1.0, true, true).unwrap();
    assert!(view.datasource().is_none());

    view.start_animation_with_datasource(&album, 1.0, true, true)
        .unwrap();
    view.animate_with_image_paths(vec![PathBuf::from("10x10.png")], 1.0, true, true)
        .unwrap();
    assert!(view.datasource().is_none());

    view.start_animation_with_datasource(&album, 1.0, true, true)
        .unwrap();
    view.clear();
    assert!(view.datasource().is_none());
}

#[test]
fn invalid_durations_are_rejected_without_side_effects() {
    let (mut view, recorder) = observed_view();
    let album = Rc::new(Album::new(vec![Some(pic(100.0, 100.0))]));
    let source: Rc<dyn KenBurnsDatasource<Pic>> = album.clone();

    for duration in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        let err = view.animate_with_images(pics(2), duration, false, true).unwrap_err();
        assert!(matches!(err, KenBurnsError::InvalidDuration(_)));

        let err = view
            .animate_with_image_paths(vec![PathBuf::from("10x10.png")], duration, false, true)
            .unwrap_err();
        assert!(matches!(err, KenBurnsError::InvalidDuration(_)));

        let err = view
            .start_animation_with_datasource(&source, duration, false, true)
            .unwrap_err();
        assert!(matches!(err, KenBurnsError::InvalidDuration(_)));
    }

    assert!(recorder.events().is_empty());
    assert_eq!(view.state(), KenBurnsState::Idle);
    assert!(view.datasource().is_none());
    assert_eq!(album.counted.get(), 0);
    assert!(album.requested.borrow().is_empty());
}

#[test]
fn tiny_durations_advance_at_most_one_pass_per_tick() {
    let (mut view, recorder) = observed_view();
    view.animate_with_images(pics(2), 1e-9, true, true).unwrap();

    view.update(1.0);
    assert_eq!(recorder.events(), [Showing(0), Showing(1), Showing(0)]);
    assert!(view.is_animating());

    view.update(1.0 / 60.0);
    assert_eq!(recorder.events().len(), 5);
    assert!(view.is_animating());
}

#[test]
fn a_stalled_frame_still_finishes_a_non_looping_run() {
    let (mut view, recorder) = observed_view();
    view.animate_with_images(pics(3), 0.5, false, true).unwrap();
    view.update(600.0);
    assert_eq!(
        recorder.events(),
        [Showing(0), Showing(1), Showing(2), Finished]
    );
    assert_eq!(view.state(), KenBurnsState::Idle);
}

#[test]
fn stop_then_clear_removes_everything_and_restart_begins_at_zero() {
    let (mut view, recorder) = observed_view();
    view.animate_with_images(pics(3), 1.0, false, true).unwrap();
    view.update(1.0);
    assert_eq!(view.current_index(), Some(1));

    view.stop_animation();
    view.clear();
    assert_eq!(view.layers().count(), 0);
    assert_eq!(view.current_index(), None);
    assert_eq!(view.image_count(), 0);

    view.update(3.0);
    assert_eq!(recorder.events(), [Showing(0), Showing(1)]);

    view.animate_with_images(pics(3), 1.0, false, true).unwrap();
    assert_eq!(view.current_index(), Some(0));
    assert_eq!(recorder.events().last(), Some(&Showing(0)));
}

#[test]
fn restart_supersedes_and_crossfades_over_the_old_image() {
    let (mut view, recorder) = observed_view();
    view.animate_with_images(pics(3), 2.0, true, true).unwrap();
    view.update(2.0);
    assert_eq!(view.current_index(), Some(1));
    view.update(1.5);

    view.animate_with_images(pics(2), 1.0, false, true).unwrap();
    assert_eq!(view.state(), KenBurnsState::Animating { index: 0 });
    assert_eq!(view.image_count(), 2);
    assert_eq!(view.layers().count(), 2);

    view.update(1.0);
    view.update(1.0);
    assert_eq!(
        recorder.events(),
        [Showing(0), Showing(1), Showing(0), Showing(1), Finished]
    );
}

#[test]
fn next_image_fades_in_over_the_previous_one() {
    let (mut view, _recorder) = observed_view();
    view.animate_with_images(pics(2), 4.0, false, true).unwrap();
    view.update(4.0);

    let indices: Vec<_> = view.layers().map(|s| s.index()).collect();
    assert_eq!(indices, [0, 1]);
    assert_eq!(view.layers().last().unwrap().alpha(), 0.0);

    view.update(0.5);
    assert_eq!(view.layers().count(), 2);
    let alpha = view.layers().last().unwrap().alpha();
    assert!(alpha > 0.0 && alpha < 1.0);

    view.update(0.6);
    let indices: Vec<_> = view.layers().map(|s| s.index()).collect();
    assert_eq!(indices, [1]);
}

#[test]
fn a_long_tick_presents_every_image_it_spans() {
    let (mut view, recorder) = observed_view();
    view.animate_with_images(pics(3), 1.0, false, true).unwrap();
    view.update(2.5);
    assert_eq!(recorder.events(), [Showing(0), Showing(1), Showing(2)]);
    view.update(0.5);
    assert_eq!(recorder.events().last(), Some(&Finished));
}

#[test]
fn paths_are_loaded_on_demand_and_failures_skipped() {
    let (mut view, recorder) = observed_view();
    let paths: Vec<PathBuf> = ["400x300.jpg", "broken.jpg", "640x480.png"]
        .iter()
        .map(PathBuf::from)
        .collect();
    view.animate_with_image_paths(paths, 1.0, false, true).unwrap();
    view.update(1.0);
    view.update(1.0);

    assert_eq!(recorder.events(), [Showing(0), Showing(2), Finished]);
    assert_eq!(view.layers().last().unwrap().image(), &pic(640.0, 480.0));
}

#[test]
fn datasource_is_queried_lazily() {
    let (mut view, recorder) = observed_view();
    let album = Rc::new(Album::new(vec![
        Some(pic(100.0, 100.0)),
        None,
        Some(pic(300.0, 200.0)),
    ]));
    let source: Rc<dyn KenBurnsDatasource<Pic>> = album.clone();

    view.start_animation_with_datasource(&source, 1.0, true, true)
        .unwrap();
    assert_eq!(*album.requested.borrow(), [0]);
    assert_eq!(album.counted.get(), 1);
    assert!(view.datasource().is_some());

    view.update(1.0);
    view.update(1.0);
    assert_eq!(*album.requested.borrow(), [0, 1, 2, 0]);
    assert_eq!(album.counted.get(), 1);
    assert_eq!(recorder.events(), [Showing(0), Showing(2), Showing(0)]);
}

#[test]
fn dropped_datasource_ends_the_run() {
    let (mut view, recorder) = observed_view();
    let album: Rc<dyn KenBurnsDatasource<Pic>> = Rc::new(Album::new(vec![
        Some(pic(100.0, 100.0)),
        Some(pic(100.0, 100.0)),
    ]));
    view.start_animation_with_datasource(&album, 1.0, true, true)
        .unwrap();
    drop(album);

    assert!(view.datasource().is_none());
    view.update(1.0);
    assert_eq!(recorder.events(), [Showing(0), Finished]);
    assert!(!view.is_animating());
}

#[test]
fn dropped_delegate_is_ignored() {
    let (mut view, recorder) = observed_view();
    drop(recorder);
    view.animate_with_images(pics(2), 1.0, false, true).unwrap();
    view.update(1.0);
    view.update(1.0);
    assert_eq!(view.state(), KenBurnsState::Idle);
}

#[test]
fn orientation_decides_which_way_the_frame_runs() {
    let mut view = view();
    view.animate_with_images(vec![pic(400.0, 300.0)], 1.0, false, true)
        .unwrap();
    let landscape = *view.layers().last().unwrap().motion();
    assert!((landscape.size.x - 880.0).abs() < 1e-2);
    assert!((landscape.size.y - 660.0).abs() < 1e-2);

    view.animate_with_images(vec![pic(400.0, 300.0)], 1.0, false, false)
        .unwrap();
    let portrait = *view.layers().last().unwrap().motion();
    assert!((portrait.size.y - 880.0).abs() < 1e-2);
    assert!(portrait.size.x > 800.0 * 1.1);
    assert!(!view.is_landscape());
}

#[test]
fn motion_outlasts_the_slot() {
    let mut view = view();
    view.animate_with_images(pics(1), 3.0, false, true).unwrap();
    let motion = *view.layers().last().unwrap().motion();
    assert_eq!(motion.duration, 3.0 + view.config().motion_overrun);
}

#[test]
fn same_seed_same_motions() {
    let corners = |seed| {
        let mut view = KenBurnsView::with_seed(Vector2::new(800.0, 600.0), KenBurnsConfig::default(), seed);
        view.animate_with_images(pics(4), 1.0, false, true).unwrap();
        let mut corners = Vec::new();
        for _ in 0..4 {
            corners.push(view.layers().last().unwrap().motion().corner);
            view.update(1.0);
        }
        corners
    };
    assert_eq!(corners(9), corners(9));
}

proptest! {
    #[test]
    fn non_looping_runs_finish_exactly_once(count in 1usize..8, extra in 0usize..5) {
        let (mut view, recorder) = observed_view();
        view.animate_with_images(pics(count), 0.5, false, true).unwrap();
        for _ in 0..count + extra {
            view.update(0.5);
        }

        let mut expected: Vec<Event> = (0..count).map(Showing).collect();
        expected.push(Finished);
        prop_assert_eq!(recorder.events(), expected);
    }

    #[test]
    fn looping_runs_cycle_through_indices(count in 1usize..6, steps in 0usize..30) {
        let (mut view, recorder) = observed_view();
        view.animate_with_images(pics(count), 0.25, true, true).unwrap();
        for _ in 0..steps {
            view.update(0.25);
        }

        let expected: Vec<Event> = (0..=steps).map(|i| Showing(i % count)).collect();
        prop_assert_eq!(recorder.events(), expected);
        prop_assert!(view.is_animating());
    }
}
