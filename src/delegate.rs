/// Receives lifecycle notifications from a [`KenBurnsView`](crate::KenBurnsView).
///
/// Both methods default to no-ops, implement only what you need. Callbacks run
/// synchronously from inside `animate_*`/`update`, so implementations should
/// keep their own state behind `Cell`/`RefCell`.
pub trait KenBurnsDelegate {
    /// Image `index` just became the current image.
    fn did_show_image(&self, _index: usize) {}

    /// The last image's slot elapsed on a non-looping run.
    fn did_finish_all_animations(&self) {}
}
