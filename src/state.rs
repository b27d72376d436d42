#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum KenBurnsState {
    #[default]
    Idle,                         // Nothing scheduled, layers (if any) stay where they are
    Animating { index: usize },   // `index` is the current image, its slot is running
}

impl KenBurnsState {
    pub fn index(&self) -> Option<usize> {
        match self {
            KenBurnsState::Idle => None,
            KenBurnsState::Animating { index } => Some(*index),
        }
    }
}
