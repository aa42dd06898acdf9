/// A screen's state machine: state, messages, one-shot effects, and the
/// pure transition between them.
pub trait Feature {
    type State: Clone + Send + Sync + 'static;
    type Msg: Send + 'static;
    type Effect: Clone + Send + 'static;

    /// Applies a message to state and returns the effects to emit, in order.
    fn update(state: Self::State, msg: Self::Msg) -> (Self::State, Vec<Self::Effect>);
}

/// Coarse phase of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenPhase {
    #[default]
    Loading,
    Ready,
    Error,
}
