use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use reel_core::Feature;
use reel_logging::reel_debug;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio_util::sync::CancellationToken;

/// Effects buffered per subscriber before it starts lagging.
const EFFECT_CAPACITY: usize = 64;

type Job<F> = Box<dyn FnOnce(IntentContext<F>) -> BoxFuture<'static, ()> + Send>;

struct Queued<F: Feature> {
    job: Job<F>,
    done: oneshot::Sender<()>,
}

struct Shared<F: Feature> {
    name: &'static str,
    state: watch::Sender<F::State>,
    effects: broadcast::Sender<F::Effect>,
    cancel: CancellationToken,
}

/// Owns one feature's state and runs its intents one at a time.
///
/// Intents are queued and executed by a single consumer task, so the
/// reduces of two intents never interleave. State is published as a
/// latest-value stream; effects go only to receivers subscribed when they
/// are emitted.
pub struct StateContainer<F: Feature> {
    shared: Arc<Shared<F>>,
    queue: mpsc::UnboundedSender<Queued<F>>,
}

impl<F: Feature> Clone for StateContainer<F> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
            queue: self.queue.clone(),
        }
    }
}

impl<F: Feature + 'static> StateContainer<F> {
    /// Must be called inside a tokio runtime; spawns the intent queue.
    pub fn new(name: &'static str, initial: F::State) -> Self {
        let (state, _) = watch::channel(initial);
        let (effects, _) = broadcast::channel(EFFECT_CAPACITY);
        let shared = Arc::new(Shared {
            name,
            state,
            effects,
            cancel: CancellationToken::new(),
        });
        let (queue, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_queue(shared.clone(), rx));
        Self { shared, queue }
    }

    /// Queues an intent handler behind every intent dispatched before it.
    pub fn dispatch<H, Fut>(&self, handler: H) -> Dispatched
    where
        H: FnOnce(IntentContext<F>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (done, completion) = oneshot::channel();
        let job: Job<F> = Box::new(move |ctx| -> BoxFuture<'static, ()> { Box::pin(handler(ctx)) });
        if self.queue.send(Queued { job, done }).is_err() {
            reel_debug!("{}: intent dropped after teardown", self.shared.name);
        }
        Dispatched { completion }
    }

    /// Intent that applies a single message.
    pub fn apply(&self, msg: F::Msg) -> Dispatched {
        self.dispatch(move |ctx| async move { ctx.apply(msg) })
    }

    pub fn current_state(&self) -> F::State {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<F::State> {
        self.shared.state.subscribe()
    }

    pub fn subscribe_effects(&self) -> broadcast::Receiver<F::Effect> {
        self.shared.effects.subscribe()
    }

    /// Token cancelled on teardown, for tasks owned by this feature.
    pub fn cancellation(&self) -> CancellationToken {
        self.shared.cancel.child_token()
    }

    /// Cancels the running intent and drops queued ones. Later reduces and
    /// effects are ignored.
    pub fn teardown(&self) {
        reel_debug!("{}: teardown", self.shared.name);
        self.shared.cancel.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.shared.cancel.is_cancelled()
    }
}

/// Completion of a dispatched intent.
pub struct Dispatched {
    completion: oneshot::Receiver<()>,
}

impl Dispatched {
    /// `true` once the handler ran to the end; `false` if it was cancelled
    /// or never ran.
    pub async fn completed(self) -> bool {
        self.completion.await.is_ok()
    }
}

/// Handle given to an intent handler.
pub struct IntentContext<F: Feature> {
    shared: Arc<Shared<F>>,
}

impl<F: Feature> Clone for IntentContext<F> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<F: Feature> IntentContext<F> {
    pub fn state(&self) -> F::State {
        self.shared.state.borrow().clone()
    }

    pub fn is_active(&self) -> bool {
        !self.shared.cancel.is_cancelled()
    }

    /// Replaces the state with `reducer(state)`. The reducer runs outside
    /// the state lock, so it may read `self.state()`; the single intent
    /// queue keeps the read and the write together.
    pub fn reduce(&self, reducer: impl FnOnce(F::State) -> F::State) {
        if !self.is_active() {
            return;
        }
        let next = reducer(self.state());
        self.shared.state.send_replace(next);
    }

    /// Sends an effect to current subscribers; dropped when there are none.
    pub fn emit(&self, effect: F::Effect) {
        if !self.is_active() {
            return;
        }
        let _ = self.shared.effects.send(effect);
    }

    /// Reduces with `F::update`, then emits its effects in order.
    pub fn apply(&self, msg: F::Msg) {
        if !self.is_active() {
            return;
        }
        let (next, effects) = F::update(self.state(), msg);
        self.shared.state.send_replace(next);
        for effect in effects {
            self.emit(effect);
        }
    }
}

async fn run_queue<F: Feature>(shared: Arc<Shared<F>>, mut rx: mpsc::UnboundedReceiver<Queued<F>>) {
    loop {
        let queued = tokio::select! {
            biased;
            _ = shared.cancel.cancelled() => break,
            next = rx.recv() => match next {
                Some(queued) => queued,
                None => break,
            },
        };

        let ctx = IntentContext {
            shared: shared.clone(),
        };
        let finished = tokio::select! {
            biased;
            _ = shared.cancel.cancelled() => false,
            _ = (queued.job)(ctx) => true,
        };
        if !finished {
            break;
        }
        let _ = queued.done.send(());
    }
    reel_debug!("{}: intent queue closed", shared.name);
}
