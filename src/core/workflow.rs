use crate::domain::model::{LookupRequest, LookupState};
use crate::domain::ports::BreachProvider;
use crate::utils::validation::validate_email;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// Drives one email at a time through a [`BreachProvider`] and owns the
/// resulting [`LookupState`].
///
/// Every `submit` and `clear` takes a new generation. A lookup that finishes
/// after a newer generation was taken is discarded, so a late response can
/// never overwrite a newer request or a cleared result.
pub struct LookupWorkflow<P: BreachProvider> {
    provider: P,
    state: watch::Sender<LookupState>,
    generation: AtomicU64,
}

impl<P: BreachProvider> LookupWorkflow<P> {
    pub fn new(provider: P) -> Self {
        let (state, _) = watch::channel(LookupState::Idle);
        Self {
            provider,
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn state(&self) -> LookupState {
        self.state.borrow().clone()
    }

    pub fn is_pending(&self) -> bool {
        self.state.borrow().is_pending()
    }

    /// Read-only view for a rendering layer.
    pub fn subscribe(&self) -> watch::Receiver<LookupState> {
        self.state.subscribe()
    }

    /// Looks up `email` and returns the terminal state it produced.
    ///
    /// If the lookup was superseded by a later `submit` or `clear`, its
    /// outcome is dropped and the current state is returned instead. If the
    /// returned future is dropped before it finishes, the workflow goes back
    /// to `Idle`.
    pub async fn submit(&self, email: &str) -> LookupState {
        let request = LookupRequest::new(email);
        let in_flight = InFlight::start(self);
        let generation = in_flight.generation;
        tracing::debug!(generation, "Lookup started");

        let outcome = match validate_email(&request.email) {
            Ok(()) => match self.provider.breached_account(&request.email).await {
                Ok(breaches) => {
                    tracing::info!("Lookup finished: {} breaches", breaches.len());
                    LookupState::Succeeded(breaches)
                }
                Err(e) => {
                    tracing::warn!(
                        "Lookup failed: {} (category: {:?}, suggestion: {})",
                        e,
                        e.category(),
                        e.recovery_suggestion()
                    );
                    LookupState::Failed(e.user_message())
                }
            },
            Err(e) => {
                tracing::debug!("Rejected before lookup: {}", e);
                LookupState::Failed(e.user_message())
            }
        };

        if in_flight.finish(outcome) {
            tracing::debug!(generation, "Lookup applied");
        } else {
            tracing::debug!(generation, "Discarding stale lookup result");
        }
        self.state()
    }

    /// Back to `Idle`; any lookup still in flight is abandoned.
    pub fn clear(&self) -> LookupState {
        let generation = self.begin(LookupState::Idle);
        tracing::debug!(generation, "Lookup state cleared");
        LookupState::Idle
    }

    // Generation bumps and state writes share the watch lock, so the
    // compare in `complete` cannot interleave with a newer `begin`.
    fn begin(&self, initial: LookupState) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = initial;
        });
        generation
    }

    fn complete(&self, generation: u64, outcome: LookupState) -> bool {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *state = outcome;
            true
        })
    }
}

/// Owns the `Pending` state of one `submit`. Dropped unfinished (the future
/// was cancelled), it settles its generation back to `Idle`.
struct InFlight<'a, P: BreachProvider> {
    workflow: &'a LookupWorkflow<P>,
    generation: u64,
    finished: bool,
}

impl<'a, P: BreachProvider> InFlight<'a, P> {
    fn start(workflow: &'a LookupWorkflow<P>) -> Self {
        Self {
            workflow,
            generation: workflow.begin(LookupState::Pending),
            finished: false,
        }
    }

    fn finish(mut self, outcome: LookupState) -> bool {
        self.finished = true;
        self.workflow.complete(self.generation, outcome)
    }
}

impl<P: BreachProvider> Drop for InFlight<'_, P> {
    fn drop(&mut self) {
        if !self.finished && self.workflow.complete(self.generation, LookupState::Idle) {
            tracing::debug!(generation = self.generation, "Lookup cancelled");
        }
    }
}
