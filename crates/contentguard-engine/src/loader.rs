//! Single-flight classifier loading
//!
//! Classifier initialization is slow and can fail. The loader runs it lazily,
//! at most once at a time, and hands every concurrent caller the same result:
//!
//! ```text
//! Unloaded ──get()──→ Loading ──ok──→ Ready
//!    ↑                   │
//!    └────err/timeout────┘        reset(): any state → Unloaded
//! ```
//!
//! The in-flight load is a shared future. Every waiter polls it, so the load
//! keeps making progress as long as anyone is waiting, and a caller that gives
//! up does not strand the others.

use contentguard_core::{BoxError, LoadError};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Default initialization budget
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

type LoadResult<C> = Result<Arc<C>, LoadError>;
type InFlight<C> = Shared<BoxFuture<'static, LoadResult<C>>>;
type Factory<C> = Arc<dyn Fn() -> BoxFuture<'static, Result<C, BoxError>> + Send + Sync>;

/// Observable loader state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    Unloaded,
    Loading,
    Ready,
}

enum Slot<C> {
    Unloaded,
    Loading { generation: u64, load: InFlight<C> },
    Ready(Arc<C>),
}

struct Inner<C> {
    slot: Slot<C>,
    /// Incremented for every load started; tags which load a result belongs to
    generation: u64,
}

/// Lazily initializes a classifier exactly once and shares it
pub struct ClassifierLoader<C> {
    factory: Factory<C>,
    timeout: Duration,
    inner: Mutex<Inner<C>>,
    attempts: AtomicU64,
}

impl<C: Send + Sync + 'static> ClassifierLoader<C> {
    /// Create a loader around a zero-argument async factory
    pub fn new<F, Fut, E>(factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<C, E>> + Send + 'static,
        E: Into<BoxError>,
    {
        let factory: Factory<C> =
            Arc::new(move || factory().map(|r| r.map_err(Into::into)).boxed());

        Self {
            factory,
            timeout: DEFAULT_LOAD_TIMEOUT,
            inner: Mutex::new(Inner {
                slot: Slot::Unloaded,
                generation: 0,
            }),
            attempts: AtomicU64::new(0),
        }
    }

    /// Set the initialization timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the classifier, loading it if necessary.
    ///
    /// Concurrent callers share one in-flight load and all receive its
    /// result, success or failure.
    pub async fn get(&self) -> Result<Arc<C>, LoadError> {
        let (generation, load) = {
            let mut inner = self.lock();
            match &inner.slot {
                Slot::Ready(classifier) => return Ok(classifier.clone()),
                Slot::Loading { generation, load } => (*generation, load.clone()),
                Slot::Unloaded => {
                    inner.generation += 1;
                    let generation = inner.generation;
                    let load = self.start_load(generation);
                    inner.slot = Slot::Loading {
                        generation,
                        load: load.clone(),
                    };
                    (generation, load)
                }
            }
        };

        let result = load.await;
        self.settle(generation, &result);
        result
    }

    /// Whether a classifier is ready
    pub fn is_loaded(&self) -> bool {
        matches!(self.lock().slot, Slot::Ready(_))
    }

    /// Current state
    pub fn state(&self) -> LoaderState {
        match self.lock().slot {
            Slot::Unloaded => LoaderState::Unloaded,
            Slot::Loading { .. } => LoaderState::Loading,
            Slot::Ready(_) => LoaderState::Ready,
        }
    }

    /// Drop the cached classifier.
    ///
    /// An in-flight load is not aborted; its waiters still get its result, but
    /// the classifier is not cached.
    pub fn reset(&self) {
        self.lock().slot = Slot::Unloaded;
        info!("Classifier cache cleared");
    }

    /// Number of times the factory has been invoked
    pub fn load_attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Get the initialization timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn lock(&self) -> MutexGuard<'_, Inner<C>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start_load(&self, generation: u64) -> InFlight<C> {
        self.attempts.fetch_add(1, Ordering::Relaxed);

        let load = (self.factory)();
        let timeout = self.timeout;

        async move {
            info!(generation, "Loading classifier");
            let start = Instant::now();

            let result = match tokio::time::timeout(timeout, load).await {
                Ok(Ok(classifier)) => Ok(Arc::new(classifier)),
                Ok(Err(e)) => Err(LoadError::Failed(e.to_string())),
                Err(_) => Err(LoadError::TimedOut(timeout)),
            };

            match &result {
                Ok(_) => info!(
                    generation,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Classifier loaded"
                ),
                Err(e) => warn!(generation, error = %e, "Classifier load failed"),
            }
            result
        }
        .boxed()
        .shared()
    }

    /// Record the outcome of load `generation`, unless it was reset or superseded
    fn settle(&self, generation: u64, result: &LoadResult<C>) {
        let mut inner = self.lock();

        let current = matches!(
            &inner.slot,
            Slot::Loading { generation: g, .. } if *g == generation
        );
        if !current {
            return;
        }

        inner.slot = match result {
            Ok(classifier) => Slot::Ready(classifier.clone()),
            Err(_) => Slot::Unloaded,
        };
    }
}
