use crate::controllers::progressive::config::{ConfigError, EngineConfig};
use crate::controllers::progressive::errors::SubmitError;
use crate::controllers::progressive::pass_set::{PassSetOutcome, run_pass_set};
use crate::controllers::progressive::ports::ImageSink;
use crate::core::actions::interruption::Interruption;
use crate::core::colour_table::ColourTable;
use crate::core::data::render_request::RenderRequest;
use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

const WORKER_THREAD_NAME: &str = "progressive-render";

/// The pending request. Guarded by `SharedState::control`, never held across
/// pixel computation.
struct ControlState {
    request: Option<RenderRequest>,
}

/// State shared between the engine handle and its worker.
///
/// `restart` and `abort` are only written while `control` is held, so the
/// condvar predicate sees them consistently. The per-row interruption poll
/// reads them without taking the lock.
struct SharedState {
    control: Mutex<ControlState>,
    wake: Condvar,
    /// A newer request is waiting; the current pass-set must be abandoned.
    restart: AtomicBool,
    /// Set once by shutdown and never cleared.
    abort: AtomicBool,
    config: EngineConfig,
    colour_table: ColourTable,
    sink: Arc<dyn ImageSink>,
}

impl SharedState {
    fn lock_control(&self) -> MutexGuard<'_, ControlState> {
        // plain data, nothing a panicking holder could leave half-written
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_aborted(&self) -> bool {
        self.abort.load(Ordering::Acquire)
    }

    fn is_restart_pending(&self) -> bool {
        self.restart.load(Ordering::Acquire)
    }

    fn pending_interruption(&self) -> Option<Interruption> {
        if self.is_aborted() {
            Some(Interruption::Abort)
        } else if self.is_restart_pending() {
            Some(Interruption::Restart)
        } else {
            None
        }
    }
}

/// Renders the most recently submitted viewport on a background thread,
/// emitting an image after each refinement pass.
///
/// The worker thread is started by the first [`submit`](Self::submit) and runs
/// until [`shutdown`](Self::shutdown) (or drop). Submissions never wait for
/// rendering: they overwrite the pending request and flag a restart, which the
/// worker notices before its next row.
pub struct ProgressiveRenderEngine {
    shared: Arc<SharedState>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl ProgressiveRenderEngine {
    pub fn new(sink: Arc<dyn ImageSink>) -> Result<Self, ConfigError> {
        Self::with_config(EngineConfig::default(), sink)
    }

    pub fn with_config(config: EngineConfig, sink: Arc<dyn ImageSink>) -> Result<Self, ConfigError> {
        config.validate()?;
        let colour_table = ColourTable::build(config.colour_table_size)?;

        let shared = Arc::new(SharedState {
            control: Mutex::new(ControlState { request: None }),
            wake: Condvar::new(),
            restart: AtomicBool::new(false),
            abort: AtomicBool::new(false),
            config,
            colour_table,
            sink,
        });

        Ok(Self {
            shared,
            worker: Mutex::new(None),
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.shared.config
    }

    #[must_use]
    pub fn colour_table(&self) -> &ColourTable {
        &self.shared.colour_table
    }

    /// Validates the viewport and submits it.
    pub fn submit_viewport(
        &self,
        centre_x: f64,
        centre_y: f64,
        scale: f64,
        width: u32,
        height: u32,
    ) -> Result<(), SubmitError> {
        let request = RenderRequest::new(centre_x, centre_y, scale, width, height)?;
        self.submit(request)
    }

    /// Makes `request` the one the worker renders next.
    ///
    /// Starts the worker on first use. Requests arriving after shutdown has
    /// begun are ignored.
    pub fn submit(&self, request: RenderRequest) -> Result<(), SubmitError> {
        let mut worker = self.lock_worker();
        let needs_worker = worker.as_ref().is_none_or(JoinHandle::is_finished);

        {
            let mut control = self.shared.lock_control();

            if self.shared.is_aborted() {
                debug!("ignoring render request submitted after shutdown");
                return Ok(());
            }

            control.request = Some(request);

            if !needs_worker {
                self.shared.restart.store(true, Ordering::Release);
                self.shared.wake.notify_one();
                return Ok(());
            }

            self.shared.restart.store(false, Ordering::Release);
        }

        if let Some(finished) = worker.take() {
            warn!("render worker exited unexpectedly, starting a new one");
            reap(finished);
        }

        let worker_shared = Arc::clone(&self.shared);
        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || worker_loop(&worker_shared))
            .map_err(SubmitError::Spawn)?;

        *worker = Some(handle);
        Ok(())
    }

    /// Stops the worker and waits for it to exit.
    ///
    /// Safe to call before any submit, more than once, and from inside the
    /// image sink. Called from the sink it only flags the abort; the handle
    /// stays so a later call from another thread still joins.
    pub fn shutdown(&self) {
        {
            let _control = self.shared.lock_control();
            self.shared.abort.store(true, Ordering::Release);
        }
        self.shared.wake.notify_all();

        let mut worker = self.lock_worker();

        let on_worker_thread = worker
            .as_ref()
            .is_some_and(|handle| handle.thread().id() == thread::current().id());
        if on_worker_thread {
            warn!("shutdown requested from the render worker itself, not joining");
            return;
        }

        let Some(handle) = worker.take() else {
            return;
        };
        drop(worker);

        reap(handle);
        debug!("render worker joined");
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.lock_worker()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn lock_worker(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.worker.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for ProgressiveRenderEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn reap(handle: JoinHandle<()>) {
    if let Err(panic) = handle.join() {
        error!("render worker panicked: {:?}", panic);
    }
}

fn worker_loop(shared: &SharedState) {
    info!("render worker started");

    let interrupt = || shared.pending_interruption();
    let mut control = shared.lock_control();

    loop {
        if shared.is_aborted() {
            break;
        }

        let Some(request) = control.request else {
            control = shared
                .wake
                .wait(control)
                .unwrap_or_else(PoisonError::into_inner);
            continue;
        };

        // the snapshot has absorbed every restart requested so far
        shared.restart.store(false, Ordering::Release);
        drop(control);

        match run_pass_set(
            &request,
            &shared.config,
            &shared.colour_table,
            &interrupt,
            shared.sink.as_ref(),
        ) {
            PassSetOutcome::Completed { emitted } => {
                debug!("pass-set complete, {} images emitted", emitted);
            }
            PassSetOutcome::Restarted => debug!("newer request arrived, restarting"),
            PassSetOutcome::Aborted => break,
            PassSetOutcome::Failed(err) => {
                error!("render pass-set failed: {}", err);
                shared.sink.pass_set_failed(&err);
            }
        }

        control = shared.lock_control();
        while !shared.is_restart_pending() && !shared.is_aborted() {
            control = shared
                .wake
                .wait(control)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    info!("render worker exiting");
}
