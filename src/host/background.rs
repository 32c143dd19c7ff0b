use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};
use std::thread::JoinHandle;

use serde_json::Value;

use crate::engine::Engine;
use crate::foundation::error::ShorelineError;
use crate::host::message::{ControlMessage, ControlRequest, Handshake, Launch};
use crate::host::scheduler::FrameScheduler;
use crate::render::surface::DrawingSurface;

/// Why a background start did not produce a running host.
pub enum StartError<S: DrawingSurface> {
    /// The surface never left this thread; the launch can run in the foreground instead.
    Recoverable {
        /// Untouched inputs.
        launch: Launch<S>,
        /// What went wrong.
        reason: ShorelineError,
    },
    /// The render thread took the surface and died before acknowledging.
    Lost(ShorelineError),
}

/// Runs the engine on a dedicated render thread and talks to it over a channel.
///
/// Requests are applied between frames, in send order. Dropping the host stops the thread
/// and waits for it.
pub struct BackgroundHost<S: DrawingSurface + 'static> {
    tx: Option<mpsc::Sender<ControlMessage<S>>>,
    worker: Option<JoinHandle<Option<S>>>,
    stopped: bool,
}

impl<S: DrawingSurface + 'static> BackgroundHost<S> {
    /// Spawn the render thread, transfer the surface and wait for it to accept control.
    pub fn start(launch: Launch<S>) -> Result<Self, StartError<S>> {
        let (tx, rx) = mpsc::channel::<ControlMessage<S>>();
        let (ack_tx, ack_rx) = mpsc::sync_channel::<Handshake<S>>(1);

        let worker = match std::thread::Builder::new()
            .name("shoreline-render".to_owned())
            .spawn(move || render_thread(rx, ack_tx))
        {
            Ok(handle) => handle,
            Err(e) => {
                return Err(StartError::Recoverable {
                    launch,
                    reason: ShorelineError::initialization(format!(
                        "spawn render thread: {e}"
                    )),
                });
            }
        };

        if let Err(mpsc::SendError(msg)) = tx.send(ControlMessage::Init(launch)) {
            let _ = worker.join();
            return match msg {
                ControlMessage::Init(launch) => Err(StartError::Recoverable {
                    launch,
                    reason: ShorelineError::initialization("render thread exited before init"),
                }),
                ControlMessage::Request(_) => Err(StartError::Lost(
                    ShorelineError::initialization("render thread exited before init"),
                )),
            };
        }

        match ack_rx.recv() {
            Ok(Handshake::Ready) => {
                tracing::debug!("render thread accepted surface");
                Ok(Self {
                    tx: Some(tx),
                    worker: Some(worker),
                    stopped: false,
                })
            }
            Ok(Handshake::Rejected { launch, reason }) => {
                let _ = worker.join();
                Err(StartError::Recoverable { launch, reason })
            }
            Err(_) => {
                let _ = worker.join();
                Err(StartError::Lost(ShorelineError::initialization(
                    "render thread exited during handshake",
                )))
            }
        }
    }

    /// Queue a request for the render thread. Requests after `stop` are discarded.
    pub fn post(&mut self, request: ControlRequest) {
        if self.stopped {
            tracing::debug!(kind = request.kind(), "request after stop discarded");
            return;
        }
        if matches!(request, ControlRequest::Stop) {
            self.stopped = true;
        }
        let Some(tx) = self.tx.as_ref() else {
            return;
        };
        if tx.send(ControlMessage::Request(request)).is_err() {
            tracing::debug!("render thread already finished");
        }
    }

    /// Merge a partial config between frames.
    pub fn apply_config(&mut self, patch: Value) {
        self.post(ControlRequest::UpdateSettings { config: patch });
    }

    /// Resize the surface between frames.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.post(ControlRequest::Resize { width, height });
    }

    /// Ask the render thread to halt after its current frame.
    pub fn stop(&mut self) {
        self.post(ControlRequest::Stop);
    }

    /// Whether the render thread has exited.
    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait for the render thread to finish its schedule or a stop, and take the surface back.
    ///
    /// Blocks forever with an unbounded scheduler and no prior `stop`.
    pub fn join(mut self) -> Option<S> {
        self.wait()
    }

    fn wait(&mut self) -> Option<S> {
        let worker = self.worker.take()?;
        let surface = match worker.join() {
            Ok(surface) => surface,
            Err(_) => {
                tracing::error!("render thread panicked");
                None
            }
        };
        self.tx = None;
        surface
    }
}

impl<S: DrawingSurface + 'static> Drop for BackgroundHost<S> {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.stop();
            let _ = self.wait();
        }
    }
}

fn render_thread<S: DrawingSurface>(
    rx: Receiver<ControlMessage<S>>,
    ack: SyncSender<Handshake<S>>,
) -> Option<S> {
    let Ok(ControlMessage::Init(mut launch)) = rx.recv() else {
        tracing::warn!("render thread started without init");
        return None;
    };
    if let Err(reason) = launch.surface.transfer_control() {
        let _ = ack.send(Handshake::Rejected { launch, reason });
        return None;
    }

    let Launch {
        surface,
        settings,
        rng,
        scheduler,
    } = launch;
    let mut engine = Engine::new(surface, settings, rng);
    if ack.send(Handshake::Ready).is_err() {
        return Some(engine.into_surface());
    }

    frame_loop(&mut engine, &rx, scheduler);
    tracing::debug!(stats = ?engine.stats(), "render thread finished");
    Some(engine.into_surface())
}

fn frame_loop<S: DrawingSurface>(
    engine: &mut Engine<S>,
    rx: &Receiver<ControlMessage<S>>,
    mut scheduler: Box<dyn FrameScheduler>,
) {
    loop {
        loop {
            match rx.try_recv() {
                Ok(ControlMessage::Request(request)) => {
                    if !engine.handle(request) {
                        return;
                    }
                }
                Ok(ControlMessage::Init(_)) => tracing::warn!("duplicate init ignored"),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    engine.stop();
                    return;
                }
            }
        }
        if !scheduler.next_frame() {
            return;
        }
        engine.frame();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/background.rs"]
mod tests;
