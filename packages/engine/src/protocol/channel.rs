//! Native worker: a boundary running on its own thread
//!
//! Commands and responses travel over ordered channels, the same shape the
//! browser build gets from `postMessage` to a web worker.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use super::boundary::ExecutionBoundary;
use super::messages::{Command, Response};
use crate::core::{KernelError, KernelResult};

pub struct WorkerHandle {
    tx: Option<mpsc::Sender<Command>>,
    rx: mpsc::Receiver<Response>,
    handle: Option<thread::JoinHandle<()>>,
}

/// Move `boundary` onto a dedicated thread
pub fn spawn_worker(boundary: ExecutionBoundary) -> std::io::Result<WorkerHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    let (resp_tx, resp_rx) = mpsc::channel::<Response>();

    let handle = thread::Builder::new()
        .name("sandbox-kernel-worker".into())
        .spawn(move || {
            let mut boundary = boundary;
            while let Ok(command) = cmd_rx.recv() {
                if let Some(response) = boundary.handle(command) {
                    if resp_tx.send(response).is_err() {
                        break;
                    }
                }
            }
            log::debug!("kernel worker stopped");
        })?;

    Ok(WorkerHandle {
        tx: Some(cmd_tx),
        rx: resp_rx,
        handle: Some(handle),
    })
}

impl WorkerHandle {
    pub fn send(&self, command: Command) -> KernelResult<()> {
        let tx = self.tx.as_ref().ok_or(KernelError::WorkerStopped)?;
        tx.send(command).map_err(|_| KernelError::WorkerStopped)
    }

    /// Next response, blocking. `None` once the worker is gone.
    pub fn recv(&self) -> Option<Response> {
        self.rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<Response> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Send a command that always answers and wait for its response
    pub fn request(&self, command: Command) -> KernelResult<Response> {
        self.send(command)?;
        self.recv().ok_or(KernelError::WorkerStopped)
    }

    /// Close the command channel and wait for the worker to finish
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("kernel worker thread panicked");
            }
        }
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
