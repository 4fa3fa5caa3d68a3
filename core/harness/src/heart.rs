//! Structures to keep the process alive until some event occurs

use futures::{
    channel::mpsc::{channel, Receiver, Sender},
    pin_mut,
    prelude::*,
    select,
};
use std::fmt;
use tokio::signal::ctrl_c;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{debug, error, warn};

/// Reason why the heart stopped beating
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeathReason {
    /// Internal kill signal has been sent
    Killed(String),
    /// SIGINT, SIGTERM or other process-external cause
    Terminated,
}

impl fmt::Display for DeathReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeathReason::Killed(reason) => write!(f, "killed ({})", reason),
            DeathReason::Terminated => write!(f, "terminated due to external signal"),
        }
    }
}

/// Lifecycle management struct that can be used to keep the application alive
pub struct Heart {
    rx: Receiver<String>,
    // Keeps the channel open when no stone has been handed out
    _stone: Option<HeartStone>,
}

impl Heart {
    /// Creates a new heart and linked stone which can kill it
    pub fn new() -> (Self, HeartStone) {
        let (tx, rx) = channel(1);
        let stone = HeartStone { remote: tx };

        (Self { rx, _stone: None }, stone)
    }

    /// Creates a new heart which only dies from external signals
    pub fn without_heart_stone() -> Self {
        let (mut heart, stone) = Heart::new();
        heart._stone = Some(stone);
        heart
    }

    /// Waits until the heart dies and returns the reason
    pub async fn death(&mut self) -> DeathReason {
        debug!("Heart starts beating");

        let termination = Heart::termination_signal().fuse();
        pin_mut!(termination);

        loop {
            select! {
                reason = self.rx.next() => match reason {
                    Some(reason) => return DeathReason::Killed(reason),
                    // All stones are gone, only external signals remain
                    None => {
                        (&mut termination).await;
                        return DeathReason::Terminated;
                    }
                },
                () = termination => return DeathReason::Terminated,
            }
        }
    }

    async fn termination_signal() {
        let ctrl_c = ctrl_c().fuse();
        pin_mut!(ctrl_c);

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                let sigterm = sigterm.recv().fuse();
                pin_mut!(sigterm);

                select! {
                    _ = sigterm => {},
                    _ = ctrl_c => {},
                }
            }
            Err(e) => {
                warn!(error = %e, "Unable to listen for SIGTERM, falling back to Ctrl-C only");

                if let Err(e) = ctrl_c.await {
                    error!(error = %e, "Unable to listen for Ctrl-C");
                    futures::future::pending::<()>().await;
                }
            }
        }
    }
}

/// Remote controller for the heart
#[derive(Clone)]
pub struct HeartStone {
    remote: Sender<String>,
}

impl HeartStone {
    /// Kill the associated heart
    pub async fn kill(&mut self, reason: String) {
        if let Err(e) = self.remote.send(reason).await {
            error!(error = %e, "Failed to interact with Heart");
        }
    }
}
