//! Ctrl-C handling for commands that wait on the catalog or on stdin.
//!
//! Once tokio installs its SIGINT handler the default "terminate" action is
//! gone for the rest of the process, so a command that listens for Ctrl-C at
//! all must keep listening until it returns.

use std::fmt;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Conventional exit status for a SIGINT-terminated command.
pub const EXIT_INTERRUPTED: i32 = 130;

/// Error returned when the user pressed Ctrl-C.
#[derive(Debug)]
pub struct Interrupted;

impl fmt::Display for Interrupted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interrupted")
    }
}

impl std::error::Error for Interrupted {}

/// Ctrl-C listener that stays armed until dropped.
#[derive(Debug)]
pub struct Interrupt {
    fired: watch::Receiver<bool>,
    listener: Option<JoinHandle<()>>,
}

impl Interrupt {
    pub fn listen() -> Self {
        let (tx, rx) = watch::channel(false);
        let listener = tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("ctrl-c received");
                    let _ = tx.send(true);
                }
                Err(e) => {
                    tracing::warn!("cannot listen for ctrl-c: {}", e);
                    // Keep the sender alive so `fired` never resolves spuriously.
                    std::future::pending::<()>().await;
                }
            }
        });
        Self {
            fired: rx,
            listener: Some(listener),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_receiver(fired: watch::Receiver<bool>) -> Self {
        Self {
            fired,
            listener: None,
        }
    }

    /// Resolves once Ctrl-C was pressed; pending forever otherwise.
    pub async fn fired(&self) {
        let mut rx = self.fired.clone();
        if rx.wait_for(|fired| *fired).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

impl Drop for Interrupt {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.abort();
        }
    }
}
