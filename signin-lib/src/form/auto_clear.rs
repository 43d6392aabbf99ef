//! Delayed, cancellable clearing of the general error.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::GeneralError;

/// Handle to a scheduled clear of a [`GeneralError`].
///
/// The clear fires after the delay unless the handle is cancelled or dropped
/// first. Dropping the owning form therefore cancels it.
#[derive(Debug)]
pub struct AutoClear {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl AutoClear {
    /// Schedule `target` to be cleared after `delay`, if it still holds the
    /// message of `generation` by then.
    ///
    /// Returns `None` when called outside a tokio runtime. The message then
    /// stays until it is replaced or the form is reset.
    pub fn schedule(target: GeneralError, generation: u64, delay: Duration) -> Option<Self> {
        let Ok(runtime) = Handle::try_current() else {
            log::warn!("No tokio runtime; general error will not auto-clear");
            return None;
        };

        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    log::debug!("Auto-clear cancelled (generation {generation})");
                }
                _ = tokio::time::sleep(delay) => {
                    if target.clear_if(generation) {
                        log::debug!("General error cleared after {:?}", delay);
                    }
                }
            }
        });

        Some(Self { cancel, handle })
    }

    /// Cancel the pending clear. No-op if it already fired.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns `true` until the clear has fired or observed cancellation.
    pub fn is_pending(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for AutoClear {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
