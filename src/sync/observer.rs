//! Observers for synchronizer output.
//!
//! Every state change produces one [`SyncUpdate`]; subscribed observers
//! receive it synchronously, before the triggering call returns.

use crate::sync::synchronizer::SyncUpdate;
use log::debug;
use std::sync::mpsc::Sender;

/// Observer that receives the display map after each event
pub trait SyncObserver {
    fn on_update(&self, update: &SyncUpdate);
}

/// Function-based observer for simple cases
pub struct FnObserver<F: Fn(&SyncUpdate)>(pub F);

impl<F: Fn(&SyncUpdate)> SyncObserver for FnObserver<F> {
    fn on_update(&self, update: &SyncUpdate) {
        (self.0)(update);
    }
}

/// Channel-based observer - sends a copy of each update to a channel
pub struct ChannelObserver {
    sender: Sender<SyncUpdate>,
}

impl ChannelObserver {
    pub fn new(sender: Sender<SyncUpdate>) -> Self {
        Self { sender }
    }
}

impl SyncObserver for ChannelObserver {
    fn on_update(&self, update: &SyncUpdate) {
        if self.sender.send(update.clone()).is_err() {
            debug!("update receiver dropped, discarding {:?} update", update.status);
        }
    }
}
