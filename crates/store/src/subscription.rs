//! Consumer side of a store subscription.

use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A live subscription to a store's sequence.
///
/// The first message is the sequence as of the moment of subscribing
/// (replay-latest); each later message is the full sequence after one
/// mutation. Messages arrive in mutation order.
///
/// Subscriptions are designed for single-threaded consumption; drop the
/// subscription to release it.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub(crate) fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}
