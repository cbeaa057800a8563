//! Wrapper to in-memory channels.
//!
//! This module exists to ease the transition between channel libraries.

use flume::{bounded as bounded_ext, unbounded as unbounded_ext};

pub trait ChannelItem: Send + 'static {}
impl<T: Send + 'static> ChannelItem for T {}

pub type SendError<T> = flume::SendError<T>;
pub type RecvError = flume::RecvError;
pub type TryRecvError = flume::TryRecvError;

/// Create a new pair sender/receiver with limited capacity.
pub fn bounded<T: ChannelItem>(size: usize) -> (Sender<T>, Receiver<T>) {
    let (tx, rx) = bounded_ext(size);
    (Sender(tx), Receiver(rx))
}

/// Create a new pair sender/receiver with unlimited capacity.
pub fn unbounded<T: ChannelItem>() -> (UnboundedSender<T>, UnboundedReceiver<T>) {
    let (tx, rx) = unbounded_ext();
    (UnboundedSender(tx), UnboundedReceiver(rx))
}

/// A wrapper on a bounded channel sender.
#[derive(Debug)]
pub struct Sender<T: ChannelItem>(flume::Sender<T>);

impl<T: ChannelItem> Clone for Sender<T> {
    fn clone(&self) -> Self {
        Sender(self.0.clone())
    }
}
/// A wrapper on a bounded channel receiver.
#[derive(Debug)]
pub struct Receiver<T: ChannelItem>(flume::Receiver<T>);

impl<T: ChannelItem> Sender<T> {
    /// Send a message in the channel, blocking if it's full.
    #[inline]
    pub fn send(&self, item: T) -> Result<(), SendError<T>> {
        self.0.send(item)
    }
}

impl<T: ChannelItem> Receiver<T> {
    /// Block until a message is present in the channel and return it when ready.
    #[inline]
    pub fn recv(&self) -> Result<T, RecvError> {
        self.0.recv()
    }

    /// Like `recv`, but without blocking.
    #[inline]
    pub fn try_recv(&self) -> Result<T, TryRecvError> {
        self.0.try_recv()
    }
}

/// A wrapper on an unbounded channel sender.
#[derive(Debug)]
pub struct UnboundedSender<T: ChannelItem>(flume::Sender<T>);

impl<T: ChannelItem> Clone for UnboundedSender<T> {
    fn clone(&self) -> Self {
        UnboundedSender(self.0.clone())
    }
}
/// A wrapper on an unbounded channel receiver.
#[derive(Debug)]
pub struct UnboundedReceiver<T: ChannelItem>(flume::Receiver<T>);

impl<T: ChannelItem> UnboundedSender<T> {
    /// Send a message in the channel.
    #[inline]
    pub fn send(&self, item: T) -> Result<(), SendError<T>> {
        self.0.send(item)
    }
}

impl<T: ChannelItem> UnboundedReceiver<T> {
    /// Block until a message is present in the channel and return it when ready.
    #[inline]
    pub fn recv(&self) -> Result<T, RecvError> {
        self.0.recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHANNEL_CAPACITY: usize = 10;

    #[test]
    fn test_recv_local() {
        let (sender, receiver) = bounded(CHANNEL_CAPACITY);

        sender.send(123).unwrap();
        sender.send(456).unwrap();

        drop(sender);

        assert_eq!(receiver.recv().unwrap(), 123);
        assert_eq!(receiver.recv().unwrap(), 456);
        // sender has dropped
        assert!(receiver.recv().is_err());
    }

    #[test]
    fn test_try_recv_empty() {
        let (sender, receiver) = bounded(CHANNEL_CAPACITY);

        assert!(receiver.try_recv().is_err());
        sender.send(1).unwrap();
        assert_eq!(receiver.try_recv().unwrap(), 1);
    }

    #[test]
    fn test_unbounded_closes_when_senders_drop() {
        let (sender, receiver) = unbounded();

        let cloned = sender.clone();
        cloned.send(1).unwrap();
        drop(sender);
        drop(cloned);

        assert_eq!(receiver.recv().unwrap(), 1);
        assert!(receiver.recv().is_err());
    }
}
