//! Event handling system
//!
//! Non-blocking event plumbing between the crossterm poller and the
//! application loop. Terminal events are polled on a background task and
//! forwarded through a bounded channel; the app drains the channel without
//! blocking between renders.

use crossterm::event::{Event as CrosstermEvent, KeyEvent};
use smol::channel::{bounded, Receiver, Sender};
use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use crate::error::{HuechordError, HuechordResult};

/// Maximum number of pending events in the channel
const MAX_EVENTS: usize = 1024;

/// Terminal events that can occur
#[derive(Debug, Clone)]
pub enum Event {
    /// Key press events
    Key(KeyEvent),
    /// Terminal resize events
    Resize(u16, u16),
    /// Event indicating the event loop should terminate
    Quit,
}

/// Handles event processing and distribution
#[derive(Debug)]
pub struct EventHandler {
    /// Sender for event channel
    tx: Sender<Event>,
    /// Receiver for event channel
    rx: Receiver<Event>,
    /// Flag indicating if the event handler is running
    running: AtomicBool,
}

impl EventHandler {
    /// Creates a new event handler with bounded channel
    pub fn new() -> Self {
        let (tx, rx) = bounded(MAX_EVENTS);
        Self {
            tx,
            rx,
            running: AtomicBool::new(true),
        }
    }

    /// Attempts to send an event through the channel without blocking
    pub fn try_send(&self, event: Event) -> HuechordResult<()> {
        self.tx
            .try_send(event)
            .map_err(|_| HuechordError::channel_closed("event channel", (0, 0)).into())
    }

    /// Non-blocking attempt to receive an event
    pub fn try_recv(&self) -> HuechordResult<Option<Event>> {
        match self.rx.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(smol::channel::TryRecvError::Empty) => Ok(None),
            Err(_) => Err(HuechordError::channel_closed("event channel", (0, 0)).into()),
        }
    }

    /// Starts the event polling task
    pub async fn run(&self, tick_rate: Duration) -> HuechordResult<()> {
        while self.running.load(Ordering::Acquire) {
            if self.poll_events(tick_rate)? {
                match self.read_event()? {
                    CrosstermEvent::Key(key) => {
                        self.try_send(Event::Key(key))?;
                    }
                    CrosstermEvent::Resize(width, height) => {
                        self.try_send(Event::Resize(width, height))?;
                    }
                    _ => {}
                }
            }

            // Allow other tasks to run
            smol::future::yield_now().await;
        }

        Ok(())
    }

    /// Polls for terminal events
    fn poll_events(&self, tick_rate: Duration) -> HuechordResult<bool> {
        crossterm::event::poll(tick_rate).map_err(|e| {
            HuechordError::event(
                "event polling",
                (0, 0),
                format!("Failed to poll events: {}", e),
            )
            .into()
        })
    }

    /// Reads a terminal event
    fn read_event(&self) -> HuechordResult<CrosstermEvent> {
        crossterm::event::read().map_err(|e| {
            HuechordError::event(
                "event reading",
                (0, 0),
                format!("Failed to read event: {}", e),
            )
            .into()
        })
    }

    /// Stops the event handler
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Checks if the event handler is running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_event_handler_lifecycle() {
        let handler = EventHandler::new();
        assert!(handler.is_running());

        handler.stop();
        assert!(!handler.is_running());
    }

    #[test]
    fn test_event_sending() {
        let handler = EventHandler::new();

        let key_event = Event::Key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::empty()));
        assert!(handler.try_send(key_event).is_ok());

        let received = handler.try_recv().unwrap();
        assert!(matches!(received, Some(Event::Key(_))));

        // Channel drained
        assert!(matches!(handler.try_recv().unwrap(), None));
    }

    #[test]
    fn test_channel_capacity() {
        let handler = EventHandler::new();

        for _ in 0..MAX_EVENTS {
            let event = Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::empty()));
            assert!(handler.try_send(event).is_ok());
        }

        let event = Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::empty()));
        assert!(handler.try_send(event).is_err());
    }
}
