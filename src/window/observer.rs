//! Debounced content-height notifications.
//!
//! Resize measurements arrive in bursts while the focus-mode list re-renders.
//! [`ContentHeightObserver`] collapses each burst into a single height, emitted
//! once no new measurement has arrived for the debounce window.
//!
//! Two ways to drive it:
//!
//! - **Polling**: call [`poll`](ContentHeightObserver::poll) from the event loop
//!   (the headless shell does this between input lines).
//! - **Timer callbacks**: schedule a timer for each [`ResizeTicket`] returned
//!   by [`notify`](ContentHeightObserver::notify) and hand it back to
//!   [`fire`](ContentHeightObserver::fire). Tickets from a superseded
//!   measurement or an earlier connection are rejected, so a callback that
//!   lands after `exit()` never resizes the window.

use std::time::{Duration, Instant};

/// Handle for one scheduled debounce callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeTicket {
    generation: u64,
    sequence: u64,
}

#[derive(Debug, Clone, Copy)]
struct PendingResize {
    height: f64,
    last_event: Instant,
    ticket: ResizeTicket,
}

/// Trailing-edge debouncer for content height changes.
#[derive(Debug, Clone)]
pub struct ContentHeightObserver {
    debounce: Duration,
    padding: f64,
    connected: bool,
    /// Bumped on every connect and disconnect.
    generation: u64,
    sequence: u64,
    pending: Option<PendingResize>,
}

impl ContentHeightObserver {
    /// Creates a disconnected observer.
    #[must_use]
    pub fn new(debounce: Duration, padding: f64) -> Self {
        Self {
            debounce,
            padding,
            connected: false,
            generation: 0,
            sequence: 0,
            pending: None,
        }
    }

    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// Starts accepting measurements. Invalidates tickets from earlier connections.
    pub fn connect(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.connected = true;
        self.pending = None;
        tracing::trace!(generation = self.generation, "content observer connected");
    }

    /// Stops accepting measurements and drops anything pending.
    pub fn disconnect(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.connected = false;
        if self.pending.take().is_some() {
            tracing::debug!("dropped pending resize on disconnect");
        }
    }

    /// Records a measurement and restarts the debounce window.
    ///
    /// Returns `None` while disconnected.
    pub fn notify(&mut self, height: f64, now: Instant) -> Option<ResizeTicket> {
        if !self.connected {
            tracing::trace!(height, "ignoring measurement while disconnected");
            return None;
        }

        self.sequence = self.sequence.wrapping_add(1);
        let ticket = ResizeTicket {
            generation: self.generation,
            sequence: self.sequence,
        };
        self.pending = Some(PendingResize {
            height,
            last_event: now,
            ticket,
        });
        Some(ticket)
    }

    /// Instant at which the pending measurement becomes due, if any.
    #[must_use]
    pub fn due_at(&self) -> Option<Instant> {
        self.pending.map(|pending| pending.last_event + self.debounce)
    }

    /// Emits the padded height if the burst has settled.
    pub fn poll(&mut self, now: Instant) -> Option<f64> {
        let pending = self.pending?;
        if !self.connected || now.saturating_duration_since(pending.last_event) < self.debounce {
            return None;
        }
        self.pending = None;
        Some(pending.height + self.padding)
    }

    /// Timer-callback variant of [`poll`](Self::poll).
    ///
    /// Returns `None` for stale tickets: from a previous connection, or
    /// superseded by a newer measurement (whose own ticket will fire later).
    pub fn fire(&mut self, ticket: ResizeTicket, now: Instant) -> Option<f64> {
        if ticket.generation != self.generation {
            tracing::trace!("discarding resize ticket from a previous connection");
            return None;
        }
        match self.pending {
            Some(pending) if pending.ticket == ticket => self.poll(now),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEBOUNCE: Duration = Duration::from_millis(100);

    fn connected() -> ContentHeightObserver {
        let mut observer = ContentHeightObserver::new(DEBOUNCE, 10.0);
        observer.connect();
        observer
    }

    #[test]
    fn burst_collapses_to_latest_height() {
        let start = Instant::now();
        let mut observer = connected();

        observer.notify(100.0, start);
        observer.notify(150.0, start + Duration::from_millis(40));
        observer.notify(180.0, start + Duration::from_millis(80));

        assert_eq!(observer.poll(start + Duration::from_millis(150)), None);
        assert_eq!(observer.poll(start + Duration::from_millis(180)), Some(190.0));
        assert_eq!(observer.poll(start + Duration::from_millis(500)), None);
    }

    #[test]
    fn disconnected_observer_never_fires() {
        let start = Instant::now();
        let mut observer = connected();
        let ticket = observer.notify(100.0, start).unwrap();

        observer.disconnect();
        assert_eq!(observer.fire(ticket, start + DEBOUNCE), None);
        assert_eq!(observer.poll(start + DEBOUNCE), None);
        assert_eq!(observer.notify(120.0, start + DEBOUNCE), None);
    }

    #[test]
    fn late_ticket_from_previous_connection_is_rejected() {
        let start = Instant::now();
        let mut observer = connected();
        let stale = observer.notify(100.0, start).unwrap();

        observer.disconnect();
        observer.connect();
        let fresh = observer.notify(200.0, start + Duration::from_millis(10)).unwrap();

        assert_eq!(observer.fire(stale, start + Duration::from_millis(200)), None);
        assert_eq!(observer.fire(fresh, start + Duration::from_millis(200)), Some(210.0));
    }

    #[test]
    fn superseded_ticket_does_not_fire() {
        let start = Instant::now();
        let mut observer = connected();
        let first = observer.notify(100.0, start).unwrap();
        let second = observer.notify(140.0, start + Duration::from_millis(50)).unwrap();

        assert_eq!(observer.fire(first, start + Duration::from_millis(100)), None);
        assert_eq!(observer.due_at(), Some(start + Duration::from_millis(150)));
        assert_eq!(observer.fire(second, start + Duration::from_millis(150)), Some(150.0));
    }
}
