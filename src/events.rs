use std::{
    ops::ControlFlow,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::SyncSender,
    },
};

use crate::maze::{Coord, Direction};

/// Something that happened to the grid while a generator, post-processor or
/// solver was running. Hosts use these to animate or record a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MazeEvent {
    /// A generator entered a cell for the first time.
    CellCarved(Coord),
    EdgeOpened(Coord, Coord),
    EdgeClosed(Coord, Coord),
    ObstaclePlaced(Coord),
    IslandMarked(Coord),
    /// A solver pushed a cell onto its frontier (queue, stack or heap).
    CellOpened(Coord),
    /// A solver popped a cell and is about to look at its neighbors.
    CellExpanded(Coord),
    CellClosed(Coord),
    /// DFS confirmed that the cell leads nowhere.
    DeadEnd(Coord),
    /// One step of the final path, with the direction it was entered from.
    PathStep(Coord, Option<Direction>),
}

/// Receives [`MazeEvent`]s synchronously.
///
/// The core ignores the returned value except for `Break`, which is treated as a
/// cancellation request.
pub trait Observer {
    fn on_event(&mut self, event: MazeEvent) -> ControlFlow<()>;
}

impl<F> Observer for F
where
    F: FnMut(MazeEvent) -> ControlFlow<()>,
{
    fn on_event(&mut self, event: MazeEvent) -> ControlFlow<()> {
        self(event)
    }
}

/// Forwards events to another thread over a bounded channel, blocking while
/// the channel is full. A dropped receiver stops the run.
#[derive(Debug, Clone)]
pub struct ChannelObserver(pub SyncSender<MazeEvent>);

impl From<SyncSender<MazeEvent>> for ChannelObserver {
    fn from(tx: SyncSender<MazeEvent>) -> Self {
        ChannelObserver(tx)
    }
}

impl Observer for ChannelObserver {
    fn on_event(&mut self, event: MazeEvent) -> ControlFlow<()> {
        match self.0.send(event) {
            Ok(()) => ControlFlow::Continue(()),
            Err(_) => ControlFlow::Break(()),
        }
    }
}

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Per-call plumbing handed to every generator, pass and solver: the optional
/// observer and the cancellation sources.
#[derive(Default)]
pub struct Hooks<'a> {
    observer: Option<&'a mut dyn Observer>,
    cancel: Option<CancelToken>,
    /// Latched once the observer asked to stop.
    halted: bool,
}

impl<'a> Hooks<'a> {
    /// No observer, no cancellation.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_observer(mut self, observer: &'a mut dyn Observer) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Forwards `event` to the observer until it has asked to stop.
    pub(crate) fn emit(&mut self, event: MazeEvent) {
        if self.halted {
            return;
        }
        if let Some(observer) = self.observer.as_deref_mut() {
            if observer.on_event(event).is_break() {
                self.halted = true;
            }
        }
    }

    /// True once the token is cancelled or the observer returned `Break`.
    pub fn should_stop(&mut self) -> bool {
        if !self.halted && self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            tracing::debug!("[hooks] cancellation requested");
            self.halted = true;
        }
        self.halted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_stops_hooks() {
        let token = CancelToken::new();
        let mut hooks = Hooks::none().with_cancel(token.clone());
        assert!(!hooks.should_stop());
        token.cancel();
        assert!(hooks.should_stop());
    }

    #[test]
    fn test_observer_break_latches() {
        let mut seen = 0;
        let mut observer = |_event: MazeEvent| {
            seen += 1;
            if seen >= 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        };
        let mut hooks = Hooks::none().with_observer(&mut observer);
        hooks.emit(MazeEvent::CellCarved(Coord::new(0, 0)));
        assert!(!hooks.should_stop());
        hooks.emit(MazeEvent::CellCarved(Coord::new(0, 1)));
        assert!(hooks.should_stop());
        // Stays stopped even though the observer is never asked again
        assert!(hooks.should_stop());
    }

    #[test]
    fn test_no_events_after_break() {
        let mut seen = 0;
        let mut observer = |_event: MazeEvent| {
            seen += 1;
            ControlFlow::Break(())
        };
        let mut hooks = Hooks::none().with_observer(&mut observer);
        hooks.emit(MazeEvent::CellCarved(Coord::new(0, 0)));
        hooks.emit(MazeEvent::CellCarved(Coord::new(0, 1)));
        hooks.emit(MazeEvent::EdgeOpened(Coord::new(0, 0), Coord::new(0, 1)));
        assert!(hooks.should_stop());
        drop(hooks);
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_dropped_receiver_breaks() {
        let (tx, rx) = std::sync::mpsc::sync_channel::<MazeEvent>(4);
        let mut tx = ChannelObserver::from(tx);
        assert!(
            tx.on_event(MazeEvent::CellClosed(Coord::new(0, 0)))
                .is_continue()
        );
        drop(rx);
        assert!(
            tx.on_event(MazeEvent::CellClosed(Coord::new(0, 0)))
                .is_break()
        );
    }
}
