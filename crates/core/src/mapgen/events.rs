//! Lifecycle notifications a generator emits for progressive rendering.

use crate::grid::SpatialGrid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridEventKind {
    /// Initial grid state exists. Emitted once.
    Generated,
    /// Intermediate state. Emitted zero or more times.
    Updated,
    /// Terminal state; nothing follows for this run. Emitted exactly once.
    Finalized,
}

#[derive(Clone, Copy, Debug)]
pub struct GridEvent<'a> {
    pub kind: GridEventKind,
    /// Strategy that produced the event.
    pub source: &'static str,
    pub grid: &'a SpatialGrid,
}

/// Receives every event of a run. Observation only: nothing an observer does can change
/// the outcome of generation.
pub trait GridObserver {
    fn on_event(&mut self, event: &GridEvent<'_>);
}

impl<F> GridObserver for F
where
    F: FnMut(&GridEvent<'_>),
{
    fn on_event(&mut self, event: &GridEvent<'_>) {
        self(event);
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct IgnoreEvents;

impl GridObserver for IgnoreEvents {
    fn on_event(&mut self, _event: &GridEvent<'_>) {}
}

/// Records event kinds and active-cell counts in arrival order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLog {
    pub entries: Vec<(GridEventKind, usize)>,
}

impl EventLog {
    pub fn count(&self, kind: GridEventKind) -> usize {
        self.entries.iter().filter(|(entry_kind, _)| *entry_kind == kind).count()
    }

    pub fn kinds(&self) -> Vec<GridEventKind> {
        self.entries.iter().map(|(kind, _)| *kind).collect()
    }
}

impl GridObserver for EventLog {
    fn on_event(&mut self, event: &GridEvent<'_>) {
        self.entries.push((event.kind, event.grid.count_active()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_and_logs_observe_events() {
        let grid = SpatialGrid::new(3, 3).expect("grid");
        let mut seen = Vec::new();
        let mut closure = |event: &GridEvent<'_>| seen.push(event.kind);
        let mut log = EventLog::default();

        for kind in [GridEventKind::Generated, GridEventKind::Updated, GridEventKind::Finalized] {
            let event = GridEvent { kind, source: "test", grid: &grid };
            closure.on_event(&event);
            log.on_event(&event);
            IgnoreEvents.on_event(&event);
        }

        assert_eq!(seen, log.kinds());
        assert_eq!(log.count(GridEventKind::Finalized), 1);
        assert!(log.entries.iter().all(|(_, active)| *active == 0));
    }
}
