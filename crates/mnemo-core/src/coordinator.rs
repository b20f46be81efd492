//! Request coordination: single-flight guards and observable busy state.
//!
//! At most one network round-trip of a given kind may be in flight at a
//! time. The flags here are the only synchronization the manager needs
//! beyond its short-lived state locks, since results are applied back on
//! the coordinating task in completion order.

use std::sync::atomic::{AtomicBool, Ordering};

use mnemo_types::memory::Memory;

/// The serialized network operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Login,
    Refresh,
    Save,
    Ask,
}

impl OpKind {
    fn index(self) -> usize {
        match self {
            OpKind::Login => 0,
            OpKind::Refresh => 1,
            OpKind::Save => 2,
            OpKind::Ask => 3,
        }
    }
}

/// Busy indicator per operation kind, published to the presentation layer
/// so only one visible loading indicator is ever active per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusyFlags {
    pub login: bool,
    pub refresh: bool,
    pub save: bool,
    pub ask: bool,
}

impl BusyFlags {
    /// Whether any operation is currently in flight.
    pub fn any(&self) -> bool {
        self.login || self.refresh || self.save || self.ask
    }
}

/// Point-in-time view of the manager's observable state.
///
/// Published on a watch channel after every transition; the presentation
/// layer renders from this instead of reaching into the components.
#[derive(Debug, Clone, Default)]
pub struct StateSnapshot {
    pub authenticated: bool,
    pub memories: Vec<Memory>,
    pub busy: BusyFlags,
    pub last_error: Option<String>,
}

/// Per-kind in-flight flags.
///
/// `begin` claims the flag for a kind and hands back a guard; the guard
/// clears the flag on drop, success or failure, before control returns to
/// the caller.
pub(crate) struct FlightBoard {
    flags: [AtomicBool; 4],
}

impl FlightBoard {
    pub fn new() -> Self {
        Self {
            flags: [const { AtomicBool::new(false) }; 4],
        }
    }

    /// Claim the flag for `kind`. Fails if a request of that kind is
    /// already in flight.
    pub fn begin(&self, kind: OpKind) -> Option<FlightGuard<'_>> {
        self.flags[kind.index()]
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then(|| FlightGuard { board: self, kind })
    }

    /// Current busy state across all kinds.
    pub fn busy(&self) -> BusyFlags {
        BusyFlags {
            login: self.flags[OpKind::Login.index()].load(Ordering::Acquire),
            refresh: self.flags[OpKind::Refresh.index()].load(Ordering::Acquire),
            save: self.flags[OpKind::Save.index()].load(Ordering::Acquire),
            ask: self.flags[OpKind::Ask.index()].load(Ordering::Acquire),
        }
    }
}

/// Clears the in-flight flag for its kind when dropped.
pub(crate) struct FlightGuard<'a> {
    board: &'a FlightBoard,
    kind: OpKind,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.board.flags[self.kind.index()].store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_of_same_kind_is_refused() {
        let board = FlightBoard::new();
        let guard = board.begin(OpKind::Refresh);
        assert!(guard.is_some());
        assert!(board.begin(OpKind::Refresh).is_none());
    }

    #[test]
    fn test_guard_drop_clears_the_flag() {
        let board = FlightBoard::new();
        {
            let _guard = board.begin(OpKind::Save).unwrap();
            assert!(board.busy().save);
        }
        assert!(!board.busy().save);
        assert!(board.begin(OpKind::Save).is_some());
    }

    #[test]
    fn test_kinds_are_independent() {
        let board = FlightBoard::new();
        let _refresh = board.begin(OpKind::Refresh).unwrap();
        let _save = board.begin(OpKind::Save).unwrap();
        let _ask = board.begin(OpKind::Ask).unwrap();
        let _login = board.begin(OpKind::Login).unwrap();

        let busy = board.busy();
        assert!(busy.login && busy.refresh && busy.save && busy.ask);
        assert!(busy.any());
    }

    #[test]
    fn test_idle_board_reports_nothing_busy() {
        let board = FlightBoard::new();
        assert!(!board.busy().any());
    }
}
