//! Session: host-owned state around the stateless engine.
//!
//! Holds the current position (backed by a `PositionStore`), the last
//! snapshot and the last error. The recommended action is recomputed on
//! every query and never cached.

use crate::data::Fetcher;
use crate::domain::{Position, SignalSnapshot};
use crate::signal::{compute_signal, Action, SignalError, SignalSources, StrategyParams};
use crate::store::{PositionStore, StoreError};

pub struct Session<S: PositionStore> {
    store: S,
    position: Position,
    snapshot: Option<SignalSnapshot>,
    last_error: Option<String>,
}

impl<S: PositionStore> Session<S> {
    /// Open a session, reading the position once from `store`.
    pub fn open(store: S) -> Result<Self, StoreError> {
        let position = store.load()?;
        Ok(Self {
            store,
            position,
            snapshot: None,
            last_error: None,
        })
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Persist a new position chosen by the user.
    pub fn set_position(&mut self, position: Position) -> Result<(), StoreError> {
        self.store.save(position)?;
        self.position = position;
        Ok(())
    }

    pub fn snapshot(&self) -> Option<&SignalSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Run the orchestrator. On failure the previous snapshot is kept and the
    /// error message is recorded.
    pub fn refresh<F: Fetcher>(
        &mut self,
        fetcher: &F,
        sources: &SignalSources,
        params: &StrategyParams,
    ) -> Result<&SignalSnapshot, SignalError> {
        match compute_signal(fetcher, sources, params) {
            Ok(snapshot) => {
                self.last_error = None;
                let snapshot: &SignalSnapshot = self.snapshot.insert(snapshot);
                Ok(snapshot)
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Recommended action for the current position and last snapshot.
    pub fn action(&self) -> Option<Action> {
        self.snapshot
            .as_ref()
            .map(|s| Action::recommend(self.position, s.regime))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StaticFetcher;
    use crate::store::MemoryPositionStore;

    fn rising_csv() -> String {
        let mut csv = String::from("date,close\n");
        let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for i in 0..70 {
            let close = if i < 67 { 100.0 } else { 110.0 };
            let date = base + chrono::Duration::days(i);
            csv.push_str(&format!("{date},{close}\n"));
        }
        csv
    }

    fn sources() -> SignalSources {
        SignalSources {
            primary: "qqq".into(),
            secondary: None,
        }
    }

    #[test]
    fn action_tracks_position_changes() {
        let fetcher = StaticFetcher::new().with("qqq", rising_csv());
        let mut session = Session::open(MemoryPositionStore::with_position(Position::Cash)).unwrap();
        assert_eq!(session.action(), None);

        session
            .refresh(&fetcher, &sources(), &StrategyParams::default())
            .unwrap();
        assert_eq!(session.action(), Some(Action::Enter));

        session.set_position(Position::Held).unwrap();
        assert_eq!(session.action(), Some(Action::HoldHeld));
    }

    #[test]
    fn failed_refresh_keeps_previous_snapshot() {
        let good = StaticFetcher::new().with("qqq", rising_csv());
        let bad = StaticFetcher::new().with("qqq", "date,close\n2024-01-02,1\n");
        let mut session = Session::open(MemoryPositionStore::new()).unwrap();

        session
            .refresh(&good, &sources(), &StrategyParams::default())
            .unwrap();
        let err = session
            .refresh(&bad, &sources(), &StrategyParams::default())
            .unwrap_err();

        assert!(err.to_string().contains("got 1"));
        assert!(session.snapshot().is_some());
        assert_eq!(session.last_error(), Some(err.to_string().as_str()));
    }

    #[test]
    fn set_position_is_persisted() {
        let mut session = Session::open(MemoryPositionStore::new()).unwrap();
        assert_eq!(session.position(), Position::Held);
        session.set_position(Position::Cash).unwrap();
        assert_eq!(session.store.load().unwrap(), Position::Cash);
    }
}
