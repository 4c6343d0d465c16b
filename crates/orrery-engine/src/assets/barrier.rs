use log::{info, warn};

use crate::assets::manifest::AssetEntry;
use crate::error::AssetError;

/// Outcome of a completed load: every entry is in exactly one of the two lists.
#[derive(Debug)]
pub struct LoadReport<T> {
    pub loaded: Vec<(AssetEntry, T)>,
    pub failed: Vec<(AssetEntry, AssetError)>,
}

type Continuation<T> = Box<dyn FnOnce(LoadReport<T>)>;

/// Join over a set of independently resolving loads.
///
/// Each entry is resolved once with its result. Failures are logged and
/// recorded; they never block the barrier. When the last entry resolves the
/// continuation runs exactly once with everything that succeeded.
pub struct AssetBarrier<T> {
    entries: Vec<AssetEntry>,
    results: Vec<Option<Result<T, AssetError>>>,
    remaining: usize,
    on_complete: Option<Continuation<T>>,
}

impl<T> AssetBarrier<T> {
    /// Create a barrier. With no entries the continuation runs immediately.
    pub fn new(entries: Vec<AssetEntry>, on_complete: impl FnOnce(LoadReport<T>) + 'static) -> Self {
        let remaining = entries.len();
        let results = entries.iter().map(|_| None).collect();
        let mut barrier = Self {
            entries,
            results,
            remaining,
            on_complete: Some(Box::new(on_complete)),
        };
        if barrier.remaining == 0 {
            barrier.finish();
        }
        barrier
    }

    /// Record the result for entry `index`. Returns true if this call released the barrier.
    /// Repeat or out-of-range resolutions are ignored.
    pub fn resolve(&mut self, index: usize, result: Result<T, AssetError>) -> bool {
        let Some(slot) = self.results.get_mut(index) else {
            warn!("asset barrier: no entry at index {}", index);
            return false;
        };
        if slot.is_some() {
            warn!("asset barrier: '{}' resolved twice", self.entries[index].name);
            return false;
        }
        if let Err(e) = &result {
            warn!("asset '{}' failed: {}", self.entries[index].name, e);
        }
        *slot = Some(result);
        self.remaining -= 1;
        if self.remaining == 0 {
            self.finish();
            return true;
        }
        false
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    pub fn entries(&self) -> &[AssetEntry] {
        &self.entries
    }

    fn finish(&mut self) {
        let Some(on_complete) = self.on_complete.take() else {
            return;
        };
        let mut report = LoadReport {
            loaded: Vec::with_capacity(self.entries.len()),
            failed: Vec::new(),
        };
        for (entry, result) in self.entries.iter().zip(self.results.iter_mut()) {
            match result.take() {
                Some(Ok(value)) => report.loaded.push((entry.clone(), value)),
                Some(Err(e)) => report.failed.push((entry.clone(), e)),
                None => {}
            }
        }
        info!(
            "assets: {} loaded, {} failed",
            report.loaded.len(),
            report.failed.len()
        );
        on_complete(report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::manifest::AssetKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn entries(n: usize) -> Vec<AssetEntry> {
        (0..n)
            .map(|i| AssetEntry::new(&format!("a{}", i), &format!("a{}.txt", i), AssetKind::Text))
            .collect()
    }

    fn counting_barrier(n: usize) -> (AssetBarrier<u32>, Rc<RefCell<Vec<LoadReport<u32>>>>) {
        let reports = Rc::new(RefCell::new(Vec::new()));
        let sink = reports.clone();
        let barrier = AssetBarrier::new(entries(n), move |r| sink.borrow_mut().push(r));
        (barrier, reports)
    }

    #[test]
    fn one_failure_still_releases_once() {
        let (mut barrier, reports) = counting_barrier(5);
        for i in 0..5 {
            let result = if i == 2 {
                Err(AssetError::Fetch { path: "a2.txt".into(), reason: "404".into() })
            } else {
                Ok(i as u32)
            };
            let fired = barrier.resolve(i, result);
            assert_eq!(fired, i == 4);
        }
        let reports = reports.borrow();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].loaded.len(), 4);
        assert_eq!(reports[0].failed.len(), 1);
        assert_eq!(reports[0].failed[0].0.name, "a2");
    }

    #[test]
    fn resolution_order_does_not_matter() {
        let (mut barrier, reports) = counting_barrier(3);
        barrier.resolve(2, Ok(20));
        barrier.resolve(0, Ok(0));
        assert!(reports.borrow().is_empty());
        barrier.resolve(1, Ok(10));
        let reports = reports.borrow();
        let values: Vec<u32> = reports[0].loaded.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![0, 10, 20]);
    }

    #[test]
    fn duplicate_and_unknown_resolutions_are_ignored() {
        let (mut barrier, reports) = counting_barrier(2);
        barrier.resolve(0, Ok(1));
        assert!(!barrier.resolve(0, Ok(2)));
        assert!(!barrier.resolve(9, Ok(3)));
        assert_eq!(barrier.remaining(), 1);
        barrier.resolve(1, Ok(4));
        assert!(!barrier.resolve(1, Ok(5)));
        assert_eq!(reports.borrow().len(), 1);
        assert_eq!(reports.borrow()[0].loaded[0].1, 1);
    }

    #[test]
    fn all_failures_still_release() {
        let (mut barrier, reports) = counting_barrier(2);
        barrier.resolve(0, Err(AssetError::Missing("a0".into())));
        barrier.resolve(1, Err(AssetError::Missing("a1".into())));
        assert_eq!(reports.borrow().len(), 1);
        assert!(reports.borrow()[0].loaded.is_empty());
    }

    #[test]
    fn empty_barrier_fires_immediately() {
        let (barrier, reports) = counting_barrier(0);
        assert!(barrier.is_complete());
        assert_eq!(reports.borrow().len(), 1);
    }
}
