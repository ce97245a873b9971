//! Explicit-state Kripke structures: the graph the checker runs marking algorithms over.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::error::KripkeError;
use crate::formula::Ap;

/// A state is just an index into the structure's arrays; it carries no identity beyond that.
pub type State = usize;

/// A finite, explicit-state Kripke structure.
///
/// Built once via [Kripke::new], which validates the invariants below and derives the inverse
/// relation. After construction, `initial`, `successors`, `labels`, and `predecessors` never
/// change; only `cache` is mutated, by the marking procedures in [crate::checker].
pub struct Kripke {
    initial: Vec<State>,
    successors: Vec<Vec<State>>,
    labels: HashMap<State, HashSet<Ap>>,
    predecessors: Vec<Vec<State>>,
    cache: RefCell<HashMap<crate::formula::Phi, HashSet<State>>>,
}

impl Kripke {
    /// Build a Kripke structure from `initial` states, a `successors` adjacency list (one entry
    /// per state), and a sparse `labels` map (an absent key denotes the empty label set).
    ///
    /// `successors.len()` determines the number of states. Returns a [KripkeError] if the state
    /// set is empty, the initial set is empty, or any initial state or successor index is out of
    /// range — these are the only recoverable-input checks this crate performs; once a `Kripke`
    /// exists, passing it an out-of-range state elsewhere is a programming error (see
    /// `SPEC_FULL.md` §7).
    pub fn new(
        initial: Vec<State>,
        successors: Vec<Vec<State>>,
        labels: HashMap<State, HashSet<Ap>>,
    ) -> Result<Kripke, KripkeError> {
        let n = successors.len();
        if n == 0 {
            return Err(KripkeError::EmptyStateSet);
        }
        if initial.is_empty() {
            return Err(KripkeError::EmptyInitialSet);
        }
        for &s in &initial {
            if s >= n {
                return Err(KripkeError::InitialStateOutOfRange(s, n));
            }
        }

        let mut predecessors = vec![Vec::new(); n];
        for (s, succs) in successors.iter().enumerate() {
            for &t in succs {
                if t >= n {
                    return Err(KripkeError::SuccessorOutOfRange(s, t, n));
                }
                predecessors[t].push(s);
            }
        }

        Ok(Kripke {
            initial,
            successors,
            labels,
            predecessors,
            cache: RefCell::new(HashMap::new()),
        })
    }

    pub fn state_count(&self) -> usize {
        self.successors.len()
    }

    pub fn initial_states(&self) -> &[State] {
        &self.initial
    }

    pub fn successors(&self, s: State) -> &[State] {
        &self.successors[s]
    }

    pub fn predecessors(&self, s: State) -> &[State] {
        &self.predecessors[s]
    }

    pub fn labels(&self, s: State) -> Option<&HashSet<Ap>> {
        self.labels.get(&s)
    }

    pub fn has_label(&self, s: State, ap: &Ap) -> bool {
        self.labels.get(&s).is_some_and(|set| set.contains(ap))
    }

    pub(crate) fn cache(&self) -> &RefCell<HashMap<crate::formula::Phi, HashSet<State>>> {
        &self.cache
    }

    /// Discard all memoized marking results. Needed whenever a caller wants to force
    /// re-evaluation — the graph itself (`initial`/`successors`/`labels`/`predecessors`) is
    /// otherwise immutable for the lifetime of this structure.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }

    /// Does `phi` hold in state `s`? Forwards to [crate::checker::check].
    pub fn check(&self, s: State, phi: &crate::formula::Phi) -> bool {
        crate::checker::check(self, s, phi)
    }

    /// Does `phi` hold in every initial state? Forwards to [crate::checker::satisfies].
    pub fn satisfies(&self, phi: &crate::formula::Phi) -> bool {
        crate::checker::satisfies(self, phi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_k7() -> Kripke {
        let successors = vec![
            vec![1, 2],
            vec![4],
            vec![5, 0],
            vec![2, 0, 3],
            vec![1, 2],
            vec![6],
            vec![3],
        ];
        let mut labels = HashMap::new();
        labels.insert(1, HashSet::from([Ap::new("start"), Ap::new("error")]));
        labels.insert(2, HashSet::from([Ap::new("close")]));
        labels.insert(3, HashSet::from([Ap::new("close"), Ap::new("heat")]));
        labels.insert(
            4,
            HashSet::from([Ap::new("start"), Ap::new("error"), Ap::new("close")]),
        );
        labels.insert(5, HashSet::from([Ap::new("start"), Ap::new("close")]));
        labels.insert(
            6,
            HashSet::from([Ap::new("start"), Ap::new("close"), Ap::new("heat")]),
        );
        Kripke::new(vec![0], successors, labels).unwrap()
    }

    #[test]
    fn builds_inverse_relation() {
        let k = demo_k7();
        // state 0 has predecessors 2 and 3 (R(2) contains 0, R(3) contains 0)
        let mut preds = k.predecessors(0).to_vec();
        preds.sort();
        assert_eq!(preds, vec![2, 3]);
    }

    #[test]
    fn rejects_empty_state_set() {
        assert_eq!(
            Kripke::new(vec![0], Vec::new(), HashMap::new()),
            Err(KripkeError::EmptyStateSet)
        );
    }

    #[test]
    fn rejects_empty_initial_set() {
        assert_eq!(
            Kripke::new(Vec::new(), vec![vec![]], HashMap::new()),
            Err(KripkeError::EmptyInitialSet)
        );
    }

    #[test]
    fn rejects_out_of_range_initial_state() {
        assert_eq!(
            Kripke::new(vec![5], vec![vec![]], HashMap::new()),
            Err(KripkeError::InitialStateOutOfRange(5, 1))
        );
    }

    #[test]
    fn rejects_out_of_range_successor() {
        assert_eq!(
            Kripke::new(vec![0], vec![vec![9]], HashMap::new()),
            Err(KripkeError::SuccessorOutOfRange(0, 9, 1))
        );
    }

    #[test]
    fn clear_cache_empties_memo_table() {
        let k = demo_k7();
        k.cache()
            .borrow_mut()
            .insert(crate::formula::Phi::mk_true(), HashSet::from([0]));
        assert!(!k.cache().borrow().is_empty());
        k.clear_cache();
        assert!(k.cache().borrow().is_empty());
    }
}
