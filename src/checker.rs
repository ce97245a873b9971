//! The marking-based model-checking algorithms and the public `check`/`satisfies` entry points.

use std::collections::{HashSet, VecDeque};

use crate::formula::node::PhiNode;
use crate::formula::Phi;
use crate::kripke::{Kripke, State};

/// Does `phi` hold in state `s` of `kripke`?
///
/// Total over any state `< kripke.state_count()`; an out-of-range state is a programming error
/// (see `SPEC_FULL.md` §7) and will panic via the underlying slice index, the same way indexing
/// any other already-validated handle does.
pub fn check(kripke: &Kripke, s: State, phi: &Phi) -> bool {
    debug_assert!(s < kripke.state_count(), "state {s} out of range");
    match phi.node() {
        PhiNode::True => true,
        PhiNode::Atom(ap) => kripke.has_label(s, ap),
        PhiNode::Not(inner) => !check(kripke, s, inner),
        PhiNode::And(lhs, rhs) => check(kripke, s, lhs) && check(kripke, s, rhs),
        PhiNode::Ex(_) => marked_set(kripke, phi, mark_ex).contains(&s),
        PhiNode::Eu(..) => marked_set(kripke, phi, mark_eu).contains(&s),
        PhiNode::Au(..) => marked_set(kripke, phi, mark_au).contains(&s),
    }
}

/// Does `phi` hold in every initial state of `kripke`?
pub fn satisfies(kripke: &Kripke, phi: &Phi) -> bool {
    kripke.initial_states().iter().all(|&s| check(kripke, s, phi))
}

/// Look up `phi`'s marking in the cache, computing and storing it with `mark` on a miss.
fn marked_set(
    kripke: &Kripke,
    phi: &Phi,
    mark: fn(&Kripke, &Phi) -> HashSet<State>,
) -> HashSet<State> {
    if let Some(set) = kripke.cache().borrow().get(phi) {
        return set.clone();
    }
    let set = mark(kripke, phi);
    kripke.cache().borrow_mut().insert(phi.clone(), set.clone());
    set
}

/// `EX psi`: the set of states with at least one successor satisfying `psi`.
fn mark_ex(kripke: &Kripke, phi: &Phi) -> HashSet<State> {
    let PhiNode::Ex(psi) = phi.node() else {
        unreachable!("mark_ex called on non-EX node")
    };
    let mut out = HashSet::new();
    for s in 0..kripke.state_count() {
        if kripke.successors(s).iter().any(|&t| check(kripke, t, psi)) {
            out.insert(s);
        }
    }
    out
}

/// `E[psi1 U psi2]`: backward BFS from psi2-states through psi1-states, deduplicating on
/// enqueue via an eagerly-seeded `seen` set.
fn mark_eu(kripke: &Kripke, phi: &Phi) -> HashSet<State> {
    let PhiNode::Eu(psi1, psi2) = phi.node() else {
        unreachable!("mark_eu called on non-EU node")
    };

    let mut out = HashSet::new();
    let mut seen = HashSet::new();
    let mut open = VecDeque::new();

    for s in 0..kripke.state_count() {
        if check(kripke, s, psi2) {
            seen.insert(s);
            open.push_back(s);
        }
    }

    while let Some(cur) = open.pop_front() {
        out.insert(cur);
        for &p in kripke.predecessors(cur) {
            if !seen.contains(&p) && check(kripke, p, psi1) {
                seen.insert(p);
                open.push_back(p);
            }
        }
    }

    out
}

/// `A[psi1 U psi2]`: the Clarke/Emerson/Sistla counter-based backward fixpoint. `nb[s]` tracks
/// how many of `s`'s successors still need to be confirmed to already satisfy the formula before
/// `s` itself can be added.
fn mark_au(kripke: &Kripke, phi: &Phi) -> HashSet<State> {
    let PhiNode::Au(psi1, psi2) = phi.node() else {
        unreachable!("mark_au called on non-AU node")
    };

    let n = kripke.state_count();
    let mut nb: Vec<usize> = (0..n).map(|s| kripke.successors(s).len()).collect();
    let mut out = HashSet::new();
    let mut open = VecDeque::new();

    for s in 0..n {
        if check(kripke, s, psi2) {
            open.push_back(s);
        }
    }

    while let Some(cur) = open.pop_front() {
        if !out.insert(cur) {
            continue;
        }
        for &p in kripke.predecessors(cur) {
            if check(kripke, p, psi2) {
                continue;
            }
            if check(kripke, p, psi1) {
                nb[p] -= 1;
                if nb[p] == 0 {
                    open.push_back(p);
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::Ap;
    use std::collections::HashMap;

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
    fn atom_holds_only_where_labeled() {
        let k = demo_k7();
        assert!(!check(&k, 0, &Phi::mk_atom(Ap::new("start"))));
        assert!(check(&k, 1, &Phi::mk_atom(Ap::new("start"))));
    }

    #[test]
    fn ex_holds_when_some_successor_satisfies() {
        let k = demo_k7();
        let phi = Phi::mk_ex(Phi::mk_atom(Ap::new("start")));
        assert!(check(&k, 0, &phi));
    }

    #[test]
    fn af_heat_does_not_hold_at_initial_state() {
        // `mark_au(True, "heat")` least-fixpoint on K7 converges to {3, 5, 6}: state 0 can follow
        // the cycle 0 -> 1 -> 4 -> 1 -> 4 -> ... (R[1] = [4], R[4] = [1, 2]), a path that never
        // visits a "heat" state, so AF("heat") does not hold at 0.
        let k = demo_k7();
        let phi = Phi::mk_af(Phi::mk_atom(Ap::new("heat")));
        assert!(!check(&k, 0, &phi));
        for &s in &[3, 5, 6] {
            assert!(check(&k, s, &phi), "expected AF(heat) to hold at state {s}");
        }
        for &s in &[0, 1, 2, 4] {
            assert!(!check(&k, s, &phi), "expected AF(heat) to fail at state {s}");
        }
    }

    #[test]
    fn satisfies_matches_conjunction_of_initial_checks() {
        let k = demo_k7();
        let phi = Phi::mk_ag(Phi::mk_impl(
            Phi::mk_atom(Ap::new("start")),
            Phi::mk_af(Phi::mk_atom(Ap::new("heat"))),
        ));
        // False at state 0 (and 1-4): "start" holds at {1, 4, 5, 6} but AF("heat") only holds at
        // {3, 5, 6}, so the implication fails at {1, 4}, and backward-True-reachability from
        // {1, 4} covers {0, 1, 2, 3, 4} - including the sole initial state.
        let expected = k.initial_states().iter().all(|&s| check(&k, s, &phi));
        assert!(!expected);
        assert_eq!(satisfies(&k, &phi), expected);
    }

    #[test]
    fn duality_holds() {
        let k = demo_k7();
        let phi = Phi::mk_ex(Phi::mk_atom(Ap::new("start")));
        for s in 0..k.state_count() {
            assert_eq!(check(&k, s, &Phi::mk_not(phi.clone())), !check(&k, s, &phi));
        }
    }

    #[test]
    fn cache_is_sound_across_clear() {
        let k = demo_k7();
        let phi = Phi::mk_af(Phi::mk_atom(Ap::new("heat")));
        let first = check(&k, 0, &phi);
        let second = check(&k, 0, &phi);
        assert_eq!(first, second);
        k.clear_cache();
        assert_eq!(check(&k, 0, &phi), first);
    }

    #[test]
    fn ag_and_not_eu_not_agree() {
        let k = demo_k7();
        let heat = Phi::mk_atom(Ap::new("heat"));
        let ag = Phi::mk_ag(heat.clone());
        let hand_built = Phi::mk_not(Phi::mk_eu(Phi::mk_true(), Phi::mk_not(heat)));
        for s in 0..k.state_count() {
            assert_eq!(check(&k, s, &ag), check(&k, s, &hand_built));
        }
    }

    #[test]
    fn au_respects_deadlock_without_psi2() {
        // A state with no successors that does not satisfy psi2 never enters AU's result.
        let successors = vec![Vec::new()];
        let k = Kripke::new(vec![0], successors, HashMap::new()).unwrap();
        let phi = Phi::mk_au(Phi::mk_true(), Phi::mk_atom(Ap::new("done")));
        assert!(!check(&k, 0, &phi));
    }

    #[test]
    fn satisfies_agrees_with_per_state_check_over_all_initial_states() {
        let successors = vec![vec![1], vec![0, 2], vec![1]];
        let mut labels = HashMap::new();
        labels.insert(2, HashSet::from([Ap::new("p")]));
        let k = Kripke::new(vec![0, 1], successors, labels).unwrap();
        let phi = Phi::mk_ef(Phi::mk_atom(Ap::new("p")));
        let expected = k.initial_states().iter().all(|&s| check(&k, s, &phi));
        assert_eq!(satisfies(&k, &phi), expected);
    }

    /// Every row of the derived-operator table agrees with a hand-built desugaring, over every
    /// state of the demo structure.
    #[test]
    fn derived_operators_agree_with_hand_built_desugarings() {
        let k = demo_k7();
        let a = Phi::mk_atom(Ap::new("start"));
        let b = Phi::mk_atom(Ap::new("heat"));

        let pairs = vec![
            (Phi::mk_false(), Phi::mk_not(Phi::mk_true())),
            (
                Phi::mk_or(a.clone(), b.clone()),
                Phi::mk_not(Phi::mk_and(Phi::mk_not(a.clone()), Phi::mk_not(b.clone()))),
            ),
            (
                Phi::mk_impl(a.clone(), b.clone()),
                Phi::mk_or(Phi::mk_not(a.clone()), b.clone()),
            ),
            (Phi::mk_ef(a.clone()), Phi::mk_eu(Phi::mk_true(), a.clone())),
            (
                Phi::mk_eg(a.clone()),
                Phi::mk_not(Phi::mk_au(Phi::mk_true(), Phi::mk_not(a.clone()))),
            ),
            (
                Phi::mk_ax(a.clone()),
                Phi::mk_not(Phi::mk_ex(Phi::mk_not(a.clone()))),
            ),
            (Phi::mk_af(a.clone()), Phi::mk_au(Phi::mk_true(), a.clone())),
            (
                Phi::mk_ag(a.clone()),
                Phi::mk_not(Phi::mk_eu(Phi::mk_true(), Phi::mk_not(a.clone()))),
            ),
            (
                Phi::mk_ar(a.clone(), b.clone()),
                Phi::mk_not(Phi::mk_eu(Phi::mk_not(a.clone()), Phi::mk_not(b.clone()))),
            ),
            (
                Phi::mk_er(a.clone(), b.clone()),
                Phi::mk_not(Phi::mk_au(Phi::mk_not(a.clone()), Phi::mk_not(b.clone()))),
            ),
            (
                Phi::mk_ew(a.clone(), b.clone()),
                Phi::mk_or(
                    Phi::mk_eu(a.clone(), b.clone()),
                    Phi::mk_not(Phi::mk_au(Phi::mk_true(), Phi::mk_not(a.clone()))),
                ),
            ),
            (
                Phi::mk_aw(a.clone(), b.clone()),
                Phi::mk_not(Phi::mk_eu(
                    Phi::mk_not(b.clone()),
                    Phi::mk_and(Phi::mk_not(a.clone()), Phi::mk_not(b.clone())),
                )),
            ),
            (
                Phi::mk_es(a.clone(), b.clone()),
                Phi::mk_eu(b.clone(), Phi::mk_and(a.clone(), b.clone())),
            ),
            (
                Phi::mk_as(a.clone(), b.clone()),
                Phi::mk_and(
                    Phi::mk_not(Phi::mk_eu(Phi::mk_not(a.clone()), Phi::mk_not(b.clone()))),
                    Phi::mk_au(Phi::mk_true(), a.clone()),
                ),
            ),
        ];

        for (derived, hand_built) in pairs {
            for s in 0..k.state_count() {
                assert_eq!(
                    check(&k, s, &derived),
                    check(&k, s, &hand_built),
                    "mismatch for {derived} at state {s}"
                );
            }
        }
    }
}
