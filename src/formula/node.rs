//! The syntax tree for CTL formulae and the smart constructors used to build it.

use std::fmt;
use std::rc::Rc;

/// An atomic proposition: an opaque, string-shaped observation attached to a state.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct Ap(pub String);

impl Ap {
    pub fn new(name: impl Into<String>) -> Ap {
        Ap(name.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Ap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The seven primitive shapes a CTL formula node can take.
///
/// Every other operator in the grammar (see [crate::formula::parser]) desugars into these at
/// construction time; `PhiNode` itself never grows a case for a derived operator.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum PhiNode {
    True,
    Atom(Ap),
    Not(Phi),
    And(Phi, Phi),
    Ex(Phi),
    Eu(Phi, Phi),
    Au(Phi, Phi),
}

/// A cheaply-cloned handle to a [PhiNode].
///
/// `Phi` wraps an `Rc<PhiNode>` so that `Clone` is O(1), but `PartialEq`/`Eq`/`Hash` forward to
/// the pointee's structural value rather than the pointer: two formulas built from separate
/// allocations with the same shape compare equal and hash identically. This is what lets a
/// [crate::kripke::Kripke]'s cache key on `Phi` and have two independently constructed copies of
/// the same subformula share one cache entry.
#[derive(Clone, Debug)]
pub struct Phi(Rc<PhiNode>);

impl Phi {
    fn new(node: PhiNode) -> Phi {
        Phi(Rc::new(node))
    }

    pub fn node(&self) -> &PhiNode {
        &self.0
    }

    /// The `true` constant.
    pub fn mk_true() -> Phi {
        Phi::new(PhiNode::True)
    }

    /// An atomic proposition leaf.
    pub fn mk_atom(ap: Ap) -> Phi {
        Phi::new(PhiNode::Atom(ap))
    }

    /// Negation. Collapses `Not(Not(phi))` back to `phi`, the one normalization this tree
    /// performs at construction time.
    pub fn mk_not(phi: Phi) -> Phi {
        match phi.node() {
            PhiNode::Not(inner) => inner.clone(),
            _ => Phi::new(PhiNode::Not(phi)),
        }
    }

    /// Conjunction.
    pub fn mk_and(lhs: Phi, rhs: Phi) -> Phi {
        Phi::new(PhiNode::And(lhs, rhs))
    }

    /// `EX phi` — exists a successor state where `phi` holds.
    pub fn mk_ex(phi: Phi) -> Phi {
        Phi::new(PhiNode::Ex(phi))
    }

    /// `E[phi1 U phi2]` — exists a path along which `phi1` holds until `phi2` holds.
    pub fn mk_eu(phi1: Phi, phi2: Phi) -> Phi {
        Phi::new(PhiNode::Eu(phi1, phi2))
    }

    /// `A[phi1 U phi2]` — on every path, `phi1` holds until `phi2` holds.
    pub fn mk_au(phi1: Phi, phi2: Phi) -> Phi {
        Phi::new(PhiNode::Au(phi1, phi2))
    }

    // --- Derived operators, desugared eagerly into the seven primitives above. ---

    /// The `false` constant: `Not(True)`.
    pub fn mk_false() -> Phi {
        Phi::mk_not(Phi::mk_true())
    }

    /// Disjunction: `Not(And(Not(a), Not(b)))`.
    pub fn mk_or(lhs: Phi, rhs: Phi) -> Phi {
        Phi::mk_not(Phi::mk_and(Phi::mk_not(lhs), Phi::mk_not(rhs)))
    }

    /// Implication: `Or(Not(a), b)`.
    pub fn mk_impl(lhs: Phi, rhs: Phi) -> Phi {
        Phi::mk_or(Phi::mk_not(lhs), rhs)
    }

    /// `EF phi`: `E[true U phi]`.
    pub fn mk_ef(phi: Phi) -> Phi {
        Phi::mk_eu(Phi::mk_true(), phi)
    }

    /// `EG phi`: `Not(A[true U Not(phi)])`.
    pub fn mk_eg(phi: Phi) -> Phi {
        Phi::mk_not(Phi::mk_au(Phi::mk_true(), Phi::mk_not(phi)))
    }

    /// `AX phi`: `Not(EX(Not(phi)))`.
    pub fn mk_ax(phi: Phi) -> Phi {
        Phi::mk_not(Phi::mk_ex(Phi::mk_not(phi)))
    }

    /// `AF phi`: `A[true U phi]`.
    pub fn mk_af(phi: Phi) -> Phi {
        Phi::mk_au(Phi::mk_true(), phi)
    }

    /// `AG phi`: `Not(E[true U Not(phi)])`.
    pub fn mk_ag(phi: Phi) -> Phi {
        Phi::mk_not(Phi::mk_eu(Phi::mk_true(), Phi::mk_not(phi)))
    }

    /// `A[a R b]` (release): `Not(E[Not(a) U Not(b)])`.
    pub fn mk_ar(lhs: Phi, rhs: Phi) -> Phi {
        Phi::mk_not(Phi::mk_eu(Phi::mk_not(lhs), Phi::mk_not(rhs)))
    }

    /// `E[a R b]` (release): `Not(A[Not(a) U Not(b)])`.
    pub fn mk_er(lhs: Phi, rhs: Phi) -> Phi {
        Phi::mk_not(Phi::mk_au(Phi::mk_not(lhs), Phi::mk_not(rhs)))
    }

    /// `E[a W b]` (weak until): `Or(E[a U b], EG(a))`.
    pub fn mk_ew(lhs: Phi, rhs: Phi) -> Phi {
        Phi::mk_or(
            Phi::mk_eu(lhs.clone(), rhs),
            Phi::mk_not(Phi::mk_au(Phi::mk_true(), Phi::mk_not(lhs))),
        )
    }

    /// `A[a W b]` (weak until): `Not(E[Not(b) U (Not(a) And Not(b))])`.
    pub fn mk_aw(lhs: Phi, rhs: Phi) -> Phi {
        Phi::mk_not(Phi::mk_eu(
            Phi::mk_not(rhs.clone()),
            Phi::mk_and(Phi::mk_not(lhs), Phi::mk_not(rhs)),
        ))
    }

    /// `E[a S b]` (strong since, read as a future-facing "since" in this branching-time
    /// reading): `E[b U (a And b)]`.
    pub fn mk_es(lhs: Phi, rhs: Phi) -> Phi {
        Phi::mk_eu(rhs.clone(), Phi::mk_and(lhs, rhs))
    }

    /// `A[a S b]`: `And(Not(E[Not(a) U Not(b)]), AF(a))`.
    pub fn mk_as(lhs: Phi, rhs: Phi) -> Phi {
        Phi::mk_and(
            Phi::mk_not(Phi::mk_eu(Phi::mk_not(lhs.clone()), Phi::mk_not(rhs))),
            Phi::mk_au(Phi::mk_true(), lhs),
        )
    }
}

impl PartialEq for Phi {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Phi {}

impl std::hash::Hash for Phi {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl fmt::Display for Phi {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.node() {
            PhiNode::True => write!(f, "true"),
            PhiNode::Atom(ap) => write!(f, "\"{ap}\""),
            PhiNode::Not(phi) => write!(f, "-{phi}"),
            PhiNode::And(lhs, rhs) => write!(f, "({lhs}a{rhs})"),
            PhiNode::Ex(phi) => write!(f, "EX{phi}"),
            PhiNode::Eu(phi1, phi2) => write!(f, "E({phi1}U{phi2})"),
            PhiNode::Au(phi1, phi2) => write!(f, "A({phi1}U{phi2})"),
        }
    }
}
