//! An explicit-state Computation Tree Logic (CTL) model checker.
//!
//! Given a finite Kripke structure and a CTL formula, decides whether the formula holds at any
//! given state, and in particular whether it holds in every initial state. The core is a
//! seven-shape formula AST (`formula`), a marking-based labeling algorithm with a per-structure
//! memoization cache (`checker`), and the Kripke structure the algorithm runs over (`kripke`).
//! Around that core sit the ambient concerns a complete crate carries regardless of scope: a
//! structured error taxonomy (`error`), JSON ingestion of Kripke structures (`ingestion`), and
//! human-readable result reporting (`report`).

pub mod checker;
pub mod error;
pub mod formula;
pub mod ingestion;
pub mod kripke;
pub mod report;
