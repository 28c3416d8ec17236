//! Deterministic and nondeterministic (epsilon) finite automata over an
//! explicit alphabet of string symbols.

pub mod automaton;
pub mod dfa;
pub mod error;
pub mod nfa;
pub mod transition;

pub use automaton::{Automaton, Steps};
pub use dfa::Dfa;
pub use error::{AutomatonError, MalformedError};
pub use nfa::Nfa;
pub use transition::{State, Symbol, TransitionKey};
