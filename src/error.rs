use thiserror::Error;

use crate::transition::{State, Symbol, TransitionKey};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    #[error("No such symbol in the alphabet: {0}")]
    Alphabet(Symbol),

    #[error("No such transition: {0}")]
    UndefinedTransition(TransitionKey),

    #[error("Malformed automaton: {0}")]
    Malformed(#[from] MalformedError),
}

/// Reasons an automaton definition is rejected at construction time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedError {
    #[error("start state {0} is not in Q")]
    UnknownStartState(State),

    #[error("accepting state {0} is not in Q")]
    UnknownAcceptingState(State),

    #[error("transition {0} starts in a state that is not in Q")]
    UnknownSourceState(TransitionKey),

    #[error("transition {0} reads a symbol that is not in Σ")]
    UnknownSymbol(TransitionKey),

    #[error("transition {0} targets state {1} which is not in Q")]
    UnknownTargetState(TransitionKey, State),

    #[error("transition {0} is an epsilon transition in a deterministic automaton")]
    EpsilonInDeterministic(TransitionKey),
}
