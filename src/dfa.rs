use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::iter;

use bit_vec::BitVec;
use log::{debug, trace};

use crate::automaton::Automaton;
use crate::error::{AutomatonError, MalformedError};
use crate::transition::{fmt_set, Numbering, State, Symbol, TransitionKey};

/// The outgoing transitions of a single state, indexed by symbol.
#[derive(Clone, Debug)]
pub(crate) struct DfaState {
    pub(crate) transitions: Box<[Option<usize>]>,
}

/// A deterministic finite automaton `(Q, Σ, δ, q₀, F)`.
///
/// The transition function does not have to be total, but running into a
/// missing transition is an error rather than a rejection.
#[derive(Clone, Debug)]
pub struct Dfa {
    q: BTreeSet<State>,
    sigma: BTreeSet<Symbol>,
    delta: BTreeMap<TransitionKey, State>,
    q0: State,
    f: BTreeSet<State>,

    numbering: Numbering,
    states: Box<[DfaState]>,
    start: usize,
    finals: BitVec,
}

impl Dfa {
    /// Creates a deterministic automaton, rejecting definitions that refer to
    /// states outside of `states` or symbols outside of `alphabet`.
    ///
    /// When a key occurs more than once the last target wins.
    pub fn new<Q, A, S, D, F>(
        states: Q,
        alphabet: A,
        transitions: D,
        start: State,
        accepting: F,
    ) -> Result<Self, AutomatonError>
    where
        Q: IntoIterator<Item = State>,
        A: IntoIterator<Item = S>,
        S: Into<Symbol>,
        D: IntoIterator<Item = (TransitionKey, State)>,
        F: IntoIterator<Item = State>,
    {
        let q: BTreeSet<State> = states.into_iter().collect();
        let sigma: BTreeSet<Symbol> = alphabet.into_iter().map(Into::into).collect();
        let delta: BTreeMap<TransitionKey, State> = transitions.into_iter().collect();
        let f: BTreeSet<State> = accepting.into_iter().collect();

        let numbering = Numbering::new(&q, &sigma);
        let start_index = numbering.start(start)?;

        let mut finals = BitVec::from_elem(numbering.num_of_states(), false);
        for &state in &f {
            finals.set(numbering.accepting(state)?, true);
        }

        let mut table = vec![vec![None; numbering.num_of_symbols()]; numbering.num_of_states()];
        for (key, &to) in &delta {
            let (from, symbol) = numbering.key(key)?;
            let symbol = symbol.ok_or_else(|| MalformedError::EpsilonInDeterministic(key.clone()))?;
            table[from][symbol] = Some(numbering.target(key, to)?);
        }

        debug!(
            "Created DFA with {} states, {} symbols and {} transitions",
            q.len(),
            sigma.len(),
            delta.len()
        );

        Ok(Dfa {
            q,
            sigma,
            delta,
            q0: start,
            f,
            numbering,
            states: table
                .into_iter()
                .map(|transitions| DfaState {
                    transitions: transitions.into_boxed_slice(),
                })
                .collect(),
            start: start_index,
            finals,
        })
    }

    /// Assembles an automaton whose states are exactly `0..table.len()`, so
    /// that dense indices and state identifiers coincide.
    pub(crate) fn from_table(
        sigma: BTreeSet<Symbol>,
        table: Vec<DfaState>,
        start: usize,
        finals: BitVec,
    ) -> Self {
        let q: BTreeSet<State> = (0..table.len()).collect();
        let numbering = Numbering::new(&q, &sigma);

        let mut delta = BTreeMap::new();
        for (from, state) in table.iter().enumerate() {
            for (symbol, to) in state.transitions.iter().enumerate() {
                if let Some(to) = *to {
                    delta.insert(TransitionKey::new(from, numbering.symbol_at(symbol)), to);
                }
            }
        }
        let f = finals
            .iter()
            .enumerate()
            .filter(|&(_, is_final)| is_final)
            .map(|(state, _)| state)
            .collect();

        Dfa {
            q,
            sigma,
            delta,
            q0: start,
            f,
            numbering,
            states: table.into_boxed_slice(),
            start,
            finals,
        }
    }

    pub fn states(&self) -> &BTreeSet<State> {
        &self.q
    }

    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.sigma
    }

    pub fn transitions(&self) -> &BTreeMap<TransitionKey, State> {
        &self.delta
    }

    pub fn start_state(&self) -> State {
        self.q0
    }

    pub fn accepting_states(&self) -> &BTreeSet<State> {
        &self.f
    }

    /// Returns true iff every state has a transition for every symbol.
    pub fn is_total(&self) -> bool {
        self.states
            .iter()
            .all(|state| state.transitions.iter().all(Option::is_some))
    }

    pub(crate) fn numbering(&self) -> &Numbering {
        &self.numbering
    }

    pub(crate) fn dense_states(&self) -> &[DfaState] {
        &self.states
    }

    pub(crate) fn dense_start(&self) -> usize {
        self.start
    }

    pub(crate) fn dense_finals(&self) -> &BitVec {
        &self.finals
    }
}

impl Automaton for Dfa {
    type Configuration = usize;

    #[inline]
    fn start(&self) -> usize {
        self.start
    }

    #[inline]
    fn symbol_index(&self, symbol: &str) -> Option<usize> {
        self.numbering.symbol(symbol)
    }

    #[inline]
    fn step(&self, &state: &usize, symbol: usize) -> Result<usize, AutomatonError> {
        match self.states[state].transitions[symbol] {
            Some(next) => {
                trace!(
                    "{} --[{}]-> {}",
                    self.numbering.state_at(state),
                    self.numbering.symbol_at(symbol),
                    self.numbering.state_at(next)
                );
                Ok(next)
            }
            None => Err(AutomatonError::UndefinedTransition(TransitionKey::new(
                self.numbering.state_at(state),
                self.numbering.symbol_at(symbol),
            ))),
        }
    }

    #[inline]
    fn is_accepting(&self, &state: &usize) -> bool {
        self.finals[state]
    }

    fn active_states(&self, &state: &usize) -> BTreeSet<State> {
        iter::once(self.numbering.state_at(state)).collect()
    }
}

impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "DFA (")?;
        writeln!(f, "Q = {},", fmt_set(&self.q))?;
        writeln!(f, "Σ = {},", fmt_set(&self.sigma))?;
        writeln!(
            f,
            "δ = {},",
            fmt_set(self.delta.iter().map(|(key, to)| format!("{key}={to}")))
        )?;
        writeln!(f, "q₀ = {},", self.q0)?;
        writeln!(f, "F = {}", fmt_set(&self.f))?;
        write!(f, ")")
    }
}
