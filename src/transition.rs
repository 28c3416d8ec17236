use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::error::MalformedError;

/// States are plain numbers, they carry no data besides membership of `Q`.
pub type State = usize;

/// A real input symbol. Epsilon is never a `Symbol`, see `TransitionKey`.
pub type Symbol = String;

/// The left-hand side of a transition: `δ(state, symbol)`.
///
/// A key without a symbol is an epsilon (silent) transition. Keeping epsilon as
/// `None` instead of a reserved string means it can never collide with a symbol
/// of the alphabet.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TransitionKey {
    state: State,
    symbol: Option<Symbol>,
}

impl TransitionKey {
    pub fn new<S: Into<Symbol>>(state: State, symbol: S) -> Self {
        TransitionKey {
            state,
            symbol: Some(symbol.into()),
        }
    }

    pub fn epsilon(state: State) -> Self {
        TransitionKey {
            state,
            symbol: None,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// `None` for an epsilon key.
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn is_epsilon(&self) -> bool {
        self.symbol.is_none()
    }
}

impl From<(State, Option<Symbol>)> for TransitionKey {
    fn from((state, symbol): (State, Option<Symbol>)) -> Self {
        TransitionKey { state, symbol }
    }
}

impl fmt::Display for TransitionKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.symbol {
            Some(ref symbol) => write!(f, "δ({}, {})", self.state, symbol),
            None => write!(f, "δ({}, ε)", self.state),
        }
    }
}

/// Maps the states of `Q` and the symbols of `Σ` onto dense indices, given by
/// their position in sorted order. The engines only work on these indices.
#[derive(Clone, Debug)]
pub(crate) struct Numbering {
    states: Vec<State>,
    state_index: HashMap<State, usize>,
    symbols: Vec<Symbol>,
    symbol_index: HashMap<Symbol, usize>,
}

impl Numbering {
    pub(crate) fn new(states: &BTreeSet<State>, alphabet: &BTreeSet<Symbol>) -> Self {
        Numbering {
            states: states.iter().cloned().collect(),
            state_index: states.iter().enumerate().map(|(n, &st)| (st, n)).collect(),
            symbols: alphabet.iter().cloned().collect(),
            symbol_index: alphabet
                .iter()
                .enumerate()
                .map(|(n, sym)| (sym.clone(), n))
                .collect(),
        }
    }

    #[inline]
    pub(crate) fn num_of_states(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub(crate) fn num_of_symbols(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub(crate) fn state(&self, state: State) -> Option<usize> {
        self.state_index.get(&state).cloned()
    }

    #[inline]
    pub(crate) fn symbol(&self, symbol: &str) -> Option<usize> {
        self.symbol_index.get(symbol).cloned()
    }

    #[inline]
    pub(crate) fn state_at(&self, index: usize) -> State {
        self.states[index]
    }

    #[inline]
    pub(crate) fn symbol_at(&self, index: usize) -> &str {
        &self.symbols[index]
    }

    pub(crate) fn start(&self, state: State) -> Result<usize, MalformedError> {
        self.state(state)
            .ok_or(MalformedError::UnknownStartState(state))
    }

    pub(crate) fn accepting(&self, state: State) -> Result<usize, MalformedError> {
        self.state(state)
            .ok_or(MalformedError::UnknownAcceptingState(state))
    }

    /// Resolves the source state and the symbol of `key`, the symbol is `None`
    /// for epsilon keys.
    pub(crate) fn key(&self, key: &TransitionKey) -> Result<(usize, Option<usize>), MalformedError> {
        let from = self
            .state(key.state)
            .ok_or_else(|| MalformedError::UnknownSourceState(key.clone()))?;
        match key.symbol {
            Some(ref symbol) => {
                let symbol = self
                    .symbol(symbol)
                    .ok_or_else(|| MalformedError::UnknownSymbol(key.clone()))?;
                Ok((from, Some(symbol)))
            }
            None => Ok((from, None)),
        }
    }

    pub(crate) fn target(&self, key: &TransitionKey, state: State) -> Result<usize, MalformedError> {
        self.state(state)
            .ok_or_else(|| MalformedError::UnknownTargetState(key.clone(), state))
    }
}

/// Renders `{a, b, c}`.
pub(crate) fn fmt_set<T, I>(items: I) -> String
where
    T: fmt::Display,
    I: IntoIterator<Item = T>,
{
    let items: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
    format!("{{{}}}", items.join(", "))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use test_log::test;

    use super::*;

    #[test]
    fn test_key_equality_by_value() {
        assert_eq!(TransitionKey::new(1, "a"), TransitionKey::new(1, String::from("a")));
        assert_eq!(TransitionKey::epsilon(1), TransitionKey::from((1, None::<Symbol>)));
        assert_ne!(TransitionKey::new(1, "a"), TransitionKey::new(2, "a"));
        assert_ne!(TransitionKey::new(1, "a"), TransitionKey::new(1, "b"));
    }

    #[test]
    fn test_epsilon_is_not_a_symbol() {
        // Not even the empty string or a literal "ε" is epsilon.
        assert_ne!(TransitionKey::epsilon(0), TransitionKey::new(0, ""));
        assert_ne!(TransitionKey::epsilon(0), TransitionKey::new(0, "ε"));
        assert!(TransitionKey::epsilon(0).is_epsilon());
        assert!(!TransitionKey::new(0, "").is_epsilon());
    }

    #[test]
    fn test_key_hashing() {
        let keys: HashSet<TransitionKey> = vec![
            TransitionKey::new(0, "0"),
            TransitionKey::new(0, "0"),
            TransitionKey::epsilon(0),
            TransitionKey::epsilon(0),
        ]
        .into_iter()
        .collect();
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_numbering_is_sorted() {
        let states: BTreeSet<State> = [30, 10, 20].into_iter().collect();
        let alphabet: BTreeSet<Symbol> = ["b", "a"].iter().map(|s| s.to_string()).collect();
        let numbering = Numbering::new(&states, &alphabet);

        assert_eq!(numbering.num_of_states(), 3);
        assert_eq!(numbering.state(10), Some(0));
        assert_eq!(numbering.state(30), Some(2));
        assert_eq!(numbering.state(15), None);
        assert_eq!(numbering.state_at(1), 20);
        assert_eq!(numbering.symbol("a"), Some(0));
        assert_eq!(numbering.symbol_at(1), "b");
        assert_eq!(numbering.symbol("c"), None);

        assert_eq!(numbering.key(&TransitionKey::epsilon(20)), Ok((1, None)));
        assert_eq!(numbering.key(&TransitionKey::new(20, "b")), Ok((1, Some(1))));
        assert_eq!(
            numbering.key(&TransitionKey::new(20, "c")),
            Err(MalformedError::UnknownSymbol(TransitionKey::new(20, "c")))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(TransitionKey::new(3, "1").to_string(), "δ(3, 1)");
        assert_eq!(TransitionKey::epsilon(3).to_string(), "δ(3, ε)");
    }
}
