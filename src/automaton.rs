use std::collections::BTreeSet;
use std::fmt::Debug;

use crate::error::AutomatonError;
use crate::transition::State;

/// The run loop shared by the deterministic and the nondeterministic engine.
///
/// An engine only describes a single step over an already validated symbol,
/// checking the input against the alphabet and folding over it happens here.
pub trait Automaton {
    /// The engine specific snapshot of where a run currently is.
    type Configuration: Clone + Debug;

    fn start(&self) -> Self::Configuration;

    /// The position of `symbol` in the alphabet, `None` if it is not part of it.
    fn symbol_index(&self, symbol: &str) -> Option<usize>;

    fn step(
        &self,
        configuration: &Self::Configuration,
        symbol: usize,
    ) -> Result<Self::Configuration, AutomatonError>;

    fn is_accepting(&self, configuration: &Self::Configuration) -> bool;

    /// Translates a configuration back into the states of `Q`.
    fn active_states(&self, configuration: &Self::Configuration) -> BTreeSet<State>;

    #[inline]
    fn advance(
        &self,
        configuration: &Self::Configuration,
        symbol: &str,
    ) -> Result<Self::Configuration, AutomatonError> {
        match self.symbol_index(symbol) {
            Some(symbol) => self.step(configuration, symbol),
            None => Err(AutomatonError::Alphabet(symbol.to_string())),
        }
    }

    /// Decides whether the automaton accepts `input`.
    ///
    /// The first symbol that is not in the alphabet (or, for a deterministic
    /// automaton, the first undefined transition) aborts the run.
    fn run<I, S>(&self, input: I) -> Result<bool, AutomatonError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut configuration = self.start();
        for symbol in input {
            configuration = self.advance(&configuration, symbol.as_ref())?;
        }
        Ok(self.is_accepting(&configuration))
    }

    /// Iterates over the configurations after every consumed symbol.
    fn steps<I, S>(&self, input: I) -> Steps<'_, Self, I::IntoIter>
    where
        Self: Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Steps {
            aut: self,
            input: input.into_iter(),
            configuration: Some(self.start()),
        }
    }
}

/// An iterator over the configurations of a run.
///
/// This iterator yields `Result<A::Configuration, AutomatonError>` values and
/// is exhausted after the first error.
#[derive(Debug)]
pub struct Steps<'a, A: 'a + Automaton, I> {
    aut: &'a A,
    input: I,
    configuration: Option<A::Configuration>,
}

impl<'a, A, I, S> Iterator for Steps<'a, A, I>
where
    A: Automaton,
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<A::Configuration, AutomatonError>;

    fn next(&mut self) -> Option<Self::Item> {
        let configuration = self.configuration.as_ref()?;
        let symbol = self.input.next()?;
        match self.aut.advance(configuration, symbol.as_ref()) {
            Ok(next) => {
                self.configuration = Some(next.clone());
                Some(Ok(next))
            }
            Err(err) => {
                self.configuration = None;
                Some(Err(err))
            }
        }
    }
}
