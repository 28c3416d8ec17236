use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use bit_set::BitSet;
use bit_vec::BitVec;
use log::{debug, trace};

use crate::automaton::Automaton;
use crate::dfa::{Dfa, DfaState};
use crate::error::AutomatonError;
use crate::transition::{fmt_set, Numbering, State, Symbol, TransitionKey};

#[derive(Clone, Debug)]
struct NfaState {
    // Symbol -> Set<StateRef>
    transitions: Box<[BitSet]>,
    // Targets of the epsilon transitions
    epsilons: BitSet,
}

/// A nondeterministic finite automaton with epsilon transitions
/// `(Q, Σ, δ, q₀, F)`, where `δ` maps a key to a set of states.
///
/// A missing transition is not an error here, the branch simply dies.
#[derive(Clone, Debug)]
pub struct Nfa {
    q: BTreeSet<State>,
    sigma: BTreeSet<Symbol>,
    delta: BTreeMap<TransitionKey, BTreeSet<State>>,
    q0: State,
    f: BTreeSet<State>,

    numbering: Numbering,
    states: Box<[NfaState]>,
    start: usize,
    finals: BitSet,
}

impl Nfa {
    /// Creates a nondeterministic automaton, rejecting definitions that refer
    /// to states outside of `states` or symbols outside of `alphabet`.
    ///
    /// The targets of a key that occurs more than once are merged.
    pub fn new<Q, A, S, D, T, F>(
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
        D: IntoIterator<Item = (TransitionKey, T)>,
        T: IntoIterator<Item = State>,
        F: IntoIterator<Item = State>,
    {
        let q: BTreeSet<State> = states.into_iter().collect();
        let sigma: BTreeSet<Symbol> = alphabet.into_iter().map(Into::into).collect();
        let f: BTreeSet<State> = accepting.into_iter().collect();

        let mut delta: BTreeMap<TransitionKey, BTreeSet<State>> = BTreeMap::new();
        for (key, targets) in transitions {
            delta.entry(key).or_default().extend(targets);
        }

        let numbering = Numbering::new(&q, &sigma);
        let start_index = numbering.start(start)?;

        let mut finals = BitSet::with_capacity(numbering.num_of_states());
        for &state in &f {
            finals.insert(numbering.accepting(state)?);
        }

        let mut states: Vec<NfaState> = (0..numbering.num_of_states())
            .map(|_| NfaState::new(numbering.num_of_symbols()))
            .collect();
        for (key, targets) in &delta {
            let (from, symbol) = numbering.key(key)?;
            let dest = match symbol {
                Some(symbol) => &mut states[from].transitions[symbol],
                None => &mut states[from].epsilons,
            };
            for &to in targets {
                dest.insert(numbering.target(key, to)?);
            }
        }

        debug!(
            "Created NFA with {} states, {} symbols and {} transition keys",
            q.len(),
            sigma.len(),
            delta.len()
        );

        Ok(Nfa {
            q,
            sigma,
            delta,
            q0: start,
            f,
            numbering,
            states: states.into_boxed_slice(),
            start: start_index,
            finals,
        })
    }

    /// Lifts a deterministic automaton: every target becomes a singleton set
    /// and no epsilon transitions are introduced.
    pub fn from_dfa(dfa: &Dfa) -> Self {
        let numbering = dfa.numbering().clone();

        let states: Box<[NfaState]> = dfa
            .dense_states()
            .iter()
            .map(|state| NfaState {
                transitions: state
                    .transitions
                    .iter()
                    .map(|to| to.iter().cloned().collect())
                    .collect(),
                epsilons: BitSet::new(),
            })
            .collect();

        let finals: BitSet = dfa
            .dense_finals()
            .iter()
            .enumerate()
            .filter(|&(_, is_final)| is_final)
            .map(|(state, _)| state)
            .collect();

        let delta: BTreeMap<TransitionKey, BTreeSet<State>> = dfa
            .transitions()
            .iter()
            .map(|(key, &to)| (key.clone(), [to].into_iter().collect()))
            .collect();

        debug!("Lifted DFA with {} states to an NFA", dfa.states().len());

        Nfa {
            q: dfa.states().clone(),
            sigma: dfa.alphabet().clone(),
            delta,
            q0: dfa.start_state(),
            f: dfa.accepting_states().clone(),
            numbering,
            states,
            start: dfa.dense_start(),
            finals,
        }
    }

    pub fn states(&self) -> &BTreeSet<State> {
        &self.q
    }

    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.sigma
    }

    pub fn transitions(&self) -> &BTreeMap<TransitionKey, BTreeSet<State>> {
        &self.delta
    }

    pub fn start_state(&self) -> State {
        self.q0
    }

    pub fn accepting_states(&self) -> &BTreeSet<State> {
        &self.f
    }

    /// The least superset of `states` that is closed under epsilon transitions.
    ///
    /// States outside of `Q` have no transitions, they are returned as given.
    pub fn epsilon_closure<I: IntoIterator<Item = State>>(&self, states: I) -> BTreeSet<State> {
        let mut result = BTreeSet::new();
        let mut dense = BitSet::with_capacity(self.states.len());
        for state in states {
            match self.numbering.state(state) {
                Some(index) => {
                    dense.insert(index);
                }
                None => {
                    result.insert(state);
                }
            }
        }

        self.close(&mut dense);
        result.extend(dense.iter().map(|index| self.numbering.state_at(index)));
        result
    }

    /// Closes `states` under epsilon transitions in place.
    ///
    /// A state is pushed on the worklist only when it is newly inserted, which
    /// bounds the work by the number of states even with epsilon cycles.
    fn close(&self, states: &mut BitSet) {
        let mut worklist: Vec<usize> = states.iter().collect();
        while let Some(state) = worklist.pop() {
            for target in &self.states[state].epsilons {
                if states.insert(target) {
                    worklist.push(target);
                }
            }
        }
    }

    /// All states reachable from `states` by reading `symbol`, followed by an
    /// epsilon closure.
    #[inline]
    fn next_states(&self, states: &BitSet, symbol: usize) -> BitSet {
        let mut nxt_states = BitSet::with_capacity(self.states.len());
        for state in states {
            nxt_states.union_with(&self.states[state].transitions[symbol]);
        }
        self.close(&mut nxt_states);
        nxt_states
    }

    /// Subset construction: every reachable set of active states becomes a
    /// single state of the returned automaton.
    ///
    /// States are numbered in order of discovery with the start set as `0`.
    /// The result is total over the same alphabet, the empty set becomes an
    /// ordinary rejecting sink when it is reachable.
    pub fn to_dfa(&self) -> Dfa {
        let num_of_symbols = self.numbering.num_of_symbols();

        let mut states = vec![vec![None; num_of_symbols]];
        let mut finals = BitVec::new();
        let mut states_map: HashMap<BTreeSet<usize>, usize> = HashMap::new();

        let cur_states = self.start();
        finals.push(self.is_accepting(&cur_states));
        states_map.insert(cur_states.iter().collect(), 0);

        let mut worklist = vec![(cur_states, 0)];
        while let Some((cur_states, cur_num)) = worklist.pop() {
            for symbol in 0..num_of_symbols {
                let nxt_states = self.next_states(&cur_states, symbol);
                let key: BTreeSet<usize> = nxt_states.iter().collect();

                let nxt_num = match states_map.get(&key) {
                    Some(&nxt_num) => nxt_num,
                    None => {
                        let nxt_num = states.len();
                        states.push(vec![None; num_of_symbols]);
                        finals.push(self.is_accepting(&nxt_states));
                        states_map.insert(key, nxt_num);
                        worklist.push((nxt_states, nxt_num));
                        nxt_num
                    }
                };

                states[cur_num][symbol] = Some(nxt_num);
            }
        }

        debug!(
            "Subset construction turned {} NFA states into {} DFA states",
            self.q.len(),
            states.len()
        );

        Dfa::from_table(
            self.sigma.clone(),
            states
                .into_iter()
                .map(|transitions| DfaState {
                    transitions: transitions.into_boxed_slice(),
                })
                .collect(),
            0,
            finals,
        )
    }
}

impl NfaState {
    fn new(num_of_symbols: usize) -> Self {
        NfaState {
            transitions: (0..num_of_symbols).map(|_| BitSet::new()).collect(),
            epsilons: BitSet::new(),
        }
    }
}

impl From<&Dfa> for Nfa {
    fn from(dfa: &Dfa) -> Self {
        Nfa::from_dfa(dfa)
    }
}

impl Automaton for Nfa {
    type Configuration = BitSet;

    fn start(&self) -> BitSet {
        let mut states = BitSet::with_capacity(self.states.len());
        states.insert(self.start);
        self.close(&mut states);
        states
    }

    #[inline]
    fn symbol_index(&self, symbol: &str) -> Option<usize> {
        self.numbering.symbol(symbol)
    }

    #[inline]
    fn step(&self, states: &BitSet, symbol: usize) -> Result<BitSet, AutomatonError> {
        // Once stuck the run can never accept again, only the alphabet checks remain.
        if states.is_empty() {
            return Ok(BitSet::new());
        }

        let nxt_states = self.next_states(states, symbol);
        trace!(
            "{} --[{}]-> {}",
            fmt_set(self.active_states(states)),
            self.numbering.symbol_at(symbol),
            fmt_set(self.active_states(&nxt_states))
        );
        Ok(nxt_states)
    }

    #[inline]
    fn is_accepting(&self, states: &BitSet) -> bool {
        !states.is_disjoint(&self.finals)
    }

    fn active_states(&self, states: &BitSet) -> BTreeSet<State> {
        states
            .iter()
            .map(|index| self.numbering.state_at(index))
            .collect()
    }
}

impl fmt::Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "NFA (")?;
        writeln!(f, "Q = {},", fmt_set(&self.q))?;
        writeln!(f, "Σ = {},", fmt_set(&self.sigma))?;
        writeln!(
            f,
            "δ = {},",
            fmt_set(
                self.delta
                    .iter()
                    .map(|(key, to)| format!("{key}={}", fmt_set(to)))
            )
        )?;
        writeln!(f, "q₀ = {},", self.q0)?;
        writeln!(f, "F = {}", fmt_set(&self.f))?;
        write!(f, ")")
    }
}
