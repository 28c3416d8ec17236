#![allow(dead_code)]

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use automata::{Dfa, Nfa, State, TransitionKey};

pub const ALPHABET: [&str; 3] = ["a", "b", "c"];

lazy_static! {
    /// Accepts binary strings of even length.
    pub static ref EVEN_LENGTH: Dfa = Dfa::new(
        vec![0, 1],
        vec!["0", "1"],
        vec![
            (TransitionKey::new(0, "0"), 1),
            (TransitionKey::new(0, "1"), 1),
            (TransitionKey::new(1, "0"), 0),
            (TransitionKey::new(1, "1"), 0),
        ],
        0,
        vec![0],
    )
    .unwrap();

    /// Branches over epsilon into `0 1*` and `1*`.
    pub static ref EPSILON_BRANCH: Nfa = Nfa::new(
        vec![0, 1, 2, 3],
        vec!["0", "1"],
        vec![
            (TransitionKey::epsilon(0), vec![1, 3]),
            (TransitionKey::new(1, "0"), vec![2]),
            (TransitionKey::new(2, "1"), vec![2]),
            (TransitionKey::new(3, "1"), vec![3]),
        ],
        0,
        vec![2, 3],
    )
    .unwrap();
}

/// Runs `test` the given number of times with a freshly seeded generator. The
/// seed is printed so that a failure can be reproduced.
pub fn random_test<F>(iterations: usize, mut test: F)
where
    F: FnMut(&mut StdRng),
{
    let seed: u64 = rand::rng().random();
    println!("random seed: {seed}");
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..iterations {
        test(&mut rng);
    }
}

/// Picks state identifiers that are deliberately not `0..num_of_states`.
fn random_states(rng: &mut StdRng, num_of_states: usize) -> Vec<State> {
    let offset = rng.random_range(0..100);
    (0..num_of_states).map(|n| offset + 3 * n).collect()
}

fn random_subset(rng: &mut StdRng, states: &[State], probability: f64) -> BTreeSet<State> {
    states
        .iter()
        .cloned()
        .filter(|_| rng.random_bool(probability))
        .collect()
}

/// A random epsilon-NFA over `ALPHABET`, epsilon cycles included.
pub fn random_nfa(rng: &mut StdRng, max_states: usize) -> Nfa {
    let num_of_states = rng.random_range(1..=max_states);
    let states = random_states(rng, num_of_states);

    let mut transitions = Vec::new();
    for &state in &states {
        for symbol in ALPHABET {
            if rng.random_bool(0.7) {
                let targets = random_subset(rng, &states, 0.3);
                transitions.push((TransitionKey::new(state, symbol), targets));
            }
        }
        if rng.random_bool(0.4) {
            let targets = random_subset(rng, &states, 0.3);
            transitions.push((TransitionKey::epsilon(state), targets));
        }
    }

    let start = *states.choose(rng).unwrap();
    let accepting = random_subset(rng, &states, 0.3);
    Nfa::new(states, ALPHABET, transitions, start, accepting).unwrap()
}

/// A random DFA over `ALPHABET` whose transition function is total.
pub fn random_total_dfa(rng: &mut StdRng, max_states: usize) -> Dfa {
    let num_of_states = rng.random_range(1..=max_states);
    let states = random_states(rng, num_of_states);

    let mut transitions = Vec::new();
    for &state in &states {
        for symbol in ALPHABET {
            let target = *states.choose(rng).unwrap();
            transitions.push((TransitionKey::new(state, symbol), target));
        }
    }

    let start = *states.choose(rng).unwrap();
    let accepting = random_subset(rng, &states, 0.4);
    Dfa::new(states, ALPHABET, transitions, start, accepting).unwrap()
}

pub fn random_word(rng: &mut StdRng, max_length: usize) -> Vec<&'static str> {
    let length = rng.random_range(0..=max_length);
    (0..length)
        .map(|_| *ALPHABET.choose(rng).unwrap())
        .collect()
}
