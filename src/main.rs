use std::error::Error;

use log::info;

use automata::{Automaton, AutomatonError, Dfa, Nfa, TransitionKey};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    even_length_dfa()?;
    epsilon_branch_nfa()?;
    Ok(())
}

fn print_runs<A: Automaton>(automaton: &A, inputs: &[&[&str]]) -> Result<(), AutomatonError> {
    for &input in inputs {
        println!("{:?} -> {}", input, automaton.run(input)?);
    }
    Ok(())
}

/// Accepts binary strings of even length: (00 | 01 | 10 | 11)*
fn even_length_dfa() -> Result<(), AutomatonError> {
    let dfa = Dfa::new(
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
    )?;

    println!("{}", dfa);
    let inputs: &[&[&str]] = &[&[], &["1"], &["1", "0"], &["1", "0", "1"], &["1", "0", "0", "1"]];
    print_runs(&dfa, inputs)?;

    info!("Lifting the DFA to an NFA");
    let nfa = Nfa::from(&dfa);
    println!("{}", nfa);
    print_runs(&nfa, inputs)
}

/// Accepts `0 1*` or `1*` by branching over epsilon.
fn epsilon_branch_nfa() -> Result<(), AutomatonError> {
    let nfa = Nfa::new(
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
    )?;

    println!("{}", nfa);
    let inputs: &[&[&str]] = &[
        &[],
        &["0"],
        &["0", "1"],
        &["0", "1", "1"],
        &["1"],
        &["1", "1", "1"],
        &["1", "0"],
    ];
    print_runs(&nfa, inputs)?;

    info!("Determinising the NFA");
    let dfa = nfa.to_dfa();
    println!("{}", dfa);
    print_runs(&dfa, inputs)?;

    match nfa.run(["1", "2"]) {
        Err(err) => println!("[\"1\", \"2\"] -> {}", err),
        Ok(accepted) => println!("[\"1\", \"2\"] -> {}", accepted),
    }
    Ok(())
}
