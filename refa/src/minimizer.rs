//! DFA minimization by partition refinement
//!
//! Moore's algorithm over the integer-keyed DFA table: start from the
//! accepting/non-accepting split and keep splitting blocks until two
//! states share a block only if, on every alphabet symbol, they step into
//! the same block. Block membership is threaded through the refinement as
//! an explicit map, so the minimizer is reentrant.
//!
//! Missing transitions get special treatment: two states that both lack a
//! transition on a symbol are equivalent on that symbol, while a state
//! with a defined transition never matches one without (the defined
//! side's block is compared against the absent side's nonexistent block).
//! This is deliberately looser than the textbook dead-state construction
//! and is part of the table contract; see the tests.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::dfa::{Dfa, DfaTransitionTable};

/// Reduce a DFA to the minimal equivalent automaton, in place
///
/// Convenience wrapper over [`Dfa::minimize`].
pub fn minimize(dfa: &mut Dfa) -> &mut Dfa {
    dfa.minimize()
}

/// The outcome of minimizing a transition table
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Minimized {
    pub table: DfaTransitionTable,
    pub accepting: BTreeSet<usize>,
    pub start: usize,
}

/// Minimize an integer-keyed table
///
/// Total over any valid DFA table: every refinement pass either stops or
/// strictly increases the block count, which is bounded by the state
/// count.
pub(crate) fn minimize_table(
    table: &DfaTransitionTable,
    accepting: &BTreeSet<usize>,
    alphabet: &[char],
    start: usize,
) -> Minimized {
    let mut current = initial_partition(table, accepting);

    loop {
        let block_of = block_membership(&current);
        let next = refine(&current, table, alphabet, &block_of);
        if next == current {
            break;
        }
        current = next;
    }

    rebuild(&current, table, accepting, alphabet, start)
}

/// `[nonAccepting, accepting]`, empty blocks dropped
fn initial_partition(table: &DfaTransitionTable, accepting: &BTreeSet<usize>) -> Vec<Vec<usize>> {
    let (accepting_block, non_accepting): (Vec<usize>, Vec<usize>) =
        table.keys().copied().partition(|state| accepting.contains(state));

    [non_accepting, accepting_block]
        .into_iter()
        .filter(|block| !block.is_empty())
        .collect()
}

fn block_membership(partition: &[Vec<usize>]) -> HashMap<usize, usize> {
    let mut block_of = HashMap::new();
    for (index, block) in partition.iter().enumerate() {
        for &state in block {
            block_of.insert(state, index);
        }
    }
    block_of
}

/// One refinement pass: split every block into sub-blocks of pairwise
/// equivalent states
///
/// A state joins the sub-block of the first already-handled state it is
/// equivalent to, preserving member order, so a stable partition
/// reproduces itself exactly.
fn refine(
    partition: &[Vec<usize>],
    table: &DfaTransitionTable,
    alphabet: &[char],
    block_of: &HashMap<usize, usize>,
) -> Vec<Vec<usize>> {
    let mut next = Vec::new();

    for block in partition {
        let mut sub_blocks: Vec<Vec<usize>> = Vec::new();
        'members: for &state in block {
            for sub_block in sub_blocks.iter_mut() {
                if equivalent(state, sub_block[0], table, alphabet, block_of) {
                    sub_block.push(state);
                    continue 'members;
                }
            }
            sub_blocks.push(vec![state]);
        }
        next.extend(sub_blocks);
    }

    next
}

/// Whether two states step into the same block on every symbol
fn equivalent(
    s1: usize,
    s2: usize,
    table: &DfaTransitionTable,
    alphabet: &[char],
    block_of: &HashMap<usize, usize>,
) -> bool {
    alphabet
        .iter()
        .all(|&symbol| goes_to_same_block(s1, s2, symbol, table, block_of))
}

fn goes_to_same_block(
    s1: usize,
    s2: usize,
    symbol: char,
    table: &DfaTransitionTable,
    block_of: &HashMap<usize, usize>,
) -> bool {
    let t1 = table.get(&s1).and_then(|row| row.get(&symbol));
    let t2 = table.get(&s2).and_then(|row| row.get(&symbol));

    match (t1, t2) {
        // No transition on either side counts as agreement.
        (None, None) => true,
        (Some(t1), Some(t2)) => block_of.get(t1) == block_of.get(t2),
        // A defined transition never compares equal to a missing one.
        _ => false,
    }
}

/// Rebuild the table over the final blocks
///
/// Blocks are numbered sequentially in production order. Each (block,
/// symbol) entry takes the transition of the first member that has one
/// defined; a block accepts iff any member accepted.
fn rebuild(
    partition: &[Vec<usize>],
    table: &DfaTransitionTable,
    accepting: &BTreeSet<usize>,
    alphabet: &[char],
    start: usize,
) -> Minimized {
    let block_of = block_membership(partition);

    let mut new_table = DfaTransitionTable::new();
    let mut new_accepting = BTreeSet::new();
    for (index, block) in partition.iter().enumerate() {
        let id = index + 1;
        let mut row = BTreeMap::new();
        for &symbol in alphabet {
            let target = block
                .iter()
                .find_map(|state| table.get(state).and_then(|r| r.get(&symbol)));
            if let Some(target) = target {
                row.insert(symbol, block_of[target] + 1);
            }
        }
        new_table.insert(id, row);
        if block.iter().any(|state| accepting.contains(state)) {
            new_accepting.insert(id);
        }
    }

    Minimized {
        table: new_table,
        accepting: new_accepting,
        start: block_of[&start] + 1,
    }
}
