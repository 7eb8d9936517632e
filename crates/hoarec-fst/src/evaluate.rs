// Forward trellis evaluation with backtracking output reconstruction.
// Origin: hoarec/Mealy.java (evaluate)

use hoarec_core::Symbol;
use hoarec_core::symbol::symbols_of;

use crate::EvalError;
use crate::config::{Step, TrellisConfig};
use crate::glushkov::StateId;
use crate::mealy::Mealy;

/// Run `input` through `mealy` and return its unique output.
///
/// `Ok(None)` means the input is not accepted. Allocates a fresh trellis;
/// use [`evaluate_with`] to reuse one across calls.
pub fn evaluate(mealy: &Mealy, input: &[Symbol]) -> Result<Option<String>, EvalError> {
    let mut config = mealy.new_trellis();
    evaluate_with(mealy, &mut config, input)
}

/// [`evaluate`] over the code points of `input`.
pub fn evaluate_str(mealy: &Mealy, input: &str) -> Result<Option<String>, EvalError> {
    evaluate(mealy, &symbols_of(input))
}

/// [`evaluate`] using caller-owned buffers.
///
/// Two paths reaching the same state at the same position, or two accepting
/// states after the last symbol, are reported as errors instead of picking
/// one of the outputs.
pub fn evaluate_with(
    mealy: &Mealy,
    config: &mut TrellisConfig,
    input: &[Symbol],
) -> Result<Option<String>, EvalError> {
    let initial = mealy.initial_state();
    config.reset(input.len(), mealy.state_count());
    config.set(0, initial, Step::SEED);
    config.frontier.push(initial);

    for (position, &symbol) in input.iter().enumerate() {
        let next = position + 1;
        config.next_frontier.clear();
        for i in 0..config.frontier.len() {
            let source = config.frontier[i];
            for edge in mealy.matching_edges(source, symbol) {
                let target = mealy.transitions(source)[edge].to_state;
                if let Some(Step {
                    source: Some(first_source),
                    ..
                }) = config.cell(next, target)
                {
                    return Err(EvalError::ConflictingPaths {
                        position: next,
                        target,
                        first_source,
                        second_source: source,
                    });
                }
                config.set(
                    next,
                    target,
                    Step {
                        source: Some(source),
                        edge,
                    },
                );
                config.next_frontier.push(target);
            }
        }
        std::mem::swap(&mut config.frontier, &mut config.next_frontier);
        if config.frontier.is_empty() {
            return Ok(None);
        }
    }

    let mut accepting = None;
    for &state in &config.frontier {
        if !mealy.is_accepting(state) {
            continue;
        }
        if let Some(first) = accepting {
            return Err(EvalError::SimultaneousAcceptance {
                first,
                second: state,
            });
        }
        accepting = Some(state);
    }
    let Some(last) = accepting else {
        return Ok(None);
    };
    backtrack(mealy, config, input.len(), last).map(Some)
}

/// Walk the recorded steps from `last` at `length` back to position 0.
fn backtrack(
    mealy: &Mealy,
    config: &TrellisConfig,
    length: usize,
    last: StateId,
) -> Result<String, EvalError> {
    let mut fragments: Vec<&str> = Vec::with_capacity(length + 1);
    fragments.extend(mealy.moore_output(last));
    let mut state = last;
    for position in (1..=length).rev() {
        let Some(Step {
            source: Some(source),
            edge,
        }) = config.cell(position, state)
        else {
            return Err(EvalError::BrokenBacktrack { state });
        };
        fragments.push(&mealy.transitions(source)[edge].output);
        state = source;
    }
    if state != mealy.initial_state() || config.cell(0, state) != Some(Step::SEED) {
        return Err(EvalError::BrokenBacktrack { state });
    }
    Ok(fragments.iter().rev().copied().collect())
}
