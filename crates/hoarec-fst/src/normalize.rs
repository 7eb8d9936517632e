// Output-fragment normalisation.
// Origin: hoarec/Simple.java (removeEpsilons)
//
// Rewrites an expression bottom-up so that output strings sit on as few
// nodes as possible. Every rule preserves the accepted language and the
// output produced for each accepted input.

use hoarec_core::Re;
use hoarec_core::output::longest_common_suffix;

/// Normalise `re`.
///
/// - nested `Output` products are fused, and an `Output` around an `Atomic`,
///   a `Range` or a `Concat` is folded into its last element;
/// - concatenation with the empty literal disappears, its output moving onto
///   the neighbour;
/// - adjacent literals are merged into one;
/// - the longest common output suffix of two union branches is emitted once,
///   after the union.
///
/// Closure bodies are normalised in place; outputs are never moved across a
/// closure boundary.
pub fn normalize(re: Re) -> Re {
    match re {
        Re::Union(lhs, rhs) => union(normalize(*lhs), normalize(*rhs)),
        Re::Concat(lhs, rhs) => concat(normalize(*lhs), normalize(*rhs)),
        Re::Kleene(inner) => Re::Kleene(Box::new(normalize(*inner))),
        Re::Output { inner, output } => product(normalize(*inner), output),
        leaf @ (Re::Atomic { .. } | Re::Range { .. } | Re::Var(_)) => leaf,
    }
}

fn product(inner: Re, suffix: String) -> Re {
    if suffix.is_empty() {
        return inner;
    }
    match inner {
        Re::Atomic {
            literal,
            mut output,
        } => {
            output.push_str(&suffix);
            Re::Atomic { literal, output }
        }
        Re::Range { range, mut output } => {
            output.push_str(&suffix);
            Re::Range { range, output }
        }
        Re::Output { inner, mut output } => {
            output.push_str(&suffix);
            Re::Output { inner, output }
        }
        Re::Concat(lhs, rhs) => concat(*lhs, product(*rhs, suffix)),
        other => Re::Output {
            inner: Box::new(other),
            output: suffix,
        },
    }
}

fn concat(lhs: Re, rhs: Re) -> Re {
    match (lhs, rhs) {
        (Re::Atomic { literal, output }, rhs) if literal.is_empty() && output.is_empty() => rhs,
        (lhs, Re::Atomic { literal, output }) if literal.is_empty() => product(lhs, output),
        (
            Re::Atomic {
                literal: mut head,
                output: mut out,
            },
            Re::Atomic {
                literal: tail,
                output: tail_out,
            },
        ) => {
            head.extend(tail);
            out.push_str(&tail_out);
            Re::Atomic {
                literal: head,
                output: out,
            }
        }
        (Re::Atomic { literal, output: mut out }, Re::Range { range, output })
            if literal.is_empty() =>
        {
            out.push_str(&output);
            Re::Range { range, output: out }
        }
        (lhs, rhs) => Re::concat(lhs, rhs),
    }
}

fn union(lhs: Re, rhs: Re) -> Re {
    let shared = match (trailing_output(&lhs), trailing_output(&rhs)) {
        (Some(l), Some(r)) => longest_common_suffix(l, r).len(),
        _ => 0,
    };
    if shared == 0 {
        return Re::union(lhs, rhs);
    }
    let mut suffix = String::new();
    let lhs = strip_suffix(lhs, shared, &mut suffix);
    let rhs = strip_suffix(rhs, shared, &mut String::new());
    product(Re::union(lhs, rhs), suffix)
}

/// The output that ends every output of `re`, if it is carried by one node.
fn trailing_output(re: &Re) -> Option<&str> {
    match re {
        Re::Atomic { output, .. } | Re::Range { output, .. } | Re::Output { output, .. } => {
            Some(output.as_str())
        }
        Re::Concat(_, rhs) => trailing_output(rhs),
        Re::Union(..) | Re::Kleene(_) | Re::Var(_) => None,
    }
}

/// Remove the last `len` bytes of the node found by [`trailing_output`],
/// moving them into `removed`.
fn strip_suffix(re: Re, len: usize, removed: &mut String) -> Re {
    match re {
        Re::Atomic {
            literal,
            mut output,
        } => {
            *removed = output.split_off(output.len() - len);
            Re::Atomic { literal, output }
        }
        Re::Range { range, mut output } => {
            *removed = output.split_off(output.len() - len);
            Re::Range { range, output }
        }
        Re::Output { inner, mut output } => {
            *removed = output.split_off(output.len() - len);
            if output.is_empty() {
                *inner
            } else {
                Re::Output { inner, output }
            }
        }
        Re::Concat(lhs, rhs) => Re::Concat(lhs, Box::new(strip_suffix(*rhs, len, removed))),
        other => other,
    }
}
