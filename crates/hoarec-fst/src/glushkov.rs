// Position (Glushkov) automaton construction.
// Origin: hoarec/Glushkov.java, hoarec/Regex.java (glushkovRename)
//
// Every literal symbol occurrence is renamed to a fresh state id. Each
// subexpression records which states can be entered on the first symbol
// (with the output to emit on entry) and which states may accept (with the
// output to emit on leaving), plus its behaviour on the empty word.

use hashbrown::HashMap;
use hoarec_core::output;
use hoarec_core::{Re, Symbol, SymbolRange};

use crate::CompileError;

/// Index of a position state. The compiled initial state comes after all of them.
pub type StateId = usize;

/// Output fragment attached to each boundary state of a subexpression.
pub type StateOutputs = HashMap<StateId, String>;

/// A renamed symbol occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renamed {
    pub state: StateId,
    /// `None` for the occurrence standing in for an empty literal. Such a state
    /// never becomes a start or end state and so has no edges.
    pub input: Option<SymbolRange>,
    /// Emitted when this state is entered.
    pub pre: String,
    /// Emitted when this state is left or accepts.
    pub post: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Union(Box<PositionGraph>, Box<PositionGraph>),
    Concat(Box<PositionGraph>, Box<PositionGraph>),
    Kleene(Box<PositionGraph>),
    Renamed(Renamed),
}

/// Position graph node with its boundary information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionGraph {
    node: Node,
    start: StateOutputs,
    end: StateOutputs,
    /// `Some` iff the subexpression accepts the empty word.
    empty_word_output: Option<String>,
}

impl PositionGraph {
    /// Rename every symbol occurrence of `re`, drawing ids from `next_state`.
    ///
    /// On return `next_state` is one past the largest id handed out, i.e. the
    /// number of occurrences when starting from zero.
    pub fn build(re: &Re, next_state: &mut StateId) -> Result<Self, CompileError> {
        match re {
            Re::Union(lhs, rhs) => {
                let lhs = Self::build(lhs, next_state)?;
                let rhs = Self::build(rhs, next_state)?;
                Self::union(lhs, rhs)
            }
            Re::Concat(lhs, rhs) => {
                let lhs = Self::build(lhs, next_state)?;
                let rhs = Self::build(rhs, next_state)?;
                Ok(Self::concat(lhs, rhs))
            }
            Re::Kleene(inner) => Self::kleene(Self::build(inner, next_state)?),
            Re::Atomic { literal, output } => Ok(Self::atomic(literal, output, next_state)),
            Re::Range { range, output } => {
                if range.is_empty() {
                    return Err(CompileError::InvalidRange {
                        from: range.from,
                        to: range.to,
                    });
                }
                Ok(Self::renamed(next_state, *range, String::new(), output.clone()))
            }
            Re::Output { inner, output } => {
                let mut graph = Self::build(inner, next_state)?;
                graph.append_output(output);
                Ok(graph)
            }
            Re::Var(name) => Err(CompileError::UnsupportedVariable { name: name.clone() }),
        }
    }

    fn renamed(next_state: &mut StateId, input: SymbolRange, pre: String, post: String) -> Self {
        let state = *next_state;
        *next_state += 1;
        let mut start = StateOutputs::with_capacity(1);
        start.insert(state, pre.clone());
        let mut end = StateOutputs::with_capacity(1);
        end.insert(state, post.clone());
        Self {
            node: Node::Renamed(Renamed {
                state,
                input: Some(input),
                pre,
                post,
            }),
            start,
            end,
            empty_word_output: None,
        }
    }

    fn atomic(literal: &[Symbol], output: &str, next_state: &mut StateId) -> Self {
        let Some((&last, init)) = literal.split_last() else {
            let state = *next_state;
            *next_state += 1;
            return Self {
                node: Node::Renamed(Renamed {
                    state,
                    input: None,
                    pre: String::new(),
                    post: output.to_string(),
                }),
                start: StateOutputs::new(),
                end: StateOutputs::new(),
                empty_word_output: Some(output.to_string()),
            };
        };
        let mut chain: Option<Self> = None;
        for &symbol in init {
            let link = Self::renamed(next_state, SymbolRange::single(symbol), String::new(), String::new());
            chain = Some(match chain {
                Some(prefix) => Self::concat(prefix, link),
                None => link,
            });
        }
        let tail = Self::renamed(next_state, SymbolRange::single(last), String::new(), output.to_string());
        match chain {
            Some(prefix) => Self::concat(prefix, tail),
            None => tail,
        }
    }

    fn union(lhs: Self, rhs: Self) -> Result<Self, CompileError> {
        let empty_word_output = match (&lhs.empty_word_output, &rhs.empty_word_output) {
            (Some(l), Some(r)) if l != r => {
                return Err(CompileError::AmbiguousEpsilonOutput {
                    lhs: l.clone(),
                    rhs: r.clone(),
                });
            }
            (Some(eps), _) | (None, Some(eps)) => Some(eps.clone()),
            (None, None) => None,
        };
        let mut start = lhs.start.clone();
        start.extend(rhs.start.iter().map(|(&s, o)| (s, o.clone())));
        let mut end = lhs.end.clone();
        end.extend(rhs.end.iter().map(|(&s, o)| (s, o.clone())));
        Ok(Self {
            node: Node::Union(Box::new(lhs), Box::new(rhs)),
            start,
            end,
            empty_word_output,
        })
    }

    fn concat(lhs: Self, rhs: Self) -> Self {
        let mut start = lhs.start.clone();
        if let Some(eps) = &lhs.empty_word_output {
            for (&state, out) in &rhs.start {
                start.insert(state, format!("{eps}{out}"));
            }
        }
        let mut end = rhs.end.clone();
        if let Some(eps) = &rhs.empty_word_output {
            for (&state, out) in &lhs.end {
                end.insert(state, format!("{out}{eps}"));
            }
        }
        let empty_word_output = output::concat(
            lhs.empty_word_output.as_deref(),
            rhs.empty_word_output.as_deref(),
        );
        Self {
            node: Node::Concat(Box::new(lhs), Box::new(rhs)),
            start,
            end,
            empty_word_output,
        }
    }

    /// The closure's boundary maps are copies of inner's. Context fragments
    /// applied later touch only the copies, so they are emitted once per
    /// entry/exit while inner's own fragments repeat on every iteration.
    fn kleene(inner: Self) -> Result<Self, CompileError> {
        if let Some(eps) = &inner.empty_word_output {
            if !eps.is_empty() {
                return Err(CompileError::AmbiguousKleeneEpsilon {
                    output: eps.clone(),
                });
            }
        }
        Ok(Self {
            start: inner.start.clone(),
            end: inner.end.clone(),
            empty_word_output: Some(String::new()),
            node: Node::Kleene(Box::new(inner)),
        })
    }

    fn append_output(&mut self, suffix: &str) {
        if suffix.is_empty() {
            return;
        }
        for out in self.end.values_mut() {
            out.push_str(suffix);
        }
        if let Some(eps) = &mut self.empty_word_output {
            eps.push_str(suffix);
        }
        if let Node::Renamed(renamed) = &mut self.node {
            renamed.post.push_str(suffix);
        }
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    /// States reachable on the first symbol, with the output emitted on entry.
    pub fn start_states(&self) -> &StateOutputs {
        &self.start
    }

    /// States from which acceptance is possible, with the output emitted on exit.
    pub fn end_states(&self) -> &StateOutputs {
        &self.end
    }

    pub fn accepts_empty_word(&self) -> bool {
        self.empty_word_output.is_some()
    }

    /// Output on the empty input. `None` when the empty word is rejected.
    pub fn empty_word_output(&self) -> Option<&str> {
        self.empty_word_output.as_deref()
    }

    /// Pre-order walk over all nodes. Iterative so that long literal chains do
    /// not exhaust the call stack.
    fn walk<'a>(&'a self, mut visit: impl FnMut(&'a PositionGraph)) {
        let mut stack = vec![self];
        while let Some(graph) = stack.pop() {
            visit(graph);
            match &graph.node {
                Node::Union(lhs, rhs) | Node::Concat(lhs, rhs) => {
                    stack.push(rhs);
                    stack.push(lhs);
                }
                Node::Kleene(inner) => stack.push(inner),
                Node::Renamed(_) => {}
            }
        }
    }

    /// Every renamed occurrence, in traversal order.
    pub fn renamed_states(&self) -> Vec<&Renamed> {
        let mut found = Vec::new();
        self.walk(|graph| {
            if let Node::Renamed(renamed) = &graph.node {
                found.push(renamed);
            }
        });
        found
    }

    /// All state ids found by a full traversal.
    pub fn state_ids(&self) -> Vec<StateId> {
        self.renamed_states().iter().map(|r| r.state).collect()
    }

    /// Input range of every state, indexed by state id.
    pub fn collect_states(&self, ranges: &mut [Option<SymbolRange>]) {
        for renamed in self.renamed_states() {
            ranges[renamed.state] = renamed.input;
        }
    }

    /// Append every internal edge `(target, output)` to `adjacency[source]`.
    ///
    /// Edges come from concatenation (lhs end x rhs start) and from closure
    /// loop-back (inner end x inner start). Duplicates are kept as is.
    pub fn collect_transitions(&self, adjacency: &mut [Vec<(StateId, String)>]) {
        self.walk(|graph| match &graph.node {
            Node::Concat(lhs, rhs) => transition_product(adjacency, &lhs.end, &rhs.start),
            Node::Kleene(inner) => transition_product(adjacency, &inner.end, &inner.start),
            Node::Union(..) | Node::Renamed(_) => {}
        });
    }
}

/// Children are detached onto a heap stack so that long literal chains,
/// which nest one `Concat` per symbol, do not recurse on drop.
impl Drop for PositionGraph {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        detach_children(&mut self.node, &mut stack);
        while let Some(mut child) = stack.pop() {
            detach_children(&mut child.node, &mut stack);
        }
    }
}

fn detach_children(node: &mut Node, stack: &mut Vec<Box<PositionGraph>>) {
    if matches!(node, Node::Renamed(_)) {
        return;
    }
    let detached = Node::Renamed(Renamed {
        state: 0,
        input: None,
        pre: String::new(),
        post: String::new(),
    });
    match std::mem::replace(node, detached) {
        Node::Union(lhs, rhs) | Node::Concat(lhs, rhs) => {
            stack.push(lhs);
            stack.push(rhs);
        }
        Node::Kleene(inner) => stack.push(inner),
        Node::Renamed(_) => {}
    }
}

fn transition_product(
    adjacency: &mut [Vec<(StateId, String)>],
    from: &StateOutputs,
    to: &StateOutputs,
) {
    for (&source, exit) in from {
        for (&target, entry) in to {
            adjacency[source].push((target, format!("{exit}{entry}")));
        }
    }
}
