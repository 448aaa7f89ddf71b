//! Backtracking matcher over a [`CompiledPattern`].
//!
//! Matching threads a [`State`] (unconsumed invocation leaves plus the
//! bindings collected so far) through the tree. Every composite that may
//! backtrack works on its own clone, so a failed attempt never leaks partial
//! progress to its caller or a sibling branch.

use tracing::{debug, trace};

use crate::error::{Error, Reason, Result};
use crate::normalize::{CompiledPattern, LeafId};
use crate::{ArgvMode, Bindings, Leaf, Node, Tokens, Value, parse_argv};

/// A value collected for one arena slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub id: LeafId,
    pub value: Value,
}

/// Matching state: what is left to consume and what has been bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    pub left: Vec<Leaf>,
    pub collected: Vec<Binding>,
}

impl State {
    pub fn new(left: Vec<Leaf>) -> Self {
        Self {
            left,
            collected: Vec::new(),
        }
    }
}

impl CompiledPattern {
    /// Tokenizes and matches an invocation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::User`] when the invocation cannot be tokenized or
    /// does not satisfy the pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use docmatch_core::{compile, OptionLeaf, OptionRegistry};
    ///
    /// let registry = OptionRegistry::new(vec![OptionLeaf::flag(Some("-v"), None)]);
    /// let pattern = compile("[-v] <file>...", registry).unwrap();
    ///
    /// let bindings = pattern.apply(["a", "-v", "b"], false).unwrap();
    /// assert!(bindings.get_bool("-v"));
    /// assert_eq!(bindings.get_list("<file>").unwrap(), ["a", "b"]);
    ///
    /// assert!(pattern.apply(["-v"], false).is_err());
    /// ```
    pub fn apply<I, S>(&self, argv: I, options_first: bool) -> Result<Bindings>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let left = self.tokenize(argv, options_first)?;
        self.match_leaves(left)
    }

    /// Tokenizes an invocation against this pattern's registry.
    ///
    /// `--` survives as a positional only when the pattern names it.
    pub fn tokenize<I, S>(&self, argv: I, options_first: bool) -> Result<Vec<Leaf>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mode = ArgvMode {
            options_first,
            keep_double_dash: self.has_command("--"),
        };
        parse_argv(Tokens::from_argv(argv), &self.registry, mode)
    }

    /// Matches already tokenized leaves; every leaf must be consumed.
    pub fn match_leaves(&self, left: Vec<Leaf>) -> Result<Bindings> {
        let (matched, state) = self.match_state(State::new(left));
        if matched && state.left.is_empty() {
            debug!(bound = state.collected.len(), "invocation matched usage");
            return Ok(Bindings::from_match(self, state));
        }

        let unconsumed: Vec<String> = state.left.iter().map(ToString::to_string).collect();
        debug!(matched, ?unconsumed, "invocation did not match usage");
        Err(Error::User(Reason::NoMatch { unconsumed }))
    }

    /// Matches the root against `state`.
    ///
    /// Returns whether the root matched and the resulting state; on failure
    /// the state is the one passed in.
    pub fn match_state(&self, state: State) -> (bool, State) {
        self.match_node(&self.root, state)
    }

    fn match_node(&self, node: &Node<LeafId>, state: State) -> (bool, State) {
        match node {
            Node::Leaf(id) => self.match_leaf(*id, state),
            Node::Required(children) => {
                let mut current = state.clone();
                for child in children {
                    let (matched, next) = self.match_node(child, current);
                    if !matched {
                        return (false, state);
                    }
                    current = next;
                }
                (true, current)
            }
            Node::Optional(children) => {
                let mut current = state;
                for child in children {
                    current = self.match_node(child, current).1;
                }
                (true, current)
            }
            Node::OptionsShortcut(children) => {
                let mut current = state;
                loop {
                    let before = current.left.len();
                    for child in children {
                        current = self.match_node(child, current).1;
                    }
                    if current.left.len() == before {
                        return (true, current);
                    }
                }
            }
            Node::OneOrMore(child) => self.match_repeated(child, state),
            Node::Either(branches) => {
                let mut best: Option<State> = None;
                for (idx, branch) in branches.iter().enumerate() {
                    let (matched, outcome) = self.match_node(branch, state.clone());
                    if !matched {
                        continue;
                    }
                    trace!(branch = idx, left = outcome.left.len(), "either branch matched");
                    if best
                        .as_ref()
                        .is_none_or(|b| outcome.left.len() < b.left.len())
                    {
                        best = Some(outcome);
                    }
                }
                match best {
                    Some(outcome) => (true, outcome),
                    None => (false, state),
                }
            }
        }
    }

    /// Repeats `child` until it fails or stops consuming; succeeds iff at
    /// least one round consumed input.
    fn match_repeated(&self, child: &Node<LeafId>, state: State) -> (bool, State) {
        let mut current = state.clone();
        let mut times = 0usize;
        loop {
            let before = current.left.len();
            let (matched, next) = self.match_node(child, current);
            current = next;
            if !matched || current.left.len() == before {
                break;
            }
            times += 1;
        }
        if times == 0 {
            return (false, state);
        }
        (true, current)
    }

    fn match_leaf(&self, id: LeafId, mut state: State) -> (bool, State) {
        let leaf = self.leaf(id);
        let Some((pos, occurrence)) = single_match(leaf, &state.left) else {
            return (false, state);
        };
        state.left.remove(pos);

        let declared = leaf.value();
        if !declared.accumulates() {
            state.collected.push(Binding {
                id,
                value: occurrence,
            });
            return (true, state);
        }

        match state.collected.iter_mut().find(|b| b.id == id) {
            Some(existing) => existing.value.absorb(occurrence),
            None => state.collected.push(Binding {
                id,
                value: declared.first_occurrence(occurrence),
            }),
        }
        (true, state)
    }
}

/// Finds the invocation leaf this pattern leaf would consume.
fn single_match(leaf: &Leaf, left: &[Leaf]) -> Option<(usize, Value)> {
    match leaf {
        Leaf::Option(opt) => left.iter().enumerate().find_map(|(pos, candidate)| {
            candidate
                .as_option()
                .filter(|seen| seen.same_identity(opt))
                .map(|seen| (pos, seen.value.clone()))
        }),
        Leaf::Argument(_) => left.iter().enumerate().find_map(|(pos, candidate)| {
            matches!(candidate, Leaf::Argument(_)).then(|| (pos, candidate.value().clone()))
        }),
        Leaf::Command(cmd) => {
            let (pos, candidate) = left
                .iter()
                .enumerate()
                .find(|(_, candidate)| matches!(candidate, Leaf::Argument(_)))?;
            (candidate.value().as_str() == Some(cmd.name.as_str()))
                .then_some((pos, Value::Bool(true)))
        }
    }
}
