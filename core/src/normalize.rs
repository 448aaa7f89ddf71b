//! Tree normalization: identity sharing and list/count fixing.
//!
//! Parsing yields a tree that owns one leaf per occurrence. Normalization
//! moves leaves into an arena keyed by identity, so every occurrence of
//! `<file>` (or `-v`) refers to one slot, then marks slots that can match
//! more than once within a single alternative as accumulating.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::leaf::LeafKey;
use crate::{Leaf, Node, OptionRegistry, Pattern, Value};

/// Index of a leaf in a [`CompiledPattern`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LeafId(usize);

impl LeafId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A normalized pattern: composite nodes over shared leaf slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    pub(crate) leaves: Vec<Leaf>,
    pub(crate) root: Node<LeafId>,
    pub(crate) registry: OptionRegistry,
}

impl CompiledPattern {
    /// Normalizes a parsed (and shortcut-expanded) pattern; `registry` is
    /// kept for tokenizing invocations.
    pub fn new(pattern: Pattern, registry: OptionRegistry) -> Self {
        let (leaves, root) = fix_identities(pattern);
        let mut compiled = Self {
            leaves,
            root,
            registry,
        };
        compiled.fix_repeating_arguments();
        compiled
    }

    /// Distinct leaves in first-occurrence order, with their defaults.
    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn leaf(&self, id: LeafId) -> &Leaf {
        &self.leaves[id.0]
    }

    pub fn root(&self) -> &Node<LeafId> {
        &self.root
    }

    pub fn registry(&self) -> &OptionRegistry {
        &self.registry
    }

    /// Rebuilds an owning tree, cloning each shared leaf at every reference.
    pub fn to_pattern(&self) -> Pattern {
        self.root
            .clone()
            .map_leaves(&mut |id: LeafId| self.leaves[id.0].clone())
    }

    /// Whether the pattern contains the literal command `name`.
    pub fn has_command(&self, name: &str) -> bool {
        self.leaves
            .iter()
            .any(|leaf| matches!(leaf, Leaf::Command(cmd) if cmd.name == name))
    }

    /// Either-normal-form: every alternative flattened to its leaf
    /// sequence, with `OneOrMore(x)` counted as `x x`.
    pub fn either_normal_form(&self) -> Vec<Vec<LeafId>> {
        let mut result = Vec::new();
        let mut groups: Vec<Vec<&Node<LeafId>>> = vec![vec![&self.root]];

        while !groups.is_empty() {
            let mut children = groups.remove(0);
            let Some(pos) = children.iter().position(|c| !matches!(c, Node::Leaf(_))) else {
                result.push(
                    children
                        .into_iter()
                        .filter_map(|c| match c {
                            Node::Leaf(id) => Some(*id),
                            _ => None,
                        })
                        .collect(),
                );
                continue;
            };

            let parent = children.remove(pos);
            match parent {
                Node::Either(branches) => {
                    for branch in branches {
                        let mut group = vec![branch];
                        group.extend(children.iter().copied());
                        groups.push(group);
                    }
                }
                Node::OneOrMore(child) => {
                    let mut group = vec![child.as_ref(), child.as_ref()];
                    group.extend(children);
                    groups.push(group);
                }
                _ => {
                    let mut group = parent.children().iter().collect::<Vec<_>>();
                    group.extend(children);
                    groups.push(group);
                }
            }
        }

        result
    }

    /// Turns every leaf that occurs more than once in some alternative into
    /// an accumulator: arguments and value-taking options collect a list,
    /// commands and flags count.
    fn fix_repeating_arguments(&mut self) {
        for case in self.either_normal_form() {
            let mut seen = HashMap::<LeafId, usize>::new();
            for id in &case {
                *seen.entry(*id).or_default() += 1;
            }

            for (id, count) in seen {
                if count < 2 {
                    continue;
                }
                let leaf = &mut self.leaves[id.0];
                let takes_list = match leaf {
                    Leaf::Argument(_) => true,
                    Leaf::Option(opt) => opt.takes_value,
                    Leaf::Command(_) => false,
                };
                let value = leaf.value_mut();
                if takes_list {
                    *value = match std::mem::take(value) {
                        Value::Null => Value::List(Vec::new()),
                        Value::String(s) => {
                            Value::List(s.split_whitespace().map(String::from).collect())
                        }
                        other => other,
                    };
                } else if !matches!(value, Value::Count(_)) {
                    *value = Value::Count(0);
                }
                debug!(leaf = %self.leaves[id.0], "leaf accumulates repeated matches");
            }
        }
    }
}

/// Moves every leaf into an arena, one slot per identity.
fn fix_identities(pattern: Pattern) -> (Vec<Leaf>, Node<LeafId>) {
    let mut leaves = Vec::new();
    let mut index = HashMap::<LeafKey, LeafId>::new();

    let root = pattern.map_leaves(&mut |leaf: Leaf| {
        *index.entry(leaf.key()).or_insert_with(|| {
            leaves.push(leaf);
            LeafId(leaves.len() - 1)
        })
    });

    (leaves, root)
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_pattern())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_pattern, Argument, Command, OptionLeaf, OptionRegistry};

    fn compile(source: &str, registry: &OptionRegistry) -> CompiledPattern {
        CompiledPattern::new(parse_pattern(source, registry).unwrap(), registry.clone())
    }

    fn value_of<'a>(compiled: &'a CompiledPattern, name: &str) -> &'a Value {
        compiled
            .leaves()
            .iter()
            .find(|l| l.name() == name)
            .map(Leaf::value)
            .unwrap()
    }

    #[test]
    fn test_identical_leaves_share_one_slot() {
        let compiled = compile("(N -a N) | (-a N)", &registry());
        let names = compiled.leaves().iter().map(Leaf::name).collect::<Vec<_>>();
        assert_eq!(names, ["N", "-a"]);
        let ids = compiled.root().leaves();
        assert_eq!(ids.len(), 5);
        assert!(ids.iter().all(|id| id.index() < 2));
    }

    #[test]
    fn test_either_normal_form_distributes_alternatives() {
        let compiled = compile("-a (N | M) [-b]", &registry());
        let names = compiled
            .either_normal_form()
            .into_iter()
            .map(|case| {
                case.into_iter()
                    .map(|id| compiled.leaf(id).name().to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>();
        assert_eq!(names, ["-b N -a", "-b M -a"]);
    }

    #[test]
    fn test_repeated_argument_becomes_list() {
        let compiled = compile("N N", &OptionRegistry::default());
        assert_eq!(value_of(&compiled, "N"), &Value::List(Vec::new()));

        let compiled = compile("N...", &OptionRegistry::default());
        assert_eq!(value_of(&compiled, "N"), &Value::List(Vec::new()));
    }

    #[test]
    fn test_alternatives_do_not_count_as_repeats() {
        let compiled = compile("N | N", &OptionRegistry::default());
        assert_eq!(value_of(&compiled, "N"), &Value::Null);
    }

    #[test]
    fn test_repeated_flag_and_command_count() {
        let compiled = compile("go... -a...", &registry());
        assert_eq!(value_of(&compiled, "go"), &Value::Count(0));
        assert_eq!(value_of(&compiled, "-a"), &Value::Count(0));
    }

    #[test]
    fn test_repeated_option_splits_string_default() {
        let registry = OptionRegistry::new(vec![OptionLeaf::with_value(
            None,
            Some("--path"),
            Some("./here ./there"),
        )]);
        let compiled = compile("--path=<p>...", &registry);
        assert_eq!(
            value_of(&compiled, "--path"),
            &Value::List(vec!["./here".into(), "./there".into()])
        );
    }

    #[test]
    fn test_to_pattern_restores_owned_tree() {
        let compiled = compile("add <x> | rm <x>", &OptionRegistry::default());
        assert_eq!(
            compiled.to_pattern(),
            Node::Required(vec![Node::Either(vec![
                Node::Required(vec![
                    Node::leaf(Command::new("add")),
                    Node::leaf(Argument::new("<x>")),
                ]),
                Node::Required(vec![
                    Node::leaf(Command::new("rm")),
                    Node::leaf(Argument::new("<x>")),
                ]),
            ])])
        );
        assert_eq!(compiled.to_string(), "(((add <x>) | (rm <x>)))");
    }

    fn registry() -> OptionRegistry {
        OptionRegistry::new(vec![
            OptionLeaf::flag(Some("-a"), None),
            OptionLeaf::flag(Some("-b"), None),
        ])
    }
}
