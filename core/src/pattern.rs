//! Pattern trees: leaves combined by composite nodes.
//!
//! [`Node`] is generic over its leaf payload so the same shape serves both
//! the raw tree produced by the usage-pattern parser (`Node<Leaf>`, aliased
//! as [`Pattern`]) and the normalized tree whose leaves are arena indices
//! (`Node<LeafId>`).

use std::collections::HashSet;
use std::fmt;

use crate::{Leaf, OptionRegistry};

/// One node of a pattern tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<L> {
    Leaf(L),
    /// All children must match, in order.
    Required(Vec<Node<L>>),
    /// Every child is attempted; never fails.
    Optional(Vec<Node<L>>),
    /// Exactly one branch contributes.
    Either(Vec<Node<L>>),
    /// The child repeated at least once.
    OneOrMore(Box<Node<L>>),
    /// `[options]`: any declared option not written out elsewhere.
    OptionsShortcut(Vec<Node<L>>),
}

/// A pattern tree that owns its leaves.
pub type Pattern = Node<Leaf>;

impl<L> Node<L> {
    pub fn leaf(leaf: impl Into<L>) -> Self {
        Self::Leaf(leaf.into())
    }

    pub fn one_or_more(child: Node<L>) -> Self {
        Self::OneOrMore(Box::new(child))
    }

    /// Direct children (a leaf has none).
    pub fn children(&self) -> &[Node<L>] {
        match self {
            Self::Leaf(_) => &[],
            Self::OneOrMore(child) => std::slice::from_ref(child.as_ref()),
            Self::Required(children)
            | Self::Optional(children)
            | Self::Either(children)
            | Self::OptionsShortcut(children) => children,
        }
    }

    /// All leaves in left-to-right order.
    pub fn leaves(&self) -> Vec<&L> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a L>) {
        match self {
            Self::Leaf(leaf) => out.push(leaf),
            _ => {
                for child in self.children() {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Rebuilds the tree with every leaf passed through `f`, in
    /// left-to-right order.
    pub fn map_leaves<M>(self, f: &mut dyn FnMut(L) -> M) -> Node<M> {
        match self {
            Self::Leaf(leaf) => Node::Leaf(f(leaf)),
            Self::Required(children) => Node::Required(Self::map_all(children, f)),
            Self::Optional(children) => Node::Optional(Self::map_all(children, f)),
            Self::Either(children) => Node::Either(Self::map_all(children, f)),
            Self::OptionsShortcut(children) => Node::OptionsShortcut(Self::map_all(children, f)),
            Self::OneOrMore(child) => Node::one_or_more(child.map_leaves(f)),
        }
    }

    fn map_all<M>(children: Vec<Node<L>>, f: &mut dyn FnMut(L) -> M) -> Vec<Node<M>> {
        let mut out = Vec::with_capacity(children.len());
        for child in children {
            out.push(child.map_leaves(&mut *f));
        }
        out
    }

    fn for_each_shortcut_mut(&mut self, f: &mut impl FnMut(&mut Vec<Node<L>>)) {
        match self {
            Self::Leaf(_) => {}
            Self::OptionsShortcut(children) => f(children),
            Self::OneOrMore(child) => child.for_each_shortcut_mut(f),
            Self::Required(children) | Self::Optional(children) | Self::Either(children) => {
                for child in children {
                    child.for_each_shortcut_mut(f);
                }
            }
        }
    }
}

impl Pattern {
    /// Fills every `[options]` shortcut with the registry options that the
    /// pattern does not already mention.
    ///
    /// # Examples
    ///
    /// ```
    /// use docmatch_core::{Node, OptionLeaf, OptionRegistry, Pattern};
    ///
    /// let registry = OptionRegistry::new(vec![
    ///     OptionLeaf::flag(Some("-v"), None),
    ///     OptionLeaf::flag(Some("-q"), None),
    /// ]);
    /// let mut pattern: Pattern = Node::Required(vec![
    ///     Node::leaf(OptionLeaf::flag(Some("-v"), None)),
    ///     Node::Optional(vec![Node::OptionsShortcut(Vec::new())]),
    /// ]);
    /// pattern.expand_options_shortcut(&registry);
    ///
    /// let names = pattern.leaves().iter().map(|l| l.name()).collect::<Vec<_>>();
    /// assert_eq!(names, ["-v", "-q"]);
    /// ```
    pub fn expand_options_shortcut(&mut self, registry: &OptionRegistry) {
        let mentioned = self
            .leaves()
            .into_iter()
            .filter_map(Leaf::as_option)
            .map(|o| (o.short.clone(), o.long.clone()))
            .collect::<HashSet<_>>();

        let expansion = registry
            .iter()
            .filter(|o| !mentioned.contains(&(o.short.clone(), o.long.clone())))
            .map(|o| Node::Leaf(Leaf::Option(o.clone())))
            .collect::<Vec<_>>();

        self.for_each_shortcut_mut(&mut |children| *children = expansion.clone());
    }
}

impl<L: fmt::Display> fmt::Display for Node<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<L: fmt::Display>(
            f: &mut fmt::Formatter<'_>,
            children: &[Node<L>],
            sep: &str,
        ) -> fmt::Result {
            for (idx, child) in children.iter().enumerate() {
                if idx > 0 {
                    f.write_str(sep)?;
                }
                write!(f, "{child}")?;
            }
            Ok(())
        }

        match self {
            Self::Leaf(leaf) => write!(f, "{leaf}"),
            Self::Required(children) => {
                f.write_str("(")?;
                join(f, children, " ")?;
                f.write_str(")")
            }
            Self::Optional(children) => {
                f.write_str("[")?;
                join(f, children, " ")?;
                f.write_str("]")
            }
            Self::Either(children) => {
                f.write_str("(")?;
                join(f, children, " | ")?;
                f.write_str(")")
            }
            Self::OneOrMore(child) => write!(f, "{child}..."),
            Self::OptionsShortcut(_) => f.write_str("options"),
        }
    }
}
