use std::fmt::Write;

use crate::{error::Side, node::Node, BinaryTree, UniqueGenerator, UniqueId};

pub(crate) struct TreeDisplay;

struct Row<'a, T, Id>
where
    Id: UniqueId,
{
    node: &'a Node<T, Id>,
    // Drawn columns inherited from ancestors
    prefix: String,
    side: Side,
    last: bool,
}

impl TreeDisplay {
    /// Draw the subtree under `root`, one node per line.
    ///
    /// Children are labelled `L` or `R` so a lone child's side is visible.
    pub(crate) fn format<T, Id, F>(
        root: Option<&Node<T, Id>>,
        f: &mut std::fmt::Formatter<'_>,
        value_format: F,
    ) -> std::fmt::Result
    where
        Id: UniqueId,
        F: Fn(&T, &mut std::fmt::Formatter<'_>) -> std::fmt::Result,
    {
        let Some(root) = root else {
            return f.write_str("(empty)\n");
        };

        value_format(root.value(), f)?;
        f.write_char('\n')?;

        let mut stack: Vec<Row<'_, T, Id>> = Vec::new();
        Self::push_children(&mut stack, root, String::new());

        while let Some(row) = stack.pop() {
            f.write_str(&row.prefix)?;
            f.write_str(if row.last { "┗━" } else { "┣━" })?;
            f.write_str(if row.side == Side::Left { "L " } else { "R " })?;
            value_format(row.node.value(), f)?;
            f.write_char('\n')?;

            let mut prefix = row.prefix;
            prefix.push_str(if row.last { "  " } else { "┃ " });
            Self::push_children(&mut stack, row.node, prefix);
        }

        Ok(())
    }

    fn push_children<'a, T, Id>(
        stack: &mut Vec<Row<'a, T, Id>>,
        node: &'a Node<T, Id>,
        prefix: String,
    ) where
        Id: UniqueId,
    {
        // Pushed right first so that left is drawn first
        if let Some(right) = node.right() {
            stack.push(Row {
                node: right,
                prefix: prefix.clone(),
                side: Side::Right,
                last: true,
            });
        }
        if let Some(left) = node.left() {
            stack.push(Row {
                node: left,
                prefix,
                side: Side::Left,
                last: node.right().is_none(),
            });
        }
    }
}

impl<T, G> std::fmt::Display for BinaryTree<T, G>
where
    T: std::fmt::Display,
    G: UniqueGenerator,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        TreeDisplay::format(self.root(), f, |value, f| write!(f, "{}", value))
    }
}
