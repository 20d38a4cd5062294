//! Traverse a finished syntax tree, calling handlers registered by node name.

use std::collections::HashMap;

use crate::language::ast::AstNode;

type Handler<'h, C> = Box<dyn Fn(&mut C, &AstNode) + 'h>;

/// Runs `before` handlers when a node is entered and `after` handlers when
/// all of its children have been visited. Handlers receive a mutable context
/// shared across the whole walk.
pub struct Walker<'h, C> {
    before: HashMap<String, Handler<'h, C>>,
    after: HashMap<String, Handler<'h, C>>,
}

impl<'h, C> Walker<'h, C> {
    pub fn new() -> Walker<'h, C> {
        Walker {
            before: HashMap::new(),
            after: HashMap::new(),
        }
    }

    pub fn before<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&mut C, &AstNode) + 'h,
    {
        self.before
            .insert(name.to_string(), Box::new(handler));
        self
    }

    pub fn after<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&mut C, &AstNode) + 'h,
    {
        self.after
            .insert(name.to_string(), Box::new(handler));
        self
    }

    /// Walk the tree depth first. Uses an explicit stack, so deep trees don't
    /// exhaust the call stack.
    pub fn walk(&self, root: &AstNode, context: &mut C) {
        let mut stack: Vec<(&AstNode, bool)> = vec![(root, false)];

        while let Some((node, entered)) = stack.pop() {
            if entered {
                if let Some(handler) = self
                    .after
                    .get(node.name())
                {
                    handler(context, node);
                }
                continue;
            }

            if let Some(handler) = self
                .before
                .get(node.name())
            {
                handler(context, node);
            }

            stack.push((node, true));
            for child in node
                .children()
                .iter()
                .rev()
            {
                stack.push((child, false));
            }
        }
    }
}

impl<'h, C> Default for Walker<'h, C> {
    fn default() -> Self {
        Walker::new()
    }
}
