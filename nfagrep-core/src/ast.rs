//! Abstract Syntax Tree (AST) for patterns
//!
//! The tree keeps the shape of the pattern grammar:
//!
//! ```text
//! union  := union '|' concat | concat
//! concat := concat star | star
//! star   := star '*' | atom
//! atom   := '(' union ')' | TERMINAL
//! ```
//!
//! Each rule is either a pass-through to a single child (`Union`, `Concat`,
//! `Star`) or a genuine operator (`Union2`, `Concat2`, `Star2`). Parentheses
//! are kept as `Paren` nodes but carry no meaning of their own.

use crate::alphabet::EPSILON_SENTINEL;
use std::fmt;

/// A node of the pattern syntax tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    /// A single character; [`EPSILON_SENTINEL`] denotes the empty string
    Terminal(char),

    /// A parenthesized sub-pattern
    Paren(Box<Ast>),

    /// `star := atom`, no repetition
    Star(Box<Ast>),

    /// `star := star '*'`
    Star2(Box<Ast>),

    /// `concat := star`, a single factor
    Concat(Box<Ast>),

    /// `concat := concat star`
    Concat2(Box<Ast>, Box<Ast>),

    /// `union := concat`, a single alternative
    Union(Box<Ast>),

    /// `union := union '|' concat`
    Union2(Box<Ast>, Box<Ast>),
}

impl Ast {
    /// Create a terminal
    pub fn terminal(c: char) -> Self {
        Ast::Terminal(c)
    }

    /// Create the epsilon terminal
    pub fn epsilon() -> Self {
        Ast::Terminal(EPSILON_SENTINEL)
    }

    /// Wrap a node in parentheses
    pub fn paren(inner: Ast) -> Self {
        Ast::Paren(Box::new(inner))
    }

    /// Repeat a node zero or more times
    pub fn star(operand: Ast) -> Self {
        Ast::Star2(Box::new(operand))
    }

    /// Concatenate two nodes
    pub fn concat(left: Ast, right: Ast) -> Self {
        Ast::Concat2(Box::new(left), Box::new(right))
    }

    /// Alternate between two nodes
    pub fn union(left: Ast, right: Ast) -> Self {
        Ast::Union2(Box::new(left), Box::new(right))
    }

    /// Check if this node is the epsilon terminal
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Ast::Terminal(c) if *c == EPSILON_SENTINEL)
    }

    /// Skip pass-through nodes and parentheses down to the node that gives
    /// this one its meaning
    pub fn operator(&self) -> &Ast {
        let mut node = self;
        while let Ast::Paren(inner) | Ast::Star(inner) | Ast::Concat(inner) | Ast::Union(inner) =
            node
        {
            node = &**inner;
        }
        node
    }

    /// Direct children, left to right
    fn children(&self) -> [Option<&Ast>; 2] {
        match self {
            Ast::Terminal(_) => [None, None],
            Ast::Paren(inner)
            | Ast::Star(inner)
            | Ast::Star2(inner)
            | Ast::Concat(inner)
            | Ast::Union(inner) => [Some(&**inner), None],
            Ast::Concat2(left, right) | Ast::Union2(left, right) => {
                [Some(&**left), Some(&**right)]
            }
        }
    }

    /// Number of nodes in the tree, pass-through nodes included
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children().into_iter().flatten());
        }
        count
    }

    /// Indented one-node-per-line rendering, for debugging
    pub fn tree(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self, 0usize)];

        while let Some((node, depth)) = stack.pop() {
            let indent = "  ".repeat(depth);
            let label = match node {
                Ast::Terminal(c) if *c == EPSILON_SENTINEL => "Terminal(ε)".to_string(),
                Ast::Terminal(c) => format!("Terminal({c:?})"),
                Ast::Paren(_) => "Paren".to_string(),
                Ast::Star(_) => "Star".to_string(),
                Ast::Star2(_) => "Star2".to_string(),
                Ast::Concat(_) => "Concat".to_string(),
                Ast::Concat2(..) => "Concat2".to_string(),
                Ast::Union(_) => "Union".to_string(),
                Ast::Union2(..) => "Union2".to_string(),
            };
            out.push_str(&format!("{indent}{label}\n"));
            stack.extend(
                node.children()
                    .into_iter()
                    .flatten()
                    .rev()
                    .map(|child| (child, depth + 1)),
            );
        }
        out
    }

    /// Move the children that have children of their own into `into`,
    /// leaving leaves in their place
    fn detach_children(&mut self, into: &mut Vec<Ast>) {
        let mut detach = |slot: &mut Box<Ast>| {
            if !matches!(**slot, Ast::Terminal(_)) {
                into.push(std::mem::replace(&mut **slot, Ast::epsilon()));
            }
        };
        match self {
            Ast::Terminal(_) => {}
            Ast::Paren(inner)
            | Ast::Star(inner)
            | Ast::Star2(inner)
            | Ast::Concat(inner)
            | Ast::Union(inner) => detach(inner),
            Ast::Concat2(left, right) | Ast::Union2(left, right) => {
                detach(left);
                detach(right);
            }
        }
    }
}

// Long patterns build spines as deep as the pattern is long; tear them down
// without recursing.
impl Drop for Ast {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

/// A unit of pending `Display` output
enum Piece<'a> {
    Node(&'a Ast),
    Text(&'static str),
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Piece::Node(self)];

        while let Some(piece) = stack.pop() {
            let node = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Node(node) => node,
            };
            match node {
                Ast::Terminal(c) => write!(f, "{}", c)?,
                Ast::Paren(inner) => {
                    stack.extend([Piece::Text(")"), Piece::Node(inner), Piece::Text("(")])
                }
                Ast::Star(inner) | Ast::Concat(inner) | Ast::Union(inner) => {
                    stack.push(Piece::Node(inner))
                }
                Ast::Star2(inner) => stack.extend([Piece::Text("*"), Piece::Node(inner)]),
                Ast::Concat2(left, right) => {
                    stack.extend([Piece::Node(right), Piece::Node(left)])
                }
                Ast::Union2(left, right) => {
                    stack.extend([Piece::Node(right), Piece::Text("|"), Piece::Node(left)])
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trip_shape() {
        // (a|b)*c
        let ast = Ast::concat(
            Ast::star(Ast::paren(Ast::union(Ast::terminal('a'), Ast::terminal('b')))),
            Ast::terminal('c'),
        );
        assert_eq!(ast.to_string(), "(a|b)*c");
    }

    #[test]
    fn test_pass_through_is_invisible() {
        let ast = Ast::Union(Box::new(Ast::Concat(Box::new(Ast::Star(Box::new(
            Ast::terminal('x'),
        ))))));
        assert_eq!(ast.to_string(), "x");
        assert_eq!(ast.size(), 4);
    }

    #[test]
    fn test_epsilon() {
        assert!(Ast::epsilon().is_epsilon());
        assert!(!Ast::terminal('a').is_epsilon());
        assert!(!Ast::paren(Ast::epsilon()).is_epsilon());
    }

    #[test]
    fn test_tree_rendering() {
        let ast = Ast::union(Ast::terminal('a'), Ast::epsilon());
        assert_eq!(ast.tree(), "Union2\n  Terminal('a')\n  Terminal(ε)\n");
    }

    #[test]
    fn test_tree_visits_left_before_right() {
        let ast = Ast::concat(Ast::star(Ast::terminal('a')), Ast::paren(Ast::terminal('b')));
        assert_eq!(
            ast.tree(),
            "Concat2\n  Star2\n    Terminal('a')\n  Paren\n    Terminal('b')\n"
        );
    }

    #[test]
    fn test_operator_skips_pass_through() {
        let ast = Ast::Union(Box::new(Ast::paren(Ast::star(Ast::terminal('x')))));
        assert_eq!(ast.operator(), &Ast::star(Ast::terminal('x')));
        assert_eq!(Ast::terminal('y').operator(), &Ast::terminal('y'));
    }

    /// A left-folded chain of `n` terminals, the way the parser builds `abab...`
    fn left_spine(n: usize) -> Ast {
        (1..n).fold(Ast::terminal('a'), |node, i| {
            Ast::concat(node, Ast::terminal(if i % 2 == 0 { 'a' } else { 'b' }))
        })
    }

    #[test]
    fn test_deep_spine_display_size_and_drop() {
        let ast = left_spine(50_000);
        assert_eq!(ast.size(), 2 * 50_000 - 1);
        let text = ast.to_string();
        assert_eq!(text.len(), 50_000);
        assert!(text.starts_with("abab"));
        drop(ast);
    }
}
