//! Query operators and the operator tree.
//!
//! An operator tree is evaluated bottom-up and depth-first: every node evaluates
//! all of its children before it opens cursors over their results and merges
//! them. List-producing nodes ([`ListNode`]) return an
//! [`InvertedList`](crate::postings::InvertedList); score-producing nodes
//! ([`ScoreNode`]) return a [`ScoreList`](crate::postings::ScoreList), or
//! `None` when the retrieval model is not one they implement.

pub mod and;
pub mod context;
pub mod near;
pub mod node;
pub mod or;
pub mod score;
pub mod term;

use std::fmt::{self, Display, Write};

pub use self::and::AndOp;
pub use self::context::EvaluationContext;
pub use self::near::NearOp;
pub use self::node::{ListNode, QueryNode, QueryResult, ScoreNode};
pub use self::or::OrOp;
pub use self::score::ScoreOp;
pub use self::term::TermOp;

/// Render `name( arg arg ... )`, the canonical form of an operator.
pub(crate) fn render_operator<T: Display>(name: &str, args: &[T]) -> String {
    let mut rendered = format!("{name}( ");
    for arg in args {
        // Writing to a String cannot fail.
        let _ = write!(rendered, "{arg} ");
    }
    rendered.push(')');
    rendered
}

/// Write the canonical form of an operator to a formatter.
pub(crate) fn fmt_operator<T: Display>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    args: &[T],
) -> fmt::Result {
    write!(f, "{name}( ")?;
    for arg in args {
        write!(f, "{arg} ")?;
    }
    f.write_str(")")
}
