//! Hole classification: table reference, column reference, or bound value.
//!
//! Classification is decided by structural shape, never by runtime value:
//! only direct alias identity (table) or alias-then-member (column) count as
//! identifier references. Everything else is routed to the value evaluator.
//! Identifier names for table/column holes are always drawn from entity
//! metadata, so arbitrary runtime data can never reach the SQL text.

use crate::entity::{AliasBinding, find_binding};
use crate::error::CompileResult;
use crate::value::{Thunk, Value};

/// The unresolved expression bound to one hole.
///
/// This is the closed shape union the classifier matches over: a dotted name
/// path, a literal constant, or a deferred computation.
#[derive(Debug)]
pub enum HoleExpr {
    /// A dotted name path: `u`, `u.Name`, or `ctx.page.size`.
    Path(Vec<String>),
    /// A literal constant known at template construction time.
    Const(Value),
    /// A deferred computation for arbitrary expression shapes.
    Computed(Thunk),
}

impl HoleExpr {
    /// A bare identifier reference, e.g. `{u}` or a captured `{id}`.
    pub fn ident(name: impl Into<String>) -> Self {
        HoleExpr::Path(vec![name.into()])
    }

    /// A member access on an identifier, e.g. `{u.Name}`.
    pub fn member(base: impl Into<String>, member: impl Into<String>) -> Self {
        HoleExpr::Path(vec![base.into(), member.into()])
    }

    /// A dotted path of arbitrary depth.
    pub fn path<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        HoleExpr::Path(segments.into_iter().map(Into::into).collect())
    }

    /// A literal constant.
    pub fn constant(value: impl Into<Value>) -> Self {
        HoleExpr::Const(value.into())
    }

    /// A deferred computation, evaluated only if the hole is a value hole.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn() -> Result<Value, String> + Send + Sync + 'static,
    {
        HoleExpr::Computed(Thunk::new(f))
    }
}

/// The classified role of one hole.
#[derive(Debug)]
pub(crate) enum Shape<'a> {
    /// The hole *is* an alias binding: emit the quoted table (plus alias).
    Table(&'a AliasBinding),
    /// Member access on an alias: emit `alias.quoted_column`.
    Column {
        binding: &'a AliasBinding,
        member: &'a str,
    },
    /// Anything else: evaluate and bind as a parameter.
    Value,
}

/// Classify one hole expression against the active alias bindings.
///
/// Total over the three rules; the `Result` exists so a future shape that
/// matches no rule can surface as
/// [`UnclassifiableShape`](crate::CompileError::UnclassifiableShape) instead
/// of being silently misbound.
pub(crate) fn classify<'a>(
    expr: &'a HoleExpr,
    bindings: &'a [AliasBinding],
) -> CompileResult<Shape<'a>> {
    match expr {
        HoleExpr::Path(path) => match path.as_slice() {
            // Rule A: the hole is exactly an alias.
            [name] => match find_binding(bindings, name) {
                Some(binding) => Ok(Shape::Table(binding)),
                None => Ok(Shape::Value),
            },
            // Rule B: member access on an alias.
            [base, member] => match find_binding(bindings, base) {
                Some(binding) => Ok(Shape::Column { binding, member }),
                None => Ok(Shape::Value),
            },
            // Longer chains are never identifier references.
            _ => Ok(Shape::Value),
        },
        HoleExpr::Const(_) | HoleExpr::Computed(_) => Ok(Shape::Value),
    }
}
