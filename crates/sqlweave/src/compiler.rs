//! The template-to-SQL compiler pipeline.
//!
//! [`QueryCompiler`] holds the per-invocation inputs (dialect profile, alias
//! bindings, capture scope) and runs the linear parse → classify → evaluate →
//! emit pipeline over a [`QueryTemplate`]. Each compile call is a pure,
//! synchronous computation over its own state; compiles may run fully in
//! parallel with no coordination.

use std::sync::Arc;

use crate::classify::{Shape, classify};
use crate::dialect::{Dialect, DialectProfile};
use crate::emit::{CompiledQuery, Emitter, PlaceholderStyle, PositionalQuery, alias_suppressed_for};
use crate::entity::{AliasBinding, EntityMeta};
use crate::error::{CompileError, CompileResult};
use crate::template::{QueryTemplate, Segment, parse_segments};
use crate::value::{CaptureScope, Value, evaluate};

/// Compiles query templates into dialect-correct, parameterized SQL.
///
/// # Example
/// ```
/// use sqlweave::{Dialect, EntityMeta, HoleExpr, QueryCompiler, QueryTemplate, Value};
///
/// let user = EntityMeta::new("User").shared();
/// let tpl = QueryTemplate::new("SELECT {0} FROM {1} WHERE {2} = {3}")
///     .hole(HoleExpr::member("u", "Id"))
///     .hole(HoleExpr::ident("u"))
///     .hole(HoleExpr::member("u", "Name"))
///     .hole(HoleExpr::constant("alice"));
///
/// let query = QueryCompiler::new(Dialect::Postgres)
///     .bind("u", user)
///     .compile(&tpl)
///     .unwrap();
///
/// assert_eq!(
///     query.sql(),
///     r#"SELECT u."Id" FROM "User" u WHERE u."Name" = @p0"#
/// );
/// assert_eq!(query.params(), &[Value::Text("alice".to_string())]);
/// ```
#[must_use]
#[derive(Debug)]
pub struct QueryCompiler {
    profile: DialectProfile,
    bindings: Vec<AliasBinding>,
    captures: CaptureScope,
}

impl QueryCompiler {
    /// Create a compiler for a built-in dialect.
    pub fn new(dialect: Dialect) -> Self {
        Self::with_profile(dialect.profile())
    }

    /// Create a compiler for a custom dialect profile.
    pub fn with_profile(profile: DialectProfile) -> Self {
        Self {
            profile,
            bindings: Vec::new(),
            captures: CaptureScope::new(),
        }
    }

    /// Bind an entity to an alias at the next ordinal position.
    ///
    /// Aliases must be unique within a template; collisions are not detected
    /// and produce ambiguous (but parameter-safe) SQL.
    pub fn bind(mut self, alias: impl Into<String>, entity: Arc<EntityMeta>) -> Self {
        let ordinal = self.bindings.len();
        self.bindings.push(AliasBinding::new(ordinal, alias, entity));
        self
    }

    /// Record a captured variable for value-hole resolution.
    pub fn capture(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.captures.set(name, value);
        self
    }

    /// Replace the whole capture scope.
    pub fn captures(mut self, scope: CaptureScope) -> Self {
        self.captures = scope;
        self
    }

    /// The active alias bindings, in ordinal order.
    pub fn bindings(&self) -> &[AliasBinding] {
        &self.bindings
    }

    /// Compile to named-parameter form: `@pN` placeholders plus an ordered
    /// value list.
    pub fn compile(&self, template: &QueryTemplate) -> CompileResult<CompiledQuery> {
        let (sql, params) = self.run(template, PlaceholderStyle::Named)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "sqlweave.sql",
            form = "named",
            param_count = params.len(),
            sql = %sql,
            "compiled template"
        );
        Ok(CompiledQuery::from_parts(sql, params))
    }

    /// Compile to positional-template form: `{N}` placeholders plus an
    /// argument array, with literal braces escaped to `{{`/`}}`.
    pub fn compile_positional(&self, template: &QueryTemplate) -> CompileResult<PositionalQuery> {
        let (format, args) = self.run(template, PlaceholderStyle::Positional)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "sqlweave.sql",
            form = "positional",
            param_count = args.len(),
            sql = %format,
            "compiled template"
        );
        Ok(PositionalQuery::from_parts(format, args))
    }

    fn run(
        &self,
        template: &QueryTemplate,
        style: PlaceholderStyle,
    ) -> CompileResult<(String, Vec<Value>)> {
        let holes = template.holes();
        let segments = parse_segments(template.text(), holes.len())?;
        let suppress = alias_suppressed_for(template.text(), &self.profile);

        // Classification and evaluation are pure per hole index, so both are
        // memoized; a hole referenced by several placeholders still gets one
        // placeholder and one parameter entry per occurrence.
        let mut shapes: Vec<Option<Shape<'_>>> = Vec::with_capacity(holes.len());
        shapes.resize_with(holes.len(), || None);
        let mut values: Vec<Option<Value>> = vec![None; holes.len()];

        let capacity = template.text().len() + holes.len() * 8;
        let mut emitter = Emitter::new(&self.profile, style, suppress, capacity);

        for segment in &segments {
            match segment {
                Segment::Literal(text) => emitter.push_literal(text),
                Segment::Hole(index) => {
                    let index = *index;
                    if shapes[index].is_none() {
                        shapes[index] = Some(classify(&holes[index], &self.bindings)?);
                    }
                    match shapes[index].as_ref().unwrap_or(&Shape::Value) {
                        Shape::Table(binding) => emitter.push_table(binding),
                        Shape::Column { binding, member } => {
                            emitter.push_column(binding, member)
                        }
                        Shape::Value => {
                            if values[index].is_none() {
                                let value = evaluate(&holes[index], &self.captures)
                                    .map_err(|m| CompileError::evaluation(index, m))?;
                                values[index] = Some(value);
                            }
                            let value = values[index].as_ref().cloned().unwrap_or(Value::Null);
                            emitter.push_value(value);
                        }
                    }
                }
            }
        }

        Ok(emitter.finish())
    }
}
