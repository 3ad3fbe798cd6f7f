//! # sqlweave
//!
//! A template-to-SQL compiler: queries that read like SQL, compiled into
//! dialect-correct, parameterized SQL plus an ordered list of bound values.
//!
//! ## Features
//!
//! - **Typed holes**: a template's `{n}` holes are classified by structural
//!   shape as a table reference, a column reference, or a bound value
//! - **Safe identifiers**: table/column names come only from entity metadata
//!   and are quoted per dialect; runtime data can never reach the SQL text
//! - **Parameter-safe**: values are never inlined — they come back as an
//!   ordered parameter list aligned with the emitted placeholders
//! - **Dialect-aware**: per-database quoting styles and an alias-suppression
//!   policy for dialects that reject aliased `UPDATE`/`DELETE` targets
//! - **Two output forms**: named-parameter SQL (`@p0`, `@p1`, ...) or a
//!   positional-format template (`{0}`, `{1}`, ...) with an argument array
//!
//! ## Example
//!
//! ```
//! use sqlweave::{Dialect, EntityMeta, HoleExpr, QueryCompiler, QueryTemplate, Value};
//!
//! let user = EntityMeta::new("User").shared();
//!
//! // SELECT {u.Id}, {u.Name} FROM {u} WHERE {u.Id} = {42}
//! let tpl = QueryTemplate::new("SELECT {0}, {1} FROM {2} WHERE {3} = {4}")
//!     .hole(HoleExpr::member("u", "Id"))
//!     .hole(HoleExpr::member("u", "Name"))
//!     .hole(HoleExpr::ident("u"))
//!     .hole(HoleExpr::member("u", "Id"))
//!     .hole(HoleExpr::constant(42i64));
//!
//! let query = QueryCompiler::new(Dialect::Postgres)
//!     .bind("u", user)
//!     .compile(&tpl)?;
//!
//! assert_eq!(
//!     query.sql(),
//!     r#"SELECT u."Id", u."Name" FROM "User" u WHERE u."Id" = @p0"#
//! );
//! assert_eq!(query.params(), &[Value::Int(42)]);
//! # Ok::<(), sqlweave::CompileError>(())
//! ```

pub mod classify;
pub mod compiler;
pub mod dialect;
pub mod emit;
pub mod entity;
pub mod error;
pub mod template;
pub mod value;

pub use classify::HoleExpr;
pub use compiler::QueryCompiler;
pub use dialect::{Dialect, DialectProfile, QuoteStyle};
pub use emit::{CompiledQuery, PositionalQuery};
pub use entity::{AliasBinding, EntityMeta};
pub use error::{CompileError, CompileResult};
pub use template::{QueryTemplate, Segment};
pub use value::{CaptureScope, Thunk, Value};
