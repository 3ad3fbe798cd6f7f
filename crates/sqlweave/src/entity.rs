//! Entity metadata and alias bindings.
//!
//! [`EntityMeta`] is the compiler's name-resolution interface: it maps an
//! entity to its table name and a member name to a column name (explicit
//! override, else the member name verbatim). It is populated ahead of time by
//! whatever front-end produces the template; the compiler never inspects
//! runtime objects.

use std::collections::HashMap;
use std::sync::Arc;

/// Resolved metadata for one entity: table name plus column overrides.
///
/// # Example
/// ```
/// use sqlweave::EntityMeta;
///
/// let user = EntityMeta::new("users").column("Id", "user_id");
/// assert_eq!(user.table(), "users");
/// assert_eq!(user.column_name("Id"), "user_id");
/// assert_eq!(user.column_name("Name"), "Name"); // identity fallback
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityMeta {
    table: String,
    columns: HashMap<String, String>,
}

impl EntityMeta {
    /// Create metadata for an entity with the given table name.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: HashMap::new(),
        }
    }

    /// Register a member-to-column override.
    pub fn column(mut self, member: impl Into<String>, column: impl Into<String>) -> Self {
        self.columns.insert(member.into(), column.into());
        self
    }

    /// The entity's table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Resolve a member name to a column name.
    ///
    /// Returns the registered override if present, otherwise the member name
    /// itself, exactly as given (case preserved).
    pub fn column_name<'a>(&'a self, member: &'a str) -> &'a str {
        self.columns.get(member).map(String::as_str).unwrap_or(member)
    }

    /// Wrap this metadata in an [`Arc`] for sharing across bindings.
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

/// One template parameter: an entity bound to a short alias.
///
/// Created once per compile call and immutable thereafter. Alias uniqueness
/// within a template is the caller's responsibility; colliding aliases
/// produce syntactically valid but ambiguous SQL.
#[derive(Debug, Clone)]
pub struct AliasBinding {
    ordinal: usize,
    alias: String,
    entity: Arc<EntityMeta>,
}

impl AliasBinding {
    /// Create a binding at the given ordinal position.
    pub fn new(ordinal: usize, alias: impl Into<String>, entity: Arc<EntityMeta>) -> Self {
        Self {
            ordinal,
            alias: alias.into(),
            entity,
        }
    }

    /// Zero-based position of this binding among the template's parameters.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// The alias name (e.g. `u`).
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// The bound entity's metadata.
    pub fn entity(&self) -> &EntityMeta {
        &self.entity
    }
}

/// Find a binding by alias name.
pub(crate) fn find_binding<'a>(bindings: &'a [AliasBinding], alias: &str) -> Option<&'a AliasBinding> {
    bindings.iter().find(|b| b.alias() == alias)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_override_wins() {
        let meta = EntityMeta::new("users").column("CreatedAt", "created_at");
        assert_eq!(meta.column_name("CreatedAt"), "created_at");
    }

    #[test]
    fn column_identity_preserves_case() {
        let meta = EntityMeta::new("users");
        assert_eq!(meta.column_name("CreatedAt"), "CreatedAt");
    }

    #[test]
    fn find_binding_by_alias() {
        let user = EntityMeta::new("User").shared();
        let bindings = vec![
            AliasBinding::new(0, "u1", Arc::clone(&user)),
            AliasBinding::new(1, "u2", user),
        ];
        assert_eq!(find_binding(&bindings, "u2").unwrap().ordinal(), 1);
        assert!(find_binding(&bindings, "u3").is_none());
    }
}
