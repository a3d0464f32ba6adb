// types.rs — Canonical types, post type-inference.
//
// The inference pass produces these values with every name resolved to a
// concrete identity; canonicalization consumes them read-only. Alias nodes
// keep their unexpanded body so diagnostics can print the alias as written.
//
// Preconditions: produced by inference; no unresolved inference variables
//   other than deliberate `Var` nodes (unbound user type variables).
// Postconditions: none (data-only module).
// Failure modes: none.
// Side effects: none.

use crate::builtins::Name;

// ── Canonical type ──────────────────────────────────────────────────────────

/// A fully-resolved type value. Closed sum: adding a variant must update
/// every `match` in `wire`, `loopback`, `alias`, and `pretty`.
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalType {
    /// Zero-arity use of a resolved builtin or user constructor.
    Named(Name),
    /// A type constructor applied to argument types.
    Applied(Name, Vec<CanonicalType>),
    /// A free (unbound) type variable.
    Var(String),
    /// Curried arrow. `a -> b -> c` is `Fn(a, Fn(b, c))`.
    Fn(Box<CanonicalType>, Box<CanonicalType>),
    /// A record: ordered fields plus an optional extension variable
    /// (`{ r | x : Int }` carries `Some("r")`).
    Record(Vec<RecordField>, Option<String>),
    /// A resolved alias: head name, substitution args, unexpanded body.
    Aliased(Name, Vec<(String, CanonicalType)>, Box<CanonicalType>),
}

/// One record field. Declaration order is significant for traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    pub name: String,
    pub ty: CanonicalType,
}

impl CanonicalType {
    /// Curried arrow constructor.
    pub fn fun(arg: CanonicalType, result: CanonicalType) -> Self {
        CanonicalType::Fn(Box::new(arg), Box::new(result))
    }

    /// A closed record from `(name, type)` pairs, preserving order.
    pub fn record(fields: Vec<(&str, CanonicalType)>) -> Self {
        CanonicalType::Record(
            fields
                .into_iter()
                .map(|(name, ty)| RecordField {
                    name: name.to_string(),
                    ty,
                })
                .collect(),
            None,
        )
    }
}

// ── Signal kinds ────────────────────────────────────────────────────────────

/// The signal wrapper observed at the outermost position of a wire type.
/// At most one unwrap happens per checked declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Stream,
    Varying,
}

impl SignalKind {
    /// Phrase used in signal-specific diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            SignalKind::Stream => "stream",
            SignalKind::Varying => "varying value",
        }
    }
}
