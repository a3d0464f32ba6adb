// builtins.rs — Well-known type constructor identities
//
// The checker treats builtin resolution as opaque: every predicate here is
// an equality test against a closed table of fully-qualified identities,
// never a bare-ident comparison. User code may shadow `Stream` or `Result`
// with its own constructor; a shadowed constructor resolves to a different
// module and must not pass these tests.
//
// Preconditions: names are fully resolved (post name-resolution).
// Postconditions: none (pure predicates).
// Failure modes: none.
// Side effects: none.

use std::fmt;

// ── Qualified names ─────────────────────────────────────────────────────────

/// A fully-qualified constructor identity, post name-resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    pub module: String,
    pub ident: String,
}

impl Name {
    pub fn new(module: impl Into<String>, ident: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            ident: ident.into(),
        }
    }

    fn is(&self, module: &str, ident: &str) -> bool {
        self.module == module && self.ident == ident
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.ident)
    }
}

// ── Builtin modules ─────────────────────────────────────────────────────────

pub const MOD_BASICS: &str = "Basics";
pub const MOD_JSON: &str = "Json";
pub const MOD_MAYBE: &str = "Maybe";
pub const MOD_LIST: &str = "List";
pub const MOD_ARRAY: &str = "Array";
pub const MOD_SIGNAL: &str = "Signal";
pub const MOD_RESULT: &str = "Result";
pub const MOD_PROMISE: &str = "Promise";

/// The `Promise.Promise` constructor, synthesized by the loopback classifier.
pub fn promise() -> Name {
    Name::new(MOD_PROMISE, "Promise")
}

/// The `TupleN` constructor for a given arity (`Tuple0` is the unit type).
pub fn tuple(arity: usize) -> Name {
    Name::new(MOD_BASICS, format!("Tuple{arity}"))
}

// ── Identity predicates ─────────────────────────────────────────────────────

/// Flat builtin data: numeric, boolean, and text types.
pub fn is_primitive(name: &Name) -> bool {
    name.module == MOD_BASICS && matches!(name.ident.as_str(), "Int" | "Float" | "Bool" | "Text")
}

/// The unit type, `Basics.Tuple0`.
pub fn is_unit(name: &Name) -> bool {
    name.is(MOD_BASICS, "Tuple0")
}

/// An arbitrary JSON value crossing the boundary opaquely.
pub fn is_json_value(name: &Name) -> bool {
    name.is(MOD_JSON, "Value")
}

/// The `Basics.TupleN` family. Closed: only canonicalization itself mints
/// tuple constructors, always in this module with this spelling.
pub fn is_tuple(name: &Name) -> bool {
    name.module == MOD_BASICS
        && name.ident.strip_prefix("Tuple").is_some_and(|digits| {
            !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
        })
}

pub fn is_maybe(name: &Name) -> bool {
    name.is(MOD_MAYBE, "Maybe")
}

pub fn is_list(name: &Name) -> bool {
    name.is(MOD_LIST, "List")
}

pub fn is_array(name: &Name) -> bool {
    name.is(MOD_ARRAY, "Array")
}

pub fn is_stream(name: &Name) -> bool {
    name.is(MOD_SIGNAL, "Stream")
}

pub fn is_varying(name: &Name) -> bool {
    name.is(MOD_SIGNAL, "Varying")
}

pub fn is_mailbox(name: &Name) -> bool {
    name.is(MOD_SIGNAL, "Mailbox")
}

pub fn is_result(name: &Name) -> bool {
    name.is(MOD_RESULT, "Result")
}

pub fn is_promise(name: &Name) -> bool {
    name.is(MOD_PROMISE, "Promise")
}

// ── Tests ───────────────────────────────────────────────────────────────────
