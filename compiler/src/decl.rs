// decl.rs — Port and loopback declaration surface.
//
// The declaration-collection pass hands canonicalization one `PortModule`
// per source module. Declarations carry spans for diagnostics; their types
// are already canonical (inference has run). Implementation expressions are
// opaque handles here — bodies are validated by a different pass.
//
// Preconditions: produced by declaration collection after inference.
// Postconditions: none (data-only module).
// Failure modes: none.
// Side effects: none.

use chumsky::span::SimpleSpan;

use crate::id::{DeclId, ExprId};
use crate::types::CanonicalType;

/// Byte-offset span (alias for chumsky's `SimpleSpan`).
pub type Span = SimpleSpan;

// ── Direction ───────────────────────────────────────────────────────────────

/// Which way a port's values cross the host boundary. Fixed per
/// declaration, never mutated during traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    /// Label used in diagnostic headlines.
    pub fn label(self) -> &'static str {
        match self {
            Direction::In => "Input",
            Direction::Out => "Output",
        }
    }
}

// ── Declarations ────────────────────────────────────────────────────────────

/// An opaque handle to an implementation expression body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExprRef {
    pub id: ExprId,
    pub span: Span,
}

/// A declared input or output port.
#[derive(Debug, Clone)]
pub struct PortDecl {
    pub id: DeclId,
    pub name: String,
    pub span: Span,
    pub direction: Direction,
    pub ty: CanonicalType,
}

/// A declared loopback, with or without an implementation expression.
#[derive(Debug, Clone)]
pub struct LoopbackPort {
    pub id: DeclId,
    pub name: String,
    pub span: Span,
    pub expr: Option<ExprRef>,
    pub ty: CanonicalType,
}

/// All boundary declarations of one source module.
#[derive(Debug, Clone)]
pub struct PortModule {
    pub name: String,
    pub ports: Vec<PortDecl>,
    pub loopbacks: Vec<LoopbackPort>,
}
