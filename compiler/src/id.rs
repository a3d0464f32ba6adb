// id.rs — Stable semantic identifiers for canonicalization artifacts
//
// These IDs provide deterministic, span-independent identity for
// declarations and their implementation expressions. Allocated in source
// order during declaration collection and threaded through canonicalization
// and code generation alongside span keys.

/// Stable identifier for a top-level declaration (port or loopback).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub u32);

/// Stable identifier for an implementation expression body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(pub u32);

/// Allocator for stable IDs. Produces monotonically increasing IDs in
/// allocation (source) order, ensuring deterministic assignment.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next_decl: u32,
    next_expr: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_decl(&mut self) -> DeclId {
        let id = DeclId(self.next_decl);
        self.next_decl += 1;
        id
    }

    pub fn alloc_expr(&mut self) -> ExprId {
        let id = ExprId(self.next_expr);
        self.next_expr += 1;
        id
    }
}
