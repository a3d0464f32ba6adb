// effects.rs — Canonicalize the boundary declarations of one module.
//
// Drives the wire type checker and the loopback classifier once per
// declaration and aggregates every failure. Within one declaration the
// first violation wins; across declarations checking always continues, so
// the user sees one diagnostic per bad declaration. The caller aborts the
// module's compilation if any diagnostic is an error.
//
// Preconditions: all declaration types are canonical (inference complete).
// Postconditions: every declaration was checked exactly once; classified
//   loopbacks are returned in declaration order.
// Failure modes: none — failures become diagnostics in the result.
// Side effects: none.

use crate::decl::{Direction, PortModule};
use crate::diag::Diagnostic;
use crate::loopback::{self, LoopbackDecl};
use crate::wire;

// ── Public types ────────────────────────────────────────────────────────────

/// Result of canonicalizing one module's boundary declarations.
#[derive(Debug)]
pub struct EffectsResult {
    /// Classified loopback declarations, ready for code generation.
    pub loopbacks: Vec<LoopbackDecl>,
    /// One diagnostic per failed declaration.
    pub diagnostics: Vec<Diagnostic>,
}

impl EffectsResult {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ── Public entry point ──────────────────────────────────────────────────────

/// Check every port and classify every loopback in the module.
pub fn canonicalize_ports(module: &PortModule) -> EffectsResult {
    let mut loopbacks = Vec::new();
    let mut diagnostics = Vec::new();

    for port in &module.ports {
        let checked = match port.direction {
            Direction::In => wire::check_input(&port.name, &port.ty),
            Direction::Out => wire::check_output(&port.name, &port.ty),
        };
        if let Err(err) = checked {
            diagnostics.push(err.to_diagnostic(port.span));
        }
    }

    for decl in &module.loopbacks {
        match loopback::classify(&decl.name, decl.expr.as_ref(), &decl.ty) {
            Ok(classified) => loopbacks.push(classified),
            Err(err) => diagnostics.push(err.to_diagnostic(decl.span)),
        }
    }

    EffectsResult {
        loopbacks,
        diagnostics,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
