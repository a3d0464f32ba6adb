// loopback.rs — Classify loopback declarations into canonical variants.
//
// A loopback without an implementation must pair a writable mailbox with
// its stream; a loopback with an implementation must produce a stream of
// results, which is rewritten into a stream of promises for code
// generation. Anything else is a definite shape error.
//
// Preconditions: `ty` is canonical; `expr` is present iff the declaration
//   carries an implementation.
// Postconditions: on success the returned variant feeds code generation
//   unchanged; the declared type is never mutated.
// Failure modes: shape mismatches and alias cycles return
//   `LoopbackShapeError`.
// Side effects: none.

use crate::alias;
use crate::builtins::{self, Name};
use crate::decl::{ExprRef, Span};
use crate::diag::{codes, DiagLevel, Diagnostic};
use crate::report;
use crate::types::CanonicalType;

// ── Canonical declaration variants ──────────────────────────────────────────

/// A classified loopback declaration, consumed by code generation.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopbackDecl {
    /// Feedback pattern: a mailbox paired with a same-typed stream.
    Mailbox { name: String, ty: CanonicalType },
    /// Asynchronous effect pattern: `Stream (Result e a)` rewritten to
    /// `Stream (Promise e a)`, implementation kept alongside.
    Promise {
        name: String,
        promise_ty: CanonicalType,
        expr: ExprRef,
        original_ty: CanonicalType,
    },
}

// ── Error type ──────────────────────────────────────────────────────────────

/// The declared type did not match the expected loopback shape.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopbackShapeError {
    /// Case A: no implementation, but not a mailbox/stream record.
    NotWritableStream { name: String, ty: CanonicalType },
    /// Case B: implementation present, but not a stream of results.
    NotResultStream { name: String, ty: CanonicalType },
    /// Alias expansion exceeded its bound while normalizing the type.
    AliasCycle {
        name: String,
        ty: CanonicalType,
        alias: Name,
    },
}

impl LoopbackShapeError {
    /// Render the shape error at the declaration's span.
    pub fn to_diagnostic(&self, span: Span) -> Diagnostic {
        let (code, name, ty, details) = match self {
            LoopbackShapeError::NotWritableStream { name, ty } => (
                codes::BAD_MAILBOX_LOOPBACK,
                name,
                ty,
                vec![
                    "a loopback without an implementation must pair a writable mailbox \
                     with its stream"
                        .to_string(),
                    report::examples(
                        "for example:",
                        &["{ mailbox : Signal.Mailbox a, stream : Signal.Stream a }"],
                    ),
                ],
            ),
            LoopbackShapeError::NotResultStream { name, ty } => (
                codes::BAD_PROMISE_LOOPBACK,
                name,
                ty,
                vec![
                    "a loopback with an implementation must produce a stream of results"
                        .to_string(),
                    report::examples(
                        "for example:",
                        &[
                            "Signal.Stream (Result Error Success)",
                            "Signal.Stream (Result x ())",
                        ],
                    ),
                ],
            ),
            LoopbackShapeError::AliasCycle { name, ty, alias } => (
                codes::ALIAS_CYCLE,
                name,
                ty,
                vec![format!(
                    "alias `{alias}` did not reach a concrete type within {} expansions",
                    alias::MAX_ALIAS_DEPTH
                )],
            ),
        };
        let (message, notes) = report::document("Loopback", name, ty, None, &details, &[]);
        Diagnostic::new(DiagLevel::Error, span, message)
            .with_code(code)
            .with_notes(notes)
    }
}

// ── Public contract ─────────────────────────────────────────────────────────

/// Match a loopback declaration against the two recognized shapes.
pub fn classify(
    name: &str,
    expr: Option<&ExprRef>,
    ty: &CanonicalType,
) -> Result<LoopbackDecl, LoopbackShapeError> {
    match expr {
        None => classify_mailbox(name, ty),
        Some(expr) => classify_promise(name, expr, ty),
    }
}

/// Case A: `{ mailbox : Signal.Mailbox a, stream : Signal.Stream a }`,
/// both fields present, no others, inner types structurally equal.
/// Field order is irrelevant.
fn classify_mailbox(name: &str, ty: &CanonicalType) -> Result<LoopbackDecl, LoopbackShapeError> {
    let normal = normalize(name, ty)?;
    if let CanonicalType::Record(fields, None) = &normal {
        if fields.len() == 2 {
            let mailbox = fields.iter().find(|f| f.name == "mailbox");
            let stream = fields.iter().find(|f| f.name == "stream");
            if let (Some(mailbox), Some(stream)) = (mailbox, stream) {
                if let (
                    CanonicalType::Applied(mail_ctor, mail_args),
                    CanonicalType::Applied(stream_ctor, stream_args),
                ) = (&mailbox.ty, &stream.ty)
                {
                    if builtins::is_mailbox(mail_ctor)
                        && builtins::is_stream(stream_ctor)
                        && mail_args.len() == 1
                        && stream_args.len() == 1
                        && mail_args[0] == stream_args[0]
                    {
                        return Ok(LoopbackDecl::Mailbox {
                            name: name.to_string(),
                            ty: ty.clone(),
                        });
                    }
                }
            }
        }
    }
    Err(LoopbackShapeError::NotWritableStream {
        name: name.to_string(),
        ty: ty.clone(),
    })
}

/// Case B: `Stream (Result e a)`. The synthesized type replaces the Result
/// application with `Promise e a`, under the same stream constructor.
fn classify_promise(
    name: &str,
    expr: &ExprRef,
    ty: &CanonicalType,
) -> Result<LoopbackDecl, LoopbackShapeError> {
    let normal = normalize(name, ty)?;
    if let CanonicalType::Applied(stream_ctor, stream_args) = &normal {
        if builtins::is_stream(stream_ctor) && stream_args.len() == 1 {
            if let CanonicalType::Applied(result_ctor, result_args) = &stream_args[0] {
                if builtins::is_result(result_ctor) && result_args.len() == 2 {
                    let promise_ty = CanonicalType::Applied(
                        stream_ctor.clone(),
                        vec![CanonicalType::Applied(
                            builtins::promise(),
                            result_args.clone(),
                        )],
                    );
                    return Ok(LoopbackDecl::Promise {
                        name: name.to_string(),
                        promise_ty,
                        expr: *expr,
                        original_ty: ty.clone(),
                    });
                }
            }
        }
    }
    Err(LoopbackShapeError::NotResultStream {
        name: name.to_string(),
        ty: ty.clone(),
    })
}

fn normalize(name: &str, ty: &CanonicalType) -> Result<CanonicalType, LoopbackShapeError> {
    alias::deep_dealias(ty).map_err(|err| LoopbackShapeError::AliasCycle {
        name: name.to_string(),
        ty: ty.clone(),
        alias: err.alias,
    })
}

// ── Tests ───────────────────────────────────────────────────────────────────
