// pretty.rs — Render canonical types for diagnostics.
//
// Builtins whose module matches their ident (List, Maybe, Array, Result)
// and the Basics primitives print bare; everything else prints qualified
// (`Signal.Stream`, `Json.Value`, user constructors). Aliases print as
// written, by head name, not by their expansion.
//
// Preconditions: input is a canonical type.
// Postconditions: output is deterministic for a given type.
// Failure modes: none.
// Side effects: none.

use crate::builtins::{is_tuple, is_unit, Name, MOD_BASICS};
use crate::types::CanonicalType;

// ── Precedence ──────────────────────────────────────────────────────────────

/// Rendering context, ordered from loosest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    /// Top level, or a position that accepts any type unparenthesized.
    Top,
    /// Left-hand side of an arrow.
    Arrow,
    /// Argument position of a constructor application.
    Atom,
}

// ── Entry point ─────────────────────────────────────────────────────────────

/// Render a canonical type as diagnostic text.
pub fn pretty(ty: &CanonicalType) -> String {
    render(ty, Prec::Top)
}

fn render(ty: &CanonicalType, prec: Prec) -> String {
    match ty {
        CanonicalType::Named(name) => {
            if is_unit(name) {
                "()".to_string()
            } else {
                short(name)
            }
        }
        CanonicalType::Var(var) => var.clone(),
        CanonicalType::Applied(name, args) => render_application(name, args, prec),
        CanonicalType::Fn(arg, result) => {
            let text = format!("{} -> {}", render(arg, Prec::Arrow), render(result, Prec::Top));
            if prec >= Prec::Arrow {
                format!("({text})")
            } else {
                text
            }
        }
        CanonicalType::Record(fields, ext) => {
            if fields.is_empty() && ext.is_none() {
                return "{}".to_string();
            }
            let body = fields
                .iter()
                .map(|field| format!("{} : {}", field.name, render(&field.ty, Prec::Top)))
                .collect::<Vec<_>>()
                .join(", ");
            match ext {
                Some(var) => format!("{{ {var} | {body} }}"),
                None => format!("{{ {body} }}"),
            }
        }
        CanonicalType::Aliased(name, args, _body) => {
            let arg_types: Vec<&CanonicalType> = args.iter().map(|(_, ty)| ty).collect();
            render_constructor(name, &arg_types, prec)
        }
    }
}

fn render_application(name: &Name, args: &[CanonicalType], prec: Prec) -> String {
    if is_tuple(name) {
        if args.is_empty() {
            return "()".to_string();
        }
        let body = args
            .iter()
            .map(|ty| render(ty, Prec::Top))
            .collect::<Vec<_>>()
            .join(", ");
        return format!("( {body} )");
    }
    let arg_refs: Vec<&CanonicalType> = args.iter().collect();
    render_constructor(name, &arg_refs, prec)
}

fn render_constructor(name: &Name, args: &[&CanonicalType], prec: Prec) -> String {
    if args.is_empty() {
        return short(name);
    }
    let mut text = short(name);
    for arg in args {
        text.push(' ');
        text.push_str(&render(arg, Prec::Atom));
    }
    if prec >= Prec::Atom {
        format!("({text})")
    } else {
        text
    }
}

/// Shorthand a qualified name the way source code usually spells it.
fn short(name: &Name) -> String {
    if name.module == MOD_BASICS || name.module == name.ident {
        name.ident.clone()
    } else {
        format!("{}.{}", name.module, name.ident)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
