// alias.rs — Alias expansion to normal form.
//
// `dealias` substitutes one alias level; `expand_head` peels nested alias
// heads; `deep_dealias` normalizes a whole type. Alias graphs are acyclic
// by construction upstream, but expansion is still depth-bounded so a
// broken collaborator surfaces as a diagnostic instead of a hang.
//
// Preconditions: input types are canonical (all names resolved).
// Postconditions: `expand_head` returns a non-`Aliased` head;
//   `deep_dealias` returns a type with no `Aliased` node anywhere.
// Failure modes: expansion exceeding `MAX_ALIAS_DEPTH` yields
//   `AliasCycleError` naming the alias still unexpanded at the bound.
// Side effects: none.

use crate::builtins::Name;
use crate::types::{CanonicalType, RecordField};

/// Upper bound on nested alias heads expanded per node. Source programs sit
/// far below this; hitting it means the upstream alias table is cyclic.
pub const MAX_ALIAS_DEPTH: usize = 64;

/// Expansion exceeded `MAX_ALIAS_DEPTH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasCycleError {
    /// The alias head still unexpanded when the bound was hit.
    pub alias: Name,
}

// ── Substitution ────────────────────────────────────────────────────────────

/// Substitute alias parameters into the alias body (one expansion step).
pub fn dealias(args: &[(String, CanonicalType)], body: &CanonicalType) -> CanonicalType {
    match body {
        CanonicalType::Named(name) => CanonicalType::Named(name.clone()),
        CanonicalType::Applied(name, params) => CanonicalType::Applied(
            name.clone(),
            params.iter().map(|t| dealias(args, t)).collect(),
        ),
        CanonicalType::Var(var) => args
            .iter()
            .find(|(name, _)| name == var)
            .map(|(_, ty)| ty.clone())
            .unwrap_or_else(|| CanonicalType::Var(var.clone())),
        CanonicalType::Fn(arg, result) => {
            CanonicalType::fun(dealias(args, arg), dealias(args, result))
        }
        // Extension variables name whole rows; inference merges rows before
        // this core runs, so only field types are substituted here.
        CanonicalType::Record(fields, ext) => CanonicalType::Record(
            fields
                .iter()
                .map(|field| RecordField {
                    name: field.name.clone(),
                    ty: dealias(args, &field.ty),
                })
                .collect(),
            ext.clone(),
        ),
        CanonicalType::Aliased(name, inner_args, inner_body) => CanonicalType::Aliased(
            name.clone(),
            inner_args
                .iter()
                .map(|(param, ty)| (param.clone(), dealias(args, ty)))
                .collect(),
            Box::new(dealias(args, inner_body)),
        ),
    }
}

// ── Head expansion ──────────────────────────────────────────────────────────

/// Expand top-level aliases until a non-alias head is reached.
pub fn expand_head(ty: &CanonicalType) -> Result<CanonicalType, AliasCycleError> {
    let mut current = ty.clone();
    let mut depth = 0;
    while let CanonicalType::Aliased(name, args, body) = &current {
        if depth >= MAX_ALIAS_DEPTH {
            return Err(AliasCycleError {
                alias: name.clone(),
            });
        }
        current = dealias(args, body);
        depth += 1;
    }
    Ok(current)
}

// ── Full normalization ──────────────────────────────────────────────────────

/// Resolve every alias in the type, producing its normal form.
pub fn deep_dealias(ty: &CanonicalType) -> Result<CanonicalType, AliasCycleError> {
    deep(ty, 0)
}

fn deep(ty: &CanonicalType, depth: usize) -> Result<CanonicalType, AliasCycleError> {
    Ok(match ty {
        CanonicalType::Named(name) => CanonicalType::Named(name.clone()),
        CanonicalType::Applied(name, args) => CanonicalType::Applied(
            name.clone(),
            args.iter()
                .map(|t| deep(t, depth))
                .collect::<Result<_, _>>()?,
        ),
        CanonicalType::Var(var) => CanonicalType::Var(var.clone()),
        CanonicalType::Fn(arg, result) => {
            CanonicalType::fun(deep(arg, depth)?, deep(result, depth)?)
        }
        CanonicalType::Record(fields, ext) => CanonicalType::Record(
            fields
                .iter()
                .map(|field| {
                    Ok(RecordField {
                        name: field.name.clone(),
                        ty: deep(&field.ty, depth)?,
                    })
                })
                .collect::<Result<_, _>>()?,
            ext.clone(),
        ),
        CanonicalType::Aliased(name, args, body) => {
            if depth >= MAX_ALIAS_DEPTH {
                return Err(AliasCycleError {
                    alias: name.clone(),
                });
            }
            let expanded = dealias(args, body);
            return deep(&expanded, depth + 1);
        }
    })
}

// ── Tests ───────────────────────────────────────────────────────────────────
