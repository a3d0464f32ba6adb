// wire.rs — Wire type checker for port declarations.
//
// Decides whether a declared port type can be represented across the
// host-runtime boundary. At most one signal wrapper (Signal.Stream or
// Signal.Varying) is stripped, at the outermost position only; the
// remainder is validated depth-first, left to right, under
// direction-sensitive rules. The first violation wins — no aggregation
// within a declaration.
//
// Preconditions: `ty` is canonical; the alias graph behind it is finite.
// Postconditions: `Ok(())` iff every visited node passed its rule.
// Failure modes: returns `WireTypeError` carrying the root type, the
//   offending subtype, and a fixed reason code.
// Side effects: none.

use crate::alias;
use crate::builtins;
use crate::decl::{Direction, Span};
use crate::diag::{codes, DiagCode, DiagLevel, Diagnostic};
use crate::report;
use crate::types::{CanonicalType, SignalKind};

// ── Public contract ─────────────────────────────────────────────────────────

/// Check the type of an inbound port (host runtime → managed code).
pub fn check_input(name: &str, ty: &CanonicalType) -> Result<(), WireTypeError> {
    check(Direction::In, name, ty)
}

/// Check the type of an outbound port (managed code → host runtime).
pub fn check_output(name: &str, ty: &CanonicalType) -> Result<(), WireTypeError> {
    check(Direction::Out, name, ty)
}

// ── Error type ──────────────────────────────────────────────────────────────

/// A definite boundary type error, carrying enough context to render the
/// full diagnostic without re-deriving it.
#[derive(Debug, Clone, PartialEq)]
pub struct WireTypeError {
    pub name: String,
    pub direction: Direction,
    pub root: CanonicalType,
    pub offending: CanonicalType,
    pub reason: WireReason,
}

/// Fixed reason codes for wire type failures. Closed: a new variant must
/// pick up a diagnostic code and a reason phrase below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireReason {
    UnsupportedType,
    FreeTypeVariable,
    ContainsFunctions,
    HigherOrderFunction,
    SignalContainsFunction(SignalKind),
    ExtendedRecord,
    AliasCycle,
}

impl WireReason {
    /// Reason phrase used in the rendered document.
    pub fn describe(self) -> String {
        match self {
            WireReason::UnsupportedType => "unsupported type".to_string(),
            WireReason::FreeTypeVariable => "free type variable".to_string(),
            WireReason::ContainsFunctions => "contains functions".to_string(),
            WireReason::HigherOrderFunction => "higher-order functions".to_string(),
            WireReason::SignalContainsFunction(kind) => {
                format!("{} that contains a function", kind.describe())
            }
            WireReason::ExtendedRecord => "extended records with free type variables".to_string(),
            WireReason::AliasCycle => "alias cycle".to_string(),
        }
    }

    fn code(self) -> DiagCode {
        match self {
            WireReason::UnsupportedType => codes::UNSUPPORTED_TYPE,
            WireReason::FreeTypeVariable => codes::FREE_TYPE_VARIABLE,
            WireReason::ContainsFunctions => codes::CONTAINS_FUNCTIONS,
            WireReason::HigherOrderFunction => codes::HIGHER_ORDER_FUNCTION,
            WireReason::SignalContainsFunction(_) => codes::SIGNAL_CONTAINS_FUNCTION,
            WireReason::ExtendedRecord => codes::EXTENDED_RECORD,
            WireReason::AliasCycle => codes::ALIAS_CYCLE,
        }
    }
}

impl WireTypeError {
    /// Render the uniform multi-section diagnostic at the port's span.
    pub fn to_diagnostic(&self, span: Span) -> Diagnostic {
        let category = format!("{} port", self.direction.label());
        let (message, notes) = report::document(
            &category,
            &self.name,
            &self.root,
            Some(&self.offending),
            &[format!("reason: {}", self.reason.describe())],
            &accepted(self.direction),
        );
        Diagnostic::new(DiagLevel::Error, span, message)
            .with_code(self.reason.code())
            .with_notes(notes)
    }
}

/// Accepted-shape catalogue. Output wording additionally mentions
/// first-order functions and promises.
fn accepted(direction: Direction) -> Vec<String> {
    let mut shapes = vec![
        "Bool, Int, Float, Text, and ()".to_string(),
        "Json.Value".to_string(),
        "Maybe, List, Array, and tuples of accepted types".to_string(),
        "records whose fields all carry accepted types".to_string(),
        "a single outermost Signal.Stream or Signal.Varying wrapper".to_string(),
    ];
    if direction == Direction::Out {
        shapes.push("first-order functions over accepted types".to_string());
        shapes.push("promises created by loopback declarations".to_string());
    }
    shapes
}

// ── Checker ─────────────────────────────────────────────────────────────────

fn check(direction: Direction, name: &str, ty: &CanonicalType) -> Result<(), WireTypeError> {
    let checker = Checker {
        name,
        direction,
        root: ty,
    };
    let head = checker.expand(ty)?;
    match &head {
        CanonicalType::Applied(ctor, args) if args.len() == 1 && builtins::is_stream(ctor) => {
            checker.validate(&args[0], false, Some(SignalKind::Stream))
        }
        CanonicalType::Applied(ctor, args) if args.len() == 1 && builtins::is_varying(ctor) => {
            checker.validate(&args[0], false, Some(SignalKind::Varying))
        }
        _ => checker.validate(&head, false, None),
    }
}

/// Transient traversal state: the declaration being checked and its root
/// type, kept only for error context.
struct Checker<'a> {
    name: &'a str,
    direction: Direction,
    root: &'a CanonicalType,
}

impl Checker<'_> {
    fn expand(&self, ty: &CanonicalType) -> Result<CanonicalType, WireTypeError> {
        alias::expand_head(ty).map_err(|_| self.fail(ty, WireReason::AliasCycle))
    }

    fn fail(&self, offending: &CanonicalType, reason: WireReason) -> WireTypeError {
        WireTypeError {
            name: self.name.to_string(),
            direction: self.direction,
            root: self.root.clone(),
            offending: offending.clone(),
            reason,
        }
    }

    /// Depth-first, left-to-right validation, short-circuiting on the first
    /// failure. `seen_func` is set once a function has been entered;
    /// `signal` is set iff the outermost wrapper was a signal.
    fn validate(
        &self,
        ty: &CanonicalType,
        seen_func: bool,
        signal: Option<SignalKind>,
    ) -> Result<(), WireTypeError> {
        match ty {
            CanonicalType::Aliased(..) => {
                let head = self.expand(ty)?;
                self.validate(&head, seen_func, signal)
            }
            CanonicalType::Named(ctor) => {
                if builtins::is_primitive(ctor)
                    || builtins::is_json_value(ctor)
                    || builtins::is_unit(ctor)
                {
                    Ok(())
                } else {
                    Err(self.fail(ty, WireReason::UnsupportedType))
                }
            }
            CanonicalType::Applied(ctor, args) => {
                if args.is_empty() {
                    return self.validate(&CanonicalType::Named(ctor.clone()), seen_func, signal);
                }
                if args.len() == 1
                    && (builtins::is_maybe(ctor)
                        || builtins::is_array(ctor)
                        || builtins::is_list(ctor))
                {
                    return self.validate(&args[0], seen_func, signal);
                }
                if builtins::is_tuple(ctor) {
                    for arg in args {
                        self.validate(arg, seen_func, signal)?;
                    }
                    return Ok(());
                }
                // Nested signals, Result, and unrecognized containers all
                // land here.
                Err(self.fail(ty, WireReason::UnsupportedType))
            }
            CanonicalType::Var(_) => Err(self.fail(ty, WireReason::FreeTypeVariable)),
            CanonicalType::Fn(_, _) => match self.direction {
                Direction::In => Err(self.fail(ty, WireReason::ContainsFunctions)),
                Direction::Out => {
                    if seen_func {
                        return Err(self.fail(ty, WireReason::HigherOrderFunction));
                    }
                    if let Some(kind) = signal {
                        return Err(self.fail(ty, WireReason::SignalContainsFunction(kind)));
                    }
                    for part in flatten_arrow(ty) {
                        self.validate(part, true, signal)?;
                    }
                    Ok(())
                }
            },
            CanonicalType::Record(_, Some(_)) => Err(self.fail(ty, WireReason::ExtendedRecord)),
            CanonicalType::Record(fields, None) => {
                for field in fields {
                    self.validate(&field.ty, seen_func, signal)?;
                }
                Ok(())
            }
        }
    }
}

/// Flatten a curried arrow into its argument types plus final result.
fn flatten_arrow(ty: &CanonicalType) -> Vec<&CanonicalType> {
    let mut parts = Vec::new();
    let mut current = ty;
    while let CanonicalType::Fn(arg, result) = current {
        parts.push(arg.as_ref());
        current = result;
    }
    parts.push(current);
    parts
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::{self, Name, MOD_BASICS, MOD_JSON, MOD_LIST, MOD_MAYBE, MOD_SIGNAL};

    fn int() -> CanonicalType {
        CanonicalType::Named(Name::new(MOD_BASICS, "Int"))
    }

    fn text() -> CanonicalType {
        CanonicalType::Named(Name::new(MOD_BASICS, "Text"))
    }

    fn stream_of(ty: CanonicalType) -> CanonicalType {
        CanonicalType::Applied(Name::new(MOD_SIGNAL, "Stream"), vec![ty])
    }

    fn varying_of(ty: CanonicalType) -> CanonicalType {
        CanonicalType::Applied(Name::new(MOD_SIGNAL, "Varying"), vec![ty])
    }

    fn list_of(ty: CanonicalType) -> CanonicalType {
        CanonicalType::Applied(Name::new(MOD_LIST, "List"), vec![ty])
    }

    fn reason_of(result: Result<(), WireTypeError>) -> WireReason {
        result.unwrap_err().reason
    }

    #[test]
    fn primitives_pass_both_directions() {
        for ident in ["Int", "Float", "Bool", "Text"] {
            let ty = CanonicalType::Named(Name::new(MOD_BASICS, ident));
            assert_eq!(check_input("p", &ty), Ok(()));
            assert_eq!(check_output("p", &ty), Ok(()));
        }
        let unit = CanonicalType::Named(builtins::tuple(0));
        assert_eq!(check_input("p", &unit), Ok(()));
        assert_eq!(check_output("p", &unit), Ok(()));
    }

    #[test]
    fn json_value_passes() {
        let ty = CanonicalType::Named(Name::new(MOD_JSON, "Value"));
        assert_eq!(check_input("p", &ty), Ok(()));
        assert_eq!(check_output("p", &ty), Ok(()));
    }

    #[test]
    fn user_named_type_is_unsupported() {
        let ty = CanonicalType::Named(Name::new("MyApp", "Model"));
        assert_eq!(reason_of(check_input("p", &ty)), WireReason::UnsupportedType);
    }

    #[test]
    fn input_rejects_any_function() {
        let ty = CanonicalType::fun(int(), int());
        assert_eq!(reason_of(check_input("p", &ty)), WireReason::ContainsFunctions);
    }

    #[test]
    fn output_accepts_first_order_function() {
        let ty = CanonicalType::fun(int(), int());
        assert_eq!(check_output("p", &ty), Ok(()));
    }

    #[test]
    fn output_rejects_higher_order_function() {
        let ty = CanonicalType::fun(CanonicalType::fun(int(), int()), int());
        let err = check_output("p", &ty).unwrap_err();
        assert_eq!(err.reason, WireReason::HigherOrderFunction);
        // The offending subtype is the inner arrow, not the whole type.
        assert_eq!(err.offending, CanonicalType::fun(int(), int()));
    }

    #[test]
    fn output_rejects_function_returning_function() {
        // f : Int -> (Int -> Int) flattens into [Int, Int -> Int].
        let ty = CanonicalType::fun(int(), CanonicalType::fun(int(), int()));
        // A curried two-argument function is first-order: Int -> Int -> Int
        // flattens into [Int, Int, Int]. So this exact shape passes.
        assert_eq!(check_output("p", &ty), Ok(()));
        // But a function buried in a container argument does not flatten.
        let buried = CanonicalType::fun(list_of(CanonicalType::fun(int(), int())), int());
        assert_eq!(
            reason_of(check_output("p", &buried)),
            WireReason::HigherOrderFunction
        );
    }

    #[test]
    fn signal_may_not_contain_function() {
        let err = check_output("p", &stream_of(CanonicalType::fun(int(), int()))).unwrap_err();
        assert_eq!(
            err.reason,
            WireReason::SignalContainsFunction(SignalKind::Stream)
        );
        let err = check_output("p", &varying_of(CanonicalType::fun(int(), int()))).unwrap_err();
        assert_eq!(
            err.reason,
            WireReason::SignalContainsFunction(SignalKind::Varying)
        );
    }

    #[test]
    fn signal_unwrap_is_single_level() {
        let nested = stream_of(stream_of(int()));
        let err = check_input("p", &nested).unwrap_err();
        assert_eq!(err.reason, WireReason::UnsupportedType);
        assert_eq!(err.offending, stream_of(int()));
    }

    #[test]
    fn signal_over_flat_data_passes() {
        assert_eq!(check_input("p", &stream_of(int())), Ok(()));
        assert_eq!(check_output("p", &varying_of(list_of(text()))), Ok(()));
    }

    #[test]
    fn result_is_not_a_wire_type() {
        let ty = CanonicalType::Applied(Name::new("Result", "Result"), vec![text(), int()]);
        assert_eq!(reason_of(check_output("p", &ty)), WireReason::UnsupportedType);
    }

    #[test]
    fn free_type_variable_fails() {
        let ty = list_of(CanonicalType::Var("a".to_string()));
        let err = check_input("p", &ty).unwrap_err();
        assert_eq!(err.reason, WireReason::FreeTypeVariable);
        assert_eq!(err.offending, CanonicalType::Var("a".to_string()));
    }

    #[test]
    fn containers_recurse() {
        let ty = CanonicalType::Applied(
            Name::new(MOD_MAYBE, "Maybe"),
            vec![CanonicalType::Applied(
                Name::new("Array", "Array"),
                vec![text()],
            )],
        );
        assert_eq!(check_output("p", &ty), Ok(()));
    }

    #[test]
    fn tuple_reports_first_violation_left_to_right() {
        // ( Int, List (Int -> Int) ) — the second component fails first.
        let bad = list_of(CanonicalType::fun(int(), int()));
        let ty = CanonicalType::Applied(builtins::tuple(2), vec![int(), bad]);
        let err = check_input("p", &ty).unwrap_err();
        assert_eq!(err.reason, WireReason::ContainsFunctions);
        assert_eq!(err.offending, CanonicalType::fun(int(), int()));
    }

    #[test]
    fn record_fields_checked_in_declaration_order() {
        let ty = CanonicalType::record(vec![
            ("first", CanonicalType::Var("a".to_string())),
            ("second", CanonicalType::fun(int(), int())),
        ]);
        // `first` is declared before `second`, so its violation is reported.
        assert_eq!(reason_of(check_input("p", &ty)), WireReason::FreeTypeVariable);
    }

    #[test]
    fn extended_record_fails() {
        let ty = CanonicalType::Record(
            vec![crate::types::RecordField {
                name: "x".to_string(),
                ty: int(),
            }],
            Some("r".to_string()),
        );
        assert_eq!(reason_of(check_input("p", &ty)), WireReason::ExtendedRecord);
    }

    #[test]
    fn closed_record_of_flat_fields_passes() {
        let ty = CanonicalType::record(vec![("x", int()), ("y", text())]);
        assert_eq!(check_input("p", &ty), Ok(()));
        assert_eq!(check_output("p", &ty), Ok(()));
    }

    #[test]
    fn zero_argument_application_behaves_like_named() {
        let ty = CanonicalType::Applied(Name::new(MOD_BASICS, "Int"), vec![]);
        assert_eq!(check_input("p", &ty), Ok(()));
    }

    #[test]
    fn alias_is_transparent() {
        let aliased = CanonicalType::Aliased(
            Name::new("App", "Id"),
            vec![],
            Box::new(int()),
        );
        assert_eq!(check_input("p", &aliased), Ok(()));
        assert_eq!(check_output("p", &aliased), Ok(()));
    }

    #[test]
    fn alias_around_signal_still_unwraps() {
        let aliased = CanonicalType::Aliased(
            Name::new("App", "Events"),
            vec![],
            Box::new(stream_of(int())),
        );
        assert_eq!(check_input("p", &aliased), Ok(()));
    }

    #[test]
    fn alias_cycle_is_reported_not_looped() {
        let mut ty = int();
        for _ in 0..=crate::alias::MAX_ALIAS_DEPTH {
            ty = CanonicalType::Aliased(Name::new("Deep", "Deep"), vec![], Box::new(ty));
        }
        assert_eq!(reason_of(check_input("p", &ty)), WireReason::AliasCycle);
        assert_eq!(reason_of(check_output("p", &ty)), WireReason::AliasCycle);
    }

    #[test]
    fn error_carries_root_and_direction() {
        let ty = stream_of(CanonicalType::fun(int(), int()));
        let err = check_output("out", &ty).unwrap_err();
        assert_eq!(err.name, "out");
        assert_eq!(err.direction, Direction::Out);
        assert_eq!(err.root, ty);
    }

    #[test]
    fn diagnostic_mentions_direction_and_reason() {
        use chumsky::span::Span as _;
        let err = check_input("p", &CanonicalType::fun(int(), int())).unwrap_err();
        let diag = err.to_diagnostic(Span::new((), 0..4));
        let rendered = format!("{diag}");
        assert!(rendered.contains("Input port `p`"));
        assert!(rendered.contains("reason: contains functions"));
        assert!(rendered.contains("accepted types:"));
        // Input catalogue never mentions functions.
        assert!(!rendered.contains("first-order functions"));
    }

    #[test]
    fn output_catalogue_mentions_functions_and_promises() {
        use chumsky::span::Span as _;
        let err = check_output(
            "p",
            &CanonicalType::fun(CanonicalType::fun(int(), int()), int()),
        )
        .unwrap_err();
        let rendered = format!("{}", err.to_diagnostic(Span::new((), 0..4)));
        assert!(rendered.contains("first-order functions over accepted types"));
        assert!(rendered.contains("promises created by loopback declarations"));
    }
}
