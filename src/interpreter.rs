/// The interpreter and its evaluators.
///
/// Holds the `Interpreter` type and the expression side of execution: a
/// precedence-climbing evaluator that reads tokens straight from the lexer,
/// the default operator semantics, and identifier and function resolution.
pub mod evaluator;
/// Events delivered to host listeners.
///
/// Hosts observe outputs, assignments, function calls and failures through
/// [`event::Event`] callbacks registered with `Interpreter::subscribe`.
pub mod event;
/// Operator overrides installed by the host.
pub mod hook;
/// The lexer turns source text into located tokens.
///
/// A `logos`-derived scanner recognises numbers, strings, identifiers,
/// keywords and operators. The wrapper around it tracks line and column
/// positions, keeps one token of lookahead and can be repositioned to any
/// earlier token, which is how loops jump back to their header.
///
/// # Responsibilities
/// - Converts the character stream into tokens with type and source location.
/// - Parses decimal, hexadecimal, octal and binary number literals.
/// - Reports malformed numbers and unterminated strings.
pub mod lexer;
/// Function and constant libraries.
///
/// A module is a named set of native functions and constants. The `math` and
/// `text` modules ship with the crate; hosts can register their own.
pub mod module;
/// Binary and unary operators and their precedence levels.
pub mod operator;
/// Statement execution.
///
/// Executes assignments, expression statements and the control-flow
/// keywords. Open `if`, `for` and `repeat` blocks live on the clause stack;
/// skipped blocks are scanned past without being evaluated.
pub mod statement;
/// Counters collected while scripts run.
pub mod stats;
/// Runtime values.
///
/// A value is an arbitrary-precision decimal number or a string, with an
/// optional tag that hosts can use to attach their own meaning.
pub mod value;
