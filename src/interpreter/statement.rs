/// Statement dispatch, assignments and expression statements.
pub mod core;

/// `if` / `elif` / `else` and block skipping.
pub mod branch;

/// `for`, `repeat`, `end`, `break` and `continue`.
pub mod loops;

/// What the run loop does after a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Keep going.
    Next,
    /// The script reached its end or an `exit`.
    Finished,
}
