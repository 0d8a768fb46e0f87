use crate::{error::ErrorInfo, interpreter::value::Value};

/// Notifications sent to subscribed listeners while a script runs.
///
/// Events borrow from the interpreter, so listeners that need to keep data
/// must clone it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    /// An expression statement produced a value.
    Output(&'a Value),
    /// A variable is about to receive a value.
    Assigning {
        /// The variable name.
        name:  &'a str,
        /// The value being stored.
        value: &'a Value,
    },
    /// The run stopped with an error.
    ErrorOccurred(&'a ErrorInfo),
    /// A module function is about to be called.
    FunctionInvoking(&'a str),
}

/// A subscribed event listener.
pub type Listener = Box<dyn FnMut(&Event<'_>)>;

impl Event<'_> {
    /// The output value, if this is an `Output` event.
    #[must_use]
    pub const fn output(&self) -> Option<&Value> {
        match self {
            Event::Output(value) => Some(*value),
            _ => None,
        }
    }

    /// The error, if this is an `ErrorOccurred` event.
    #[must_use]
    pub const fn error(&self) -> Option<&ErrorInfo> {
        match self {
            Event::ErrorOccurred(info) => Some(*info),
            _ => None,
        }
    }
}
