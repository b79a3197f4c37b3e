//! The severity-gated console the interpreter logs through.
//!
//! A [`Console`] owns the output sink and the only mutable tracing state
//! there is: the step counter, the timer table, and the active severity
//! threshold. Rendering itself lives in the `trace` crate and stays pure.

mod console;
mod level;

pub use self::{console::Console, level::Level};
