//! Rendering of interpreter state into trace text.
//!
//! Everything here is a pure function of a [`snapshot::Evaluation`]: strings
//! in, strings out, no side effects and no mutable state. The mutable parts
//! of tracing (the step counter, timers, the sink) live in the `console`
//! crate, which calls into here.

mod line_art;
mod render;
mod step;
mod stringify;
mod theme;

pub use self::{
    line_art::LineArt,
    render::render_evaluation,
    step::{indentation, step_line},
    stringify::Stringifier,
    theme::Theme,
};
