//! The interpreter state as the tracer sees it.
//!
//! The interpreter owns these values and hands the tracer a read-only view per
//! step. Nothing in here renders anything; the mutating methods exist for the
//! interpreter (or a test) driving an [`Evaluation`] forward.

mod evaluation;
mod instance;
mod instruction;

pub use self::{
    evaluation::{Evaluation, Frame},
    instance::{InnerValue, Instance, ObjectId},
    instruction::{Instruction, Interruption},
};
