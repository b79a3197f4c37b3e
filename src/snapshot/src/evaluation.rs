//! The frame stack and the per-call frames on it.

use std::collections::{BTreeMap, HashMap};

use crate::{
    instance::{Instance, ObjectId},
    instruction::{Instruction, Interruption},
};

/// One call's execution context: its code, a cursor into it, an operand
/// stack, local bindings, and the set of interruptions it catches on unwind.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    instructions: Vec<Instruction>,

    /// Index of the next instruction to execute. The interpreter advances
    /// this before handing the frame to the tracer, so the instruction being
    /// reported is the one at `next_instruction - 1`.
    next_instruction: usize,

    /// Operand stack, top is the last element.
    operand_stack: Vec<ObjectId>,

    /// Local bindings. Ordered so rendering them is deterministic.
    locals: BTreeMap<String, ObjectId>,

    /// The interruption kinds this frame is registered to catch, in
    /// registration order.
    resume_set: Vec<Interruption>,
}

impl Frame {
    pub fn new(instructions: Vec<Instruction>) -> Frame {
        Frame {
            instructions,
            next_instruction: 0,
            operand_stack: Vec::new(),
            locals: BTreeMap::new(),
            resume_set: Vec::new(),
        }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn next_instruction(&self) -> usize {
        self.next_instruction
    }

    /// The just-retired instruction, the one a trace line reports. `None`
    /// only before anything in this frame has executed.
    pub fn current_instruction(&self) -> Option<&Instruction> {
        self.instructions.get(self.next_instruction.checked_sub(1)?)
    }

    pub fn operand_stack(&self) -> &[ObjectId] {
        &self.operand_stack
    }

    pub fn locals(&self) -> &BTreeMap<String, ObjectId> {
        &self.locals
    }

    pub fn resume_set(&self) -> &[Interruption] {
        &self.resume_set
    }

    /// Is this frame registered to catch `interruption` on unwind?
    pub fn resumes(&self, interruption: Interruption) -> bool {
        self.resume_set.contains(&interruption)
    }
}

// Mutators for whoever is driving the evaluation forward. The tracer never
// calls these.
impl Frame {
    /// Move the cursor past the instruction that just executed.
    pub fn advance(&mut self) {
        self.next_instruction += 1;
    }

    pub fn push_operand(&mut self, id: ObjectId) {
        self.operand_stack.push(id);
    }

    pub fn pop_operand(&mut self) -> Option<ObjectId> {
        self.operand_stack.pop()
    }

    pub fn set_local(&mut self, name: impl Into<String>, id: ObjectId) {
        self.locals.insert(name.into(), id);
    }

    /// Register this frame to catch `interruption` on unwind.
    pub fn resume_on(&mut self, interruption: Interruption) {
        if !self.resume_set.contains(&interruption) {
            self.resume_set.push(interruption);
        }
    }
}

/// A snapshot of the whole evaluation: the frame stack plus a view of the
/// instance heap.
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    /// The frame stack, most recently pushed frame last.
    frames: Vec<Frame>,

    /// Heap view, id to instance.
    instances: HashMap<ObjectId, Instance>,
}

impl Evaluation {
    pub fn new() -> Evaluation {
        Evaluation::default()
    }

    /// The frame stack, bottom first.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frames from the most recently pushed down to the root.
    pub fn frames_top_down(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter().rev()
    }

    /// The currently executing frame.
    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Frame> {
        self.frames.last_mut()
    }

    /// How many frames deep the evaluation is.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn instance(&self, id: &ObjectId) -> Option<&Instance> {
        self.instances.get(id)
    }

    /// Record an instance under `id` in the heap view.
    pub fn define(&mut self, id: ObjectId, instance: Instance) {
        self.instances.insert(id, instance);
    }

    pub fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn pop_frame(&mut self) -> Option<Frame> {
        self.frames.pop()
    }
}
