//! A scripted evaluation the console can show off on.
//!
//! This plays the interpreter's role: it owns an [`Evaluation`], moves it
//! forward one instruction at a time, and calls into the console after each
//! step the way a real dispatch loop would. The script is a greeter that
//! iterates a collection with a block and unwinds out of it twice, once with
//! a `Break` and once with a non-local `Return`.

use console::Console;
use snapshot::{
    Evaluation, Frame, InnerValue, Instance, Instruction, Interruption,
    ObjectId,
};

// Minted ids: a 24-character allocator prefix, then the short tail a human
// actually reads.
const ANSWER: &str = "obj-1c9e04b7255fa3d864021a";
const GREETING: &str = "obj-5d2f04b7255fa3d86402b3";
const PAIR: &str = "obj-77aa04b7255fa3d86402ff";
const TODAY: &str = "obj-30b604b7255fa3d86402c4";
const BLOCK: &str = "obj-9d4e04b7255fa3d864025b";

pub fn run(console: &mut Console, dump: bool) {
    console.separator(Some("loupe demo"));
    console.start("evaluation");

    let mut evaluation = seed();

    evaluation.push_frame(main_frame());

    // PushLiteral(answer), StoreLocal(answer)
    step(&mut evaluation, console);
    push(&mut evaluation, ANSWER);
    step(&mut evaluation, console);
    pop(&mut evaluation);
    local(&mut evaluation, "answer", ANSWER);

    // Resume(Return), PushLiteral(greeting)
    step(&mut evaluation, console);
    resume(&mut evaluation, Interruption::Return);
    step(&mut evaluation, console);
    push(&mut evaluation, GREETING);

    // Send(greet) pushes the method's frame.
    step(&mut evaluation, console);
    evaluation.push_frame(greet_frame());
    local(&mut evaluation, "who", GREETING);

    // PushBlock, StoreLocal(anonymous block), Resume(Break)
    step(&mut evaluation, console);
    push(&mut evaluation, BLOCK);
    step(&mut evaluation, console);
    pop(&mut evaluation);
    local(&mut evaluation, format!("demo.Block#{}", BLOCK), BLOCK);
    step(&mut evaluation, console);
    resume(&mut evaluation, Interruption::Break);

    // Send(each) runs the block in its own frame.
    step(&mut evaluation, console);
    evaluation.push_frame(block_frame());

    if dump {
        console.dump(&evaluation);
    }

    // The block breaks out: caught one frame down, in greet.
    step(&mut evaluation, console);
    push(&mut evaluation, PAIR);
    step(&mut evaluation, console);
    evaluation.pop_frame();

    // Back in greet: Pop, then return non-locally to main with a date.
    step(&mut evaluation, console);
    step(&mut evaluation, console);
    push(&mut evaluation, TODAY);
    step(&mut evaluation, console);
    evaluation.pop_frame();
    push(&mut evaluation, TODAY);

    // Main unwinds its stack and halts.
    step(&mut evaluation, console);
    pop(&mut evaluation);
    step(&mut evaluation, console);

    console.done("evaluation");
    console.success("evaluation finished");
}

/// The instances the script touches, as the heap would hold them.
fn seed() -> Evaluation {
    let mut evaluation = Evaluation::new();

    evaluation.define(
        ANSWER.into(),
        Instance::with_value("demo.Integer", InnerValue::Number(42.0)),
    );
    evaluation.define(
        GREETING.into(),
        Instance::with_value("demo.String", InnerValue::Text("hello".into())),
    );
    evaluation.define(
        PAIR.into(),
        Instance::with_value(
            "demo.List",
            InnerValue::Ids(vec![GREETING.into(), "left".into()]),
        ),
    );
    evaluation.define(
        TODAY.into(),
        Instance::with_value(
            "demo.Date",
            InnerValue::Date(demo_date()),
        ),
    );
    evaluation.define(BLOCK.into(), Instance::new("demo.Block"));

    evaluation
}

fn demo_date() -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(1984, 9, 17).unwrap_or_default()
}

fn main_frame() -> Frame {
    Frame::new(vec![
        Instruction::PushLiteral { id: ANSWER.into() },
        Instruction::StoreLocal { name: "answer".into() },
        Instruction::Resume {
            interruption: Interruption::Return,
            handler: vec![],
        },
        Instruction::PushLiteral { id: GREETING.into() },
        Instruction::Send {
            message: "greet".into(),
            arity: 1,
            lookup_start: None,
        },
        Instruction::Pop,
        Instruction::Halt,
    ])
}

fn greet_frame() -> Frame {
    Frame::new(vec![
        Instruction::PushBlock {
            body: vec![
                Instruction::PushLiteral { id: PAIR.into() },
                Instruction::Interrupt {
                    interruption: Interruption::Break,
                    id: PAIR.into(),
                },
            ],
        },
        Instruction::StoreLocal {
            name: format!("demo.Block#{}", BLOCK),
        },
        Instruction::Resume {
            interruption: Interruption::Break,
            handler: vec![Instruction::Pop],
        },
        Instruction::Send {
            message: "each".into(),
            arity: 1,
            lookup_start: Some("demo.Collection".into()),
        },
        Instruction::Pop,
        Instruction::PushLiteral { id: TODAY.into() },
        Instruction::Interrupt {
            interruption: Interruption::Return,
            id: TODAY.into(),
        },
    ])
}

fn block_frame() -> Frame {
    Frame::new(vec![
        Instruction::PushLiteral { id: PAIR.into() },
        Instruction::Interrupt {
            interruption: Interruption::Break,
            id: PAIR.into(),
        },
    ])
}

/// Retire the top frame's next instruction and trace it.
fn step(evaluation: &mut Evaluation, console: &mut Console) {
    if let Some(frame) = evaluation.top_mut() {
        frame.advance();
    }
    console.step(evaluation);
}

fn push(evaluation: &mut Evaluation, id: &str) {
    if let Some(frame) = evaluation.top_mut() {
        frame.push_operand(id.into());
    }
}

fn pop(evaluation: &mut Evaluation) {
    if let Some(frame) = evaluation.top_mut() {
        frame.pop_operand();
    }
}

fn local(
    evaluation: &mut Evaluation,
    name: impl Into<String>,
    id: &str,
) {
    if let Some(frame) = evaluation.top_mut() {
        frame.set_local(name, ObjectId::from(id));
    }
}

fn resume(evaluation: &mut Evaluation, interruption: Interruption) {
    if let Some(frame) = evaluation.top_mut() {
        frame.resume_on(interruption);
    }
}
