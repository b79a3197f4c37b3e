//! Trace a small scripted evaluation end to end and check the lines that
//! come out.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use termcolor::NoColor;

use console::{Console, Level};
use snapshot::{
    Evaluation, Frame, InnerValue, Instance, Instruction, Interruption,
};

/// A sink tests can keep a handle on after boxing it up.
#[derive(Clone, Default)]
struct SharedSink(Rc<RefCell<Vec<u8>>>);

impl SharedSink {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl io::Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn debug_console() -> (Console, SharedSink) {
    let sink = SharedSink::default();
    let mut console =
        Console::with_sink(Box::new(NoColor::new(sink.clone())), 20);
    console.enable(Level::Debug);
    (console, sink)
}

const GREETING: &str = "obj-5d2f04b7255fa3d86402b3";

/// Step the top frame's cursor past one instruction and trace it.
fn step(evaluation: &mut Evaluation, console: &mut Console) {
    if let Some(frame) = evaluation.top_mut() {
        frame.advance();
    }
    console.step(evaluation);
}

#[test]
fn a_send_and_an_unwinding_interrupt_trace_with_matching_indentation() {
    let (mut console, sink) = debug_console();

    let mut evaluation = Evaluation::new();
    evaluation.define(
        GREETING.into(),
        Instance::with_value("demo.String", InnerValue::Text("hi".into())),
    );

    // Root frame: register for Return, then send.
    let mut root = Frame::new(vec![
        Instruction::Resume {
            interruption: Interruption::Return,
            handler: vec![],
        },
        Instruction::Send {
            message: "greet".into(),
            arity: 0,
            lookup_start: None,
        },
    ]);
    root.resume_on(Interruption::Return);
    evaluation.push_frame(root);

    step(&mut evaluation, &mut console); // Resume
    step(&mut evaluation, &mut console); // Send

    // The send pushes the method's frame, which returns non-locally.
    evaluation.push_frame(Frame::new(vec![
        Instruction::PushLiteral { id: GREETING.into() },
        Instruction::Interrupt {
            interruption: Interruption::Return,
            id: GREETING.into(),
        },
    ]));

    step(&mut evaluation, &mut console); // PushLiteral
    if let Some(frame) = evaluation.top_mut() {
        frame.push_operand(GREETING.into());
    }
    step(&mut evaluation, &mut console); // Interrupt

    assert_eq!(
        sink.contents(),
        "0000 Resume(Return, ...) []\n\
         0001 Send(greet, 0, -) []\n\
         0002 | PushLiteral(String#b3(hi)) []\n\
         0003 + Interrupt(Return, String#b3(hi)) [String#b3(hi)]\n"
    );
}

#[test]
fn reset_step_restarts_the_counter_at_zero() {
    let (mut console, sink) = debug_console();

    let mut evaluation = Evaluation::new();
    evaluation.push_frame(Frame::new(vec![Instruction::Halt]));

    step(&mut evaluation, &mut console);
    console.reset_step();

    let mut evaluation = Evaluation::new();
    evaluation.push_frame(Frame::new(vec![Instruction::Halt]));
    step(&mut evaluation, &mut console);

    assert_eq!(
        sink.contents(),
        "0000 Halt() []\n0000 Halt() []\n"
    );
}

#[test]
fn enabling_at_warn_silences_tracing_but_not_warnings() {
    let sink = SharedSink::default();
    let mut console =
        Console::with_sink(Box::new(NoColor::new(sink.clone())), 20);
    console.enable(Level::Warn);

    let mut evaluation = Evaluation::new();
    evaluation.push_frame(Frame::new(vec![Instruction::Halt]));
    step(&mut evaluation, &mut console);

    console.info("quiet");
    console.warn("loud");
    console.error("louder");

    assert_eq!(sink.contents(), "warn: loud\nerror: louder\n");
}

#[test]
fn dumps_show_every_frame_between_rules() {
    let (mut console, sink) = debug_console();

    let mut evaluation = Evaluation::new();
    evaluation.define(
        GREETING.into(),
        Instance::with_value("demo.String", InnerValue::Text("hi".into())),
    );

    let mut root = Frame::new(vec![Instruction::Send {
        message: "greet".into(),
        arity: 0,
        lookup_start: None,
    }]);
    root.advance();
    root.set_local("greeting", GREETING.into());
    evaluation.push_frame(root);

    console.dump(&evaluation);

    assert_eq!(
        sink.contents(),
        "--------------------\n\
         Instructions: Send(greet, 0, -)\n\
         Operand Stack: \n\
         Locals: greeting: String#b3(hi)\n\
         Resume: \n\
         --------------------\n"
    );
}
