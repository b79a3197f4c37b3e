//! Full-state dumps of an evaluation.

use snapshot::{Evaluation, Frame};

use crate::{line_art::LineArt, stringify::Stringifier, theme::Theme};

/// Render the whole frame stack as a multi-line block, most recently pushed
/// frame first, each frame framed by a full-width rule.
///
/// Per frame, four sections in fixed order: the instruction list with the
/// just-retired instruction emphasized, the operand stack, the locals, and
/// the resume set.
pub fn render_evaluation(
    evaluation: &Evaluation,
    theme: Theme,
    art: LineArt,
    width: usize,
) -> String {
    let stringifier = Stringifier::new(evaluation, theme);
    let rule: String = std::iter::repeat(art.horizontal).take(width).collect();

    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');

    for frame in evaluation.frames_top_down() {
        render_frame(&mut out, frame, &stringifier, theme);
        out.push_str(&rule);
        out.push('\n');
    }

    out
}

fn render_frame(
    out: &mut String,
    frame: &Frame,
    stringifier: &Stringifier,
    theme: Theme,
) {
    let instructions: Vec<String> = frame
        .instructions()
        .iter()
        .enumerate()
        .map(|(index, instruction)| {
            let text = stringifier.instruction(instruction);
            if Some(index) == frame.next_instruction().checked_sub(1) {
                theme.emphasis(&text)
            } else {
                text
            }
        })
        .collect();

    let locals: Vec<String> = frame
        .locals()
        .iter()
        .map(|(name, id)| {
            format!("{}: {}", stringifier.module(name), stringifier.id(id))
        })
        .collect();

    let resume: Vec<String> = frame
        .resume_set()
        .iter()
        .map(|interruption| interruption.to_string())
        .collect();

    section(out, theme, "Instructions", &instructions.join(", "));
    section(out, theme, "Operand Stack", &stringifier.operand_stack(frame));
    section(out, theme, "Locals", &locals.join(", "));
    section(out, theme, "Resume", &resume.join(", "));
}

fn section(out: &mut String, theme: Theme, label: &str, body: &str) {
    out.push_str(&theme.label(label));
    out.push_str(": ");
    out.push_str(body);
    out.push('\n');
}
