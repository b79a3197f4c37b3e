//! One trace line per interpreter step, indented to show call structure.

use snapshot::{Evaluation, Frame, Instruction};

use crate::{line_art::LineArt, stringify::Stringifier, theme::Theme};

/// Shown when a step is traced before anything has executed, which the
/// interpreter shouldn't do but the tracer must survive.
const NO_INSTRUCTION: &str = "<none>";

/// The indentation prefix for the evaluation's current instruction.
///
/// The base depth is one guide per frame beyond the root. An `Interrupt`
/// draws a branch instead: guides down to the frame that will catch it, a
/// corner, then rules reaching back toward the interrupted depth, so a linear
/// trace shows where the unwind lands. An interrupt nothing catches keeps the
/// corner at the root, and all repeat counts saturate at zero.
pub fn indentation(evaluation: &Evaluation, art: LineArt) -> String {
    let base = evaluation.depth().saturating_sub(1);

    let current = evaluation.top().and_then(Frame::current_instruction);

    match current {
        Some(Instruction::Interrupt { interruption, .. }) => {
            let return_depth = evaluation
                .frames_top_down()
                .position(|frame| frame.resumes(*interruption))
                .unwrap_or(base);

            let mut prefix = String::new();
            for _ in 0..base.saturating_sub(return_depth) {
                prefix.push(art.vertical);
            }
            prefix.push(art.corner);
            for _ in 0..return_depth.saturating_sub(1) {
                prefix.push(art.horizontal);
            }
            prefix
        }

        _ => std::iter::repeat(art.vertical).take(base).collect(),
    }
}

/// Render one step line: the zero-padded step number, the indentation
/// prefix, the current instruction, and the current frame's operand stack.
pub fn step_line(
    evaluation: &Evaluation,
    step: u32,
    theme: Theme,
    art: LineArt,
) -> String {
    let stringifier = Stringifier::new(evaluation, theme);

    let instruction = evaluation
        .top()
        .and_then(Frame::current_instruction)
        .map(|instruction| stringifier.instruction(instruction))
        .unwrap_or_else(|| NO_INSTRUCTION.into());

    let stack = evaluation
        .top()
        .map(|frame| stringifier.operand_stack(frame))
        .unwrap_or_default();

    let mut indent = indentation(evaluation, art);
    if !indent.is_empty() {
        indent.push(' ');
    }

    format!(
        "{} {}{} [{}]",
        theme.dim(&format!("{:04}", step)),
        indent,
        instruction,
        stack
    )
}

#[cfg(test)]
mod tests {
    use snapshot::{Frame, Instruction, Interruption, ObjectId};

    use super::*;

    fn frame_with_retired(instruction: Instruction) -> Frame {
        let mut frame = Frame::new(vec![instruction]);
        frame.advance();
        frame
    }

    fn plain_frame() -> Frame {
        frame_with_retired(Instruction::Pop)
    }

    fn interrupt_frame(interruption: Interruption) -> Frame {
        frame_with_retired(Instruction::Interrupt {
            interruption,
            id: ObjectId::new("x"),
        })
    }

    fn resuming_frame(interruption: Interruption) -> Frame {
        let mut frame = Frame::new(vec![Instruction::Pop]);
        frame.resume_on(interruption);
        frame
    }

    #[test]
    fn flat_nesting_draws_one_guide_per_frame_beyond_the_root() {
        let mut evaluation = Evaluation::new();
        evaluation.push_frame(Frame::new(vec![]));
        evaluation.push_frame(Frame::new(vec![]));
        evaluation.push_frame(plain_frame());

        assert_eq!(indentation(&evaluation, LineArt::ASCII), "||");
    }

    #[test]
    fn root_frame_has_no_indentation() {
        let mut evaluation = Evaluation::new();
        evaluation.push_frame(plain_frame());

        assert_eq!(indentation(&evaluation, LineArt::ASCII), "");
    }

    #[test]
    fn interrupt_branches_to_the_catching_frame() {
        // Base depth 4; the catching frame is 2 below the top, so the branch
        // is two guides, a corner, and one rule.
        let mut evaluation = Evaluation::new();
        evaluation.push_frame(Frame::new(vec![]));
        evaluation.push_frame(Frame::new(vec![]));
        evaluation.push_frame(resuming_frame(Interruption::Break));
        evaluation.push_frame(Frame::new(vec![]));
        evaluation.push_frame(interrupt_frame(Interruption::Break));

        assert_eq!(indentation(&evaluation, LineArt::ASCII), "||+-");
    }

    #[test]
    fn interrupt_caught_by_the_top_frame_keeps_full_depth() {
        let mut evaluation = Evaluation::new();
        evaluation.push_frame(Frame::new(vec![]));

        let mut top = interrupt_frame(Interruption::Return);
        top.resume_on(Interruption::Return);
        evaluation.push_frame(top);

        // Return depth 0: the rule count saturates instead of going negative.
        assert_eq!(indentation(&evaluation, LineArt::ASCII), "|+");
    }

    #[test]
    fn unmatched_interrupt_degrades_to_base_depth() {
        let mut evaluation = Evaluation::new();
        evaluation.push_frame(Frame::new(vec![]));
        evaluation.push_frame(Frame::new(vec![]));
        evaluation.push_frame(interrupt_frame(Interruption::Exception));

        assert_eq!(indentation(&evaluation, LineArt::ASCII), "+-");
    }

    #[test]
    fn step_lines_carry_counter_instruction_and_stack() {
        let mut evaluation = Evaluation::new();
        let mut frame = frame_with_retired(Instruction::Send {
            message: "greet".into(),
            arity: 1,
            lookup_start: None,
        });
        frame.push_operand("point".into());
        evaluation.push_frame(frame);

        let line = step_line(&evaluation, 0, Theme::PLAIN, LineArt::ASCII);
        assert_eq!(line, "0000 Send(greet, 1, -) [point]");

        let line = step_line(&evaluation, 7, Theme::PLAIN, LineArt::ASCII);
        assert_eq!(line, "0007 Send(greet, 1, -) [point]");
    }

    #[test]
    fn nested_step_lines_put_the_guide_before_the_instruction() {
        let mut evaluation = Evaluation::new();
        evaluation.push_frame(Frame::new(vec![]));
        evaluation.push_frame(plain_frame());

        let line = step_line(&evaluation, 12, Theme::PLAIN, LineArt::ASCII);
        assert_eq!(line, "0012 | Pop() []");
    }
}
