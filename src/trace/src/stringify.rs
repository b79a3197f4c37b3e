//! Deterministic stringification of ids, module names, and instructions.

use snapshot::{Evaluation, Frame, InnerValue, Instance, Instruction, ObjectId};

use crate::theme::Theme;

/// Nested code blocks are never expanded inline.
const OPAQUE_BLOCK: &str = "...";

/// Placeholder for an absent module field.
const NO_MODULE: &str = "-";

/// Placeholder for a sequence element that isn't id-shaped.
const NOT_AN_ID: &str = "?";

/// Renders ids, module names, and instructions against one evaluation
/// snapshot. Lookups that miss degrade to empty context; nothing in here can
/// fail.
pub struct Stringifier<'a> {
    evaluation: &'a Evaluation,
    theme: Theme,
}

impl<'a> Stringifier<'a> {
    pub fn new(evaluation: &'a Evaluation, theme: Theme) -> Stringifier<'a> {
        Stringifier { evaluation, theme }
    }

    /// Render an object id as a short human label.
    ///
    /// Symbolic names pass through unchanged. Instance-shaped ids become
    /// `Module#tail`, annotated with the instance's inner value when it has
    /// one. An id with no instance behind it keeps its tail but gets an
    /// empty module.
    pub fn id(&self, id: &ObjectId) -> String {
        if !id.is_instance() {
            return self.theme.identifier(id.as_str());
        }

        let (module, annotation) = match self.evaluation.instance(id) {
            Some(instance) => {
                (self.module(instance.module()), self.annotation(instance))
            }
            None => (String::new(), String::new()),
        };

        format!(
            "{}#{}{}",
            module,
            self.theme.identifier(id.short_tail()),
            annotation
        )
    }

    /// Shorten a fully qualified dotted name to its last segment. A segment
    /// like `Class#id` labels an anonymous object by its defining class plus
    /// the id's short form.
    pub fn module(&self, name: &str) -> String {
        let last = name.rsplit('.').next().unwrap_or(name);

        match last.split_once('#') {
            Some((class, id)) => {
                format!("{}{}", self.theme.module(class), self.id(&id.into()))
            }
            None => self.theme.module(last),
        }
    }

    /// Render one instruction as a call-like expression, `Kind(arg, …)`.
    ///
    /// Ids and module fields go through [`id`][Stringifier::id] and
    /// [`module`][Stringifier::module]; block bodies and handlers are always
    /// opaque; everything else renders literally. Argument order is the
    /// variant's declaration order.
    pub fn instruction(&self, instruction: &Instruction) -> String {
        use Instruction::*;

        let args = match instruction {
            PushLiteral { id } => vec![self.id(id)],
            PushLocal { name } => vec![name.clone()],
            StoreLocal { name } => vec![name.clone()],
            PushBlock { body: _ } => vec![OPAQUE_BLOCK.into()],
            Send {
                message,
                arity,
                lookup_start,
            } => vec![
                message.clone(),
                arity.to_string(),
                self.module_field(lookup_start.as_deref()),
            ],
            Resume {
                interruption,
                handler: _,
            } => vec![interruption.to_string(), OPAQUE_BLOCK.into()],
            Interrupt { interruption, id } => {
                vec![interruption.to_string(), self.id(id)]
            }
            Pop | Halt => vec![],
        };

        format!("{}({})", instruction.kind(), args.join(", "))
    }

    /// A frame's operand stack, stringified and comma-joined in stack order.
    pub fn operand_stack(&self, frame: &Frame) -> String {
        frame
            .operand_stack()
            .iter()
            .map(|id| self.id(id))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn module_field(&self, name: Option<&str>) -> String {
        match name {
            Some(name) => self.module(name),
            None => NO_MODULE.into(),
        }
    }

    /// The parenthesized inner-value annotation of an instance, or empty for
    /// instances that don't box a payload.
    fn annotation(&self, instance: &Instance) -> String {
        use chrono::Datelike;

        match instance.value() {
            None => String::new(),
            Some(InnerValue::Null) => "(null)".into(),
            Some(InnerValue::Boolean(b)) => format!("({})", b),
            Some(InnerValue::Number(n)) => format!("({})", format_number(*n)),
            Some(InnerValue::Text(s)) => format!("({})", s),
            Some(InnerValue::Ids(ids)) => {
                let elements: Vec<String> = ids
                    .iter()
                    .map(|id| {
                        if id.is_instance() {
                            self.id(id)
                        } else {
                            NOT_AN_ID.into()
                        }
                    })
                    .collect();
                format!("({})", elements.join(", "))
            }
            Some(InnerValue::Date(d)) => {
                format!("({}/{}/{})", d.day(), d.month(), d.year())
            }
        }
    }
}

/// The interpreter's numbers are all doubles; show the integral ones the way
/// a user wrote them.
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
