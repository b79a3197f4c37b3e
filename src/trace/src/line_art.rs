//! Line art used to draw nesting guides and rules.

/// Different sets of line art characters, used to draw the nesting guides of
/// a step trace and the rules around state dumps.
#[derive(Debug, Clone, Copy)]
pub struct LineArt {
    /// One level of call nesting.
    pub vertical: char,

    /// The reach of an unwind branch, and the rule character.
    pub horizontal: char,

    /// Where an unwind branch lands.
    pub corner: char,
}

impl LineArt {
    /// Unicode line art symbols
    pub const UNICODE: LineArt = LineArt {
        vertical: '│',
        horizontal: '─',
        corner: '└',
    };

    /// ASCII line art symbols
    pub const ASCII: LineArt = LineArt {
        vertical: '|',
        horizontal: '-',
        corner: '+',
    };
}
