/// Stencil state for a draw call.
///
/// Mirrors `glStencilFunc` / `glStencilOp` with both faces configured the
/// same way, which is all that flat 2D geometry needs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StencilTest {
    pub func: StencilFunc,
    pub reference: u8,
    pub read_mask: u8,
    pub write_mask: u8,
    pub ops: StencilOps,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StencilFunc {
    Never,
    Less,
    Equal,
    LessOrEqual,
    Greater,
    NotEqual,
    GreaterOrEqual,
    Always,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StencilOp {
    Keep,
    Zero,
    Replace,
    Increment,
    IncrementWrap,
    Decrement,
    DecrementWrap,
    Invert,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StencilOps {
    pub stencil_fail: StencilOp,
    pub depth_fail: StencilOp,
    pub pass: StencilOp,
}

impl StencilTest {
    /// Unconditionally writes `marker` into every covered pixel.
    pub fn write_marker(marker: u8) -> Self {
        Self {
            func: StencilFunc::Always,
            reference: marker,
            read_mask: marker,
            write_mask: 0xff,
            ops: StencilOps::same(StencilOp::Replace),
        }
    }

    /// Passes only where `marker` has not been written, leaving the buffer
    /// untouched.
    pub fn outside_marker(marker: u8) -> Self {
        Self {
            func: StencilFunc::Equal,
            reference: 0,
            read_mask: marker,
            write_mask: 0,
            ops: StencilOps::same(StencilOp::Keep),
        }
    }
}

impl StencilOps {
    pub fn same(op: StencilOp) -> Self {
        Self {
            stencil_fail: op,
            depth_fail: op,
            pass: op,
        }
    }
}

impl StencilFunc {
    pub fn to_gl(self) -> u32 {
        use StencilFunc::*;

        match self {
            Never => glow::NEVER,
            Less => glow::LESS,
            Equal => glow::EQUAL,
            LessOrEqual => glow::LEQUAL,
            Greater => glow::GREATER,
            NotEqual => glow::NOTEQUAL,
            GreaterOrEqual => glow::GEQUAL,
            Always => glow::ALWAYS,
        }
    }
}

impl StencilOp {
    pub fn to_gl(self) -> u32 {
        use StencilOp::*;

        match self {
            Keep => glow::KEEP,
            Zero => glow::ZERO,
            Replace => glow::REPLACE,
            Increment => glow::INCR,
            IncrementWrap => glow::INCR_WRAP,
            Decrement => glow::DECR,
            DecrementWrap => glow::DECR_WRAP,
            Invert => glow::INVERT,
        }
    }
}
