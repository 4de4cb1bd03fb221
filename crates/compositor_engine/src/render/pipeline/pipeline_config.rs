//! Fixed-function pipeline state
//!
//! `PipelineState` is the complete set of raster, depth, stencil and shading
//! switches a backend applies to every draw. It is plain `Copy` data so a
//! pass can snapshot it on entry and restore it on exit.

/// Blending modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Source replaces destination
    Replace,
    /// `src * a + dst * (1 - a)`
    Alpha,
}

/// Face culling modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    /// No culling
    None,
    /// Cull front faces (counter-clockwise on screen)
    Front,
    /// Cull back faces (clockwise on screen)
    Back,
}

impl CullMode {
    /// The mode that keeps the same surfaces visible after a winding flip
    pub fn inverted(self) -> Self {
        match self {
            Self::None => Self::None,
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

/// Comparison used by the depth and stencil tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareFunc {
    /// Never passes
    Never,
    /// Always passes
    Always,
    /// Passes if incoming < stored
    Less,
    /// Passes if incoming <= stored
    LessEqual,
    /// Passes if incoming == stored
    Equal,
    /// Passes if incoming != stored
    NotEqual,
    /// Passes if incoming > stored
    Greater,
}

impl CompareFunc {
    /// Evaluate `incoming <op> stored`
    pub fn compare<T: PartialOrd>(self, incoming: T, stored: T) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::Less => incoming < stored,
            Self::LessEqual => incoming <= stored,
            Self::Equal => incoming == stored,
            Self::NotEqual => incoming != stored,
            Self::Greater => incoming > stored,
        }
    }
}

/// Stencil buffer update operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StencilOp {
    /// Keep the stored value
    Keep,
    /// Write zero
    Zero,
    /// Write the reference value
    Replace,
    /// Increment, saturating at 255
    Increment,
    /// Decrement, saturating at 0
    Decrement,
    /// Bitwise invert
    Invert,
}

impl StencilOp {
    /// Apply the operation to a stored stencil value
    pub fn apply(self, stored: u8, reference: u8) -> u8 {
        match self {
            Self::Keep => stored,
            Self::Zero => 0,
            Self::Replace => reference,
            Self::Increment => stored.saturating_add(1),
            Self::Decrement => stored.saturating_sub(1),
            Self::Invert => !stored,
        }
    }
}

/// Stencil test configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StencilState {
    /// Whether the stencil test runs at all
    pub enabled: bool,
    /// Comparison of `reference & mask` against `stored & mask`
    pub func: CompareFunc,
    /// Reference value
    pub reference: u8,
    /// Mask applied to both sides of the comparison
    pub mask: u8,
    /// Operation when the stencil test fails
    pub fail: StencilOp,
    /// Operation when the stencil test passes but the depth test fails
    pub depth_fail: StencilOp,
    /// Operation when both tests pass
    pub pass: StencilOp,
}

impl Default for StencilState {
    fn default() -> Self {
        Self {
            enabled: false,
            func: CompareFunc::Always,
            reference: 0,
            mask: 0xff,
            fail: StencilOp::Keep,
            depth_fail: StencilOp::Keep,
            pass: StencilOp::Keep,
        }
    }
}

impl StencilState {
    /// Evaluate the stencil test against a stored value
    pub fn test(&self, stored: u8) -> bool {
        self.func.compare(self.reference & self.mask, stored & self.mask)
    }
}

/// Depth bias configuration to prevent z-fighting
///
/// Mirrors polygon offset: the fragment depth is shifted by
/// `slope_factor * max_depth_slope + constant_factor * DEPTH_UNIT`.
/// Negative values pull fragments toward the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthBiasConfig {
    /// Constant depth bias factor, in units of `DEPTH_UNIT`
    pub constant_factor: f32,
    /// Slope-scaled depth bias factor
    pub slope_factor: f32,
}

impl DepthBiasConfig {
    /// Smallest resolvable depth step the constant factor is measured in
    pub const DEPTH_UNIT: f32 = 1.0 / 16_777_216.0;

    /// Offset for a triangle with the given screen-space depth slope
    pub fn offset(&self, max_depth_slope: f32) -> f32 {
        self.slope_factor * max_depth_slope + self.constant_factor * Self::DEPTH_UNIT
    }
}

/// Complete fixed-function pipeline state applied to every draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineState {
    /// Enable depth testing (depth is only written while testing)
    pub depth_test: bool,
    /// Enable depth writes when the depth test passes
    pub depth_write: bool,
    /// Depth comparison
    pub depth_func: CompareFunc,
    /// Enable color buffer writes
    pub color_write: bool,
    /// Face culling
    pub cull_mode: CullMode,
    /// Fixed-function lighting; when off, `flat_color` is used verbatim
    pub lighting: bool,
    /// Color used for unlit draws
    pub flat_color: [f32; 4],
    /// Polygon offset; `None` disables it
    pub depth_bias: Option<DepthBiasConfig>,
    /// Color blending
    pub blend: BlendMode,
    /// Stencil test
    pub stencil: StencilState,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            depth_test: true,
            depth_write: true,
            depth_func: CompareFunc::Less,
            color_write: true,
            cull_mode: CullMode::Back,
            lighting: true,
            flat_color: [1.0, 1.0, 1.0, 1.0],
            depth_bias: None,
            blend: BlendMode::Alpha,
            stencil: StencilState::default(),
        }
    }
}
