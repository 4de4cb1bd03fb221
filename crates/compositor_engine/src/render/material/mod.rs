//! Fixed-function materials
//!
//! A material is the classic ambient / diffuse / specular / shininess
//! quadruple. The named presets are the usual measured-material table used by
//! fixed-function demos.

pub mod presets;

/// Surface material for fixed-function lighting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Ambient reflectance (RGBA)
    pub ambient: [f32; 4],
    /// Diffuse reflectance (RGBA); its alpha is the fragment alpha
    pub diffuse: [f32; 4],
    /// Specular reflectance (RGBA)
    pub specular: [f32; 4],
    /// Specular exponent
    pub shininess: f32,
}

impl Material {
    /// Material whose ambient and diffuse terms share one color, with no highlight
    pub const fn ambient_and_diffuse(color: [f32; 4]) -> Self {
        Self {
            ambient: color,
            diffuse: color,
            specular: [0.0, 0.0, 0.0, 1.0],
            shininess: 0.0,
        }
    }

    /// Copy of this material with every alpha channel replaced
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.ambient[3] = alpha;
        self.diffuse[3] = alpha;
        self.specular[3] = alpha;
        self
    }

    /// Alpha the material contributes to blending
    pub fn alpha(&self) -> f32 {
        self.diffuse[3]
    }
}

impl Default for Material {
    fn default() -> Self {
        presets::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alpha_touches_every_term() {
        let m = presets::RUBY.with_alpha(0.1);
        assert_eq!(m.ambient[3], 0.1);
        assert_eq!(m.diffuse[3], 0.1);
        assert_eq!(m.specular[3], 0.1);
        assert_eq!(m.alpha(), 0.1);
        // colors untouched
        assert_eq!(m.diffuse[0], presets::RUBY.diffuse[0]);
    }

    #[test]
    fn test_ambient_and_diffuse_has_no_highlight() {
        let m = Material::ambient_and_diffuse([0.6, 0.6, 0.6, 1.0]);
        assert_eq!(m.ambient, m.diffuse);
        assert_eq!(&m.specular[..3], &[0.0, 0.0, 0.0]);
    }
}
