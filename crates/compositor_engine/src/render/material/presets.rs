//! Named material presets

use super::Material;

/// Gold
pub const GOLD: Material = Material {
    ambient: [0.24725, 0.1995, 0.0745, 1.0],
    diffuse: [0.75164, 0.60648, 0.22648, 1.0],
    specular: [0.628_281, 0.555_802, 0.366_065, 1.0],
    shininess: 51.2,
};

/// Emerald
pub const EMERALD: Material = Material {
    ambient: [0.0215, 0.1745, 0.0215, 1.0],
    diffuse: [0.07568, 0.61424, 0.07568, 1.0],
    specular: [0.633, 0.727_811, 0.633, 1.0],
    shininess: 76.8,
};

/// Jade
pub const JADE: Material = Material {
    ambient: [0.135, 0.2225, 0.1575, 1.0],
    diffuse: [0.54, 0.89, 0.63, 1.0],
    specular: [0.316_228, 0.316_228, 0.316_228, 1.0],
    shininess: 12.8,
};

/// Obsidian
pub const OBSIDIAN: Material = Material {
    ambient: [0.05375, 0.05, 0.06625, 1.0],
    diffuse: [0.18275, 0.17, 0.22525, 1.0],
    specular: [0.332_741, 0.328_634, 0.346_435, 1.0],
    shininess: 38.4,
};

/// Pearl
pub const PEARL: Material = Material {
    ambient: [0.25, 0.20725, 0.20725, 1.0],
    diffuse: [1.0, 0.829, 0.829, 1.0],
    specular: [0.296_648, 0.296_648, 0.296_648, 1.0],
    shininess: 10.24,
};

/// Ruby
pub const RUBY: Material = Material {
    ambient: [0.1745, 0.01175, 0.01175, 1.0],
    diffuse: [0.61424, 0.04136, 0.04136, 1.0],
    specular: [0.727_811, 0.626_959, 0.626_959, 1.0],
    shininess: 76.8,
};

/// Turquoise
pub const TURQUOISE: Material = Material {
    ambient: [0.1, 0.18725, 0.1745, 1.0],
    diffuse: [0.396, 0.74151, 0.69102, 1.0],
    specular: [0.297_254, 0.30829, 0.306_678, 1.0],
    shininess: 12.8,
};

/// Brass
pub const BRASS: Material = Material {
    ambient: [0.329_412, 0.223_529, 0.027_451, 1.0],
    diffuse: [0.780_392, 0.568_627, 0.113_725, 1.0],
    specular: [0.992_157, 0.941_176, 0.807_843, 1.0],
    shininess: 27.897_436,
};

/// Bronze
pub const BRONZE: Material = Material {
    ambient: [0.2125, 0.1275, 0.054, 1.0],
    diffuse: [0.714, 0.4284, 0.18144, 1.0],
    specular: [0.393_548, 0.271_906, 0.166_721, 1.0],
    shininess: 25.6,
};

/// Chrome
pub const CHROME: Material = Material {
    ambient: [0.25, 0.25, 0.25, 1.0],
    diffuse: [0.4, 0.4, 0.4, 1.0],
    specular: [0.774_597, 0.774_597, 0.774_597, 1.0],
    shininess: 76.8,
};

/// Copper
pub const COPPER: Material = Material {
    ambient: [0.19125, 0.0735, 0.0225, 1.0],
    diffuse: [0.7038, 0.27048, 0.0828, 1.0],
    specular: [0.256_777, 0.137_622, 0.086_014, 1.0],
    shininess: 12.8,
};

/// Silver
pub const SILVER: Material = Material {
    ambient: [0.19225, 0.19225, 0.19225, 1.0],
    diffuse: [0.50754, 0.50754, 0.50754, 1.0],
    specular: [0.508_273, 0.508_273, 0.508_273, 1.0],
    shininess: 51.2,
};

/// Black plastic
pub const PLASTIC_BLACK: Material = Material {
    ambient: [0.0, 0.0, 0.0, 1.0],
    diffuse: [0.01, 0.01, 0.01, 1.0],
    specular: [0.50, 0.50, 0.50, 1.0],
    shininess: 32.0,
};

/// Cyan plastic
pub const PLASTIC_CYAN: Material = Material {
    ambient: [0.0, 0.1, 0.06, 1.0],
    diffuse: [0.0, 0.509_803_9, 0.509_803_9, 1.0],
    specular: [0.501_960_8, 0.501_960_8, 0.501_960_8, 1.0],
    shininess: 32.0,
};

/// Black rubber
pub const RUBBER_BLACK: Material = Material {
    ambient: [0.02, 0.02, 0.02, 1.0],
    diffuse: [0.01, 0.01, 0.01, 1.0],
    specular: [0.4, 0.4, 0.4, 1.0],
    shininess: 10.0,
};

/// Red rubber
pub const RUBBER_RED: Material = Material {
    ambient: [0.05, 0.0, 0.0, 1.0],
    diffuse: [0.5, 0.4, 0.4, 1.0],
    specular: [0.7, 0.04, 0.04, 1.0],
    shininess: 10.0,
};

/// Plain white
pub const WHITE: Material = Material {
    ambient: [1.0, 1.0, 1.0, 1.0],
    diffuse: [1.0, 1.0, 1.0, 1.0],
    specular: [1.0, 1.0, 1.0, 1.0],
    shininess: 32.0,
};

/// Look up a preset by its lowercase name
pub fn by_name(name: &str) -> Option<Material> {
    let material = match name {
        "gold" => GOLD,
        "emerald" => EMERALD,
        "jade" => JADE,
        "obsidian" => OBSIDIAN,
        "pearl" => PEARL,
        "ruby" => RUBY,
        "turquoise" => TURQUOISE,
        "brass" => BRASS,
        "bronze" => BRONZE,
        "chrome" => CHROME,
        "copper" => COPPER,
        "silver" => SILVER,
        "plastic_black" => PLASTIC_BLACK,
        "plastic_cyan" => PLASTIC_CYAN,
        "rubber_black" => RUBBER_BLACK,
        "rubber_red" => RUBBER_RED,
        "white" => WHITE,
        _ => return None,
    };
    Some(material)
}
