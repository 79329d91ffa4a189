use crate::error::TableError;
use std::str::FromStr;

/// A colour, expressed in RGB, CMYK or grey colour spaces. The space is passed
/// through to the canvas untouched; nothing in the layout converts between spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Default for Colour {
    fn default() -> Self {
        colours::BLACK
    }
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the CMYK space. c, m, y, and k range from 0.0 to 1.0
    pub fn new_cmyk(c: f32, m: f32, y: f32, k: f32) -> Colour {
        Colour::CMYK { c, m, y, k }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }
}

/// Parses HTML-style hex colours, `#rgb` or `#rrggbb`, into RGB colours
impl FromStr for Colour {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TableError::InvalidColour(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                // each digit is doubled: #abc == #aabbcc
                let r = channel(&hex[0..1])? * 17;
                let g = channel(&hex[1..2])? * 17;
                let b = channel(&hex[2..3])? * 17;
                Ok(Colour::new_rgb_bytes(r, g, b))
            }
            6 => Ok(Colour::new_rgb_bytes(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }
}

impl<T: Into<f32>> From<(T, T, T)> for Colour {
    fn from(c: (T, T, T)) -> Self {
        Colour::RGB {
            r: c.0.into(),
            g: c.1.into(),
            b: c.2.into(),
        }
    }
}

impl<T: Into<f32>> From<(T, T, T, T)> for Colour {
    fn from(c: (T, T, T, T)) -> Self {
        Colour::CMYK {
            c: c.0.into(),
            m: c.1.into(),
            y: c.2.into(),
            k: c.3.into(),
        }
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    pub const GREY: Colour = Colour::Grey { g: 0.5 };
    pub const LIGHT_GREY: Colour = Colour::Grey { g: 0.85 };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_hex() {
        let colour: Colour = "#ff0080".parse().expect("valid colour");
        assert_eq!(colour, Colour::new_rgb_bytes(255, 0, 128));
    }

    #[test]
    fn test_parse_short_hex() {
        let colour: Colour = "#fff".parse().expect("valid colour");
        assert_eq!(colour, Colour::new_rgb(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "ff0000".parse::<Colour>(),
            Err(TableError::InvalidColour(_))
        ));
        assert!("#12345".parse::<Colour>().is_err());
        assert!("#gg0000".parse::<Colour>().is_err());
    }
}
