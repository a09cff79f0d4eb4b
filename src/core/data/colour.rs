/// Packed `0x00RRGGBB` value for black.
pub const BLACK: u32 = 0x00_00_00;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    /// Packs into a 24-bit `0x00RRGGBB` value.
    #[must_use]
    pub fn packed(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }

    /// Unpacks a `0x00RRGGBB` value; the top byte is ignored.
    #[must_use]
    pub fn from_packed(value: u32) -> Self {
        Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_layout_is_rgb() {
        let colour = Colour {
            r: 0x12,
            g: 0x34,
            b: 0x56,
        };
        assert_eq!(colour.packed(), 0x00_12_34_56);
    }

    #[test]
    fn test_default_is_black() {
        assert_eq!(Colour::default().packed(), BLACK);
    }

    #[test]
    fn test_from_packed_ignores_alpha_byte() {
        let colour = Colour::from_packed(0xFF_C7_00_10);
        assert_eq!(
            colour,
            Colour {
                r: 0xC7,
                g: 0x00,
                b: 0x10
            }
        );
    }
}
