//! Fourteen-segment character set
//!
//! Segment naming follows the usual starburst layout:
//!
//! ```text
//!  ---A---
//! |\  |  /|
//! F H I J B
//! |  \|/  |
//!  -G1 G2-
//! |  /|\  |
//! E K L M C
//! |/  |  \|
//!  ---D---
//! ```

/// One segment of a character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    A,
    B,
    C,
    D,
    E,
    F,
    G1,
    G2,
    H,
    I,
    J,
    K,
    L,
    M,
}

impl Segment {
    /// All segments in drawing order
    pub const ALL: [Segment; 14] = [
        Segment::A,
        Segment::B,
        Segment::C,
        Segment::D,
        Segment::E,
        Segment::F,
        Segment::G1,
        Segment::G2,
        Segment::H,
        Segment::I,
        Segment::J,
        Segment::K,
        Segment::L,
        Segment::M,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Segment::A => "a",
            Segment::B => "b",
            Segment::C => "c",
            Segment::D => "d",
            Segment::E => "e",
            Segment::F => "f",
            Segment::G1 => "g1",
            Segment::G2 => "g2",
            Segment::H => "h",
            Segment::I => "i",
            Segment::J => "j",
            Segment::K => "k",
            Segment::L => "l",
            Segment::M => "m",
        }
    }

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// The lit segments of one character
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Glyph(u16);

impl Glyph {
    pub const BLANK: Glyph = Glyph(0);
    pub const STARBURST: Glyph = Glyph((1 << 14) - 1);

    const fn of(segments: &[Segment]) -> Glyph {
        let mut bits = 0;
        let mut i = 0;
        while i < segments.len() {
            bits |= segments[i].bit();
            i += 1;
        }
        Glyph(bits)
    }

    pub fn is_lit(&self, segment: Segment) -> bool {
        self.0 & segment.bit() != 0
    }

    pub fn lit(&self) -> impl Iterator<Item = Segment> + '_ {
        Segment::ALL.into_iter().filter(|s| self.is_lit(*s))
    }
}

use Segment::*;

/// Look up the glyph for a display character
///
/// Lowercase letters are shown in uppercase, as the LCD has no lowercase
/// forms. The backtick selects the append symbol and `ÿ` the starburst
/// shown for non-printable characters.
pub fn glyph(c: char) -> Option<Glyph> {
    let g = match c.to_ascii_uppercase() {
        ' ' => Glyph::BLANK,
        '0' => Glyph::of(&[A, B, C, D, E, F]),
        '1' => Glyph::of(&[B, C]),
        '2' => Glyph::of(&[A, B, G1, G2, E, D]),
        '3' => Glyph::of(&[A, B, G2, C, D]),
        '4' => Glyph::of(&[F, G1, G2, B, C]),
        '5' => Glyph::of(&[A, F, G1, G2, C, D]),
        '6' => Glyph::of(&[A, F, E, D, C, G1, G2]),
        '7' => Glyph::of(&[A, B, C]),
        '8' => Glyph::of(&[A, B, C, D, E, F, G1, G2]),
        '9' => Glyph::of(&[A, B, C, D, F, G1, G2]),
        'A' => Glyph::of(&[A, B, C, E, F, G1, G2]),
        'B' => Glyph::of(&[A, B, C, D, I, L, G2]),
        'C' => Glyph::of(&[A, D, E, F]),
        'D' => Glyph::of(&[A, B, C, D, I, L]),
        'E' => Glyph::of(&[A, D, E, F, G1]),
        'F' => Glyph::of(&[A, E, F, G1]),
        'G' => Glyph::of(&[A, C, D, E, F, G2]),
        'H' => Glyph::of(&[B, C, E, F, G1, G2]),
        'I' => Glyph::of(&[A, D, I, L]),
        'J' => Glyph::of(&[B, C, D, E]),
        'K' => Glyph::of(&[E, F, G1, J, M]),
        'L' => Glyph::of(&[D, E, F]),
        'M' => Glyph::of(&[B, C, E, F, H, J]),
        'N' => Glyph::of(&[B, C, E, F, H, M]),
        'O' => Glyph::of(&[A, B, C, D, E, F]),
        'P' => Glyph::of(&[A, B, E, F, G1, G2]),
        'Q' => Glyph::of(&[A, B, C, D, E, F, M]),
        'R' => Glyph::of(&[A, B, E, F, G1, G2, M]),
        'S' => Glyph::of(&[A, F, G1, G2, C, D]),
        'T' => Glyph::of(&[A, I, L]),
        'U' => Glyph::of(&[B, C, D, E, F]),
        'V' => Glyph::of(&[E, F, K, J]),
        'W' => Glyph::of(&[B, C, E, F, K, M]),
        'X' => Glyph::of(&[H, J, K, M]),
        'Y' => Glyph::of(&[H, J, L]),
        'Z' => Glyph::of(&[A, D, J, K]),
        '_' => Glyph::of(&[D]),
        '-' => Glyph::of(&[G1, G2]),
        '+' => Glyph::of(&[G1, G2, I, L]),
        '*' => Glyph::of(&[G1, G2, H, I, J, K, L, M]),
        '/' => Glyph::of(&[J, K]),
        '\\' => Glyph::of(&[H, M]),
        '<' | '(' => Glyph::of(&[J, M]),
        '>' | ')' => Glyph::of(&[H, K]),
        '=' => Glyph::of(&[G1, G2, D]),
        '?' => Glyph::of(&[A, B, G2, L]),
        '$' => Glyph::of(&[A, F, G1, G2, C, D, I, L]),
        '[' => Glyph::of(&[A, D, E, F]),
        ']' => Glyph::of(&[A, B, C, D]),
        '"' => Glyph::of(&[F, I]),
        '\'' => Glyph::of(&[I]),
        '^' => Glyph::of(&[K, M]),
        '%' => Glyph::of(&[F, C, G1, G2, J, K]),
        '&' => Glyph::of(&[A, D, E, H, J, G1, M]),
        '`' => Glyph::of(&[E, F, G1, G2]),
        'ÿ' => Glyph::STARBURST,
        _ => return None,
    };
    Some(g)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_has_no_segments() {
        assert_eq!(glyph(' ').unwrap().lit().count(), 0);
    }

    #[test]
    fn test_eight_lights_outer_and_middle() {
        let eight = glyph('8').unwrap();
        assert_eq!(eight.lit().count(), 8);
        assert!(!eight.is_lit(Segment::I));
    }

    #[test]
    fn test_starburst_lights_everything() {
        let g = glyph('ÿ').unwrap();
        assert!(Segment::ALL.iter().all(|s| g.is_lit(*s)));
    }

    #[test]
    fn test_lowercase_maps_to_uppercase() {
        assert_eq!(glyph('z'), glyph('Z'));
    }

    #[test]
    fn test_underscore_prompt() {
        let g = glyph('_').unwrap();
        assert_eq!(g.lit().collect::<Vec<_>>(), vec![Segment::D]);
    }

    #[test]
    fn test_unknown_character() {
        assert_eq!(glyph('€'), None);
    }
}
