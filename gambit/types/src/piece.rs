use std::{
    fmt,
    ops::{Index, IndexMut, Not},
    str::FromStr,
};

use anyhow::{bail, Result};

/// Represents the color of a player, piece, square, etc. within a chess board.
///
/// White always moves first, and therefore [`Color`] defaults to [`Color::White`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// An iterator over both colors, starting with White.
    pub fn iter() -> impl Iterator<Item = Self> {
        Self::all().into_iter()
    }

    /// Returns `true` if this [`Color`] is White.
    pub const fn is_white(&self) -> bool {
        matches!(self, Self::White)
    }

    /// Returns `true` if this [`Color`] is Black.
    pub const fn is_black(&self) -> bool {
        matches!(self, Self::Black)
    }

    /// Returns the rank direction that pieces of this [`Color`] advance in.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Color;
    /// assert_eq!(Color::White.forward(), 1);
    /// assert_eq!(Color::Black.forward(), -1);
    /// ```
    pub const fn forward(&self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// Returns this [`Color`]'s opposite / inverse / enemy.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns this [`Color`] as a `usize`.
    ///
    /// Will be `0` for White, `1` for Black.
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Creates a [`Color`] from a `char`, following FEN's active color field.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Color;
    /// assert_eq!(Color::from_uci('w').unwrap(), Color::White);
    /// assert!(Color::from_uci('x').is_err());
    /// ```
    pub fn from_uci(color: char) -> Result<Self> {
        match color {
            'w' | 'W' => Ok(Self::White),
            'b' | 'B' => Ok(Self::Black),
            _ => bail!("Color must be either 'w' or 'b' (case-insensitive). Found {color}"),
        }
    }

    /// Creates a [`Color`] based on the ASCII case of the provided character, with uppercase being White and lowercase being Black.
    pub const fn from_case(c: char) -> Self {
        if c.is_ascii_lowercase() {
            Self::Black
        } else {
            Self::White
        }
    }

    /// Converts this [`Color`] to a char, following FEN's active color field.
    pub const fn to_uci(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    /// Converts this [`Color`] to a `str`, following FEN's active color field.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::White => "w",
            Self::Black => "b",
        }
    }

    /// Fetches a human-readable name for this [`Color`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        self.opponent()
    }
}

/// Represents the kind (or "class") that a chess piece can be.
///
/// This is the closed set of variants that move generation dispatches on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece variants.
    pub const COUNT: usize = 6;

    /// An array of all 6 [`PieceKind`]s.
    ///
    /// In the order: `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, `King`.
    pub const fn all() -> [Self; Self::COUNT] {
        use PieceKind::*;
        [Pawn, Knight, Bishop, Rook, Queen, King]
    }

    /// An iterator over all [`PieceKind`]s, starting with Pawn.
    pub fn iter() -> impl Iterator<Item = Self> {
        Self::all().into_iter()
    }

    /// Returns this [`PieceKind`] as a `usize`.
    ///
    /// Will always be `[0,5]`.
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns `true` if this kind moves along rays (Bishop, Rook, Queen).
    pub const fn is_slider(&self) -> bool {
        matches!(self, Self::Bishop | Self::Rook | Self::Queen)
    }

    /// Creates a new [`PieceKind`] from a character, according to FEN notation.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::PieceKind;
    /// assert_eq!(PieceKind::from_uci('Q').unwrap(), PieceKind::Queen);
    /// assert!(PieceKind::from_uci('x').is_err());
    /// ```
    pub fn from_uci(kind: char) -> Result<Self> {
        match kind {
            'P' | 'p' => Ok(Self::Pawn),
            'N' | 'n' => Ok(Self::Knight),
            'B' | 'b' => Ok(Self::Bishop),
            'R' | 'r' => Ok(Self::Rook),
            'Q' | 'q' => Ok(Self::Queen),
            'K' | 'k' => Ok(Self::King),
            _ => bail!("Invalid char for PieceKind: Got {kind}."),
        }
    }

    /// Fetches a human-readable name for this [`PieceKind`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    /// Converts this [`PieceKind`] to a character, according to FEN notation.
    ///
    /// Will always be a lowercase letter.
    pub const fn to_uci(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// Converts this [`PieceKind`] to a `str`, according to FEN notation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pawn => "p",
            Self::Knight => "n",
            Self::Bishop => "b",
            Self::Rook => "r",
            Self::Queen => "q",
            Self::King => "k",
        }
    }

    /// The FEN character for a piece of this kind and `color` (uppercase for White).
    ///
    /// # Example
    /// ```
    /// # use gambit_types::{Color, PieceKind};
    /// assert_eq!(PieceKind::Knight.fen_char(Color::White), 'N');
    /// assert_eq!(PieceKind::Knight.fen_char(Color::Black), 'n');
    /// ```
    pub const fn fen_char(&self, color: Color) -> char {
        match color {
            Color::White => self.to_uci().to_ascii_uppercase(),
            Color::Black => self.to_uci(),
        }
    }
}

macro_rules! impl_common_traits {
    ($type:ty) => {
        impl<T> Index<$type> for [T; <$type>::COUNT] {
            type Output = T;
            fn index(&self, index: $type) -> &Self::Output {
                &self[index.index()]
            }
        }

        impl<T> IndexMut<$type> for [T; <$type>::COUNT] {
            fn index_mut(&mut self, index: $type) -> &mut Self::Output {
                &mut self[index.index()]
            }
        }

        impl FromStr for $type {
            type Err = anyhow::Error;
            /// Does the same as [`Self::from_uci`], but only if `s` is one character in length.
            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_uci(c),
                    _ => bail!("Invalid str for {}: Must be a str of len 1. Got {s:?}", stringify!($type)),
                }
            }
        }

        impl AsRef<str> for $type {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl fmt::Debug for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.name())
            }
        }
    };
}

impl_common_traits!(PieceKind);
impl_common_traits!(Color);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn color_round_trips_through_fen_field() {
        for color in Color::iter() {
            assert_eq!(color.to_string().parse::<Color>().unwrap(), color);
        }
        assert!("wb".parse::<Color>().is_err());
    }

    #[test]
    fn piece_kind_indexes_arrays() {
        let mut counts = [0u8; PieceKind::COUNT];
        for kind in PieceKind::iter() {
            counts[kind] += 1;
        }
        assert_eq!(counts, [1; PieceKind::COUNT]);
        assert_eq!(PieceKind::King.index(), 5);
    }

    #[test]
    fn only_rays_are_sliders() {
        let sliders: Vec<_> = PieceKind::iter().filter(PieceKind::is_slider).collect();
        assert_eq!(
            sliders,
            [PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen]
        );
    }
}
