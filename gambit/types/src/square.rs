use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{anyhow, bail, Result};

use super::Color;

/// Represents a single square on an `8x8` chess board, identified by its file and rank (e.g. `e4`).
///
/// Internally encoded using the following bit pattern:
/// ```text
///     00 000 000
///      |  |   |
///      |  |   +- Represents the File.
///      |  +- Represents the Rank.
///      +- Unused.
/// ```
///
/// This is also known as Least Significant File Mapping, so `square = file + rank * 8`.
///
/// A [`Square`] is only a coordinate. Its occupant is always looked up against a board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    pub const A1: Self = Self::new(File::A, Rank::ONE);
    pub const A2: Self = Self::new(File::A, Rank::TWO);
    pub const A3: Self = Self::new(File::A, Rank::THREE);
    pub const A4: Self = Self::new(File::A, Rank::FOUR);
    pub const A5: Self = Self::new(File::A, Rank::FIVE);
    pub const A6: Self = Self::new(File::A, Rank::SIX);
    pub const A7: Self = Self::new(File::A, Rank::SEVEN);
    pub const A8: Self = Self::new(File::A, Rank::EIGHT);

    pub const B1: Self = Self::new(File::B, Rank::ONE);
    pub const B2: Self = Self::new(File::B, Rank::TWO);
    pub const B3: Self = Self::new(File::B, Rank::THREE);
    pub const B4: Self = Self::new(File::B, Rank::FOUR);
    pub const B5: Self = Self::new(File::B, Rank::FIVE);
    pub const B6: Self = Self::new(File::B, Rank::SIX);
    pub const B7: Self = Self::new(File::B, Rank::SEVEN);
    pub const B8: Self = Self::new(File::B, Rank::EIGHT);

    pub const C1: Self = Self::new(File::C, Rank::ONE);
    pub const C2: Self = Self::new(File::C, Rank::TWO);
    pub const C3: Self = Self::new(File::C, Rank::THREE);
    pub const C4: Self = Self::new(File::C, Rank::FOUR);
    pub const C5: Self = Self::new(File::C, Rank::FIVE);
    pub const C6: Self = Self::new(File::C, Rank::SIX);
    pub const C7: Self = Self::new(File::C, Rank::SEVEN);
    pub const C8: Self = Self::new(File::C, Rank::EIGHT);

    pub const D1: Self = Self::new(File::D, Rank::ONE);
    pub const D2: Self = Self::new(File::D, Rank::TWO);
    pub const D3: Self = Self::new(File::D, Rank::THREE);
    pub const D4: Self = Self::new(File::D, Rank::FOUR);
    pub const D5: Self = Self::new(File::D, Rank::FIVE);
    pub const D6: Self = Self::new(File::D, Rank::SIX);
    pub const D7: Self = Self::new(File::D, Rank::SEVEN);
    pub const D8: Self = Self::new(File::D, Rank::EIGHT);

    pub const E1: Self = Self::new(File::E, Rank::ONE);
    pub const E2: Self = Self::new(File::E, Rank::TWO);
    pub const E3: Self = Self::new(File::E, Rank::THREE);
    pub const E4: Self = Self::new(File::E, Rank::FOUR);
    pub const E5: Self = Self::new(File::E, Rank::FIVE);
    pub const E6: Self = Self::new(File::E, Rank::SIX);
    pub const E7: Self = Self::new(File::E, Rank::SEVEN);
    pub const E8: Self = Self::new(File::E, Rank::EIGHT);

    pub const F1: Self = Self::new(File::F, Rank::ONE);
    pub const F2: Self = Self::new(File::F, Rank::TWO);
    pub const F3: Self = Self::new(File::F, Rank::THREE);
    pub const F4: Self = Self::new(File::F, Rank::FOUR);
    pub const F5: Self = Self::new(File::F, Rank::FIVE);
    pub const F6: Self = Self::new(File::F, Rank::SIX);
    pub const F7: Self = Self::new(File::F, Rank::SEVEN);
    pub const F8: Self = Self::new(File::F, Rank::EIGHT);

    pub const G1: Self = Self::new(File::G, Rank::ONE);
    pub const G2: Self = Self::new(File::G, Rank::TWO);
    pub const G3: Self = Self::new(File::G, Rank::THREE);
    pub const G4: Self = Self::new(File::G, Rank::FOUR);
    pub const G5: Self = Self::new(File::G, Rank::FIVE);
    pub const G6: Self = Self::new(File::G, Rank::SIX);
    pub const G7: Self = Self::new(File::G, Rank::SEVEN);
    pub const G8: Self = Self::new(File::G, Rank::EIGHT);

    pub const H1: Self = Self::new(File::H, Rank::ONE);
    pub const H2: Self = Self::new(File::H, Rank::TWO);
    pub const H3: Self = Self::new(File::H, Rank::THREE);
    pub const H4: Self = Self::new(File::H, Rank::FOUR);
    pub const H5: Self = Self::new(File::H, Rank::FIVE);
    pub const H6: Self = Self::new(File::H, Rank::SIX);
    pub const H7: Self = Self::new(File::H, Rank::SEVEN);
    pub const H8: Self = Self::new(File::H, Rank::EIGHT);
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 63;
    pub const COUNT: usize = 64;

    const FILE_MASK: u8 = 0b0000_0111;

    /// Returns an iterator over all squares, from `a1` to `h8`.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.len(), 64);
    /// assert_eq!(iter.next().unwrap(), Square::A1);
    /// assert_eq!(iter.last().unwrap(), Square::H8);
    /// ```
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Returns an iterator over all squares in the order a board is read: rank 8 down to rank 1, files `a` through `h`.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Square;
    /// let order: Vec<_> = Square::reading_order().collect();
    /// assert_eq!(order[0], Square::A8);
    /// assert_eq!(order[7], Square::H8);
    /// assert_eq!(order[63], Square::H1);
    /// ```
    pub fn reading_order() -> impl Iterator<Item = Self> {
        Rank::iter()
            .rev()
            .flat_map(|rank| File::iter().map(move |file| Self::new(file, rank)))
    }

    /// Creates a new [`Square`] from the provided [`File`] and [`Rank`].
    pub const fn new(file: File, rank: Rank) -> Self {
        Self(file.0 | rank.0 << 3)
    }

    /// Creates a new [`Square`] from an index in `[0, 64)`.
    pub fn from_index(index: usize) -> Result<Self> {
        if index >= Self::COUNT {
            bail!(
                "Invalid index for Square: Must be between [{}, {}]. Got {index}",
                Self::MIN,
                Self::MAX
            );
        }

        Ok(Self(index as u8))
    }

    /// Fetches the [`File`] of this [`Square`].
    pub const fn file(&self) -> File {
        File(self.0 & Self::FILE_MASK)
    }

    /// Fetches the [`Rank`] of this [`Square`].
    pub const fn rank(&self) -> Rank {
        Rank(self.0 >> 3)
    }

    /// Returns this [`Square`] as a `usize`, for indexing into lists of 64 elements.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns `true` if this is a light square.
    pub const fn is_light(&self) -> bool {
        (self.file().0 + self.rank().0) % 2 != 0
    }

    /// Returns `true` if this is a dark square.
    pub const fn is_dark(&self) -> bool {
        !self.is_light()
    }

    /// The fixed [`Color`] of this [`Square`], derived from the parity of its file and rank.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::{Color, Square};
    /// assert_eq!(Square::A1.color(), Color::Black);
    /// assert_eq!(Square::H1.color(), Color::White);
    /// assert_eq!(Square::E4.color(), Color::White);
    /// ```
    pub const fn color(&self) -> Color {
        if self.is_light() {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Creates a [`Square`] from a coordinate string such as `"e4"`.
    ///
    /// Fails if the string is malformed or outside of the `8x8` board.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Square;
    /// assert_eq!(Square::from_uci("c4").unwrap(), Square::C4);
    /// assert!(Square::from_uci("z0").is_err());
    /// assert!(Square::from_uci("e9").is_err());
    /// assert!(Square::from_uci("e44").is_err());
    /// ```
    pub fn from_uci(square: &str) -> Result<Self> {
        let mut chars = square.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Invalid Square string: String must contain exactly 2 characters. Got {square:?}")
        };

        let file = File::from_char(file)
            .map_err(|err| anyhow!("Invalid Square string {square:?}: {err}"))?;
        let rank = Rank::from_char(rank)
            .map_err(|err| anyhow!("Invalid Square string {square:?}: {err}"))?;

        Ok(Self::new(file, rank))
    }

    /// Converts this [`Square`] to a coordinate string such as `"e4"`.
    pub fn to_uci(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    /// Attempt to offset this [`Square`] by the file and rank offsets.
    ///
    /// If `self + offset` would leave the board, then `None` is returned.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Square;
    /// assert_eq!(Square::C4.offset(1, 1), Some(Square::D5));
    /// assert_eq!(Square::C4.offset(-1, -1), Some(Square::B3));
    /// assert_eq!(Square::A1.offset(-1, -1), None);
    /// ```
    pub fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file().offset(file_delta)?;
        let rank = self.rank().offset(rank_delta)?;

        Some(Self::new(file, rank))
    }

    /// Moves this [`Square`] `n` ranks towards the opponent of `color`, if possible.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::{Square, Color};
    /// assert_eq!(Square::C4.forward_by(Color::White, 1), Some(Square::C5));
    /// assert_eq!(Square::C4.forward_by(Color::Black, 1), Some(Square::C3));
    /// ```
    pub fn forward_by(&self, color: Color, n: i8) -> Option<Self> {
        self.offset(0, n * color.forward())
    }
}

impl<T: AsRef<str>> PartialEq<T> for Square {
    fn eq(&self, other: &T) -> bool {
        self.to_uci().eq(other.as_ref())
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_uci(value)
    }
}

impl<T> Index<Square> for [T; Square::COUNT] {
    type Output = T;
    fn index(&self, index: Square) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Square> for [T; Square::COUNT] {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.to_uci(), self.0)
    }
}

/// A vertical column of the board, `a` through `h`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct File(u8);

impl File {
    pub const A: Self = Self(0);
    pub const B: Self = Self(1);
    pub const C: Self = Self(2);
    pub const D: Self = Self(3);
    pub const E: Self = Self(4);
    pub const F: Self = Self(5);
    pub const G: Self = Self(6);
    pub const H: Self = Self(7);

    pub const MAX: u8 = 7;
    pub const COUNT: usize = 8;

    /// Returns an iterator over all files, `a` first.
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (0..=Self::MAX).map(Self)
    }

    /// Construct a new [`File`] from the provided value.
    pub fn new(file: u8) -> Result<Self> {
        if file > Self::MAX {
            bail!("Invalid int for File: Must be between [0, {}]. Got {file}", Self::MAX);
        }

        Ok(Self(file))
    }

    /// Creates a [`File`] from its letter, case-insensitive.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::File;
    /// assert_eq!(File::from_char('c').unwrap(), File::C);
    /// assert_eq!(File::from_char('C').unwrap(), File::C);
    /// assert!(File::from_char('i').is_err());
    /// ```
    pub fn from_char(file: char) -> Result<Self> {
        match file.to_ascii_lowercase() {
            c @ 'a'..='h' => Ok(Self(c as u8 - b'a')),
            _ => bail!("Invalid char for File: Must be between [a, h]. Got {file:?}"),
        }
    }

    /// Converts this [`File`] to its lowercase letter.
    pub const fn char(&self) -> char {
        (self.0 + b'a') as char
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Attempt to offset this [`File`] by the provided `delta`.
    ///
    /// If `self + delta` would exceed the bounds of this [`File`], then `None` is returned.
    pub fn offset(self, delta: i8) -> Option<Self> {
        let bits = self.0.checked_add_signed(delta)?;
        (bits <= Self::MAX).then_some(Self(bits))
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// A horizontal row of the board, `1` through `8`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Rank(u8);

impl Rank {
    pub const ONE: Self = Self(0);
    pub const TWO: Self = Self(1);
    pub const THREE: Self = Self(2);
    pub const FOUR: Self = Self(3);
    pub const FIVE: Self = Self(4);
    pub const SIX: Self = Self(5);
    pub const SEVEN: Self = Self(6);
    pub const EIGHT: Self = Self(7);

    pub const MAX: u8 = 7;
    pub const COUNT: usize = 8;

    /// Returns an iterator over all ranks, `1` first.
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (0..=Self::MAX).map(Self)
    }

    /// Construct a new [`Rank`] from the provided (zero-based) value.
    pub fn new(rank: u8) -> Result<Self> {
        if rank > Self::MAX {
            bail!("Invalid int for Rank: Must be between [0, {}]. Got {rank}", Self::MAX);
        }

        Ok(Self(rank))
    }

    /// The rank a player's pieces start on.
    pub const fn first(color: Color) -> Self {
        [Self::ONE, Self::EIGHT][color.index()]
    }

    /// The rank a player's pawns start on.
    pub const fn second(color: Color) -> Self {
        [Self::TWO, Self::SEVEN][color.index()]
    }

    /// Creates a [`Rank`] from its digit.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Rank;
    /// assert_eq!(Rank::from_char('4').unwrap(), Rank::FOUR);
    /// assert!(Rank::from_char('0').is_err());
    /// assert!(Rank::from_char('9').is_err());
    /// ```
    pub fn from_char(rank: char) -> Result<Self> {
        match rank {
            c @ '1'..='8' => Ok(Self(c as u8 - b'1')),
            _ => bail!("Invalid char for Rank: Must be between [1, 8]. Got {rank:?}"),
        }
    }

    /// Converts this [`Rank`] to its digit.
    pub const fn char(&self) -> char {
        (self.0 + b'1') as char
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Attempt to offset this [`Rank`] by the provided `delta`.
    ///
    /// If `self + delta` would exceed the bounds of this [`Rank`], then `None` is returned.
    pub fn offset(self, delta: i8) -> Option<Self> {
        let bits = self.0.checked_add_signed(delta)?;
        (bits <= Self::MAX).then_some(Self(bits))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}
