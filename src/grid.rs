//! Grid coordinates and a fixed-size cell set built on const generics.
//!
//! `BitGrid` packs an `N×N` grid into an unsigned integer `T`, giving the
//! engine a set of cells with value equality and no heap allocation.

use core::ops::{BitAnd, BitOr, BitOrAssign};
use core::str::FromStr;
use core::{any, fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

use crate::common::CoordError;
use crate::config::BOARD_SIZE;

/// A cell on the board. `x` is the column, `y` the row, both zero based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const SURROUNDING: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

impl Coord {
    /// Create a coordinate without bounds checking.
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Create a coordinate, rejecting cells off the board.
    pub fn checked(x: u8, y: u8) -> Result<Self, CoordError> {
        let coord = Self::new(x, y);
        if coord.in_bounds() {
            Ok(coord)
        } else {
            Err(CoordError::OutOfBounds { x, y })
        }
    }

    /// Whether the cell lies on the `BOARD_SIZE×BOARD_SIZE` grid.
    pub fn in_bounds(&self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }

    /// Step by (`dx`, `dy`), returning `None` when the result leaves the grid.
    pub fn offset(&self, dx: i8, dy: i8) -> Option<Coord> {
        let x = self.x as i16 + dx as i16;
        let y = self.y as i16 + dy as i16;
        let size = BOARD_SIZE as i16;
        if (0..size).contains(&x) && (0..size).contains(&y) {
            Some(Coord::new(x as u8, y as u8))
        } else {
            None
        }
    }

    /// In-bounds orthogonal neighbours in west, east, north, south order.
    pub fn orthogonal(self) -> impl Iterator<Item = Coord> {
        ORTHOGONAL
            .iter()
            .filter_map(move |&(dx, dy)| self.offset(dx, dy))
    }

    /// In-bounds Moore neighbourhood (the eight surrounding cells).
    pub fn surrounding(self) -> impl Iterator<Item = Coord> {
        SURROUNDING
            .iter()
            .filter_map(move |&(dx, dy)| self.offset(dx, dy))
    }

    /// Every cell on the board, row by row.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Coord::new(x, y)))
    }
}

impl From<(u8, u8)> for Coord {
    fn from((x, y): (u8, u8)) -> Self {
        Coord::new(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.in_bounds() {
            write!(f, "{}{}", (b'A' + self.x) as char, self.y as u16 + 1)
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}

/// Parses `A1`..`J10`; the letter picks the column, the number the row.
impl FromStr for Coord {
    type Err = CoordError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let mut chars = input.chars();
        let col_ch = chars.next().ok_or(CoordError::Empty)?.to_ascii_uppercase();
        if !col_ch.is_ascii_uppercase() {
            return Err(CoordError::BadColumn(col_ch));
        }
        let x = col_ch as u8 - b'A';
        if x >= BOARD_SIZE {
            return Err(CoordError::BadColumn(col_ch));
        }
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoordError::BadRow);
        }
        let row: u8 = digits.parse().map_err(|_| CoordError::BadRow)?;
        if row == 0 || row > BOARD_SIZE {
            return Err(CoordError::BadRow);
        }
        Ok(Coord::new(x, row - 1))
    }
}

/// A set of cells on an `N×N` grid stored in the unsigned integer `T`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitGrid<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

/// The cell set used throughout the engine.
pub type CellSet = BitGrid<u128, { BOARD_SIZE as usize }>;

impl<T, const N: usize> BitGrid<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    const CELLS: usize = N * N;

    /// Create an empty set.
    #[inline]
    pub fn new() -> Self {
        debug_assert!(Self::CELLS <= mem::size_of::<T>() * 8);
        BitGrid { bits: T::zero() }
    }

    #[inline]
    fn index(coord: Coord) -> Option<usize> {
        let (x, y) = (coord.x as usize, coord.y as usize);
        if x < N && y < N {
            Some(y * N + x)
        } else {
            None
        }
    }

    /// Whether `coord` is in the set. Off-grid cells are never members.
    pub fn contains(&self, coord: Coord) -> bool {
        match Self::index(coord) {
            Some(idx) => ((self.bits >> idx) & T::one()) != T::zero(),
            None => false,
        }
    }

    /// Add `coord`; returns `true` when it was not already present.
    pub fn insert(&mut self, coord: Coord) -> Result<bool, CoordError> {
        let idx = Self::index(coord).ok_or(CoordError::OutOfBounds {
            x: coord.x,
            y: coord.y,
        })?;
        let bit = T::one() << idx;
        let fresh = (self.bits & bit).is_zero();
        self.bits = self.bits | bit;
        Ok(fresh)
    }

    /// Remove `coord`; returns `true` when it was present.
    pub fn remove(&mut self, coord: Coord) -> bool {
        match Self::index(coord) {
            Some(idx) => {
                let bit = T::one() << idx;
                let present = !(self.bits & bit).is_zero();
                self.bits = self.bits & !bit;
                present
            }
            None => false,
        }
    }

    /// Number of cells in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// `true` once every cell of the grid is in the set.
    pub fn is_full(&self) -> bool {
        self.len() == Self::CELLS
    }

    /// Remove every cell.
    #[inline]
    pub fn clear(&mut self) {
        self.bits = T::zero();
    }

    /// Build a set from coordinates, failing on the first off-grid cell.
    pub fn from_coords<I>(coords: I) -> Result<Self, CoordError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut set = Self::new();
        for coord in coords {
            set.insert(coord)?;
        }
        Ok(set)
    }

    /// Iterate over members in row-major order.
    pub fn iter(&self) -> Cells<'_, T, N> {
        Cells { set: self, idx: 0 }
    }
}

impl<T, const N: usize> Default for BitGrid<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> fmt::Debug for BitGrid<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitGrid<{}, {}>:", any::type_name::<T>(), N)?;
        for y in 0..N {
            for x in 0..N {
                let cell = if self.contains(Coord::new(x as u8, y as u8)) {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the members of a [`BitGrid`].
#[derive(Clone, Copy)]
pub struct Cells<'a, T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    set: &'a BitGrid<T, N>,
    idx: usize,
}

impl<'a, T, const N: usize> Iterator for Cells<'a, T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = Coord;

    fn next(&mut self) -> Option<Self::Item> {
        while self.idx < N * N {
            let idx = self.idx;
            self.idx += 1;
            if ((self.set.bits >> idx) & T::one()) != T::zero() {
                return Some(Coord::new((idx % N) as u8, (idx / N) as u8));
            }
        }
        None
    }
}

impl<T, const N: usize> BitOr for BitGrid<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        BitGrid {
            bits: self.bits | rhs.bits,
        }
    }
}

impl<T, const N: usize> BitOrAssign for BitGrid<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits = self.bits | rhs.bits;
    }
}

impl<T, const N: usize> BitAnd for BitGrid<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        BitGrid {
            bits: self.bits & rhs.bits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_agree() {
        let c: Coord = "b7".parse().unwrap();
        assert_eq!(c, Coord::new(1, 6));
        assert_eq!(c.to_string(), "B7");
        assert_eq!("J10".parse::<Coord>().unwrap(), Coord::new(9, 9));
    }

    #[test]
    fn parse_rejects_off_board() {
        assert_eq!("K1".parse::<Coord>(), Err(CoordError::BadColumn('K')));
        assert_eq!("A0".parse::<Coord>(), Err(CoordError::BadRow));
        assert_eq!("A11".parse::<Coord>(), Err(CoordError::BadRow));
        assert_eq!("".parse::<Coord>(), Err(CoordError::Empty));
        assert_eq!("5A".parse::<Coord>(), Err(CoordError::BadColumn('5')));
    }

    #[test]
    fn parse_rejects_signed_rows() {
        assert_eq!("A+5".parse::<Coord>(), Err(CoordError::BadRow));
        assert_eq!("A-5".parse::<Coord>(), Err(CoordError::BadRow));
        assert_eq!("A 5".parse::<Coord>(), Err(CoordError::BadRow));
        assert_eq!("A".parse::<Coord>(), Err(CoordError::BadRow));
    }

    #[test]
    fn corner_neighbourhoods_are_clipped() {
        let corner = Coord::new(0, 0);
        assert_eq!(corner.orthogonal().count(), 2);
        assert_eq!(corner.surrounding().count(), 3);
        assert_eq!(Coord::new(4, 4).surrounding().count(), 8);
    }

    #[test]
    fn set_insert_remove() {
        let mut set = CellSet::new();
        assert!(set.is_empty());
        assert_eq!(set.insert(Coord::new(3, 2)), Ok(true));
        assert_eq!(set.insert(Coord::new(3, 2)), Ok(false));
        assert!(set.contains(Coord::new(3, 2)));
        assert_eq!(
            set.insert(Coord::new(10, 0)),
            Err(CoordError::OutOfBounds { x: 10, y: 0 })
        );
        assert!(!set.contains(Coord::new(10, 0)));
        assert!(set.remove(Coord::new(3, 2)));
        assert!(set.is_empty());
    }

    #[test]
    fn iter_is_row_major() {
        let set = CellSet::from_coords([Coord::new(9, 9), Coord::new(1, 0), Coord::new(0, 1)])
            .unwrap();
        let cells: Vec<_> = set.iter().collect();
        assert_eq!(cells, vec![Coord::new(1, 0), Coord::new(0, 1), Coord::new(9, 9)]);
    }

    #[test]
    fn full_grid() {
        let set = CellSet::from_coords(Coord::all()).unwrap();
        assert!(set.is_full());
        assert_eq!(set.len(), 100);
    }
}
