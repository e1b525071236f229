use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    pub const BOTH: [Direction; 2] = [Direction::Across, Direction::Down];

    /// (row, col) step per letter.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GridSlot {
    pub letter: char,
    /// How many placed words cover this cell.
    pub owners: u8,
}

/// Dense square working grid, row-major. `None` means no letter placed yet
/// (a black-cell candidate). Bounds and adjacency checks dominate the search
/// hot loop, so the representation stays a flat vector rather than a map.
pub struct Grid {
    size: usize,
    slots: Vec<Option<GridSlot>>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            slots: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    pub fn get(&self, row: isize, col: isize) -> Option<&GridSlot> {
        if !self.in_bounds(row, col) {
            return None;
        }
        self.slots[row as usize * self.size + col as usize].as_ref()
    }

    fn occupied(&self, row: isize, col: isize) -> bool {
        self.get(row, col).is_some()
    }

    /// Checks a candidate span without mutating the grid. Returns the number
    /// of intersections with already-placed words, or `None` if the span is
    /// rejected.
    ///
    /// Rejection rules, enforced here at acceptance time:
    ///   - any letter out of bounds;
    ///   - a cell immediately before the first or after the last letter is
    ///     occupied (the word would extend another word's run);
    ///   - an overlapped cell disagrees on the letter;
    ///   - a freshly claimed cell has an occupied perpendicular neighbour
    ///     (parallel side-contact without an intersection);
    ///   - `require_intersection` is set and the span touches nothing.
    pub fn can_place(
        &self,
        word: &[char],
        row: isize,
        col: isize,
        direction: Direction,
        require_intersection: bool,
    ) -> Option<usize> {
        let (dr, dc) = direction.delta();
        let len = word.len() as isize;

        if self.occupied(row - dr, col - dc) {
            return None;
        }
        if self.occupied(row + dr * len, col + dc * len) {
            return None;
        }

        let mut intersections = 0;
        for (i, &ch) in word.iter().enumerate() {
            let r = row + dr * i as isize;
            let c = col + dc * i as isize;
            if !self.in_bounds(r, c) {
                return None;
            }
            if let Some(slot) = self.get(r, c) {
                if slot.letter != ch {
                    return None;
                }
                intersections += 1;
                continue;
            }
            // Fresh cell: neighbours perpendicular to the travel direction
            // must be empty, or two parallel words would touch side-by-side.
            if self.occupied(r - dc, c - dr) || self.occupied(r + dc, c + dr) {
                return None;
            }
        }

        if require_intersection && intersections == 0 {
            return None;
        }
        Some(intersections)
    }

    /// Writes a word the search has already accepted via [`Grid::can_place`].
    pub fn place(&mut self, word: &[char], row: usize, col: usize, direction: Direction) {
        let (dr, dc) = direction.delta();
        for (i, &ch) in word.iter().enumerate() {
            let r = row + (dr as usize) * i;
            let c = col + (dc as usize) * i;
            let idx = r * self.size + c;
            match &mut self.slots[idx] {
                Some(slot) => slot.owners += 1,
                empty => *empty = Some(GridSlot { letter: ch, owners: 1 }),
            }
        }
    }

    /// Multimap from letter to every coordinate currently holding it. The
    /// search scans these buckets linearly when looking for intersections.
    pub fn letter_positions(&self) -> HashMap<char, Vec<(usize, usize)>> {
        let mut map: HashMap<char, Vec<(usize, usize)>> = HashMap::new();
        for r in 0..self.size {
            for c in 0..self.size {
                if let Some(slot) = &self.slots[r * self.size + c] {
                    map.entry(slot.letter).or_default().push((r, c));
                }
            }
        }
        map
    }
}

/// Negated Manhattan distance of the word's midpoint from the grid center.
/// Higher is closer to center.
pub fn centrality(size: usize, row: isize, col: isize, direction: Direction, len: usize) -> f64 {
    let center = (size as f64 - 1.0) / 2.0;
    let span = (len as f64 - 1.0) / 2.0;
    let (mid_row, mid_col) = match direction {
        Direction::Across => (row as f64, col as f64 + span),
        Direction::Down => (row as f64 + span, col as f64),
    };
    -((center - mid_row).abs() + (center - mid_col).abs())
}
