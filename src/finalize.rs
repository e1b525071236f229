use crate::engine::Placement;
use crate::grid::{Direction, Grid};
use crate::hash;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Letter,
    Black,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumberedCell {
    pub row: usize,
    pub col: usize,
    #[serde(rename = "type")]
    pub cell_type: CellType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CluePosition {
    pub row: usize,
    pub col: usize,
}

/// One clue entry. The `answer` field is generation-internal: it must never
/// cross into an externally served payload. Serving layers strip it before
/// responding to end users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clue {
    pub number: u32,
    pub clue: String,
    pub answer: String,
    pub answer_length: usize,
    pub start: CluePosition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridJson {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<NumberedCell>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CluesJson {
    pub across: Vec<Clue>,
    pub down: Vec<Clue>,
}

/// Finalized grid, clue lists, and the answer map feeding the canonical
/// hash. Like the clue answers, `answer_map` is sensitive and stays
/// server-side.
#[derive(Debug, Clone)]
pub struct FinalizedLevel {
    pub grid_json: GridJson,
    pub clues_json: CluesJson,
    /// `"<number><A|D>"` to uppercase answer.
    pub answer_map: BTreeMap<String, String>,
}

/// Replays accepted placements onto a fresh grid, numbers clue starts in
/// row-major scan order, and derives directional clue lists.
///
/// Every unoccupied cell becomes black. A letter cell gets a number exactly
/// when some placement starts there; a cell starting both an across and a
/// down word still receives a single number. Numbering is strictly
/// increasing with no gaps or duplicates.
pub fn finalize_level(size: usize, placements: &[Placement]) -> FinalizedLevel {
    let mut grid = Grid::new(size);
    for p in placements {
        let chars: Vec<char> = p.word.chars().collect();
        grid.place(&chars, p.row, p.col, p.direction);
    }

    let starts: HashSet<(usize, usize)> = placements.iter().map(|p| (p.row, p.col)).collect();

    let mut cells = Vec::with_capacity(size * size);
    let mut numbers: HashMap<(usize, usize), u32> = HashMap::new();
    let mut next_number = 1u32;

    for row in 0..size {
        for col in 0..size {
            if grid.get(row as isize, col as isize).is_none() {
                cells.push(NumberedCell {
                    row,
                    col,
                    cell_type: CellType::Black,
                    number: None,
                });
                continue;
            }
            let number = if starts.contains(&(row, col)) {
                numbers.insert((row, col), next_number);
                let n = next_number;
                next_number += 1;
                Some(n)
            } else {
                None
            };
            cells.push(NumberedCell {
                row,
                col,
                cell_type: CellType::Letter,
                number,
            });
        }
    }

    let mut across = Vec::new();
    let mut down = Vec::new();
    for p in placements {
        let Some(&number) = numbers.get(&(p.row, p.col)) else {
            continue;
        };
        let clue = Clue {
            number,
            clue: clue_text(&p.word, p.definition.as_deref()),
            answer: p.word.clone(),
            answer_length: p.word.chars().count(),
            start: CluePosition { row: p.row, col: p.col },
        };
        match p.direction {
            Direction::Across => across.push(clue),
            Direction::Down => down.push(clue),
        }
    }
    across.sort_by_key(|c| c.number);
    down.sort_by_key(|c| c.number);

    let mut answer_map = BTreeMap::new();
    for clue in &across {
        answer_map.insert(format!("{}A", clue.number), hash::turkish_upper(&clue.answer));
    }
    for clue in &down {
        answer_map.insert(format!("{}D", clue.number), hash::turkish_upper(&clue.answer));
    }

    FinalizedLevel {
        grid_json: GridJson {
            rows: size,
            cols: size,
            cells,
        },
        clues_json: CluesJson { across, down },
        answer_map,
    }
}

/// Author-provided definition when present, otherwise a deterministic
/// placeholder naming the word.
fn clue_text(word: &str, definition: Option<&str>) -> String {
    match definition.map(str::trim).filter(|d| !d.is_empty()) {
        Some(def) => def.to_string(),
        None => format!("Tanım: \"{}\"", word),
    }
}
