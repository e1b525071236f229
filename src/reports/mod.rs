use chrono::NaiveDate;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use crossforge::finalize::{CellType, CluesJson, GridJson};
use crossforge::level::GenerationResult;
use crossforge::store::PersistedLevel;

/// Human-readable report for one generated puzzle: summary table, grid art,
/// and both clue lists. Skipped entirely in --json mode.
pub fn print_run(
    index: usize,
    generated: &GenerationResult,
    persisted: Option<&PersistedLevel>,
    daily_date: Option<NaiveDate>,
) {
    println!("\n=== Generated #{} ===", index);
    print_summary_table(generated, persisted, daily_date);
    println!("{}", render_grid(&generated.finalized.grid_json));
    print_clues(&generated.finalized.clues_json);
}

fn print_summary_table(
    generated: &GenerationResult,
    persisted: Option<&PersistedLevel>,
    daily_date: Option<NaiveDate>,
) {
    let intersections: usize = generated.placements.iter().map(|p| p.intersections).sum();
    let b = &generated.words_breakdown;

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec!["difficulty", "grid", "words", "quality", "score", "xings"]);
    table.add_row(vec![
        Cell::new(generated.target_difficulty.to_string()),
        Cell::new(format!("{0}x{0}", generated.grid_size)).set_alignment(CellAlignment::Center),
        Cell::new(generated.placements.len()).set_alignment(CellAlignment::Center),
        Cell::new(generated.quality_score).set_alignment(CellAlignment::Center),
        Cell::new(format!("{:.2}", generated.computed_difficulty_score))
            .set_alignment(CellAlignment::Center),
        Cell::new(intersections).set_alignment(CellAlignment::Center),
    ]);
    println!("{}", table);

    println!(
        "words_breakdown easy={} medium={} hard={} expert={}",
        b.easy, b.medium, b.hard, b.expert
    );
    if let Some(date) = daily_date {
        println!("daily_date={}", date);
    }
    match persisted {
        Some(p) => {
            println!("level_id={}", p.level_id);
            println!("solution_hash={}", p.solution_hash);
            println!("answer_hash={}", p.answer_hash);
        }
        None => {
            println!("dry_solution_hash={}", generated.solution_hash);
            println!("dry_answer_hash_placeholder_level={}", generated.answer_hash);
        }
    }
}

/// ASCII rendering: `###` for black cells, zero-padded clue numbers on
/// start cells, ` ..` for plain letter cells. Letters themselves are left
/// out on purpose; this output may end up in logs.
pub fn render_grid(grid: &GridJson) -> String {
    let mut matrix = vec![vec![String::from("###"); grid.cols]; grid.rows];
    for cell in &grid.cells {
        if cell.cell_type == CellType::Black {
            continue;
        }
        matrix[cell.row][cell.col] = match cell.number {
            Some(n) => format!("{:02}.", n),
            None => String::from(" .."),
        };
    }

    let mut lines = vec![String::from("Grid:")];
    for row in matrix {
        lines.push(row.join(" "));
    }
    lines.join("\n")
}

fn print_clues(clues: &CluesJson) {
    println!("\nAcross:");
    for clue in &clues.across {
        println!(
            "  {}. ({}) {} [{}]",
            clue.number, clue.answer_length, clue.clue, clue.answer
        );
    }
    println!("\nDown:");
    for clue in &clues.down {
        println!(
            "  {}. ({}) {} [{}]",
            clue.number, clue.answer_length, clue.clue, clue.answer
        );
    }
}
