use colored::Colorize;
use kwnorm_core::{
    BatchConfig, BatchOutcome, Cell, DuplicateReport, Error, DUPLICATE_GROUP_COLUMN,
    NORMALIZED_COLUMN,
};

pub fn print_loading(config: &BatchConfig) {
    println!("{}", "=== Keyword Normalizer ===".bold());
    println!("Loading '{}'", config.source.display());
}

pub fn print_error(err: &Error) {
    eprintln!("{} {}", "error:".red().bold(), err);
    let available = err.available();
    if !available.is_empty() {
        let label = match err {
            Error::SheetNotFound { .. } => "Available sheets:",
            _ => "Available columns:",
        };
        eprintln!("{}", label);
        for (i, name) in available.iter().enumerate() {
            eprintln!("  {}. {}", i + 1, name);
        }
    }
}

pub fn print_outcome(config: &BatchConfig, outcome: &BatchOutcome, preview: usize) {
    match &outcome.sheet {
        Some(sheet) => println!("Sheet: {}", sheet),
        None => println!("Sheet: -"),
    }
    // Derived columns are the last two
    let original = &outcome.table.headers[..outcome.table.headers.len() - 2];
    println!("Available columns: {}", original.join(", "));
    println!("Using column: {}", config.column.cyan());
    println!("Rows: {}", outcome.report.total_rows);
    println!(
        "{} {}",
        "Near-duplicates found:".yellow(),
        outcome.report.duplicate_rows
    );

    print_groups(&outcome.report);

    if let Some(path) = &outcome.output_path {
        println!("\n{} {}", "✅ Saved:".green(), path.display());
    }

    print_preview(config, outcome, preview);
}

fn print_groups(report: &DuplicateReport) {
    if !report.has_duplicates() {
        println!("\n{}", "No near-duplicates found!".green());
        return;
    }

    println!(
        "\n=== NEAR-DUPLICATE GROUPS ({} groups) ===",
        report.group_count()
    );
    println!("{}", "=".repeat(80));

    for (i, group) in report.groups.iter().enumerate() {
        let label = format!("📋 GROUP {}:", i + 1);
        println!("\n{} '{}'", label.bold(), group.key);
        println!("{}", "-".repeat(60));
        for member in &group.members {
            println!("  • {}", member.keyword);
        }
        println!("  → {} variants", group.variants());
    }

    println!(
        "\n💡 Pick the variant to keep in each group and remove the others from the source."
    );
}

fn print_preview(config: &BatchConfig, outcome: &BatchOutcome, rows: usize) {
    if rows == 0 || outcome.table.is_empty() {
        return;
    }
    println!("\nFirst {} rows:", rows.min(outcome.table.len()));
    println!(
        "  {} | {} | {}",
        config.column, NORMALIZED_COLUMN, DUPLICATE_GROUP_COLUMN
    );
    for (keyword, annotation) in outcome
        .table
        .column(outcome.keyword_column)
        .zip(&outcome.annotations)
        .take(rows)
    {
        println!(
            "  {} | {} | {}",
            display_cell(keyword),
            annotation.normalized,
            annotation.duplicate_group
        );
    }
}

fn display_cell(cell: &Cell) -> String {
    match cell {
        Cell::Empty => "<empty>".dimmed().to_string(),
        other => other.to_string(),
    }
}
