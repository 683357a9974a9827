use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use finanzas::{
    Amount, CategoryName, Movement, MovementKind, create_category, create_movement, get_summary,
    initialize_db,
};

/// A utility for creating a demo database for the Finanzas web server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating categories...");
    let mut category_ids = Vec::new();
    for name in ["Food", "Rent", "Transport", "Entertainment"] {
        let category = create_category(CategoryName::new(name)?, &conn)?;
        category_ids.push(category.id);
    }

    println!("Creating movements...");
    let now = OffsetDateTime::now_utc();
    let mut count = 0;
    for days_ago in (0..30).rev() {
        let timestamp = now - Duration::days(days_ago);

        if days_ago % 7 == 0 {
            create_movement(
                Movement::build(MovementKind::Saving, Amount::new(250.0)?)
                    .note("Weekly savings")
                    .timestamp(timestamp),
                &conn,
            )?;
            count += 1;
        }

        let category_id = category_ids[days_ago as usize % category_ids.len()];
        let amount = 5.0 + (days_ago * 17 % 60) as f64 + 0.5;
        // Every fifth expense is left without a category.
        let category_id = (days_ago % 5 != 0).then_some(category_id);

        create_movement(
            Movement::build(MovementKind::Expense, Amount::new(amount)?)
                .category_id(category_id)
                .timestamp(timestamp),
            &conn,
        )?;
        count += 1;
    }

    let summary = get_summary(&conn)?;
    println!(
        "Created {count} movements: saved {:.2}, spent {:.2}, balance {:.2}",
        summary.total_saved, summary.total_spent, summary.balance
    );

    println!("Success!");

    Ok(())
}
