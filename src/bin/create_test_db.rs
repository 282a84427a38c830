use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use expense_tracker_rs::{
    Email, NewExpense, PasswordHash, ValidatedPassword, create_expense, create_user,
    initialize_db,
};

/// A utility for creating a test database for the REST API server of expense_tracker_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
///
/// The test user logs in with the email "test@example.com" and the password "test".
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

    println!("Creating test user...");

    let password_hash = PasswordHash::new(
        ValidatedPassword::new_unchecked("test"),
        PasswordHash::DEFAULT_COST,
    )?;
    let user = create_user(
        "Test User",
        Email::new("test@example.com")?,
        password_hash,
        &conn,
    )?;

    println!("Creating test expenses...");

    let today = OffsetDateTime::now_utc().date();
    let expenses = [
        ("Groceries", 84.2, "Food", 2),
        ("Bus pass", 45.0, "Travel", 9),
        ("Power bill", 132.75, "Bills", 20),
        ("Running shoes", 149.99, "Shopping", 41),
        ("Flights", 420.0, "Travel", 75),
        ("Coffee", 5.5, "Food", 130),
    ];

    for (title, amount, category, days_ago) in expenses {
        let new_expense = NewExpense::new(today - Duration::days(days_ago))
            .title(title)
            .amount(amount)
            .category(category);
        create_expense(user.id, new_expense, &conn)?;
    }

    println!("Success!");

    Ok(())
}
