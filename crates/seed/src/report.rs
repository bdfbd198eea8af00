//! Console report for a seed run.

use std::io::Write;

use serde::Serialize;
use users::{AppError, User};

use crate::config::OutputFormat;

#[derive(Serialize)]
struct InsertedLine {
    inserted_count: u64,
}

#[derive(Serialize)]
struct UsersLine<'a> {
    users: &'a [User],
}

/// Writes the number of rows the batch insert created.
pub fn write_inserted(
    out: &mut impl Write,
    format: OutputFormat,
    count: u64,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Text => writeln!(out, "Inserted count: {count}")?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &InsertedLine {
                inserted_count: count,
            })
            .map_err(std::io::Error::from)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Writes every fetched user, one per line in text mode.
pub fn write_users(
    out: &mut impl Write,
    format: OutputFormat,
    users: &[User],
) -> Result<(), AppError> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "All users ({}):", users.len())?;
            for user in users {
                writeln!(out, "  [{}] {} <{}>", user.id, user.name, user.email)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &UsersLine { users })
                .map_err(std::io::Error::from)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
