// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded schema migrations, applied on every open.

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Apply pending migrations. Refinery records progress in `refinery_schema_history`.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), refinery::Error> {
    embedded::migrations::runner().run(conn)?;
    Ok(())
}
