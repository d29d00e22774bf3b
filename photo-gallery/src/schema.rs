use rusqlite::{Connection, Result};

/// Initialize the local storage schema used for persisted client state
pub fn init_storage_schema(conn: &Connection) -> Result<()> {
    // Schema version table for local storage
    conn.execute(
        "CREATE TABLE IF NOT EXISTS storage_schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    let current_version: i32 = conn
        .query_row(
            "SELECT version FROM storage_schema_version ORDER BY version DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    if current_version < 1 {
        create_storage_schema_v1(conn)?;
        conn.execute("INSERT INTO storage_schema_version (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Create storage schema version 1
fn create_storage_schema_v1(conn: &Connection) -> Result<()> {
    // Table: key_value_store - opaque values under fixed keys, no expiry metadata
    conn.execute(
        "CREATE TABLE IF NOT EXISTS key_value_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_repeatable() {
        let conn = Connection::open_in_memory().unwrap();
        init_storage_schema(&conn).unwrap();
        init_storage_schema(&conn).unwrap();

        let versions: i32 = conn
            .query_row("SELECT COUNT(*) FROM storage_schema_version", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(versions, 1);
    }
}
