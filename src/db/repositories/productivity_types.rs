use anyhow::Result;
use rusqlite::{params, Connection};

use crate::db::{
    models::ProductivityType,
    repositories::{ProcessRepository, WindowRepository},
    Database,
};

/// Outcome of tagging a process or window with a productivity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeAssignment {
    Updated,
    /// No process/window has the given id.
    NotFound,
    /// The label is not a row of `productivity_type`.
    UnknownType,
}

pub struct ProductivityTypeRepository<'a> {
    conn: &'a Connection,
}

impl<'a> ProductivityTypeRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn list(&self) -> Result<Vec<ProductivityType>> {
        let mut stmt = self
            .conn
            .prepare("SELECT type, color FROM productivity_type ORDER BY rowid ASC")?;

        let types = stmt
            .query_map([], |row| {
                Ok(ProductivityType {
                    type_str: row.get(0)?,
                    color: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(types)
    }

    pub fn exists(&self, type_str: &str) -> Result<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM productivity_type WHERE type = ?1)",
            params![type_str],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}

fn assignment(updated: usize) -> TypeAssignment {
    if updated == 0 {
        TypeAssignment::NotFound
    } else {
        TypeAssignment::Updated
    }
}

impl Database {
    pub async fn get_productivity_types(&self) -> Result<Vec<ProductivityType>> {
        self.execute(|conn| ProductivityTypeRepository::new(conn).list())
            .await
    }

    pub async fn set_process_type(&self, process_id: i64, type_str: &str) -> Result<TypeAssignment> {
        let type_str = type_str.to_string();
        self.execute(move |conn| {
            if !ProductivityTypeRepository::new(conn).exists(&type_str)? {
                return Ok(TypeAssignment::UnknownType);
            }
            let updated = ProcessRepository::new(conn).set_type(process_id, &type_str)?;
            Ok(assignment(updated))
        })
        .await
    }

    pub async fn set_window_type(&self, window_id: i64, type_str: &str) -> Result<TypeAssignment> {
        let type_str = type_str.to_string();
        self.execute(move |conn| {
            if !ProductivityTypeRepository::new(conn).exists(&type_str)? {
                return Ok(TypeAssignment::UnknownType);
            }
            let updated = WindowRepository::new(conn).set_type(window_id, &type_str)?;
            Ok(assignment(updated))
        })
        .await
    }
}
