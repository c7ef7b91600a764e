//! Suppression repository: keyed CRUD over the `suppressions` table.

use supp_core::entities::Suppression;

use crate::SuppDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, get_string};

const COLUMNS: &str = "id, ser_id, finding_title, finding_type, product_name, ser_link, due_date, \
     description, account_exception, account_inclusion, from_severity, to_severity, \
     resource_type, resource_pattern, extra_resource_pattern";

fn row_to_suppression(row: &libsql::Row) -> Result<Suppression, DatabaseError> {
    Ok(Suppression {
        id: get_string(row, 0)?,
        ser_id: get_string(row, 1)?,
        finding_title: get_opt_string(row, 2)?,
        finding_type: get_opt_string(row, 3)?,
        product_name: get_opt_string(row, 4)?,
        ser_link: get_opt_string(row, 5)?,
        due_date: get_opt_string(row, 6)?,
        description: get_opt_string(row, 7)?,
        account_exception: get_opt_string(row, 8)?,
        account_inclusion: get_opt_string(row, 9)?,
        from_severity: get_opt_string(row, 10)?,
        to_severity: get_opt_string(row, 11)?,
        resource_type: get_opt_string(row, 12)?,
        resource_pattern: get_opt_string(row, 13)?,
        extra_resource_pattern: get_opt_string(row, 14)?,
    })
}

fn non_key_params(record: &Suppression) -> [Option<&str>; 13] {
    [
        record.finding_title.as_deref(),
        record.finding_type.as_deref(),
        record.product_name.as_deref(),
        record.ser_link.as_deref(),
        record.due_date.as_deref(),
        record.description.as_deref(),
        record.account_exception.as_deref(),
        record.account_inclusion.as_deref(),
        record.from_severity.as_deref(),
        record.to_severity.as_deref(),
        record.resource_type.as_deref(),
        record.resource_pattern.as_deref(),
        record.extra_resource_pattern.as_deref(),
    ]
}

fn params_with_key(record: &Suppression) -> Vec<libsql::Value> {
    let mut params: Vec<libsql::Value> = vec![record.id.as_str().into(), record.ser_id.as_str().into()];
    params.extend(non_key_params(record).into_iter().map(libsql::Value::from));
    params
}

impl SuppDb {
    /// Fetch one record, or `None` if the key is unknown.
    pub async fn get_suppression(
        &self,
        id: &str,
        ser_id: &str,
    ) -> Result<Option<Suppression>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {COLUMNS} FROM suppressions WHERE id = ?1 AND ser_id = ?2"),
                [id, ser_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_suppression(&row)?)),
            None => Ok(None),
        }
    }

    /// All records, ordered by `id` then `ser_id`.
    pub async fn list_suppressions(&self) -> Result<Vec<Suppression>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {COLUMNS} FROM suppressions ORDER BY id, ser_id"),
                (),
            )
            .await?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(row_to_suppression(&row)?);
        }
        Ok(records)
    }

    /// Insert a new record.
    ///
    /// Returns `AlreadyExists` if the key is taken.
    pub async fn insert_suppression(&self, record: &Suppression) -> Result<(), DatabaseError> {
        let affected = self
            .conn()
            .execute(
                &format!(
                    "INSERT OR IGNORE INTO suppressions ({COLUMNS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)"
                ),
                params_with_key(record),
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::AlreadyExists {
                id: record.id.clone(),
                ser_id: record.ser_id.clone(),
            });
        }
        tracing::debug!(id = %record.id, ser_id = %record.ser_id, "suppression inserted");
        Ok(())
    }

    /// Replace every non-key column of an existing record.
    ///
    /// Returns `NotFound` if the key is unknown.
    pub async fn update_suppression(&self, record: &Suppression) -> Result<(), DatabaseError> {
        let affected = self
            .conn()
            .execute(
                "UPDATE suppressions SET
                    finding_title = ?3, finding_type = ?4, product_name = ?5, ser_link = ?6,
                    due_date = ?7, description = ?8, account_exception = ?9,
                    account_inclusion = ?10, from_severity = ?11, to_severity = ?12,
                    resource_type = ?13, resource_pattern = ?14, extra_resource_pattern = ?15
                 WHERE id = ?1 AND ser_id = ?2",
                params_with_key(record),
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NotFound {
                id: record.id.clone(),
                ser_id: record.ser_id.clone(),
            });
        }
        tracing::debug!(id = %record.id, ser_id = %record.ser_id, "suppression updated");
        Ok(())
    }

    /// Delete a record.
    ///
    /// Returns `NotFound` if the key is unknown.
    pub async fn delete_suppression(&self, id: &str, ser_id: &str) -> Result<(), DatabaseError> {
        let affected = self
            .conn()
            .execute(
                "DELETE FROM suppressions WHERE id = ?1 AND ser_id = ?2",
                [id, ser_id],
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NotFound {
                id: id.to_owned(),
                ser_id: ser_id.to_owned(),
            });
        }
        tracing::debug!(id, ser_id, "suppression deleted");
        Ok(())
    }
}
