//! Bulk certificate recipients from CSV.
//!
//! The expected file has a header row with a `name` column and a
//! `register_number` column; a `description` column is optional. Fields are
//! split on plain commas, quoting is not supported.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{PortalStoreError, PortalStoreResult};

/// One recipient row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkRecipient {
    /// 1-based row number, header excluded.
    pub id: usize,
    pub name: String,
    pub register_number: String,
    pub description: String,
    /// Issue date, `YYYY-MM-DD`.
    pub date: String,
}

/// Parses a recipient list.
pub fn parse_csv(csv: &str) -> PortalStoreResult<Vec<BulkRecipient>> {
    let rows: Vec<&str> = csv.lines().collect();
    if rows.len() <= 1 {
        return Err(PortalStoreError::Csv(
            "CSV file is empty or has only headers".to_string(),
        ));
    }

    let headers: Vec<String> = rows[0]
        .split(',')
        .map(|h| h.trim().to_lowercase())
        .collect();

    let name_index = headers
        .iter()
        .position(|h| h.contains("name"))
        .ok_or_else(|| {
            PortalStoreError::Csv("CSV must contain a 'name' column".to_string())
        })?;
    let register_number_index = headers
        .iter()
        .position(|h| h == "register_number")
        .ok_or_else(|| {
            PortalStoreError::Csv("CSV must contain a 'register_number' column".to_string())
        })?;
    let description_index = headers.iter().position(|h| h.contains("description"));

    let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();

    let recipients: Vec<BulkRecipient> = rows[1..]
        .iter()
        .filter(|row| !row.trim().is_empty())
        .enumerate()
        .map(|(idx, row)| {
            let columns: Vec<&str> = row.split(',').map(str::trim).collect();
            let column = |index: usize| columns.get(index).copied().unwrap_or_default();
            let id = idx + 1;

            let name = match column(name_index) {
                "" => format!("Recipient {id}"),
                name => name.to_string(),
            };

            BulkRecipient {
                id,
                name,
                register_number: column(register_number_index).to_string(),
                description: description_index.map(column).unwrap_or_default().to_string(),
                date: today.clone(),
            }
        })
        .collect();

    tracing::debug!(recipients = recipients.len(), "Parsed recipient CSV");
    Ok(recipients)
}

/// A small example file for faculty to start from.
pub fn sample_csv() -> String {
    let headers = ["name", "register_number", "description"];
    let rows = [
        ["John Doe", "SIST2022CS001", "Outstanding Achievement"],
        ["Jane Smith", "SIST2022CS002", "Excellence in Leadership"],
        ["Bob Johnson", "SIST2022CS003", "Exceptional Performance"],
    ];

    std::iter::once(headers.join(","))
        .chain(rows.iter().map(|row| row.join(",")))
        .collect::<Vec<_>>()
        .join("\n")
}
