//! Reading batch inputs and emitting records.

use std::error::Error;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};
use tweetshot_domain::{BinaryAttachment, ItemOutcome};

pub type CliResult<T> = Result<T, Box<dyn Error>>;

/// Parses input items from a JSON array, a single JSON object, or JSON lines.
pub fn parse_items(text: &str) -> CliResult<Vec<Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => return Ok(items),
        Ok(item @ Value::Object(_)) => return Ok(vec![item]),
        Ok(other) => return Err(format!("items must be JSON objects, got {other}").into()),
        Err(_) => {}
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(number, line)| {
            serde_json::from_str::<Value>(line)
                .map_err(|e| -> Box<dyn Error> {
                    format!("items line {}: {e}", number + 1).into()
                })
        })
        .collect()
}

/// Reads the items file.
pub async fn read_items(path: &Path) -> CliResult<Vec<Value>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("failed to read items file {}: {e}", path.display()))?;
    parse_items(&text)
}

/// Reads the parameters file, which must hold a JSON object.
pub async fn read_parameters(path: &Path) -> CliResult<Map<String, Value>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("failed to read params file {}: {e}", path.display()))?;
    match serde_json::from_str::<Value>(&text)? {
        Value::Object(parameters) => Ok(parameters),
        _ => Err(format!("params file {} must hold a JSON object", path.display()).into()),
    }
}

/// Writes a binary attachment, if any, and returns the record to print.
///
/// Attachment bytes are replaced by the path they were written to.
pub async fn emit(
    outcome: ItemOutcome,
    attachment_path: impl Fn(usize, &BinaryAttachment) -> PathBuf,
) -> CliResult<Value> {
    let mut item = match outcome {
        Ok(item) => item,
        Err(record) => return Ok(serde_json::to_value(record)?),
    };

    let Some(attachment) = item.binary.take() else {
        return Ok(serde_json::to_value(item)?);
    };

    let path = attachment_path(item.paired_item, &attachment);
    tokio::fs::write(&path, &attachment.data)
        .await
        .map_err(|e| format!("failed to write {}: {e}", path.display()))?;

    Ok(json!({
        "json": item.json,
        "binary": {
            "fileName": attachment.file_name,
            "mimeType": attachment.mime_type,
            "fileExtension": attachment.file_extension,
            "path": path.display().to_string(),
        },
        "pairedItem": item.paired_item,
    }))
}

/// Writes every attachment, then returns the records in item order.
///
/// Fails on the first write error without returning any record, so callers
/// never print a partial batch.
pub async fn emit_all(
    outcomes: Vec<ItemOutcome>,
    attachment_path: impl Fn(usize, &BinaryAttachment) -> PathBuf,
) -> CliResult<Vec<Value>> {
    let mut records = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        records.push(emit(outcome, &attachment_path).await?);
    }
    Ok(records)
}
