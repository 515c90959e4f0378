//! File summary tool: frames already-extracted file text for the model.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::Tool;

/// Pass-through formatter for uploaded file content.
///
/// The heavy lifting (PDF/DOCX decoding, truncation) happens at upload time
/// in the ingest module; this tool only wraps the resulting text so the
/// model can summarize it.
pub struct SummarizeFile;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SummaryArgs {
    content: String,
    #[serde(default)]
    file_name: Option<String>,
}

#[async_trait]
impl Tool for SummarizeFile {
    fn name(&self) -> &str {
        "summarize_file"
    }

    fn description(&self) -> &str {
        "Return the text of an uploaded file so it can be summarized. Pass the file content provided in the conversation."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "content": {
                    "type": "string",
                    "description": "The extracted text content of the file"
                },
                "file_name": {
                    "type": "string",
                    "description": "Original file name, if known"
                }
            },
            "required": ["content"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let SummaryArgs { content, file_name } = serde_json::from_value(args)
            .map_err(|e| anyhow::anyhow!("Invalid arguments: {}", e))?;

        match file_name {
            Some(name) => Ok(format!("File: {}\n\n{}", name, content)),
            None => Ok(content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn content_passes_through_unmodified() {
        let result = SummarizeFile
            .execute(json!({"content": "line one\nline two"}))
            .await
            .unwrap();
        assert_eq!(result, "line one\nline two");
    }

    #[tokio::test]
    async fn file_name_is_prepended_when_given() {
        let result = SummarizeFile
            .execute(json!({"content": "body", "file_name": "notes.txt"}))
            .await
            .unwrap();
        assert_eq!(result, "File: notes.txt\n\nbody");
    }
}
