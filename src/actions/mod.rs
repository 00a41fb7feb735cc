//! Command handlers.
//!
//! Every handler receives the authenticated client from the caller and
//! returns errors to it instead of printing them.

use crate::{
    error::CliError,
    format::{Formattable, OutputFormat},
    model::{FeedColumn, FeedResponse},
};

pub mod feeds;
pub mod notify;
pub mod targets;

/// Render a result set. Text output lists one column, one value per line;
/// `None` means there is nothing to print.
pub fn render_hits(
    response: &FeedResponse,
    format: &OutputFormat,
    column: FeedColumn,
) -> Result<Option<String>, CliError> {
    match format {
        OutputFormat::Text(_) => {
            let values = response.column(column);
            if values.is_empty() {
                Ok(None)
            } else {
                Ok(Some(values.join("\n")))
            }
        }
        _ => Ok(Some(response.format(format)?.trim_end_matches('\n').to_string())),
    }
}

pub(crate) fn print_hits(
    response: &FeedResponse,
    format: &OutputFormat,
    column: FeedColumn,
) -> Result<(), CliError> {
    if let Some(output) = render_hits(response, format, column)? {
        println!("{}", output);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::OutputFormatOptions;
    use crate::model::FeedRecord;

    fn response() -> FeedResponse {
        FeedResponse {
            hits: vec![
                FeedRecord {
                    host: Some("a.example.com".to_string()),
                    value: Some("22".to_string()),
                    ..Default::default()
                },
                FeedRecord {
                    host: Some("b.example.com".to_string()),
                    value: Some("443".to_string()),
                    ..Default::default()
                },
            ],
        }
    }

    #[test]
    fn test_text_lists_selected_column() {
        let format = OutputFormat::Text(OutputFormatOptions::default());

        let hosts = render_hits(&response(), &format, FeedColumn::Host).unwrap();
        assert_eq!(hosts.as_deref(), Some("a.example.com\nb.example.com"));

        let values = render_hits(&response(), &format, FeedColumn::Value).unwrap();
        assert_eq!(values.as_deref(), Some("22\n443"));
    }

    #[test]
    fn test_text_keeps_one_line_per_hit() {
        let mut response = response();
        response.hits[0].value = None;
        let format = OutputFormat::default();

        let values = render_hits(&response, &format, FeedColumn::Value).unwrap();
        assert_eq!(values.as_deref(), Some("\n443"));
    }

    #[test]
    fn test_text_prints_nothing_for_empty_result() {
        let format = OutputFormat::default();
        let output = render_hits(&FeedResponse::default(), &format, FeedColumn::Host).unwrap();
        assert_eq!(output, None);
    }

    #[test]
    fn test_json_renders_whole_records() {
        let format = OutputFormat::Json(OutputFormatOptions::default());
        let output = render_hits(&response(), &format, FeedColumn::Host)
            .unwrap()
            .unwrap();
        assert!(output.contains("\"value\":\"443\""));
    }
}
