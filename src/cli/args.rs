//! Argument processing and validation for CLI commands
//!
//! Turns `key=value` personalisation and `key=path` attachment arguments into
//! request values before handlers see them.

use super::commands::SendOptions;
use anyhow::{Context, Result};
use notifications_client::{Personalisation, Upload};
use std::path::Path;

/// Split a `key=value` argument at the first `=`.
pub fn parse_key_value(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .with_context(|| format!("Expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        anyhow::bail!("Personalisation key cannot be empty in '{raw}'");
    }
    Ok((key.to_string(), value.to_string()))
}

/// Build personalisation from plain values.
pub fn personalisation_from_pairs(pairs: &[String]) -> Result<Personalisation> {
    let mut personalisation = Personalisation::new();
    for raw in pairs {
        let (key, value) = parse_key_value(raw)?;
        personalisation.insert(key, value);
    }
    Ok(personalisation)
}

/// Build personalisation from plain values plus file attachments.
///
/// Each attachment is read and encoded here, so an unreadable file fails
/// before any request is made.
pub fn personalisation_from_options(options: &SendOptions) -> Result<Personalisation> {
    let mut personalisation = personalisation_from_pairs(&options.personalisation)?;
    for raw in &options.attachments {
        let (key, path) = parse_key_value(raw)?;
        let path = Path::new(&path);
        let mut upload = Upload::from_path(path)
            .with_context(|| format!("Failed to attach '{}'", path.display()))?;
        if let Some(filename) = path.file_name().and_then(|name| name.to_str()) {
            upload = upload.filename(filename);
        }
        if options.confirm_email_before_download {
            upload = upload.confirm_email_before_download(true);
        }
        if let Some(period) = &options.retention_period {
            upload = upload.retention_period(period.clone());
        }
        personalisation.insert(key, upload);
    }
    Ok(personalisation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notifications_client::PersonalisationValue;
    use serde_json::json;

    fn options(personalisation: &[&str], attachments: &[String]) -> SendOptions {
        SendOptions {
            personalisation: personalisation.iter().map(|s| s.to_string()).collect(),
            attachments: attachments.to_vec(),
            confirm_email_before_download: false,
            retention_period: None,
            reference: None,
        }
    }

    #[test]
    fn test_parse_key_value_splits_on_first_equals() {
        assert_eq!(
            parse_key_value("url=https://x/?a=b").unwrap(),
            ("url".to_string(), "https://x/?a=b".to_string())
        );
        assert_eq!(
            parse_key_value("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
    }

    #[test]
    fn test_parse_key_value_rejects_bad_input() {
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=value").is_err());
    }

    #[test]
    fn test_attachment_is_encoded_with_filename() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        std::fs::write(&path, b"file-contents").unwrap();

        let personalisation = personalisation_from_options(&options(
            &["name=chris"],
            &[format!("doc={}", path.display())],
        ))
        .unwrap();

        assert_eq!(
            serde_json::to_value(&personalisation).unwrap(),
            json!({
                "name": "chris",
                "doc": {
                    "file": "ZmlsZS1jb250ZW50cw==",
                    "filename": "report.csv",
                    "confirm_email_before_download": null,
                    "retention_period": null,
                }
            })
        );
        assert!(matches!(
            personalisation.get("doc"),
            Some(PersonalisationValue::Upload(_))
        ));
    }

    #[test]
    fn test_missing_attachment_fails() {
        let result = personalisation_from_options(&options(&[], &["doc=/no/such/file".to_string()]));
        assert!(result.is_err());
    }
}
