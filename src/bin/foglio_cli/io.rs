#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use foglio::client::ImageUpload;
use foglio::domain::tags;

use crate::context::CliError;

pub fn read_value(val: Option<String>, file: Option<PathBuf>) -> Result<String, CliError> {
    if let Some(path) = file {
        let data = fs::read_to_string(&path).map_err(|source| CliError::InputFile {
            path: path.display().to_string(),
            source,
        })?;
        Ok(data)
    } else if let Some(v) = val {
        Ok(v)
    } else {
        Err(CliError::InvalidInput(
            "value required (pass --content or --content-file)".into(),
        ))
    }
}

pub fn parse_tags(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(csv) => tags::normalize(csv.split(',')),
        None => Vec::new(),
    }
}

pub fn read_upload(path: &Path) -> Result<ImageUpload, CliError> {
    let bytes = fs::read(path).map_err(|source| CliError::InputFile {
        path: path.display().to_string(),
        source,
    })?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(ImageUpload {
        filename,
        bytes: Bytes::from(bytes),
    })
}
