use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::Path,
};

use tracing::instrument;

use super::DynamicDemandSetData;

/// Writes a demand set as a YAML document.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write<W: Write>(data: &DynamicDemandSetData, writer: &mut W) -> io::Result<()> {
    let yaml = serde_yaml::to_string(data).map_err(io::Error::other)?;
    writer.write_all(yaml.as_bytes())?;
    writer.flush()
}

/// Reads a demand set from a YAML document.
///
/// # Errors
///
/// Returns an error if the reader fails or the document is malformed.
pub fn read<R: Read>(reader: R) -> Result<DynamicDemandSetData, LoadError> {
    Ok(serde_yaml::from_reader(reader)?)
}

/// Loads a demand set document from a file.
///
/// # Errors
///
/// Returns [`LoadError::NotFound`] if there is no file at `path`, or another
/// [`LoadError`] if it cannot be read or parsed.
#[instrument(level = "debug")]
pub fn load(path: &Path) -> Result<DynamicDemandSetData, LoadError> {
    let file = File::open(path).map_err(|io_error| match io_error.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound,
        _ => LoadError::Io(io_error),
    })?;

    let data = read(BufReader::new(file))?;
    tracing::debug!("Loaded demand set {} from {}", data.id, path.display());
    Ok(data)
}

/// Saves a demand set document to a file.
///
/// Parent directories are created automatically if they don't exist.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
#[instrument(level = "debug", skip(data))]
pub fn save(data: &DynamicDemandSetData, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write(data, &mut writer)?;
    tracing::debug!("Saved demand set {} to {}", data.id, path.display());
    Ok(())
}

/// Errors that can occur when loading a demand set document.
#[derive(Debug, thiserror::Error)]
#[error("failed to read demand set document")]
pub enum LoadError {
    /// The document was not found.
    NotFound,
    /// An I/O error occurred.
    Io(#[from] io::Error),
    /// The YAML could not be parsed.
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::DemandProfile;

    fn sample() -> DynamicDemandSetData {
        DynamicDemandSetData {
            id: 4,
            name: Some("peak hour".to_string()),
            description: None,
            mod_stamp: Some("2013-06-01 08:00:00".to_string()),
            crud_flag: Some("UPDATE".to_string()),
            locked_for_edit: true,
            locked_for_history: false,
            app_run_id: 77,
            estimation_timestamp: Some(Utc.with_ymd_and_hms(2013, 6, 1, 8, 15, 0).unwrap()),
            profiles: Some(vec![
                DemandProfile::new(10).with_timing(0.0, 300.0).with_demand(vec![0.5, 0.75]),
                DemandProfile::new(11).with_destination(20),
            ]),
        }
    }

    #[test]
    fn save_then_load_preserves_document() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("set.yaml");

        save(&sample(), &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, sample());
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let error = load(&tmp.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(error, LoadError::NotFound));
    }

    #[test]
    fn read_malformed_yaml_is_yaml_error() {
        let error = read("_version: '1'\nid: [not, a, number]\n".as_bytes()).unwrap_err();
        assert!(matches!(error, LoadError::Yaml(_)));
    }

    #[test]
    fn unknown_crud_text_survives_storage() {
        let data = read("_version: '1'\nid: 1\ncrud_flag: MERGE\n".as_bytes()).unwrap();
        assert_eq!(data.crud_flag.as_deref(), Some("MERGE"));

        let mut buffer = Vec::new();
        write(&data, &mut buffer).unwrap();
        assert!(String::from_utf8(buffer).unwrap().contains("crud_flag: MERGE"));
    }
}
