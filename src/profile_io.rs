//*** START FILE: src/profile_io.rs ***//
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::ProfileError;
use crate::profile::LearnerProfile;

/// Saves the learner profile to a JSON file.
pub fn save_profile_snapshot(profile: &LearnerProfile, file_path: &Path) -> Result<(), ProfileError> {
    let file = File::create(file_path).map_err(|source| ProfileError::Io {
        path: file_path.to_path_buf(),
        source,
    })?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, profile).map_err(|source| ProfileError::Json {
        path: file_path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %file_path.display(), "saved profile snapshot");
    Ok(())
}

/// Loads the learner profile from a JSON file.
pub fn load_profile_snapshot(file_path: &Path) -> Result<LearnerProfile, ProfileError> {
    if !file_path.exists() {
        return Err(ProfileError::NotFound(file_path.to_path_buf()));
    }

    let file = File::open(file_path).map_err(|source| ProfileError::Io {
        path: file_path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| ProfileError::Json {
        path: file_path.to_path_buf(),
        source,
    })
}

//*** END FILE: src/profile_io.rs ***//
