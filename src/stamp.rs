//! Build identifier stamping.
//!
//! `theu stamp` and `theu finish` run as separate processes around the
//! bundler. The identifier travels between them through
//! `<scratch>/build-id`, and the scratch directory is removed once the
//! build has finished. The first `finish` also keeps a copy of the bundler
//! template there, since generating the root page overwrites the original.

use crate::core::BuildError;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const BUILD_ID_FILE: &str = "build-id";
const TEMPLATE_FILE: &str = "template.html";

/// Opaque per-build token, a v4 UUID in hyphenated lowercase form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildId(String);

impl BuildId {
    fn generate() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Path of the build id file inside `scratch_dir`.
pub fn build_id_path(scratch_dir: &Path) -> PathBuf {
    scratch_dir.join(BUILD_ID_FILE)
}

/// Path of the kept template copy inside `scratch_dir`.
pub fn template_copy_path(scratch_dir: &Path) -> PathBuf {
    scratch_dir.join(TEMPLATE_FILE)
}

/// Replace the scratch directory and persist a fresh build id in it.
pub fn generate_build_id(scratch_dir: &Path) -> Result<BuildId, BuildError> {
    remove_scratch(scratch_dir)?;
    fs::create_dir_all(scratch_dir)
        .map_err(|err| BuildError::CreateDir(scratch_dir.to_path_buf(), err))?;

    let id = BuildId::generate();
    let path = build_id_path(scratch_dir);
    fs::write(&path, id.as_str()).map_err(|err| BuildError::Write(path, err))?;

    Ok(id)
}

/// Read the build id persisted by [`generate_build_id`].
pub fn read_build_id(scratch_dir: &Path) -> Result<BuildId, BuildError> {
    let path = build_id_path(scratch_dir);

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(BuildError::BuildIdMissing { path });
        }
        Err(err) => return Err(BuildError::Read(path, err)),
    };

    let id = content.trim();
    if id.is_empty() {
        return Err(BuildError::BuildIdInvalid { path });
    }

    Ok(BuildId(id.to_string()))
}

/// Delete the scratch directory. An absent directory is not an error.
pub fn remove_scratch(scratch_dir: &Path) -> Result<(), BuildError> {
    match fs::remove_dir_all(scratch_dir) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(BuildError::Remove(scratch_dir.to_path_buf(), err)),
    }
}
