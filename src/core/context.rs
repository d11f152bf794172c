//! Per-build state shared by the `finish` steps.

use crate::config::Config;
use crate::debug;
use crate::core::BuildError;
use crate::page::MetadataTable;
use crate::stamp::{BuildId, read_build_id, template_copy_path};
use std::fs;
use std::io;
use std::path::Path;

/// Everything page generation needs, loaded once and passed by reference.
pub struct BuildContext<'a> {
    pub config: &'a Config,
    pub build_id: BuildId,
    /// Bundler-emitted template, never modified.
    pub template: String,
    pub metadata: MetadataTable,
}

impl<'a> BuildContext<'a> {
    pub fn new(
        config: &'a Config,
        build_id: BuildId,
        template: String,
        metadata: MetadataTable,
    ) -> Self {
        Self {
            config,
            build_id,
            template,
            metadata,
        }
    }

    /// Read build id, template and metadata table concurrently.
    ///
    /// The template comes from the scratch copy when one exists, so a rerun
    /// after a failed `finish` still sees the unrendered template.
    ///
    /// All three reads finish before an error is reported; the build id
    /// error wins, then the template's.
    pub fn load(config: &'a Config) -> Result<Self, BuildError> {
        let build = &config.build;
        let template_path = build.template_path();

        let (build_id, (template, metadata)) = rayon::join(
            || read_build_id(&build.scratch),
            || {
                rayon::join(
                    || load_template(&build.scratch, &template_path),
                    || MetadataTable::load(&build.metadata),
                )
            },
        );

        let (build_id, template, metadata) = (build_id?, template?, metadata?);
        debug!("finish"; "build {build_id}, {} metadata entries", metadata.len());
        Ok(Self::new(config, build_id, template, metadata))
    }
}

/// Read the template, keeping a copy in scratch on first read.
fn load_template(scratch: &Path, template_path: &Path) -> Result<String, BuildError> {
    let kept = template_copy_path(scratch);
    match fs::read_to_string(&kept) {
        Ok(template) => return Ok(template),
        Err(err) if err.kind() != io::ErrorKind::NotFound => {
            return Err(BuildError::Read(kept, err));
        }
        Err(_) => {}
    }

    let template = read_input(template_path)?;
    // Without scratch the build id read fails and reports it
    if scratch.is_dir() {
        fs::write(&kept, &template).map_err(|err| BuildError::Write(kept, err))?;
    }
    Ok(template)
}

/// Read a required input file.
pub fn read_input(path: &Path) -> Result<String, BuildError> {
    fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => BuildError::InputMissing {
            path: path.to_path_buf(),
        },
        _ => BuildError::Read(path.to_path_buf(), err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stamp::generate_build_id;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.build.output = dir.path().join("dist");
        config.build.scratch = dir.path().join(".tmp");
        config.build.metadata = dir.path().join("metadata.json");
        config
    }

    #[test]
    fn test_load_all_inputs() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        fs::create_dir_all(&config.build.output).unwrap();
        fs::write(config.build.template_path(), "<title></title>").unwrap();
        fs::write(&config.build.metadata, r#"{"home": {}}"#).unwrap();
        let id = generate_build_id(&config.build.scratch).unwrap();

        let ctx = BuildContext::load(&config).unwrap();
        assert_eq!(ctx.build_id, id);
        assert_eq!(ctx.template, "<title></title>");
        assert_eq!(ctx.metadata.len(), 1);
    }

    #[test]
    fn test_load_prefers_kept_template() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        fs::create_dir_all(&config.build.output).unwrap();
        fs::write(config.build.template_path(), "<title></title>").unwrap();
        fs::write(&config.build.metadata, "{}").unwrap();
        generate_build_id(&config.build.scratch).unwrap();

        BuildContext::load(&config).unwrap();
        assert!(template_copy_path(&config.build.scratch).exists());

        // Root page rendered over the original
        fs::write(config.build.template_path(), "<title>Home</title>").unwrap();
        let ctx = BuildContext::load(&config).unwrap();
        assert_eq!(ctx.template, "<title></title>");

        // A new stamp drops the copy
        generate_build_id(&config.build.scratch).unwrap();
        let ctx = BuildContext::load(&config).unwrap();
        assert_eq!(ctx.template, "<title>Home</title>");
    }

    #[test]
    fn test_load_without_stamp() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        let err = BuildContext::load(&config).err().unwrap();
        assert!(matches!(err, BuildError::BuildIdMissing { .. }));
    }

    #[test]
    fn test_load_missing_template() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        fs::write(&config.build.metadata, "{}").unwrap();
        generate_build_id(&config.build.scratch).unwrap();

        let err = BuildContext::load(&config).err().unwrap();
        assert!(
            matches!(err, BuildError::InputMissing { ref path } if path.ends_with("dist/index.html"))
        );
    }
}
