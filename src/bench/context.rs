//! Build-context preparation for stress build jobs

use crate::client::{BuildOptions, DaemonClient};
use crate::core::{Result, StressError};
use std::fs;

/// Path of the build script inside the context archive.
pub const DOCKERFILE_NAME: &str = "Dockerfile";

/// Synthesize the minimal build context for build job `index`.
///
/// The context is a tar archive holding a single Dockerfile whose one
/// instruction creates an empty `data-<index>` marker file.
pub fn build_context(index: usize) -> Result<Vec<u8>> {
    let dir = tempfile::tempdir()?;

    let dockerfile = format!("FROM scratch\nRUN touch data-{}\n", index);
    fs::write(dir.path().join(DOCKERFILE_NAME), dockerfile)?;

    let mut builder = tar::Builder::new(Vec::new());
    builder.append_dir_all(".", dir.path())?;
    let archive = builder.into_inner()?;
    Ok(archive)
}

/// Prepare the context for build job `index` and submit it to the daemon.
///
/// The image is tagged `stress-build-<index>` with daemon output suppressed.
/// Any context, archival, or build error propagates as the job's failure.
pub fn build_image(client: &dyn DaemonClient, index: usize) -> Result<()> {
    let context = build_context(index)?;

    let reference = format!("stress-build-{}", index);
    let options = BuildOptions {
        suppress_output: true,
        dockerfile: DOCKERFILE_NAME.to_string(),
        tags: vec![reference.clone()],
    };

    client
        .build_image(context, &options)
        .map_err(|e| StressError::build(reference, e.to_string()))
}
