//! Renderer backed by an external command.
//!
//! The render request is written to a temporary JSON file whose path is
//! passed as the command's last argument. The command must write the raster
//! to the request's `output` path. Program and arguments are passed to the
//! process as given, without shell splitting or quoting.

use std::io::Write;
use std::process::Command;

use poster_common::{PosterError, PosterResult};
use poster_core::{RenderRequest, Renderer};
use tracing::{debug, info};

/// Runs `program args... <request.json>` for every render.
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    program: String,
    args: Vec<String>,
}

impl CommandRenderer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> PosterResult<Self> {
        let program = program.into();
        if program.trim().is_empty() {
            return Err(PosterError::Config("renderer command is empty".to_string()));
        }
        Ok(Self { program, args })
    }
}

impl Renderer for CommandRenderer {
    fn render(&self, request: &RenderRequest) -> PosterResult<()> {
        let mut spec = tempfile::Builder::new()
            .prefix("poster-request-")
            .suffix(".json")
            .tempfile()?;
        serde_json::to_writer(spec.as_file_mut(), request)?;
        spec.as_file_mut().flush()?;

        debug!(
            program = %self.program,
            request = %spec.path().display(),
            "Invoking renderer"
        );
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(spec.path())
            .output()
            .map_err(|e| PosterError::Render(format!("cannot run '{}': {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PosterError::Render(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        if !request.output.exists() {
            return Err(PosterError::Render(format!(
                "'{}' did not write {}",
                self.program,
                request.output.display()
            )));
        }

        info!(output = %request.output.display(), "Renderer finished");
        Ok(())
    }
}
