//! Scoped output handle for the rendered document.
//!
//! A [`ChartOutput`] owns the open file for the duration of one render. The
//! file is created on [`ChartOutput::create`], flushed by
//! [`ChartOutput::finish`], and closed when the handle drops on any path.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::RenderError;

#[derive(Debug)]
pub struct ChartOutput {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl ChartOutput {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| RenderError::Create {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn write_document(&mut self, document: &str) -> Result<(), RenderError> {
        self.writer
            .write_all(document.as_bytes())
            .map_err(|source| RenderError::Write {
                path: self.path.clone(),
                source,
            })
    }

    /// Flush buffered output and release the file, returning its path.
    pub fn finish(mut self) -> Result<PathBuf, RenderError> {
        self.writer.flush().map_err(|source| RenderError::Write {
            path: self.path.clone(),
            source,
        })?;
        Ok(self.path)
    }
}
