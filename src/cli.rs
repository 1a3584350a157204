//! Minimal CLI: type description in → OpenAPI document out
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use crate::lower::Options;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Generates an OpenAPI spec from an xcresulttool format description
#[derive(Parser, Debug)]
#[command(version)]
pub struct CommandLineInterface {
    /// input .json file ('-' or omitted for stdin)
    infile: Option<PathBuf>,

    /// output .json file ('-' or omitted for stdout)
    outfile: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn new(infile: Option<PathBuf>, outfile: Option<PathBuf>) -> Self {
        Self { infile, outfile }
    }

    pub fn run(&self) -> Result<()> {
        let options = Options::default();

        let input: Box<dyn BufRead> = match stream_path(&self.infile) {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                Box::new(BufReader::new(file))
            }
            None => Box::new(std::io::stdin().lock()),
        };
        let source_name = stream_path(&self.infile)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<stdin>".to_string());

        // buffered so a failed run leaves no partial output behind
        let mut rendered = Vec::new();
        crate::transcode(input, &mut rendered, &options)
            .with_context(|| format!("failed to generate OpenAPI spec from {source_name}"))?;
        debug!("rendered {} bytes from {source_name}", rendered.len());

        match stream_path(&self.outfile) {
            Some(out) => {
                if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create {}", parent.display()))?;
                }
                let file = File::create(out)
                    .with_context(|| format!("failed to create {}", out.display()))?;
                let mut writer = BufWriter::new(file);
                writer
                    .write_all(&rendered)
                    .and_then(|()| writer.flush())
                    .with_context(|| format!("failed to write {}", out.display()))?;
                info!("wrote {}", out.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(&rendered)
                    .and_then(|()| stdout.flush())
                    .context("failed to write standard output")?;
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// `None` for the standard stream (argument omitted or `-`).
fn stream_path(arg: &Option<PathBuf>) -> Option<&Path> {
    arg.as_deref().filter(|p| p.as_os_str() != "-")
}
