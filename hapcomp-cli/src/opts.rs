use std::fmt::Display;
use std::fs::{self, File};
use std::io;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use log::info;

#[derive(clap::Args, Debug, Clone)]
pub struct Directory {
    path: PathBuf,
}

impl Display for Directory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

pub fn directory(path: &str) -> Result<Directory, String> {
    let result = Directory {
        path: PathBuf::from(path),
    };

    Ok(result)
}

impl Directory {
    /// Returns the directory path, creating the directory first if it does
    /// not exist yet.
    pub fn as_path_buf(&self) -> Result<PathBuf, anyhow::Error> {
        let path = Path::new(&self.path);
        fs::create_dir_all(path)
            .with_context(|| format!("Could not create directory `{}`", path.display()))?;

        Ok(path.to_path_buf())
    }
}

/// Validator for `yyyy-mm-dd` date arguments. The validated text is kept as a
/// string, since metadata rows are compared by their raw date strings.
pub fn iso_date(value: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("`{}` is not a yyyy-mm-dd date: {}", value, e))?;

    Ok(value.to_owned())
}

#[derive(Debug, Clone)]
pub struct InputFile {
    path: PathBuf,
}

impl Display for InputFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

pub fn input_file(path: &str) -> Result<InputFile, String> {
    let output_path = Path::new(path);
    let result = InputFile {
        path: output_path.to_path_buf(),
    };

    Ok(result)
}

impl InputFile {
    pub fn as_reader(&self) -> Result<InputReader, anyhow::Error> {
        InputReader::from_path(&self.path)
    }
}

pub fn input_stream(path: &str) -> Result<InputStream, String> {
    let output_path = Path::new(path);
    let result = InputStream {
        path: output_path.to_path_buf(),
    };

    Ok(result)
}

#[derive(Debug, Clone)]
pub struct InputStream {
    path: PathBuf,
}

impl Display for InputStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl Default for InputStream {
    fn default() -> Self {
        Self {
            path: PathBuf::from("-"),
        }
    }
}

impl InputStream {
    pub fn as_reader(&self) -> Result<InputReader, anyhow::Error> {
        InputReader::from_path(&self.path)
    }
}

#[derive(Debug)]
pub enum InputReader {
    Stdin(io::Stdin),
    File { file: File, path: PathBuf },
}

impl InputReader {
    fn from_path(path: &Path) -> anyhow::Result<Self> {
        let is_stdin = path.to_string_lossy() == "-";

        let val = if is_stdin {
            Self::Stdin(io::stdin())
        } else {
            let file = File::open(path)
                .with_context(|| format!("Could not open `{}`", path.display()))?;

            Self::File {
                file,
                path: path.to_owned(),
            }
        };
        Ok(val)
    }

    pub fn length(&self) -> anyhow::Result<Option<u64>> {
        let val = match self {
            InputReader::Stdin(_) => None,
            InputReader::File { file, .. } => Some(file.metadata()?.len()),
        };
        Ok(val)
    }

    pub fn file_path(&self) -> Option<&Path> {
        match self {
            InputReader::Stdin(_) => None,
            InputReader::File { path, .. } => Some(path),
        }
    }

    #[must_use]
    pub fn into_read(self) -> Box<dyn Read + Send> {
        match self {
            InputReader::Stdin(stdin) => Box::new(stdin),
            InputReader::File { file, .. } => Box::new(file),
        }
    }
}

impl Default for InputReader {
    fn default() -> Self {
        Self::Stdin(io::stdin())
    }
}

#[derive(Debug)]
pub enum OutputWriter {
    Stdout(io::Stdout),
    File(File),
}

impl OutputWriter {
    pub fn from_path_and_input(
        output: &Option<PathBuf>,
        input: &InputReader,
        new_extension: &str,
    ) -> anyhow::Result<Self> {
        if let Some(path) = output {
            Self::from_path(path)
        } else {
            let path = input
                .file_path()
                .map(|path| path.with_extension(new_extension))
                .unwrap_or_else(|| PathBuf::from("-"));

            Self::from_path(&path)
        }
    }

    fn from_path(path: &Path) -> anyhow::Result<Self> {
        info!("Output file: {}", path.display());

        let is_stdout = path.to_string_lossy() == "-";

        let writer = if is_stdout {
            Self::Stdout(io::stdout())
        } else {
            let file = File::create(path)
                .with_context(|| format!("Could not create `{}`", path.display()))?;
            Self::File(file)
        };

        Ok(writer)
    }

    pub fn into_write(self) -> Box<dyn Write + Send> {
        match self {
            OutputWriter::Stdout(stdout) => Box::new(stdout),
            OutputWriter::File(file) => Box::new(file),
        }
    }
}

/// Output artifacts staged in memory and committed to disk in one pass.
///
/// A run either computes every artifact and then writes them all, or fails
/// before the first byte reaches disk, so a crash mid-computation cannot
/// leave a consistent-looking partial output set behind.
#[derive(Debug, Default)]
pub struct StagedOutputs {
    outputs: Vec<(PathBuf, Vec<u8>)>,
}

impl StagedOutputs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&mut self, path: &Path, bytes: Vec<u8>) {
        self.outputs.push((path.to_owned(), bytes));
    }

    pub fn commit(self) -> anyhow::Result<()> {
        for (path, bytes) in &self.outputs {
            info!("Output file: {}", path.display());
            fs::write(path, bytes)
                .with_context(|| format!("Could not write `{}`", path.display()))?;
        }

        Ok(())
    }
}
