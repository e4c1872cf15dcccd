use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("error reading {0}: {1}")]
    ReadFile(PathBuf, io::Error),
    #[error("error writing {0}: {1}")]
    WriteFile(PathBuf, io::Error),
    #[error("error compiling regex {0:?}: {1}")]
    Compile(String, regexfsm::error::PipelineError),
    #[error("unrecognized character {0:?} in --alphabet")]
    BadAlphabet(char),
}
