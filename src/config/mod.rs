pub mod file;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand, ValueEnum};
use file::FileConfig;
use std::path::{Path, PathBuf};

const DEFAULT_API_BASE: &str = "http://localhost:5000";
const DEFAULT_OUTPUT_PATH: &str = "./downloads";

#[derive(Debug, Parser)]
#[command(name = "tablecast")]
#[command(about = "Preview JSON/XML files and fetch tabular conversions from the converter service")]
pub struct Cli {
    /// Optional TOML config file; flags override its values
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the converter service
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Directory downloaded artifacts are saved to
    #[arg(long, global = true)]
    pub output_path: Option<String>,

    /// Directory holding the session token and the stored conversion result
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the first records of a JSON or XML file
    Preview { file: PathBuf },
    /// Upload a file for conversion and store the outcome
    Convert { file: PathBuf },
    /// Show the stored conversion outcome
    Result,
    /// Download converted artifacts
    Download {
        #[arg(value_enum, default_value_t = ArtifactKind::Both)]
        artifact: ArtifactKind,
    },
    /// Store a session token obtained from the service
    Login { token: String },
    /// Clear the session token and the stored conversion result
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ArtifactKind {
    Csv,
    Excel,
    Both,
}

/// Effective configuration after merging defaults, the optional TOML file
/// and CLI flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base: String,
    pub output_path: String,
    pub state_dir: PathBuf,
}

impl Settings {
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let file_config = match &cli.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };
        let service = file_config.service.unwrap_or_default();
        let storage = file_config.storage.unwrap_or_default();

        let api_base = cli
            .api_base
            .clone()
            .or(service.api_base)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let output_path = cli
            .output_path
            .clone()
            .or(storage.output_path)
            .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());
        let state_dir = cli
            .state_dir
            .clone()
            .or(storage.state_dir)
            .unwrap_or_else(default_state_dir);

        Ok(Self {
            api_base,
            output_path,
            state_dir,
        })
    }
}

fn default_state_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("tablecast"))
        .unwrap_or_else(|| PathBuf::from(".tablecast"))
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_base", &self.api_base)?;
        validation::validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn state_dir(&self) -> &Path {
        &self.state_dir
    }
}
