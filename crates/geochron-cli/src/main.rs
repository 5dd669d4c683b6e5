mod error;
mod script;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use geochron_core::{FtType, Rois};
use geochron_editor::{EditorConfig, ImageInfo, RegionEditor, SimpleCrs};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "geochron", version, about, long_about = None)]
struct Cli {
    /// Editor configuration file (YAML or JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// More log output on stderr (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the normalized regions of a ROI document as JSON
    Normalize {
        #[arg(value_name = "ROIS")]
        rois: PathBuf,
        #[arg(long, value_enum, default_value_t = FtTypeArg::Spontaneous)]
        ft_type: FtTypeArg,
    },
    /// Print the save fields of a ROI document
    Fields {
        #[arg(value_name = "ROIS")]
        rois: PathBuf,
        #[arg(long, value_enum, default_value_t = FtTypeArg::Spontaneous)]
        ft_type: FtTypeArg,
    },
    /// Replay a drag script against a ROI document and print the save fields
    Replay {
        #[arg(value_name = "ROIS")]
        rois: PathBuf,
        /// Drag script (YAML or JSON)
        #[arg(long, value_name = "FILE")]
        script: PathBuf,
        #[arg(long, value_enum, default_value_t = FtTypeArg::Spontaneous)]
        ft_type: FtTypeArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FtTypeArg {
    #[value(alias = "S")]
    Spontaneous,
    #[value(alias = "I")]
    Induced,
}

impl From<FtTypeArg> for FtType {
    fn from(arg: FtTypeArg) -> Self {
        match arg {
            FtTypeArg::Spontaneous => FtType::Spontaneous,
            FtTypeArg::Induced => FtType::Induced,
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => exit_with(&CliError::usage(err.to_string())),
            };
        }
    };
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            exit_with(&err)
        }
    }
}

fn exit_with(err: &CliError) -> ExitCode {
    ExitCode::from(err.exit_code() as u8)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Normalize { rois, ft_type } => {
            let editor = open_editor(&rois, ft_type.into(), config)?;
            let json = serde_json::to_string(editor.regions())
                .map_err(|e| CliError::processing(e.to_string()))?;
            println!("{json}");
        }
        Command::Fields { rois, ft_type } => {
            let mut editor = open_editor(&rois, ft_type.into(), config)?;
            print_fields(&mut editor)?;
        }
        Command::Replay {
            rois,
            script,
            ft_type,
        } => {
            let text = std::fs::read_to_string(&script)
                .with_context(|| format!("failed to read script {}", script.display()))?;
            let gestures = script::parse_script(&text)
                .with_context(|| format!("invalid drag script {}", script.display()))?;
            let mut editor = open_editor(&rois, ft_type.into(), config)?;
            let crs = SimpleCrs::new(editor.config().zoom);
            script::replay(&mut editor, &gestures, &crs)?;
            info!(gestures = gestures.len(), "script replayed");
            print_fields(&mut editor)?;
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EditorConfig> {
    let Some(path) = path else {
        return Ok(EditorConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        EditorConfig::from_json_str(&text)
    } else {
        EditorConfig::from_yaml_str(&text)
    };
    config.with_context(|| format!("invalid config {}", path.display()))
}

/// Load a ROI document and open an editing session on it.
fn open_editor(path: &Path, ft_type: FtType, config: EditorConfig) -> Result<RegionEditor, CliError> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read ROI document {}", path.display()))?;
    let rois = Rois::from_json_str(&text)
        .with_context(|| format!("invalid ROI document {}", path.display()))?;
    let regions = rois
        .region_set(ft_type)
        .with_context(|| format!("invalid ROI document {}", path.display()))?;
    info!(regions = regions.len(), ?ft_type, "loaded ROI document");

    let image = ImageInfo::try_from(&rois)
        .with_context(|| format!("invalid ROI document {}", path.display()))?;
    let mut editor = RegionEditor::new(regions, image, config);
    editor.begin_edit()?;
    Ok(editor)
}

fn print_fields(editor: &mut RegionEditor) -> Result<(), CliError> {
    for (name, value) in editor.save()? {
        println!("{name}={value}");
    }
    Ok(())
}
