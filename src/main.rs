//! `speechsvr-config` — inspect and edit speech server config files.
//!
//! # Usage
//!
//! ```text
//! speechsvr-config recognizer init
//! speechsvr-config dialogue --resource-dir Speech add-model menu "Menu" menu.json --language en_US
//! speechsvr-config biometrics -c ./lunasvr.cfg.toml show --format json
//! speechsvr-config recognizer remove-model en_US-16
//! ```
//!
//! Without `--config` the file lives in the platform config directory
//! (see [`ConfigPaths`]).

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use speechsvr_config::{
    biometrics::BiometricsConfig,
    config::{ConfigPaths, ModelRegistry, Service, TomlConfig},
    dialogue::{DialogueConfig, PathConfiguration},
    recognizer::RecognizerConfig,
};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ServiceArg {
    Recognizer,
    Dialogue,
    Biometrics,
}

impl From<ServiceArg> for Service {
    fn from(arg: ServiceArg) -> Self {
        match arg {
            ServiceArg::Recognizer => Service::Recognizer,
            ServiceArg::Dialogue => Service::Dialogue,
            ServiceArg::Biometrics => Service::Biometrics,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    #[default]
    Toml,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "speechsvr-config", about = "Edit speech server config files")]
struct Cli {
    /// Which server's config to work on.
    #[arg(value_enum)]
    service: ServiceArg,

    /// Config file path. Defaults to the platform config directory.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    layout: LayoutArgs,

    #[command(subcommand)]
    cmd: Command,
}

/// Resource layout for the dialogue server. Ignored by the other services.
#[derive(Debug, Args)]
struct LayoutArgs {
    /// Resource root under the document directory.
    #[arg(long, global = true)]
    resource_dir: Option<String>,

    /// License subdirectory of the resource root.
    #[arg(long, global = true)]
    license_dir: Option<String>,

    /// Models subdirectory of the resource root.
    #[arg(long, global = true)]
    models_dir: Option<String>,

    /// Use this directory instead of the platform document directory.
    #[arg(long, global = true)]
    document_root: Option<PathBuf>,
}

impl LayoutArgs {
    fn is_set(&self) -> bool {
        self.resource_dir.is_some() || self.license_dir.is_some() || self.models_dir.is_some()
    }

    fn path_configuration(&self) -> PathConfiguration {
        let defaults = PathConfiguration::default();
        PathConfiguration::new(
            self.resource_dir.clone().unwrap_or(defaults.resource_directory),
            self.license_dir.clone().unwrap_or(defaults.license_directory),
            self.models_dir.clone().unwrap_or(defaults.models_directory),
        )
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a config with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print the config.
    Show {
        #[arg(long, value_enum, default_value_t)]
        format: Format,
    },
    /// Append a model entry.
    AddModel(AddModelArgs),
    /// Remove every model entry with the given id.
    RemoveModel {
        id: String,
    },
}

#[derive(Debug, Args)]
struct AddModelArgs {
    id: String,
    name: String,
    /// Model config path (biometrics: model path).
    path: String,

    /// Recognizer: formatter config path.
    #[arg(long)]
    formatter_config_path: Option<String>,

    /// Dialogue: model language, e.g. `en_US`.
    #[arg(long)]
    language: Option<String>,
    /// Dialogue: recognizer model id.
    #[arg(long)]
    cubic_model_id: Option<String>,
    /// Dialogue: biometrics model id.
    #[arg(long)]
    luna_model_id: Option<String>,
    /// Dialogue: transcription model id.
    #[arg(long)]
    transcribe_model_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Per-service behaviour
// ---------------------------------------------------------------------------

trait ServiceConfig: TomlConfig + ModelRegistry + Serialize {
    /// Apply layout options after the config is created or loaded.
    fn prepare(&mut self, _layout: &LayoutArgs) -> Result<()> {
        Ok(())
    }

    fn add_from_args(&mut self, args: AddModelArgs) -> Result<()>;
}

impl ServiceConfig for RecognizerConfig {
    fn add_from_args(&mut self, args: AddModelArgs) -> Result<()> {
        self.add_model(args.id, args.name, args.path);
        if let Some(formatter) = args.formatter_config_path {
            if let Some(model) = self.models.last_mut() {
                model.formatter_config_path = Some(formatter);
            }
        }
        Ok(())
    }
}

impl ServiceConfig for DialogueConfig {
    fn prepare(&mut self, layout: &LayoutArgs) -> Result<()> {
        if let Some(root) = &layout.document_root {
            self.set_document_root(root);
        }
        if layout.is_set() {
            let dirs = self
                .set_path_configuration(layout.path_configuration())
                .context("failed to prepare resource directories")?;
            log::info!("resource directory: {}", dirs.resource.display());
        }
        // Saved files hold absolute paths; edit them in relative form.
        if let Err(e) = self.make_relative() {
            log::warn!("keeping paths as stored: {e}");
        }
        Ok(())
    }

    fn add_from_args(&mut self, args: AddModelArgs) -> Result<()> {
        let Some(language) = args.language else {
            bail!("dialogue models need --language");
        };
        self.add_model(
            args.id,
            args.name,
            args.path,
            language,
            args.cubic_model_id,
            args.luna_model_id,
            args.transcribe_model_id,
        );
        Ok(())
    }
}

impl ServiceConfig for BiometricsConfig {
    fn add_from_args(&mut self, args: AddModelArgs) -> Result<()> {
        self.add_model(args.id, args.name, args.path);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Command execution
// ---------------------------------------------------------------------------

fn run<C: ServiceConfig>(path: PathBuf, layout: &LayoutArgs, cmd: Command) -> Result<()> {
    match cmd {
        Command::Init { force } => {
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            let mut config = C::default();
            config.prepare(layout)?;
            config.save(&path)?;
            log::info!("{} config written to {}", C::SERVICE, path.display());
        }

        Command::Show { format } => {
            let mut config = C::load(&path)?;
            config.prepare(layout)?;
            let text = match format {
                Format::Toml => config.to_toml_string()?,
                Format::Json => serde_json::to_string_pretty(&config)?,
            };
            println!("{text}");
        }

        Command::AddModel(args) => {
            let mut config = C::load_or_default(&path)?;
            config.prepare(layout)?;
            let id = args.id.clone();
            config.add_from_args(args)?;
            let text = config.save(&path)?;
            log::info!("added model {id:?} to {}", path.display());
            log::debug!("saved config:\n{text}");
        }

        Command::RemoveModel { id } => {
            let mut config = C::load(&path)?;
            config.prepare(layout)?;
            if config.model(&id).is_none() {
                log::warn!("no model with id {id:?} in {}", path.display());
            }
            config.remove_model(&id);
            config.save(&path)?;
            log::info!("removed model {id:?} from {}", path.display());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let service = Service::from(cli.service);
    let path = cli
        .config
        .unwrap_or_else(|| ConfigPaths::new().config_file(service));
    log::debug!("{service} config file: {}", path.display());

    match service {
        Service::Recognizer => run::<RecognizerConfig>(path, &cli.layout, cli.cmd),
        Service::Dialogue => run::<DialogueConfig>(path, &cli.layout, cli.cmd),
        Service::Biometrics => run::<BiometricsConfig>(path, &cli.layout, cli.cmd),
    }
}
