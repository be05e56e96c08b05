use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::{fmt, path::Path, path::PathBuf};
use tokio::fs::read_to_string;
use tracing::{error, info, subscriber, Level};
use tracing_subscriber::{fmt::writer::MakeWriterExt, FmtSubscriber};

use crate::{
    dispatch,
    document::{DocumentError, DocumentSource},
    payload::PushPayload,
    registry::Registry,
};

/// What the external executor should do with the assembled payload.
///
/// Forwarded as context only; the executor owns any behavioral difference
/// between pushing and applying.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Action {
    Push,
    Apply,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Push => write!(f, "push"),
            Self::Apply => write!(f, "apply"),
        }
    }
}

/// Which pajee configuration document to load and apply.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ConfigurationKind {
    Wildfly,
    Jboss,
    Java,
}

impl ConfigurationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wildfly => "wildfly",
            Self::Jboss => "jboss",
            Self::Java => "java",
        }
    }

    /// File name of the document on the remote repository.
    pub fn file_name(&self) -> String {
        format!("{}.yaml", self.as_str())
    }

    /// Key the document text is stored under in the push payload.
    pub fn payload_key(&self) -> String {
        format!("{}_conf", self.as_str())
    }
}

impl fmt::Display for ConfigurationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Parser)]
#[command(author, version, about = "Push or apply a pajee configuration on a target environment", long_about = None)]
struct Cli {
    /// Action to run on the target environment
    #[arg(long, short, value_enum)]
    action: Action,

    /// Target environment name
    #[arg(long, short)]
    environment: String,

    /// Pajee configuration kind
    #[arg(long, short, value_enum)]
    configuration: ConfigurationKind,

    /// Local document path (skips the remote fetch)
    #[arg(long, short)]
    path: Option<PathBuf>,

    /// Environment registry file
    #[arg(default_value = "config.toml", long)]
    config: String,

    /// Executor-supplied push data (JSON) used to seed the payload
    #[arg(long)]
    push_data: Option<PathBuf>,

    /// Log level
    #[arg(default_value_t = Level::INFO, long)]
    level: Level,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let Cli {
        action,
        environment,
        configuration,
        path,
        config,
        push_data,
        level,
    } = cli;

    // Setup logging

    let subscriber_writer = std::io::stderr.with_max_level(level);

    let mut subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(subscriber_writer)
        .without_time();

    if [Level::DEBUG, Level::TRACE].contains(&level) {
        subscriber = subscriber.with_file(true).with_line_number(true);
    }

    let subscriber = subscriber.finish();

    subscriber::set_global_default(subscriber).expect("setting default subscriber");

    // Load the environment registry

    let registry = Registry::load(Path::new(&config)).await?;

    let Some(target) = registry.environment(&environment) else {
        error!("{} does not exist in {}", environment, config);
        std::process::exit(1);
    };

    // Resolve the configuration document

    let source = match path {
        Some(path) => DocumentSource::Local { path },
        None => DocumentSource::Remote {
            base_file_url: target.base_file_url.clone(),
            configuration,
        },
    };

    let document = match source.load().await {
        Ok(document) => document,
        Err(DocumentError::Other(error)) => return Err(error),
        Err(error) => {
            error!("{}", error);
            std::process::exit(1);
        }
    };

    info!("pajee configuration successfully loaded");

    // Assemble the push payload

    let mut payload = match push_data {
        Some(push_data) => {
            let data = read_to_string(&push_data)
                .await
                .with_context(|| format!("failed to read push data from {}", push_data.display()))?;

            let value = serde_json::from_str(&data)
                .with_context(|| format!("failed to parse push data from {}", push_data.display()))?;

            PushPayload::from_value(value)?
        }

        None => PushPayload::new(),
    };

    payload.insert_document(configuration, document);

    dispatch::run(action, &environment, &payload)
}
