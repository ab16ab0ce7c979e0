use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    #[command(flatten)]
    pub global_args: GlobalArgs,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// kubernetes namespace to work with (defaults to the kubeconfig context's namespace)
    #[arg(short = 'n', long, global = true)]
    pub namespace: Option<String>,
    /// override default kubeconfig
    #[arg(long, global = true)]
    pub kube_config: Option<PathBuf>,
    /// override default kubeconfig context
    #[arg(long, global = true)]
    pub kube_context: Option<String>,
    /// enable verbose output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose_logging: bool,
    /// enable trace output (more detailed than verbose, overrides it if present)
    #[arg(long = "trace", global = true)]
    pub trace_logging: bool,
}

impl GlobalArgs {
    pub fn get_log_level(&self) -> LogLevel {
        if self.trace_logging {
            return LogLevel::Trace;
        }

        if self.verbose_logging {
            return LogLevel::Verbose;
        }

        LogLevel::Normal
    }
}

pub enum LogLevel {
    Normal,
    Verbose,
    Trace,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// assemble the job described by a manifest and print it
    #[command(alias = "r")]
    Render(RenderArgs),
    /// check that every ConfigMap and Secret referenced by a manifest exists
    #[command(alias = "v")]
    Validate(ValidateArgs),
    /// print the token of a service account
    #[command(alias = "t")]
    SaToken(SaTokenArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    #[value(name = "yaml")]
    Yaml,
    #[value(name = "json")]
    Json,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// path to the job manifest
    pub manifest: PathBuf,
    /// if set, the job will be written to a file instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
    /// output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// path to the job manifest
    pub manifest: PathBuf,
}

#[derive(Debug, Args)]
pub struct SaTokenArgs {
    /// name of the service account
    pub service_account: String,
}
