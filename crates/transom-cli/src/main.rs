//! transom CLI - ahead-of-time builds for client-side dashboard modules.

mod build;
mod clean;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "transom")]
#[command(about = "Compile client-side dashboard modules ahead of time")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Binding style for compiled exports.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum MapperKind {
    /// Framework-native clientside-callback descriptors
    Clientside,
    /// `window.<ns>.<module>.<function>` property paths
    Props,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a module and print its entry point and bindings
    Build {
        /// Path to the module source file
        module: String,

        /// Global namespace to publish under (defaults per binding style)
        #[arg(short, long)]
        namespace: Option<String>,

        /// Binding style for the export table
        #[arg(short, long, value_enum, default_value = "clientside")]
        mapper: MapperKind,

        /// Injected parameter as KEY=VALUE (repeatable)
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Artifact root directory
        #[arg(long, default_value = transom_core::DEFAULT_ROOT)]
        root: String,

        /// Transpiler command (defaults to `transcrypt` on PATH)
        #[arg(long)]
        transpiler: Option<String>,

        /// Exported function name, skipping introspection (repeatable)
        #[arg(long = "export", value_name = "NAME")]
        exports: Vec<String>,
    },

    /// Remove the artifact root and everything under it
    Clean {
        /// Artifact root directory
        #[arg(long, default_value = transom_core::DEFAULT_ROOT)]
        root: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Build {
            module,
            namespace,
            mapper,
            params,
            root,
            transpiler,
            exports,
        } => build::execute(
            &module,
            namespace.as_deref(),
            mapper,
            &params,
            &root,
            transpiler.as_deref(),
            exports,
        )?,

        Commands::Clean { root } => clean::execute(&root)?,
    }

    Ok(())
}
