//! Advisor CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "advisor")]
#[command(about = "Course prerequisite and major requirement resolver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, default_value = advisor_core::CONFIG_FILE)]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "7878")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Show a course's title, units and description
    Course {
        /// Course identifier, e.g. "MATH 20C"
        course_id: String,
    },
    /// Show a course with its prerequisites and the milestones that require it
    Context { course_id: String },
    /// Show a course's prerequisites
    Prereqs {
        course_id: String,

        /// Follow prerequisites of prerequisites
        #[arg(short, long)]
        transitive: bool,
    },
    /// Show the requirement tree of a major
    Major {
        /// Major identifier, e.g. "MA30"
        major_id: String,
    },
    /// Show courses grouped by milestone
    Milestones,
    /// List configured majors
    Majors,
    /// Run an agent tool by name; lists tools when no name is given
    Tool {
        name: Option<String>,

        #[arg(default_value = "")]
        input: String,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!("advisor={}", log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Commands::Version = cli.command {
        println!("advisor v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let resolver = commands::open_resolver(&cli.config)?;

    match cli.command {
        Commands::Serve { port, host } => commands::serve(resolver, host, port).await,
        Commands::Course { course_id } => commands::course(&resolver, &course_id).await,
        Commands::Context { course_id } => commands::context(&resolver, &course_id).await,
        Commands::Prereqs { course_id, transitive } => commands::prereqs(&resolver, &course_id, transitive).await,
        Commands::Major { major_id } => commands::major(&resolver, &major_id).await,
        Commands::Milestones => commands::milestones(&resolver).await,
        Commands::Majors => {
            commands::majors(&resolver);
            Ok(())
        }
        Commands::Tool { name, input } => commands::tool(&resolver, name.as_deref(), &input).await,
        Commands::Version => Ok(()),
    }
}
