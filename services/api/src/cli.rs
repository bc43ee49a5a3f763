use crate::demo::{run_demo, run_seo, DemoArgs, SeoArgs, SeoArtifact};
use crate::server;
use aurelian::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Aurelian Estates Service",
    about = "Serve the Aurelian Estates site or inspect its SEO artifacts from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Render an SEO artifact to stdout
    Seo {
        #[command(subcommand)]
        command: SeoCommand,
    },
    /// Run an end-to-end CLI demo covering forms, the vault gate, and SEO output
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum SeoCommand {
    /// Print sitemap.xml
    Sitemap(SeoArgs),
    /// Print robots.txt
    Robots(SeoArgs),
    /// Print the JSON-LD structured data bundle
    StructuredData(SeoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Seo { command } => match command {
            SeoCommand::Sitemap(args) => run_seo(SeoArtifact::Sitemap, args),
            SeoCommand::Robots(args) => run_seo(SeoArtifact::Robots, args),
            SeoCommand::StructuredData(args) => run_seo(SeoArtifact::StructuredData, args),
        },
        Command::Demo(args) => run_demo(args),
    }
}
