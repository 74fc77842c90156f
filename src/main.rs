use clap::Parser;
use simplesearch::{
    Config,
    DocumentStore,
    Result,
    cli::Cli,
    shell::Shell,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = std::env::var("SIMPLESEARCH_LOG") {
        EnvFilter::new(env)
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config = Config::resolve(&cli)?;
    let store = DocumentStore::open(&config.root, config.concurrency)?;

    let discovered = store.seed()?;
    let report = store.load_all();
    info!(
        discovered,
        failed = report.failed,
        root = %config.root.display(),
        "index ready"
    );

    let shell = Shell::new(&store, config.format)
        .with_search_limit(config.search_limit);
    let mut stdout = std::io::stdout().lock();
    shell.banner(&mut stdout)?;
    shell.run(std::io::stdin().lock(), &mut stdout)
}
