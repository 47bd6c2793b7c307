use clap::{Parser as ClapParser, Subcommand};
use fractal::cli::{self, CheckOptions, CliError, RunOptions};
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(ClapParser)]
#[command(name = "fractal")]
#[command(about = "Fractal - A rule language for validating and transforming migrated records")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a ruleset and report any error
    Check {
        /// The rule text to compile
        rules: String,

        /// Print the token stream
        #[arg(long)]
        tokens: bool,

        /// Print the parsed tree
        #[arg(long)]
        ast: bool,

        /// Print normalized rules one per line
        #[arg(short, long)]
        pretty: bool,
    },

    /// Validate and transform a batch of delimited records
    Run {
        /// Input file (reads from stdin if not provided or '-')
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Validation rules
        #[arg(long, env = "FRACTAL_VALIDATION_RULES")]
        validate: Option<String>,

        /// Transformation rules
        #[arg(long, env = "FRACTAL_TRANSFORMATION_RULES")]
        transform: Option<String>,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Column delimiter
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Treat the first line as data
        #[arg(long)]
        no_header: bool,

        /// Drop invalid records instead of stopping
        #[arg(long)]
        skip_invalid: bool,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show documentation (lists topics when none is given)
    Docs {
        /// Topic name
        topic: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let result = match cli.command {
        Commands::Check {
            rules,
            tokens,
            ast,
            pretty,
        } => run_check(CheckOptions {
            rules,
            tokens,
            ast,
            pretty,
        }),
        Commands::Run {
            input,
            validate,
            transform,
            config,
            delimiter,
            no_header,
            skip_invalid,
            json,
        } => read_input(input).and_then(|input| {
            let options = RunOptions {
                input,
                config,
                validate,
                transform,
                delimiter,
                no_header,
                skip_invalid,
            };
            run_pipeline(&options, json)
        }),
        Commands::Docs { topic: None } => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Docs { topic: Some(topic) } => cli::get_doc_topic(&topic).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(options: CheckOptions) -> Result<(), CliError> {
    let result = cli::execute_check(&options)?;
    print!("{}", result.render());
    Ok(())
}

fn read_input(input: Option<PathBuf>) -> Result<Option<String>, CliError> {
    match input {
        Some(path) if path.as_os_str() != "-" => Ok(Some(fs::read_to_string(path)?)),
        Some(_) => Ok(Some(read_stdin()?)),
        None if !atty::is(atty::Stream::Stdin) => Ok(Some(read_stdin()?)),
        None => Ok(None),
    }
}

fn read_stdin() -> io::Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn run_pipeline(options: &RunOptions, json: bool) -> Result<(), CliError> {
    let report = cli::execute_run(options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.output);
    }
    Ok(())
}
