use clap::{Parser, Subcommand};
use grille::cli::{
    run_decrypt, run_encrypt, show_keygen, show_stencil, DecryptOptions, EncryptOptions,
    KeygenOptions,
};
use grille::config::{SeedSource, DEFAULT_PLAINTEXT};
use grille::OverflowPolicy;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Version info from build.rs
const VERSION: &str = env!("GRILLE_VERSION");
const BUILD: &str = env!("GRILLE_BUILD");
const PROFILE: &str = env!("GRILLE_PROFILE");
const GIT_HASH: &str = env!("GRILLE_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} build {} ({})", PROFILE, VERSION, BUILD, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "grille")]
#[command(author, about = "Rotating grille cipher: build stencils, encrypt and decrypt step by step", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args)]
struct SeedArgs {
    /// Seed matrix, e.g. "2,4,1/1,4,3/3,2,2"
    #[arg(long)]
    seed: Option<String>,

    /// JSON key file written by `keygen`
    #[arg(long, conflicts_with = "seed")]
    key: Option<PathBuf>,
}

impl SeedArgs {
    fn into_source(self) -> SeedSource {
        SeedSource::from_args(self.seed, self.key)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random complete seed
    #[command(alias = "k")]
    Keygen {
        /// Write the seed to this key file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Seed the generator for reproducible output
        #[arg(long)]
        rng_seed: Option<u64>,
    },

    /// Show the stencil a seed produces
    #[command(alias = "s")]
    Stencil {
        #[command(flatten)]
        seed: SeedArgs,
    },

    /// Encrypt plaintext (default: the holiday greeting)
    #[command(alias = "e")]
    Encrypt {
        #[command(flatten)]
        seed: SeedArgs,

        /// What to do with letters beyond 36
        #[arg(long, default_value = "reject", value_parser = parse_overflow)]
        overflow: OverflowPolicy,

        /// Show the grid after every rotation
        #[arg(long)]
        steps: bool,

        /// Text to encrypt
        text: Option<String>,
    },

    /// Decrypt ciphertext
    #[command(alias = "d")]
    Decrypt {
        #[command(flatten)]
        seed: SeedArgs,

        /// Show the letters read at every rotation
        #[arg(long)]
        steps: bool,

        /// Text to decrypt
        text: String,
    },
}

fn parse_overflow(s: &str) -> Result<OverflowPolicy, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("grille {}", get_version());
        return ExitCode::SUCCESS;
    }

    init_logging(&cli.log_level);

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            if let Err(e) = Cli::command().print_help() {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
            println!();
            return ExitCode::SUCCESS;
        }
    };

    let result = match command {
        Commands::Keygen { output, rng_seed } => {
            show_keygen(&KeygenOptions { rng_seed, output })
        }

        Commands::Stencil { seed } => show_stencil(&seed.into_source()),

        Commands::Encrypt {
            seed,
            overflow,
            steps,
            text,
        } => {
            let options = EncryptOptions {
                seed: seed.into_source(),
                overflow,
                steps,
            };
            run_encrypt(text.as_deref().unwrap_or(DEFAULT_PLAINTEXT), &options)
        }

        Commands::Decrypt { seed, steps, text } => {
            let options = DecryptOptions {
                seed: seed.into_source(),
                steps,
            };
            run_decrypt(&text, &options)
        }
    };

    match result {
        Ok(report) => {
            print!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
