use std::path::Path;
use std::path::PathBuf;

use clap::ArgGroup;
use clap::Parser;
use clap::Subcommand;
use env_logger::Env;
use idl_adapt::AdaptConfig;
use idl_adapt::resolve::GeneratedTypes;
use idl_adapt::resolve::PrimitiveTable;
use idl_adapt::resolve::ResolutionChain;

#[derive(Parser, Debug)]
#[command(
	name = "idl-adapt",
	version,
	about = "Normalize anchor and shank IDLs for client generation"
)]
struct Cli {
	/// Log every resolution and compilation step.
	#[arg(short, long, global = true)]
	verbose: bool,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Enhance and normalize the configured IDL, writing it back in place.
	Adapt {
		/// JSON config file.
		#[arg(short, long)]
		config: PathBuf,
	},
	/// Print the type node a raw type string resolves to.
	Resolve {
		/// Raw type, for example `HashMap<String, Vec<u8>>`.
		ty: String,

		/// Resolve `f64` as `[u8; 8]`.
		#[arg(long, default_value_t = false)]
		float_as_bytes: bool,
	},
	/// Print the discriminator of an account or instruction name.
	#[command(group(ArgGroup::new("target").required(true).args(["account", "instruction"])))]
	Discriminator {
		#[arg(long)]
		account: Option<String>,

		#[arg(long)]
		instruction: Option<String>,
	},
	/// Print the compiled account metas of one instruction.
	Accounts {
		/// JSON config file.
		#[arg(short, long)]
		config: PathBuf,

		/// Instruction name, declared or normalized spelling.
		#[arg(short, long)]
		instruction: String,
	},
}

fn main() {
	let cli = Cli::parse();
	let level = if cli.verbose { "debug" } else { "info" };
	env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

	match cli.command {
		Commands::Adapt { config } => run_adapt(&config),
		Commands::Resolve { ty, float_as_bytes } => run_resolve(&ty, float_as_bytes),
		Commands::Discriminator {
			account,
			instruction,
		} => run_discriminator(account.as_deref(), instruction.as_deref()),
		Commands::Accounts {
			config,
			instruction,
		} => run_accounts(&config, &instruction),
	}
}

fn run_adapt(config: &Path) {
	let idl = match idl_adapt::adapt_idl_file(config) {
		Ok(idl) => idl,
		Err(e) => {
			eprintln!("Error: {e}");
			std::process::exit(1);
		}
	};

	println!(
		"Adapted IDL with {} instruction(s), {} account(s) and {} type(s)",
		idl.instructions.len(),
		idl.accounts.len(),
		idl.types.len(),
	);
}

fn run_resolve(ty: &str, float_as_bytes: bool) {
	let primitives = if float_as_bytes {
		PrimitiveTable::FloatAsBytes
	} else {
		PrimitiveTable::Standard
	};
	let chain = ResolutionChain::new(primitives);
	let mut generated = GeneratedTypes::default();
	let node = chain.resolver(&mut generated).resolve(ty);

	print_json(&node);
}

fn run_discriminator(account: Option<&str>, instruction: Option<&str>) {
	let discriminator = match (account, instruction) {
		(Some(name), _) => idl_adapt::account_discriminator(name),
		(None, Some(name)) => idl_adapt::instruction_discriminator(name),
		(None, None) => {
			eprintln!("Error: pass --account or --instruction");
			std::process::exit(1);
		}
	};

	println!("{discriminator}");
	println!("0x{}", discriminator.to_hex());
}

fn run_accounts(config: &Path, instruction: &str) {
	let compiled = AdaptConfig::from_path(config)
		.and_then(|config| idl_adapt::compile_instruction_accounts(&config, instruction));
	let compiled = match compiled {
		Ok(compiled) => compiled,
		Err(e) => {
			eprintln!("Error: {e}");
			std::process::exit(1);
		}
	};

	print_json(&compiled);
}

fn print_json(value: &impl serde::Serialize) {
	match serde_json::to_string_pretty(value) {
		Ok(json) => println!("{json}"),
		Err(e) => {
			eprintln!("JSON serialization error: {e}");
			std::process::exit(1);
		}
	}
}
