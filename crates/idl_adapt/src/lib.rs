//! Normalizes anchor and shank IDLs into a fully resolved interface model.
//!
//! The pipeline reads a raw IDL ([`idl::raw::RawIdl`]), resolves every
//! textual type through a [`resolve::ResolutionChain`], renames identifiers,
//! fills in discriminators and produces an [`idl::Idl`]. Per instruction,
//! [`accounts`] compiles the account metas a client has to send.

pub mod accounts;
pub mod casing;
pub mod config;
pub mod discriminator;
pub mod enhance;
pub mod error;
pub mod idl;
pub mod known_pubkeys;
pub mod normalize;
pub mod resolve;
pub mod types;

use std::path::Path;

pub use crate::accounts::CompiledAccountMetas;
pub use crate::accounts::compile_account_metas;
pub use crate::accounts::process_instruction_accounts;
pub use crate::config::AdaptConfig;
pub use crate::discriminator::Discriminator;
pub use crate::discriminator::account_discriminator;
pub use crate::discriminator::instruction_discriminator;
pub use crate::error::AccountMetasError;
pub use crate::error::AdaptError;
pub use crate::idl::Idl;
pub use crate::normalize::NormalizeOptions;
pub use crate::normalize::normalize;
pub use crate::resolve::resolve_type;
pub use crate::types::TypeNode;

/// Load the config at `config_path`, then enhance, normalize and write back
/// the IDL it points to.
pub fn adapt_idl_file(config_path: &Path) -> Result<Idl, AdaptError> {
	let config = AdaptConfig::from_path(config_path)?;
	enhance::adapt_idl(&config, &config.normalize_options())
}

/// Compile the account metas of one instruction of the configured IDL.
///
/// `instruction` may be given in its declared or its normalized spelling.
pub fn compile_instruction_accounts(
	config: &AdaptConfig,
	instruction: &str,
) -> Result<CompiledAccountMetas, AdaptError> {
	let idl = enhance::load_idl(config, &config.normalize_options())?;
	let ix = idl
		.instruction(instruction)
		.or_else(|| idl.instruction(&casing::snake_to_camel(instruction)))
		.ok_or_else(|| {
			AdaptError::UnknownInstruction {
				name: instruction.to_owned(),
			}
		})?;

	let keys = process_instruction_accounts(ix);
	Ok(compile_account_metas(&keys, &config.instruction_options(ix)))
}
