use std::path::Path;

use log::info;

use crate::config::AdaptConfig;
use crate::error::AdaptError;
use crate::idl::Idl;
use crate::idl::IdlGenerator;
use crate::idl::raw::RawIdl;
use crate::normalize::NormalizeOptions;
use crate::normalize::normalize;

/// Record the configured generator, the program address and tool versions
/// in the IDL metadata. The address is only written for anchor IDLs. Other
/// existing metadata keys are kept.
pub fn enhance_metadata(idl: &mut RawIdl, config: &AdaptConfig) {
	let metadata = idl.metadata_mut();

	metadata.origin = Some(config.idl_generator.as_str().to_owned());
	if config.idl_generator == IdlGenerator::Anchor {
		metadata.address.clone_from(&config.program_id);
	}
	if config.binary_version.is_some() {
		metadata.binary_version.clone_from(&config.binary_version);
	}
	if config.lib_version.is_some() {
		metadata.lib_version.clone_from(&config.lib_version);
	}
}

pub fn read_raw_idl(path: &Path) -> Result<RawIdl, AdaptError> {
	let json = std::fs::read_to_string(path).map_err(|e| AdaptError::io(path, e))?;
	RawIdl::from_json(&json).map_err(|e| AdaptError::json(path, e))
}

/// Write `idl` as pretty printed JSON, replacing any existing file.
pub fn write_idl(path: &Path, idl: &Idl) -> Result<(), AdaptError> {
	let json = serde_json::to_string_pretty(idl)?;
	std::fs::write(path, json).map_err(|e| AdaptError::io(path, e))?;
	info!("wrote normalized IDL to {}", path.display());
	Ok(())
}

/// Read the configured IDL, enhance its metadata and normalize it without
/// touching the file.
pub fn load_idl(config: &AdaptConfig, options: &NormalizeOptions) -> Result<Idl, AdaptError> {
	config.validate()?;
	let path = config.idl_path();
	let mut raw = read_raw_idl(&path)?;
	enhance_metadata(&mut raw, config);
	normalize(raw, options)
}

/// Enhance and normalize the configured IDL, then write it back to the same
/// path.
pub fn adapt_idl(config: &AdaptConfig, options: &NormalizeOptions) -> Result<Idl, AdaptError> {
	let idl = load_idl(config, options)?;
	write_idl(&config.idl_path(), &idl)?;
	Ok(idl)
}
