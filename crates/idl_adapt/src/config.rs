//! The JSON config file read by the `idl-adapt` binary.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use log::debug;
use serde::Deserialize;
use serde::Serialize;

use crate::accounts::InstructionOptions;
use crate::error::AdaptError;
use crate::idl::IdlGenerator;
use crate::idl::Instruction;
use crate::normalize::NormalizeOptions;
use crate::resolve::PrimitiveTable;
use crate::resolve::Resolver;
use crate::resolve::TypeMatcher;
use crate::types::TypeNode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptConfig {
	/// File stem of the IDL inside `idl_dir`.
	pub program_name: String,
	pub idl_dir: PathBuf,
	pub idl_generator: IdlGenerator,
	/// Program address recorded in the metadata. Required for anchor.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub program_id: Option<String>,
	#[serde(default)]
	pub anchor_remaining_accounts: bool,
	/// Resolve `f64` as `[u8; 8]`.
	#[serde(default)]
	pub float_as_bytes: bool,
	/// Extra type names and the raw type each one stands for.
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub type_aliases: BTreeMap<String, String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub binary_version: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub lib_version: Option<String>,
}

impl AdaptConfig {
	/// Read, parse and validate a config file.
	pub fn from_path(path: &Path) -> Result<Self, AdaptError> {
		let json = std::fs::read_to_string(path).map_err(|e| AdaptError::io(path, e))?;
		let config: Self = serde_json::from_str(&json).map_err(|e| AdaptError::json(path, e))?;
		config.validate()?;
		debug!("loaded config for `{}` from {}", config.program_name, path.display());
		Ok(config)
	}

	/// Check the config shape before anything touches the IDL.
	pub fn validate(&self) -> Result<(), AdaptError> {
		if self.program_name.trim().is_empty() {
			return Err(AdaptError::invalid_config("programName", "must not be empty"));
		}
		if self.program_name.contains(['/', '\\']) {
			return Err(AdaptError::invalid_config(
				"programName",
				"must be a file stem, not a path",
			));
		}

		if self.idl_generator == IdlGenerator::Anchor
			&& self.program_id.as_deref().is_none_or(|id| id.trim().is_empty())
		{
			return Err(AdaptError::invalid_config(
				"programId",
				"is required when idlGenerator is `anchor`",
			));
		}

		for (alias, target) in &self.type_aliases {
			let field = format!("typeAliases.{alias}");
			if alias.trim().is_empty() || target.trim().is_empty() {
				return Err(AdaptError::invalid_config(field, "alias and target must not be empty"));
			}
			if PrimitiveTable::Standard.lookup(alias).is_some() {
				return Err(AdaptError::invalid_config(field, "alias shadows a primitive type"));
			}
		}

		Ok(())
	}

	pub fn idl_path(&self) -> PathBuf {
		self.idl_dir.join(format!("{}.json", self.program_name))
	}

	pub fn primitive_table(&self) -> PrimitiveTable {
		if self.float_as_bytes {
			PrimitiveTable::FloatAsBytes
		} else {
			PrimitiveTable::Standard
		}
	}

	/// Library options equivalent to this config.
	pub fn normalize_options(&self) -> NormalizeOptions {
		let options = NormalizeOptions::default().with_primitives(self.primitive_table());
		if self.type_aliases.is_empty() {
			options
		} else {
			options.with_matcher(AliasMatcher::new(self.type_aliases.clone()))
		}
	}

	pub fn instruction_options(&self, ix: &Instruction) -> InstructionOptions {
		InstructionOptions::for_instruction(ix, self.anchor_remaining_accounts)
	}
}

/// Resolves configured alias names to their target type.
///
/// An alias that is reached again while its own target is being resolved is
/// declined, so cyclic aliases end as opaque references.
#[derive(Debug, Default)]
pub struct AliasMatcher {
	aliases: BTreeMap<String, String>,
	expanding: RefCell<Vec<String>>,
}

impl AliasMatcher {
	pub fn new(aliases: BTreeMap<String, String>) -> Self {
		Self {
			aliases,
			expanding: RefCell::default(),
		}
	}
}

impl TypeMatcher for AliasMatcher {
	fn resolve(&self, raw: &str, resolver: &mut Resolver<'_>) -> Option<TypeNode> {
		let target = self.aliases.get(raw)?;
		if self.expanding.borrow().iter().any(|name| name == raw) {
			debug!("alias `{raw}` is cyclic");
			return None;
		}

		self.expanding.borrow_mut().push(raw.to_owned());
		let node = resolver.resolve(target);
		self.expanding.borrow_mut().pop();
		Some(node)
	}
}
