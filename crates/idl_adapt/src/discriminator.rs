//! Anchor-compatible account and instruction discriminators.
//!
//! The preimage format and name canonicalization must match what deployed
//! programs derive on chain byte for byte.

use std::fmt;

use heck::ToSnakeCase;
use heck::ToUpperCamelCase;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;

use crate::casing::capitalize_first;

/// Number of bytes of an account or instruction discriminator.
pub const ACCOUNT_DISCRIMINATOR_SIZE: usize = 8;

/// Namespace for instructions that are not namespaced by state or trait
/// implementations.
pub const SIGHASH_GLOBAL_NAMESPACE: &str = "global";

/// Namespace prefix for account discriminators.
pub const SIGHASH_ACCOUNT_NAMESPACE: &str = "account";

/// An 8 byte tag prefixed to serialized account or instruction data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Discriminator(pub [u8; ACCOUNT_DISCRIMINATOR_SIZE]);

impl Discriminator {
	/// Use declared bytes when they have the expected width.
	pub fn from_slice(bytes: &[u8]) -> Option<Self> {
		<[u8; ACCOUNT_DISCRIMINATOR_SIZE]>::try_from(bytes)
			.ok()
			.map(Self)
	}

	pub fn as_bytes(&self) -> &[u8; ACCOUNT_DISCRIMINATOR_SIZE] {
		&self.0
	}

	pub fn to_hex(&self) -> String {
		use fmt::Write;

		self.0.iter().fold(String::new(), |mut acc, b| {
			let _ = write!(acc, "{b:02x}");
			acc
		})
	}
}

impl fmt::Display for Discriminator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:?}", self.0)
	}
}

/// `sha256("<namespace>:<name>")` truncated to 8 bytes. `name` is used as
/// given.
pub fn sighash(namespace: &str, name: &str) -> Discriminator {
	let preimage = format!("{namespace}:{name}");
	let hash = Sha256::digest(preimage.as_bytes());

	let mut bytes = [0u8; ACCOUNT_DISCRIMINATOR_SIZE];
	bytes.copy_from_slice(&hash[..ACCOUNT_DISCRIMINATOR_SIZE]);
	Discriminator(bytes)
}

/// Discriminator prepended to account data, hashed over the struct name.
///
/// Snake and kebab case names are converted to `UpperCamelCase`. Any other
/// name only gets its first character uppercased so acronyms such as
/// `NFTData` keep their capitals.
pub fn account_discriminator(name: &str) -> Discriminator {
	let struct_name = if name.contains(['_', '-']) {
		name.to_upper_camel_case()
	} else {
		capitalize_first(name)
	};
	sighash(SIGHASH_ACCOUNT_NAMESPACE, &struct_name)
}

/// Discriminator prepended to instruction data. The name is converted to
/// `snake_case` first.
pub fn instruction_discriminator(name: &str) -> Discriminator {
	sighash(SIGHASH_GLOBAL_NAMESPACE, &name.to_snake_case())
}
