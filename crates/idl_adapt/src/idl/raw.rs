//! The IDL exactly as an upstream generator wrote it.
//!
//! Types here may still be textual (`{"defined": "HashMap<String,Item>"}` or a
//! bare `"Vec<u8>"`). Both the legacy (`isMut`, `isSigner`) and current
//! (`writable`, `signer`) account flag spellings are accepted.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use super::GenericParam;
use super::IdlErrorCode;
use super::IdlMetadata;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIdl {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub address: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub version: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default)]
	pub instructions: Vec<RawInstruction>,
	#[serde(default)]
	pub accounts: Vec<RawAccount>,
	#[serde(default)]
	pub types: Vec<RawTypeDefinition>,
	#[serde(default)]
	pub errors: Vec<IdlErrorCode>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub metadata: Option<IdlMetadata>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl RawIdl {
	pub fn from_json(json: &str) -> serde_json::Result<Self> {
		serde_json::from_str(json)
	}

	/// The generator tag stored in the metadata block, if any.
	pub fn origin(&self) -> Option<&str> {
		self.metadata
			.as_ref()
			.and_then(|metadata| metadata.origin.as_deref())
	}

	pub fn metadata_mut(&mut self) -> &mut IdlMetadata {
		self.metadata.get_or_insert_with(IdlMetadata::default)
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInstruction {
	pub name: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub docs: Vec<String>,
	#[serde(default)]
	pub accounts: Vec<RawInstructionAccountItem>,
	#[serde(default)]
	pub args: Vec<RawField>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub discriminator: Option<Vec<u8>>,
	#[serde(default)]
	pub legacy_optional_accounts_strategy: bool,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInstructionAccountItem {
	Collection(RawAccountCollection),
	Account(RawAccountReference),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAccountCollection {
	pub name: String,
	pub accounts: Vec<RawInstructionAccountItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawAccountReference {
	pub name: String,
	#[serde(default, alias = "isMut")]
	pub writable: bool,
	#[serde(default, alias = "isSigner")]
	pub signer: bool,
	#[serde(default, alias = "isOptional")]
	pub optional: bool,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub docs: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub address: Option<String>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAccount {
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub discriminator: Option<Vec<u8>>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub docs: Vec<String>,
	/// Inline body, as older anchor and shank IDLs declare it.
	#[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
	pub ty: Option<RawTypeBody>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTypeDefinition {
	pub name: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub docs: Vec<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub generics: Vec<GenericParam>,
	#[serde(rename = "type")]
	pub ty: RawTypeBody,
	/// Layout hints such as `serialization` and `repr`.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RawTypeBody {
	Struct {
		#[serde(default)]
		fields: RawFields,
	},
	Enum {
		#[serde(default)]
		variants: Vec<RawEnumVariant>,
	},
	/// `{"kind": "type", "alias": ...}`
	#[serde(rename = "type")]
	Alias { alias: RawType },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawFields {
	Named(Vec<RawField>),
	Tuple(Vec<RawType>),
}

impl Default for RawFields {
	fn default() -> Self {
		Self::Named(Vec::new())
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEnumVariant {
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fields: Option<RawFields>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawField {
	pub name: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub docs: Vec<String>,
	#[serde(rename = "type")]
	pub ty: RawType,
}

/// A type occurrence as written by the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawType {
	Named(String),
	Option {
		option: Box<RawType>,
	},
	COption {
		coption: Box<RawType>,
	},
	Vec {
		vec: Box<RawType>,
	},
	Array {
		array: (Box<RawType>, usize),
	},
	Tuple {
		tuple: Vec<RawType>,
	},
	HashMap {
		#[serde(rename = "hashMap")]
		hash_map: (Box<RawType>, Box<RawType>),
	},
	BTreeMap {
		#[serde(rename = "bTreeMap")]
		btree_map: (Box<RawType>, Box<RawType>),
	},
	Defined {
		defined: RawDefined,
	},
	/// Reference to a generic parameter of the enclosing type definition.
	Generic {
		generic: String,
	},
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDefined {
	Name(String),
	Named {
		name: String,
		#[serde(default, skip_serializing_if = "Vec::is_empty")]
		generics: Vec<RawGenericArg>,
	},
}

impl RawDefined {
	pub fn name(&self) -> &str {
		match self {
			Self::Name(name) | Self::Named { name, .. } => name,
		}
	}

	pub fn generics(&self) -> &[RawGenericArg] {
		match self {
			Self::Name(_) => &[],
			Self::Named { generics, .. } => generics,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RawGenericArg {
	Type {
		#[serde(rename = "type")]
		ty: RawType,
	},
	Const {
		value: String,
	},
}
