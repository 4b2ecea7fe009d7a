//! Normalized interface model handed to renderers.
//!
//! Produced by [`crate::normalize::normalize`] from a [`raw::RawIdl`]. Every
//! type occurrence is a [`TypeNode`]; nothing textual is left to resolve.

pub mod raw;

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::discriminator::Discriminator;
use crate::types::TypeNode;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Idl {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub address: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub version: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	pub instructions: Vec<Instruction>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub accounts: Vec<Account>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub types: Vec<TypeDefinition>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub errors: Vec<IdlErrorCode>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub metadata: Option<IdlMetadata>,
	/// Top-level keys this crate does not interpret (events, constants, ...).
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl Idl {
	pub fn instruction(&self, name: &str) -> Option<&Instruction> {
		self.instructions.iter().find(|ix| ix.name == name)
	}

	pub fn account(&self, name: &str) -> Option<&Account> {
		self.accounts.iter().find(|account| account.name == name)
	}

	pub fn type_definition(&self, name: &str) -> Option<&TypeDefinition> {
		self.types.iter().find(|def| def.name == name)
	}

	/// Program address, preferring the metadata entry over the top-level one.
	pub fn program_address(&self) -> Option<&str> {
		self.metadata
			.as_ref()
			.and_then(|metadata| metadata.address.as_deref())
			.or(self.address.as_deref())
	}
}

/// The tool that produced an IDL, as recorded in `metadata.origin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdlGenerator {
	#[default]
	Anchor,
	Shank,
}

impl IdlGenerator {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Anchor => "anchor",
			Self::Shank => "shank",
		}
	}

	/// Parse an origin tag. A missing origin means anchor.
	pub fn from_origin(origin: Option<&str>) -> Option<Self> {
		match origin {
			None | Some("anchor") => Some(Self::Anchor),
			Some("shank") => Some(Self::Shank),
			Some(_) => None,
		}
	}
}

impl fmt::Display for IdlGenerator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Program metadata block. `origin` names the generator that produced the
/// IDL.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdlMetadata {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub address: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub origin: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub binary_version: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub lib_version: Option<String>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdlErrorCode {
	pub code: u32,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub msg: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDefinition {
	pub name: String,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub docs: Vec<String>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub generics: Vec<GenericParam>,
	#[serde(rename = "type")]
	pub ty: TypeDefinitionBody,
	/// Keys carried through untouched, such as `serialization` and `repr`.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl TypeDefinition {
	pub fn new(name: impl Into<String>, ty: TypeDefinitionBody) -> Self {
		Self {
			name: name.into(),
			docs: Vec::new(),
			generics: Vec::new(),
			ty,
			extra: Map::new(),
		}
	}
}

/// A parameter declared by a generic type definition. Fields refer to it
/// through `{"generic": "<name>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GenericParam {
	Type {
		name: String,
	},
	Const {
		name: String,
		#[serde(rename = "type")]
		ty: String,
	},
}

impl GenericParam {
	pub fn name(&self) -> &str {
		match self {
			Self::Type { name } | Self::Const { name, .. } => name,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeDefinitionBody {
	Struct { fields: Fields },
	Enum { variants: Vec<EnumVariant> },
	#[serde(rename = "type")]
	Alias { alias: TypeNode },
}

impl TypeDefinitionBody {
	pub fn empty_struct() -> Self {
		Self::Struct {
			fields: Fields::Named(Vec::new()),
		}
	}

	pub fn type_nodes(&self) -> Vec<&TypeNode> {
		match self {
			Self::Struct { fields } => fields.type_nodes(),
			Self::Enum { variants } => {
				variants
					.iter()
					.filter_map(|variant| variant.fields.as_ref())
					.flat_map(Fields::type_nodes)
					.collect()
			}
			Self::Alias { alias } => vec![alias],
		}
	}
}

/// Named or positional fields of a struct or enum variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Fields {
	Named(Vec<Field>),
	Tuple(Vec<TypeNode>),
}

impl Fields {
	pub fn type_nodes(&self) -> Vec<&TypeNode> {
		match self {
			Self::Named(fields) => fields.iter().map(|field| &field.ty).collect(),
			Self::Tuple(types) => types.iter().collect(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
	pub name: String,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub docs: Vec<String>,
	#[serde(rename = "type")]
	pub ty: TypeNode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumVariant {
	pub name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub fields: Option<Fields>,
}

/// An on-chain account layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
	pub name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub discriminator: Option<Discriminator>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub docs: Vec<String>,
	#[serde(rename = "type")]
	pub ty: TypeDefinitionBody,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
	pub name: String,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub docs: Vec<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub discriminator: Option<Discriminator>,
	pub accounts: Vec<InstructionAccountItem>,
	pub args: Vec<Field>,
	/// Omit unset optional accounts instead of defaulting them to the program
	/// id.
	#[serde(skip_serializing_if = "std::ops::Not::not")]
	pub legacy_optional_accounts_strategy: bool,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InstructionAccountItem {
	Account(AccountReference),
	Collection(AccountCollection),
}

impl InstructionAccountItem {
	pub fn name(&self) -> &str {
		match self {
			Self::Account(account) => &account.name,
			Self::Collection(collection) => &collection.name,
		}
	}
}

/// A single account slot of an instruction.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AccountReference {
	pub name: String,
	pub writable: bool,
	pub signer: bool,
	#[serde(skip_serializing_if = "std::ops::Not::not")]
	pub optional: bool,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub docs: Vec<String>,
	/// A fixed address pinned by the IDL.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub address: Option<String>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// A named group of account references declared once and expanded per
/// member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountCollection {
	pub name: String,
	pub accounts: Vec<InstructionAccountItem>,
}
