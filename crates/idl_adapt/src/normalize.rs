//! Whole-IDL normalization.
//!
//! [`normalize`] rewrites every type occurrence of a [`RawIdl`] into a
//! [`TypeNode`], renames identifiers to camel case, lifts account bodies out
//! of the declared types and fills in discriminators. Each call owns a fresh
//! [`CompilationContext`]; nothing is shared between runs.

use log::debug;
use log::info;
use log::warn;
use serde_json::Map;

use crate::casing::snake_to_camel;
use crate::discriminator::Discriminator;
use crate::discriminator::account_discriminator;
use crate::discriminator::instruction_discriminator;
use crate::error::AdaptError;
use crate::idl::Account;
use crate::idl::AccountCollection;
use crate::idl::AccountReference;
use crate::idl::EnumVariant;
use crate::idl::Field;
use crate::idl::Fields;
use crate::idl::Idl;
use crate::idl::IdlGenerator;
use crate::idl::Instruction;
use crate::idl::InstructionAccountItem;
use crate::idl::TypeDefinition;
use crate::idl::TypeDefinitionBody;
use crate::idl::raw::RawAccount;
use crate::idl::raw::RawField;
use crate::idl::raw::RawFields;
use crate::idl::raw::RawGenericArg;
use crate::idl::raw::RawIdl;
use crate::idl::raw::RawInstruction;
use crate::idl::raw::RawInstructionAccountItem;
use crate::idl::raw::RawType;
use crate::idl::raw::RawTypeBody;
use crate::resolve::GeneratedTypes;
use crate::resolve::PrimitiveTable;
use crate::resolve::ResolutionChain;
use crate::resolve::TypeFallback;
use crate::resolve::TypeMatcher;
use crate::types::TypeNode;

pub type PreHook = Box<dyn Fn(RawIdl) -> RawIdl>;
pub type PostHook = Box<dyn Fn(Idl) -> Idl>;

/// Library level configuration of one normalization run.
#[derive(Default)]
pub struct NormalizeOptions {
	/// Runs on the raw IDL before anything else.
	pub pre_hook: Option<PreHook>,
	/// Runs on the normalized IDL as the last step.
	pub post_hook: Option<PostHook>,
	/// Appended after the built-in matchers, in order.
	pub matchers: Vec<Box<dyn TypeMatcher>>,
	pub fallback: Option<Box<dyn TypeFallback>>,
	pub primitives: PrimitiveTable,
}

impl NormalizeOptions {
	#[must_use]
	pub fn with_pre_hook(mut self, hook: impl Fn(RawIdl) -> RawIdl + 'static) -> Self {
		self.pre_hook = Some(Box::new(hook));
		self
	}

	#[must_use]
	pub fn with_post_hook(mut self, hook: impl Fn(Idl) -> Idl + 'static) -> Self {
		self.post_hook = Some(Box::new(hook));
		self
	}

	#[must_use]
	pub fn with_matcher(mut self, matcher: impl TypeMatcher + 'static) -> Self {
		self.matchers.push(Box::new(matcher));
		self
	}

	#[must_use]
	pub fn with_fallback(mut self, fallback: impl TypeFallback + 'static) -> Self {
		self.fallback = Some(Box::new(fallback));
		self
	}

	#[must_use]
	pub fn with_primitives(mut self, primitives: PrimitiveTable) -> Self {
		self.primitives = primitives;
		self
	}

	/// The resolution chain these options describe, borrowing the caller
	/// matchers.
	pub fn resolution_chain(&self) -> ResolutionChain<'_> {
		let mut chain = ResolutionChain::new(self.primitives);
		for matcher in &self.matchers {
			chain = chain.with_matcher(matcher.as_ref());
		}
		if let Some(fallback) = &self.fallback {
			chain = chain.with_fallback(fallback.as_ref());
		}
		chain
	}
}

/// Declared type definitions of the IDL being normalized, in declaration
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeRegistry {
	definitions: Vec<TypeDefinition>,
}

impl TypeRegistry {
	/// Insert a definition. A repeated name replaces the earlier entry in
	/// place.
	pub fn insert(&mut self, definition: TypeDefinition) {
		match self
			.definitions
			.iter_mut()
			.find(|def| def.name == definition.name)
		{
			Some(existing) => *existing = definition,
			None => self.definitions.push(definition),
		}
	}

	pub fn remove(&mut self, name: &str) -> Option<TypeDefinition> {
		let idx = self.definitions.iter().position(|def| def.name == name)?;
		Some(self.definitions.remove(idx))
	}

	pub fn into_definitions(self) -> Vec<TypeDefinition> {
		self.definitions
	}
}

/// State owned by a single normalization run.
#[derive(Debug, Default)]
pub struct CompilationContext {
	pub registry: TypeRegistry,
	pub generated: GeneratedTypes,
}

/// Normalize `raw` into the fully resolved interface model.
pub fn normalize(raw: RawIdl, options: &NormalizeOptions) -> Result<Idl, AdaptError> {
	let raw = match &options.pre_hook {
		Some(hook) => hook(raw),
		None => raw,
	};

	let generator = IdlGenerator::from_origin(raw.origin()).ok_or_else(|| {
		AdaptError::UnknownGenerator {
			origin: raw.origin().unwrap_or_default().to_owned(),
		}
	})?;
	info!(
		"normalizing {generator} IDL `{}`",
		raw.name.as_deref().unwrap_or("<unnamed>")
	);

	let idl = match generator {
		IdlGenerator::Anchor => {
			let chain = options.resolution_chain();
			normalize_anchor(raw, &chain)
		}
		IdlGenerator::Shank => normalize_shank(raw, options.primitives),
	};

	Ok(match &options.post_hook {
		Some(hook) => hook(idl),
		None => idl,
	})
}

fn normalize_anchor(raw: RawIdl, chain: &ResolutionChain<'_>) -> Idl {
	let RawIdl {
		address,
		version,
		name,
		instructions,
		accounts,
		types,
		errors,
		metadata,
		extra,
	} = raw;

	let mut context = CompilationContext::default();
	let CompilationContext {
		registry,
		generated,
	} = &mut context;
	let mut resolver = chain.resolver(generated);
	let mut convert = BodyConverter {
		rename_fields: true,
		resolve_name: |ty: &str| resolver.resolve(ty),
	};

	for def in &types {
		registry.insert(TypeDefinition {
			name: def.name.clone(),
			docs: def.docs.clone(),
			generics: def.generics.clone(),
			ty: convert.body(&def.ty),
			extra: def.extra.clone(),
		});
	}

	let accounts = accounts
		.iter()
		.map(|account| {
			let lifted = registry.remove(&account.name);
			let (body, type_docs, mut extra) = match lifted {
				Some(def) => (def.ty, def.docs, def.extra),
				None => (account_body(account, &mut convert), Vec::new(), Map::new()),
			};
			extra.extend(account.extra.clone());
			let discriminator = account
				.discriminator
				.as_deref()
				.and_then(Discriminator::from_slice)
				.unwrap_or_else(|| account_discriminator(&account.name));

			Account {
				name: account.name.clone(),
				discriminator: Some(discriminator),
				docs: if account.docs.is_empty() {
					type_docs
				} else {
					account.docs.clone()
				},
				ty: body,
				extra,
			}
		})
		.collect();

	let instructions = instructions
		.iter()
		.map(|ix| {
			let discriminator = ix
				.discriminator
				.as_deref()
				.and_then(Discriminator::from_slice)
				.unwrap_or_else(|| instruction_discriminator(&ix.name));
			convert_instruction(ix, Some(discriminator), &mut convert)
		})
		.collect();

	let mut types = std::mem::take(registry).into_definitions();
	for def in std::mem::take(generated).into_definitions() {
		if types.iter().any(|declared| declared.name == def.name) {
			warn!(
				"generated type `{}` collides with a declared type and is skipped",
				def.name
			);
			continue;
		}
		debug!("appending generated type `{}`", def.name);
		types.push(def);
	}

	Idl {
		address,
		version,
		name,
		instructions,
		accounts,
		types,
		errors,
		metadata,
		extra,
	}
}

/// Shank IDLs are already structured. Types are converted one to one and
/// names are kept as written.
fn normalize_shank(raw: RawIdl, primitives: PrimitiveTable) -> Idl {
	let mut convert = BodyConverter {
		rename_fields: false,
		resolve_name: |ty: &str| {
			primitives
				.lookup(ty)
				.unwrap_or_else(|| TypeNode::defined(ty))
		},
	};

	let types = raw
		.types
		.iter()
		.map(|def| {
			TypeDefinition {
				name: def.name.clone(),
				docs: def.docs.clone(),
				generics: def.generics.clone(),
				ty: convert.body(&def.ty),
				extra: def.extra.clone(),
			}
		})
		.collect();

	let accounts = raw
		.accounts
		.iter()
		.map(|account| {
			Account {
				name: account.name.clone(),
				discriminator: account
					.discriminator
					.as_deref()
					.and_then(Discriminator::from_slice),
				docs: account.docs.clone(),
				ty: account_body(account, &mut convert),
				extra: account.extra.clone(),
			}
		})
		.collect();

	let instructions = raw
		.instructions
		.iter()
		.map(|ix| {
			let discriminator = ix
				.discriminator
				.as_deref()
				.and_then(Discriminator::from_slice);
			convert_instruction(ix, discriminator, &mut convert)
		})
		.collect();

	Idl {
		address: raw.address,
		version: raw.version,
		name: raw.name,
		instructions,
		accounts,
		types,
		errors: raw.errors,
		metadata: raw.metadata,
		extra: raw.extra,
	}
}

fn account_body<F>(account: &RawAccount, convert: &mut BodyConverter<F>) -> TypeDefinitionBody
where
	F: FnMut(&str) -> TypeNode,
{
	match &account.ty {
		Some(body) => convert.body(body),
		None => {
			warn!(
				"account `{}` has no backing type, using an empty struct",
				account.name
			);
			TypeDefinitionBody::empty_struct()
		}
	}
}

fn convert_instruction<F>(
	ix: &RawInstruction,
	discriminator: Option<Discriminator>,
	convert: &mut BodyConverter<F>,
) -> Instruction
where
	F: FnMut(&str) -> TypeNode,
{
	debug!("converting instruction `{}`", ix.name);
	Instruction {
		name: convert.name(&ix.name),
		docs: ix.docs.clone(),
		discriminator,
		accounts: ix
			.accounts
			.iter()
			.map(|item| convert.account_item(item))
			.collect(),
		args: ix.args.iter().map(|arg| convert.field(arg)).collect(),
		legacy_optional_accounts_strategy: ix.legacy_optional_accounts_strategy,
		extra: ix.extra.clone(),
	}
}

/// Converts raw bodies into normalized ones. `resolve_name` handles every
/// textual type name.
struct BodyConverter<F> {
	rename_fields: bool,
	resolve_name: F,
}

impl<F> BodyConverter<F>
where
	F: FnMut(&str) -> TypeNode,
{
	fn name(&self, name: &str) -> String {
		if self.rename_fields {
			snake_to_camel(name)
		} else {
			name.to_owned()
		}
	}

	fn body(&mut self, body: &RawTypeBody) -> TypeDefinitionBody {
		match body {
			RawTypeBody::Struct { fields } => {
				TypeDefinitionBody::Struct {
					fields: self.fields(fields),
				}
			}
			RawTypeBody::Enum { variants } => {
				TypeDefinitionBody::Enum {
					variants: variants
						.iter()
						.map(|variant| {
							EnumVariant {
								name: variant.name.clone(),
								fields: variant.fields.as_ref().map(|fields| self.fields(fields)),
							}
						})
						.collect(),
				}
			}
			RawTypeBody::Alias { alias } => {
				TypeDefinitionBody::Alias {
					alias: self.ty(alias),
				}
			}
		}
	}

	fn fields(&mut self, fields: &RawFields) -> Fields {
		match fields {
			RawFields::Named(fields) => {
				Fields::Named(fields.iter().map(|field| self.field(field)).collect())
			}
			RawFields::Tuple(types) => Fields::Tuple(types.iter().map(|ty| self.ty(ty)).collect()),
		}
	}

	fn field(&mut self, field: &RawField) -> Field {
		Field {
			name: self.name(&field.name),
			docs: field.docs.clone(),
			ty: self.ty(&field.ty),
		}
	}

	fn account_item(&self, item: &RawInstructionAccountItem) -> InstructionAccountItem {
		match item {
			RawInstructionAccountItem::Account(account) => {
				InstructionAccountItem::Account(AccountReference {
					name: self.name(&account.name),
					writable: account.writable,
					signer: account.signer,
					optional: account.optional,
					docs: account.docs.clone(),
					address: account.address.clone(),
					extra: account.extra.clone(),
				})
			}
			RawInstructionAccountItem::Collection(collection) => {
				InstructionAccountItem::Collection(AccountCollection {
					name: self.name(&collection.name),
					accounts: collection
						.accounts
						.iter()
						.map(|member| self.account_item(member))
						.collect(),
				})
			}
		}
	}

	fn ty(&mut self, ty: &RawType) -> TypeNode {
		match ty {
			RawType::Named(name) => (self.resolve_name)(name),
			RawType::Option { option: inner } | RawType::COption { coption: inner } => {
				TypeNode::option(self.ty(inner))
			}
			RawType::Vec { vec } => TypeNode::vec(self.ty(vec)),
			RawType::Array { array: (elem, len) } => TypeNode::fixed_array(self.ty(elem), *len),
			RawType::Tuple { tuple } => {
				TypeNode::Tuple(tuple.iter().map(|item| self.ty(item)).collect())
			}
			RawType::HashMap {
				hash_map: (key, value),
			} => TypeNode::hash_map(self.ty(key), self.ty(value)),
			RawType::BTreeMap {
				btree_map: (key, value),
			} => TypeNode::btree_map(self.ty(key), self.ty(value)),
			RawType::Defined { defined } => {
				match (self.resolve_name)(defined.name()) {
					TypeNode::DefinedRef(mut reference) if !defined.generics().is_empty() => {
						reference.generics = self.generics(defined.generics());
						TypeNode::DefinedRef(reference)
					}
					node => node,
				}
			}
			RawType::Generic { generic } => TypeNode::defined(generic.as_str()),
		}
	}

	fn generics(&mut self, args: &[RawGenericArg]) -> Vec<TypeNode> {
		args.iter()
			.filter_map(|arg| {
				match arg {
					RawGenericArg::Type { ty } => Some(self.ty(ty)),
					RawGenericArg::Const { value } => {
						warn!("dropping const generic argument `{value}`");
						None
					}
				}
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::idl::raw::RawTypeDefinition;
	use crate::resolve::Resolver;
	use crate::types::PrimitiveKind;

	fn raw(value: serde_json::Value) -> RawIdl {
		serde_json::from_value(value).unwrap_or_else(|e| panic!("invalid raw idl: {e}"))
	}

	fn anchor_idl() -> RawIdl {
		raw(json!({
			"version": "0.1.0",
			"name": "data_store",
			"instructions": [{
				"name": "initialize_store",
				"accounts": [
					{ "name": "store", "isMut": true, "isSigner": false },
					{ "name": "payer", "isMut": true, "isSigner": true },
					{ "name": "system_program", "isMut": false, "isSigner": false }
				],
				"args": [
					{ "name": "max_items", "type": "u32" },
					{ "name": "initial_items", "type": { "defined": "HashMap<String,DataItem>" } }
				]
			}],
			"accounts": [{ "name": "Store", "type": { "kind": "struct", "fields": [] } }],
			"types": [
				{
					"name": "Store",
					"type": { "kind": "struct", "fields": [
						{ "name": "item_count", "type": "u32" },
						{ "name": "items", "type": { "defined": "BTreeMap<String,DataItem>" } }
					] }
				},
				{
					"name": "DataItem",
					"type": { "kind": "struct", "fields": [
						{ "name": "owner", "type": "publicKey" },
						{ "name": "tags", "type": { "vec": "string" } }
					] }
				}
			]
		}))
	}

	fn normalized(idl: RawIdl) -> Idl {
		normalize(idl, &NormalizeOptions::default())
			.unwrap_or_else(|e| panic!("normalize failed: {e}"))
	}

	#[test]
	fn lifts_account_bodies_out_of_types() {
		let idl = normalized(anchor_idl());
		assert_eq!(idl.types.len(), 1);
		assert_eq!(idl.types[0].name, "DataItem");

		let store = idl
			.account("Store")
			.unwrap_or_else(|| panic!("missing Store account"));
		assert_eq!(store.discriminator, Some(account_discriminator("Store")));
		let TypeDefinitionBody::Struct {
			fields: Fields::Named(fields),
		} = &store.ty
		else {
			panic!("expected named struct fields");
		};
		assert_eq!(fields[0].name, "itemCount");
		assert_eq!(
			fields[1].ty,
			TypeNode::btree_map(PrimitiveKind::String.into(), TypeNode::defined("DataItem"))
		);
	}

	#[test]
	fn renames_instructions_and_computes_discriminators() {
		let idl = normalized(anchor_idl());
		let ix = idl
			.instruction("initializeStore")
			.unwrap_or_else(|| panic!("instruction not renamed"));
		assert_eq!(ix.discriminator, Some(instruction_discriminator("initialize_store")));
		let names: Vec<_> = ix.accounts.iter().map(InstructionAccountItem::name).collect();
		assert_eq!(names, vec!["store", "payer", "systemProgram"]);
		assert_eq!(ix.args[0].name, "maxItems");
		assert_eq!(
			ix.args[1].ty,
			TypeNode::hash_map(PrimitiveKind::String.into(), TypeNode::defined("DataItem"))
		);
	}

	#[test]
	fn keeps_declared_discriminators() {
		let mut idl = anchor_idl();
		idl.instructions[0].discriminator = Some(vec![1, 2, 3, 4, 5, 6, 7, 8]);
		idl.accounts[0].discriminator = Some(vec![9; 8]);
		let idl = normalized(idl);
		assert_eq!(
			idl.instructions[0].discriminator,
			Some(Discriminator([1, 2, 3, 4, 5, 6, 7, 8]))
		);
		assert_eq!(idl.accounts[0].discriminator, Some(Discriminator([9; 8])));
	}

	#[test]
	fn accounts_without_types_keep_inline_body_or_empty() {
		let idl = normalized(raw(json!({
			"instructions": [],
			"accounts": [
				{ "name": "Counter", "type": { "kind": "struct", "fields": [
					{ "name": "current_count", "type": "u64" }
				] } },
				{ "name": "Marker" }
			]
		})));
		let counter = idl
			.account("Counter")
			.unwrap_or_else(|| panic!("missing Counter"));
		assert_eq!(counter.ty.type_nodes(), vec![&TypeNode::from(PrimitiveKind::U64)]);
		let marker = idl
			.account("Marker")
			.unwrap_or_else(|| panic!("missing Marker"));
		assert_eq!(marker.ty, TypeDefinitionBody::empty_struct());
	}

	#[test]
	fn attaches_declared_generics_and_coption() {
		let idl = normalized(raw(json!({
			"instructions": [{
				"name": "wrap",
				"accounts": [],
				"args": [
					{ "name": "value", "type": { "defined": {
						"name": "Wrapper",
						"generics": [
							{ "kind": "type", "type": "u64" },
							{ "kind": "const", "value": "4" }
						]
					} } },
					{ "name": "delegate", "type": { "coption": "publicKey" } }
				]
			}]
		})));
		let args = &idl.instructions[0].args;
		assert_eq!(
			args[0].ty,
			TypeNode::defined_with_generics("Wrapper", vec![PrimitiveKind::U64.into()])
		);
		assert_eq!(args[1].ty, TypeNode::option(PrimitiveKind::PublicKey.into()));
	}

	#[test]
	fn keeps_generic_parameters_aliases_and_layout_keys() {
		let idl = normalized(raw(json!({
			"instructions": [],
			"accounts": [{ "name": "Vault", "discriminator": [7, 7, 7, 7, 7, 7, 7, 7] }],
			"types": [
				{
					"name": "Vault",
					"serialization": "bytemuckunsafe",
					"repr": { "kind": "c" },
					"type": { "kind": "struct", "fields": [
						{ "name": "balance", "type": { "defined": "Amount" } }
					] }
				},
				{ "name": "Amount", "type": { "kind": "type", "alias": "u64" } },
				{
					"name": "Slot",
					"generics": [{ "kind": "type", "name": "T" }],
					"type": { "kind": "struct", "fields": [
						{ "name": "inner_value", "type": { "option": { "generic": "T" } } }
					] }
				}
			]
		})));

		let vault = idl
			.account("Vault")
			.unwrap_or_else(|| panic!("missing Vault"));
		assert_eq!(vault.extra.get("serialization"), Some(&json!("bytemuckunsafe")));
		assert_eq!(vault.extra.get("repr"), Some(&json!({ "kind": "c" })));

		let amount = idl
			.type_definition("Amount")
			.unwrap_or_else(|| panic!("missing Amount"));
		assert_eq!(
			amount.ty,
			TypeDefinitionBody::Alias {
				alias: PrimitiveKind::U64.into()
			}
		);

		let slot = idl
			.type_definition("Slot")
			.unwrap_or_else(|| panic!("missing Slot"));
		assert_eq!(slot.generics.len(), 1);
		assert_eq!(
			slot.ty.type_nodes(),
			vec![&TypeNode::option(TypeNode::defined("T"))]
		);

		let value = serde_json::to_value(&idl).unwrap_or_else(|e| panic!("serialize failed: {e}"));
		assert_eq!(value["types"][0]["type"], json!({ "kind": "type", "alias": "u64" }));
	}

	#[test]
	fn renames_collection_members() {
		let idl = normalized(raw(json!({
			"instructions": [{
				"name": "multi",
				"accounts": [{
					"name": "extra_signers",
					"accounts": [{ "name": "first_signer", "isMut": false, "isSigner": true }]
				}],
				"args": []
			}]
		})));
		let InstructionAccountItem::Collection(collection) = &idl.instructions[0].accounts[0] else {
			panic!("expected a collection");
		};
		assert_eq!(collection.name, "extraSigners");
		assert_eq!(collection.accounts[0].name(), "firstSigner");
	}

	#[test]
	fn shank_idls_take_the_structural_path() {
		let idl = normalized(raw(json!({
			"name": "vault",
			"instructions": [{
				"name": "CreateVault",
				"accounts": [{ "name": "vault_account", "isMut": true, "isSigner": false }],
				"args": [{ "name": "bump_seed", "type": "u8" }],
				"discriminant": { "type": "u8", "value": 0 }
			}],
			"accounts": [{ "name": "Vault", "type": { "kind": "struct", "fields": [
				{ "name": "owner_key", "type": "publicKey" },
				{ "name": "entries", "type": { "defined": "HashMap<String,Entry>" } }
			] } }],
			"types": [],
			"metadata": {
				"origin": "shank",
				"address": "Vau1t11111111111111111111111111111111111111"
			}
		})));

		let ix = &idl.instructions[0];
		assert_eq!(ix.name, "CreateVault");
		assert_eq!(ix.discriminator, None);
		assert_eq!(ix.accounts[0].name(), "vault_account");
		assert_eq!(ix.args[0].name, "bump_seed");
		assert!(ix.extra.contains_key("discriminant"));

		let vault = &idl.accounts[0];
		assert_eq!(vault.discriminator, None);
		assert_eq!(
			vault.ty.type_nodes(),
			vec![
				&TypeNode::from(PrimitiveKind::PublicKey),
				&TypeNode::defined("HashMap<String,Entry>")
			]
		);
		assert_eq!(
			idl.program_address(),
			Some("Vau1t11111111111111111111111111111111111111")
		);
	}

	#[test]
	fn unknown_origin_is_rejected() {
		let result = normalize(
			raw(json!({ "instructions": [], "metadata": { "origin": "quasar" } })),
			&NormalizeOptions::default(),
		);
		assert!(matches!(
			result,
			Err(AdaptError::UnknownGenerator { origin }) if origin == "quasar"
		));
	}

	#[test]
	fn hooks_run_before_and_after() {
		let options = NormalizeOptions::default()
			.with_pre_hook(|mut idl: RawIdl| {
				idl.types.push(RawTypeDefinition {
					name: "Injected".to_owned(),
					docs: Vec::new(),
					generics: Vec::new(),
					ty: RawTypeBody::Struct {
						fields: RawFields::default(),
					},
					extra: Map::new(),
				});
				idl
			})
			.with_post_hook(|mut idl: Idl| {
				idl.name = Some("renamed".to_owned());
				idl
			});
		let idl =
			normalize(anchor_idl(), &options).unwrap_or_else(|e| panic!("normalize failed: {e}"));
		assert!(idl.type_definition("Injected").is_some());
		assert_eq!(idl.name.as_deref(), Some("renamed"));
	}

	#[test]
	fn generated_types_are_appended_unless_declared() {
		let options = NormalizeOptions::default().with_matcher(
			|raw: &str, resolver: &mut Resolver<'_>| {
				let name = raw.strip_suffix("Set")?;
				for generated in [name, "DataItem"] {
					resolver.register_generated(TypeDefinition::new(
						format!("{generated}Entry"),
						TypeDefinitionBody::empty_struct(),
					));
				}
				Some(TypeNode::vec(TypeNode::defined(format!("{name}Entry"))))
			},
		);
		let mut idl = anchor_idl();
		idl.types.push(RawTypeDefinition {
			name: "DataItemEntry".to_owned(),
			docs: vec!["declared".to_owned()],
			generics: Vec::new(),
			ty: RawTypeBody::Struct {
				fields: RawFields::default(),
			},
			extra: Map::new(),
		});
		idl.instructions[0].args[0].ty = RawType::Named("TagSet".to_owned());

		let idl = normalize(idl, &options).unwrap_or_else(|e| panic!("normalize failed: {e}"));
		let names: Vec<_> = idl.types.iter().map(|def| def.name.as_str()).collect();
		assert_eq!(names, vec!["DataItem", "DataItemEntry", "TagEntry"]);
		assert_eq!(
			idl.type_definition("DataItemEntry").map(|def| def.docs.clone()),
			Some(vec!["declared".to_owned()])
		);
	}

	#[test]
	fn float_table_is_configurable() {
		let options = NormalizeOptions::default().with_primitives(PrimitiveTable::FloatAsBytes);
		let idl = normalize(
			raw(json!({ "instructions": [{
				"name": "set_price",
				"accounts": [],
				"args": [{ "name": "price", "type": "f64" }]
			}] })),
			&options,
		)
		.unwrap_or_else(|e| panic!("normalize failed: {e}"));
		assert_eq!(
			idl.instructions[0].args[0].ty,
			TypeNode::fixed_array(PrimitiveKind::U8.into(), 8)
		);
	}
}
