//! Instruction account processing and account-meta compilation.
//!
//! [`process_instruction_accounts`] flattens an instruction's account items
//! into [`ProcessedAccountKey`]s. [`compile_account_metas`] turns those keys
//! into ordered [`AccountMetaStep`]s for one optional-accounts strategy, and
//! [`CompiledAccountMetas::resolve`] evaluates the steps against the accounts
//! a caller supplied.

mod compile;

use log::debug;
use serde::Serialize;

pub use self::compile::AccountMeta;
pub use self::compile::AccountMetaSlot;
pub use self::compile::AccountMetaStep;
pub use self::compile::CompiledAccountMetas;
pub use self::compile::SuppliedAccounts;
pub use self::compile::compile_account_metas;
use crate::casing::capitalize_first;
use crate::idl::AccountReference;
use crate::idl::Instruction;
use crate::idl::InstructionAccountItem;
use crate::known_pubkeys::KnownPubkey;
use crate::known_pubkeys::resolve_known_pubkey;

/// A flattened account reference with its default address resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedAccountKey {
	pub name: String,
	pub writable: bool,
	pub signer: bool,
	pub optional: bool,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub docs: Vec<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub known_pubkey: Option<KnownPubkey>,
}

impl ProcessedAccountKey {
	fn from_reference(reference: &AccountReference, name: String) -> Self {
		let known_pubkey = reference
			.address
			.as_ref()
			.map(|address| {
				KnownPubkey::Fixed {
					address: address.clone(),
				}
			})
			.or_else(|| resolve_known_pubkey(&name));

		Self {
			name,
			writable: reference.writable,
			signer: reference.signer,
			optional: reference.optional,
			docs: reference.docs.clone(),
			known_pubkey,
		}
	}
}

/// How optional accounts the caller leaves out are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OptionalAccountsStrategy {
	/// Every account keeps its slot. Missing optional accounts are replaced
	/// by the program id, or their known address, and are neither writable
	/// nor signers.
	#[default]
	DefaultToProgramId,
	/// Missing optional accounts are left out. Once one is supplied, every
	/// earlier optional account must be supplied too.
	Legacy,
}

impl OptionalAccountsStrategy {
	pub fn for_instruction(ix: &Instruction) -> Self {
		if ix.legacy_optional_accounts_strategy {
			Self::Legacy
		} else {
			Self::DefaultToProgramId
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstructionOptions {
	pub strategy: OptionalAccountsStrategy,
	/// Append caller supplied remaining accounts after the declared ones.
	pub remaining_accounts: bool,
}

impl InstructionOptions {
	pub fn for_instruction(ix: &Instruction, remaining_accounts: bool) -> Self {
		Self {
			strategy: OptionalAccountsStrategy::for_instruction(ix),
			remaining_accounts,
		}
	}
}

/// Name of a collection member once expanded, e.g. `signers` + `first`
/// becomes `signersItemFirst`.
pub fn collection_account_name(collection: &str, member: &str) -> String {
	format!("{collection}Item{}", capitalize_first(member))
}

/// Flatten the account items of `ix` in declaration order. Collection
/// members are expanded to one key each, nested collections included.
pub fn process_instruction_accounts(ix: &Instruction) -> Vec<ProcessedAccountKey> {
	let mut keys = Vec::new();
	for item in &ix.accounts {
		push_item(item, None, &mut keys);
	}
	debug!("instruction `{}` has {} account keys", ix.name, keys.len());
	keys
}

fn push_item(
	item: &InstructionAccountItem,
	prefix: Option<&str>,
	keys: &mut Vec<ProcessedAccountKey>,
) {
	let qualified = |name: &str| {
		match prefix {
			Some(collection) => collection_account_name(collection, name),
			None => name.to_owned(),
		}
	};

	match item {
		InstructionAccountItem::Account(reference) => {
			keys.push(ProcessedAccountKey::from_reference(
				reference,
				qualified(&reference.name),
			));
		}
		InstructionAccountItem::Collection(collection) => {
			let name = qualified(&collection.name);
			for member in &collection.accounts {
				push_item(member, Some(&name), keys);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::Map;

	use super::*;
	use crate::idl::AccountCollection;

	pub(super) fn reference(
		name: &str,
		writable: bool,
		signer: bool,
		optional: bool,
	) -> InstructionAccountItem {
		InstructionAccountItem::Account(AccountReference {
			name: name.to_owned(),
			writable,
			signer,
			optional,
			..AccountReference::default()
		})
	}

	pub(super) fn instruction(accounts: Vec<InstructionAccountItem>) -> Instruction {
		Instruction {
			name: "doThing".to_owned(),
			docs: Vec::new(),
			discriminator: None,
			accounts,
			args: Vec::new(),
			legacy_optional_accounts_strategy: false,
			extra: Map::new(),
		}
	}

	#[test]
	fn expands_collections() {
		let ix = instruction(vec![
			reference("payer", true, true, false),
			InstructionAccountItem::Collection(AccountCollection {
				name: "signers".to_owned(),
				accounts: vec![
					reference("first", false, true, false),
					reference("second", false, true, true),
				],
			}),
		]);
		let keys = process_instruction_accounts(&ix);
		let names: Vec<_> = keys.iter().map(|key| key.name.as_str()).collect();
		assert_eq!(names, vec!["payer", "signersItemFirst", "signersItemSecond"]);
		assert!(keys[1].signer);
		assert!(keys[2].optional);
	}

	#[test]
	fn expands_nested_collections() {
		let ix = instruction(vec![InstructionAccountItem::Collection(AccountCollection {
			name: "outer".to_owned(),
			accounts: vec![InstructionAccountItem::Collection(AccountCollection {
				name: "inner".to_owned(),
				accounts: vec![reference("leaf", false, false, false)],
			})],
		})]);
		let keys = process_instruction_accounts(&ix);
		assert_eq!(keys[0].name, "outerItemInnerItemLeaf");
	}

	#[test]
	fn binds_known_pubkeys() {
		let mut pinned = AccountReference {
			name: "oracle".to_owned(),
			address: Some("Orac1e1111111111111111111111111111111111111".to_owned()),
			..AccountReference::default()
		};
		pinned.docs.push("price feed".to_owned());
		let ix = instruction(vec![
			reference("systemProgram", false, false, false),
			InstructionAccountItem::Account(pinned),
			reference("authority", false, true, false),
		]);
		let keys = process_instruction_accounts(&ix);
		assert_eq!(
			keys[0].known_pubkey,
			Some(KnownPubkey::Fixed {
				address: "11111111111111111111111111111111".to_owned()
			})
		);
		assert_eq!(
			keys[1].known_pubkey,
			Some(KnownPubkey::Fixed {
				address: "Orac1e1111111111111111111111111111111111111".to_owned()
			})
		);
		assert_eq!(keys[1].docs, vec!["price feed"]);
		assert_eq!(keys[2].known_pubkey, None);
	}

	#[test]
	fn strategy_follows_instruction_flag() {
		let mut ix = instruction(Vec::new());
		assert_eq!(
			OptionalAccountsStrategy::for_instruction(&ix),
			OptionalAccountsStrategy::DefaultToProgramId
		);
		ix.legacy_optional_accounts_strategy = true;
		assert_eq!(
			InstructionOptions::for_instruction(&ix, true),
			InstructionOptions {
				strategy: OptionalAccountsStrategy::Legacy,
				remaining_accounts: true,
			}
		);
	}
}
