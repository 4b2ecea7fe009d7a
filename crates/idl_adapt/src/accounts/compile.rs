use std::collections::HashMap;

use log::debug;
use serde::Serialize;

use super::InstructionOptions;
use super::OptionalAccountsStrategy;
use super::ProcessedAccountKey;
use crate::error::AccountMetasError;
use crate::known_pubkeys::KnownPubkey;

/// One account position in the compiled metas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMetaSlot {
	pub name: String,
	pub writable: bool,
	pub signer: bool,
	pub optional: bool,
	/// Address used when the caller does not supply one.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub default: Option<KnownPubkey>,
}

impl From<&ProcessedAccountKey> for AccountMetaSlot {
	fn from(key: &ProcessedAccountKey) -> Self {
		Self {
			name: key.name.clone(),
			writable: key.writable,
			signer: key.signer,
			optional: key.optional,
			default: key.known_pubkey.clone(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AccountMetaStep {
	/// Slots that are always present, in order.
	Fixed { slots: Vec<AccountMetaSlot> },
	/// A required account pushed after the fixed slots.
	Push { slot: AccountMetaSlot },
	/// An optional account pushed only when supplied. Every account in
	/// `requires` must be supplied as well.
	PushIfSupplied {
		slot: AccountMetaSlot,
		requires: Vec<String>,
	},
	/// Caller supplied remaining accounts, appended verbatim.
	ExtendRemaining,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledAccountMetas {
	pub strategy: OptionalAccountsStrategy,
	pub steps: Vec<AccountMetaStep>,
}

/// Compile processed keys into ordered account-meta steps.
pub fn compile_account_metas(
	keys: &[ProcessedAccountKey],
	options: &InstructionOptions,
) -> CompiledAccountMetas {
	let mut steps = match options.strategy {
		OptionalAccountsStrategy::DefaultToProgramId => {
			vec![AccountMetaStep::Fixed {
				slots: keys.iter().map(AccountMetaSlot::from).collect(),
			}]
		}
		OptionalAccountsStrategy::Legacy => compile_legacy(keys),
	};

	if options.remaining_accounts && !keys.is_empty() {
		steps.push(AccountMetaStep::ExtendRemaining);
	}

	debug!(
		"compiled {} account keys into {} steps ({:?})",
		keys.len(),
		steps.len(),
		options.strategy
	);
	CompiledAccountMetas {
		strategy: options.strategy,
		steps,
	}
}

fn compile_legacy(keys: &[ProcessedAccountKey]) -> Vec<AccountMetaStep> {
	let first_optional = keys
		.iter()
		.position(|key| key.optional)
		.unwrap_or(keys.len());
	let (fixed, tail) = keys.split_at(first_optional);

	let mut steps = vec![AccountMetaStep::Fixed {
		slots: fixed.iter().map(AccountMetaSlot::from).collect(),
	}];

	let mut earlier_optionals: Vec<String> = Vec::new();
	for key in tail {
		let slot = AccountMetaSlot::from(key);
		if key.optional {
			steps.push(AccountMetaStep::PushIfSupplied {
				slot,
				requires: earlier_optionals.clone(),
			});
			earlier_optionals.push(key.name.clone());
		} else {
			steps.push(AccountMetaStep::Push { slot });
		}
	}

	steps
}

/// A resolved account meta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMeta {
	pub pubkey: String,
	pub is_writable: bool,
	pub is_signer: bool,
}

impl AccountMeta {
	pub fn new(pubkey: impl Into<String>, is_writable: bool, is_signer: bool) -> Self {
		Self {
			pubkey: pubkey.into(),
			is_writable,
			is_signer,
		}
	}
}

/// Accounts provided by the caller of an instruction, keyed by account name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppliedAccounts {
	accounts: HashMap<String, String>,
	remaining: Vec<AccountMeta>,
}

impl SuppliedAccounts {
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with(mut self, name: impl Into<String>, pubkey: impl Into<String>) -> Self {
		self.insert(name, pubkey);
		self
	}

	#[must_use]
	pub fn with_remaining(mut self, remaining: Vec<AccountMeta>) -> Self {
		self.remaining = remaining;
		self
	}

	pub fn insert(&mut self, name: impl Into<String>, pubkey: impl Into<String>) {
		self.accounts.insert(name.into(), pubkey.into());
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.accounts.get(name).map(String::as_str)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.accounts.contains_key(name)
	}
}

impl CompiledAccountMetas {
	/// Evaluate the steps for `supplied`, producing the final ordered metas.
	pub fn resolve(
		&self,
		supplied: &SuppliedAccounts,
		program_id: &str,
	) -> Result<Vec<AccountMeta>, AccountMetasError> {
		let mut metas = Vec::new();

		for step in &self.steps {
			match step {
				AccountMetaStep::Fixed { slots } => {
					for slot in slots {
						let meta = match self.strategy {
							OptionalAccountsStrategy::DefaultToProgramId if slot.optional => {
								optional_defaulting(slot, supplied, program_id)
							}
							_ => required(slot, supplied, program_id)?,
						};
						metas.push(meta);
					}
				}
				AccountMetaStep::Push { slot } => {
					metas.push(required(slot, supplied, program_id)?);
				}
				AccountMetaStep::PushIfSupplied { slot, requires } => {
					let Some(pubkey) = supplied.get(&slot.name) else {
						continue;
					};
					let missing: Vec<String> = requires
						.iter()
						.filter(|name| !supplied.contains(name))
						.cloned()
						.collect();
					if !missing.is_empty() {
						return Err(AccountMetasError::OptionalAccountOrder {
							account: slot.name.clone(),
							missing,
						});
					}
					metas.push(AccountMeta::new(pubkey, slot.writable, slot.signer));
				}
				AccountMetaStep::ExtendRemaining => {
					metas.extend(supplied.remaining.iter().cloned());
				}
			}
		}

		Ok(metas)
	}
}

fn required(
	slot: &AccountMetaSlot,
	supplied: &SuppliedAccounts,
	program_id: &str,
) -> Result<AccountMeta, AccountMetasError> {
	let pubkey = supplied
		.get(&slot.name)
		.or_else(|| slot.default.as_ref().map(|known| known.address(program_id)))
		.ok_or_else(|| {
			AccountMetasError::MissingRequiredAccount {
				account: slot.name.clone(),
			}
		})?;
	Ok(AccountMeta::new(pubkey, slot.writable, slot.signer))
}

fn optional_defaulting(
	slot: &AccountMetaSlot,
	supplied: &SuppliedAccounts,
	program_id: &str,
) -> AccountMeta {
	match supplied.get(&slot.name) {
		Some(pubkey) => AccountMeta::new(pubkey, slot.writable, slot.signer),
		None => {
			let pubkey = slot
				.default
				.as_ref()
				.map_or(program_id, |known| known.address(program_id));
			AccountMeta::new(pubkey, false, false)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::accounts::process_instruction_accounts;
	use crate::accounts::tests::instruction;
	use crate::accounts::tests::reference;

	const PROGRAM_ID: &str = "Prog111111111111111111111111111111111111111";

	fn a_b_c() -> Vec<ProcessedAccountKey> {
		process_instruction_accounts(&instruction(vec![
			reference("a", true, true, false),
			reference("b", true, false, true),
			reference("c", false, true, true),
		]))
	}

	fn legacy() -> InstructionOptions {
		InstructionOptions {
			strategy: OptionalAccountsStrategy::Legacy,
			remaining_accounts: false,
		}
	}

	#[test]
	fn legacy_guard_names_missing_earlier_optionals() {
		let compiled = compile_account_metas(&a_b_c(), &legacy());
		let supplied = SuppliedAccounts::new().with("a", "A1").with("c", "C1");
		let err = compiled
			.resolve(&supplied, PROGRAM_ID)
			.expect_err("guard should fail");
		assert_eq!(
			err,
			AccountMetasError::OptionalAccountOrder {
				account: "c".to_owned(),
				missing: vec!["b".to_owned()],
			}
		);
	}

	#[test]
	fn legacy_steps_layout() {
		let compiled = compile_account_metas(&a_b_c(), &legacy());
		assert_eq!(compiled.steps.len(), 3);
		assert!(matches!(&compiled.steps[0], AccountMetaStep::Fixed { slots } if slots.len() == 1));
		assert!(matches!(
			&compiled.steps[1],
			AccountMetaStep::PushIfSupplied { requires, .. } if requires.is_empty()
		));
		assert!(matches!(
			&compiled.steps[2],
			AccountMetaStep::PushIfSupplied { requires, .. } if requires == &["b".to_owned()]
		));
	}

	#[test]
	fn legacy_omits_unsupplied_tail() {
		let compiled = compile_account_metas(&a_b_c(), &legacy());
		let metas = compiled
			.resolve(
				&SuppliedAccounts::new().with("a", "A1").with("b", "B1"),
				PROGRAM_ID,
			)
			.unwrap_or_else(|e| panic!("resolve failed: {e}"));
		assert_eq!(
			metas,
			vec![
				AccountMeta::new("A1", true, true),
				AccountMeta::new("B1", true, false)
			]
		);
	}

	#[test]
	fn legacy_pushes_required_accounts_after_optionals() {
		let keys = process_instruction_accounts(&instruction(vec![
			reference("a", false, false, true),
			reference("systemProgram", false, false, false),
		]));
		let compiled = compile_account_metas(&keys, &legacy());
		assert!(matches!(&compiled.steps[0], AccountMetaStep::Fixed { slots } if slots.is_empty()));
		let metas = compiled
			.resolve(&SuppliedAccounts::new(), PROGRAM_ID)
			.unwrap_or_else(|e| panic!("resolve failed: {e}"));
		assert_eq!(
			metas,
			vec![AccountMeta::new(
				"11111111111111111111111111111111",
				false,
				false
			)]
		);
	}

	#[test]
	fn default_strategy_fills_missing_optionals_with_program_id() {
		let compiled = compile_account_metas(&a_b_c(), &InstructionOptions::default());
		let supplied = SuppliedAccounts::new().with("a", "A1").with("c", "C1");
		let metas = compiled
			.resolve(&supplied, PROGRAM_ID)
			.unwrap_or_else(|e| panic!("resolve failed: {e}"));
		assert_eq!(
			metas,
			vec![
				AccountMeta::new("A1", true, true),
				AccountMeta::new(PROGRAM_ID, false, false),
				AccountMeta::new("C1", false, true),
			]
		);
	}

	#[test]
	fn default_strategy_fills_missing_known_optionals_with_their_address() {
		let keys = process_instruction_accounts(&instruction(vec![
			reference("a", true, true, false),
			reference("tokenProgram", false, false, true),
			reference("rent", true, false, true),
		]));
		let compiled = compile_account_metas(&keys, &InstructionOptions::default());
		let metas = compiled
			.resolve(&SuppliedAccounts::new().with("a", "A1"), PROGRAM_ID)
			.unwrap_or_else(|e| panic!("resolve failed: {e}"));
		assert_eq!(
			metas,
			vec![
				AccountMeta::new("A1", true, true),
				AccountMeta::new("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA", false, false),
				AccountMeta::new("SysvarRent111111111111111111111111111111111", false, false),
			]
		);

		let supplied = SuppliedAccounts::new()
			.with("a", "A1")
			.with("tokenProgram", "Token2022");
		let metas = compiled
			.resolve(&supplied, PROGRAM_ID)
			.unwrap_or_else(|e| panic!("resolve failed: {e}"));
		assert_eq!(metas[1], AccountMeta::new("Token2022", false, false));
	}

	#[test]
	fn missing_required_account_is_an_error() {
		let compiled = compile_account_metas(&a_b_c(), &InstructionOptions::default());
		let err = compiled
			.resolve(&SuppliedAccounts::new(), PROGRAM_ID)
			.expect_err("a is required");
		assert_eq!(
			err,
			AccountMetasError::MissingRequiredAccount {
				account: "a".to_owned()
			}
		);
	}

	#[test]
	fn remaining_accounts_extend_the_list() {
		let options = InstructionOptions {
			remaining_accounts: true,
			..InstructionOptions::default()
		};
		let compiled = compile_account_metas(&a_b_c(), &options);
		assert_eq!(compiled.steps.last(), Some(&AccountMetaStep::ExtendRemaining));

		let supplied = SuppliedAccounts::new()
			.with("a", "A1")
			.with_remaining(vec![AccountMeta::new("R1", true, false)]);
		let metas = compiled
			.resolve(&supplied, PROGRAM_ID)
			.unwrap_or_else(|e| panic!("resolve failed: {e}"));
		assert_eq!(metas.last(), Some(&AccountMeta::new("R1", true, false)));

		let empty = compile_account_metas(&[], &options);
		assert!(!empty.steps.contains(&AccountMetaStep::ExtendRemaining));
	}
}
