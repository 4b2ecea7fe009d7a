//! Accounts whose address is known without the caller supplying it.

use serde::Serialize;

/// Well-known programs and sysvars, keyed by account name.
const KNOWN_PUBKEYS: &[(&str, &str)] = &[
	("systemProgram", "11111111111111111111111111111111"),
	("tokenProgram", "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"),
	("ataProgram", "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL"),
	(
		"associatedTokenProgram",
		"ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL",
	),
	("rent", "SysvarRent111111111111111111111111111111111"),
	("clock", "SysvarC1ock11111111111111111111111111111111"),
];

const PROGRAM_ID_ACCOUNT: &str = "programId";

/// Where the default address of an account comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum KnownPubkey {
	/// A fixed base58 address.
	Fixed { address: String },
	/// The id of the program the instruction targets.
	ProgramId,
}

impl KnownPubkey {
	/// The concrete address, given the instruction's program id.
	pub fn address<'a>(&'a self, program_id: &'a str) -> &'a str {
		match self {
			Self::Fixed { address } => address,
			Self::ProgramId => program_id,
		}
	}
}

/// Resolve an account name against the well-known table. Names match
/// regardless of case and `_`/`-` separators, so `system_program` and
/// `systemProgram` are the same account.
pub fn resolve_known_pubkey(name: &str) -> Option<KnownPubkey> {
	let name = fold_name(name);
	if name == fold_name(PROGRAM_ID_ACCOUNT) {
		return Some(KnownPubkey::ProgramId);
	}

	KNOWN_PUBKEYS
		.iter()
		.find(|(known, _)| fold_name(known) == name)
		.map(|&(_, address)| {
			KnownPubkey::Fixed {
				address: address.to_owned(),
			}
		})
}

fn fold_name(name: &str) -> String {
	name.chars()
		.filter(|ch| !matches!(ch, '_' | '-'))
		.map(|ch| ch.to_ascii_lowercase())
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolves_programs_and_sysvars() {
		assert_eq!(
			resolve_known_pubkey("systemProgram"),
			Some(KnownPubkey::Fixed {
				address: "11111111111111111111111111111111".to_owned()
			})
		);
		assert_eq!(
			resolve_known_pubkey("associated_token_program"),
			resolve_known_pubkey("ataProgram")
		);
		assert!(resolve_known_pubkey("rent").is_some());
		assert!(resolve_known_pubkey("clock").is_some());
		assert_eq!(resolve_known_pubkey("payer"), None);
	}

	#[test]
	fn program_id_binds_to_the_instruction_program() {
		let known = resolve_known_pubkey("program_id")
			.unwrap_or_else(|| panic!("programId should be known"));
		assert_eq!(known, KnownPubkey::ProgramId);
		assert_eq!(known.address("Prog1111"), "Prog1111");
	}
}
