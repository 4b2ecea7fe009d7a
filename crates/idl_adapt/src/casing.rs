/// Rename an identifier to the camel case used throughout normalized IDLs.
///
/// The whole name is lowercased first, then every `-` or `_` followed by an
/// ASCII letter or digit is removed and that character uppercased. Existing
/// camel humps are therefore not preserved (`myField` becomes `myfield`);
/// generated clients depend on this exact spelling.
pub fn snake_to_camel(name: &str) -> String {
	let lower = name.to_lowercase();
	let mut out = String::with_capacity(lower.len());
	let mut chars = lower.chars().peekable();

	while let Some(ch) = chars.next() {
		if matches!(ch, '-' | '_') {
			if let Some(&next) = chars.peek() {
				if next.is_ascii_lowercase() || next.is_ascii_digit() {
					out.push(next.to_ascii_uppercase());
					chars.next();
					continue;
				}
			}
		}
		out.push(ch);
	}

	out
}

/// `name` with its first character uppercased, the rest untouched.
pub fn capitalize_first(name: &str) -> String {
	let mut chars = name.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn converts_snake_and_kebab() {
		assert_eq!(snake_to_camel("init_escrow"), "initEscrow");
		assert_eq!(snake_to_camel("token-program"), "tokenProgram");
		assert_eq!(snake_to_camel("create_v2"), "createV2");
	}

	#[test]
	fn lowercases_before_converting() {
		assert_eq!(snake_to_camel("MyField"), "myfield");
		assert_eq!(snake_to_camel("SYSTEM_PROGRAM"), "systemProgram");
	}

	#[test]
	fn keeps_separators_without_follower() {
		assert_eq!(snake_to_camel("a__b"), "a_B");
		assert_eq!(snake_to_camel("trailing_"), "trailing_");
	}

	#[test]
	fn capitalizes_first_char() {
		assert_eq!(capitalize_first("first"), "First");
		assert_eq!(capitalize_first(""), "");
	}
}
