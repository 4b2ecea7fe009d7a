/// A type name applied to zero or more textual parameters, e.g.
/// `HashMap<String, Vec<u8>>` becomes `HashMap` with `["String", "Vec<u8>"]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenericType {
	pub type_name: String,
	pub parameters: Vec<String>,
}

/// Split a textual generic application into its name and parameters.
///
/// The scan never fails. Unbalanced brackets are accepted and whatever was
/// collected is returned, so malformed input ends up as an opaque reference
/// further down the chain instead of an error. Commas only separate
/// parameters at the first angle-bracket level and outside of `(..)` and
/// `[..]` groups.
pub fn parse_generic(input: &str) -> GenericType {
	let mut result = GenericType::default();
	let mut depth = 0usize;
	let mut group_depth = 0usize;
	let mut type_name = String::new();
	let mut param = String::new();
	let mut opened = false;

	for ch in input.chars() {
		match ch {
			'<' => {
				if depth == 0 {
					if opened {
						// content after a closed parameter list is ignored
						break;
					}
					opened = true;
				} else {
					param.push(ch);
				}
				depth += 1;
			}
			'>' if depth > 0 => {
				depth -= 1;
				if depth == 0 {
					result.parameters.push(param.trim().to_owned());
					param.clear();
				} else {
					param.push(ch);
				}
			}
			',' if depth == 1 && group_depth == 0 => {
				result.parameters.push(param.trim().to_owned());
				param.clear();
			}
			_ if depth > 0 => {
				match ch {
					'(' | '[' => group_depth += 1,
					')' | ']' => group_depth = group_depth.saturating_sub(1),
					_ => {}
				}
				param.push(ch);
			}
			_ if !opened => type_name.push(ch),
			_ => {}
		}
	}

	result.type_name = type_name.trim().to_owned();
	result
}

/// Split `input` on commas that are not nested inside `<..>`, `(..)` or
/// `[..]`. Items are trimmed.
pub fn split_top_level(input: &str) -> Vec<String> {
	let mut items = Vec::new();
	let mut depth = 0usize;
	let mut current = String::new();

	for ch in input.chars() {
		match ch {
			'<' | '(' | '[' => {
				depth += 1;
				current.push(ch);
			}
			'>' | ')' | ']' => {
				depth = depth.saturating_sub(1);
				current.push(ch);
			}
			',' if depth == 0 => {
				items.push(current.trim().to_owned());
				current.clear();
			}
			_ => current.push(ch),
		}
	}

	items.push(current.trim().to_owned());
	items
}
