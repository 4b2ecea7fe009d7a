use super::Resolver;
use super::generic::parse_generic;
use super::generic::split_top_level;
use crate::types::PrimitiveKind;
use crate::types::TypeNode;

/// Matchers every resolution chain starts with, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinMatcher {
	/// `BTreeMap<K, V>`, `VecMap<K, V>` and any other `*Map<K, V>`.
	Map,
	Vec,
	/// `(A, B, ..)`, including the empty tuple `()`.
	Tuple,
	Option,
	/// `[T; N]`.
	Array,
	/// `Node` is a 32 byte hash.
	Node,
}

impl BuiltinMatcher {
	pub const ALL: [Self; 6] = [
		Self::Map,
		Self::Vec,
		Self::Tuple,
		Self::Option,
		Self::Array,
		Self::Node,
	];

	pub fn resolve(self, raw: &str, resolver: &mut Resolver<'_>) -> Option<TypeNode> {
		match self {
			Self::Map => resolve_map(raw, resolver),
			Self::Vec => {
				resolve_single_param(raw, "Vec", resolver).map(TypeNode::vec)
			}
			Self::Tuple => resolve_tuple(raw, resolver),
			Self::Option => {
				resolve_single_param(raw, "Option", resolver).map(TypeNode::option)
			}
			Self::Array => resolve_array(raw, resolver),
			Self::Node => {
				(raw == "Node").then(|| TypeNode::fixed_array(PrimitiveKind::U8.into(), 32))
			}
		}
	}
}

fn resolve_map(raw: &str, resolver: &mut Resolver<'_>) -> Option<TypeNode> {
	let parsed = parse_generic(raw);
	if !is_type_path(&parsed.type_name) {
		return None;
	}
	// `std::collections::BTreeMap` is matched by its last segment
	let base = parsed
		.type_name
		.rsplit("::")
		.next()
		.unwrap_or(&parsed.type_name);
	if !base.ends_with("Map") {
		return None;
	}
	let [key, value] = parsed.parameters.as_slice() else {
		return None;
	};

	let key = resolver.resolve(key);
	let value = resolver.resolve(value);
	let node = match base {
		"BTreeMap" => TypeNode::btree_map(key, value),
		"VecMap" => TypeNode::vec(TypeNode::Tuple(vec![key, value])),
		_ => TypeNode::hash_map(key, value),
	};
	Some(node)
}

fn is_type_path(name: &str) -> bool {
	!name.is_empty()
		&& name
			.chars()
			.all(|ch| ch.is_alphanumeric() || matches!(ch, '_' | ':'))
}

fn resolve_single_param(raw: &str, name: &str, resolver: &mut Resolver<'_>) -> Option<TypeNode> {
	let parsed = parse_generic(raw);
	if parsed.type_name != name {
		return None;
	}
	let [inner] = parsed.parameters.as_slice() else {
		return None;
	};
	Some(resolver.resolve(inner))
}

fn resolve_tuple(raw: &str, resolver: &mut Resolver<'_>) -> Option<TypeNode> {
	let inner = raw.strip_prefix('(')?.strip_suffix(')')?.trim();
	if inner.is_empty() {
		return Some(TypeNode::Tuple(Vec::new()));
	}

	let items = split_top_level(inner)
		.iter()
		.map(|item| resolver.resolve(item))
		.collect();
	Some(TypeNode::Tuple(items))
}

fn resolve_array(raw: &str, resolver: &mut Resolver<'_>) -> Option<TypeNode> {
	let inner = raw.strip_prefix('[')?.strip_suffix(']')?;
	let (elem, len) = inner.rsplit_once(';')?;
	let len = len.trim().parse::<usize>().ok()?;
	Some(TypeNode::fixed_array(resolver.resolve(elem), len))
}
