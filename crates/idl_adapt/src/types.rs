//! Structured type tree produced by the resolution chain.
//!
//! Every type occurrence in a normalized IDL is one of these nodes. Nodes
//! serialize to the canonical anchor JSON type form and render back to a
//! textual type expression through `Display`.

use std::fmt;

use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeSeq;

/// Scalar types understood without further resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
	Bool,
	U8,
	U16,
	U32,
	U64,
	U128,
	I8,
	I16,
	I32,
	I64,
	I128,
	F32,
	F64,
	String,
	#[serde(rename = "publicKey")]
	PublicKey,
	Bytes,
}

impl PrimitiveKind {
	/// The canonical IDL spelling of the primitive.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Bool => "bool",
			Self::U8 => "u8",
			Self::U16 => "u16",
			Self::U32 => "u32",
			Self::U64 => "u64",
			Self::U128 => "u128",
			Self::I8 => "i8",
			Self::I16 => "i16",
			Self::I32 => "i32",
			Self::I64 => "i64",
			Self::I128 => "i128",
			Self::F32 => "f32",
			Self::F64 => "f64",
			Self::String => "string",
			Self::PublicKey => "publicKey",
			Self::Bytes => "bytes",
		}
	}
}

impl fmt::Display for PrimitiveKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A fully structured type.
///
/// `DefinedRef` is the terminal state for names that resolve to nothing more
/// specific. It may name a type declared in the same IDL or one supplied
/// externally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum TypeNode {
	#[serde(rename = "option")]
	Option(Box<TypeNode>),
	#[serde(rename = "vec")]
	Vec(Box<TypeNode>),
	#[serde(rename = "array")]
	FixedArray(Box<TypeNode>, usize),
	#[serde(rename = "tuple")]
	Tuple(Vec<TypeNode>),
	#[serde(rename = "hashMap")]
	HashMap(Box<TypeNode>, Box<TypeNode>),
	#[serde(rename = "bTreeMap")]
	BTreeMap(Box<TypeNode>, Box<TypeNode>),
	#[serde(rename = "defined")]
	DefinedRef(DefinedRef),
	#[serde(untagged)]
	Primitive(PrimitiveKind),
}

/// A reference to a named type, optionally applied to generic arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DefinedRef {
	pub name: String,
	#[serde(
		skip_serializing_if = "Vec::is_empty",
		serialize_with = "serialize_generics"
	)]
	pub generics: Vec<TypeNode>,
}

impl TypeNode {
	pub fn option(inner: TypeNode) -> Self {
		Self::Option(Box::new(inner))
	}

	pub fn vec(inner: TypeNode) -> Self {
		Self::Vec(Box::new(inner))
	}

	pub fn fixed_array(elem: TypeNode, len: usize) -> Self {
		Self::FixedArray(Box::new(elem), len)
	}

	pub fn hash_map(key: TypeNode, value: TypeNode) -> Self {
		Self::HashMap(Box::new(key), Box::new(value))
	}

	pub fn btree_map(key: TypeNode, value: TypeNode) -> Self {
		Self::BTreeMap(Box::new(key), Box::new(value))
	}

	/// A bare named reference without generic arguments.
	pub fn defined(name: impl Into<String>) -> Self {
		Self::DefinedRef(DefinedRef {
			name: name.into(),
			generics: Vec::new(),
		})
	}

	pub fn defined_with_generics(name: impl Into<String>, generics: Vec<TypeNode>) -> Self {
		Self::DefinedRef(DefinedRef {
			name: name.into(),
			generics,
		})
	}

	/// Visit this node and all nested nodes depth first, parents before
	/// children.
	pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a TypeNode)) {
		visit(self);
		match self {
			Self::Primitive(_) => {}
			Self::Option(inner) | Self::Vec(inner) | Self::FixedArray(inner, _) => {
				inner.walk(visit);
			}
			Self::Tuple(items) => {
				for item in items {
					item.walk(visit);
				}
			}
			Self::HashMap(key, value) | Self::BTreeMap(key, value) => {
				key.walk(visit);
				value.walk(visit);
			}
			Self::DefinedRef(defined) => {
				for generic in &defined.generics {
					generic.walk(visit);
				}
			}
		}
	}

	/// Names of every `DefinedRef` reachable from this node.
	pub fn defined_names(&self) -> Vec<&str> {
		let mut names = Vec::new();
		self.walk(&mut |node| {
			if let TypeNode::DefinedRef(defined) = node {
				names.push(defined.name.as_str());
			}
		});
		names
	}
}

impl From<PrimitiveKind> for TypeNode {
	fn from(kind: PrimitiveKind) -> Self {
		Self::Primitive(kind)
	}
}

impl fmt::Display for TypeNode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Primitive(kind) => write!(f, "{kind}"),
			Self::Option(inner) => write!(f, "Option<{inner}>"),
			Self::Vec(inner) => write!(f, "Vec<{inner}>"),
			Self::FixedArray(elem, len) => write!(f, "[{elem}; {len}]"),
			Self::Tuple(items) => {
				f.write_str("(")?;
				write_list(f, items)?;
				f.write_str(")")
			}
			Self::HashMap(key, value) => write!(f, "HashMap<{key}, {value}>"),
			Self::BTreeMap(key, value) => write!(f, "BTreeMap<{key}, {value}>"),
			Self::DefinedRef(defined) => write!(f, "{defined}"),
		}
	}
}

impl fmt::Display for DefinedRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.name)?;
		if !self.generics.is_empty() {
			f.write_str("<")?;
			write_list(f, &self.generics)?;
			f.write_str(">")?;
		}
		Ok(())
	}
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[TypeNode]) -> fmt::Result {
	for (idx, item) in items.iter().enumerate() {
		if idx > 0 {
			f.write_str(", ")?;
		}
		write!(f, "{item}")?;
	}
	Ok(())
}

#[derive(Serialize)]
struct TypeGenericArg<'a> {
	kind: &'static str,
	#[serde(rename = "type")]
	ty: &'a TypeNode,
}

fn serialize_generics<S: Serializer>(
	generics: &[TypeNode],
	serializer: S,
) -> Result<S::Ok, S::Error> {
	let mut seq = serializer.serialize_seq(Some(generics.len()))?;
	for ty in generics {
		seq.serialize_element(&TypeGenericArg { kind: "type", ty })?;
	}
	seq.end()
}
