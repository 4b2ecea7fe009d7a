use serde::Deserialize;
use serde::Serialize;

use crate::types::PrimitiveKind;
use crate::types::TypeNode;

/// Which primitive table the resolver consults first.
///
/// The two upstream generators disagree on `f64`: one emits it as a plain
/// float, the other expects an 8 byte array. Both are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrimitiveTable {
	#[default]
	Standard,
	/// `f64` resolves to `[u8; 8]`.
	FloatAsBytes,
}

impl PrimitiveTable {
	/// Case-insensitive lookup of a primitive type name.
	pub fn lookup(self, raw: &str) -> Option<TypeNode> {
		let kind = match raw.trim().to_ascii_lowercase().as_str() {
			"bool" => PrimitiveKind::Bool,
			"pubkey" | "publickey" => PrimitiveKind::PublicKey,
			"string" => PrimitiveKind::String,
			"bytes" => PrimitiveKind::Bytes,
			"u8" => PrimitiveKind::U8,
			"u16" => PrimitiveKind::U16,
			"u32" => PrimitiveKind::U32,
			"u64" => PrimitiveKind::U64,
			"u128" => PrimitiveKind::U128,
			"i8" => PrimitiveKind::I8,
			"i16" => PrimitiveKind::I16,
			"i32" => PrimitiveKind::I32,
			"i64" => PrimitiveKind::I64,
			"i128" => PrimitiveKind::I128,
			"f32" => PrimitiveKind::F32,
			"f64" => {
				return Some(match self {
					Self::Standard => PrimitiveKind::F64.into(),
					Self::FloatAsBytes => TypeNode::fixed_array(PrimitiveKind::U8.into(), 8),
				});
			}
			_ => return None,
		};
		Some(kind.into())
	}
}
