//! Resolution of raw type strings into [`TypeNode`]s.
//!
//! A [`ResolutionChain`] tries, in order: the primitive table, the built-in
//! matchers, caller supplied matchers, an optional fallback and finally an
//! opaque [`TypeNode::DefinedRef`]. Resolution is total: input nested deeper
//! than [`MAX_RESOLUTION_DEPTH`] is kept opaque below that level.

pub mod generic;
pub mod matchers;
pub mod primitives;

use log::debug;
use log::warn;

pub use self::generic::GenericType;
pub use self::generic::parse_generic;
pub use self::matchers::BuiltinMatcher;
pub use self::primitives::PrimitiveTable;
use crate::idl::TypeDefinition;
use crate::types::TypeNode;

/// Nesting levels resolved before the remainder is kept as an opaque
/// reference.
pub const MAX_RESOLUTION_DEPTH: usize = 64;

/// A pluggable step of the resolution chain.
///
/// Returns `None` to let the next matcher try. `resolver` resolves nested
/// type expressions and registers synthesized type definitions.
pub trait TypeMatcher {
	fn resolve(&self, raw: &str, resolver: &mut Resolver<'_>) -> Option<TypeNode>;
}

impl<F> TypeMatcher for F
where
	F: Fn(&str, &mut Resolver<'_>) -> Option<TypeNode>,
{
	fn resolve(&self, raw: &str, resolver: &mut Resolver<'_>) -> Option<TypeNode> {
		self(raw, resolver)
	}
}

/// Last chance before a raw string becomes an opaque reference.
pub trait TypeFallback {
	fn resolve(&self, raw: &str, resolver: &mut Resolver<'_>) -> Option<TypeNode>;
}

impl<F> TypeFallback for F
where
	F: Fn(&str, &mut Resolver<'_>) -> Option<TypeNode>,
{
	fn resolve(&self, raw: &str, resolver: &mut Resolver<'_>) -> Option<TypeNode> {
		self(raw, resolver)
	}
}

/// One entry of the ordered matcher list.
#[derive(Clone, Copy)]
enum Matcher<'a> {
	Builtin(BuiltinMatcher),
	Custom(&'a dyn TypeMatcher),
}

impl Matcher<'_> {
	fn resolve(&self, raw: &str, resolver: &mut Resolver<'_>) -> Option<TypeNode> {
		match self {
			Self::Builtin(builtin) => builtin.resolve(raw, resolver),
			Self::Custom(custom) => custom.resolve(raw, resolver),
		}
	}
}

/// The configured resolution order. Borrows caller matchers for the
/// duration of one compilation run.
pub struct ResolutionChain<'a> {
	primitives: PrimitiveTable,
	matchers: Vec<Matcher<'a>>,
	fallback: Option<&'a dyn TypeFallback>,
}

impl Default for ResolutionChain<'_> {
	fn default() -> Self {
		Self::new(PrimitiveTable::default())
	}
}

impl<'a> ResolutionChain<'a> {
	/// A chain with the built-in matchers and no caller extensions.
	pub fn new(primitives: PrimitiveTable) -> Self {
		Self {
			primitives,
			matchers: BuiltinMatcher::ALL
				.iter()
				.copied()
				.map(Matcher::Builtin)
				.collect(),
			fallback: None,
		}
	}

	/// Append a caller matcher. Built-ins keep precedence.
	#[must_use]
	pub fn with_matcher(mut self, matcher: &'a dyn TypeMatcher) -> Self {
		self.matchers.push(Matcher::Custom(matcher));
		self
	}

	#[must_use]
	pub fn with_fallback(mut self, fallback: &'a dyn TypeFallback) -> Self {
		self.fallback = Some(fallback);
		self
	}

	/// A resolver writing synthesized definitions into `generated`.
	pub fn resolver<'r>(&'r self, generated: &'r mut GeneratedTypes) -> Resolver<'r> {
		Resolver {
			chain: self,
			generated,
			depth: 0,
		}
	}
}

/// Type definitions synthesized by matchers during one run.
///
/// Keyed by name: registering a name twice replaces the earlier definition
/// in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedTypes {
	definitions: Vec<TypeDefinition>,
}

impl GeneratedTypes {
	pub fn register(&mut self, definition: TypeDefinition) {
		if let Some(existing) = self
			.definitions
			.iter_mut()
			.find(|def| def.name == definition.name)
		{
			*existing = definition;
		} else {
			self.definitions.push(definition);
		}
	}

	pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
		self.definitions.iter().find(|def| def.name == name)
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn into_definitions(self) -> Vec<TypeDefinition> {
		self.definitions
	}
}

/// Resolves raw type strings against a chain, recording synthesized
/// definitions.
pub struct Resolver<'r> {
	chain: &'r ResolutionChain<'r>,
	generated: &'r mut GeneratedTypes,
	depth: usize,
}

impl Resolver<'_> {
	/// Resolve a raw type string. Never fails.
	pub fn resolve(&mut self, raw: &str) -> TypeNode {
		let raw = raw.trim();
		if self.depth >= MAX_RESOLUTION_DEPTH {
			warn!("type nested deeper than {MAX_RESOLUTION_DEPTH} levels kept opaque");
			return TypeNode::defined(raw);
		}

		self.depth += 1;
		let node = self.resolve_nested(raw);
		self.depth -= 1;
		node
	}

	fn resolve_nested(&mut self, raw: &str) -> TypeNode {
		if let Some(primitive) = self.chain.primitives.lookup(raw) {
			return primitive;
		}

		let chain = self.chain;
		for matcher in &chain.matchers {
			if let Some(node) = matcher.resolve(raw, self) {
				return node;
			}
		}

		if let Some(fallback) = chain.fallback {
			if let Some(node) = fallback.resolve(raw, self) {
				return node;
			}
		}

		debug!("type `{raw}` kept as an opaque reference");
		self.opaque(raw)
	}

	/// Register a synthesized definition to be appended to the IDL types.
	pub fn register_generated(&mut self, definition: TypeDefinition) {
		debug!("registered generated type `{}`", definition.name);
		self.generated.register(definition);
	}

	fn opaque(&mut self, raw: &str) -> TypeNode {
		let parsed = parse_generic(raw);
		if parsed.parameters.is_empty() {
			return TypeNode::defined(raw);
		}

		let generics = parsed
			.parameters
			.iter()
			.map(|param| self.resolve(param))
			.collect();
		TypeNode::defined_with_generics(parsed.type_name, generics)
	}
}

/// Resolve `raw` with the built-in chain and no caller extensions.
pub fn resolve_type(raw: &str) -> TypeNode {
	let chain = ResolutionChain::default();
	let mut generated = GeneratedTypes::default();
	chain.resolver(&mut generated).resolve(raw)
}
