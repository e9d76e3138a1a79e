//! Type classification for rewritten fields.
//!
//! A declared field type is reduced to one of four shapes before code
//! generation: scalar, optional, array, or optional array. The element type
//! is further split into "primitive" (a fixed closed set that serializes
//! directly) and "composite" (everything else, which must expose
//! `RawCodable`). Classification is purely structural; no type checking
//! happens here, so a composite type missing its `RawCodable` impl only
//! surfaces when the generated code is compiled.

use syn::{Error, GenericArgument, PathArguments, Result, Type};

/// Closed set of type names treated as primitives.
///
/// Primitives bypass the encode/decode registry and go straight through
/// serde. The table is immutable configuration, not extensible at runtime.
const PRIMITIVE_TYPES: &[&str] = &[
    "bool", "i8", "i16", "i32", "i64", "isize", "u8", "u16", "u32", "u64", "usize", "f32", "f64",
    "String",
];

/// Wrapper structure of a declared field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `T`
    Scalar,
    /// `Option<T>`
    Optional,
    /// `Vec<T>`
    Array,
    /// `Option<Vec<T>>`
    OptionalArray,
}

/// Classification verdict for one field type.
#[derive(Debug, Clone)]
pub struct TypeShape {
    pub shape: Shape,
    /// The element type with all supported wrappers removed.
    pub elem: Type,
    /// Whether the element type is in [`PRIMITIVE_TYPES`].
    pub elem_primitive: bool,
}

/// Recursive sum-type view of a type annotation.
///
/// Built by structural recursion over the syntax tree, then flattened into
/// a [`TypeShape`]. Keeping the intermediate form explicit makes the
/// unsupported-nesting diagnostics straightforward.
enum TypeNode {
    Scalar(Type),
    Optional(Box<TypeNode>),
    Array(Box<TypeNode>),
}

fn parse_node(ty: &Type) -> TypeNode {
    if let Some(inner) = wrapper_argument(ty, "Option") {
        return TypeNode::Optional(Box::new(parse_node(inner)));
    }
    if let Some(inner) = wrapper_argument(ty, "Vec") {
        return TypeNode::Array(Box::new(parse_node(inner)));
    }
    TypeNode::Scalar(ty.clone())
}

/// Returns the single generic argument of `Option<...>` / `Vec<...>`.
fn wrapper_argument<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

fn is_primitive(ty: &Type) -> bool {
    let Type::Path(type_path) = ty else {
        return false;
    };
    match type_path.path.segments.last() {
        Some(segment) => PRIMITIVE_TYPES.contains(&segment.ident.to_string().as_str()),
        None => false,
    }
}

/// Classifies a declared field type.
///
/// Accepts exactly `T`, `Option<T>`, `Vec<T>` and `Option<Vec<T>>`. Deeper
/// nesting (`Vec<Option<T>>`, `Option<Option<T>>`, `Vec<Vec<T>>`) is
/// rejected with a diagnostic rather than silently reinterpreted.
pub fn classify(ty: &Type) -> Result<TypeShape> {
    let (shape, node) = match parse_node(ty) {
        TypeNode::Scalar(elem) => (Shape::Scalar, TypeNode::Scalar(elem)),
        TypeNode::Optional(inner) => match *inner {
            TypeNode::Scalar(elem) => (Shape::Optional, TypeNode::Scalar(elem)),
            TypeNode::Array(element) => (Shape::OptionalArray, *element),
            TypeNode::Optional(_) => {
                return Err(Error::new_spanned(ty, "nested Option types are not supported"));
            }
        },
        TypeNode::Array(inner) => (Shape::Array, *inner),
    };

    let elem = match node {
        TypeNode::Scalar(elem) => elem,
        TypeNode::Optional(_) => {
            return Err(Error::new_spanned(
                ty,
                "arrays of Option elements are not supported; store the absent elements as a separate key instead",
            ));
        }
        TypeNode::Array(_) => {
            return Err(Error::new_spanned(ty, "nested Vec types are not supported"));
        }
    };

    let elem_primitive = is_primitive(&elem);
    Ok(TypeShape { shape, elem, elem_primitive })
}
