//! `#[raw(...)]` attribute resolution for fields and enum variants.
//!
//! One grammar serves both pipelines:
//!
//! - `#[raw("name")]` - first positional string literal overrides the
//!   storage key (fields) or the case label (variants); further positional
//!   literals are ignored (single-argument contract)
//! - `#[raw(default = <expr>)]` - fallback expression for reads (fields)
//! - `#[raw(skip)]` - leave the field as a real stored field (fields)
//! - `#[raw(prefix = "p-")]` - prefix matching for payload variants (enums)

use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Error, Expr, Field, Ident, LitStr, Result, Token, Type, Variant, Visibility};

/// One argument inside `#[raw(...)]`.
enum RawArg {
    Name(LitStr),
    Default(Expr),
    Prefix(LitStr),
    Skip,
}

impl Parse for RawArg {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.peek(LitStr) {
            return Ok(RawArg::Name(input.parse()?));
        }
        let ident: Ident = input.parse()?;
        match ident.to_string().as_str() {
            "skip" => Ok(RawArg::Skip),
            "default" => {
                input.parse::<Token![=]>()?;
                Ok(RawArg::Default(input.parse()?))
            }
            "prefix" => {
                input.parse::<Token![=]>()?;
                Ok(RawArg::Prefix(input.parse()?))
            }
            other => Err(Error::new(
                ident.span(),
                format!("unknown raw attribute `{other}`; expected a string literal, `default = ...`, `prefix = ...` or `skip`"),
            )),
        }
    }
}

/// Collected `#[raw(...)]` arguments of one member.
#[derive(Default)]
struct RawArgs {
    name: Option<LitStr>,
    default: Option<Expr>,
    prefix: Option<LitStr>,
    skip: bool,
}

fn resolve_args(attrs: &[syn::Attribute]) -> Result<RawArgs> {
    let mut resolved = RawArgs::default();
    for attr in attrs {
        if !attr.path().is_ident("raw") {
            continue;
        }
        let args = attr.parse_args_with(Punctuated::<RawArg, Token![,]>::parse_terminated)?;
        for arg in args {
            match arg {
                // first positional literal wins, the rest are ignored
                RawArg::Name(lit) => {
                    if resolved.name.is_none() {
                        resolved.name = Some(lit);
                    }
                }
                RawArg::Default(expr) => resolved.default = Some(expr),
                RawArg::Prefix(lit) => resolved.prefix = Some(lit),
                RawArg::Skip => resolved.skip = true,
            }
        }
    }
    Ok(resolved)
}

/// Resolved configuration of one struct field.
#[derive(Debug)]
pub struct FieldSpec {
    pub ident: Ident,
    pub vis: Visibility,
    pub ty: Type,
    /// Storage key; the field name unless overridden.
    pub key: String,
    /// Default expression used as read fallback; re-evaluated per read.
    pub default: Option<Expr>,
    /// Skipped fields stay real stored fields and are never rewritten.
    pub skipped: bool,
}

impl FieldSpec {
    /// Eligible fields are rewritten into accessors; the rest are retained
    /// as-is. Non-`pub` fields are left alone since the generated accessor
    /// pair would widen their visibility.
    pub fn eligible(&self) -> bool {
        !self.skipped && matches!(self.vis, Visibility::Public(_))
    }
}

/// Resolves one named struct field.
pub fn resolve_field(field: &Field) -> Result<FieldSpec> {
    let ident = field
        .ident
        .clone()
        .ok_or_else(|| Error::new_spanned(field, "raw_model requires named fields"))?;
    let args = resolve_args(&field.attrs)?;
    if let Some(prefix) = &args.prefix {
        return Err(Error::new_spanned(
            prefix,
            "`prefix` only applies to enum variants, not struct fields",
        ));
    }
    let key = args.name.map(|lit| lit.value()).unwrap_or_else(|| ident.to_string());
    Ok(FieldSpec {
        ident,
        vis: field.vis.clone(),
        ty: field.ty.clone(),
        key,
        default: args.default,
        skipped: args.skip,
    })
}

/// Resolved configuration of one enum variant.
pub struct VariantSpec {
    pub ident: Ident,
    /// Raw label; the variant identifier unless overridden.
    pub label: String,
    pub prefix: Option<String>,
}

/// Resolves one enum variant's `#[raw(...)]` attributes.
pub fn resolve_variant(variant: &Variant) -> Result<VariantSpec> {
    let args = resolve_args(&variant.attrs)?;
    if args.skip {
        return Err(Error::new_spanned(variant, "`skip` does not apply to enum variants"));
    }
    if let Some(default) = &args.default {
        return Err(Error::new_spanned(default, "`default` does not apply to enum variants"));
    }
    let label = args.name.map(|lit| lit.value()).unwrap_or_else(|| variant.ident.to_string());
    Ok(VariantSpec {
        ident: variant.ident.clone(),
        label,
        prefix: args.prefix.map(|lit| lit.value()),
    })
}

/// Drops `#[raw(...)]` helper attributes from a retained field so they do
/// not leak into the re-emitted struct.
pub fn strip_raw_attrs(field: &Field) -> Field {
    let mut stripped = field.clone();
    stripped.attrs.retain(|attr| !attr.path().is_ident("raw"));
    stripped
}
