//! Parsing of short expression fragments from documentation tags.
//!
//! The grammar is deliberately closed: a string literal, a numeric literal
//! (optionally negated), a boolean literal, or a two-segment qualified path
//! like `Level::Debug`. There is no open-ended expression evaluation; any
//! other fragment is a documentation error.

use syn::{Expr, ExprLit, ExprPath, ExprUnary, Lit, UnOp};

use crate::diagnostics::{Diagnostics, DiagnosticsKind};
use decli_core::{QualifiedPath, Value};

/// Parses a single expression fragment into a typed literal or
/// qualified-reference value.
pub fn parse_literal(text: &str) -> Result<Value, Diagnostics> {
    let fragment = text.trim();

    let expr: Expr = syn::parse_str(fragment).map_err(|_| malformed(fragment))?;

    match expr {
        Expr::Lit(ExprLit { lit, .. }) => literal_value(fragment, &lit, false),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => match *expr {
            Expr::Lit(ExprLit { lit, .. }) => literal_value(fragment, &lit, true),
            _ => Err(malformed(fragment)),
        },
        Expr::Path(ExprPath { path, .. }) => qualified_path(fragment, &path),
        _ => Err(malformed(fragment)),
    }
}

fn literal_value(fragment: &str, lit: &Lit, negated: bool) -> Result<Value, Diagnostics> {
    match lit {
        Lit::Str(s) if !negated => Ok(Value::Str(s.value())),
        Lit::Bool(b) if !negated => Ok(Value::Bool(b.value)),
        Lit::Int(i) => {
            let value = i.base10_parse::<i64>().map_err(|_| malformed(fragment))?;
            let value = if negated { -value } else { value };
            Ok(Value::Num(value.into()))
        }
        Lit::Float(f) => {
            let value = f.base10_parse::<f64>().map_err(|_| malformed(fragment))?;
            let value = if negated { -value } else { value };
            serde_json::Number::from_f64(value)
                .map(Value::Num)
                .ok_or_else(|| malformed(fragment))
        }
        _ => Err(malformed(fragment)),
    }
}

fn qualified_path(fragment: &str, path: &syn::Path) -> Result<Value, Diagnostics> {
    let segments: Vec<_> = path.segments.iter().collect();

    let [qualifier, member] = segments.as_slice() else {
        return Err(malformed(fragment)
            .note("a qualified path must have exactly two segments, e.g. `Level::Debug`"));
    };
    if !qualifier.arguments.is_none() || !member.arguments.is_none() {
        return Err(malformed(fragment));
    }

    Ok(Value::Path(QualifiedPath::new(
        qualifier.ident.to_string(),
        member.ident.to_string(),
    )))
}

fn malformed(fragment: &str) -> Diagnostics {
    Diagnostics::new(
        DiagnosticsKind::DocTagParse,
        format!("`{fragment}` is not a recognized literal"),
    )
    .help("expected a string literal, a numeric literal, or a qualified enum-member path")
}
