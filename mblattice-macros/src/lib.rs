/*
*
* Matrix literal macro used to write lattice vectors inline.
* The core crate wraps it as `lattice_vectors!`, and the facade re-exports that wrapper.
*
* Shape against the lattice dimension is a runtime concern of the resolver, here only
* the literal itself is checked: 1-3 rows, 1-3 items per row, every row the same length.
*/

use proc_macro::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::spanned::Spanned;
use syn::visit_mut::VisitMut;
use syn::{BinOp, ExprBinary, ExprCall, ExprLit, ExprPath, Lit};
use syn::{Expr, Result, Token};

const MAX_SIDE: usize = 3;

struct MatrixInput {
    rows: Vec<Vec<Expr>>,
}

/// `f64` methods that may be written bare inside a lattice literal, `cos(x)` for `f64::cos(x)`.
const FLOAT_FNS: [&str; 9] = [
    "abs",
    "cos",
    "sin",
    "tan",
    "acos",
    "asin",
    "atan",
    "sqrt",
    "to_radians",
];

fn is_int_literal(expr: &Expr) -> bool {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(_), ..
        }) => true,
        Expr::Paren(p) => is_int_literal(&p.expr),
        Expr::Unary(u) => is_int_literal(&u.expr),
        _ => false,
    }
}

fn bare_ident(path: &syn::Path) -> Option<&syn::Ident> {
    match (path.leading_colon, path.segments.len()) {
        (None, 1) => Some(&path.segments[0].ident),
        _ => None,
    }
}

/// One pass over a matrix item: spells out `PI` and bare float functions, and records the
/// first division with an integer literal operand, which would truncate before `f64::from`.
#[derive(Default)]
struct LatticeItem {
    error: Option<syn::Error>,
}

impl VisitMut for LatticeItem {
    fn visit_expr_mut(&mut self, expr: &mut Expr) {
        match expr {
            Expr::Path(ExprPath { path, .. })
                if bare_ident(path).is_some_and(|ident| ident == "PI" || ident == "pi") =>
            {
                *expr = syn::parse_quote!(::std::f64::consts::PI);
                return;
            }
            Expr::Call(ExprCall { func, .. }) => {
                if let Expr::Path(ExprPath { path, .. }) = &mut **func {
                    if let Some(ident) = bare_ident(path).cloned() {
                        if FLOAT_FNS.iter().any(|name| ident == name) {
                            *path = syn::parse_quote!(f64::#ident);
                        }
                    }
                }
            }
            Expr::Binary(ExprBinary {
                left, op: BinOp::Div(_), right, ..
            }) if self.error.is_none() => {
                if let Some(int) = [&**left, &**right].into_iter().find(|e| is_int_literal(e)) {
                    self.error = Some(syn::Error::new(
                        int.span(),
                        "integer division in a lattice entry; write `1.0 / 2.0` instead of `1 / 2`",
                    ));
                }
            }
            _ => {}
        }

        syn::visit_mut::visit_expr_mut(self, expr);
    }
}

fn lattice_item(input: ParseStream) -> Result<Expr> {
    let mut expr = input.parse::<Expr>()?;
    let mut item = LatticeItem::default();
    item.visit_expr_mut(&mut expr);
    match item.error {
        Some(err) => Err(err),
        None => Ok(expr),
    }
}

fn close_row(rows: &mut Vec<Vec<Expr>>, row: Vec<Expr>, span: proc_macro2::Span) -> Result<()> {
    if row.is_empty() {
        return Err(syn::Error::new(span, "empty row in matrix literal"));
    }
    if let Some(first) = rows.first() {
        if first.len() != row.len() {
            return Err(syn::Error::new(
                row[0].span(),
                format!(
                    "every row must have the same length: first row has {}, this row has {}",
                    first.len(),
                    row.len()
                ),
            ));
        }
    }
    if rows.len() == MAX_SIDE {
        return Err(syn::Error::new(
            row[0].span(),
            "a lattice matrix has at most 3 rows",
        ));
    }
    rows.push(row);
    Ok(())
}

impl Parse for MatrixInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut rows = Vec::new();
        let mut current_row = Vec::new();
        let span = input.span();

        while !input.is_empty() {
            if input.peek(Token!(;)) {
                let semi = input.parse::<Token!(;)>()?;
                close_row(&mut rows, std::mem::take(&mut current_row), semi.span())?;
                continue;
            }
            if input.peek(Token!(,)) {
                input.parse::<Token!(,)>()?;
                continue;
            }

            let expr = lattice_item(input)?;

            if current_row.len() == MAX_SIDE {
                return Err(syn::Error::new(
                    expr.span(),
                    "cannot have more than 3 items per row",
                ));
            }
            current_row.push(expr);
        }

        // last row without trailing `;`
        if !current_row.is_empty() {
            close_row(&mut rows, current_row, span)?;
        }

        if rows.is_empty() {
            return Err(syn::Error::new(span, "expect at least one row"));
        }

        Ok(MatrixInput { rows })
    }
}

/// Matrix literal with 1 to 3 rows, expanded to `Vec<Vec<f64>>`.
///
/// Rows are separated by `;`, items by whitespace or `,`. Every item goes through
/// `f64::from`, so integer literals are accepted but integer division is a compile error.
#[proc_macro]
pub fn matrix(tokens: TokenStream) -> TokenStream {
    let tokens: proc_macro2::TokenStream = tokens.into();

    let MatrixInput { rows } = match syn::parse2::<MatrixInput>(tokens) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error().into(),
    };

    let rows = rows.iter().map(|row| {
        let items = row.iter().map(|x| quote!(f64::from(#x)));
        quote!(::std::vec![#(#items,)*])
    });

    let expand = quote! {{
        let mat: ::std::vec::Vec<::std::vec::Vec<f64>> = ::std::vec![#(#rows,)*];
        mat
    }};

    expand.into()
}
