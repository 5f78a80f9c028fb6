use proc_macro::TokenStream;
use quote::{quote, ToTokens};
use syn::{
    parse_macro_input, Expr,
    Member::{Named, Unnamed},
};

/// Longest rendering of a single argument inside an `arg_context!` message.
const ARG_PRINT_LIMIT: usize = 32;

/// Attaches the call site and the expression, with its arguments, to the error.
#[proc_macro]
pub fn arg_context(input: TokenStream) -> TokenStream {
    let expr = parse_macro_input!(input as Expr);
    with_location(&expr, describe_expr(&expr, true)).into()
}

/// Attaches the call site and the expression, with arguments elided, to the error.
#[proc_macro]
pub fn raw_context(input: TokenStream) -> TokenStream {
    let expr = parse_macro_input!(input as Expr);
    with_location(&expr, describe_expr(&expr, false)).into()
}

fn with_location(expr: &Expr, description: proc_macro2::TokenStream) -> proc_macro2::TokenStream {
    quote! {
        {
            use anyhow::Context;

            let loc = std::panic::Location::caller();

            #expr.with_context(|| {
                format!(
                    "[{}:{}:{}] {}",
                    loc.file(),
                    loc.line(),
                    loc.column(),
                    #description
                )
            })
        }
    }
}

fn describe_args<'a>(
    args: impl Iterator<Item = &'a Expr>,
    print_args: bool,
) -> proc_macro2::TokenStream {
    if !print_args {
        return quote!(String::from("?"));
    }

    let rendered = args.map(|arg| {
        quote! {
            {
                let rendered = format!("{:?}", #arg);
                if rendered.chars().count() > #ARG_PRINT_LIMIT {
                    format!(
                        "{}…",
                        rendered.chars().take(#ARG_PRINT_LIMIT - 1).collect::<String>()
                    )
                } else {
                    rendered
                }
            }
        }
    });

    quote!(<Vec<String>>::from([#(#rendered),*]).join(", "))
}

fn path_string(tokens: impl ToTokens) -> String {
    tokens
        .to_token_stream()
        .to_string()
        .replace(" :: ", "::")
        .replace(" . ", ".")
}

fn describe_expr(expr: &Expr, print_args: bool) -> proc_macro2::TokenStream {
    match expr {
        Expr::Call(call) => {
            let func_name = describe_expr(&call.func, print_args);
            let args = describe_args(call.args.iter(), print_args);

            quote!(format!("{}({})", #func_name, #args))
        }
        Expr::MethodCall(method) => {
            let receiver_name = describe_expr(&method.receiver, print_args);
            let method_name = method.method.to_string();
            let args = describe_args(method.args.iter(), print_args);

            quote!(format!("{}.{}({})", #receiver_name, #method_name, #args))
        }
        Expr::Path(path) => {
            let path = path_string(path);
            quote!(format!("{}", #path))
        }
        Expr::Field(field) => {
            let base_name = describe_expr(&field.base, print_args);
            let member_name = match &field.member {
                Named(ident) => ident.to_string(),
                Unnamed(index) => index.index.to_string(),
            };

            quote!(format!("{}.{}", #base_name, #member_name))
        }
        Expr::Reference(reference) => {
            let inner = describe_expr(&reference.expr, print_args);
            let prefix = if reference.mutability.is_some() { "&mut " } else { "&" };

            quote!(format!("{}{}", #prefix, #inner))
        }
        Expr::Paren(paren) => {
            let inner = describe_expr(&paren.expr, print_args);

            quote!(format!("({})", #inner))
        }
        Expr::Macro(ma) => {
            let path = path_string(&ma.mac.path);
            let tokens = ma.mac.tokens.to_string();

            quote!(format!("{}!({})", #path, #tokens))
        }
        Expr::Try(tr) => describe_expr(&tr.expr, print_args),
        _ => syn::Error::new_spanned(expr, "Unexpected expression in macro")
            .to_compile_error(),
    }
}
