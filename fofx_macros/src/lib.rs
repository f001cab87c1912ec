use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, FnArg, ItemFn, PatType, Type};

/// Turns a typed function into a namespace callable taking `&CallArgs`.
///
/// Parameters may be `f64`, `i64` or `Value`; the return type must be
/// `Result<T, EvalError>` with `Value: From<T>`. The generated function checks
/// the positional arity, rejects keyword arguments and converts each argument
/// before running the annotated body. `CallArgs`, `Value` and `EvalError` must
/// be in scope at the call site.
#[proc_macro_attribute]
pub fn namespace_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: ItemFn) -> syn::Result<proc_macro2::TokenStream> {
    let vis = &input.vis;
    let attrs = &input.attrs;
    let fn_name = &input.sig.ident;
    let fn_args = &input.sig.inputs;
    let fn_body = &input.block;
    let fn_output = &input.sig.output;
    let name_str = fn_name.to_string();
    let inner_name = format_ident!("{}_impl", fn_name);

    let mut arg_extractions = Vec::new();
    let mut arg_names = Vec::new();

    for (i, arg) in fn_args.iter().enumerate() {
        let FnArg::Typed(PatType { pat, ty, .. }) = arg else {
            return Err(syn::Error::new_spanned(arg, "namespace functions cannot take self"));
        };
        let arg_name = match **pat {
            syn::Pat::Ident(ref ident) => &ident.ident,
            _ => return Err(syn::Error::new_spanned(pat, "expected an identifier pattern")),
        };

        let type_ident = match **ty {
            Type::Path(ref type_path) => type_path
                .path
                .segments
                .last()
                .map(|segment| segment.ident.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        };

        let extract_code = match type_ident.as_str() {
            "f64" => quote! {
                let #arg_name: f64 = args.get_number(#name_str, #i)?;
            },
            "i64" => quote! {
                let #arg_name: i64 = args.get_integer(#name_str, #i)?;
            },
            "Value" => quote! {
                let #arg_name: Value = args.get_value(#name_str, #i)?.clone();
            },
            _ => {
                return Err(syn::Error::new_spanned(
                    ty,
                    "unsupported parameter type, expected f64, i64 or Value",
                ))
            }
        };

        arg_extractions.push(extract_code);
        arg_names.push(arg_name.clone());
    }

    let args_len = arg_names.len();
    Ok(quote! {
        #(#attrs)*
        #vis fn #fn_name(args: &CallArgs) -> Result<Value, EvalError> {
            fn #inner_name(#fn_args) #fn_output #fn_body

            args.expect_count(#name_str, #args_len)?;

            #(#arg_extractions)*

            #inner_name(#(#arg_names),*).map(Value::from)
        }
    })
}
