use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{Fields, ItemStruct, LitStr, Path, Token};

/// `#[error_domain("database.sql")]` or `#[error_domain("database.sql", crate = errata_domain)]`.
struct DomainArgs {
    domain: LitStr,
    krate: Path,
}

impl Parse for DomainArgs {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let domain: LitStr = input.parse()?;
        let mut krate: Path = syn::parse_quote!(::errata::domain);

        if input.parse::<Option<Token![,]>>()?.is_some() && !input.is_empty() {
            input.parse::<Token![crate]>()?;
            input.parse::<Token![=]>()?;
            krate = input.parse()?;
            let _ = input.parse::<Option<Token![,]>>()?;
        }

        if !input.is_empty() {
            return Err(input.error("unexpected tokens after error_domain arguments"));
        }

        Ok(Self { domain, krate })
    }
}

pub fn expand_domain(args: TokenStream, input: ItemStruct) -> TokenStream {
    let DomainArgs { domain, krate } = match syn::parse2::<DomainArgs>(args) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error(),
    };

    if !matches!(input.fields, Fields::Unit) {
        return syn::Error::new_spanned(&input, "error_domain expects a unit struct marker")
            .to_compile_error();
    }

    if let Err(reason) = check_domain(&domain.value()) {
        return syn::Error::new_spanned(&domain, reason).to_compile_error();
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        #input

        #[automatically_derived]
        impl #impl_generics #krate::ErrorDomain for #name #ty_generics #where_clause {
            const DOMAIN: &'static str = #domain;
        }
    }
}

/// Same grammar as `errata_domain::is_valid_domain`, reported with a reason.
fn check_domain(domain: &str) -> Result<(), String> {
    if domain.is_empty() {
        return Err("error domain cannot be empty".to_owned());
    }

    for component in domain.split('.') {
        if component.is_empty() {
            return Err(format!("error domain '{domain}' has an empty component"));
        }
        if !is_component(component) {
            return Err(format!(
                "invalid component '{component}' in error domain '{domain}': \
                 expected [a-z][a-z0-9-]*[a-z0-9]"
            ));
        }
    }

    Ok(())
}

fn is_component(component: &str) -> bool {
    let bytes = component.as_bytes();
    let (Some(first), Some(last)) = (bytes.first(), bytes.last()) else {
        return false;
    };

    bytes.len() >= 2
        && first.is_ascii_lowercase()
        && (last.is_ascii_lowercase() || last.is_ascii_digit())
        && bytes.iter().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
}


#[cfg(test)]
mod expansion_tests {
    use super::*;

    fn expand(args: TokenStream, item: TokenStream) -> String {
        let item: ItemStruct = syn::parse2(item).expect("valid struct");
        expand_domain(args, item).to_string()
    }

    #[test]
    fn implements_trait_on_default_path() {
        let out = expand(quote! { "billing.invoice" }, quote! { pub struct Billing; });
        assert!(out.contains(":: errata :: domain :: ErrorDomain for Billing"));
        assert!(out.contains("\"billing.invoice\""));
    }

    #[test]
    fn honours_crate_override() {
        let out = expand(quote! { "billing", crate = errata_domain }, quote! { pub struct Billing; });
        assert!(out.contains("errata_domain :: ErrorDomain for Billing"));
    }

    #[test]
    fn invalid_domain_becomes_compile_error() {
        let out = expand(quote! { "Billing" }, quote! { pub struct Billing; });
        assert!(out.contains("compile_error"));
        assert!(out.contains("invalid component"));
    }

    #[test]
    fn non_unit_struct_is_rejected() {
        let out = expand(quote! { "billing" }, quote! { pub struct Billing { id: u32 } });
        assert!(out.contains("unit struct marker"));
    }
}
