use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, FieldsNamed};

pub fn derive_card(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let fields = named_fields(ast)?;
    let id_method = derive_card_id(ast, fields)?;
    let get_method = derive_card_get(fields)?;
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();
    let gen = quote! {
        impl #impl_generics ::cardex::data::Card for #name #ty_generics #where_clause {
            #id_method
            #get_method
        }
    };
    Ok(gen)
}

fn named_fields(ast: &DeriveInput) -> syn::Result<&FieldsNamed> {
    match &ast.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(fields),
            _ => Err(syn::Error::new_spanned(
                &ast.ident,
                "Card can only be derived for structs with named fields",
            )),
        },
        _ => Err(syn::Error::new_spanned(
            &ast.ident,
            "Card can only be derived for structs",
        )),
    }
}

fn is_id_field(field: &Field) -> syn::Result<bool> {
    let mut marked = false;
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("card")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("id") {
                marked = true;
                Ok(())
            } else {
                Err(meta.error("unsupported card attribute, expected `id`"))
            }
        })?;
    }
    Ok(marked)
}

fn field_key(field: &Field) -> String {
    let ident = field.ident.as_ref().expect("named field");
    ident.to_string().trim_start_matches("r#").to_string()
}

fn derive_card_id(ast: &DeriveInput, fields: &FieldsNamed) -> syn::Result<TokenStream> {
    let mut id_field = None;
    for field in fields.named.iter() {
        if is_id_field(field)? {
            id_field = Some(field);
            break;
        }
    }
    let id_field = id_field
        .or_else(|| fields.named.iter().find(|f| field_key(f) == "id"))
        .ok_or_else(|| {
            syn::Error::new_spanned(
                &ast.ident,
                "missing identity field, mark one with #[card(id)] or name it `id`",
            )
        })?;
    let ident = &id_field.ident;
    let gen = quote! {
        fn id(&self) -> String {
            ::std::string::ToString::to_string(&self.#ident)
        }
    };
    Ok(gen)
}

fn derive_card_get(fields: &FieldsNamed) -> syn::Result<TokenStream> {
    let idents = fields.named.iter().map(|f| &f.ident);
    let keys = fields.named.iter().map(field_key);
    let gen = quote! {
        fn get(&self, field: &str) -> ::cardex::data::Value {
            match field {
                #(#keys => ::cardex::data::Value::from(::std::clone::Clone::clone(&self.#idents)),)*
                _ => ::cardex::data::Value::Nil,
            }
        }
    };
    Ok(gen)
}
