use proc_macro2::Span;
use quote::{format_ident, quote};
use syn::LitStr;

/// Emits one `#[test]` per `.lox` file below the directory given as a string literal
/// (relative to `bin/tests`). Each test hands the file path to `lox_expect`.
#[proc_macro]
pub fn generate_tests(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let dir = syn::parse_macro_input!(input as LitStr).value();
    let root_dir = format!("{}/..", env!("CARGO_MANIFEST_DIR"));

    let tests = walkdir::WalkDir::new(format!("{root_dir}/{dir}"))
        .sort_by_file_name()
        .into_iter()
        .flatten()
        .filter(|entry| entry.path().extension() == Some("lox".as_ref()))
        .map(|entry| {
            let path = LitStr::new(&entry.path().to_string_lossy(), Span::call_site());
            let relative_path = entry.path().strip_prefix(&root_dir).unwrap().to_string_lossy();
            let test_ident = format_ident!(
                "test_{}",
                relative_path.replace(['/', '\\', '-'], "_").trim_end_matches(".lox")
            );
            quote! {
                #[test]
                fn #test_ident() {
                    lox_expect(#path);
                }
            }
        });

    quote! {
        #[ctor::ctor]
        fn init() {
            let _ = env_logger::builder().is_test(true).try_init();
        }

        #(#tests)*
    }
    .into()
}
