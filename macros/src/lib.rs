use proc_macro::TokenStream;
use quote::quote;
use syn::{ parse::Parse, parse_macro_input, punctuated::Punctuated, Token, LitStr };

const ROWS: usize = 7;
const COLUMNS: usize = 5;
/// Bit of the top row. Lower rows follow towards bit 0.
const TOP_ROW: u8 = 0x40;

struct GlyphInput {
    rows: Punctuated<LitStr, Token![,]>,
}

impl Parse for GlyphInput {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let rows = Punctuated::parse_terminated(input)?;

        Ok(GlyphInput { rows })
    }
}

/// Turns seven rows of ASCII art into the five interior columns of a Hell glyph.
///
/// `#` is a keyed pixel, `.` or a space is muted. Rows go top to bottom.
///
/// ```ignore
/// const T: [u8; 5] = glyph![
///     "#####",
///     "..#..",
///     "..#..",
///     "..#..",
///     "..#..",
///     "..#..",
///     "..#..",
/// ];
/// ```
#[proc_macro]
pub fn glyph(input: TokenStream) -> TokenStream {
    let GlyphInput { rows } = parse_macro_input!(input as GlyphInput);

    if rows.len() != ROWS {
        return syn::Error::new_spanned(&rows, format!("glyph must have exactly {ROWS} rows"))
            .into_compile_error()
            .into();
    }

    let mut columns = [0u8; COLUMNS];
    for (row, lit) in rows.iter().enumerate() {
        let value = lit.value();
        if value.chars().count() != COLUMNS {
            return syn::Error::new_spanned(lit, format!("glyph rows must be {COLUMNS} pixels wide"))
                .into_compile_error()
                .into();
        }

        for (column, pixel) in value.chars().enumerate() {
            match pixel {
                '#' => columns[column] |= TOP_ROW >> row,
                '.' | ' ' => {}
                _ => {
                    return syn::Error::new_spanned(lit, "pixels must be '#', '.' or ' '")
                        .into_compile_error()
                        .into();
                }
            }
        }
    }

    let columns = columns.iter();

    quote!{
        [#(#columns,)*]
    }.into()
}
