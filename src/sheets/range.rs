/// Build an A1 range such as `Sheet1!A:G` or `'Contact Form'!A1`.
/// Sheet names containing anything but ASCII letters, digits or `_` are
/// quoted, with embedded quotes doubled.
pub fn a1_range(sheet_name: &str, range: &str) -> String {
    format!("{}!{}", quote_sheet_name(sheet_name), range)
}

fn quote_sheet_name(name: &str) -> String {
    let plain = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if plain {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "''"))
    }
}
