/// Turns a display name into an anchor-safe token.
///
/// Only ASCII alphanumerics, whitespace, `-` and `_` survive lower-casing.
/// Whitespace/dash runs fold into one space, then whitespace/underscore runs
/// fold into one dash. Leading and trailing dashes are kept.
pub fn slug(name: &str) -> String {
    let lowered = name.to_lowercase();

    let mut spaced = String::with_capacity(lowered.len());
    let mut in_space_run = false;
    for ch in lowered.chars() {
        if is_slug_space(ch) || ch == '-' {
            if !in_space_run {
                spaced.push(' ');
                in_space_run = true;
            }
        } else if ch.is_ascii_alphanumeric() || ch == '_' {
            spaced.push(ch);
            in_space_run = false;
        }
    }

    let mut slug = String::with_capacity(spaced.len());
    let mut in_dash_run = false;
    for ch in spaced.chars() {
        if ch == ' ' || ch == '_' {
            if !in_dash_run {
                slug.push('-');
                in_dash_run = true;
            }
        } else {
            slug.push(ch);
            in_dash_run = false;
        }
    }
    slug
}

// The ECMAScript `\s` class: ASCII controls TAB..CR, the Zs category, the
// line/paragraph separators and the BOM. NEL is not part of it.
fn is_slug_space(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n' | '\u{0b}' | '\u{0c}' | '\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}
