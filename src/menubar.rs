use std::io::Write;

use crossterm::{queue, style};

/// Print a key hint such as `"[a]dd"` or `"[Space] start"`: bracketed keys
/// bold, everything else dim. Returns the number of columns printed.
pub fn print_menu_item(out: &mut impl Write, item: &str) -> anyhow::Result<u16> {
    for (text, is_key) in split_keys(item) {
        let attr = if is_key {
            style::Attribute::Bold
        } else {
            style::Attribute::Dim
        };
        queue!(
            out,
            style::SetAttribute(attr),
            style::Print(text),
            style::SetAttribute(style::Attribute::Reset),
        )?;
    }
    Ok(item.chars().count() as u16)
}

/// Split a hint into runs, flagging the `[...]` runs. An unclosed `[` is
/// plain text.
fn split_keys(item: &str) -> Vec<(&str, bool)> {
    let mut runs = Vec::new();
    let mut rest = item;
    while !rest.is_empty() {
        let Some(open) = rest.find('[') else {
            runs.push((rest, false));
            break;
        };
        let Some(close) = rest[open..].find(']').map(|c| open + c) else {
            runs.push((rest, false));
            break;
        };
        if open > 0 {
            runs.push((&rest[..open], false));
        }
        runs.push((&rest[open..=close], true));
        rest = &rest[close + 1..];
    }
    runs
}
