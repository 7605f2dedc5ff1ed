use std::collections::{HashMap, HashSet};

/// Drop unreferenced `id` attributes and/or rename the surviving ones to the shortest free names.
///
/// Works on serializer output where every attribute is written as `name="value"` and references
/// only appear as `url(#id)` or `href="#id"`. References to ids that are not declared are left
/// alone.
pub fn rewrite_ids(svg: &str, strip_unreferenced: bool, shorten: bool) -> String {
    if !strip_unreferenced && !shorten {
        return svg.to_owned();
    }

    let referenced: HashSet<&str> = span_values(svg, URL_REF, ')')
        .into_iter()
        .chain(span_values(svg, HREF_REF, '"'))
        .collect();

    let mut renames: HashMap<&str, Option<String>> = HashMap::new();
    let mut next = 0usize;
    for id in span_values(svg, ID_ATTR, '"') {
        if renames.contains_key(id) {
            continue;
        }
        let target = if strip_unreferenced && !referenced.contains(id) {
            None
        } else if shorten {
            next += 1;
            Some(short_name(next - 1))
        } else {
            Some(id.to_owned())
        };
        renames.insert(id, target);
    }

    let renamed = |id: &str| match renames.get(id) {
        Some(Some(name)) => name.clone(),
        _ => id.to_owned(),
    };
    let out = rewrite_spans(svg, ID_ATTR, '"', |id| match renames.get(id) {
        Some(None) => None,
        _ => Some(renamed(id)),
    });
    let out = rewrite_spans(&out, URL_REF, ')', |id| Some(renamed(id)));
    rewrite_spans(&out, HREF_REF, '"', |id| Some(renamed(id)))
}

const ID_ATTR: &str = " id=\"";
const URL_REF: &str = "url(#";
const HREF_REF: &str = "href=\"#";

/// `a`..`z`, `A`..`Z`, then `aa`, `ab`, ...
fn short_name(mut n: usize) -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut out = String::new();
    loop {
        out.insert(0, char::from(ALPHABET[n % ALPHABET.len()]));
        n /= ALPHABET.len();
        if n == 0 {
            break;
        }
        n -= 1;
    }
    out
}

fn span_values<'a>(svg: &'a str, open: &str, close: char) -> Vec<&'a str> {
    let mut values = Vec::new();
    let mut rest = svg;
    while let Some(pos) = rest.find(open) {
        let after = &rest[pos + open.len()..];
        let Some(end) = after.find(close) else {
            break;
        };
        values.push(&after[..end]);
        rest = &after[end + close.len_utf8()..];
    }
    values
}

/// Replace every `open value close` span; `None` drops the span entirely.
fn rewrite_spans(
    svg: &str,
    open: &str,
    close: char,
    mut map: impl FnMut(&str) -> Option<String>,
) -> String {
    let mut out = String::with_capacity(svg.len());
    let mut rest = svg;
    while let Some(pos) = rest.find(open) {
        let after = &rest[pos + open.len()..];
        let Some(end) = after.find(close) else {
            break;
        };
        out.push_str(&rest[..pos]);
        if let Some(value) = map(&after[..end]) {
            out.push_str(open);
            out.push_str(&value);
            out.push(close);
        }
        rest = &after[end + close.len_utf8()..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/svg/ids.rs"]
mod tests;
