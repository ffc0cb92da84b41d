use serde::Serialize;
use std::borrow::Cow;

/// One searchable result record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Entry {
    /// Display name shown for the result (shared by every entry of a symbol).
    pub label: String,
    /// Opaque URL/anchor of the documented item, as written in the source.
    pub locator: String,
    /// Owning context, e.g. `CppServer::Asio::SSLClient::onConnected()`.
    ///
    /// Kept verbatim, including XHTML entities; see [`Entry::scope_text`].
    pub scope: String,
    /// The locator points outside this documentation set (source flag `0`).
    pub external: bool,
}

impl Entry {
    /// The scope with XHTML entities decoded (`&amp;` → `&`).
    pub fn scope_text(&self) -> Cow<'_, str> {
        decode_entities(&self.scope)
    }
}

/// A source row: one token with its label and entries in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub token: String,
    pub label: String,
    pub entries: Vec<Entry>,
}

impl Symbol {
    /// A symbol with a single entry links straight to it; otherwise results
    /// are listed by scope.
    pub fn is_unique(&self) -> bool {
        self.entries.len() == 1
    }
}

const ENTITIES: &[(&str, char)] = &[
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#39;", '\''),
    ("&apos;", '\''),
];

/// Decodes the entities the generator escapes. Unknown entities are left alone.
pub(crate) fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(at) = rest.find('&') {
        out.push_str(&rest[..at]);
        rest = &rest[at..];
        match ENTITIES.iter().find(|(name, _)| rest.starts_with(name)) {
            Some((name, c)) => {
                out.push(*c);
                rest = &rest[name.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}
