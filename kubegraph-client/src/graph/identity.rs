//! Stable node identities and DOT-safe labels derived from object names.
//!
//! Identities are FNV-1a 64 hashes of the UTF-8 name bytes. Two distinct
//! names that hash equally are treated as the same node; no collision
//! detection is performed.

const FNV1A_OFFSET: u64 = 0xcbf29ce484222325;
const FNV1A_PRIME: u64 = 0x100000001b3;

fn fnv1a<I>(bytes: I) -> u64
where
    I: IntoIterator<Item = u8>,
{
    bytes.into_iter().fold(FNV1A_OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV1A_PRIME)
    })
}

/// Identity of a single-part name, e.g. a namespace.
pub fn identity(name: &str) -> i64 {
    fnv1a(name.bytes()) as i64
}

/// Identity of a pod, hashed over `namespace + name` with no separator so
/// equally named pods in different namespaces get distinct nodes.
pub fn pod_identity(namespace: &str, name: &str) -> i64 {
    fnv1a(namespace.bytes().chain(name.bytes())) as i64
}

/// Quote `name` as a DOT string, escaping embedded quotes and backslashes.
pub fn escaped_label(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    for c in name.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Emit `value` as a bare DOT identifier when the grammar allows it,
/// otherwise as a quoted string.
pub fn dot_id(value: &str) -> String {
    let mut chars = value.chars();
    let bare = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if bare && !is_keyword(value) {
        value.to_string()
    } else {
        escaped_label(value)
    }
}

fn is_keyword(value: &str) -> bool {
    ["graph", "digraph", "subgraph", "node", "edge", "strict"]
        .iter()
        .any(|kw| kw.eq_ignore_ascii_case(value))
}
