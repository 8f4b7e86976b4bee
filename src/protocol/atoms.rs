//! Atom tokenizer
//!
//! Server reply lines carry whitespace-separated fields, except that a
//! field may be wrapped in double quotes to embed spaces (e.g. database
//! descriptions, multi-word headwords). No escaping of embedded quote
//! characters exists in the wire format.

/// Split a reply line into atoms.
///
/// Runs of whitespace separate atoms. An atom starting with `"` consumes
/// everything verbatim up to the closing `"`, with the quotes stripped
/// from the emitted atom. An unterminated quote takes the rest of the
/// line; that is not an error.
pub fn split_atoms(line: &str) -> Vec<String> {
    let mut atoms = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let mut atom = String::new();
        if c == '"' {
            chars.next(); // opening quote
            for ch in chars.by_ref() {
                if ch == '"' {
                    break;
                }
                atom.push(ch);
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                atom.push(ch);
                chars.next();
            }
        }
        atoms.push(atom);
    }

    atoms
}
