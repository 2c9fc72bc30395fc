//! Ordered, case-insensitive header storage.
//!
//! [`Headers`] keeps two maps in lockstep:
//!
//! - the ordered map from the declared-case name to its ordered values, which is
//!   what callers see when iterating
//! - the index from the lowercased name to the declared-case name, which is what
//!   every lookup goes through
//!
//! Every key of the first map has exactly one entry in the index and vice versa.
//! Casing is preserved as it was last declared by a caller, while lookups ignore
//! it entirely.
//!
//! Ordering is pure insertion order with one exception: the `Host` header is
//! always (re)inserted at the front, because RFC 7230 section 5.4 asks for it to
//! be the first header a client sends.

use std::collections::HashMap;

use indexmap::IndexMap;
use indexmap::map::Iter;

/// Separator used when a header's values are folded into a single line.
pub const HEADER_LINE_SEPARATOR: &str = ",";

pub(crate) const HOST_KEY: &str = "host";

/// The header multimap of a message.
///
/// Two header sets are equal when they hold the same names, casing and values in
/// the same order.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    values: IndexMap<String, Vec<String>>,
    names: HashMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of distinct header names.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates the headers in wire order, yielding the declared-case name and
    /// its values.
    pub fn iter(&self) -> Iter<'_, String, Vec<String>> {
        self.values.iter()
    }

    /// Returns the ordered mapping from declared-case name to values.
    pub fn as_map(&self) -> &IndexMap<String, Vec<String>> {
        &self.values
    }

    /// Returns true if a header with this name exists, ignoring case.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(&name.to_ascii_lowercase())
    }

    /// Returns the casing under which `name` was declared, if present.
    pub fn declared_name(&self, name: &str) -> Option<&str> {
        self.names.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Returns the values of a header, or an empty slice when it is absent.
    pub fn get(&self, name: &str) -> &[String] {
        self.declared_name(name).and_then(|declared| self.values.get(declared)).map_or(&[], Vec::as_slice)
    }

    /// Returns the values of a header joined with [`HEADER_LINE_SEPARATOR`], or an
    /// empty string when it is absent.
    pub fn get_line(&self, name: &str) -> String {
        self.get(name).join(HEADER_LINE_SEPARATOR)
    }

    /// Replaces every value stored under `name` (ignoring case) with `values`.
    ///
    /// An empty `values` removes the header. The casing of `name` becomes the
    /// declared casing for future reads.
    pub(crate) fn update(&mut self, name: &str, values: Vec<String>) {
        let key = name.to_ascii_lowercase();

        if let Some(declared) = self.names.remove(&key) {
            self.values.shift_remove(&declared);
        }

        if values.is_empty() {
            return;
        }

        if key == HOST_KEY {
            self.values.shift_insert(0, name.to_owned(), values);
        } else {
            self.values.insert(name.to_owned(), values);
        }
        self.names.insert(key, name.to_owned());
    }
}

impl PartialEq for Headers {
    fn eq(&self, other: &Self) -> bool {
        self.values.iter().eq(other.values.iter())
    }
}

impl Eq for Headers {}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
