//! Overload grouping: same-named callables of one owner scope.
//!
//! Groups keep first-seen order, and each group keeps its declarations in
//! source order. Identical signatures are not merged.

use crate::model::Decl;
use std::collections::HashMap;

/// Ordered map from function name to its overloads.
#[derive(Debug, Default)]
pub struct OverloadSet<'a> {
    groups: Vec<(String, Vec<Decl<'a>>)>,
    index: HashMap<String, usize>,
}

impl<'a> OverloadSet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_decls(decls: impl IntoIterator<Item = Decl<'a>>) -> Self {
        let mut set = Self::new();
        set.extend(decls);
        set
    }

    pub fn push(&mut self, decl: Decl<'a>) {
        let name = decl.spelling();
        match self.index.get(name) {
            Some(&i) => self.groups[i].1.push(decl),
            None => {
                self.index.insert(name.to_string(), self.groups.len());
                self.groups.push((name.to_string(), vec![decl]));
            }
        }
    }

    /// Overloads of `name`, in declaration order.
    pub fn get(&self, name: &str) -> Option<&[Decl<'a>]> {
        self.index.get(name).map(|&i| self.groups[i].1.as_slice())
    }

    /// Function names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Decl<'a>])> {
        self.groups
            .iter()
            .map(|(name, decls)| (name.as_str(), decls.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> Extend<Decl<'a>> for OverloadSet<'a> {
    fn extend<I: IntoIterator<Item = Decl<'a>>>(&mut self, iter: I) {
        for decl in iter {
            self.push(decl);
        }
    }
}
