//! Class-body scoping for `#name` declarations and uses.
//!
//! A private name may be used anywhere inside the body of the class that
//! declares it, including before the declaration and inside nested classes.
//! Uses that cannot be resolved yet are recorded per frame and settled when
//! the frame is popped: merged into the enclosing frame, or reported once the
//! outermost class ends.

use indexmap::IndexMap;
use js_ast::Span;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::diagnostics::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateNameKind {
    /// A field or a method.
    Field,
    Get,
    Set,
    /// A getter and a setter sharing one name.
    Both,
}

impl PrivateNameKind {
    /// A second declaration is only allowed to complete an accessor pair.
    fn compose(self, other: PrivateNameKind) -> Option<PrivateNameKind> {
        match (self, other) {
            (PrivateNameKind::Get, PrivateNameKind::Set)
            | (PrivateNameKind::Set, PrivateNameKind::Get) => Some(PrivateNameKind::Both),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ClassFrame {
    bound: FxHashMap<String, PrivateNameKind>,
    /// Name → first unresolved use, in first-seen order.
    unresolved: IndexMap<String, Span>,
}

impl ClassFrame {
    pub fn kind_of(&self, name: &str) -> Option<PrivateNameKind> {
        self.bound.get(name).copied()
    }
}

#[derive(Debug, Default)]
pub struct PrivateNameScope {
    frames: Vec<ClassFrame>,
}

impl PrivateNameScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn current(&self) -> Option<&ClassFrame> {
        self.frames.last()
    }

    pub fn enter_class(&mut self) {
        self.frames.push(ClassFrame::default());
        trace!(depth = self.frames.len(), "enter class body");
    }

    /// Bind `name` in the innermost class body.
    pub fn declare(
        &mut self,
        name: &str,
        kind: PrivateNameKind,
        span: Span,
    ) -> Result<(), ParseError> {
        let Some(frame) = self.frames.last_mut() else {
            return Ok(());
        };

        let kind = match frame.bound.get(name) {
            Some(existing) => existing.compose(kind).ok_or_else(|| {
                ParseError::DuplicatePrivateElement {
                    name: name.to_string(),
                    span,
                }
            })?,
            None => kind,
        };
        frame.bound.insert(name.to_string(), kind);
        frame.unresolved.shift_remove(name);
        Ok(())
    }

    /// Record a `#name` reference. Resolution is deferred while a class body
    /// is open; with none open the name can never be declared.
    pub fn use_name(&mut self, name: &str, span: Span) -> Result<(), ParseError> {
        if self.is_bound(name) {
            return Ok(());
        }
        let Some(frame) = self.frames.last_mut() else {
            return Err(ParseError::UndeclaredPrivateName {
                name: name.to_string(),
                span,
            });
        };
        record_first_use(&mut frame.unresolved, name, span);
        Ok(())
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.frames
            .iter()
            .rev()
            .any(|frame| frame.bound.contains_key(name))
    }

    pub fn exit_class(&mut self) -> Result<(), ParseError> {
        let Some(popped) = self.frames.pop() else {
            return Ok(());
        };
        trace!(depth = self.frames.len(), "exit class body");

        if let Some(outer) = self.frames.last_mut() {
            if !popped.unresolved.is_empty() {
                debug!(
                    count = popped.unresolved.len(),
                    "propagating unresolved private names outward"
                );
            }
            for (name, span) in popped.unresolved {
                record_first_use(&mut outer.unresolved, &name, span);
            }
            return Ok(());
        }

        match popped
            .unresolved
            .into_iter()
            .min_by_key(|(_, span)| span.start)
        {
            Some((name, span)) => {
                debug!(name = %name, offset = span.start, "undeclared private name");
                Err(ParseError::UndeclaredPrivateName { name, span })
            }
            None => Ok(()),
        }
    }
}

fn record_first_use(unresolved: &mut IndexMap<String, Span>, name: &str, span: Span) {
    match unresolved.get_mut(name) {
        Some(first) if first.start <= span.start => {}
        Some(first) => *first = span,
        None => {
            unresolved.insert(name.to_string(), span);
        }
    }
}
