//! Acyclic visitor pattern (translates `ql/patterns/visitor.hpp`).
//!
//! QuantLib narrows a generic `AcyclicVisitor` to a `Visitor<T>` with a
//! `dynamic_cast` inside each `accept`. Here the narrowing is a lookup in a
//! table keyed by the [`TypeId`] of the concrete visited type: an algorithm
//! registers one handler per type it supports, and
//! [`AcyclicVisitable::accept`] resolves the handler for `Self` at the call
//! site. Neither side needs to know the full set of the other.
//!
//! ```
//! use ql_core::patterns::visitor::{AcyclicVisitable, AcyclicVisitor};
//! use ql_core::Result;
//!
//! struct Flat(f64);
//!
//! impl AcyclicVisitable for Flat {
//!     fn accept(&self, visitor: &mut AcyclicVisitor<'_>) -> Result<()> {
//!         visitor.visit(self)
//!     }
//! }
//!
//! let mut seen = Vec::new();
//! let mut visitor = AcyclicVisitor::new().on(|f: &Flat| seen.push(f.0));
//! Flat(0.2).accept(&mut visitor)?;
//! drop(visitor);
//! assert_eq!(seen, vec![0.2]);
//! # Ok::<(), ql_core::Error>(())
//! ```

use crate::errors::{Error, Result};
use std::any::{type_name, Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

/// A visitor specialized for objects of type `T`.
///
/// Corresponds to `QuantLib::Visitor<T>`.
pub trait Visitor<T> {
    /// Visit an object of type `T`.
    fn visit(&mut self, visitable: &T);
}

/// An object that can be dispatched to an [`AcyclicVisitor`].
///
/// Implementations narrow the visitor to their own concrete type, which is
/// normally a one-liner: `visitor.visit(self)`.
///
/// Corresponds to `QuantLib::AcyclicVisitable`.
pub trait AcyclicVisitable {
    /// Route `self` to the handler `visitor` registered for this concrete
    /// type.
    ///
    /// # Errors
    /// [`Error::Configuration`] if the visitor has no handler for this type.
    fn accept(&self, visitor: &mut AcyclicVisitor<'_>) -> Result<()>;
}

type Handler<'a> = Box<dyn FnMut(&dyn Any) + 'a>;

/// A type-erased visitor: a table of handlers keyed by concrete type.
///
/// Corresponds to `QuantLib::AcyclicVisitor`.
#[derive(Default)]
pub struct AcyclicVisitor<'a> {
    handlers: HashMap<TypeId, Handler<'a>>,
}

impl<'a> AcyclicVisitor<'a> {
    /// Create a visitor that supports no type.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register `handler` for the concrete type `T`, replacing any previous
    /// handler for `T`.
    pub fn on<T: Any>(mut self, mut handler: impl FnMut(&T) + 'a) -> Self {
        self.handlers.insert(
            TypeId::of::<T>(),
            Box::new(move |visitable: &dyn Any| {
                if let Some(visitable) = visitable.downcast_ref::<T>() {
                    handler(visitable);
                }
            }),
        );
        self
    }

    /// Register a [`Visitor<T>`] implementation for `T`.
    pub fn with_visitor<T: Any, V: Visitor<T>>(self, visitor: &'a mut V) -> Self {
        self.on::<T>(move |visitable| visitor.visit(visitable))
    }

    /// Register a shared [`Visitor<T>`] implementation for `T`.
    ///
    /// Use this form when one algorithm object handles several concrete
    /// types: register the same `RefCell` once per type.
    pub fn with_shared_visitor<T: Any, V: Visitor<T>>(self, visitor: &'a RefCell<V>) -> Self {
        self.on::<T>(move |visitable| visitor.borrow_mut().visit(visitable))
    }

    /// Return `true` if a handler is registered for `T`.
    pub fn supports<T: Any>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<T>())
    }

    /// Number of concrete types this visitor handles.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Return `true` if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run the handler registered for `T` exactly once.
    ///
    /// # Errors
    /// [`Error::Configuration`] naming `T` if no handler is registered; no
    /// handler runs in that case.
    pub fn visit<T: Any>(&mut self, visitable: &T) -> Result<()> {
        match self.handlers.get_mut(&TypeId::of::<T>()) {
            Some(handler) => {
                handler(visitable as &dyn Any);
                Ok(())
            }
            None => {
                let name = short_type_name::<T>();
                #[cfg(feature = "logging")]
                tracing::warn!(visited = %name, "visitor has no handler for type");
                Err(Error::Configuration(format!("not a {name} visitor")))
            }
        }
    }
}

impl std::fmt::Debug for AcyclicVisitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcyclicVisitor")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// `type_name` with every path shortened to its last segment, generic
/// arguments included (`Foo<alloc::string::String>` becomes `Foo<String>`).
fn short_type_name<T: ?Sized>() -> String {
    let full = type_name::<T>();
    let mut short = String::with_capacity(full.len());
    let mut start = 0;
    for (i, c) in full.char_indices() {
        if matches!(c, '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | '&' | ';' | '*') {
            short.push_str(last_segment(&full[start..i]));
            short.push(c);
            start = i + c.len_utf8();
        }
    }
    short.push_str(last_segment(&full[start..]));
    short
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
