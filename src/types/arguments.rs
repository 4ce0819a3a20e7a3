//! Resolved constructor arguments.

use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::Key;
use crate::registration::AnyArc;
use crate::types::Parameter;

struct Slot {
    parameter: Parameter,
    value: Option<AnyArc>,
}

/// Constructor arguments in declaration order.
///
/// A slot is absent when its parameter is untyped or names a type the
/// container does not know. Constructors decide whether that is acceptable:
/// [`get`](Self::get) fails with `MissingArgument`, [`optional`](Self::optional)
/// yields `None`.
pub struct Arguments {
    type_name: Key,
    slots: Vec<Slot>,
}

impl Arguments {
    pub(crate) fn new(type_name: Key) -> Self {
        Self {
            type_name,
            slots: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, parameter: Parameter, value: Option<AnyArc>) {
        self.slots.push(Slot { parameter, value });
    }

    /// The type being constructed.
    pub fn type_name(&self) -> &str {
        self.type_name.as_str()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether the argument at `index` was supplied.
    pub fn is_present(&self, index: usize) -> bool {
        self.raw(index).is_some()
    }

    pub fn raw(&self, index: usize) -> Option<&AnyArc> {
        self.slots.get(index).and_then(|slot| slot.value.as_ref())
    }

    /// Required argument of concrete type `T`.
    pub fn get<T: Send + Sync + 'static>(&self, index: usize) -> DiResult<Arc<T>> {
        self.optional(index)?.ok_or_else(|| self.missing(index))
    }

    /// Argument of concrete type `T`, `None` when absent.
    pub fn optional<T: Send + Sync + 'static>(&self, index: usize) -> DiResult<Option<Arc<T>>> {
        match self.raw(index) {
            None => Ok(None),
            Some(value) => value
                .clone()
                .downcast::<T>()
                .map(Some)
                .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>().to_string())),
        }
    }

    /// Required argument declared as an interface, read as `Arc<I>`.
    pub fn interface<I: ?Sized + Send + Sync + 'static>(&self, index: usize) -> DiResult<Arc<I>> {
        let value = self.raw(index).ok_or_else(|| self.missing(index))?;
        value
            .downcast_ref::<Arc<I>>()
            .cloned()
            .ok_or_else(|| DiError::TypeMismatch(std::any::type_name::<I>().to_string()))
    }

    fn missing(&self, index: usize) -> DiError {
        let parameter = self
            .slots
            .get(index)
            .map(|slot| slot.parameter.name.to_string())
            .unwrap_or_else(|| format!("#{index}"));
        DiError::MissingArgument {
            type_name: self.type_name.to_string(),
            parameter,
        }
    }
}
