//! Binding resolution and constructor auto-wiring.

use crate::container::Container;
use crate::error::{DiError, DiResult};
use crate::registration::{AnyArc, Binding, Strategy};
use crate::types::{Arguments, TypeKind};

impl Container {
    /// Produces the value of a bound identifier, consulting its singleton cell.
    pub(super) fn resolve_binding(&self, id: &str, binding: &Binding) -> DiResult<AnyArc> {
        match &binding.cell {
            Some(cell) => cell.get_or_try_init(|| self.invoke(id, &binding.strategy)),
            None => self.invoke(id, &binding.strategy),
        }
    }

    fn invoke(&self, id: &str, strategy: &Strategy) -> DiResult<AnyArc> {
        match strategy {
            Strategy::Factory(factory) => {
                tracing::trace!(id, "invoking factory");
                factory(self)
            }
            // Built directly: the target is not looked up as a binding again
            Strategy::TypeName(type_name) => self.build(type_name.as_str()),
            Strategy::Literal(value) => Ok(value.clone()),
        }
    }

    /// Builds an unbound identifier through the type catalog.
    pub(super) fn autowire(&self, id: &str) -> DiResult<AnyArc> {
        if !self.inner.config.autowire {
            return Err(DiError::NotFound(id.to_string()));
        }
        self.build(id)
    }

    fn build(&self, type_name: &str) -> DiResult<AnyArc> {
        let descriptor = self
            .inner
            .types
            .describe(type_name)
            .ok_or_else(|| DiError::NotFound(type_name.to_string()))?;

        let TypeKind::Concrete { parameters, constructor } = descriptor.kind() else {
            return Err(DiError::AbstractionNotResolvable(type_name.to_string()));
        };

        let mut args = Arguments::new(descriptor.name().clone());
        for parameter in parameters {
            let value = match parameter.type_name() {
                Some(dependency) => self.resolve_parameter(dependency)?,
                None => None,
            };
            args.push(parameter.clone(), value);
        }

        tracing::trace!(type_name, arguments = args.len(), "auto-wiring");
        constructor(args)
    }

    /// Resolves a typed parameter, or `None` when its type is unknown.
    fn resolve_parameter(&self, dependency: &str) -> DiResult<Option<AnyArc>> {
        let described = self.inner.types.describe(dependency);
        let known = self.has(dependency) || (self.inner.config.autowire && described.is_some());
        if !known {
            tracing::trace!(dependency, "unknown parameter type, argument omitted");
            return Ok(None);
        }

        let value = self.resolve(dependency)?;
        Ok(Some(match described {
            Some(descriptor) if descriptor.is_interface() => descriptor.cast(value),
            _ => value,
        }))
    }
}
