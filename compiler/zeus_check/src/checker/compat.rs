//! Written types and implicit widening.
//!
//! Built-in types are totally ordered (see [`Type`]). A value may be stored
//! into a target whose type ranks at or below the value's type, so a
//! compile-time integer fits anywhere while an `s64` does not fit a `u8`.
//! Pointers, strings and structures convert only to themselves.

use zeus_ir::{Span, Type, TypeRef, TypeRefKind};

use super::FileChecker;
use crate::{CheckError, CheckErrorKind, TypeInfo};

impl FileChecker<'_> {
    pub(super) fn resolve_type(&self, written: &TypeRef) -> Result<TypeInfo, CheckError> {
        let ty = match written.kind {
            TypeRefKind::Builtin(ty) => ty,
            TypeRefKind::Named(name) => match self.state.structs.lookup(name) {
                Some(id) => Type::Struct(id),
                None => {
                    return Err(self.error(written.span, CheckErrorKind::StructureNotDefined));
                }
            },
        };
        Ok(self.state.structs.info(ty, written.pointer_depth))
    }

    /// Whether `value` may be stored into a `target` slot.
    pub(super) fn check_assignable(
        &self,
        target: TypeInfo,
        value: TypeInfo,
        span: Span,
    ) -> Result<(), CheckError> {
        if target.pointer_depth != value.pointer_depth {
            return Err(self.error(span, CheckErrorKind::PointerDepthMismatch));
        }

        let exact = target.is_pointer()
            || target.ty.is_struct()
            || value.ty.is_struct()
            || target.ty == Type::CompString
            || value.ty == Type::CompString;
        if exact {
            if target.ty == value.ty {
                return Ok(());
            }
            return Err(self.error(
                span,
                CheckErrorKind::TypeMismatch {
                    expected: self.type_name(target),
                    found: self.type_name(value),
                },
            ));
        }

        if value.ty < target.ty {
            return Err(self.error(span, CheckErrorKind::ExplicitCast));
        }
        Ok(())
    }
}
