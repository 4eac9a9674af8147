//! Logical to physical SQL: translation and validation of the result.
crate::reexport!(translator);
crate::reexport!(validator);
