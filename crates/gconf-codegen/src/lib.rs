//! gconf serializers: render an evaluated symbol table as a document.
//!
//! Two formats are supported, both preserving declaration order and each
//! value's type tag:
//!
//! - XML ([`to_xml`]): `<configuration>` with one `<constant>` per entry
//! - JSON ([`to_json`]): `{"constants": [...]}`
//!
//! Each writer has a matching reader ([`read_xml`], [`read_json`]) that
//! recovers the `(name, value)` list, including the integer/float form of
//! every number.

pub mod error;
pub mod json;
pub mod xml;

pub use error::{EmitError, EmitResult};
pub use json::{read_json, to_json};
pub use xml::{read_xml, to_xml};
