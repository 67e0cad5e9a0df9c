//! Declaration processing: the sole writer of the symbol table.

use gconf_parser::Parser;
use gconf_types::ast::Declaration;
use gconf_types::{ErrorCode, GconfError, SourceFile, SymbolTable};
use tracing::debug;

use crate::evaluator::Evaluator;

/// Evaluates declarations in source order and records their values.
///
/// Each declaration sees only the constants declared on earlier lines.
/// Re-declaring a name overwrites its value in place and leaves an E500
/// warning behind.
pub struct DeclarationProcessor<'src> {
    source_file: &'src SourceFile,
    symbols: SymbolTable,
    warnings: Vec<GconfError>,
}

impl<'src> DeclarationProcessor<'src> {
    pub fn new(source_file: &'src SourceFile) -> Self {
        Self {
            source_file,
            symbols: SymbolTable::new(),
            warnings: Vec::new(),
        }
    }

    /// Parse and evaluate the whole source file, one line at a time.
    /// Stops at the first error of any kind.
    pub fn run(&mut self) -> Result<(), GconfError> {
        for declaration in Parser::new(self.source_file) {
            self.declare(&declaration?)?;
        }
        debug!(
            file = %self.source_file.name,
            constants = self.symbols.len(),
            "processed declarations"
        );
        Ok(())
    }

    /// Evaluate one declaration against the constants seen so far and bind
    /// the result.
    pub fn declare(&mut self, decl: &Declaration) -> Result<(), GconfError> {
        let value = Evaluator::new(&self.symbols)
            .eval_expr(&decl.value)
            .map_err(|e| e.into_gconf_error(self.source_file))?;

        let name = &decl.name.name;
        debug!(line = decl.span.start_line, %name, %value, "declared constant");

        if self.symbols.insert(name.clone(), value).is_some() {
            debug!(line = decl.span.start_line, %name, "constant redeclared");
            let source_line = self
                .source_file
                .line(decl.span.start_line)
                .unwrap_or("");
            self.warnings.push(
                GconfError::warning(
                    &self.source_file.name,
                    ErrorCode::CONSTANT_REDECLARED,
                    format!("constant '{name}' is redeclared; the new value replaces the old one"),
                    decl.name.span,
                    source_line,
                )
                .with_suggestion("Remove the earlier declaration or pick a different name"),
            );
        }
        Ok(())
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn warnings(&self) -> &[GconfError] {
        &self.warnings
    }

    /// Consume the processor, yielding the final table and any warnings.
    pub fn finish(self) -> (SymbolTable, Vec<GconfError>) {
        (self.symbols, self.warnings)
    }
}
