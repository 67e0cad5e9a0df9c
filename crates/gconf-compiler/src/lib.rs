//! gconf compiler: orchestrates the full compilation pipeline.
//!
//! ```text
//! gconf Source → Lexer → Parser → Evaluator → Symbol Table → XML / JSON
//! ```
//!
//! Source is consumed one line at a time. Each declaration is evaluated
//! before the next line is read, and the first failure of any kind ends
//! compilation.

pub mod options;

pub use options::{CompileOptions, OutputFormat, DEFAULT_INDENT};

use gconf_codegen::{to_json, to_xml, EmitError};
use gconf_eval::DeclarationProcessor;
use gconf_types::{CompileErrors, ErrorCode, GconfError, SourceFile, Span, SymbolTable};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, info_span};

// ══════════════════════════════════════════════════════════════════════════════
// Compile Result
// ══════════════════════════════════════════════════════════════════════════════

/// Everything a caller needs to know about one compilation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileResult {
    /// Whether compilation succeeded.
    pub success: bool,
    /// The rendered document (if successful).
    pub output: Option<String>,
    /// The error (at most one) and any warnings seen before it.
    pub errors: CompileErrors,
    /// SHA-256 hash of the source text (hex).
    pub source_hash: String,
}

// ══════════════════════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════════════════════

/// Compile source to an XML document with default options.
pub fn compile(source: &str, name: &str) -> Result<String, CompileErrors> {
    compile_with_options(source, name, &CompileOptions::default())
}

/// Compile source to a document in the requested format.
pub fn compile_with_options(
    source: &str,
    name: &str,
    options: &CompileOptions,
) -> Result<String, CompileErrors> {
    let result = compile_to_result(source, name, options);
    match result.output {
        Some(output) if result.success => Ok(output),
        _ => Err(result.errors),
    }
}

/// Full pipeline: evaluate → serialize, with diagnostics and source hash.
pub fn compile_to_result(source: &str, name: &str, options: &CompileOptions) -> CompileResult {
    let span = info_span!("compile", file = name, format = %options.format);
    let _guard = span.enter();

    let source_hash = source_hash(source);
    let source_file = SourceFile::new(name, source);
    let mut diagnostics = CompileErrors::default();

    let output = process(&source_file, &mut diagnostics).and_then(|symbols| {
        match emit(&symbols, options) {
            Ok(document) => {
                info!(
                    constants = symbols.len(),
                    warnings = diagnostics.total_warnings,
                    bytes = document.len(),
                    "compiled"
                );
                Some(document)
            }
            Err(e) => {
                diagnostics.push_error(output_error(name, e));
                None
            }
        }
    });

    CompileResult {
        success: output.is_some(),
        output,
        errors: diagnostics,
        source_hash,
    }
}

/// Evaluate without serializing. The returned diagnostics hold the first
/// error, if any, and every warning seen before it.
pub fn check(source: &str, name: &str) -> CompileErrors {
    let source_file = SourceFile::new(name, source);
    let mut diagnostics = CompileErrors::default();
    process(&source_file, &mut diagnostics);
    diagnostics
}

/// Evaluate source into its final symbol table.
pub fn evaluate_source(source: &str, name: &str) -> Result<SymbolTable, CompileErrors> {
    let source_file = SourceFile::new(name, source);
    let mut diagnostics = CompileErrors::default();
    process(&source_file, &mut diagnostics).ok_or(diagnostics)
}

/// Render an evaluated table in the requested format.
pub fn emit(symbols: &SymbolTable, options: &CompileOptions) -> Result<String, EmitError> {
    match options.format {
        OutputFormat::Xml => to_xml(symbols, options.indent),
        OutputFormat::Json => to_json(symbols),
    }
}

/// Hex-encoded SHA-256 of the source text.
pub fn source_hash(source: &str) -> String {
    hex::encode(Sha256::digest(source.as_bytes()))
}

// ══════════════════════════════════════════════════════════════════════════════
// Internals
// ══════════════════════════════════════════════════════════════════════════════

fn process(source_file: &SourceFile, diagnostics: &mut CompileErrors) -> Option<SymbolTable> {
    let mut processor = DeclarationProcessor::new(source_file);
    let outcome = processor.run();
    let (symbols, warnings) = processor.finish();

    for warning in warnings {
        diagnostics.push_warning(warning);
    }
    match outcome {
        Ok(()) => Some(symbols),
        Err(e) => {
            debug!(code = %e.code, line = e.line(), "compilation stopped");
            diagnostics.push_error(e);
            None
        }
    }
}

/// Serializer failures have no source position; they are reported at 0:0.
fn output_error(name: &str, e: EmitError) -> GconfError {
    GconfError::new(
        name,
        ErrorCode::OUTPUT_FAILED,
        e.to_string(),
        Span::point(0, 0),
        "",
    )
}
