//! Multi-source front end.
//!
//! Each source is scanned and parsed on its own; the class lists are then
//! concatenated, in the order the sources were given, into one program.
//! Which file a class came from is kept next to the program rather than
//! inside the tree.

use std::{path::Path, rc::Rc};

use tracing::debug;

use crate::{
    ast::ast::{ClassDef, Program},
    errors::errors::Diagnostic,
    lexer::lexer::Lexer,
    parser::parser::parse,
    visitor::counter::NodeCounter,
    Position,
};

/// One named input.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        SourceFile {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Names a source after a path, dropping any directories, which is how
    /// diagnostics refer to it.
    pub fn from_path(path: &Path, text: String) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        SourceFile { name, text }
    }
}

/// A merged program plus the provenance of each of its classes.
#[derive(Debug, Clone)]
pub struct ParsedProgram {
    pub program: Program,
    /// `class_sources[i]` is the source that `program.classes[i]` came from.
    pub class_sources: Vec<Rc<String>>,
}

impl ParsedProgram {
    pub fn source_of(&self, class_index: usize) -> Option<&str> {
        self.class_sources.get(class_index).map(|name| name.as_str())
    }

    pub fn classes_with_sources(&self) -> impl Iterator<Item = (&ClassDef, &str)> {
        self.program
            .classes
            .iter()
            .zip(self.class_sources.iter().map(|name| name.as_str()))
    }
}

/// Parses every source and merges the results.
///
/// # Returns
///
/// The merged program when no source produced a diagnostic. Otherwise every
/// diagnostic from every source, grouped by source in input order, and no
/// program at all.
pub fn compile_sources(sources: &[SourceFile]) -> Result<ParsedProgram, Vec<Diagnostic>> {
    let mut classes = vec![];
    let mut class_sources = vec![];
    let mut diagnostics = vec![];
    let mut position = None;

    for source in sources {
        let name = Rc::new(source.name.clone());

        match parse(Lexer::new(source.text.clone())) {
            Ok(program) => {
                debug!(source = %name, classes = program.classes.len(), "parsed");
                position.get_or_insert(program.position);
                class_sources.extend(program.classes.iter().map(|_| Rc::clone(&name)));
                classes.extend(program.classes);
            }
            Err(errors) => {
                debug!(source = %name, errors = errors.len(), "rejected");
                diagnostics.extend(
                    errors
                        .into_iter()
                        .map(|error| Diagnostic::new(name.as_str(), error)),
                );
            }
        }
    }

    if !diagnostics.is_empty() {
        return Err(diagnostics);
    }

    let program = Program {
        classes,
        position: position.unwrap_or_else(|| Position::new(1, 1)),
    };

    let counts = NodeCounter::count(&program);
    debug!(
        classes = counts.classes,
        methods = counts.methods,
        attributes = counts.attributes,
        expressions = counts.expressions,
        "merged program"
    );

    Ok(ParsedProgram {
        program,
        class_sources,
    })
}

#[cfg(test)]
mod tests {
    use super::{compile_sources, SourceFile};

    #[test]
    fn test_sources_are_merged_in_order() {
        let sources = vec![
            SourceFile::new("a.cl", "class A { };"),
            SourceFile::new("b.cl", "class B { }; class C inherits B { };"),
        ];

        let parsed = compile_sources(&sources).unwrap();
        let names: Vec<_> = parsed
            .classes_with_sources()
            .map(|(class, source)| (class.name.as_str(), source))
            .collect();

        assert_eq!(names, vec![("A", "a.cl"), ("B", "b.cl"), ("C", "b.cl")]);
        assert_eq!(parsed.source_of(2), Some("b.cl"));
        assert_eq!(parsed.source_of(3), None);
    }

    #[test]
    fn test_one_bad_source_rejects_everything() {
        let sources = vec![
            SourceFile::new("bad.cl", "class A { x : Int <- ; };"),
            SourceFile::new("good.cl", "class B { };"),
        ];

        let diagnostics = compile_sources(&sources).unwrap_err();

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].source, "bad.cl");
    }

    #[test]
    fn test_diagnostics_from_every_source() {
        let sources = vec![
            SourceFile::new("one.cl", "class A { f() : Int { } };"),
            SourceFile::new("two.cl", "class B { x : Int <- # ; };"),
        ];

        let diagnostics = compile_sources(&sources).unwrap_err();
        let sources: Vec<_> = diagnostics.iter().map(|d| d.source.as_str()).collect();

        assert!(sources.contains(&"one.cl"));
        assert!(sources.contains(&"two.cl"));
    }

    #[test]
    fn test_from_path_keeps_only_file_name() {
        let path = std::path::Path::new("tests/cool/main.cl");
        let source = SourceFile::from_path(path, String::new());
        assert_eq!(source.name, "main.cl");
    }
}
