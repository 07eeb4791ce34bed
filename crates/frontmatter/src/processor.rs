//! Processor - Rewrite one agent document according to its policy

use crate::merger::HeaderMerger;
use crate::parser;
use crate::serializer::render_document;
use policy::PolicyTable;
use shared::{HeaderFields, MalformedHeaderError, PolicyClass, Result};
use tracing::debug;

/// A successful header rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Full new document text
    pub text: String,
    /// Class that drove the rewrite
    pub class: PolicyClass,
    /// Final header fields
    pub fields: HeaderFields,
    /// Whether `text` differs from the input
    pub changed: bool,
}

/// Result of processing one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Header rewritten
    Updated(Rewrite),
    /// First line is not `---`; document untouched
    NoHeader,
    /// Identifier not in the policy table; document untouched
    Uncategorized,
}

impl Outcome {
    /// Text to store for this outcome: the rewrite, or `raw` unchanged
    pub fn text<'a>(&'a self, raw: &'a str) -> &'a str {
        match self {
            Outcome::Updated(rewrite) => &rewrite.text,
            Outcome::NoHeader | Outcome::Uncategorized => raw,
        }
    }

    pub fn is_updated(&self) -> bool {
        matches!(self, Outcome::Updated(_))
    }

    /// Short outcome code
    pub fn code(&self) -> &'static str {
        match self {
            Outcome::Updated(_) => "updated",
            Outcome::NoHeader => "no_header",
            Outcome::Uncategorized => "uncategorized",
        }
    }
}

/// Runs parse, merge and render for documents against one policy table
#[derive(Debug, Clone)]
pub struct Processor<'a> {
    table: &'a PolicyTable,
    merger: HeaderMerger,
}

impl<'a> Processor<'a> {
    /// Create a processor with the standard default tier
    pub fn new(table: &'a PolicyTable) -> Self {
        Self {
            table,
            merger: HeaderMerger::new(),
        }
    }

    /// Use a custom merger (e.g. a different default tier)
    pub fn with_merger(mut self, merger: HeaderMerger) -> Self {
        self.merger = merger;
        self
    }

    pub fn table(&self) -> &PolicyTable {
        self.table
    }

    /// Process one document.
    ///
    /// Only a header that is opened but never closed is an error; every other
    /// condition is reported through [`Outcome`].
    pub fn process(&self, identifier: &str, raw: &str) -> Result<Outcome> {
        let parsed = parser::parse(raw).map_err(|e| MalformedHeaderError {
            identifier: identifier.to_string(),
            line_count: e.line_count,
        })?;

        let Some(parsed) = parsed else {
            debug!(identifier, "no header block");
            return Ok(Outcome::NoHeader);
        };

        let classification = self.table.classify(identifier);
        let (Some(class), Some(fields)) = (
            classification.class(),
            self.merger.merge(&parsed.fields, &classification),
        ) else {
            debug!(identifier, "not in policy table");
            return Ok(Outcome::Uncategorized);
        };

        let text = render_document(&fields, parsed.body);
        let changed = text != raw;
        debug!(identifier, %class, changed, fields = fields.len(), "header merged");

        Ok(Outcome::Updated(Rewrite {
            text,
            class,
            fields,
            changed,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{DynamicPolicy, FixedPolicy, MemoryScope, SyncError};

    const INPUT: &str = "---\nname: foo\ndescription: bar\n---\nBODY\n";

    fn create_test_table() -> PolicyTable {
        PolicyTable::builder()
            .fixed(
                "fixed.md",
                FixedPolicy::new(["Read", "Write"]).with_memory(MemoryScope::Project),
            )
            .fixed("reviewer.md", FixedPolicy::new(["Read", "Glob", "Grep"]))
            .dynamic("dynamic.md", DynamicPolicy::new(["Read"]))
            .build()
            .unwrap()
    }

    fn rewrite(outcome: Outcome) -> Rewrite {
        match outcome {
            Outcome::Updated(rewrite) => rewrite,
            other => panic!("expected update, got {:?}", other),
        }
    }

    // ============== Scenario Tests ==============

    #[test]
    fn test_fixed_scenario() {
        let table = create_test_table();
        let result = rewrite(Processor::new(&table).process("fixed.md", INPUT).unwrap());

        assert_eq!(
            result.text,
            "---\nname: foo\ndescription: \"bar\"\nmodel: sonnet\n\
             tools: Read, Write\nmemory: project\n---\nBODY\n"
        );
        assert_eq!(result.class, PolicyClass::Fixed);
        assert!(result.changed);
    }

    #[test]
    fn test_dynamic_scenario() {
        let table = create_test_table();
        let result = rewrite(Processor::new(&table).process("dynamic.md", INPUT).unwrap());

        assert_eq!(
            result.text,
            "---\nname: foo\ndescription: \"bar\"\ntools: Read\n---\nBODY\n"
        );
        assert_eq!(result.class, PolicyClass::Dynamic);
    }

    #[test]
    fn test_no_header_scenario() {
        let table = create_test_table();
        let raw = "# Fixed agent\n\nNo frontmatter here.\n";
        let outcome = Processor::new(&table).process("fixed.md", raw).unwrap();

        assert_eq!(outcome, Outcome::NoHeader);
        assert_eq!(outcome.text(raw), raw);
    }

    #[test]
    fn test_uncategorized_scenario() {
        let table = create_test_table();
        let outcome = Processor::new(&table).process("elsewhere/unknown.md", INPUT).unwrap();

        assert_eq!(outcome, Outcome::Uncategorized);
        assert_eq!(outcome.text(INPUT), INPUT);
        assert_eq!(outcome.code(), "uncategorized");
    }

    #[test]
    fn test_malformed_header_is_error() {
        let table = create_test_table();
        let result = Processor::new(&table).process("fixed.md", "---\nname: foo\nBODY\n");

        match result {
            Err(SyncError::MalformedHeader(err)) => assert_eq!(err.identifier, "fixed.md"),
            other => panic!("expected malformed header, got {:?}", other),
        }
    }

    // ============== Property Tests ==============

    #[test]
    fn test_idempotent_for_both_classes() {
        let table = create_test_table();
        let processor = Processor::new(&table);
        let inputs = [
            INPUT,
            "---\nmodel: opus\nname: 'quoted'\ncolor: red\ntools: Bash\n---\n\n\
             Body with --- inside\n",
            "---\ndescription: Says \"hi\"\n---",
        ];

        for identifier in ["fixed.md", "reviewer.md", "dynamic.md"] {
            for input in inputs {
                let first = rewrite(processor.process(identifier, input).unwrap());
                let second = rewrite(processor.process(identifier, &first.text).unwrap());
                assert_eq!(first.text, second.text, "{} / {:?}", identifier, input);
                assert!(!second.changed);
            }
        }
    }

    #[test]
    fn test_body_preserved() {
        let table = create_test_table();
        let body = "\n\n## Role\n\nname: not a header\n---\n  indented\r\n";
        let raw = format!("---\nname: foo\nmodel: haiku\n---{}", body);

        for identifier in ["fixed.md", "dynamic.md"] {
            let result = rewrite(Processor::new(&table).process(identifier, &raw).unwrap());
            assert!(result.text.ends_with(body));
            let reparsed = parser::parse(&result.text).unwrap().unwrap();
            assert_eq!(reparsed.body, body);
        }
    }

    #[test]
    fn test_dynamic_never_has_model() {
        let table = create_test_table();
        let raw = "---\nname: dev\nmodel: opus\ndescription: x\n---\n";
        let result = rewrite(Processor::new(&table).process("dynamic.md", raw).unwrap());

        assert!(!result.fields.contains_key("model"));
        assert!(!result.text.contains("model:"));
    }

    #[test]
    fn test_fixed_keeps_existing_model() {
        let table = create_test_table();
        let raw = "---\nname: rev\nmodel: opus\ndescription: x\n---\n";
        let result = rewrite(Processor::new(&table).process("reviewer.md", raw).unwrap());

        assert_eq!(
            result.text,
            "---\nname: rev\ndescription: \"x\"\nmodel: opus\ntools: Read, Glob, Grep\n---\n"
        );
    }

    #[test]
    fn test_custom_default_model() {
        let table = create_test_table();
        let processor =
            Processor::new(&table).with_merger(HeaderMerger::with_default_model("opus"));
        let result = rewrite(processor.process("reviewer.md", INPUT).unwrap());

        assert_eq!(result.fields.get("model"), Some("opus"));
    }

    #[test]
    fn test_already_converged_document_unchanged() {
        let table = create_test_table();
        let raw = "---\nname: foo\ndescription: \"bar\"\ntools: Read\n---\nBODY\n";
        let result = rewrite(Processor::new(&table).process("dynamic.md", raw).unwrap());

        assert!(!result.changed);
        assert_eq!(result.text, raw);
    }

    #[test]
    fn test_nested_quotes_lose_one_layer_per_pass() {
        let table = create_test_table();
        let processor = Processor::new(&table);

        let first = rewrite(processor.process("dynamic.md", "---\nname: '\"x\"'\n---\n").unwrap());
        assert_eq!(first.fields.get("name"), Some("\"x\""));
        assert!(first.text.starts_with("---\nname: \"x\"\n"));

        // Bare `name` output is parsed again with its quotes stripped
        let second = rewrite(processor.process("dynamic.md", &first.text).unwrap());
        assert_eq!(second.fields.get("name"), Some("x"));
        assert!(second.changed);

        let third = rewrite(processor.process("dynamic.md", &second.text).unwrap());
        assert!(!third.changed);
    }
}
