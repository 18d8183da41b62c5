//! Java source parser
//!
//! Parses top-level Java class/interface/enum declarations into the UML
//! database in three passes: declarations, members, relationships. All
//! intermediate state lives in a per-call resolution context, so a
//! single parser instance can be reused across independent inputs.
//!
//! Member extraction stays pattern-based: fields and method signatures
//! are matched lexically inside each class body, not parsed against a
//! full Java grammar. Nested declarations are not handled.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, span, trace, Level};

use super::database::{
    ClassKind, UmlAttribute, UmlClass, UmlDatabase, UmlMethod, UmlParameter, UmlRelationship,
    UmlRelationshipKind, Visibility,
};
use crate::core::Parser;

/// Declaration header: `class|interface|enum Name [extends P] [implements I, ...] {`
static CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:(?:public|private|protected)\s+)?(?:(?:abstract|static|final)\s+)*(class|interface|enum)\s+(\w+)(?:\s+extends\s+(\w+))?(?:\s+implements\s+([\w,\s]+?))?\s*\{",
    )
    .expect("class pattern")
});

/// Field: optional visibility, up to two modifier slots, type, name,
/// optional discarded initializer
static FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)(?:^|\s)(?:(public|private|protected)\s+)?(?:(static|final)\s+)?(?:(static|final)\s+)?(\w+(?:<[\w<>\[\],\s]*>)?(?:\[\])?)\s+(\w+)\s*(?:=\s*[^;]*)?;",
    )
    .expect("field pattern")
});

/// Method signature: same modifier shape plus return type, name, and a
/// raw parameter list ending in `{` or `;`
static METHOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)(?:^|\s)(?:(public|private|protected)\s+)?(?:(static|abstract|final)\s+)?(?:(static|abstract|final)\s+)?(\w+(?:<[\w<>\[\],\s]*>)?(?:\[\])?)\s+(\w+)\s*\(([^)]*)\)\s*(?:\{|;)",
    )
    .expect("method pattern")
});

/// Parameter list item: (type, name) pairs left to right
static PARAMETER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\w+(?:<[\w<>\[\],\s]*>)?(?:\[\])?)\s+(\w+)").expect("parameter pattern")
});

/// Single `package a.b.c;` declaration
static PACKAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*package\s+([\w.]+)\s*;").expect("package pattern"));

/// Java primitive types, matched exactly
const PRIMITIVE_TYPES: &[&str] = &[
    "int", "boolean", "double", "float", "long", "short", "byte", "char", "void",
];

/// Common JDK types, matched by substring containment so that generic
/// forms like `List<Course>` are excluded too
const COMMON_TYPES: &[&str] = &[
    "String",
    "Integer",
    "Boolean",
    "Double",
    "Float",
    "Long",
    "Short",
    "Byte",
    "Object",
    "List",
    "Map",
    "Set",
    "Collection",
    "ArrayList",
    "HashMap",
    "HashSet",
];

/// Per-call resolution state: deferred edges recorded during pass 1 and
/// resolved during pass 3, plus the body location of each declaration
#[derive(Default)]
struct ResolutionContext {
    package_name: String,
    bodies: Vec<ClassBody>,
    pending_extends: Vec<(String, String)>,
    pending_implements: Vec<(String, String)>,
}

/// Body byte range of the declaration that produced `class_index`
struct ClassBody {
    class_index: usize,
    start: usize,
    end: usize,
}

/// Java source parser
pub struct JavaParser;

impl JavaParser {
    pub fn new() -> Self {
        Self
    }

    /// Find the end of a brace-delimited body whose opening brace sits
    /// at `open`. Returns the index of the matching close brace, or the
    /// input length when the body is unterminated.
    fn body_end(input: &str, open: usize) -> usize {
        let mut depth = 0usize;
        for (i, c) in input[open..].char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return open + i;
                    }
                }
                _ => {}
            }
        }
        input.len()
    }

    /// Blank out nested `{...}` regions so member patterns only see the
    /// class body's top level; method bodies must not contribute fields
    fn strip_nested_blocks(body: &str) -> String {
        let mut out = String::with_capacity(body.len());
        let mut depth = 0usize;
        for c in body.chars() {
            match c {
                '{' => {
                    depth += 1;
                    out.push('{');
                }
                '}' => {
                    depth = depth.saturating_sub(1);
                    out.push('}');
                }
                '\n' => out.push('\n'),
                _ if depth > 0 => out.push(' '),
                _ => out.push(c),
            }
        }
        out
    }

    /// Pass 1: create a class per declaration header and record the
    /// deferred edges and body ranges
    fn collect_declarations(
        &self,
        input: &str,
        database: &mut UmlDatabase,
        ctx: &mut ResolutionContext,
    ) {
        ctx.package_name = PACKAGE_RE
            .captures(input)
            .map(|c| c[1].to_string())
            .unwrap_or_default();

        for caps in CLASS_RE.captures_iter(input) {
            let kind = ClassKind::from_keyword(&caps[1]).unwrap_or_default();
            let name = caps[2].to_string();

            let mut class = UmlClass::with_kind(name.clone(), kind);
            class.package_name = ctx.package_name.clone();

            let class_index = database.class_count();
            let open = caps.get(0).map(|m| m.end() - 1).unwrap_or(0);
            let end = Self::body_end(input, open);
            ctx.bodies.push(ClassBody {
                class_index,
                start: open + 1,
                end,
            });

            if let Some(parent) = caps.get(3) {
                ctx.pending_extends.push((name.clone(), parent.as_str().to_string()));
            }
            if let Some(interfaces) = caps.get(4) {
                for interface in interfaces.as_str().split(',') {
                    let interface = interface.trim();
                    if !interface.is_empty() {
                        ctx.pending_implements.push((name.clone(), interface.to_string()));
                    }
                }
            }

            trace!(class = %name, kind = %kind, "Found declaration");
            let _ = database.add_class(class);
        }
    }

    /// Pass 2: scan each recorded body for fields and methods
    fn collect_members(
        &self,
        input: &str,
        database: &mut UmlDatabase,
        ctx: &ResolutionContext,
    ) {
        for body in &ctx.bodies {
            let raw = &input[body.start..body.end.min(input.len())];
            let scanned = Self::strip_nested_blocks(raw);
            let Some(class) = database.classes_mut().get_mut(body.class_index) else {
                continue;
            };

            for caps in FIELD_RE.captures_iter(&scanned) {
                let visibility =
                    Visibility::from_keyword(caps.get(1).map_or("", |m| m.as_str()));
                let modifier1 = caps.get(2).map_or("", |m| m.as_str());
                let modifier2 = caps.get(3).map_or("", |m| m.as_str());
                let is_static = modifier1 == "static" || modifier2 == "static";
                let is_final = modifier1 == "final" || modifier2 == "final";

                class.add_attribute(
                    UmlAttribute::new(&caps[5], &caps[4])
                        .with_visibility(visibility)
                        .with_modifiers(is_static, is_final),
                );
            }

            for caps in METHOD_RE.captures_iter(&scanned) {
                let name = &caps[5];
                // A "method" named like its class is a constructor
                if name == class.name {
                    continue;
                }

                let visibility =
                    Visibility::from_keyword(caps.get(1).map_or("", |m| m.as_str()));
                let modifier1 = caps.get(2).map_or("", |m| m.as_str());
                let modifier2 = caps.get(3).map_or("", |m| m.as_str());
                let is_static = modifier1 == "static" || modifier2 == "static";
                let is_abstract = modifier1 == "abstract" || modifier2 == "abstract";

                let mut method = UmlMethod::new(name, &caps[4])
                    .with_visibility(visibility)
                    .with_modifiers(is_static, is_abstract);

                for param in PARAMETER_RE.captures_iter(&caps[6]) {
                    method.add_parameter(UmlParameter::new(&param[2], &param[1]));
                }

                class.add_method(method);
            }

            debug!(
                class = %class.name,
                attributes = class.attributes.len(),
                methods = class.methods.len(),
                "Collected members"
            );
        }
    }

    /// Pass 3: resolve deferred inheritance/implementation edges against
    /// the completed registry, synthesizing stubs for unknown names, then
    /// derive composition edges from attribute types
    fn resolve_relationships(&self, database: &mut UmlDatabase, ctx: ResolutionContext) {
        let resolve_span = span!(
            Level::DEBUG,
            "resolve_relationships",
            extends = ctx.pending_extends.len(),
            implements = ctx.pending_implements.len()
        );
        let _enter = resolve_span.enter();

        for (child, parent) in ctx.pending_extends {
            if !database.has_class(&parent) {
                debug!(class = %parent, "Synthesizing stub class for extends target");
                let _ = database.add_class(UmlClass::new(parent.clone()));
            }
            let _ = database.add_relationship(UmlRelationship::new(
                child,
                parent,
                UmlRelationshipKind::Inheritance,
            ));
        }

        for (class, interface) in ctx.pending_implements {
            if !database.has_class(&interface) {
                debug!(class = %interface, "Synthesizing stub interface for implements target");
                let _ = database.add_class(UmlClass::with_kind(
                    interface.clone(),
                    ClassKind::Interface,
                ));
            }
            let _ = database.add_relationship(UmlRelationship::new(
                class,
                interface,
                UmlRelationshipKind::Implementation,
            ));
        }

        // A field whose declared type names a known class is modeled as
        // composition; aggregation is never inferred
        let mut compositions = Vec::new();
        for class in database.classes() {
            for attribute in &class.attributes {
                if is_primitive_or_common(&attribute.type_name) {
                    continue;
                }
                if database.has_class(&attribute.type_name) {
                    compositions.push(
                        UmlRelationship::new(
                            class.name.clone(),
                            attribute.type_name.clone(),
                            UmlRelationshipKind::Composition,
                        )
                        .with_target_label("1"),
                    );
                }
            }
        }
        for composition in compositions {
            let _ = database.add_relationship(composition);
        }
    }
}

/// Types that never produce composition edges: Java primitives exactly,
/// common JDK class names by substring containment
fn is_primitive_or_common(type_name: &str) -> bool {
    if PRIMITIVE_TYPES.contains(&type_name) {
        return true;
    }
    COMMON_TYPES.iter().any(|common| type_name.contains(common))
}

impl Default for JavaParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<UmlDatabase> for JavaParser {
    fn parse(&self, input: &str, database: &mut UmlDatabase) -> Result<()> {
        let parse_span = span!(Level::INFO, "parse_java", input_len = input.len());
        let _enter = parse_span.enter();

        let mut ctx = ResolutionContext::default();

        self.collect_declarations(input, database, &mut ctx);
        self.collect_members(input, database, &ctx);
        self.resolve_relationships(database, ctx);

        debug!(
            classes = database.class_count(),
            relationships = database.relationship_count(),
            "Java parsing completed"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "java"
    }

    fn version(&self) -> &'static str {
        "0.2.0"
    }

    fn can_parse(&self, input: &str) -> bool {
        CLASS_RE.is_match(input)
    }
}
