//! End-to-end tests for the Java pipeline

use draughtsman::parse_java;
use draughtsman::prelude::*;

const SCHOOL_SOURCE: &str = "
package com.example.school;

public abstract class Person {
    protected String name;
    private int age;

    public String getName() { return name; }
    public abstract String describe();
}

public class Professor extends Person {
    private String department;

    public Professor(String name) {
        this.name = name;
    }

    public String describe() { return department; }
}

public class Course implements Schedulable {
    private String title;
    private Professor instructor;
    private List<Student> roster;

    public void enroll(Student student) {
        roster.add(student);
    }
}

public class Student extends Person {
    private double gpa;

    public String describe() { return name; }
}
";

#[test]
fn test_school_source_classes() {
    let db = parse_java(SCHOOL_SOURCE).unwrap();

    // 4 declarations plus a stub for the undeclared Schedulable
    assert_eq!(db.class_count(), 5);

    let person = db.get_class("Person").unwrap();
    assert_eq!(person.kind, ClassKind::Class);
    assert_eq!(person.package_name, "com.example.school");
    assert_eq!(person.attributes.len(), 2);
    assert_eq!(person.methods.len(), 2);

    let describe = person
        .methods
        .iter()
        .find(|m| m.name == "describe")
        .unwrap();
    assert!(describe.is_abstract);
}

#[test]
fn test_school_source_relationships() {
    let db = parse_java(SCHOOL_SOURCE).unwrap();

    let find = |source: &str, target: &str| {
        db.relationships()
            .iter()
            .find(|r| r.source == source && r.target == target)
            .unwrap_or_else(|| panic!("missing relationship {} -> {}", source, target))
    };

    assert_eq!(find("Professor", "Person").kind, UmlRelationshipKind::Inheritance);
    assert_eq!(find("Student", "Person").kind, UmlRelationshipKind::Inheritance);
    assert_eq!(
        find("Course", "Schedulable").kind,
        UmlRelationshipKind::Implementation
    );

    // Course holds a Professor field, so a composition edge appears;
    // the List<Student> field is a common type and produces nothing
    let composition = find("Course", "Professor");
    assert_eq!(composition.kind, UmlRelationshipKind::Composition);
    assert_eq!(composition.target_label.as_deref(), Some("1"));

    assert_eq!(db.relationship_count(), 4);
}

#[test]
fn test_stub_interface_for_undeclared_target() {
    let db = parse_java(SCHOOL_SOURCE).unwrap();

    let stub = db.get_class("Schedulable").unwrap();
    assert_eq!(stub.kind, ClassKind::Interface);
    assert!(stub.attributes.is_empty());
    assert!(stub.methods.is_empty());
}

#[test]
fn test_constructors_never_become_methods() {
    let db = parse_java(SCHOOL_SOURCE).unwrap();

    let professor = db.get_class("Professor").unwrap();
    assert!(professor.methods.iter().all(|m| m.name != "Professor"));
    assert_eq!(professor.methods.len(), 1);
}

#[test]
fn test_stub_parent_for_undeclared_extends_target() {
    let db = parse_java("class Derived extends Base {}").unwrap();

    assert_eq!(db.class_count(), 2);
    assert_eq!(db.get_class("Base").unwrap().kind, ClassKind::Class);

    let rel = &db.relationships()[0];
    assert_eq!(rel.source, "Derived");
    assert_eq!(rel.target, "Base");
    assert_eq!(rel.kind, UmlRelationshipKind::Inheritance);
}

#[test]
fn test_visibility_mapping() {
    let db = parse_java(
        "class Mixed {
            public int a;
            protected int b;
            private int c;
            int d;
        }",
    )
    .unwrap();

    let class = db.get_class("Mixed").unwrap();
    let vis: Vec<_> = class.attributes.iter().map(|a| a.visibility).collect();
    assert_eq!(
        vis,
        vec![
            Visibility::Public,
            Visibility::Protected,
            Visibility::Private,
            Visibility::Package,
        ]
    );
}

#[test]
fn test_method_parameters_preserved_in_order() {
    let db = parse_java(
        "class Geometry {
            public double area(double width, double height) { return width * height; }
        }",
    )
    .unwrap();

    let area = &db.get_class("Geometry").unwrap().methods[0];
    assert_eq!(area.parameters.len(), 2);
    assert_eq!(area.parameters[0].name, "width");
    assert_eq!(area.parameters[1].name, "height");
    assert_eq!(area.return_type, "double");
}

#[test]
fn test_common_types_produce_no_composition() {
    let db = parse_java(
        "class Inventory {
            private String label;
            private Map<String, Integer> counts;
            private ArrayList items;
        }",
    )
    .unwrap();

    assert_eq!(db.relationship_count(), 0);
}
